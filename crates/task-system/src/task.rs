use async_trait::async_trait;
use uuid::Uuid;

use crate::interrupter::Interrupter;

/// Identity of a dispatched task. Stable across pause/resume since the task
/// value itself (and therefore its id) persists in the worker's queue.
pub type TaskId = Uuid;

/// Outcome of one `Task::run` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    /// The task completed its work.
    Done,
    /// The task observed a pause request and stopped at a safe point.
    Paused,
    /// The task observed a cancel request and stopped at a safe point.
    Canceled,
}

/// One unit of schedulable work. Implementors own their progress state so a
/// `Paused` task can simply be re-enqueued and resumed by calling `run`
/// again.
#[async_trait]
pub trait Task<E>: Send + Sync + 'static
where
    E: Send + Sync + 'static,
{
    /// Stable identity, used for logging, dedup and requeue bookkeeping.
    fn id(&self) -> TaskId;

    /// Execute (or resume) this task, observing `interrupter` at every
    /// suspension point.
    async fn run(&mut self, interrupter: &Interrupter) -> Result<ExecStatus, E>;

    /// Tasks that return `true` jump ahead of normal-priority tasks already
    /// queued on the same worker pool.
    fn with_priority(&self) -> bool {
        false
    }
}

pub type BoxedTask<E> = Box<dyn Task<E>>;
