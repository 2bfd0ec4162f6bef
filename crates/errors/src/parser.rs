use thiserror::Error;

/// Failure modes of the Parser Pipeline (§4.4/§7). Note that
/// `TemporaryUnavailable`/`Requeue`/`Fatal` are *task statuses*, not errors —
/// this enum covers genuine exceptional conditions (service registration,
/// timeouts) that surface around the task state machine rather than as one
/// of its own outcomes.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("no parser service registered for step {0:?}")]
    UnknownService(String),

    #[error("step timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("task system error: {0}")]
    TaskSystem(String),

    #[error("storage error while updating task state: {0}")]
    Storage(#[from] crate::storage::StorageError),
}
