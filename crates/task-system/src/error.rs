use thiserror::Error;

/// The dispatcher has been shut down and no longer accepts work.
#[derive(Debug, Error)]
#[error("task dispatcher has been shut down")]
pub struct DispatcherShutdown;

/// Error surfaced by awaiting a [`crate::DispatchedTaskHandle`].
#[derive(Debug, Error)]
pub enum RunError<E> {
    #[error(transparent)]
    Task(#[from] E),
    #[error("worker dropped before reporting a result")]
    WorkerLost,
}
