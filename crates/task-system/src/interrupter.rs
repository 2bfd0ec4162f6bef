use tokio::sync::watch;

/// What kind of interruption was requested of a running task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptionKind {
    Pause,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunningState {
    Running,
    Paused,
    Canceled,
}

pub(crate) type RunningStateRx = watch::Receiver<RunningState>;

/// Handle held by the worker loop to signal a running task.
#[derive(Clone)]
pub struct InterrupterHandle {
    tx: watch::Sender<RunningState>,
}

impl InterrupterHandle {
    pub(crate) fn new() -> (Self, watch::Receiver<RunningState>) {
        let (tx, rx) = watch::channel(RunningState::Running);
        (Self { tx }, rx)
    }

    pub fn pause(&self) {
        let _ = self.tx.send(RunningState::Paused);
    }

    pub fn cancel(&self) {
        let _ = self.tx.send(RunningState::Canceled);
    }
}

/// Awaited inside `Task::run` at every suspension point via
/// [`Interrupter::wait`]. Races naturally against a task's own work using
/// `futures_concurrency::future::Race` (see `medialib-core`'s parser
/// services for an example).
pub struct Interrupter {
    rx: watch::Receiver<RunningState>,
}

impl Interrupter {
    pub(crate) fn new(rx: watch::Receiver<RunningState>) -> Self {
        Self { rx }
    }

    /// Non-blocking check, for suspension point (a): between two tasks in a
    /// worker loop.
    pub fn is_interrupted(&self) -> Option<InterruptionKind> {
        match *self.rx.borrow() {
            RunningState::Running => None,
            RunningState::Paused => Some(InterruptionKind::Pause),
            RunningState::Canceled => Some(InterruptionKind::Cancel),
        }
    }

    /// Resolves once a pause or cancel is signaled. A sender dropped without
    /// an explicit signal (dispatcher torn down) resolves as `Cancel`, so a
    /// task never hangs on a dead dispatcher.
    pub async fn wait(&self) -> InterruptionKind {
        if let Some(kind) = self.is_interrupted() {
            return kind;
        }
        let mut rx = self.rx.clone();
        loop {
            if rx.changed().await.is_err() {
                return InterruptionKind::Cancel;
            }
            match *rx.borrow() {
                RunningState::Running => continue,
                RunningState::Paused => return InterruptionKind::Pause,
                RunningState::Canceled => return InterruptionKind::Cancel,
            }
        }
    }
}
