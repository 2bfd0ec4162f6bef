//! Reconstructed task runtime: a `Task<E>` trait executed by a pool of
//! workers per dispatcher, with cooperative pause/cancel and priority
//! scheduling. The public surface intentionally matches what callers in
//! this workspace need from a job/task system: `Task`, `ExecStatus`,
//! `Interrupter`, `TaskId`, and a `TaskDispatcher` to hand work to.

mod dispatcher;
mod error;
mod interrupter;
mod task;
mod worker;

pub use dispatcher::{BaseTaskDispatcher, DispatchedTaskHandle, TaskDispatcher};
pub use error::{DispatcherShutdown, RunError};
pub use interrupter::{InterruptionKind, Interrupter, InterrupterHandle};
pub use task::{BoxedTask, ExecStatus, Task, TaskId};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use thiserror::Error;

    #[derive(Debug, Error)]
    enum SampleError {
        #[error("sample task error")]
        Sample,
    }

    struct ReadyTask {
        id: TaskId,
        ran: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Task<SampleError> for ReadyTask {
        fn id(&self) -> TaskId {
            self.id
        }

        async fn run(&mut self, _interrupter: &Interrupter) -> Result<ExecStatus, SampleError> {
            self.ran.fetch_add(1, Ordering::SeqCst);
            Ok(ExecStatus::Done)
        }
    }

    struct NeverTask {
        id: TaskId,
    }

    #[async_trait]
    impl Task<SampleError> for NeverTask {
        fn id(&self) -> TaskId {
            self.id
        }

        async fn run(&mut self, interrupter: &Interrupter) -> Result<ExecStatus, SampleError> {
            match interrupter.wait().await {
                InterruptionKind::Pause => Ok(ExecStatus::Paused),
                InterruptionKind::Cancel => Ok(ExecStatus::Canceled),
            }
        }
    }

    struct BogusTask {
        id: TaskId,
    }

    #[async_trait]
    impl Task<SampleError> for BogusTask {
        fn id(&self) -> TaskId {
            self.id
        }

        async fn run(&mut self, _interrupter: &Interrupter) -> Result<ExecStatus, SampleError> {
            Err(SampleError::Sample)
        }
    }

    #[tokio::test]
    async fn dispatches_and_runs_ready_task() {
        let dispatcher = BaseTaskDispatcher::<SampleError>::new(2);
        let ran = Arc::new(AtomicUsize::new(0));
        let handle = dispatcher
            .dispatch(Box::new(ReadyTask {
                id: TaskId::new_v4(),
                ran: ran.clone(),
            }))
            .await;
        let status = handle.await.expect("task run should not error");
        assert_eq!(status, ExecStatus::Done);
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn bogus_task_surfaces_error() {
        let dispatcher = BaseTaskDispatcher::<SampleError>::new(1);
        let handle = dispatcher
            .dispatch(Box::new(BogusTask { id: TaskId::new_v4() }))
            .await;
        let result = handle.await;
        assert!(matches!(result, Err(RunError::Task(SampleError::Sample))));
    }

    #[tokio::test]
    async fn pause_then_cancel_never_task() {
        let dispatcher = BaseTaskDispatcher::<SampleError>::new(1);
        let handle = dispatcher
            .dispatch(Box::new(NeverTask { id: TaskId::new_v4() }))
            .await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.cancel().await;
        let status = handle.await.expect("cancel should resolve cleanly");
        assert_eq!(status, ExecStatus::Canceled);
    }

    #[tokio::test]
    async fn shutdown_rejects_further_dispatch() {
        let dispatcher = BaseTaskDispatcher::<SampleError>::new(1);
        dispatcher.shutdown().await;
        let ran = Arc::new(AtomicUsize::new(0));
        let err = dispatcher
            .try_dispatch(Box::new(ReadyTask {
                id: TaskId::new_v4(),
                ran: ran.clone(),
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatcherShutdown));
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }
}
