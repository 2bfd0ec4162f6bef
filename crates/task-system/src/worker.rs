use async_channel::Receiver;
use tracing::{debug, warn};

use crate::dispatcher::Envelope;
use crate::interrupter::Interrupter;

pub(crate) use crate::interrupter::RunningStateRx;

/// One worker loop: pulls from the priority queue first, then the normal
/// FIFO queue, per the scheduling model (priority tasks jump ahead of
/// normal-priority ones already queued).
pub(crate) async fn worker_loop<E>(
    worker_index: usize,
    priority_rx: Receiver<Envelope<E>>,
    normal_rx: Receiver<Envelope<E>>,
) where
    E: Send + Sync + 'static,
{
    debug!(worker_index, "task worker started");
    loop {
        let envelope = match priority_rx.try_recv() {
            Ok(envelope) => Some(envelope),
            Err(_) => {
                // Suspension point (c): block until either queue has work,
                // or both are closed (shutdown drained).
                let priority_fut = priority_rx.recv();
                let normal_fut = normal_rx.recv();
                tokio::select! {
                    biased;
                    Ok(envelope) = priority_fut => Some(envelope),
                    Ok(envelope) = normal_fut => Some(envelope),
                    else => None,
                }
            }
        };

        let Some(Envelope {
            mut task,
            interrupter_rx,
            result_tx,
        }) = envelope
        else {
            break;
        };

        let interrupter = Interrupter::new(interrupter_rx);
        let task_id = task.id();
        let result = task.run(&interrupter).await;
        if result.is_err() {
            warn!(worker_index, %task_id, "task returned an error");
        }
        let _ = result_tx.send(result);
    }
    debug!(worker_index, "task worker exiting");
}
