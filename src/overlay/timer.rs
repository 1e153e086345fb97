use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

/// Signals the overlay receives back on the owner task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlaySignal {
    /// Periodic auto-hide/progress tick
    Tick,
    /// A chrome animation finished
    TransitionFinished(u64),
}

/// Spawn the periodic tick task. The task only sends `Tick`; it never touches
/// overlay state. Stops when `token` is cancelled or the receiver is gone.
pub(crate) fn spawn_ticker(
    period: Duration,
    signals: mpsc::UnboundedSender<OverlaySignal>,
    token: CancellationToken,
) {
    spawn_on_runtime(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    if signals.send(OverlaySignal::Tick).is_err() {
                        break;
                    }
                }
            }
        }

        trace!("Overlay timer stopped");
    });
}

/// Spawn onto the ambient tokio runtime. Returns false when there is none.
pub(crate) fn spawn_on_runtime<F>(task: F) -> bool
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(task);
            true
        }
        Err(_) => {
            warn!("No tokio runtime available, background task not started");
            false
        }
    }
}
