//! Debounced recognition trigger.
//!
//! Each [`schedule`](RecognitionDebouncer::schedule) supersedes the previous
//! timer, so a burst of strokes produces a single message once the canvas has
//! been quiet for the configured delay.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

struct PendingTimer {
    generation: u64,
    cancel: CancellationToken,
}

/// At most one pending timer at a time.
///
/// A cancelled timer never delivers its message. Receivers should still
/// check the generation of what they receive: a timer that fired just before
/// cancellation may already have a message queued.
pub struct RecognitionDebouncer {
    delay: Duration,
    pending: Option<PendingTimer>,
}

impl RecognitionDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a timer for `generation` that sends `message` on `tx` after the
    /// delay, cancelling any earlier timer. Must be called inside a tokio
    /// runtime.
    pub fn schedule<T>(&mut self, generation: u64, tx: mpsc::UnboundedSender<T>, message: T)
    where
        T: Send + 'static,
    {
        if let Some(previous) = self.pending.take() {
            tracing::trace!(
                superseded = previous.generation,
                generation,
                "debounce timer superseded"
            );
            previous.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // The receiver is gone only when the session stopped.
                    let _ = tx.send(message);
                }
            }
        });

        self.pending = Some(PendingTimer { generation, cancel });
    }

    /// Cancel the pending timer. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Acknowledge that the timer for `generation` fired.
    ///
    /// Returns false if that timer is no longer the pending one.
    pub fn complete(&mut self, generation: u64) -> bool {
        match &self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_generation(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.generation)
    }
}

impl Drop for RecognitionDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for RecognitionDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognitionDebouncer")
            .field("delay", &self.delay)
            .field("pending_generation", &self.pending_generation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = RecognitionDebouncer::new(DELAY);
        let start = Instant::now();

        debouncer.schedule(1, tx, 1u64);
        assert!(debouncer.is_pending());

        assert_eq!(rx.recv().await, Some(1));
        assert!(start.elapsed() >= DELAY);
        assert!(debouncer.complete(1));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_supersedes_earlier_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = RecognitionDebouncer::new(DELAY);
        let start = Instant::now();

        debouncer.schedule(1, tx.clone(), 1u64);
        sleep(Duration::from_millis(100)).await;
        debouncer.schedule(2, tx, 2u64);

        assert_eq!(rx.recv().await, Some(2));
        assert!(start.elapsed() >= Duration::from_millis(400));

        sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.complete(1));
        assert!(debouncer.complete(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = RecognitionDebouncer::new(DELAY);

        debouncer.schedule(1, tx, 1u64);
        sleep(Duration::from_millis(100)).await;
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut debouncer = RecognitionDebouncer::new(DELAY);
            debouncer.schedule(1, tx, 1u64);
        }

        sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}
