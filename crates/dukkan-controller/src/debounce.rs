//! Debounced input channel.
//!
//! Converts a rapid stream of raw text values into committed values: a
//! value is committed only once the input has been quiet for the full
//! window, and a new raw value always resets the single pending timer.
//! Dropping the handle cancels the worker, so nothing is ever committed
//! to a consumer that has been torn down.

use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Quiet window for the product and vendor search boxes.
pub const LIST_SEARCH_DEBOUNCE: Duration = Duration::from_millis(800);

/// Quiet window for the global navigation search box.
pub const NAV_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Handle feeding raw input values into the debounce worker.
pub struct DebouncedInput {
    raw_tx: UnboundedSender<String>,
    cancel: CancellationToken,
}

impl DebouncedInput {
    /// Spawns the debounce worker and returns the input handle plus the
    /// receiver of committed values.
    pub fn new(window: Duration) -> (Self, UnboundedReceiver<String>) {
        let (raw_tx, raw_rx) = unbounded_channel();
        let (commit_tx, commit_rx) = unbounded_channel();
        let cancel = CancellationToken::new();

        tokio::spawn(run(window, raw_rx, commit_tx, cancel.clone()));

        (Self { raw_tx, cancel }, commit_rx)
    }

    /// Feeds one raw input value. Resets the pending timer if one exists.
    pub fn submit(&self, value: impl Into<String>) {
        // The worker only goes away on cancellation, at which point a lost
        // value is exactly what we want.
        let _ = self.raw_tx.send(value.into());
    }
}

impl Drop for DebouncedInput {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    window: Duration,
    mut raw_rx: UnboundedReceiver<String>,
    commit_tx: UnboundedSender<String>,
    cancel: CancellationToken,
) {
    // At most one pending value/timer exists at any time.
    let mut pending: Option<String> = None;
    let mut deadline = Instant::now();

    loop {
        if pending.is_none() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                raw = raw_rx.recv() => match raw {
                    Some(value) => {
                        pending = Some(value);
                        deadline = Instant::now() + window;
                    }
                    None => return,
                },
            }
        } else {
            // Biased so teardown wins over a simultaneously elapsed
            // deadline: nothing may be committed after cancellation.
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                raw = raw_rx.recv() => match raw {
                    Some(value) => {
                        pending = Some(value);
                        deadline = Instant::now() + window;
                    }
                    None => return,
                },
                _ = sleep_until(deadline) => {
                    let value = pending.take().unwrap_or_default();
                    if commit_tx.send(value).is_err() {
                        return;
                    }
                }
            }
        }
    }
}
