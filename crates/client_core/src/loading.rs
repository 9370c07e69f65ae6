//! Rotating status text shown while a generation is pending.

use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle};
use tracing::debug;

pub const INITIAL_LOADING_MESSAGE: &str = "Consulting satellites...";
pub const LOADING_MESSAGE_PERIOD: Duration = Duration::from_secs(3);
pub const LOADING_MESSAGES: [&str; 6] = [
    "Sketching urban boundaries...",
    "Tracing metropolitan arteries...",
    "Applying artistic textures...",
    "Formatting cartographic layout...",
    "Finalizing city aesthetic...",
    "Rendering road network...",
];

#[derive(Debug, Clone, Copy)]
pub struct LoadingTicker {
    period: Duration,
}

impl Default for LoadingTicker {
    fn default() -> Self {
        Self {
            period: LOADING_MESSAGE_PERIOD,
        }
    }
}

impl LoadingTicker {
    pub fn with_period(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Message to show `elapsed` after the generation started.
    pub fn message_at(&self, elapsed: Duration) -> &'static str {
        let ticks = elapsed.as_millis() / self.period.as_millis();
        message_for_tick(ticks as usize)
    }
}

fn message_for_tick(tick: usize) -> &'static str {
    match tick {
        0 => INITIAL_LOADING_MESSAGE,
        n => LOADING_MESSAGES[(n - 1) % LOADING_MESSAGES.len()],
    }
}

/// Handle to a running ticker task. Dropping it stops the task.
pub struct LoadingTickerHandle {
    messages: watch::Receiver<&'static str>,
    task: JoinHandle<()>,
}

impl LoadingTickerHandle {
    pub fn current(&self) -> &'static str {
        *self.messages.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<&'static str> {
        self.messages.clone()
    }

    /// Same as dropping the handle.
    pub fn stop(self) {}
}

impl Drop for LoadingTickerHandle {
    fn drop(&mut self) {
        self.task.abort();
        debug!("loading ticker stopped");
    }
}

/// Spawns an interval task publishing the rotating message. Must be called
/// from within a tokio runtime.
pub fn spawn_loading_ticker(ticker: LoadingTicker) -> LoadingTickerHandle {
    let (tx, rx) = watch::channel(INITIAL_LOADING_MESSAGE);
    let period = ticker.period();
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        let mut tick = 0usize;
        loop {
            interval.tick().await;
            tick += 1;
            if tx.send(message_for_tick(tick)).is_err() {
                break;
            }
        }
    });
    LoadingTickerHandle { messages: rx, task }
}
