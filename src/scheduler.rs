//! Fixed-period tick source for the game loop.
//!
//! Stopping the scheduler drops its timer, so a stopped scheduler can never
//! deliver a tick.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::debug;

#[derive(Debug, Default)]
pub struct TickScheduler {
    timer: Option<Interval>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self { timer: None }
    }

    /// Start ticking every `period`, replacing any running timer.
    /// The first tick fires one period from now.
    pub fn start(&mut self, period: Duration) {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        debug!(?period, "Tick scheduler started");
    }

    /// Stop ticking. Returns false if it was already stopped.
    pub fn stop(&mut self) -> bool {
        let was_running = self.timer.take().is_some();
        if was_running {
            debug!("Tick scheduler stopped");
        }
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.timer.as_ref().map(Interval::period)
    }

    /// Wait for the next tick. Never resolves while stopped.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
