//! Countdown clock
//!
//! A single periodic tick source. Starting an already running clock replaces
//! its schedule, so there is never more than one tick process. The clock does
//! not run on its own: the owner awaits `tick()` from its event loop, which
//! keeps every tick on the same task as the commands.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Periodic tick source, stopped by default
#[derive(Debug)]
pub struct Clock {
    period: Duration,
    interval: Option<Interval>,
}

impl Clock {
    /// Create a stopped clock ticking every `period` once started
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Start ticking; the first tick lands one period from now
    ///
    /// Restarting cancels the previous schedule.
    pub fn start(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Stop ticking; a no-op when already stopped
    pub fn stop(&mut self) {
        self.interval = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick
    ///
    /// Never resolves while the clock is stopped. Cancel-safe, so it can sit
    /// in a `select!` next to other event sources.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
