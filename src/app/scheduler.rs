use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Shortest period the scheduler will run at
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Repeating game tick timer
///
/// Like a browser interval timer, the first tick fires one full period after
/// `start`. Swapping the period replaces the interval in one step, so the old
/// period can neither fire again nor be skipped into a double tick.
pub struct TickScheduler {
    interval: Option<Interval>,
    period: Option<Duration>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            interval: None,
            period: None,
        }
    }

    pub fn start(&mut self, period: Duration) {
        let period = period.max(MIN_PERIOD);
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        self.period = Some(period);
    }

    /// Continue ticking at a new period, counted from now
    pub fn reschedule(&mut self, period: Duration) {
        self.start(period);
    }

    pub fn stop(&mut self) {
        self.interval = None;
        self.period = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Wait for the next tick; never resolves while stopped
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}
