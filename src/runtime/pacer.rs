use std::time::{Duration, Instant};

/// Maps virtual scheduler time onto the wall clock for interactive playback.
pub struct RealtimePacer {
    origin: Instant,
    redraw_interval: Duration,
}

impl RealtimePacer {
    pub fn new(redraw_interval: Duration) -> Self {
        Self {
            origin: Instant::now(),
            redraw_interval,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    /// How long to sleep before the next wake-up: until `next_due`, but never
    /// longer than the redraw interval so fades keep animating in between.
    pub fn wait_for(&self, next_due: Option<Duration>) -> Duration {
        let now = self.elapsed();
        let until_due = next_due
            .map(|due| due.saturating_sub(now))
            .unwrap_or(self.redraw_interval);
        until_due.min(self.redraw_interval)
    }

    pub fn sleep_until_next(&self, next_due: Option<Duration>) -> Duration {
        let wait = self.wait_for(next_due);
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.elapsed()
    }
}
