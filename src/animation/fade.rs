use std::time::Duration;

use crate::animation::ease::Ease;

/// Length of every fade in the experience.
///
/// The typewriter waits exactly this long after starting a fade before it
/// moves on, and every presentation-side opacity transition runs for the same
/// span. Change it here and both sides follow.
pub const FADE_DURATION: Duration = Duration::from_millis(600);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    pub direction: FadeDirection,
    pub duration: Duration,
    pub ease: Ease,
}

impl Fade {
    pub fn fade_in() -> Self {
        Self {
            direction: FadeDirection::In,
            duration: FADE_DURATION,
            ease: Ease::default(),
        }
    }

    pub fn fade_out() -> Self {
        Self {
            direction: FadeDirection::Out,
            duration: FADE_DURATION,
            ease: Ease::default(),
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn progress_at(self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn opacity_at(self, elapsed: Duration) -> f64 {
        let p = self.ease.apply(self.progress_at(elapsed));
        match self.direction {
            FadeDirection::In => p,
            FadeDirection::Out => 1.0 - p,
        }
    }

    pub fn is_complete(self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}
