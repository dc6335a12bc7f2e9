use std::time::Duration;

use crate::animation::ease::Ease;
use crate::animation::fade::Fade;

/// Delay between pressing continue and the screen scene taking over.
pub const BOOT_DELAY: Duration = Duration::from_millis(700);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenePhase {
    Lore,
    /// Continue was pressed; the lore scene is fading and the swap is pending.
    Booting,
    Screen,
}

/// Interactive elements of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Continue,
    Prev,
    PlayPause,
    Next,
    Volume,
}

pub const PLAYER_CONTROLS: [Control; 4] = [
    Control::Prev,
    Control::PlayPause,
    Control::Next,
    Control::Volume,
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContinueState {
    Hidden,
    /// In the layout but not yet faded in; becomes visible on the next frame.
    Present,
    Visible { since: Duration },
}

#[derive(Clone, Debug)]
pub struct SceneController {
    phase: ScenePhase,
    continue_state: ContinueState,
    pressed: bool,
    boot_delay: Duration,
    fade_ease: Ease,
}

impl Default for SceneController {
    fn default() -> Self {
        Self::new(BOOT_DELAY)
    }
}

impl SceneController {
    pub fn new(boot_delay: Duration) -> Self {
        Self {
            phase: ScenePhase::Lore,
            continue_state: ContinueState::Hidden,
            pressed: false,
            boot_delay,
            fade_ease: Ease::default(),
        }
    }

    pub fn with_fade_ease(mut self, ease: Ease) -> Self {
        self.fade_ease = ease;
        self
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn continue_state(&self) -> ContinueState {
        self.continue_state
    }

    pub fn boot_delay(&self) -> Duration {
        self.boot_delay
    }

    /// Lore completion signal. Returns `true` the first time, when the caller
    /// should request a frame for [`SceneController::reveal_continue`].
    pub fn lore_finished(&mut self) -> bool {
        if self.continue_state != ContinueState::Hidden {
            return false;
        }
        self.continue_state = ContinueState::Present;
        true
    }

    pub fn reveal_continue(&mut self, now: Duration) {
        if self.continue_state == ContinueState::Present {
            self.continue_state = ContinueState::Visible { since: now };
            tracing::info!(at_ms = now.as_millis() as u64, "continue control revealed");
        }
    }

    pub fn continue_opacity(&self, now: Duration) -> f64 {
        match self.continue_state {
            ContinueState::Hidden | ContinueState::Present => 0.0,
            ContinueState::Visible { since } => {
                Fade::fade_in()
                    .with_ease(self.fade_ease)
                    .opacity_at(now.saturating_sub(since))
            }
        }
    }

    /// Accepted once, and only after the control has been revealed.
    /// Returns the delay after which [`SceneController::boot`] should run.
    pub fn press_continue(&mut self) -> Option<Duration> {
        if self.pressed
            || self.phase != ScenePhase::Lore
            || self.continue_state == ContinueState::Hidden
        {
            tracing::debug!(phase = ?self.phase, "continue ignored");
            return None;
        }
        self.pressed = true;
        self.phase = ScenePhase::Booting;
        tracing::info!("booting screen scene");
        Some(self.boot_delay)
    }

    /// Swap the lore scene for the screen scene. Only valid while booting.
    pub fn boot(&mut self) -> bool {
        if self.phase != ScenePhase::Booting {
            return false;
        }
        self.phase = ScenePhase::Screen;
        tracing::info!("screen scene active");
        true
    }

    pub fn enabled_controls(&self) -> Vec<Control> {
        match (self.phase, self.continue_state) {
            (ScenePhase::Screen, _) => PLAYER_CONTROLS.to_vec(),
            (ScenePhase::Lore, ContinueState::Hidden) | (ScenePhase::Booting, _) => Vec::new(),
            (ScenePhase::Lore, _) => vec![Control::Continue],
        }
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        self.enabled_controls().contains(&control)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/controller.rs"]
mod tests;
