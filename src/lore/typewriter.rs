use std::time::Duration;

use crate::foundation::error::{RelicError, RelicResult};
use crate::lore::lines::{ARCHIVE_COMPLETE, char_len, char_prefix};
use crate::lore::timing::LoreTiming;
use crate::lore::view::LoreView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchivePhase {
    Showing,
    Fading,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoreState {
    Typing { line: usize, chars: usize },
    HoldingComplete { line: usize },
    FadingOut { line: usize },
    /// Text cleared, waiting to start `line`. `line == lines.len()` leads to the archive message.
    FadingIn { line: usize },
    Archive(ArchivePhase),
    Done,
}

/// Result of one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// New view, when the transition changed what is displayed.
    pub view: Option<LoreView>,
    /// Delay before the next `advance`; `None` once the sequence is over.
    pub delay: Option<Duration>,
    /// Set exactly once, on the transition into `Done`.
    pub finished: bool,
}

impl Step {
    fn show(view: LoreView, delay: Duration) -> Self {
        Self {
            view: Some(view),
            delay: Some(delay),
            finished: false,
        }
    }

    fn idle() -> Self {
        Self {
            view: None,
            delay: None,
            finished: false,
        }
    }
}

/// Line-by-line typewriter with fades between lines, driven one transition at a time.
///
/// The driver never schedules anything itself: the caller arms a one-shot timer
/// with [`Step::delay`] and calls [`Typewriter::advance`] when it fires.
#[derive(Clone, Debug)]
pub struct Typewriter {
    lines: Vec<String>,
    timing: LoreTiming,
    state: LoreState,
    view: LoreView,
    reveals: Vec<usize>,
    started: bool,
}

impl Typewriter {
    pub fn new(lines: Vec<String>, timing: LoreTiming) -> RelicResult<Self> {
        if lines.is_empty() {
            return Err(RelicError::validation("lore needs at least one line"));
        }
        let reveals = vec![0; lines.len()];
        Ok(Self {
            lines,
            timing,
            state: LoreState::Typing { line: 0, chars: 0 },
            view: LoreView::empty(),
            reveals,
            started: false,
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn timing(&self) -> &LoreTiming {
        &self.timing
    }

    pub fn state(&self) -> LoreState {
        self.state
    }

    pub fn view(&self) -> &LoreView {
        &self.view
    }

    pub fn is_done(&self) -> bool {
        self.state == LoreState::Done
    }

    /// Current `(line, chars)` pair. Past the last line, `line == lines.len()`.
    pub fn cursor(&self) -> (usize, usize) {
        match self.state {
            LoreState::Typing { line, chars } => (line, chars),
            LoreState::HoldingComplete { line } | LoreState::FadingOut { line } => {
                (line, char_len(&self.lines[line]))
            }
            LoreState::FadingIn { line } => (line, 0),
            LoreState::Archive(_) | LoreState::Done => (self.lines.len(), 0),
        }
    }

    /// Number of character reveals performed so far for `line`.
    pub fn reveal_count(&self, line: usize) -> usize {
        self.reveals.get(line).copied().unwrap_or(0)
    }

    pub fn total_duration(&self) -> Duration {
        self.timing.total_duration(&self.lines[..])
    }

    /// Initial render: empty line with cursor. Calling it again is a no-op.
    pub fn start(&mut self) -> Step {
        if self.started {
            return Step::idle();
        }
        self.started = true;
        self.enter_line(0)
    }

    pub fn advance(&mut self) -> Step {
        if !self.started {
            return self.start();
        }

        let step = match self.state {
            LoreState::Typing { line, chars } => {
                let len = char_len(&self.lines[line]);
                let chars = (chars + 1).min(len);
                self.reveals[line] += 1;
                let view = LoreView::typing(char_prefix(&self.lines[line], chars));
                if chars >= len {
                    self.state = LoreState::HoldingComplete { line };
                    Step::show(view, self.timing.hold_after_line)
                } else {
                    self.state = LoreState::Typing { line, chars };
                    Step::show(view, self.timing.type_speed)
                }
            }
            LoreState::HoldingComplete { line } => {
                self.state = LoreState::FadingOut { line };
                Step::show(self.view.clone().with_fading(true), self.timing.fade())
            }
            LoreState::FadingOut { line } => {
                self.state = LoreState::FadingIn { line: line + 1 };
                Step::show(LoreView::typing(""), self.timing.inter_line)
            }
            LoreState::FadingIn { line } if line < self.lines.len() => self.enter_line(line),
            LoreState::FadingIn { .. } => {
                self.state = LoreState::Archive(ArchivePhase::Showing);
                Step::show(LoreView::muted(ARCHIVE_COMPLETE), self.timing.archive_hold)
            }
            LoreState::Archive(ArchivePhase::Showing) => {
                self.state = LoreState::Archive(ArchivePhase::Fading);
                Step::show(self.view.clone().with_fading(true), self.timing.fade())
            }
            LoreState::Archive(ArchivePhase::Fading) => self.finish(),
            LoreState::Done => Step::idle(),
        };

        if let Some(view) = &step.view {
            self.view = view.clone();
        }
        tracing::debug!(state = ?self.state, delay = ?step.delay, "lore transition");
        step
    }

    /// Jump straight to the end, emitting the completion signal if it has not fired yet.
    pub fn skip(&mut self) -> Step {
        if self.is_done() {
            return Step::idle();
        }
        self.started = true;
        let step = self.finish();
        self.view = LoreView::empty();
        step
    }

    fn enter_line(&mut self, line: usize) -> Step {
        let view = LoreView::typing("");
        let step = if char_len(&self.lines[line]) == 0 {
            self.state = LoreState::HoldingComplete { line };
            Step::show(view, self.timing.hold_after_line)
        } else {
            self.state = LoreState::Typing { line, chars: 0 };
            Step::show(view, self.timing.type_speed)
        };
        self.view = LoreView::typing("");
        step
    }

    fn finish(&mut self) -> Step {
        self.state = LoreState::Done;
        Step {
            view: Some(LoreView::empty()),
            delay: None,
            finished: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lore/typewriter.rs"]
mod tests;
