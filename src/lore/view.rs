use std::time::Duration;

use crate::animation::ease::Ease;
use crate::animation::fade::Fade;
use crate::lore::lines::CURSOR_GLYPH;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Normal,
    /// Dimmed styling used for the terminal message.
    Muted,
}

/// What the lore line element shows at a given moment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoreView {
    pub text: String,
    pub cursor: bool,
    pub tone: Tone,
    pub fading: bool,
}

impl LoreView {
    pub fn typing(prefix: &str) -> Self {
        Self {
            text: prefix.to_string(),
            cursor: true,
            tone: Tone::Normal,
            fading: false,
        }
    }

    pub fn muted(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: false,
            tone: Tone::Muted,
            fading: false,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_fading(mut self, fading: bool) -> Self {
        self.fading = fading;
        self
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && !self.cursor
    }

    /// Text plus the trailing cursor glyph when the cursor is shown.
    pub fn rendered(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 4);
        out.push_str(&self.text);
        if self.cursor {
            out.push(CURSOR_GLYPH);
        }
        out
    }

    pub fn opacity_at(&self, since_change: Duration, ease: Ease) -> f64 {
        if self.fading {
            Fade::fade_out().with_ease(ease).opacity_at(since_change)
        } else {
            1.0
        }
    }
}
