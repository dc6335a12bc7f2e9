use std::time::Duration;

use crate::animation::fade::FADE_DURATION;
use crate::lore::lines::char_len;

/// Pacing of the typewriter. The fade length is not configurable here; it is
/// always [`FADE_DURATION`] so the presentation layer stays in step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoreTiming {
    #[serde(with = "millis")]
    pub type_speed: Duration,
    #[serde(with = "millis")]
    pub hold_after_line: Duration,
    #[serde(with = "millis")]
    pub inter_line: Duration,
    #[serde(with = "millis")]
    pub archive_hold: Duration,
}

impl Default for LoreTiming {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(32),
            hold_after_line: Duration::from_millis(520),
            inter_line: Duration::from_millis(180),
            archive_hold: Duration::from_millis(1200),
        }
    }
}

impl LoreTiming {
    pub fn fade(&self) -> Duration {
        FADE_DURATION
    }

    /// `len*Tc + Th + Tf + Ti` for a line of `len` characters.
    pub fn line_duration(&self, len: usize) -> Duration {
        self.type_speed * len as u32 + self.hold_after_line + self.fade() + self.inter_line
    }

    /// Elapsed time from the first scheduled tick to the completion signal.
    pub fn total_duration<S: AsRef<str>>(&self, lines: &[S]) -> Duration {
        let typed: Duration = lines
            .iter()
            .map(|l| self.line_duration(char_len(l.as_ref())))
            .sum();
        typed + self.archive_hold + self.fade()
    }
}

pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
