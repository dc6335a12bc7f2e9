use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::animation::ease::Ease;
use crate::foundation::core::Viewport;
use crate::foundation::error::{RelicError, RelicResult};
use crate::lore::lines::default_lines;
use crate::lore::timing::LoreTiming;
use crate::void::particles::DEFAULT_PARTICLE_COUNT;

pub const SEED_ENV: &str = "RELICVOID_SEED";
pub const REFRESH_HZ_ENV: &str = "RELICVOID_REFRESH_HZ";

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoreConfig {
    /// Replaces the built-in lore when set.
    pub lines: Option<Vec<String>>,
    pub timing: LoreTiming,
}

impl LoreConfig {
    pub fn resolved_lines(&self) -> Vec<String> {
        self.lines.clone().unwrap_or_else(default_lines)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VoidConfig {
    pub particle_count: usize,
    pub seed: u64,
    pub refresh_hz: u32,
}

impl Default for VoidConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: 0x5EED_2199,
            refresh_hz: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Directory scanned for `tracks.json` or audio files.
    pub assets_dir: PathBuf,
    /// Prefix of every track `src` handed to the player.
    pub src_prefix: String,
    pub volume: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            src_prefix: "./assets".to_string(),
            volume: 0.8,
        }
    }
}

/// Everything the intro experience can be tuned with. All fields default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub lore: LoreConfig,
    pub void: VoidConfig,
    pub viewport: Viewport,
    pub audio: AudioConfig,
    #[serde(rename = "boot_delay_ms", with = "crate::lore::timing::millis")]
    pub boot_delay: Duration,
    /// Curve shared by the lore fade-out and the continue fade-in.
    pub fade_ease: Ease,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            lore: LoreConfig::default(),
            void: VoidConfig::default(),
            viewport: Viewport::default(),
            audio: AudioConfig::default(),
            boot_delay: crate::scene::controller::BOOT_DELAY,
            fade_ease: Ease::default(),
        }
    }
}

impl IntroConfig {
    pub fn from_json(json: &str) -> RelicResult<Self> {
        serde_json::from_str(json).map_err(|e| RelicError::serde(format!("config: {e}")))
    }

    pub fn from_path(path: &Path) -> RelicResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            RelicError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_json(&json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> RelicResult<()> {
        if let Some(lines) = &self.lore.lines
            && lines.is_empty()
        {
            return Err(RelicError::validation("lore.lines must not be empty"));
        }
        if self.void.refresh_hz == 0 {
            return Err(RelicError::validation("void.refresh_hz must be > 0"));
        }
        self.viewport.validate()?;
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(RelicError::validation("audio.volume must be within 0..=1"));
        }
        Ok(())
    }

    /// Apply `RELICVOID_SEED` / `RELICVOID_REFRESH_HZ`. Unparsable or zero values are ignored.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(SEED_ENV).ok().as_deref(),
            std::env::var(REFRESH_HZ_ENV).ok().as_deref(),
        );
    }

    pub(crate) fn apply_overrides(&mut self, seed: Option<&str>, refresh_hz: Option<&str>) {
        if let Some(seed) = seed.and_then(|v| v.trim().parse::<u64>().ok()) {
            self.void.seed = seed;
        }
        if let Some(hz) = refresh_hz
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            self.void.refresh_hz = hz;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
