use crate::audio::discovery::Track;
use crate::foundation::error::{RelicError, RelicResult};

/// Minimal media element contract the playlist drives.
pub trait MediaPlayer {
    /// Point the player at `src` and reset it. Leaves the player paused.
    fn load(&mut self, src: &str);
    /// Start playback. `Err` means the platform refused (e.g. autoplay policy).
    fn play(&mut self) -> RelicResult<()>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn set_volume(&mut self, volume: f64);
}

/// Media element lifecycle notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    Ended,
    /// Media error code, `1..=4` per the HTML media error table.
    Error(u16),
    CanPlay,
    Stalled,
}

/// What the play/pause button currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonGlyph {
    #[default]
    Play,
    Pause,
}

impl ButtonGlyph {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Play => "\u{25B6}\u{FE0E}",
            Self::Pause => "\u{23F8}",
        }
    }
}

pub fn media_error_name(code: u16) -> &'static str {
    match code {
        1 => "Aborted",
        2 => "Network error",
        3 => "Decode error",
        4 => "Source not supported",
        _ => "Unknown",
    }
}

pub fn media_error_label(code: u16) -> String {
    format!("Track failed to load ({})", media_error_name(code))
}

/// Player without an audio device. Records what it was asked to do.
#[derive(Clone, Debug)]
pub struct HeadlessPlayer {
    pub src: Option<String>,
    pub paused: bool,
    pub volume: f64,
    pub autoplay_blocked: bool,
    pub loads: u32,
    pub plays: u32,
}

impl Default for HeadlessPlayer {
    fn default() -> Self {
        Self {
            src: None,
            paused: true,
            volume: 1.0,
            autoplay_blocked: false,
            loads: 0,
            plays: 0,
        }
    }
}

impl HeadlessPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A player whose `play` is always refused until unblocked.
    pub fn blocked() -> Self {
        Self {
            autoplay_blocked: true,
            ..Self::default()
        }
    }
}

impl MediaPlayer for HeadlessPlayer {
    fn load(&mut self, src: &str) {
        self.src = Some(src.to_string());
        self.paused = true;
        self.loads += 1;
    }

    fn play(&mut self) -> RelicResult<()> {
        if self.autoplay_blocked {
            return Err(RelicError::playback("play() refused by autoplay policy"));
        }
        if self.src.is_none() {
            return Err(RelicError::playback("no source loaded"));
        }
        self.paused = false;
        self.plays += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}

/// Track list plus the player controls' visible state.
pub struct Playlist<P> {
    player: P,
    backdrop: Option<Box<dyn MediaPlayer>>,
    tracks: Vec<Track>,
    current: usize,
    label: String,
    button: ButtonGlyph,
    volume: f64,
}

impl<P: MediaPlayer> Playlist<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            backdrop: None,
            tracks: Vec::new(),
            current: 0,
            label: String::new(),
            button: ButtonGlyph::Play,
            volume: 1.0,
        }
    }

    /// Optional looping backdrop that follows play/pause. Its failures are ignored.
    pub fn with_backdrop(mut self, backdrop: Box<dyn MediaPlayer>) -> Self {
        self.set_backdrop(backdrop);
        self
    }

    /// Attach or replace the backdrop. It starts at once if audio is already playing.
    pub fn set_backdrop(&mut self, mut backdrop: Box<dyn MediaPlayer>) {
        if !self.player.is_paused()
            && let Err(err) = backdrop.play()
        {
            tracing::debug!(%err, "backdrop playback refused");
        }
        self.backdrop = Some(backdrop);
    }

    pub fn backdrop(&self) -> Option<&dyn MediaPlayer> {
        self.backdrop.as_deref()
    }

    pub fn init(&mut self, tracks: Vec<Track>, start: usize, volume: f64) {
        self.tracks = tracks;
        self.current = 0;
        self.set_volume(volume);
        self.set_track(start as i64);
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn button(&self) -> ButtonGlyph {
        self.button
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Select track `i` modulo the list length and load it. No-op on an empty list.
    pub fn set_track(&mut self, i: i64) {
        if self.tracks.is_empty() {
            return;
        }
        let len = self.tracks.len() as i64;
        self.current = i.rem_euclid(len) as usize;
        let track = &self.tracks[self.current];
        self.player.load(&track.src);
        self.label = track.name.clone();
        tracing::debug!(index = self.current, name = %track.name, src = %track.src, "track selected");
    }

    pub fn play_current(&mut self) {
        match self.player.play() {
            Ok(()) => {
                self.button = ButtonGlyph::Pause;
                if let Some(backdrop) = self.backdrop.as_mut()
                    && let Err(err) = backdrop.play()
                {
                    tracing::debug!(%err, "backdrop playback refused");
                }
            }
            Err(err) => {
                tracing::info!(%err, "playback refused, waiting for manual play");
                self.button = ButtonGlyph::Play;
            }
        }
    }

    pub fn toggle(&mut self) {
        if self.player.is_paused() {
            self.play_current();
        } else {
            self.player.pause();
            self.button = ButtonGlyph::Play;
            if let Some(backdrop) = self.backdrop.as_mut() {
                backdrop.pause();
            }
        }
    }

    pub fn next(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.set_track(self.current as i64 + 1);
        self.play_current();
    }

    pub fn prev(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.set_track(self.current as i64 - 1);
        self.play_current();
    }

    /// Clamp to `0..=1`; non-finite values are ignored.
    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.player.set_volume(self.volume);
    }

    pub fn on_media_event(&mut self, event: MediaEvent) {
        let src = self.current().map(|t| t.src.as_str()).unwrap_or("");
        match event {
            MediaEvent::Ended => {
                tracing::debug!(src, "track ended");
                self.next();
            }
            MediaEvent::Error(code) => {
                tracing::error!(code, src, "audio error");
                self.label = media_error_label(code);
                self.button = ButtonGlyph::Play;
            }
            MediaEvent::CanPlay => tracing::info!(src, "audio canplay"),
            MediaEvent::Stalled => tracing::warn!(src, "audio stalled"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/playlist.rs"]
mod tests;
