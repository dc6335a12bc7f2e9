//! relicvoid drives a two-scene intro experience: a line-by-line lore
//! typewriter that hands over, on a user gesture, to an animated "void"
//! canvas with a music player.
//!
//! # Overview
//!
//! 1. **Lore**: [`Typewriter`] reveals each line character by character, holds,
//!    fades it out, and ends on a muted `ARCHIVE COMPLETE.` before signalling completion.
//! 2. **Continue gate**: [`SceneController`] reveals the continue control only
//!    after completion and accepts it once.
//! 3. **Void**: [`VoidLoop`] draws the 7-layer frame on a [`Surface2d`] every
//!    display refresh; [`CpuSurface`] is the `vello_cpu` raster backend.
//! 4. **Audio**: [`discover_tracks`] builds the playlist, [`Playlist`] drives a
//!    [`MediaPlayer`].
//!
//! Everything runs on a single-threaded virtual-time [`Scheduler`]; [`Experience`]
//! ties the pieces together and is what the `relicvoid` binary runs.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: all randomness comes from seeded [`Rng64`] streams.
#![forbid(unsafe_code)]

mod animation;
mod audio;
mod config;
mod foundation;
mod lore;
mod render;
mod runtime;
mod scene;
mod session;
mod void;

pub use animation::ease::Ease;
pub use animation::fade::{FADE_DURATION, Fade, FadeDirection};
pub use audio::discovery::{
    FALLBACK_TRACKS, MANIFEST_FILE, Track, discover_tracks, encode_component, fallback_tracks,
    list_audio_files, parse_manifest,
};
pub use audio::playlist::{
    ButtonGlyph, HeadlessPlayer, MediaEvent, MediaPlayer, Playlist, media_error_label,
    media_error_name,
};
pub use config::{
    AudioConfig, IntroConfig, LoreConfig, REFRESH_HZ_ENV, SEED_ENV, VoidConfig,
};
pub use foundation::core::{
    Affine, BackingSize, BezPath, Point, Rect, Rgba, Rgba8Premul, Viewport,
};
pub use foundation::error::{RelicError, RelicResult};
pub use foundation::math::Rng64;
pub use lore::lines::{ARCHIVE_COMPLETE, CURSOR_GLYPH, LINES, char_len, default_lines};
pub use lore::timing::LoreTiming;
pub use lore::typewriter::{ArchivePhase, LoreState, Step, Typewriter};
pub use lore::view::{LoreView, Tone};
pub use render::FrameRGBA;
pub use render::cpu::CpuSurface;
pub use render::png::write_png;
pub use runtime::pacer::RealtimePacer;
pub use runtime::scheduler::{Scheduler, TaskId, TaskKind};
pub use scene::controller::{
    BOOT_DELAY, ContinueState, Control, PLAYER_CONTROLS, ScenePhase, SceneController,
};
pub use scene::input::{Focus, KeyOutcome, handle_key};
pub use session::{Experience, Wake};
pub use void::particles::{DEFAULT_PARTICLE_COUNT, MAX_SPEED, Particle, ParticleField, pulse};
pub use void::render_loop::{
    GLITCH_BURST, GLITCH_PERIOD, SIGNAL_LINES, VoidLoop, glitch_active, signal_lines, vignette,
};
pub use void::surface::{ColorStop, Paint, RadialGradient, Surface2d, resize_surface};
