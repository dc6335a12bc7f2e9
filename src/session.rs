use std::time::Duration;

use crate::audio::discovery::discover_tracks;
use crate::audio::playlist::{MediaEvent, MediaPlayer, Playlist};
use crate::config::IntroConfig;
use crate::foundation::core::Viewport;
use crate::foundation::error::RelicResult;
use crate::foundation::math::Rng64;
use crate::lore::typewriter::{Step, Typewriter};
use crate::lore::view::LoreView;
use crate::runtime::scheduler::{Scheduler, TaskId};
use crate::scene::controller::{ScenePhase, SceneController};
use crate::scene::input::{Focus, KeyOutcome, handle_key};
use crate::void::render_loop::VoidLoop;
use crate::void::surface::{Surface2d, resize_surface};

/// Salt separating the session RNG (starting track) from the void loop's stream.
const SESSION_RNG_SALT: u64 = 0xA5A5_0000_7EC0_0001;

/// What a scheduled task wakes up to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    Lore,
    RevealContinue,
    Boot,
    Frame,
}

/// The whole intro: lore typewriter, continue gate, then the void loop and
/// the music player, all driven by one virtual-time scheduler.
///
/// Nothing runs on its own. Call [`Experience::start`], then pump time with
/// [`Experience::run_until`] or [`Experience::run_for`]; user input goes
/// through the remaining methods between pumps.
pub struct Experience<S, P> {
    config: IntroConfig,
    scheduler: Scheduler<Wake>,
    typewriter: Typewriter,
    lore_timer: Option<TaskId>,
    lore_changed_at: Duration,
    lore_completed_at: Option<Duration>,
    scene: SceneController,
    void_loop: VoidLoop,
    surface: S,
    viewport: Viewport,
    playlist: Playlist<P>,
    rng: Rng64,
    started: bool,
}

impl<S: Surface2d, P: MediaPlayer> Experience<S, P> {
    pub fn new(config: IntroConfig, surface: S, player: P) -> RelicResult<Self> {
        config.validate()?;
        let scheduler = Scheduler::new(config.void.refresh_hz)?;
        let typewriter = Typewriter::new(config.lore.resolved_lines(), config.lore.timing)?;
        let void_loop = VoidLoop::new(config.void.particle_count, config.void.seed);
        Ok(Self {
            scheduler,
            typewriter,
            lore_timer: None,
            lore_changed_at: Duration::ZERO,
            lore_completed_at: None,
            scene: SceneController::new(config.boot_delay).with_fade_ease(config.fade_ease),
            void_loop,
            surface,
            viewport: config.viewport,
            playlist: Playlist::new(player),
            rng: Rng64::new(config.void.seed ^ SESSION_RNG_SALT),
            started: false,
            config,
        })
    }

    /// Attach a looping backdrop player that follows the audio's play/pause.
    pub fn with_backdrop(mut self, backdrop: Box<dyn MediaPlayer>) -> Self {
        self.playlist.set_backdrop(backdrop);
        self
    }

    /// Begin the lore at the current virtual time. Calling it again is a no-op.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        tracing::info!(
            lines = self.typewriter.lines().len(),
            total_ms = self.typewriter.total_duration().as_millis() as u64,
            "lore started"
        );
        let step = self.typewriter.start();
        self.apply_lore_step(step);
    }

    /// Dispatch every wake due at or before `until`, then leave the clock at `until`.
    pub fn run_until(&mut self, until: Duration) -> RelicResult<()> {
        while let Some((_, wake)) = self.scheduler.pop_due(until) {
            self.dispatch(wake)?;
        }
        Ok(())
    }

    pub fn run_for(&mut self, span: Duration) -> RelicResult<()> {
        self.run_until(self.scheduler.now() + span)
    }

    /// Finish the lore immediately.
    pub fn skip_lore(&mut self) {
        if let Some(id) = self.lore_timer.take() {
            self.scheduler.cancel(id);
        }
        self.started = true;
        let step = self.typewriter.skip();
        self.apply_lore_step(step);
    }

    /// Returns `true` when the press was accepted and the boot is scheduled.
    pub fn press_continue(&mut self) -> bool {
        match self.scene.press_continue() {
            Some(delay) => {
                self.scheduler.after(delay, Wake::Boot);
                true
            }
            None => false,
        }
    }

    pub fn key(&mut self, code: &str, focus: Focus) -> KeyOutcome {
        if self.scene.phase() != ScenePhase::Screen {
            return KeyOutcome::Ignored;
        }
        let outcome = handle_key(code, focus);
        if outcome == KeyOutcome::TogglePlayback {
            self.playlist.toggle();
        }
        outcome
    }

    /// New host viewport. The backing buffer is resized right away; the void
    /// loop reads the new size on its next frame.
    pub fn resize(&mut self, viewport: Viewport) -> RelicResult<()> {
        resize_surface(&mut self.surface, viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    pub fn media_event(&mut self, event: MediaEvent) {
        self.playlist.on_media_event(event);
    }

    /// Player controls only act once the screen scene is up; they return
    /// whether they did.
    pub fn prev(&mut self) -> bool {
        if !self.in_screen() {
            return false;
        }
        self.playlist.prev();
        true
    }

    pub fn next(&mut self) -> bool {
        if !self.in_screen() {
            return false;
        }
        self.playlist.next();
        true
    }

    pub fn toggle(&mut self) -> bool {
        if !self.in_screen() {
            return false;
        }
        self.playlist.toggle();
        true
    }

    pub fn set_volume(&mut self, volume: f64) -> bool {
        if !self.in_screen() {
            return false;
        }
        self.playlist.set_volume(volume);
        true
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    pub fn pending_frames(&self) -> usize {
        self.scheduler.pending_frames()
    }

    pub fn config(&self) -> &IntroConfig {
        &self.config
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn lore_view(&self) -> &LoreView {
        self.typewriter.view()
    }

    /// Opacity of the lore line right now, following the shared fade curve.
    pub fn lore_opacity(&self) -> f64 {
        let since = self.scheduler.now().saturating_sub(self.lore_changed_at);
        self.typewriter.view().opacity_at(since, self.config.fade_ease)
    }

    pub fn lore_completed_at(&self) -> Option<Duration> {
        self.lore_completed_at
    }

    pub fn scene(&self) -> &SceneController {
        &self.scene
    }

    pub fn continue_opacity(&self) -> f64 {
        self.scene.continue_opacity(self.scheduler.now())
    }

    pub fn void_loop(&self) -> &VoidLoop {
        &self.void_loop
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn playlist(&self) -> &Playlist<P> {
        &self.playlist
    }

    pub fn playlist_mut(&mut self) -> &mut Playlist<P> {
        &mut self.playlist
    }

    fn in_screen(&self) -> bool {
        self.scene.phase() == ScenePhase::Screen
    }

    fn dispatch(&mut self, wake: Wake) -> RelicResult<()> {
        match wake {
            Wake::Lore => {
                self.lore_timer = None;
                let step = self.typewriter.advance();
                self.apply_lore_step(step);
            }
            Wake::RevealContinue => self.scene.reveal_continue(self.scheduler.now()),
            Wake::Boot => self.boot()?,
            Wake::Frame => self.void_loop.on_frame(
                &mut self.scheduler,
                Wake::Frame,
                &mut self.surface,
                self.viewport,
            )?,
        }
        Ok(())
    }

    fn apply_lore_step(&mut self, step: Step) {
        let now = self.scheduler.now();
        if step.view.is_some() {
            self.lore_changed_at = now;
        }
        if let Some(delay) = step.delay {
            self.lore_timer = Some(self.scheduler.after(delay, Wake::Lore));
        }
        if step.finished {
            self.lore_completed_at = Some(now);
            tracing::info!(at_ms = now.as_millis() as u64, "lore complete");
            if self.scene.lore_finished() {
                self.scheduler.request_frame(Wake::RevealContinue);
            }
        }
    }

    #[tracing::instrument(skip(self), fields(at_ms = self.scheduler.now().as_millis() as u64))]
    fn boot(&mut self) -> RelicResult<()> {
        if !self.scene.boot() {
            return Ok(());
        }
        resize_surface(&mut self.surface, self.viewport)?;
        self.void_loop.start(
            &mut self.scheduler,
            Wake::Frame,
            &mut self.surface,
            self.viewport,
        )?;

        let audio = &self.config.audio;
        let tracks = discover_tracks(&audio.assets_dir, &audio.src_prefix);
        let start = self.rng.next_below(tracks.len());
        self.playlist.init(tracks, start, audio.volume);
        self.playlist.play_current();
        Ok(())
    }
}
