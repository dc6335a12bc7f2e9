use crate::foundation::core::{BezPath, Point, Rect, Rgba, Viewport};
use crate::foundation::error::RelicResult;
use crate::foundation::math::Rng64;
use crate::runtime::scheduler::{Scheduler, TaskId};
use crate::void::particles::{ParticleField, pulse};
use crate::void::surface::{Paint, RadialGradient, Surface2d};

pub const GLITCH_PERIOD: u64 = 120;
pub const GLITCH_BURST: u64 = 8;
pub const SIGNAL_LINES: usize = 22;
pub const SCANLINE_STEP: f64 = 3.0;

const FADE_FILL: Rgba = Rgba::new(0, 0, 0, 0.10);
const SIGNAL_STROKE: Rgba = Rgba::new(210, 240, 220, 0.04);
const PARTICLE_TINT: Rgba = Rgba::new(80, 200, 140, 0.06);
const GLITCH_FILL: Rgba = Rgba::new(255, 255, 255, 0.06);
const SCANLINE_FILL: Rgba = Rgba::new(0, 0, 0, 0.10);

/// True on the first `GLITCH_BURST` frames of every `GLITCH_PERIOD`.
pub fn glitch_active(t: u64) -> bool {
    t % GLITCH_PERIOD < GLITCH_BURST
}

pub fn vignette(viewport: Viewport) -> RadialGradient {
    let (w, h) = (viewport.width, viewport.height);
    RadialGradient::new(
        Point::new(w * 0.5, h * 0.45),
        60.0,
        Point::new(w * 0.5, h * 0.5),
        viewport.max_dimension() * 0.75,
    )
    .with_stop(0.0, Rgba::new(30, 110, 70, 0.12))
    .with_stop(0.45, Rgba::new(12, 20, 16, 0.10))
    .with_stop(1.0, Rgba::new(0, 0, 0, 0.55))
}

/// All horizontal signal lines for frame `t` as one path.
pub fn signal_lines(viewport: Viewport, t: u64) -> BezPath {
    let (w, h) = (viewport.width, viewport.height);
    let mut path = BezPath::new();
    for i in 0..SIGNAL_LINES {
        let y = h * (i as f64 / SIGNAL_LINES as f64) + ((t as f64) * 0.01 + i as f64).sin() * 6.0;
        path.move_to((0.0, y));
        path.line_to((w, y));
    }
    path
}

/// The ambient particle/glitch animation. Owns every piece of mutable state it
/// touches: frame counter, particle field, glitch RNG and its pending frame request.
pub struct VoidLoop {
    t: u64,
    particles: ParticleField,
    rng: Rng64,
    frame_request: Option<TaskId>,
    draws: u64,
}

impl VoidLoop {
    pub fn new(particle_count: usize, seed: u64) -> Self {
        let mut rng = Rng64::new(seed);
        let particles = ParticleField::seeded(particle_count, &mut rng);
        Self::with_particles(particles, rng)
    }

    pub fn with_particles(particles: ParticleField, rng: Rng64) -> Self {
        Self {
            t: 0,
            particles,
            rng,
            frame_request: None,
            draws: 0,
        }
    }

    pub fn frame(&self) -> u64 {
        self.t
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn is_running(&self) -> bool {
        self.frame_request.is_some()
    }

    /// (Re)start the loop: drop any previous frame request, draw one frame now
    /// and request the next. Only one request chain is ever alive.
    pub fn start<W, S: Surface2d + ?Sized>(
        &mut self,
        scheduler: &mut Scheduler<W>,
        wake: W,
        surface: &mut S,
        viewport: Viewport,
    ) -> RelicResult<()> {
        if let Some(prev) = self.frame_request.take() {
            scheduler.cancel(prev);
            tracing::debug!(frame = self.t, "void loop restarted");
        }
        self.on_frame(scheduler, wake, surface, viewport)
    }

    /// Frame callback: draw, then request the next frame.
    pub fn on_frame<W, S: Surface2d + ?Sized>(
        &mut self,
        scheduler: &mut Scheduler<W>,
        wake: W,
        surface: &mut S,
        viewport: Viewport,
    ) -> RelicResult<()> {
        self.tick(surface, viewport)?;
        self.frame_request = Some(scheduler.request_frame(wake));
        Ok(())
    }

    /// Advance one frame and composite every layer, in order, over the previous frame.
    pub fn tick<S: Surface2d + ?Sized>(&mut self, surface: &mut S, viewport: Viewport) -> RelicResult<()> {
        self.t = self.t.wrapping_add(1);
        let t = self.t;
        let (w, h) = (viewport.width, viewport.height);
        let full = Rect::new(0.0, 0.0, w, h);

        surface.fill_rect(full, &Paint::Solid(FADE_FILL));
        surface.fill_rect(full, &Paint::Radial(vignette(viewport)));
        surface.stroke_path(&signal_lines(viewport, t), SIGNAL_STROKE, 1.0);

        for p in self.particles.iter_mut() {
            p.step();
            let k = pulse(t, p.x);
            surface.fill_circle(
                Point::new(p.x * w, p.y * h),
                p.r * (1.2 + k),
                PARTICLE_TINT.with_alpha(PARTICLE_TINT.a * k as f32),
            );
        }

        if glitch_active(t) {
            let gx = self.rng.next_f64_01() * w;
            let gy = self.rng.next_f64_01() * h;
            let gw = 140.0 + self.rng.next_f64_01() * 240.0;
            let gh = 18.0 + self.rng.next_f64_01() * 50.0;
            surface.fill_rect(
                Rect::new(gx, gy, gx + gw, gy + gh),
                &Paint::Solid(GLITCH_FILL),
            );
        }

        let scanline = Paint::Solid(SCANLINE_FILL);
        let mut y = 0.0;
        while y < h {
            surface.fill_rect(Rect::new(0.0, y, w, y + 1.0), &scanline);
            y += SCANLINE_STEP;
        }

        surface.present()?;
        self.draws += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/void/render_loop.rs"]
mod tests;
