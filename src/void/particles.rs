use crate::foundation::math::Rng64;

pub const DEFAULT_PARTICLE_COUNT: usize = 140;

pub const MAX_SPEED: f64 = 0.0009;

/// A point drifting in normalized `[0, 1]` viewport space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub r: f64,
}

impl Particle {
    fn seeded(rng: &mut Rng64) -> Self {
        Self {
            x: rng.next_f64_01(),
            y: rng.next_f64_01(),
            vx: (rng.next_f64_01() - 0.5) * MAX_SPEED,
            vy: (rng.next_f64_01() - 0.5) * MAX_SPEED,
            r: rng.next_f64_01() * 2.2 + 0.4,
        }
    }

    /// Integrate one frame and wrap toroidally: leaving one edge re-enters at the other.
    pub fn step(&mut self) {
        self.x = wrap_unit(self.x + self.vx);
        self.y = wrap_unit(self.y + self.vy);
    }
}

fn wrap_unit(v: f64) -> f64 {
    if v < 0.0 {
        1.0
    } else if v > 1.0 {
        0.0
    } else {
        v
    }
}

/// Brightness pulse in `[0.35, 1.0]` for frame `t` and normalized x position.
pub fn pulse(t: u64, x: f64) -> f64 {
    0.35 + 0.65 * ((t as f64) * 0.01 + x * 10.0).sin().abs()
}

/// Fixed-size particle set; created once, never grown or shrunk.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Box<[Particle]>,
}

impl ParticleField {
    pub fn seeded(count: usize, rng: &mut Rng64) -> Self {
        let particles = (0..count).map(|_| Particle::seeded(rng)).collect();
        Self { particles }
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self {
            particles: particles.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/void/particles.rs"]
mod tests;
