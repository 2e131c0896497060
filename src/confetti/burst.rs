//! One batch of confetti and its per-frame step

use rand::Rng;

use super::particle::Particle;
use super::surface::Surface;
use crate::config::ConfettiConfig;

/// Result of stepping a burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Particles remain; schedule another frame
    Continue,
    /// Collection is empty; the loop ends here
    Finished,
}

/// A batch of particles spawned together
#[derive(Debug, Clone)]
pub struct Burst {
    particles: Vec<Particle>,
    gravity: f64,
    frames: u32,
}

impl Burst {
    /// Spawn a full batch sized for `viewport_width` across a surface `surface_width` wide
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        config: &ConfettiConfig,
        viewport_width: f64,
        surface_width: f64,
    ) -> Self {
        let count = config.batch_size(viewport_width);
        let particles = (0..count)
            .map(|_| Particle::spawn(&mut *rng, config, surface_width))
            .collect();
        Self::from_particles(particles, config.gravity)
    }

    pub fn from_particles(particles: Vec<Particle>, gravity: f64) -> Self {
        Self {
            particles,
            gravity,
            frames: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Frames stepped so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Clear the surface, advance every particle, draw the survivors and cull the rest
    pub fn step(&mut self, surface: &mut dyn Surface) -> StepOutcome {
        let (_, height) = surface.size();
        surface.clear();

        let gravity = self.gravity;
        self.particles.retain_mut(|p| {
            p.integrate(gravity);
            let alive = p.is_alive(height);
            if alive {
                surface.fill_circle(p.pos, p.radius, p.color, p.alpha());
            }
            alive
        });
        self.frames += 1;

        if self.particles.is_empty() {
            StepOutcome::Finished
        } else {
            StepOutcome::Continue
        }
    }
}
