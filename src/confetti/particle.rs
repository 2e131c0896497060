//! Confetti particle and palette

use glam::DVec2;
use rand::Rng;

use crate::config::ConfettiConfig;

/// Fixed confetti palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfettiColor {
    Pink,
    Blush,
    Sky,
    Gold,
    Cream,
}

impl ConfettiColor {
    pub const ALL: [ConfettiColor; 5] = [
        ConfettiColor::Pink,
        ConfettiColor::Blush,
        ConfettiColor::Sky,
        ConfettiColor::Gold,
        ConfettiColor::Cream,
    ];

    /// CSS color string for canvas fill style
    pub fn as_css(&self) -> &'static str {
        match self {
            ConfettiColor::Pink => "#FF7EB6",
            ConfettiColor::Blush => "#FFD1DC",
            ConfettiColor::Sky => "#B3E5FC",
            ConfettiColor::Gold => "#F7C948",
            ConfettiColor::Cream => "#FFF7F0",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A single piece of confetti
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    /// Units per frame
    pub vel: DVec2,
    pub color: ConfettiColor,
    pub radius: f64,
    /// 1 at spawn, removed at or below 0
    pub life: f64,
    /// Life lost per frame
    pub decay: f64,
}

impl Particle {
    /// Draw a fresh particle above the top edge of a surface `surface_width` wide
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &ConfettiConfig, surface_width: f64) -> Self {
        let x = if surface_width > 0.0 {
            rng.random_range(0.0..surface_width)
        } else {
            0.0
        };
        Self {
            pos: DVec2::new(x, config.spawn_y),
            vel: DVec2::new(
                sample(rng, config.vx_range),
                sample(rng, config.vy_range),
            ),
            color: ConfettiColor::random(rng),
            radius: sample(rng, config.radius_range),
            life: 1.0,
            decay: sample(rng, config.decay_range),
        }
    }

    /// Advance one frame: position integrates the pre-gravity velocity
    #[inline]
    pub fn integrate(&mut self, gravity: f64) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.life -= self.decay;
    }

    /// Whether the particle survives on a surface `surface_height` tall
    #[inline]
    pub fn is_alive(&self, surface_height: f64) -> bool {
        self.life > 0.0 && self.pos.y <= surface_height
    }

    /// Draw opacity
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.life.clamp(0.0, 1.0)
    }
}

/// Uniform sample over an inclusive range
fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    rng.random_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_within_ranges() {
        let config = ConfettiConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, &config, 1024.0);
            assert!((0.0..1024.0).contains(&p.pos.x));
            assert_eq!(p.pos.y, -10.0);
            assert!((-3.0..=3.0).contains(&p.vel.x));
            assert!((2.0..=5.0).contains(&p.vel.y));
            assert!((2.0..=6.0).contains(&p.radius));
            assert!((0.01..=0.03).contains(&p.decay));
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_spawn_on_zero_width_surface() {
        let config = ConfettiConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let p = Particle::spawn(&mut rng, &config, 0.0);
        assert_eq!(p.pos.x, 0.0);
    }

    #[test]
    fn test_palette_coverage() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(ConfettiColor::random(&mut rng));
        }
        assert_eq!(seen.len(), ConfettiColor::ALL.len());
    }

    #[test]
    fn test_integrate_uses_old_velocity() {
        let mut p = Particle {
            pos: DVec2::new(100.0, -10.0),
            vel: DVec2::new(1.5, 3.0),
            color: ConfettiColor::Gold,
            radius: 4.0,
            life: 1.0,
            decay: 0.02,
        };
        p.integrate(0.1);
        assert_eq!(p.pos, DVec2::new(101.5, -7.0));
        assert!((p.vel.y - 3.1).abs() < 1e-12);
        assert_eq!(p.vel.x, 1.5);
        assert!((p.life - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_clamped() {
        let mut p = Particle::spawn(&mut Pcg32::seed_from_u64(1), &ConfettiConfig::default(), 10.0);
        p.life = -0.01;
        assert_eq!(p.alpha(), 0.0);
        p.life = 0.4;
        assert_eq!(p.alpha(), 0.4);
    }

    #[test]
    fn test_is_alive_bounds() {
        let mut p = Particle::spawn(&mut Pcg32::seed_from_u64(1), &ConfettiConfig::default(), 10.0);
        p.pos.y = 800.0;
        assert!(p.is_alive(800.0));
        p.pos.y = 800.5;
        assert!(!p.is_alive(800.0));
        p.pos.y = 0.0;
        p.life = 0.0;
        assert!(!p.is_alive(800.0));
    }
}
