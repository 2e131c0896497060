//! 2D drawing surface abstraction
//!
//! The engine only ever clears the surface and fills circles, so that is
//! all a surface has to provide.

use glam::DVec2;

use super::particle::ConfettiColor;

pub trait Surface {
    /// Current (width, height) in surface units. (0, 0) when unavailable.
    fn size(&self) -> (f64, f64);

    /// Clear the entire surface
    fn clear(&mut self);

    /// Fill a circle, alpha-blended with `alpha` in [0, 1]
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: ConfettiColor, alpha: f64);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Circle {
        center: DVec2,
        radius: f64,
        color: ConfettiColor,
        alpha: f64,
    },
}

/// In-memory surface that records every draw call
///
/// Used for headless runs where no canvas exists.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of clears recorded so far (one per frame step)
    pub fn clear_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Clear)).count()
    }

    /// Circles drawn after the most recent clear
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.ops[start..]
    }

    /// Drop the recorded calls, keeping the size
    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: ConfettiColor, alpha: f64) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_frame_after_clear() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.fill_circle(DVec2::ZERO, 1.0, ConfettiColor::Pink, 1.0);
        surface.clear();
        surface.fill_circle(DVec2::ONE, 2.0, ConfettiColor::Sky, 0.5);
        assert_eq!(surface.clear_count(), 1);
        assert_eq!(surface.last_frame().len(), 1);
        assert!(matches!(
            surface.last_frame()[0],
            DrawOp::Circle { color: ConfettiColor::Sky, .. }
        ));
    }

    #[test]
    fn test_reset_keeps_size() {
        let mut surface = RecordingSurface::new(320.0, 240.0);
        surface.clear();
        surface.reset();
        assert!(surface.ops().is_empty());
        assert_eq!(surface.size(), (320.0, 240.0));
    }
}
