//! Confetti particle engine
//!
//! Platform independent: drawing goes through [`Surface`] and frame pacing
//! through [`FrameScheduler`], so bursts run the same against a browser
//! canvas or an in-memory recorder.

pub mod burst;
pub mod engine;
pub mod particle;
pub mod scheduler;
pub mod surface;

pub use burst::{Burst, StepOutcome};
pub use engine::{BurstId, ConfettiEngine, Viewport};
pub use particle::{ConfettiColor, Particle};
pub use scheduler::{FrameCallback, FrameHandle, FrameScheduler, ManualScheduler};
pub use surface::{DrawOp, RecordingSurface, Surface};
