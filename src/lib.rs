//! Birthday Site - interactive effects for a single celebration page
//!
//! Core modules:
//! - `confetti`: Particle burst engine (spawn, physics, fade, self-terminating loop)
//! - `music`: Background music toggle
//! - `ui`: Toasts, reveal, parallax, carousel, navigation, date stamp
//! - `input`: Keyboard shortcuts
//! - `platform`: Browser bindings (canvas, requestAnimationFrame, DOM helpers)
//! - `config`: Page configuration with defaults

pub mod config;
pub mod confetti;
pub mod error;
pub mod input;
pub mod music;
pub mod platform;
pub mod ui;

pub use config::SiteConfig;
pub use confetti::{ConfettiEngine, StepOutcome};
pub use error::SiteError;

/// Fixed element ids the page markup provides
pub mod ids {
    pub const CONFETTI_CANVAS: &str = "confetti-canvas";
}
