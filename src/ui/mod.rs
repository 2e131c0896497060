//! Page affordances around the confetti engine
//!
//! Pure helpers (formatting, offsets, messages) build everywhere; the DOM
//! wiring in each module only exists on wasm32.

pub mod carousel;
pub mod date;
#[cfg(target_arch = "wasm32")]
pub mod intro;
pub mod nav;
pub mod parallax;
pub mod reveal;
pub mod toast;
pub mod wish;
