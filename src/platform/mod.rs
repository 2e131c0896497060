//! Platform abstraction layer
//!
//! Browser implementations of the confetti surface, frame scheduler and
//! viewport, plus the DOM helpers the page wiring uses. Native builds run
//! the engine against `RecordingSurface` / `ManualScheduler` instead.

#[cfg(target_arch = "wasm32")]
pub mod web;
