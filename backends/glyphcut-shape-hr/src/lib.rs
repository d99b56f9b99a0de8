//! Complex-script shaping for glyphcut
//!
//! Two layers live here:
//!
//! - [`HarfrustEngine`] is a [`ShapingEngine`](glyphcut_core::ShapingEngine)
//!   backed by harfrust, a pure Rust port of HarfBuzz. It reports raw
//!   positions in font units and never scales anything itself.
//! - [`ShapingAdapter`] drives any shaping engine over the visual runs of
//!   a text, converts engine units to output units and degrades to
//!   placeholder glyphs when a font or the engine lets it down.

pub mod adapter;
pub mod engine;

pub use adapter::{RunLayout, ScriptRun, ShapingAdapter};
pub use engine::HarfrustEngine;
