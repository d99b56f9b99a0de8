// this_file: crates/glyphcut-unicode/src/lib.rs

//! Unicode services for glyphcut: which font bucket a character belongs
//! to, and in which order characters are shown.
//!
//! Both work on character (Unicode scalar) indices, never bytes.

pub mod bidi;
pub mod script;

pub use bidi::{BidiReorderer, Reordering, UnicodeBidiEngine};
pub use script::{script_runs, ScriptClassifier};

#[cfg(test)]
mod proptests;
