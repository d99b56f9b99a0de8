//! glyphcut: text to millimetre-accurate SVG
//!
//! A render walks through six stages:
//! 1. Script classification picks a font per character
//! 2. Bidi reordering turns logical order into visual order
//! 3. Positioning or shaping places every glyph
//! 4. Alignment fixes one frame (baseline, canvas, centring) for all modes
//! 5. Bounds measure the typographic and ink extent
//! 6. Assembly writes the SVG document
//!
//! # Example
//!
//! ```ignore
//! use glyphcut::prelude::*;
//!
//! let mut fonts = FontDatabase::new();
//! fonts.load_font("DejaVuSans.ttf")?;
//! fonts.load_script_font(ScriptTag::Hebrew, "NotoSansHebrew.ttf")?;
//!
//! let context = RenderContext::with_defaults(fonts.to_font_set());
//! let output = context.render(&Settings {
//!     text: "Hi שלום".into(),
//!     font_size: 12.0,
//!     mode: RenderMode::Shaped,
//!     ..Default::default()
//! })?;
//! std::fs::write("sign.svg", output.markup)?;
//! ```

pub mod context;
mod mode;
pub mod render;

pub use context::{RenderContext, RenderContextBuilder};
pub use render::{render, RenderFailure, RenderOutput};

pub use glyphcut_core::{
    bounds, error, layout, traits, types, Color, EngineConfig, EngineGate, ErrorKind, FontSet,
    GlyphcutError, RenderMode, RenderWarning, Settings,
};
pub use glyphcut_fontdb as fontdb;
pub use glyphcut_render_svg as svg;
pub use glyphcut_shape_hr as shape_hr;
pub use glyphcut_shape_none as shape_none;
pub use glyphcut_unicode as unicode;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{render, RenderContext, RenderFailure, RenderOutput};
    pub use glyphcut_core::{
        error::{GlyphcutError, Result},
        traits::{BidiEngine, MetricsProvider, ShapingEngine},
        types::{BaseDirection, Bounds, LayoutFrame, ScriptTag},
        Color, EngineConfig, ErrorKind, FontSet, RenderMode, Settings,
    };
    pub use glyphcut_fontdb::{Font, FontDatabase};
}
