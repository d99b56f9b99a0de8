//! The contracts that bind the pipeline to its collaborators
//!
//! - [`MetricsProvider`] - Advances, glyph ids and outlines for one font
//! - [`FontResolver`] - Which font serves which script bucket
//! - [`BidiEngine`] - Embedding levels and reorder segments (UAX#9)
//! - [`ShapingEngine`] - Complex-script shaping of a single run

use std::sync::Arc;

use crate::error::Result;
use crate::types::{
    BaseDirection, GlyphId, GlyphOutline, ReorderSegment, ScriptTag, ShapeRequest, ShapedRun,
};

/// Your window into one font's metrics and outlines
///
/// ```ignore
/// struct MyFont;
///
/// impl MetricsProvider for MyFont {
///     fn data(&self) -> &[u8] { &[] }
///     fn units_per_em(&self) -> u16 { 1000 }
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> { Some(ch as u32) }
///     fn advance_width(&self, _glyph_id: GlyphId) -> Option<f32> { Some(500.0) }
///     fn glyph_outline(&self, _glyph_id: GlyphId, _font_size: f32) -> Option<GlyphOutline> { None }
/// }
/// ```
pub trait MetricsProvider: Send + Sync {
    /// Raw font bytes as they live in the file
    ///
    /// Handed to the shaping engine; may be empty for synthetic fonts.
    fn data(&self) -> &[u8];

    /// Face inside a collection file
    fn face_index(&self) -> u32 {
        0
    }

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Horizontal advance in font units
    fn advance_width(&self, glyph_id: GlyphId) -> Option<f32>;

    /// Outline drawn at `font_size`, origin on the baseline, y pointing down
    fn glyph_outline(&self, glyph_id: GlyphId, font_size: f32) -> Option<GlyphOutline>;

    /// Family name live-text output should ask for
    fn family_name(&self) -> Option<String> {
        None
    }
}

/// Picks the font responsible for a script bucket
pub trait FontResolver {
    fn font_for(&self, script: ScriptTag) -> Option<Arc<dyn MetricsProvider>>;
}

/// A Unicode Bidirectional Algorithm implementation
///
/// Both methods work on character (not byte) indices.
pub trait BidiEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// One embedding level per character of `text`
    fn embedding_levels(&self, text: &str, direction: BaseDirection) -> Result<Vec<u8>>;

    /// Ranges to reverse, applied in the returned order to the identity
    /// permutation
    ///
    /// Each segment stays inside one line and wholly contains any
    /// segment returned before it that it overlaps, so its bounds are
    /// valid both as logical indices and as working-array positions.
    fn reorder_segments(&self, text: &str, levels: &[u8]) -> Result<Vec<ReorderSegment>>;
}

/// A complex-script shaping engine
///
/// Any per-call engine objects must be created and released inside
/// [`shape`](ShapingEngine::shape), on success and failure alike.
pub trait ShapingEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Shape one script-homogeneous run; positions stay in engine units
    fn shape(&self, request: &ShapeRequest<'_>) -> Result<ShapedRun>;
}
