//! Typographic and ink extents of a laid-out text

use crate::types::{Bounds, GlyphLayout, Ink, InkBox, LayoutFrame};
use crate::Settings;

/// Height above the baseline assumed for a glyph whose ink is unknown
pub const ASCENT_ESTIMATE: f32 = 0.8;

/// Depth below the baseline assumed for a glyph whose ink is unknown
pub const DESCENT_ESTIMATE: f32 = 0.2;

/// Measure `layout` as placed in `frame`
///
/// Ink coordinates are canvas coordinates: lines are centred with
/// [`LayoutFrame::line_origin_x`] exactly as the assembler places them.
/// Placeholders and blank glyphs add no ink. Without any inked glyph the
/// ink box collapses to the canvas origin.
pub fn measure(layout: &GlyphLayout, frame: &LayoutFrame, settings: &Settings) -> Bounds {
    let font_size = settings.font_size;
    let mut ink: Option<InkBox> = None;

    for glyph in &layout.glyphs {
        if glyph.content.is_placeholder() {
            continue;
        }

        let origin_x = frame.line_origin_x(layout.line_width(glyph.line)) + glyph.x;
        let glyph_box = match glyph.ink {
            Ink::Blank => continue,
            Ink::Extent(extent) => extent.translate(origin_x, glyph.y),
            Ink::Unknown => InkBox::new(
                origin_x,
                glyph.y - ASCENT_ESTIMATE * font_size,
                origin_x + glyph.advance,
                glyph.y + DESCENT_ESTIMATE * font_size,
            ),
        };

        if !glyph_box.is_finite() {
            log::warn!(
                "Ignoring non-finite ink for glyph at index {}",
                glyph.logical_index
            );
            continue;
        }

        ink = Some(match ink {
            Some(total) => total.union(glyph_box),
            None => glyph_box,
        });
    }

    let ink = ink.unwrap_or_default();
    Bounds {
        typographic_width: layout.typographic_width(),
        typographic_height: frame.canvas_height,
        actual_min_x: ink.x_min,
        actual_max_x: ink.x_max,
        actual_min_y: ink.y_min,
        actual_max_y: ink.y_max,
    }
}
