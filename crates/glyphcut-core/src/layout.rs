//! The alignment contract shared by every rendering backend
//!
//! Live text and outline paths are produced by different code, yet must
//! land on the same baseline in a canvas of the same size. Both read
//! their geometry from [`frame`] and from nowhere else. The font size is
//! taken as given; nothing here shrinks or grows it to fit a container.

use crate::text::line_count;
use crate::types::LayoutFrame;
use crate::Settings;

/// Baseline of the first line, as a multiple of the font size
pub const BASELINE_RATIO: f32 = 1.2;

/// Line pitch and per-line canvas height, as a multiple of the font size
pub const LINE_HEIGHT_RATIO: f32 = 1.5;

/// Baseline of `line` for a given font size
///
/// Positioning stages call this while the canvas width is still unknown;
/// it agrees with [`LayoutFrame::baseline_for_line`] by construction.
pub fn baseline_for_line(font_size: f32, line: usize) -> f32 {
    font_size * BASELINE_RATIO + line as f32 * font_size * LINE_HEIGHT_RATIO
}

/// Compute the shared frame for `settings` and a measured typographic width
///
/// Empty text yields the all-zero frame, which callers treat as nothing
/// to render.
pub fn frame(settings: &Settings, typographic_width: f32) -> LayoutFrame {
    let line_count = line_count(&settings.text);
    if line_count == 0 {
        return LayoutFrame::default();
    }

    let font_size = settings.font_size;
    let line_height = font_size * LINE_HEIGHT_RATIO;
    let canvas_width = (typographic_width.max(0.0) + settings.padding).max(settings.minimum_width);

    LayoutFrame {
        baseline_y: font_size * BASELINE_RATIO,
        canvas_width,
        canvas_height: line_height * line_count as f32,
        line_height,
        line_count,
    }
}
