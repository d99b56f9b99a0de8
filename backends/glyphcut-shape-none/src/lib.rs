//! Glyph positioner: simple advance-based placement
//!
//! Walks the text in visual order and puts each glyph at a running
//! cursor. No kerning, no ligatures, no mark positioning; every character
//! gets exactly its font's advance plus the letter spacing.

use std::sync::Arc;

use glyphcut_core::{
    layout::baseline_for_line,
    text::is_invisible,
    traits::{FontResolver, MetricsProvider},
    types::{
        GlyphContent, GlyphLayout, GlyphStyle, Ink, LayoutRequest, PositionedGlyph, ScriptTag,
    },
    RenderWarning, PLACEHOLDER_ADVANCE_RATIO,
};

/// A positioner that only does horizontal advancement
#[derive(Debug, Default, Clone, Copy)]
pub struct GlyphPositioner;

impl GlyphPositioner {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "none"
    }

    /// Place every character of `request` at advance-based positions
    ///
    /// With `want_outlines` each glyph carries its outline path and ink
    /// extent, and the layout is styled for outline output; otherwise it
    /// is styled as live text.
    pub fn position(
        &self,
        request: &LayoutRequest<'_>,
        fonts: &dyn FontResolver,
        want_outlines: bool,
    ) -> GlyphLayout {
        let style = if want_outlines {
            GlyphStyle::Outline
        } else {
            GlyphStyle::Text
        };
        let chars: Vec<char> = request.text.chars().collect();
        if chars.is_empty() {
            return GlyphLayout::empty(style);
        }

        log::debug!("GlyphPositioner: Positioning {} chars", chars.len());

        let font_size = request.font_size;
        let mut layout = GlyphLayout::empty(style);
        let mut line = 0;
        let mut x = 0.0;

        for (visual_index, logical_index) in request.order.iter().enumerate() {
            let Some(&ch) = chars.get(logical_index) else {
                continue;
            };
            if ch == '\n' {
                layout.line_widths.push(x);
                line += 1;
                x = 0.0;
                continue;
            }
            if is_invisible(ch) {
                continue;
            }

            let script = request
                .scripts
                .get(logical_index)
                .copied()
                .unwrap_or(ScriptTag::Common);
            let font = fonts.font_for(script);

            let glyph = match font.as_ref().and_then(|font| measure(font, ch, font_size)) {
                Some((id, advance)) => {
                    let (ink, outline) = match (want_outlines, font.as_ref()) {
                        (true, Some(font)) => ink_and_outline(font, id, font_size),
                        _ if ch.is_whitespace() => (Ink::Blank, None),
                        _ => (Ink::Unknown, None),
                    };
                    PositionedGlyph {
                        logical_index,
                        visual_index,
                        line,
                        content: GlyphContent::Glyph { id, ch },
                        x,
                        y: baseline_for_line(font_size, line),
                        advance,
                        script,
                        ink,
                        outline,
                    }
                },
                None => {
                    log::warn!(
                        "No glyph for {ch:?} (U+{:04X}) in the {script} font",
                        ch as u32
                    );
                    layout.warnings.push(RenderWarning::GlyphUnavailable {
                        index: logical_index,
                        ch,
                    });
                    PositionedGlyph {
                        logical_index,
                        visual_index,
                        line,
                        content: GlyphContent::Placeholder(ch),
                        x,
                        y: baseline_for_line(font_size, line),
                        advance: PLACEHOLDER_ADVANCE_RATIO * font_size,
                        script,
                        ink: Ink::Blank,
                        outline: None,
                    }
                },
            };

            x += glyph.advance + request.letter_spacing;
            layout.glyphs.push(glyph);
        }
        layout.line_widths.push(x);

        layout
    }
}

/// Glyph id and scaled advance, if the font can supply both
fn measure(font: &Arc<dyn MetricsProvider>, ch: char, font_size: f32) -> Option<(u32, f32)> {
    let upem = font.units_per_em();
    if upem == 0 {
        return None;
    }
    let id = font.glyph_id(ch)?;
    let units = font.advance_width(id)?;
    Some((id, units * font_size / upem as f32))
}

fn ink_and_outline(
    font: &Arc<dyn MetricsProvider>,
    id: u32,
    font_size: f32,
) -> (Ink, Option<String>) {
    match font.glyph_outline(id, font_size) {
        Some(outline) => match outline.ink {
            Some(extent) => (Ink::Extent(extent), Some(outline.path)),
            None => (Ink::Blank, None),
        },
        None => (Ink::Unknown, None),
    }
}
