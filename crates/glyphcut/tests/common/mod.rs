//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::sync::Arc;

use glyphcut::prelude::*;
use glyphcut::types::{GlyphId, GlyphOutline, InkBox, ShapeRequest, ShapedGlyph, ShapedRun};
use glyphcut::unicode::UnicodeBidiEngine;

/// 1000 units per em, 500 units advance, a box of half the font size per glyph
///
/// Private-use characters have no glyph.
pub struct MockFont;

impl MetricsProvider for MockFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        if is_private_use(ch) {
            None
        } else {
            Some(ch as u32)
        }
    }

    fn advance_width(&self, _glyph_id: GlyphId) -> Option<f32> {
        Some(500.0)
    }

    fn glyph_outline(&self, glyph_id: GlyphId, font_size: f32) -> Option<GlyphOutline> {
        if char::from_u32(glyph_id).is_some_and(char::is_whitespace) {
            return Some(GlyphOutline {
                path: String::new(),
                ink: None,
            });
        }
        let side = font_size * 0.5;
        Some(GlyphOutline {
            path: format!("M0,0L{side},0L{side},-{side}L0,-{side}Z"),
            ink: Some(InkBox::new(0.0, -side, side, 0.0)),
        })
    }
}

/// Echoes one glyph per character with the same metrics as [`MockFont`]
///
/// Combining marks have no advance and join the cluster before them, the
/// way a real shaper attaches them to their base.
pub struct MockShaper;

impl ShapingEngine for MockShaper {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> glyphcut::error::Result<ShapedRun> {
        let mut glyphs: Vec<ShapedGlyph> = Vec::new();
        for (byte, ch) in request.text.char_indices() {
            let mark = is_combining_mark(ch);
            let cluster = match glyphs.last() {
                Some(base) if mark => base.cluster,
                _ => byte as u32,
            };
            glyphs.push(ShapedGlyph {
                glyph_id: if is_private_use(ch) { 0 } else { ch as u32 },
                cluster,
                advance_x: if mark { 0 } else { 500 },
                ..Default::default()
            });
        }
        if request.direction.is_rtl() {
            glyphs.reverse();
        }
        Ok(ShapedRun {
            glyphs,
            reference_units: 1000,
        })
    }
}

pub fn is_combining_mark(ch: char) -> bool {
    matches!(ch, '\u{0300}'..='\u{036F}' | '\u{0591}'..='\u{05C7}')
}

fn is_private_use(ch: char) -> bool {
    ('\u{E000}'..='\u{F8FF}').contains(&ch)
}

/// Mock font, real bidi engine, mock shaper
pub fn mock_context() -> RenderContext {
    RenderContext::builder()
        .default_font(Arc::new(MockFont))
        .bidi_engine(Arc::new(UnicodeBidiEngine::new()))
        .shaping_engine(Arc::new(MockShaper))
        .build()
}

pub fn settings(text: &str, mode: RenderMode) -> Settings {
    Settings {
        text: text.to_string(),
        font_size: 30.0,
        mode,
        ..Default::default()
    }
}
