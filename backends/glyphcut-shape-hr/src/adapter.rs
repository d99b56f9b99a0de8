//! From engine units to positioned glyphs
//!
//! The engine reports positions in its own reference units (units per em
//! of the face it shaped with). The adapter is the only place those are
//! converted: `scale = font_size / reference_units`, applied to every
//! advance and offset. The font size itself is never touched.

use std::ops::Range;
use std::sync::Arc;

use glyphcut_core::{
    error::ShapingError,
    layout::baseline_for_line,
    text::{is_format_control, is_joiner, line_ranges, script_runs},
    traits::{FontResolver, MetricsProvider, ShapingEngine},
    types::{
        Direction, GlyphContent, GlyphLayout, GlyphStyle, Ink, LayoutRequest, PositionedGlyph,
        ScriptTag, ShapeRequest, ShapedRun,
    },
    GlyphcutError, RenderWarning, PLACEHOLDER_ADVANCE_RATIO,
};

/// One script-homogeneous stretch of a visual run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    /// Logical character range
    pub range: Range<usize>,
    pub script: ScriptTag,
    pub direction: Direction,
    pub line: usize,
}

/// Glyphs of one shaped run, `x` measured from the run's left edge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunLayout {
    pub glyphs: Vec<PositionedGlyph>,
    /// Cursor travel including letter spacing
    pub advance: f32,
    pub warnings: Vec<RenderWarning>,
}

/// Drives a [`ShapingEngine`] over a whole text
#[derive(Clone)]
pub struct ShapingAdapter {
    engine: Arc<dyn ShapingEngine>,
}

impl ShapingAdapter {
    pub fn new(engine: Arc<dyn ShapingEngine>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Shape one script run with `font`
    ///
    /// Never fails. Without a font, or when the engine errors, each
    /// character becomes a placeholder of `0.5 × font_size` and a
    /// warning is recorded.
    pub fn shape(
        &self,
        request: &LayoutRequest<'_>,
        run: &ScriptRun,
        font: Option<&Arc<dyn MetricsProvider>>,
    ) -> RunLayout {
        let chars: Vec<char> = request.text.chars().collect();
        let positions = request.order.inverse();

        // Joiners stay in the buffer; they decide how neighbours connect
        let members: Vec<usize> = run
            .range
            .clone()
            .filter(|&i| chars.get(i).is_some_and(|&ch| !is_format_control(ch)))
            .collect();
        if members.is_empty() {
            return RunLayout::default();
        }

        let Some(font) = font else {
            log::warn!("No font for the {} script; using placeholders", run.script);
            return placeholders(request, run, &members, &chars, &positions);
        };

        let mut text = String::new();
        let mut byte_starts = Vec::with_capacity(members.len());
        for &index in &members {
            byte_starts.push(text.len());
            text.push(chars[index]);
        }

        let shape_request = ShapeRequest {
            font_data: font.data(),
            face_index: font.face_index(),
            text: &text,
            script: run.script.iso15924(),
            language: request.language,
            direction: run.direction,
            features: request.features,
            font_size: request.font_size,
        };

        let shaped = match self.checked_shape(&shape_request) {
            Ok(shaped) => shaped,
            Err(e) => {
                log::warn!(
                    "Shaping engine '{}' failed on {} chars: {e}; using placeholders",
                    self.engine.name(),
                    members.len()
                );
                return placeholders(request, run, &members, &chars, &positions);
            },
        };

        let scale = request.font_size / f32::from(shaped.reference_units);
        let baseline = baseline_for_line(request.font_size, run.line);
        let mut layout = RunLayout::default();
        let mut cursor = 0.0;

        for (slot_in_run, glyph) in shaped.glyphs.iter().enumerate() {
            // Cluster is a byte offset into `text`
            let slot = byte_starts
                .partition_point(|&start| start <= glyph.cluster as usize)
                .saturating_sub(1);
            let logical_index = members[slot];
            let ch = chars[logical_index];
            let visual_index = positions.get(logical_index).copied().unwrap_or(logical_index);

            let positioned = if glyph.glyph_id == 0 {
                layout.warnings.push(RenderWarning::GlyphUnavailable {
                    index: logical_index,
                    ch,
                });
                PositionedGlyph {
                    logical_index,
                    visual_index,
                    line: run.line,
                    content: GlyphContent::Placeholder(ch),
                    x: cursor,
                    y: baseline,
                    advance: PLACEHOLDER_ADVANCE_RATIO * request.font_size,
                    script: run.script,
                    ink: Ink::Blank,
                    outline: None,
                }
            } else {
                let (ink, outline) = match font.glyph_outline(glyph.glyph_id, request.font_size) {
                    Some(outline) => match outline.ink {
                        Some(extent) => (Ink::Extent(extent), Some(outline.path)),
                        None => (Ink::Blank, None),
                    },
                    None => (Ink::Unknown, None),
                };
                PositionedGlyph {
                    logical_index,
                    visual_index,
                    line: run.line,
                    content: GlyphContent::Glyph {
                        id: glyph.glyph_id,
                        ch,
                    },
                    x: cursor + glyph.offset_x as f32 * scale,
                    // Engine y grows upwards, output y grows downwards
                    y: baseline - glyph.offset_y as f32 * scale,
                    advance: glyph.advance_x as f32 * scale,
                    script: run.script,
                    ink,
                    outline,
                }
            };

            cursor += positioned.advance;
            // Spacing follows each cluster once, so marks stay on their base
            let next_cluster = shaped.glyphs.get(slot_in_run + 1).map(|next| next.cluster);
            if next_cluster != Some(glyph.cluster) && !is_joiner(ch) {
                cursor += request.letter_spacing;
            }
            layout.glyphs.push(positioned);
        }

        if !layout.warnings.is_empty() {
            log::warn!(
                "{} character(s) had no glyph in the {} font",
                layout.warnings.len(),
                run.script
            );
        }
        layout.advance = cursor;
        layout
    }

    fn checked_shape(&self, request: &ShapeRequest<'_>) -> Result<ShapedRun, GlyphcutError> {
        let shaped = self.engine.shape(request)?;
        if shaped.reference_units == 0 {
            return Err(ShapingError::InvalidReferenceUnits(shaped.reference_units).into());
        }
        Ok(shaped)
    }

    /// Shape every line of `request` and place the runs side by side
    ///
    /// Visual runs come in visual order per line. Inside a right-to-left
    /// run the script sub-runs are laid out last-to-first.
    pub fn layout(&self, request: &LayoutRequest<'_>, fonts: &dyn FontResolver) -> GlyphLayout {
        let chars: Vec<char> = request.text.chars().collect();
        let mut layout = GlyphLayout::empty(GlyphStyle::Outline);
        if chars.is_empty() {
            return layout;
        }

        log::debug!(
            "ShapingAdapter: Shaping {} chars in {} visual run(s) with '{}'",
            chars.len(),
            request.runs.len(),
            self.engine.name()
        );

        for (line, line_range) in line_ranges(&chars).into_iter().enumerate() {
            let mut cursor = 0.0;
            let visual_runs = request
                .runs
                .iter()
                .filter(|run| run.start >= line_range.start && run.end <= line_range.end);

            for visual_run in visual_runs {
                let mut pieces = script_runs(request.scripts, visual_run.range());
                if visual_run.direction.is_rtl() {
                    pieces.reverse();
                }

                for (range, script) in pieces {
                    let run = ScriptRun {
                        range,
                        script,
                        direction: visual_run.direction,
                        line,
                    };
                    let font = fonts.font_for(script);
                    let shaped = self.shape(request, &run, font.as_ref());

                    layout.glyphs.extend(shaped.glyphs.into_iter().map(|mut glyph| {
                        glyph.x += cursor;
                        glyph
                    }));
                    layout.warnings.extend(shaped.warnings);
                    cursor += shaped.advance;
                }
            }
            layout.line_widths.push(cursor);
        }

        layout
    }
}

impl std::fmt::Debug for ShapingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapingAdapter")
            .field("engine", &self.engine.name())
            .finish()
    }
}

/// Blank stand-ins for every member of a run, in visual order
fn placeholders(
    request: &LayoutRequest<'_>,
    run: &ScriptRun,
    members: &[usize],
    chars: &[char],
    positions: &[usize],
) -> RunLayout {
    let advance = PLACEHOLDER_ADVANCE_RATIO * request.font_size;
    let baseline = baseline_for_line(request.font_size, run.line);

    let mut ordered: Vec<usize> = members
        .iter()
        .copied()
        .filter(|&index| !is_joiner(chars[index]))
        .collect();
    if run.direction.is_rtl() {
        ordered.reverse();
    }

    let mut layout = RunLayout::default();
    let mut cursor = 0.0;
    for logical_index in ordered {
        let ch = chars[logical_index];
        layout.warnings.push(RenderWarning::GlyphUnavailable {
            index: logical_index,
            ch,
        });
        layout.glyphs.push(PositionedGlyph {
            logical_index,
            visual_index: positions.get(logical_index).copied().unwrap_or(logical_index),
            line: run.line,
            content: GlyphContent::Placeholder(ch),
            x: cursor,
            y: baseline,
            advance,
            script: run.script,
            ink: Ink::Blank,
            outline: None,
        });
        cursor += advance + request.letter_spacing;
    }
    layout.advance = cursor;
    layout
}
