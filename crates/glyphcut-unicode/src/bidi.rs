// this_file: crates/glyphcut-unicode/src/bidi.rs

//! Logical to visual reordering.
//!
//! [`UnicodeBidiEngine`] answers the two questions a bidi engine is asked
//! (embedding levels, then the ranges to reverse). [`BidiReorderer`] turns
//! those answers into a [`VisualOrder`] and visual runs, and falls back to
//! logical order when the engine misbehaves.

use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use glyphcut_core::{
    text::{is_format_control, line_ranges},
    types::{BaseDirection, Direction, ReorderSegment, VisualOrder, VisualRun},
    BidiEngine, GlyphcutError, RenderWarning, Result,
};
use unicode_bidi::{BidiInfo, Level};

/// [`BidiEngine`] backed by the `unicode-bidi` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeBidiEngine;

impl UnicodeBidiEngine {
    pub fn new() -> Self {
        Self
    }
}

impl BidiEngine for UnicodeBidiEngine {
    fn name(&self) -> &'static str {
        "unicode-bidi"
    }

    fn embedding_levels(&self, text: &str, direction: BaseDirection) -> Result<Vec<u8>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let base_level = match direction {
            BaseDirection::Ltr => Some(Level::ltr()),
            BaseDirection::Rtl => Some(Level::rtl()),
            BaseDirection::Auto => None,
        };
        let info = BidiInfo::new(text, base_level);

        // Per-byte levels with the line rules applied, one line per paragraph
        let mut levels = info.levels.clone();
        for paragraph in &info.paragraphs {
            let range = paragraph.range.clone();
            let line_levels = info.reordered_levels(paragraph, range.clone());
            levels[range.clone()].copy_from_slice(&line_levels[range]);
        }

        text.char_indices()
            .map(|(byte, _)| {
                levels.get(byte).map(|level| level.number()).ok_or_else(|| {
                    GlyphcutError::Bidi(format!("no embedding level for byte {byte}"))
                })
            })
            .collect()
    }

    fn reorder_segments(&self, text: &str, levels: &[u8]) -> Result<Vec<ReorderSegment>> {
        let chars: Vec<char> = text.chars().collect();
        if levels.len() != chars.len() {
            return Err(GlyphcutError::Bidi(format!(
                "{} levels for {} characters",
                levels.len(),
                chars.len()
            )));
        }

        Ok(line_ranges(&chars)
            .into_iter()
            .flat_map(|line| l2_segments(levels, line))
            .collect())
    }
}

/// Reversal ranges of one line, following rule L2 of UAX #9.
///
/// Passes run from the highest level down to the lowest odd level. A pass
/// reverses every maximal stretch at that level or higher, so each segment
/// contains whole segments of earlier passes and its bounds are the same
/// in logical and working-array positions.
pub fn l2_segments(levels: &[u8], line: Range<usize>) -> Vec<ReorderSegment> {
    let Some(line_levels) = levels.get(line.clone()) else {
        return Vec::new();
    };
    let (Some(&highest), Some(&lowest)) = (line_levels.iter().max(), line_levels.iter().min())
    else {
        return Vec::new();
    };
    let lowest_odd = if lowest % 2 == 1 { lowest } else { lowest + 1 };

    let mut segments = Vec::new();
    let mut level = highest;
    while level >= lowest_odd {
        let mut run_start: Option<usize> = None;
        for offset in 0..=line_levels.len() {
            let inside = line_levels.get(offset).is_some_and(|&l| l >= level);
            match (inside, run_start) {
                (true, None) => run_start = Some(offset),
                (false, Some(start)) => {
                    if offset - start > 1 {
                        segments.push(ReorderSegment::new(
                            line.start + start,
                            line.start + offset - 1,
                        ));
                    }
                    run_start = None;
                },
                _ => {},
            }
        }
        level -= 1;
    }
    segments
}

/// Outcome of reordering one text.
#[derive(Debug, Clone, PartialEq)]
pub struct Reordering {
    pub order: VisualOrder,
    /// One level per character; empty after a fallback
    pub levels: Vec<u8>,
    pub segments: Vec<ReorderSegment>,
    /// Same-level runs, line by line, each line in visual order
    pub runs: Vec<VisualRun>,
    /// Set when the engine failed and logical order was used instead
    pub warning: Option<RenderWarning>,
}

impl Reordering {
    /// Logical order with one left-to-right run per line.
    pub fn fallback(text: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::warn!("Bidi reordering unavailable, using logical order: {reason}");

        let chars: Vec<char> = text.chars().collect();
        let runs = line_ranges(&chars)
            .into_iter()
            .filter(|line| !line.is_empty())
            .map(|line| VisualRun {
                start: line.start,
                end: line.end,
                direction: Direction::LeftToRight,
            })
            .collect();

        Self {
            order: VisualOrder::identity(chars.len()),
            levels: Vec::new(),
            segments: Vec::new(),
            runs,
            warning: Some(RenderWarning::ReorderFailure(reason)),
        }
    }

    /// Characters in display order, with newlines kept in place.
    pub fn visual_text(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        self.order.visual_text(&chars)
    }

    /// Display order of each line, newlines and bidi controls dropped.
    pub fn visual_lines(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        line_ranges(&chars)
            .into_iter()
            .map(|line| {
                self.order.as_slice()[line]
                    .iter()
                    .filter_map(|&logical| chars.get(logical))
                    .filter(|&&ch| !is_format_control(ch))
                    .collect()
            })
            .collect()
    }
}

/// Applies a [`BidiEngine`]'s answers to a text.
#[derive(Clone)]
pub struct BidiReorderer {
    engine: Arc<dyn BidiEngine>,
}

impl BidiReorderer {
    pub fn new(engine: Arc<dyn BidiEngine>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Visual order of `text` for a paragraph direction.
    ///
    /// Never fails: anything wrong with the engine's answers yields the
    /// fallback order with a warning attached.
    pub fn reorder(&self, text: &str, direction: BaseDirection) -> Reordering {
        match self.try_reorder(text, direction) {
            Ok(reordering) => reordering,
            Err(e) => Reordering::fallback(text, e.to_string()),
        }
    }

    fn try_reorder(&self, text: &str, direction: BaseDirection) -> Result<Reordering> {
        let chars: Vec<char> = text.chars().collect();

        let levels = guarded(|| self.engine.embedding_levels(text, direction))?;
        if levels.len() != chars.len() {
            return Err(GlyphcutError::Bidi(format!(
                "engine returned {} levels for {} characters",
                levels.len(),
                chars.len()
            )));
        }

        let segments = guarded(|| self.engine.reorder_segments(text, &levels))?;
        let lines = line_ranges(&chars);

        let mut order = VisualOrder::identity(chars.len());
        for &segment in &segments {
            let within_line = lines
                .iter()
                .any(|line| segment.start >= line.start && segment.end < line.end);
            if !within_line || !order.reverse_segment(segment) {
                return Err(GlyphcutError::Bidi(format!(
                    "segment {}..={} is out of range",
                    segment.start, segment.end
                )));
            }
        }

        let runs = visual_runs(&order, &levels, &lines);
        log::debug!(
            "Reordered {} characters with {} segment(s) into {} run(s)",
            chars.len(),
            segments.len(),
            runs.len()
        );

        Ok(Reordering {
            order,
            levels,
            segments,
            runs,
            warning: None,
        })
    }
}

impl std::fmt::Debug for BidiReorderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BidiReorderer")
            .field("engine", &self.engine.name())
            .finish()
    }
}

/// Run an engine call, turning a panic inside it into an error.
fn guarded<T>(call: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(GlyphcutError::Bidi(format!("engine panicked: {message}")))
    })
}

/// Maximal same-level logical runs of each line, sorted into visual order.
fn visual_runs(order: &VisualOrder, levels: &[u8], lines: &[Range<usize>]) -> Vec<VisualRun> {
    let positions = order.inverse();
    let mut runs = Vec::new();

    for line in lines {
        let mut line_runs: Vec<(usize, VisualRun)> = Vec::new();
        let mut start = line.start;
        for index in line.start..=line.end {
            let boundary = index == line.end || levels[index] != levels[start];
            if boundary && index > start {
                let first_visual = (start..index).map(|i| positions[i]).min().unwrap_or(start);
                line_runs.push((
                    first_visual,
                    VisualRun {
                        start,
                        end: index,
                        direction: Direction::from_level(levels[start]),
                    },
                ));
                start = index;
            }
        }
        line_runs.sort_by_key(|(first_visual, _)| *first_visual);
        runs.extend(line_runs.into_iter().map(|(_, run)| run));
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2_single_level_gives_disjoint_segments() {
        let levels = [0, 1, 1, 0, 1, 1, 1];
        assert_eq!(
            l2_segments(&levels, 0..7),
            vec![ReorderSegment::new(1, 2), ReorderSegment::new(4, 6)]
        );
    }

    #[test]
    fn l2_nested_levels_reverse_highest_first() {
        // RTL paragraph with an embedded LTR word
        let levels = [1, 1, 2, 2, 1];
        assert_eq!(
            l2_segments(&levels, 0..5),
            vec![ReorderSegment::new(2, 3), ReorderSegment::new(0, 4)]
        );
    }

    #[test]
    fn l2_skips_single_characters() {
        assert!(l2_segments(&[0, 1, 0], 0..3).is_empty());
        assert!(l2_segments(&[], 0..0).is_empty());
    }

    #[test]
    fn panicking_engine_is_contained() {
        let result: Result<()> = guarded(|| panic!("boom"));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("boom"), "{message}");
    }

    #[test]
    fn visual_lines_drop_newlines() {
        let reordering = Reordering::fallback("ab\ncd", "test");
        assert_eq!(reordering.visual_lines("ab\ncd"), vec!["ab", "cd"]);
        assert_eq!(reordering.visual_text("ab\ncd"), "ab\ncd");
    }
}
