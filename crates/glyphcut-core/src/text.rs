//! Line and script-run splitting over character indices

use std::ops::Range;

use crate::types::ScriptTag;

/// Character ranges of each line, newline characters excluded
///
/// Empty text has no lines; `"a\n"` has two (the second one empty).
pub fn line_ranges(chars: &[char]) -> Vec<Range<usize>> {
    if chars.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut start = 0;
    for (index, &ch) in chars.iter().enumerate() {
        if ch == '\n' {
            lines.push(start..index);
            start = index + 1;
        }
    }
    lines.push(start..chars.len());
    lines
}

/// Number of lines `text` lays out into
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.split('\n').count()
    }
}

/// Bidi formatting and other characters that steer layout but draw nothing
///
/// Controls, the directional marks, embeddings, overrides and isolates,
/// the invisible operators and the byte order mark. None of them take
/// part in positioning or shaping.
pub fn is_format_control(ch: char) -> bool {
    ch.is_control()
        || matches!(
            ch,
            '\u{061C}'
                | '\u{200B}'
                | '\u{200E}'
                | '\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{2069}'
                | '\u{FEFF}'
        )
}

/// Zero width non-joiner and joiner
///
/// Invisible too, but they change how neighbours join, so a shaper still
/// needs to see them.
pub fn is_joiner(ch: char) -> bool {
    matches!(ch, '\u{200C}' | '\u{200D}')
}

/// Characters that never get a glyph slot of their own
pub fn is_invisible(ch: char) -> bool {
    is_format_control(ch) || is_joiner(ch)
}

/// Maximal same-script stretches of `range`, in logical order
pub fn script_runs(scripts: &[ScriptTag], range: Range<usize>) -> Vec<(Range<usize>, ScriptTag)> {
    let mut runs: Vec<(Range<usize>, ScriptTag)> = Vec::new();
    for index in range {
        let script = scripts.get(index).copied().unwrap_or(ScriptTag::Common);
        match runs.last_mut() {
            Some((run, current)) if *current == script && run.end == index => run.end = index + 1,
            _ => runs.push((index..index + 1, script)),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(line_ranges(&[]).is_empty());
        assert_eq!(line_count(""), 0);
    }

    #[test]
    fn newlines_split_lines() {
        assert_eq!(line_ranges(&chars("ab\ncd")), vec![0..2, 3..5]);
        assert_eq!(line_ranges(&chars("a\n")), vec![0..1, 2..2]);
        assert_eq!(line_count("a\n"), 2);
    }

    #[test]
    fn invisible_characters() {
        for ch in ['\u{200E}', '\u{200F}', '\u{202B}', '\u{2067}', '\u{2069}', '\u{FEFF}', '\t'] {
            assert!(is_format_control(ch), "U+{:04X}", ch as u32);
            assert!(is_invisible(ch));
        }
        assert!(is_joiner('\u{200D}') && !is_format_control('\u{200D}'));
        assert!(is_invisible('\u{200C}'));
        for ch in ['a', ' ', 'ש', '\u{05B8}', '\u{00A0}'] {
            assert!(!is_invisible(ch), "U+{:04X}", ch as u32);
        }
    }

    #[test]
    fn script_runs_group_neighbours() {
        use ScriptTag::*;
        let scripts = [Latin, Latin, Hebrew, Hebrew, Latin];
        let runs = script_runs(&scripts, 0..5);
        assert_eq!(runs, vec![(0..2, Latin), (2..4, Hebrew), (4..5, Latin)]);
        assert_eq!(script_runs(&scripts, 1..3), vec![(1..2, Latin), (2..3, Hebrew)]);
    }
}
