// this_file: crates/glyphcut-unicode/src/script.rs

//! Per-character script buckets for font selection.

use glyphcut_core::types::ScriptTag;
use icu_properties::{props::Script, CodePointMapData, CodePointMapDataBorrowed};

pub use glyphcut_core::text::script_runs;

/// Maps characters to the [`ScriptTag`] bucket whose font draws them.
pub struct ScriptClassifier {
    script_map: CodePointMapDataBorrowed<'static, Script>,
}

impl ScriptClassifier {
    /// Create a classifier with ICU data baked in.
    pub fn new() -> Self {
        Self {
            script_map: CodePointMapData::<Script>::new(),
        }
    }

    /// Bucket of a single character. Total: every character gets a tag.
    pub fn classify(&self, ch: char) -> ScriptTag {
        bucket(self.script_map.get(ch))
    }

    /// One tag per character of `text`, with neutrals resolved.
    ///
    /// Within a line, a `Common` character takes the tag of the nearest
    /// significant character before it, or after it when the line starts
    /// with neutrals. Lines holding only neutrals stay `Common`, and so do
    /// the newline characters themselves.
    pub fn tag_text(&self, text: &str) -> Vec<ScriptTag> {
        let mut tags: Vec<ScriptTag> = text.chars().map(|ch| self.classify(ch)).collect();
        let chars: Vec<char> = text.chars().collect();

        let mut line_start = 0;
        for index in 0..=chars.len() {
            if index == chars.len() || chars[index] == '\n' {
                resolve_neutrals(&mut tags[line_start..index]);
                line_start = index + 1;
            }
        }

        tags
    }
}

impl Default for ScriptClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_neutrals(line: &mut [ScriptTag]) {
    let Some(first) = line.iter().copied().find(|tag| tag.is_significant()) else {
        return;
    };

    let mut current = first;
    for tag in line.iter_mut() {
        if tag.is_significant() {
            current = *tag;
        } else {
            *tag = current;
        }
    }
}

fn bucket(script: Script) -> ScriptTag {
    // ICU 2.x scripts are associated consts, so match them one by one
    match script {
        Script::Common | Script::Inherited | Script::Unknown => ScriptTag::Common,
        Script::Latin => ScriptTag::Latin,
        Script::Greek => ScriptTag::Greek,
        Script::Cyrillic => ScriptTag::Cyrillic,
        Script::Armenian => ScriptTag::Armenian,
        Script::Hebrew => ScriptTag::Hebrew,
        Script::Arabic => ScriptTag::Arabic,
        Script::Devanagari => ScriptTag::Devanagari,
        Script::Bengali => ScriptTag::Bengali,
        Script::Thai => ScriptTag::Thai,
        Script::Hangul => ScriptTag::Hangul,
        Script::Han => ScriptTag::Han,
        Script::Hiragana | Script::Katakana => ScriptTag::Kana,
        _ => ScriptTag::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScriptTag::*;

    #[test]
    fn classifies_major_scripts() {
        let classifier = ScriptClassifier::new();
        assert_eq!(classifier.classify('A'), Latin);
        assert_eq!(classifier.classify('Ω'), Greek);
        assert_eq!(classifier.classify('Ж'), Cyrillic);
        assert_eq!(classifier.classify('ש'), Hebrew);
        assert_eq!(classifier.classify('م'), Arabic);
        assert_eq!(classifier.classify('क'), Devanagari);
        assert_eq!(classifier.classify('ก'), Thai);
        assert_eq!(classifier.classify('한'), Hangul);
        assert_eq!(classifier.classify('漢'), Han);
        assert_eq!(classifier.classify('か'), Kana);
        assert_eq!(classifier.classify('カ'), Kana);
    }

    #[test]
    fn neutrals_and_unlisted_scripts() {
        let classifier = ScriptClassifier::new();
        assert_eq!(classifier.classify(' '), Common);
        assert_eq!(classifier.classify('7'), Common);
        assert_eq!(classifier.classify('\u{0301}'), Common);
        // Georgian has no dedicated bucket
        assert_eq!(classifier.classify('ა'), Default);
    }

    #[test]
    fn neutrals_inherit_previous_script() {
        let classifier = ScriptClassifier::new();
        let tags = classifier.tag_text("Hi שלום!");
        assert_eq!(tags, vec![Latin, Latin, Latin, Hebrew, Hebrew, Hebrew, Hebrew, Hebrew]);
    }

    #[test]
    fn leading_neutrals_take_following_script() {
        let classifier = ScriptClassifier::new();
        assert_eq!(classifier.tag_text("1 ש"), vec![Hebrew, Hebrew, Hebrew]);
    }

    #[test]
    fn lines_resolve_independently() {
        let classifier = ScriptClassifier::new();
        let tags = classifier.tag_text("ab \n 12\nש");
        assert_eq!(tags, vec![Latin, Latin, Latin, Common, Common, Common, Common, Common, Hebrew]);
    }
}
