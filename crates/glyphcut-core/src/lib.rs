//! glyphcut core: the shared vocabulary of the text-to-geometry pipeline
//!
//! Text enters as characters and leaves as glyph geometry measured in
//! physical units. Every stage between the two speaks through the types
//! defined here:
//!
//! 1. **Script classification** - each character gets a font bucket
//! 2. **Bidi reordering** - logical order becomes visual order
//! 3. **Positioning or shaping** - visual order becomes positioned glyphs
//! 4. **Alignment** - one [`LayoutFrame`](types::LayoutFrame) fixes baseline,
//!    canvas and centering for every backend
//! 5. **Bounds** - typographic and ink extents
//! 6. **Assembly** - markup with 1 user unit = 1 mm
//!
//! Fonts, the bidi algorithm and the shaping engine are collaborators
//! reached through the traits in [`traits`]; this crate never parses a font
//! or runs UAX#9 itself.

use std::fmt;
use std::str::FromStr;

pub mod bounds;
pub mod config;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod readiness;
pub mod text;
pub mod traits;

pub use config::EngineConfig;
pub use error::{ErrorKind, GlyphcutError, RenderWarning, Result};
pub use fonts::FontSet;
pub use readiness::{EngineGate, ReadyEngines};
pub use traits::{BidiEngine, FontResolver, MetricsProvider, ShapingEngine};

/// Fraction of the font size a character without a usable glyph occupies
pub const PLACEHOLDER_ADVANCE_RATIO: f32 = 0.5;

/// The data structures that flow between stages
pub mod types {
    use std::ops::Range;

    use crate::error::RenderWarning;

    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// Which way a run of text flows
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Direction {
        LeftToRight,
        RightToLeft,
    }

    impl Direction {
        pub fn is_rtl(self) -> bool {
            matches!(self, Direction::RightToLeft)
        }

        /// Direction implied by a bidi embedding level
        pub fn from_level(level: u8) -> Self {
            if level % 2 == 1 {
                Direction::RightToLeft
            } else {
                Direction::LeftToRight
            }
        }
    }

    /// Paragraph direction requested by the caller
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum BaseDirection {
        Ltr,
        Rtl,
        /// Take the direction of the first strong character
        #[default]
        Auto,
    }

    /// Font bucket a character belongs to
    ///
    /// `Common` covers script-neutral characters (spaces, digits,
    /// punctuation); `Default` covers real scripts without a dedicated bucket.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum ScriptTag {
        Latin,
        Greek,
        Cyrillic,
        Armenian,
        Hebrew,
        Arabic,
        Devanagari,
        Bengali,
        Thai,
        Hangul,
        Han,
        Kana,
        Common,
        Default,
    }

    impl ScriptTag {
        pub const ALL: [ScriptTag; 14] = [
            ScriptTag::Latin,
            ScriptTag::Greek,
            ScriptTag::Cyrillic,
            ScriptTag::Armenian,
            ScriptTag::Hebrew,
            ScriptTag::Arabic,
            ScriptTag::Devanagari,
            ScriptTag::Bengali,
            ScriptTag::Thai,
            ScriptTag::Hangul,
            ScriptTag::Han,
            ScriptTag::Kana,
            ScriptTag::Common,
            ScriptTag::Default,
        ];

        pub fn as_str(self) -> &'static str {
            match self {
                ScriptTag::Latin => "latin",
                ScriptTag::Greek => "greek",
                ScriptTag::Cyrillic => "cyrillic",
                ScriptTag::Armenian => "armenian",
                ScriptTag::Hebrew => "hebrew",
                ScriptTag::Arabic => "arabic",
                ScriptTag::Devanagari => "devanagari",
                ScriptTag::Bengali => "bengali",
                ScriptTag::Thai => "thai",
                ScriptTag::Hangul => "hangul",
                ScriptTag::Han => "han",
                ScriptTag::Kana => "kana",
                ScriptTag::Common => "common",
                ScriptTag::Default => "default",
            }
        }

        /// ISO 15924 tag handed to the shaping engine
        pub fn iso15924(self) -> Option<&'static str> {
            match self {
                ScriptTag::Latin => Some("Latn"),
                ScriptTag::Greek => Some("Grek"),
                ScriptTag::Cyrillic => Some("Cyrl"),
                ScriptTag::Armenian => Some("Armn"),
                ScriptTag::Hebrew => Some("Hebr"),
                ScriptTag::Arabic => Some("Arab"),
                ScriptTag::Devanagari => Some("Deva"),
                ScriptTag::Bengali => Some("Beng"),
                ScriptTag::Thai => Some("Thai"),
                ScriptTag::Hangul => Some("Hang"),
                ScriptTag::Han => Some("Hani"),
                ScriptTag::Kana => Some("Kana"),
                ScriptTag::Common | ScriptTag::Default => None,
            }
        }

        /// Whether the tag pins a character to a script
        pub fn is_significant(self) -> bool {
            !matches!(self, ScriptTag::Common)
        }
    }

    /// Inclusive range of character indices reversed during visual reordering
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ReorderSegment {
        pub start: usize,
        pub end: usize,
    }

    impl ReorderSegment {
        pub fn new(start: usize, end: usize) -> Self {
            Self { start, end }
        }

        pub fn len(&self) -> usize {
            self.end.saturating_sub(self.start) + 1
        }

        pub fn is_empty(&self) -> bool {
            self.end < self.start
        }
    }

    /// Permutation of character indices: `order[v]` is the logical index
    /// shown at visual position `v`
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct VisualOrder(Vec<usize>);

    impl VisualOrder {
        pub fn identity(len: usize) -> Self {
            Self((0..len).collect())
        }

        /// Wrap a vector after checking it is a permutation of `0..len`
        pub fn from_permutation(order: Vec<usize>) -> Option<Self> {
            let mut seen = vec![false; order.len()];
            for &index in &order {
                match seen.get_mut(index) {
                    Some(slot) if !*slot => *slot = true,
                    _ => return None,
                }
            }
            Some(Self(order))
        }

        pub fn len(&self) -> usize {
            self.0.len()
        }

        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }

        pub fn as_slice(&self) -> &[usize] {
            &self.0
        }

        pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
            self.0.iter().copied()
        }

        /// Logical index at a visual position
        pub fn logical_at(&self, visual: usize) -> Option<usize> {
            self.0.get(visual).copied()
        }

        pub fn is_identity(&self) -> bool {
            self.0.iter().enumerate().all(|(i, &logical)| i == logical)
        }

        /// Logical → visual map; `inverse()[l]` is the visual position of `l`
        pub fn inverse(&self) -> Vec<usize> {
            let mut inverse = vec![0; self.0.len()];
            for (visual, &logical) in self.0.iter().enumerate() {
                inverse[logical] = visual;
            }
            inverse
        }

        /// Rebuild an order from a logical → visual map
        pub fn from_inverse(inverse: &[usize]) -> Option<Self> {
            let inverted = VisualOrder::from_permutation(inverse.to_vec())?;
            Some(Self(inverted.inverse()))
        }

        /// Reverse the working array over `segment`; false if out of range
        pub fn reverse_segment(&mut self, segment: ReorderSegment) -> bool {
            if segment.is_empty() || segment.end >= self.0.len() {
                return false;
            }
            self.0[segment.start..=segment.end].reverse();
            true
        }

        /// Characters in display order, for display-only output
        pub fn visual_text(&self, chars: &[char]) -> String {
            self.0.iter().filter_map(|&i| chars.get(i)).collect()
        }
    }

    /// A same-level stretch of logical characters, listed in visual order
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct VisualRun {
        /// First logical character index
        pub start: usize,
        /// One past the last logical character index
        pub end: usize,
        pub direction: Direction,
    }

    impl VisualRun {
        pub fn range(&self) -> Range<usize> {
            self.start..self.end
        }
    }

    /// Axis-aligned box in y-down output units relative to some origin
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct InkBox {
        pub x_min: f32,
        pub x_max: f32,
        pub y_min: f32,
        pub y_max: f32,
    }

    impl InkBox {
        pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
            Self {
                x_min,
                x_max,
                y_min,
                y_max,
            }
        }

        pub fn translate(self, dx: f32, dy: f32) -> Self {
            Self {
                x_min: self.x_min + dx,
                x_max: self.x_max + dx,
                y_min: self.y_min + dy,
                y_max: self.y_max + dy,
            }
        }

        pub fn union(self, other: InkBox) -> Self {
            Self {
                x_min: self.x_min.min(other.x_min),
                x_max: self.x_max.max(other.x_max),
                y_min: self.y_min.min(other.y_min),
                y_max: self.y_max.max(other.y_max),
            }
        }

        pub fn is_finite(&self) -> bool {
            self.x_min.is_finite()
                && self.x_max.is_finite()
                && self.y_min.is_finite()
                && self.y_max.is_finite()
        }
    }

    /// A glyph outline drawn at a concrete font size, origin on the baseline
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlyphOutline {
        /// SVG path data, y axis pointing down
        pub path: String,
        /// Extent of the drawing; `None` when the glyph draws nothing
        pub ink: Option<InkBox>,
    }

    /// What is known about a positioned glyph's ink
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub enum Ink {
        /// The font could not say; bounds estimate from the font size
        #[default]
        Unknown,
        /// The glyph draws nothing (spaces)
        Blank,
        /// Extent relative to the glyph origin
        Extent(InkBox),
    }

    /// What a positioned glyph draws
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum GlyphContent {
        Glyph { id: GlyphId, ch: char },
        /// No font could supply this character; it only occupies space
        Placeholder(char),
    }

    impl GlyphContent {
        pub fn ch(&self) -> char {
            match *self {
                GlyphContent::Glyph { ch, .. } | GlyphContent::Placeholder(ch) => ch,
            }
        }

        pub fn glyph_id(&self) -> Option<GlyphId> {
            match *self {
                GlyphContent::Glyph { id, .. } => Some(id),
                GlyphContent::Placeholder(_) => None,
            }
        }

        pub fn is_placeholder(&self) -> bool {
            matches!(self, GlyphContent::Placeholder(_))
        }
    }

    /// A glyph that knows exactly where it belongs
    ///
    /// `x` is measured from the start of its line, `y` is the absolute
    /// baseline of that line.
    #[derive(Debug, Clone, PartialEq)]
    pub struct PositionedGlyph {
        pub logical_index: usize,
        pub visual_index: usize,
        pub line: usize,
        pub content: GlyphContent,
        pub x: f32,
        pub y: f32,
        pub advance: f32,
        pub script: ScriptTag,
        pub ink: Ink,
        pub outline: Option<String>,
    }

    /// How the assembler should draw a layout
    #[derive(Debug, Clone, PartialEq)]
    pub enum GlyphStyle {
        /// One text element per glyph
        Text,
        /// One outline path per glyph
        Outline,
        /// One text element per line holding the visually ordered string
        VisualLines(Vec<String>),
    }

    /// What every render mode produces
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlyphLayout {
        pub glyphs: Vec<PositionedGlyph>,
        /// Cursor position at the end of each line
        pub line_widths: Vec<f32>,
        pub style: GlyphStyle,
        pub warnings: Vec<RenderWarning>,
    }

    impl GlyphLayout {
        pub fn empty(style: GlyphStyle) -> Self {
            Self {
                glyphs: Vec::new(),
                line_widths: Vec::new(),
                style,
                warnings: Vec::new(),
            }
        }

        /// Width of the widest line
        pub fn typographic_width(&self) -> f32 {
            self.line_widths.iter().copied().fold(0.0, f32::max)
        }

        pub fn line_width(&self, line: usize) -> f32 {
            self.line_widths.get(line).copied().unwrap_or(0.0)
        }

        pub fn line_count(&self) -> usize {
            self.line_widths.len()
        }

        /// True when there are glyphs and none of them could be drawn
        pub fn all_placeholders(&self) -> bool {
            !self.glyphs.is_empty() && self.glyphs.iter().all(|g| g.content.is_placeholder())
        }
    }

    /// The single geometry reference every backend reads from
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct LayoutFrame {
        /// Baseline of the first line
        pub baseline_y: f32,
        pub canvas_width: f32,
        pub canvas_height: f32,
        pub line_height: f32,
        pub line_count: usize,
    }

    impl LayoutFrame {
        pub fn is_empty(&self) -> bool {
            self.line_count == 0
        }

        pub fn baseline_for_line(&self, line: usize) -> f32 {
            self.baseline_y + line as f32 * self.line_height
        }

        /// Left edge of a line of the given width, centred on the canvas
        pub fn line_origin_x(&self, line_width: f32) -> f32 {
            (self.canvas_width - line_width) / 2.0
        }
    }

    /// Typographic (advance) extent next to the actual ink extent
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Bounds {
        pub typographic_width: f32,
        pub typographic_height: f32,
        pub actual_min_x: f32,
        pub actual_max_x: f32,
        pub actual_min_y: f32,
        pub actual_max_y: f32,
    }

    impl Bounds {
        pub fn actual_width(&self) -> f32 {
            self.actual_max_x - self.actual_min_x
        }

        pub fn actual_height(&self) -> f32 {
            self.actual_max_y - self.actual_min_y
        }
    }

    /// One script-homogeneous run handed to a shaping engine
    #[derive(Debug, Clone)]
    pub struct ShapeRequest<'a> {
        pub font_data: &'a [u8],
        pub face_index: u32,
        pub text: &'a str,
        pub script: Option<&'a str>,
        pub language: Option<&'a str>,
        pub direction: Direction,
        pub features: &'a [(String, u32)],
        pub font_size: f32,
    }

    /// Raw glyph position as a shaping engine reports it
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct ShapedGlyph {
        pub glyph_id: GlyphId,
        /// Byte offset into the request text
        pub cluster: u32,
        pub advance_x: i32,
        pub advance_y: i32,
        pub offset_x: i32,
        pub offset_y: i32,
    }

    /// Engine output, still in the engine's own unit space
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct ShapedRun {
        /// Glyphs in visual order
        pub glyphs: Vec<ShapedGlyph>,
        /// Units per em of the space the positions are expressed in
        pub reference_units: u16,
    }

    /// Everything a positioning stage needs about one line set
    #[derive(Debug, Clone, Copy)]
    pub struct LayoutRequest<'a> {
        pub text: &'a str,
        pub order: &'a VisualOrder,
        pub runs: &'a [VisualRun],
        pub scripts: &'a [ScriptTag],
        pub font_size: f32,
        pub letter_spacing: f32,
        pub features: &'a [(String, u32)],
        pub language: Option<&'a str>,
    }
}

impl fmt::Display for types::ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for types::ScriptTag {
    type Err = GlyphcutError;

    fn from_str(name: &str) -> Result<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        types::ScriptTag::ALL
            .into_iter()
            .find(|tag| {
                tag.as_str() == lowered
                    || tag
                        .iso15924()
                        .map(|iso| iso.eq_ignore_ascii_case(&lowered))
                        .unwrap_or(false)
            })
            .ok_or_else(|| GlyphcutError::InvalidSettings(format!("unknown script '{name}'")))
    }
}

impl FromStr for types::BaseDirection {
    type Err = GlyphcutError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "ltr" => Ok(types::BaseDirection::Ltr),
            "rtl" => Ok(types::BaseDirection::Rtl),
            "auto" => Ok(types::BaseDirection::Auto),
            other => Err(GlyphcutError::InvalidSettings(format!(
                "invalid direction '{other}'"
            ))),
        }
    }
}

/// Which rendering path a render call takes
///
/// Every variant produces a [`types::GlyphLayout`], so alignment and
/// assembly never need to know which one ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Live text: one positioned text element per character
    Text,
    /// Advance-based positions with each glyph's outline path
    #[default]
    Outline,
    /// Complex-script shaping with outline paths
    Shaped,
    /// Display-only: each line as one visually reordered string
    WholeLine,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Text,
        RenderMode::Outline,
        RenderMode::Shaped,
        RenderMode::WholeLine,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Text => "text",
            RenderMode::Outline => "outline",
            RenderMode::Shaped => "shaped",
            RenderMode::WholeLine => "whole-line",
        }
    }

    /// Whether this mode needs the shaping engine
    pub fn needs_shaping(self) -> bool {
        matches!(self, RenderMode::Shaped)
    }
}

impl FromStr for RenderMode {
    type Err = GlyphcutError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(RenderMode::Text),
            "outline" => Ok(RenderMode::Outline),
            "shaped" => Ok(RenderMode::Shaped),
            "whole-line" | "whole_line" | "wholeline" => Ok(RenderMode::WholeLine),
            other => Err(GlyphcutError::InvalidSettings(format!(
                "invalid display mode '{other}'"
            ))),
        }
    }
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Parse `RRGGBB`, `RRGGBBAA` (optionally `#`-prefixed) or `none`
    pub fn from_hex(value: &str) -> Result<Self> {
        if value.eq_ignore_ascii_case("none") {
            return Ok(Self::transparent());
        }

        let hex = value.trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(GlyphcutError::InvalidSettings(format!(
                "color '{value}' must be RRGGBB or RRGGBBAA"
            )));
        }

        let channel = |at: usize| {
            u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| {
                GlyphcutError::InvalidSettings(format!("color '{value}' is not hexadecimal"))
            })
        };

        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Everything one render call is asked to do
///
/// Units are output units (millimetres for the SVG backend).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub text: String,
    pub font_size: f32,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    pub letter_spacing: f32,
    pub direction: types::BaseDirection,
    pub mode: RenderMode,
    /// OpenType features for shaped rendering, e.g. `("liga", 0)`
    pub features: Vec<(String, u32)>,
    /// BCP 47 language tag for shaped rendering
    pub language: Option<String>,
    /// Font family named by live-text output; `None` names the loaded fonts
    pub font_family: Option<String>,
    /// Horizontal room added to the typographic width
    pub padding: f32,
    /// Canvas never gets narrower than this
    pub minimum_width: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 30.0,
            fill: Color::black(),
            stroke: Color::transparent(),
            stroke_width: 0.0,
            letter_spacing: 0.0,
            direction: types::BaseDirection::Auto,
            mode: RenderMode::Outline,
            features: Vec::new(),
            language: None,
            font_family: None,
            padding: 10.0,
            minimum_width: 10.0,
        }
    }
}

impl Settings {
    /// Settings for `text` with every other field at its default
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Reject values no renderer can honour
    pub fn validate(&self) -> Result<()> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(GlyphcutError::InvalidSettings(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(GlyphcutError::InvalidSettings(format!(
                "stroke width must not be negative, got {}",
                self.stroke_width
            )));
        }
        if !self.letter_spacing.is_finite() {
            return Err(GlyphcutError::InvalidSettings(
                "letter spacing must be finite".into(),
            ));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(GlyphcutError::InvalidSettings(format!(
                "padding must not be negative, got {}",
                self.padding
            )));
        }
        if !(self.minimum_width.is_finite() && self.minimum_width >= 0.0) {
            return Err(GlyphcutError::InvalidSettings(format!(
                "minimum width must not be negative, got {}",
                self.minimum_width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::types::*;
    use super::*;

    #[test]
    fn visual_order_inverse_round_trips() {
        let order = VisualOrder::from_permutation(vec![0, 1, 2, 6, 5, 4, 3]).unwrap();
        let inverse = order.inverse();
        assert_eq!(inverse, vec![0, 1, 2, 6, 5, 4, 3]);
        assert_eq!(VisualOrder::from_inverse(&inverse).unwrap(), order);
    }

    #[test]
    fn from_permutation_rejects_duplicates_and_gaps() {
        assert!(VisualOrder::from_permutation(vec![0, 0, 1]).is_none());
        assert!(VisualOrder::from_permutation(vec![0, 3]).is_none());
        assert!(VisualOrder::from_permutation(vec![]).is_some());
    }

    #[test]
    fn reversing_a_segment_twice_restores_order() {
        let mut order = VisualOrder::identity(5);
        let segment = ReorderSegment::new(1, 3);
        assert!(order.reverse_segment(segment));
        assert_eq!(order.as_slice(), &[0, 3, 2, 1, 4]);
        assert!(order.reverse_segment(segment));
        assert!(order.is_identity());
    }

    #[test]
    fn out_of_range_segment_is_refused() {
        let mut order = VisualOrder::identity(3);
        assert!(!order.reverse_segment(ReorderSegment::new(1, 3)));
        assert!(order.is_identity());
    }

    #[test]
    fn visual_text_follows_order() {
        let chars: Vec<char> = "abc".chars().collect();
        let order = VisualOrder::from_permutation(vec![2, 1, 0]).unwrap();
        assert_eq!(order.visual_text(&chars), "cba");
    }

    #[test]
    fn color_parses_hex_forms() {
        assert_eq!(Color::from_hex("FF0000").unwrap(), Color::rgba(255, 0, 0, 255));
        assert_eq!(Color::from_hex("#00FF0080").unwrap(), Color::rgba(0, 255, 0, 128));
        assert!(Color::from_hex("none").unwrap().is_transparent());
        assert!(Color::from_hex("12345").is_err());
        assert!(Color::from_hex("GGGGGG").is_err());
    }

    #[test]
    fn script_tag_parses_names_and_iso_tags() {
        assert_eq!("hebrew".parse::<ScriptTag>().unwrap(), ScriptTag::Hebrew);
        assert_eq!("Arab".parse::<ScriptTag>().unwrap(), ScriptTag::Arabic);
        assert!("klingon".parse::<ScriptTag>().is_err());
    }

    #[test]
    fn settings_validation() {
        assert!(Settings::with_text("A").validate().is_ok());

        let zero_size = Settings {
            font_size: 0.0,
            ..Default::default()
        };
        assert_eq!(
            zero_size.validate().unwrap_err().kind(),
            ErrorKind::InvalidSettings
        );

        let negative_stroke = Settings {
            stroke_width: -1.0,
            ..Default::default()
        };
        assert!(negative_stroke.validate().is_err());
    }

    #[test]
    fn render_mode_parses() {
        assert_eq!("whole-line".parse::<RenderMode>().unwrap(), RenderMode::WholeLine);
        assert_eq!("Shaped".parse::<RenderMode>().unwrap(), RenderMode::Shaped);
        assert!("raster".parse::<RenderMode>().is_err());
    }
}
