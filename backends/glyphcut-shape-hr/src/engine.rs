//! Shaping engine backed by harfrust

use std::str::FromStr;

use harfrust::{
    Direction as HrDirection, Feature, FontRef as HrFontRef, Language, Script, ShaperData, Tag,
    UnicodeBuffer,
};
use read_fonts::{FontRef as ReadFontRef, TableProvider};

use glyphcut_core::{
    error::{Result, ShapingError},
    types::{Direction, ShapeRequest, ShapedGlyph, ShapedRun},
    ShapingEngine,
};

/// Pure Rust text shaping powered by harfrust
///
/// Shaper data, shaper and buffer are built inside each
/// [`shape`](ShapingEngine::shape) call and dropped before it returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct HarfrustEngine;

impl HarfrustEngine {
    pub fn new() -> Self {
        Self
    }

    fn to_hr_direction(dir: Direction) -> HrDirection {
        match dir {
            Direction::LeftToRight => HrDirection::LeftToRight,
            Direction::RightToLeft => HrDirection::RightToLeft,
        }
    }

    /// Parse a 4-character tag string into a harfrust Tag
    pub(crate) fn parse_tag(tag_str: &str) -> Option<Tag> {
        let bytes: [u8; 4] = tag_str.as_bytes().try_into().ok()?;
        Some(Tag::new(&bytes))
    }

    /// Units per em of the face, which is the space harfrust reports in
    fn reference_units(data: &[u8], face_index: u32) -> Result<u16> {
        let font =
            ReadFontRef::from_index(data, face_index).map_err(|_| ShapingError::InvalidFont)?;
        let upem = font
            .head()
            .map(|head| head.units_per_em())
            .map_err(|_| ShapingError::InvalidFont)?;
        if upem == 0 {
            return Err(ShapingError::InvalidReferenceUnits(upem).into());
        }
        Ok(upem)
    }
}

impl ShapingEngine for HarfrustEngine {
    fn name(&self) -> &'static str {
        "harfrust"
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> Result<ShapedRun> {
        let reference_units = Self::reference_units(request.font_data, request.face_index)?;
        if request.text.is_empty() {
            return Ok(ShapedRun {
                glyphs: Vec::new(),
                reference_units,
            });
        }

        let hr_font = HrFontRef::from_index(request.font_data, request.face_index)
            .map_err(|_| ShapingError::InvalidFont)?;

        // Caches font tables for the duration of this call only
        let shaper_data = ShaperData::new(&hr_font);
        let shaper = shaper_data
            .shaper(&hr_font)
            .point_size(Some(request.font_size))
            .build();

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(request.text);
        buffer.set_direction(Self::to_hr_direction(request.direction));

        if let Some(lang) = request.language {
            match Language::from_str(lang) {
                Ok(language) => buffer.set_language(language),
                Err(_) => log::debug!("Ignoring unparsable language tag {lang:?}"),
            }
        }

        if let Some(script) = request
            .script
            .and_then(Self::parse_tag)
            .and_then(Script::from_iso15924_tag)
        {
            buffer.set_script(script);
        }

        let features: Vec<Feature> = request
            .features
            .iter()
            .filter_map(|(name, value)| {
                Self::parse_tag(name).map(|tag| Feature {
                    tag,
                    value: *value,
                    start: 0,
                    end: u32::MAX,
                })
            })
            .collect();

        let output = shaper.shape(buffer, &features);

        let glyphs = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id,
                cluster: info.cluster,
                advance_x: pos.x_advance,
                advance_y: pos.y_advance,
                offset_x: pos.x_offset,
                offset_y: pos.y_offset,
            })
            .collect();

        Ok(ShapedRun {
            glyphs,
            reference_units,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcut_core::ErrorKind;

    const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    fn request<'a>(
        data: &'a [u8],
        text: &'a str,
        features: &'a [(String, u32)],
    ) -> ShapeRequest<'a> {
        ShapeRequest {
            font_data: data,
            face_index: 0,
            text,
            script: Some("Latn"),
            language: Some("en"),
            direction: Direction::LeftToRight,
            features,
            font_size: 30.0,
        }
    }

    #[test]
    fn test_parse_tag() {
        assert!(HarfrustEngine::parse_tag("liga").is_some());
        assert!(HarfrustEngine::parse_tag("lig").is_none());
        assert!(HarfrustEngine::parse_tag("ligature").is_none());
    }

    #[test]
    fn test_invalid_font_data_is_an_error() {
        let engine = HarfrustEngine::new();
        let err = engine.shape(&request(&[0; 64], "Hi", &[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_with_system_font() {
        let Ok(data) = std::fs::read(SYSTEM_FONT) else {
            return;
        };
        let engine = HarfrustEngine::new();
        let run = engine.shape(&request(&data, "Hello", &[])).unwrap();

        assert_eq!(run.reference_units, 2048);
        assert_eq!(run.glyphs.len(), 5);
        assert!(run.glyphs.iter().all(|g| g.glyph_id > 0 && g.advance_x > 0));
        let clusters: Vec<u32> = run.glyphs.iter().map(|g| g.cluster).collect();
        assert_eq!(clusters, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_rtl_output_is_visual() {
        let Ok(data) = std::fs::read(SYSTEM_FONT) else {
            return;
        };
        let engine = HarfrustEngine::new();
        let mut req = request(&data, "שלום", &[]);
        req.script = Some("Hebr");
        req.language = None;
        req.direction = Direction::RightToLeft;

        let run = engine.shape(&req).unwrap();
        let clusters: Vec<u32> = run.glyphs.iter().map(|g| g.cluster).collect();
        // Hebrew letters are two bytes each; leftmost glyph is the last letter
        assert_eq!(clusters, vec![6, 4, 2, 0]);
    }
}