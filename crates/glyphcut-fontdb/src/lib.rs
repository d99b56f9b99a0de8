//! Fonts for glyphcut: loading, metrics and outlines
//!
//! Fonts store their raw data and create a `FontRef` on demand for
//! parsing, which keeps them `'static` and supports TTC collections
//! through a face index.
//!
//! Advances are reported in font units, exactly as `hmtx` stores them.
//! Outlines are drawn by skrifa at the requested font size, so path data
//! is already in output units.

pub mod outline;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use read_fonts::{types::GlyphId as ReadGlyphId, FontRef as ReadFontRef, TableProvider};
use skrifa::{
    instance::{LocationRef, Size},
    outline::DrawSettings,
    string::StringId,
    MetadataProvider,
};

use glyphcut_core::{
    error::{FontLoadError, Result},
    types::{GlyphId, GlyphOutline, ScriptTag},
    FontSet, MetricsProvider,
};

pub use outline::SvgPathPen;

/// A font that's been brought into memory
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let data = fs::read(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()))?;

        Self::from_data_index(data, face_index)
    }

    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Validates the bytes and caches the em size
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .map_err(|_| FontLoadError::NotSupported("font has no head table".into()))?;
        if units_per_em == 0 {
            return Err(FontLoadError::NotSupported("units per em is zero".into()).into());
        }

        log::debug!(
            "Loaded font face {face_index} ({} bytes, {units_per_em} units per em)",
            data.len()
        );

        Ok(Font {
            data,
            face_index,
            units_per_em,
        })
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Counts how many different glyphs this font contains
    pub fn glyph_count(&self) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.maxp().ok().map(|maxp| maxp.num_glyphs() as u32))
    }

    /// Whether the character map covers `ch`
    pub fn covers(&self, ch: char) -> bool {
        MetricsProvider::glyph_id(self, ch).is_some()
    }
}

impl MetricsProvider for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Glyph 0 (`.notdef`) counts as missing
    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch))
            .map(|gid| gid.to_u32())
            .filter(|&gid| gid != 0)
    }

    fn advance_width(&self, glyph_id: GlyphId) -> Option<f32> {
        let font = self.font_ref()?;
        let hmtx = font.hmtx().ok()?;
        hmtx.advance(ReadGlyphId::new(glyph_id)).map(f32::from)
    }

    fn glyph_outline(&self, glyph_id: GlyphId, font_size: f32) -> Option<GlyphOutline> {
        let font = skrifa::FontRef::from_index(&self.data, self.face_index).ok()?;
        let outlines = font.outline_glyphs();
        let glyph = outlines.get(skrifa::GlyphId::new(glyph_id))?;

        let settings = DrawSettings::unhinted(Size::new(font_size), LocationRef::default());
        let mut pen = SvgPathPen::new();
        if let Err(e) = glyph.draw(settings, &mut pen) {
            log::debug!("Outline of glyph {glyph_id} could not be drawn: {e}");
            return None;
        }

        let (path, ink) = pen.finish();
        Some(GlyphOutline { path, ink })
    }

    /// Typographic family if the font has one, else the legacy family
    fn family_name(&self) -> Option<String> {
        let font = skrifa::FontRef::from_index(&self.data, self.face_index).ok()?;
        [StringId::TYPOGRAPHIC_FAMILY_NAME, StringId::FAMILY_NAME]
            .into_iter()
            .filter_map(|id| font.localized_strings(id).english_or_first())
            .map(|name| name.to_string())
            .find(|name| !name.trim().is_empty())
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

/// Your font library: keeps track of all loaded fonts and which script
/// each one serves
pub struct FontDatabase {
    fonts: Vec<Arc<Font>>,
    /// Maps canonical paths to their loaded fonts
    path_cache: HashMap<PathBuf, Arc<Font>>,
    default_font: Option<Arc<Font>>,
    assignments: HashMap<ScriptTag, Arc<Font>>,
}

impl FontDatabase {
    pub fn new() -> Self {
        Self {
            fonts: Vec::new(),
            path_cache: HashMap::new(),
            default_font: None,
            assignments: HashMap::new(),
        }
    }

    /// Loads a font file and remembers it for future use.
    /// If the same path was already loaded, returns the cached font.
    pub fn load_font(&mut self, path: impl AsRef<Path>) -> Result<Arc<Font>> {
        let path = path.as_ref();
        let cache_key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(font) = self.path_cache.get(&cache_key) {
            return Ok(font.clone());
        }

        let font = Arc::new(Font::from_file(path)?);
        self.path_cache.insert(cache_key, font.clone());
        self.remember(font.clone());
        Ok(font)
    }

    /// Adds a font from memory to the library
    pub fn load_font_data(&mut self, data: Vec<u8>) -> Result<Arc<Font>> {
        let font = Arc::new(Font::from_data(data)?);
        self.remember(font.clone());
        Ok(font)
    }

    /// Loads a font file and routes one script bucket to it
    pub fn load_script_font(
        &mut self,
        script: ScriptTag,
        path: impl AsRef<Path>,
    ) -> Result<Arc<Font>> {
        let font = self.load_font(path)?;
        self.assign(script, font.clone());
        Ok(font)
    }

    fn remember(&mut self, font: Arc<Font>) {
        self.fonts.push(font.clone());
        // First font loaded becomes the default
        if self.default_font.is_none() {
            self.default_font = Some(font);
        }
    }

    /// Returns the font we fall back to when no script font matches
    pub fn default_font(&self) -> Option<Arc<Font>> {
        self.default_font.clone()
    }

    pub fn set_default_font(&mut self, font: Arc<Font>) {
        self.default_font = Some(font);
    }

    pub fn assign(&mut self, script: ScriptTag, font: Arc<Font>) {
        self.assignments.insert(script, font);
    }

    pub fn font_for_script(&self, script: ScriptTag) -> Option<Arc<Font>> {
        self.assignments.get(&script).cloned()
    }

    /// Shows all fonts currently loaded
    pub fn fonts(&self) -> &[Arc<Font>] {
        &self.fonts
    }

    /// The routing table a render context resolves fonts through
    pub fn to_font_set(&self) -> FontSet {
        let mut set = FontSet::new();
        if let Some(font) = &self.default_font {
            set.set_default(font.clone());
        }
        for (&script, font) in &self.assignments {
            set.insert(script, font.clone());
        }
        set
    }

    /// Clears all loaded fonts from the database.
    pub fn clear(&mut self) {
        self.fonts.clear();
        self.path_cache.clear();
        self.default_font = None;
        self.assignments.clear();
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcut_core::{ErrorKind, FontResolver};

    const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    fn system_font() -> Option<Font> {
        Font::from_file(SYSTEM_FONT).ok()
    }

    #[test]
    fn test_empty_database() {
        let db = FontDatabase::new();
        assert!(db.default_font().is_none());
        assert_eq!(db.fonts().len(), 0);
        assert!(db.to_font_set().is_empty());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = Font::from_data(vec![0; 100]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DependencyUnavailable);
    }

    #[test]
    fn test_missing_file() {
        let mut db = FontDatabase::new();
        assert!(db.load_font("/definitely/not/here.ttf").is_err());
        assert_eq!(db.font_count(), 0);
    }

    #[test]
    fn test_clear_database() {
        let mut db = FontDatabase::new();
        db.clear();
        assert!(db.default_font().is_none());
        assert_eq!(db.font_count(), 0);
    }

    // The remaining tests use a system font when one is installed
    #[test]
    fn test_system_font_metrics() {
        let Some(font) = system_font() else {
            return;
        };
        assert!(font.units_per_em() > 0);
        let a = font.glyph_id('A').unwrap();
        assert!(font.advance_width(a).unwrap() > 0.0);
        assert!(font.glyph_count().unwrap() > 100);
        assert!(font.glyph_id('\u{E000}').is_none());
        assert_eq!(font.family_name().as_deref(), Some("DejaVu Sans"));
    }

    #[test]
    fn test_system_font_outlines() {
        let Some(font) = system_font() else {
            return;
        };
        let a = font.glyph_id('A').unwrap();
        let outline = font.glyph_outline(a, 30.0).unwrap();
        assert!(outline.path.starts_with('M'));
        let ink = outline.ink.unwrap();
        // Capital letters sit on the baseline and rise above it
        assert!(ink.y_min < -15.0 && ink.y_max <= 0.5);

        let space = font.glyph_id(' ').unwrap();
        let blank = font.glyph_outline(space, 30.0).unwrap();
        assert!(blank.path.is_empty());
        assert!(blank.ink.is_none());
    }

    #[test]
    fn test_paths_are_deduplicated() {
        if system_font().is_none() {
            return;
        }
        let mut db = FontDatabase::new();
        let first = db.load_font(SYSTEM_FONT).unwrap();
        let second = db.load_script_font(ScriptTag::Hebrew, SYSTEM_FONT).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(db.font_count(), 1);

        let set = db.to_font_set();
        assert!(set.has_default());
        assert_eq!(set.scripts(), vec![ScriptTag::Hebrew]);
        assert!(set.font_for(ScriptTag::Latin).is_some());
    }
}
