//! The render entry point: settings in, markup plus measurements out

use glyphcut_core::{
    bounds, layout,
    types::{Bounds, LayoutFrame},
    ErrorKind, GlyphcutError, RenderWarning, Settings,
};
use glyphcut_render_svg::SvgAssembler;

use crate::context::RenderContext;
use crate::mode;

/// A finished render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    /// Complete SVG document, 1 user unit = 1 mm
    pub markup: String,
    pub frame: LayoutFrame,
    pub bounds: Bounds,
    /// Problems that were recovered from
    pub warnings: Vec<RenderWarning>,
    /// Glyphs placed, placeholders included
    pub glyph_count: usize,
}

impl RenderOutput {
    /// What an empty text renders to
    pub fn cleared() -> Self {
        Self {
            markup: SvgAssembler::new().empty_document(),
            frame: LayoutFrame::default(),
            bounds: Bounds::default(),
            warnings: Vec::new(),
            glyph_count: 0,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn width_mm(&self) -> f32 {
        self.frame.canvas_width
    }

    pub fn height_mm(&self) -> f32 {
        self.frame.canvas_height
    }
}

/// A render that could not produce output
///
/// The message is one short sentence fit to show the user in place of
/// the drawing; [`to_markup`](Self::to_markup) does exactly that.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RenderFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl RenderFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// An SVG document showing the failure message
    pub fn to_markup(&self) -> String {
        SvgAssembler::new().error_document(&self.message)
    }
}

impl From<GlyphcutError> for RenderFailure {
    fn from(error: GlyphcutError) -> Self {
        Self::new(error.kind(), error.to_string())
    }
}

/// Render `settings` with the fonts and engines of `context`
///
/// Empty text is not an error: it yields [`RenderOutput::cleared`].
/// A missing font or shaping engine aborts with
/// [`ErrorKind::DependencyUnavailable`]; a text where no character has a
/// glyph aborts with [`ErrorKind::GlyphUnavailable`]. Every other problem
/// is recovered from and reported in [`RenderOutput::warnings`].
pub fn render(context: &RenderContext, settings: &Settings) -> Result<RenderOutput, RenderFailure> {
    settings.validate()?;

    if settings.text.is_empty() {
        log::debug!("Nothing to render; clearing output");
        return Ok(RenderOutput::cleared());
    }

    if context.fonts().is_empty() {
        return Err(GlyphcutError::DependencyUnavailable("font".into()).into());
    }

    log::debug!(
        "Rendering {} chars in {} mode at {} mm",
        settings.text.chars().count(),
        settings.mode.as_str(),
        settings.font_size
    );

    let glyphs = mode::layout(context, settings)?;
    if glyphs.all_placeholders() {
        return Err(GlyphcutError::NoRenderableGlyphs.into());
    }

    let frame = layout::frame(settings, glyphs.typographic_width());
    let bounds = bounds::measure(&glyphs, &frame, settings);
    let markup = context.assembler().assemble(&glyphs, &frame, settings)?;

    if !glyphs.warnings.is_empty() {
        log::info!("Render finished with {} warning(s)", glyphs.warnings.len());
    }

    Ok(RenderOutput {
        markup,
        frame,
        bounds,
        glyph_count: glyphs.glyphs.len(),
        warnings: glyphs.warnings,
    })
}
