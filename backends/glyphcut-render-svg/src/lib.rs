//! SVG assembly: where positioned glyphs become a document
//!
//! One user unit is one millimetre. The root element says so twice:
//! `width`/`height` carry an `mm` suffix and the `viewBox` spans the
//! same numbers, so a laser cutter and a browser agree on every size.
//!
//! Every glyph is placed with the same [`LayoutFrame`] the bounds were
//! measured against:
//!
//! 1. Line `i` starts at `frame.line_origin_x(line_width)`
//! 2. Its baseline is `glyph.y`, which equals `frame.baseline_for_line(i)`
//! 3. Outline paths are only ever translated, never scaled

use std::fmt::Write as FmtWrite;

use glyphcut_core::{
    error::{ExportError, Result},
    types::{GlyphLayout, GlyphStyle, LayoutFrame},
    Color, Settings,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Font size of the failure message drawn by [`SvgAssembler::error_document`]
const ERROR_FONT_SIZE: f32 = 5.0;

/// Generic family every live-text `font-family` list ends with
const GENERIC_FAMILY: &str = "sans-serif";

/// Builds SVG documents from positioned glyphs
#[derive(Debug, Default, Clone)]
pub struct SvgAssembler {
    /// Families of the loaded fonts, named by live text unless the
    /// settings ask for a family themselves
    font_families: Vec<String>,
}

impl SvgAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name these families, in order, on live-text output
    pub fn with_font_families(mut self, families: Vec<String>) -> Self {
        self.font_families = families;
        self
    }

    /// The `font-family` value live text is drawn with
    ///
    /// An explicit `settings.font_family` wins. Otherwise the loaded
    /// fonts are named first so the text draws with the font its
    /// positions were measured in.
    pub fn font_family(&self, settings: &Settings) -> String {
        if let Some(family) = &settings.font_family {
            return family.clone();
        }
        self.font_families
            .iter()
            .map(|family| format!("'{}'", family.replace(['\'', '"'], "")))
            .chain(std::iter::once(GENERIC_FAMILY.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Assemble `layout` into a complete SVG document
    ///
    /// An empty frame gives [`empty_document`](Self::empty_document).
    pub fn assemble(
        &self,
        layout: &GlyphLayout,
        frame: &LayoutFrame,
        settings: &Settings,
    ) -> Result<String> {
        if frame.is_empty() {
            return Ok(self.empty_document());
        }

        log::debug!(
            "SvgAssembler: {} glyphs on a {:.3} x {:.3} mm canvas",
            layout.glyphs.len(),
            frame.canvas_width,
            frame.canvas_height
        );

        let mut svg = String::new();
        open_document(&mut svg, frame.canvas_width, frame.canvas_height)?;

        match &layout.style {
            GlyphStyle::Text => {
                let family = self.font_family(settings);
                write_glyph_text(&mut svg, layout, frame, settings, &family)?
            },
            GlyphStyle::Outline => write_outlines(&mut svg, layout, frame, settings)?,
            GlyphStyle::VisualLines(lines) => {
                let family = self.font_family(settings);
                write_visual_lines(&mut svg, lines, layout, frame, settings, &family)?
            },
        }

        writeln!(&mut svg, "</svg>").map_err(|e| ExportError::WriteFailed(e.to_string()))?;
        Ok(svg)
    }

    /// The cleared surface: a document with zero dimensions
    pub fn empty_document(&self) -> String {
        format!(
            r#"<svg xmlns="{SVG_NS}" width="0mm" height="0mm" viewBox="0 0 0 0"></svg>"#
        )
    }

    /// A document showing a one-sentence failure message
    pub fn error_document(&self, message: &str) -> String {
        let chars = message.chars().count() as f32;
        let width = chars * ERROR_FONT_SIZE * 0.6 + 2.0 * ERROR_FONT_SIZE;
        let height = ERROR_FONT_SIZE * 3.0;

        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = open_document(&mut svg, width, height);
        let _ = writeln!(
            &mut svg,
            r#"  <text x="{:.3}" y="{:.3}" font-family="{GENERIC_FAMILY}" font-size="{:.3}" fill="rgb(180,0,0)">{}</text>"#,
            ERROR_FONT_SIZE,
            ERROR_FONT_SIZE * 1.8,
            ERROR_FONT_SIZE,
            escape_xml(message)
        );
        svg.push_str("</svg>\n");
        svg
    }
}

fn open_document(svg: &mut String, width: f32, height: f32) -> Result<()> {
    writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    writeln!(
        svg,
        r#"<svg xmlns="{SVG_NS}" width="{width:.3}mm" height="{height:.3}mm" viewBox="0 0 {width:.3} {height:.3}">"#
    )
    .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    Ok(())
}

/// Fill and stroke attributes shared by every drawn element
fn paint_attributes(settings: &Settings) -> String {
    let mut attrs = format!(r#"fill="{}""#, paint_color(settings.fill));
    if !settings.fill.is_transparent() && settings.fill.a < 255 {
        let _ = write!(attrs, r#" fill-opacity="{:.3}""#, settings.fill.opacity());
    }

    if settings.stroke_width > 0.0 && !settings.stroke.is_transparent() {
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-width="{:.3}""#,
            settings.stroke, settings.stroke_width
        );
        if settings.stroke.a < 255 {
            let _ = write!(attrs, r#" stroke-opacity="{:.3}""#, settings.stroke.opacity());
        }
    } else {
        attrs.push_str(r#" stroke="none""#);
    }
    attrs
}

fn paint_color(color: Color) -> String {
    if color.is_transparent() {
        "none".to_string()
    } else {
        color.to_string()
    }
}

/// Live text: one `<text>` per visible glyph
fn write_glyph_text(
    svg: &mut String,
    layout: &GlyphLayout,
    frame: &LayoutFrame,
    settings: &Settings,
    family: &str,
) -> Result<()> {
    writeln!(
        svg,
        r#"  <g font-family="{}" font-size="{:.3}" {}>"#,
        escape_xml(family),
        settings.font_size,
        paint_attributes(settings)
    )
    .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for glyph in &layout.glyphs {
        let ch = glyph.content.ch();
        if glyph.content.is_placeholder() || ch.is_whitespace() {
            continue;
        }
        let x = frame.line_origin_x(layout.line_width(glyph.line)) + glyph.x;
        writeln!(
            svg,
            r#"    <text x="{:.3}" y="{:.3}">{}</text>"#,
            x,
            glyph.y,
            escape_xml(ch.encode_utf8(&mut [0; 4]))
        )
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    writeln!(svg, "  </g>").map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    Ok(())
}

/// Outlines: one translated `<path>` per inked glyph
fn write_outlines(
    svg: &mut String,
    layout: &GlyphLayout,
    frame: &LayoutFrame,
    settings: &Settings,
) -> Result<()> {
    writeln!(svg, r#"  <g {}>"#, paint_attributes(settings))
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for glyph in &layout.glyphs {
        let Some(path) = glyph.outline.as_deref().filter(|path| !path.is_empty()) else {
            continue;
        };
        let x = frame.line_origin_x(layout.line_width(glyph.line)) + glyph.x;
        writeln!(
            svg,
            r#"    <path d="{}" transform="translate({:.3},{:.3})"/>"#,
            path, x, glyph.y
        )
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    writeln!(svg, "  </g>").map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    Ok(())
}

/// Display-only: each line as one already reordered string
fn write_visual_lines(
    svg: &mut String,
    lines: &[String],
    layout: &GlyphLayout,
    frame: &LayoutFrame,
    settings: &Settings,
    family: &str,
) -> Result<()> {
    // Line widths include the spacing, so the drawn text must too
    let spacing = if settings.letter_spacing != 0.0 {
        format!(r#" letter-spacing="{:.3}""#, settings.letter_spacing)
    } else {
        String::new()
    };
    writeln!(
        svg,
        r#"  <g font-family="{}" font-size="{:.3}"{spacing} {}>"#,
        escape_xml(family),
        settings.font_size,
        paint_attributes(settings)
    )
    .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for (line, text) in lines.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        // Already in visual order, so the renderer must not reorder again
        writeln!(
            svg,
            r#"    <text x="{:.3}" y="{:.3}" direction="ltr" unicode-bidi="bidi-override" xml:space="preserve">{}</text>"#,
            frame.line_origin_x(layout.line_width(line)),
            frame.baseline_for_line(line),
            escape_xml(text)
        )
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    writeln!(svg, "  </g>").map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    Ok(())
}

/// Escape the five XML special characters
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
