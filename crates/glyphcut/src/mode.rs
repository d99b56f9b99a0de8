//! One layout function per render mode
//!
//! Each returns a [`GlyphLayout`] in the same coordinate contract, so the
//! caller never needs to know which one ran.

use glyphcut_core::{
    types::{GlyphLayout, GlyphStyle, LayoutRequest, ScriptTag},
    GlyphcutError, RenderMode, RenderWarning, Result, Settings,
};
use glyphcut_shape_hr::ShapingAdapter;
use glyphcut_unicode::{BidiReorderer, Reordering};

use crate::context::RenderContext;

/// Lay out `settings.text` the way `settings.mode` asks for
pub(crate) fn layout(context: &RenderContext, settings: &Settings) -> Result<GlyphLayout> {
    let scripts = context.classifier().tag_text(&settings.text);

    match settings.mode {
        RenderMode::Text => layout_text(context, settings, &scripts),
        RenderMode::Outline => layout_outline(context, settings, &scripts),
        RenderMode::Shaped => layout_shaped(context, settings, &scripts),
        RenderMode::WholeLine => layout_whole_line(context, settings, &scripts),
    }
}

fn layout_text(
    context: &RenderContext,
    settings: &Settings,
    scripts: &[ScriptTag],
) -> Result<GlyphLayout> {
    let reordering = reorder_now(context, settings);
    Ok(position(context, settings, scripts, &reordering, false))
}

fn layout_outline(
    context: &RenderContext,
    settings: &Settings,
    scripts: &[ScriptTag],
) -> Result<GlyphLayout> {
    let reordering = reorder_now(context, settings);
    Ok(position(context, settings, scripts, &reordering, true))
}

/// Shaping needs both engines; this is the only mode that waits for them
fn layout_shaped(
    context: &RenderContext,
    settings: &Settings,
    scripts: &[ScriptTag],
) -> Result<GlyphLayout> {
    let timeout = context.config().shaping_ready_timeout;
    let Some(engines) = context.gate().wait_all(timeout) else {
        let missing = context.gate().missing();
        log::warn!("Shaped render gave up after {timeout:?} waiting for {missing:?}");
        let first = missing.first().copied().unwrap_or("shaping engine");
        return Err(GlyphcutError::DependencyUnavailable(first.to_string()));
    };

    let reordering = BidiReorderer::new(engines.bidi).reorder(&settings.text, settings.direction);
    let request = request(settings, scripts, &reordering);
    let mut layout = ShapingAdapter::new(engines.shaper).layout(&request, context.fonts());
    prepend_warning(&mut layout, reordering.warning);
    Ok(layout)
}

/// Widths come from the positioner; drawing is one string per line
fn layout_whole_line(
    context: &RenderContext,
    settings: &Settings,
    scripts: &[ScriptTag],
) -> Result<GlyphLayout> {
    let reordering = reorder_now(context, settings);
    let mut layout = position(context, settings, scripts, &reordering, false);
    layout.style = GlyphStyle::VisualLines(reordering.visual_lines(&settings.text));
    Ok(layout)
}

/// Reorder with whatever bidi engine is installed right now
fn reorder_now(context: &RenderContext, settings: &Settings) -> Reordering {
    match context.gate().bidi() {
        Some(engine) => BidiReorderer::new(engine).reorder(&settings.text, settings.direction),
        None => Reordering::fallback(&settings.text, "The bidi engine is not available."),
    }
}

fn position(
    context: &RenderContext,
    settings: &Settings,
    scripts: &[ScriptTag],
    reordering: &Reordering,
    want_outlines: bool,
) -> GlyphLayout {
    let request = request(settings, scripts, reordering);
    let mut layout = context
        .positioner()
        .position(&request, context.fonts(), want_outlines);
    prepend_warning(&mut layout, reordering.warning.clone());
    layout
}

fn request<'a>(
    settings: &'a Settings,
    scripts: &'a [ScriptTag],
    reordering: &'a Reordering,
) -> LayoutRequest<'a> {
    LayoutRequest {
        text: &settings.text,
        order: &reordering.order,
        runs: &reordering.runs,
        scripts,
        font_size: settings.font_size,
        letter_spacing: settings.letter_spacing,
        features: &settings.features,
        language: settings.language.as_deref(),
    }
}

fn prepend_warning(layout: &mut GlyphLayout, warning: Option<RenderWarning>) {
    if let Some(warning) = warning {
        layout.warnings.insert(0, warning);
    }
}
