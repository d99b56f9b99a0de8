//! End-to-end scenarios through the public render entry point

mod common;

use std::sync::Arc;

use common::{mock_context, settings};
use glyphcut::prelude::*;
use glyphcut::types::{Direction, ReorderSegment, VisualRun};
use glyphcut::unicode::{BidiReorderer, UnicodeBidiEngine};

fn reorderer() -> BidiReorderer {
    BidiReorderer::new(Arc::new(UnicodeBidiEngine::new()))
}

#[test]
fn test_scenario_a_plain_latin() {
    let reordering = reorderer().reorder("Hello", BaseDirection::Ltr);
    assert_eq!(reordering.order.as_slice(), &[0, 1, 2, 3, 4]);

    let mut settings = settings("Hello", RenderMode::Outline);
    settings.direction = BaseDirection::Ltr;
    let output = mock_context().render(&settings).unwrap();

    assert_eq!(output.frame.baseline_y, 36.0);
    assert_eq!(output.glyph_count, 5);
    assert!(output.warnings.is_empty());
    assert_eq!(output.bounds.typographic_width, 75.0);
    assert_eq!(output.bounds.typographic_height, 45.0);
    assert_eq!(output.width_mm(), 85.0);
    for x in ["5.000", "20.000", "35.000", "50.000", "65.000"] {
        assert!(output.markup.contains(&format!("translate({x},36.000)")));
    }
    assert_eq!(output.bounds.actual_min_x, 5.0);
    assert_eq!(output.bounds.actual_max_x, 80.0);
    assert_eq!(output.bounds.actual_min_y, 21.0);
    assert_eq!(output.bounds.actual_max_y, 36.0);
}

#[test]
fn test_scenario_b_pure_hebrew_rtl() {
    let reordering = reorderer().reorder("שלום", BaseDirection::Rtl);
    assert_eq!(reordering.segments, vec![ReorderSegment::new(0, 3)]);
    assert_eq!(reordering.order.as_slice(), &[3, 2, 1, 0]);

    let mut settings = settings("שלום", RenderMode::WholeLine);
    settings.direction = BaseDirection::Rtl;
    let output = mock_context().render(&settings).unwrap();
    assert!(output.markup.contains(">םולש</text>"));
    assert!(output.markup.contains(r#"unicode-bidi="bidi-override""#));
}

#[test]
fn test_scenario_c_mixed_auto() {
    let reordering = reorderer().reorder("Hi שלום", BaseDirection::Auto);
    assert_eq!(reordering.segments, vec![ReorderSegment::new(3, 6)]);
    assert_eq!(reordering.order.as_slice(), &[0, 1, 2, 6, 5, 4, 3]);
    assert_eq!(
        reordering.runs,
        vec![
            VisualRun {
                start: 0,
                end: 3,
                direction: Direction::LeftToRight
            },
            VisualRun {
                start: 3,
                end: 7,
                direction: Direction::RightToLeft
            },
        ]
    );

    let output = mock_context()
        .render(&settings("Hi שלום", RenderMode::WholeLine))
        .unwrap();
    assert!(output.markup.contains(">Hi םולש</text>"));
}

#[test]
fn test_scenario_d_same_frame_for_positioner_and_shaper() {
    let context = mock_context();
    let outline = context.render(&settings("A", RenderMode::Outline)).unwrap();
    let shaped = context.render(&settings("A", RenderMode::Shaped)).unwrap();

    for output in [&outline, &shaped] {
        assert_eq!(output.frame.canvas_height, 45.0);
        assert_eq!(output.frame.baseline_y, 36.0);
        assert!(output.markup.contains("translate(5.000,36.000)"));
    }
    assert_eq!(outline.frame, shaped.frame);
    assert_eq!(outline.bounds, shaped.bounds);
}

#[test]
fn test_scenario_e_empty_text() {
    let context = mock_context();
    for mode in RenderMode::ALL {
        let output = context.render(&settings("", mode)).unwrap();
        assert!(output.is_cleared());
        assert_eq!(output.bounds, Bounds::default());
        assert!(output.markup.contains(r#"width="0mm" height="0mm""#));
        assert!(output.warnings.is_empty());
    }
}

#[test]
fn test_missing_glyph_leaves_a_gap() {
    let output = mock_context()
        .render(&settings("a\u{E000}b", RenderMode::Outline))
        .unwrap();
    assert_eq!(output.glyph_count, 3);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].kind(), ErrorKind::GlyphUnavailable);
    assert_eq!(output.markup.matches("<path").count(), 2);
    // 15 + 15 placeholder + 15
    assert_eq!(output.bounds.typographic_width, 45.0);
}

#[test]
fn test_every_glyph_missing_fails() {
    let context = mock_context();
    for mode in [RenderMode::Outline, RenderMode::Shaped] {
        let failure = context
            .render(&settings("\u{E000}\u{E001}", mode))
            .unwrap_err();
        assert_eq!(failure.kind, ErrorKind::GlyphUnavailable);
        assert!(failure.to_markup().contains("</text>"));
    }
}

#[test]
fn test_shaped_without_engine_fails_fast() {
    let context = RenderContext::builder()
        .default_font(Arc::new(common::MockFont))
        .bidi_engine(Arc::new(UnicodeBidiEngine::new()))
        .config(EngineConfig::with_shaping_timeout(std::time::Duration::ZERO))
        .build();

    let failure = context
        .render(&settings("Hello", RenderMode::Shaped))
        .unwrap_err();
    assert_eq!(failure.kind, ErrorKind::DependencyUnavailable);
    assert_eq!(failure.message, "The shaping engine is not available.");

    // Other modes are unaffected
    let output = context.render(&settings("Hello", RenderMode::Outline)).unwrap();
    assert!(output.warnings.is_empty());
}

#[test]
fn test_unbounded_shaping_timeout() {
    let context = RenderContext::builder()
        .default_font(Arc::new(common::MockFont))
        .bidi_engine(Arc::new(UnicodeBidiEngine::new()))
        .shaping_engine(Arc::new(common::MockShaper))
        .config(EngineConfig::with_shaping_timeout(std::time::Duration::MAX))
        .build();

    let output = context.render(&settings("Hi", RenderMode::Shaped)).unwrap();
    assert_eq!(output.glyph_count, 2);
}

#[test]
fn test_bidi_isolates_leave_no_gap() {
    let context = mock_context();
    let isolated = "abc \u{2067}שלום\u{2069} def";

    let plain_width = context
        .render(&settings("abc שלום def", RenderMode::Outline))
        .unwrap()
        .bounds
        .typographic_width;
    for mode in RenderMode::ALL {
        let output = context.render(&settings(isolated, mode)).unwrap();
        assert!(output.warnings.is_empty(), "{mode:?}: {:?}", output.warnings);
        assert_eq!(output.bounds.typographic_width, plain_width, "{mode:?}");
        assert_eq!(output.glyph_count, 12, "{mode:?}");
    }
}

#[test]
fn test_missing_bidi_engine_degrades_to_logical_order() {
    let context = RenderContext::builder()
        .default_font(Arc::new(common::MockFont))
        .build();

    let output = context
        .render(&settings("Hi שלום", RenderMode::WholeLine))
        .unwrap();
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].kind(), ErrorKind::ReorderFailure);
    assert!(output.markup.contains(">Hi שלום</text>"));
}

#[test]
fn test_engine_installed_from_another_thread() {
    let context = Arc::new(
        RenderContext::builder()
            .default_font(Arc::new(common::MockFont))
            .config(EngineConfig::with_shaping_timeout(
                std::time::Duration::from_secs(10),
            ))
            .build(),
    );

    let late = Arc::clone(&context);
    let installer = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(20));
        late.install_bidi_engine(Arc::new(UnicodeBidiEngine::new()));
        late.install_shaping_engine(Arc::new(common::MockShaper));
    });

    let output = context
        .render(&settings("Hello", RenderMode::Shaped))
        .unwrap();
    installer.join().unwrap();
    assert_eq!(output.glyph_count, 5);
    assert!(context.gate().is_ready());
}

#[test]
fn test_multiline_lines_are_centred() {
    let output = mock_context()
        .render(&settings("Hello\nab", RenderMode::Outline))
        .unwrap();
    assert_eq!(output.frame.line_count, 2);
    assert_eq!(output.height_mm(), 90.0);
    // Second line: canvas 85, width 30
    assert!(output.markup.contains("translate(27.500,81.000)"));
}

#[test]
fn test_with_system_font() {
    let Ok(font) = Font::from_file("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf") else {
        return;
    };
    let context = RenderContext::with_defaults(FontSet::single(Arc::new(font)));

    for mode in RenderMode::ALL {
        let output = context.render(&settings("Hello", mode)).unwrap();
        assert_eq!(output.frame.baseline_y, 36.0);
        assert!(output.bounds.typographic_width > 0.0);
        assert!(output.bounds.actual_max_y <= 36.0 + 0.2 * 30.0);
    }

    // Live text asks for the font its positions came from
    let output = context.render(&settings("Hello", RenderMode::Text)).unwrap();
    assert!(output.markup.contains("&apos;DejaVu Sans&apos;, sans-serif"));

    // Isolates take no room here either, whatever the font maps them to
    let isolated = "abc \u{2067}שלום\u{2069} def";
    for mode in [RenderMode::Outline, RenderMode::Shaped] {
        let plain = context.render(&settings("abc שלום def", mode)).unwrap();
        let output = context.render(&settings(isolated, mode)).unwrap();
        assert!(output.warnings.is_empty(), "{mode:?}");
        let width = output.bounds.typographic_width;
        assert!((width - plain.bounds.typographic_width).abs() < 0.01, "{mode:?}: {width}");
    }
}
