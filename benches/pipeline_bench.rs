//! Pipeline performance: reordering, positioning and full renders
//!
//! Uses a synthetic font so the numbers measure glyphcut itself, not font
//! parsing or outline extraction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use glyphcut::prelude::*;
use glyphcut::types::{GlyphId, GlyphOutline, InkBox, LayoutRequest};
use glyphcut::shape_none::GlyphPositioner;
use glyphcut::unicode::{BidiReorderer, ScriptClassifier, UnicodeBidiEngine};

/// Same metrics for every character
struct BenchFont;

impl MetricsProvider for BenchFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        Some(ch as u32)
    }

    fn advance_width(&self, _: GlyphId) -> Option<f32> {
        Some(500.0)
    }

    fn glyph_outline(&self, _: GlyphId, font_size: f32) -> Option<GlyphOutline> {
        let side = font_size * 0.5;
        Some(GlyphOutline {
            path: format!("M0,0L{side},0L{side},-{side}Z"),
            ink: Some(InkBox::new(0.0, -side, side, 0.0)),
        })
    }
}

/// Bidi reordering of pure and mixed-direction text
fn bench_reordering(c: &mut Criterion) {
    let reorderer = BidiReorderer::new(Arc::new(UnicodeBidiEngine::new()));

    c.bench_function("reorder_latin", |b| {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(5);
        b.iter(|| reorderer.reorder(black_box(&text), BaseDirection::Auto))
    });

    c.bench_function("reorder_mixed", |b| {
        let text = "Hello שלום world עולם 123 ".repeat(5);
        b.iter(|| reorderer.reorder(black_box(&text), BaseDirection::Auto))
    });
}

/// Advance-based positioning, isolated from reordering
fn bench_positioning(c: &mut Criterion) {
    let fonts = FontSet::single(Arc::new(BenchFont));
    let classifier = ScriptClassifier::new();
    let reorderer = BidiReorderer::new(Arc::new(UnicodeBidiEngine::new()));
    let positioner = GlyphPositioner::new();

    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(20);
    let scripts = classifier.tag_text(&text);
    let reordering = reorderer.reorder(&text, BaseDirection::Ltr);
    let request = LayoutRequest {
        text: &text,
        order: &reordering.order,
        runs: &reordering.runs,
        scripts: &scripts,
        font_size: 12.0,
        letter_spacing: 0.0,
        features: &[],
        language: None,
    };

    c.bench_function("position_long_text", |b| {
        b.iter(|| positioner.position(black_box(&request), &fonts, true))
    });
}

/// Settings in, SVG out
fn bench_full_render(c: &mut Criterion) {
    let context = RenderContext::builder()
        .default_font(Arc::new(BenchFont))
        .bidi_engine(Arc::new(UnicodeBidiEngine::new()))
        .build();

    c.bench_function("render_short_outline", |b| {
        let settings = Settings::with_text("Hello glyphcut!");
        b.iter(|| context.render(black_box(&settings)).unwrap())
    });

    c.bench_function("render_paragraph_whole_line", |b| {
        let settings = Settings {
            text: "The quick brown fox\njumps over the lazy dog.\n".repeat(3),
            mode: RenderMode::WholeLine,
            ..Default::default()
        };
        b.iter(|| context.render(black_box(&settings)).unwrap())
    });
}

criterion_group!(benches, bench_reordering, bench_positioning, bench_full_render);
criterion_main!(benches);
