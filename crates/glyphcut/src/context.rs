//! Everything a render needs, built once and passed in

use std::sync::Arc;

use glyphcut_core::{
    traits::{BidiEngine, MetricsProvider, ShapingEngine},
    types::ScriptTag,
    EngineConfig, EngineGate, FontSet, Settings,
};
use glyphcut_render_svg::SvgAssembler;
use glyphcut_shape_hr::HarfrustEngine;
use glyphcut_shape_none::GlyphPositioner;
use glyphcut_unicode::{ScriptClassifier, UnicodeBidiEngine};

use crate::render::{render, RenderFailure, RenderOutput};

/// Fonts, engines and configuration for a sequence of renders
///
/// The two engines live behind an [`EngineGate`] and may be installed
/// after the context was built, from any thread:
///
/// ```ignore
/// let context = Arc::new(RenderContext::builder().default_font(font).build());
///
/// let late = Arc::clone(&context);
/// std::thread::spawn(move || late.install_shaping_engine(Arc::new(HarfrustEngine::new())));
///
/// let output = context.render(&Settings::with_text("Hello"))?;
/// ```
pub struct RenderContext {
    fonts: FontSet,
    gate: Arc<EngineGate>,
    config: EngineConfig,
    classifier: ScriptClassifier,
    positioner: GlyphPositioner,
    assembler: SvgAssembler,
}

impl RenderContext {
    pub fn builder() -> RenderContextBuilder {
        RenderContextBuilder::new()
    }

    /// A context with the bundled bidi and shaping engines already installed
    pub fn with_defaults(fonts: FontSet) -> Self {
        Self::builder().fonts(fonts).default_engines().build()
    }

    /// Render `settings` with this context
    pub fn render(&self, settings: &Settings) -> Result<RenderOutput, RenderFailure> {
        render(self, settings)
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared handle to the engine slots
    pub fn gate(&self) -> &Arc<EngineGate> {
        &self.gate
    }

    pub fn install_bidi_engine(&self, engine: Arc<dyn BidiEngine>) {
        self.gate.install_bidi(engine);
    }

    pub fn install_shaping_engine(&self, engine: Arc<dyn ShapingEngine>) {
        self.gate.install_shaper(engine);
    }

    pub(crate) fn classifier(&self) -> &ScriptClassifier {
        &self.classifier
    }

    pub(crate) fn positioner(&self) -> &GlyphPositioner {
        &self.positioner
    }

    pub(crate) fn assembler(&self) -> &SvgAssembler {
        &self.assembler
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("fonts", &self.fonts)
            .field("gate", &self.gate)
            .field("config", &self.config)
            .finish()
    }
}

/// Assemble a [`RenderContext`] piece by piece
#[derive(Default)]
pub struct RenderContextBuilder {
    fonts: FontSet,
    bidi: Option<Arc<dyn BidiEngine>>,
    shaper: Option<Arc<dyn ShapingEngine>>,
    config: Option<EngineConfig>,
}

impl RenderContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole font routing table
    pub fn fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = fonts;
        self
    }

    /// Font used for every script without a dedicated one
    pub fn default_font(mut self, font: Arc<dyn MetricsProvider>) -> Self {
        self.fonts.set_default(font);
        self
    }

    /// Route one script bucket to `font`
    pub fn script_font(mut self, script: ScriptTag, font: Arc<dyn MetricsProvider>) -> Self {
        self.fonts.insert(script, font);
        self
    }

    pub fn bidi_engine(mut self, engine: Arc<dyn BidiEngine>) -> Self {
        self.bidi = Some(engine);
        self
    }

    pub fn shaping_engine(mut self, engine: Arc<dyn ShapingEngine>) -> Self {
        self.shaper = Some(engine);
        self
    }

    /// Install the bundled engines: UAX#9 via unicode-bidi, shaping via harfrust
    pub fn default_engines(self) -> Self {
        self.bidi_engine(Arc::new(UnicodeBidiEngine::new()))
            .shaping_engine(Arc::new(HarfrustEngine::new()))
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> RenderContext {
        let gate = Arc::new(EngineGate::new());
        if let Some(bidi) = self.bidi {
            gate.install_bidi(bidi);
        }
        if let Some(shaper) = self.shaper {
            gate.install_shaper(shaper);
        }

        let assembler = SvgAssembler::new().with_font_families(self.fonts.family_names());
        RenderContext {
            fonts: self.fonts,
            gate,
            config: self.config.unwrap_or_default(),
            classifier: ScriptClassifier::new(),
            positioner: GlyphPositioner::new(),
            assembler,
        }
    }
}
