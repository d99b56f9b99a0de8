//! Structured batch processing: JSON in, JSON out
//!
//! One job per input line, one result per output line, in the same order.
//! Fields a job leaves out take the same defaults as `glyphcut render`.

use serde::{Deserialize, Serialize};

use glyphcut::prelude::*;

use crate::commands::{render::parse_features, Result};

/// One rendering request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    /// How to identify this job in the results
    pub id: String,
    pub text: String,
    /// Millimetres
    pub font_size: Option<f32>,
    /// auto, ltr or rtl
    pub direction: Option<String>,
    /// text, outline, shaped or whole-line
    pub mode: Option<String>,
    pub letter_spacing: Option<f32>,
    /// RRGGBB, RRGGBBAA or none
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
    /// `+liga,-kern,ss01=1`
    pub features: Option<String>,
    pub language: Option<String>,
}

impl Job {
    pub fn to_settings(&self) -> Result<Settings> {
        let defaults = Settings::default();
        Ok(Settings {
            text: self.text.clone(),
            font_size: self.font_size.unwrap_or(defaults.font_size),
            fill: match &self.fill {
                Some(hex) => Color::from_hex(hex)?,
                None => defaults.fill,
            },
            stroke: match &self.stroke {
                Some(hex) => Color::from_hex(hex)?,
                None => defaults.stroke,
            },
            stroke_width: self.stroke_width.unwrap_or(defaults.stroke_width),
            letter_spacing: self.letter_spacing.unwrap_or(defaults.letter_spacing),
            direction: match &self.direction {
                Some(direction) => direction.parse()?,
                None => defaults.direction,
            },
            mode: match &self.mode {
                Some(mode) => mode.parse()?,
                None => defaults.mode,
            },
            features: parse_features(self.features.as_deref())?,
            language: self.language.clone(),
            ..defaults
        })
    }
}

/// What came out of one job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    /// Matches the input job ID
    pub id: String,
    /// `success` or `error`
    pub status: String,
    /// The SVG document: the drawing on success, the message on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error category such as `dependency-unavailable`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_mm: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_mm: Option<f32>,
}

impl JobResult {
    pub fn success(id: impl Into<String>, output: &RenderOutput) -> Self {
        Self {
            id: id.into(),
            status: "success".into(),
            svg: Some(output.markup.clone()),
            error: None,
            kind: None,
            warnings: output.warnings.iter().map(ToString::to_string).collect(),
            width_mm: Some(output.width_mm()),
            height_mm: Some(output.height_mm()),
        }
    }

    pub fn failure(id: impl Into<String>, failure: &RenderFailure) -> Self {
        Self {
            id: id.into(),
            status: "error".into(),
            svg: Some(failure.to_markup()),
            error: Some(failure.message.clone()),
            kind: Some(failure.kind.to_string()),
            warnings: Vec::new(),
            width_mm: None,
            height_mm: None,
        }
    }

    /// A job that never reached the renderer
    pub fn rejected(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: "error".into(),
            svg: None,
            error: Some(message.into()),
            kind: Some(ErrorKind::InvalidSettings.to_string()),
            warnings: Vec::new(),
            width_mm: None,
            height_mm: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
