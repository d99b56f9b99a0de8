//! Error types for glyphcut

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GlyphcutError>;

/// Main error type for glyphcut
#[derive(Debug, Error)]
pub enum GlyphcutError {
    #[error("The {0} is not available.")]
    DependencyUnavailable(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Bidi engine failed: {0}")]
    Bidi(String),

    #[error("Shaping failed: {0}")]
    ShapingFailed(#[from] ShapingError),

    #[error("None of the characters could be drawn with the loaded fonts.")]
    NoRenderableGlyphs,

    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GlyphcutError {
    /// The user-facing category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GlyphcutError::DependencyUnavailable(_) | GlyphcutError::FontLoad(_) => {
                ErrorKind::DependencyUnavailable
            },
            GlyphcutError::InvalidSettings(_) => ErrorKind::InvalidSettings,
            GlyphcutError::Bidi(_) => ErrorKind::ReorderFailure,
            GlyphcutError::NoRenderableGlyphs => ErrorKind::GlyphUnavailable,
            GlyphcutError::Io(_) => ErrorKind::Io,
            GlyphcutError::ShapingFailed(_) | GlyphcutError::ExportFailed(_) => {
                ErrorKind::Internal
            },
        }
    }
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Font not supported: {0}")]
    NotSupported(String),
}

/// Shaping errors
#[derive(Debug, Error)]
pub enum ShapingError {
    #[error("Font data could not be parsed by the shaping engine")]
    InvalidFont,

    #[error("Shaping engine reported {0} units per em")]
    InvalidReferenceUnits(u16),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Categories a caller can branch on without matching every variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A font or engine is missing; the render was aborted
    DependencyUnavailable,
    /// The bidi engine failed; recovered with logical order
    ReorderFailure,
    /// No glyph could be produced for any character
    GlyphUnavailable,
    InvalidSettings,
    Io,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DependencyUnavailable => "dependency-unavailable",
            ErrorKind::ReorderFailure => "reorder-failure",
            ErrorKind::GlyphUnavailable => "glyph-unavailable",
            ErrorKind::InvalidSettings => "invalid-settings",
            ErrorKind::Io => "io",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Problems a render recovered from on its own
#[derive(Debug, Clone, PartialEq)]
pub enum RenderWarning {
    /// The bidi engine failed; text was laid out in logical order
    ReorderFailure(String),
    /// No glyph for this character; it was replaced by blank space
    GlyphUnavailable { index: usize, ch: char },
}

impl RenderWarning {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderWarning::ReorderFailure(_) => ErrorKind::ReorderFailure,
            RenderWarning::GlyphUnavailable { .. } => ErrorKind::GlyphUnavailable,
        }
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::ReorderFailure(reason) => {
                write!(f, "text shown in logical order: {reason}")
            },
            RenderWarning::GlyphUnavailable { index, ch } => {
                write!(f, "no glyph for {ch:?} (U+{:04X}) at index {index}", *ch as u32)
            },
        }
    }
}
