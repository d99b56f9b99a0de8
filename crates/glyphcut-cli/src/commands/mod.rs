//! Subcommand implementations and what they share

pub mod batch;
pub mod info;
pub mod render;

use std::path::Path;
use std::sync::Arc;

use glyphcut::fontdb::{Font, FontDatabase};
use glyphcut::types::ScriptTag;
use glyphcut::{FontSet, GlyphcutError, RenderFailure};

use crate::cli::FontArgs;

/// Everything that can stop a command
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Glyphcut(#[from] GlyphcutError),

    #[error("{0}")]
    Render(#[from] RenderFailure),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Args(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Load the default font and every `SCRIPT=PATH` font into one routing table
///
/// Without any font the set is empty, and renders report the font as
/// unavailable.
pub fn load_fonts(args: &FontArgs) -> Result<FontSet> {
    let mut database = FontDatabase::new();

    if let Some(path) = &args.font_file {
        log::info!("Loading font from {}", path.display());
        let font = Font::from_file_index(path, args.face_index)?;
        database.set_default_font(Arc::new(font));
    }

    for spec in &args.script_fonts {
        let (script, path) = parse_script_font(spec)?;
        log::info!("Loading {script} font from {}", path.display());
        database.load_script_font(script, path)?;
    }

    Ok(database.to_font_set())
}

/// Split `hebrew=NotoSansHebrew.ttf` into its bucket and path
pub fn parse_script_font(spec: &str) -> Result<(ScriptTag, &Path)> {
    let (script, path) = spec
        .split_once('=')
        .ok_or_else(|| CliError::Args(format!("expected SCRIPT=PATH, got '{spec}'")))?;
    let script: ScriptTag = script.parse()?;
    Ok((script, Path::new(path.trim())))
}
