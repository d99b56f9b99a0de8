//! CLI argument definitions using Clap v4

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Glyphcut - text to millimetre-accurate SVG for cutting and engraving
#[derive(Parser, Debug)]
#[command(name = "glyphcut")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log every pipeline stage (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display render modes, script buckets and font details
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Render text to an SVG file
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// Render many texts from a JSONL file, one JSON result per line
    Batch(BatchArgs),
}

/// Fonts shared by `render` and `batch`
#[derive(Parser, Debug, Clone, Default)]
pub struct FontArgs {
    /// Default font file (.ttf, .otf, .ttc)
    #[arg(short = 'f', long = "font-file")]
    pub font_file: Option<PathBuf>,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value = "0")]
    pub face_index: u32,

    /// Dedicated font for one script, e.g. hebrew=NotoSansHebrew.ttf
    #[arg(long = "script-font", action = ArgAction::Append, value_name = "SCRIPT=PATH")]
    pub script_fonts: Vec<String>,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// List render modes
    #[arg(long)]
    pub modes: bool,

    /// List script buckets
    #[arg(long)]
    pub scripts: bool,

    /// Describe a font file
    #[arg(short = 'f', long = "font-file")]
    pub font_file: Option<PathBuf>,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Input text; `\u{05E9}` and `\n` escapes are decoded (reads stdin if omitted)
    pub text: Option<String>,

    /// Input text (alternative to positional argument)
    #[arg(short = 't', long = "text", conflicts_with = "text_file")]
    pub text_arg: Option<String>,

    /// Read input text from file
    #[arg(short = 'T', long = "text-file", conflicts_with = "text_arg")]
    pub text_file: Option<PathBuf>,

    #[command(flatten)]
    pub fonts: FontArgs,

    /// Render mode: text, outline, shaped, whole-line
    #[arg(short = 'm', long = "mode", default_value = "outline")]
    pub mode: String,

    /// Paragraph direction: auto, ltr, rtl
    #[arg(short = 'd', long = "direction", default_value = "auto")]
    pub direction: String,

    /// Language tag (BCP 47) for shaped rendering, e.g. he, ar
    #[arg(short = 'l', long = "language")]
    pub language: Option<String>,

    /// Font feature settings, e.g. "+liga,-kern,ss01=1"
    #[arg(short = 'F', long = "features")]
    pub features: Option<String>,

    /// Font size in millimetres
    #[arg(short = 's', long = "font-size", default_value = "30")]
    pub font_size: f32,

    /// Extra space after every glyph, in millimetres
    #[arg(long = "letter-spacing", default_value = "0", allow_hyphen_values = true)]
    pub letter_spacing: f32,

    /// Horizontal room added to the text width, in millimetres
    #[arg(long = "padding", default_value = "10")]
    pub padding: f32,

    /// Narrowest canvas, in millimetres
    #[arg(long = "min-width", default_value = "10")]
    pub min_width: f32,

    /// Fill color (RRGGBB, RRGGBBAA or none)
    #[arg(short = 'c', long = "fill", default_value = "000000")]
    pub fill: String,

    /// Stroke color (RRGGBB, RRGGBBAA or none)
    #[arg(long = "stroke", default_value = "none")]
    pub stroke: String,

    /// Stroke width in millimetres
    #[arg(long = "stroke-width", default_value = "0")]
    pub stroke_width: f32,

    /// Font family named by text and whole-line output (defaults to the loaded fonts)
    #[arg(long = "font-family")]
    pub font_family: Option<String>,

    /// Output file path (stdout if omitted)
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Silent mode (no summary)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// Arguments for the batch command
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Input JSONL file, one job per line (stdin if omitted)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output JSONL file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub fonts: FontArgs,

    /// Silent mode (no summary)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}
