//! Render command implementation
//!
//! A failed render still writes an SVG: the one-sentence failure message
//! drawn where the text would have been. The command then exits non-zero.

use std::fs::{self, File};
use std::io::{self, Read, Write};

use glyphcut::prelude::*;

use super::{load_fonts, CliError, Result};
use crate::cli::RenderArgs;

pub fn run(args: &RenderArgs) -> Result<()> {
    let text = get_input_text(args)?;
    let settings = build_settings(args, text)?;
    let fonts = load_fonts(&args.fonts)?;
    let context = RenderContext::with_defaults(fonts);

    match context.render(&settings) {
        Ok(output) => {
            write_output(args, &output.markup)?;
            for warning in &output.warnings {
                log::warn!("{warning}");
            }
            if !args.quiet {
                report(args, &output);
            }
            Ok(())
        },
        Err(failure) => {
            write_output(args, &failure.to_markup())?;
            Err(CliError::Render(failure))
        },
    }
}

fn report(args: &RenderArgs, output: &RenderOutput) {
    match &args.output_file {
        Some(path) => eprintln!("✓ Rendered to {}", path.display()),
        None => eprintln!("✓ Rendered to stdout"),
    }
    eprintln!("  Mode: {}", args.mode);
    eprintln!(
        "  Canvas: {:.2} × {:.2} mm",
        output.width_mm(),
        output.height_mm()
    );
    eprintln!(
        "  Ink: {:.2} × {:.2} mm",
        output.bounds.actual_width(),
        output.bounds.actual_height()
    );
    eprintln!("  Glyphs: {}", output.glyph_count);
    if !output.warnings.is_empty() {
        eprintln!("  Warnings: {}", output.warnings.len());
    }
}

pub(crate) fn build_settings(args: &RenderArgs, text: String) -> Result<Settings> {
    Ok(Settings {
        text,
        font_size: args.font_size,
        fill: Color::from_hex(&args.fill)?,
        stroke: Color::from_hex(&args.stroke)?,
        stroke_width: args.stroke_width,
        letter_spacing: args.letter_spacing,
        direction: args.direction.parse()?,
        mode: args.mode.parse()?,
        features: parse_features(args.features.as_deref())?,
        language: args.language.clone(),
        font_family: args.font_family.clone(),
        padding: args.padding,
        minimum_width: args.min_width,
    })
}

fn get_input_text(args: &RenderArgs) -> Result<String> {
    // Priority: positional > --text > --text-file > stdin
    if let Some(text) = args.text.as_ref().or(args.text_arg.as_ref()) {
        return Ok(decode_escapes(text));
    }

    if let Some(path) = &args.text_file {
        return Ok(fs::read_to_string(path)?);
    }

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// Decode `\u{XXXX}`, `\uXXXX` and `\n`; anything else is kept as typed
pub(crate) fn decode_escapes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(at) = rest.find('\\') {
        result.push_str(&rest[..at]);
        let escape = &rest[at..];

        let (decoded, consumed) = if let Some(tail) = escape.strip_prefix("\\u{") {
            match tail.find('}') {
                Some(end) => (code_point(&tail[..end]), 3 + end + 1),
                None => (None, 0),
            }
        } else if let Some(tail) = escape.strip_prefix("\\u") {
            match tail.get(..4) {
                Some(hex) => (code_point(hex), 6),
                None => (None, 0),
            }
        } else if escape.starts_with("\\n") {
            (Some('\n'), 2)
        } else {
            (None, 0)
        };

        match decoded {
            Some(ch) => {
                result.push(ch);
                rest = &escape[consumed..];
            },
            None => {
                result.push('\\');
                rest = &escape[1..];
            },
        }
    }

    result.push_str(rest);
    result
}

fn code_point(hex: &str) -> Option<char> {
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Parse `+liga,-kern,ss01=1` (comma or space separated)
pub(crate) fn parse_features(features: Option<&str>) -> Result<Vec<(String, u32)>> {
    let Some(features) = features else {
        return Ok(Vec::new());
    };

    let mut result = Vec::new();
    for part in features.split([',', ' ']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (tag, value) = if let Some(tag) = part.strip_prefix('+') {
            (tag, 1)
        } else if let Some(tag) = part.strip_prefix('-') {
            (tag, 0)
        } else if let Some((tag, value)) = part.split_once('=') {
            let value = value
                .parse()
                .map_err(|_| CliError::Args(format!("invalid feature value in '{part}'")))?;
            (tag, value)
        } else {
            (part, 1)
        };

        if tag.len() != 4 || !tag.is_ascii() {
            return Err(CliError::Args(format!(
                "feature tag '{tag}' must be four ASCII characters"
            )));
        }
        result.push((tag.to_string(), value));
    }

    Ok(result)
}

fn write_output(args: &RenderArgs, markup: &str) -> Result<()> {
    match &args.output_file {
        Some(path) => File::create(path)?.write_all(markup.as_bytes())?,
        None => io::stdout().write_all(markup.as_bytes())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: RenderArgs,
    }

    fn args(argv: &[&str]) -> RenderArgs {
        let mut full = vec!["glyphcut"];
        full.extend_from_slice(argv);
        Harness::parse_from(full).args
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(decode_escapes(r"Hi \u{05E9}\u05DC"), "Hi של");
        assert_eq!(decode_escapes(r"one\ntwo"), "one\ntwo");
        assert_eq!(decode_escapes(r"C:\path"), r"C:\path");
        assert_eq!(decode_escapes(r"\u{zz}"), r"\u{zz}");
        assert_eq!(decode_escapes(r"\u{D800}"), r"\u{D800}");
        assert_eq!(decode_escapes(r"end\"), r"end\");
    }

    #[test]
    fn test_parse_features() {
        let features = parse_features(Some("+liga,-kern ss01=2 smcp")).unwrap();
        assert_eq!(
            features,
            vec![
                ("liga".to_string(), 1),
                ("kern".to_string(), 0),
                ("ss01".to_string(), 2),
                ("smcp".to_string(), 1),
            ]
        );
        assert!(parse_features(None).unwrap().is_empty());
        assert!(parse_features(Some("ss01=x")).is_err());
        assert!(parse_features(Some("+ligature")).is_err());
    }

    #[test]
    fn test_build_settings_from_flags() {
        let args = args(&[
            "Hi",
            "--mode",
            "shaped",
            "-d",
            "rtl",
            "-s",
            "12.5",
            "--fill",
            "FF0000",
            "--stroke",
            "0000FF",
            "--stroke-width",
            "0.1",
            "--letter-spacing",
            "-0.5",
        ]);
        let settings = build_settings(&args, "Hi".into()).unwrap();
        assert_eq!(settings.mode, RenderMode::Shaped);
        assert_eq!(settings.direction, BaseDirection::Rtl);
        assert_eq!(settings.font_size, 12.5);
        assert_eq!(settings.fill, Color::rgba(255, 0, 0, 255));
        assert_eq!(settings.stroke, Color::rgba(0, 0, 255, 255));
        assert_eq!(settings.letter_spacing, -0.5);
    }

    #[test]
    fn test_bad_mode_is_rejected() {
        let args = args(&["Hi", "--mode", "raster"]);
        assert!(build_settings(&args, "Hi".into()).is_err());
    }
}
