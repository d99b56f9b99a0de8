//! Info command implementation
//!
//! Displays render modes, script buckets and, given a font file, what the
//! font offers.

use std::path::Path;

use glyphcut::prelude::*;

use super::Result;
use crate::cli::InfoArgs;

/// Characters probed when describing a font's coverage
const COVERAGE_SAMPLES: [(ScriptTag, char); 8] = [
    (ScriptTag::Latin, 'A'),
    (ScriptTag::Greek, 'Ω'),
    (ScriptTag::Cyrillic, 'Ж'),
    (ScriptTag::Hebrew, 'ש'),
    (ScriptTag::Arabic, 'م'),
    (ScriptTag::Devanagari, 'क'),
    (ScriptTag::Han, '漢'),
    (ScriptTag::Hangul, '한'),
];

pub fn run(args: &InfoArgs) -> Result<()> {
    // If no specific flags, show all info
    let show_all = !args.modes && !args.scripts && args.font_file.is_none();

    println!("glyphcut v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if show_all || args.modes {
        print_modes();
        println!();
    }

    if show_all || args.scripts {
        print_scripts();
        println!();
    }

    if show_all {
        print_engines();
    }

    if let Some(path) = &args.font_file {
        print_font(path)?;
    }

    Ok(())
}

fn print_modes() {
    println!("Render modes:");
    for mode in RenderMode::ALL {
        let description = match mode {
            RenderMode::Text => "Live text, one element per character",
            RenderMode::Outline => "Glyph outlines at advance-based positions",
            RenderMode::Shaped => "Glyph outlines shaped by harfrust (ligatures, marks)",
            RenderMode::WholeLine => "Display only, one visually ordered string per line",
        };
        println!("  {:<12} - {description}", mode.as_str());
    }
}

fn print_scripts() {
    println!("Script buckets (use with --script-font SCRIPT=PATH):");
    for script in ScriptTag::ALL {
        match script.iso15924() {
            Some(iso) => println!("  {:<12} {iso}", script.as_str()),
            None => println!("  {:<12} -", script.as_str()),
        }
    }
}

fn print_engines() {
    println!("Engines:");
    println!("  bidi         - unicode-bidi (UAX #9)");
    println!("  shaping      - harfrust");
}

fn print_font(path: &Path) -> Result<()> {
    let font = Font::from_file(path)?;

    println!("Font: {}", path.display());
    if let Some(family) = font.family_name() {
        println!("  Family: {family}");
    }
    println!("  Units per em: {}", font.units_per_em());
    if let Some(count) = font.glyph_count() {
        println!("  Glyphs: {count}");
    }

    let covered: Vec<&str> = COVERAGE_SAMPLES
        .iter()
        .filter(|(_, ch)| font.covers(*ch))
        .map(|(script, _)| script.as_str())
        .collect();
    if covered.is_empty() {
        println!("  Covers: none of the sampled scripts");
    } else {
        println!("  Covers: {}", covered.join(", "));
    }

    Ok(())
}
