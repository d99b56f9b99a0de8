//! Batch command implementation
//!
//! Every input line yields exactly one output line, even when the line is
//! not valid JSON, so results can be zipped back onto jobs.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use glyphcut::RenderContext;

use super::{load_fonts, CliError, Result};
use crate::cli::BatchArgs;
use crate::jsonl::{Job, JobResult};

pub fn run(args: &BatchArgs) -> Result<()> {
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => {
            if !args.quiet {
                eprintln!("Reading jobs from stdin...");
            }
            Box::new(BufReader::new(io::stdin()))
        },
    };
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let context = RenderContext::with_defaults(load_fonts(&args.fonts)?);

    let mut job_count = 0;
    let mut error_count = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        job_count += 1;

        let result = process_line(&context, &line, line_num + 1);
        if !result.is_success() {
            log::warn!(
                "Job '{}' failed: {}",
                result.id,
                result.error.as_deref().unwrap_or("unknown error")
            );
            error_count += 1;
        }

        serde_json::to_writer(&mut writer, &result)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    if !args.quiet {
        eprintln!("Batch processing complete:");
        eprintln!("  Total jobs: {job_count}");
        eprintln!("  Successful: {}", job_count - error_count);
        eprintln!("  Failed: {error_count}");
    }

    if error_count > 0 {
        Err(CliError::Args(format!("{error_count} of {job_count} jobs failed")))
    } else {
        Ok(())
    }
}

fn process_line(context: &RenderContext, line: &str, line_num: usize) -> JobResult {
    let job: Job = match serde_json::from_str(line) {
        Ok(job) => job,
        Err(e) => return JobResult::rejected(format!("line-{line_num}"), e.to_string()),
    };
    let id = if job.id.is_empty() {
        format!("line-{line_num}")
    } else {
        job.id.clone()
    };

    let settings = match job.to_settings() {
        Ok(settings) => settings,
        Err(e) => return JobResult::rejected(id, e.to_string()),
    };

    match context.render(&settings) {
        Ok(output) => JobResult::success(id, &output),
        Err(failure) => JobResult::failure(id, &failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcut::FontSet;

    #[test]
    fn test_unparsable_line_is_rejected_with_line_id() {
        let context = RenderContext::with_defaults(FontSet::new());
        let result = process_line(&context, "{not json", 3);
        assert_eq!(result.id, "line-3");
        assert_eq!(result.kind.as_deref(), Some("invalid-settings"));
    }

    #[test]
    fn test_empty_text_job_succeeds_without_fonts() {
        let context = RenderContext::with_defaults(FontSet::new());
        let result = process_line(&context, r#"{"id":"blank","text":""}"#, 1);
        assert!(result.is_success());
        assert_eq!(result.width_mm, Some(0.0));
    }

    #[test]
    fn test_missing_font_is_reported_per_job() {
        let context = RenderContext::with_defaults(FontSet::new());
        let result = process_line(&context, r#"{"text":"Hi"}"#, 7);
        assert_eq!(result.id, "line-7");
        assert_eq!(result.kind.as_deref(), Some("dependency-unavailable"));
        assert!(result.svg.unwrap().contains("The font is not available."));
    }
}
