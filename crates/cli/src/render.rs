//! # Output Rendering
//!
//! Turns a `ModeReport` into the text shown to the user.

use multiapp::{ModeOutput, ModeReport};
use std::io::{self, Write};

/// Formats a model response. Generated code is shown as a fenced block; a
/// response that already carries its own fences is printed as it came.
pub fn render_output(output: &ModeOutput) -> String {
    match output {
        ModeOutput::Text(text) => text.clone(),
        ModeOutput::Code { code, .. } if code.contains("```") => code.clone(),
        ModeOutput::Code { language, code } => format!("```{language}\n{code}\n```"),
    }
}

pub fn extracted_line(chars: usize) -> String {
    format!("Extracted text length: {chars} characters")
}

/// Writes a report. Returns `false` when the request failed.
///
/// The response goes to `out`; failures go to `err` as a single line.
pub fn write_report<O: Write, E: Write>(
    report: &ModeReport,
    out: &mut O,
    err: &mut E,
) -> io::Result<bool> {
    if let Some(chars) = report.extracted_chars {
        writeln!(out, "{}", extracted_line(chars))?;
    }
    match &report.outcome {
        Ok(output) => {
            writeln!(out, "{}", render_output(output))?;
            Ok(true)
        }
        Err(e) => {
            writeln!(err, "{} failed: {}", report.mode, e)?;
            Ok(false)
        }
    }
}
