use crate::types::ModeOutput;
use regex::Regex;

/// Wraps a code-generation response for rendering.
///
/// The whole response is kept, prose and every fenced block included. The
/// info string of the first fence, if any, names the language; otherwise the
/// configured default is used.
pub fn code_output(raw: &str, default_language: &str) -> ModeOutput {
    ModeOutput::Code {
        language: fence_language(raw)
            .unwrap_or(default_language)
            .to_string(),
        code: raw.trim().to_string(),
    }
}

fn fence_language(raw: &str) -> Option<&str> {
    let re = Regex::new(r"```([^`\n]*)\n").ok()?;
    let caps = re.captures(raw)?;
    caps.get(1)?.as_str().split_whitespace().next()
}
