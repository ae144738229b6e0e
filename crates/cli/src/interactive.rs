//! # Interactive Session
//!
//! A line-based menu: pick a mode, answer its prompts, see the response, repeat
//! until `quit` or end of input. A failed request is reported and the menu
//! comes back. Grounded modes extract their source and show its length before
//! asking the question.

use crate::{
    input::read_pdf,
    render::{extracted_line, write_report},
};
use anyhow::Result;
use multiapp::{Mode, ModeController, ModeInput, Source};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::info;

/// What collecting the fields of one request produced.
enum Collected {
    Input {
        request: ModeInput,
        /// The extracted length was already printed.
        length_shown: bool,
    },
    /// The fields could not be turned into a request; the message is shown.
    Rejected(String),
    EndOfInput,
}

fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Select a mode:")?;
    for (i, mode) in Mode::ALL.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, mode.label())?;
    }
    writeln!(out, "Type a number or mode name, or 'quit' to exit.")?;
    Ok(())
}

/// Prints `label` and reads one line. `None` on end of input.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn parse_choice(choice: &str) -> Option<Mode> {
    let choice = choice.trim();
    if let Ok(n) = choice.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| Mode::ALL.get(i).copied());
    }
    choice.parse().ok()
}

async fn collect_input<R: BufRead, W: Write>(
    controller: &mut ModeController,
    mode: Mode,
    input: &mut R,
    out: &mut W,
) -> Result<Collected> {
    macro_rules! field {
        ($label:expr) => {
            match prompt_line(input, out, $label)? {
                Some(value) => value,
                None => return Ok(Collected::EndOfInput),
            }
        };
    }

    let document = if mode.needs_document() {
        let path = field!("PDF file: ");
        // An empty path is left for the controller to reject.
        if path.trim().is_empty() {
            Vec::new()
        } else {
            match read_pdf(Path::new(path.trim())) {
                Ok(bytes) => bytes,
                Err(e) => return Ok(Collected::Rejected(e.to_string())),
            }
        }
    } else {
        Vec::new()
    };

    let request = match mode {
        Mode::AssistantQuery => ModeInput::AssistantQuery {
            question: field!("Question: "),
        },
        Mode::PdfSummary => ModeInput::PdfSummary { document },
        Mode::Translation => ModeInput::Translation {
            text: field!("Text: "),
            target_language: field!("Target language: "),
        },
        Mode::PdfQuestion => {
            let source = Source::Document(document.clone());
            if let Err(e) = show_extracted(controller, mode, source, out).await? {
                return Ok(Collected::Rejected(e));
            }
            let request = ModeInput::PdfQuestion {
                document,
                question: field!("Question: "),
            };
            return Ok(Collected::Input {
                request,
                length_shown: true,
            });
        }
        Mode::CodeGeneration => ModeInput::CodeGeneration {
            prompt: field!("Describe the code: "),
        },
        Mode::WebQuestion => {
            let url = field!("Web link: ");
            let source = Source::Page(url.clone());
            if let Err(e) = show_extracted(controller, mode, source, out).await? {
                return Ok(Collected::Rejected(e));
            }
            let request = ModeInput::WebQuestion {
                url,
                question: field!("Question: "),
            };
            return Ok(Collected::Input {
                request,
                length_shown: true,
            });
        }
    };
    Ok(Collected::Input {
        request,
        length_shown: false,
    })
}

/// Extracts `source` and prints its length. The inner error is the message
/// to show when extraction fails.
async fn show_extracted<W: Write>(
    controller: &mut ModeController,
    mode: Mode,
    source: Source,
    out: &mut W,
) -> Result<std::result::Result<(), String>> {
    match controller.extract_ahead(mode, source).await {
        Ok(chars) => {
            writeln!(out, "{}", extracted_line(chars))?;
            Ok(Ok(()))
        }
        Err(e) => Ok(Err(e.to_string())),
    }
}

/// Runs the menu loop until `quit` or end of input.
pub async fn run_session<R: BufRead, W: Write>(
    controller: &mut ModeController,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        print_menu(out)?;
        let Some(choice) = prompt_line(input, out, "> ")? else {
            break;
        };
        let choice = choice.trim();
        if choice.is_empty() {
            continue;
        }
        if choice.eq_ignore_ascii_case("quit") || choice.eq_ignore_ascii_case("exit") {
            break;
        }
        let Some(mode) = parse_choice(choice) else {
            writeln!(out, "Unknown mode '{choice}'.")?;
            continue;
        };

        info!("Interactive request for mode '{}'", mode.id());
        let (request, length_shown) = match collect_input(controller, mode, input, out).await? {
            Collected::Input {
                request,
                length_shown,
            } => (request, length_shown),
            Collected::Rejected(message) => {
                writeln!(out, "{} failed: {message}", mode)?;
                continue;
            }
            Collected::EndOfInput => break,
        };

        let mut report = controller.run(request).await;
        if length_shown {
            report.extracted_chars = None;
        }
        let mut errors = Vec::new();
        write_report(&report, out, &mut errors)?;
        out.write_all(&errors)?;
        writeln!(out)?;
    }
    writeln!(out, "Goodbye.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiapp::ControllerOptions;
    use multiapp_test_utils::{
        setup_tracing, MockCompletionClient, MockDocumentExtractor, MockPageExtractor,
    };
    use std::io::Cursor;
    use tempfile::tempdir;

    fn controller(client: &MockCompletionClient) -> ModeController {
        ModeController::new(
            Box::new(client.clone()),
            Box::new(MockDocumentExtractor::new("doc")),
            Box::new(MockPageExtractor::new("A B")),
            ControllerOptions::default(),
        )
    }

    async fn session(client: &MockCompletionClient, script: &str) -> String {
        session_with(controller(client), script).await
    }

    async fn session_with(mut controller: ModeController, script: &str) -> String {
        setup_tracing();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_session(&mut controller, &mut input, &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1"), Some(Mode::AssistantQuery));
        assert_eq!(parse_choice("6"), Some(Mode::WebQuestion));
        assert_eq!(parse_choice("0"), None);
        assert_eq!(parse_choice("7"), None);
        assert_eq!(parse_choice("code"), Some(Mode::CodeGeneration));
        assert_eq!(parse_choice("Language Translator"), Some(Mode::Translation));
    }

    #[tokio::test]
    async fn test_session_runs_requests_until_quit() {
        let client = MockCompletionClient::new("Hola");
        let output = session(&client, "3\nHello\nes\nquit\n").await;

        assert!(output.contains("Hola"));
        assert!(output.ends_with("Goodbye.\n"));
        let calls = client.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].user_turns().next(), Some("Text: Hello to es"));
    }

    #[tokio::test]
    async fn test_validation_failure_returns_to_menu() {
        let client = MockCompletionClient::new("unused");
        let output = session(&client, "1\n\n6\nhttps://example.com\nWhat?\n").await;

        assert!(output.contains("question is required for AI Assistant"));
        assert!(output.contains("Extracted text length: 3 characters"));
        assert_eq!(client.get_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_non_pdf_path_is_rejected() {
        let client = MockCompletionClient::new("unused");
        let output = session(&client, "2\nnotes.txt\n").await;

        assert!(output.contains("is not a PDF file"));
        assert!(client.get_calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_session_alive() {
        let client = MockCompletionClient::failing("backend down");
        let output = session(&client, "5\nfizzbuzz\n1\nStill there?\nquit\n").await;

        assert_eq!(output.matches("backend down").count(), 2);
        assert!(output.ends_with("Goodbye.\n"));
    }

    #[tokio::test]
    async fn test_unknown_mode() {
        let client = MockCompletionClient::new("unused");
        let output = session(&client, "banana\n").await;
        assert!(output.contains("Unknown mode 'banana'."));
    }

    #[tokio::test]
    async fn test_web_page_length_is_shown_before_the_question() {
        let client = MockCompletionClient::new("An answer");
        let output = session(&client, "6\nhttps://example.com\nWhat?\nquit\n").await;

        let link = output.find("Web link: ").unwrap();
        let length = output.find("Extracted text length: 3 characters").unwrap();
        let question = output.find("Question: ").unwrap();
        assert!(link < length && length < question);
        assert_eq!(output.matches("Extracted text length").count(), 1);
        assert!(output.contains("An answer"));
        assert_eq!(client.get_calls()[0].user_turns().next(), Some("Text: A B"));
    }

    #[tokio::test]
    async fn test_pdf_length_is_shown_before_the_question() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();
        let client = MockCompletionClient::new("An answer");
        let script = format!("4\n{}\nWhat?\nquit\n", path.display());

        let output = session(&client, &script).await;

        let length = output.find("Extracted text length: 3 characters").unwrap();
        let question = output.find("Question: ").unwrap();
        assert!(length < question);
        assert_eq!(output.matches("Extracted text length").count(), 1);
        assert_eq!(client.get_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_extraction_returns_to_menu_before_the_question() {
        let client = MockCompletionClient::new("unused");
        let controller = ModeController::new(
            Box::new(client.clone()),
            Box::new(MockDocumentExtractor::new("doc")),
            Box::new(MockPageExtractor::failing("connection refused")),
            ControllerOptions::default(),
        );

        let output = session_with(controller, "6\nhttp://localhost:1\nquit\n").await;

        assert!(output.contains("Ask Question for Web Link failed: Could not fetch the web page"));
        assert!(!output.contains("Question: "));
        assert!(output.ends_with("Goodbye.\n"));
        assert!(client.get_calls().is_empty());
    }
}
