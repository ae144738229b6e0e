//! # multiapp: A Multi-Mode CLI for a Local Language Model
//!
//! This is the main entry point for the `multiapp` command-line interface.
//! Each subcommand runs one mode; `interactive` offers them all from a menu.

mod config;
mod input;
mod interactive;
mod render;

use crate::config::{get_config, AppConfig};
use crate::input::read_pdf;
use anyhow::Result;
use clap::{Parser, Subcommand};
use multiapp::{
    providers::factory::create_provider, ControllerOptions, ModeController, ModeInput,
};
use multiapp_pdf::PdfExtractor;
use multiapp_web::WebPageExtractor;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(name = "multiapp", author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a YAML config file. Defaults to `multiapp.yml` if present.
    #[arg(long, global = true, env = "MULTIAPP_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask the assistant a question
    Ask { question: String },
    /// Summarize a PDF document
    Summarize { file: PathBuf },
    /// Translate text into another language
    Translate {
        text: String,
        /// Target language, e.g. `es` or `French`
        #[arg(short, long)]
        language: String,
    },
    /// Ask a question about a PDF document
    PdfAsk { file: PathBuf, question: String },
    /// Generate code from a description
    Code { prompt: String },
    /// Ask a question about a web page
    WebAsk { url: String, question: String },
    /// Choose modes from a menu until `quit`
    Interactive,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = get_config(cli.config.as_deref())?;

    // Log to a file so the terminal only shows responses.
    let log_file = File::create(&config.log_file)?;
    let subscriber = fmt::Subscriber::builder()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    match &config.source_file {
        Some(path) => info!("Loaded configuration from '{path}'."),
        None => info!("No configuration file found; using defaults and environment."),
    }
    info!(
        "Using {:?} provider at '{}' with model '{}'",
        config.provider.provider, config.provider.api_url, config.provider.model_name
    );

    let mut controller = build_controller(&config)?;

    if let Commands::Interactive = cli.command {
        let stdin = io::stdin();
        interactive::run_session(&mut controller, &mut stdin.lock(), &mut io::stdout()).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let request = match request_from_command(cli.command) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Request failed: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let report = controller.run(request).await;
    let succeeded = render::write_report(&report, &mut io::stdout(), &mut io::stderr())?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn build_controller(config: &AppConfig) -> Result<ModeController> {
    let client = create_provider(&config.provider)?;
    let options = ControllerOptions {
        summary_char_limit: config.summary_char_limit,
        code_language: config.code_language.clone(),
        trace_runs: config.tracing_api_key.is_some(),
    };
    Ok(ModeController::new(
        client,
        Box::new(PdfExtractor::new()),
        Box::new(WebPageExtractor::new()),
        options,
    ))
}

/// Maps a one-shot subcommand to its request, reading any PDF from disk.
fn request_from_command(command: Commands) -> Result<ModeInput> {
    let request = match command {
        Commands::Ask { question } => ModeInput::AssistantQuery { question },
        Commands::Summarize { file } => ModeInput::PdfSummary {
            document: read_pdf(&file)?,
        },
        Commands::Translate { text, language } => ModeInput::Translation {
            text,
            target_language: language,
        },
        Commands::PdfAsk { file, question } => ModeInput::PdfQuestion {
            document: read_pdf(&file)?,
            question,
        },
        Commands::Code { prompt } => ModeInput::CodeGeneration { prompt },
        Commands::WebAsk { url, question } => ModeInput::WebQuestion { url, question },
        Commands::Interactive => anyhow::bail!("interactive mode takes no request"),
    };
    Ok(request)
}
