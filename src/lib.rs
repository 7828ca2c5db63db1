pub mod ai;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod render;

use clap::Parser;
use commands::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

pub use ai::{normalize, AnalysisClient, AnalysisRecord, GeminiClient, ModelService, Normalized, Section};
pub use document::{Document, DocumentFormat, DocumentParser, ExtractedText};
pub use error::{AnalyzerError, StructuredParseFailure};

pub fn run() -> ExitCode {
    config::load_dotenv();

    // Initialize tracing with RUST_LOG env filter
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,legal_summarizer=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(commands::execute(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
