//! Command line surface
//!
//! `preview` shows what was extracted; `summarize` is the explicit action that
//! calls the model. `key` manages the stored API key.

pub mod credentials;
pub mod document;

use clap::{Parser, Subcommand};

use crate::error::AnalyzerError;

#[derive(Debug, Parser)]
#[command(
    name = "legal-summarizer",
    version,
    about = "Summarize a legal document (PDF or DOCX): key points, highlights, and a glossary of legal terms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract and print the document text
    Preview(document::PreviewArgs),
    /// Extract the document text and analyze it with Gemini
    Summarize(document::SummarizeArgs),
    /// Manage the Gemini API key stored in the OS keyring
    #[command(subcommand)]
    Key(credentials::KeyCommand),
}

pub async fn execute(cli: Cli) -> Result<(), AnalyzerError> {
    match cli.command {
        Command::Preview(args) => document::preview(args),
        Command::Summarize(args) => document::summarize(args).await,
        Command::Key(cmd) => credentials::execute(cmd),
    }
}
