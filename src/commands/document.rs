use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::ai::client::AnalysisClient;
use crate::ai::gemini::GeminiClient;
use crate::config::Config;
use crate::document::Document;
use crate::error::AnalyzerError;
use crate::pipeline;
use crate::render::{render_preview, render_record};

/// Characters of document text shown before a summary
const SUMMARY_PREVIEW_CHARS: usize = 2_000;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// PDF or DOCX file
    pub file: PathBuf,

    /// Declared MIME type (guessed from the extension when omitted)
    #[arg(long, value_name = "TYPE")]
    pub mime: Option<String>,
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// PDF or DOCX file
    pub file: PathBuf,

    /// Declared MIME type (guessed from the extension when omitted)
    #[arg(long, value_name = "TYPE")]
    pub mime: Option<String>,

    /// Gemini model ID (overrides GEMINI_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Print the analysis as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Skip the document preview
    #[arg(long, default_value_t = false)]
    pub no_preview: bool,
}

/// Extract and print the whole document text
pub fn preview(args: PreviewArgs) -> Result<(), AnalyzerError> {
    // The key is required before any input is accepted
    Config::load()?;

    let document = Document::from_path(&args.file, args.mime.as_deref())?;
    let text = pipeline::extract(&document)?;

    let mut out = io::stdout().lock();
    render_preview(&mut out, &text, None)?;
    Ok(())
}

/// Extract, call Gemini once, and render the three sections
pub async fn summarize(args: SummarizeArgs) -> Result<(), AnalyzerError> {
    let config = Config::load()?.with_model(args.model);

    let document = Document::from_path(&args.file, args.mime.as_deref())?;
    let text = pipeline::extract(&document)?;
    drop(document);

    if !args.no_preview && !args.json {
        render_preview(&mut io::stdout().lock(), &text, Some(SUMMARY_PREVIEW_CHARS))?;
    }

    eprintln!("Calling Gemini...");
    let client = AnalysisClient::new(GeminiClient::new(config));
    let normalized = pipeline::summarize(&client, &text).await?;

    if let Some(failure) = &normalized.parse_failure {
        eprintln!(
            "Warning: could not parse Gemini response as JSON ({}). Showing raw response.",
            failure
        );
    }

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &normalized.record).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        render_record(&mut out, &normalized.record)?;
    }
    out.flush()?;
    Ok(())
}
