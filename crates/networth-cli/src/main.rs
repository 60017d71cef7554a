//! networth-extract - validate and extract text from resume/document files.
//!
//! Prints one JSON object per input file to stdout:
//!
//! ```json
//! {"file":"resume.pdf","type":"PDF","result":{"success":true,"text":"..."}}
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=networth_extractors=debug` to see
//! every pipeline stage.
//!
//! # Configuration
//!
//! - `--config FILE` - TOML, JSON or YAML [`ExtractionConfig`]
//! - otherwise `NETWORTH_MAX_FILE_SIZE`, `NETWORTH_EXTRACTION_TIMEOUT_SECS`,
//!   `NETWORTH_STRICT_TEXT` (a `.env` file is honoured)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use networth_extractors::{
    file_type_display, ExtractionConfig, ExtractionPipeline, ExtractionResult, SubmittedFile,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "networth-extract")]
#[command(about = "Extract plain text from resume and document uploads")]
struct Cli {
    /// Files to extract (.txt, .pdf, .docx; .doc is rejected)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Load configuration from a TOML, JSON or YAML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the upload ceiling in bytes
    #[arg(long = "max-size")]
    max_size: Option<u64>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct FileReport {
    file: String,
    #[serde(rename = "type")]
    type_display: &'static str,
    result: ExtractionResult,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Initialize tracing to stderr (stdout carries the JSON reports)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ExtractionConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ExtractionConfig::from_env(),
    };
    if let Some(max_size) = cli.max_size {
        config = config.with_max_file_size(max_size);
    }
    tracing::debug!(?config, "Loaded configuration");

    let pipeline = ExtractionPipeline::from_config(&config);

    let reports =
        futures::future::join_all(cli.files.iter().map(|path| process(&pipeline, path))).await;

    let mut all_ok = true;
    for report in &reports {
        all_ok &= report.result.is_success();
        let line = if cli.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        println!("{}", line);
    }

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Read, validate and extract one file. Read errors become failure results
/// so one unreadable path does not stop the others.
async fn process(pipeline: &ExtractionPipeline, path: &Path) -> FileReport {
    let file_label = path.display().to_string();

    match SubmittedFile::from_path(path).await {
        Ok(file) => FileReport {
            file: file_label,
            type_display: file.type_display(),
            result: pipeline.validate_and_extract(&file).await,
        },
        Err(err) => {
            tracing::warn!(path = %file_label, error = %err, "Could not read file");
            FileReport {
                type_display: file_type_display(&file_label),
                file: file_label,
                result: err.into(),
            }
        }
    }
}
