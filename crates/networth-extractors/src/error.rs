//! Extraction error types.
//!
//! Every error here ends up as a user-facing message inside an
//! [`ExtractionResult`](crate::ExtractionResult); nothing is returned to the
//! caller as a raw error.

use std::time::Duration;
use thiserror::Error;

use crate::types::{FailureKind, FormatKind};

/// Shown when the orchestrator hits something no extractor accounted for.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to process file. Please try again or paste text manually.";

/// Shown when a file classifies as [`FormatKind::Unsupported`].
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Unsupported file type. Please upload a PDF, Word document (.docx), or text file.";

/// Shown when a plain text payload could not be read.
pub const TEXT_READ_FAILURE_MESSAGE: &str =
    "Failed to read text file. Please try again or paste text manually.";

/// Shown when PDF parsing fails for any reason.
pub const PDF_FAILURE_MESSAGE: &str =
    "Failed to extract text from PDF. Please try converting to a text file or paste the text manually.";

/// Shown when DOCX parsing fails for any reason.
pub const DOCX_FAILURE_MESSAGE: &str =
    "Failed to extract text from Word document. Please try converting to a text file or paste the text manually.";

/// Shown for every legacy `.doc` upload.
pub const LEGACY_WORD_MESSAGE: &str =
    "Legacy .doc files are not supported. Please convert to .docx, PDF, or text format, or paste the text manually.";

/// Errors that can occur during content extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// File did not classify as any supported format.
    #[error("Unsupported content type: {0}")]
    UnsupportedFormat(String),

    /// Plain text payload could not be decoded.
    #[error("Text decoding error: {0}")]
    Decode(String),

    /// PDF-specific extraction error.
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// DOCX-specific extraction error.
    #[error("DOCX extraction error: {0}")]
    Docx(String),

    /// Legacy binary Word documents are never parsed.
    #[error("Legacy Word documents are not supported")]
    LegacyWord,

    /// No extractor is registered for a classified format.
    #[error("No extractor registered for {0}")]
    NoExtractor(FormatKind),

    /// Extraction did not finish within the configured timeout.
    #[error("Extraction timed out after {0:?}")]
    Timeout(Duration),

    /// IO error while reading the payload from disk.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Taxonomy bucket for this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            ExtractError::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
            ExtractError::Decode(_) | ExtractError::Pdf(_) | ExtractError::Docx(_) => {
                FailureKind::DecodeFailure
            }
            ExtractError::LegacyWord => FailureKind::UnimplementedFormat,
            ExtractError::NoExtractor(_)
            | ExtractError::Timeout(_)
            | ExtractError::Io(_) => FailureKind::UnknownFailure,
        }
    }

    /// Message suitable for showing to the person who uploaded the file.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractError::UnsupportedFormat(_) => UNSUPPORTED_FORMAT_MESSAGE,
            ExtractError::Decode(_) => TEXT_READ_FAILURE_MESSAGE,
            ExtractError::Pdf(_) => PDF_FAILURE_MESSAGE,
            ExtractError::Docx(_) => DOCX_FAILURE_MESSAGE,
            ExtractError::LegacyWord => LEGACY_WORD_MESSAGE,
            ExtractError::NoExtractor(_)
            | ExtractError::Timeout(_)
            | ExtractError::Io(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Reasons a file is rejected before extraction is attempted.
///
/// `Display` is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Payload is larger than the configured ceiling.
    #[error("File size must be less than {}", format_limit(.max))]
    Oversize { size: u64, max: u64 },

    /// Neither media type nor extension is supported.
    #[error("Please upload a PDF, Word document (.docx), or text file")]
    UnsupportedFormat,
}

impl ValidationError {
    /// Taxonomy bucket for this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            ValidationError::Oversize { .. } => FailureKind::Oversize,
            ValidationError::UnsupportedFormat => FailureKind::UnsupportedFormat,
        }
    }
}

/// Errors raised while loading [`ExtractionConfig`](crate::ExtractionConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(String),

    #[error("Unsupported config file format. Use .toml, .json, or .yaml")]
    UnsupportedFormat,
}

fn format_limit(max: &u64) -> String {
    const MIB: u64 = 1024 * 1024;
    let max = *max;
    if max >= MIB && max % MIB == 0 {
        format!("{}MB", max / MIB)
    } else {
        format!("{} bytes", max)
    }
}
