//! networth-extractors - Text extraction for uploaded resumes and documents.
//!
//! Turns an uploaded file (plain text, PDF, or Word document) into plain
//! text for the net-worth tracker's import flow. Every call ends in a
//! uniform [`ExtractionResult`]; no error escapes to the caller.
//!
//! Stages, in order:
//!
//! 1. [`FileValidator`] - size ceiling and supported-format gate (run by the caller)
//! 2. [`classify`] - pick a [`FormatKind`] from media type or extension
//! 3. [`Extractor`] - one implementation per format
//! 4. [`ExtractionPipeline`] - dispatch and normalize into [`ExtractionResult`]
//!
//! # Features
//!
//! - `pdf` (default) - PDF text extraction via pdf-extract
//! - `docx` (default) - DOCX text extraction via docx-rs
//!
//! # Example
//!
//! ```ignore
//! use networth_extractors::{validate_file, ExtractionPipeline, SubmittedFile};
//!
//! let file = SubmittedFile::from_path("resume.pdf").await?;
//! let outcome = validate_file(&file);
//! if outcome.valid {
//!     let pipeline = ExtractionPipeline::with_defaults();
//!     let result = pipeline.extract_text_from_file(&file).await;
//!     println!("{}", serde_json::to_string(&result)?);
//! }
//! ```

mod classify;
mod config;
mod error;
mod factory;
mod file;
mod legacy;
mod pipeline;
mod session;
mod text;
mod types;
mod validate;

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "docx")]
mod docx;

pub use classify::classify;
pub use config::ExtractionConfig;
pub use error::{
    ConfigError, ExtractError, ExtractResult, ValidationError, DOCX_FAILURE_MESSAGE,
    GENERIC_FAILURE_MESSAGE, LEGACY_WORD_MESSAGE, PDF_FAILURE_MESSAGE,
    TEXT_READ_FAILURE_MESSAGE, UNSUPPORTED_FORMAT_MESSAGE,
};
pub use factory::ExtractorFactory;
pub use file::{
    file_type_display, SubmittedFile, MEDIA_TYPE_DOC, MEDIA_TYPE_DOCX, MEDIA_TYPE_PDF,
    MEDIA_TYPE_TEXT,
};
pub use legacy::LegacyWordExtractor;
pub use pipeline::ExtractionPipeline;
pub use session::ExtractionSession;
pub use text::TextExtractor;
pub use types::{
    ExtractedContent, ExtractionResult, FailureKind, FormatKind, ValidationOutcome,
};
pub use validate::{
    validate_file, FileValidator, MAX_FILE_SIZE, SUPPORTED_EXTENSIONS, SUPPORTED_MEDIA_TYPES,
};

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

#[cfg(feature = "docx")]
pub use docx::DocxExtractor;

use async_trait::async_trait;

/// Core Extractor trait - one implementation per [`FormatKind`].
///
/// Implementations must turn every decoding problem into an
/// [`ExtractError`]; the pipeline additionally contains panics.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text content from bytes.
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent>;

    /// Format this extractor handles.
    fn format(&self) -> FormatKind;

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
