//! Core types for content extraction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter, IntoStaticStr};

/// Extraction strategy selected for a submitted file.
///
/// Derived from the file on every call and never stored.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// `text/plain` or `.txt`.
    PlainText,
    /// `application/pdf` or `.pdf`.
    Pdf,
    /// Office-XML Word document (`.docx`).
    WordModern,
    /// Binary Word document (`.doc`).
    WordLegacy,
    /// Anything else.
    Unsupported,
}

/// Taxonomy of extraction failures.
///
/// Only used for diagnostics; callers see the message string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Payload exceeds the size ceiling.
    Oversize,
    /// Neither media type nor extension is recognised.
    UnsupportedFormat,
    /// The format's decoder rejected the payload.
    DecodeFailure,
    /// Format is recognised but deliberately not parsed.
    UnimplementedFormat,
    /// Anything else, caught at the outermost boundary.
    UnknownFailure,
}

/// Extracted content with metadata, as produced by an [`Extractor`](crate::Extractor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Extracted text.
    pub text: String,

    /// Format the text was extracted from.
    pub format: FormatKind,

    /// Name of the extractor that produced the text.
    pub extractor: String,

    /// Total page count (for PDFs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,

    /// Additional metadata (format-specific).
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExtractedContent {
    /// Create new extracted content.
    pub fn new(text: String, format: FormatKind, extractor: impl Into<String>) -> Self {
        Self {
            text,
            format,
            extractor: extractor.into(),
            page_count: None,
            metadata: HashMap::new(),
        }
    }

    /// Record the page count.
    pub fn with_page_count(mut self, pages: usize) -> Self {
        self.page_count = Some(pages);
        self
    }

    /// Add metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get content length.
    pub fn len(&self) -> usize {
        self.text.len()
    }
}

/// Normalized outcome of one extraction call.
///
/// Serializes as `{"success": true, "text": ...}` or
/// `{"success": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ResultShape")]
pub enum ExtractionResult {
    /// Text was extracted.
    Success { text: String },
    /// Extraction failed; `error` is the user-facing message.
    Failure { kind: FailureKind, error: String },
}

#[derive(Serialize)]
struct ResultShape {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ExtractionResult> for ResultShape {
    fn from(result: ExtractionResult) -> Self {
        match result {
            ExtractionResult::Success { text } => ResultShape {
                success: true,
                text: Some(text),
                error: None,
            },
            ExtractionResult::Failure { error, .. } => ResultShape {
                success: false,
                text: None,
                error: Some(error),
            },
        }
    }
}

impl ExtractionResult {
    pub fn success(text: impl Into<String>) -> Self {
        ExtractionResult::Success { text: text.into() }
    }

    pub fn failure(kind: FailureKind, error: impl Into<String>) -> Self {
        ExtractionResult::Failure {
            kind,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success { .. })
    }

    /// Extracted text, present iff the call succeeded.
    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractionResult::Success { text } => Some(text),
            ExtractionResult::Failure { .. } => None,
        }
    }

    /// User-facing error, present iff the call failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractionResult::Success { .. } => None,
            ExtractionResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ExtractionResult::Success { .. } => None,
            ExtractionResult::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<crate::error::ExtractError> for ExtractionResult {
    fn from(err: crate::error::ExtractError) -> Self {
        ExtractionResult::failure(err.kind(), err.user_message())
    }
}

impl From<crate::error::ValidationError> for ExtractionResult {
    fn from(err: crate::error::ValidationError) -> Self {
        ExtractionResult::failure(err.kind(), err.to_string())
    }
}

/// Outcome of the pre-extraction gate: `{"valid": bool, "error"?: string}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl From<Result<(), crate::error::ValidationError>> for ValidationOutcome {
    fn from(result: Result<(), crate::error::ValidationError>) -> Self {
        match result {
            Ok(()) => ValidationOutcome {
                valid: true,
                error: None,
            },
            Err(err) => ValidationOutcome {
                valid: false,
                error: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractError, ValidationError, LEGACY_WORD_MESSAGE};

    #[test]
    fn test_success_serializes_without_error() {
        let json = serde_json::to_value(ExtractionResult::success("hello world")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "text": "hello world" })
        );
    }

    #[test]
    fn test_failure_serializes_without_text() {
        let json = serde_json::to_value(ExtractionResult::from(ExtractError::LegacyWord)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": LEGACY_WORD_MESSAGE })
        );
    }

    #[test]
    fn test_empty_text_is_still_present() {
        let result = ExtractionResult::success("");
        assert_eq!(result.text(), Some(""));
        assert!(result.error().is_none());
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["text"], "");
    }

    #[test]
    fn test_validation_outcome_shape() {
        let ok = ValidationOutcome::from(Ok(()));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({ "valid": true })
        );

        let bad = ValidationOutcome::from(Err(ValidationError::UnsupportedFormat));
        assert!(!bad.is_valid());
        assert_eq!(
            bad.error.as_deref(),
            Some("Please upload a PDF, Word document (.docx), or text file")
        );
    }

    #[test]
    fn test_format_kind_names() {
        assert_eq!(FormatKind::WordModern.to_string(), "word_modern");
        let name: &'static str = FormatKind::PlainText.into();
        assert_eq!(name, "plain_text");
    }

    #[test]
    fn test_extracted_content_builder() {
        let content = ExtractedContent::new("a b".into(), FormatKind::Pdf, "pdf-extract")
            .with_page_count(2)
            .with_metadata("original_size", 42);
        assert_eq!(content.page_count, Some(2));
        assert_eq!(content.metadata["original_size"], 42);
        assert_eq!(content.len(), 3);
        assert!(!content.is_empty());
    }
}
