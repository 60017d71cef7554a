//! Extraction pipeline: classify a file, dispatch to its extractor and
//! normalize whatever happens into an [`ExtractionResult`].

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::classify::classify;
use crate::config::ExtractionConfig;
use crate::error::{ExtractError, ExtractResult, GENERIC_FAILURE_MESSAGE};
use crate::file::SubmittedFile;
use crate::types::{ExtractedContent, ExtractionResult, FailureKind, FormatKind};
use crate::validate::FileValidator;
use crate::{Extractor, ExtractorFactory};

/// Pipeline for extracting text using registered extractors.
///
/// Extractors are chosen once at construction, one per [`FormatKind`]; a
/// later registration for the same kind replaces the earlier one. The
/// pipeline holds no per-call state and can be shared across tasks.
#[derive(Clone)]
pub struct ExtractionPipeline {
    extractors: HashMap<FormatKind, Arc<dyn Extractor>>,
    validator: FileValidator,
    timeout: Option<Duration>,
}

impl ExtractionPipeline {
    /// Create new empty pipeline.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            validator: FileValidator::new(),
            timeout: None,
        }
    }

    /// Create pipeline with all available extractors.
    pub fn with_defaults() -> Self {
        ExtractorFactory::all()
            .into_iter()
            .fold(Self::new(), Self::add_extractor)
    }

    /// Create pipeline with all available extractors, tuned by `config`.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let mut pipeline = Self::with_defaults()
            .with_validator(FileValidator::with_max_file_size(config.max_file_size));
        if config.strict_text {
            pipeline = pipeline.add_extractor(ExtractorFactory::strict_text());
        }
        if let Some(timeout) = config.timeout() {
            pipeline = pipeline.with_timeout(timeout);
        }
        pipeline
    }

    /// Register an extractor under the format it reports.
    pub fn add_extractor(self, extractor: Arc<dyn Extractor>) -> Self {
        let kind = extractor.format();
        self.with_extractor(kind, extractor)
    }

    /// Register an extractor for an explicit format.
    pub fn with_extractor(mut self, kind: FormatKind, extractor: Arc<dyn Extractor>) -> Self {
        self.extractors.insert(kind, extractor);
        self
    }

    pub fn with_validator(mut self, validator: FileValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Abort extraction calls that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validator(&self) -> &FileValidator {
        &self.validator
    }

    /// Extract text from a file the caller has already validated.
    ///
    /// Never fails: every error, including a panicking extractor, comes back
    /// as [`ExtractionResult::Failure`].
    pub async fn extract_text_from_file(&self, file: &SubmittedFile) -> ExtractionResult {
        let kind = classify(file);
        debug!(
            filename = %file.filename(),
            media_type = %file.media_type(),
            format = %kind,
            "Classified file"
        );

        if kind == FormatKind::Unsupported {
            let err = ExtractError::UnsupportedFormat(file.media_type().to_string());
            warn!(filename = %file.filename(), error = %err, "No extraction strategy for file");
            return err.into();
        }

        let outcome = AssertUnwindSafe(self.dispatch(kind, file))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(content)) => {
                info!(
                    filename = %file.filename(),
                    format = %kind,
                    extractor = %content.extractor,
                    text_length = content.len(),
                    "Extraction succeeded"
                );
                ExtractionResult::success(content.text)
            }
            Ok(Err(err)) => {
                warn!(
                    filename = %file.filename(),
                    format = %kind,
                    kind = %err.kind(),
                    error = %err,
                    "Extraction failed"
                );
                err.into()
            }
            Err(_) => {
                error!(filename = %file.filename(), format = %kind, "Extractor panicked");
                ExtractionResult::failure(FailureKind::UnknownFailure, GENERIC_FAILURE_MESSAGE)
            }
        }
    }

    /// Run the validator, then extract. Validation failures become failure results.
    pub async fn validate_and_extract(&self, file: &SubmittedFile) -> ExtractionResult {
        if let Err(err) = self.validator.check(file) {
            info!(
                filename = %file.filename(),
                size = file.len(),
                kind = %err.kind(),
                "File rejected before extraction"
            );
            return err.into();
        }
        self.extract_text_from_file(file).await
    }

    async fn dispatch(&self, kind: FormatKind, file: &SubmittedFile) -> ExtractResult<ExtractedContent> {
        let extractor = self
            .extractors
            .get(&kind)
            .ok_or(ExtractError::NoExtractor(kind))?;

        debug!(format = %kind, extractor = extractor.name(), "Dispatching to extractor");

        let extraction = extractor.extract(file.bytes());
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, extraction)
                .await
                .map_err(|_| ExtractError::Timeout(limit))?,
            None => extraction.await,
        }
    }

    /// Check if an extractor is registered for `kind`.
    pub fn supports(&self, kind: FormatKind) -> bool {
        self.extractors.contains_key(&kind)
    }

    /// Get the number of registered extractors.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check if the pipeline has no registered extractors.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LEGACY_WORD_MESSAGE, UNSUPPORTED_FORMAT_MESSAGE};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake extractor that counts calls and returns canned text.
    struct CannedExtractor {
        kind: FormatKind,
        text: &'static str,
        calls: AtomicUsize,
    }

    impl CannedExtractor {
        fn new(kind: FormatKind, text: &'static str) -> Arc<Self> {
            Arc::new(Self {
                kind,
                text,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Extractor for CannedExtractor {
        async fn extract(&self, _content: &[u8]) -> ExtractResult<ExtractedContent> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExtractedContent::new(self.text.to_string(), self.kind, "canned"))
        }

        fn format(&self) -> FormatKind {
            self.kind
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    struct PanickingExtractor;

    #[async_trait]
    impl Extractor for PanickingExtractor {
        async fn extract(&self, _content: &[u8]) -> ExtractResult<ExtractedContent> {
            panic!("decoder blew up")
        }

        fn format(&self) -> FormatKind {
            FormatKind::Pdf
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    struct SlowExtractor;

    #[async_trait]
    impl Extractor for SlowExtractor {
        async fn extract(&self, _content: &[u8]) -> ExtractResult<ExtractedContent> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(ExtractedContent::new(String::new(), FormatKind::Pdf, "slow"))
        }

        fn format(&self) -> FormatKind {
            FormatKind::Pdf
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[test]
    fn test_pipeline_empty() {
        let pipeline = ExtractionPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.len(), 0);
    }

    #[test]
    fn test_pipeline_with_defaults() {
        let pipeline = ExtractionPipeline::with_defaults();
        assert!(pipeline.supports(FormatKind::PlainText));
        assert!(pipeline.supports(FormatKind::WordLegacy));
        assert!(!pipeline.supports(FormatKind::Unsupported));

        #[cfg(all(feature = "pdf", feature = "docx"))]
        assert_eq!(pipeline.len(), 4);
    }

    #[test]
    fn test_from_config_sets_ceiling() {
        let config = ExtractionConfig::default().with_max_file_size(64);
        let pipeline = ExtractionPipeline::from_config(&config);
        assert_eq!(pipeline.validator().max_file_size(), 64);
    }

    #[tokio::test]
    async fn test_dispatches_by_format() {
        let pdf = CannedExtractor::new(FormatKind::Pdf, "from pdf");
        let txt = CannedExtractor::new(FormatKind::PlainText, "from txt");
        let pipeline = ExtractionPipeline::new()
            .add_extractor(pdf.clone())
            .add_extractor(txt.clone());

        let result = pipeline
            .extract_text_from_file(&SubmittedFile::new(b"x".to_vec(), "", "cv.pdf"))
            .await;

        assert_eq!(result, ExtractionResult::success("from pdf"));
        assert_eq!(pdf.calls.load(Ordering::SeqCst), 1);
        assert_eq!(txt.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_never_dispatches() {
        let fallback = CannedExtractor::new(FormatKind::Unsupported, "should not run");
        let pipeline = ExtractionPipeline::with_defaults()
            .with_extractor(FormatKind::Unsupported, fallback.clone());

        let result = pipeline
            .extract_text_from_file(&SubmittedFile::new(b"\x89PNG".to_vec(), "image/png", "image.png"))
            .await;

        assert_eq!(result.error(), Some(UNSUPPORTED_FORMAT_MESSAGE));
        assert_eq!(result.failure_kind(), Some(FailureKind::UnsupportedFormat));
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_extractor_is_generic_failure() {
        let pipeline = ExtractionPipeline::new();
        let result = pipeline
            .extract_text_from_file(&SubmittedFile::new(b"hi".to_vec(), "text/plain", "a.txt"))
            .await;
        assert_eq!(result.error(), Some(GENERIC_FAILURE_MESSAGE));
        assert_eq!(result.failure_kind(), Some(FailureKind::UnknownFailure));
    }

    #[tokio::test]
    async fn test_panicking_extractor_is_contained() {
        let pipeline = ExtractionPipeline::with_defaults().add_extractor(Arc::new(PanickingExtractor));

        let result = pipeline
            .extract_text_from_file(&SubmittedFile::new(b"%PDF".to_vec(), "application/pdf", "a.pdf"))
            .await;
        assert_eq!(result.error(), Some(GENERIC_FAILURE_MESSAGE));

        // The pipeline is still usable afterwards.
        let result = pipeline
            .extract_text_from_file(&SubmittedFile::new(b"still here".to_vec(), "text/plain", "a.txt"))
            .await;
        assert_eq!(result.text(), Some("still here"));
    }

    #[tokio::test]
    async fn test_timeout_is_generic_failure() {
        let pipeline = ExtractionPipeline::new()
            .add_extractor(Arc::new(SlowExtractor))
            .with_timeout(Duration::from_millis(20));

        let result = pipeline
            .extract_text_from_file(&SubmittedFile::new(b"%PDF".to_vec(), "", "slow.pdf"))
            .await;
        assert_eq!(result.error(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_legacy_word_rejected() {
        let result = ExtractionPipeline::with_defaults()
            .extract_text_from_file(&SubmittedFile::new(
                b"anything".to_vec(),
                "application/msword",
                "old.doc",
            ))
            .await;
        assert_eq!(result.error(), Some(LEGACY_WORD_MESSAGE));
        assert_eq!(result.failure_kind(), Some(FailureKind::UnimplementedFormat));
    }

    #[tokio::test]
    async fn test_validate_and_extract_rejects_oversize() {
        let pipeline = ExtractionPipeline::with_defaults()
            .with_validator(FileValidator::with_max_file_size(4));
        let result = pipeline
            .validate_and_extract(&SubmittedFile::new(b"12345".to_vec(), "text/plain", "a.txt"))
            .await;
        assert_eq!(result.failure_kind(), Some(FailureKind::Oversize));
        assert_eq!(result.error(), Some("File size must be less than 4 bytes"));
    }

    #[tokio::test]
    async fn test_validate_and_extract_passes_through() {
        let result = ExtractionPipeline::with_defaults()
            .validate_and_extract(&SubmittedFile::new(b"hello world".to_vec(), "", "a.txt"))
            .await;
        assert_eq!(result, ExtractionResult::success("hello world"));
    }
}
