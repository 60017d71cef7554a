//! PDF content extraction using pdf-extract.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, FormatKind};
use crate::Extractor;
use async_trait::async_trait;
use tracing::debug;

/// PDF content extractor using pdf-extract library.
///
/// Text is collected page by page: tokens within a page are joined by a
/// single space, pages are joined by a newline and the result is trimmed.
/// Wraps synchronous pdf-extract calls in spawn_blocking, which also
/// contains any panic the parser raises on malformed input.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create new PDF extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract per-page text synchronously (called within spawn_blocking).
    fn extract_pages(content: &[u8]) -> ExtractResult<Vec<String>> {
        pdf_extract::extract_text_from_mem_by_pages(content)
            .map_err(|e| ExtractError::Pdf(format!("Failed to parse PDF: {}", e)))
    }

    /// Run a parse on the blocking pool. A panic inside `parse` surfaces as
    /// a PDF error rather than unwinding into the caller.
    async fn parse_blocking<T, F>(parse: F) -> ExtractResult<T>
    where
        F: FnOnce() -> ExtractResult<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(parse)
            .await
            .map_err(|e| ExtractError::Pdf(format!("PDF parser aborted: {}", e)))?
    }

    /// Join page texts into the final document text.
    fn join_pages(pages: &[String]) -> String {
        pages
            .iter()
            .map(|page| page.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        let pages = Self::parse_blocking(move || Self::extract_pages(&content)).await?;

        debug!(pages = pages.len(), "Parsed PDF");

        let text = Self::join_pages(&pages);
        Ok(ExtractedContent::new(text, FormatKind::Pdf, self.name())
            .with_page_count(pages.len())
            .with_metadata("original_size", content_len))
    }

    fn format(&self) -> FormatKind {
        FormatKind::Pdf
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}
