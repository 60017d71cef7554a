//! Plain text extraction.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, FormatKind};
use crate::Extractor;
use async_trait::async_trait;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decodes a payload as UTF-8 text.
///
/// By default invalid sequences are replaced with U+FFFD, which is what a
/// browser `FileReader` does; [`TextExtractor::strict`] rejects them instead.
#[derive(Debug, Clone, Default)]
pub struct TextExtractor {
    strict: bool,
}

impl TextExtractor {
    /// Create a lossy text extractor.
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Create a text extractor that fails on invalid UTF-8.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    fn decode(&self, content: &[u8]) -> ExtractResult<String> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        if self.strict {
            String::from_utf8(content.to_vec()).map_err(|e| ExtractError::Decode(e.to_string()))
        } else {
            Ok(String::from_utf8_lossy(content).into_owned())
        }
    }
}

#[async_trait]
impl Extractor for TextExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let text = self.decode(content)?;
        Ok(ExtractedContent::new(text, FormatKind::PlainText, self.name())
            .with_metadata("original_size", content.len()))
    }

    fn format(&self) -> FormatKind {
        FormatKind::PlainText
    }

    fn name(&self) -> &str {
        "utf8-text"
    }
}
