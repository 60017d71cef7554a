//! Legacy binary Word documents (`.doc`).

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, FormatKind};
use crate::Extractor;
use async_trait::async_trait;

/// Placeholder for `.doc` files.
///
/// The binary Word format is not parsed; every call fails with guidance to
/// convert the file. The payload is never inspected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyWordExtractor;

impl LegacyWordExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for LegacyWordExtractor {
    async fn extract(&self, _content: &[u8]) -> ExtractResult<ExtractedContent> {
        Err(ExtractError::LegacyWord)
    }

    fn format(&self) -> FormatKind {
        FormatKind::WordLegacy
    }

    fn name(&self) -> &str {
        "legacy-word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_rejects() {
        let extractor = LegacyWordExtractor::new();
        for payload in [&b""[..], b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1", b"hello"] {
            let result = extractor.extract(payload).await;
            assert!(matches!(result, Err(ExtractError::LegacyWord)));
        }
    }
}
