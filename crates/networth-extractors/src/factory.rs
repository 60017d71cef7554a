//! Factory for creating extractors.

use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::types::FormatKind;
use crate::{Extractor, LegacyWordExtractor, TextExtractor};

#[cfg(feature = "pdf")]
use crate::PdfExtractor;

#[cfg(feature = "docx")]
use crate::DocxExtractor;

/// Factory for creating content extractors.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a plain text extractor.
    pub fn text() -> Arc<dyn Extractor> {
        Arc::new(TextExtractor::new())
    }

    /// Create a plain text extractor that rejects invalid UTF-8.
    pub fn strict_text() -> Arc<dyn Extractor> {
        Arc::new(TextExtractor::strict())
    }

    /// Create a PDF extractor.
    #[cfg(feature = "pdf")]
    pub fn pdf() -> Arc<dyn Extractor> {
        Arc::new(PdfExtractor::new())
    }

    /// Create a DOCX extractor.
    #[cfg(feature = "docx")]
    pub fn docx() -> Arc<dyn Extractor> {
        Arc::new(DocxExtractor::new())
    }

    /// Create the legacy `.doc` extractor (always rejects).
    pub fn legacy_word() -> Arc<dyn Extractor> {
        Arc::new(LegacyWordExtractor::new())
    }

    /// Create extractor for a given format.
    pub fn for_format(kind: FormatKind) -> ExtractResult<Arc<dyn Extractor>> {
        match kind {
            FormatKind::PlainText => Ok(Self::text()),

            #[cfg(feature = "pdf")]
            FormatKind::Pdf => Ok(Self::pdf()),

            #[cfg(feature = "docx")]
            FormatKind::WordModern => Ok(Self::docx()),

            FormatKind::WordLegacy => Ok(Self::legacy_word()),

            FormatKind::Unsupported => Err(ExtractError::UnsupportedFormat(kind.to_string())),

            #[allow(unreachable_patterns)]
            _ => Err(ExtractError::NoExtractor(kind)),
        }
    }

    /// Get all available extractors.
    #[allow(clippy::vec_init_then_push)]
    pub fn all() -> Vec<Arc<dyn Extractor>> {
        let mut extractors: Vec<Arc<dyn Extractor>> = Vec::new();

        extractors.push(Self::text());

        #[cfg(feature = "pdf")]
        extractors.push(Self::pdf());

        #[cfg(feature = "docx")]
        extractors.push(Self::docx());

        extractors.push(Self::legacy_word());

        extractors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_all_extractors() {
        let extractors = ExtractorFactory::all();

        #[cfg(all(feature = "pdf", feature = "docx"))]
        assert_eq!(extractors.len(), 4);

        #[cfg(all(feature = "pdf", not(feature = "docx")))]
        assert_eq!(extractors.len(), 3);

        #[cfg(all(feature = "docx", not(feature = "pdf")))]
        assert_eq!(extractors.len(), 3);

        #[cfg(not(any(feature = "pdf", feature = "docx")))]
        assert_eq!(extractors.len(), 2);
    }

    #[test]
    fn test_factory_formats_match() {
        for extractor in ExtractorFactory::all() {
            let rebuilt = ExtractorFactory::for_format(extractor.format()).unwrap();
            assert_eq!(rebuilt.name(), extractor.name());
        }
    }

    #[test]
    fn test_factory_unsupported() {
        let result = ExtractorFactory::for_format(FormatKind::Unsupported);
        assert!(matches!(result, Err(ExtractError::UnsupportedFormat(_))));
    }

    #[cfg(feature = "docx")]
    #[test]
    fn test_factory_for_format_docx() {
        let extractor = ExtractorFactory::for_format(FormatKind::WordModern).unwrap();
        assert_eq!(extractor.name(), "docx-rs");
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_factory_for_format_pdf() {
        let extractor = ExtractorFactory::for_format(FormatKind::Pdf).unwrap();
        assert_eq!(extractor.name(), "pdf-extract");
    }

    #[cfg(all(feature = "pdf", feature = "docx"))]
    #[test]
    fn test_every_supported_kind_has_extractor() {
        use strum::IntoEnumIterator;

        for kind in FormatKind::iter().filter(|k| *k != FormatKind::Unsupported) {
            let extractor = ExtractorFactory::for_format(kind).unwrap();
            assert_eq!(extractor.format(), kind);
            assert!(ExtractorFactory::all().iter().any(|e| e.format() == kind));
        }
    }
}
