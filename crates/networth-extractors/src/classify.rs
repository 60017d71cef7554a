//! Format classification: one total function from file metadata to [`FormatKind`].

use crate::file::{SubmittedFile, MEDIA_TYPE_DOC, MEDIA_TYPE_DOCX, MEDIA_TYPE_PDF, MEDIA_TYPE_TEXT};
use crate::types::FormatKind;

/// Pick the extraction strategy for a file.
///
/// Checked in a fixed order (plain text, PDF, Word-modern, Word-legacy);
/// the first match wins and everything else is [`FormatKind::Unsupported`].
pub fn classify(file: &SubmittedFile) -> FormatKind {
    let media_type = file.media_type_essence();
    let ext = file.extension();
    let is = |mime: &str, extension: &str| media_type == mime || ext.as_deref() == Some(extension);

    if is(MEDIA_TYPE_TEXT, "txt") {
        FormatKind::PlainText
    } else if is(MEDIA_TYPE_PDF, "pdf") {
        FormatKind::Pdf
    } else if is(MEDIA_TYPE_DOCX, "docx") {
        FormatKind::WordModern
    } else if is(MEDIA_TYPE_DOC, "doc") {
        FormatKind::WordLegacy
    } else {
        FormatKind::Unsupported
    }
}
