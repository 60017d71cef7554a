//! Submitted file payloads and their metadata.

use std::path::Path;

use crate::error::ExtractResult;

pub const MEDIA_TYPE_TEXT: &str = "text/plain";
pub const MEDIA_TYPE_PDF: &str = "application/pdf";
pub const MEDIA_TYPE_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MEDIA_TYPE_DOC: &str = "application/msword";

/// A file handed to the pipeline by its caller.
///
/// The declared media type is whatever the caller was told (a browser's
/// `File.type`, a multipart header, a guess from the extension) and may be
/// empty or wrong; the filename extension is the fallback signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedFile {
    bytes: Vec<u8>,
    media_type: String,
    filename: String,
}

impl SubmittedFile {
    pub fn new(
        bytes: impl Into<Vec<u8>>,
        media_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
            filename: filename.into(),
        }
    }

    /// Read a file from disk, guessing the declared type from its extension.
    ///
    /// Unknown extensions get an empty media type.
    pub async fn from_path(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let media_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            bytes,
            media_type,
            filename,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Payload length in bytes.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Media type without parameters, lower-cased (`text/plain; charset=utf-8` -> `text/plain`).
    pub fn media_type_essence(&self) -> String {
        self.media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// Lower-cased text after the last `.` in the filename, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.filename)
    }

    /// Human-readable label for the file's type.
    pub fn type_display(&self) -> &'static str {
        file_type_display(&self.filename)
    }
}

fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Map a filename to a display label. Display only; never used for dispatch.
pub fn file_type_display(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("pdf") => "PDF",
        Some("docx") => "Word Document",
        Some("doc") => "Word Document (Legacy)",
        Some("txt") => "Text File",
        _ => "Document",
    }
}
