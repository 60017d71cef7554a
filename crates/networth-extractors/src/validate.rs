//! Pre-extraction gate: size ceiling and supported-format check.

use tracing::debug;

use crate::error::ValidationError;
use crate::file::{SubmittedFile, MEDIA_TYPE_DOC, MEDIA_TYPE_DOCX, MEDIA_TYPE_PDF, MEDIA_TYPE_TEXT};
use crate::types::ValidationOutcome;

/// Largest accepted upload: 10 MiB.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Media types accepted by the validator.
pub const SUPPORTED_MEDIA_TYPES: &[&str] =
    &[MEDIA_TYPE_TEXT, MEDIA_TYPE_PDF, MEDIA_TYPE_DOCX, MEDIA_TYPE_DOC];

/// Filename extensions accepted by the validator.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "pdf", "docx", "doc"];

/// Validates submitted files against a size ceiling and the supported format set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileValidator {
    max_file_size: u64,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FileValidator {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Check size first, then format. Either the media type or the
    /// extension matching is enough.
    pub fn check(&self, file: &SubmittedFile) -> Result<(), ValidationError> {
        if file.len() > self.max_file_size {
            return Err(ValidationError::Oversize {
                size: file.len(),
                max: self.max_file_size,
            });
        }

        let type_ok = SUPPORTED_MEDIA_TYPES.contains(&file.media_type_essence().as_str());
        let ext_ok = file
            .extension()
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));

        if type_ok || ext_ok {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedFormat)
        }
    }

    pub fn validate(&self, file: &SubmittedFile) -> ValidationOutcome {
        let result = self.check(file);
        match &result {
            Ok(()) => debug!(
                filename = %file.filename(),
                size = file.len(),
                "File passed validation"
            ),
            Err(err) => debug!(
                filename = %file.filename(),
                size = file.len(),
                media_type = %file.media_type(),
                kind = %err.kind(),
                "File rejected by validation"
            ),
        }
        result.into()
    }
}

/// Validate with the default 10 MiB ceiling.
pub fn validate_file(file: &SubmittedFile) -> ValidationOutcome {
    FileValidator::new().validate(file)
}
