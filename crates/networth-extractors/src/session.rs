//! Latest-submission-wins wrapper around [`ExtractionPipeline`].
//!
//! An upload widget that lets the user replace a file while the previous one
//! is still being extracted should only ever show the newest result. Each
//! call to [`ExtractionSession::submit`] takes a ticket; when it finishes,
//! the result is returned only if no later ticket has been issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::file::SubmittedFile;
use crate::pipeline::ExtractionPipeline;
use crate::types::ExtractionResult;

pub struct ExtractionSession {
    pipeline: Arc<ExtractionPipeline>,
    latest: AtomicU64,
}

impl ExtractionSession {
    pub fn new(pipeline: Arc<ExtractionPipeline>) -> Self {
        Self {
            pipeline,
            latest: AtomicU64::new(0),
        }
    }

    /// Validate and extract `file`.
    ///
    /// Returns `None` when a newer submission started before this one
    /// finished; the stale result is dropped.
    pub async fn submit(&self, file: &SubmittedFile) -> Option<ExtractionResult> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.pipeline.validate_and_extract(file).await;

        let latest = self.latest.load(Ordering::SeqCst);
        if ticket == latest {
            Some(result)
        } else {
            debug!(
                filename = %file.filename(),
                ticket,
                latest,
                "Discarding superseded extraction result"
            );
            None
        }
    }

    /// Mark every in-flight submission as stale without starting a new one,
    /// e.g. when the user clears the upload.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn pipeline(&self) -> &ExtractionPipeline {
        &self.pipeline
    }
}
