//! Capability traits at the edge of the validation core
//!
//! Each capability currently has a single "not implemented" implementation
//! in [`crate::placeholder`]. A real backend implements the same trait and
//! adds its own outcome variant without touching the validation pipeline.

use crate::error::Result;
use crate::types::{
    SubmissionOutcome, SubmissionRecord, TranscriptionRecord, UploadOutcome, ValidationResult,
};
use async_trait::async_trait;

/// Speech transcription and quality assessment
pub trait TranscriptionValidator: Send + Sync {
    /// Assess a validated file
    ///
    /// # Arguments
    /// * `result` - Validation result of the file being assessed
    /// * `expected_language` - Language tag the uploader declared, if any
    fn assess(&self, result: &ValidationResult, expected_language: Option<&str>)
        -> TranscriptionRecord;
}

/// Durable storage for validated files
#[async_trait]
pub trait ResultUploader: Send + Sync {
    /// Store a file's validation result and return where it can be found
    ///
    /// # Errors
    /// Returns an error if the storage backend rejects the upload
    async fn upload(&self, filename: &str, result: &ValidationResult) -> Result<UploadOutcome>;
}

/// Tracking sheet that receives completed evaluations
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Submit a completed evaluation record
    ///
    /// # Errors
    /// Returns an error if the backend rejects the record
    async fn submit(&self, record: &SubmissionRecord) -> Result<SubmissionOutcome>;
}
