//! Placeholder capabilities - transcription, cloud upload and sheet submission
//!
//! These require external services and will be implemented in future phases.
//! Every placeholder succeeds with its `NotImplemented` outcome so callers can
//! wire the full flow today.

use crate::error::Result;
use crate::traits::{ResultUploader, SubmissionSink, TranscriptionValidator};
use crate::types::{
    SubmissionOutcome, SubmissionRecord, TranscriptionRecord, UploadOutcome, ValidationResult,
};
use async_trait::async_trait;

/// URL handed out by [`PlaceholderUploader`]
pub const PLACEHOLDER_UPLOAD_URL: &str =
    "https://drive.google.com/file/d/PLACEHOLDER_AUDIO_VALIDATION_ID/view?usp=sharing";

/// Transcription stub: always returns the fixed placeholder record
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTranscriber;

impl TranscriptionValidator for PlaceholderTranscriber {
    fn assess(
        &self,
        _result: &ValidationResult,
        expected_language: Option<&str>,
    ) -> TranscriptionRecord {
        TranscriptionRecord::placeholder(expected_language)
    }
}

/// Upload stub: returns a fixed shareable URL without storing anything
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderUploader;

#[async_trait]
impl ResultUploader for PlaceholderUploader {
    async fn upload(&self, filename: &str, _result: &ValidationResult) -> Result<UploadOutcome> {
        tracing::warn!("Result upload is not yet implemented, skipping {}", filename);
        Ok(UploadOutcome::NotImplemented {
            placeholder_url: PLACEHOLDER_UPLOAD_URL.to_string(),
        })
    }
}

/// Submission stub: accepts every record and stores nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderSubmissionSink;

#[async_trait]
impl SubmissionSink for PlaceholderSubmissionSink {
    async fn submit(&self, record: &SubmissionRecord) -> Result<SubmissionOutcome> {
        tracing::warn!(
            "Submission tracking is not yet implemented, dropping record with {} entries",
            record.entries.len()
        );
        Ok(SubmissionOutcome::NotImplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TranscriptionStatus;

    #[test]
    fn transcriber_ignores_validation_outcome() {
        let valid = ValidationResult {
            is_valid: true,
            duration: 120.0,
            ..ValidationResult::default()
        };
        let invalid = ValidationResult::default();

        let a = PlaceholderTranscriber.assess(&valid, Some("ko-KR"));
        let b = PlaceholderTranscriber.assess(&invalid, Some("ko-KR"));
        assert_eq!(a, b);
        assert_eq!(
            a.validation_status,
            TranscriptionStatus::PlaceholderNotImplemented
        );
    }

    #[tokio::test]
    async fn uploader_returns_placeholder_url() {
        let outcome = PlaceholderUploader
            .upload("take.wav", &ValidationResult::default())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            UploadOutcome::NotImplemented {
                placeholder_url: PLACEHOLDER_UPLOAD_URL.to_string()
            }
        );
    }

    #[tokio::test]
    async fn submission_sink_accepts_any_record() {
        let outcome = PlaceholderSubmissionSink
            .submit(&SubmissionRecord::default())
            .await
            .unwrap();
        assert_eq!(outcome, SubmissionOutcome::NotImplemented);
    }
}
