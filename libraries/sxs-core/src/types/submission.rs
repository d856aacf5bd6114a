//! Submission and upload boundary types

use crate::types::{TranscriptionRecord, ValidationResult};
use serde::{Deserialize, Serialize};

/// Result of handing a validated file to the upload capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[non_exhaustive]
pub enum UploadOutcome {
    /// No storage backend exists; the URL is a fixed placeholder
    NotImplemented {
        /// Stand-in location reported for the file
        placeholder_url: String,
    },
}

/// Result of handing a record to the submission capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SubmissionOutcome {
    /// No tracking sheet backend exists
    NotImplemented,
}

/// One validated file together with its side records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionEntry {
    /// Original upload filename
    pub filename: String,
    /// Validation outcome for the file
    pub validation: ValidationResult,
    /// Transcription record paired with the result
    pub transcription: TranscriptionRecord,
    /// Set once the upload capability has run for a valid file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadOutcome>,
}

/// Everything submitted for one evaluation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Expected language hint supplied by the caller
    pub expected_language: Option<String>,
    /// Files in upload order
    pub entries: Vec<SubmissionEntry>,
}

impl SubmissionRecord {
    /// Whether every entry passed validation
    pub fn all_valid(&self) -> bool {
        self.entries.iter().all(|entry| entry.validation.is_valid)
    }
}
