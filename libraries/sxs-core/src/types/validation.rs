//! Validation result types

use crate::issue::ValidationIssue;
use serde::{Deserialize, Serialize};

/// Outcome of validating one uploaded audio file
///
/// Produced once per file by the validation pipeline and never mutated after
/// it is handed back. `is_valid` is authoritative; `errors` and `warnings`
/// are diagnostics in the order they were found.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True only if a decode path succeeded and the hard floor holds
    pub is_valid: bool,

    /// Duration in seconds (`frame_count / sample_rate` of the successful path)
    pub duration: f64,

    /// Sample rate in Hz of the successful path
    pub sample_rate: u32,

    /// Channel count, 0 when no channel-reporting path succeeded
    pub channels: u16,

    /// Declared extension, lower-cased with a leading dot
    pub format: String,

    /// Fatal findings
    pub errors: Vec<String>,

    /// Advisory findings
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create an invalid result carrying a single fatal issue
    ///
    /// Used where the pipeline never ran to completion for a file, e.g. a
    /// batch worker that timed out.
    pub fn failed(format: impl Into<String>, issue: &ValidationIssue) -> Self {
        Self {
            format: format.into(),
            errors: vec![issue.to_string()],
            ..Self::default()
        }
    }

    /// Whether any advisory findings were recorded
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Technical metadata of a valid file
    ///
    /// Returns `None` for invalid results, whose numbers may be partial.
    pub fn technical_metadata(&self) -> Option<TechnicalMetadata> {
        self.is_valid.then(|| TechnicalMetadata {
            duration: self.duration,
            sample_rate: self.sample_rate,
            channels: self.channels,
            format: self.format.clone(),
        })
    }
}

/// Duration, sample rate, channels and format of a validated file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalMetadata {
    /// Duration in seconds
    pub duration: f64,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count (0 = unknown)
    pub channels: u16,
    /// Declared extension
    pub format: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_result_is_invalid_with_one_error() {
        let result = ValidationResult::failed(".mp3", &ValidationIssue::Unexpected("boom".into()));
        assert!(!result.is_valid);
        assert_eq!(result.format, ".mp3");
        assert_eq!(result.errors, vec!["Unexpected validation error: boom"]);
        assert!(result.warnings.is_empty());
        assert_eq!(result.channels, 0);
    }

    #[test]
    fn technical_metadata_only_for_valid_results() {
        let mut result = ValidationResult {
            is_valid: true,
            duration: 90.0,
            sample_rate: 48_000,
            channels: 2,
            format: ".flac".into(),
            ..ValidationResult::default()
        };

        let meta = result.technical_metadata().unwrap();
        assert_eq!(meta.duration, 90.0);
        assert_eq!(meta.sample_rate, 48_000);
        assert_eq!(meta.channels, 2);
        assert_eq!(meta.format, ".flac");

        result.is_valid = false;
        assert!(result.technical_metadata().is_none());
    }

    #[test]
    fn serializes_with_flat_field_names() {
        let result = ValidationResult {
            is_valid: true,
            duration: 61.5,
            sample_rate: 44_100,
            channels: 1,
            format: ".wav".into(),
            errors: vec![],
            warnings: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["is_valid"], true);
        assert_eq!(json["sample_rate"], 44_100);
        assert_eq!(json["format"], ".wav");
    }
}
