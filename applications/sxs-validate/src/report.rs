//! Validation report assembly
//!
//! Pairs each [`ValidationResult`] with its transcription record, optionally
//! runs the upload and submission capabilities, and summarizes the batch.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sxs_core::{
    ResultUploader, SubmissionEntry, SubmissionOutcome, SubmissionRecord, SubmissionSink,
    TranscriptionValidator, ValidationResult,
};

/// Counts over every file in a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Files with at least one warning, valid or not
    pub with_warnings: usize,
}

impl ReportSummary {
    fn from_entries(entries: &[SubmissionEntry]) -> Self {
        let valid = entries.iter().filter(|e| e.validation.is_valid).count();
        Self {
            total: entries.len(),
            valid,
            invalid: entries.len() - valid,
            with_warnings: entries.iter().filter(|e| e.validation.has_warnings()).count(),
        }
    }
}

/// Output of the `validate` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub expected_language: Option<String>,
    pub files: Vec<SubmissionEntry>,
    pub summary: ReportSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionOutcome>,
}

impl ValidationReport {
    /// Build a report from `(filename, result)` pairs, keeping their order
    pub fn assemble(
        results: Vec<(String, ValidationResult)>,
        expected_language: Option<&str>,
        transcriber: &dyn TranscriptionValidator,
    ) -> Self {
        let files: Vec<SubmissionEntry> = results
            .into_iter()
            .map(|(filename, validation)| {
                let transcription = transcriber.assess(&validation, expected_language);
                SubmissionEntry {
                    filename,
                    validation,
                    transcription,
                    upload: None,
                }
            })
            .collect();

        Self {
            expected_language: expected_language.map(str::to_string),
            summary: ReportSummary::from_entries(&files),
            files,
            submission: None,
        }
    }

    /// Upload every valid file, then submit the whole record
    ///
    /// Invalid files are never uploaded. Submission happens only when every
    /// file is valid.
    pub async fn submit(
        &mut self,
        uploader: &dyn ResultUploader,
        sink: &dyn SubmissionSink,
    ) -> Result<()> {
        for entry in self.files.iter_mut().filter(|e| e.validation.is_valid) {
            entry.upload = Some(uploader.upload(&entry.filename, &entry.validation).await?);
        }

        if !self.all_valid() {
            tracing::info!(
                "Skipping submission: {} of {} files failed validation",
                self.summary.invalid,
                self.summary.total
            );
            return Ok(());
        }

        let record = SubmissionRecord {
            expected_language: self.expected_language.clone(),
            entries: self.files.clone(),
        };
        self.submission = Some(sink.submit(&record).await?);
        Ok(())
    }

    pub fn all_valid(&self) -> bool {
        self.summary.invalid == 0
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
