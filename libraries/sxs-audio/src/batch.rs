//! Batch validation on a bounded worker pool
//!
//! Uploads are independent, so they are validated concurrently. At most
//! `max_workers` validations run at once; each runs on a blocking thread with
//! its own staged file. Results come back in input order. A worker that
//! times out or crashes yields a failed result for its own file only.

use crate::validator::AudioValidator;
use std::sync::Arc;
use std::time::Duration;
use sxs_core::{limits, ValidationIssue, ValidationResult};
use tokio::sync::Semaphore;

/// An upload held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAudio {
    /// Name the uploader gave the file
    pub filename: String,
    /// Full file content
    pub bytes: Vec<u8>,
}

impl UploadedAudio {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Largest worker count the pool can be configured with
pub const MAX_WORKERS: usize = Semaphore::MAX_PERMITS;

/// Validates many uploads concurrently
#[derive(Clone)]
pub struct BatchValidator {
    validator: Arc<AudioValidator>,
    max_workers: usize,
    file_timeout: Option<Duration>,
}

impl BatchValidator {
    /// Create a batch validator using one worker per CPU
    pub fn new(validator: AudioValidator) -> Self {
        Self {
            validator: Arc::new(validator),
            max_workers: num_cpus::get().max(1),
            file_timeout: None,
        }
    }

    /// Limit concurrent validations, clamped to `1..=MAX_WORKERS`
    #[must_use]
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.clamp(1, MAX_WORKERS);
        self
    }

    /// Give up on a file after `timeout`
    ///
    /// A timed-out file is reported as an unexpected error. Its blocking
    /// worker keeps its pool slot until the decode actually returns, so the
    /// bound on concurrent decodes still holds.
    #[must_use]
    pub fn with_file_timeout(mut self, timeout: Duration) -> Self {
        self.file_timeout = Some(timeout);
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Validate all uploads, returning one result per upload in input order
    pub async fn validate_all(&self, uploads: Vec<UploadedAudio>) -> Vec<ValidationResult> {
        let total = uploads.len();
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut handles = Vec::with_capacity(total);

        for upload in uploads {
            let format = limits::declared_format(&upload.filename);
            let semaphore = Arc::clone(&semaphore);
            let validator = Arc::clone(&self.validator);
            let file_timeout = self.file_timeout;

            let handle = tokio::spawn(async move {
                let permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| ValidationIssue::Unexpected(format!("worker pool closed: {}", e)))?;

                let work = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    validator.validate_bytes(&upload.bytes, &upload.filename)
                });

                let joined = match file_timeout {
                    Some(limit) => tokio::time::timeout(limit, work).await.map_err(|_| {
                        ValidationIssue::Unexpected(format!(
                            "validation timed out after {:.1}s",
                            limit.as_secs_f64()
                        ))
                    })?,
                    None => work.await,
                };

                joined.map_err(|e| ValidationIssue::Unexpected(format!("worker failed: {}", e)))
            });

            handles.push((format, handle));
        }

        let mut results = Vec::with_capacity(total);
        for (format, handle) in handles {
            let result = match handle.await {
                Ok(Ok(result)) => result,
                Ok(Err(issue)) => {
                    tracing::warn!("{}", issue);
                    ValidationResult::failed(format, &issue)
                }
                Err(e) => {
                    let issue = ValidationIssue::Unexpected(format!("worker failed: {}", e));
                    tracing::error!("{}", issue);
                    ValidationResult::failed(format, &issue)
                }
            };
            results.push(result);
        }

        let valid = results.iter().filter(|r| r.is_valid).count();
        tracing::info!("Validated {} files: {} valid, {} invalid", total, valid, total - valid);

        results
    }
}
