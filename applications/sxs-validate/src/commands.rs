/// Command implementations shared by the binary and its tests
use crate::config::ValidatorConfig;
use crate::error::{CliError, Result};
use crate::report::ValidationReport;
use std::path::{Path, PathBuf};
use sxs_audio::{AudioValidator, BatchValidator, UploadedAudio};
use sxs_core::{
    limits, PlaceholderSubmissionSink, PlaceholderTranscriber, PlaceholderUploader,
    ValidationIssue, ValidationResult,
};

/// Options of the `validate` command
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub files: Vec<PathBuf>,
    pub expected_language: Option<String>,
    pub submit: bool,
}

/// Build the batch validator described by `config`
pub fn batch_validator(config: &ValidatorConfig) -> BatchValidator {
    let mut builder = AudioValidator::builder();
    if let Some(dir) = &config.staging.directory {
        builder = builder.staging_dir(dir);
    }

    let mut batch = BatchValidator::new(builder.build()).with_max_workers(config.batch.workers);
    if let Some(timeout) = config.file_timeout() {
        batch = batch.with_file_timeout(timeout);
    }
    batch
}

/// Validate files on disk and assemble the report
///
/// Files that cannot be read are reported as failed; they do not abort the
/// run.
pub async fn validate_files(
    options: &ValidateOptions,
    config: &ValidatorConfig,
) -> Result<ValidationReport> {
    if options.files.is_empty() {
        return Err(CliError::Input("no files given".to_string()));
    }

    let mut results: Vec<Option<(String, ValidationResult)>> = Vec::with_capacity(options.files.len());
    let mut uploads = Vec::new();
    let mut slots = Vec::new();

    for path in &options.files {
        let filename = display_name(path);
        if !limits::is_supported_extension(&filename) {
            tracing::warn!(
                "{} does not have a supported extension ({}), validating anyway",
                filename,
                limits::SUPPORTED_EXTENSIONS.join(", ")
            );
        }

        match tokio::fs::read(path).await {
            Ok(bytes) => {
                slots.push(results.len());
                results.push(None);
                uploads.push(UploadedAudio::new(filename, bytes));
            }
            Err(err) => {
                tracing::warn!("Cannot read {}: {}", path.display(), err);
                let failed = ValidationResult::failed(
                    limits::declared_format(&filename),
                    &ValidationIssue::Staging(err.to_string()),
                );
                results.push(Some((filename, failed)));
            }
        }
    }

    let names: Vec<String> = uploads.iter().map(|u| u.filename.clone()).collect();
    let validated = batch_validator(config).validate_all(uploads).await;
    for ((slot, filename), result) in slots.into_iter().zip(names).zip(validated) {
        results[slot] = Some((filename, result));
    }

    let mut report = ValidationReport::assemble(
        results.into_iter().flatten().collect(),
        options.expected_language.as_deref(),
        &PlaceholderTranscriber,
    );

    if options.submit {
        report
            .submit(&PlaceholderUploader, &PlaceholderSubmissionSink)
            .await?;
    }

    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
