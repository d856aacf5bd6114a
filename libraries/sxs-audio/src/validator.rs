//! Validation orchestrator
//!
//! Sequences staging, the decode chain, the secondary probe and the duration
//! policy for one upload, and assembles the [`ValidationResult`].
//!
//! # Pipeline
//!
//! ```text
//! Received -> Staged -> PrimaryAttempted -> Verified ----------> Finalized
//!                              |                                    ^
//!                              +-------> FallbackAttempted ---------+
//! ```
//!
//! Each strategy runs at most once. The staged file is owned by the call and
//! released before the result is returned, including when a decoder panics.

use crate::error::AudioError;
use crate::policy::{DurationPolicy, DurationVerdict};
use crate::probe::{FormatProbe, SymphoniaFormatProbe};
use crate::staging::{self, StagedFile};
use crate::strategy::{DecodeChain, DecodedAudio};
use std::any::Any;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use sxs_core::{limits, Severity, ValidationIssue, ValidationResult};

/// Where a single validation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValidationStage {
    Received,
    Staged,
    PrimaryAttempted,
    Verified,
    FallbackAttempted,
    Finalized,
}

/// Accumulates findings for one file and produces the final result
///
/// `is_valid` is decided exactly once through [`ResultAggregator::conclude`].
struct ResultAggregator {
    stage: ValidationStage,
    verdict: Option<bool>,
    result: ValidationResult,
}

impl ResultAggregator {
    fn new(format: String) -> Self {
        Self {
            stage: ValidationStage::Received,
            verdict: None,
            result: ValidationResult {
                format,
                ..ValidationResult::default()
            },
        }
    }

    fn advance(&mut self, next: ValidationStage) {
        tracing::trace!("{:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    fn record(&mut self, issue: ValidationIssue) {
        match issue.severity() {
            Severity::Fatal => {
                tracing::debug!("error: {}", issue);
                self.result.errors.push(issue.to_string());
            }
            Severity::Advisory => {
                tracing::debug!("warning: {}", issue);
                self.result.warnings.push(issue.to_string());
            }
        }
    }

    fn measured(&mut self, audio: &DecodedAudio) {
        self.result.duration = audio.duration_secs();
        self.result.sample_rate = audio.sample_rate;
        if let Some(channels) = audio.channels {
            self.result.channels = channels;
        }
    }

    fn conclude(&mut self, is_valid: bool) {
        debug_assert!(self.verdict.is_none(), "validity decided twice");
        if self.verdict.is_none() {
            self.verdict = Some(is_valid);
        }
    }

    fn finish(mut self) -> ValidationResult {
        self.advance(ValidationStage::Finalized);
        self.result.is_valid = self.verdict.unwrap_or(false);
        self.result
    }
}

/// Audio file validator
///
/// Holds no per-file state; one instance can validate any number of files,
/// from several threads at once.
///
/// # Example
///
/// ```rust,no_run
/// use sxs_audio::AudioValidator;
/// use std::fs::File;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let validator = AudioValidator::new();
/// let result = validator.validate(File::open("/uploads/take_01.wav")?, "take_01.wav");
///
/// if result.is_valid {
///     println!("{:.1}s at {} Hz", result.duration, result.sample_rate);
/// } else {
///     println!("rejected: {:?}", result.errors);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AudioValidator {
    chain: DecodeChain,
    probe: Box<dyn FormatProbe>,
    policy: DurationPolicy,
    staging_dir: Option<PathBuf>,
}

impl AudioValidator {
    /// Validator with the standard decode chain, probe and policy
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a validator
    pub fn builder() -> AudioValidatorBuilder {
        AudioValidatorBuilder::default()
    }

    /// Validate an upload given as a byte stream
    ///
    /// Never fails: every problem is recorded in the returned result.
    ///
    /// # Arguments
    /// * `source` - Upload content, read to the end
    /// * `filename` - Name the uploader gave the file; only its extension is used
    pub fn validate<R: Read>(&self, mut source: R, filename: &str) -> ValidationResult {
        let span = tracing::debug_span!("validate", file = filename);
        let _enter = span.enter();

        let format = limits::declared_format(filename);
        let mut report = ResultAggregator::new(format);

        let staged = match staging::stage(&mut source, filename, self.staging_dir.as_deref()) {
            Ok(staged) => staged,
            Err(err) => {
                report.record(staging_issue(err));
                report.conclude(false);
                return Self::finalize(report, filename);
            }
        };
        report.advance(ValidationStage::Staged);

        let hint = extension_hint(filename);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_decoders(&staged, hint.as_deref(), &mut report);
        }));

        if let Err(payload) = outcome {
            tracing::error!("Decoder panicked while validating {}", filename);
            report.record(ValidationIssue::Unexpected(panic_message(payload.as_ref())));
            if report.verdict.is_none() {
                report.conclude(false);
            }
        }

        if let Err(err) = staged.release() {
            tracing::warn!("Could not clean up staged file for {}: {}", filename, err);
        }

        Self::finalize(report, filename)
    }

    /// Validate an in-memory upload
    pub fn validate_bytes(&self, bytes: &[u8], filename: &str) -> ValidationResult {
        self.validate(Cursor::new(bytes), filename)
    }

    /// Validate a file already on disk, treating it as an upload
    ///
    /// The file is still staged to a private copy; the original is never
    /// touched.
    pub fn validate_path(&self, path: &Path) -> ValidationResult {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();

        match std::fs::File::open(path) {
            Ok(file) => self.validate(file, &filename),
            Err(err) => {
                tracing::warn!("Cannot open {}: {}", path.display(), err);
                ValidationResult::failed(
                    limits::declared_format(&filename),
                    &ValidationIssue::Staging(err.to_string()),
                )
            }
        }
    }

    fn run_decoders(&self, staged: &StagedFile, hint: Option<&str>, report: &mut ResultAggregator) {
        let path = staged.path();

        for (index, strategy) in self.chain.iter().enumerate() {
            let is_primary = index == 0;
            report.advance(if is_primary {
                ValidationStage::PrimaryAttempted
            } else {
                ValidationStage::FallbackAttempted
            });

            match strategy.decode(path, hint) {
                Ok(audio) => {
                    tracing::debug!(
                        "{} decoded {} frames at {} Hz",
                        strategy.name(),
                        audio.frame_count,
                        audio.sample_rate
                    );
                    report.measured(&audio);

                    if is_primary {
                        if !self.cross_check(path, report) {
                            report.conclude(false);
                            return;
                        }
                        report.advance(ValidationStage::Verified);
                    }

                    let accepted = self.apply_policy(audio.duration_secs(), report);
                    if accepted && !is_primary {
                        report.record(ValidationIssue::FallbackUsed);
                    }
                    report.conclude(accepted);
                    return;
                }
                Err(AudioError::NoAudioData) if is_primary => {
                    report.record(ValidationIssue::ZeroSampleData);
                    report.conclude(false);
                    return;
                }
                Err(err) => {
                    tracing::debug!("{} rejected the file: {}", strategy.name(), err);
                    report.record(decode_issue(is_primary, &err));
                }
            }
        }

        report.conclude(false);
    }

    /// Run the secondary probe; false when it proves the file unreadable
    fn cross_check(&self, path: &Path, report: &mut ResultAggregator) -> bool {
        match self.probe.probe(path) {
            Ok(probe) => {
                report.result.channels = probe.channels;
                if probe.frames_read == 0 {
                    report.record(ValidationIssue::InconsistentReadability);
                    return false;
                }
                true
            }
            Err(failure) => {
                if let Some(channels) = failure.channels {
                    report.result.channels = channels;
                }
                report.record(ValidationIssue::SecondaryProbe(failure.to_string()));
                true
            }
        }
    }

    fn apply_policy(&self, duration: f64, report: &mut ResultAggregator) -> bool {
        match self.policy.evaluate(duration) {
            DurationVerdict::Rejected(issue) => {
                report.record(issue);
                false
            }
            DurationVerdict::Accepted(advisory) => {
                if let Some(issue) = advisory {
                    report.record(issue);
                }
                true
            }
        }
    }

    fn finalize(report: ResultAggregator, filename: &str) -> ValidationResult {
        let result = report.finish();
        tracing::info!(
            "{}: valid={} duration={:.2}s errors={} warnings={}",
            filename,
            result.is_valid,
            result.duration,
            result.errors.len(),
            result.warnings.len()
        );
        result
    }
}

impl Default for AudioValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`AudioValidator`]
#[derive(Default)]
pub struct AudioValidatorBuilder {
    chain: Option<DecodeChain>,
    probe: Option<Box<dyn FormatProbe>>,
    policy: Option<DurationPolicy>,
    staging_dir: Option<PathBuf>,
}

impl AudioValidatorBuilder {
    /// Replace the decode chain
    #[must_use]
    pub fn decode_chain(mut self, chain: DecodeChain) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Replace the secondary probe
    #[must_use]
    pub fn probe(mut self, probe: Box<dyn FormatProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Replace the duration policy
    #[must_use]
    pub fn policy(mut self, policy: DurationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Stage uploads in `dir` instead of the system temp directory
    #[must_use]
    pub fn staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> AudioValidator {
        AudioValidator {
            chain: self.chain.unwrap_or_default(),
            probe: self
                .probe
                .unwrap_or_else(|| Box::new(SymphoniaFormatProbe::new())),
            policy: self.policy.unwrap_or_default(),
            staging_dir: self.staging_dir,
        }
    }
}

fn staging_issue(err: AudioError) -> ValidationIssue {
    match err {
        AudioError::EmptyFile => ValidationIssue::EmptyUpload,
        AudioError::Staging(e) | AudioError::Io(e) => ValidationIssue::Staging(e.to_string()),
        other => ValidationIssue::Staging(other.to_string()),
    }
}

fn decode_issue(is_primary: bool, err: &AudioError) -> ValidationIssue {
    if is_primary {
        ValidationIssue::DecodeFailure(err.to_string())
    } else {
        ValidationIssue::FallbackDecodeFailure(err.to_string())
    }
}

/// Extension without the dot, for decoder hinting
fn extension_hint(filename: &str) -> Option<String> {
    let format = limits::declared_format(filename);
    format.strip_prefix('.').map(str::to_string)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("decoder panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("decoder panicked: {}", msg)
    } else {
        "decoder panicked".to_string()
    }
}
