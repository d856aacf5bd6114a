//! SxS Audio Validation Core
//!
//! Platform-agnostic types, traits, and error handling shared by the audio
//! validation pipeline and its front ends.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `ValidationResult`, `TechnicalMetadata`, `TranscriptionRecord`
//! - **Issue Taxonomy**: `ValidationIssue` with fatal/advisory `Severity`
//! - **Capability Traits**: `TranscriptionValidator`, `ResultUploader`, `SubmissionSink`
//! - **Placeholders**: "not implemented" variants of every capability
//! - **Error Handling**: Unified `SxsError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use sxs_core::{limits, ValidationIssue, ValidationResult};
//!
//! let result = ValidationResult::failed(
//!     limits::declared_format("take_01.WAV"),
//!     &ValidationIssue::EmptyUpload,
//! );
//!
//! assert!(!result.is_valid);
//! assert_eq!(result.format, ".wav");
//! assert_eq!(result.errors, vec!["Audio file is empty or corrupted".to_string()]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod issue;
pub mod limits;
pub mod placeholder;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SxsError};
pub use issue::{Severity, ValidationIssue};
pub use placeholder::{PlaceholderSubmissionSink, PlaceholderTranscriber, PlaceholderUploader};
pub use traits::{ResultUploader, SubmissionSink, TranscriptionValidator};

pub use types::{
    // Validation output
    TechnicalMetadata, ValidationResult,
    // Transcription placeholder record
    QualityMetrics, TranscriptionRecord, TranscriptionStatus,
    // Submission surfaces
    SubmissionEntry, SubmissionOutcome, SubmissionRecord, UploadOutcome,
};
