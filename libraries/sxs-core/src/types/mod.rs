//! Domain types carried through validation and submission

mod submission;
mod transcription;
mod validation;

pub use submission::{SubmissionEntry, SubmissionOutcome, SubmissionRecord, UploadOutcome};
pub use transcription::{QualityMetrics, TranscriptionRecord, TranscriptionStatus};
pub use validation::{TechnicalMetadata, ValidationResult};
