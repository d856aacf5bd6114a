//! Validation issue taxonomy
//!
//! Every problem found while validating an upload is classified into one of
//! these variants. The orchestrator routes each issue into the result's
//! `errors` or `warnings` list according to its [`Severity`]; the rendered
//! `Display` text is what ends up in those lists.

use thiserror::Error;

/// How an issue affects the validity of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Forces `is_valid = false` and is recorded in `errors`
    Fatal,
    /// Recorded in `warnings`, never changes validity
    Advisory,
}

/// A single classified validation finding
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// The staged upload contained no bytes
    #[error("Audio file is empty or corrupted")]
    EmptyUpload,

    /// The upload could not be written to temporary storage
    #[error("Audio file could not be staged: {0}")]
    Staging(String),

    /// The primary codec rejected the file
    #[error("Audio loading failed: {0}")]
    DecodeFailure(String),

    /// The raw WAV reader rejected the file as well
    #[error("Fallback validation also failed: {0}")]
    FallbackDecodeFailure(String),

    /// The primary codec decoded the file but produced no frames
    #[error("Audio file contains no readable audio data")]
    ZeroSampleData,

    /// Duration is below the hard floor
    #[error("Audio duration ({duration:.2}s) is less than the {floor:.1}s minimum")]
    ShortDuration {
        /// Measured duration in seconds
        duration: f64,
        /// Hard floor in seconds
        floor: f64,
    },

    /// Duration is below the recommended minimum
    #[error("Audio duration ({duration:.1}s) is below recommended minimum ({recommended:.1}s)")]
    ShortDurationWarning {
        /// Measured duration in seconds
        duration: f64,
        /// Recommended minimum in seconds
        recommended: f64,
    },

    /// The secondary container probe could not open or read the file
    #[error("Secondary format validation warning: {0}")]
    SecondaryProbe(String),

    /// The secondary probe opened the file but read zero frames
    #[error("Cannot read audio frames from file")]
    InconsistentReadability,

    /// The result was produced by a fallback decoder
    #[error("Validated using fallback reader")]
    FallbackUsed,

    /// Anything not classified above (panics, timeouts, crashed workers)
    #[error("Unexpected validation error: {0}")]
    Unexpected(String),
}

impl ValidationIssue {
    /// Severity of this issue
    pub fn severity(&self) -> Severity {
        match self {
            Self::ShortDurationWarning { .. } | Self::SecondaryProbe(_) | Self::FallbackUsed => {
                Severity::Advisory
            }
            Self::EmptyUpload
            | Self::Staging(_)
            | Self::DecodeFailure(_)
            | Self::FallbackDecodeFailure(_)
            | Self::ZeroSampleData
            | Self::ShortDuration { .. }
            | Self::InconsistentReadability
            | Self::Unexpected(_) => Severity::Fatal,
        }
    }

    /// Whether this issue forces the result invalid
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
