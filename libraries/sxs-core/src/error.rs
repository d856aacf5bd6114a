//! Core error types for SxS audio validation

use thiserror::Error;

/// Result type alias using `SxsError`
pub type Result<T> = std::result::Result<T, SxsError>;

/// Core error type
///
/// Validation problems with an uploaded file are never reported through this
/// type; they are recorded as `ValidationIssue` entries on the result. This
/// covers failures of the surrounding plumbing.
#[derive(Error, Debug)]
pub enum SxsError {
    /// A capability (upload, submission, transcription) failed
    #[error("Capability error: {0}")]
    Capability(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl SxsError {
    /// Create a capability error
    pub fn capability(msg: impl Into<String>) -> Self {
        Self::Capability(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_errors_name_the_failure() {
        assert_eq!(
            SxsError::capability("offline").to_string(),
            "Capability error: offline"
        );
    }

    #[test]
    fn io_errors_convert_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SxsError = io.into();
        assert_eq!(err.to_string(), "missing");
    }
}
