/// Audio-specific errors
use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio error types
///
/// These describe why a single stage failed. The validator converts them into
/// `ValidationIssue` entries; they never escape `AudioValidator::validate`.
#[derive(Error, Debug)]
pub enum AudioError {
    /// Upload could not be written to temporary storage
    #[error("Staging failed: {0}")]
    Staging(#[source] std::io::Error),

    /// Upload staged to a zero-byte file
    #[error("Staged file is empty")]
    EmptyFile,

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Decoder ran to completion without producing a single frame
    #[error("No audio frames decoded")]
    NoAudioData,

    /// WAV container error
    #[error("WAV error: {0}")]
    Wav(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Symphonia error
    #[error("Symphonia error: {0}")]
    Symphonia(String),
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => AudioError::Io(e),
            other => AudioError::Wav(other.to_string()),
        }
    }
}
