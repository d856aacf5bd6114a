//! Transcription placeholder record

use serde::{Deserialize, Serialize};

/// Status of a transcription assessment
///
/// Only the placeholder status exists today. Callers must not read it as a
/// validation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum TranscriptionStatus {
    /// No transcription backend exists
    PlaceholderNotImplemented,
}

/// Speech quality metrics (all zero until a backend exists)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Speech clarity, 0.0 to 1.0
    pub clarity_score: f64,
    /// Background noise level, 0.0 to 1.0
    pub noise_level: f64,
    /// Speech-to-noise ratio in dB
    pub speech_to_noise_ratio: f64,
}

/// Transcription record returned alongside every validation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionRecord {
    /// Whether a transcript was produced
    pub transcription_available: bool,
    /// Transcript text, empty without a backend
    pub transcription_text: String,
    /// Echoes the expected-language hint, or `"unknown"`
    pub language_detected: String,
    /// Transcriber confidence, 0.0 to 1.0
    pub confidence_score: f64,
    /// Speech quality measurements
    pub quality_metrics: QualityMetrics,
    /// Assessment status
    pub validation_status: TranscriptionStatus,
    /// Language hint supplied by the caller
    pub expected_language: Option<String>,
}

impl TranscriptionRecord {
    /// The fixed placeholder record
    pub fn placeholder(expected_language: Option<&str>) -> Self {
        Self {
            transcription_available: false,
            transcription_text: String::new(),
            language_detected: expected_language.unwrap_or("unknown").to_string(),
            confidence_score: 0.0,
            quality_metrics: QualityMetrics::default(),
            validation_status: TranscriptionStatus::PlaceholderNotImplemented,
            expected_language: expected_language.map(str::to_string),
        }
    }
}
