//! SxS Audio Validation
//!
//! Decides whether an uploaded recording is a usable audio asset: not
//! corrupt, decodable, and long enough to be meaningful.
//!
//! This crate provides:
//! - Upload staging into self-deleting temporary files
//! - Primary full-waveform decoding via Symphonia (WAV, MP3, M4A, FLAC, OGG, AAC)
//! - A secondary container probe that cross-checks readability
//! - A raw WAV header fallback via hound when the primary decoder fails
//! - A pure two-tier duration policy (hard floor / recommended minimum)
//! - Concurrent batch validation on a bounded worker pool
//!
//! # Example: Validating an Upload
//!
//! ```rust,no_run
//! use sxs_audio::AudioValidator;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("/uploads/gemini_take.m4a")?;
//! let result = AudioValidator::new().validate_bytes(&bytes, "gemini_take.m4a");
//!
//! println!("valid: {} ({:.1}s, {} Hz)", result.is_valid, result.duration, result.sample_rate);
//! for warning in &result.warnings {
//!     println!("warning: {}", warning);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Validating a Batch
//!
//! ```rust,no_run
//! use sxs_audio::{AudioValidator, BatchValidator, UploadedAudio};
//! use std::time::Duration;
//!
//! # async fn example(uploads: Vec<UploadedAudio>) {
//! let batch = BatchValidator::new(AudioValidator::new())
//!     .with_max_workers(4)
//!     .with_file_timeout(Duration::from_secs(30));
//!
//! let results = batch.validate_all(uploads).await;
//! # }
//! ```

mod batch;
mod decoder;
mod error;
mod fallback;
mod policy;
mod probe;
pub mod staging;
mod strategy;
mod validator;

pub use batch::{BatchValidator, UploadedAudio, MAX_WORKERS};
pub use decoder::SymphoniaDecoder;
pub use error::{AudioError, Result};
pub use fallback::WavHeaderDecoder;
pub use policy::{DurationPolicy, DurationVerdict};
pub use probe::{FormatProbe, ProbeFailure, ProbeReport, SymphoniaFormatProbe};
pub use strategy::{DecodeChain, DecodeStrategy, DecodedAudio};
pub use validator::{AudioValidator, AudioValidatorBuilder};
