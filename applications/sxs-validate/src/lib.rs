//! SxS Validate - command-line front end for the audio validation pipeline
//!
//! Reads recordings from disk, validates them concurrently with
//! [`sxs_audio::BatchValidator`] and prints a JSON [`report::ValidationReport`].

pub mod commands;
pub mod config;
pub mod error;
pub mod report;

pub use config::ValidatorConfig;
pub use error::{CliError, Result};
pub use report::{ReportSummary, ValidationReport};
