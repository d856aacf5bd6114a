//! Secondary container probe
//!
//! After the primary decoder accepts a file, a second, independently opened
//! reader checks that the container declares a channel count and that a
//! small block of frames can actually be read. The probe identifies the
//! container from content only, without the extension hint the primary
//! decoder used.

use crate::decoder::{open_track, OpenedTrack};
use crate::error::AudioError;
use std::path::Path;
use symphonia::core::errors::Error as SymphoniaError;
use thiserror::Error;

/// What the secondary probe observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    /// Channel count declared by the container
    pub channels: u16,
    /// Frames read in the test block (0 means the file is not readable)
    pub frames_read: usize,
}

/// A failed probe, with the channel count if it was read before the failure
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ProbeFailure {
    /// Channel count the container declared, if the probe got that far
    pub channels: Option<u16>,
    /// What went wrong
    #[source]
    pub error: AudioError,
}

impl ProbeFailure {
    /// Failure after the container declared `channels`
    pub fn after_channels(channels: u16, error: AudioError) -> Self {
        Self {
            channels: Some(channels),
            error,
        }
    }
}

impl From<AudioError> for ProbeFailure {
    fn from(error: AudioError) -> Self {
        Self {
            channels: None,
            error,
        }
    }
}

/// Best-effort readability cross-check
pub trait FormatProbe: Send + Sync {
    /// Probe the staged file
    ///
    /// # Errors
    /// Returns a [`ProbeFailure`] if the container cannot be opened, declares
    /// no channel count, or the test read fails. A successful open whose test
    /// read finds no frames is `Ok` with `frames_read == 0`.
    fn probe(&self, path: &Path) -> Result<ProbeReport, ProbeFailure>;
}

/// Container probe built on a fresh Symphonia format reader
#[derive(Debug, Clone, Copy)]
pub struct SymphoniaFormatProbe {
    block_frames: usize,
}

impl SymphoniaFormatProbe {
    /// Create a probe reading `PROBE_BLOCK_FRAMES` frames
    pub fn new() -> Self {
        Self {
            block_frames: sxs_core::limits::PROBE_BLOCK_FRAMES,
        }
    }

    /// Create a probe reading a custom number of frames
    pub fn with_block_frames(block_frames: usize) -> Self {
        Self {
            block_frames: block_frames.max(1),
        }
    }
}

impl Default for SymphoniaFormatProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatProbe for SymphoniaFormatProbe {
    fn probe(&self, path: &Path) -> Result<ProbeReport, ProbeFailure> {
        let OpenedTrack {
            mut format,
            mut decoder,
            track_id,
            codec_params,
        } = open_track(path, None)?;

        let channels = codec_params
            .channels
            .map(|c| c.count() as u16)
            .ok_or_else(|| {
                AudioError::UnsupportedFormat("container does not declare a channel count".into())
            })?;

        let mut frames_read = 0usize;
        while frames_read < self.block_frames {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(ProbeFailure::after_channels(
                        channels,
                        AudioError::Symphonia(format!("Error reading packet: {}", e)),
                    ));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = decoder.decode(&packet).map_err(|e| {
                ProbeFailure::after_channels(channels, AudioError::DecodeError(e.to_string()))
            })?;
            frames_read += decoded.frames();
        }

        tracing::debug!(
            "Probe read {} frames, {} channels declared",
            frames_read,
            channels
        );

        Ok(ProbeReport {
            channels,
            frames_read: frames_read.min(self.block_frames),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_size_is_at_least_one_frame() {
        let probe = SymphoniaFormatProbe::with_block_frames(0);
        assert_eq!(probe.block_frames, 1);
        assert_eq!(
            SymphoniaFormatProbe::default().block_frames,
            sxs_core::limits::PROBE_BLOCK_FRAMES
        );
    }

    #[test]
    fn probe_of_missing_file_fails_without_channels() {
        let failure = SymphoniaFormatProbe::new()
            .probe(Path::new("/nonexistent/take.wav"))
            .unwrap_err();
        assert_eq!(failure.channels, None);
        assert!(matches!(failure.error, AudioError::Io(_)));
    }

    #[test]
    fn failure_displays_underlying_error() {
        let failure =
            ProbeFailure::after_channels(2, AudioError::DecodeError("invalid step index".into()));
        assert_eq!(failure.channels, Some(2));
        assert_eq!(failure.to_string(), "Decode error: invalid step index");
    }
}
