/// Fallback decoder for raw WAV containers
use crate::error::{AudioError, Result};
use crate::strategy::{DecodeStrategy, DecodedAudio};
use std::path::Path;

/// Reads frame count, sample rate and channel count from a RIFF WAVE header
///
/// Nothing is decoded or transcoded; only the header is parsed. This rescues
/// well-formed WAV files the primary decoder rejected for unrelated reasons.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavHeaderDecoder;

impl WavHeaderDecoder {
    /// Create a new fallback decoder
    pub fn new() -> Self {
        Self
    }
}

impl DecodeStrategy for WavHeaderDecoder {
    fn name(&self) -> &'static str {
        "wav-header"
    }

    fn decode(&self, path: &Path, _format_hint: Option<&str>) -> Result<DecodedAudio> {
        let reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        if spec.sample_rate == 0 {
            return Err(AudioError::Wav("header declares a sample rate of 0 Hz".into()));
        }

        // `duration` is the frame count per channel
        let frame_count = u64::from(reader.duration());

        tracing::debug!(
            "WAV header: {} frames, {} Hz, {} channels, {} bits",
            frame_count,
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample
        );

        Ok(DecodedAudio {
            frame_count,
            sample_rate: spec.sample_rate,
            channels: Some(spec.channels),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, sample_rate: u32, channels: u16, frames: u32) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames * u32::from(channels) {
            writer.write_sample((i % 100) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn reads_header_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(&path, 22_050, 2, 44_100);

        let audio = WavHeaderDecoder::new().decode(&path, Some("wav")).unwrap();

        assert_eq!(audio.frame_count, 44_100);
        assert_eq!(audio.sample_rate, 22_050);
        assert_eq!(audio.channels, Some(2));
        assert_eq!(audio.duration_secs(), 2.0);
    }

    #[test]
    fn rejects_non_riff_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.wav");
        std::fs::write(&path, b"ID3\x04\x00\x00\x00\x00\x00\x00not a wave").unwrap();

        let err = WavHeaderDecoder::new().decode(&path, Some("wav")).unwrap_err();
        assert!(matches!(err, AudioError::Wav(_)), "{err}");
    }
}
