/// Primary decoder implementation using Symphonia
use crate::error::{AudioError, Result};
use crate::strategy::{DecodeStrategy, DecodedAudio};
use std::path::Path;
use symphonia::core::codecs::{CodecParameters, Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Full-waveform decoder using Symphonia
///
/// Supports: WAV, MP3, M4A/AAC, FLAC, OGG/Vorbis
///
/// Every packet of the default track is decoded and its frames counted, so a
/// file only passes if it is readable end to end. Duration and sample rate
/// come from the decoded waveform rather than from container headers. This
/// path does not report a channel count.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }
}

/// An opened container with its default track ready to decode
pub(crate) struct OpenedTrack {
    pub(crate) format: Box<dyn FormatReader>,
    pub(crate) decoder: Box<dyn Decoder>,
    pub(crate) track_id: u32,
    pub(crate) codec_params: CodecParameters,
}

/// Open a file, probe its container and build a decoder for the default track
///
/// With `extension` set the probe is hinted; without it the container is
/// identified from content alone.
pub(crate) fn open_track(path: &Path, extension: Option<&str>) -> Result<OpenedTrack> {
    let file = std::fs::File::open(path)?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioError::Symphonia(format!("Failed to probe file: {}", e)))?;

    let format = probed.format;

    let track = format
        .default_track()
        .filter(|track| track.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AudioError::DecodeError("No audio tracks found".to_string()))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::Symphonia(format!("Failed to create decoder: {}", e)))?;

    Ok(OpenedTrack {
        format,
        decoder,
        track_id,
        codec_params,
    })
}

impl DecodeStrategy for SymphoniaDecoder {
    fn name(&self) -> &'static str {
        "symphonia"
    }

    fn decode(&self, path: &Path, format_hint: Option<&str>) -> Result<DecodedAudio> {
        let OpenedTrack {
            mut format,
            mut decoder,
            track_id,
            codec_params,
        } = open_track(path, format_hint)?;

        let mut sample_rate = codec_params.sample_rate;
        let mut frame_count: u64 = 0;
        let mut skipped_packets: u64 = 0;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(e) => {
                    return Err(AudioError::Symphonia(format!("Error reading packet: {}", e)));
                }
            };

            // Skip packets that are not for the default track
            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    frame_count += decoded.frames() as u64;
                    if sample_rate.is_none() {
                        sample_rate = Some(decoded.spec().rate);
                    }
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    // Corrupt frames inside an otherwise readable stream
                    tracing::debug!("Skipping undecodable packet: {}", e);
                    skipped_packets += 1;
                }
                Err(e) => {
                    return Err(AudioError::DecodeError(e.to_string()));
                }
            }
        }

        if frame_count == 0 {
            if skipped_packets > 0 {
                return Err(AudioError::DecodeError(format!(
                    "all {} packets failed to decode",
                    skipped_packets
                )));
            }
            return Err(AudioError::NoAudioData);
        }

        let sample_rate = sample_rate
            .filter(|&rate| rate > 0)
            .ok_or_else(|| AudioError::DecodeError("Sample rate not reported".to_string()))?;

        tracing::debug!(
            "Decoded {} frames at {} Hz ({} packets skipped)",
            frame_count,
            sample_rate,
            skipped_packets
        );

        Ok(DecodedAudio {
            frame_count,
            sample_rate,
            channels: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_nonexistent_file_returns_error() {
        let result = SymphoniaDecoder::new().decode(Path::new("/nonexistent/file.mp3"), Some("mp3"));
        assert!(matches!(result, Err(AudioError::Io(_))));
    }

    #[test]
    fn decode_garbage_returns_probe_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.wav");
        std::fs::write(&path, b"this is definitely not an audio container").unwrap();

        let result = SymphoniaDecoder::new().decode(&path, Some("wav"));
        assert!(matches!(result, Err(AudioError::Symphonia(_))));
    }
}
