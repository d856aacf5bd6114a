/// Ordered decode strategies
use crate::decoder::SymphoniaDecoder;
use crate::error::Result;
use crate::fallback::WavHeaderDecoder;
use std::path::Path;

/// What a successful decode path knows about a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedAudio {
    /// Frames per channel
    pub frame_count: u64,
    /// Sample rate in Hz (never zero)
    pub sample_rate: u32,
    /// Channel count, if this path reports one
    pub channels: Option<u16>,
}

impl DecodedAudio {
    /// Duration in seconds: `frame_count / sample_rate`
    pub fn duration_secs(&self) -> f64 {
        self.frame_count as f64 / self.sample_rate as f64
    }
}

/// A way of turning a staged file into [`DecodedAudio`]
///
/// Implementers must not panic on malformed input where they can avoid it;
/// the validator still contains panics, but reports them as unexpected.
pub trait DecodeStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Decode the file at `path`
    ///
    /// # Arguments
    /// * `path` - Staged file
    /// * `format_hint` - Declared extension without the dot, if any
    ///
    /// # Errors
    /// Returns `AudioError::NoAudioData` if decoding succeeded but produced no
    /// frames, and any other variant for a rejected file.
    fn decode(&self, path: &Path, format_hint: Option<&str>) -> Result<DecodedAudio>;
}

/// Decode strategies in the order they are tried
///
/// The first strategy is authoritative: its success is cross-checked by the
/// secondary probe. Every later strategy is a fallback whose success is
/// flagged in the result's warnings.
pub struct DecodeChain {
    strategies: Vec<Box<dyn DecodeStrategy>>,
}

impl DecodeChain {
    /// Create a chain with only a primary strategy
    pub fn new(primary: Box<dyn DecodeStrategy>) -> Self {
        Self {
            strategies: vec![primary],
        }
    }

    /// Append a fallback strategy
    #[must_use]
    pub fn with_fallback(mut self, fallback: Box<dyn DecodeStrategy>) -> Self {
        self.strategies.push(fallback);
        self
    }

    /// Symphonia full decode, then raw WAV header parsing
    pub fn standard() -> Self {
        Self::new(Box::new(SymphoniaDecoder::new())).with_fallback(Box::new(WavHeaderDecoder::new()))
    }

    /// Strategies in order; index 0 is the primary
    pub fn iter(&self) -> impl Iterator<Item = &dyn DecodeStrategy> {
        self.strategies.iter().map(|s| s.as_ref())
    }

    /// Number of strategies (at least one)
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Always false; a chain has a primary strategy
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Names of all strategies, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|s| s.name()).collect()
    }
}

impl Default for DecodeChain {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_frames_over_rate() {
        let audio = DecodedAudio {
            frame_count: 5_292_000,
            sample_rate: 44_100,
            channels: Some(1),
        };
        assert_eq!(audio.duration_secs(), 120.0);

        let half = DecodedAudio {
            frame_count: 24_000,
            sample_rate: 48_000,
            channels: None,
        };
        assert_eq!(half.duration_secs(), 0.5);
    }

    #[test]
    fn standard_chain_tries_symphonia_first() {
        let chain = DecodeChain::standard();
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
        assert_eq!(chain.names(), vec!["symphonia", "wav-header"]);
    }
}
