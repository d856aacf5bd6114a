//! Validation constants
//!
//! The supported extension list is an informational upload filter only; the
//! decoders decide what is actually readable.

use std::path::Path;

/// Extensions offered to uploaders, lower-cased with a leading dot
pub const SUPPORTED_EXTENSIONS: [&str; 6] = [".wav", ".mp3", ".m4a", ".flac", ".ogg", ".aac"];

/// Files shorter than this are unconditionally invalid (seconds)
pub const HARD_FLOOR_SECS: f64 = 1.0;

/// Files shorter than this are valid but flagged (seconds)
pub const RECOMMENDED_MIN_SECS: f64 = 60.0;

/// Frames the secondary probe reads to confirm readability
pub const PROBE_BLOCK_FRAMES: usize = 1024;

/// Declared format of an upload: its extension, lower-cased, with a leading dot
///
/// Returns an empty string when the name has no extension. The content is
/// never inspected.
pub fn declared_format(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// Check whether a filename carries one of the advertised extensions
pub fn is_supported_extension(filename: &str) -> bool {
    let format = declared_format(filename);
    SUPPORTED_EXTENSIONS.contains(&format.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_format_lowercases_extension() {
        assert_eq!(declared_format("Take 1.WAV"), ".wav");
        assert_eq!(declared_format("voice.m4a"), ".m4a");
        assert_eq!(declared_format("archive.tar.FLAC"), ".flac");
    }

    #[test]
    fn declared_format_is_empty_without_extension() {
        assert_eq!(declared_format("recording"), "");
        assert_eq!(declared_format(""), "");
    }

    #[test]
    fn supported_extensions_match_upload_filter() {
        for name in ["a.wav", "a.MP3", "a.m4a", "a.flac", "a.ogg", "a.aac"] {
            assert!(is_supported_extension(name), "{name}");
        }
        assert!(!is_supported_extension("a.opus"));
        assert!(!is_supported_extension("a.txt"));
        assert!(!is_supported_extension("noext"));
    }
}
