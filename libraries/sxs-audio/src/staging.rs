//! Upload staging
//!
//! Decoders need random access to a real file, so each upload is copied into
//! a uniquely named temporary file first. The returned [`StagedFile`] owns
//! that file: it is deleted on [`StagedFile::release`] or when the handle is
//! dropped, whichever comes first.

use crate::error::{AudioError, Result};
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const STAGING_PREFIX: &str = "sxs-";

/// A staged upload on local storage
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    /// Path of the staged file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the staged file now
    ///
    /// Dropping the handle deletes it as well, but silently; this surfaces
    /// the error so callers can log it.
    pub fn release(self) -> Result<()> {
        self.file.close().map_err(AudioError::Io)
    }
}

/// Copy an upload into a fresh temporary file
///
/// The temp name ends with `_<original file name>` so the extension survives
/// for decoder hinting. Directory components of `filename` are discarded.
///
/// # Arguments
/// * `source` - Upload byte stream, read to the end
/// * `filename` - Name the uploader gave the file
/// * `dir` - Staging directory, or the system temp directory when `None`
///
/// # Errors
/// * `AudioError::Staging` if the file cannot be created or written
/// * `AudioError::EmptyFile` if the upload had no bytes
pub fn stage<R: Read>(source: &mut R, filename: &str, dir: Option<&Path>) -> Result<StagedFile> {
    let suffix = format!("_{}", upload_name(filename));

    let mut builder = tempfile::Builder::new();
    builder.prefix(STAGING_PREFIX).suffix(&suffix);
    let mut file = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(AudioError::Staging)?;

    let written = io::copy(source, &mut file).map_err(AudioError::Staging)?;
    file.flush().map_err(AudioError::Staging)?;

    let len = file
        .as_file()
        .metadata()
        .map_err(AudioError::Staging)?
        .len();

    if written == 0 || len == 0 {
        // `file` is dropped here, removing the empty temp file
        return Err(AudioError::EmptyFile);
    }

    tracing::debug!("Staged {} bytes at {}", len, file.path().display());

    Ok(StagedFile { file })
}

fn upload_name(filename: &str) -> &str {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stages_bytes_with_original_name_as_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = Cursor::new(b"RIFF....WAVE".to_vec());

        let staged = stage(&mut source, "take_01.wav", Some(dir.path())).unwrap();

        assert_eq!(std::fs::metadata(staged.path()).unwrap().len(), 12);
        let name = staged.path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("sxs-"), "{name}");
        assert!(name.ends_with("_take_01.wav"), "{name}");
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"RIFF....WAVE");
    }

    #[test]
    fn empty_upload_is_rejected_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = Cursor::new(Vec::new());

        let err = stage(&mut source, "silence.wav", Some(dir.path())).unwrap_err();

        assert!(matches!(err, AudioError::EmptyFile));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn release_deletes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let staged = stage(&mut Cursor::new(vec![1u8; 64]), "a.mp3", Some(dir.path())).unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());

        staged.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn drop_deletes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let staged = stage(&mut Cursor::new(vec![1u8; 8]), "a.ogg", Some(dir.path())).unwrap();
            staged.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn directory_components_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let staged = stage(
            &mut Cursor::new(vec![0u8; 4]),
            "../../etc/voice.flac",
            Some(dir.path()),
        )
        .unwrap();

        assert_eq!(staged.path().parent().unwrap(), dir.path());
        let name = staged.path().file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("_voice.flac"), "{name}");
    }

    #[test]
    fn missing_staging_directory_is_a_staging_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = stage(&mut Cursor::new(vec![1u8; 4]), "a.wav", Some(&missing)).unwrap_err();
        assert!(matches!(err, AudioError::Staging(_)));
    }
}
