#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Write a silent 16-bit mono PCM WAV file and return its path
pub fn write_wav(dir: &Path, name: &str, sample_rate: u32, duration_secs: f64) -> PathBuf {
    let num_frames = (f64::from(sample_rate) * duration_secs).round() as u32;
    let data_size = num_frames * 2;

    let mut bytes = Vec::with_capacity(44 + data_size as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_size).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_size.to_le_bytes());
    bytes.resize(44 + data_size as usize, 0);

    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
