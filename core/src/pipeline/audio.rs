use crate::prelude::DecodeError;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Stream parameters shown once a file has been decoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioInfo {
    pub sample_rate: u32,
    pub duration_secs: f64,
    pub channels: u16,
    pub byte_size: u64,
}

impl AudioInfo {
    /// Canned description shown for the bundled samples.
    pub const SAMPLE: AudioInfo = AudioInfo {
        sample_rate: 16_000,
        duration_secs: 0.1,
        channels: 1,
        byte_size: 3_277,
    };

    pub fn sample_rate_label(&self) -> String {
        format!("{} Hz", self.sample_rate)
    }

    pub fn duration_label(&self) -> String {
        format!("{:.2} s", self.duration_secs)
    }

    pub fn size_label(&self) -> String {
        format_file_size(self.byte_size)
    }
}

pub trait AudioDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AudioInfo, DecodeError>;
}

/// RIFF/WAVE decoder backed by `hound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

impl AudioDecoder for WavDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AudioInfo, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();
        if spec.sample_rate == 0 || spec.channels == 0 {
            return Err(DecodeError::Invalid(format!(
                "{} Hz, {} channels",
                spec.sample_rate, spec.channels
            )));
        }
        Ok(AudioInfo {
            sample_rate: spec.sample_rate,
            duration_secs: reader.duration() as f64 / spec.sample_rate as f64,
            channels: spec.channels,
            byte_size: bytes.len() as u64,
        })
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size in base 1024, two decimals with trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(rate: u32, channels: u16, frames: usize) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..frames * channels as usize {
                writer.write_sample((i % 128) as i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn decodes_wav_header() {
        let bytes = wav_bytes(16_000, 1, 8_000);
        let info = WavDecoder.decode(&bytes).unwrap();
        assert_eq!(info.sample_rate, 16_000);
        assert_eq!(info.channels, 1);
        assert!((info.duration_secs - 0.5).abs() < 1e-9);
        assert_eq!(info.byte_size, bytes.len() as u64);
        assert_eq!(info.duration_label(), "0.50 s");
    }

    #[test]
    fn stereo_duration_counts_frames() {
        let info = WavDecoder.decode(&wav_bytes(8_000, 2, 8_000)).unwrap();
        assert_eq!(info.channels, 2);
        assert!((info.duration_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(WavDecoder.decode(&[]), Err(DecodeError::Empty)));
        assert!(matches!(
            WavDecoder.decode(b"definitely not a wave file"),
            Err(DecodeError::Format(_))
        ));
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(3_277), "3.2 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(AudioInfo::SAMPLE.sample_rate_label(), "16000 Hz");
    }
}
