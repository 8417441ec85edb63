//! RIFF/WAVE encoding of [`AudioBuffer`]s.
//!
//! # Layout (little-endian)
//!
//! ```text
//! Header (44 bytes):
//!   [0..4]   "RIFF"
//!   [4..8]   u32  36 + data_len
//!   [8..12]  "WAVE"
//!   [12..16] "fmt "
//!   [16..20] u32  16            (fmt chunk size)
//!   [20..22] u16  1             (PCM)
//!   [22..24] u16  channels
//!   [24..28] u32  sample_rate
//!   [28..32] u32  byte_rate = sample_rate · channels · 2
//!   [32..34] u16  block_align = channels · 2
//!   [34..36] u16  16            (bits per sample)
//!   [36..40] "data"
//!   [40..44] u32  data_len = samples · 2
//! Data: i16 samples, interleaved by channel
//! ```
//!
//! Encoding happens fully in memory; [`write_wav_file`] then performs a single
//! write per artifact.

use std::io::Write;
use std::path::Path;

use crate::error::{PsiError, Result};
use crate::synth::AudioBuffer;

/// Size of the canonical PCM header.
pub const WAV_HEADER_LEN: usize = 44;

const BITS_PER_SAMPLE: u16 = 16;
const FORMAT_PCM: u16 = 1;

fn validate(buf: &AudioBuffer) -> Result<u32> {
    if buf.channels == 0 {
        return Err(PsiError::InvalidAudio { reason: "channel count is zero" });
    }
    if buf.sample_rate == 0 {
        return Err(PsiError::InvalidAudio { reason: "sample rate is zero" });
    }
    if buf.samples.len() % buf.channels as usize != 0 {
        return Err(PsiError::InvalidAudio { reason: "sample count is not a whole number of frames" });
    }
    let data_len = buf
        .samples
        .len()
        .checked_mul(2)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n <= u32::MAX - 36)
        .ok_or(PsiError::InvalidAudio { reason: "data exceeds the 4 GiB RIFF limit" })?;
    Ok(data_len)
}

/// Encode `buf` as a WAV stream into `w`.
pub fn write_wav<W: Write>(buf: &AudioBuffer, mut w: W) -> Result<()> {
    let data_len = validate(buf)?;
    let block_align = buf.channels * (BITS_PER_SAMPLE / 8);
    let byte_rate = buf
        .sample_rate
        .checked_mul(block_align as u32)
        .ok_or(PsiError::InvalidAudio { reason: "byte rate overflows u32" })?;

    w.write_all(b"RIFF")?;
    w.write_all(&(36 + data_len).to_le_bytes())?;
    w.write_all(b"WAVE")?;
    w.write_all(b"fmt ")?;
    w.write_all(&16u32.to_le_bytes())?;
    w.write_all(&FORMAT_PCM.to_le_bytes())?;
    w.write_all(&buf.channels.to_le_bytes())?;
    w.write_all(&buf.sample_rate.to_le_bytes())?;
    w.write_all(&byte_rate.to_le_bytes())?;
    w.write_all(&block_align.to_le_bytes())?;
    w.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;
    w.write_all(b"data")?;
    w.write_all(&data_len.to_le_bytes())?;

    let mut data = Vec::with_capacity(data_len as usize);
    for s in &buf.samples {
        data.extend_from_slice(&s.to_le_bytes());
    }
    w.write_all(&data)?;
    Ok(())
}

impl AudioBuffer {
    /// Encode as an in-memory WAV file.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(WAV_HEADER_LEN + self.samples.len() * 2);
        write_wav(self, &mut out)?;
        Ok(out)
    }
}

/// Encode `buf` and write it to `path` in one operation.
pub fn write_wav_file<P: AsRef<Path>>(buf: &AudioBuffer, path: P) -> Result<()> {
    let bytes = buf.to_wav_bytes()?;
    std::fs::write(path, bytes)?;
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(b: &[u8], i: usize) -> u16 {
        u16::from_le_bytes([b[i], b[i + 1]])
    }

    fn u32_at(b: &[u8], i: usize) -> u32 {
        u32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]])
    }

    #[test]
    fn test_mono_header_fields() {
        let buf = AudioBuffer { samples: vec![0, 1, -1, 32767], channels: 1, sample_rate: 44_100 };
        let b = buf.to_wav_bytes().unwrap();

        assert_eq!(b.len(), WAV_HEADER_LEN + 8);
        assert_eq!(&b[0..4], b"RIFF");
        assert_eq!(u32_at(&b, 4), 36 + 8);
        assert_eq!(&b[8..12], b"WAVE");
        assert_eq!(&b[12..16], b"fmt ");
        assert_eq!(u32_at(&b, 16), 16);
        assert_eq!(u16_at(&b, 20), 1);
        assert_eq!(u16_at(&b, 22), 1);
        assert_eq!(u32_at(&b, 24), 44_100);
        assert_eq!(u32_at(&b, 28), 88_200);
        assert_eq!(u16_at(&b, 32), 2);
        assert_eq!(u16_at(&b, 34), 16);
        assert_eq!(&b[36..40], b"data");
        assert_eq!(u32_at(&b, 40), 8);
    }

    #[test]
    fn test_samples_little_endian() {
        let buf = AudioBuffer { samples: vec![1, -2, 0x1234, -32767], channels: 2, sample_rate: 8000 };
        let b = buf.to_wav_bytes().unwrap();
        assert_eq!(u16_at(&b, 22), 2);
        assert_eq!(u32_at(&b, 28), 32_000);
        assert_eq!(u16_at(&b, 32), 4);
        assert_eq!(&b[44..46], &[0x01, 0x00]);
        assert_eq!(&b[46..48], &[0xFE, 0xFF]);
        assert_eq!(&b[48..50], &[0x34, 0x12]);
        assert_eq!(i16::from_le_bytes([b[50], b[51]]), -32767);
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        let buf = AudioBuffer { samples: vec![], channels: 1, sample_rate: 44_100 };
        let b = buf.to_wav_bytes().unwrap();
        assert_eq!(b.len(), WAV_HEADER_LEN);
        assert_eq!(u32_at(&b, 40), 0);
    }

    #[test]
    fn test_invalid_buffers_rejected() {
        let no_channels = AudioBuffer { samples: vec![0], channels: 0, sample_rate: 8000 };
        assert!(matches!(no_channels.to_wav_bytes(), Err(PsiError::InvalidAudio { .. })));

        let no_rate = AudioBuffer { samples: vec![0], channels: 1, sample_rate: 0 };
        assert!(matches!(no_rate.to_wav_bytes(), Err(PsiError::InvalidAudio { .. })));

        let ragged = AudioBuffer { samples: vec![0, 0, 0], channels: 2, sample_rate: 8000 };
        assert!(matches!(ragged.to_wav_bytes(), Err(PsiError::InvalidAudio { .. })));
    }

    #[test]
    fn test_write_wav_to_file() {
        let path = std::env::temp_dir().join(format!("psi_field_wav_{}.wav", std::process::id()));
        let buf = AudioBuffer { samples: vec![5; 10], channels: 1, sample_rate: 1000 };
        write_wav_file(&buf, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(bytes, buf.to_wav_bytes().unwrap());
    }
}
