//! Synthesis and WAV encoding integration tests.
//!
//! Durations are kept short; the full 108 s / 60 s renders belong to the
//! `unify` binary.

use psi_field::constants::DEFAULT_SAMPLE_RATE;
use psi_field::synth::{AudioBuffer, SignalSynthesizer};
use psi_field::wav::WAV_HEADER_LEN;

// ─── helpers ─────────────────────────────────────────────────────────────────

fn u32_at(b: &[u8], i: usize) -> u32 {
    u32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]])
}

fn decode_pcm(b: &[u8]) -> Vec<i16> {
    b[WAV_HEADER_LEN..]
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[test]
fn test_symphony_normalized_to_full_scale() {
    let buf = SignalSynthesizer::default().synthesize_multi_gate(0.25, DEFAULT_SAMPLE_RATE);
    assert_eq!(buf.channels, 1);
    assert_eq!(buf.frames(), 11_025);
    assert!(buf.peak() <= 32767);
    assert!(buf.peak() >= 32766, "peak {} should reach full scale", buf.peak());
}

#[test]
fn test_binaural_channels_differ() {
    let buf = SignalSynthesizer::default().synthesize_binaural(0.5, 8_000);
    assert_eq!(buf.channels, 2);
    assert_eq!(buf.frames(), 4_000);
    assert_eq!(buf.samples.len(), 8_000);

    let left: Vec<i16> = buf.channel(0).collect();
    let right: Vec<i16> = buf.channel(1).collect();
    assert_eq!(left.len(), right.len());
    assert_eq!(left[0], 0);
    assert_eq!(right[0], 0);
    assert_ne!(left, right);
}

#[test]
fn test_wav_bytes_carry_the_samples() {
    let buf = SignalSynthesizer::default().synthesize_binaural(0.1, 8_000);
    let bytes = buf.to_wav_bytes().unwrap();

    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(u32_at(&bytes, 24), 8_000);
    assert_eq!(u32_at(&bytes, 40) as usize, buf.samples.len() * 2);
    assert_eq!(decode_pcm(&bytes), buf.samples);
}

#[test]
fn test_zero_duration_yields_empty_valid_wav() {
    let buf: AudioBuffer = SignalSynthesizer::default().synthesize_multi_gate(0.0, DEFAULT_SAMPLE_RATE);
    assert!(buf.samples.is_empty());
    assert!(buf.is_silent());
    let bytes = buf.to_wav_bytes().unwrap();
    assert_eq!(bytes.len(), WAV_HEADER_LEN);
}
