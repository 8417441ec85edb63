/*
 * This source code is licensed under Creative Commons BY-NC 4.0.
 * See LICENSE in the root directory for full details.
 */

//! 18-gate and binaural signal synthesis into quantized PCM16 buffers.
//!
//! # Multi-gate synthesis
//!
//! ```text
//! out(t) = Σ_i sin(2π·f_i·t) · exp(−(t − start_i)² / (2φ²)) · w_i · γ
//!        + 0.05 · sin(2π·7.83·t)
//! f_i     = 144·(1 + (i·γ mod 1)) + 718
//! start_i = pos_i / 16569 · duration
//! w_i     = φ^(i mod 7) mod 1
//! ```
//!
//! # Binaural synthesis
//!
//! ```text
//! L(t) = sin(2π·7.83·t) · 0.5 · (1 + 0.7·sin(2π·0.1·t))
//! R(t) = sin(2π·18.6·t) · 0.5 · (1 + 0.7·sin(2π·0.1·t))
//! ```
//!
//! Both outputs are normalized by their peak absolute value and quantized with
//! `(s · 32767) as i16`.
//!
//! # Invariants
//!
//! - **PSI-SYN-001**: quantized samples never exceed ±32767.
//! - **PSI-SYN-002**: an all-zero signal skips normalization and yields
//!   silence instead of dividing by zero.
//! - **PSI-SYN-003**: the `parallel` feature splits work across samples only.
//!   Each sample sums the gates in slot order, so output is bit-identical
//!   with and without it.

use core::f64::consts::TAU;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::constants::FieldConstants;
use crate::gates::{GateTable, GATE_TABLE};

/// Full-scale value for 16-bit quantization.
pub const PCM16_FULL_SCALE: f64 = 32767.0;

/// Lowest frequency step of the gate tone ladder, Hz.
const GATE_TONE_BASE: f64 = 144.0;

// ─── AudioBuffer ────────────────────────────────────────────────────────────

/// Quantized PCM16 samples, interleaved when `channels > 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioBuffer {
    /// Interleaved samples.
    pub samples: Vec<i16>,
    /// 1 = mono, 2 = stereo.
    pub channels: u16,
    /// Samples per second per channel.
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f64 / self.sample_rate as f64
        }
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> u16 {
        self.samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
    }

    /// `true` when every sample is zero (including the empty buffer).
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }

    /// Samples of one channel, de-interleaved.
    pub fn channel(&self, index: usize) -> impl Iterator<Item = i16> + '_ {
        let step = (self.channels as usize).max(1);
        self.samples.iter().skip(index).step_by(step).copied()
    }
}

// ─── Normalization ──────────────────────────────────────────────────────────

/// Normalize by peak absolute value and quantize to PCM16 (PSI-SYN-001/002).
///
/// A zero (or non-finite) peak skips the division and returns silence.
pub fn normalize_quantize(signal: &[f64]) -> Vec<i16> {
    let peak = signal.iter().fold(0.0f64, |m, s| m.max(s.abs()));
    if peak == 0.0 || !peak.is_finite() {
        return vec![0; signal.len()];
    }
    signal
        .iter()
        .map(|s| ((s / peak) * PCM16_FULL_SCALE) as i16)
        .collect()
}

// ─── Gate voices ────────────────────────────────────────────────────────────

/// Placement, pitch and weight of one gate inside a multi-gate synthesis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateVoice {
    /// Slot in the gate table (0..18).
    pub slot: usize,
    /// Gate position in the reference sequence.
    pub position: u32,
    /// Centre of the Gaussian envelope, seconds.
    pub start_time: f64,
    /// Tone frequency, Hz.
    pub frequency: f64,
    /// `φ^(slot mod 7) mod 1`.
    pub weight: f64,
}

// ─── SignalSynthesizer ──────────────────────────────────────────────────────

/// Stateless synthesizer over a gate table.
#[derive(Clone, Debug)]
pub struct SignalSynthesizer {
    constants: FieldConstants,
    gates: GateTable,
}

impl SignalSynthesizer {
    /// Construct over the given constants and gates.
    pub fn new(constants: FieldConstants, gates: GateTable) -> Self {
        Self { constants, gates }
    }

    /// Tone frequency for a gate index: `144·(1 + (i·γ mod 1)) + fundamental`.
    ///
    /// The fractional part uses `rem_euclid`, so negative indices stay in [0, 1).
    pub fn gate_frequency(&self, gate_index: i64) -> f64 {
        let frac = (gate_index as f64 * self.constants.gamma).rem_euclid(1.0);
        GATE_TONE_BASE * (1.0 + frac) + self.constants.fundamental
    }

    /// Per-gate voices for a synthesis of `duration` seconds, in slot order.
    pub fn gate_voices(&self, duration: f64) -> Vec<GateVoice> {
        let c = &self.constants;
        self.gates
            .iter()
            .enumerate()
            .map(|(slot, gate)| GateVoice {
                slot,
                position: gate.position,
                start_time: gate.position as f64 / c.sequence_length as f64 * duration,
                frequency: self.gate_frequency(slot as i64),
                weight: c.phi.powi((slot % 7) as i32).rem_euclid(1.0),
            })
            .collect()
    }

    /// Mono 18-gate synthesis.
    pub fn synthesize_multi_gate(&self, duration: f64, sample_rate: u32) -> AudioBuffer {
        let c = &self.constants;
        let (n, step) = time_axis(duration, sample_rate);
        let voices = self.gate_voices(duration);

        for v in &voices {
            log::debug!(
                "gate {:2} | pos {:5} | freq {:.2} Hz | weight {:.4}",
                v.slot + 1,
                v.position,
                v.frequency,
                v.weight
            );
        }

        let two_var = 2.0 * c.phi * c.phi;
        let sample = |k: usize| -> f64 {
            let t = k as f64 * step;
            let mut mix = 0.0;
            for v in &voices {
                let d = t - v.start_time;
                let envelope = (-(d * d) / two_var).exp();
                mix += (TAU * v.frequency * t).sin() * envelope * v.weight * c.gamma;
            }
            mix + (TAU * c.schumann * t).sin() * c.earth_gain
        };

        let signal = render(n, sample);
        log::debug!("multi-gate synthesis: {n} samples at {sample_rate} Hz");

        AudioBuffer {
            samples: normalize_quantize(&signal),
            channels: 1,
            sample_rate,
        }
    }

    /// Interleaved stereo binaural synthesis (left: schumann, right: lunar).
    pub fn synthesize_binaural(&self, duration: f64, sample_rate: u32) -> AudioBuffer {
        let c = &self.constants;
        let (n, step) = time_axis(duration, sample_rate);

        let frame = |k: usize| -> (f64, f64) {
            let t = k as f64 * step;
            let envelope = 1.0 + c.modulation_depth * (TAU * c.modulation_rate * t).sin();
            let left = (TAU * c.schumann * t).sin() * 0.5 * envelope;
            let right = (TAU * c.lunar * t).sin() * 0.5 * envelope;
            (left, right)
        };

        let mut signal = Vec::with_capacity(2 * n);
        for (l, r) in render(n, frame) {
            signal.push(l);
            signal.push(r);
        }
        log::debug!(
            "binaural synthesis: {n} frames at {sample_rate} Hz, beat {:.2} Hz",
            c.beat_frequency()
        );

        AudioBuffer {
            samples: normalize_quantize(&signal),
            channels: 2,
            sample_rate,
        }
    }
}

impl Default for SignalSynthesizer {
    fn default() -> Self {
        Self::new(FieldConstants::default(), GATE_TABLE)
    }
}

/// Sample count `floor(duration · rate)` and step `duration / count`
/// (endpoint excluded). Non-finite or non-positive durations give no samples.
fn time_axis(duration: f64, sample_rate: u32) -> (usize, f64) {
    let total = duration * sample_rate as f64;
    if !total.is_finite() || total < 1.0 {
        return (0, 0.0);
    }
    let n = total as usize;
    (n, duration / n as f64)
}

/// Evaluate `f` for every sample index, in index order.
#[cfg(feature = "parallel")]
fn render<T: Send, F: Fn(usize) -> T + Sync + Send>(n: usize, f: F) -> Vec<T> {
    (0..n).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn render<T, F: Fn(usize) -> T>(n: usize, f: F) -> Vec<T> {
    (0..n).map(f).collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GAMMA, PHI};

    fn synth() -> SignalSynthesizer {
        SignalSynthesizer::default()
    }

    // ── gate_frequency ────────────────────────────────────────────────────

    #[test]
    fn test_gate_frequency_zero_exact() {
        assert_eq!(synth().gate_frequency(0), 862.0);
    }

    #[test]
    fn test_gate_frequency_values() {
        let s = synth();
        assert!((s.gate_frequency(1) - (144.0 * (1.0 + GAMMA) + 718.0)).abs() < 1e-9);
        // (−γ) mod 1 = 1 − γ
        assert!((s.gate_frequency(-1) - (144.0 * (2.0 - GAMMA) + 718.0)).abs() < 1e-9);
        for i in -40..40 {
            let f = s.gate_frequency(i);
            assert!((862.0..1006.0).contains(&f), "i={i} f={f}");
        }
    }

    // ── gate_voices ───────────────────────────────────────────────────────

    #[test]
    fn test_gate_voices_layout() {
        let voices = synth().gate_voices(108.0);
        assert_eq!(voices.len(), 18);
        assert_eq!(voices[0].position, 1);
        assert!((voices[17].start_time - 16179.0 / 16569.0 * 108.0).abs() < 1e-12);
        for v in &voices {
            assert!((0.0..1.0).contains(&v.weight), "slot={} w={}", v.slot, v.weight);
            if v.slot % 7 == 0 {
                assert_eq!(v.weight, 0.0, "slot {} should be silent", v.slot);
            }
        }
        assert!((voices[1].weight - (PHI - 1.0)).abs() < 1e-12);
    }

    // ── normalize_quantize ────────────────────────────────────────────────

    #[test]
    fn test_normalize_quantize_zero_signal_is_silent() {
        let q = normalize_quantize(&[0.0; 16]);
        assert_eq!(q, vec![0i16; 16]);
        assert!(normalize_quantize(&[]).is_empty());
    }

    #[test]
    fn test_normalize_quantize_peak_and_truncation() {
        let q = normalize_quantize(&[0.5, -2.0, 1.0, 0.0]);
        // 0.25·32767 = 8191.75 → 8191 (truncation toward zero)
        assert_eq!(q, vec![8191, -32767, 16383, 0]);
    }

    // ── synthesize_multi_gate ─────────────────────────────────────────────

    #[test]
    fn test_multi_gate_length_and_range() {
        let buf = synth().synthesize_multi_gate(2.0, 8000);
        assert_eq!(buf.channels, 1);
        assert_eq!(buf.samples.len(), 16_000);
        assert_eq!(buf.frames(), 16_000);
        assert!((buf.duration_secs() - 2.0).abs() < 1e-12);
        assert_eq!(buf.peak(), 32767);
        assert!(!buf.is_silent());
    }

    #[test]
    fn test_multi_gate_single_zero_sample_is_silent() {
        // one sample at t = 0: every sine is zero, so the peak guard engages
        let buf = synth().synthesize_multi_gate(1.0, 1);
        assert_eq!(buf.samples, vec![0]);
        assert!(buf.is_silent());
    }

    #[test]
    fn test_multi_gate_degenerate_durations() {
        let s = synth();
        assert!(s.synthesize_multi_gate(0.0, 44_100).samples.is_empty());
        assert!(s.synthesize_multi_gate(-3.0, 44_100).samples.is_empty());
        assert!(s.synthesize_multi_gate(f64::NAN, 44_100).samples.is_empty());
        assert!(s.synthesize_multi_gate(1.0, 0).samples.is_empty());
    }

    #[test]
    fn test_multi_gate_deterministic() {
        let s = synth();
        assert_eq!(s.synthesize_multi_gate(0.5, 4000), s.synthesize_multi_gate(0.5, 4000));
    }

    #[test]
    fn test_multi_gate_matches_sequential_sum() {
        let s = synth();
        let (duration, rate) = (0.25, 8_000);
        let buf = s.synthesize_multi_gate(duration, rate);

        let c = FieldConstants::default();
        let voices = s.gate_voices(duration);
        let (n, step) = time_axis(duration, rate);
        let two_var = 2.0 * c.phi * c.phi;
        let mut signal = Vec::with_capacity(n);
        for k in 0..n {
            let t = k as f64 * step;
            let mut mix = 0.0;
            for v in &voices {
                let d = t - v.start_time;
                mix += (TAU * v.frequency * t).sin() * (-(d * d) / two_var).exp() * v.weight * c.gamma;
            }
            signal.push(mix + (TAU * c.schumann * t).sin() * c.earth_gain);
        }
        assert_eq!(buf.samples, normalize_quantize(&signal));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_render_bit_identical() {
        let f = |k: usize| {
            let t = k as f64 * 1e-4;
            (1..=18).fold(0.0, |acc, i| acc + (TAU * 718.0 * i as f64 * t).sin() / i as f64)
        };
        let parallel = render(50_000, f);
        let sequential: Vec<f64> = (0..50_000).map(f).collect();
        assert!(parallel.iter().zip(&sequential).all(|(a, b)| a.to_bits() == b.to_bits()));
        assert_eq!(parallel.len(), sequential.len());
    }

    // ── synthesize_binaural ───────────────────────────────────────────────

    #[test]
    fn test_binaural_interleaved_stereo() {
        let buf = synth().synthesize_binaural(1.0, 4000);
        assert_eq!(buf.channels, 2);
        assert_eq!(buf.samples.len(), 8000);
        assert_eq!(buf.frames(), 4000);
        assert!(buf.peak() <= 32767);
        // first frame at t = 0 is silent on both sides
        assert_eq!(&buf.samples[..2], &[0, 0]);
        assert_eq!(buf.channel(0).count(), 4000);
        assert_eq!(buf.channel(1).count(), 4000);
    }

    #[test]
    fn test_binaural_channels_follow_their_tones() {
        let buf = synth().synthesize_binaural(1.0, 4000);
        // sign changes per channel ≈ 2·f·duration
        let crossings = |ch: usize| {
            let v: Vec<i16> = buf.channel(ch).filter(|&s| s != 0).collect();
            v.windows(2).filter(|w| (w[0] > 0) != (w[1] > 0)).count()
        };
        let left = crossings(0);
        let right = crossings(1);
        assert!((14..=17).contains(&left), "left crossings={left}");
        assert!((36..=38).contains(&right), "right crossings={right}");
    }

    #[test]
    fn test_binaural_zero_signal_guard() {
        let buf = synth().synthesize_binaural(1.0, 1);
        assert_eq!(buf.samples, vec![0, 0]);
    }
}
