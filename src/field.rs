/*
 * This source code is licensed under Creative Commons BY-NC 4.0.
 * See LICENSE in the root directory for full details.
 */

//! The Ψ-718 field evaluator and the coherence-state classifier.
//!
//! ```text
//! Ψ(t, x, g) = e^{i·718·t} · e^{−i·k·x} · ζ(½ + i·718) · γ
//!            · cos(7.83·t) · sin(18.6·t) · φ² · (pos_g / 16569) · γ
//! k = 2π / 718
//! ```
//!
//! The zeta factor is evaluated at the fixed fundamental frequency, not at
//! `t`. Its value is therefore the same for every sample and is computed once
//! in [`FieldEvaluator::new`].
//!
//! # Invariants
//!
//! - **PSI-FLD-001**: `coherence ∈ [0, 1]`.
//! - **PSI-FLD-002**: `evaluate` is deterministic; gate indices differing by a
//!   multiple of 18 produce identical samples.
//! - **PSI-FLD-003**: `phase ∈ (−π, π]`.
//! - **PSI-FLD-004**: state is a monotone step function of coherence with
//!   strict `>` comparisons.

use core::f64::consts::PI;

use num_complex::Complex64;

use crate::constants::{FieldConstants, StateThresholds};
use crate::gates::{GateTable, GATE_TABLE};
use crate::zeta::series_approximation;

// ─── QuantumState ───────────────────────────────────────────────────────────

/// Discrete state label derived from coherence.
///
/// ```text
/// coherence:  0 ── 0.4 ── 0.6 ── 0.8 ── 0.94 ── 1
///             Decoherent │ Entangled │ Superposition │ HighCoherence │ TeleportationReady
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum QuantumState {
    /// coherence ≤ 0.4.
    Decoherent,
    /// 0.4 < coherence ≤ 0.6.
    Entangled,
    /// 0.6 < coherence ≤ 0.8.
    Superposition,
    /// 0.8 < coherence ≤ 0.94.
    HighCoherence,
    /// coherence > 0.94.
    TeleportationReady,
}

impl QuantumState {
    /// All five states in ascending coherence order.
    pub const ALL: [QuantumState; 5] = [
        QuantumState::Decoherent,
        QuantumState::Entangled,
        QuantumState::Superposition,
        QuantumState::HighCoherence,
        QuantumState::TeleportationReady,
    ];

    /// Classify a coherence value against descending thresholds (PSI-FLD-004).
    ///
    /// Comparison is strict: a coherence exactly equal to a threshold lands in
    /// the lower state.
    pub fn classify(coherence: f64, th: &StateThresholds) -> QuantumState {
        if coherence > th.teleportation_ready {
            QuantumState::TeleportationReady
        } else if coherence > th.high_coherence {
            QuantumState::HighCoherence
        } else if coherence > th.superposition {
            QuantumState::Superposition
        } else if coherence > th.entangled {
            QuantumState::Entangled
        } else {
            QuantumState::Decoherent
        }
    }

    /// Upper-snake label, e.g. `"TELEPORTATION_READY"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantumState::TeleportationReady => "TELEPORTATION_READY",
            QuantumState::HighCoherence => "HIGH_COHERENCE",
            QuantumState::Superposition => "SUPERPOSITION",
            QuantumState::Entangled => "ENTANGLED",
            QuantumState::Decoherent => "DECOHERENT",
        }
    }
}

impl core::fmt::Display for QuantumState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── FieldParameters ────────────────────────────────────────────────────────

/// A point in parameter space. `gate_index` is wrapped modulo 18 on use.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldParameters {
    /// Gate index (any integer).
    pub gate_index: i64,
    /// Time coordinate.
    pub t: f64,
    /// Space coordinate.
    pub x: f64,
}

impl FieldParameters {
    /// Construct a parameter triple.
    pub const fn new(gate_index: i64, t: f64, x: f64) -> Self {
        Self { gate_index, t, x }
    }
}

// ─── WaveSample ─────────────────────────────────────────────────────────────

/// One evaluation of the field. Full precision; see [`WaveSample::rounded`]
/// for the 6-decimal presentation copy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveSample {
    /// Complex field value Ψ.
    pub amplitude: Complex64,
    /// |Ψ|.
    pub magnitude: f64,
    /// arg Ψ in (−π, π].
    pub phase: f64,
    /// Golden-ratio alignment score in [0, 1].
    pub coherence: f64,
    /// State label derived from `coherence`.
    pub state: QuantumState,
    /// Position of the gate that weighted this sample.
    pub gate_position: u32,
    /// |Ψ| · φ.
    pub harmonic: f64,
}

impl WaveSample {
    /// `true` when `coherence >= resonance_threshold`.
    pub fn is_teleportation_ready(&self, resonance_threshold: f64) -> bool {
        self.coherence >= resonance_threshold
    }

    /// Quick intention estimate without quadrature:
    /// `magnitude · (t_end − t_start) · coherence`.
    pub fn intention_estimate(&self, t_start: f64, t_end: f64) -> f64 {
        self.magnitude * (t_end - t_start) * self.coherence
    }

    /// Copy with every real output rounded to 6 decimals. `amplitude`, `state`
    /// and `gate_position` are unchanged.
    pub fn rounded(&self) -> WaveSample {
        WaveSample {
            magnitude: round6(self.magnitude),
            phase: round6(self.phase),
            coherence: round6(self.coherence),
            harmonic: round6(self.harmonic),
            ..self.clone()
        }
    }
}

/// Round to 6 decimal digits, half away from zero.
pub fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

// ─── FieldEvaluator ─────────────────────────────────────────────────────────

/// Stateless evaluator of the Ψ-718 field.
#[derive(Clone, Debug)]
pub struct FieldEvaluator {
    constants: FieldConstants,
    gates: GateTable,
    /// ζ(½ + i·fundamental), fixed for the evaluator's lifetime.
    zeta: Complex64,
}

impl FieldEvaluator {
    /// Build an evaluator. Sums the zeta series once.
    pub fn new(constants: FieldConstants, gates: GateTable) -> Self {
        let zeta = series_approximation(constants.fundamental, constants.series_terms);
        Self {
            constants,
            gates,
            zeta,
        }
    }

    /// Constants this evaluator was built with.
    pub fn constants(&self) -> &FieldConstants {
        &self.constants
    }

    /// Gate table this evaluator was built with.
    pub fn gates(&self) -> &GateTable {
        &self.gates
    }

    /// The fixed zeta factor.
    pub fn zeta_value(&self) -> Complex64 {
        self.zeta
    }

    /// Gate weight `(pos / sequence_length) · γ` for a wrapped index.
    pub fn gate_weight(&self, gate_index: i64) -> f64 {
        self.gates
            .relative_position(gate_index, self.constants.sequence_length)
            * self.constants.gamma
    }

    /// Raw complex field value Ψ(t, x, gate).
    pub fn amplitude(&self, t: f64, x: f64, gate_index: i64) -> Complex64 {
        let c = &self.constants;

        let temporal = Complex64::new(0.0, c.fundamental * t).exp();
        let spatial = Complex64::new(0.0, -c.wave_number() * x).exp();
        let modulation = (c.schumann * t).cos() * (c.lunar * t).sin();

        temporal
            * spatial
            * self.zeta
            * c.gamma
            * modulation
            * c.phi_squared
            * self.gate_weight(gate_index)
    }

    /// Evaluate the field at `(t, x, gate_index)`.
    pub fn evaluate(&self, t: f64, x: f64, gate_index: i64) -> WaveSample {
        let c = &self.constants;
        let amplitude = self.amplitude(t, x, gate_index);

        let magnitude = amplitude.norm();
        let phase = amplitude.arg();
        // atan2(−0, −0) = −π; keep the half-open range (PSI-FLD-003)
        let phase = if phase <= -PI { PI } else { phase };

        let coherence = self.coherence(magnitude);

        WaveSample {
            amplitude,
            magnitude,
            phase,
            coherence,
            state: QuantumState::classify(coherence, &c.thresholds),
            gate_position: self.gates.position(gate_index),
            harmonic: magnitude * c.phi,
        }
    }

    /// Evaluate at a parameter triple.
    pub fn evaluate_params(&self, p: &FieldParameters) -> WaveSample {
        self.evaluate(p.t, p.x, p.gate_index)
    }

    /// Scalar projection `|Ψ|·cos(arg Ψ)` used as the intention integrand.
    pub fn projection(&self, t: f64, x: f64, gate_index: i64) -> f64 {
        let s = self.evaluate(t, x, gate_index);
        s.magnitude * s.phase.cos()
    }

    /// Coherence of a magnitude:
    /// `min((1 − |m mod γ − γ| / γ) · φ, 1)`, clamped to [0, 1] (PSI-FLD-001).
    pub fn coherence(&self, magnitude: f64) -> f64 {
        let gamma = self.constants.gamma;
        let aligned = 1.0 - (magnitude.rem_euclid(gamma) - gamma).abs() / gamma;
        let c = (aligned * self.constants.phi).min(1.0);
        if c.is_nan() {
            0.0
        } else {
            c.clamp(0.0, 1.0)
        }
    }
}

impl Default for FieldEvaluator {
    fn default() -> Self {
        Self::new(FieldConstants::default(), GATE_TABLE)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
