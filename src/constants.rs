/*
 * This source code is licensed under Creative Commons BY-NC 4.0.
 * See LICENSE in the root directory for full details.
 */

//! Fixed constants of the Ψ-718 field, grouped into one immutable configuration.
//!
//! Every component takes a [`FieldConstants`] by reference instead of reading
//! module-level globals. The `pub const` values below are the defaults and are
//! what [`FieldConstants::default`] is built from.
//!
//! # Derivation
//!
//! ```text
//! φ  = (1 + √5) / 2
//! γ  = 1/φ        (= φ − 1 in exact arithmetic)
//! φ² = φ + 1
//! ```
//!
//! # Invariants
//!
//! - **PSI-CFG-001**: classification thresholds are strictly descending.
//! - **PSI-CFG-002**: constants are never mutated after construction.

// ─── Golden ratio family ────────────────────────────────────────────────────

/// φ = (1 + √5)/2.
pub const PHI: f64 = 1.618_033_988_749_895_f64;

/// γ = 1/φ ("golden key").
pub const GAMMA: f64 = 1.0 / PHI;

/// φ² = φ + 1.
pub const PHI_SQUARED: f64 = PHI + 1.0;

// ─── Frequencies ────────────────────────────────────────────────────────────

/// Fundamental frequency, Hz.
pub const FUNDAMENTAL_718: f64 = 718.0;

/// Schumann-like secondary frequency, Hz.
pub const SCHUMANN: f64 = 7.83;

/// Lunar secondary frequency, Hz.
pub const LUNAR: f64 = 18.6;

// ─── Sequence and thresholds ────────────────────────────────────────────────

/// Total length of the reference sequence the gate positions live in.
pub const MTDNA_LENGTH: u32 = 16_569;

/// Coherence at or above which a sample counts as teleportation-ready.
pub const RESONANCE_THRESHOLD: f64 = 0.94;

/// Default term count for the truncated zeta series.
pub const DEFAULT_SERIES_TERMS: usize = 5_000;

/// Default audio sample rate, Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Descending coherence thresholds for [`crate::field::QuantumState::classify`].
///
/// Comparison is strict (`>`), so a coherence exactly on a boundary falls into
/// the lower state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateThresholds {
    /// Above this: `TeleportationReady`.
    pub teleportation_ready: f64,
    /// Above this: `HighCoherence`.
    pub high_coherence: f64,
    /// Above this: `Superposition`.
    pub superposition: f64,
    /// Above this: `Entangled`. At or below: `Decoherent`.
    pub entangled: f64,
}

impl Default for StateThresholds {
    fn default() -> Self {
        Self {
            teleportation_ready: 0.94,
            high_coherence: 0.8,
            superposition: 0.6,
            entangled: 0.4,
        }
    }
}

impl StateThresholds {
    /// `true` when the four thresholds are strictly descending (PSI-CFG-001).
    pub fn is_descending(&self) -> bool {
        self.teleportation_ready > self.high_coherence
            && self.high_coherence > self.superposition
            && self.superposition > self.entangled
    }
}

// ─── FieldConstants ─────────────────────────────────────────────────────────

/// Immutable configuration shared by every component.
///
/// Build once at startup (normally with [`FieldConstants::default`]) and pass by
/// reference. Nothing in the crate mutates it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldConstants {
    /// φ.
    pub phi: f64,
    /// γ = 1/φ.
    pub gamma: f64,
    /// φ².
    pub phi_squared: f64,
    /// Fundamental frequency (temporal term, zeta argument, gate tones).
    pub fundamental: f64,
    /// First secondary frequency (cosine modulation, earth base track, left channel).
    pub schumann: f64,
    /// Second secondary frequency (sine modulation, right channel).
    pub lunar: f64,
    /// Total reference sequence length used to normalise gate positions.
    pub sequence_length: u32,
    /// Teleport-ready cutoff for [`crate::intention::IntentionVector::teleport_ready`].
    pub resonance_threshold: f64,
    /// State classification thresholds.
    pub thresholds: StateThresholds,
    /// Zeta series term count used by the field evaluator.
    pub series_terms: usize,
    /// Gain of the base sine track in the multi-gate synthesis.
    pub earth_gain: f64,
    /// Depth of the slow amplitude modulation in the binaural synthesis.
    pub modulation_depth: f64,
    /// Rate of the slow amplitude modulation, Hz.
    pub modulation_rate: f64,
}

impl FieldConstants {
    /// Construct the standard constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wave number k = 2π / fundamental.
    pub fn wave_number(&self) -> f64 {
        core::f64::consts::TAU / self.fundamental
    }

    /// Difference between the two secondary frequencies (binaural beat).
    pub fn beat_frequency(&self) -> f64 {
        self.lunar - self.schumann
    }
}

impl Default for FieldConstants {
    fn default() -> Self {
        Self {
            phi: PHI,
            gamma: GAMMA,
            phi_squared: PHI_SQUARED,
            fundamental: FUNDAMENTAL_718,
            schumann: SCHUMANN,
            lunar: LUNAR,
            sequence_length: MTDNA_LENGTH,
            resonance_threshold: RESONANCE_THRESHOLD,
            thresholds: StateThresholds::default(),
            series_terms: DEFAULT_SERIES_TERMS,
            earth_gain: 0.05,
            modulation_depth: 0.7,
            modulation_rate: 0.1,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
