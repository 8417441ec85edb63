//! # psi-field
//!
//! The Ψ-718 field: a deterministic complex-valued field over time, space and
//! 18 gate positions, with an integrated "Vector of Intention" and a signal
//! synthesizer that renders the gates as PCM audio.
//!
//! ---
//!
//! ## The field
//!
//! ```text
//! Ψ(t, x, g) = e^{i·718·t} · e^{−i·(2π/718)·x} · ζ(½ + 718i) · γ
//!            · cos(7.83·t) · sin(18.6·t) · φ² · (pos(g) / 16569) · γ
//! coherence  = min((1 − |(|Ψ| mod γ) − γ| / γ) · φ, 1)
//! VI         = |∫ |Ψ|·cos(arg Ψ) dt| · φ
//! ```
//!
//! The zeta factor does not depend on `t`, `x` or the gate, so it is computed
//! once per [`FieldEvaluator`] and reused by every evaluation and quadrature
//! node.
//!
//! ## The pipeline
//!
//! ```text
//! reference / text → VerseDecoder → (gate, t, x) → FieldEvaluator → WaveSample
//!                                                        ↓
//!                                             IntentionIntegrator → IntentionVector
//!                                                        ↓
//!                                     render_report / ExportDocument
//!
//! GateTable → SignalSynthesizer → AudioBuffer → write_wav
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`constants`] | [`FieldConstants`], [`StateThresholds`] | Immutable configuration, passed explicitly |
//! | [`gates`] | [`GateTable`], [`Gate`] | 18 positions with labels, signed indices wrap modulo 18 |
//! | [`zeta`] | — | Truncated Dirichlet series and the Riemann–Siegel phase approximation |
//! | [`field`] | [`FieldEvaluator`], [`WaveSample`], [`QuantumState`] | Ψ evaluation, coherence, state classification |
//! | [`quadrature`] | [`QuadratureConfig`], [`QuadratureResult`] | Globally adaptive Gauss–Kronrod 10/21 with ε-extrapolation |
//! | [`intention`] | [`IntentionIntegrator`], [`IntentionVector`] | Vector of Intention over a time interval |
//! | [`synth`] | [`SignalSynthesizer`], [`AudioBuffer`] | 18-gate symphony and binaural activation |
//! | [`wav`] | — | RIFF/WAVE PCM16 encoding |
//! | [`decoder`] | [`VerseDecoder`], [`DecodedVerse`] | Reference table and text → `(t, x)` encoding |
//! | [`report`] | — | Plain-text report of a decoded verse |
//! | [`geometry`] | — | Pentagram, double helix and unification vector point sets |
//! | `export` | `ExportDocument` | JSON document of a full run (requires `serde` feature) |
//! | `ffi` | — | Python bindings (requires `python-ffi` feature) |
//!
//! ## Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `serde` | `Serialize`/`Deserialize` on result types, the `export` module |
//! | `parallel` | rayon-parallel per-sample synthesis |
//! | `python-ffi` | PyO3 module `psi_field` |
//! | `cli` | the `unify` binary and `ExportDocument::to_json_pretty` |
//!
//! ## Errors
//!
//! Evaluation, integration and synthesis are total: out-of-range gate indices
//! wrap, empty text decodes to fixed defaults, silent signals stay silent and a
//! non-converged integral still returns its best estimate. Only encoding and
//! persistence return [`PsiError`].
//!
//! ## License
//!
//! Creative Commons Attribution-NonCommercial 4.0 International.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod constants;
pub mod gates;
pub mod zeta;
pub mod field;
pub mod quadrature;
pub mod intention;
pub mod synth;
pub mod wav;
pub mod decoder;
pub mod report;
pub mod geometry;
pub mod error;
#[cfg(feature = "serde")]
pub mod export;

#[cfg(feature = "python-ffi")]
pub mod ffi;

// ─── Re-exports ─────────────────────────────────────────────────────────────

pub use constants::{FieldConstants, StateThresholds};
pub use decoder::{DecodedVerse, VerseDecoder};
pub use error::{PsiError, Result};
pub use field::{FieldEvaluator, FieldParameters, QuantumState, WaveSample};
pub use gates::{Gate, GateTable, GATE_TABLE};
pub use intention::{IntentionIntegrator, IntentionVector};
pub use quadrature::{QuadratureConfig, QuadratureResult};
pub use synth::{AudioBuffer, SignalSynthesizer};
