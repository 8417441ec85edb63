//! Python FFI bindings via PyO3.
//!
//! Exposes field evaluation, intention integration, gate frequencies and verse
//! decoding to Python with the default constants and gate table. For custom
//! constants use the Rust API directly.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from psi_field import FieldEvaluator, VerseDecoder, gate_frequency
//!
//! field = FieldEvaluator()
//! psi = field.evaluate(1.618, 443.724, 1)
//! print(psi.magnitude, psi.state)
//! vi = field.integrate(0.0, 1.618, 443.724, 1)
//! print(vi.magnitude, vi.teleport_ready)
//!
//! verse = VerseDecoder().decode("Genesis 1:1", "Na początku stworzył Bóg niebo i ziemię.")
//! print(verse.report())
//! print(gate_frequency(0))                # 862.0
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::decoder::{DecodedVerse, VerseDecoder};
use crate::field::{FieldEvaluator, WaveSample};
use crate::intention::{IntentionIntegrator, IntentionVector};
use crate::report::render_report;
use crate::synth::SignalSynthesizer;

fn finite(name: &str, v: f64) -> PyResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PyValueError::new_err(format!("{name} must be finite, got {v}")))
    }
}

// ── WaveSample ───────────────────────────────────────────────────────────────

/// One evaluation of Ψ(t, x, gate).
#[pyclass(name = "WaveSample")]
#[derive(Clone)]
pub struct PyWaveSample {
    inner: WaveSample,
}

#[pymethods]
impl PyWaveSample {
    /// Complex amplitude as `(re, im)`.
    #[getter]
    pub fn amplitude(&self) -> (f64, f64) {
        (self.inner.amplitude.re, self.inner.amplitude.im)
    }
    /// |Ψ|.
    #[getter]
    pub fn magnitude(&self) -> f64 {
        self.inner.magnitude
    }
    /// arg Ψ in (−π, π].
    #[getter]
    pub fn phase(&self) -> f64 {
        self.inner.phase
    }
    /// Coherence in [0, 1].
    #[getter]
    pub fn coherence(&self) -> f64 {
        self.inner.coherence
    }
    /// State label, e.g. `"HIGH_COHERENCE"`.
    #[getter]
    pub fn state(&self) -> &'static str {
        self.inner.state.as_str()
    }
    /// Gate position in the mtDNA sequence.
    #[getter]
    pub fn gate_position(&self) -> u32 {
        self.inner.gate_position
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "WaveSample(magnitude={:.6}, phase={:.6}, coherence={:.4}, state={})",
            self.inner.magnitude, self.inner.phase, self.inner.coherence, self.inner.state
        )
    }
}

// ── IntentionVector ──────────────────────────────────────────────────────────

/// Integrated Vector of Intention.
#[pyclass(name = "IntentionVector")]
#[derive(Clone)]
pub struct PyIntentionVector {
    inner: IntentionVector,
}

#[pymethods]
impl PyIntentionVector {
    /// |∫ projection| · φ.
    #[getter]
    pub fn magnitude(&self) -> f64 {
        self.inner.magnitude
    }
    /// Mean endpoint phase.
    #[getter]
    pub fn phase(&self) -> f64 {
        self.inner.phase
    }
    /// Magnitude scaled by end coherence.
    #[getter]
    pub fn materialization_potential(&self) -> f64 {
        self.inner.materialization_potential
    }
    /// Quadrature error estimate.
    #[getter]
    pub fn integration_error(&self) -> f64 {
        self.inner.integration_error
    }
    /// End coherence at or above the resonance threshold.
    #[getter]
    pub fn teleport_ready(&self) -> bool {
        self.inner.teleport_ready
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "IntentionVector(magnitude={:.6}, error={:.3e}, teleport_ready={})",
            self.inner.magnitude, self.inner.integration_error, self.inner.teleport_ready
        )
    }
}

// ── FieldEvaluator ───────────────────────────────────────────────────────────

/// Ψ field with default constants and the 18-gate table.
#[pyclass(name = "FieldEvaluator")]
pub struct PyFieldEvaluator {
    inner: IntentionIntegrator,
}

#[pymethods]
impl PyFieldEvaluator {
    /// Create an evaluator. The zeta factor is computed once here.
    #[new]
    pub fn new() -> Self {
        Self {
            inner: IntentionIntegrator::new(FieldEvaluator::default()),
        }
    }

    /// Evaluate Ψ(t, x) at a gate index (wrapped modulo 18).
    #[pyo3(signature = (t, x, gate_index=0))]
    pub fn evaluate(&self, t: f64, x: f64, gate_index: i64) -> PyResult<PyWaveSample> {
        let (t, x) = (finite("t", t)?, finite("x", x)?);
        Ok(PyWaveSample {
            inner: self.inner.field().evaluate(t, x, gate_index),
        })
    }

    /// Integrate the projected field over `[t_start, t_end]`.
    #[pyo3(signature = (t_start, t_end, x, gate_index=0))]
    pub fn integrate(
        &self,
        t_start: f64,
        t_end: f64,
        x: f64,
        gate_index: i64,
    ) -> PyResult<PyIntentionVector> {
        let t_start = finite("t_start", t_start)?;
        let t_end = finite("t_end", t_end)?;
        let x = finite("x", x)?;
        Ok(PyIntentionVector {
            inner: self.inner.integrate(t_start, t_end, x, gate_index),
        })
    }

    /// Python repr string.
    pub fn __repr__(&self) -> &'static str {
        "FieldEvaluator()"
    }
}

// ── VerseDecoder ─────────────────────────────────────────────────────────────

/// Result of decoding one verse.
#[pyclass(name = "DecodedVerse")]
#[derive(Clone)]
pub struct PyDecodedVerse {
    inner: DecodedVerse,
}

#[pymethods]
impl PyDecodedVerse {
    /// Reference as given.
    #[getter]
    pub fn reference(&self) -> String {
        self.inner.reference.clone()
    }
    /// Gate position.
    #[getter]
    pub fn gate(&self) -> u32 {
        self.inner.gate
    }
    /// Gate label.
    #[getter]
    pub fn gate_name(&self) -> String {
        self.inner.gate_name.clone()
    }
    /// `(t, x)` the field was evaluated at.
    #[getter]
    pub fn parameters(&self) -> (f64, f64) {
        (self.inner.parameters.t, self.inner.parameters.x)
    }
    /// Field sample.
    #[getter]
    pub fn wave_function(&self) -> PyWaveSample {
        PyWaveSample {
            inner: self.inner.wave_function.clone(),
        }
    }
    /// Intention vector over `[0, t]`.
    #[getter]
    pub fn vector_intention(&self) -> PyIntentionVector {
        PyIntentionVector {
            inner: self.inner.vector_intention.clone(),
        }
    }

    /// Full text report.
    pub fn report(&self) -> String {
        render_report(&self.inner)
    }
}

/// Reference/text decoder with the fixed verse table.
#[pyclass(name = "VerseDecoder")]
pub struct PyVerseDecoder {
    inner: VerseDecoder,
}

#[pymethods]
impl PyVerseDecoder {
    /// Create a decoder with default constants.
    #[new]
    pub fn new() -> Self {
        Self {
            inner: VerseDecoder::default(),
        }
    }

    /// Decode a reference (table lookup) or arbitrary text.
    pub fn decode(&self, reference: &str, text: &str) -> PyDecodedVerse {
        PyDecodedVerse {
            inner: self.inner.decode_verse(reference, text),
        }
    }
}

// ── Free functions ───────────────────────────────────────────────────────────

/// Carrier frequency in Hz for a gate index (wrapped modulo 18).
#[pyfunction]
pub fn gate_frequency(gate_index: i64) -> f64 {
    SignalSynthesizer::default().gate_frequency(gate_index)
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Ψ-718 field bindings.
#[pymodule]
pub fn psi_field(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyWaveSample>()?;
    m.add_class::<PyIntentionVector>()?;
    m.add_class::<PyFieldEvaluator>()?;
    m.add_class::<PyDecodedVerse>()?;
    m.add_class::<PyVerseDecoder>()?;
    m.add_function(wrap_pyfunction!(gate_frequency, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("GATE_COUNT", crate::gates::GATE_COUNT)?;
    Ok(())
}
