/*
 * This source code is licensed under Creative Commons BY-NC 4.0.
 * See LICENSE in the root directory for full details.
 */

//! Vector of Intention: adaptive integration of the projected field.
//!
//! ```text
//! VI   = | ∫_{t0}^{t1} |Ψ(t)|·cos(arg Ψ(t)) dt | · φ
//! dir  = (arg Ψ(t0) + arg Ψ(t1)) / 2
//! M    = VI · coherence(t1)
//! ready = coherence(t1) ≥ resonance_threshold
//! ```
//!
//! # Invariants
//!
//! - **PSI-VI-001**: the quadrature error estimate is surfaced unmodified;
//!   the integrator never fails for a finite interval.
//! - **PSI-VI-002**: `t_start == t_end` gives `magnitude == 0`.
//! - **PSI-VI-003**: `teleport_ready` uses `>=`, unlike state classification.

use crate::field::{round6, FieldEvaluator, WaveSample};
use crate::quadrature::{self, QuadratureConfig, QuadratureResult};

/// Result of integrating the field over a time interval.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentionVector {
    /// |∫ projection| · φ.
    pub magnitude: f64,
    /// Mean of the endpoint phases.
    pub phase: f64,
    /// `magnitude · coherence_at_end`.
    pub materialization_potential: f64,
    /// Absolute error estimate reported by the quadrature.
    pub integration_error: f64,
    /// Position of the gate used for every evaluation.
    pub gate_position: u32,
    /// Coherence of the sample at `t_end`.
    pub coherence_at_end: f64,
    /// `coherence_at_end >= resonance_threshold`.
    pub teleport_ready: bool,
}

impl IntentionVector {
    /// Copy with magnitude, phase and materialization rounded to 6 decimals.
    /// The error estimate is left at full precision.
    pub fn rounded(&self) -> IntentionVector {
        IntentionVector {
            magnitude: round6(self.magnitude),
            phase: round6(self.phase),
            materialization_potential: round6(self.materialization_potential),
            coherence_at_end: round6(self.coherence_at_end),
            ..self.clone()
        }
    }
}

/// Full output of [`IntentionIntegrator::integrate_detailed`].
#[derive(Clone, Debug)]
pub struct IntentionTrace {
    /// The intention vector.
    pub vector: IntentionVector,
    /// Raw quadrature outcome.
    pub quadrature: QuadratureResult,
    /// Field sample at `t_start`.
    pub start: WaveSample,
    /// Field sample at `t_end`.
    pub end: WaveSample,
}

/// Integrates the field's real projection over time.
#[derive(Clone, Debug)]
pub struct IntentionIntegrator {
    field: FieldEvaluator,
    config: QuadratureConfig,
}

impl IntentionIntegrator {
    /// Integrator with the default quadrature budget (100 subintervals).
    pub fn new(field: FieldEvaluator) -> Self {
        Self {
            field,
            config: QuadratureConfig::default(),
        }
    }

    /// Override the quadrature tolerances and subdivision limit.
    pub fn with_quadrature(mut self, config: QuadratureConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying field evaluator.
    pub fn field(&self) -> &FieldEvaluator {
        &self.field
    }

    /// Integrate over `[t_start, t_end]` at fixed `x` and gate.
    pub fn integrate(&self, t_start: f64, t_end: f64, x: f64, gate_index: i64) -> IntentionVector {
        self.integrate_detailed(t_start, t_end, x, gate_index).vector
    }

    /// As [`integrate`](Self::integrate), also returning the quadrature
    /// outcome and both endpoint samples.
    pub fn integrate_detailed(
        &self,
        t_start: f64,
        t_end: f64,
        x: f64,
        gate_index: i64,
    ) -> IntentionTrace {
        let quadrature = quadrature::integrate(
            |t| self.field.projection(t, x, gate_index),
            t_start,
            t_end,
            &self.config,
        );

        let start = self.field.evaluate(t_start, x, gate_index);
        let end = self.field.evaluate(t_end, x, gate_index);
        let c = self.field.constants();

        let magnitude = quadrature.value.abs() * c.phi;
        let vector = IntentionVector {
            magnitude,
            phase: (start.phase + end.phase) / 2.0,
            materialization_potential: magnitude * end.coherence,
            integration_error: quadrature.abs_error,
            gate_position: end.gate_position,
            coherence_at_end: end.coherence,
            teleport_ready: end.is_teleportation_ready(c.resonance_threshold),
        };

        IntentionTrace {
            vector,
            quadrature,
            start,
            end,
        }
    }
}

impl Default for IntentionIntegrator {
    fn default() -> Self {
        Self::new(FieldEvaluator::default())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PHI;

    fn integrator() -> IntentionIntegrator {
        IntentionIntegrator::default()
    }

    #[test]
    fn test_zero_length_interval() {
        let vi = integrator().integrate(1.618, 1.618, 443.724, 1);
        assert_eq!(vi.magnitude, 0.0);
        assert_eq!(vi.materialization_potential, 0.0);
        assert_eq!(vi.integration_error, 0.0);
        assert_eq!(vi.gate_position, 740);
    }

    #[test]
    fn test_vector_derivation_from_trace() {
        let trace = integrator().integrate_detailed(0.0, 0.577, 100.0, 4);
        let vi = &trace.vector;

        assert!((vi.magnitude - trace.quadrature.value.abs() * PHI).abs() < 1e-15);
        assert!((vi.phase - (trace.start.phase + trace.end.phase) / 2.0).abs() < 1e-15);
        assert!((vi.materialization_potential - vi.magnitude * trace.end.coherence).abs() < 1e-15);
        assert_eq!(vi.coherence_at_end, trace.end.coherence);
        assert_eq!(vi.integration_error, trace.quadrature.abs_error);
        assert_eq!(vi.teleport_ready, trace.end.coherence >= 0.94);
        assert!(vi.magnitude >= 0.0 && vi.integration_error >= 0.0);
        assert!(trace.quadrature.intervals <= 100);
    }

    #[test]
    fn test_magnitude_independent_of_orientation() {
        let ig = integrator();
        let fwd = ig.integrate_detailed(0.2, 0.3, 226.0, 2);
        let rev = ig.integrate_detailed(0.3, 0.2, 226.0, 2);
        assert!(
            (fwd.vector.magnitude - rev.vector.magnitude).abs()
                <= 1e-9 * fwd.vector.magnitude.max(1.0),
            "fwd={} rev={}",
            fwd.vector.magnitude,
            rev.vector.magnitude
        );
    }

    #[test]
    fn test_gate_index_wrapped() {
        let ig = integrator();
        let a = ig.integrate(0.0, 0.25, 314.0, 3);
        let b = ig.integrate(0.0, 0.25, 314.0, 3 + 18 * 4);
        assert_eq!(a, b);
        assert_eq!(a.gate_position, 1227);
    }

    #[test]
    fn test_short_interval_converges() {
        let q = QuadratureConfig { limit: 100, epsabs: 1e-10, epsrel: 1e-10 };
        let trace = integrator()
            .with_quadrature(q)
            .integrate_detailed(0.0, 0.01, 718.0, 0);
        assert!(trace.quadrature.converged, "{:?}", trace.quadrature);
        assert!(trace.vector.integration_error <= 1e-10_f64.max(1e-10 * trace.quadrature.value.abs()));
    }

    #[test]
    fn test_light_verse_interval_value() {
        // oscillates 180 times over the interval; the budget runs out short of
        // the tolerance but the estimate is already good to ~2.4e-7
        let trace = integrator().integrate_detailed(0.0, 1.618, 443.724, 1);
        let q = trace.quadrature;
        assert!((q.value - -9.989_215e-5).abs() < 1e-8, "value={:e}", q.value);
        assert!(q.abs_error < 1e-6, "error={:e}", q.abs_error);
        assert_eq!(q.intervals, 100);
        assert!(!q.converged);
        assert!((trace.vector.magnitude - 9.989_215e-5 * PHI).abs() < 1e-8 * PHI);
    }

    #[test]
    fn test_alpha_omega_interval_converges() {
        let q = integrator().integrate_detailed(0.0, 1.0, 1000.0, 5).quadrature;
        assert!(q.converged, "{q:?}");
        assert!((q.value - 1.496_021_944e-5).abs() < 1e-12, "value={:e}", q.value);
        assert!(q.abs_error < 1e-10);
    }

    #[test]
    fn test_rounded_keeps_error() {
        let vi = integrator().integrate(0.0, 1.0, 718.0, 0);
        let r = vi.rounded();
        assert_eq!(r.integration_error, vi.integration_error);
        assert_eq!(r.teleport_ready, vi.teleport_ready);
        assert!((r.magnitude - vi.magnitude).abs() <= 5e-7);
    }
}
