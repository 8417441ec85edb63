//! Golden-ratio point sets: pentagram, double helix, and the unification vector.
//!
//! Pure coordinate generators; nothing here renders.

use core::f64::consts::TAU;

use crate::constants::{GAMMA, PHI_SQUARED};

/// Number of points returned by [`pentagram_points`].
pub const PENTAGRAM_POINTS: usize = 13;

/// Index of the Sun point in [`pentagram_points`].
pub const SUN: usize = 10;
/// Index of the Earth point.
pub const EARTH: usize = 11;
/// Index of the centre (Man) point.
pub const MAN: usize = 12;

/// Elevation of the inner pentagon.
const INNER_Z: f64 = 0.1;

/// Golden angle in radians, `2π / φ²` (≈ 137.5°).
pub const GOLDEN_ANGLE: f64 = TAU / PHI_SQUARED;

/// Outer pentagon on the unit circle, inner pentagon rotated half a step,
/// scaled by γ and lifted by 0.1, then Sun `(0,0,1)`, Earth `(0,0,-1)` and
/// centre `(0,0,0)`.
pub fn pentagram_points() -> [[f64; 3]; PENTAGRAM_POINTS] {
    let mut pts = [[0.0; 3]; PENTAGRAM_POINTS];
    for i in 0..5 {
        let a = TAU * i as f64 / 5.0;
        pts[i] = [a.cos(), a.sin(), 0.0];

        let b = TAU * (i as f64 + 0.5) / 5.0;
        pts[5 + i] = [b.cos() * GAMMA, b.sin() * GAMMA, INNER_Z];
    }
    pts[SUN] = [0.0, 0.0, 1.0];
    pts[EARTH] = [0.0, 0.0, -1.0];
    pts[MAN] = [0.0, 0.0, 0.0];
    pts
}

/// One helix strand as a list of points.
pub type Strand = Vec<[f64; 3]>;

/// Double helix with `turns · points_per_turn` samples per strand.
///
/// θ runs evenly over `[0, turns · 2π]`, both endpoints included. The first
/// strand is `(cos θ, sin θ, θ / 2π)`; the second is rotated by
/// [`GOLDEN_ANGLE`] at the same height.
pub fn dna_helix(turns: usize, points_per_turn: usize) -> (Strand, Strand) {
    let n = turns * points_per_turn;
    let span = turns as f64 * TAU;
    let step = if n > 1 { span / (n - 1) as f64 } else { 0.0 };

    let mut strand_a = Vec::with_capacity(n);
    let mut strand_b = Vec::with_capacity(n);
    for i in 0..n {
        let theta = if i + 1 == n && n > 1 { span } else { i as f64 * step };
        let z = theta / TAU;
        strand_a.push([theta.cos(), theta.sin(), z]);
        let rotated = theta + GOLDEN_ANGLE;
        strand_b.push([rotated.cos(), rotated.sin(), z]);
    }
    (strand_a, strand_b)
}

/// Unit vector with `α = asin(√((5−√5)/10))`, `β = acos(√((5−√5)/10))`:
/// `(cos α · cos β, sin α · cos β, sin β)`.
pub fn vector_m() -> [f64; 3] {
    let s = ((5.0 - 5f64.sqrt()) / 10.0).sqrt();
    let alpha = s.asin();
    let beta = s.acos();
    [
        alpha.cos() * beta.cos(),
        alpha.sin() * beta.cos(),
        beta.sin(),
    ]
}

// ─── Tests ──────────────────────────────────────────────────────────────────
