/*
 * This source code is licensed under Creative Commons BY-NC 4.0.
 * See LICENSE in the root directory for full details.
 */

//! Approximations of the Riemann zeta function on the critical line Re(s) = ½.
//!
//! Two modes:
//!
//! - [`series_approximation`]: truncated Dirichlet series Σ n^−(½ + i·f).
//!   Bounded by a term count; early exit once a term past the 100th is
//!   negligible.
//! - [`fast_approximation`]: closed-form Riemann–Siegel style phase
//!   `θ(f) = arg Γ(¼ + i·f/2) − (f/2)·ln π`, returning `cos θ · e^{iθ}`.
//!   Not required to agree with the series; intended for latency-sensitive
//!   callers.
//!
//! Both are total: they always return a value.

use core::f64::consts::{PI, TAU};

use num_complex::Complex64;

/// ζ(½), returned exactly by [`fast_approximation`] at frequency zero.
pub const ZETA_ONE_HALF: f64 = -1.460_354_508_809_586_8;

/// Terms that are always summed before the early-exit check is allowed.
const MIN_TERMS_BEFORE_EXIT: usize = 100;

/// Magnitude below which a series term counts as negligible.
const NEGLIGIBLE_TERM: f64 = 1e-12;

// ─── Series mode ────────────────────────────────────────────────────────────

/// Truncated series Σ_{n=1}^{max_terms} 1 / n^(½ + i·frequency).
///
/// Stops early once `n > 100` and `|term| < 1e-12`. On the critical line
/// `|term| = n^−½`, so with practical term counts the full `max_terms` are
/// summed; the check is kept for parity with arbitrary `max_terms`.
pub fn series_approximation(frequency: f64, max_terms: usize) -> Complex64 {
    let s = Complex64::new(0.5, frequency);
    let mut sum = Complex64::new(0.0, 0.0);

    for n in 1..=max_terms {
        let term = (-s * (n as f64).ln()).exp();
        sum += term;

        if n > MIN_TERMS_BEFORE_EXIT && term.norm() < NEGLIGIBLE_TERM {
            log::trace!("zeta series converged at n={n}");
            break;
        }
    }
    sum
}

// ─── Fast mode ──────────────────────────────────────────────────────────────

/// Closed-form approximation for real-time use.
///
/// Returns exactly [`ZETA_ONE_HALF`] when `frequency == 0.0`.
pub fn fast_approximation(frequency: f64) -> Complex64 {
    if frequency == 0.0 {
        return Complex64::new(ZETA_ONE_HALF, 0.0);
    }
    let theta = riemann_siegel_theta(frequency);
    Complex64::from_polar(1.0, theta) * theta.cos()
}

/// θ(f) = arg Γ(¼ + i·f/2) − (f/2)·ln π, with arg Γ taken as the principal
/// value in (−π, π].
pub fn riemann_siegel_theta(frequency: f64) -> f64 {
    let lg = ln_gamma(Complex64::new(0.25, frequency / 2.0));
    wrap_phase(lg.im) - frequency / 2.0 * PI.ln()
}

// ─── Complex log-gamma ──────────────────────────────────────────────────────

const LANCZOS_G: f64 = 7.0;

const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Largest number of unit shifts [`ln_gamma`] will take to reach Re z ≥ ½.
pub const MAX_GAMMA_SHIFTS: f64 = 1e5;

/// Complex ln Γ(z) via the Lanczos approximation (g = 7, 9 coefficients).
///
/// For Re z < ½ the argument is shifted up with Γ(z) = Γ(z+1)/z, which stays
/// finite for large |Im z| where the reflection formula would overflow.
/// Arguments that would need more than [`MAX_GAMMA_SHIFTS`] shifts, and
/// non-finite arguments, return NaN.
/// The imaginary part is a sum of logarithms and is *not* wrapped; use
/// [`wrap_phase`] to recover the principal argument of Γ.
pub fn ln_gamma(z: Complex64) -> Complex64 {
    // also rejects Re z so large in magnitude that z + 1 == z
    if !z.is_finite() || 0.5 - z.re > MAX_GAMMA_SHIFTS {
        return Complex64::new(f64::NAN, f64::NAN);
    }

    let mut z = z;
    let mut shift = Complex64::new(0.0, 0.0);
    while z.re < 0.5 {
        shift += z.ln();
        z += 1.0;
    }

    let z = z - 1.0;
    let mut series = Complex64::new(LANCZOS_COEFFS[0], 0.0);
    for (i, &c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        series += c / (z + i as f64);
    }
    let t = z + LANCZOS_G + 0.5;

    0.5 * TAU.ln() + (z + 0.5) * t.ln() - t + series.ln() - shift
}

/// Wrap an angle into (−π, π].
pub fn wrap_phase(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Series ────────────────────────────────────────────────────────────

    #[test]
    fn test_series_single_term_is_one() {
        let z = series_approximation(718.0, 1);
        assert!((z.re - 1.0).abs() < 1e-15 && z.im.abs() < 1e-15, "z={z}");
    }

    #[test]
    fn test_series_two_terms_real_axis() {
        let z = series_approximation(0.0, 2);
        let expected = 1.0 + 1.0 / 2f64.sqrt();
        assert!((z.re - expected).abs() < 1e-12, "re={}", z.re);
        assert!(z.im.abs() < 1e-15);
    }

    #[test]
    fn test_series_zero_terms_is_zero() {
        assert_eq!(series_approximation(3.0, 0), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_series_term_phase() {
        // n=2 term: 2^-½ · e^{−i·f·ln2}
        let f = 5.0;
        let z = series_approximation(f, 2) - Complex64::new(1.0, 0.0);
        let expected = Complex64::from_polar(2f64.powf(-0.5), -f * 2f64.ln());
        assert!((z - expected).norm() < 1e-14, "z={z} expected={expected}");
    }

    #[test]
    fn test_series_deterministic() {
        let a = series_approximation(718.0, 5000);
        let b = series_approximation(718.0, 5000);
        assert_eq!(a, b);
        assert!(a.re.is_finite() && a.im.is_finite());
    }

    // ── Fast approximation ────────────────────────────────────────────────

    #[test]
    fn test_fast_zero_exact_constant() {
        let z = fast_approximation(0.0);
        assert_eq!(z.re, -1.4603545088095868);
        assert_eq!(z.im, 0.0);
    }

    #[test]
    fn test_fast_magnitude_bounded() {
        for &f in &[0.5, 14.134_725, 100.0, 718.0, 5000.0] {
            let z = fast_approximation(f);
            // cos θ · e^{iθ}: |z| = |cos θ| ≤ 1 and Re z = cos²θ ≥ 0
            assert!(z.norm() <= 1.0 + 1e-12, "f={f} |z|={}", z.norm());
            assert!(z.re >= -1e-12, "f={f} re={}", z.re);
        }
    }

    // ── ln Γ ──────────────────────────────────────────────────────────────

    #[test]
    fn test_ln_gamma_real_values() {
        let one = ln_gamma(Complex64::new(1.0, 0.0));
        assert!(one.norm() < 1e-12, "lnΓ(1)={one}");

        let five = ln_gamma(Complex64::new(5.0, 0.0));
        assert!((five.re - 24f64.ln()).abs() < 1e-12, "lnΓ(5)={five}");

        let half = ln_gamma(Complex64::new(0.5, 0.0));
        assert!((half.re - PI.sqrt().ln()).abs() < 1e-12, "lnΓ(½)={half}");

        let quarter = ln_gamma(Complex64::new(0.25, 0.0));
        assert!((quarter.re - 3.625_609_908_221_908_3f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_ln_gamma_recurrence() {
        // lnΓ(z+1) − lnΓ(z) ≡ ln z (mod 2πi)
        let z = Complex64::new(0.25, 3.7);
        let diff = ln_gamma(z + 1.0) - ln_gamma(z) - z.ln();
        assert!(diff.re.abs() < 1e-11, "diff={diff}");
        assert!(wrap_phase(diff.im).abs() < 1e-11, "diff={diff}");
    }

    #[test]
    fn test_ln_gamma_large_imaginary_finite() {
        let lg = ln_gamma(Complex64::new(0.25, 359.0));
        assert!(lg.re.is_finite() && lg.im.is_finite(), "lg={lg}");
        // |Γ(¼ + iy)| decays like e^{−πy/2}
        assert!(lg.re < -500.0, "lg={lg}");
    }

    #[test]
    fn test_ln_gamma_negative_real_part() {
        // Γ(−2.5) = −8√π/15
        let lg = ln_gamma(Complex64::new(-2.5, 0.0));
        assert!((lg.re - 0.945_308_720_482_941_9_f64.ln()).abs() < 1e-10, "lg={lg}");
    }

    #[test]
    fn test_ln_gamma_far_left_is_nan() {
        // z + 1 == z at this magnitude; must return instead of shifting forever
        let lg = ln_gamma(Complex64::new(-1e17, 0.5));
        assert!(lg.re.is_nan() && lg.im.is_nan(), "lg={lg}");

        let lg = ln_gamma(Complex64::new(-MAX_GAMMA_SHIFTS - 1.0, 0.5));
        assert!(lg.re.is_nan());
        assert!(ln_gamma(Complex64::new(f64::NEG_INFINITY, 0.0)).re.is_nan());
        assert!(ln_gamma(Complex64::new(f64::NAN, 1.0)).re.is_nan());
    }

    #[test]
    fn test_wrap_phase_range() {
        for &a in &[-10.0, -PI, -1.0, 0.0, 1.0, PI, 7.5, 1000.0] {
            let w = wrap_phase(a);
            assert!(w > -PI - 1e-12 && w <= PI + 1e-12, "a={a} w={w}");
            assert!(((a - w) / TAU - ((a - w) / TAU).round()).abs() < 1e-9);
        }
    }
}
