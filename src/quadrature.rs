/*
 * This source code is licensed under Creative Commons BY-NC 4.0.
 * See LICENSE in the root directory for full details.
 */

//! Globally adaptive Gauss–Kronrod quadrature with extrapolation.
//!
//! Each subinterval is integrated with the 21-point Kronrod rule and its
//! embedded 10-point Gauss rule; their difference, scaled as in QUADPACK's
//! `qk21`, is the local error estimate. The subinterval with the largest
//! estimate is bisected. Once the large intervals are resolved, the sequence
//! of partial sums is accelerated with Wynn's ε-algorithm, following QUADPACK's
//! `qagse`. Subdivision stops when the error meets `max(epsabs, epsrel·|I|)`,
//! the limit is reached, or roundoff makes further bisection pointless.
//!
//! # Invariants
//!
//! - **PSI-QUAD-001**: never more than `limit` subintervals.
//! - **PSI-QUAD-002**: non-convergence is reported via
//!   [`QuadratureResult::converged`], never as an error.
//! - **PSI-QUAD-003**: `a == b` returns exactly `0.0` with zero error and no
//!   integrand evaluations.

/// Kronrod abscissae on [−1, 1], descending; the last is the centre.
const XGK: [f64; 11] = [
    0.995_657_163_025_808_080_735_527_280_689_003,
    0.973_906_528_517_171_720_077_964_012_084_452,
    0.930_157_491_355_708_226_001_207_180_059_508,
    0.865_063_366_688_984_510_732_096_688_423_493,
    0.780_817_726_586_416_897_063_717_578_345_042,
    0.679_409_568_299_024_406_234_327_365_114_874,
    0.562_757_134_668_604_683_339_000_099_272_694,
    0.433_395_394_129_247_190_799_265_943_165_784,
    0.294_392_862_701_460_198_131_126_603_103_866,
    0.148_874_338_981_631_210_884_826_001_129_720,
    0.0,
];

/// Kronrod weights matching [`XGK`].
const WGK: [f64; 11] = [
    0.011_694_638_867_371_874_278_064_396_062_192,
    0.032_558_162_307_964_727_478_818_972_459_390,
    0.054_755_896_574_351_996_031_381_300_244_580,
    0.075_039_674_810_919_952_767_043_140_916_190,
    0.093_125_454_583_697_605_535_065_465_083_366,
    0.109_387_158_802_297_641_899_210_590_325_805,
    0.123_491_976_262_065_851_077_208_980_352_184,
    0.134_709_217_311_473_325_928_054_001_771_707,
    0.142_775_938_577_060_080_797_094_273_138_717,
    0.147_739_104_901_338_491_374_841_515_972_068,
    0.149_445_554_002_916_905_664_936_468_389_821,
];

/// Gauss weights for the odd-indexed abscissae `XGK[1]`, `XGK[3]`, … `XGK[9]`.
/// The 10-point Gauss rule has no centre node.
const WG: [f64; 5] = [
    0.066_671_344_308_688_137_593_568_809_893_332,
    0.149_451_349_150_580_593_145_776_339_657_697,
    0.219_086_362_515_982_043_995_534_934_228_163,
    0.269_266_719_309_996_355_091_226_921_569_469,
    0.295_524_224_714_752_870_173_892_994_651_338,
];

/// Capacity of the ε-table; the table is folded back once 50 sums are held.
const EPSILON_TABLE_LEN: usize = 52;

const EPSILON_TABLE_LIMIT: usize = 50;

/// Default absolute and relative tolerance (≈ √ε for f64).
pub const DEFAULT_TOLERANCE: f64 = 1.49e-8;

/// Default maximum number of subintervals.
pub const DEFAULT_LIMIT: usize = 100;

/// Tolerances and subdivision budget.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadratureConfig {
    /// Maximum number of subintervals (PSI-QUAD-001).
    pub limit: usize,
    /// Absolute error target.
    pub epsabs: f64,
    /// Relative error target.
    pub epsrel: f64,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            epsabs: DEFAULT_TOLERANCE,
            epsrel: DEFAULT_TOLERANCE,
        }
    }
}

/// Outcome of [`integrate`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadratureResult {
    /// Integral estimate.
    pub value: f64,
    /// Absolute error estimate (≥ 0).
    pub abs_error: f64,
    /// Number of subintervals in the final partition.
    pub intervals: usize,
    /// `true` when the error target was met.
    pub converged: bool,
}

/// Why subdivision stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stop {
    Converged,
    /// Subdivision limit reached.
    Limit,
    /// Bisection no longer reduces the error.
    Roundoff,
    /// Roundoff detected inside the extrapolation table.
    ExtrapolationRoundoff,
    /// A subinterval shrank to f64 resolution.
    TinyInterval,
    /// The ε-table stopped improving.
    NoExtrapolation,
    /// The integral is probably divergent or converges too slowly.
    Divergent,
}

/// Which estimate the subdivision loop hands back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tail {
    /// Sum of the subinterval values.
    Summed,
    /// Best extrapolated value, if it beats the sum.
    Extrapolated,
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// One application of the 21-point rule.
#[derive(Clone, Copy, Debug)]
struct RuleEstimate {
    value: f64,
    error: f64,
    /// ∫|f| approximation.
    res_abs: f64,
    /// ∫|f − mean| approximation.
    res_asc: f64,
}

/// 21-point Gauss–Kronrod rule on [a, b].
fn kronrod21<F: FnMut(f64) -> f64>(f: &mut F, a: f64, b: f64) -> RuleEstimate {
    let centre = 0.5 * (a + b);
    let half = 0.5 * (b - a);
    let abs_half = half.abs();

    let fc = f(centre);
    let mut res_g = 0.0;
    let mut res_k = WGK[10] * fc;
    let mut res_abs = res_k.abs();

    let mut fv1 = [0.0f64; 10];
    let mut fv2 = [0.0f64; 10];

    for j in 0..10 {
        let absc = half * XGK[j];
        let f1 = f(centre - absc);
        let f2 = f(centre + absc);
        fv1[j] = f1;
        fv2[j] = f2;
        res_k += WGK[j] * (f1 + f2);
        res_abs += WGK[j] * (f1.abs() + f2.abs());
        if j % 2 == 1 {
            res_g += WG[j / 2] * (f1 + f2);
        }
    }

    let mean = res_k * 0.5;
    let mut res_asc = WGK[10] * (fc - mean).abs();
    for j in 0..10 {
        res_asc += WGK[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
    }

    let value = res_k * half;
    res_abs *= abs_half;
    res_asc *= abs_half;

    let mut error = ((res_k - res_g) * half).abs();
    if res_asc != 0.0 && error != 0.0 {
        error = res_asc * (200.0 * error / res_asc).powf(1.5).min(1.0);
    }
    if res_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * res_abs);
    }

    RuleEstimate {
        value,
        error,
        res_abs,
        res_asc,
    }
}

// ─── Error ordering ─────────────────────────────────────────────────────────

/// Keep `order` sorted by descending segment error after a bisection
/// (QUADPACK `qpsrt`). `last` is the segment count, the newest segment sits at
/// `last − 1`, and `maxerr` is the slot that was just overwritten. Only the
/// first `limit + 3 − last` ranks are maintained once more than half the
/// budget is used. Returns the new `(maxerr, errmax)`.
fn sort_errors(
    limit: usize,
    last: usize,
    segments: &[Segment],
    order: &mut [usize],
    maxerr: usize,
    nrmax: &mut usize,
) -> (usize, f64) {
    if last <= 2 {
        order[0] = 0;
        order[1] = 1;
    } else {
        let errmax = segments[maxerr].error;

        // a bisection may have pushed the old maximum below ranks kept for
        // extrapolation; move it back up
        if *nrmax != 1 {
            for _ in 1..*nrmax {
                let isucc = order[*nrmax - 2];
                if errmax <= segments[isucc].error {
                    break;
                }
                order[*nrmax - 1] = isucc;
                *nrmax -= 1;
            }
        }

        let jupbn = if last > limit / 2 + 2 { limit + 3 - last } else { last };
        let errmin = segments[last - 1].error;
        let jbnd = jupbn - 1;

        let mut placed = false;
        for i in (*nrmax + 1)..=jbnd {
            let isucc = order[i - 1];
            if errmax >= segments[isucc].error {
                order[i - 2] = maxerr;
                let mut k = jbnd;
                let mut inserted = false;
                for _ in i..=jbnd {
                    let isucc = order[k - 1];
                    if errmin < segments[isucc].error {
                        order[k] = last - 1;
                        inserted = true;
                        break;
                    }
                    order[k] = isucc;
                    k -= 1;
                }
                if !inserted {
                    order[i - 1] = last - 1;
                }
                placed = true;
                break;
            }
            order[i - 2] = isucc;
        }
        if !placed {
            order[jbnd - 1] = maxerr;
            order[jupbn - 1] = last - 1;
        }
    }

    let maxerr = order[*nrmax - 1];
    (maxerr, segments[maxerr].error)
}

// ─── ε-algorithm ────────────────────────────────────────────────────────────

/// Wynn ε-table over successive partial sums (QUADPACK `qelg`).
struct EpsilonTable {
    table: [f64; EPSILON_TABLE_LEN],
    len: usize,
    /// The three most recent extrapolated values.
    recent: [f64; 3],
    calls: usize,
}

impl EpsilonTable {
    fn new(first: f64) -> Self {
        let mut table = [0.0; EPSILON_TABLE_LEN];
        table[0] = first;
        Self {
            table,
            len: 1,
            recent: [0.0; 3],
            calls: 0,
        }
    }

    fn push(&mut self, value: f64) {
        self.table[self.len] = value;
        self.len += 1;
    }

    /// Extrapolate the limit of the held sums. Returns `(value, error)`; the
    /// error is `f64::MAX` until three extrapolations are available.
    fn extrapolate(&mut self) -> (f64, f64) {
        self.calls += 1;
        let num = self.len;
        let mut n = num;
        let mut abserr = f64::MAX;
        let mut result = self.table[n - 1];
        if n < 3 {
            return (result, abserr.max(5.0 * f64::EPSILON * result.abs()));
        }

        let newelm = (n - 1) / 2;
        self.table[n + 1] = self.table[n - 1];
        self.table[n - 1] = f64::MAX;
        let mut k1 = n;

        for i in 1..=newelm {
            let res = self.table[k1 + 1];
            let e0 = self.table[k1 - 3];
            let e1 = self.table[k1 - 2];
            let e2 = res;

            let e1abs = e1.abs();
            let delta2 = e2 - e1;
            let err2 = delta2.abs();
            let tol2 = e2.abs().max(e1abs) * f64::EPSILON;
            let delta3 = e1 - e0;
            let err3 = delta3.abs();
            let tol3 = e1abs.max(e0.abs()) * f64::EPSILON;

            if err2 <= tol2 && err3 <= tol3 {
                // e0, e1 and e2 agree to machine accuracy
                let abserr = err2 + err3;
                return (res, abserr.max(5.0 * f64::EPSILON * res.abs()));
            }

            let e3 = self.table[k1 - 1];
            self.table[k1 - 1] = e1;
            let delta1 = e1 - e3;
            let err1 = delta1.abs();
            let tol1 = e1abs.max(e3.abs()) * f64::EPSILON;
            if err1 <= tol1 || err2 <= tol2 || err3 <= tol3 {
                n = 2 * i - 1;
                break;
            }

            let ss = 1.0 / delta1 + 1.0 / delta2 - 1.0 / delta3;
            if (ss * e1).abs() <= 1e-4 {
                // irregular element; truncate the table here
                n = 2 * i - 1;
                break;
            }

            let res = e1 + 1.0 / ss;
            self.table[k1 - 1] = res;
            k1 -= 2;
            let error = err2 + (res - e2).abs() + err3;
            if error <= abserr {
                abserr = error;
                result = res;
            }
        }

        if n == EPSILON_TABLE_LIMIT {
            n = 2 * (EPSILON_TABLE_LIMIT / 2) - 1;
        }

        // shift the table down by one diagonal
        let mut ib = if num % 2 == 0 { 1 } else { 0 };
        for _ in 0..=newelm {
            self.table[ib] = self.table[ib + 2];
            ib += 2;
        }
        if num != n {
            let offset = num - n;
            for i in 0..n {
                self.table[i] = self.table[i + offset];
            }
        }
        self.len = n;

        if self.calls < 4 {
            self.recent[self.calls - 1] = result;
            abserr = f64::MAX;
        } else {
            abserr = (result - self.recent[2]).abs()
                + (result - self.recent[1]).abs()
                + (result - self.recent[0]).abs();
            self.recent = [self.recent[1], self.recent[2], result];
        }

        (result, abserr.max(5.0 * f64::EPSILON * result.abs()))
    }
}

// ─── Driver ─────────────────────────────────────────────────────────────────

/// Integrate `f` over [a, b] (a > b gives the negated integral).
pub fn integrate<F: FnMut(f64) -> f64>(
    mut f: F,
    a: f64,
    b: f64,
    config: &QuadratureConfig,
) -> QuadratureResult {
    if a == b {
        return QuadratureResult {
            value: 0.0,
            abs_error: 0.0,
            intervals: 0,
            converged: true,
        };
    }

    let limit = config.limit.max(1);
    let (epsabs, epsrel) = (config.epsabs, config.epsrel);
    let eps = f64::EPSILON;

    let first = kronrod21(&mut f, a, b);
    let def_abs = first.res_abs;
    let dres = first.value.abs();
    let mut errbnd = epsabs.max(epsrel * dres);

    let mut stop = Stop::Converged;
    if first.error <= 100.0 * eps * def_abs && first.error > errbnd {
        stop = Stop::Roundoff;
    }
    if limit == 1 && first.error > errbnd {
        stop = Stop::Limit;
    }
    let accepted = first.error == 0.0 || (first.error <= errbnd && first.error != first.res_asc);
    if stop != Stop::Converged || accepted || limit == 1 {
        return finish(a, b, first.value, first.error, 1, stop);
    }

    let mut segments = Vec::with_capacity(limit);
    segments.push(Segment {
        a,
        b,
        value: first.value,
        error: first.error,
    });
    let mut order = vec![0usize; limit];
    let mut table = EpsilonTable::new(first.value);

    let mut result = first.value;
    let mut abserr = f64::MAX;
    let mut area = first.value;
    let mut errsum = first.error;
    let mut maxerr = 0usize;
    let mut errmax = first.error;
    let mut nrmax = 1usize;

    let mut ktmin = 0u32;
    let mut extrap = false;
    let mut noext = false;
    let (mut iroff1, mut iroff2, mut iroff3) = (0u32, 0u32, 0u32);
    let mut table_roundoff = false;
    let (mut small, mut erlarg, mut ertest, mut correc) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    let positive = dres >= (1.0 - 50.0 * eps) * def_abs;
    let mut tail = Tail::Summed;

    for last in 2..=limit {
        let seg = segments[maxerr];
        let (a1, b2) = (seg.a, seg.b);
        let b1 = 0.5 * (seg.a + seg.b);
        let a2 = b1;
        let erlast = errmax;

        let left = kronrod21(&mut f, a1, b1);
        let right = kronrod21(&mut f, a2, b2);
        let area12 = left.value + right.value;
        let erro12 = left.error + right.error;
        errsum = errsum + erro12 - errmax;
        area = area + area12 - seg.value;

        if left.res_asc != left.error && right.res_asc != right.error {
            if (seg.value - area12).abs() <= 1e-5 * area12.abs() && erro12 >= 0.99 * errmax {
                if extrap {
                    iroff2 += 1;
                } else {
                    iroff1 += 1;
                }
            }
            if last > 10 && erro12 > errmax {
                iroff3 += 1;
            }
        }

        errbnd = epsabs.max(epsrel * area.abs());
        if iroff1 + iroff2 >= 10 || iroff3 >= 20 {
            stop = Stop::Roundoff;
        }
        if iroff2 >= 5 {
            table_roundoff = true;
        }
        if last == limit {
            stop = Stop::Limit;
        }
        if a1.abs().max(b2.abs()) <= (1.0 + 100.0 * eps) * (a2.abs() + 1000.0 * f64::MIN_POSITIVE) {
            stop = Stop::TinyInterval;
        }

        let lower = Segment { a: a1, b: b1, value: left.value, error: left.error };
        let upper = Segment { a: a2, b: b2, value: right.value, error: right.error };
        // the half with the larger error keeps the bisected slot
        if right.error > left.error {
            segments[maxerr] = upper;
            segments.push(lower);
        } else {
            segments[maxerr] = lower;
            segments.push(upper);
        }

        (maxerr, errmax) = sort_errors(limit, last, &segments, &mut order, maxerr, &mut nrmax);

        if errsum <= errbnd {
            if stop == Stop::Limit {
                stop = Stop::Converged;
            }
            tail = Tail::Summed;
            break;
        }
        if stop != Stop::Converged {
            tail = Tail::Extrapolated;
            break;
        }
        if last == 2 {
            small = (b - a).abs() * 0.375;
            erlarg = errsum;
            ertest = errbnd;
            table.push(area);
            continue;
        }
        if noext {
            continue;
        }

        erlarg -= erlast;
        if (b1 - a1).abs() > small {
            erlarg += erro12;
        }
        if !extrap {
            // keep bisecting until the worst interval is small
            let worst = segments[maxerr];
            if (worst.b - worst.a).abs() > small {
                continue;
            }
            extrap = true;
            nrmax = 2;
        }

        if !table_roundoff && erlarg > ertest {
            // large intervals still carry error; bisect those first
            let jupbnd = if last > 2 + limit / 2 { limit + 3 - last } else { last };
            let mut large_left = false;
            for _ in nrmax..=jupbnd {
                maxerr = order[nrmax - 1];
                errmax = segments[maxerr].error;
                if (segments[maxerr].b - segments[maxerr].a).abs() > small {
                    large_left = true;
                    break;
                }
                nrmax += 1;
            }
            if large_left {
                continue;
            }
        }

        table.push(area);
        let (reseps, abseps) = table.extrapolate();
        ktmin += 1;
        if ktmin > 5 && abserr < 1e-3 * errsum {
            stop = Stop::NoExtrapolation;
        }
        if abseps < abserr {
            ktmin = 0;
            abserr = abseps;
            result = reseps;
            correc = erlarg;
            ertest = epsabs.max(epsrel * reseps.abs());
            if abserr <= ertest {
                tail = Tail::Extrapolated;
                break;
            }
        }
        if table.len == 1 {
            noext = true;
        }
        if stop == Stop::NoExtrapolation {
            tail = Tail::Extrapolated;
            break;
        }

        maxerr = order[0];
        errmax = segments[maxerr].error;
        nrmax = 1;
        extrap = false;
        small *= 0.5;
        erlarg = errsum;
    }

    let mut summed = tail == Tail::Summed || abserr == f64::MAX;
    if !summed {
        let mut check_divergence = true;
        if stop != Stop::Converged || table_roundoff {
            if table_roundoff {
                abserr += correc;
            }
            if stop == Stop::Converged {
                stop = Stop::ExtrapolationRoundoff;
            }
            if result != 0.0 && area != 0.0 {
                summed = abserr / result.abs() > errsum / area.abs();
            } else if abserr > errsum {
                summed = true;
            } else if area == 0.0 {
                check_divergence = false;
            }
        }
        if !summed
            && check_divergence
            && (positive || result.abs().max(area.abs()) > def_abs * 0.01)
        {
            let ratio = result / area;
            if ratio < 0.01 || ratio > 100.0 || errsum > area.abs() {
                stop = Stop::Divergent;
            }
        }
    }
    if summed {
        result = segments.iter().map(|s| s.value).sum();
        abserr = errsum;
    }

    finish(a, b, result, abserr, segments.len(), stop)
}

fn finish(a: f64, b: f64, value: f64, abs_error: f64, intervals: usize, stop: Stop) -> QuadratureResult {
    let converged = stop == Stop::Converged;
    if !converged {
        log::debug!(
            "quadrature on [{a}, {b}] stopped ({stop:?}) at {intervals} intervals: value={value:.6e} err={abs_error:.3e}"
        );
    }
    QuadratureResult {
        value,
        abs_error,
        intervals,
        converged,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
