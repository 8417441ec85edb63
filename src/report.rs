//! Plain-text rendering of a [`DecodedVerse`].
//!
//! Sections, in order: header box, `[TEXT INPUT]`, `[DNA GATE ACTIVATION]`,
//! `[QUANTUM PARAMETERS]`, `[WAVE FUNCTION Ψ]`, `[VECTOR OF INTENTION VI]`,
//! `[GOLDEN SIGNATURES]`, `[INTERPRETATION]`, closing rule.

use core::fmt::Write;

use crate::constants::{FUNDAMENTAL_718, LUNAR, MTDNA_LENGTH, SCHUMANN};
use crate::decoder::DecodedVerse;

/// Width of the header box and closing rule.
const RULE_WIDTH: usize = 70;

const READY_LINES: [&str; 3] = [
    "Quantum coherence >94%: Phase teleportation possible",
    "DNA gate resonance: GATCA sequence activated",
    "Intention vector locked: Reality modification enabled",
];

const BUILDING_LINES: [&str; 3] = [
    "Coherence building: Continue harmonic alignment",
    "Increase t or adjust x to nearest resonance key",
    "Use audio activation: 7.83 + 18.6 + 718 Hz",
];

/// Complex amplitude as `re ±im i` with 4 decimals.
pub fn format_amplitude(v: &DecodedVerse) -> String {
    let a = v.wave_function.amplitude;
    format!("{:.4} {:+.4}i", a.re, a.im)
}

/// Coherence as a percentage with 2 decimals.
pub fn format_coherence(v: &DecodedVerse) -> String {
    format!("{:.2}%", v.wave_function.coherence * 100.0)
}

/// Render the full text report for one decoded verse.
pub fn render_report(v: &DecodedVerse) -> String {
    let mut out = String::with_capacity(2048);
    // fmt::Write for String never fails
    write_report(&mut out, v).map(|()| out).unwrap_or_default()
}

/// Write the text report for one decoded verse into any [`core::fmt::Write`]
/// sink.
pub fn write_report<W: Write>(out: &mut W, v: &DecodedVerse) -> core::fmt::Result {
    let rule = "═".repeat(RULE_WIDTH);
    let wf = &v.wave_function;
    let vi = &v.vector_intention;
    let gs = &v.golden_signatures;

    writeln!(out)?;
    writeln!(out, "╔{rule}╗")?;
    writeln!(out, "║  Ψ-718 QUANTUM DECODER | {:<36} ║", v.reference)?;
    writeln!(out, "╚{rule}╝")?;
    writeln!(out)?;

    writeln!(out, "[TEXT INPUT]")?;
    writeln!(out, "\"{}\"", v.text)?;
    writeln!(out)?;

    writeln!(out, "[DNA GATE ACTIVATION]")?;
    writeln!(out, "{}", v.gate_name)?;
    writeln!(out, "Position: {} / {} (mtDNA rCRS)", v.gate, MTDNA_LENGTH)?;
    writeln!(out)?;

    writeln!(out, "[QUANTUM PARAMETERS]")?;
    writeln!(out, "t = {:.6} (subjective time)", v.parameters.t)?;
    writeln!(out, "x = {:.6} (wave space)", v.parameters.x)?;
    let k = 2.0 * core::f64::consts::PI / FUNDAMENTAL_718;
    writeln!(out, "k = 2π/718 = {k:.6} (wave number)")?;
    writeln!(out)?;

    writeln!(out, "[WAVE FUNCTION Ψ]")?;
    writeln!(out, "Ψ = {}", format_amplitude(v))?;
    writeln!(out, "|Ψ| = {:.6}", wf.magnitude)?;
    writeln!(out, "Phase = {:.6} rad", wf.phase)?;
    writeln!(out, "Coherence = {}", format_coherence(v))?;
    writeln!(out, "State: {}", wf.state)?;
    writeln!(out)?;

    writeln!(out, "[VECTOR OF INTENTION VI]")?;
    writeln!(out, "VI Magnitude: {:.6}", vi.magnitude)?;
    writeln!(out, "Materialization: {:.6}%", vi.materialization_potential)?;
    let ready = if vi.teleport_ready { "YES ✓" } else { "NO ×" };
    writeln!(out, "Teleport Ready: {ready}")?;
    writeln!(out)?;

    writeln!(out, "[GOLDEN SIGNATURES]")?;
    writeln!(out, "φ = {}", gs.phi)?;
    writeln!(out, "γ = 1/φ = {}", gs.gamma)?;
    writeln!(out, "718/{SCHUMANN} ≈ {} (Fibonacci 89)", gs.fundamental_over_schumann)?;
    writeln!(out, "718/γ ≈ {} (12³ = 1152)", gs.fundamental_over_gamma)?;
    writeln!(out)?;

    writeln!(out, "[INTERPRETATION]")?;
    writeln!(out)?;
    let lines = if vi.teleport_ready { READY_LINES } else { BUILDING_LINES };
    for line in lines {
        writeln!(out, "→ {line}")?;
    }
    writeln!(out, "{rule}")
}

/// One-line audio summary printed after the binaural render.
pub fn binaural_summary(duration: f64) -> String {
    format!(
        "Left: {SCHUMANN} Hz | Right: {LUNAR} Hz | Beat: {:.2} Hz | Carrier: {FUNDAMENTAL_718} Hz | Duration: {duration}s",
        LUNAR - SCHUMANN
    )
}

// ─── Tests ──────────────────────────────────────────────────────────────────
