//! Text and verse-reference decoding into field parameters.
//!
//! Known references resolve through a fixed table to `(gate, t, x)`. Any other
//! input is encoded from its text:
//!
//! ```text
//! codes = Unicode scalar values of the upper-cased alphanumeric chars
//! t = (Σ_{i<12} codes[i] · γ^(i mod 7)) mod 10 + 0.5          ∈ [0.5, 10.5)
//! x = (Σ over the last 12 codes, codes[i] · fib[i mod 12]) mod 1000 + 100   ∈ [100, 1100)
//! fib = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144]
//! ```
//!
//! Empty input (after filtering) decodes to the fixed default `(1.0, 100.0)`.

use hashbrown::HashMap;

use crate::constants::FieldConstants;
use crate::field::{FieldParameters, WaveSample};
use crate::intention::{IntentionIntegrator, IntentionVector};

/// Fibonacci weights for the space coordinate.
const FIB_WEIGHTS: [u64; 12] = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144];

/// Characters taken from each end of the text.
const WINDOW: usize = 12;

/// Maximum characters of input text kept in a [`DecodedVerse`].
pub const TEXT_EXCERPT_CHARS: usize = 100;

/// Parameters used when the text has no alphanumeric characters.
pub const DEFAULT_TEXT_PARAMS: (f64, f64) = (1.0, 100.0);

/// Fixed reference → parameter table.
pub const VERSE_MAPPINGS: [(&str, FieldParameters); 8] = [
    ("Genesis 1:1", FieldParameters::new(0, 1.0, 718.0)),
    ("Genesis 1:3", FieldParameters::new(1, 1.618, 443.724)),
    ("John 1:1", FieldParameters::new(2, 3.141, 226.0)),
    ("Exodus 3:14", FieldParameters::new(3, 2.718, 314.0)),
    ("1 John 4:8", FieldParameters::new(4, 0.577, 100.0)),
    ("Revelation 22:13", FieldParameters::new(5, 1.0, 1000.0)),
    ("Romans 8:38", FieldParameters::new(6, 1.618, 500.0)),
    ("Ephesians 4:4", FieldParameters::new(7, 2.0, 400.0)),
];

/// The six verses decoded by a full run, with their text.
pub const REFERENCE_VERSES: [(&str, &str); 6] = [
    ("Genesis 1:1", "Na początku stworzył Bóg niebo i ziemię."),
    ("Genesis 1:3", "I rzekł Bóg: Niechaj się stanie światłość! I stała się światłość."),
    ("John 1:1", "Na początku było Słowo, a Słowo było u Boga, a Bogiem było Słowo."),
    ("Exodus 3:14", "Bóg rzekł do Mojżesza: JESTEM, KTÓRY JESTEM."),
    ("1 John 4:8", "Bóg jest miłością."),
    ("Revelation 22:13", "Ja jestem Alfa i Omega, Pierwszy i Ostatni, Początek i Koniec."),
];

// ─── Text encoding ──────────────────────────────────────────────────────────

/// Encode arbitrary text as `(t, x)`.
pub fn text_to_params(text: &str, constants: &FieldConstants) -> (f64, f64) {
    let codes: Vec<u32> = text
        .to_uppercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .map(u32::from)
        .collect();
    if codes.is_empty() {
        return DEFAULT_TEXT_PARAMS;
    }

    let t_sum: f64 = codes
        .iter()
        .take(WINDOW)
        .enumerate()
        .map(|(i, &c)| c as f64 * constants.gamma.powi((i % 7) as i32))
        .sum();
    let t = t_sum.rem_euclid(10.0) + 0.5;

    let tail = &codes[codes.len().saturating_sub(WINDOW)..];
    let x_sum: u64 = tail
        .iter()
        .enumerate()
        .map(|(i, &c)| c as u64 * FIB_WEIGHTS[i % WINDOW])
        .sum();
    let x = (x_sum % 1000) as f64 + 100.0;

    (t, x)
}

// ─── Decoded output ─────────────────────────────────────────────────────────

/// Fixed golden-ratio signatures attached to each decoded verse.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoldenSignatures {
    /// φ (6 decimals).
    pub phi: f64,
    /// γ (6 decimals).
    pub gamma: f64,
    /// φ² (6 decimals).
    pub phi_squared: f64,
    /// fundamental / schumann (2 decimals).
    #[cfg_attr(feature = "serde", serde(rename = "718_over_schumann"))]
    pub fundamental_over_schumann: f64,
    /// fundamental / γ (2 decimals).
    #[cfg_attr(feature = "serde", serde(rename = "718_over_gamma"))]
    pub fundamental_over_gamma: f64,
}

impl GoldenSignatures {
    /// Derive from constants.
    pub fn from_constants(c: &FieldConstants) -> Self {
        let round = |v: f64, places: i32| {
            let s = 10f64.powi(places);
            (v * s).round() / s
        };
        Self {
            phi: round(c.phi, 6),
            gamma: round(c.gamma, 6),
            phi_squared: round(c.phi_squared, 6),
            fundamental_over_schumann: round(c.fundamental / c.schumann, 2),
            fundamental_over_gamma: round(c.fundamental / c.gamma, 2),
        }
    }
}

/// Everything derived from one reference/text pair.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedVerse {
    /// Reference as given.
    pub reference: String,
    /// First [`TEXT_EXCERPT_CHARS`] characters of the text.
    pub text: String,
    /// Gate position used.
    pub gate: u32,
    /// Gate label.
    pub gate_name: String,
    /// Parameters the field was evaluated at.
    pub parameters: FieldParameters,
    /// Field sample at `(t, x, gate)`, rounded to 6 decimals.
    pub wave_function: WaveSample,
    /// Intention vector over `[0, t]`, rounded to 6 decimals.
    pub vector_intention: IntentionVector,
    /// Constant signatures.
    pub golden_signatures: GoldenSignatures,
}

// ─── VerseDecoder ───────────────────────────────────────────────────────────

/// Maps references or text to field parameters and decodes them.
#[derive(Clone, Debug)]
pub struct VerseDecoder {
    integrator: IntentionIntegrator,
    mappings: HashMap<&'static str, FieldParameters>,
}

impl VerseDecoder {
    /// Decoder over an integrator, with the standard verse table.
    pub fn new(integrator: IntentionIntegrator) -> Self {
        Self {
            integrator,
            mappings: VERSE_MAPPINGS.into_iter().collect(),
        }
    }

    /// Parameters for a reference from the table, if present.
    pub fn lookup(&self, reference: &str) -> Option<FieldParameters> {
        self.mappings.get(reference).copied()
    }

    /// Table parameters for `reference`, or gate 0 with text-encoded `(t, x)`.
    pub fn resolve(&self, reference: &str, text: &str) -> FieldParameters {
        self.lookup(reference).unwrap_or_else(|| {
            let (t, x) = text_to_params(text, self.integrator.field().constants());
            FieldParameters::new(0, t, x)
        })
    }

    /// Evaluate the field and integrate the intention vector over `[0, t]`.
    ///
    /// Both are computed at full precision; the stored copies are the
    /// 6-decimal [`WaveSample::rounded`] and [`IntentionVector::rounded`].
    pub fn decode_verse(&self, reference: &str, text: &str) -> DecodedVerse {
        let params = self.resolve(reference, text);
        let field = self.integrator.field();

        let wave = field.evaluate_params(&params);
        let vi = self.integrator.integrate(0.0, params.t, params.x, params.gate_index);
        let gate = field.gates().get(params.gate_index);

        log::debug!(
            "decoded {reference:?}: gate={} t={:.6} x={:.6} state={}",
            gate.position,
            params.t,
            params.x,
            wave.state
        );

        DecodedVerse {
            reference: reference.to_string(),
            text: text.chars().take(TEXT_EXCERPT_CHARS).collect(),
            gate: gate.position,
            gate_name: gate.label.to_string(),
            parameters: params,
            wave_function: wave.rounded(),
            vector_intention: vi.rounded(),
            golden_signatures: GoldenSignatures::from_constants(field.constants()),
        }
    }
}

impl Default for VerseDecoder {
    fn default() -> Self {
        Self::new(IntentionIntegrator::default())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
