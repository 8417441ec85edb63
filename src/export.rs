//! Structured export of a full decoding run.
//!
//! # JSON layout
//!
//! ```text
//! {
//!   "system": "Ψ-718 Unified Field",
//!   "constants": { "phi", "gamma", "718_hz", "schumann", "lunar" },
//!   "dna_gates": [u32; 18],          gate positions in slot order
//!   "decoded_verses": [DecodedVerse] in decode order
//! }
//! ```
//!
//! Floats are stored at full precision; rounding is a presentation concern of
//! [`crate::report`]. Requires the `serde` feature; [`ExportDocument::to_json_pretty`]
//! additionally requires `cli`.

use crate::constants::FieldConstants;
use crate::decoder::DecodedVerse;
use crate::gates::GateTable;

/// Name recorded in the `system` field.
pub const SYSTEM_NAME: &str = "Ψ-718 Unified Field";

/// File name the binary writes the document to.
pub const EXPORT_FILE_NAME: &str = "quantum_field_data.json";

/// Constants block of the export.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct ExportConstants {
    /// φ.
    pub phi: f64,
    /// γ = 1/φ.
    pub gamma: f64,
    /// Fundamental frequency.
    #[serde(rename = "718_hz")]
    pub fundamental_hz: f64,
    /// Schumann resonance.
    pub schumann: f64,
    /// Lunar cycle.
    pub lunar: f64,
}

impl From<&FieldConstants> for ExportConstants {
    fn from(c: &FieldConstants) -> Self {
        Self {
            phi: c.phi,
            gamma: c.gamma,
            fundamental_hz: c.fundamental,
            schumann: c.schumann,
            lunar: c.lunar,
        }
    }
}

/// Top-level export document.
///
/// # Example
///
/// ```rust,ignore
/// use psi_field::decoder::{VerseDecoder, REFERENCE_VERSES};
/// use psi_field::export::ExportDocument;
///
/// let decoder = VerseDecoder::default();
/// let verses = REFERENCE_VERSES.iter().map(|(r, t)| decoder.decode_verse(r, t)).collect();
/// let doc = ExportDocument::new(&FieldConstants::default(), &GATE_TABLE, verses);
/// let json = serde_json::to_string_pretty(&doc).unwrap();
/// ```
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct ExportDocument {
    /// Always [`SYSTEM_NAME`] for new documents.
    pub system: String,
    /// Physical and golden-ratio constants.
    pub constants: ExportConstants,
    /// Gate positions in slot order.
    pub dna_gates: Vec<u32>,
    /// Decoded verses in decode order.
    pub decoded_verses: Vec<DecodedVerse>,
}

impl ExportDocument {
    /// Assemble a document from the run's configuration and results.
    pub fn new(constants: &FieldConstants, gates: &GateTable, decoded_verses: Vec<DecodedVerse>) -> Self {
        Self {
            system: SYSTEM_NAME.to_string(),
            constants: ExportConstants::from(constants),
            dna_gates: gates.positions().to_vec(),
            decoded_verses,
        }
    }

    /// Number of decoded verses.
    pub fn verse_count(&self) -> usize {
        self.decoded_verses.len()
    }

    /// Look up a decoded verse by reference.
    pub fn find_verse(&self, reference: &str) -> Option<&DecodedVerse> {
        self.decoded_verses.iter().find(|v| v.reference == reference)
    }

    /// Pretty-printed JSON with 2-space indentation; non-ASCII kept as UTF-8.
    #[cfg(feature = "cli")]
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
