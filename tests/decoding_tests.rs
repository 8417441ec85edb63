//! End-to-end decoding tests: reference table, text encoding, field sample,
//! intention vector and text report.

use psi_field::constants::{FieldConstants, MTDNA_LENGTH};
use psi_field::decoder::{text_to_params, VerseDecoder, REFERENCE_VERSES, VERSE_MAPPINGS};
use psi_field::field::{FieldEvaluator, QuantumState};
use psi_field::gates::GATE_TABLE;
use psi_field::intention::IntentionIntegrator;
use psi_field::report::render_report;

// ─── helpers ─────────────────────────────────────────────────────────────────

fn decoder() -> VerseDecoder {
    VerseDecoder::new(IntentionIntegrator::new(FieldEvaluator::new(
        FieldConstants::default(),
        GATE_TABLE,
    )))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[test]
fn test_reference_verses_decode_through_table() {
    let d = decoder();
    for (reference, text) in REFERENCE_VERSES {
        let v = d.decode_verse(reference, text);
        let mapped = VERSE_MAPPINGS
            .iter()
            .find(|(r, _)| *r == reference)
            .map(|(_, p)| *p)
            .expect("every reference verse is in the table");

        assert_eq!(v.parameters, mapped, "{reference}: parameters");
        assert_eq!(v.gate, GATE_TABLE.position(mapped.gate_index), "{reference}: gate");
        assert!(v.gate < MTDNA_LENGTH);
        assert!(QuantumState::ALL.contains(&v.wave_function.state));
        assert!(
            (0.0..=1.0).contains(&v.wave_function.coherence),
            "{reference}: coherence {}",
            v.wave_function.coherence
        );
        assert!(v.vector_intention.magnitude.is_finite() && v.vector_intention.magnitude >= 0.0);
        assert_eq!(
            v.vector_intention.teleport_ready,
            v.vector_intention.coherence_at_end >= 0.94,
            "{reference}: readiness must follow end coherence"
        );
    }
}

#[test]
fn test_genesis_gate_is_position_one() {
    let v = decoder().decode_verse("Genesis 1:1", "Na początku stworzył Bóg niebo i ziemię.");
    assert_eq!(v.gate, 1);
    assert_eq!(v.parameters.t, 1.0);
    assert_eq!(v.parameters.x, 718.0);
}

#[test]
fn test_decode_is_deterministic() {
    let d = decoder();
    let a = d.decode_verse("John 1:1", "Na początku było Słowo");
    let b = d.decode_verse("John 1:1", "Na początku było Słowo");
    assert_eq!(a, b);
}

#[test]
fn test_unknown_reference_uses_text_on_gate_zero() {
    let d = decoder();
    let text = "Pan jest moim pasterzem, nie brak mi niczego.";
    let v = d.decode_verse("Psalm 23:1", text);
    let (t, x) = text_to_params(text, &FieldConstants::default());

    assert_eq!(v.parameters.gate_index, 0);
    assert_eq!(v.gate, 1);
    assert_eq!((v.parameters.t, v.parameters.x), (t, x));
}

#[test]
fn test_empty_text_on_unknown_reference() {
    let v = decoder().decode_verse("", "");
    assert_eq!((v.parameters.t, v.parameters.x), (1.0, 100.0));
    assert_eq!(v.text, "");
}

#[test]
fn test_report_for_every_reference_verse() {
    let d = decoder();
    for (reference, text) in REFERENCE_VERSES {
        let r = render_report(&d.decode_verse(reference, text));
        assert!(r.contains(&format!("Ψ-718 QUANTUM DECODER | {reference}")));
        assert!(r.contains("[INTERPRETATION]"));
        assert!(r.contains(&format!("/ {MTDNA_LENGTH} (mtDNA rCRS)")));
    }
}
