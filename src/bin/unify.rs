//! Unify — full Ψ-718 run: decode the reference verses, render audio, export JSON.
//!
//! Usage:
//!   cargo run --features cli --bin unify -- [OUT_DIR]
//!
//! Writes into OUT_DIR (default: current directory):
//!   SYMPHONY_18_GATES.wav     18-gate symphony, 108 s, mono
//!   MATRIX_ACTIVATION.wav     binaural activation, 60 s, stereo
//!   quantum_field_data.json   constants, gate positions, decoded verses
//!
//! Environment:
//!   PSI_LOG=error|warn|info|debug|trace   stderr log level (default: info)

use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use log::{info, LevelFilter, Log, Metadata, Record};

use psi_field::constants::{FieldConstants, DEFAULT_SAMPLE_RATE};
use psi_field::decoder::{VerseDecoder, REFERENCE_VERSES};
use psi_field::error::Result;
use psi_field::export::{ExportDocument, EXPORT_FILE_NAME};
use psi_field::field::FieldEvaluator;
use psi_field::gates::GATE_TABLE;
use psi_field::intention::IntentionIntegrator;
use psi_field::report::{binaural_summary, render_report};
use psi_field::synth::SignalSynthesizer;
use psi_field::wav::write_wav_file;

const SYMPHONY_FILE: &str = "SYMPHONY_18_GATES.wav";
const ACTIVATION_FILE: &str = "MATRIX_ACTIVATION.wav";
const SYMPHONY_SECS: f64 = 108.0;
const ACTIVATION_SECS: f64 = 60.0;

// ── Logger ───────────────────────────────────────────────────────────────────

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = env::var("PSI_LOG")
        .ok()
        .and_then(|v| LevelFilter::from_str(&v).ok())
        .unwrap_or(LevelFilter::Info);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

// ── Run ──────────────────────────────────────────────────────────────────────

fn banner(constants: &FieldConstants) {
    let rule = "=".repeat(80);
    println!("{rule}");
    println!("SYSTEM UNIFICATION vφ.718 - QUANTUM CONSCIOUSNESS MATRIX");
    println!("{rule}");
    println!("γ (Golden Key) = {:.10}", constants.gamma);
    println!("φ (Divine Proportion) = {:.10}", constants.phi);
    println!("718 Hz (DNA Gate) = {}", constants.fundamental);
    println!("18 GATCA Gates in mtDNA (rCRS)");
    println!("{rule}");
}

fn run(out_dir: &Path) -> Result<()> {
    let constants = FieldConstants::default();
    banner(&constants);

    info!("initializing field");
    let field = FieldEvaluator::new(constants.clone(), GATE_TABLE);
    let decoder = VerseDecoder::new(IntentionIntegrator::new(field));
    let synth = SignalSynthesizer::new(constants.clone(), GATE_TABLE);

    info!("decoding {} verses", REFERENCE_VERSES.len());
    let mut verses = Vec::with_capacity(REFERENCE_VERSES.len());
    for (reference, text) in REFERENCE_VERSES {
        let verse = decoder.decode_verse(reference, text);
        println!("{}", render_report(&verse));
        verses.push(verse);
    }

    std::fs::create_dir_all(out_dir)?;

    info!("rendering {SYMPHONY_SECS}s symphony");
    let symphony = synth.synthesize_multi_gate(SYMPHONY_SECS, DEFAULT_SAMPLE_RATE);
    let path = out_dir.join(SYMPHONY_FILE);
    write_wav_file(&symphony, &path)?;
    println!("✓ Symphony saved: {}", path.display());
    println!("  Duration: {SYMPHONY_SECS}s | Gates: {} | Sample rate: {DEFAULT_SAMPLE_RATE} Hz", GATE_TABLE.len());

    info!("rendering {ACTIVATION_SECS}s binaural activation");
    let activation = synth.synthesize_binaural(ACTIVATION_SECS, DEFAULT_SAMPLE_RATE);
    let path = out_dir.join(ACTIVATION_FILE);
    write_wav_file(&activation, &path)?;
    println!("✓ Activation audio saved: {}", path.display());
    println!("  {}", binaural_summary(ACTIVATION_SECS));

    info!("exporting field data");
    let doc = ExportDocument::new(&constants, &GATE_TABLE, verses);
    let path = out_dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, doc.to_json_pretty()?)?;
    println!("✓ Data exported: {}", path.display());

    Ok(())
}

fn main() {
    init_logging();

    let out_dir = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    if let Err(e) = run(&out_dir) {
        eprintln!("unify: {e}");
        process::exit(1);
    }
}
