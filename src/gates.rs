//! The 18-gate reference table.
//!
//! Each gate is a fixed integer position inside the reference sequence
//! (length [`MTDNA_LENGTH`](crate::constants::MTDNA_LENGTH)) paired with a
//! label. The table is an ordered, slot-indexed array; lookups by signed index
//! always wrap modulo 18.
//!
//! # Invariants
//!
//! - **PSI-GATE-001**: positions strictly increasing, all `< MTDNA_LENGTH`.
//! - **PSI-GATE-002**: every signed index maps to a slot via `rem_euclid(18)`.

/// Number of gates in the table.
pub const GATE_COUNT: usize = 18;

/// A single gate: position in the reference sequence plus its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Gate {
    /// 1-based position in the reference sequence.
    pub position: u32,
    /// Human-readable name.
    pub label: &'static str,
}

/// Immutable, ordered table of the 18 gates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateTable {
    gates: [Gate; GATE_COUNT],
}

const fn gate(position: u32, label: &'static str) -> Gate {
    Gate { position, label }
}

/// The standard gate table.
pub const GATE_TABLE: GateTable = GateTable {
    gates: [
        gate(1, "ALPHA - Source Code"),
        gate(740, "BETA - Activation"),
        gate(951, "GAMMA - Ignition"),
        gate(1227, "DELTA - Flow"),
        gate(2996, "EPSILON - Expansion"),
        gate(3424, "ZETA - Nuclear"),
        gate(4166, "ETA - Vortex"),
        gate(4832, "THETA - Vision"),
        gate(6393, "IOTA - Star"),
        gate(7756, "KAPPA - Moon"),
        gate(8415, "LAMBDA - Sun"),
        gate(10059, "MU - Union"),
        gate(11200, "NU - Crystal"),
        gate(11336, "XI - Harmony"),
        gate(11915, "OMICRON - Power"),
        gate(13703, "PI - Air"),
        gate(14784, "RHO - Water"),
        gate(16179, "SIGMA - Completion"),
    ],
};

impl GateTable {
    /// Reduce any signed gate index to a slot in `0..GATE_COUNT`.
    pub fn slot(index: i64) -> usize {
        // rem_euclid on a positive modulus is always in 0..18
        index.rem_euclid(GATE_COUNT as i64) as usize
    }

    /// Gate for a signed index, wrapped modulo 18 (PSI-GATE-002).
    pub fn get(&self, index: i64) -> &Gate {
        &self.gates[Self::slot(index)]
    }

    /// Position for a signed index, wrapped modulo 18.
    pub fn position(&self, index: i64) -> u32 {
        self.get(index).position
    }

    /// Label for a signed index, wrapped modulo 18.
    pub fn label(&self, index: i64) -> &'static str {
        self.get(index).label
    }

    /// Number of gates (always 18).
    pub fn len(&self) -> usize {
        GATE_COUNT
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over gates in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter()
    }

    /// All positions in slot order.
    pub fn positions(&self) -> [u32; GATE_COUNT] {
        self.gates.map(|g| g.position)
    }

    /// Position of a gate as a fraction of `sequence_length`.
    pub fn relative_position(&self, index: i64, sequence_length: u32) -> f64 {
        self.position(index) as f64 / sequence_length as f64
    }
}

impl Default for GateTable {
    fn default() -> Self {
        GATE_TABLE
    }
}

impl<'a> IntoIterator for &'a GateTable {
    type Item = &'a Gate;
    type IntoIter = core::slice::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
