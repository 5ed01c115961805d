//! Bitstream encoder
//!
//! Renders a validated [`Module`] as its configuration word: four rows of
//! eight bits, written most significant bit first.
//!
//! ```text
//! row 1   south truth table (reversed enumeration)
//! row 2   east truth table (reversed enumeration)
//! row 3   n_idx w_idx | sw_w1 sw_w0 sw_n1 sw_n0 | async async
//! row 4   0 0 0 | out_e1 out_e0 out_s1 out_s0 | e_idx
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

use crate::expr::Expr;
use crate::lane::Lane;
use crate::module::Module;

/// Truth table of a function over the three input sides.
///
/// Assignment `i` sets W = bit 0, N = bit 1, E = bit 2 of `i`, so enumerating
/// `i = 0..8` varies E slowest and W fastest. Bit `i` of the table holds the
/// result for assignment `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TruthTable(u8);

impl TruthTable {
    pub const ZERO: TruthTable = TruthTable(0);

    pub fn of(expr: &Expr) -> TruthTable {
        let bits = assignments()
            .enumerate()
            .filter(|&(_, inputs)| expr.evaluate(inputs))
            .fold(0u8, |bits, (i, _)| bits | (1 << i));
        TruthTable(bits)
    }

    /// Result for assignment `i` (0..8)
    pub fn get(self, i: usize) -> bool {
        self.0 >> i & 1 == 1
    }

    /// Results in enumeration order, `'0'`/`'1'` per assignment
    pub fn enumeration(self) -> String {
        (0..8).map(|i| if self.get(i) { '1' } else { '0' }).collect()
    }

    /// The reversed enumeration, which is the row emitted in the word.
    ///
    /// Reversing the enumeration string and reading it MSB first gives back
    /// the table bits unchanged.
    pub fn row(self) -> u8 {
        self.0
    }
}

/// The eight `[w, n, e]` input assignments, E slowest and W fastest
pub fn assignments() -> impl Iterator<Item = [bool; 3]> {
    (0..8u8).map(|i| [i & 1 != 0, i & 2 != 0, i & 4 != 0])
}

/// A module's configuration word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigWord {
    rows: [u8; 4],
}

impl ConfigWord {
    /// Rows as `'0'`/`'1'` strings, most significant bit first
    pub fn rows(&self) -> [String; 4] {
        self.rows.map(|row| format!("{:08b}", row))
    }
}

impl fmt::Display for ConfigWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.rows;
        write!(f, "{:08b}\n{:08b}\n{:08b}\n{:08b}", a, b, c, d)
    }
}

impl Serialize for ConfigWord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

/// Encode a validated module. Never fails.
pub fn encode(module: &Module) -> ConfigWord {
    let [e_idx, n_idx, w_idx] = input_flags(module);

    let row3 = n_idx << 7 | w_idx << 6 | switch_flags(module) << 2 | async_flags(module);
    let row4 = output_flags(module) << 1 | e_idx;

    ConfigWord {
        rows: [
            module.south().truth_table().row(),
            module.east().truth_table().row(),
            row3,
            row4,
        ],
    }
}

/// Lane index used on each input side, as `[e, n, w]`; 0 for an unused side.
///
/// Both slots are scanned in order and a later lane overwrites an earlier one
/// on the same side.
fn input_flags(module: &Module) -> [u8; 3] {
    let mut flags = [0u8; 3];
    for slot in module.slots() {
        for lane in slot.inputs() {
            if let Some(class) = lane.direction().input_class() {
                flags[2 - class] = lane.index();
            }
        }
    }
    flags
}

/// Four bits: switches entering at w1, w0, n1, n0
fn switch_flags(module: &Module) -> u8 {
    [Lane::W1, Lane::W0, Lane::N1, Lane::N0]
        .into_iter()
        .fold(0, |bits, lane| bits << 1 | module.has_switch_from(lane) as u8)
}

/// Two bits, both taken from the east slot.
// The south slot's sync flag never reaches the word.
fn async_flags(module: &Module) -> u8 {
    if module.east().sync() { 0b00 } else { 0b11 }
}

/// Four bits: east output is e1, e0; south output is s1, s0
fn output_flags(module: &Module) -> u8 {
    let east = module.east().output();
    let south = module.south().output();
    [(east, Lane::E1), (east, Lane::E0), (south, Lane::S1), (south, Lane::S0)]
        .into_iter()
        .fold(0, |bits, (output, lane)| bits << 1 | (output == Some(lane)) as u8)
}
