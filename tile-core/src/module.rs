//! Functions, pass-throughs and modules
//!
//! Everything here is validated on construction and immutable afterwards.
//! A [`Module`] always holds exactly two function slots: slot 0 drives the
//! south side, slot 1 the east side, and an undeclared slot holds the
//! constant-false [`FunctionSlot::Null`].

use crate::encoder::TruthTable;
use crate::error::WiringError;
use crate::expr::Expr;
use crate::lane::{Direction, Lane};
use crate::validate::{self, InputSet, ModuleLanes};

/// A boolean function driving one output lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    expr: Expr,
    output: Lane,
    sync: bool,
    inputs: Vec<Lane>,
}

impl Function {
    /// Validates the input lanes of `expr`, then the output side
    pub fn new(expr: Expr, output: Lane, sync: bool) -> Result<Self, WiringError> {
        let inputs = InputSet::from_lanes(expr.reachable_inputs())?.into_lanes();
        validate::check_output_side(output)?;
        Ok(Self { expr, output, sync, inputs })
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn output(&self) -> Lane {
        self.output
    }

    pub fn sync(&self) -> bool {
        self.sync
    }

    /// Input lanes in first-occurrence order
    pub fn inputs(&self) -> &[Lane] {
        &self.inputs
    }
}

/// One of the two function slots of a module
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FunctionSlot {
    /// Padding for an undeclared function: constant false, not sync, no inputs
    #[default]
    Null,
    Logic(Function),
}

impl FunctionSlot {
    pub fn function(&self) -> Option<&Function> {
        match self {
            FunctionSlot::Null => None,
            FunctionSlot::Logic(function) => Some(function),
        }
    }

    pub fn truth_table(&self) -> TruthTable {
        match self {
            FunctionSlot::Null => TruthTable::ZERO,
            FunctionSlot::Logic(function) => TruthTable::of(function.expr()),
        }
    }

    pub fn sync(&self) -> bool {
        self.function().is_some_and(Function::sync)
    }

    pub fn inputs(&self) -> &[Lane] {
        self.function().map(Function::inputs).unwrap_or(&[])
    }

    pub fn output(&self) -> Option<Lane> {
        self.function().map(Function::output)
    }
}

/// A pass-through wire between two opposite-side lanes with the same index.
///
/// Stored with the incoming (west or north) end first, so `w1 <-> e1` and
/// `e1 <-> w1` are the same switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Switch {
    incoming: Lane,
    outgoing: Lane,
}

impl Switch {
    pub fn new(a: Lane, b: Lane) -> Result<Self, WiringError> {
        validate::check_switch(a, b)?;
        let (incoming, outgoing) = match a.direction() {
            Direction::East | Direction::South => (b, a),
            Direction::West | Direction::North => (a, b),
        };
        Ok(Self { incoming, outgoing })
    }

    pub fn incoming(&self) -> Lane {
        self.incoming
    }

    pub fn outgoing(&self) -> Lane {
        self.outgoing
    }
}

/// A validated tile description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: String,
    slots: [FunctionSlot; 2],
    switches: Vec<Switch>,
}

impl Module {
    /// Validates the function set, then pads and orders the slots.
    ///
    /// `functions` is in declaration order; lane conflicts report the index
    /// into it.
    pub fn new(
        name: impl Into<String>,
        functions: Vec<Function>,
        switches: Vec<Switch>,
    ) -> Result<Self, WiringError> {
        let outputs: Vec<Lane> = functions.iter().map(Function::output).collect();
        validate::check_output_sides(&outputs)?;

        let mut claimed = ModuleLanes::new();
        for (index, function) in functions.iter().enumerate() {
            for &lane in function.inputs() {
                claimed.claim(index, lane)?;
            }
        }

        let mut functions = functions.into_iter().map(FunctionSlot::Logic);
        let mut slots = [
            functions.next().unwrap_or_default(),
            functions.next().unwrap_or_default(),
        ];
        if slots[0].output().is_some_and(|lane| lane.direction() == Direction::East) {
            slots.swap(0, 1);
        }

        Ok(Self {
            name: name.into(),
            slots,
            switches,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[FunctionSlot; 2] {
        &self.slots
    }

    /// Slot 0
    pub fn south(&self) -> &FunctionSlot {
        &self.slots[0]
    }

    /// Slot 1
    pub fn east(&self) -> &FunctionSlot {
        &self.slots[1]
    }

    pub fn has_switch_from(&self, incoming: Lane) -> bool {
        self.switches.iter().any(|switch| switch.incoming() == incoming)
    }
}
