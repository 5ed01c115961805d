//! Wiring validator
//!
//! Physical constraints of a tile, checked eagerly while functions,
//! pass-throughs and modules are constructed:
//!
//! - south lanes never feed logic
//! - a function reads at most one lane index per side
//! - a module never reads both a lane and its opposite-side partner
//! - a pass-through joins a lane with its opposite-side partner
//! - functions drive only the south or east side, one function per side

use crate::error::WiringError;
use crate::lane::{Direction, Lane};

/// Input lanes registered into one function, in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSet {
    lanes: Vec<Lane>,
}

impl InputSet {
    pub fn new() -> Self {
        Self { lanes: Vec::new() }
    }

    /// Register every lane in `lanes` in order, stopping at the first violation
    pub fn from_lanes(lanes: impl IntoIterator<Item = Lane>) -> Result<Self, WiringError> {
        let mut set = Self::new();
        for lane in lanes {
            set.register(lane)?;
        }
        Ok(set)
    }

    pub fn register(&mut self, lane: Lane) -> Result<(), WiringError> {
        if lane.direction() == Direction::South {
            return Err(WiringError::InvalidInputSide { lane });
        }
        let paired = lane.paired_index();
        if self.lanes.contains(&paired) {
            return Err(WiringError::ConflictingLanes { lane, paired });
        }
        self.lanes.push(lane);
        Ok(())
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn into_lanes(self) -> Vec<Lane> {
        self.lanes
    }
}

/// Input lanes claimed across all functions of one module
#[derive(Debug, Clone, Default)]
pub struct ModuleLanes {
    claimed: Vec<Lane>,
}

impl ModuleLanes {
    pub fn new() -> Self {
        Self { claimed: Vec::new() }
    }

    /// Claim `lane` for function `function`. Fails if its opposite-side lane
    /// was claimed earlier by any function of the module, this one included.
    pub fn claim(&mut self, function: usize, lane: Lane) -> Result<(), WiringError> {
        let opposite = lane.opposite_side();
        if self.claimed.contains(&opposite) {
            return Err(WiringError::ModuleLaneConflict { function, lane, opposite });
        }
        self.claimed.push(lane);
        Ok(())
    }
}

pub fn check_output_side(lane: Lane) -> Result<(), WiringError> {
    if lane.direction().is_output_side() {
        Ok(())
    } else {
        Err(WiringError::InvalidOutputSide { lane })
    }
}

pub fn check_switch(a: Lane, b: Lane) -> Result<(), WiringError> {
    if a.opposite_side() == b {
        Ok(())
    } else {
        Err(WiringError::IllegalSwitch { a, b })
    }
}

/// At most two functions, and two functions never share an output side
pub fn check_output_sides(outputs: &[Lane]) -> Result<(), WiringError> {
    match outputs {
        [] | [_] => Ok(()),
        [first, second] if first.direction() == second.direction() => {
            Err(WiringError::DuplicateOutputSide { side: first.direction() })
        }
        [_, _] => Ok(()),
        _ => Err(WiringError::TooManyFunctions { count: outputs.len() }),
    }
}
