//! Lane model
//!
//! A lane is one of the eight physical connection points of a tile: a side
//! (west, north, east, south) and a lane index (0 or 1) on that side.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Side of the tile a lane sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    West,
    North,
    East,
    South,
}

impl Direction {
    /// The side facing this one across the tile (E<->W, N<->S)
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }

    /// Position of this side in the evaluation input vector: W=0, N=1, E=2.
    ///
    /// South never feeds the logic, so it has no slot.
    pub const fn input_class(self) -> Option<usize> {
        match self {
            Direction::West => Some(0),
            Direction::North => Some(1),
            Direction::East => Some(2),
            Direction::South => None,
        }
    }

    /// Functions may only drive the south or east side
    pub const fn is_output_side(self) -> bool {
        matches!(self, Direction::South | Direction::East)
    }

    pub const fn letter(self) -> char {
        match self {
            Direction::West => 'w',
            Direction::North => 'n',
            Direction::East => 'e',
            Direction::South => 's',
        }
    }

    pub fn from_letter(letter: char) -> Option<Direction> {
        match letter {
            'w' => Some(Direction::West),
            'n' => Some(Direction::North),
            'e' => Some(Direction::East),
            's' => Some(Direction::South),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::West => "west",
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
        };
        f.write_str(name)
    }
}

/// A physical connection point: side plus lane index (0 or 1).
///
/// Only the eight valid combinations can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lane {
    direction: Direction,
    index: u8,
}

impl Lane {
    pub const W0: Lane = Lane { direction: Direction::West, index: 0 };
    pub const W1: Lane = Lane { direction: Direction::West, index: 1 };
    pub const N0: Lane = Lane { direction: Direction::North, index: 0 };
    pub const N1: Lane = Lane { direction: Direction::North, index: 1 };
    pub const E0: Lane = Lane { direction: Direction::East, index: 0 };
    pub const E1: Lane = Lane { direction: Direction::East, index: 1 };
    pub const S0: Lane = Lane { direction: Direction::South, index: 0 };
    pub const S1: Lane = Lane { direction: Direction::South, index: 1 };

    pub const ALL: [Lane; 8] = [
        Lane::W0, Lane::W1, Lane::N0, Lane::N1, Lane::E0, Lane::E1, Lane::S0, Lane::S1,
    ];

    /// Returns `None` for an index other than 0 or 1
    pub const fn new(direction: Direction, index: u8) -> Option<Lane> {
        if index > 1 {
            return None;
        }
        Some(Lane { direction, index })
    }

    pub const fn direction(self) -> Direction {
        self.direction
    }

    pub const fn index(self) -> u8 {
        self.index
    }

    /// Same side, other index (w0 <-> w1)
    pub const fn paired_index(self) -> Lane {
        Lane { direction: self.direction, index: 1 - self.index }
    }

    /// Opposite side, same index (w0 <-> e0, n1 <-> s1)
    pub const fn opposite_side(self) -> Lane {
        Lane { direction: self.direction.opposite(), index: self.index }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.letter(), self.index)
    }
}

/// A lane token outside `w0 w1 n0 n1 e0 e1 s0 s1`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid lane '{0}' (expected one of w0 w1 n0 n1 e0 e1 s0 s1)")]
pub struct ParseLaneError(pub String);

impl FromStr for Lane {
    type Err = ParseLaneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(side), Some(index), None) => {
                let direction = Direction::from_letter(side);
                let index = index.to_digit(2);
                direction.zip(index).and_then(|(d, i)| Lane::new(d, i as u8))
            }
            _ => None,
        };
        parsed.ok_or_else(|| ParseLaneError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_index() {
        assert_eq!(Lane::W0.paired_index(), Lane::W1);
        assert_eq!(Lane::W1.paired_index(), Lane::W0);
        assert_eq!(Lane::S1.paired_index(), Lane::S0);
        for lane in Lane::ALL {
            assert_eq!(lane.paired_index().paired_index(), lane);
            assert_eq!(lane.paired_index().direction(), lane.direction());
        }
    }

    #[test]
    fn test_opposite_side() {
        assert_eq!(Lane::W0.opposite_side(), Lane::E0);
        assert_eq!(Lane::E1.opposite_side(), Lane::W1);
        assert_eq!(Lane::N1.opposite_side(), Lane::S1);
        assert_eq!(Lane::S0.opposite_side(), Lane::N0);
        for lane in Lane::ALL {
            assert_eq!(lane.opposite_side().opposite_side(), lane);
            assert_eq!(lane.opposite_side().index(), lane.index());
        }
    }

    #[test]
    fn test_parse_and_display() {
        for lane in Lane::ALL {
            let text = lane.to_string();
            assert_eq!(text.parse::<Lane>().unwrap(), lane);
        }
        assert!("w2".parse::<Lane>().is_err());
        assert!("x0".parse::<Lane>().is_err());
        assert!("w01".parse::<Lane>().is_err());
        assert!("".parse::<Lane>().is_err());
    }

    #[test]
    fn test_new_rejects_bad_index() {
        assert_eq!(Lane::new(Direction::North, 1), Some(Lane::N1));
        assert_eq!(Lane::new(Direction::North, 2), None);
    }

    #[test]
    fn test_input_class() {
        assert_eq!(Direction::West.input_class(), Some(0));
        assert_eq!(Direction::North.input_class(), Some(1));
        assert_eq!(Direction::East.input_class(), Some(2));
        assert_eq!(Direction::South.input_class(), None);
    }
}
