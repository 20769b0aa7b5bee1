//! Direction - One unit of robot actuation
//!
//! Direction is a Value Object. Each variant carries a fixed unit delta
//! and a fixed time cost; the costs are asymmetric on purpose.

use core::str::FromStr;

/// Time cost of a move, in abstract units.
///
/// The adapter layer decides how long one unit lasts in wall time.
pub type TimeCost = u32;

/// The four moves a robot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Towards the last row
    Down,
    /// Towards column 0
    Left,
    /// Towards the last column
    Right,
}

impl Direction {
    /// Unit delta as `(dx, dy)`. Rows grow downwards.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Actuation time for this move
    pub fn time_cost(self) -> TimeCost {
        match self {
            Direction::Up => 0,
            Direction::Down => 2,
            Direction::Left | Direction::Right => 1,
        }
    }

    /// Single-letter wire symbol ("U", "D", "L", "R")
    pub fn symbol(self) -> &'static str {
        match self {
            Direction::Up => "U",
            Direction::Down => "D",
            Direction::Left => "L",
            Direction::Right => "R",
        }
    }

    /// Get all directions (useful for iteration)
    pub fn all() -> &'static [Direction] {
        &[
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(Direction::Up),
            "D" => Ok(Direction::Down),
            "L" => Ok(Direction::Left),
            "R" => Ok(Direction::Right),
            other => Err(ParseDirectionError {
                value: other.to_string(),
            }),
        }
    }
}

/// A move symbol outside {U, D, L, R}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    pub value: String,
}

impl core::fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Unrecognized move: {:?}", self.value)
    }
}

impl std::error::Error for ParseDirectionError {}
