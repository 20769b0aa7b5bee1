//! Position - Where the robot stands
//!
//! A Value Object that can only hold a valid cell index.

use super::direction::Direction;

/// Width and height of the grid
pub const GRID_SIZE: usize = 3;

/// A cell coordinate, always inside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    /// Top-left corner, where every robot starts
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// Returns `None` when either coordinate is off the grid
    pub fn new(x: usize, y: usize) -> Option<Self> {
        (x < GRID_SIZE && y < GRID_SIZE).then_some(Self { x, y })
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    /// Whether `direction` keeps the robot on the grid, judged from here.
    pub fn can_move(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.y > 0,
            Direction::Down => self.y < GRID_SIZE - 1,
            Direction::Left => self.x > 0,
            Direction::Right => self.x < GRID_SIZE - 1,
        }
    }

    /// Shift by the direction's unit delta.
    ///
    /// Callers check [`Position::can_move`] first.
    ///
    /// # Panics
    ///
    /// Panics if the move would leave the grid.
    pub fn translate(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.x
            .checked_add_signed(dx)
            .zip(self.y.checked_add_signed(dy))
            .and_then(|(x, y)| Position::new(x, y))
            .unwrap_or_else(|| panic!("move {} from {} leaves the grid", direction, self))
    }

    /// Checked move: `can_move` then `translate`
    pub fn step(&self, direction: Direction) -> Option<Position> {
        self.can_move(direction).then(|| self.translate(direction))
    }

    /// Every cell of the grid, row by row
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Position { x, y }))
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
