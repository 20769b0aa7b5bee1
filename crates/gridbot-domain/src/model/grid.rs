//! Grid - The occupancy view of the robot's position

use super::position::{Position, GRID_SIZE};

/// What a single cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Robot,
}

impl Cell {
    /// Display symbol: " " for empty, "R" for the robot
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => " ",
            Cell::Robot => "R",
        }
    }
}

/// A fixed N×N board with exactly one robot cell.
///
/// `Grid` is `Copy`: every update produces a new value and earlier
/// snapshots stay untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Indexed as `cells[y][x]`
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// An otherwise empty grid with the robot on `position`
    pub fn with_robot_at(position: Position) -> Self {
        let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        cells[position.y()][position.x()] = Cell::Robot;
        Self { cells }
    }

    pub fn cell(&self, position: Position) -> Cell {
        self.cells[position.y()][position.x()]
    }

    /// Rows from top (`y = 0`) to bottom
    pub fn rows(&self) -> &[[Cell; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Where the robot cell is
    pub fn robot_position(&self) -> Option<Position> {
        Position::all().find(|p| self.cell(*p) == Cell::Robot)
    }

    /// Number of robot cells; 1 for every grid built through this API
    pub fn robot_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Robot)
            .count()
    }

    /// A copy with `from` cleared and `to` marked.
    pub fn moved(&self, from: Position, to: Position) -> Grid {
        let mut next = *self;
        next.cells[from.y()][from.x()] = Cell::Empty;
        next.cells[to.y()][to.x()] = Cell::Robot;
        next
    }
}
