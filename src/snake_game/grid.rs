//! Board geometry: cell size, board bounds and conversions between grid cells
//! and board coordinates.

use std::ops;
use serde::{Serialize, Deserialize};

/// Edge length of one grid cell, in board units.
pub const SIZE: i32 = 40;

pub const BOARD_WIDTH:  i32 = 800;
pub const BOARD_HEIGHT: i32 = 600;

#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Offset of one step in this direction, in cells. Board y grows downwards.
    pub fn to_cell_offset(self) -> Position {
        match self {
            Direction::Up    => Position { x:  0, y: -1 },
            Direction::Down  => Position { x:  0, y:  1 },
            Direction::Left  => Position { x: -1, y:  0 },
            Direction::Right => Position { x:  1, y:  0 },
        }
    }
}

/// A point on the board, in board units. Everything the game places is kept
/// on multiples of [`SIZE`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Top-left corner of the cell at `column`, `row`.
    pub const fn from_cell(column: i32, row: i32) -> Self {
        Self { x: column * SIZE, y: row * SIZE }
    }

    /// The cell containing this position (floor division, so negative
    /// positions map to negative cells).
    pub fn cell(self) -> (i32, i32) {
        (self.x.div_euclid(SIZE), self.y.div_euclid(SIZE))
    }

    pub fn is_grid_aligned(self) -> bool {
        self.x.rem_euclid(SIZE) == 0 && self.y.rem_euclid(SIZE) == 0
    }

    /// One full cell further along `direction`.
    pub fn stepped(self, direction: Direction) -> Self {
        let offset = direction.to_cell_offset();
        self + Position::new(offset.x * SIZE, offset.y * SIZE)
    }
}

impl ops::Add<Self> for Position {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Position { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

/// Inclusive on both edges, so a head sitting exactly on x == BOARD_WIDTH or
/// y == BOARD_HEIGHT is still inside.
pub fn is_on_board(pt: Position) -> bool {
    (0..=BOARD_WIDTH).contains(&pt.x) && (0..=BOARD_HEIGHT).contains(&pt.y)
}
