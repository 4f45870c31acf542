//! Board representation for Gomoku

pub mod board;


use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-exports
pub use board::BoardState;

/// Default board size (19x19)
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Largest board a `BoardState` accepts
pub const MAX_BOARD_SIZE: usize = 64;

/// Stone colors.
///
/// Encoded so that the opposing color is the arithmetic negation:
/// `-Stone::Black == Stone::White` and `-Stone::Empty == Stone::Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
#[repr(i8)]
pub enum Stone {
    #[default]
    Empty = 0,
    Black = 1,
    White = -1,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        -self
    }

    /// Numeric encoding used on the wire (-1, 0, 1)
    #[inline]
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Symbol used by the text rendering of a board
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
            Stone::Empty => '.',
        }
    }
}

impl std::ops::Neg for Stone {
    type Output = Stone;

    #[inline]
    fn neg(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }
}

impl From<Stone> for i8 {
    fn from(stone: Stone) -> i8 {
        stone.value()
    }
}

impl TryFrom<i8> for Stone {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Stone::Empty),
            1 => Ok(Stone::Black),
            -1 => Ok(Stone::White),
            other => Err(format!("invalid stone value {other}")),
        }
    }
}

/// Position on the board (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index on a board of the given size
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: idx / size,
            col: idx % size,
        }
    }

    /// Check signed coordinates against a board size
    #[inline]
    pub fn is_valid(row: i32, col: i32, size: usize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < size && (col as usize) < size
    }

    /// Neighbor at (row + dr, col + dc), if it lies on the board
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, size: usize) -> Option<Pos> {
        let r = self.row as i32 + dr;
        let c = self.col as i32 + dc;
        if Pos::is_valid(r, c, size) {
            Some(Pos::new(r as usize, c as usize))
        } else {
            None
        }
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board size {0} is outside 1..={max}", max = MAX_BOARD_SIZE)]
    InvalidSize(usize),
    #[error("Position {pos} is outside a board of size {size}")]
    OutOfRange { pos: Pos, size: usize },
    #[error("Color to move must be Black or White")]
    InvalidColor,
}
