//! Immutable-per-move board snapshot

use std::fmt;

use super::{BoardError, Pos, Stone, MAX_BOARD_SIZE};
use crate::rules::{find_five_in_row, FiveInRow};

/// The 8 neighbors: 4 axis directions x 2 sides
const NEIGHBORS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Snapshot of an N x N game.
///
/// A successful move never mutates a snapshot: [`BoardState::next`] returns
/// the successor, which differs from its parent in exactly one cell and has
/// the opposite color to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    size: usize,
    /// Row-major cells
    cells: Vec<Stone>,
    /// Color to move
    color: Stone,
    last_move: Option<Pos>,
}

impl BoardState {
    /// Empty board with Black to move
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Self::with_color(size, Stone::Black)
    }

    /// Empty board with the given color to move. `Stone::Empty` is rejected.
    pub fn with_color(size: usize, color: Stone) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        if color == Stone::Empty {
            return Err(BoardError::InvalidColor);
        }
        Ok(Self {
            size,
            cells: vec![Stone::Empty; size * size],
            color,
            last_move: None,
        })
    }

    /// Board pre-populated with arbitrary stones.
    ///
    /// Used to set up positions (puzzles, tests) without going through the
    /// alternating move sequence. Later entries overwrite earlier ones.
    pub fn with_stones(
        size: usize,
        stones: &[(Pos, Stone)],
        color: Stone,
    ) -> Result<Self, BoardError> {
        let mut state = Self::with_color(size, color)?;
        for &(pos, stone) in stones {
            if !state.in_bounds(pos) {
                return Err(BoardError::OutOfRange { pos, size });
            }
            let idx = pos.to_index(size);
            state.cells[idx] = stone;
        }
        Ok(state)
    }

    /// Empty board of the same size with Black to move
    #[must_use]
    pub fn cleared(&self) -> BoardState {
        BoardState {
            size: self.size,
            cells: vec![Stone::Empty; self.cells.len()],
            color: Stone::Black,
            last_move: None,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Color to move
    #[inline]
    pub fn color(&self) -> Stone {
        self.color
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Stone at position
    pub fn value(&self, pos: Pos) -> Result<Stone, BoardError> {
        if !self.in_bounds(pos) {
            return Err(BoardError::OutOfRange {
                pos,
                size: self.size,
            });
        }
        Ok(self.cells[pos.to_index(self.size)])
    }

    /// Stone at position.
    ///
    /// Panics if `pos` is off the board; use [`BoardState::value`] for
    /// untrusted positions.
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index(self.size)]
    }

    /// In bounds and empty. This is the only move-legality predicate.
    #[inline]
    pub fn is_valid_position(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.get(pos) == Stone::Empty
    }

    /// Candidate moves: empty cells with at least one occupied 8-neighbor,
    /// in row-major order.
    ///
    /// An empty board has no candidates. Callers pick the opening move
    /// themselves.
    pub fn legal_moves(&self) -> Vec<Pos> {
        let mut moves = Vec::new();
        for idx in 0..self.cells.len() {
            if self.cells[idx] != Stone::Empty {
                continue;
            }
            let pos = Pos::from_index(idx, self.size);
            let touches_stone = NEIGHBORS.iter().any(|&(dr, dc)| {
                pos.offset(dr, dc, self.size)
                    .is_some_and(|n| self.get(n) != Stone::Empty)
            });
            if touches_stone {
                moves.push(pos);
            }
        }
        moves
    }

    /// Successor snapshot with the current color placed at `pos`.
    ///
    /// Does not check the target cell; call
    /// [`BoardState::is_valid_position`] first.
    #[must_use]
    pub fn next(&self, pos: Pos) -> BoardState {
        debug_assert!(self.is_valid_position(pos), "next() on invalid {pos}");
        let mut cells = self.cells.clone();
        cells[pos.to_index(self.size)] = self.color;
        BoardState {
            size: self.size,
            cells,
            color: -self.color,
            last_move: Some(pos),
        }
    }

    /// First five-in-a-row in scan order, if any.
    ///
    /// Pure: the snapshot is not modified.
    pub fn check_five_in_a_row(&self) -> Option<FiveInRow> {
        find_five_in_row(self)
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Stone::Empty)
    }

    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.check_five_in_a_row().is_some()
    }

    /// Total stones on board
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s != Stone::Empty).count()
    }

    pub fn is_board_empty(&self) -> bool {
        self.cells.iter().all(|&s| s == Stone::Empty)
    }

    /// Row-major view of the grid
    pub fn rows(&self) -> impl Iterator<Item = &[Stone]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Occupied cells with their stones
    pub fn stones(&self) -> impl Iterator<Item = (Pos, Stone)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != Stone::Empty)
            .map(move |(idx, &s)| (Pos::from_index(idx, size), s))
    }

    /// Make a move in place. Returns the previous last move for `unplace`.
    ///
    /// Search-only counterpart of `next`: no allocation per ply.
    pub(crate) fn place(&mut self, pos: Pos) -> Option<Pos> {
        let idx = pos.to_index(self.size);
        self.cells[idx] = self.color;
        self.color = -self.color;
        self.last_move.replace(pos)
    }

    /// Undo a `place`
    pub(crate) fn unplace(&mut self, pos: Pos, prev_last_move: Option<Pos>) {
        let idx = pos.to_index(self.size);
        self.cells[idx] = Stone::Empty;
        self.color = -self.color;
        self.last_move = prev_last_move;
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for i in 0..self.size {
            let tick = if i < 10 { ' ' } else { '\'' };
            write!(f, "{}{}", (i + 1) % 10, tick)?;
        }
        writeln!(f)?;

        for (r, row) in self.rows().enumerate() {
            write!(f, "{:>2} ", r + 1)?;
            for (c, stone) in row.iter().enumerate() {
                let marker = if self.last_move == Some(Pos::new(r, c)) {
                    '*'
                } else {
                    ' '
                };
                write!(f, "{}{}", stone.symbol(), marker)?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
