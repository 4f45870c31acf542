//! The 1-based request/reply boundary around [`GameRunner`]
//!
//! Presentation layers speak in 1-based `(row, col)` pairs and plain
//! integers for stones. Everything here translates to and from the 0-based
//! core types and collapses per-move failures into `success: false`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::board::Pos;
use crate::engine::MoveSelector;
use crate::runner::GameRunner;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },
}

/// 1-based board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    pub fn to_pos(self, size: usize) -> Result<Pos, ProtocolError> {
        if self.row == 0 || self.col == 0 || self.row > size || self.col > size {
            return Err(ProtocolError::OutOfBounds {
                row: self.row,
                col: self.col,
                size,
            });
        }
        Ok(Pos::new(self.row - 1, self.col - 1))
    }

    pub fn from_pos(pos: Pos) -> Self {
        Coord::new(pos.row + 1, pos.col + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayReply {
    pub success: bool,
}

/// `row`/`col` are 0 when `success` is false
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiPlayReply {
    pub success: bool,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    /// Row-major grid of -1 / 0 / 1
    pub board: Vec<Vec<i8>>,
    /// Stone value of the color that moves next
    pub next: i8,
    pub finished: bool,
    /// 0 when nobody has won
    pub winner: i8,
    pub win_cells: Option<Vec<Coord>>,
    pub last_move: Option<Coord>,
}

pub fn play<S: MoveSelector>(game: &mut GameRunner<S>, request: PlayRequest) -> PlayReply {
    let coord = Coord::new(request.row, request.col);
    let result = coord
        .to_pos(game.size())
        .map_err(|e| e.to_string())
        .and_then(|pos| game.play(pos).map_err(|e| e.to_string()));

    if let Err(reason) = &result {
        warn!(row = request.row, col = request.col, %reason, "play rejected");
    }
    PlayReply {
        success: result.is_ok(),
    }
}

pub fn aiplay<S: MoveSelector>(game: &mut GameRunner<S>) -> AiPlayReply {
    match game.aiplay() {
        Ok(chosen) => {
            let coord = Coord::from_pos(chosen.pos);
            AiPlayReply {
                success: true,
                row: coord.row,
                col: coord.col,
            }
        }
        Err(e) => {
            warn!(reason = %e, "aiplay rejected");
            AiPlayReply {
                success: false,
                row: 0,
                col: 0,
            }
        }
    }
}

pub fn status<S: MoveSelector>(game: &GameRunner<S>) -> StatusReply {
    let status = game.status();
    StatusReply {
        board: status
            .board
            .iter()
            .map(|row| row.iter().map(|s| s.value()).collect())
            .collect(),
        next: status.next.value(),
        finished: status.finished,
        winner: status.winner.value(),
        win_cells: status
            .win_cells
            .map(|cells| cells.into_iter().map(Coord::from_pos).collect()),
        last_move: status.last_move.map(Coord::from_pos),
    }
}

pub fn restart<S: MoveSelector>(game: &mut GameRunner<S>) -> StatusReply {
    game.restart(1);
    status(game)
}
