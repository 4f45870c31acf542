//! Turn sequencing between the human side and the automated side
//!
//! [`GameRunner`] owns the current [`BoardState`] and replaces it wholesale on
//! every successful move. Human is always Black, the AI is always White, and
//! Black moves first.
//!
//! # Example
//!
//! ```
//! use gomoku::board::Pos;
//! use gomoku::runner::GameRunner;
//!
//! let mut game = GameRunner::new(19, 2).unwrap();
//! game.play(Pos::new(9, 9)).unwrap();
//! let reply = game.aiplay().unwrap();
//! assert!(!game.is_finished());
//! assert_ne!(reply.pos, Pos::new(9, 9));
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::board::{BoardState, Pos, Stone};
use crate::config::{ConfigError, GameConfig};
use crate::engine::{AIEngine, MoveSelector, ScoredMove};
use crate::rules::FiveInRow;

/// Why a move was refused. The runner state is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already finished")]
    GameOver,

    #[error("it is {expected:?}'s turn, not {actual:?}'s")]
    WrongTurn { expected: Stone, actual: Stone },

    #[error("cannot place a stone at {0}")]
    IllegalPosition(Pos),

    #[error("AI produced no move")]
    NoMoveAvailable,
}

/// Per-game state machine. `Won` and `Drawn` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(FiveInRow),
    Drawn,
}

impl Outcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Winning color, `Stone::Empty` when nobody has won
    pub fn winner(&self) -> Stone {
        match self {
            Outcome::Won(five) => five.color,
            _ => Stone::Empty,
        }
    }
}

/// Snapshot of a game for display, 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStatus {
    /// Row-major grid
    pub board: Vec<Vec<Stone>>,
    /// Color that moves next
    pub next: Stone,
    pub finished: bool,
    pub winner: Stone,
    /// The five winning cells ordered along the line
    pub win_cells: Option<Vec<Pos>>,
    pub last_move: Option<Pos>,
}

/// One game between a human (Black) and an automated opponent (White).
pub struct GameRunner<S: MoveSelector = AIEngine> {
    state: BoardState,
    size: usize,
    depth: u8,
    maximizing: bool,
    outcome: Outcome,
    selector: S,
}

impl GameRunner<AIEngine> {
    /// New game with the default engine.
    pub fn new(size: usize, depth: u8) -> Result<Self, ConfigError> {
        Self::from_config(&GameConfig {
            board_size: size,
            search_depth: depth,
            ..GameConfig::default()
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_selector(
            config.board_size,
            config.search_depth,
            AIEngine::with_config(config.ai_time_limit_ms),
        )
    }
}

impl<S: MoveSelector> GameRunner<S> {
    /// New game with a custom move selector.
    pub fn with_selector(size: usize, depth: u8, selector: S) -> Result<Self, ConfigError> {
        let state = BoardState::new(size).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if depth == 0 {
            return Err(ConfigError::Invalid("search depth must be > 0".into()));
        }
        let mut runner = GameRunner {
            state,
            size,
            depth,
            maximizing: true,
            outcome: Outcome::InProgress,
            selector,
        };
        runner.restart(1);
        Ok(runner)
    }

    /// Fresh game regardless of the previous outcome.
    ///
    /// `player_index` 1 makes the AI the maximizing side; anything else
    /// makes it minimizing.
    pub fn restart(&mut self, player_index: u8) {
        self.state = self.state.cleared();
        self.maximizing = player_index == 1;
        self.outcome = Outcome::InProgress;
        info!(size = self.size, depth = self.depth, "new game");
    }

    /// Human move for Black.
    pub fn play(&mut self, pos: Pos) -> Result<(), MoveError> {
        if self.outcome.is_finished() {
            return Err(MoveError::GameOver);
        }
        self.expect_turn(self.human_color())?;
        if !self.state.is_valid_position(pos) {
            return Err(MoveError::IllegalPosition(pos));
        }

        debug!(%pos, "human move");
        self.advance(pos);
        Ok(())
    }

    /// AI move for White. Returns the chosen cell and its score.
    ///
    /// The cell returned by the selector is applied as-is.
    pub fn aiplay(&mut self) -> Result<ScoredMove, MoveError> {
        if self.outcome.is_finished() {
            return Err(MoveError::GameOver);
        }
        self.expect_turn(self.ai_color())?;

        let chosen = self
            .selector
            .select_move(&self.state, self.depth, self.maximizing)
            .ok_or(MoveError::NoMoveAvailable)?;

        debug!(pos = %chosen.pos, score = chosen.score, "AI move");
        self.advance(chosen.pos);
        Ok(chosen)
    }

    pub fn status(&self) -> GameStatus {
        let win_cells = match &self.outcome {
            Outcome::Won(five) => Some(five.cells.to_vec()),
            _ => None,
        };
        GameStatus {
            board: self.state.rows().map(<[Stone]>::to_vec).collect(),
            next: self.state.color(),
            finished: self.outcome.is_finished(),
            winner: self.outcome.winner(),
            win_cells,
            last_move: self.state.last_move(),
        }
    }

    fn expect_turn(&self, actual: Stone) -> Result<(), MoveError> {
        let expected = self.state.color();
        if expected != actual {
            return Err(MoveError::WrongTurn { expected, actual });
        }
        Ok(())
    }

    /// Replace the state with its successor and settle the outcome.
    fn advance(&mut self, pos: Pos) {
        self.state = self.state.next(pos);

        self.outcome = match self.state.check_five_in_a_row() {
            Some(five) => {
                info!(
                    winner = ?five.color,
                    direction = five.direction.name(),
                    "five in a row"
                );
                Outcome::Won(five)
            }
            None if self.state.is_full() => {
                info!("board full, game drawn");
                Outcome::Drawn
            }
            None => Outcome::InProgress,
        };
    }

    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    #[inline]
    pub fn winner(&self) -> Stone {
        self.outcome.winner()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn is_maximizing(&self) -> bool {
        self.maximizing
    }

    #[inline]
    pub fn human_color(&self) -> Stone {
        Stone::Black
    }

    #[inline]
    pub fn ai_color(&self) -> Stone {
        Stone::White
    }
}
