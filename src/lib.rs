//! Gomoku: five in a row against an alpha-beta AI
//!
//! A human (Black) plays an automated opponent (White) on an N x N board.
//! The first side to line up five stones in a row, column or diagonal wins;
//! a full board with no five is a draw.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - [`board`]: Immutable-per-move board snapshots and candidate moves
//! - [`rules`]: Five-in-a-row detection over rows, columns and diagonals
//! - [`eval`]: Static position evaluation
//! - [`search`]: Negamax with alpha-beta pruning and iterative deepening
//! - [`engine`]: The AI move selector used by the runner
//! - [`runner`]: Turn sequencing, outcome tracking, status and restart
//! - [`protocol`]: 1-based request/reply types for presentation layers
//! - [`config`] and [`cli`]: Game settings from TOML and the command line
//! - [`ui`]: egui front end driving the runner from a worker thread
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{GameRunner, Pos, Stone};
//!
//! let mut game = GameRunner::new(15, 2).unwrap();
//! game.play(Pos::new(7, 7)).unwrap();
//!
//! let reply = game.aiplay().unwrap();
//! assert_eq!(game.state().get(reply.pos), Stone::White);
//! println!("AI plays at {}", reply.pos);
//! ```

pub mod board;
pub mod cli;
pub mod config;
pub mod engine;
pub mod eval;
pub mod protocol;
pub mod rules;
pub mod runner;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{BoardState, Pos, Stone, DEFAULT_BOARD_SIZE};
pub use config::{ConfigError, GameConfig};
pub use engine::{AIEngine, MoveResult, MoveSelector, ScoredMove, SearchType};
pub use rules::{FiveInRow, LineDirection};
pub use runner::{GameRunner, GameStatus, MoveError, Outcome};
