//! GUI module for the Gomoku game
//!
//! This module provides a native Rust GUI using egui/eframe. The game itself
//! runs on a worker thread owned by [`GameSession`].

mod app;
mod board_view;
mod session;
mod theme;

pub use app::GomokuApp;
pub use session::{AiMove, Command, GameSession, SessionEvent, Snapshot};
