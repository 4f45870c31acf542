//! Game rules for five-in-a-row
//!
//! Only one rule matters: five (or more) same-colored stones in a row,
//! column or diagonal win the game. A full board without one is a draw.

pub mod win;

// Re-exports for convenient access
pub use win::{
    board_lines, find_five_in_row, find_pattern, has_five_at_pos, has_five_in_row, run_length,
    FiveInRow, Line, LineDirection, WIN_LENGTH,
};
