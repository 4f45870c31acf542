//! Evaluation module for Gomoku positions
//!
//! This module provides pattern recognition and scoring for board positions.
//! The evaluation considers:
//! - Line patterns (twos, threes, fours, fives)
//! - Combination threats (double four, four-three, double three)
//! - Positional bonuses (center control)

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, evaluate_line};
pub use patterns::{is_decisive, PatternScore};
