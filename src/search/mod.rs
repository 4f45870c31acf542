//! Search module for the Gomoku AI
//!
//! Negamax with alpha-beta pruning and iterative deepening over the
//! frontier moves of a [`BoardState`](crate::board::BoardState).

pub mod alphabeta;

pub use alphabeta::{score_move, SearchResult, Searcher};
