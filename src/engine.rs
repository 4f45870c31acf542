//! AI engine: the automated side's move selector
//!
//! The engine answers one question for the game runner: given a board
//! snapshot and a search depth, which cell should the side to move take?
//! The search follows a priority system:
//!
//! 1. **Opening**: on an empty board, take the center
//! 2. **Immediate win**: any move that completes five
//! 3. **Defense**: block the opponent's immediate five
//! 4. **Alpha-Beta**: negamax search over the frontier moves
//!
//! # Example
//!
//! ```
//! use gomoku::board::{BoardState, Pos};
//! use gomoku::engine::{AIEngine, SearchType};
//!
//! let mut engine = AIEngine::with_config(500);
//! let board = BoardState::new(19).unwrap().next(Pos::new(9, 9));
//!
//! let result = engine.get_move_with_stats(&board, 2);
//! assert!(result.best_move.is_some());
//! assert_eq!(result.search_type, SearchType::AlphaBeta);
//! ```

use std::time::{Duration, Instant};

use tracing::debug;

use crate::board::{BoardState, Pos};
use crate::eval::{evaluate, PatternScore};
use crate::rules::has_five_at_pos;
use crate::search::{SearchResult, Searcher};

/// Default time budget for one AI move
pub const DEFAULT_TIME_LIMIT_MS: u64 = 2_000;

/// A move together with its evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub pos: Pos,
    pub score: i32,
}

/// Contract between the game runner and whatever picks the automated moves.
///
/// Given a snapshot, a search depth and the maximizing flag, return a cell
/// and its score, or `None` when no move can be produced. The runner applies
/// the returned cell without re-validating it, so implementations must only
/// return empty in-bounds cells.
///
/// Scores are reported from the side to move's point of view when
/// `maximizing` is true and negated otherwise.
pub trait MoveSelector: Send {
    fn select_move(&mut self, state: &BoardState, depth: u8, maximizing: bool)
        -> Option<ScoredMove>;
}

/// Type of search that produced the result.
///
/// This indicates which phase of the search hierarchy found the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Center move on an empty board
    Opening,
    /// Found immediate winning move
    ImmediateWin,
    /// Blocks the opponent's immediate five
    Defense,
    /// Regular alpha-beta search result
    AlphaBeta,
}

impl SearchType {
    pub fn label(self) -> &'static str {
        match self {
            SearchType::Opening => "Opening",
            SearchType::ImmediateWin => "Immediate win",
            SearchType::Defense => "Defense",
            SearchType::AlphaBeta => "Alpha-Beta",
        }
    }
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Evaluation from the side to move's point of view
    pub score: i32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
    /// Depth completed by the alpha-beta search (0 for shortcuts)
    pub depth: u8,
}

impl MoveResult {
    #[inline]
    fn opening(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: SearchType::Opening,
            time_ms,
            nodes: 1,
            depth: 0,
        }
    }

    #[inline]
    fn immediate_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: PatternScore::FIVE,
            search_type: SearchType::ImmediateWin,
            time_ms,
            nodes: 1,
            depth: 0,
        }
    }

    #[inline]
    fn defense(pos: Pos, score: i32, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type: SearchType::Defense,
            time_ms,
            nodes: 1,
            depth: 0,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            time_ms,
            nodes: result.nodes,
            depth: result.depth,
        }
    }
}

/// Main AI Engine for Gomoku.
///
/// Wraps a [`Searcher`] with cheap shortcuts for the positions where a full
/// search is unnecessary. One engine is owned by one game runner.
///
/// # Example
///
/// ```
/// use gomoku::board::{BoardState, Pos};
/// use gomoku::engine::AIEngine;
///
/// let mut engine = AIEngine::new();
/// let board = BoardState::new(15).unwrap();
/// assert_eq!(engine.get_move(&board, 2), Some(Pos::new(7, 7)));
/// ```
#[derive(Debug)]
pub struct AIEngine {
    searcher: Searcher,
    time_limit: Duration,
}

impl AIEngine {
    /// Create a new AI engine with the default time limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_TIME_LIMIT_MS)
    }

    /// Create an AI engine with a custom time limit per move.
    ///
    /// # Arguments
    ///
    /// * `time_limit_ms` - Time limit in milliseconds
    #[must_use]
    pub fn with_config(time_limit_ms: u64) -> Self {
        Self {
            searcher: Searcher::new(),
            time_limit: Duration::from_millis(time_limit_ms),
        }
    }

    /// Best move for the side to move, without statistics.
    #[must_use]
    pub fn get_move(&mut self, board: &BoardState, depth: u8) -> Option<Pos> {
        self.get_move_with_stats(board, depth).best_move
    }

    /// Best move for the side to move, with search statistics.
    ///
    /// # Search Priority
    ///
    /// 1. Center on an empty board
    /// 2. Immediate winning move
    /// 3. Block the opponent's immediate win
    /// 4. Negamax alpha-beta to `depth` plies within the time limit
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &BoardState, depth: u8) -> MoveResult {
        let start = Instant::now();
        let color = board.color();

        // 0. Opening
        if board.is_board_empty() {
            let center = board.size() / 2;
            return MoveResult::opening(Pos::new(center, center), elapsed_ms(start));
        }

        let candidates = board.legal_moves();

        // 1. Our own five
        if let Some(&win) = candidates
            .iter()
            .find(|&&pos| has_five_at_pos(board, pos, color))
        {
            return MoveResult::immediate_win(win, elapsed_ms(start));
        }

        // 2. Opponent's five must be blocked regardless of anything else
        if let Some(&block) = candidates
            .iter()
            .find(|&&pos| has_five_at_pos(board, pos, -color))
        {
            let score = evaluate(&board.next(block), color);
            return MoveResult::defense(block, score, elapsed_ms(start));
        }

        // 3. Regular search
        let result = self.searcher.search_timed(board, depth, self.time_limit);
        if result.timed_out {
            debug!(
                completed = result.depth,
                requested = depth,
                "search hit the time limit"
            );
        }
        MoveResult::from_alphabeta(result, elapsed_ms(start))
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for AIEngine {
    fn select_move(
        &mut self,
        state: &BoardState,
        depth: u8,
        maximizing: bool,
    ) -> Option<ScoredMove> {
        let result = self.get_move_with_stats(state, depth);
        debug!(
            best_move = ?result.best_move,
            score = result.score,
            search = result.search_type.label(),
            depth = result.depth,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "AI move selected"
        );

        let score = if maximizing {
            result.score
        } else {
            -result.score
        };
        result.best_move.map(|pos| ScoredMove { pos, score })
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    fn board_with(stones: &[(usize, usize, Stone)], to_move: Stone) -> BoardState {
        let list: Vec<(Pos, Stone)> = stones
            .iter()
            .map(|&(r, c, s)| (Pos::new(r, c), s))
            .collect();
        BoardState::with_stones(19, &list, to_move).unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.time_limit(), Duration::from_millis(DEFAULT_TIME_LIMIT_MS));

        let engine = AIEngine::with_config(100);
        assert_eq!(engine.time_limit(), Duration::from_millis(100));
    }

    #[test]
    fn test_engine_empty_board() {
        let mut engine = AIEngine::new();
        let result = engine.get_move_with_stats(&BoardState::new(19).unwrap(), 2);

        assert_eq!(result.best_move, Some(Pos::new(9, 9)));
        assert_eq!(result.search_type, SearchType::Opening);

        let small = BoardState::new(6).unwrap();
        assert_eq!(engine.get_move(&small, 2), Some(Pos::new(3, 3)));
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut stones: Vec<_> = (0..4).map(|c| (9, c, Stone::Black)).collect();
        stones.extend((0..4).map(|c| (12, c, Stone::White)));
        let board = board_with(&stones, Stone::Black);

        let mut engine = AIEngine::new();
        let result = engine.get_move_with_stats(&board, 2);

        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(result.score, PatternScore::FIVE);
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        // White has 4 in a row, Black to move
        let mut stones: Vec<_> = (0..4).map(|c| (9, c, Stone::White)).collect();
        stones.push((10, 5, Stone::Black));
        let board = board_with(&stones, Stone::Black);

        let mut engine = AIEngine::new();
        let result = engine.get_move_with_stats(&board, 2);

        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
        assert_eq!(result.search_type, SearchType::Defense);
    }

    #[test]
    fn test_engine_move_is_legal() {
        let board = BoardState::new(19)
            .unwrap()
            .next(Pos::new(9, 9))
            .next(Pos::new(10, 10))
            .next(Pos::new(9, 10))
            .next(Pos::new(8, 9));

        let mut engine = AIEngine::with_config(1_000);
        let result = engine.get_move_with_stats(&board, 2);

        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert!(board.legal_moves().contains(&result.best_move.unwrap()));
    }

    #[test]
    fn test_select_move_score_sign() {
        let mut stones: Vec<_> = (0..4).map(|c| (9, c, Stone::White)).collect();
        stones.extend((0..4).map(|c| (12, c, Stone::Black)));
        let board = board_with(&stones, Stone::White);

        let mut engine = AIEngine::new();
        let max = engine.select_move(&board, 2, true).unwrap();
        let min = engine.select_move(&board, 2, false).unwrap();

        assert_eq!(max.pos, Pos::new(9, 4));
        assert_eq!(max.pos, min.pos);
        assert_eq!(max.score, -min.score);
    }

    #[test]
    fn test_search_type_labels() {
        assert_eq!(SearchType::Opening.label(), "Opening");
        assert_ne!(SearchType::Defense, SearchType::AlphaBeta);
    }
}
