//! Negamax search with alpha-beta pruning and iterative deepening
//!
//! This module implements the core search algorithm for the Gomoku AI.
//!
//! # Features
//!
//! - Iterative deepening for time management and move ordering
//! - Candidate moves restricted to the frontier (`BoardState::legal_moves`)
//! - Defense-first move ordering
//! - Make/unmake on a single scratch board: no snapshot per ply
//! - Wins found earlier score higher than wins found deeper
//!
//! # Example
//!
//! ```
//! use gomoku::board::{BoardState, Pos};
//! use gomoku::search::Searcher;
//!
//! let board = BoardState::new(19).unwrap().next(Pos::new(9, 9));
//! let mut searcher = Searcher::new();
//!
//! let result = searcher.search(&board, 2);
//! assert!(result.best_move.is_some());
//! ```

use std::time::{Duration, Instant};

use tracing::trace;

use crate::board::{BoardState, Pos, Stone};
use crate::eval::{evaluate, is_decisive, PatternScore};
use crate::rules::{has_five_at_pos, run_length, WIN_LENGTH};

/// Infinity score for alpha-beta bounds
const INF: i32 = PatternScore::FIVE + 1_000;

/// Maximum moves to consider at internal nodes.
/// Defense-first ordering keeps the critical blocking moves at the top.
const MAX_INTERNAL_MOVES: usize = 15;

/// Direction vectors for move scoring
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Score of the best move from the side to move's point of view
    pub score: i32,
    /// Depth completed in iterative deepening
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
    /// Search stopped on the time limit before reaching the requested depth
    pub timed_out: bool,
}

/// Negamax searcher.
///
/// Holds only per-search counters; create one per engine and reuse it.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
    deadline: Option<Instant>,
    stopped: bool,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Search to `max_depth` plies without a time limit.
    ///
    /// Used by tests and when precise deterministic behavior is needed.
    #[must_use]
    pub fn search(&mut self, state: &BoardState, max_depth: u8) -> SearchResult {
        self.run(state, max_depth, None)
    }

    /// Search with a time limit.
    ///
    /// When the limit is hit, the result of the last fully searched depth is
    /// returned. Depth 1 is always completed so a move is always available.
    #[must_use]
    pub fn search_timed(
        &mut self,
        state: &BoardState,
        max_depth: u8,
        time_limit: Duration,
    ) -> SearchResult {
        self.run(state, max_depth, Some(time_limit))
    }

    fn run(&mut self, state: &BoardState, max_depth: u8, limit: Option<Duration>) -> SearchResult {
        self.nodes = 0;
        self.stopped = false;
        self.deadline = None;

        let mut best = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            timed_out: false,
        };

        let mut work = state.clone();
        let start = Instant::now();

        for depth in 1..=max_depth.max(1) {
            // The first iteration always runs to completion
            if depth == 2 {
                self.deadline = limit.map(|l| start + l);
            }

            let Some((mov, score)) = self.search_root(&mut work, depth) else {
                break;
            };
            if self.stopped {
                best.timed_out = true;
                break;
            }

            best.best_move = Some(mov);
            best.score = score;
            best.depth = depth;
            trace!(depth, ?mov, score, nodes = self.nodes, "iteration complete");

            // A forced result does not change with more depth
            if is_decisive(score) {
                break;
            }
        }

        best.nodes = self.nodes;
        best
    }

    /// Check the clock every 1024 nodes.
    #[inline]
    fn check_time(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if self.nodes & 1023 == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.stopped = true;
                }
            }
        }
        self.stopped
    }

    fn search_root(&mut self, board: &mut BoardState, depth: u8) -> Option<(Pos, i32)> {
        let moves = Self::ordered_moves(board);
        let mut alpha = -INF;
        let mut best: Option<(Pos, i32)> = None;

        for mov in moves {
            let prev = board.place(mov);
            let score = -self.negamax(board, depth - 1, -INF, -alpha, 1);
            board.unplace(mov, prev);

            if self.stopped {
                break;
            }
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mov, score));
            }
            alpha = alpha.max(score);
        }

        best
    }

    fn negamax(
        &mut self,
        board: &mut BoardState,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: i32,
    ) -> i32 {
        self.nodes += 1;
        if self.check_time() {
            return 0;
        }

        // The side that just moved may have completed a five
        if let Some(last) = board.last_move() {
            if has_five_at_pos(board, last, -board.color()) {
                return -(PatternScore::FIVE - ply);
            }
        }

        if depth == 0 {
            return evaluate(board, board.color());
        }

        let mut moves = Self::ordered_moves(board);
        if moves.is_empty() {
            // Full board: draw
            return 0;
        }
        moves.truncate(MAX_INTERNAL_MOVES);

        let mut best = -INF;
        for mov in moves {
            let prev = board.place(mov);
            let score = -self.negamax(board, depth - 1, -beta, -alpha, ply + 1);
            board.unplace(mov, prev);

            if self.stopped {
                return 0;
            }
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Frontier moves, most urgent first.
    ///
    /// Falls back to the center on an empty board. The sort is stable, so
    /// equally scored moves keep row-major order.
    fn ordered_moves(board: &BoardState) -> Vec<Pos> {
        if board.is_board_empty() {
            let center = board.size() / 2;
            return vec![Pos::new(center, center)];
        }

        let color = board.color();
        let mut scored: Vec<(Pos, i32)> = board
            .legal_moves()
            .into_iter()
            .map(|pos| (pos, score_move(board, pos, color)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(pos, _)| pos).collect()
    }
}

/// Score a move for ordering purposes (defense-first).
///
/// Looks at the runs of each color that the move would join in every
/// direction. Completing our own five ranks first, blocking the opponent's
/// five second, then fours and threes.
pub fn score_move(board: &BoardState, mov: Pos, color: Stone) -> i32 {
    let opponent = color.opponent();
    let mut score = 0;

    for &(dr, dc) in &DIRECTIONS {
        let mine = 1
            + run_length(board, mov, dr, dc, color)
            + run_length(board, mov, -dr, -dc, color);
        let theirs = 1
            + run_length(board, mov, dr, dc, opponent)
            + run_length(board, mov, -dr, -dc, opponent);

        score += run_weight(mine, true) + run_weight(theirs, false);
    }

    score
}

fn run_weight(run: usize, own: bool) -> i32 {
    match (run, own) {
        (r, true) if r >= WIN_LENGTH => 10_000_000,
        (r, false) if r >= WIN_LENGTH => 5_000_000,
        (4, true) => 100_000,
        (4, false) => 50_000,
        (3, true) => 5_000,
        (3, false) => 2_500,
        (2, true) => 100,
        (2, false) => 50,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stones: &[(usize, usize, Stone)], to_move: Stone) -> BoardState {
        let list: Vec<(Pos, Stone)> = stones
            .iter()
            .map(|&(r, c, s)| (Pos::new(r, c), s))
            .collect();
        BoardState::with_stones(19, &list, to_move).unwrap()
    }

    #[test]
    fn test_search_empty_board() {
        let board = BoardState::new(19).unwrap();
        let result = Searcher::new().search(&board, 2);
        assert_eq!(result.best_move, Some(Pos::new(9, 9)));
    }

    #[test]
    fn test_search_move_is_legal() {
        let board = BoardState::new(19).unwrap().next(Pos::new(9, 9));
        let legal = board.legal_moves();
        let result = Searcher::new().search(&board, 2);
        assert!(legal.contains(&result.best_move.unwrap()));
        assert_eq!(result.depth, 2);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_search_finds_winning_move() {
        let mut stones: Vec<_> = (5..9).map(|c| (9, c, Stone::White)).collect();
        stones.extend([(3, 3, Stone::Black), (3, 5, Stone::Black), (15, 15, Stone::Black)]);
        stones.push((9, 4, Stone::Black));
        let board = board_with(&stones, Stone::White);

        let result = Searcher::new().search(&board, 2);
        assert_eq!(result.best_move, Some(Pos::new(9, 9)));
        assert!(result.score >= PatternScore::WIN_THRESHOLD);
    }

    #[test]
    fn test_search_blocks_opponent_win() {
        // Black threatens (9, 9); White has nothing better
        let mut stones: Vec<_> = (5..9).map(|c| (9, c, Stone::Black)).collect();
        stones.push((9, 4, Stone::White));
        stones.push((2, 2, Stone::White));
        stones.push((2, 3, Stone::White));
        let board = board_with(&stones, Stone::White);

        let result = Searcher::new().search(&board, 2);
        assert_eq!(result.best_move, Some(Pos::new(9, 9)));
    }

    #[test]
    fn test_search_timed_returns_move() {
        let board = BoardState::new(19)
            .unwrap()
            .next(Pos::new(9, 9))
            .next(Pos::new(9, 10));
        let result = Searcher::new().search_timed(&board, 6, Duration::from_millis(1));
        assert!(result.best_move.is_some());
        assert!(result.depth >= 1);
    }

    #[test]
    fn test_search_does_not_touch_input() {
        let board = BoardState::new(19).unwrap().next(Pos::new(9, 9));
        let copy = board.clone();
        let _ = Searcher::new().search(&board, 3);
        assert_eq!(board, copy);
    }

    #[test]
    fn test_score_move_prefers_win_over_block() {
        let mut stones: Vec<_> = (0..4).map(|c| (0, c, Stone::White)).collect();
        stones.extend((0..4).map(|c| (5, c, Stone::Black)));
        let board = board_with(&stones, Stone::White);

        let win = score_move(&board, Pos::new(0, 4), Stone::White);
        let block = score_move(&board, Pos::new(5, 4), Stone::White);
        assert!(win > block);
        assert!(block > score_move(&board, Pos::new(10, 10), Stone::White));
    }
}
