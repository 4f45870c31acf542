//! Heuristic evaluation function for Gomoku board positions
//!
//! This module provides the static evaluation used at the leaves of the
//! negamax search. It evaluates board positions based on:
//! - Win/loss detection
//! - Pattern scoring (fives, fours, threes, twos)
//! - Positional bonuses (center control)

use crate::board::{BoardState, Pos, Stone};
use crate::rules::has_five_in_row;

use super::patterns::PatternScore;

/// Direction vectors for line checking (4 directions)
/// Each direction only needs to be checked once (we scan both ways from each stone)
const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Weight per distance unit from center
const POSITION_WEIGHT: i32 = 3;

/// Evaluate the board from the perspective of the given color.
///
/// Returns a score where:
/// - Positive values indicate advantage for `color`
/// - Negative values indicate disadvantage for `color`
/// - `PatternScore::FIVE` indicates a win, `-PatternScore::FIVE` a loss
///
/// The evaluation is symmetric: `evaluate(b, Black) == -evaluate(b, White)`
/// unless both sides already hold a five, which the runner never allows.
#[must_use]
pub fn evaluate(board: &BoardState, color: Stone) -> i32 {
    let opponent = color.opponent();

    if has_five_in_row(board, color) {
        return PatternScore::FIVE;
    }
    if has_five_in_row(board, opponent) {
        return -PatternScore::FIVE;
    }

    let pattern_score = evaluate_patterns(board, color) - evaluate_patterns(board, opponent);
    let position_score = evaluate_positions(board, color) - evaluate_positions(board, opponent);

    // Keep heuristic scores clear of the decided-game band
    let limit = PatternScore::WIN_THRESHOLD - 1;
    (pattern_score + position_score).clamp(-limit, limit)
}

/// Evaluate pattern-based score for a color.
///
/// Each line segment is counted exactly once by only evaluating from its
/// "start" stone (no same-color stone in the negative direction).
///
/// Also rewards threat combinations the opponent cannot block all at once:
/// two fours, four + open three, two open threes.
fn evaluate_patterns(board: &BoardState, color: Stone) -> i32 {
    let mut score = 0;
    let mut open_fours = 0i32;
    let mut closed_fours = 0i32;
    let mut open_threes = 0i32;

    for (pos, stone) in board.stones() {
        if stone != color {
            continue;
        }
        for &(dr, dc) in &DIRECTIONS {
            let pattern_score = evaluate_line(board, pos, dr, dc, color);
            score += pattern_score;

            if pattern_score >= PatternScore::OPEN_FOUR {
                open_fours += 1;
            } else if pattern_score >= PatternScore::CLOSED_FOUR {
                closed_fours += 1;
            } else if pattern_score >= PatternScore::OPEN_THREE {
                open_threes += 1;
            }
        }
    }

    if open_fours >= 1 && (closed_fours >= 1 || open_threes >= 1) {
        score += PatternScore::OPEN_FOUR;
    }
    if closed_fours >= 2 {
        score += PatternScore::OPEN_FOUR;
    }
    if closed_fours >= 1 && open_threes >= 1 {
        score += PatternScore::OPEN_FOUR;
    }
    if open_threes >= 2 {
        score += PatternScore::OPEN_FOUR;
    }

    score
}

/// Evaluate a single line pattern from a position in a given direction.
///
/// Only counts the pattern if this position is the start of the line (no
/// same-color stone in the negative direction), so each segment is counted
/// once. Counts consecutive stones and open ends, and recognizes one-gap
/// shapes like `O_OOO` or `OO_OO` where filling the gap completes five.
pub fn evaluate_line(board: &BoardState, pos: Pos, dr: i32, dc: i32, color: Stone) -> i32 {
    let size = board.size();
    let prev = pos.offset(-dr, -dc, size);
    if prev.is_some_and(|p| board.get(p) == color) {
        return 0;
    }

    let mut count = 1;
    let mut open_ends = 0;
    let mut has_gap = false;
    let mut total_span = 1;

    if prev.is_some_and(|p| board.get(p) == Stone::Empty) {
        open_ends += 1;
    }

    // Extend in positive direction, allowing one gap
    let mut cur = pos.offset(dr, dc, size);
    while let Some(p) = cur {
        match board.get(p) {
            s if s == color => {
                count += 1;
                total_span += 1;
            }
            Stone::Empty if !has_gap => {
                let after = p.offset(dr, dc, size);
                if after.is_some_and(|a| board.get(a) == color) {
                    has_gap = true;
                    total_span += 1;
                    cur = after;
                    continue;
                }
                open_ends += 1;
                break;
            }
            Stone::Empty => {
                open_ends += 1;
                break;
            }
            _ => break, // Opponent stone blocks
        }
        cur = p.offset(dr, dc, size);
    }

    // A gap pattern is never a five yet; at best filling the gap wins.
    if has_gap {
        match count {
            5.. => PatternScore::OPEN_FOUR,
            4 if total_span == 5 => PatternScore::OPEN_FOUR,
            4 => PatternScore::CLOSED_FOUR,
            3 if open_ends == 2 => PatternScore::OPEN_THREE,
            3 if open_ends == 1 => PatternScore::CLOSED_THREE,
            _ => 0,
        }
    } else {
        match (count, open_ends) {
            (5.., _) => PatternScore::FIVE,
            (4, 2) => PatternScore::OPEN_FOUR,
            (4, 1) => PatternScore::CLOSED_FOUR,
            (3, 2) => PatternScore::OPEN_THREE,
            (3, 1) => PatternScore::CLOSED_THREE,
            (2, 2) => PatternScore::OPEN_TWO,
            (2, 1) => PatternScore::CLOSED_TWO,
            _ => 0,
        }
    }
}

/// Evaluate positional bonuses for a color.
///
/// Stones closer to the center are worth more as they have more
/// potential for creating patterns in multiple directions.
fn evaluate_positions(board: &BoardState, color: Stone) -> i32 {
    let center = (board.size() / 2) as i32;
    let max_dist = 2 * center;

    board
        .stones()
        .filter(|&(_, s)| s == color)
        .map(|(pos, _)| {
            let dist = (pos.row as i32 - center).abs() + (pos.col as i32 - center).abs();
            (max_dist - dist) * POSITION_WEIGHT
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stones: &[(usize, usize, Stone)]) -> BoardState {
        let list: Vec<(Pos, Stone)> = stones
            .iter()
            .map(|&(r, c, s)| (Pos::new(r, c), s))
            .collect();
        BoardState::with_stones(19, &list, Stone::Black).unwrap()
    }

    #[test]
    fn test_empty_board_is_even() {
        let board = BoardState::new(19).unwrap();
        assert_eq!(evaluate(&board, Stone::Black), 0);
    }

    #[test]
    fn test_five_is_win() {
        let stones: Vec<_> = (0..5).map(|c| (9, c, Stone::Black)).collect();
        let board = board_with(&stones);
        assert_eq!(evaluate(&board, Stone::Black), PatternScore::FIVE);
        assert_eq!(evaluate(&board, Stone::White), -PatternScore::FIVE);
    }

    #[test]
    fn test_evaluation_is_symmetric() {
        let board = board_with(&[
            (9, 9, Stone::Black),
            (9, 10, Stone::Black),
            (10, 10, Stone::White),
            (8, 8, Stone::White),
            (3, 3, Stone::Black),
        ]);
        assert_eq!(evaluate(&board, Stone::Black), -evaluate(&board, Stone::White));
    }

    #[test]
    fn test_open_four_detected() {
        let stones: Vec<_> = (5..9).map(|c| (9, c, Stone::Black)).collect();
        let board = board_with(&stones);
        assert_eq!(
            evaluate_line(&board, Pos::new(9, 5), 0, 1, Stone::Black),
            PatternScore::OPEN_FOUR
        );
        // Not the start of the segment
        assert_eq!(evaluate_line(&board, Pos::new(9, 6), 0, 1, Stone::Black), 0);
    }

    #[test]
    fn test_closed_four_detected() {
        let mut stones: Vec<_> = (5..9).map(|c| (9, c, Stone::Black)).collect();
        stones.push((9, 4, Stone::White));
        let board = board_with(&stones);
        assert_eq!(
            evaluate_line(&board, Pos::new(9, 5), 0, 1, Stone::Black),
            PatternScore::CLOSED_FOUR
        );
    }

    #[test]
    fn test_gap_four_detected() {
        // OO_OO
        let board = board_with(&[
            (9, 5, Stone::Black),
            (9, 6, Stone::Black),
            (9, 8, Stone::Black),
            (9, 9, Stone::Black),
        ]);
        assert_eq!(
            evaluate_line(&board, Pos::new(9, 5), 0, 1, Stone::Black),
            PatternScore::OPEN_FOUR
        );
    }

    #[test]
    fn test_open_three_beats_scattered_stones() {
        let three = board_with(&[
            (9, 8, Stone::Black),
            (9, 9, Stone::Black),
            (9, 10, Stone::Black),
        ]);
        let scattered = board_with(&[
            (9, 8, Stone::Black),
            (5, 9, Stone::Black),
            (13, 10, Stone::Black),
        ]);
        assert!(evaluate(&three, Stone::Black) > evaluate(&scattered, Stone::Black));
    }

    #[test]
    fn test_center_preferred() {
        let center = board_with(&[(9, 9, Stone::Black)]);
        let corner = board_with(&[(0, 0, Stone::Black)]);
        assert!(evaluate(&center, Stone::Black) > evaluate(&corner, Stone::Black));
    }
}
