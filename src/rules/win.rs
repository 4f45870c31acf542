//! Five-in-a-row detection
//!
//! The board is cut into every maximal line along four families (rows,
//! columns, diagonals, anti-diagonals). Each line is scanned with a sliding
//! window of five and compared against a constant same-color pattern.
//!
//! Scan order is fixed so that the reported line is deterministic even when
//! a contrived position holds more than one five:
//! 1. Black before White
//! 2. Rows and columns interleaved by index (row 0, column 0, row 1, ...)
//! 3. Diagonals and anti-diagonals interleaved by offset, for lines of
//!    length >= 5 only
//! 4. Windows left to right (top to bottom along diagonals)

use serde::Serialize;

use crate::board::{BoardState, Pos, Stone};

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Direction vectors for line checking (4 directions)
const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Orientation of a line on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineDirection {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

impl LineDirection {
    pub fn name(self) -> &'static str {
        match self {
            LineDirection::Horizontal => "horizontal",
            LineDirection::Vertical => "vertical",
            LineDirection::Diagonal => "diagonal",
            LineDirection::AntiDiagonal => "anti-diagonal",
        }
    }
}

/// A confirmed five-in-a-row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiveInRow {
    pub color: Stone,
    /// Winning cells, end to end along the line
    pub cells: [Pos; WIN_LENGTH],
    pub direction: LineDirection,
}

/// A maximal line of cells across the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub direction: LineDirection,
    pub cells: Vec<Pos>,
}

/// Every maximal line of a `size` x `size` board, in scan order.
pub fn board_lines(size: usize) -> Vec<Line> {
    let mut lines = Vec::with_capacity(4 * size);

    for i in 0..size {
        lines.push(Line {
            direction: LineDirection::Horizontal,
            cells: (0..size).map(|c| Pos::new(i, c)).collect(),
        });
        lines.push(Line {
            direction: LineDirection::Vertical,
            cells: (0..size).map(|r| Pos::new(r, i)).collect(),
        });
    }

    if size < WIN_LENGTH {
        return lines;
    }

    // Offset k = col - row for diagonals; the anti-diagonal with the same k
    // is the diagonal of the horizontally mirrored board.
    let reach = (size - WIN_LENGTH) as i32;
    for k in -reach..=reach {
        let rows = (0..size as i32).filter(|r| (0..size as i32).contains(&(r + k)));
        let mut diagonal = Vec::new();
        let mut anti = Vec::new();
        for r in rows {
            let c = (r + k) as usize;
            let r = r as usize;
            diagonal.push(Pos::new(r, c));
            anti.push(Pos::new(r, size - 1 - c));
        }
        lines.push(Line {
            direction: LineDirection::Diagonal,
            cells: diagonal,
        });
        lines.push(Line {
            direction: LineDirection::AntiDiagonal,
            cells: anti,
        });
    }

    lines
}

/// Start index of the first window of `line` equal to `pattern`
pub fn find_pattern(line: &[Stone], pattern: &[Stone]) -> Option<usize> {
    if pattern.is_empty() || line.len() < pattern.len() {
        return None;
    }
    line.windows(pattern.len()).position(|window| window == pattern)
}

/// First five-in-a-row on the board in scan order.
pub fn find_five_in_row(board: &BoardState) -> Option<FiveInRow> {
    let lines = board_lines(board.size());

    for color in [Stone::Black, Stone::White] {
        let pattern = [color; WIN_LENGTH];
        for line in &lines {
            let stones: Vec<Stone> = line.cells.iter().map(|&p| board.get(p)).collect();
            let Some(start) = find_pattern(&stones, &pattern) else {
                continue;
            };
            let cells = <[Pos; WIN_LENGTH]>::try_from(&line.cells[start..start + WIN_LENGTH])
                .ok()?;
            return Some(FiveInRow {
                color,
                cells,
                direction: line.direction,
            });
        }
    }

    None
}

/// Check if there's 5+ in a row for the given color
pub fn has_five_in_row(board: &BoardState, color: Stone) -> bool {
    board
        .stones()
        .filter(|&(_, s)| s == color)
        .any(|(pos, _)| has_five_at_pos(board, pos, color))
}

/// Fast five-in-a-row check through a specific position.
///
/// Only walks the 4 directions from `pos`. No allocation. Used by the
/// searcher after each move instead of a full board scan.
pub fn has_five_at_pos(board: &BoardState, pos: Pos, color: Stone) -> bool {
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let run = 1
            + run_length(board, pos, dr, dc, color)
            + run_length(board, pos, -dr, -dc, color);
        run >= WIN_LENGTH
    })
}

/// Consecutive `color` stones from `pos` (exclusive) in one direction
pub fn run_length(board: &BoardState, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    let size = board.size();
    let mut count = 0;
    let mut cur = pos;
    while let Some(next) = cur.offset(dr, dc, size) {
        if board.get(next) != color {
            break;
        }
        count += 1;
        cur = next;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, stones: &[(Pos, Stone)]) -> BoardState {
        BoardState::with_stones(size, stones, Stone::Black).unwrap()
    }

    fn run(color: Stone, cells: impl Iterator<Item = (usize, usize)>) -> Vec<(Pos, Stone)> {
        cells.map(|(r, c)| (Pos::new(r, c), color)).collect()
    }

    #[test]
    fn test_line_counts() {
        // 19 rows + 19 columns + 2 * (2 * 14 + 1) diagonals
        assert_eq!(board_lines(19).len(), 38 + 58);
        // Boards below five have no diagonal lines at all
        assert_eq!(board_lines(4).len(), 8);
        // Exactly one diagonal of each kind on a 5x5
        assert_eq!(board_lines(5).len(), 12);
    }

    #[test]
    fn test_diagonal_lines_are_long_enough() {
        for line in board_lines(9) {
            assert!(line.cells.len() >= WIN_LENGTH, "{:?}", line);
        }
    }

    #[test]
    fn test_anti_diagonal_cells() {
        let lines = board_lines(5);
        let anti = lines
            .iter()
            .find(|l| l.direction == LineDirection::AntiDiagonal)
            .unwrap();
        let expected: Vec<Pos> = (0..5).map(|r| Pos::new(r, 4 - r)).collect();
        assert_eq!(anti.cells, expected);
    }

    #[test]
    fn test_find_pattern() {
        let b = Stone::Black;
        let e = Stone::Empty;
        let line = [e, b, b, b, b, b, e];
        assert_eq!(find_pattern(&line, &[b; 5]), Some(1));
        assert_eq!(find_pattern(&line[..5], &[b; 5]), None);
        assert_eq!(find_pattern(&[b; 3], &[b; 5]), None);
    }

    #[test]
    fn test_five_in_row_horizontal() {
        let board = board_with(19, &run(Stone::Black, (3..8).map(|c| (9, c))));
        let five = find_five_in_row(&board).unwrap();
        assert_eq!(five.color, Stone::Black);
        assert_eq!(five.direction, LineDirection::Horizontal);
        let expected: Vec<Pos> = (3..8).map(|c| Pos::new(9, c)).collect();
        assert_eq!(five.cells.to_vec(), expected);
    }

    #[test]
    fn test_five_in_row_vertical() {
        let board = board_with(19, &run(Stone::White, (0..5).map(|r| (r, 9))));
        let five = find_five_in_row(&board).unwrap();
        assert_eq!(five.color, Stone::White);
        assert_eq!(five.direction, LineDirection::Vertical);
        assert_eq!(five.cells[0], Pos::new(0, 9));
        assert_eq!(five.cells[4], Pos::new(4, 9));
    }

    #[test]
    fn test_five_in_row_diagonal() {
        let board = board_with(19, &run(Stone::White, (0..5).map(|i| (i + 2, i + 5))));
        let five = find_five_in_row(&board).unwrap();
        assert_eq!(five.direction, LineDirection::Diagonal);
        assert_eq!(five.cells[0], Pos::new(2, 5));
        assert_eq!(five.cells[4], Pos::new(6, 9));
    }

    #[test]
    fn test_diagonal_sw_five() {
        // Diagonal from (4, 8) to (8, 4)
        let board = board_with(19, &run(Stone::White, (0..5).map(|i| (4 + i, 8 - i))));
        let five = find_five_in_row(&board).unwrap();
        assert_eq!(five.direction, LineDirection::AntiDiagonal);
        assert_eq!(five.cells[0], Pos::new(4, 8));
        assert_eq!(five.cells[4], Pos::new(8, 4));
    }

    #[test]
    fn test_four_in_row_not_win() {
        let mut stones = run(Stone::Black, (0..4).map(|c| (9, c)));
        stones.extend(run(Stone::Black, (0..4).map(|r| (r, 15))));
        stones.extend(run(Stone::Black, (0..4).map(|i| (10 + i, 10 + i))));
        stones.extend(run(Stone::Black, (0..4).map(|i| (10 + i, 8 - i))));
        let board = board_with(19, &stones);
        assert!(find_five_in_row(&board).is_none());
        assert!(!has_five_in_row(&board, Stone::Black));
    }

    #[test]
    fn test_broken_five_not_win() {
        let mut stones = run(Stone::Black, (0..3).map(|c| (9, c)));
        stones.extend(run(Stone::Black, (4..6).map(|c| (9, c))));
        let board = board_with(19, &stones);
        assert!(find_five_in_row(&board).is_none());
    }

    #[test]
    fn test_six_in_row_also_wins() {
        let board = board_with(19, &run(Stone::Black, (0..6).map(|c| (9, c))));
        let five = find_five_in_row(&board).unwrap();
        // First window of the run
        assert_eq!(five.cells[0], Pos::new(9, 0));
        assert_eq!(five.cells[4], Pos::new(9, 4));
    }

    #[test]
    fn test_five_at_corner() {
        // Diagonal from (14, 14) to (18, 18)
        let board = board_with(19, &run(Stone::White, (0..5).map(|i| (14 + i, 14 + i))));
        assert!(has_five_in_row(&board, Stone::White));
        assert_eq!(find_five_in_row(&board).unwrap().cells[4], Pos::new(18, 18));
    }

    #[test]
    fn test_black_reported_before_white() {
        // White's line sits in an earlier row than Black's
        let mut stones = run(Stone::White, (0..5).map(|c| (0, c)));
        stones.extend(run(Stone::Black, (0..5).map(|c| (10, c))));
        let board = board_with(19, &stones);

        let first = find_five_in_row(&board).unwrap();
        assert_eq!(first.color, Stone::Black);
        assert_eq!(first.cells[0], Pos::new(10, 0));
        for _ in 0..5 {
            assert_eq!(find_five_in_row(&board), Some(first));
        }
    }

    #[test]
    fn test_has_five_at_pos() {
        let board = board_with(19, &run(Stone::Black, (0..5).map(|i| (i, i))));
        assert!(has_five_at_pos(&board, Pos::new(2, 2), Stone::Black));
        assert!(has_five_at_pos(&board, Pos::new(4, 4), Stone::Black));
        assert!(!has_five_at_pos(&board, Pos::new(2, 2), Stone::White));
    }

    #[test]
    fn test_empty_not_five() {
        let board = BoardState::new(19).unwrap();
        assert!(find_five_in_row(&board).is_none());
        assert!(!has_five_in_row(&board, Stone::Black));
        assert!(!has_five_in_row(&board, Stone::White));
    }

    #[test]
    fn test_five_on_minimum_board() {
        let board = board_with(5, &run(Stone::Black, (0..5).map(|i| (i, 4 - i))));
        let five = find_five_in_row(&board).unwrap();
        assert_eq!(five.direction, LineDirection::AntiDiagonal);
        assert_eq!(five.cells[0], Pos::new(0, 4));
    }
}
