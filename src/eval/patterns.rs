//! Pattern scores for Gomoku evaluation
//!
//! These constants define the scoring weights for various board patterns.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    // Winning patterns
    /// Five in a row - immediate win
    pub const FIVE: i32 = 1_000_000;

    // Strong attacking patterns
    /// Open four: _OOOO_ (unstoppable)
    pub const OPEN_FOUR: i32 = 100_000;
    /// Closed four: XOOOO_ or _OOOOX (one way to extend)
    pub const CLOSED_FOUR: i32 = 50_000;

    // Moderate threats
    /// Open three: _OOO_ (becomes open four if not blocked)
    pub const OPEN_THREE: i32 = 10_000;
    /// Closed three: XOOO_ or _OOOX (one side blocked)
    pub const CLOSED_THREE: i32 = 1_500;

    // Building patterns
    /// Open two: _OO_ (potential to grow)
    pub const OPEN_TWO: i32 = 1_000;
    /// Closed two: XOO_ or _OOX (one side blocked)
    pub const CLOSED_TWO: i32 = 200;

    /// Scores at or above this magnitude mean a decided game
    pub const WIN_THRESHOLD: i32 = Self::FIVE - 1_000;
}

/// True if `score` reports a forced win or loss
#[inline]
pub fn is_decisive(score: i32) -> bool {
    score.abs() >= PatternScore::WIN_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        // Verify score hierarchy makes sense
        assert!(PatternScore::FIVE > PatternScore::OPEN_FOUR);
        assert!(PatternScore::OPEN_FOUR > PatternScore::CLOSED_FOUR);
        assert!(PatternScore::CLOSED_FOUR > PatternScore::OPEN_THREE);
        assert!(PatternScore::OPEN_THREE > PatternScore::CLOSED_THREE);
        assert!(PatternScore::CLOSED_THREE > PatternScore::OPEN_TWO);
        assert!(PatternScore::OPEN_TWO > PatternScore::CLOSED_TWO);
    }

    #[test]
    fn test_decisive_scores() {
        assert!(is_decisive(PatternScore::FIVE));
        assert!(is_decisive(-PatternScore::FIVE + 20));
        assert!(!is_decisive(PatternScore::OPEN_FOUR * 2));
    }
}
