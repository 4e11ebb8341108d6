//! Scores and the sentinel values reserved for decided games.

/// A signed evaluation. Positive values favor the maximizing player.
pub type Score = i32;

/// A forced win for the maximizing player.
pub const WIN: Score = 1_000_000;

/// A forced win for the minimizing player.
pub const LOSS: Score = -WIN;

/// A drawn or otherwise neutral outcome.
pub const DRAW: Score = 0;

/// Search bound lying strictly outside every reachable score.
pub const INFINITY: Score = Score::MAX;

/// Returns true if `score` may be produced by a heuristic, i.e. it lies
/// strictly between the loss and win sentinels.
#[inline]
pub fn is_heuristic(score: Score) -> bool {
    LOSS < score && score < WIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_bound_heuristic_range() {
        assert!(is_heuristic(0));
        assert!(is_heuristic(WIN - 1));
        assert!(is_heuristic(LOSS + 1));
        assert!(!is_heuristic(WIN));
        assert!(!is_heuristic(LOSS));
        assert!(-INFINITY < LOSS && WIN < INFINITY);
    }
}
