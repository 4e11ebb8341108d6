//! Alpha-beta search.
//!
//! Alpha-beta pruning is an optimization of minimax search that maintains a window [alpha, beta]
//! representing the range of scores that matter. Once a node's running best reaches the bound
//! its opponent already has available elsewhere, its remaining siblings cannot affect the result
//! and are skipped. Called with an infinite window the root value equals the minimax value.
//!
//! The search is written as a pair of mutually recursive functions, one per side, so no sign
//! bookkeeping is needed. Cutoffs are fail-hard: the value returned at a cutoff is the running
//! best of the node, never the bound itself.

use rand::Rng;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::apply::Apply;
use super::score::{Score, INFINITY};
use super::traits::{GameState, Player};
use super::{SearchError, SearchResult, Searcher};

impl<A, R: Rng> Searcher<A, R> {
    /// Returns the best move for `player` from `state`, looking `depth` plies ahead.
    ///
    /// Among equally valued moves the first one enumerated wins.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn alphabeta<S>(
        &mut self,
        state: &mut S,
        player: Player,
        depth: u8,
    ) -> Result<SearchResult<S::Move>, SearchError>
    where
        S: GameState,
        A: Apply<S>,
    {
        self.stats.reset();

        let result = if depth == 0 {
            self.immediate_result(state, false)?
        } else {
            match player {
                Player::Maximizer => self.max_value(state, -INFINITY, INFINITY, depth)?,
                Player::Minimizer => self.min_value(state, -INFINITY, INFINITY, depth)?,
            }
        };

        Ok(self.finish("alpha-beta", depth, result))
    }

    fn max_value<S>(
        &mut self,
        state: &mut S,
        mut alpha: Score,
        beta: Score,
        depth: u8,
    ) -> Result<SearchResult<S::Move>, SearchError>
    where
        S: GameState,
        A: Apply<S>,
    {
        self.stats.searched_position_count += 1;

        if depth == 0 || state.is_terminal() {
            return self.evaluate_leaf(state, depth);
        }

        let mut best = SearchResult {
            value: -INFINITY,
            best_move: None,
        };

        for game_move in state.legal_moves() {
            let value = A::with_child(state, &game_move, |child| {
                Ok(self.min_value(child, alpha, beta, depth - 1)?.value)
            })?;

            if value > best.value {
                best = SearchResult {
                    value,
                    best_move: Some(game_move),
                };
            }

            if best.value >= beta {
                self.stats.cutoff_count += 1;
                return Ok(best);
            }

            alpha = alpha.max(best.value);
        }

        if best.best_move.is_none() {
            return Err(SearchError::NonTerminalWithoutMoves);
        }

        Ok(best)
    }

    fn min_value<S>(
        &mut self,
        state: &mut S,
        alpha: Score,
        mut beta: Score,
        depth: u8,
    ) -> Result<SearchResult<S::Move>, SearchError>
    where
        S: GameState,
        A: Apply<S>,
    {
        self.stats.searched_position_count += 1;

        if depth == 0 || state.is_terminal() {
            return self.evaluate_leaf(state, depth);
        }

        let mut best = SearchResult {
            value: INFINITY,
            best_move: None,
        };

        for game_move in state.legal_moves() {
            let value = A::with_child(state, &game_move, |child| {
                Ok(self.max_value(child, alpha, beta, depth - 1)?.value)
            })?;

            if value < best.value {
                best = SearchResult {
                    value,
                    best_move: Some(game_move),
                };
            }

            if best.value <= alpha {
                self.stats.cutoff_count += 1;
                return Ok(best);
            }

            beta = beta.min(best.value);
        }

        if best.best_move.is_none() {
            return Err(SearchError::NonTerminalWithoutMoves);
        }

        Ok(best)
    }
}
