//! Exhaustive depth-limited minimax.
//!
//! Every child of every interior node is searched. Candidates are shuffled
//! before the extremum is taken so that equally valued moves are chosen
//! uniformly at random rather than by enumeration order.

use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::apply::Apply;
use super::score::Score;
use super::traits::{GameState, Player};
use super::{SearchError, SearchResult, Searcher};

type Candidates<M> = SmallVec<[(Score, M); 64]>;

impl<A, R: Rng> Searcher<A, R> {
    /// Returns the best move for `player` from `state`, looking `depth` plies ahead.
    ///
    /// `state` is unchanged when this returns.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn minimax<S>(
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
            self.immediate_result(state, true)?
        } else {
            self.minimax_node(state, player, depth)?
        };

        Ok(self.finish("minimax", depth, result))
    }

    fn minimax_node<S>(
        &mut self,
        state: &mut S,
        player: Player,
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

        let mut candidates: Candidates<S::Move> = SmallVec::new();
        for game_move in state.legal_moves() {
            let value = A::with_child(state, &game_move, |child| {
                Ok(self.minimax_node(child, player.opponent(), depth - 1)?.value)
            })?;
            candidates.push((value, game_move));
        }

        if self.shuffle {
            candidates.shuffle(&mut self.rng);
        }

        match select_best(candidates, player) {
            Some((value, game_move)) => Ok(SearchResult {
                value,
                best_move: Some(game_move),
            }),
            None => Err(SearchError::NonTerminalWithoutMoves),
        }
    }
}

/// Picks the first candidate holding the best value for `player`.
fn select_best<M>(candidates: Candidates<M>, player: Player) -> Option<(Score, M)> {
    let mut best: Option<(Score, M)> = None;
    for (value, game_move) in candidates {
        let improves = match &best {
            Some((best_value, _)) => player.prefers(value, *best_value),
            None => true,
        };
        if improves {
            best = Some((value, game_move));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_select_best_keeps_first_of_equal_values() {
        let candidates: Candidates<char> = smallvec![(3, 'a'), (7, 'b'), (7, 'c'), (1, 'd')];
        assert_eq!(select_best(candidates.clone(), Player::Maximizer), Some((7, 'b')));
        assert_eq!(select_best(candidates, Player::Minimizer), Some((1, 'd')));
    }

    #[test]
    fn test_select_best_of_nothing() {
        assert_eq!(select_best::<char>(SmallVec::new(), Player::Maximizer), None);
    }
}
