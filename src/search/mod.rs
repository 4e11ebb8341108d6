//! Depth-limited adversarial search over any two-player zero-sum game.
//!
//! The search is generic over a [`GameState`] and over the way it steps into
//! child positions ([`Persistent`] or [`MutateUndo`]). Two algorithms are
//! provided: plain minimax with randomized tie-breaking, and alpha-beta
//! pruning. For the same position and depth both compute the same value.
//!
//! Inside the tree a decided position scores beyond its sentinel by the
//! search depth still remaining when it is reached, so a win found sooner
//! outranks one found later (and a loss found later outranks one found
//! sooner). The value reported at the root is clamped back to the sentinel.

mod alpha_beta;
mod apply;
mod minimax;
pub mod score;
mod traits;


use std::marker::PhantomData;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub use apply::{Apply, MutateUndo, Persistent};
pub use score::{Score, DRAW, INFINITY, LOSS, WIN};
pub use traits::{GameState, PersistentState, Player, UndoState, Winner};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("position is not terminal but has no legal moves")]
    NonTerminalWithoutMoves,
    #[error("position reports is_terminal = {terminal} but winner = {winner:?}")]
    InconsistentTerminal { terminal: bool, winner: Winner },
    #[error("heuristic score {score} lies outside the open interval between the loss and win sentinels")]
    ScoreOutOfRange { score: Score },
}

/// The value of a searched position and the move that achieves it.
///
/// `best_move` is `None` for leaves. At the root it is `None` only when the
/// root itself is terminal.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<M> {
    pub value: Score,
    pub best_move: Option<M>,
}

impl<M> SearchResult<M> {
    fn leaf(value: Score) -> Self {
        Self {
            value,
            best_move: None,
        }
    }
}

/// Counters collected during the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    searched_position_count: usize,
    evaluation_count: usize,
    cutoff_count: usize,
}

impl SearchStats {
    pub fn searched_position_count(&self) -> usize {
        self.searched_position_count
    }

    pub fn evaluation_count(&self) -> usize {
        self.evaluation_count
    }

    pub fn cutoff_count(&self) -> usize {
        self.cutoff_count
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A search engine instance.
///
/// `A` fixes how child positions are reached for every search this instance
/// runs. `R` is the random source used to break ties between equally good
/// moves in minimax.
pub struct Searcher<A, R = StdRng> {
    rng: R,
    shuffle: bool,
    stats: SearchStats,
    application: PhantomData<A>,
}

impl<A> Searcher<A, StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<A> Default for Searcher<A, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R: Rng> Searcher<A, R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            shuffle: true,
            stats: SearchStats::default(),
            application: PhantomData,
        }
    }

    /// Enables or disables the shuffle minimax performs before choosing among
    /// its candidates. Without it, ties go to the first move enumerated.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Evaluates a position without looking further ahead. `remaining_depth`
    /// is the depth budget left at this node.
    fn evaluate_leaf<S: GameState>(
        &mut self,
        state: &S,
        remaining_depth: u8,
    ) -> Result<SearchResult<S::Move>, SearchError> {
        self.stats.evaluation_count += 1;
        let value = match state.value()? {
            WIN => WIN + Score::from(remaining_depth),
            LOSS => LOSS - Score::from(remaining_depth),
            value => value,
        };
        Ok(SearchResult::leaf(value))
    }

    /// Result of a depth 0 search at the root: the root's own value, paired
    /// with a legal move unless the root is terminal.
    fn immediate_result<S: GameState>(
        &mut self,
        state: &S,
        randomize: bool,
    ) -> Result<SearchResult<S::Move>, SearchError> {
        self.stats.searched_position_count += 1;
        let mut result = self.evaluate_leaf(state, 0)?;
        if state.is_terminal() {
            return Ok(result);
        }

        let moves: Vec<S::Move> = state.legal_moves().into_iter().collect();
        let chosen = if randomize && self.shuffle {
            moves.choose(&mut self.rng).cloned()
        } else {
            moves.into_iter().next()
        };

        match chosen {
            Some(game_move) => {
                result.best_move = Some(game_move);
                Ok(result)
            }
            None => Err(SearchError::NonTerminalWithoutMoves),
        }
    }

    /// Finishes a root search: maps depth-adjusted win and loss scores back
    /// to their sentinels and logs the search summary.
    fn finish<M>(&self, algorithm: &str, depth: u8, mut result: SearchResult<M>) -> SearchResult<M> {
        result.value = result.value.clamp(LOSS, WIN);
        self.log_summary(algorithm, depth, result.value);
        result
    }

    fn log_summary(&self, algorithm: &str, depth: u8, value: Score) {
        debug!(
            "{} depth {}: value {}, {} positions searched, {} evaluations, {} cutoffs",
            algorithm,
            depth,
            value,
            self.stats.searched_position_count,
            self.stats.evaluation_count,
            self.stats.cutoff_count
        );
    }
}
