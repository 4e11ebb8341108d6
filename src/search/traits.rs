//! Core traits for generic adversarial search.

use std::fmt::Debug;

use super::score::{is_heuristic, Score, DRAW, LOSS, WIN};
use super::SearchError;

/// The side a search is optimizing for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Maximizer,
    Minimizer,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::Maximizer => Player::Minimizer,
            Player::Minimizer => Player::Maximizer,
        }
    }

    /// Returns true if `candidate` is strictly better than `incumbent` for this player.
    #[inline]
    pub fn prefers(self, candidate: Score, incumbent: Score) -> bool {
        match self {
            Player::Maximizer => candidate > incumbent,
            Player::Minimizer => candidate < incumbent,
        }
    }
}

/// Classification of a position with respect to the end of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Maximizer,
    Minimizer,
    Draw,
    NotTerminal,
}

/// Represents the state of a two-player zero-sum game as seen by the search.
///
/// Implementors supply move enumeration, terminal classification and a
/// heuristic. The search never constructs moves itself; every move it applies
/// comes from `legal_moves` of the position it is applied to.
pub trait GameState {
    type Move: Clone + PartialEq + Debug;
    type Moves: IntoIterator<Item = Self::Move>;

    /// Enumerates the legal moves of the side to move.
    fn legal_moves(&self) -> Self::Moves;

    /// Returns true iff no further play is possible.
    fn is_terminal(&self) -> bool;

    fn winner(&self) -> Winner;

    /// Heuristic estimate of a non-terminal position.
    fn heuristic(&self) -> Score;

    /// Returns the sentinel score of a terminal position, or the heuristic of
    /// a non-terminal one.
    ///
    /// Fails if `is_terminal` and `winner` disagree, or if the heuristic falls
    /// outside the open interval between the loss and win sentinels.
    fn value(&self) -> Result<Score, SearchError> {
        match (self.is_terminal(), self.winner()) {
            (true, Winner::Maximizer) => Ok(WIN),
            (true, Winner::Minimizer) => Ok(LOSS),
            (true, Winner::Draw) => Ok(DRAW),
            (false, Winner::NotTerminal) => {
                let score = self.heuristic();
                if is_heuristic(score) {
                    Ok(score)
                } else {
                    Err(SearchError::ScoreOutOfRange { score })
                }
            }
            (terminal, winner) => Err(SearchError::InconsistentTerminal { terminal, winner }),
        }
    }
}

/// A state whose moves produce new, independent states.
pub trait PersistentState: GameState + Sized {
    fn apply(&self, game_move: &Self::Move) -> Self;
}

/// A state mutated in place. Every `push` must be matched by exactly one `pop`.
pub trait UndoState: GameState {
    fn push(&mut self, game_move: &Self::Move);

    fn pop(&mut self);
}
