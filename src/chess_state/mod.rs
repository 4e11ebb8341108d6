//! Chess implementation of the search traits on top of `shakmaty`.
//!
//! [`ChessState`] wraps a rules-engine position together with the evaluator
//! used for its heuristic and the Zobrist hashes of every position reached
//! since the state was created, which is what makes threefold repetition
//! detectable.

mod key;


use std::fmt;
use std::rc::Rc;

use log::error;
use shakmaty::fen::{Fen, ParseFenError};
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Outcome, Position};
use thiserror::Error;

use crate::evaluate::{Canonical, Evaluator};
use crate::search::{GameState, PersistentState, Player, Score, UndoState, Winner};

pub use key::CanonicalKey;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which either side may claim a draw.
const FIFTY_MOVE_RULE_PLIES: u32 = 100;

/// Occurrences of a position at which either side may claim a draw.
const REPETITION_LIMIT: usize = 3;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] ParseFenError),
    #[error("illegal position: {reason}")]
    IllegalPosition { reason: String },
}

/// Parses a FEN string into a rules-engine position.
pub fn parse_fen(fen: &str) -> Result<Chess, StateError> {
    let fen: Fen = fen.parse()?;
    fen.into_position(CastlingMode::Standard)
        .map_err(|error| StateError::IllegalPosition {
            reason: error.to_string(),
        })
}

/// Returns the side a chess color plays in the search. White maximizes.
#[inline]
pub fn player_for(color: Color) -> Player {
    match color {
        Color::White => Player::Maximizer,
        Color::Black => Player::Minimizer,
    }
}

/// Formats a move in UCI notation, e.g. `e2e4` or `e7e8q`.
pub fn uci(game_move: &Move) -> String {
    game_move.to_uci(CastlingMode::Standard).to_string()
}

#[derive(Clone)]
pub struct ChessState {
    position: Chess,
    evaluator: Rc<dyn Evaluator<Chess>>,
    repetition_history: Vec<Zobrist64>,
    undo_stack: Vec<Chess>,
}

impl ChessState {
    pub fn new(position: Chess, evaluator: Rc<dyn Evaluator<Chess>>) -> Self {
        let root_hash = position.zobrist_hash(EnPassantMode::Legal);
        Self {
            position,
            evaluator,
            repetition_history: vec![root_hash],
            undo_stack: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str, evaluator: Rc<dyn Evaluator<Chess>>) -> Result<Self, StateError> {
        Ok(Self::new(parse_fen(fen)?, evaluator))
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn player_to_move(&self) -> Player {
        player_for(self.turn())
    }

    pub fn canonical_key(&self) -> CanonicalKey {
        self.position.canonical_key()
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Finds the legal move written as `text` in UCI notation.
    pub fn find_uci_move(&self, text: &str) -> Option<Move> {
        self.position
            .legal_moves()
            .into_iter()
            .find(|game_move| uci(game_move) == text)
    }

    fn current_hash(&self) -> Zobrist64 {
        self.position.zobrist_hash(EnPassantMode::Legal)
    }

    fn is_threefold_repetition(&self) -> bool {
        let current = self.current_hash();
        self.repetition_history
            .iter()
            .filter(|&&hash| hash == current)
            .count()
            >= REPETITION_LIMIT
    }

    fn is_fifty_move_draw(&self) -> bool {
        self.position.halfmoves() >= FIFTY_MOVE_RULE_PLIES
    }

    /// True if either side may claim a draw by repetition or the fifty-move rule.
    pub fn can_claim_draw(&self) -> bool {
        self.is_threefold_repetition() || self.is_fifty_move_draw()
    }
}

impl fmt::Debug for ChessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChessState")
            .field("fen", &self.fen())
            .field("depth", &self.undo_stack.len())
            .finish()
    }
}

impl fmt::Display for ChessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen())
    }
}

impl GameState for ChessState {
    type Move = Move;
    type Moves = MoveList;

    fn legal_moves(&self) -> MoveList {
        if self.can_claim_draw() {
            return MoveList::new();
        }
        self.position.legal_moves()
    }

    fn is_terminal(&self) -> bool {
        self.position.is_game_over() || self.can_claim_draw()
    }

    fn winner(&self) -> Winner {
        match self.position.outcome() {
            Some(Outcome::Decisive { winner }) => match player_for(winner) {
                Player::Maximizer => Winner::Maximizer,
                Player::Minimizer => Winner::Minimizer,
            },
            Some(Outcome::Draw) => Winner::Draw,
            None if self.can_claim_draw() => Winner::Draw,
            None => Winner::NotTerminal,
        }
    }

    fn heuristic(&self) -> Score {
        self.evaluator.evaluate(&self.position)
    }
}

impl PersistentState for ChessState {
    fn apply(&self, game_move: &Move) -> Self {
        let mut position = self.position.clone();
        position.play_unchecked(game_move);

        let mut repetition_history = self.repetition_history.clone();
        repetition_history.push(position.zobrist_hash(EnPassantMode::Legal));

        Self {
            position,
            evaluator: Rc::clone(&self.evaluator),
            repetition_history,
            undo_stack: Vec::new(),
        }
    }
}

impl UndoState for ChessState {
    fn push(&mut self, game_move: &Move) {
        self.undo_stack.push(self.position.clone());
        self.position.play_unchecked(game_move);
        let hash = self.current_hash();
        self.repetition_history.push(hash);
    }

    fn pop(&mut self) {
        debug_assert!(!self.undo_stack.is_empty(), "pop without a matching push");
        match self.undo_stack.pop() {
            Some(previous) => {
                self.position = previous;
                self.repetition_history.pop();
            }
            None => error!("pop without a matching push at {}", self.fen()),
        }
    }
}
