use shakmaty::{Chess, Color, EnPassantMode, Position, Square};

use crate::evaluate::Canonical;

/// Identifies a chess position for evaluation purposes: piece placement by
/// type and color, side to move, castling rights and the legal en passant
/// square. Move counters and history are not part of the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    placement: [u64; 8],
    turn: Color,
    castling_rights: u64,
    en_passant: Option<Square>,
}

impl Canonical for Chess {
    type Key = CanonicalKey;

    fn canonical_key(&self) -> CanonicalKey {
        let board = self.board();
        CanonicalKey {
            placement: [
                board.white().0,
                board.black().0,
                board.pawns().0,
                board.knights().0,
                board.bishops().0,
                board.rooks().0,
                board.queens().0,
                board.kings().0,
            ],
            turn: self.turn(),
            castling_rights: self.castles().castling_rights().0,
            en_passant: self.ep_square(EnPassantMode::Legal),
        }
    }
}
