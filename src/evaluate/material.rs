use shakmaty::{Chess, Color, Position};

use super::{Evaluator, PieceValues};
use crate::search::Score;

/// Sums the material on the board: white pieces count positive, black
/// pieces negative.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator {
    values: PieceValues,
}

impl MaterialEvaluator {
    pub fn new(values: PieceValues) -> Self {
        Self { values }
    }
}

impl Evaluator<Chess> for MaterialEvaluator {
    fn evaluate(&self, position: &Chess) -> Score {
        let board = position.board();
        board
            .occupied()
            .into_iter()
            .filter_map(|square| board.piece_at(square))
            .map(|piece| {
                let value = self.values.material_value(piece.role);
                match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum()
    }
}
