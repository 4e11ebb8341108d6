//! Positional sub-evaluators: mobility, king safety and center control.

use shakmaty::{Chess, Color, Position, Square};

use super::{turn_sign, Evaluator};
use crate::search::Score;

const CENTER: [Square; 4] = [Square::D4, Square::D5, Square::E4, Square::E5];

/// Number of legal moves of the side to move, signed by that side.
#[derive(Clone, Copy, Debug, Default)]
pub struct MobilityEvaluator;

impl Evaluator<Chess> for MobilityEvaluator {
    fn evaluate(&self, position: &Chess) -> Score {
        position.legal_moves().len() as Score * turn_sign(position.turn())
    }
}

/// Penalizes the side to move for being in check and rewards it for every
/// move that gives check.
#[derive(Clone, Copy, Debug, Default)]
pub struct KingSafetyEvaluator;

impl Evaluator<Chess> for KingSafetyEvaluator {
    fn evaluate(&self, position: &Chess) -> Score {
        let sign = turn_sign(position.turn());
        let mut score = 0;

        if position.is_check() {
            score -= 2 * sign;
        }

        for game_move in position.legal_moves() {
            let mut after = position.clone();
            after.play_unchecked(&game_move);
            if after.is_check() {
                score += sign;
            }
        }

        score
    }
}

/// White attackers minus black attackers of d4, d5, e4 and e5.
#[derive(Clone, Copy, Debug, Default)]
pub struct CenterControlEvaluator;

impl Evaluator<Chess> for CenterControlEvaluator {
    fn evaluate(&self, position: &Chess) -> Score {
        let board = position.board();
        let occupied = board.occupied();

        CENTER
            .iter()
            .map(|&square| {
                let white = board.attacks_to(square, Color::White, occupied).count();
                let black = board.attacks_to(square, Color::Black, occupied).count();
                white as Score - black as Score
            })
            .sum()
    }
}
