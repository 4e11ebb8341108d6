//! Heuristic evaluation of positions.
//!
//! An [`Evaluator`] maps a position to a [`Score`] from white's (the
//! maximizer's) point of view. Chess evaluators can be combined linearly with
//! [`CompoundEvaluator`] and memoized with [`CachedEvaluator`].

mod cache;
mod material;
mod piece_values;
mod positional;

use std::rc::Rc;

use shakmaty::{Chess, Color};
use thiserror::Error;

use crate::search::Score;

pub use cache::{CachedEvaluator, Canonical, PositionCache};
pub use material::MaterialEvaluator;
pub use piece_values::PieceValues;
pub use positional::{CenterControlEvaluator, KingSafetyEvaluator, MobilityEvaluator};

/// Evaluates a position. Higher scores favor the maximizing player.
pub trait Evaluator<P> {
    fn evaluate(&self, position: &P) -> Score;
}

impl<P, E: Evaluator<P> + ?Sized> Evaluator<P> for Box<E> {
    #[inline]
    fn evaluate(&self, position: &P) -> Score {
        (**self).evaluate(position)
    }
}

impl<P, E: Evaluator<P> + ?Sized> Evaluator<P> for Rc<E> {
    #[inline]
    fn evaluate(&self, position: &P) -> Score {
        (**self).evaluate(position)
    }
}

/// +1 if white is to move, -1 otherwise.
#[inline]
pub(crate) fn turn_sign(color: Color) -> Score {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Weighted sum of sub-evaluators.
pub struct CompoundEvaluator<P> {
    evaluators: Vec<(Score, Box<dyn Evaluator<P>>)>,
}

impl<P> CompoundEvaluator<P> {
    pub fn new(evaluators: Vec<(Score, Box<dyn Evaluator<P>>)>) -> Self {
        Self { evaluators }
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }
}

impl<P> Evaluator<P> for CompoundEvaluator<P> {
    /// A sum that does not fit in a [`Score`] saturates to `Score::MIN` or
    /// `Score::MAX`. Both lie outside the heuristic range, so the search
    /// rejects them instead of using a wrapped value.
    fn evaluate(&self, position: &P) -> Score {
        let total = self
            .evaluators
            .iter()
            .map(|(weight, evaluator)| i64::from(*weight) * i64::from(evaluator.evaluate(position)))
            .fold(0i64, i64::saturating_add);

        total.clamp(i64::from(Score::MIN), i64::from(Score::MAX)) as Score
    }
}

/// Largest weight magnitude accepted by [`EvaluatorWeights::validate`]. At
/// this weight every chess sub-evaluator stays far inside the heuristic range.
pub const MAX_WEIGHT: Score = 1_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    #[error("{name} weight {weight} exceeds the maximum magnitude {}", MAX_WEIGHT)]
    OutOfRange { name: &'static str, weight: Score },
}

/// Weights of the chess sub-evaluators. A weight of zero leaves that
/// sub-evaluator out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvaluatorWeights {
    pub material: Score,
    pub mobility: Score,
    pub king_safety: Score,
    pub center_control: Score,
}

impl Default for EvaluatorWeights {
    fn default() -> Self {
        Self {
            material: 1,
            mobility: 0,
            king_safety: 0,
            center_control: 0,
        }
    }
}

impl EvaluatorWeights {
    /// Rejects weights large enough to push a weighted evaluation out of the
    /// heuristic range.
    pub fn validate(&self) -> Result<(), WeightError> {
        let named = [
            ("material", self.material),
            ("mobility", self.mobility),
            ("king safety", self.king_safety),
            ("center control", self.center_control),
        ];
        for &(name, weight) in named.iter() {
            if weight.abs() > MAX_WEIGHT {
                return Err(WeightError::OutOfRange { name, weight });
            }
        }
        Ok(())
    }
}

impl CompoundEvaluator<Chess> {
    /// Builds the chess evaluator for the given weights. With every weight at
    /// zero, falls back to plain material.
    pub fn from_weights(weights: EvaluatorWeights, piece_values: PieceValues) -> Self {
        let mut evaluators: Vec<(Score, Box<dyn Evaluator<Chess>>)> = Vec::new();
        if weights.material != 0 {
            evaluators.push((
                weights.material,
                Box::new(MaterialEvaluator::new(piece_values)),
            ));
        }
        if weights.mobility != 0 {
            evaluators.push((weights.mobility, Box::new(MobilityEvaluator)));
        }
        if weights.king_safety != 0 {
            evaluators.push((weights.king_safety, Box::new(KingSafetyEvaluator)));
        }
        if weights.center_control != 0 {
            evaluators.push((weights.center_control, Box::new(CenterControlEvaluator)));
        }
        if evaluators.is_empty() {
            evaluators.push((1, Box::new(MaterialEvaluator::new(piece_values))));
        }
        Self::new(evaluators)
    }
}

impl Default for CompoundEvaluator<Chess> {
    fn default() -> Self {
        Self::from_weights(EvaluatorWeights::default(), PieceValues::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_state::parse_fen;

    struct Constant(Score);

    impl Evaluator<Chess> for Constant {
        fn evaluate(&self, _position: &Chess) -> Score {
            self.0
        }
    }

    #[test]
    fn test_compound_is_weighted_sum() {
        let compound = CompoundEvaluator::new(vec![
            (2, Box::new(Constant(3)) as Box<dyn Evaluator<Chess>>),
            (-1, Box::new(Constant(4))),
            (5, Box::new(Constant(0))),
        ]);

        assert_eq!(compound.evaluate(&Chess::default()), 2);
    }

    #[test]
    fn test_all_zero_weights_fall_back_to_material() {
        let weights = EvaluatorWeights {
            material: 0,
            mobility: 0,
            king_safety: 0,
            center_control: 0,
        };
        let compound = CompoundEvaluator::from_weights(weights, PieceValues::default());
        assert_eq!(compound.len(), 1);

        // white is a rook up
        let position = parse_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(compound.evaluate(&position), 5);
    }

    #[test]
    fn test_weighted_chess_evaluator() {
        let weights = EvaluatorWeights {
            material: 10,
            mobility: 1,
            king_safety: 0,
            center_control: 0,
        };
        let compound = CompoundEvaluator::from_weights(weights, PieceValues::default());
        assert_eq!(compound.len(), 2);

        // material is level and white has 20 moves
        assert_eq!(compound.evaluate(&Chess::default()), 20);
    }

    #[test]
    fn test_overflowing_weight_saturates() {
        let weights = EvaluatorWeights {
            material: 858_993_460,
            ..EvaluatorWeights::default()
        };
        let compound = CompoundEvaluator::from_weights(weights, PieceValues::default());

        // a rook up times the weight does not fit in a score
        let position = parse_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(compound.evaluate(&position), Score::MAX);

        let mirrored = parse_fen("4k2r/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(compound.evaluate(&mirrored), Score::MIN);
    }

    #[test]
    fn test_sum_of_terms_saturates() {
        let compound = CompoundEvaluator::new(vec![
            (1, Box::new(Constant(Score::MAX)) as Box<dyn Evaluator<Chess>>),
            (1, Box::new(Constant(Score::MAX))),
        ]);
        assert_eq!(compound.evaluate(&Chess::default()), Score::MAX);
    }

    #[test]
    fn test_validate_weights() {
        assert_eq!(EvaluatorWeights::default().validate(), Ok(()));

        let heavy = EvaluatorWeights {
            mobility: -(MAX_WEIGHT + 1),
            ..EvaluatorWeights::default()
        };
        assert_eq!(
            heavy.validate(),
            Err(WeightError::OutOfRange {
                name: "mobility",
                weight: -(MAX_WEIGHT + 1),
            })
        );

        let limit = EvaluatorWeights {
            material: MAX_WEIGHT,
            mobility: -MAX_WEIGHT,
            king_safety: MAX_WEIGHT,
            center_control: MAX_WEIGHT,
        };
        assert!(limit.validate().is_ok());
    }
}
