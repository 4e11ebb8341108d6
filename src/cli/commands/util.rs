//! Shared utilities for CLI commands.

use std::str::FromStr;

use gambit::chess_state::parse_fen;
use gambit::engine::{Algorithm, CacheInvalidation, EngineConfig};
use gambit::evaluate::{EvaluatorWeights, PieceValues};
use gambit::search::{Score, Winner};
use shakmaty::{Chess, Color};
use structopt::StructOpt;

/// Flags shared by every command that builds a bot.
#[derive(StructOpt)]
pub struct EngineArgs {
    #[structopt(
        short,
        long,
        default_value = "alpha-beta",
        help = "Search algorithm: `minimax` or `alpha-beta`"
    )]
    pub algorithm: Algorithm,
    #[structopt(
        long,
        default_value = "never",
        help = "When to clear the evaluation cache: `never` or `irreversible`"
    )]
    pub invalidation: CacheInvalidation,
    #[structopt(long, default_value = "1")]
    pub material_weight: Score,
    #[structopt(long, default_value = "0")]
    pub mobility_weight: Score,
    #[structopt(long, default_value = "0")]
    pub king_safety_weight: Score,
    #[structopt(long, default_value = "0")]
    pub center_control_weight: Score,
}

impl EngineArgs {
    pub fn config(&self, search_depth: u8, starting_position: Chess) -> EngineConfig {
        EngineConfig {
            search_depth,
            algorithm: self.algorithm,
            invalidation: self.invalidation,
            weights: EvaluatorWeights {
                material: self.material_weight,
                mobility: self.mobility_weight,
                king_safety: self.king_safety_weight,
                center_control: self.center_control_weight,
            },
            piece_values: PieceValues::default(),
            starting_position,
        }
    }
}

/// FEN parser usable from `#[structopt(parse(try_from_str = ...))]`.
pub fn parse_position(fen: &str) -> Result<Chess, String> {
    parse_fen(fen).map_err(|error| error.to_string())
}

/// The human's side in `play`; `random` is resolved when the game starts.
#[derive(Clone, Copy, Debug)]
pub enum ColorChoice {
    White,
    Black,
    Random,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(ColorChoice::White),
            "black" => Ok(ColorChoice::Black),
            "random" => Ok(ColorChoice::Random),
            _ => Err(format!("unknown color `{}`", s)),
        }
    }
}

impl ColorChoice {
    pub fn resolve(self) -> Color {
        match self {
            ColorChoice::White => Color::White,
            ColorChoice::Black => Color::Black,
            ColorChoice::Random => {
                if rand::random() {
                    Color::White
                } else {
                    Color::Black
                }
            }
        }
    }
}

pub fn describe_outcome(outcome: Option<Winner>) -> &'static str {
    match outcome {
        Some(Winner::Maximizer) => "White wins",
        Some(Winner::Minimizer) => "Black wins",
        Some(Winner::Draw) => "Draw",
        Some(Winner::NotTerminal) | None => "Unfinished",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_choice() {
        assert!(matches!("white".parse::<ColorChoice>(), Ok(ColorChoice::White)));
        assert!(matches!("black".parse::<ColorChoice>(), Ok(ColorChoice::Black)));
        assert!("purple".parse::<ColorChoice>().is_err());
        assert_eq!(ColorChoice::Black.resolve(), Color::Black);
    }

    #[test]
    fn test_parse_position_reports_bad_fen() {
        assert!(parse_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_ok());
        assert!(parse_position("8/8/8 w").is_err());
    }

    #[test]
    fn test_describe_outcome() {
        assert_eq!(describe_outcome(Some(Winner::Minimizer)), "Black wins");
        assert_eq!(describe_outcome(None), "Unfinished");
    }
}
