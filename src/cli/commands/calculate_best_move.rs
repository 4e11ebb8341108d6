//! Calculate best move command - determine the best move from a position.

use gambit::chess_state::uci;
use gambit::engine::{Engine, EngineError};
use shakmaty::Chess;
use structopt::StructOpt;

use super::util::{parse_position, EngineArgs};
use super::Command;

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(long = "fen", parse(try_from_str = parse_position))]
    pub starting_position: Chess,
    #[structopt(flatten)]
    pub engine: EngineArgs,
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) -> Result<(), EngineError> {
        let mut engine = Engine::with_config(self.engine.config(self.depth, self.starting_position))?;

        if engine.is_game_over() {
            eprintln!("There are no valid moves in the given position.");
            return Err(EngineError::NoAvailableMoves);
        }

        let (score, best_move) = engine.choose_move()?;
        println!("{} {}", uci(&best_move), score);
        Ok(())
    }
}
