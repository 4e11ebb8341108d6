//! CLI argument parsing using StructOpt.

use gambit::engine::EngineError;
use structopt::StructOpt;

use crate::cli::commands::{
    calculate_best_move::CalculateBestMoveArgs, play::PlayArgs, watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "gambit",
    about = "A depth-limited minimax and alpha-beta chess bot"
)]
pub enum Gambit {
    #[structopt(
        name = "play",
        about = "Play a game against the computer. Moves are typed in UCI notation (e.g. `e2e4`, `e7e8q`). Your color is chosen at random unless you specify it with `--color`. The initial position can be given in FEN notation with `--fen` (default: starting position)."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "watch",
        about = "Watch two independently configured bots play each other, searching at `--white-depth` and `--black-depth` plies."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "calculate-best-move",
        about = "Print the best move and its value for the position given in FEN notation with `--fen` (required)."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
}

impl crate::cli::commands::Command for Gambit {
    fn execute(self) -> Result<(), EngineError> {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Play(cmd),
            Watch(cmd),
            CalculateBestMove(cmd),
        }
    }
}
