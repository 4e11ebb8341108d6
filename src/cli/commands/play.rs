//! Play command - play a game against the computer.

use std::io::{self, BufRead, Write};

use gambit::chess_state::{uci, STARTING_POSITION_FEN};
use gambit::engine::{Engine, EngineError};
use shakmaty::{Chess, Color};
use structopt::StructOpt;

use super::util::{describe_outcome, parse_position, ColorChoice, EngineArgs};
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(short = "c", long = "color", default_value = "random")]
    pub color: ColorChoice,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN, parse(try_from_str = parse_position))]
    pub starting_position: Chess,
    #[structopt(flatten)]
    pub engine: EngineArgs,
}

impl Command for PlayArgs {
    fn execute(self) -> Result<(), EngineError> {
        let human = self.color.resolve();
        let mut engine = Engine::with_config(self.engine.config(self.depth, self.starting_position))?;
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        let side = match human {
            Color::White => "white",
            Color::Black => "black",
        };
        println!("You play {}. Enter moves in UCI notation.", side);
        println!("{}", engine.state().fen());

        while !engine.is_game_over() {
            if engine.state().turn() == human {
                print!("your move: ");
                // a failed flush only delays the prompt
                io::stdout().flush().ok();

                let line = match lines.next() {
                    Some(Ok(line)) => line,
                    Some(Err(error)) => {
                        eprintln!("error: {}", error);
                        continue;
                    }
                    None => return Ok(()),
                };

                let game_move = match engine.parse_move(line.trim()) {
                    Ok(game_move) => game_move,
                    Err(error) => {
                        println!("{}", error);
                        continue;
                    }
                };
                engine.apply_move(&game_move)?;
            } else {
                let (score, game_move) = engine.choose_move()?;
                engine.apply_move(&game_move)?;
                println!("{} (value {})", uci(&game_move), score);
            }

            println!("{}", engine.state().fen());
        }

        println!("Game over! {}", describe_outcome(engine.outcome()));
        Ok(())
    }
}
