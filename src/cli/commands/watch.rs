//! Watch command - watch two bots play each other.

use gambit::chess_state::{uci, STARTING_POSITION_FEN};
use gambit::engine::{Engine, EngineError};
use shakmaty::{Chess, Color};
use structopt::StructOpt;

use super::util::{describe_outcome, parse_position, EngineArgs};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(long, default_value = "3")]
    pub white_depth: u8,
    #[structopt(long, default_value = "3")]
    pub black_depth: u8,
    #[structopt(long, help = "Stop after this many plies even if the game is not over")]
    pub max_plies: Option<usize>,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN, parse(try_from_str = parse_position))]
    pub starting_position: Chess,
    #[structopt(flatten)]
    pub engine: EngineArgs,
}

impl Command for WatchArgs {
    fn execute(self) -> Result<(), EngineError> {
        // Each side owns its own bot. Both replay every move so their
        // positions stay in step.
        let mut white = Engine::with_config(
            self.engine
                .config(self.white_depth, self.starting_position.clone()),
        )?;
        let mut black = Engine::with_config(
            self.engine
                .config(self.black_depth, self.starting_position),
        )?;

        println!("{}", white.state().fen());

        let mut plies = 0;
        while !white.is_game_over() && self.max_plies.map_or(true, |max| plies < max) {
            let mover = match white.state().turn() {
                Color::White => &mut white,
                Color::Black => &mut black,
            };
            let (score, game_move) = mover.choose_move()?;

            white.apply_move(&game_move)?;
            black.apply_move(&game_move)?;
            plies += 1;

            println!("{}. {} (value {})", plies, uci(&game_move), score);
            println!("{}", white.state().fen());
        }

        if white.is_game_over() {
            println!("Game over! {}", describe_outcome(white.outcome()));
        } else {
            println!("Stopped after {} plies.", plies);
        }
        Ok(())
    }
}
