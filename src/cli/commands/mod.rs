//! CLI command implementations.

use gambit::engine::EngineError;

pub trait Command {
    fn execute(self) -> Result<(), EngineError>;
}

pub mod calculate_best_move;
pub mod play;
pub mod watch;

// Shared utilities for commands
pub(crate) mod util;
