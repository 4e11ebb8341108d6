mod cli;

use std::process;

use structopt::StructOpt;

use cli::commands::Command;
use cli::Gambit;

fn main() {
    init_logging();

    if let Err(error) = Gambit::from_args().execute() {
        eprintln!("error: {}", error);
        process::exit(1);
    }
}

#[cfg(feature = "instrumentation")]
fn init_logging() {
    if !gambit::instrumentation::init_tracing() {
        eprintln!("tracing subscriber already installed");
    }
}

#[cfg(not(feature = "instrumentation"))]
fn init_logging() {
    env_logger::init();
}
