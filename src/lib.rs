pub mod chess_state;
pub mod engine;
pub mod evaluate;
pub mod search;

#[cfg(feature = "instrumentation")]
pub mod instrumentation;
