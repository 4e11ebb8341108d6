//! Span timing for the search, built on the tracing crate.
//!
//! Enable with `--features instrumentation`. Every instrumented search call
//! reports its busy and idle time when its span closes.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Installs a global tracing subscriber filtered by `RUST_LOG`.
///
/// `log` records are forwarded to the same subscriber. Returns `false` if a
/// global subscriber was already installed.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
