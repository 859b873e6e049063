//! Subscriber setup for the `pulsenet` binary.
//!
//! What the library reports, by level:
//! - `debug`: graph build summary, feeder inputs still waiting for a
//!   high pulse, each first-high stamp.
//! - `trace`: per-press low/high counts.
//! - `info`: the predicted (or brute-forced) first low at the sink.
//! - `warn`: the press cap ran out before the analyzer finished.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the subscriber. `RUST_LOG` picks the level, `warn` if unset.
///
/// Events go to stderr so stdout carries only query results.
///
/// # Example
/// ```bash
/// RUST_LOG=pulsenet=debug pulsenet wiring.txt --predict --max-presses 5000
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
