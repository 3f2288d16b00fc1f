//! Diagnostic output for the `moed` binary.
//!
//! Observance tables go to stdout; log events from the engine crates go to
//! stderr so piped JSON stays clean.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Targets of the engine crates whose events are shown.
const MOED_TARGETS: &[&str] = &[
    "moed",
    "moed_cli",
    "moed_calendar",
    "moed_config",
    "moed_ephem",
    "moed_time",
];

/// Level for a `-v` count. Anchor resolution logs at info, each anchor
/// candidate and observance at debug, raw ephemeris lookups at trace.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the stderr subscriber. A set `RUST_LOG` replaces the `-v` level.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(target_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `target=level` directives limited to the engine crates; dependencies stay silent.
fn target_directives(verbosity: u8) -> String {
    let level = level_for(verbosity).to_string().to_ascii_lowercase();
    MOED_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
