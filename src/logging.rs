//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so that command output on stdout (JSON, CSV) stays clean.
//! `RUST_LOG` takes precedence over the `-v` flag when it is set.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a log level.
///
/// - 0: warn
/// - 1 (`-v`): info
/// - 2 (`-vv`): debug
/// - 3+ (`-vvv`): trace
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()))
}

/// Install the global subscriber. Call once, at startup.
pub fn init_logging(verbosity: u8) {
    let filter = build_env_filter(level_from_verbosity(verbosity));

    // Ignore the error: a subscriber may already be set (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_from_verbosity(0), Level::WARN);
        assert_eq!(level_from_verbosity(1), Level::INFO);
        assert_eq!(level_from_verbosity(2), Level::DEBUG);
        assert_eq!(level_from_verbosity(9), Level::TRACE);
    }
}
