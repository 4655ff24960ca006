//! Log subscriber setup

use tracing_subscriber::EnvFilter;

/// Filter directive for the given flags.
///
/// `None` means no flag was given and `RUST_LOG` (or the default) applies.
#[must_use]
pub fn level_for(verbose: u8, quiet: bool) -> Option<&'static str> {
    if quiet {
        return Some("error");
    }
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Install the global subscriber; logs go to stderr
pub fn init(verbose: u8, quiet: bool, json: bool) {
    let filter = match level_for(verbose, quiet) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
