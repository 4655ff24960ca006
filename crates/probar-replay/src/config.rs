//! Replay driver configuration.

use crate::result::{ConfigError, ConfigResult};
use crate::wait::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use std::time::Duration;

/// Environment variable overriding the wait poll delay (milliseconds)
pub const ENV_POLL_MS: &str = "PROBAR_REPLAY_POLL_MS";

/// Environment variable overriding the wait retry timeout (milliseconds)
pub const ENV_TIMEOUT_MS: &str = "PROBAR_REPLAY_TIMEOUT_MS";

/// Environment variable enabling strict sessions (`1`/`true`/`0`/`false`)
pub const ENV_STRICT: &str = "PROBAR_REPLAY_STRICT";

/// Configuration for a [`ReplayDriver`](crate::ReplayDriver)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Delay between predicate attempts in `wait_for`
    pub poll_delay: Duration,
    /// How long `wait_for` keeps retrying
    pub retry_timeout: Duration,
    /// Reject calls made outside `start()`/`stop()`
    pub strict_session: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            poll_delay: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            retry_timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            strict_session: false,
        }
    }
}

impl ReplayConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wait poll delay
    #[must_use]
    pub const fn poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    /// Set the wait retry timeout
    #[must_use]
    pub const fn retry_timeout(mut self, timeout: Duration) -> Self {
        self.retry_timeout = timeout;
        self
    }

    /// Enable or disable strict sessions
    #[must_use]
    pub const fn strict_session(mut self, strict: bool) -> Self {
        self.strict_session = strict;
        self
    }

    /// Defaults overridden by `PROBAR_REPLAY_*` environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_POLL_MS) {
            config.poll_delay = Duration::from_millis(parse_millis(ENV_POLL_MS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            config.retry_timeout = Duration::from_millis(parse_millis(ENV_TIMEOUT_MS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_STRICT) {
            config.strict_session = parse_flag(ENV_STRICT, &raw)?;
        }
        Ok(config)
    }
}

fn parse_millis(name: &str, raw: &str) -> ConfigResult<u64> {
    raw.trim().parse().map_err(|_| invalid_env(name, raw))
}

fn parse_flag(name: &str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid_env(name, raw)),
    }
}

fn invalid_env(name: &str, raw: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        name: name.to_string(),
        value: raw.to_string(),
    }
}
