//! Result and error types for the replay driver.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Result type for loading and validating expectation scripts
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a driver call.
///
/// Every variant is fatal to the call that produced it. None of them are
/// retried or suppressed by the engine.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A call arrived after every expectation was consumed
    #[error("Unexpected call to '{operation}': no expectations remaining")]
    QueueExhausted {
        /// Operation that was called
        operation: String,
    },

    /// The next expectation names a different operation
    #[error("Expected call to '{expected}' but '{actual}' was called")]
    OperationMismatch {
        /// Operation the script expected next
        expected: String,
        /// Operation actually called
        actual: String,
    },

    /// Arguments differ from the scripted ones
    #[error(
        "Arguments for '{operation}' do not match: expected {}, got {}",
        render_args(.expected),
        render_args(.actual)
    )]
    ArgumentMismatch {
        /// Operation that was called
        operation: String,
        /// Scripted arguments
        expected: Vec<Value>,
        /// Actual arguments
        actual: Vec<Value>,
    },

    /// A sink was supplied but the expectation has no content
    #[error("'{operation}' was given an output sink but its expectation declares no content")]
    MissingContentSpec {
        /// Operation that was called
        operation: String,
    },

    /// Content was scripted for a call that supplied no sink
    #[error("Expectation for '{operation}' declares content but the call supplied no output sink")]
    UnexpectedContentSpec {
        /// Operation that was called
        operation: String,
    },

    /// Writing canned content into the sink failed
    #[error("Failed to write content for '{operation}': {source}")]
    SinkWriteFailure {
        /// Operation that was called
        operation: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The expectation scripts a driver failure
    #[error("{}", render_failure(.failure))]
    Scripted {
        /// Operation that was called
        operation: String,
        /// Failure value from the script
        failure: Value,
    },

    /// The canned return value does not fit the operation's return type
    #[error("Return value for '{operation}' has the wrong shape: {message}")]
    ReturnType {
        /// Operation that was called
        operation: String,
        /// Deserialization message
        message: String,
    },

    /// Strict sessions reject calls outside start/stop
    #[error("Call to '{operation}' outside of a started session")]
    SessionNotStarted {
        /// Operation that was called
        operation: String,
    },

    /// Script configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Discriminant of a [`DriverError`], for assertions in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`DriverError::QueueExhausted`]
    QueueExhausted,
    /// See [`DriverError::OperationMismatch`]
    OperationMismatch,
    /// See [`DriverError::ArgumentMismatch`]
    ArgumentMismatch,
    /// See [`DriverError::MissingContentSpec`]
    MissingContentSpec,
    /// See [`DriverError::UnexpectedContentSpec`]
    UnexpectedContentSpec,
    /// See [`DriverError::SinkWriteFailure`]
    SinkWriteFailure,
    /// See [`DriverError::Scripted`]
    Scripted,
    /// See [`DriverError::ReturnType`]
    ReturnType,
    /// See [`DriverError::SessionNotStarted`]
    SessionNotStarted,
    /// See [`DriverError::Config`]
    Config,
}

impl DriverError {
    /// Get the error discriminant
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::QueueExhausted { .. } => ErrorKind::QueueExhausted,
            Self::OperationMismatch { .. } => ErrorKind::OperationMismatch,
            Self::ArgumentMismatch { .. } => ErrorKind::ArgumentMismatch,
            Self::MissingContentSpec { .. } => ErrorKind::MissingContentSpec,
            Self::UnexpectedContentSpec { .. } => ErrorKind::UnexpectedContentSpec,
            Self::SinkWriteFailure { .. } => ErrorKind::SinkWriteFailure,
            Self::Scripted { .. } => ErrorKind::Scripted,
            Self::ReturnType { .. } => ErrorKind::ReturnType,
            Self::SessionNotStarted { .. } => ErrorKind::SessionNotStarted,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// The scripted failure value, if this error is one
    #[must_use]
    pub const fn scripted_failure(&self) -> Option<&Value> {
        match self {
            Self::Scripted { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Create a sink write failure
    #[must_use]
    pub fn sink_write(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::SinkWriteFailure {
            operation: operation.into(),
            source,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Errors raised while loading or validating an expectation script.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Script file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An expectation record breaks a well-formedness rule
    #[error("Invalid expectation #{index}: {message}")]
    InvalidExpectation {
        /// Position in the script (0-based)
        index: usize,
        /// What is wrong
        message: String,
    },

    /// Environment variable has an unusable value
    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv {
        /// Variable name
        name: String,
        /// Raw value
        value: String,
    },
}

impl ConfigError {
    /// Create an invalid expectation error
    #[must_use]
    pub fn invalid(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidExpectation {
            index,
            message: message.into(),
        }
    }
}

fn render_args(args: &[Value]) -> String {
    serde_json::to_string(args).unwrap_or_else(|_| format!("{args:?}"))
}

fn render_failure(failure: &Value) -> String {
    match failure {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
