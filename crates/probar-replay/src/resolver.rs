//! Turn a matched expectation into the call's outcome.

use crate::content;
use crate::expectation::{Expectation, ReturnSpec};
use crate::result::{DriverError, DriverResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::Write;

/// What a matched call hands back
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A single value
    Value(Value),
    /// A sequence of values
    Sequence(Vec<Value>),
    /// No value
    Void,
}

impl Outcome {
    /// Collapse into one JSON value (`Void` becomes `null`)
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(v) => v,
            Self::Sequence(items) => Value::Array(items),
            Self::Void => Value::Null,
        }
    }

    /// Deserialize into the operation's return type
    pub fn into_typed<T: DeserializeOwned>(self, operation: &str) -> DriverResult<T> {
        serde_json::from_value(self.into_value()).map_err(|e| DriverError::ReturnType {
            operation: operation.to_string(),
            message: e.to_string(),
        })
    }

    /// Flatten into a list: `Void` is empty, a lone non-array value is one item
    #[must_use]
    pub fn into_sequence(self) -> Vec<Value> {
        match self {
            Self::Void => Vec::new(),
            Self::Sequence(items) | Self::Value(Value::Array(items)) => items,
            Self::Value(value) => vec![value],
        }
    }

    /// Check if the call returned nothing
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

/// Resolve `expectation` for a call that supplied `sink` (if any).
///
/// Content goes into the sink first, then a scripted failure is raised.
/// A driver that fails halfway through writing output behaves the same way.
pub fn resolve(expectation: &Expectation, sink: Option<&mut dyn Write>) -> DriverResult<Outcome> {
    let operation = expectation.operation();

    match sink {
        Some(sink) => content::inject(operation, expectation.content(), sink)?,
        None if expectation.content().is_some() => {
            return Err(DriverError::UnexpectedContentSpec {
                operation: operation.to_string(),
            })
        }
        None => {}
    }

    if let Some(failure) = expectation.failure() {
        return Err(DriverError::Scripted {
            operation: operation.to_string(),
            failure: failure.clone(),
        });
    }

    Ok(match expectation.returns() {
        Some(ReturnSpec::Sequence(items)) => Outcome::Sequence(items.clone()),
        Some(ReturnSpec::Value(value)) => Outcome::Value(value.clone()),
        None => Outcome::Void,
    })
}
