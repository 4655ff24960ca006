//! Validate an incoming call against the next expectation.

use crate::expectation::Expectation;
use crate::queue::ExpectationQueue;
use crate::result::{DriverError, DriverResult};
use crate::value::args_equal;
use serde_json::Value;

/// Pop the next expectation and check it against `operation` and `actual`.
///
/// The expectation is consumed whether or not it matches: a failed match
/// is not put back.
pub fn match_call(
    queue: &mut ExpectationQueue,
    operation: &str,
    actual: &[Value],
) -> DriverResult<Expectation> {
    let Some(expectation) = queue.pop_next() else {
        return Err(DriverError::QueueExhausted {
            operation: operation.to_string(),
        });
    };

    if expectation.operation() != operation {
        return Err(DriverError::OperationMismatch {
            expected: expectation.operation().to_string(),
            actual: operation.to_string(),
        });
    }

    if let Some(expected) = expectation.expected_args() {
        if !args_equal(expected, actual) {
            return Err(DriverError::ArgumentMismatch {
                operation: operation.to_string(),
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
    }

    tracing::debug!(
        operation,
        remaining = queue.remaining_count(),
        "matched expectation"
    );
    Ok(expectation)
}
