//! Structural equality for scripted argument lists.

use serde_json::{Number, Value};

/// Compare two argument lists element by element.
#[must_use]
pub fn args_equal(expected: &[Value], actual: &[Value]) -> bool {
    expected.len() == actual.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(e, a)| values_equal(e, a))
}

/// Deep structural equality.
///
/// Arrays compare in order, objects by key set and per-key value. Numbers
/// compare by numeric value, so `1` and `1.0` are equal.
#[must_use]
pub fn values_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(e), Value::Number(a)) => numbers_equal(e, a),
        (Value::Array(e), Value::Array(a)) => args_equal(e, a),
        (Value::Object(e), Value::Object(a)) => {
            e.len() == a.len()
                && e
                    .iter()
                    .all(|(k, ev)| a.get(k).is_some_and(|av| values_equal(ev, av)))
        }
        _ => expected == actual,
    }
}

/// Integers compare exactly. An integer equals a float only when the float
/// is integral and converts to exactly that integer.
fn numbers_equal(e: &Number, a: &Number) -> bool {
    match (as_integer(e), as_integer(a)) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => a.as_f64().is_some_and(|f| float_is_integer(f, x)),
        (None, Some(y)) => e.as_f64().is_some_and(|f| float_is_integer(f, y)),
        (None, None) => match (e.as_f64(), a.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

// `as` saturates, so out-of-range floats never land on a u64/i64 value.
fn float_is_integer(f: f64, i: i128) -> bool {
    f.fract() == 0.0 && f as i128 == i
}
