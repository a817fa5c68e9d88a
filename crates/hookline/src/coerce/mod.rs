//! Type-directed coercion of loosely typed JSON values.
//!
//! Hook payloads come from emitters whose schema evolves independently of the
//! hooks reading them. Rather than rejecting a field that arrives in an
//! unexpected shape, the binder coerces it with these helpers: each returns
//! `None` when the value cannot be read as the requested type, and never
//! fails.

use serde_json::{Number, Value};

/// Spellings read as `true`, compared case-insensitively after trimming.
const TRUTHY: &[&str] = &["true", "1", "yes", "y", "on"];

/// Spellings read as `false`, compared case-insensitively after trimming.
const FALSY: &[&str] = &["false", "0", "no", "n", "off"];

/// Smallest float that no longer fits in an `i64` after truncation (2^63).
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Smallest float that still fits in an `i64` (-2^63).
const I64_LOWER_BOUND: f64 = -9_223_372_036_854_775_808.0;

/// Coerces a value to text.
///
/// Strings pass through; other non-null values are rendered as their
/// canonical JSON text, so `12` becomes `"12"` and `{"a":1}` stays
/// `{"a":1}`.
///
/// # Example
///
/// ```
/// use hookline::coerce;
/// use serde_json::json;
///
/// assert_eq!(coerce::string(&json!("exec")), Some("exec".to_owned()));
/// assert_eq!(coerce::string(&json!(12)), Some("12".to_owned()));
/// assert_eq!(coerce::string(&json!(null)), None);
/// ```
#[must_use]
pub fn string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Coerces a value to a signed integer.
///
/// Booleans map to 0/1, floats truncate toward zero, and base-10 numeric
/// strings parse. Anything else, including numbers outside the `i64` range,
/// yields `None`.
///
/// # Example
///
/// ```
/// use hookline::coerce;
/// use serde_json::json;
///
/// assert_eq!(coerce::integer(&json!("3")), Some(3));
/// assert_eq!(coerce::integer(&json!(-2.9)), Some(-2));
/// assert_eq!(coerce::integer(&json!("abc")), None);
/// ```
#[must_use]
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::Number(number) => number_to_integer(number),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Coerces a value to a boolean.
///
/// Booleans pass through, integers are `true` when non-zero, and strings are
/// matched against a fixed vocabulary (`true/1/yes/y/on` and
/// `false/0/no/n/off`). Floats and everything else yield `None`.
///
/// # Example
///
/// ```
/// use hookline::coerce;
/// use serde_json::json;
///
/// assert_eq!(coerce::boolean(&json!("no")), Some(false));
/// assert_eq!(coerce::boolean(&json!(2)), Some(true));
/// assert_eq!(coerce::boolean(&json!("maybe")), None);
/// ```
#[must_use]
pub fn boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number
            .as_i64()
            .map(|int| int != 0)
            .or_else(|| number.as_u64().map(|int| int != 0)),
        Value::String(text) => boolean_from_text(text),
        _ => None,
    }
}

/// Coerces a value to a list of strings.
///
/// Arrays pass through with each element coerced by [`string`]; elements that
/// coerce to `None` (nulls) are dropped. Non-arrays yield `None`.
#[must_use]
pub fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(string).collect()),
        _ => None,
    }
}

/// Passes an opaque value through unchanged, treating JSON `null` as absent.
#[must_use]
pub fn opaque(value: &Value) -> Option<Value> {
    if value.is_null() {
        None
    } else {
        Some(value.clone())
    }
}

fn number_to_integer(number: &Number) -> Option<i64> {
    if let Some(int) = number.as_i64() {
        return Some(int);
    }
    if number.is_u64() {
        // Positive integer beyond i64::MAX.
        return None;
    }
    number.as_f64().and_then(truncate_float)
}

fn truncate_float(float: f64) -> Option<i64> {
    if !float.is_finite() {
        return None;
    }
    let truncated = float.trunc();
    if truncated < I64_LOWER_BOUND || truncated >= I64_UPPER_BOUND {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the value is integral and inside the i64 range"
    )]
    let integer = truncated as i64;
    Some(integer)
}

fn boolean_from_text(text: &str) -> Option<bool> {
    let normalised = text.trim().to_ascii_lowercase();
    if TRUTHY.contains(&normalised.as_str()) {
        Some(true)
    } else if FALSY.contains(&normalised.as_str()) {
        Some(false)
    } else {
        None
    }
}
