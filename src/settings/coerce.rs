//! Value coercion for control edits
//!
//! Coercion guarantees type correctness only. Range checks (`min`/`max`) and
//! `pattern` matching belong to the rendering control.

use super::schema::{ControlKind, ValueKind};
use serde_json::Value;
use std::fmt;

/// Why a raw input could not be turned into a control value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    /// Boolean controls only accept booleans
    ExpectedBoolean { found: &'static str },
    /// Text controls accept strings and scalars, not null or containers
    ExpectedText { found: &'static str },
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoerceError::ExpectedBoolean { found } => write!(f, "expected a boolean, got {found}"),
            CoerceError::ExpectedText { found } => write!(f, "expected text, got {found}"),
        }
    }
}

impl std::error::Error for CoerceError {}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coerce a raw input into the value type of a control
pub fn coerce_value(kind: &ControlKind, raw: &Value) -> Result<Value, CoerceError> {
    match kind.value_kind() {
        ValueKind::Boolean => match raw {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            other => Err(CoerceError::ExpectedBoolean {
                found: json_type_name(other),
            }),
        },
        ValueKind::Numeric => Ok(Value::from(parse_number(raw))),
        ValueKind::Text => match raw {
            Value::String(s) => Ok(Value::String(s.clone())),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            other => Err(CoerceError::ExpectedText {
                found: json_type_name(other),
            }),
        },
    }
}

/// Parse a raw input as a finite float, falling back to `0.0`
///
/// Strings are read up to the end of their leading number, so `"12px"` is 12
/// and `"3.5 "` is 3.5. Never fails: a slider fed garbage must land somewhere
/// rather than stick.
pub fn parse_number(raw: &Value) -> f64 {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => numeric_prefix(s.trim_start()).parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Longest leading `[sign] digits [. digits] [exponent]` run of `s`
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let is_digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while is_digit(frac_end) {
            frac_end += 1;
        }
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while is_digit(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Compare two stored values the way a control of `kind` sees them
///
/// Numeric controls compare by magnitude, so an integer `10` from JSON equals
/// the float `10.0` produced by coercion.
pub fn values_equal(kind: &ControlKind, a: &Value, b: &Value) -> bool {
    match (kind.value_kind(), a.as_f64(), b.as_f64()) {
        (ValueKind::Numeric, Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}
