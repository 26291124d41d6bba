//! Scalar coercion over raw `serde_json::Value`s.
//!
//! Raw ad payloads put numbers where strings are expected, strings where
//! numbers are expected, and nulls everywhere. These helpers absorb that:
//! they always return a usable value and never error.

use serde_json::Value;

/// Coerces any JSON value to a string.
///
/// `null` becomes the empty string, strings pass through unchanged, numbers
/// and booleans use their display form, and arrays/objects fall back to
/// their compact JSON text.
#[must_use]
pub fn ensure_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Coerces any JSON value to an integer, falling back on `default`.
///
/// Numbers truncate toward zero, digit strings parse, booleans map to 0/1.
/// Anything else (including fractional strings) yields `default`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn ensure_i64(value: &Value, default: i64) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(default),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(default),
        Value::Bool(b) => i64::from(*b),
        _ => default,
    }
}

/// The emptiness test used for field-alias fallback: an empty value does
/// not stop the search for a usable one.
///
/// Empty: `null`, `false`, `0`, `0.0`, `""`, `[]`, `{}`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ensure_string_null_is_empty() {
        assert_eq!(ensure_string(&Value::Null), "");
    }

    #[test]
    fn ensure_string_passes_strings_through() {
        assert_eq!(ensure_string(&json!("hello")), "hello");
    }

    #[test]
    fn ensure_string_renders_numbers_and_bools() {
        assert_eq!(ensure_string(&json!(42)), "42");
        assert_eq!(ensure_string(&json!(3.5)), "3.5");
        assert_eq!(ensure_string(&json!(true)), "true");
    }

    #[test]
    fn ensure_string_renders_nested_as_json_text() {
        assert_eq!(ensure_string(&json!(["a", 1])), r#"["a",1]"#);
    }

    #[test]
    fn ensure_i64_null_uses_default() {
        assert_eq!(ensure_i64(&Value::Null, 7), 7);
    }

    #[test]
    fn ensure_i64_parses_numbers_and_digit_strings() {
        assert_eq!(ensure_i64(&json!(12), 0), 12);
        assert_eq!(ensure_i64(&json!(12.9), 0), 12);
        assert_eq!(ensure_i64(&json!("34"), 0), 34);
        assert_eq!(ensure_i64(&json!(" 34 "), 0), 34);
    }

    #[test]
    fn ensure_i64_garbage_uses_default() {
        assert_eq!(ensure_i64(&json!("lots"), 3), 3);
        assert_eq!(ensure_i64(&json!("3.5"), 3), 3);
        assert_eq!(ensure_i64(&json!([1, 2]), 3), 3);
    }

    #[test]
    fn is_empty_value_matrix() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!(false)));
        assert!(is_empty_value(&json!(0)));
        assert!(is_empty_value(&json!(0.0)));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));

        assert!(!is_empty_value(&json!(true)));
        assert!(!is_empty_value(&json!(1)));
        assert!(!is_empty_value(&json!("x")));
        assert!(!is_empty_value(&json!([0])));
    }
}
