//! Lookups and scalar coercions shared by the normalizers.
//!
//! "Required" means the key must be present; a present `null` is still a
//! valid value and maps to `None`.

use onchain_etl_provider::RawTrade;
use serde_json::Value;

use super::FieldError;

pub(super) fn required<'a>(raw: &'a RawTrade, key: &str) -> Result<&'a Value, FieldError> {
    raw.get(key).ok_or_else(|| FieldError::missing(key))
}

/// `outer.inner`, where the outer object must exist and contain `inner`.
pub(super) fn required_nested<'a>(
    raw: &'a RawTrade,
    outer: &str,
    inner: &str,
) -> Result<&'a Value, FieldError> {
    required(raw, outer)?
        .get(inner)
        .ok_or_else(|| FieldError::missing(format!("{}.{}", outer, inner)))
}

/// `outer.inner`, where a `null` outer object yields `None` but a present
/// object must still contain `inner`.
pub(super) fn nullable_nested<'a>(
    raw: &'a RawTrade,
    outer: &str,
    inner: &str,
) -> Result<Option<&'a Value>, FieldError> {
    let parent = required(raw, outer)?;
    if parent.is_null() {
        return Ok(None);
    }
    parent
        .get(inner)
        .map(Some)
        .ok_or_else(|| FieldError::missing(format!("{}.{}", outer, inner)))
}

pub(super) fn text(value: Option<&Value>, key: &str) -> Result<Option<String>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(FieldError::invalid(
            key,
            format!("expected a scalar, got {}", other),
        )),
    }
}

/// Numbers and numeric strings both become `f64`. NaN and infinities are
/// rejected.
pub(super) fn float(value: Option<&Value>, key: &str) -> Result<Option<f64>, FieldError> {
    let parsed = match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| FieldError::invalid(key, format!("{} is not representable", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| FieldError::invalid(key, format!("'{}': {}", s, e))),
        Some(other) => Err(FieldError::invalid(
            key,
            format!("expected a number, got {}", other),
        )),
    }?;

    match parsed {
        Some(f) if !f.is_finite() => Err(FieldError::invalid(key, format!("{} is not finite", f))),
        _ => Ok(parsed),
    }
}

/// Integral numbers (or integral numeric strings) become `i64`.
pub(super) fn integer(value: Option<&Value>, key: &str) -> Result<Option<i64>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .map(Some)
            .ok_or_else(|| FieldError::invalid(key, format!("{} is not an integer", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|e| FieldError::invalid(key, format!("'{}': {}", s, e))),
        Some(other) => Err(FieldError::invalid(
            key,
            format!("expected an integer, got {}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawTrade {
        RawTrade::try_from(value).unwrap()
    }

    #[test]
    fn test_required_distinguishes_null_from_missing() {
        let record = raw(json!({"gas": null}));
        assert_eq!(required(&record, "gas"), Ok(&Value::Null));
        assert_eq!(required(&record, "hash"), Err(FieldError::missing("hash")));
    }

    #[test]
    fn test_required_nested_reports_full_path() {
        let record = raw(json!({"transaction": {"hash": "0x1"}, "date": null}));
        assert_eq!(
            required_nested(&record, "transaction", "hash"),
            Ok(&json!("0x1"))
        );
        assert_eq!(
            required_nested(&record, "transaction", "gas"),
            Err(FieldError::missing("transaction.gas"))
        );
        assert_eq!(
            required_nested(&record, "date", "date"),
            Err(FieldError::missing("date.date"))
        );
    }

    #[test]
    fn test_nullable_nested() {
        let record = raw(json!({"buyCurrency": null, "sellCurrency": {}}));
        assert_eq!(nullable_nested(&record, "buyCurrency", "symbol"), Ok(None));
        assert_eq!(
            nullable_nested(&record, "sellCurrency", "symbol"),
            Err(FieldError::missing("sellCurrency.symbol"))
        );
        assert_eq!(
            nullable_nested(&record, "tradeCurrency", "symbol"),
            Err(FieldError::missing("tradeCurrency"))
        );
    }

    #[test]
    fn test_float_accepts_numbers_and_numeric_strings() {
        assert_eq!(float(Some(&json!(1.5)), "v"), Ok(Some(1.5)));
        assert_eq!(float(Some(&json!("2.25")), "v"), Ok(Some(2.25)));
        assert_eq!(float(Some(&Value::Null), "v"), Ok(None));
        assert_eq!(float(None, "v"), Ok(None));
        assert!(matches!(
            float(Some(&json!("abc")), "v"),
            Err(FieldError::InvalidValue { .. })
        ));
        assert!(float(Some(&json!({"x": 1})), "v").is_err());
    }

    #[test]
    fn test_float_rejects_non_finite_strings() {
        for raw in ["NaN", "inf", "-infinity"] {
            assert!(
                matches!(
                    float(Some(&json!(raw)), "value"),
                    Err(FieldError::InvalidValue { ref key, .. }) if key == "value"
                ),
                "{raw} was accepted"
            );
        }
    }

    #[test]
    fn test_integer_coercions() {
        assert_eq!(integer(Some(&json!(21000)), "gas"), Ok(Some(21000)));
        assert_eq!(integer(Some(&json!(21000.0)), "gas"), Ok(Some(21000)));
        assert_eq!(integer(Some(&json!("42")), "gas"), Ok(Some(42)));
        assert!(integer(Some(&json!(1.5)), "gas").is_err());
    }

    #[test]
    fn test_text_coercions() {
        assert_eq!(text(Some(&json!("0xabc")), "k"), Ok(Some("0xabc".into())));
        assert_eq!(text(Some(&json!(7)), "k"), Ok(Some("7".into())));
        assert!(text(Some(&json!([1])), "k").is_err());
    }
}
