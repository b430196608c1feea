//! Provider-shaped records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single record as the provider returned it.
///
/// The field set depends on the query variant, so this is kept as a JSON
/// object rather than a struct. Fields are either scalars or one level of
/// nested object (`buyCurrency.symbol`); the transfer shape nests
/// `block.timestamp.time` one level deeper.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTrade(Map<String, Value>);

impl RawTrade {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the field if the key is present (including when it is `null`).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawTrade {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for RawTrade {
    type Error = Value;

    /// Only JSON objects are records; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_try_from_object() {
        let raw = RawTrade::try_from(json!({"hash": "0xabc", "from": null})).unwrap();
        assert_eq!(raw.get("hash"), Some(&json!("0xabc")));
        assert_eq!(raw.get("from"), Some(&Value::Null));
        assert_eq!(raw.get("to"), None);
    }

    #[test]
    fn test_try_from_non_object_is_rejected() {
        assert_eq!(RawTrade::try_from(json!([1, 2])), Err(json!([1, 2])));
        assert_eq!(RawTrade::try_from(json!("0xabc")), Err(json!("0xabc")));
    }

    #[test]
    fn test_serializes_transparently() {
        let raw = RawTrade::try_from(json!({"buyCurrency": {"symbol": "WETH"}})).unwrap();
        assert_eq!(
            serde_json::to_value(&raw).unwrap(),
            json!({"buyCurrency": {"symbol": "WETH"}})
        );
    }
}
