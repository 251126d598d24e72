//! Result types reported back to the caller

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregated controller response
///
/// A single command yields one parsed document; `all` yields one document
/// per class, in class table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseRecord {
    Sequence(Vec<Value>),
    Single(Value),
}

impl ResponseRecord {
    /// Number of documents held
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ResponseRecord::Sequence(items) => items.len(),
            ResponseRecord::Single(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert into a plain JSON value
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            ResponseRecord::Sequence(items) => Value::Array(items),
            ResponseRecord::Single(value) => value,
        }
    }
}

/// Successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleResult {
    pub status: u16,
    pub response: ResponseRecord,
    pub changed: bool,
}

/// Aborted run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureResult {
    pub failed: bool,
    pub changed: bool,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl FailureResult {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            failed: true,
            changed: false,
            msg: msg.into(),
            status: None,
            response: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serializes_untagged() {
        let single = ResponseRecord::Single(json!({"totalCount": "0"}));
        assert_eq!(serde_json::to_value(&single).unwrap(), json!({"totalCount": "0"}));

        let seq = ResponseRecord::Sequence(vec![json!(1), json!(2)]);
        assert_eq!(serde_json::to_value(&seq).unwrap(), json!([1, 2]));
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_failure_omits_missing_fields() {
        let failure = FailureResult::new("boom");
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value, json!({"failed": true, "changed": false, "msg": "boom"}));
    }

    #[test]
    fn test_failure_with_status() {
        let failure = FailureResult::new("could not authenticate to apic")
            .with_status(403)
            .with_response(json!("forbidden"));
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["status"], 403);
        assert_eq!(value["response"], "forbidden");
        assert_eq!(value["changed"], false);
    }
}
