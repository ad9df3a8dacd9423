//! Error payloads returned by the backend.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Error JSON from either service.
///
/// FastAPI and DRF both put a human-readable message in `detail`; FastAPI
/// validation failures put a list of `{msg, loc}` objects there instead, and
/// DRF serializer failures return per-field message lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl ErrorBody {
    /// Parse a response body, if it is a JSON object.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<ErrorBody>(body).ok()
    }

    /// The server's `detail` message, when it carries one.
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(message) => Some(message.clone()),
            Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        }
    }
}
