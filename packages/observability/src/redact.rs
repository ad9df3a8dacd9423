//! Credential redaction for structured log fields.

use serde_json::{Map, Value};

const REDACTED: &str = "[REDACTED]";
const MAX_FIELD_LEN: usize = 512;

const DENYLIST_KEYS: [&str; 8] = [
    "token",
    "access",
    "refresh",
    "authorization",
    "cookie",
    "password",
    "secret",
    "private_key",
];

/// Returns true if a field name looks like it carries a credential.
pub fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    DENYLIST_KEYS.iter().any(|entry| lower.contains(entry))
}

/// Redact a field value by key name and by shape.
pub fn sanitize_value(key: &str, value: &Value) -> Value {
    if is_sensitive_key(key) {
        return Value::String(REDACTED.to_string());
    }

    match value {
        Value::String(s) => sanitize_string(s),
        Value::Object(map) => {
            let mut out = Map::new();
            for (k, v) in map {
                out.insert(k.clone(), sanitize_value(k, v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| sanitize_value(key, item))
                .collect::<Vec<_>>(),
        ),
        _ => value.clone(),
    }
}

fn sanitize_string(raw: &str) -> Value {
    if looks_like_sensitive_value(raw) {
        return Value::String(REDACTED.to_string());
    }
    if raw.len() > MAX_FIELD_LEN {
        let cut = raw
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_FIELD_LEN)
            .last()
            .unwrap_or(0);
        return Value::String(format!("{}…[TRUNCATED:len={}]", &raw[..cut], raw.len()));
    }
    Value::String(raw.to_string())
}

fn looks_like_sensitive_value(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("bearer ") {
        return true;
    }
    // JWT shape: header.payload.signature
    raw.matches('.').count() == 2 && raw.len() > 40 && !raw.contains(' ')
}
