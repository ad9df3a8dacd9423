//! JSONL layer for the client log file.
//!
//! One object per event:
//!
//! ```text
//! {"ts":"2025-03-01T09:12:44.120391Z","level":"WARN","service":"cli",
//!  "target":"api_client::client","msg":"Access token rejected, renewing",
//!  "request_id":"6f1c…","fields":{"method":"GET","path":"/api/cart"}}
//! ```
//!
//! `request_id` is lifted out of `fields` so every line belonging to one
//! logical request (first attempt, renewal, replay) can be grepped together.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::io::Write;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::redact::sanitize_value;

const REQUEST_ID_FIELD: &str = "request_id";

#[derive(Serialize)]
struct Line<'a> {
    ts: String,
    level: &'a str,
    service: &'a str,
    target: &'a str,
    msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    fields: Map<String, Value>,
}

/// Collects event fields, redacting each one as it is recorded.
#[derive(Default)]
struct Recorder {
    msg: String,
    request_id: Option<String>,
    fields: Map<String, Value>,
}

impl Recorder {
    fn put(&mut self, field: &Field, value: Value) {
        let name = field.name();
        match (name, value) {
            ("message", Value::String(text)) => self.msg = text,
            (REQUEST_ID_FIELD, Value::String(id)) => self.request_id = Some(id),
            (_, value) => {
                let clean = sanitize_value(name, &value);
                self.fields.insert(name.to_string(), clean);
            }
        }
    }
}

impl Visit for Recorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        // NaN and infinities have no JSON number form.
        let value = serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(value.to_string()));
        self.put(field, value);
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, Value::String(format!("{:?}", value)));
    }
}

/// Layer writing one redacted JSON line per event to `W`.
pub struct JsonLayer<W> {
    service: String,
    make_writer: W,
}

impl<W> JsonLayer<W> {
    pub fn new(service: impl Into<String>, make_writer: W) -> Self {
        Self {
            service: service.into(),
            make_writer,
        }
    }
}

impl<S, W> Layer<S> for JsonLayer<W>
where
    S: Subscriber,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = Recorder::default();
        event.record(&mut recorder);

        let meta = event.metadata();
        let line = Line {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            level: meta.level().as_str(),
            service: &self.service,
            target: meta.target(),
            msg: recorder.msg,
            request_id: recorder.request_id,
            fields: recorder.fields,
        };

        let Ok(mut bytes) = serde_json::to_vec(&line) else {
            return;
        };
        bytes.push(b'\n');
        // A single write keeps lines from concurrent processes whole.
        let _ = self.make_writer.make_writer().write_all(&bytes);
    }
}
