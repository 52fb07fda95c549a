//! Emitting contextual errors as `tracing` events
//!
//! `tracing` field names are fixed at compile time, so the context is
//! rendered to one JSON string and recorded under the `errcontext` field.

use super::{try_insert, EventSink, FieldSink, JsonEvent};
use crate::keys::INSERTED_KEY;
use serde_json::Value;
use std::error::Error;
use tracing::Level;

/// Field set collected for a single `tracing` event.
#[derive(Debug, Clone, Default)]
pub struct TracingEvent {
    error: Option<String>,
    context: Option<String>,
    fields: JsonEvent,
}

impl TracingEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered identity, if one was written
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Context rendered as JSON, if one was written
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Any other fields written into the event
    pub fn fields(&self) -> &JsonEvent {
        &self.fields
    }
}

impl FieldSink for TracingEvent {
    fn with_str(&mut self, key: &str, value: &str) {
        self.fields.with_str(key, value);
    }

    fn with_any(&mut self, key: &str, value: &Value) {
        self.fields.with_any(key, value);
    }
}

impl EventSink for TracingEvent {
    type Dict = JsonEvent;

    fn new_dict(&self) -> Self::Dict {
        JsonEvent::new()
    }

    fn with_error(&mut self, err: &(dyn Error + 'static)) {
        self.error = Some(err.to_string());
    }

    fn with_dict(&mut self, key: &str, dict: Self::Dict) {
        if key == INSERTED_KEY {
            self.context = dict.to_json_string().ok();
        } else {
            self.fields.with_dict(key, dict);
        }
    }
}

// Callsite levels must be constants, so every macro use is spelled out per level.
macro_rules! at_level {
    ($level:expr, $mac:ident!($($args:tt)+)) => {
        match $level {
            Level::ERROR => tracing::$mac!(Level::ERROR, $($args)+),
            Level::WARN => tracing::$mac!(Level::WARN, $($args)+),
            Level::INFO => tracing::$mac!(Level::INFO, $($args)+),
            Level::DEBUG => tracing::$mac!(Level::DEBUG, $($args)+),
            _ => tracing::$mac!(Level::TRACE, $($args)+),
        }
    };
}

fn level_enabled(level: Level) -> bool {
    match level {
        Level::ERROR => tracing::enabled!(Level::ERROR),
        Level::WARN => tracing::enabled!(Level::WARN),
        Level::INFO => tracing::enabled!(Level::INFO),
        Level::DEBUG => tracing::enabled!(Level::DEBUG),
        _ => tracing::enabled!(Level::TRACE),
    }
}

/// Log `err` at `level` with `message`.
///
/// Nothing is rendered unless the current subscriber records `level`. The
/// event always carries `error`; errors with context also carry `errcontext`
/// holding the context as a JSON object.
pub fn log_error(level: Level, message: &str, err: &(dyn Error + 'static)) {
    if !level_enabled(level) {
        return;
    }

    let mut event = TracingEvent::new();
    try_insert(err)(&mut event);

    let error = event.error.unwrap_or_else(|| err.to_string());
    let context = event.context.as_deref();

    at_level!(
        level,
        event!(error = %error, errcontext = context, "{}", message)
    );
}
