//! Structured sink contract and deferred insertion
//!
//! A sink is any structured event builder able to take string fields, JSON
//! values, an error, and a nested dictionary. [`try_insert`] inspects an error
//! once and hands back a function that writes it into a sink later, so the
//! context is only serialized when a record is actually produced.

use crate::chain;
use crate::error::HasContext;
use crate::keys::INSERTED_KEY;
use serde_json::Value;
use std::error::Error;
use thiserror::Error;
use tracing::trace;

pub mod json;
pub mod tracing_event;

pub use json::JsonEvent;
pub use tracing_event::{log_error, TracingEvent};

/// Something that accepts keyed fields.
pub trait FieldSink {
    fn with_str(&mut self, key: &str, value: &str);

    fn with_any(&mut self, key: &str, value: &Value);
}

/// A structured event that can also carry an error and nested dictionaries.
pub trait EventSink: FieldSink {
    /// Dictionary type nested under a key of this event
    type Dict: FieldSink;

    /// Start an empty dictionary for this event
    fn new_dict(&self) -> Self::Dict;

    /// Record the error this event is about
    fn with_error(&mut self, err: &(dyn Error + 'static));

    /// Nest a finished dictionary under `key`
    fn with_dict(&mut self, key: &str, dict: Self::Dict);
}

/// Errors raised while rendering a sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to render JSON event: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the identity of `source`, then its context under [`INSERTED_KEY`].
pub fn insert<H, S>(source: &H, sink: &mut S)
where
    H: HasContext + ?Sized,
    S: EventSink,
{
    sink.with_error(source.identity());
    let mut dict = sink.new_dict();
    source.context().write_to(&mut dict);
    sink.with_dict(INSERTED_KEY, dict);
}

/// Prepare the insertion of `err` into a sink.
///
/// When nothing in the chain of `err` carries context, the returned function
/// does nothing. Calling it is always safe.
///
/// ```
/// use errctx::sink::{try_insert, JsonEvent};
/// use errctx::{with_msg, StaticError};
///
/// const ERR_DENIED: StaticError = StaticError::new("access denied");
///
/// let err = with_msg(ERR_DENIED, "user 42");
/// let mut event = JsonEvent::new();
/// try_insert(&err)(&mut event);
///
/// assert_eq!(
///     event.to_json_string().unwrap(),
///     r#"{"error":"access denied","errcontext":{"root":"user 42"}}"#
/// );
/// ```
pub fn try_insert<'a, S: EventSink>(err: &'a (dyn Error + 'static)) -> impl Fn(&mut S) + 'a {
    let found = chain::find_contextual(err);
    if found.is_none() {
        trace!("No context in error chain, insertion is a no-op");
    }
    move |sink: &mut S| {
        if let Some(contextual) = found {
            insert(contextual, sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{with_key_msg, with_msg, ContextualError, StaticError};

    const ERR_STATIC: StaticError = StaticError::new("static error");

    #[test]
    fn test_try_insert_is_noop_for_plain_errors() {
        let mut event = JsonEvent::new();
        event.with_str("level", "debug");
        let before = event.clone();

        try_insert(&ERR_STATIC)(&mut event);

        assert_eq!(event, before);
    }

    #[test]
    fn test_try_insert_can_be_called_repeatedly() {
        let err = with_msg(ERR_STATIC, "once");
        let insert = try_insert(&err);

        let mut first = JsonEvent::new();
        let mut second = JsonEvent::new();
        insert(&mut first);
        insert(&mut second);

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_insert_writes_error_then_grouped_context() {
        let err = with_key_msg(ERR_STATIC, "user", "alice").with_msg("denied");
        let mut event = JsonEvent::new();
        err.insert(&mut event);

        let keys: Vec<_> = event.keys().collect();
        assert_eq!(keys, vec![crate::keys::ERROR_KEY, INSERTED_KEY]);

        let dict = event.dict(INSERTED_KEY).expect("context should be grouped");
        let dict_keys: Vec<_> = dict.keys().collect();
        assert_eq!(dict_keys, vec!["user", crate::keys::MESSAGE_KEY]);
    }

    #[test]
    fn test_insert_empty_context_still_writes_dict() {
        let err = ContextualError::new(ERR_STATIC);
        let mut event = JsonEvent::new();
        err.insert(&mut event);

        assert_eq!(
            event.to_json_string().unwrap(),
            r#"{"error":"static error","errcontext":{}}"#
        );
    }
}
