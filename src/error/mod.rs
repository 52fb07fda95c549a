//! Static error identity with attached diagnostic context
//!
//! A [`ContextualError`] keeps two things apart:
//! - the identity, a static error that callers branch on
//! - the context, keyed messages and values that only ever reach logs
//!
//! Attaching context to an error that already carries a `ContextualError`
//! augments that wrapper instead of nesting a new one.

use crate::chain::{self, JoinedError, SharedError};
use crate::context::{Context, ContextValue};
use crate::keys::{FIRST_KEY, MESSAGE_KEY, VALUE_KEY};
use crate::sink::{self, EventSink, JsonEvent};
use serde::Serialize;
use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

pub mod attach;
pub mod ext;
mod static_error;


pub use attach::{from_anyhow, with_key_msg, with_key_val, with_msg, with_val};
pub use ext::{ContextResult, ResultExt};
pub use static_error::StaticError;

/// Any error that can become an identity.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Read access to an error's identity and its context.
///
/// Sinks emit through this capability rather than a concrete type.
pub trait HasContext {
    /// The error callers compare against
    fn identity(&self) -> &(dyn Error + Send + Sync + 'static);

    /// Diagnostic entries, oldest first
    fn context(&self) -> &Context;
}

/// A static error together with its accumulated diagnostic context.
///
/// `Display` renders the identity only and `source()` returns the identity,
/// so a `ContextualError` can stand in wherever the plain error was used.
/// Context is never consulted for equality.
#[derive(Debug, Clone)]
pub struct ContextualError {
    identity: SharedError,
    context: Context,
}

impl ContextualError {
    /// Wrap `err` with an empty context.
    ///
    /// If `err` already is a `ContextualError` it is returned as is. If one is
    /// buried further down its chain, the new wrapper starts from a copy of
    /// that context and keeps the whole of `err` as identity.
    pub fn new(err: impl Into<BoxError>) -> Self {
        recover(err.into())
    }

    /// Build from an identity and a prepared context
    pub fn from_parts(identity: SharedError, context: Context) -> Self {
        Self { identity, context }
    }

    pub fn into_parts(self) -> (SharedError, Context) {
        (self.identity, self.context)
    }

    pub fn identity(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.identity
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Attach a message under [`FIRST_KEY`] if the context is empty,
    /// [`MESSAGE_KEY`] otherwise.
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        let key = self.next_key(MESSAGE_KEY);
        self.context.push(key, ContextValue::Message(msg.into()));
        self
    }

    /// Attach a value under [`FIRST_KEY`] if the context is empty,
    /// [`VALUE_KEY`] otherwise.
    ///
    /// Only what `val` serializes is captured; skipped fields are lost.
    pub fn with_val<T: Serialize>(mut self, val: T) -> Self {
        let key = self.next_key(VALUE_KEY);
        self.context.push(key, ContextValue::capture(&val));
        self
    }

    /// Attach a message under `key`, even when it is the first entry.
    pub fn with_key_msg(mut self, key: impl Into<String>, msg: impl Into<String>) -> Self {
        self.context.push(key, ContextValue::Message(msg.into()));
        self
    }

    /// Attach a value under `key`, even when it is the first entry.
    pub fn with_key_val<T: Serialize>(mut self, key: impl Into<String>, val: T) -> Self {
        self.context.push(key, ContextValue::capture(&val));
        self
    }

    /// Extend the identity so it also matches `err`.
    ///
    /// The result satisfies equality checks against every error joined so far.
    /// Repeated joins stay flat: members are appended to one [`JoinedError`].
    pub fn join(mut self, err: impl Into<BoxError>) -> Self {
        let mut errors = match self.identity.downcast_ref::<JoinedError>() {
            Some(joined) => joined.errors().to_vec(),
            None => vec![Arc::clone(&self.identity)],
        };
        errors.push(Arc::from(err.into()));
        self.identity = Arc::new(JoinedError::new(errors));
        self
    }

    /// Whether the identity chain contains `target`.
    pub fn is<E>(&self, target: &E) -> bool
    where
        E: Error + PartialEq + 'static,
    {
        chain::is(&*self.identity, target)
    }

    /// Copy identity and context into `target` if it is a `ContextualError`.
    ///
    /// Matches by type only; the identities do not need to agree.
    pub fn as_into(&self, target: &mut dyn Any) -> bool {
        match target.downcast_mut::<Self>() {
            Some(target) => {
                target.identity = Arc::clone(&self.identity);
                target.context = self.context.clone();
                true
            }
            None => false,
        }
    }

    /// Write the identity, then the whole context grouped under
    /// [`INSERTED_KEY`](crate::keys::INSERTED_KEY).
    pub fn insert<S: EventSink>(&self, event: &mut S) {
        sink::insert(self, event);
    }

    /// The inserted form as a JSON value. Repeated context keys collapse.
    pub fn to_json(&self) -> serde_json::Value {
        let mut event = JsonEvent::new();
        self.insert(&mut event);
        event.into_value()
    }

    /// Render as a JSON object, the way [`JsonEvent`] would receive it.
    pub fn to_json_string(&self) -> String {
        let mut event = JsonEvent::new();
        self.insert(&mut event);
        event
            .to_json_string()
            .unwrap_or_else(|_| r#"{"error":"Serialization failed"}"#.to_string())
    }

    fn next_key(&self, later: &'static str) -> &'static str {
        if self.context.is_empty() {
            FIRST_KEY
        } else {
            later
        }
    }
}

impl Default for ContextualError {
    fn default() -> Self {
        Self {
            identity: Arc::new(StaticError::new("")),
            context: Context::new(),
        }
    }
}

impl HasContext for ContextualError {
    fn identity(&self) -> &(dyn Error + Send + Sync + 'static) {
        ContextualError::identity(self)
    }

    fn context(&self) -> &Context {
        ContextualError::context(self)
    }
}

impl fmt::Display for ContextualError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.identity, f)
    }
}

impl Error for ContextualError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.identity)
    }
}

/// Reuse the `ContextualError` inside `err`, or start a new one.
fn recover(err: BoxError) -> ContextualError {
    match err.downcast::<ContextualError>() {
        Ok(existing) => *existing,
        Err(err) => {
            let context = chain::find_context(&*err).cloned().unwrap_or_default();
            ContextualError {
                identity: Arc::from(err),
                context,
            }
        }
    }
}
