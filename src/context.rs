//! Diagnostic context carried next to a static error
//!
//! A [`Context`] is an ordered, append-only list of keyed entries. Order is
//! significant: the first entry describes what the error fundamentally is,
//! later entries describe what was learned while it propagated.

use crate::sink::FieldSink;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

/// A single context entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    /// Free-form text, written with [`FieldSink::with_str`].
    Message(String),
    /// A captured value, written with [`FieldSink::with_any`].
    Value(Value),
}

impl ContextValue {
    /// Capture a value through its `Serialize` implementation.
    ///
    /// Only what the type serializes is kept. Fields marked `#[serde(skip)]`
    /// or private state without a serialized form are lost. A value that
    /// cannot be serialized is replaced by a message describing the failure.
    pub fn capture<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::Value(value),
            Err(e) => {
                debug!("Context value could not be serialized: {}", e);
                Self::Message(format!("<unserializable: {e}>"))
            }
        }
    }

    /// The text of a message entry.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(msg) => Some(msg),
            Self::Value(_) => None,
        }
    }

    /// The captured value of a value entry.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Message(_) => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl Serialize for ContextValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Message(msg) => serializer.serialize_str(msg),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

impl From<Value> for ContextValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Ordered keyed entries attached to an error.
///
/// Keys may repeat; every entry is kept and emitted in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: Vec<(String, ContextValue)>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry stored under `key`
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Every entry stored under `key`, oldest first
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ContextValue> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// The entry that describes the error itself
    pub fn first(&self) -> Option<(&str, &ContextValue)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fold every entry into `sink`, in insertion order.
    pub fn write_to<S: FieldSink + ?Sized>(&self, sink: &mut S) {
        for (key, value) in &self.entries {
            match value {
                ContextValue::Message(msg) => sink.with_str(key, msg),
                ContextValue::Value(value) => sink.with_any(key, value),
            }
        }
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
