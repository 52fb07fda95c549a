//! JSON event sink
//!
//! Builds a JSON object field by field, in write order. Like a streaming JSON
//! logger, a key written twice appears twice in the rendered output.

use super::{EventSink, FieldSink, SinkError};
use crate::keys::ERROR_KEY;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
enum Field {
    Value(Value),
    Dict(JsonEvent),
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Dict(dict) => dict.serialize(serializer),
        }
    }
}

/// Ordered JSON object builder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonEvent {
    fields: Vec<(String, Field)>,
}

impl JsonEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// First plain value written under `key`
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find_map(|(k, field)| match field {
            Field::Value(value) if k == key => Some(value),
            _ => None,
        })
    }

    /// First dictionary nested under `key`
    pub fn dict(&self, key: &str) -> Option<&JsonEvent> {
        self.fields.iter().find_map(|(k, field)| match field {
            Field::Dict(dict) if k == key => Some(dict),
            _ => None,
        })
    }

    /// Collapse into a JSON value. A repeated key keeps its first position
    /// and its last value.
    pub fn into_value(self) -> Value {
        let mut map = Map::with_capacity(self.fields.len());
        for (key, field) in self.fields {
            let value = match field {
                Field::Value(value) => value,
                Field::Dict(dict) => dict.into_value(),
            };
            map.insert(key, value);
        }
        Value::Object(map)
    }

    /// Render compact JSON, keeping repeated keys
    pub fn to_json_string(&self) -> Result<String, SinkError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render indented JSON, keeping repeated keys
    pub fn to_json_string_pretty(&self) -> Result<String, SinkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn push(&mut self, key: &str, field: Field) {
        self.fields.push((key.to_string(), field));
    }
}

impl Serialize for JsonEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, field) in &self.fields {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

impl FieldSink for JsonEvent {
    fn with_str(&mut self, key: &str, value: &str) {
        self.push(key, Field::Value(Value::String(value.to_string())));
    }

    fn with_any(&mut self, key: &str, value: &Value) {
        self.push(key, Field::Value(value.clone()));
    }
}

impl EventSink for JsonEvent {
    type Dict = JsonEvent;

    fn new_dict(&self) -> Self::Dict {
        JsonEvent::new()
    }

    fn with_error(&mut self, err: &(dyn Error + 'static)) {
        self.with_str(ERROR_KEY, &err.to_string());
    }

    fn with_dict(&mut self, key: &str, dict: Self::Dict) {
        self.push(key, Field::Dict(dict));
    }
}
