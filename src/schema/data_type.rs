// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Declared field types and the permissive decoder built on them.
//!
//! Decoding never fails. Text that is not a JSON object yields a record with
//! every declared field set to null, and an individual field that is missing
//! or has the wrong shape becomes null without affecting its siblings.
//!
//! Field names match case-insensitively. When a payload carries the same
//! field in more than one casing, the casing that matches the declared name
//! exactly wins; otherwise the first variant in key order is used.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Type of a declared field.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    /// Any scalar. Non-string JSON keeps its JSON text, e.g. `0.0` becomes `"0.0"`.
    String,
    /// JSON `true`/`false` only.
    Boolean,
    Array(Box<DataType>),
    Struct(Vec<Field>),
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::String => f.write_str("string"),
            DataType::Boolean => f.write_str("boolean"),
            DataType::Array(element) => write!(f, "array<{}>", element),
            DataType::Struct(fields) => write!(f, "struct<{}>", join_fields(fields)),
        }
    }
}

/// A named, typed field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: &'static str, data_type: DataType) -> Self {
        Self { name, data_type }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, DataType::String)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, DataType::Boolean)
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| format!("{}:{}", field.name, field.data_type))
        .collect::<Vec<_>>()
        .join(",")
}

/// Top-level record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Compact one-line form, e.g. `struct<customer:string,score:string>`.
    pub fn simple_string(&self) -> String {
        format!("struct<{}>", join_fields(&self.fields))
    }

    /// Decode `text` into an object holding exactly the declared fields.
    ///
    /// `None` stands for a null payload and decodes like malformed input.
    pub fn decode(&self, text: Option<&str>) -> Value {
        match text.and_then(|t| serde_json::from_str::<Value>(t).ok()) {
            Some(Value::Object(map)) => normalize_struct(&self.fields, &map),
            _ => self.null_record(),
        }
    }

    /// Decode `text` straight into a typed record.
    ///
    /// `T` must deserialize every declared field as optional; the all-null
    /// default is returned if it does not.
    pub fn decode_as<T>(&self, text: Option<&str>) -> T
    where
        T: DeserializeOwned + Default,
    {
        serde_json::from_value(self.decode(text)).unwrap_or_else(|e| {
            debug!(schema = self.name, error = %e, "typed record mapping failed, using nulls");
            T::default()
        })
    }

    fn null_record(&self) -> Value {
        let map = self
            .fields
            .iter()
            .map(|field| (field.name.to_string(), Value::Null))
            .collect::<Map<_, _>>();
        Value::Object(map)
    }
}

fn normalize_struct(fields: &[Field], map: &Map<String, Value>) -> Value {
    let mut normalized = Map::new();
    for field in fields {
        let value = lookup(map, field.name)
            .map(|raw| coerce(&field.data_type, raw))
            .unwrap_or(Value::Null);
        normalized.insert(field.name.to_string(), value);
    }
    Value::Object(normalized)
}

fn lookup<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.get(name).or_else(|| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn coerce(data_type: &DataType, value: &Value) -> Value {
    match (data_type, value) {
        (_, Value::Null) => Value::Null,
        (DataType::String, Value::String(text)) => Value::String(text.clone()),
        (DataType::String, other) => Value::String(other.to_string()),
        (DataType::Boolean, Value::Bool(flag)) => Value::Bool(*flag),
        (DataType::Array(element), Value::Array(items)) => {
            Value::Array(items.iter().map(|item| coerce(element, item)).collect())
        }
        (DataType::Struct(fields), Value::Object(map)) => normalize_struct(fields, map),
        _ => Value::Null,
    }
}
