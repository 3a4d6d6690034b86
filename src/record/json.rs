//! JSON bridge for records
//!
//! Conversion is strict and kind-preserving:
//! - integers that fit `i64` become `Int`, every other number `Float`
//! - strings become `String`, or `Time` when timestamp parsing is enabled
//!   and the string is RFC 3339
//! - arrays and nested objects are rejected
//! - a key repeated within one object is a `DuplicateField`, never a
//!   silent overwrite

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::{Map, Number, Value as Json};

use super::{FieldName, Record, RecordError, RecordResult};
use crate::value::Value;

/// Options for JSON → record conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// Parse RFC 3339 strings as `Time`
    pub parse_timestamps: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            parse_timestamps: true,
        }
    }
}

/// Members of one JSON object in document order, repeated keys kept
struct JsonObject(Vec<(String, Json)>);

impl<'de> Deserialize<'de> for JsonObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = JsonObject;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<JsonObject, A::Error> {
                let mut members = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(member) = access.next_entry::<String, Json>()? {
                    members.push(member);
                }
                Ok(JsonObject(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}

/// Parses a JSON array of flat objects into records.
///
/// Fails with `MalformedJson` when the text is not an array of objects and
/// with `DuplicateField` when an object repeats a key.
pub fn records_from_str(text: &str, options: JsonOptions) -> RecordResult<Vec<Record>> {
    let objects: Vec<JsonObject> =
        serde_json::from_str(text).map_err(|e| RecordError::MalformedJson(e.to_string()))?;

    objects
        .into_iter()
        .map(|JsonObject(members)| record_from_members(members, options))
        .collect()
}

/// Builds a record from `(key, value)` members in order.
pub fn record_from_members(
    members: impl IntoIterator<Item = (String, Json)>,
    options: JsonOptions,
) -> RecordResult<Record> {
    let fields = members
        .into_iter()
        .map(|(name, json)| -> RecordResult<(FieldName, Value)> {
            let value = value_from_json(&name, &json, options)?;
            Ok((FieldName::from(name), value))
        })
        .collect::<RecordResult<Vec<_>>>()?;
    Record::new(fields)
}

fn value_from_json(field: &str, json: &Json, options: JsonOptions) -> RecordResult<Value> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => Ok(number_value(n)),
        Json::String(s) => {
            if options.parse_timestamps {
                if let Ok(t) = DateTime::parse_from_rfc3339(s) {
                    return Ok(Value::Time(t.with_timezone(&Utc)));
                }
            }
            Ok(Value::String(s.clone()))
        }
        Json::Array(_) | Json::Object(_) => Err(RecordError::UnsupportedJson {
            field: field.to_string(),
            reason: "nested values are not supported".to_string(),
        }),
    }
}

fn number_value(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        // u64 beyond i64 range and all fractional numbers
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Renders a record as a JSON object in field order.
pub fn record_to_json(record: &Record) -> Json {
    let mut object = Map::with_capacity(record.len());
    for (name, value) in record.iter() {
        object.insert(name.to_string(), value_to_json(value));
    }
    Json::Object(object)
}

/// Renders a value as JSON. Non-finite floats become `null`.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Int(i) => Json::from(*i),
        Value::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.clone()),
        Value::Bool(b) => Json::Bool(*b),
        Value::Time(t) => Json::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        Value::Null => Json::Null,
    }
}
