// text-search/src/schema/document.rs
//! 文档结构定义
//!
//! Validates a JSON payload against the schema and turns it into a Tantivy
//! document. Keys that do not name a schema field are ignored, `null` values
//! are skipped and arrays become multi-valued fields.

use std::collections::BTreeMap;

use serde_json::{Map, Value as JsonValue};
use tantivy::schema::{Field, OwnedValue};
use tantivy::TantivyDocument;

use super::builder::IndexSchema;
use super::fields::{FieldDefinition, FieldType};
use crate::error::{Error, Result};

/// A document value checked against its field definition.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Unsigned(u64),
    Text(String),
    Structured(Map<String, JsonValue>),
    Boolean(bool),
}

impl FieldValue {
    /// Converts a single (non-array) JSON value for the given field.
    pub fn from_json(definition: &FieldDefinition, value: JsonValue) -> Result<Self> {
        match (definition.field_type, value) {
            (FieldType::U64, JsonValue::Number(number)) => match number.as_u64() {
                Some(unsigned) => Ok(FieldValue::Unsigned(unsigned)),
                None => Err(mismatch(definition, &JsonValue::Number(number))),
            },
            (FieldType::Text, JsonValue::String(text)) => Ok(FieldValue::Text(text)),
            (FieldType::Json, JsonValue::Object(object)) => Ok(FieldValue::Structured(object)),
            (FieldType::Bool, JsonValue::Bool(flag)) => Ok(FieldValue::Boolean(flag)),
            (_, other) => Err(mismatch(definition, &other)),
        }
    }

    fn add_to(self, document: &mut TantivyDocument, field: Field) {
        match self {
            FieldValue::Unsigned(value) => document.add_u64(field, value),
            FieldValue::Text(text) => document.add_text(field, text),
            FieldValue::Boolean(flag) => document.add_bool(field, flag),
            FieldValue::Structured(object) => {
                let object: BTreeMap<String, OwnedValue> = object
                    .into_iter()
                    .map(|(key, value)| (key, OwnedValue::from(value)))
                    .collect();
                document.add_object(field, object);
            }
        }
    }
}

fn mismatch(definition: &FieldDefinition, found: &JsonValue) -> Error {
    Error::FieldType {
        field: definition.name.clone(),
        expected: expected_for(definition.field_type),
        found: describe(found).to_string(),
    }
}

fn expected_for(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::U64 => "an unsigned integer",
        FieldType::Text => "a string",
        FieldType::Json => "an object",
        FieldType::Bool => "a boolean",
    }
}

fn describe(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(number) if number.is_u64() => "an unsigned integer",
        JsonValue::Number(_) => "a signed or floating point number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a nested array",
        JsonValue::Object(_) => "an object",
    }
}

/// Validates a payload and returns the typed values of every schema field it
/// carries, in payload order.
pub fn field_values(schema: &IndexSchema, payload: &str) -> Result<Vec<(Field, FieldValue)>> {
    let parsed: JsonValue = serde_json::from_str(payload)
        .map_err(|e| Error::Document(format!("payload is not valid JSON: {e}")))?;
    let object = match parsed {
        JsonValue::Object(object) => object,
        other => {
            return Err(Error::Document(format!(
                "payload must be a JSON object, got {}",
                describe(&other)
            )));
        }
    };

    let mut values = Vec::with_capacity(object.len());
    for (key, value) in object {
        let Some((definition, field)) = schema.get(&key) else {
            tracing::trace!("ignoring key '{}' that is not part of the schema", key);
            continue;
        };
        match value {
            JsonValue::Null => {}
            JsonValue::Array(items) => {
                for item in items {
                    if item.is_null() {
                        continue;
                    }
                    values.push((field, FieldValue::from_json(definition, item)?));
                }
            }
            single => values.push((field, FieldValue::from_json(definition, single)?)),
        }
    }
    Ok(values)
}

/// Validates a payload and builds the Tantivy document for it.
pub fn to_document(schema: &IndexSchema, payload: &str) -> Result<TantivyDocument> {
    let mut document = TantivyDocument::default();
    for (field, value) in field_values(schema, payload)? {
        value.add_to(&mut document, field);
    }
    Ok(document)
}
