// text-search/src/schema/mapping.rs
//! Mapping parser.
//!
//! A mapping is a JSON document of the form
//!
//! ```json
//! {
//!   "properties": {
//!     "gid":  { "type": "u64",  "indexed": true, "fast": true, "stored": true },
//!     "data": { "type": "json", "stored": true, "text": true, "fast": true }
//!   }
//! }
//! ```
//!
//! Properties keep their declaration order and a name declared twice is an
//! error rather than a silent overwrite.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use super::fields::{FieldDefinition, FieldType, KNOWN_TOKENIZERS};
use crate::error::{Error, Result};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MappingDocument {
    properties: Properties,
}

/// Raw `name -> attributes` pairs, duplicates included.
struct Properties(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping field names to field attributes")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Properties, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, serde_json::Value>()? {
                    entries.push(entry);
                }
                Ok(Properties(entries))
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

/// Attributes of one property.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldMapping {
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    stored: bool,
    #[serde(default)]
    indexed: bool,
    #[serde(default)]
    fast: bool,
    #[serde(default)]
    text: bool,
    #[serde(default)]
    tokenizer: Option<String>,
}

impl FieldMapping {
    fn into_definition(self, name: String) -> Result<FieldDefinition> {
        if !tantivy::schema::is_valid_field_name(&name) {
            return Err(Error::schema(name, "not a valid field name"));
        }
        if self.text && !self.field_type.is_textual() {
            return Err(Error::schema(
                name,
                format!(
                    "the text flag requires a text or json field, not {}",
                    self.field_type.as_str()
                ),
            ));
        }
        if !(self.stored || self.indexed || self.fast || self.text) {
            return Err(Error::schema(
                name,
                "field must be at least one of stored, indexed, fast or text",
            ));
        }
        if let Some(tokenizer) = &self.tokenizer {
            if !(self.field_type.is_textual() && (self.indexed || self.text)) {
                return Err(Error::schema(
                    name,
                    "a tokenizer requires an indexed text or json field",
                ));
            }
            if !KNOWN_TOKENIZERS.contains(&tokenizer.as_str()) {
                return Err(Error::schema(
                    name,
                    format!(
                        "unknown tokenizer '{tokenizer}', expected one of {}",
                        KNOWN_TOKENIZERS.join(", ")
                    ),
                ));
            }
        }

        Ok(FieldDefinition {
            name,
            field_type: self.field_type,
            stored: self.stored,
            indexed: self.indexed,
            fast: self.fast,
            text: self.text,
            tokenizer: self.tokenizer,
        })
    }
}

/// Validates a mapping and derives its field definitions in declaration order.
pub fn derive_schema(mappings: &str) -> Result<Vec<FieldDefinition>> {
    let document: MappingDocument =
        serde_json::from_str(mappings).map_err(|e| Error::Mapping(e.to_string()))?;

    let properties = document.properties.0;
    if properties.is_empty() {
        return Err(Error::Mapping("no fields declared under 'properties'".to_string()));
    }

    let mut seen = HashSet::with_capacity(properties.len());
    let mut definitions = Vec::with_capacity(properties.len());
    for (name, attributes) in properties {
        if !seen.insert(name.clone()) {
            return Err(Error::schema(name, "field declared more than once"));
        }
        let mapping: FieldMapping = match serde_json::from_value(attributes) {
            Ok(mapping) => mapping,
            Err(e) => return Err(Error::schema(name, e.to_string())),
        };
        definitions.push(mapping.into_definition(name)?);
    }

    tracing::debug!("derived {} field definitions from mapping", definitions.len());
    Ok(definitions)
}
