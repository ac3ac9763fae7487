// text-search/src/schema/builder.rs
//! Schema 构建器
//!
//! Turns field definitions into a Tantivy `Schema` and keeps the resolved
//! `Field` handles next to their definitions.

use tantivy::schema::*;
use tantivy::Index;
use tantivy_jieba::JiebaTokenizer;

use super::fields::{FieldDefinition, FieldType, JIEBA_TOKENIZER};
use super::mapping::derive_schema;
use crate::error::{Error, Result};

/// Builds the Tantivy schema for a list of field definitions.
pub fn build_schema(definitions: &[FieldDefinition]) -> Schema {
    let mut schema_builder = Schema::builder();

    for definition in definitions {
        let name = definition.name.as_str();
        match definition.field_type {
            FieldType::U64 => {
                schema_builder.add_u64_field(name, numeric_options(definition));
            }
            FieldType::Bool => {
                schema_builder.add_bool_field(name, numeric_options(definition));
            }
            FieldType::Text => {
                schema_builder.add_text_field(name, text_options(definition));
            }
            FieldType::Json => {
                schema_builder.add_json_field(name, json_options(definition));
            }
        }
    }

    schema_builder.build()
}

fn numeric_options(definition: &FieldDefinition) -> NumericOptions {
    let mut options = NumericOptions::default();
    if definition.stored {
        options = options.set_stored();
    }
    if definition.indexed {
        options = options.set_indexed();
    }
    if definition.fast {
        options = options.set_fast();
    }
    options
}

fn text_indexing(definition: &FieldDefinition) -> TextFieldIndexing {
    let record = if definition.is_tokenized() {
        IndexRecordOption::WithFreqsAndPositions
    } else {
        IndexRecordOption::Basic
    };
    TextFieldIndexing::default()
        .set_tokenizer(definition.tokenizer_name())
        .set_index_option(record)
}

fn text_options(definition: &FieldDefinition) -> TextOptions {
    let mut options = TextOptions::default();
    if definition.is_searchable() {
        options = options.set_indexing_options(text_indexing(definition));
    }
    if definition.stored {
        options = options.set_stored();
    }
    if definition.fast {
        options = options.set_fast(None);
    }
    options
}

fn json_options(definition: &FieldDefinition) -> JsonObjectOptions {
    let mut options = JsonObjectOptions::default();
    if definition.is_searchable() {
        options = options.set_indexing_options(text_indexing(definition));
    }
    if definition.stored {
        options = options.set_stored();
    }
    if definition.fast {
        options = options.set_fast(None);
    }
    options
}

/// Registers the tokenizers an index needs beyond Tantivy's built-in ones.
///
/// Tokenizers are not persisted, so this runs every time an index is opened.
pub fn register_tokenizers(index: &Index, definitions: &[FieldDefinition]) {
    let needs_jieba = definitions
        .iter()
        .any(|d| d.is_tokenized() && d.tokenizer_name() == JIEBA_TOKENIZER);
    if needs_jieba {
        index.tokenizers().register(JIEBA_TOKENIZER, JiebaTokenizer {});
        tracing::debug!("registered jieba tokenizer");
    }
}

/// Field definitions paired with the Tantivy fields they resolve to.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    schema: Schema,
    entries: Vec<(FieldDefinition, Field)>,
}

impl IndexSchema {
    /// Derives and builds a schema from a JSON mapping.
    pub fn from_mappings(mappings: &str) -> Result<Self> {
        let definitions = derive_schema(mappings)?;
        let schema = build_schema(&definitions);
        Self::resolve(definitions, schema)
    }

    /// Pairs definitions with the fields of an existing Tantivy schema.
    pub fn resolve(definitions: Vec<FieldDefinition>, schema: Schema) -> Result<Self> {
        let mut entries = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let field = schema.get_field(&definition.name).map_err(|_| {
                Error::Mapping(format!(
                    "field '{}' is missing from the stored index schema",
                    definition.name
                ))
            })?;
            entries.push((definition, field));
        }
        Ok(Self { schema, entries })
    }

    pub fn tantivy_schema(&self) -> &Schema {
        &self.schema
    }

    pub fn definitions(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.entries.iter().map(|(definition, _)| definition)
    }

    pub fn entries(&self) -> &[(FieldDefinition, Field)] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<(&FieldDefinition, Field)> {
        self.entries
            .iter()
            .find(|(definition, _)| definition.name == name)
            .map(|(definition, field)| (definition, *field))
    }

    /// Resolves a field name or a json path such as `metadata.txid` to the
    /// field that owns it.
    pub fn resolve_path(&self, path: &str) -> Option<(&FieldDefinition, Field)> {
        if let Some(entry) = self.get(path) {
            return Some(entry);
        }
        let (field, _json_path) = self.schema.find_field(path)?;
        self.entries
            .iter()
            .find(|(definition, candidate)| {
                *candidate == field && definition.field_type == FieldType::Json
            })
            .map(|(definition, field)| (definition, *field))
    }
}
