// text-search/src/schema/fields.rs
//! Field definitions derived from a mapping.

use serde::{Deserialize, Serialize};

/// Tokenizer used when a text or json field has no explicit `tokenizer`.
pub const DEFAULT_TOKENIZER: &str = "default";

/// Tokenizer that indexes the whole value as one term, for exact lookups.
pub const RAW_TOKENIZER: &str = "raw";

/// Chinese word segmentation, registered on demand.
pub const JIEBA_TOKENIZER: &str = "jieba";

/// Tokenizer names a mapping may reference.
pub const KNOWN_TOKENIZERS: &[&str] = &[
    DEFAULT_TOKENIZER,
    RAW_TOKENIZER,
    "en_stem",
    "whitespace",
    JIEBA_TOKENIZER,
];

/// Primitive type of a field, as spelled in the mapping's `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    U64,
    Text,
    Json,
    Bool,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::U64 => "u64",
            FieldType::Text => "text",
            FieldType::Json => "json",
            FieldType::Bool => "bool",
        }
    }

    /// Text and json values go through a tokenizer, numbers and booleans do not.
    pub fn is_textual(self) -> bool {
        matches!(self, FieldType::Text | FieldType::Json)
    }
}

/// A single validated field of an index schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: FieldType,
    /// Value can be retrieved verbatim.
    pub stored: bool,
    /// Value is searchable.
    pub indexed: bool,
    /// Value lives in a columnar store (aggregations, exact lookups).
    pub fast: bool,
    /// Value is searchable as full text (text and json only).
    pub text: bool,
    pub tokenizer: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            stored: false,
            indexed: false,
            fast: false,
            text: false,
            tokenizer: None,
        }
    }

    pub fn stored(mut self) -> Self {
        self.stored = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub fn fast(mut self) -> Self {
        self.fast = true;
        self
    }

    pub fn text(mut self) -> Self {
        self.text = true;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: impl Into<String>) -> Self {
        self.tokenizer = Some(tokenizer.into());
        self
    }

    pub fn is_searchable(&self) -> bool {
        self.indexed || self.text
    }

    /// Searchable text or json split into terms. A `raw` tokenizer keeps the
    /// whole value as a single term instead.
    pub fn is_tokenized(&self) -> bool {
        self.field_type.is_textual()
            && self.is_searchable()
            && self.tokenizer_name() != RAW_TOKENIZER
    }

    /// Fields a query string may target without an explicit `field:` prefix.
    pub fn is_default_search_field(&self) -> bool {
        self.field_type.is_textual() && self.is_searchable()
    }

    /// Whether a literal value can be matched as one exact term.
    pub fn supports_exact_lookup(&self) -> bool {
        match self.field_type {
            FieldType::U64 | FieldType::Bool => self.indexed,
            FieldType::Text => self.is_searchable() && !self.is_tokenized(),
            FieldType::Json => false,
        }
    }

    pub fn tokenizer_name(&self) -> &str {
        self.tokenizer.as_deref().unwrap_or(DEFAULT_TOKENIZER)
    }
}
