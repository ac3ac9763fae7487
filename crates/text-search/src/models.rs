// text-search/src/models.rs
//! 数据模型定义 - request and response records of the public API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document to index: a JSON object whose keys name schema fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInput {
    pub data: String,
}

impl DocumentInput {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

impl From<&Value> for DocumentInput {
    fn from(value: &Value) -> Self {
        Self::new(value.to_string())
    }
}

/// Query, scope, projection and aggregation of one search call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchInput {
    /// Fields searched by unqualified query terms. Empty means every text or
    /// json field that is indexed.
    pub search_fields: Vec<String>,
    pub search_query: String,
    /// Stored fields returned per document. Empty means all stored fields.
    pub return_fields: Vec<String>,
    /// Elasticsearch-style aggregation request, used by `aggregate`.
    pub aggregation_query: String,
    /// Maximum number of documents returned.
    pub limit: Option<usize>,
}

impl SearchInput {
    pub fn query(search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            ..Self::default()
        }
    }

    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_return_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.return_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_aggregation(mut self, aggregation_query: impl Into<String>) -> Self {
        self.aggregation_query = aggregation_query.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One matched document projected to the requested fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutput {
    pub score: f32,
    pub data: Map<String, Value>,
}

impl DocumentOutput {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// The projection as a JSON string.
    pub fn to_json(&self) -> String {
        Value::Object(self.data.clone()).to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutput {
    pub docs: Vec<DocumentOutput>,
}

impl SearchOutput {
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Aggregation results keyed by the names used in the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationOutput {
    pub data: Value,
}

impl AggregationOutput {
    /// The `value` of a single-value metric such as `value_count` or `avg`.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.data.get(name)?.get("value")?.as_f64()
    }
}
