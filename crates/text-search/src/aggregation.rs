// text-search/src/aggregation.rs
//! 聚合模块 - Elasticsearch-style aggregations over fast fields

use serde_json::Value;
use tantivy::aggregation::agg_req::Aggregations;
use tantivy::aggregation::AggregationCollector;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::models::{AggregationOutput, SearchInput};
use crate::query_executor::text_query;

impl Context {
    /// Runs `aggregation_query` over the documents matched by `search_query`
    /// (all documents when it is empty).
    ///
    /// Every `field` referenced by the request must be a fast field; json
    /// paths such as `metadata.txid` are checked against their json field.
    pub fn aggregate(&self, input: &SearchInput) -> Result<AggregationOutput> {
        let searcher = self.reader.searcher();

        let request: Value = serde_json::from_str(&input.aggregation_query)
            .map_err(|e| Error::Query(format!("malformed aggregation request: {e}")))?;
        if !request.is_object() {
            return Err(Error::Query(
                "aggregation request must be a JSON object".to_string(),
            ));
        }

        let mut referenced = Vec::new();
        referenced_fields(&request, &mut referenced);
        for field in &referenced {
            match self.schema().resolve_path(field) {
                Some((definition, _)) if definition.fast => {}
                _ => return Err(Error::field_not_found(self.name(), *field)),
            }
        }

        let aggregations: Aggregations = serde_json::from_value(request.clone())
            .map_err(|e| Error::Query(format!("invalid aggregation request: {e}")))?;
        let query = text_query(self, &input.search_fields, &input.search_query)?;

        let collector = AggregationCollector::from_aggs(aggregations, Default::default());
        let results = searcher.search(query.as_ref(), &collector)?;
        let data = serde_json::to_value(&results)?;

        tracing::debug!(
            "\"{}\": aggregated {} fields",
            self.name(),
            referenced.len()
        );
        Ok(AggregationOutput { data })
    }
}

/// Collects the value of every `"field"` key of the request, including those
/// of nested sub-aggregations.
fn referenced_fields<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match (key.as_str(), child) {
                    ("field", Value::String(field)) => out.push(field),
                    _ => referenced_fields(child, out),
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| referenced_fields(item, out)),
        _ => {}
    }
}
