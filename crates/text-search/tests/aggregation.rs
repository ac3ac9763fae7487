// text-search/tests/aggregation.rs
//! Aggregations over json fast fields.

mod common;

use common::{dummy_data, dummy_data_with_gid, engine, mappings1, mappings2};
use rstest::rstest;
use serde_json::json;
use text_search::{Context, DocumentInput, Engine, ErrorKind, IndexConfig, SearchInput};

fn populated(name: &str, docs: u64) -> (Engine, Context) {
    let engine = engine();
    let context = engine.create_in_memory(name, &mappings1()).unwrap();
    for doc in dummy_data(docs, 5) {
        context.add_document(&doc, true).unwrap();
    }
    context.commit().unwrap();
    (engine, context)
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(42)]
fn value_count_matches_committed_documents(#[case] docs: u64) {
    let (_engine, context) = populated("tantivy_index_value_count", docs);
    let request = json!({"count": {"value_count": {"field": "metadata.txid"}}});
    let input = SearchInput::query("data.key1:AWESOME")
        .with_search_fields(["data"])
        .with_aggregation(request.to_string());

    let output = context.aggregate(&input).unwrap();
    let count = output.metric("count").unwrap();
    assert!((count - docs as f64).abs() < 1e-6, "got {count}");
}

#[test]
fn empty_query_aggregates_every_document() {
    let (_engine, context) = populated("tantivy_index_agg_all", 4);
    let request = json!({
        "avg_txid": {"avg": {"field": "metadata.txid"}},
        "max_gid": {"max": {"field": "metadata.gid"}}
    });
    let output = context
        .aggregate(&SearchInput::default().with_aggregation(request.to_string()))
        .unwrap();

    assert!((output.metric("avg_txid").unwrap() - 1.5).abs() < 1e-6);
    assert!((output.metric("max_gid").unwrap() - 3.0).abs() < 1e-6);
}

#[test]
fn aggregation_respects_the_query() {
    let engine = engine();
    let context = engine.create_in_memory("tantivy_index_agg_filtered", &mappings2()).unwrap();
    for doc in dummy_data_with_gid(10, 1) {
        context.add_document(&doc, true).unwrap();
    }
    context.commit().unwrap();

    let request = json!({"count": {"value_count": {"field": "gid"}}});
    let input = SearchInput::query("gid:[0 TO 3]").with_aggregation(request.to_string());
    let count = context.aggregate(&input).unwrap().metric("count").unwrap();
    assert!((count - 4.0).abs() < 1e-6);
}

#[rstest]
#[case(json!({"count": {"value_count": {"field": "missing"}}}))]
#[case(json!({"count": {"value_count": {"field": "missing.txid"}}}))]
#[case(json!({"terms": {"terms": {"field": "metadata.deleted"}, "aggs": {"n": {"value_count": {"field": "nope"}}}}}))]
fn unknown_aggregation_field_is_rejected(#[case] request: serde_json::Value) {
    let (_engine, context) = populated("tantivy_index_agg_unknown", 2);
    let err = context
        .aggregate(&SearchInput::default().with_aggregation(request.to_string()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldNotFound);
}

#[rstest]
#[case("gid")]
#[case("metadata")]
#[case("metadata.txid")]
fn non_fast_aggregation_field_is_rejected(#[case] field: &str) {
    let engine = engine();
    let mappings = json!({
        "properties": {
            "gid": {"type": "u64", "indexed": true, "stored": true},
            "metadata": {"type": "json", "stored": true, "text": true}
        }
    });
    let context = engine
        .create_in_memory("tantivy_index_agg_not_fast", &IndexConfig::new(mappings.to_string()))
        .unwrap();
    context
        .add_document(&DocumentInput::from(&json!({"gid": 1, "metadata": {"txid": 1}})), false)
        .unwrap();

    let request = json!({"count": {"value_count": {"field": field}}});
    let err = context
        .aggregate(&SearchInput::default().with_aggregation(request.to_string()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldNotFound);
    assert!(err.to_string().contains(field));
}

#[rstest]
#[case("{not json")]
#[case("[]")]
#[case(r#"{"count": {"no_such_aggregation": {"field": "metadata.txid"}}}"#)]
fn malformed_aggregation_is_a_query_error(#[case] request: &str) {
    let (_engine, context) = populated("tantivy_index_agg_malformed", 2);
    let err = context
        .aggregate(&SearchInput::default().with_aggregation(request))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Query);
}
