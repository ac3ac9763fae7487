// text-search/tests/search.rs
//! Full-text search, exact lookups and field errors.

mod common;

use common::{dummy_data, dummy_data_with_gid, engine, mappings1, mappings2};
use rstest::rstest;
use serde_json::json;
use text_search::{DocumentInput, ErrorKind, IndexConfig, SearchInput};

#[test]
fn awesome_documents_are_all_found() {
    let engine = engine();
    let context = engine
        .create_in_memory(
            "tantivy_index_awesome",
            &IndexConfig::new(r#"{"properties": {"data": {"type": "text", "stored": true, "indexed": true}}}"#),
        )
        .unwrap();

    for key in 0..5 {
        let doc = json!({"data": format!("key{key} is AWESOME")});
        context.add_document(&DocumentInput::from(&doc), true).unwrap();
    }
    context.commit().unwrap();

    let output = context.search(&SearchInput::query("data:AWESOME")).unwrap();
    assert_eq!(output.len(), 5);
    for doc in &output.docs {
        let data = doc.get("data").and_then(|v| v.as_str()).unwrap();
        assert!(data.ends_with("is AWESOME"));
    }
}

#[test]
fn json_path_query_with_projection() {
    let engine = engine();
    let context = engine.create_in_memory("tantivy_index_simple_test1", &mappings1()).unwrap();
    for doc in dummy_data(5, 5) {
        context.add_document(&doc, false).unwrap();
    }

    let input = SearchInput::query("data.key1:AWESOME")
        .with_search_fields(["metadata"])
        .with_return_fields(["data"]);
    let output = context.search(&input).unwrap();

    assert_eq!(output.len(), 5);
    for doc in &output.docs {
        assert_eq!(doc.data.len(), 1);
        assert_eq!(doc.get("data").unwrap()["key4"], json!("value4 is AWESOME"));
    }
}

#[test]
fn numeric_scope_matches_exact_value() {
    let engine = engine();
    let context = engine.create_in_memory("tantivy_index_simple_test2", &mappings2()).unwrap();
    for doc in dummy_data_with_gid(2, 1) {
        context.add_document(&doc, false).unwrap();
    }

    let input = SearchInput::query("0")
        .with_search_fields(["gid"])
        .with_return_fields(["data"]);
    assert_eq!(context.search(&input).unwrap().len(), 1);
}

#[rstest]
#[case(0)]
#[case(7)]
#[case(19)]
fn fast_u64_field_lookup_returns_one_document(#[case] gid: u64) {
    let engine = engine();
    let context = engine.create_in_memory("tantivy_index_lookup", &mappings2()).unwrap();
    for doc in dummy_data_with_gid(20, 1) {
        context.add_document(&doc, true).unwrap();
    }
    context.commit().unwrap();

    let output = context
        .find(&SearchInput::query(gid.to_string()).with_search_fields(["gid"]))
        .unwrap();
    assert_eq!(output.len(), 1);
    assert_eq!(output.docs[0].get("gid"), Some(&json!(gid)));
    assert_eq!(output.docs[0].get("metadata").unwrap()["txid"], json!(gid));
}

#[test]
fn unknown_return_field_reports_index_and_field() {
    let engine = engine();
    let mappings = json!({
        "properties": {
            "prop1": {"type": "u64", "fast": true, "indexed": true},
            "prop2": {"type": "text", "stored": true, "text": true, "fast": true},
            "prop3": {"type": "json", "stored": true, "text": true, "fast": true},
            "prop4": {"type": "bool", "stored": true, "fast": true}
        }
    });
    let context = engine
        .create_in_memory("tantivy_index_mappings", &IndexConfig::new(mappings.to_string()))
        .unwrap();

    let input = SearchInput::query("bla")
        .with_search_fields(["prop1"])
        .with_return_fields(["data"]);
    let err = context.search(&input).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FieldNotFound);
    assert_eq!(
        err.to_string(),
        "The field does not exist: 'data' inside \"tantivy_index_mappings\" text search index"
    );
}

#[rstest]
#[case("note")]
#[case("flag")]
fn search_scope_must_be_indexed(#[case] field: &str) {
    let engine = engine();
    let mappings = json!({
        "properties": {
            "body": {"type": "text", "stored": true, "text": true},
            "note": {"type": "text", "stored": true},
            "flag": {"type": "bool", "stored": true}
        }
    });
    let context = engine
        .create_in_memory("tantivy_index_stored_only", &IndexConfig::new(mappings.to_string()))
        .unwrap();
    let doc = json!({"body": "hello", "note": "hello", "flag": true});
    context.add_document(&DocumentInput::from(&doc), false).unwrap();

    let err = context
        .search(&SearchInput::query("hello").with_search_fields([field]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldNotFound);
    assert!(err.to_string().contains(field));

    // still readable through projection
    let output = context
        .search(&SearchInput::query("hello").with_return_fields([field]))
        .unwrap();
    assert_eq!(output.len(), 1);
}

#[test]
fn persisted_index_uses_path_in_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tantivy_index_named");
    let engine = engine();
    let context = engine.create_index(&path, &mappings1()).unwrap();

    let err = context
        .search(&SearchInput::query("x").with_return_fields(["nope"]))
        .unwrap_err();
    assert!(err.to_string().contains(&*path.to_string_lossy()));
}
