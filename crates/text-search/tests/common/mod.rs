// text-search/tests/common/mod.rs
//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use serde_json::{json, Map, Value};
use text_search::{DocumentInput, Engine, EngineConfig, IndexConfig};

pub fn engine() -> Engine {
    let config = EngineConfig {
        log_filter: "warn".to_string(),
        ..EngineConfig::default()
    };
    Engine::init(config).expect("engine init")
}

/// Engine whose indexes never merge segments in the background.
pub fn engine_without_merges() -> Engine {
    let mut config = EngineConfig {
        log_filter: "warn".to_string(),
        ..EngineConfig::default()
    };
    config.merge.enabled = false;
    Engine::init(config).expect("engine init")
}

/// `data` and `metadata` json fields.
pub fn mappings1() -> IndexConfig {
    IndexConfig::new(
        json!({
            "properties": {
                "metadata": {"type": "json", "stored": true, "text": true, "fast": true},
                "data": {"type": "json", "stored": true, "text": true, "fast": true}
            }
        })
        .to_string(),
    )
}

/// [`mappings1`] plus a top-level `gid` for exact lookups.
pub fn mappings2() -> IndexConfig {
    IndexConfig::new(
        json!({
            "properties": {
                "gid": {"type": "u64", "stored": true, "indexed": true, "fast": true},
                "metadata": {"type": "json", "stored": true, "text": true, "fast": true},
                "data": {"type": "json", "stored": true, "text": true, "fast": true}
            }
        })
        .to_string(),
    )
}

/// Documents `{"data": {"key<p>": "value<p> is AWESOME"}, "metadata": {..}}`
/// with `gid` and `txid` equal to the document number.
pub fn dummy_data(docs: u64, props: u64) -> Vec<DocumentInput> {
    (0..docs)
        .map(|doc| DocumentInput::from(&dummy_document(doc, props)))
        .collect()
}

/// [`dummy_data`] with the top-level `gid` of [`mappings2`].
pub fn dummy_data_with_gid(docs: u64, props: u64) -> Vec<DocumentInput> {
    (0..docs)
        .map(|doc| {
            let mut value = dummy_document(doc, props);
            value["gid"] = json!(doc);
            DocumentInput::from(&value)
        })
        .collect()
}

fn dummy_document(doc: u64, props: u64) -> Value {
    let data: Map<String, Value> = (0..props)
        .map(|prop| (format!("key{prop}"), json!(format!("value{prop} is AWESOME"))))
        .collect();
    json!({
        "data": data,
        "metadata": {
            "gid": doc,
            "txid": doc,
            "deleted": false,
            "is_node": false
        }
    })
}
