// text-search/tests/concurrency.rs
//! Concurrent writers sharing one context.

mod common;

use std::sync::Arc;
use std::thread;

use common::{engine, engine_without_merges, mappings2};
use serde_json::json;
use text_search::{DocumentInput, SearchInput};

const THREADS: u64 = 8;
const DOCS_PER_THREAD: u64 = 50;

#[test]
fn concurrent_adds_are_neither_lost_nor_duplicated() {
    let engine = engine();
    let context = Arc::new(
        engine
            .create_in_memory("tantivy_index_concurrent", &mappings2())
            .unwrap(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_no| {
            let context = Arc::clone(&context);
            thread::spawn(move || {
                for i in 0..DOCS_PER_THREAD {
                    let gid = thread_no * DOCS_PER_THREAD + i;
                    let doc = json!({"gid": gid, "metadata": {"txid": gid}});
                    // every fifth add commits eagerly
                    context
                        .add_document(&DocumentInput::from(&doc), i % 5 != 0)
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    context.commit().unwrap();

    assert_eq!(context.num_docs(), THREADS * DOCS_PER_THREAD);
    for gid in [0, 137, THREADS * DOCS_PER_THREAD - 1] {
        let hits = context
            .find(&SearchInput::query(gid.to_string()).with_search_fields(["gid"]))
            .unwrap();
        assert_eq!(hits.len(), 1, "gid {gid}");
    }
}

#[test]
fn searches_run_while_documents_are_added() {
    let engine = engine();
    let context = engine
        .create_in_memory("tantivy_index_read_write", &mappings2())
        .unwrap();

    thread::scope(|scope| {
        scope.spawn(|| {
            for gid in 0..200u64 {
                let doc = json!({"gid": gid});
                context
                    .add_document(&DocumentInput::from(&doc), gid % 20 != 0)
                    .unwrap();
            }
        });
        scope.spawn(|| {
            let mut last = 0;
            for _ in 0..50 {
                let seen = context.search(&SearchInput::query("")).unwrap().len();
                assert!(seen >= last, "visible documents went from {last} to {seen}");
                last = seen;
            }
        });
    });

    context.commit().unwrap();
    assert_eq!(context.num_docs(), 200);
}

#[test]
fn merge_keeps_every_document() {
    let engine = engine_without_merges();
    let context = engine
        .create_in_memory("tantivy_index_merge", &mappings2())
        .unwrap();
    for gid in 0..30u64 {
        let doc = json!({"gid": gid});
        context.add_document(&DocumentInput::from(&doc), gid % 3 != 0).unwrap();
    }
    context.commit().unwrap();
    assert!(context.segment_count() > 1);

    context.merge_segments().unwrap();
    assert_eq!(context.segment_count(), 1);
    assert_eq!(context.num_docs(), 30);
    assert_eq!(context.search(&SearchInput::query("")).unwrap().len(), 30);
}

#[test]
fn merge_succeeds_alongside_background_merges() {
    let engine = engine();
    let context = engine
        .create_in_memory("tantivy_index_background_merge", &mappings2())
        .unwrap();
    // every eager add commits a segment, so the merge policy kicks in
    for gid in 0..40u64 {
        let doc = json!({"gid": gid});
        context.add_document(&DocumentInput::from(&doc), false).unwrap();
    }

    context.merge_segments().unwrap();
    assert_eq!(context.num_docs(), 40);
    assert_eq!(context.search(&SearchInput::query("")).unwrap().len(), 40);

    context.merge_segments().unwrap();
    assert_eq!(context.num_docs(), 40);
}
