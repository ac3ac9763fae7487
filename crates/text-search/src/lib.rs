// text-search/src/lib.rs
//! 全文索引核心库
//!
//! An embeddable full-text document index built on Tantivy:
//! - JSON mappings describe the fields of an index
//! - documents are validated against the mapping and committed explicitly
//! - full-text search, exact lookups and Elasticsearch-style aggregations
//!
//! ```no_run
//! use text_search::{DocumentInput, Engine, EngineConfig, IndexConfig, SearchInput};
//!
//! # fn main() -> text_search::Result<()> {
//! let engine = Engine::init(EngineConfig::default())?;
//! let context = engine.create_index(
//!     "/tmp/notes",
//!     &IndexConfig::new(r#"{"properties": {"body": {"type": "text", "text": true, "stored": true}}}"#),
//! )?;
//! context.add_document(&DocumentInput::new(r#"{"body": "hello world"}"#), false)?;
//! let hits = context.search(&SearchInput::query("body:hello"))?;
//! assert_eq!(hits.len(), 1);
//! engine.drop_index(context)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod registry;
pub mod schema;

mod aggregation;
mod context;
mod engine;
mod query_executor;
mod search;
mod writer;

pub use config::{EngineConfig, IndexConfig, MergeConfig};
pub use context::Context;
pub use engine::{Engine, MAPPINGS_FILE_NAME};
pub use error::{Error, ErrorKind, Result};
pub use models::{AggregationOutput, DocumentInput, DocumentOutput, SearchInput, SearchOutput};
pub use schema::{derive_schema, FieldDefinition, FieldType, FieldValue};
