// text-search/src/schema/mod.rs
//! Schema 模块 - mapping 解析与 Tantivy 索引结构定义

pub mod builder;
pub mod document;
pub mod fields;
pub mod mapping;

pub use builder::{build_schema, register_tokenizers, IndexSchema};
pub use document::{field_values, to_document, FieldValue};
pub use fields::{FieldDefinition, FieldType};
pub use mapping::derive_schema;
