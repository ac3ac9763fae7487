// text-search/src/error.rs
//! Error types.
//!
//! Every public operation returns [`Result`]. An [`Error`] always carries a
//! human readable message and maps onto a small, stable [`ErrorKind`] so a
//! caller sitting on the other side of a process or language boundary can
//! switch on the kind without parsing messages.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A single field of the mapping is invalid.
    #[error("invalid mapping for field '{field}': {reason}")]
    Schema { field: String, reason: String },

    /// The mapping document as a whole is invalid.
    #[error("invalid mapping: {0}")]
    Mapping(String),

    #[error("text search index already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A live context still holds the index.
    #[error("text search index at {} is still in use", .0.display())]
    InUse(PathBuf),

    /// The document payload is not valid JSON or not a JSON object.
    #[error("malformed document: {0}")]
    Document(String),

    /// A document value does not match the declared type of its field.
    #[error("field '{field}' expects {expected}, got {found}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("The field does not exist: '{field}' inside \"{index}\" text search index")]
    FieldNotFound { index: String, field: String },

    #[error("invalid query: {0}")]
    Query(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("index engine error: {0}")]
    Engine(#[from] tantivy::TantivyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Schema,
    AlreadyExists,
    InUse,
    Write,
    FieldNotFound,
    Query,
    Config,
    Engine,
}

impl ErrorKind {
    /// Stable numeric code. Zero is reserved for success.
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::Engine => 1,
            ErrorKind::Schema => 2,
            ErrorKind::AlreadyExists => 3,
            ErrorKind::InUse => 4,
            ErrorKind::Write => 5,
            ErrorKind::FieldNotFound => 6,
            ErrorKind::Query => 7,
            ErrorKind::Config => 8,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Schema => "SchemaError",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::InUse => "InUse",
            ErrorKind::Write => "WriteError",
            ErrorKind::FieldNotFound => "FieldNotFoundError",
            ErrorKind::Query => "QueryError",
            ErrorKind::Config => "ConfigError",
            ErrorKind::Engine => "EngineError",
        };
        f.write_str(name)
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Schema { .. } | Error::Mapping(_) => ErrorKind::Schema,
            Error::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Error::InUse(_) => ErrorKind::InUse,
            Error::Document(_) | Error::FieldType { .. } => ErrorKind::Write,
            Error::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            Error::Query(_) => ErrorKind::Query,
            Error::Config(_) => ErrorKind::Config,
            Error::Engine(_) | Error::Io(_) | Error::Serialization(_) => ErrorKind::Engine,
        }
    }

    pub(crate) fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Schema {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn field_not_found(index: impl Into<String>, field: impl Into<String>) -> Self {
        Error::FieldNotFound {
            index: index.into(),
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_distinct_codes() {
        let kinds = [
            ErrorKind::Schema,
            ErrorKind::AlreadyExists,
            ErrorKind::InUse,
            ErrorKind::Write,
            ErrorKind::FieldNotFound,
            ErrorKind::Query,
            ErrorKind::Config,
            ErrorKind::Engine,
        ];
        let mut codes: Vec<i32> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn field_not_found_message_names_index_and_field() {
        let err = Error::field_not_found("tantivy_index_mappings", "data");
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);
        assert_eq!(
            err.to_string(),
            "The field does not exist: 'data' inside \"tantivy_index_mappings\" text search index"
        );
    }

    #[test]
    fn document_errors_are_write_errors() {
        let err = Error::FieldType {
            field: "gid".into(),
            expected: "an unsigned integer",
            found: "\"abc\"".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Write);
        assert!(err.to_string().contains("gid"));
        assert_eq!(Error::Document("x".into()).kind(), ErrorKind::Write);
    }
}
