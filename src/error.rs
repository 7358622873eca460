//! Errors raised while loading a catalog entry.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a document could not be turned into a `CatalogEntry`.
///
/// `Parse` means the bytes are not a JSON object at all; `Schema` means the
/// JSON is fine but a required key is missing or a value has the wrong type.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed catalog document: {0}")]
    Parse(String),
    #[error("catalog document does not match the entry schema: {0}")]
    Schema(String),
}

impl LoadError {
    pub fn is_parse(&self) -> bool {
        matches!(self, LoadError::Parse(_))
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, LoadError::Schema(_))
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Syntax | Category::Eof | Category::Io => LoadError::Parse(err.to_string()),
            Category::Data => LoadError::Schema(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
