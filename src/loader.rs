//! Turns serialized catalog documents into `CatalogEntry` values.
//!
//! Loading happens in two steps. The bytes are first parsed as plain JSON so
//! syntax problems are reported as `LoadError::Parse`; the top-level object
//! is then checked for the required keys before being bound to the typed
//! model, which reports wrong-typed values as `LoadError::Schema`. The loader
//! does not judge field types or conversion factors; see `validation`.

use crate::catalog::CatalogEntry;
use crate::error::{LoadError, Result};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Top-level keys a document must carry.
pub const REQUIRED_KEYS: [&str; 4] = ["name", "id", "sources", "resources"];

/// Parse a catalog entry from raw bytes.
pub fn load_entry_from_slice(bytes: &[u8]) -> Result<CatalogEntry> {
    let value: Value = serde_json::from_slice(bytes)?;
    load_entry_from_value(value)
}

/// Parse a catalog entry from a string.
pub fn load_entry_from_str(data: &str) -> Result<CatalogEntry> {
    load_entry_from_slice(data.as_bytes())
}

/// Read and parse a catalog entry from disk.
pub fn load_entry_from_path(path: &Path) -> Result<CatalogEntry> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entry = load_entry_from_slice(&bytes)?;
    debug!("loaded catalog entry {} from {}", entry.id(), path.display());
    Ok(entry)
}

/// Bind an already-parsed JSON value to the entry model.
pub fn load_entry_from_value(value: Value) -> Result<CatalogEntry> {
    let Some(object) = value.as_object() else {
        return Err(LoadError::Parse(format!(
            "expected a JSON object at the top level, found {}",
            json_kind(&value)
        )));
    };

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::Schema(format!(
            "missing required key(s): {}",
            missing.join(", ")
        )));
    }

    let entry: CatalogEntry = serde_json::from_value(value)?;
    debug!(
        "bound catalog entry {} ('{}') with {} resource(s)",
        entry.id(),
        entry.name(),
        entry.resources().len()
    );
    Ok(entry)
}

/// Serialize an entry back to its document form.
pub fn entry_to_value(entry: &CatalogEntry) -> Result<Value> {
    Ok(serde_json::to_value(entry)?)
}

/// Pretty-printed document text for an entry.
pub fn entry_to_string_pretty(entry: &CatalogEntry) -> Result<String> {
    Ok(serde_json::to_string_pretty(entry)?)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
