//! Dataset catalog entries: model, loader, and validator.
//!
//! A catalog entry is a JSON document describing one tabular dataset: its
//! provenance, its sources, and the column schema of each data file. The
//! crate binds such documents to typed values (`catalog`, `loader`), checks
//! them for consistency (`validation`, `document_schema`), and provides the
//! rendering and lint helpers the binaries are built on.

pub mod catalog;
pub mod config;
pub mod display;
pub mod document_schema;
pub mod error;
pub mod lint;
pub mod loader;
pub mod logging;
pub mod validation;

pub use catalog::{
    CatalogEntry, CatalogRepository, DisplaySettings, EntryId, Field, FieldType, Resource, Schema,
    Source,
};
pub use config::{LintCommand, LintConfig, LintOptions, OutputFormat};
pub use display::{ColumnGroup, SummaryColumn, column_group, format_display, summary_columns};
pub use document_schema::structural_findings;
pub use error::LoadError;
pub use lint::{DocumentReport, LintReport, lint_bytes, lint_paths};
pub use loader::{
    entry_to_string_pretty, entry_to_value, load_entry_from_path, load_entry_from_slice,
    load_entry_from_str, load_entry_from_value,
};
pub use validation::{
    Finding, FindingKind, ValidationOptions, validate_entry, validate_entry_with,
};

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_accepts_commas_and_spaces() {
        assert_eq!(
            split_list("a, b  c,,d"),
            vec!["a".to_string(), "b".into(), "c".into(), "d".into()]
        );
        assert!(split_list(" , ").is_empty());
    }
}
