//! Semantic checks over a loaded catalog entry.
//!
//! The loader accepts anything that binds to the model; this module reports
//! what is wrong with it. Checks never short-circuit: every problem in the
//! entry becomes one `Finding`, and an empty list means the entry is valid.

use crate::catalog::{CatalogEntry, FieldType, Resource};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Column names every entry is expected to start with.
pub const ENTITY_COLUMN: &str = "Entity";
pub const YEAR_COLUMN: &str = "Year";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    DuplicateFieldName,
    NonPositiveConversionFactor,
    UnrecognizedFieldType,
    EmptyResourcePath,
    EmptyFieldName,
    DuplicateResourcePath,
    MissingConventionalColumn,
    ConventionalColumnType,
    DocumentStructure,
}

impl FindingKind {
    pub const ALL: [FindingKind; 9] = [
        FindingKind::DuplicateFieldName,
        FindingKind::NonPositiveConversionFactor,
        FindingKind::UnrecognizedFieldType,
        FindingKind::EmptyResourcePath,
        FindingKind::EmptyFieldName,
        FindingKind::DuplicateResourcePath,
        FindingKind::MissingConventionalColumn,
        FindingKind::ConventionalColumnType,
        FindingKind::DocumentStructure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FindingKind::DuplicateFieldName => "duplicate_field_name",
            FindingKind::NonPositiveConversionFactor => "non_positive_conversion_factor",
            FindingKind::UnrecognizedFieldType => "unrecognized_field_type",
            FindingKind::EmptyResourcePath => "empty_resource_path",
            FindingKind::EmptyFieldName => "empty_field_name",
            FindingKind::DuplicateResourcePath => "duplicate_resource_path",
            FindingKind::MissingConventionalColumn => "missing_conventional_column",
            FindingKind::ConventionalColumnType => "conventional_column_type",
            FindingKind::DocumentStructure => "document_structure",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One problem found in a document.
///
/// `location` is a JSON-pointer-style path into the document.
pub struct Finding {
    pub kind: FindingKind,
    pub location: String,
    pub message: String,
}

impl Finding {
    pub fn new(kind: FindingKind, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.location, self.message, self.kind)
    }
}

#[derive(Clone, Debug, Default)]
/// Which optional checks run and which finding kinds are dropped.
pub struct ValidationOptions {
    /// Require `Entity` (string) and `Year` (year) in every resource.
    pub conventional_columns: bool,
    pub ignore: BTreeSet<FindingKind>,
}

/// Validate an entry with the default options.
pub fn validate_entry(entry: &CatalogEntry) -> Vec<Finding> {
    validate_entry_with(entry, &ValidationOptions::default())
}

pub fn validate_entry_with(entry: &CatalogEntry, options: &ValidationOptions) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen_paths: BTreeMap<&str, usize> = BTreeMap::new();

    for (idx, resource) in entry.resources().iter().enumerate() {
        let base = format!("/resources/{idx}");
        let path = resource.path();
        if path.trim().is_empty() {
            findings.push(Finding::new(
                FindingKind::EmptyResourcePath,
                format!("{base}/path"),
                "resource path is empty",
            ));
        } else if let Some(first) = seen_paths.get(path) {
            findings.push(Finding::new(
                FindingKind::DuplicateResourcePath,
                format!("{base}/path"),
                format!("resource path '{path}' already used by resource {first}"),
            ));
        } else {
            seen_paths.insert(path, idx);
        }

        check_fields(resource, &base, &mut findings);
        if options.conventional_columns {
            check_conventional_columns(resource, &base, &mut findings);
        }
    }

    findings.retain(|finding| !options.ignore.contains(&finding.kind));
    debug!(
        "validated catalog entry {}: {} finding(s)",
        entry.id(),
        findings.len()
    );
    findings
}

fn check_fields(resource: &Resource, base: &str, findings: &mut Vec<Finding>) {
    // Report each repeated name against its first occurrence only.
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for (idx, field) in resource.schema().fields().iter().enumerate() {
        let location = format!("{base}/schema/fields/{idx}");
        let name = field.name();

        if name.trim().is_empty() {
            findings.push(Finding::new(
                FindingKind::EmptyFieldName,
                format!("{location}/name"),
                "field name is empty",
            ));
        } else if let Some(first) = seen.get(name) {
            findings.push(Finding::new(
                FindingKind::DuplicateFieldName,
                format!("{location}/name"),
                format!("field '{name}' duplicates column {first}"),
            ));
        } else {
            seen.insert(name, idx);
        }

        if let FieldType::Other(raw) = field.field_type() {
            findings.push(Finding::new(
                FindingKind::UnrecognizedFieldType,
                format!("{location}/type"),
                format!("field '{name}' declares unrecognized type '{raw}' (expected string, year or any)"),
            ));
        }

        let Some(literal) = field
            .display()
            .and_then(|settings| settings.conversion_factor_literal())
        else {
            continue;
        };
        let positive = literal
            .as_f64()
            .is_some_and(|factor| factor.is_finite() && factor > 0.0);
        if !positive {
            findings.push(Finding::new(
                FindingKind::NonPositiveConversionFactor,
                format!("{location}/owidDisplaySettings/conversionFactor"),
                format!("field '{name}' has conversion factor {literal}; it must be greater than zero"),
            ));
        }
    }
}

fn check_conventional_columns(resource: &Resource, base: &str, findings: &mut Vec<Finding>) {
    let schema = resource.schema();
    for (column, expected) in [
        (ENTITY_COLUMN, FieldType::String),
        (YEAR_COLUMN, FieldType::Year),
    ] {
        match schema.position(column) {
            None => findings.push(Finding::new(
                FindingKind::MissingConventionalColumn,
                format!("{base}/schema/fields"),
                format!("resource '{}' has no '{column}' column", resource.path()),
            )),
            Some(idx) => {
                let declared = schema.fields()[idx].field_type();
                if declared != &expected {
                    findings.push(Finding::new(
                        FindingKind::ConventionalColumnType,
                        format!("{base}/schema/fields/{idx}/type"),
                        format!("'{column}' is declared as '{declared}', expected '{expected}'"),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_entry_from_value;
    use serde_json::{Value, json};

    fn entry_with_fields(fields: Value) -> CatalogEntry {
        load_entry_from_value(json!({
            "name": "fixture",
            "id": 1,
            "sources": [],
            "resources": [{"path": "fixture.csv", "schema": {"fields": fields}}]
        }))
        .unwrap()
    }

    fn kinds(findings: &[Finding]) -> Vec<FindingKind> {
        findings.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn clean_entry_has_no_findings() {
        let entry = entry_with_fields(json!([
            {"name": "Entity", "type": "string"},
            {"name": "Year", "type": "year"},
            {"name": "output", "type": "any", "owidDisplaySettings": {"conversionFactor": 0.001}}
        ]));
        assert!(validate_entry(&entry).is_empty());
    }

    #[test]
    fn reports_every_problem_in_one_pass() {
        let entry = entry_with_fields(json!([
            {"name": "Entity", "type": "string"},
            {"name": "Entity", "type": "text"},
            {"name": "a", "type": "any", "owidDisplaySettings": {"conversionFactor": 0}},
            {"name": "b", "type": "any", "owidDisplaySettings": {"conversionFactor": -2.5}},
            {"name": "", "type": "any"}
        ]));
        let findings = validate_entry(&entry);
        assert_eq!(
            kinds(&findings),
            vec![
                FindingKind::DuplicateFieldName,
                FindingKind::UnrecognizedFieldType,
                FindingKind::NonPositiveConversionFactor,
                FindingKind::NonPositiveConversionFactor,
                FindingKind::EmptyFieldName,
            ]
        );
        assert_eq!(findings[0].location, "/resources/0/schema/fields/1/name");
        assert!(findings[0].message.contains("duplicates column 0"));
        assert_eq!(
            findings[3].location,
            "/resources/0/schema/fields/3/owidDisplaySettings/conversionFactor"
        );
    }

    #[test]
    fn triplicate_names_report_twice() {
        let entry = entry_with_fields(json!([
            {"name": "x", "type": "any"},
            {"name": "x", "type": "any"},
            {"name": "x", "type": "any"}
        ]));
        let findings = validate_entry(&entry);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.message.contains("column 0")));
    }

    #[test]
    fn embedded_conversion_factors_are_checked() {
        let entry = entry_with_fields(json!([
            {"name": "x", "type": "any", "owidDisplaySettings": "{\"conversionFactor\": -1}"}
        ]));
        assert_eq!(
            kinds(&validate_entry(&entry)),
            vec![FindingKind::NonPositiveConversionFactor]
        );
    }

    #[test]
    fn empty_and_duplicate_resource_paths() {
        let entry = load_entry_from_value(json!({
            "name": "fixture",
            "id": 1,
            "sources": [],
            "resources": [
                {"path": "", "schema": {"fields": []}},
                {"path": "a.csv", "schema": {"fields": []}},
                {"path": "a.csv", "schema": {"fields": []}}
            ]
        }))
        .unwrap();
        let findings = validate_entry(&entry);
        assert_eq!(
            kinds(&findings),
            vec![
                FindingKind::EmptyResourcePath,
                FindingKind::DuplicateResourcePath
            ]
        );
        assert_eq!(findings[1].location, "/resources/2/path");
    }

    #[test]
    fn conventional_columns_are_opt_in() {
        let entry = entry_with_fields(json!([
            {"name": "Year", "type": "any"},
            {"name": "value", "type": "any"}
        ]));
        assert!(validate_entry(&entry).is_empty());

        let options = ValidationOptions {
            conventional_columns: true,
            ..Default::default()
        };
        let findings = validate_entry_with(&entry, &options);
        assert_eq!(
            kinds(&findings),
            vec![
                FindingKind::MissingConventionalColumn,
                FindingKind::ConventionalColumnType
            ]
        );
        assert!(findings[1].message.contains("expected 'year'"));
    }

    #[test]
    fn ignored_kinds_are_dropped() {
        let entry = entry_with_fields(json!([{"name": "x", "type": "float"}]));
        let options = ValidationOptions {
            ignore: BTreeSet::from([FindingKind::UnrecognizedFieldType]),
            ..Default::default()
        };
        assert!(validate_entry_with(&entry, &options).is_empty());
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in FindingKind::ALL {
            assert_eq!(FindingKind::parse(kind.as_str()), Some(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json.trim_matches('"'), kind.as_str());
        }
        assert_eq!(FindingKind::parse("nope"), None);
    }
}
