//! Lint runs over one or more catalog documents.
//!
//! A run loads every document it is pointed at, validates each entry, and
//! registers the entries in a `CatalogRepository` so id collisions between
//! documents surface too. Load failures are recorded per document and do not
//! stop the run.

use crate::catalog::{CatalogEntry, CatalogRepository, EntryId};
use crate::config::LintOptions;
use crate::document_schema::structural_findings;
use crate::error::LoadError;
use crate::loader::load_entry_from_value;
use crate::validation::{Finding, validate_entry_with};
use anyhow::Result;
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
/// Outcome for a single document.
pub struct DocumentReport {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    /// Read, load, or duplicate-id failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub findings: Vec<Finding>,
}

impl DocumentReport {
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.findings.is_empty()
    }

    /// Record a failure, keeping any earlier one.
    fn push_error(&mut self, message: String) {
        self.error = Some(match self.error.take() {
            Some(existing) => format!("{existing}; {message}"),
            None => message,
        });
    }
}

#[derive(Debug, Default, Serialize)]
pub struct LintReport {
    pub documents: Vec<DocumentReport>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.documents.iter().all(DocumentReport::is_clean)
    }

    pub fn finding_count(&self) -> usize {
        self.documents.iter().map(|doc| doc.findings.len()).sum()
    }

    pub fn error_count(&self) -> usize {
        self.documents.iter().filter(|doc| doc.error.is_some()).count()
    }
}

/// Lint a single document from its raw bytes.
pub fn lint_bytes(path: &Path, bytes: &[u8], options: &LintOptions) -> DocumentReport {
    lint_document(path, bytes, options).0
}

fn lint_document(
    path: &Path,
    bytes: &[u8],
    options: &LintOptions,
) -> (DocumentReport, Option<CatalogEntry>) {
    let mut report = DocumentReport {
        path: path.to_path_buf(),
        id: None,
        error: None,
        findings: Vec::new(),
    };

    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(err) => {
            report.error = Some(LoadError::from(err).to_string());
            return (report, None);
        }
    };

    if options.structural {
        match structural_findings(&value) {
            Ok(findings) => report.findings.extend(findings),
            Err(err) => report.push_error(format!("{err:#}")),
        }
    }

    match load_entry_from_value(value) {
        Ok(entry) => {
            report.id = Some(entry.id());
            report
                .findings
                .extend(validate_entry_with(&entry, &options.validation));
            (report, Some(entry))
        }
        Err(err) => {
            report.push_error(err.to_string());
            (report, None)
        }
    }
}

/// Lint every document reachable from `paths`.
///
/// Directories are searched recursively for `*.json`; explicit file paths are
/// linted regardless of extension.
pub fn lint_paths(paths: &[PathBuf], options: &LintOptions) -> Result<LintReport> {
    let files = find_documents(paths)?;
    let mut repository = CatalogRepository::default();
    let mut report = LintReport::default();

    for file in files {
        let (mut doc, entry) = match fs::read(&file) {
            Ok(bytes) => lint_document(&file, &bytes, options),
            Err(err) => (
                DocumentReport {
                    path: file.clone(),
                    id: None,
                    error: Some(format!("unable to read: {err}")),
                    findings: Vec::new(),
                },
                None,
            ),
        };

        if let Some(entry) = entry {
            if let Err(err) = repository.register(entry) {
                doc.push_error(err.to_string());
            }
        }
        debug!(
            "linted {}: {} finding(s)",
            doc.path.display(),
            doc.findings.len()
        );
        report.documents.push(doc);
    }

    Ok(report)
}

/// Collect document paths in a stable order.
pub fn find_documents(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            collect_json(path, &mut found)?;
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn collect_json(dir: &Path, acc: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_json(&path, acc)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            acc.push(path);
        }
    }
    Ok(())
}
