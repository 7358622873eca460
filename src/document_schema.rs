//! Structural check of raw documents against the bundled JSON Schema.
//!
//! `schema/catalog_entry.schema.json` describes the document shape. It is
//! compiled once per process and reused; violations come back as
//! `DocumentStructure` findings located at the offending instance path.
//! Field `type` values are left unconstrained by the schema because
//! `validation` reports unrecognized types itself.

use crate::validation::{Finding, FindingKind};
use anyhow::{Result, anyhow};
use jsonschema::JSONSchema;
use log::warn;
use serde_json::Value;
use std::sync::OnceLock;

/// The bundled catalog entry schema.
pub const CATALOG_ENTRY_SCHEMA: &str = include_str!("../schema/catalog_entry.schema.json");

fn compiled_schema() -> Result<&'static JSONSchema> {
    static COMPILED: OnceLock<std::result::Result<JSONSchema, String>> = OnceLock::new();
    COMPILED
        .get_or_init(|| {
            let raw: Value =
                serde_json::from_str(CATALOG_ENTRY_SCHEMA).map_err(|err| err.to_string())?;
            JSONSchema::compile(&raw).map_err(|err| err.to_string())
        })
        .as_ref()
        .map_err(|err| {
            warn!("catalog entry schema failed to compile: {err}");
            anyhow!("compiling catalog entry schema: {err}")
        })
}

/// Validate a raw document against the bundled schema.
///
/// Returns every violation rather than stopping at the first one.
pub fn structural_findings(document: &Value) -> Result<Vec<Finding>> {
    let schema = compiled_schema()?;
    let findings = match schema.validate(document) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|err| {
                let pointer = err.instance_path.to_string();
                let location = if pointer.is_empty() {
                    "/".to_string()
                } else {
                    pointer
                };
                Finding::new(FindingKind::DocumentStructure, location, err.to_string())
            })
            .collect(),
    };
    Ok(findings)
}
