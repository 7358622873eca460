use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/agricultural_tfp_usda.json")
}

pub fn fixture_value() -> Value {
    let data = fs::read_to_string(fixture_path()).expect("fixture readable");
    serde_json::from_str(&data).expect("fixture is JSON")
}

/// Write `value` into a fresh temp dir under `name`.
pub fn write_document(dir: &TempDir, name: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn run_bin(bin: &str, args: &[&str], cwd: &Path) -> Result<Output> {
    let mut cmd = Command::new(bin);
    cmd.args(args)
        .current_dir(cwd)
        .env_remove("CATALOG_LINT_FORMAT")
        .env_remove("CATALOG_LINT_IGNORE")
        .env_remove("CATALOG_LINT_CONVENTIONAL");
    cmd.output()
        .with_context(|| format!("failed to run command: {:?}", cmd))
}
