//! Configuration for the lint command.
//!
//! Settings come from the environment first and command-line arguments
//! second, so a flag always wins over its variable. Parsing takes the
//! argument list and an environment lookup as inputs so it can be exercised
//! without touching the process environment.

use crate::split_list;
use crate::validation::{FindingKind, ValidationOptions};
use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::path::PathBuf;

pub const ENV_FORMAT: &str = "CATALOG_LINT_FORMAT";
pub const ENV_IGNORE: &str = "CATALOG_LINT_IGNORE";
pub const ENV_CONVENTIONAL: &str = "CATALOG_LINT_CONVENTIONAL";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl OutputFormat {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unknown output format '{other}' (expected human or json)"),
        }
    }
}

#[derive(Clone, Debug, Default)]
/// What the linter checks for each document.
pub struct LintOptions {
    pub validation: ValidationOptions,
    /// Also validate the raw document against the bundled JSON Schema.
    pub structural: bool,
}

#[derive(Clone, Debug, Default)]
pub struct LintConfig {
    pub format: OutputFormat,
    pub options: LintOptions,
    pub paths: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum LintCommand {
    Run(LintConfig),
    Help,
}

/// Treats any non-empty value other than `0` as enabled.
pub fn env_flag(value: Option<&str>) -> bool {
    value
        .map(|v| !v.trim().is_empty() && v.trim() != "0")
        .unwrap_or(false)
}

fn parse_kinds(raw: &str) -> Result<Vec<FindingKind>> {
    split_list(raw)
        .iter()
        .map(|token| {
            FindingKind::parse(token).with_context(|| format!("unknown finding kind '{token}'"))
        })
        .collect()
}

impl LintConfig {
    /// Build a configuration from the process environment and arguments.
    pub fn from_process() -> Result<LintCommand> {
        let args = std::env::args_os().skip(1);
        Self::from_sources(args, |key| std::env::var(key).ok())
    }

    /// Build a configuration from explicit arguments (program name excluded)
    /// and an environment lookup.
    pub fn from_sources<I, F>(args: I, env: F) -> Result<LintCommand>
    where
        I: IntoIterator<Item = OsString>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LintConfig::default();

        if let Some(raw) = env(ENV_FORMAT) {
            config.format = OutputFormat::parse(&raw).with_context(|| format!("reading {ENV_FORMAT}"))?;
        }
        if let Some(raw) = env(ENV_IGNORE) {
            let kinds = parse_kinds(&raw).with_context(|| format!("reading {ENV_IGNORE}"))?;
            config.options.validation.ignore.extend(kinds);
        }
        config.options.validation.conventional_columns = env_flag(env(ENV_CONVENTIONAL).as_deref());

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .with_context(|| "Invalid UTF-8 in argument")?
                .to_string();
            match arg_str.as_str() {
                "--help" | "-h" => return Ok(LintCommand::Help),
                "--format" | "-f" => {
                    let value = next_value(&mut args, "--format")?;
                    config.format = OutputFormat::parse(&value)?;
                }
                "--json" => config.format = OutputFormat::Json,
                "--conventional" => config.options.validation.conventional_columns = true,
                "--structural" => config.options.structural = true,
                "--ignore" => {
                    let value = next_value(&mut args, "--ignore")?;
                    config.options.validation.ignore.extend(parse_kinds(&value)?);
                }
                flag if flag.starts_with('-') && flag != "-" => {
                    bail!("unknown flag '{flag}'")
                }
                _ => config.paths.push(PathBuf::from(arg)),
            }
        }

        if config.paths.is_empty() {
            bail!("at least one catalog document or directory is required");
        }

        Ok(LintCommand::Run(config))
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    let value = args
        .next()
        .with_context(|| format!("{flag} requires a value"))?;
    value
        .into_string()
        .map_err(|_| anyhow::anyhow!("Invalid UTF-8 in value for {flag}"))
}
