//! Lint catalog entry documents.
//!
//! Loads every document named on the command line (directories are searched
//! for `*.json`), validates each entry, and prints the findings either as
//! human-readable lines or as one JSON report. Exit status is 0 when every
//! document is clean, 1 when anything was reported, and 2 on usage errors.

use anyhow::{Context, Result};
use catalog_entry::{
    LintCommand, LintConfig, LintReport, OutputFormat, lint_paths, logging,
};
use std::io::{self, Write};

fn main() {
    logging::init();

    let config = match LintConfig::from_process() {
        Ok(LintCommand::Run(config)) => config,
        Ok(LintCommand::Help) => usage(0),
        Err(err) => {
            eprintln!("{err:#}");
            usage(2);
        }
    };

    match run(&config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: catalog-lint [--format human|json] [--conventional] [--structural] [--ignore kind,...] PATH...\n\nOptions:\n  --format, -f     Output format (default: human; env CATALOG_LINT_FORMAT).\n  --json           Shorthand for --format json.\n  --conventional   Require Entity (string) and Year (year) columns (env CATALOG_LINT_CONVENTIONAL).\n  --structural     Also check documents against the bundled JSON Schema.\n  --ignore         Finding kinds to drop (env CATALOG_LINT_IGNORE).\n\nPATH may be a document or a directory searched recursively for *.json."
    );
    std::process::exit(code);
}

fn run(config: &LintConfig) -> Result<bool> {
    let report = lint_paths(&config.paths, &config.options)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report).context("writing JSON report")?;
            writeln!(out)?;
        }
        OutputFormat::Human => print_human(&mut out, &report)?,
    }
    Ok(report.is_clean())
}

fn print_human(out: &mut impl Write, report: &LintReport) -> Result<()> {
    for doc in &report.documents {
        let path = doc.path.display();
        if let Some(error) = &doc.error {
            writeln!(out, "{path}: error: {error}")?;
        }
        for finding in &doc.findings {
            writeln!(out, "{path}: {finding}")?;
        }
        if doc.is_clean() {
            match doc.id {
                Some(id) => writeln!(out, "{path}: ok (id {id})")?,
                None => writeln!(out, "{path}: ok")?,
            }
        }
    }
    writeln!(
        out,
        "{} document(s), {} finding(s), {} error(s)",
        report.documents.len(),
        report.finding_count(),
        report.error_count()
    )?;
    Ok(())
}
