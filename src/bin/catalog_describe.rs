//! Print a catalog entry's metadata and column table.
//!
//! `--summary` limits the table to the columns a rendered summary shows;
//! `--group quantities|outputs|measures` limits it to a column group. The two
//! combine: `--summary --group outputs` lists summary columns in that group.

use anyhow::{Context, Result, bail};
use catalog_entry::{
    CatalogEntry, ColumnGroup, Field, load_entry_from_path, logging, summary_columns,
};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

struct Cli {
    path: PathBuf,
    summary: bool,
    group: Option<ColumnGroup>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut path = None;
        let mut summary = false;
        let mut group = None;

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .with_context(|| "Invalid UTF-8 in argument")?
                .to_string();
            match arg_str.as_str() {
                "--help" | "-h" => usage(0),
                "--summary" | "-s" => summary = true,
                "--group" | "-g" => {
                    let raw = args
                        .next()
                        .and_then(|v| v.into_string().ok())
                        .with_context(|| "--group requires a value")?;
                    group = Some(
                        ColumnGroup::parse(&raw)
                            .with_context(|| format!("unknown column group '{raw}'"))?,
                    );
                }
                flag if flag.starts_with('-') => bail!("unknown flag '{flag}'"),
                _ if path.is_none() => path = Some(PathBuf::from(arg)),
                _ => bail!("only one document may be described at a time"),
            }
        }

        let Some(path) = path else {
            usage(2);
        };
        Ok(Self {
            path,
            summary,
            group,
        })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: catalog-describe [--summary] [--group quantities|outputs|measures] PATH\n\nOptions:\n  --summary, -s   Show only the columns a summary table includes.\n  --group, -g     Show only one column group."
    );
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let entry = load_entry_from_path(&cli.path)
        .with_context(|| format!("loading {}", cli.path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_header(&mut out, &entry)?;

    for resource in entry.resources() {
        let schema = resource.schema();
        writeln!(out)?;
        writeln!(
            out,
            "resource {} ({} fields)",
            resource.path(),
            schema.len()
        )?;

        if cli.summary {
            let columns = summary_columns(schema)
                .into_iter()
                .filter(|column| cli.group.is_none_or(|group| group.includes(column.field)));
            for column in columns {
                let unit = column.unit.unwrap_or("-");
                writeln!(out, "  {:<40} {}", column.label, unit)?;
            }
            continue;
        }

        writeln!(
            out,
            "  {:>3}  {:<32} {:<7} {:<16} {:>10}  {}",
            "#", "name", "type", "unit", "factor", "table"
        )?;
        for (position, field) in schema.fields().iter().enumerate() {
            if cli.group.is_none_or(|group| group.includes(field)) {
                print_field(&mut out, position, field)?;
            }
        }
    }
    Ok(())
}

fn print_header(out: &mut impl Write, entry: &CatalogEntry) -> Result<()> {
    writeln!(out, "{}  {}", entry.id(), entry.name())?;
    if !entry.title().is_empty() && entry.title() != entry.name() {
        writeln!(out, "title: {}", entry.title())?;
    }
    if !entry.description().is_empty() {
        writeln!(out, "description: {}", entry.description())?;
    }
    if !entry.tags().is_empty() {
        writeln!(out, "tags: {}", entry.tags().join(", "))?;
    }
    for source in entry.sources() {
        let publisher = source
            .data_published_by()
            .map(|by| format!(" ({by})"))
            .unwrap_or_default();
        let link = source
            .link()
            .map(|link| format!(" <{link}>"))
            .unwrap_or_default();
        writeln!(out, "source: {}{publisher}{link}", source.name())?;
    }
    Ok(())
}

fn print_field(out: &mut impl Write, position: usize, field: &Field) -> Result<()> {
    let settings = field.display();
    let unit = settings.and_then(|s| s.unit_label()).unwrap_or("-");
    let factor = settings
        .and_then(|s| s.conversion_factor_literal())
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let table = match settings {
        Some(s) if s.include_in_table() => "yes",
        Some(_) => "no",
        None => "-",
    };
    writeln!(
        out,
        "  {:>3}  {:<32} {:<7} {:<16} {:>10}  {}",
        position,
        field.name(),
        field.field_type().as_str(),
        unit,
        factor,
        table
    )?;
    Ok(())
}
