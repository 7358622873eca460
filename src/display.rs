//! Rendering helpers driven by field display settings.
//!
//! Stored values are raw numbers; the conversion factor turns them into
//! display units and the unit strings label them. Summary tables and column
//! groups select fields by the same conventions the dataset's analysis code
//! used (`_quantity` suffixes, `_output_` infixes).

use crate::catalog::{DisplaySettings, Field, Schema};
use crate::validation::{ENTITY_COLUMN, YEAR_COLUMN};

impl DisplaySettings {
    /// Convert a raw stored value into display units.
    pub fn to_display(&self, raw: f64) -> f64 {
        match self.conversion_factor() {
            Some(factor) => raw * factor,
            None => raw,
        }
    }

    /// Short unit when set and non-empty, otherwise the full unit.
    pub fn unit_label(&self) -> Option<&str> {
        self.short_unit()
            .filter(|unit| !unit.trim().is_empty())
            .or_else(|| self.unit().filter(|unit| !unit.trim().is_empty()))
    }
}

/// Named selections of measure columns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnGroup {
    /// Every column except `Entity` and `Year`.
    Measures,
    /// Columns whose name ends in `_quantity`.
    Quantities,
    /// Columns whose name contains `_output_`.
    Outputs,
}

impl ColumnGroup {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "measures" => Some(ColumnGroup::Measures),
            "quantities" => Some(ColumnGroup::Quantities),
            "outputs" => Some(ColumnGroup::Outputs),
            _ => None,
        }
    }

    /// Whether `field` belongs to this group.
    pub fn includes(self, field: &Field) -> bool {
        let name = field.name();
        if is_dimension(name) {
            return false;
        }
        match self {
            ColumnGroup::Measures => true,
            ColumnGroup::Quantities => name.ends_with("_quantity"),
            ColumnGroup::Outputs => name.contains("_output_"),
        }
    }
}

fn is_dimension(name: &str) -> bool {
    name == ENTITY_COLUMN || name == YEAR_COLUMN
}

/// Fields in `group`, in column order.
pub fn column_group(schema: &Schema, group: ColumnGroup) -> Vec<&Field> {
    schema
        .fields()
        .iter()
        .filter(|field| group.includes(field))
        .collect()
}

/// A column shown in a rendered summary table.
#[derive(Clone, Debug)]
pub struct SummaryColumn<'a> {
    pub field: &'a Field,
    pub label: &'a str,
    pub unit: Option<&'a str>,
}

/// Columns a summary table shows: measure fields with display settings that
/// do not opt out through `includeInTable`.
pub fn summary_columns(schema: &Schema) -> Vec<SummaryColumn<'_>> {
    schema
        .fields()
        .iter()
        .filter(|field| !is_dimension(field.name()))
        .filter_map(|field| {
            let settings = field.display()?;
            if !settings.include_in_table() {
                return None;
            }
            Some(SummaryColumn {
                field,
                label: settings.name().unwrap_or(field.name()),
                unit: settings.unit_label(),
            })
        })
        .collect()
}

/// Render a raw value in display units, with the unit label when present.
pub fn format_display(raw: f64, settings: Option<&DisplaySettings>) -> String {
    let Some(settings) = settings else {
        return format_number(raw);
    };
    let value = format_number(settings.to_display(raw));
    match settings.unit_label() {
        Some("%") => format!("{value}%"),
        Some(unit) => format!("{value} {unit}"),
        None => value,
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let rendered = format!("{value:.4}");
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
