use crate::db::models::{CommercializationFields, ProcessingFields, ProductionFields, TradeFields};
use crate::error::VitiError;
use crate::etl::catalog::{Layout, SourceFile, SourceSpec, TableKind};
use crate::etl::frame::Frame;
use crate::etl::text::is_category_label;
use tracing::warn;

/// One (entity, year) observation.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub category: String,
    pub subcategory: Option<String>,
    pub name: String,
    pub year: String,
    pub quantity: Option<i64>,
    pub value: f64,
}

/// Turn a cleaned wide frame into long rows, in file order.
pub fn reshape(
    spec: &SourceSpec,
    source: &SourceFile,
    frame: &Frame,
) -> Result<Vec<LongRow>, VitiError> {
    let key = frame
        .column_index(spec.key_column)
        .ok_or(VitiError::MissingColumn {
            table: spec.kind.label(),
            column: spec.key_column,
        })?;
    match spec.layout {
        Layout::Grouped => reshape_grouped(spec, source, frame, key),
        Layout::Paired => reshape_paired(spec, source, frame, key),
    }
}

fn reshape_grouped(
    spec: &SourceSpec,
    source: &SourceFile,
    frame: &Frame,
    key: usize,
) -> Result<Vec<LongRow>, VitiError> {
    let years = frame.year_columns();
    let mut out = Vec::with_capacity(frame.rows.len() * years.len());
    let mut current: Option<&str> = None;
    let mut orphans = 0usize;

    for row in &frame.rows {
        let label = row[key].as_str();
        if is_category_label(label) {
            current = Some(label);
            continue;
        }
        let Some(group) = current else {
            orphans += 1;
            continue;
        };

        // processing files carry their own super category; the row group
        // becomes the sub category there
        let (category, subcategory) = match (spec.kind, source.super_category) {
            (TableKind::Processing, Some(sup)) => (sup.to_string(), Some(group.to_string())),
            _ => (group.to_string(), None),
        };

        for &(idx, year) in &years {
            out.push(LongRow {
                category: category.clone(),
                subcategory: subcategory.clone(),
                name: label.to_string(),
                year: year.to_string(),
                quantity: None,
                value: parse_number(spec, &row[idx])?,
            });
        }
    }

    if orphans > 0 {
        warn!(
            table = spec.kind.label(),
            file = source.file,
            rows = orphans,
            "skipped rows preceding the first category header"
        );
    }
    Ok(out)
}

fn reshape_paired(
    spec: &SourceSpec,
    source: &SourceFile,
    frame: &Frame,
    key: usize,
) -> Result<Vec<LongRow>, VitiError> {
    // (year, quantity column, value column) in first-seen order
    let mut pairs: Vec<(&str, usize, Option<usize>)> = Vec::new();
    for (idx, year) in frame.year_columns() {
        let open = pairs
            .iter()
            .position(|&(y, _, value)| y == year && value.is_none());
        match open {
            Some(pos) => pairs[pos].2 = Some(idx),
            None => pairs.push((year, idx, None)),
        }
    }

    let category = source.super_category.unwrap_or_default().to_string();
    let mut out = Vec::with_capacity(frame.rows.len() * pairs.len());
    for row in &frame.rows {
        let name = row[key].as_str();
        for &(year, qty_idx, value_idx) in &pairs {
            let Some(value_idx) = value_idx else {
                continue;
            };
            out.push(LongRow {
                category: category.clone(),
                subcategory: None,
                name: name.to_string(),
                year: year.to_string(),
                quantity: Some(parse_number(spec, &row[qty_idx])?.round() as i64),
                value: parse_number(spec, &row[value_idx])?,
            });
        }
    }
    Ok(out)
}

/// Empty cells and configured placeholders count as zero.
fn parse_number(spec: &SourceSpec, cell: &str) -> Result<f64, VitiError> {
    let cell = cell.trim();
    if cell.is_empty() || spec.placeholders.iter().any(|p| *p == cell) {
        return Ok(0.0);
    }
    cell.parse::<f64>().map_err(|_| VitiError::InvalidNumber {
        table: spec.kind.label(),
        value: cell.to_string(),
    })
}

impl From<LongRow> for ProductionFields {
    fn from(r: LongRow) -> Self {
        Self {
            id: None,
            category: Some(r.category),
            name: Some(r.name),
            year: Some(r.year),
            value: Some(r.value),
        }
    }
}

impl From<LongRow> for ProcessingFields {
    fn from(r: LongRow) -> Self {
        Self {
            id: None,
            category: Some(r.category),
            subcategory: r.subcategory,
            name: Some(r.name),
            year: Some(r.year),
            value: Some(r.value),
        }
    }
}

impl From<LongRow> for CommercializationFields {
    fn from(r: LongRow) -> Self {
        Self {
            id: None,
            category: Some(r.category),
            name: Some(r.name),
            year: Some(r.year),
            liters: Some(r.value),
        }
    }
}

impl From<LongRow> for TradeFields {
    fn from(r: LongRow) -> Self {
        Self {
            id: None,
            category: Some(r.category),
            name: Some(r.name),
            year: Some(r.year),
            quantity: r.quantity,
            value: Some(r.value),
        }
    }
}
