use crate::config::ColumnSpec;

use super::model::{CellRecord, CellTable, CellValue};

// ---------------------------------------------------------------------------
// Numeric Normalizer
// ---------------------------------------------------------------------------

/// Produce the normalized record view of the table: one [`CellRecord`] per
/// row, with both measurement columns coerced to `f64`.
///
/// Coercion is lenient on purpose — a cell that cannot be read as a number
/// (text, bool, empty, NaN) becomes a missing value, never an error, so a
/// few malformed spreadsheet cells don't abort the whole run. Must run
/// before any threshold comparison; everything downstream consumes these
/// records read-only.
pub fn normalize(table: &CellTable, columns: &ColumnSpec) -> Vec<CellRecord> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(row, cells)| CellRecord {
            row,
            sample: cells
                .get(&columns.sample)
                .map(|v| v.to_string())
                .unwrap_or_default(),
            x: cells.get(&columns.x).and_then(CellValue::as_f64),
            y: cells.get(&columns.y).and_then(CellValue::as_f64),
        })
        .collect()
}

/// Records belonging to one sample, in original row order.
pub fn sample_records(records: &[CellRecord], sample: &str) -> Vec<CellRecord> {
    records
        .iter()
        .filter(|r| r.sample == sample)
        .cloned()
        .collect()
}
