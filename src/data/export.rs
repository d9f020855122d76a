use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::analysis::classify::{Quadrant, Thresholds};
use crate::analysis::partition::partition;
use crate::config::ColumnSpec;
use crate::data::model::CellRecord;

// ---------------------------------------------------------------------------
// Quadrant subset export
// ---------------------------------------------------------------------------

/// Write the four quadrant subsets of the reference sample to
/// `{Q1..Q4}_data_{first}_{second}.csv` in `output_dir`.
///
/// Only the reference (first-selected) sample is exported; the second
/// sample's name appears in the file names but its records do not. Each
/// file keeps the selected three columns and the original row order, with
/// no synthetic columns. Unclassifiable records appear in no file.
///
/// Returns the paths written, one per quadrant.
pub fn export_quadrants(
    output_dir: &Path,
    reference_records: &[CellRecord],
    thresholds: Thresholds,
    columns: &ColumnSpec,
    first_sample: &str,
    second_sample: &str,
) -> Result<Vec<PathBuf>> {
    let parts = partition(reference_records, thresholds);
    let mut written = Vec::with_capacity(4);

    for quadrant in Quadrant::ALL {
        let file_name = format!(
            "{}_{}_{}.csv",
            quadrant.file_stem(),
            first_sample,
            second_sample
        );
        let path = output_dir.join(file_name);

        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer
            .write_record([&columns.sample, &columns.x, &columns.y])
            .context("writing header")?;

        for record in parts.records(quadrant, reference_records) {
            // Members are classifiable by construction, both values present.
            writer
                .write_record([
                    record.sample.clone(),
                    record.x.map(|v| v.to_string()).unwrap_or_default(),
                    record.y.map(|v| v.to_string()).unwrap_or_default(),
                ])
                .with_context(|| format!("writing row {} of {}", record.row, path.display()))?;
        }

        writer
            .flush()
            .with_context(|| format!("flushing {}", path.display()))?;
        log::info!(
            "Exported {} records for {} to {}",
            parts.members(quadrant).len(),
            quadrant,
            path.display()
        );
        written.push(path);
    }

    Ok(written)
}
