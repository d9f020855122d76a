use std::path::PathBuf;

use crate::analysis::classify::Thresholds;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Names of the three columns this system reads from the table.
///
/// Exact names are configuration, not contract: the defaults match the demo
/// dataset and every name can be remapped from the side panel after a file
/// is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Sample-identifier column.
    pub sample: String,
    /// x measurement column (EdU-like channel).
    pub x: String,
    /// y measurement column (P21-like channel).
    pub y: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        ColumnSpec {
            sample: "sample".to_string(),
            x: "measurement_x".to_string(),
            y: "measurement_y".to_string(),
        }
    }
}

impl ColumnSpec {
    /// The required columns, in the order validation reports them.
    pub fn required(&self) -> [&str; 3] {
        [&self.sample, &self.x, &self.y]
    }
}

/// Everything one run is parameterized by, collected in one object the UI
/// fills in; the analysis layer never prompts for anything.
///
/// Not persisted between runs.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub columns: ColumnSpec,
    pub thresholds: Thresholds,
    /// Reference sample: plotted and exported.
    pub first_sample: Option<String>,
    /// Comparison sample: plotted only.
    pub second_sample: Option<String>,
    /// Where the four quadrant files go.
    pub output_dir: Option<PathBuf>,
}

impl RunConfig {
    /// Both sample names chosen?
    pub fn samples_selected(&self) -> bool {
        self.first_sample.is_some() && self.second_sample.is_some()
    }
}
