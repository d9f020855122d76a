use crate::analysis::summary::{summarize, QuadrantSummary};
use crate::color::SampleColors;
use crate::config::RunConfig;
use crate::data::model::{CellRecord, CellTable};
use crate::data::normalize::{normalize, sample_records};
use crate::data::validate::{check_columns, check_samples};

// ---------------------------------------------------------------------------
// Per-sample analysis snapshot
// ---------------------------------------------------------------------------

/// One selected sample's share of the analysis: its records, quadrant
/// summary, and the median y-intensity of its y-positive cells.
#[derive(Debug, Clone)]
pub struct SampleView {
    pub name: String,
    pub records: Vec<CellRecord>,
    pub summary: QuadrantSummary,
    /// Median y measurement over cells with y above threshold_y, `None`
    /// when no such cell exists.
    pub high_y_median: Option<f64>,
}

/// The analysis of the current selection, rebuilt whenever the table,
/// column mapping, thresholds, or sample picks change.
#[derive(Debug, Clone)]
pub struct SelectionAnalysis {
    /// Reference sample: plotted and exported.
    pub first: SampleView,
    /// Comparison sample: plotted only.
    pub second: SampleView,
    /// Maximum observed value across both measurement columns of the whole
    /// table; both plot axes run 0‥this.
    pub max_value: f64,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until the user opens a file).
    pub table: Option<CellTable>,

    /// The injected run configuration: columns, thresholds, sample picks,
    /// output directory.
    pub config: RunConfig,

    /// Normalized view of every table row (rebuilt with the column map).
    pub records: Vec<CellRecord>,

    /// Analysis of the current selection (None until two valid samples are
    /// picked; cleared on any validation failure).
    pub analysis: Option<SelectionAnalysis>,

    /// Stable sample → colour assignment for the loaded table.
    pub sample_colors: SampleColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            config: RunConfig::default(),
            records: Vec::new(),
            analysis: None,
            sample_colors: SampleColors::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table: reset the selection, re-derive colours
    /// and the normalized records.
    pub fn set_table(&mut self, table: CellTable) {
        self.config.first_sample = None;
        self.config.second_sample = None;

        // If the default column names don't exist, fall back to the first
        // three columns so the pickers start somewhere sensible.
        if check_columns(&table, &self.config.columns.required()).is_err() {
            let mut names = table.column_names.iter();
            if let (Some(s), Some(x), Some(y)) = (names.next(), names.next(), names.next()) {
                self.config.columns.sample = s.clone();
                self.config.columns.x = x.clone();
                self.config.columns.y = y.clone();
            }
        }

        self.table = Some(table);
        self.status_message = None;
        self.loading = false;
        self.recompute();
    }

    /// Distinct sample names available under the current column mapping.
    pub fn available_samples(&self) -> Vec<String> {
        self.table
            .as_ref()
            .map(|t| t.unique_strings(&self.config.columns.sample))
            .unwrap_or_default()
    }

    /// Re-derive everything downstream of the table and configuration:
    /// validate, normalize, classify, aggregate. On a validation failure
    /// the analysis is cleared and the error shown — no partial results.
    pub fn recompute(&mut self) {
        self.analysis = None;
        let Some(table) = &self.table else {
            self.records.clear();
            return;
        };

        if let Err(e) = check_columns(table, &self.config.columns.required()) {
            self.records.clear();
            self.status_message = Some(format!("Error: {e}"));
            return;
        }

        self.records = normalize(table, &self.config.columns);
        self.sample_colors = SampleColors::new(&self.available_samples());

        let (Some(first), Some(second)) = (
            self.config.first_sample.clone(),
            self.config.second_sample.clone(),
        ) else {
            // Not a failure, just an incomplete selection.
            return;
        };

        if let Err(e) = check_samples(table, &self.config.columns.sample, &[&first, &second]) {
            self.status_message = Some(format!("Error: {e}"));
            return;
        }

        let max_value = self
            .records
            .iter()
            .flat_map(|r| [r.x, r.y])
            .flatten()
            .fold(0.0_f64, f64::max);

        self.analysis = Some(SelectionAnalysis {
            first: self.sample_view(first),
            second: self.sample_view(second),
            max_value,
        });
        self.status_message = None;
    }

    fn sample_view(&self, name: String) -> SampleView {
        let records = sample_records(&self.records, &name);
        let summary = summarize(&records, self.config.thresholds);
        let high_y_median = median(
            records
                .iter()
                .filter_map(|r| r.y)
                .filter(|&y| y > self.config.thresholds.y)
                .collect(),
        );
        SampleView {
            name,
            records,
            summary,
            high_y_median,
        }
    }

    /// Select the reference sample.
    pub fn set_first_sample(&mut self, name: String) {
        self.config.first_sample = Some(name);
        self.recompute();
    }

    /// Select the comparison sample.
    pub fn set_second_sample(&mut self, name: String) {
        self.config.second_sample = Some(name);
        self.recompute();
    }
}

/// Median of the values, averaging the middle pair for even counts.
fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row};

    fn row(sample: &str, x: f64, y: f64) -> Row {
        Row::from([
            ("sample".to_string(), CellValue::String(sample.into())),
            ("measurement_x".to_string(), CellValue::Float(x)),
            ("measurement_y".to_string(), CellValue::Float(y)),
        ])
    }

    fn loaded_state() -> AppState {
        let table = CellTable::from_rows(
            vec![
                row("control", 250.0, 50.0),
                row("control", 50.0, 250.0),
                row("treated", 250.0, 250.0),
                row("treated", 50.0, 50.0),
            ],
            vec![
                "sample".to_string(),
                "measurement_x".to_string(),
                "measurement_y".to_string(),
            ],
        );
        let mut state = AppState::default();
        state.set_table(table);
        state
    }

    #[test]
    fn analysis_appears_once_both_samples_are_picked() {
        let mut state = loaded_state();
        assert!(state.analysis.is_none());

        state.set_first_sample("control".to_string());
        assert!(state.analysis.is_none());

        state.set_second_sample("treated".to_string());
        let analysis = state.analysis.as_ref().expect("analysis");
        assert_eq!(analysis.first.records.len(), 2);
        assert_eq!(analysis.second.records.len(), 2);
        assert_eq!(analysis.max_value, 250.0);
    }

    #[test]
    fn unknown_sample_clears_the_analysis() {
        let mut state = loaded_state();
        state.set_first_sample("control".to_string());
        state.set_second_sample("mock".to_string());
        assert!(state.analysis.is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("mock")));
    }

    #[test]
    fn high_y_median_ignores_cells_at_or_below_threshold() {
        let mut state = loaded_state();
        state.set_first_sample("control".to_string());
        state.set_second_sample("treated".to_string());
        let analysis = state.analysis.as_ref().unwrap();
        // control has one cell with y = 250 above 190; 50 is below.
        assert_eq!(analysis.first.high_y_median, Some(250.0));
    }

    #[test]
    fn median_averages_even_counts() {
        assert_eq!(median(vec![]), None);
        assert_eq!(median(vec![3.0]), Some(3.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }
}
