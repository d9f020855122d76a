use crate::analysis::classify::{classify, Quadrant, Thresholds};
use crate::data::model::CellRecord;

// ---------------------------------------------------------------------------
// QuadrantSummary – per-sample counts and percentages
// ---------------------------------------------------------------------------

/// Per-sample quadrant statistics.
///
/// `total` counts only classifiable records (both measurements present);
/// records with a missing value are excluded from every denominator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadrantSummary {
    /// Number of classifiable records in the sample.
    pub total: usize,
    counts: [usize; 4],
}

impl QuadrantSummary {
    pub fn count(&self, quadrant: Quadrant) -> usize {
        self.counts[quadrant.index()]
    }

    /// Share of the sample's classifiable records in `quadrant`, in percent.
    ///
    /// A sample with zero classifiable records reports 0.0 for every
    /// quadrant rather than dividing by zero; check [`is_degenerate`] to
    /// tell that case apart from a genuinely empty quadrant.
    ///
    /// [`is_degenerate`]: QuadrantSummary::is_degenerate
    pub fn percentage(&self, quadrant: Quadrant) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.count(quadrant) as f64 / self.total as f64
        }
    }

    /// True when the sample had no classifiable records at all.
    pub fn is_degenerate(&self) -> bool {
        self.total == 0
    }
}

/// Summarize one sample's records under the given thresholds.
///
/// Invoked once per sample; there is no cross-sample normalization.
pub fn summarize(records: &[CellRecord], thresholds: Thresholds) -> QuadrantSummary {
    let mut summary = QuadrantSummary::default();
    for record in records {
        if let Some(quadrant) = classify(record.x, record.y, thresholds) {
            summary.counts[quadrant.index()] += 1;
            summary.total += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(x: Option<f64>, y: Option<f64>) -> CellRecord {
        CellRecord {
            row: 0,
            sample: "S1".to_string(),
            x,
            y,
        }
    }

    const THR: Thresholds = Thresholds { x: 200.0, y: 190.0 };

    #[test]
    fn one_record_per_quadrant_gives_25_percent_each() {
        let records = vec![
            record(Some(250.0), Some(50.0)),
            record(Some(50.0), Some(250.0)),
            record(Some(250.0), Some(250.0)),
            record(Some(50.0), Some(50.0)),
        ];
        let summary = summarize(&records, THR);
        assert_eq!(summary.total, 4);
        for quadrant in Quadrant::ALL {
            assert_eq!(summary.count(quadrant), 1);
            assert!((summary.percentage(quadrant) - 25.0).abs() < 1e-9);
        }
    }

    #[test]
    fn percentages_sum_to_100_when_all_records_classify() {
        let records = vec![
            record(Some(10.0), Some(10.0)),
            record(Some(10.0), Some(300.0)),
            record(Some(300.0), Some(300.0)),
            record(Some(190.0), Some(190.0)),
            record(Some(500.0), Some(1.0)),
            record(Some(0.0), Some(0.0)),
            record(Some(201.0), Some(191.0)),
        ];
        let summary = summarize(&records, THR);
        let sum: f64 = Quadrant::ALL.iter().map(|&q| summary.percentage(q)).sum();
        assert!((sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn missing_values_shrink_the_denominator() {
        let records = vec![
            record(None, Some(250.0)),
            record(Some(50.0), Some(50.0)),
        ];
        let summary = summarize(&records, THR);
        assert_eq!(summary.total, 1);
        assert!((summary.percentage(Quadrant::Q3) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn all_missing_sample_is_degenerate_not_a_fault() {
        let records = vec![record(None, None), record(Some(1.0), None)];
        let summary = summarize(&records, THR);
        assert!(summary.is_degenerate());
        for quadrant in Quadrant::ALL {
            assert_eq!(summary.percentage(quadrant), 0.0);
        }
    }
}
