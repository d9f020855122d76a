use crate::analysis::classify::{classify, Quadrant, Thresholds};
use crate::data::model::CellRecord;

// ---------------------------------------------------------------------------
// QuadrantPartition – the four quadrant subsets of one sample
// ---------------------------------------------------------------------------

/// Index lists into the partitioned slice, one per quadrant.
///
/// Together the four lists hold every classifiable record exactly once, in
/// original row order; records with a missing measurement appear in none.
#[derive(Debug, Clone, Default)]
pub struct QuadrantPartition {
    members: [Vec<usize>; 4],
}

impl QuadrantPartition {
    /// Positions (into the input slice) of the records in `quadrant`.
    pub fn members(&self, quadrant: Quadrant) -> &[usize] {
        &self.members[quadrant.index()]
    }

    /// The records of `quadrant`, resolved against the slice the partition
    /// was built from.
    pub fn records<'a>(
        &self,
        quadrant: Quadrant,
        records: &'a [CellRecord],
    ) -> Vec<&'a CellRecord> {
        self.members(quadrant).iter().map(|&i| &records[i]).collect()
    }

    /// Total records placed across all four quadrants.
    pub fn classified_len(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }
}

/// Split one sample's records into the four quadrant subsets.
///
/// The export step applies this to the reference (first-selected) sample
/// only; the second sample is plotted but never exported.
pub fn partition(records: &[CellRecord], thresholds: Thresholds) -> QuadrantPartition {
    let mut result = QuadrantPartition::default();
    for (i, record) in records.iter().enumerate() {
        if let Some(quadrant) = classify(record.x, record.y, thresholds) {
            result.members[quadrant.index()].push(i);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn record(row: usize, x: Option<f64>, y: Option<f64>) -> CellRecord {
        CellRecord {
            row,
            sample: "S1".to_string(),
            x,
            y,
        }
    }

    const THR: Thresholds = Thresholds { x: 200.0, y: 190.0 };

    #[test]
    fn subsets_are_disjoint_and_cover_all_classifiable_records() {
        let records = vec![
            record(0, Some(250.0), Some(50.0)),
            record(1, Some(50.0), Some(250.0)),
            record(2, None, Some(250.0)),
            record(3, Some(200.0), Some(190.0)),
            record(4, Some(250.0), Some(250.0)),
            record(5, None, Some(1.0)),
        ];
        let part = partition(&records, THR);

        let mut seen = BTreeSet::new();
        for quadrant in Quadrant::ALL {
            for &i in part.members(quadrant) {
                assert!(seen.insert(i), "record {i} appears in two quadrants");
            }
        }
        // Rows 2 and 5 are unclassifiable, the rest must all be placed.
        assert_eq!(seen, BTreeSet::from([0, 1, 3, 4]));
        assert_eq!(part.classified_len(), 4);
    }

    #[test]
    fn members_preserve_original_order() {
        let records = vec![
            record(0, Some(10.0), Some(10.0)),
            record(1, Some(20.0), Some(20.0)),
            record(2, Some(300.0), Some(300.0)),
            record(3, Some(30.0), Some(30.0)),
        ];
        let part = partition(&records, THR);
        assert_eq!(part.members(Quadrant::Q3), &[0, 1, 3]);
        assert_eq!(part.members(Quadrant::Q2), &[2]);
    }

    #[test]
    fn records_resolves_against_the_source_slice() {
        let records = vec![
            record(0, Some(300.0), Some(10.0)),
            record(1, Some(10.0), Some(300.0)),
        ];
        let part = partition(&records, THR);
        let q4 = part.records(Quadrant::Q4, &records);
        assert_eq!(q4.len(), 1);
        assert_eq!(q4[0].row, 0);
    }
}
