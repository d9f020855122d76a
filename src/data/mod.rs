/// Data layer: core types, loading, validation, normalization, export.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → CellTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate  │  required columns + sample names, fatal on failure
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  coerce measurements → Vec<CellRecord>
///   └───────────┘
///        │
///        ▼
///   analysis (classify / summary / partition)
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  four quadrant CSVs for the reference sample
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod validate;

/// Whole-pipeline test: load → validate → normalize → summarize/partition
/// → export, over a real file in a temp dir.
#[cfg(test)]
mod pipeline_tests {
    use crate::analysis::classify::{Quadrant, Thresholds};
    use crate::analysis::partition::partition;
    use crate::analysis::summary::summarize;
    use crate::config::ColumnSpec;
    use crate::data::export::export_quadrants;
    use crate::data::loader::load_file;
    use crate::data::normalize::{normalize, sample_records};
    use crate::data::validate::{check_columns, check_samples};

    #[test]
    fn csv_to_quadrant_files() {
        let dir = std::env::temp_dir().join("quadrascope_pipeline_test");
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("cells.csv");
        std::fs::write(
            &input,
            "sample,measurement_x,measurement_y\n\
             S1,250,50\n\
             S1,50,250\n\
             S1,250,250\n\
             S1,50,50\n\
             S1,NaN,250\n\
             S2,10,10\n",
        )
        .unwrap();

        let table = load_file(&input).unwrap();
        let columns = ColumnSpec::default();
        let thresholds = Thresholds::default();

        check_columns(&table, &columns.required()).unwrap();
        check_samples(&table, &columns.sample, &["S1", "S2"]).unwrap();

        let records = normalize(&table, &columns);
        let s1 = sample_records(&records, "S1");

        // One cell per quadrant, 25% each; the NaN row shrinks the
        // denominator to 4.
        let summary = summarize(&s1, thresholds);
        assert_eq!(summary.total, 4);
        for quadrant in Quadrant::ALL {
            assert_eq!(summary.count(quadrant), 1);
            assert!((summary.percentage(quadrant) - 25.0).abs() < 1e-9);
        }

        // The NaN row is in no subset.
        let parts = partition(&s1, thresholds);
        assert_eq!(parts.classified_len(), 4);
        for quadrant in Quadrant::ALL {
            assert!(parts
                .records(quadrant, &s1)
                .iter()
                .all(|r| r.is_classifiable()));
        }

        let paths = export_quadrants(&dir, &s1, thresholds, &columns, "S1", "S2").unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "Q1_data_S1_S2.csv",
                "Q2_data_S1_S2.csv",
                "Q3_data_S1_S2.csv",
                "Q4_data_S1_S2.csv",
            ]
        );
        for path in &paths {
            let body = std::fs::read_to_string(path).unwrap();
            // Header plus exactly one record, none of them the NaN row.
            assert_eq!(body.lines().count(), 2);
            assert!(!body.contains("NaN"));
        }

        std::fs::remove_dir_all(&dir).ok();
    }
}
