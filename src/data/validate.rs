use thiserror::Error;

use super::model::CellTable;

// ---------------------------------------------------------------------------
// Validation – schema and sample existence
// ---------------------------------------------------------------------------

/// Fatal pre-flight failures. Either aborts the run before any
/// classification, plotting, or export happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required column '{0}' not found in the table")]
    MissingColumn(String),
    #[error("sample '{sample}' not found in the '{column}' column")]
    SampleNotFound { sample: String, column: String },
}

/// Check that every required column exists, reporting the first one
/// missing. No side effects; success just means "proceed".
pub fn check_columns(table: &CellTable, required: &[&str]) -> Result<(), ValidationError> {
    for &col in required {
        if !table.column_names.iter().any(|c| c == col) {
            return Err(ValidationError::MissingColumn(col.to_string()));
        }
    }
    Ok(())
}

/// Check that every requested sample name occurs among the distinct values
/// of the sample-identifier column.
pub fn check_samples(
    table: &CellTable,
    sample_column: &str,
    samples: &[&str],
) -> Result<(), ValidationError> {
    let present = table.unique_strings(sample_column);
    for &name in samples {
        if !present.iter().any(|s| s == name) {
            return Err(ValidationError::SampleNotFound {
                sample: name.to_string(),
                column: sample_column.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row};

    fn table() -> CellTable {
        let rows = vec![
            Row::from([
                ("sample".to_string(), CellValue::String("control".into())),
                ("measurement_x".to_string(), CellValue::Float(10.0)),
                ("measurement_y".to_string(), CellValue::Float(20.0)),
            ]),
            Row::from([
                ("sample".to_string(), CellValue::String("treated".into())),
                ("measurement_x".to_string(), CellValue::Float(30.0)),
                ("measurement_y".to_string(), CellValue::Float(40.0)),
            ]),
        ];
        CellTable::from_rows(
            rows,
            vec![
                "sample".to_string(),
                "measurement_x".to_string(),
                "measurement_y".to_string(),
            ],
        )
    }

    #[test]
    fn all_columns_present_passes() {
        let t = table();
        assert!(check_columns(&t, &["sample", "measurement_x", "measurement_y"]).is_ok());
    }

    #[test]
    fn first_missing_column_is_named() {
        let t = table();
        let err = check_columns(&t, &["sample", "area", "perimeter"]).unwrap_err();
        assert_eq!(err, ValidationError::MissingColumn("area".to_string()));
    }

    #[test]
    fn unknown_sample_is_rejected() {
        let t = table();
        assert!(check_samples(&t, "sample", &["control", "treated"]).is_ok());
        let err = check_samples(&t, "sample", &["control", "mock"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::SampleNotFound {
                sample: "mock".to_string(),
                column: "sample".to_string(),
            }
        );
    }
}
