use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the measurement table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring common spreadsheet dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` measurement.
    ///
    /// Strings are parsed leniently; a non-numeric string yields `None`
    /// rather than an error, matching the coerce-to-missing policy of the
    /// normalizer. NaN folds into `None` so threshold comparisons never
    /// see it.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        v.filter(|v| !v.is_nan())
    }
}

// ---------------------------------------------------------------------------
// CellTable – the complete loaded measurement table
// ---------------------------------------------------------------------------

/// One row of the source table: column_name → value.
pub type Row = BTreeMap<String, CellValue>;

/// The full parsed table with pre-computed column indices.
#[derive(Debug, Clone)]
pub struct CellTable {
    /// All rows (one per measured cell).
    pub rows: Vec<Row>,
    /// Column names in source-header order (export reproduces this layout).
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values (drives the sample
    /// picker and validation).
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl CellTable {
    /// Build column indices from loaded rows. `column_names` keeps the
    /// order the source file declared.
    pub fn from_rows(rows: Vec<Row>, column_names: Vec<String>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();
        for row in &rows {
            for (col, val) in row {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        CellTable {
            rows,
            column_names,
            unique_values,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted unique values of `column`, rendered as strings.
    pub fn unique_strings(&self, column: &str) -> Vec<String> {
        self.unique_values
            .get(column)
            .map(|vals| vals.iter().map(|v| v.to_string()).collect())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// CellRecord – one normalized record
// ---------------------------------------------------------------------------

/// The normalized view of one table row: sample identifier plus the two
/// measurement values, missing when absent or unparseable. Identity is the
/// original row index; records are never mutated after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRecord {
    /// Index of the source row in the loaded table.
    pub row: usize,
    /// Value of the sample-identifier column, rendered as text.
    pub sample: String,
    /// x measurement (EdU-like channel), `None` when missing.
    pub x: Option<f64>,
    /// y measurement (P21-like channel), `None` when missing.
    pub y: Option<f64>,
}

impl CellRecord {
    /// Both measurements present → the record participates in
    /// classification and in every percentage denominator.
    pub fn is_classifiable(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_f64_coerces_leniently() {
        assert_eq!(CellValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(CellValue::Integer(7).as_f64(), Some(7.0));
        assert_eq!(CellValue::String(" 42.5 ".into()).as_f64(), Some(42.5));
        assert_eq!(CellValue::String("n/a".into()).as_f64(), None);
        assert_eq!(CellValue::Bool(true).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
    }

    #[test]
    fn from_rows_indexes_unique_values() {
        let rows = vec![
            Row::from([("sample".to_string(), CellValue::String("A".into()))]),
            Row::from([("sample".to_string(), CellValue::String("B".into()))]),
            Row::from([("sample".to_string(), CellValue::String("A".into()))]),
        ];
        let table = CellTable::from_rows(rows, vec!["sample".to_string()]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.unique_strings("sample"), vec!["A", "B"]);
        assert!(table.unique_strings("absent").is_empty());
    }
}
