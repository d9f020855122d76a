/// Analysis layer: quadrant classification, aggregation, partitioning.
///
/// Architecture:
/// ```text
///   Vec<CellRecord>  (normalized, per sample)
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  (x, y) vs thresholds → Quadrant | unclassified
///   └──────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌──────────┐      ┌───────────┐
///   │ summary   │      │ partition  │
///   │ counts, %  │      │ 4 subsets  │
///   └──────────┘      └───────────┘
/// ```
///
/// Everything here is pure: thresholds are passed in explicitly and the
/// same pair is applied to both samples.

pub mod classify;
pub mod partition;
pub mod summary;
