//! Type aliases for the numeric types used across the crate.

/// Base-pair coordinate.
pub type PosType = i64;
/// Signal intensity or association statistic.
pub type ValueType = f64;
/// Vertical display offset of a glyph inside the gene track.
pub type OffsetType = f64;
