//! Result ordering and aggregate functions.

use serde::Serialize;

/// Sort direction requested for a node's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// Function applied by an aggregate edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregateFunction {
    /// Arithmetic mean.
    Avg,
    /// Number of values.
    Count,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
    /// Any one value.
    Sample,
    /// Sum of values.
    Sum,
    /// Values joined into a single string.
    GroupConcat,
}
