//! Error types for query compilation.
//!
//! Every error here means the input graph was malformed: the producer built
//! something the engine cannot lower. None of them are transient, so callers
//! should fix the graph rather than retry.

use thiserror::Error;

/// Result type alias for Quarry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error raised while compiling a graph into a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The root node has no edge, so the query would not describe any relationship.
    #[error("root node has no edge")]
    MissingEdge,

    /// A node selected for projection compiled to a constant.
    #[error("result node compiled to {0}, expected a variable")]
    FinalNodeNotVariable(String),

    /// An aggregated node (or the node receiving the aggregate) compiled to a constant.
    #[error("aggregated node compiled to {0}, expected a variable")]
    AggregatedNodeNotVariable(String),

    /// A grouping node compiled to a constant.
    #[error("grouping node compiled to {0}, expected a variable")]
    GroupingNodeNotVariable(String),
}
