//! # quarry-core
//!
//! Core layer for Quarry: the question graph intermediate representation.
//!
//! A question graph is an immutable tree of [`Node`]s connected by [`Edge`]s,
//! optionally constrained by [`Filter`]s and sorted by an [`Order`]. Graphs are
//! built by a producer (typically a natural-language front end) and handed to
//! the lowering engine in `quarry-engine`.
//!
//! ## Modules
//!
//! - [`graph`] - Node, edge, filter, and aggregate types with their combinators
//! - [`environment`] - Fresh-node factory shared by producers and backends

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod environment;
pub mod graph;

// Re-export commonly used types
pub use environment::Environment;
pub use graph::{AggregateFunction, Connective, Edge, Filter, Node, Order};
