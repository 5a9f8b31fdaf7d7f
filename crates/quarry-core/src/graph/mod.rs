//! Question graph model.
//!
//! All types are generic over a node label `N` and an edge label `E`; the
//! domain decides what labels mean, the graph only decides how they connect.
//!
//! Equality and hashing are structural. Conjunctions and disjunctions compare
//! as sets, so `a.and(b) == b.and(a)`, while incoming and outgoing edges
//! compare positionally.

mod aggregate;
mod edge;
mod encode;
mod filter;
mod node;

pub use aggregate::{AggregateFunction, Order};
pub use edge::{Connective, Edge};
pub use filter::Filter;
pub use node::Node;
