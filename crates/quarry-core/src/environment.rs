//! Fresh-node factory.

use crate::graph::Node;

/// Supplies nodes with fresh, unique identities.
///
/// Producers use the environment to mint the variables of a question graph,
/// and backends receive it so they can tell those variables apart from domain
/// constants. The identity is opaque to the engine; a counter embedded in the
/// label is enough.
///
/// `new_node` takes `&self` so the environment can be shared with a compiler
/// while producers keep building graphs; implementations use interior
/// mutability for their counter.
pub trait Environment {
    /// Node label type.
    type NodeLabel;
    /// Edge label type.
    type EdgeLabel;

    /// Returns a node whose label has never been returned before.
    fn new_node(&self) -> Node<Self::NodeLabel, Self::EdgeLabel>;
}
