//! JSON-friendly encoding of question graphs.
//!
//! Every value carries a `type` tag (`node`, `edge` or `filter`) and edges and
//! filters a `subtype`, so encoded graphs can be inspected or logged without
//! knowing the label types. Connective members are written in insertion order.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::{Edge, Filter, Node};

impl<N: Serialize, E: Serialize> Serialize for Node<N, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("type", "node")?;
        map.serialize_entry("label", &self.label)?;
        map.serialize_entry("edge", &self.edge)?;
        map.serialize_entry("filter", &self.filter)?;
        map.serialize_entry("order", &self.order)?;
        map.end()
    }
}

impl<N: Serialize, E: Serialize> Serialize for Edge<N, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "edge")?;
        match self {
            Edge::Incoming { source, label } => {
                map.serialize_entry("subtype", "incoming")?;
                map.serialize_entry("source", source)?;
                map.serialize_entry("label", label)?;
            }
            Edge::Outgoing { label, target } => {
                map.serialize_entry("subtype", "outgoing")?;
                map.serialize_entry("label", label)?;
                map.serialize_entry("target", target)?;
            }
            Edge::Conjunction(edges) => {
                map.serialize_entry("subtype", "conjunction")?;
                map.serialize_entry("edges", &edges.iter().collect::<Vec<_>>())?;
            }
            Edge::Disjunction(edges) => {
                map.serialize_entry("subtype", "disjunction")?;
                map.serialize_entry("edges", &edges.iter().collect::<Vec<_>>())?;
            }
            Edge::Aggregate {
                node,
                function,
                distinct,
                grouping,
            } => {
                map.serialize_entry("subtype", "aggregate")?;
                map.serialize_entry("node", node)?;
                map.serialize_entry("function", function)?;
                map.serialize_entry("distinct", distinct)?;
                map.serialize_entry("grouping", grouping)?;
            }
        }
        map.end()
    }
}

impl<N: Serialize, E: Serialize> Serialize for Filter<N, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", "filter")?;
        match self {
            Filter::Conjunction(filters) => {
                map.serialize_entry("subtype", "conjunction")?;
                map.serialize_entry("filters", &filters.iter().collect::<Vec<_>>())?;
            }
            Filter::Equals(node) => {
                map.serialize_entry("subtype", "equals")?;
                map.serialize_entry("node", node)?;
            }
            Filter::LessThan(node) => {
                map.serialize_entry("subtype", "less-than")?;
                map.serialize_entry("node", node)?;
            }
            Filter::GreaterThan(node) => {
                map.serialize_entry("subtype", "greater-than")?;
                map.serialize_entry("node", node)?;
            }
        }
        map.end()
    }
}
