//! Graph vertices and their builder methods.

use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr};

use super::{AggregateFunction, Edge, Filter, Order};

/// A vertex of a question graph.
///
/// Nodes are plain values. The builder methods consume `self` and return the
/// extended node, so a graph reads like the question it encodes:
///
/// ```
/// use quarry_core::Node;
///
/// let alien = Node::new("film").outgoing("hasName", Node::new("Alien"));
/// let cast = Node::new("person").incoming(alien, "hasCastMember");
/// assert!(cast.edge.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Node<N, E> {
    /// Domain label, interpreted by the backend.
    pub label: N,
    /// Relational neighborhood of the node.
    pub edge: Option<Edge<N, E>>,
    /// Constraint on the node's values.
    pub filter: Option<Filter<N, E>>,
    /// Requested sort direction for the node's values.
    pub order: Option<Order>,
}

impl<N, E> Node<N, E> {
    /// Creates a node with no edge, filter or order.
    pub fn new(label: N) -> Self {
        Self {
            label,
            edge: None,
            filter: None,
            order: None,
        }
    }

    /// Sorts results by this node's values.
    #[must_use]
    pub fn ordered(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }
}

impl<N: Eq + Hash, E: Eq + Hash> Node<N, E> {
    /// Conjoins `edge` with the node's existing edge.
    #[must_use]
    pub fn and(mut self, edge: Edge<N, E>) -> Self {
        self.edge = Some(match self.edge.take() {
            Some(existing) => existing.and(edge),
            None => edge,
        });
        self
    }

    /// Disjoins `edge` with the node's existing edge.
    #[must_use]
    pub fn or(mut self, edge: Edge<N, E>) -> Self {
        self.edge = Some(match self.edge.take() {
            Some(existing) => existing.or(edge),
            None => edge,
        });
        self
    }

    /// Adds `self --label--> target`.
    #[must_use]
    pub fn outgoing(self, label: E, target: Node<N, E>) -> Self {
        self.and(Edge::outgoing(label, target))
    }

    /// Adds `source --label--> self`.
    #[must_use]
    pub fn incoming(self, source: Node<N, E>, label: E) -> Self {
        self.and(Edge::incoming(source, label))
    }

    /// Conjoins `filter` with the node's existing filter.
    #[must_use]
    pub fn filtered(mut self, filter: Filter<N, E>) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(filter),
            None => filter,
        });
        self
    }

    /// Makes this node the result of aggregating `node` per `grouping` value.
    #[must_use]
    pub fn aggregating(
        self,
        node: Node<N, E>,
        function: AggregateFunction,
        distinct: bool,
        grouping: Node<N, E>,
    ) -> Self {
        self.and(Edge::aggregate(node, function, distinct, grouping))
    }
}

impl<N: Eq + Hash, E: Eq + Hash> PartialEq for Node<N, E> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.edge == other.edge
            && self.filter == other.filter
            && self.order == other.order
    }
}

impl<N: Eq + Hash, E: Eq + Hash> Eq for Node<N, E> {}

impl<N: Eq + Hash, E: Eq + Hash> Hash for Node<N, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
        self.edge.hash(state);
        self.filter.hash(state);
        self.order.hash(state);
    }
}

impl<N: Eq + Hash, E: Eq + Hash> BitAnd<Edge<N, E>> for Node<N, E> {
    type Output = Self;

    fn bitand(self, rhs: Edge<N, E>) -> Self {
        self.and(rhs)
    }
}

impl<N: Eq + Hash, E: Eq + Hash> BitOr<Edge<N, E>> for Node<N, E> {
    type Output = Self;

    fn bitor(self, rhs: Edge<N, E>) -> Self {
        self.or(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    type TestNode = Node<&'static str, &'static str>;
    type TestEdge = Edge<&'static str, &'static str>;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_is_bare() {
        let node = TestNode::new("x");
        assert!(node.edge.is_none());
        assert!(node.filter.is_none());
        assert!(node.order.is_none());
    }

    #[test]
    fn test_first_edge_is_stored_unwrapped() {
        let node = TestNode::new("x").outgoing("isA", Node::new("person"));
        assert_eq!(
            node.edge,
            Some(TestEdge::outgoing("isA", Node::new("person")))
        );
    }

    #[test]
    fn test_edges_accumulate_as_conjunction() {
        let node = TestNode::new("x")
            .outgoing("isA", Node::new("person"))
            .incoming(Node::new("film"), "hasCastMember");
        let Some(Edge::Conjunction(edges)) = &node.edge else {
            panic!("Expected Conjunction");
        };
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_or_accumulates_as_disjunction() {
        let node = TestNode::new("x")
            | TestEdge::outgoing("hasPlaceOfBirth", Node::new("city"))
            | TestEdge::outgoing("hasPlaceOfDeath", Node::new("city"));
        assert!(matches!(node.edge, Some(Edge::Disjunction(_))));
    }

    #[test]
    fn test_edge_order_does_not_affect_equality() {
        let a = TestEdge::outgoing("isA", Node::new("person"));
        let b = TestEdge::incoming(Node::new("film"), "hasCastMember");

        let ab = TestNode::new("x") & a.clone() & b.clone();
        let ba = TestNode::new("x") & b & a;
        assert_eq!(ab, ba);
        assert_eq!(hash_of(&ab), hash_of(&ba));
    }

    #[test]
    fn test_filtered_conjoins() {
        let node = TestNode::new("x")
            .filtered(Filter::greater_than(Node::new("1900")))
            .filtered(Filter::less_than(Node::new("2000")));
        let Some(Filter::Conjunction(filters)) = &node.filter else {
            panic!("Expected Conjunction");
        };
        assert_eq!(filters.len(), 2);
    }

    #[test]
    fn test_fields_take_part_in_equality() {
        let base = TestNode::new("x").outgoing("isA", Node::new("person"));
        assert_ne!(base.clone(), base.clone().ordered(Order::Ascending));
        assert_ne!(
            base.clone().ordered(Order::Ascending),
            base.clone().ordered(Order::Descending)
        );
        assert_ne!(
            base.clone(),
            base.clone().filtered(Filter::equals(Node::new("3")))
        );
        assert_ne!(base, TestNode::new("y").outgoing("isA", Node::new("person")));
    }

    #[test]
    fn test_aggregating_adds_aggregate_edge() {
        let node = TestNode::new("count").aggregating(
            Node::new("planet"),
            AggregateFunction::Count,
            true,
            Node::new("person"),
        );
        assert!(matches!(
            node.edge,
            Some(Edge::Aggregate {
                function: AggregateFunction::Count,
                distinct: true,
                ..
            })
        ));
    }
}
