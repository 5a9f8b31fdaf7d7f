//! Edges: the relational content of a question graph.

use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr};

use quarry_common::OrderedSet;

use super::{AggregateFunction, Node};

/// How two edges are combined.
///
/// Producers pick a connective when a coordinated phrase can mean either
/// "both" or "either", and apply it with [`Edge::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    /// Both edges must hold.
    Conjunction,
    /// At least one edge must hold.
    Disjunction,
}

/// A relationship between a node and its neighborhood.
///
/// Build connectives with [`Edge::and`], [`Edge::or`], [`Edge::conjunction`]
/// or [`Edge::disjunction`] rather than the raw variants: those keep the
/// members flat and duplicate-free, which the engine's memoization relies on.
#[derive(Debug, Clone)]
pub enum Edge<N, E> {
    /// `source --label--> self`.
    Incoming {
        /// The node the edge starts at.
        source: Box<Node<N, E>>,
        /// The edge label.
        label: E,
    },

    /// `self --label--> target`.
    Outgoing {
        /// The edge label.
        label: E,
        /// The node the edge ends at.
        target: Box<Node<N, E>>,
    },

    /// All member edges hold. An empty conjunction is the no-op edge.
    Conjunction(OrderedSet<Edge<N, E>>),

    /// At least one member edge holds.
    Disjunction(OrderedSet<Edge<N, E>>),

    /// The owning node is `function` applied to `node`, grouped by `grouping`.
    Aggregate {
        /// The node whose values are aggregated.
        node: Box<Node<N, E>>,
        /// The aggregate function.
        function: AggregateFunction,
        /// Whether duplicate values are dropped before aggregating.
        distinct: bool,
        /// The node whose values form the groups.
        grouping: Box<Node<N, E>>,
    },
}

impl<N: Eq + Hash, E: Eq + Hash> Edge<N, E> {
    /// Creates an edge from the owning node to `target`.
    pub fn outgoing(label: E, target: Node<N, E>) -> Self {
        Edge::Outgoing {
            label,
            target: Box::new(target),
        }
    }

    /// Creates an edge from `source` to the owning node.
    pub fn incoming(source: Node<N, E>, label: E) -> Self {
        Edge::Incoming {
            source: Box::new(source),
            label,
        }
    }

    /// Creates an aggregate edge.
    pub fn aggregate(
        node: Node<N, E>,
        function: AggregateFunction,
        distinct: bool,
        grouping: Node<N, E>,
    ) -> Self {
        Edge::Aggregate {
            node: Box::new(node),
            function,
            distinct,
            grouping: Box::new(grouping),
        }
    }

    /// The edge that constrains nothing.
    pub fn noop() -> Self {
        Edge::Conjunction(OrderedSet::new())
    }

    /// Returns `true` for the no-op edge.
    pub fn is_noop(&self) -> bool {
        matches!(self, Edge::Conjunction(edges) if edges.is_empty())
    }

    /// Builds the conjunction of `edges`.
    ///
    /// Nested conjunctions are flattened and duplicates dropped. A single
    /// remaining member is returned as is; no members give [`Edge::noop`].
    pub fn conjunction(edges: impl IntoIterator<Item = Self>) -> Self {
        let members = Self::collect_members(edges, Connective::Conjunction);
        Self::from_members(members, Edge::Conjunction)
    }

    /// Builds the disjunction of `edges`, normalized like [`Edge::conjunction`].
    pub fn disjunction(edges: impl IntoIterator<Item = Self>) -> Self {
        let members = Self::collect_members(edges, Connective::Disjunction);
        Self::from_members(members, Edge::Disjunction)
    }

    /// Combines two edges so that both must hold.
    ///
    /// Two conjunctions merge their members; a conjunction absorbs any other
    /// edge; anything else becomes a fresh two-member conjunction.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Edge::Conjunction(edges), Edge::Conjunction(others)) => {
                Edge::Conjunction(edges.union(others))
            }
            (Edge::Conjunction(mut edges), other) => {
                edges.insert(other);
                Edge::Conjunction(edges)
            }
            (edge, Edge::Conjunction(others)) => {
                Edge::Conjunction(OrderedSet::singleton(edge).union(others))
            }
            (edge, other) => Edge::Conjunction([edge, other].into_iter().collect()),
        }
    }

    /// Combines two edges so that at least one must hold. Mirrors [`Edge::and`].
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Edge::Disjunction(edges), Edge::Disjunction(others)) => {
                Edge::Disjunction(edges.union(others))
            }
            (Edge::Disjunction(mut edges), other) => {
                edges.insert(other);
                Edge::Disjunction(edges)
            }
            (edge, Edge::Disjunction(others)) => {
                Edge::Disjunction(OrderedSet::singleton(edge).union(others))
            }
            (edge, other) => Edge::Disjunction([edge, other].into_iter().collect()),
        }
    }

    /// Combines two edges with the given connective.
    #[must_use]
    pub fn connect(self, other: Self, connective: Connective) -> Self {
        match connective {
            Connective::Conjunction => self.and(other),
            Connective::Disjunction => self.or(other),
        }
    }

    fn collect_members(
        edges: impl IntoIterator<Item = Self>,
        connective: Connective,
    ) -> OrderedSet<Self> {
        let mut members = OrderedSet::new();
        for edge in edges {
            match (edge, connective) {
                (Edge::Conjunction(nested), Connective::Conjunction)
                | (Edge::Disjunction(nested), Connective::Disjunction) => members.extend(nested),
                (edge, _) => {
                    members.insert(edge);
                }
            }
        }
        members
    }

    fn from_members(members: OrderedSet<Self>, wrap: fn(OrderedSet<Self>) -> Self) -> Self {
        match members.len() {
            0 => Self::noop(),
            1 => members.into_iter().next().unwrap_or_else(Self::noop),
            _ => wrap(members),
        }
    }
}

impl<N: Eq + Hash, E: Eq + Hash> PartialEq for Edge<N, E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Edge::Incoming { source, label },
                Edge::Incoming {
                    source: other_source,
                    label: other_label,
                },
            ) => label == other_label && source == other_source,
            (
                Edge::Outgoing { label, target },
                Edge::Outgoing {
                    label: other_label,
                    target: other_target,
                },
            ) => label == other_label && target == other_target,
            (Edge::Conjunction(edges), Edge::Conjunction(others))
            | (Edge::Disjunction(edges), Edge::Disjunction(others)) => edges == others,
            (
                Edge::Aggregate {
                    node,
                    function,
                    distinct,
                    grouping,
                },
                Edge::Aggregate {
                    node: other_node,
                    function: other_function,
                    distinct: other_distinct,
                    grouping: other_grouping,
                },
            ) => {
                function == other_function
                    && distinct == other_distinct
                    && node == other_node
                    && grouping == other_grouping
            }
            _ => false,
        }
    }
}

impl<N: Eq + Hash, E: Eq + Hash> Eq for Edge<N, E> {}

impl<N: Eq + Hash, E: Eq + Hash> Hash for Edge<N, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Edge::Incoming { source, label } => {
                source.hash(state);
                label.hash(state);
            }
            Edge::Outgoing { label, target } => {
                label.hash(state);
                target.hash(state);
            }
            // OrderedSet hashes independently of member order.
            Edge::Conjunction(edges) | Edge::Disjunction(edges) => edges.hash(state),
            Edge::Aggregate {
                node,
                function,
                distinct,
                grouping,
            } => {
                node.hash(state);
                function.hash(state);
                distinct.hash(state);
                grouping.hash(state);
            }
        }
    }
}

impl<N: Eq + Hash, E: Eq + Hash> BitAnd for Edge<N, E> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl<N: Eq + Hash, E: Eq + Hash> BitOr for Edge<N, E> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}
