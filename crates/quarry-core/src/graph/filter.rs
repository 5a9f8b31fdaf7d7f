//! Comparison filters on node values.

use std::hash::{Hash, Hasher};
use std::ops::BitAnd;

use quarry_common::OrderedSet;

use super::Node;

/// A constraint on the values of the node that owns it.
///
/// The compared node is an ordinary graph node: it may be a constant such as
/// a number, or a variable with its own edges (e.g. "the birth date of Obama").
#[derive(Debug, Clone)]
pub enum Filter<N, E> {
    /// All member filters hold. An empty conjunction filters nothing.
    Conjunction(OrderedSet<Filter<N, E>>),
    /// The value equals the other node's value.
    Equals(Box<Node<N, E>>),
    /// The value is at most the other node's value.
    LessThan(Box<Node<N, E>>),
    /// The value is at least the other node's value.
    GreaterThan(Box<Node<N, E>>),
}

impl<N: Eq + Hash, E: Eq + Hash> Filter<N, E> {
    /// Value equals `node`.
    pub fn equals(node: Node<N, E>) -> Self {
        Filter::Equals(Box::new(node))
    }

    /// Value is less than (or equal to) `node`.
    pub fn less_than(node: Node<N, E>) -> Self {
        Filter::LessThan(Box::new(node))
    }

    /// Value is greater than (or equal to) `node`.
    pub fn greater_than(node: Node<N, E>) -> Self {
        Filter::GreaterThan(Box::new(node))
    }

    /// Returns `true` for the filter that constrains nothing.
    pub fn is_noop(&self) -> bool {
        matches!(self, Filter::Conjunction(filters) if filters.is_empty())
    }

    /// Builds the conjunction of `filters`.
    ///
    /// Nested conjunctions are flattened and duplicates dropped; a single
    /// member is returned as is and no members give the no-op filter.
    pub fn conjunction(filters: impl IntoIterator<Item = Self>) -> Self {
        let mut members = OrderedSet::new();
        for filter in filters {
            match filter {
                Filter::Conjunction(nested) => members.extend(nested),
                filter => {
                    members.insert(filter);
                }
            }
        }
        match members.len() {
            1 => members
                .into_iter()
                .next()
                .unwrap_or_else(|| Filter::Conjunction(OrderedSet::new())),
            _ => Filter::Conjunction(members),
        }
    }

    /// Combines two filters so that both must hold.
    ///
    /// Follows the same normalization as [`Edge::and`](super::Edge::and).
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Filter::Conjunction(filters), Filter::Conjunction(others)) => {
                Filter::Conjunction(filters.union(others))
            }
            (Filter::Conjunction(mut filters), other) => {
                filters.insert(other);
                Filter::Conjunction(filters)
            }
            (filter, Filter::Conjunction(others)) => {
                Filter::Conjunction(OrderedSet::singleton(filter).union(others))
            }
            (filter, other) => Filter::Conjunction([filter, other].into_iter().collect()),
        }
    }
}

impl<N: Eq + Hash, E: Eq + Hash> PartialEq for Filter<N, E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Filter::Conjunction(filters), Filter::Conjunction(others)) => filters == others,
            (Filter::Equals(node), Filter::Equals(other_node))
            | (Filter::LessThan(node), Filter::LessThan(other_node))
            | (Filter::GreaterThan(node), Filter::GreaterThan(other_node)) => node == other_node,
            _ => false,
        }
    }
}

impl<N: Eq + Hash, E: Eq + Hash> Eq for Filter<N, E> {}

impl<N: Eq + Hash, E: Eq + Hash> Hash for Filter<N, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Filter::Conjunction(filters) => filters.hash(state),
            Filter::Equals(node) | Filter::LessThan(node) | Filter::GreaterThan(node) => {
                node.hash(state);
            }
        }
    }
}

impl<N: Eq + Hash, E: Eq + Hash> BitAnd for Filter<N, E> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}
