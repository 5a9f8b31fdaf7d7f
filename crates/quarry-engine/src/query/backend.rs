//! Domain backend capability.
//!
//! The compiler is generic over node and edge labels. Everything it needs to
//! know about a domain comes through [`Backend`]: how labels become terms and
//! predicates, plus a handful of optional rewrite hooks that default to
//! leaving their input untouched.

use std::borrow::Cow;
use std::hash::Hash;

use quarry_core::{Connective, Edge, Environment, Node};

use super::plan::{Expression, LogicalOperator, Predicate, Term};

/// A question graph node over a backend's labels.
pub type BackendNode<B> = Node<<B as Backend>::NodeLabel, <B as Backend>::EdgeLabel>;

/// A question graph edge over a backend's labels.
pub type BackendEdge<B> = Edge<<B as Backend>::NodeLabel, <B as Backend>::EdgeLabel>;

/// Why a node is being compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeContext {
    /// The node is the root, an edge endpoint, or an aggregate operand.
    Triple,
    /// The node is the right-hand side of a comparison filter.
    Filter,
}

/// Maps a domain's labels into the query algebra.
pub trait Backend {
    /// Node label type.
    type NodeLabel: Clone + Eq + Hash;
    /// Edge label type.
    type EdgeLabel: Clone + Eq + Hash;
    /// Environment minting fresh nodes over the same labels.
    type Env: Environment<NodeLabel = Self::NodeLabel, EdgeLabel = Self::EdgeLabel>;

    /// Compiles a node label to a term. Labels standing for unknowns must
    /// compile to [`Term::Variable`].
    fn compile_node_label(&self, label: &Self::NodeLabel, env: &Self::Env) -> Term;

    /// Compiles an edge label to a predicate.
    fn compile_edge_label(&self, label: &Self::EdgeLabel, env: &Self::Env) -> Predicate;

    /// Rewrites a node before it is compiled, e.g. to splice in derived structure.
    fn expand<'a>(
        &self,
        node: &'a BackendNode<Self>,
        _context: NodeContext,
        _env: &Self::Env,
    ) -> Cow<'a, BackendNode<Self>> {
        Cow::Borrowed(node)
    }

    /// Adjusts the left operand of a comparison against `other`.
    fn prepare_left_expression(
        &self,
        left: Expression,
        _other: &BackendNode<Self>,
    ) -> Expression {
        left
    }

    /// Post-processes the assembled plan before the final projection.
    fn prepare_operator(
        &self,
        op: LogicalOperator,
        _variables: &[String],
        _env: &Self::Env,
    ) -> LogicalOperator {
        op
    }

    /// Returns variables to project in addition to the result variables.
    fn additional_result_variables(&self, _variables: &[String], _env: &Self::Env) -> Vec<String> {
        Vec::new()
    }

    /// Decides whether two coordinated edges are meant jointly or alternatively.
    ///
    /// Producers consult this when a phrase such as "born in X and Y" is
    /// ambiguous and combine the edges with [`Edge::connect`]. The compiler
    /// itself never calls it.
    fn coordinate(
        &self,
        _first: &BackendEdge<Self>,
        _second: &BackendEdge<Self>,
        _env: &Self::Env,
    ) -> Connective {
        Connective::Conjunction
    }
}
