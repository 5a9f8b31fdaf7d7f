//! Question graph to query plan compiler.
//!
//! Walks the graph once, depth first. Each node is compiled at most once per
//! [`QueryCompiler::compile_query`] call: when the same node is reached again
//! its terms are reused for the triple that reaches it, but its own pattern,
//! filter and sort keys are not emitted a second time.

use hashbrown::HashMap;
use indexmap::IndexMap;
use quarry_common::utils::error::{Error, Result};
use quarry_common::OrderedSet;
use quarry_core::{AggregateFunction, Edge, Filter, Order};

use super::backend::{Backend, BackendEdge, BackendNode, NodeContext};
use super::plan::{
    AggregateExpr, BasicPatternOp, BinaryOp, Expression, FilterOp, GroupOp, LogicalOperator,
    OrderComparator, Query, SortOrder, Term, Triple,
};
use super::result::{NodeResult, OpResult};
use crate::config::CompilerConfig;

type GraphFilter<B> = Filter<<B as Backend>::NodeLabel, <B as Backend>::EdgeLabel>;

/// Which end of a triple the compiled node sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// The compiled node is the subject.
    Forward,
    /// The compiled node is the object.
    Backward,
}

/// Compiles question graphs into [`Query`] plans.
///
/// The compiler owns its environment and backend. Compilation takes
/// `&mut self` because the per-call memo lives in the compiler; concurrent
/// compilations need separate compilers.
pub struct QueryCompiler<B: Backend> {
    env: B::Env,
    backend: B,
    config: CompilerConfig,
    /// Results of nodes compiled during the current call.
    node_results: HashMap<BackendNode<B>, NodeResult>,
}

impl<B: Backend> QueryCompiler<B> {
    /// Creates a compiler with default settings.
    pub fn new(env: B::Env, backend: B) -> Self {
        Self {
            env,
            backend,
            config: CompilerConfig::default(),
            node_results: HashMap::new(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the environment, e.g. to mint fresh nodes for a new graph.
    pub fn env(&self) -> &B::Env {
        &self.env
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles `node` into a query projecting every term the graph exposes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEdge`] if `node` has no edge, and one of the
    /// `*NotVariable` errors if a term that must be projected or grouped
    /// compiled to a constant.
    pub fn compile_query(&mut self, node: &BackendNode<B>) -> Result<Query> {
        if node.edge.is_none() {
            return Err(Error::MissingEdge);
        }

        tracing::debug!("Compiling question graph");

        self.node_results.clear();
        let result = self.compile_node(node, NodeContext::Triple);
        self.node_results.clear();
        let result = result?;

        let variable_names = result
            .all_nodes()
            .iter()
            .map(|term| variable_name(term, Error::FinalNodeNotVariable))
            .collect::<Result<Vec<_>>>()?;

        let OpResult {
            op,
            order_comparators,
        } = result.op_result;
        let op = self
            .backend
            .prepare_operator(op, &variable_names, &self.env);

        let mut variables = variable_names.clone();
        variables.extend(
            self.backend
                .additional_result_variables(&variable_names, &self.env),
        );

        let query = Query::new(LogicalOperator::distinct_project_order_by(
            op,
            variables,
            order_comparators,
        ));
        tracing::debug!(
            "Compiled query with {} variables and {} triples",
            query.variables().len(),
            query.root.triples().len()
        );
        Ok(query)
    }

    fn compile_node(&mut self, node: &BackendNode<B>, context: NodeContext) -> Result<NodeResult> {
        self.compile_node_with(node, context, |result| result)
    }

    /// Compiles `node`, letting `attach` combine the node's result with the
    /// pattern that refers to it before the node's own filter is applied.
    /// The filter then constrains variables bound by that pattern.
    fn compile_node_with(
        &mut self,
        node: &BackendNode<B>,
        context: NodeContext,
        attach: impl FnOnce(NodeResult) -> NodeResult,
    ) -> Result<NodeResult> {
        if let Some(result) = self.node_results.get(node) {
            tracing::trace!("Reusing compiled node {:?}", result.primary_nodes);
            return Ok(attach(result.without_operator()));
        }

        let expanded = self.backend.expand(node, context, &self.env);
        let compiled = self.backend.compile_node_label(&expanded.label, &self.env);

        let result = match &expanded.edge {
            Some(edge) => self.compile_edge(edge, &compiled)?,
            None => NodeResult::from_term(compiled),
        };
        let mut result = attach(result);

        if let Some(filter) = &node.filter {
            let primaries: Vec<Term> = result.primary_nodes.iter().cloned().collect();
            let mut op_result = std::mem::replace(&mut result.op_result, OpResult::identity());
            for primary in &primaries {
                op_result = self.compile_filter(filter, primary, op_result)?;
            }
            result.op_result = op_result;
        }

        if let Some(order) = node.order {
            let order = sort_order(order);
            for primary in &result.primary_nodes {
                result.op_result.order_comparators.push(OrderComparator {
                    order,
                    expression: Expression::Term(primary.clone()),
                });
            }
        }

        self.node_results.insert(node.clone(), result.clone());
        Ok(result)
    }

    fn compile_edge(&mut self, edge: &BackendEdge<B>, compiled: &Term) -> Result<NodeResult> {
        match edge {
            Edge::Outgoing { label, target } => {
                let op_result = self.compile_triples(label, compiled, target, Direction::Forward)?;
                Ok(NodeResult::new(compiled.clone(), op_result))
            }
            Edge::Incoming { source, label } => {
                let op_result =
                    self.compile_triples(label, compiled, source, Direction::Backward)?;
                Ok(NodeResult::new(compiled.clone(), op_result))
            }
            Edge::Conjunction(edges) => {
                let merge_patterns = self.config.merge_basic_patterns;
                self.compile_edges(edges, compiled, |left, right| {
                    left.join(right, merge_patterns)
                })
            }
            Edge::Disjunction(edges) => self.compile_edges(edges, compiled, OpResult::union),
            Edge::Aggregate {
                node,
                function,
                distinct,
                grouping,
            } => self.compile_aggregate(node, *function, *distinct, grouping, compiled),
        }
    }

    /// Compiles every edge and folds the results left to right.
    fn compile_edges(
        &mut self,
        edges: &OrderedSet<BackendEdge<B>>,
        compiled: &Term,
        merge_ops: impl Fn(OpResult, OpResult) -> OpResult,
    ) -> Result<NodeResult> {
        let mut merged: Option<NodeResult> = None;
        for edge in edges {
            let result = self.compile_edge(edge, compiled)?;
            merged = Some(match merged {
                Some(acc) => result.merge(acc, &merge_ops),
                None => result,
            });
        }
        Ok(merged.unwrap_or_else(|| NodeResult::from_term(compiled.clone())))
    }

    fn compile_triples(
        &mut self,
        label: &B::EdgeLabel,
        compiled: &Term,
        other: &BackendNode<B>,
        direction: Direction,
    ) -> Result<OpResult> {
        let predicate = self.backend.compile_edge_label(label, &self.env);
        tracing::trace!("Lowering {:?} edge {:?} at {}", direction, predicate, compiled);
        let merge_patterns = self.config.merge_basic_patterns;

        let other_result = self.compile_node_with(other, NodeContext::Triple, |mut result| {
            let triples = result
                .primary_nodes
                .iter()
                .map(|other_term| {
                    let (subject, object) = match direction {
                        Direction::Forward => (compiled.clone(), other_term.clone()),
                        Direction::Backward => (other_term.clone(), compiled.clone()),
                    };
                    Triple {
                        subject,
                        predicate: predicate.clone(),
                        object,
                    }
                })
                .collect();
            let other_op = std::mem::replace(&mut result.op_result, OpResult::identity());
            result.op_result =
                OpResult::from(BasicPatternOp { triples }).join(other_op, merge_patterns);
            result
        })?;

        Ok(other_result.op_result)
    }

    fn compile_filter(
        &mut self,
        filter: &GraphFilter<B>,
        compiled: &Term,
        op_result: OpResult,
    ) -> Result<OpResult> {
        match filter {
            Filter::Conjunction(filters) => filters
                .iter()
                .try_fold(op_result, |acc, filter| self.compile_filter(filter, compiled, acc)),
            Filter::Equals(other) => self.compile_comparison(other, BinaryOp::Eq, compiled, op_result),
            // Comparatives are inclusive: "born before 1900" keeps 1900.
            Filter::LessThan(other) => {
                self.compile_comparison(other, BinaryOp::Le, compiled, op_result)
            }
            Filter::GreaterThan(other) => {
                self.compile_comparison(other, BinaryOp::Ge, compiled, op_result)
            }
        }
    }

    fn compile_comparison(
        &mut self,
        other: &BackendNode<B>,
        op: BinaryOp,
        compiled: &Term,
        op_result: OpResult,
    ) -> Result<OpResult> {
        let merge_patterns = self.config.merge_basic_patterns;
        let other_result = self.compile_node_with(other, NodeContext::Filter, |mut result| {
            let other_op = std::mem::replace(&mut result.op_result, OpResult::identity());
            result.op_result = op_result.join(other_op, merge_patterns);
            result
        })?;
        let left = self
            .backend
            .prepare_left_expression(Expression::Term(compiled.clone()), other);

        let joined = other_result.op_result;
        let filtered = other_result
            .primary_nodes
            .iter()
            .fold(joined.op, |input, other_term| {
                LogicalOperator::Filter(FilterOp {
                    predicate: Expression::binary(
                        left.clone(),
                        op,
                        Expression::Term(other_term.clone()),
                    ),
                    input: Box::new(input),
                })
            });

        Ok(OpResult {
            op: filtered,
            order_comparators: joined.order_comparators,
        })
    }

    /// Compiles an aggregate edge into a grouped subquery.
    ///
    /// The aggregate value is bound to the variable of the node owning the
    /// edge, so filters and sort keys on that node apply to the aggregate.
    fn compile_aggregate(
        &mut self,
        node: &BackendNode<B>,
        function: AggregateFunction,
        distinct: bool,
        grouping: &BackendNode<B>,
        compiled: &Term,
    ) -> Result<NodeResult> {
        let aggregated = self.compile_node(node, NodeContext::Triple)?;

        let aggregate_variable = variable_name(compiled, Error::AggregatedNodeNotVariable)?;
        let mut aggregates = IndexMap::new();
        for aggregated_term in &aggregated.primary_nodes {
            variable_name(aggregated_term, Error::AggregatedNodeNotVariable)?;
            let separator = (function == AggregateFunction::GroupConcat)
                .then(|| self.config.group_concat_separator.clone());
            aggregates.insert(
                aggregate_variable.clone(),
                AggregateExpr {
                    function,
                    expression: Expression::Term(aggregated_term.clone()),
                    distinct,
                    separator,
                },
            );
        }

        let grouping_result = self.compile_node(grouping, NodeContext::Triple)?;
        let grouping_nodes = aggregated
            .secondary_nodes
            .union(grouping_result.primary_nodes)
            .union(grouping_result.secondary_nodes);
        let grouping_variables = grouping_nodes
            .iter()
            .map(|term| variable_name(term, Error::GroupingNodeNotVariable))
            .collect::<Result<Vec<_>>>()?;

        let inner = aggregated
            .op_result
            .join(grouping_result.op_result, self.config.merge_basic_patterns);

        let mut projected = grouping_variables.clone();
        projected.extend(aggregates.keys().cloned());

        let group = LogicalOperator::Group(GroupOp {
            group_by: grouping_variables,
            aggregates: aggregates.into_iter().collect(),
            input: Box::new(inner.op),
        });

        Ok(NodeResult {
            primary_nodes: OrderedSet::singleton(compiled.clone()),
            secondary_nodes: grouping_nodes,
            op_result: OpResult::new(LogicalOperator::distinct_project_order_by(
                group,
                projected,
                inner.order_comparators,
            )),
        })
    }
}

/// Returns the name of a variable term, or `error` carrying the term otherwise.
fn variable_name(term: &Term, error: fn(String) -> Error) -> Result<String> {
    term.as_variable()
        .map(str::to_string)
        .ok_or_else(|| error(term.to_string()))
}

fn sort_order(order: Order) -> SortOrder {
    match order {
        Order::Ascending => SortOrder::Ascending,
        Order::Descending => SortOrder::Descending,
    }
}
