//! Intermediate compilation results.

use quarry_common::OrderedSet;

use super::plan::{BasicPatternOp, JoinOp, LogicalOperator, OrderComparator, Term, UnionOp};

/// An operator tree together with the sort keys it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpResult {
    /// The operator tree.
    pub op: LogicalOperator,
    /// Sort keys, applied by the enclosing `OrderBy`.
    pub order_comparators: Vec<OrderComparator>,
}

impl OpResult {
    /// Wraps an operator with no sort keys.
    pub fn new(op: LogicalOperator) -> Self {
        Self {
            op,
            order_comparators: Vec::new(),
        }
    }

    /// The neutral result: the identity operator and no sort keys.
    pub fn identity() -> Self {
        Self::new(LogicalOperator::Identity)
    }

    /// Joins two results.
    ///
    /// An identity operand is absorbed. Two basic patterns are concatenated
    /// into one when `merge_basic_patterns` is set; anything else becomes a
    /// join node. Sort keys are concatenated left to right in every case.
    #[must_use]
    pub fn join(self, other: OpResult, merge_basic_patterns: bool) -> Self {
        let op = match (self.op, other.op) {
            (LogicalOperator::Identity, op) | (op, LogicalOperator::Identity) => op,
            (LogicalOperator::BasicPattern(mut left), LogicalOperator::BasicPattern(right))
                if merge_basic_patterns =>
            {
                left.triples.extend(right.triples);
                LogicalOperator::BasicPattern(left)
            }
            (left, right) => LogicalOperator::Join(JoinOp {
                left: Box::new(left),
                right: Box::new(right),
            }),
        };
        Self {
            op,
            order_comparators: concat(self.order_comparators, other.order_comparators),
        }
    }

    /// Unions two results. Always produces a union node.
    #[must_use]
    pub fn union(self, other: OpResult) -> Self {
        Self {
            op: LogicalOperator::Union(UnionOp {
                left: Box::new(self.op),
                right: Box::new(other.op),
            }),
            order_comparators: concat(self.order_comparators, other.order_comparators),
        }
    }
}

impl From<BasicPatternOp> for OpResult {
    fn from(pattern: BasicPatternOp) -> Self {
        Self::new(LogicalOperator::BasicPattern(pattern))
    }
}

fn concat(mut left: Vec<OrderComparator>, right: Vec<OrderComparator>) -> Vec<OrderComparator> {
    left.extend(right);
    left
}

/// The outcome of compiling one question graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeResult {
    /// Terms standing for the node's own values.
    pub primary_nodes: OrderedSet<Term>,
    /// Further terms the result must expose, such as grouping variables.
    pub secondary_nodes: OrderedSet<Term>,
    /// The node's operator tree and sort keys.
    pub op_result: OpResult,
}

impl NodeResult {
    /// A result for a single term with the given operator tree.
    pub fn new(term: Term, op_result: OpResult) -> Self {
        Self {
            primary_nodes: OrderedSet::singleton(term),
            secondary_nodes: OrderedSet::new(),
            op_result,
        }
    }

    /// A result for a single term with no operator tree.
    pub fn from_term(term: Term) -> Self {
        Self::new(term, OpResult::identity())
    }

    /// Folds `self` onto a result compiled before it.
    ///
    /// Node sets list `self` first, so the most recent edge's nodes lead the
    /// projection. Operator trees keep `previous` on the left of `merge_ops`.
    #[must_use]
    pub fn merge(
        self,
        previous: NodeResult,
        merge_ops: impl FnOnce(OpResult, OpResult) -> OpResult,
    ) -> Self {
        Self {
            primary_nodes: self.primary_nodes.union(previous.primary_nodes),
            secondary_nodes: self.secondary_nodes.union(previous.secondary_nodes),
            op_result: merge_ops(previous.op_result, self.op_result),
        }
    }

    /// Primary nodes followed by secondary nodes, without duplicates.
    pub fn all_nodes(&self) -> OrderedSet<Term> {
        self.primary_nodes
            .iter()
            .chain(self.secondary_nodes.iter())
            .cloned()
            .collect()
    }

    /// The same nodes with the identity operator, for results already emitted once.
    #[must_use]
    pub fn without_operator(&self) -> Self {
        Self {
            primary_nodes: self.primary_nodes.clone(),
            secondary_nodes: self.secondary_nodes.clone(),
            op_result: OpResult::identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::plan::{Expression, Predicate, SortOrder, Triple};

    fn pattern(predicate: &str) -> OpResult {
        OpResult::from(BasicPatternOp {
            triples: vec![Triple {
                subject: Term::variable("0"),
                predicate: Predicate::Term(Term::iri(predicate)),
                object: Term::variable("1"),
            }],
        })
    }

    fn sorted(mut result: OpResult, variable: &str) -> OpResult {
        result.order_comparators.push(OrderComparator {
            order: SortOrder::Ascending,
            expression: Expression::Term(Term::variable(variable)),
        });
        result
    }

    #[test]
    fn test_join_absorbs_identity() {
        let p = pattern("p");
        assert_eq!(OpResult::identity().join(p.clone(), true), p);
        assert_eq!(p.clone().join(OpResult::identity(), true), p);
        assert_eq!(
            OpResult::identity().join(OpResult::identity(), true),
            OpResult::identity()
        );
    }

    #[test]
    fn test_join_merges_basic_patterns() {
        let joined = pattern("p").join(pattern("q"), true);
        let LogicalOperator::BasicPattern(merged) = &joined.op else {
            panic!("Expected BasicPattern");
        };
        assert_eq!(merged.triples.len(), 2);
        assert_eq!(joined.op.triples().len(), 2);
    }

    #[test]
    fn test_join_without_merging() {
        let joined = pattern("p").join(pattern("q"), false);
        assert!(matches!(joined.op, LogicalOperator::Join(_)));
        assert_eq!(joined.op.triples().len(), 2);
    }

    #[test]
    fn test_join_nests_non_patterns() {
        let union = pattern("p").union(pattern("q"));
        let joined = union.join(pattern("r"), true);
        let LogicalOperator::Join(join) = &joined.op else {
            panic!("Expected Join");
        };
        assert!(matches!(join.left.as_ref(), LogicalOperator::Union(_)));
        assert!(matches!(join.right.as_ref(), LogicalOperator::BasicPattern(_)));
    }

    #[test]
    fn test_comparators_concatenate_in_order() {
        let left = sorted(OpResult::identity(), "a");
        let right = sorted(pattern("p"), "b");

        for result in [left.clone().join(right.clone(), true), left.union(right)] {
            let variables: Vec<_> = result
                .order_comparators
                .iter()
                .map(|c| match &c.expression {
                    Expression::Term(term) => term.to_string(),
                    other => format!("{other:?}"),
                })
                .collect();
            assert_eq!(variables, vec!["?a", "?b"]);
        }
    }

    #[test]
    fn test_union_always_wraps() {
        let result = OpResult::identity().union(OpResult::identity());
        assert!(matches!(result.op, LogicalOperator::Union(_)));
    }

    #[test]
    fn test_node_result_merge() {
        let mut previous = NodeResult::new(Term::variable("0"), pattern("p"));
        previous.secondary_nodes.insert(Term::variable("2"));
        let mut next = NodeResult::new(Term::variable("1"), pattern("q"));
        next.secondary_nodes.insert(Term::variable("3"));

        let merged = next.merge(previous, |a, b| a.join(b, true));
        assert_eq!(
            merged.all_nodes().iter().cloned().collect::<Vec<_>>(),
            vec![
                Term::variable("1"),
                Term::variable("0"),
                Term::variable("3"),
                Term::variable("2"),
            ]
        );

        let predicates: Vec<_> = merged
            .op_result
            .op
            .triples()
            .into_iter()
            .map(|t| t.predicate.clone())
            .collect();
        assert_eq!(
            predicates,
            vec![
                Predicate::Term(Term::iri("p")),
                Predicate::Term(Term::iri("q")),
            ]
        );
    }

    #[test]
    fn test_without_operator() {
        let result = NodeResult::new(Term::variable("0"), sorted(pattern("p"), "0"));
        let bare = result.without_operator();
        assert_eq!(bare.primary_nodes, result.primary_nodes);
        assert_eq!(bare.op_result, OpResult::identity());
    }
}
