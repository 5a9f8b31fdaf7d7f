//! Common test ontology for compiler tests.
//!
//! Variables are numbered by a counter in [`TestEnvironment`], so expected
//! plans can name them `?0`, `?1`, and so on in creation order.

#![allow(dead_code)]

use std::cell::Cell;

use quarry_core::{Environment, Node};
use quarry_engine::query::plan::{
    BasicPatternOp, Expression, JoinOp, Literal, LogicalOperator, Predicate, Term, Triple,
    UnionOp, XSD_DOUBLE,
};
use quarry_engine::{Backend, QueryCompiler};

/// Node labels of the test domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TestNodeLabel {
    /// A variable with its creation number.
    Variable(usize),
    /// A class or entity IRI.
    Item(String),
    /// A string literal.
    String(String),
    /// A number, stored in its canonical lexical form.
    Number(String),
}

/// Edge labels of the test domain, compiled to IRIs of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestEdgeLabel(pub &'static str);

pub type TestNode = Node<TestNodeLabel, TestEdgeLabel>;

/// Mints `Variable(0)`, `Variable(1)`, ...
#[derive(Debug, Default)]
pub struct TestEnvironment {
    count: Cell<usize>,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Environment for TestEnvironment {
    type NodeLabel = TestNodeLabel;
    type EdgeLabel = TestEdgeLabel;

    fn new_node(&self) -> TestNode {
        let id = self.count.get();
        self.count.set(id + 1);
        Node::new(TestNodeLabel::Variable(id))
    }
}

/// Backend with no hooks.
#[derive(Debug, Default)]
pub struct TestBackend;

impl Backend for TestBackend {
    type NodeLabel = TestNodeLabel;
    type EdgeLabel = TestEdgeLabel;
    type Env = TestEnvironment;

    fn compile_node_label(&self, label: &TestNodeLabel, _env: &TestEnvironment) -> Term {
        match label {
            TestNodeLabel::Variable(id) => Term::variable(id.to_string()),
            TestNodeLabel::Item(name) => Term::iri(name.clone()),
            TestNodeLabel::String(value) => Term::Literal(Literal::Plain(value.clone())),
            TestNodeLabel::Number(value) => Term::Literal(Literal::Typed {
                value: value.clone(),
                datatype: XSD_DOUBLE.to_string(),
            }),
        }
    }

    fn compile_edge_label(&self, label: &TestEdgeLabel, _env: &TestEnvironment) -> Predicate {
        Predicate::Term(Term::iri(label.0))
    }
}

pub const IS_A: TestEdgeLabel = TestEdgeLabel("isA");
pub const HAS_NAME: TestEdgeLabel = TestEdgeLabel("hasName");
pub const HAS_CAST_MEMBER: TestEdgeLabel = TestEdgeLabel("hasCastMember");
pub const HAS_SPOUSE: TestEdgeLabel = TestEdgeLabel("hasSpouse");
pub const HAS_ELEVATION: TestEdgeLabel = TestEdgeLabel("hasElevation");
pub const HAS_PLACE_OF_BIRTH: TestEdgeLabel = TestEdgeLabel("hasPlaceOfBirth");
pub const HAS_PLACE_OF_DEATH: TestEdgeLabel = TestEdgeLabel("hasPlaceOfDeath");
pub const HAS_CHILD: TestEdgeLabel = TestEdgeLabel("hasChild");
pub const HAS_DATE_OF_BIRTH: TestEdgeLabel = TestEdgeLabel("hasDateOfBirth");
pub const IS_LOCATED_IN: TestEdgeLabel = TestEdgeLabel("isLocatedIn");
pub const ATTENDS: TestEdgeLabel = TestEdgeLabel("attends");
pub const HAS_POPULATION: TestEdgeLabel = TestEdgeLabel("hasPopulation");
pub const DISCOVERED: TestEdgeLabel = TestEdgeLabel("discovered");

/// A class or entity node.
pub fn item(name: &str) -> TestNode {
    Node::new(TestNodeLabel::Item(name.to_string()))
}

/// A string literal node.
pub fn string(value: &str) -> TestNode {
    Node::new(TestNodeLabel::String(value.to_string()))
}

/// A number literal node.
pub fn number(value: f64) -> TestNode {
    Node::new(TestNodeLabel::Number(format!("{value:?}")))
}

/// Shorthands for the edges most questions start with.
pub trait TestNodeExt {
    fn is_a(self, class: &str) -> Self;
    fn has_name(self, name: &str) -> Self;
}

impl TestNodeExt for TestNode {
    fn is_a(self, class: &str) -> Self {
        self.outgoing(IS_A, item(class))
    }

    fn has_name(self, name: &str) -> Self {
        self.outgoing(HAS_NAME, string(name))
    }
}

pub fn compiler() -> QueryCompiler<TestBackend> {
    init_tracing();
    QueryCompiler::new(TestEnvironment::new(), TestBackend)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn var(name: &str) -> Term {
    Term::variable(name)
}

pub fn iri(name: &str) -> Term {
    Term::iri(name)
}

pub fn plain(value: &str) -> Term {
    Term::Literal(Literal::Plain(value.to_string()))
}

pub fn double(value: f64) -> Term {
    Term::Literal(Literal::double(value))
}

pub fn triple(subject: Term, predicate: &str, object: Term) -> Triple {
    Triple {
        subject,
        predicate: Predicate::Term(Term::iri(predicate)),
        object,
    }
}

pub fn bgp(triples: Vec<Triple>) -> LogicalOperator {
    LogicalOperator::BasicPattern(BasicPatternOp { triples })
}

pub fn join(left: LogicalOperator, right: LogicalOperator) -> LogicalOperator {
    LogicalOperator::Join(JoinOp {
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn union(left: LogicalOperator, right: LogicalOperator) -> LogicalOperator {
    LogicalOperator::Union(UnionOp {
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn term(term: Term) -> Expression {
    Expression::Term(term)
}

/// The operator under the final `Distinct(Project(OrderBy(..)))` wrapper.
pub fn body(root: &LogicalOperator) -> &LogicalOperator {
    let LogicalOperator::Distinct(distinct) = root else {
        panic!("Expected Distinct, got {root:?}");
    };
    let LogicalOperator::Project(project) = distinct.input.as_ref() else {
        panic!("Expected Project");
    };
    let LogicalOperator::OrderBy(order_by) = project.input.as_ref() else {
        panic!("Expected OrderBy");
    };
    order_by.input.as_ref()
}

/// Debug renderings of all triples, sorted, for order-insensitive comparison.
pub fn sorted_triples(op: &LogicalOperator) -> Vec<String> {
    let mut triples: Vec<_> = op.triples().into_iter().map(|t| format!("{t:?}")).collect();
    triples.sort();
    triples
}

/// Counts operators of a kind anywhere in the tree.
pub fn count_ops(op: &LogicalOperator, matches: &dyn Fn(&LogicalOperator) -> bool) -> usize {
    let own = usize::from(matches(op));
    own + match op {
        LogicalOperator::Identity | LogicalOperator::BasicPattern(_) => 0,
        LogicalOperator::Join(JoinOp { left, right })
        | LogicalOperator::Union(UnionOp { left, right }) => {
            count_ops(left, matches) + count_ops(right, matches)
        }
        LogicalOperator::Filter(op) => count_ops(&op.input, matches),
        LogicalOperator::Group(op) => count_ops(&op.input, matches),
        LogicalOperator::OrderBy(op) => count_ops(&op.input, matches),
        LogicalOperator::Project(op) => count_ops(&op.input, matches),
        LogicalOperator::Distinct(op) => count_ops(&op.input, matches),
    }
}
