//! Query plan representation.
//!
//! The plan is a SPARQL-style algebra: basic triple patterns combined by
//! joins and unions, narrowed by filters, grouped, and finally sorted,
//! projected and deduplicated. Every compiled [`Query`] has the shape
//! `Distinct(Project(OrderBy(..)))`.

use std::fmt;

use quarry_core::AggregateFunction;

/// XML Schema datatype IRI for doubles.
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

/// XML Schema datatype IRI for integers.
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

/// A compiled query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The root operator of the plan.
    pub root: LogicalOperator,
}

impl Query {
    /// Creates a new query with the given root operator.
    pub fn new(root: LogicalOperator) -> Self {
        Self { root }
    }

    /// Returns the projected variables.
    pub fn variables(&self) -> &[String] {
        match &self.root {
            LogicalOperator::Distinct(distinct) => match distinct.input.as_ref() {
                LogicalOperator::Project(project) => project.variables.as_slice(),
                _ => &[],
            },
            _ => &[],
        }
    }
}

/// An RDF term: the subject or object of a triple, or an expression operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A variable to bind, without the leading `?`.
    Variable(String),
    /// A constant IRI.
    Iri(String),
    /// A constant literal.
    Literal(Literal),
}

impl Term {
    /// Creates a variable term.
    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    /// Creates an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Returns the variable name if this term is a variable.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Term::Variable(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "?{name}"),
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Literal(literal) => literal.fmt(f),
        }
    }
}

/// An RDF literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// A plain string.
    Plain(String),
    /// A value with a datatype IRI.
    Typed {
        /// Lexical form.
        value: String,
        /// Datatype IRI.
        datatype: String,
    },
    /// A string with a language tag.
    LanguageTagged {
        /// Lexical form.
        value: String,
        /// Language tag, e.g. `en`.
        language: String,
    },
}

impl Literal {
    /// Creates an `xsd:double` literal.
    pub fn double(value: f64) -> Self {
        Literal::Typed {
            value: format!("{value:?}"),
            datatype: XSD_DOUBLE.to_string(),
        }
    }

    /// Creates an `xsd:integer` literal, e.g. for a backend's node labels.
    pub fn integer(value: i64) -> Self {
        Literal::Typed {
            value: value.to_string(),
            datatype: XSD_INTEGER.to_string(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Plain(value) => write!(f, "{value:?}"),
            Literal::Typed { value, datatype } => write!(f, "{value:?}^^<{datatype}>"),
            Literal::LanguageTagged { value, language } => write!(f, "{value:?}@{language}"),
        }
    }
}

/// The predicate position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// A single term, usually an IRI.
    Term(Term),
    /// A property path.
    Path(PropertyPath),
}

/// A SPARQL property path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    /// A single predicate IRI.
    Iri(String),
    /// `^path`.
    Inverse(Box<PropertyPath>),
    /// `a / b`.
    Sequence(Box<PropertyPath>, Box<PropertyPath>),
    /// `a | b`.
    Alternative(Box<PropertyPath>, Box<PropertyPath>),
    /// `path*`.
    ZeroOrMore(Box<PropertyPath>),
    /// `path+`.
    OneOrMore(Box<PropertyPath>),
    /// `path?`.
    ZeroOrOne(Box<PropertyPath>),
}

/// A subject-predicate-object pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject.
    pub subject: Term,
    /// Predicate.
    pub predicate: Predicate,
    /// Object.
    pub object: Term,
}

/// An expression used by filters, sort keys and aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A term reference.
    Term(Term),

    /// Binary operation.
    Binary {
        /// Left operand.
        left: Box<Expression>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expression>,
    },

    /// Function call, e.g. `YEAR(?date)`.
    FunctionCall {
        /// Function name or IRI.
        name: String,
        /// Arguments.
        args: Vec<Expression>,
    },
}

impl Expression {
    /// Creates a binary expression.
    pub fn binary(left: Expression, op: BinaryOp, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Binary operator.
///
/// The compiler itself emits `Eq`, `Le` and `Ge`. The other operators are
/// for backends that rewrite expressions in `prepare_left_expression` or
/// wrap the plan in `prepare_operator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Equality comparison (=).
    Eq,
    /// Inequality comparison (!=).
    Ne,
    /// Less than (<).
    Lt,
    /// Less than or equal (<=).
    Le,
    /// Greater than (>).
    Gt,
    /// Greater than or equal (>=).
    Ge,
    /// Logical AND.
    And,
    /// Logical OR.
    Or,
}

/// An aggregate computed by a [`GroupOp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateExpr {
    /// Aggregate function.
    pub function: AggregateFunction,
    /// Expression to aggregate.
    pub expression: Expression,
    /// Whether to use DISTINCT.
    pub distinct: bool,
    /// Join string, only set for `GROUP_CONCAT`.
    pub separator: Option<String>,
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
}

/// A sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderComparator {
    /// Sort order.
    pub order: SortOrder,
    /// Expression to sort by.
    pub expression: Expression,
}

/// An operator in the query plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// The single empty solution; neutral element of join.
    Identity,

    /// A flat list of triple patterns.
    BasicPattern(BasicPatternOp),

    /// Join two inputs on their shared variables.
    Join(JoinOp),

    /// Union of two result sets.
    Union(UnionOp),

    /// Filter rows based on a predicate.
    Filter(FilterOp),

    /// Group rows and compute aggregates.
    Group(GroupOp),

    /// Sort results.
    OrderBy(OrderByOp),

    /// Project specific variables.
    Project(ProjectOp),

    /// Remove duplicate results.
    Distinct(DistinctOp),
}

/// A flat list of triple patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicPatternOp {
    /// The triples, all of which must match.
    pub triples: Vec<Triple>,
}

/// Join two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOp {
    /// Left input.
    pub left: Box<LogicalOperator>,
    /// Right input.
    pub right: Box<LogicalOperator>,
}

/// Union of two result sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionOp {
    /// Left input.
    pub left: Box<LogicalOperator>,
    /// Right input.
    pub right: Box<LogicalOperator>,
}

/// Filter rows based on a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOp {
    /// The filter predicate.
    pub predicate: Expression,
    /// Input operator.
    pub input: Box<LogicalOperator>,
}

/// Group rows and compute aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOp {
    /// Variables to group by.
    pub group_by: Vec<String>,
    /// Aggregates keyed by the variable they are bound to, in binding order.
    pub aggregates: Vec<(String, AggregateExpr)>,
    /// Input operator.
    pub input: Box<LogicalOperator>,
}

/// Sort results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByOp {
    /// Sort keys. Empty means the input order is kept.
    pub comparators: Vec<OrderComparator>,
    /// Input operator.
    pub input: Box<LogicalOperator>,
}

/// Project specific variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOp {
    /// Variables to keep, without the leading `?`.
    pub variables: Vec<String>,
    /// Input operator.
    pub input: Box<LogicalOperator>,
}

/// Remove duplicate results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinctOp {
    /// Input operator.
    pub input: Box<LogicalOperator>,
}

impl LogicalOperator {
    /// Returns `true` for the neutral [`LogicalOperator::Identity`].
    ///
    /// Lets a `prepare_operator` hook skip wrapping an empty plan.
    pub fn is_identity(&self) -> bool {
        matches!(self, LogicalOperator::Identity)
    }

    /// Wraps `input` as `Distinct(Project(variables, OrderBy(input, comparators)))`.
    pub fn distinct_project_order_by(
        input: LogicalOperator,
        variables: Vec<String>,
        comparators: Vec<OrderComparator>,
    ) -> Self {
        LogicalOperator::Distinct(DistinctOp {
            input: Box::new(LogicalOperator::Project(ProjectOp {
                variables,
                input: Box::new(LogicalOperator::OrderBy(OrderByOp {
                    comparators,
                    input: Box::new(input),
                })),
            })),
        })
    }

    /// Returns every triple in the tree, depth first, left to right.
    pub fn triples(&self) -> Vec<&Triple> {
        let mut triples = Vec::new();
        self.collect_triples(&mut triples);
        triples
    }

    fn collect_triples<'a>(&'a self, triples: &mut Vec<&'a Triple>) {
        match self {
            LogicalOperator::Identity => {}
            LogicalOperator::BasicPattern(pattern) => triples.extend(&pattern.triples),
            LogicalOperator::Join(JoinOp { left, right })
            | LogicalOperator::Union(UnionOp { left, right }) => {
                left.collect_triples(triples);
                right.collect_triples(triples);
            }
            LogicalOperator::Filter(FilterOp { input, .. })
            | LogicalOperator::Group(GroupOp { input, .. })
            | LogicalOperator::OrderBy(OrderByOp { input, .. })
            | LogicalOperator::Project(ProjectOp { input, .. })
            | LogicalOperator::Distinct(DistinctOp { input }) => input.collect_triples(triples),
        }
    }
}
