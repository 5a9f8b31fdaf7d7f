//! # Quarry
//!
//! Lowers question graphs into a SPARQL-style query algebra.
//!
//! A producer (usually a natural-language front end) builds a question graph
//! out of [`Node`]s, [`Edge`]s and [`Filter`]s, minting its unknowns from an
//! [`Environment`]. A [`QueryCompiler`] then turns the graph into a [`Query`]:
//! a `Distinct(Project(OrderBy(..)))` plan over triple patterns, joins,
//! unions, filters and grouped aggregates. Everything domain specific (how
//! labels become IRIs, literals and variables) lives behind a [`Backend`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::Cell;
//!
//! use quarry::plan::{Predicate, Term};
//! use quarry::{Backend, Environment, Node, QueryCompiler};
//!
//! // Unknowns are labelled `?0`, `?1`, ...
//! #[derive(Default)]
//! struct Variables(Cell<usize>);
//!
//! impl Environment for Variables {
//!     type NodeLabel = String;
//!     type EdgeLabel = String;
//!
//!     fn new_node(&self) -> Node<String, String> {
//!         let id = self.0.get();
//!         self.0.set(id + 1);
//!         Node::new(format!("?{id}"))
//!     }
//! }
//!
//! // Everything else is an IRI.
//! struct Iris;
//!
//! impl Backend for Iris {
//!     type NodeLabel = String;
//!     type EdgeLabel = String;
//!     type Env = Variables;
//!
//!     fn compile_node_label(&self, label: &String, _env: &Variables) -> Term {
//!         match label.strip_prefix('?') {
//!             Some(name) => Term::variable(name),
//!             None => Term::iri(label.as_str()),
//!         }
//!     }
//!
//!     fn compile_edge_label(&self, label: &String, _env: &Variables) -> Predicate {
//!         Predicate::Term(Term::iri(label.as_str()))
//!     }
//! }
//!
//! let mut compiler = QueryCompiler::new(Variables::default(), Iris);
//!
//! // "Which persons are there?"
//! let person = compiler
//!     .env()
//!     .new_node()
//!     .outgoing("isA".to_string(), Node::new("person".to_string()));
//!
//! let query = compiler.compile_query(&person)?;
//! assert_eq!(query.variables(), ["0"]);
//! assert_eq!(query.root.triples().len(), 1);
//! # Ok::<(), quarry::Error>(())
//! ```
//!
//! ## Crates
//!
//! | Crate | Contents |
//! | ----- | -------- |
//! | `quarry-common` | [`OrderedSet`] and the [`Error`] type |
//! | `quarry-core` | The question graph and its combinators |
//! | `quarry-engine` | The plan algebra, [`Backend`] and [`QueryCompiler`] |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// Re-export the compiler API
pub use quarry_engine::{Backend, CompilerConfig, NodeContext, Query, QueryCompiler};

// Re-export the plan algebra as a module; most callers only pattern match on it
pub use quarry_engine::query::plan;

// Re-export the question graph types - you'll need these to build graphs
pub use quarry_core::{AggregateFunction, Connective, Edge, Environment, Filter, Node, Order};

// Re-export shared types
pub use quarry_common::{Error, OrderedSet, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_serializes_through_facade() {
        let graph: Node<&str, &str> =
            Node::new("?0").outgoing("isA", Node::new("planet")).ordered(Order::Ascending);

        let json = serde_json::to_value(&graph).unwrap();

        assert_eq!(json["type"], "node");
        assert_eq!(json["label"], "?0");
        assert_eq!(json["edge"]["subtype"], "outgoing");
    }

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert!(config.merge_basic_patterns);
        assert_eq!(config.group_concat_separator, "\u{1F}");
    }
}
