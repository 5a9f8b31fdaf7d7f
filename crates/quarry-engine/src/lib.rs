//! # quarry-engine
//!
//! Lowers question graphs from `quarry-core` into a SPARQL-style query plan.
//!
//! A [`QueryCompiler`] is built from an [`Environment`](quarry_core::Environment)
//! and a [`Backend`]; each call to [`QueryCompiler::compile_query`] turns one
//! graph into a `Distinct(Project(OrderBy(..)))` [`Query`].
//!
//! ## Modules
//!
//! - [`config`] - Compiler options
//! - [`query`] - Plan algebra, backend capability, and the compiler

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod query;

pub use config::CompilerConfig;
pub use query::{Backend, NodeContext, Query, QueryCompiler};
