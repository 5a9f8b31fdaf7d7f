//! Query compilation pipeline.
//!
//! - **Plan**: The SPARQL-style operator algebra produced by compilation
//! - **Backend**: Domain capability mapping graph labels into the algebra
//! - **Result**: Intermediate results and the join/union rules
//! - **Compiler**: Single-pass, memoized lowering of question graphs

pub mod backend;
pub mod compiler;
pub mod plan;
pub mod result;

pub use backend::{Backend, BackendEdge, BackendNode, NodeContext};
pub use compiler::QueryCompiler;
pub use plan::{LogicalOperator, Query};
pub use result::{NodeResult, OpResult};
