//! # quarry-common
//!
//! Foundation layer for Quarry: collections and error types shared by the
//! graph IR and the lowering engine.
//!
//! This crate has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`utils`] - Utility types (ordered sets, errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod utils;

// Re-export commonly used types at crate root
pub use utils::error::{Error, Result};
pub use utils::ordered_set::OrderedSet;
