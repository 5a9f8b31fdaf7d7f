//! Utility types used across Quarry.
//!
//! - [`ordered_set`] - Insertion-ordered, duplicate-free collection
//! - [`error`] - Error and result types

pub mod error;
pub mod ordered_set;
