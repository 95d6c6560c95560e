//! Requirement closure over a package graph.
//!
//! # Usage
//! 1. Build a [`crate::capability::CapabilityIndex`] from the graph and link table.
//! 1. Create a [`ClosureResolver`] over the graph, index and link table.
//! 1. [`ClosureResolver::resolve()`] with the must-have package names, and
//!    optionally the full installed list, to get a [`RequirementsResult`].
//!
//! Unsatisfiable requirements and unknown must-have names never abort a run;
//! they are collected in the result. Only a [`ConfigurationError`] does.

mod error;
mod resolver;
mod result;

pub use error::ConfigurationError;
pub use resolver::{ClosureResolver, MUST_HAVE_PSEUDO_PACKAGE, ResolverOptions};
pub use result::{RequirementsResult, ResultSummary};
