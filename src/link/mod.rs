//! Symlink tables and path canonicalization.
//!
//! A [`LinkTable`] records, for every symlink in an OS image, the single path
//! it points to. [`PathResolver`] follows those entries hop by hop until it
//! reaches a path that is not a link, detecting cycles along the way.

mod resolver;
mod table;

pub use resolver::{DEFAULT_MAX_HOPS, PathResolver, ResolutionOutcome, UnresolvedReason};
pub use table::{LINK_SEPARATOR, LinkTable};
