//! Application layer - Use cases that coordinate the dump loader and the
//! resolution core.
//!
//! This layer sits between the CLI commands and the pure resolution types.
//! Each action owns the I/O for its use case and returns plain values.

mod query;
mod resolve;
mod scan;

pub use query::{ProviderLookup, QueryAction};
pub use resolve::{ResolveAction, ResolveRequest};
pub use scan::ScanLinksAction;
