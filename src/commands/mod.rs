//! CLI command handlers. Each one builds a [`config::Config`], runs an
//! application action and prints the outcome.

mod chase;
pub mod config;
mod output;
mod providers;
mod resolve;
mod scan_links;

pub use chase::chase;
pub use providers::providers;
pub use resolve::{ResolveArgs, resolve};
pub use scan_links::scan_links;
