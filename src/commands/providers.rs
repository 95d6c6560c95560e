use anyhow::Result;
use std::path::PathBuf;

use crate::application::{ProviderLookup, QueryAction};
use crate::report::{render_outcome, render_providers};
use crate::runtime::Runtime;

use super::config::Config;

/// Print the packages providing `capability`.
#[tracing::instrument(skip(runtime, dump_root))]
pub fn providers<R: Runtime>(
    runtime: R,
    dump_root: Option<PathBuf>,
    capability: &str,
    max_hops: usize,
) -> Result<()> {
    let config = Config::new(runtime, dump_root)?;
    let action = QueryAction::new(&config.runtime, config.dump_root.clone(), max_hops);

    match action.providers(capability)? {
        ProviderLookup::Found {
            canonical,
            providers,
        } => print!("{}", render_providers(capability, &canonical, &providers)),
        ProviderLookup::Unreachable(outcome) => print!("{}", render_outcome(capability, &outcome)),
    }
    Ok(())
}
