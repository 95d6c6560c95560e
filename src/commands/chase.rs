use anyhow::Result;
use std::path::PathBuf;

use crate::application::QueryAction;
use crate::report::render_outcome;
use crate::runtime::Runtime;

use super::config::Config;

/// Print where `path` ends up after following the dump's symlinks.
#[tracing::instrument(skip(runtime, dump_root))]
pub fn chase<R: Runtime>(
    runtime: R,
    dump_root: Option<PathBuf>,
    path: &str,
    max_hops: usize,
) -> Result<()> {
    let config = Config::new(runtime, dump_root)?;
    let action = QueryAction::new(&config.runtime, config.dump_root.clone(), max_hops);

    let outcome = action.chase(path)?;
    print!("{}", render_outcome(path, &outcome));
    Ok(())
}
