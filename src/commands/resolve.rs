use anyhow::{Context, Result};
use log::debug;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::application::{ResolveAction, ResolveRequest};
use crate::closure::ResolverOptions;
use crate::dump::parse_name_list;
use crate::report::{OutputFormat, render};
use crate::runtime::Runtime;

use super::config::Config;
use super::output::emit;

/// Inputs of the `resolve` command.
#[derive(Debug, Clone, Default)]
pub struct ResolveArgs {
    pub must_haves: Vec<String>,
    /// File with one must-have name per line, merged with `must_haves`.
    pub must_have_file: Option<PathBuf>,
    pub unused: bool,
    pub ignore_prefixes: Vec<String>,
    pub max_hops: usize,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Resolve the closure of the requested must-haves and print the report.
///
/// Returns whether the result is fully resolved; deciding what that means
/// for the exit status is up to the caller.
#[tracing::instrument(skip(runtime, dump_root, args))]
pub fn resolve<R: Runtime>(
    runtime: R,
    dump_root: Option<PathBuf>,
    args: ResolveArgs,
) -> Result<bool> {
    let config = Config::new(runtime, dump_root)?;

    let mut must_haves: BTreeSet<String> = args.must_haves.into_iter().collect();
    if let Some(path) = &args.must_have_file {
        let content = config
            .runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read must-have file {:?}", path))?;
        must_haves.extend(parse_name_list(&content));
    }
    debug!("Resolving {} must-have package(s)", must_haves.len());

    let request = ResolveRequest {
        must_haves,
        report_unused: args.unused,
        options: ResolverOptions {
            max_hops: args.max_hops,
            ignored_prefixes: args.ignore_prefixes,
        },
    };
    let result = ResolveAction::new(&config.runtime, config.dump_root.clone()).run(&request)?;

    let report = render(&result, args.format)?;
    emit(&config.runtime, args.output.as_deref(), &report)?;

    Ok(result.is_fully_resolved())
}
