//! Resolve action - loads a dump and computes the requirement closure.

use anyhow::{Result, bail};
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::capability::CapabilityIndex;
use crate::closure::{ClosureResolver, RequirementsResult, ResolverOptions};
use crate::dump::DumpRepository;
use crate::link::PathResolver;
use crate::runtime::Runtime;

/// What to resolve and how.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    pub must_haves: BTreeSet<String>,
    /// Report installed packages outside the closure.
    pub report_unused: bool,
    pub options: ResolverOptions,
}

pub struct ResolveAction<'a, R: Runtime> {
    dump: DumpRepository<'a, R>,
}

impl<'a, R: Runtime> ResolveAction<'a, R> {
    pub fn new(runtime: &'a R, dump_root: PathBuf) -> Self {
        Self {
            dump: DumpRepository::new(runtime, dump_root),
        }
    }

    #[tracing::instrument(skip(self, request))]
    pub fn run(&self, request: &ResolveRequest) -> Result<RequirementsResult> {
        let dump = self.dump.load()?;

        let paths = PathResolver::new(&dump.links).with_max_hops(request.options.max_hops);
        let index = CapabilityIndex::build_with(&dump.graph, &paths);
        if !index.dropped().is_empty() {
            debug!("{} provision(s) were not indexed", index.dropped().len());
        }

        let installed = request.report_unused.then(|| dump.installed_set());
        if request.report_unused && dump.installed.is_empty() {
            bail!(
                "Cannot report unused packages: {:?} lists no packages",
                self.dump.installed_path()
            );
        }

        let resolver = ClosureResolver::with_options(
            &dump.graph,
            &index,
            &dump.links,
            request.options.clone(),
        );
        let result = resolver.resolve(&request.must_haves, installed.as_ref())?;

        info!(
            "Resolved {} must-have(s) to {} package(s)",
            request.must_haves.len(),
            result.required_packages().len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::ConfigurationError;
    use crate::runtime::RealRuntime;
    use std::fs;

    fn write_dump(root: &std::path::Path) {
        fs::create_dir_all(root.join("requires")).unwrap();
        fs::create_dir_all(root.join("provides")).unwrap();
        fs::write(root.join("installed.txt"), "app\nlibfoo\nbash\nvim\n").unwrap();
        fs::write(root.join("requires/app.txt"), "libfoo.so.1\n/bin/sh\nrpmlib(PayloadIsZstd)\n").unwrap();
        fs::write(root.join("provides/libfoo.txt"), "libfoo.so.1\n").unwrap();
        fs::write(root.join("provides/bash.txt"), "/usr/bin/bash\n").unwrap();
        fs::write(root.join("links.txt"), "/bin/sh -> ../usr/bin/bash\n").unwrap();
    }

    fn request(must_haves: &[&str]) -> ResolveRequest {
        ResolveRequest {
            must_haves: must_haves.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_from_dump() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(dir.path());

        let mut request = request(&["app"]);
        request.report_unused = true;
        request.options.ignored_prefixes = vec!["rpmlib(".into()];

        let action = ResolveAction::new(&RealRuntime, dir.path().to_path_buf());
        let result = action.run(&request).unwrap();

        let required: Vec<&str> = result.required_packages().iter().map(String::as_str).collect();
        assert_eq!(required, vec!["app", "bash", "libfoo"]);
        assert!(result.is_fully_resolved());
        assert_eq!(
            result.installed_but_not_required(),
            Some(&BTreeSet::from(["vim".to_string()]))
        );
    }

    #[test]
    fn test_resolve_reports_unmatched_requirement() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(dir.path());

        let action = ResolveAction::new(&RealRuntime, dir.path().to_path_buf());
        let result = action.run(&request(&["app"])).unwrap();

        assert!(!result.is_fully_resolved());
        assert!(result.unresolved_requirements()["app"].contains("rpmlib(PayloadIsZstd)"));
    }

    #[test]
    fn test_resolve_without_must_haves() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(dir.path());

        let action = ResolveAction::new(&RealRuntime, dir.path().to_path_buf());
        let err = action.run(&request(&[])).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::EmptyMustHaves)
        );
    }

    #[test]
    fn test_resolve_empty_dump() {
        let dir = tempfile::tempdir().unwrap();

        let action = ResolveAction::new(&RealRuntime, dir.path().to_path_buf());
        let err = action.run(&request(&["bash"])).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::EmptyGraph)
        );
    }
}
