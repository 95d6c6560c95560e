//! Query actions - single lookups against a dump.

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::capability::CapabilityIndex;
use crate::dump::DumpRepository;
use crate::link::{PathResolver, ResolutionOutcome};
use crate::runtime::Runtime;

/// Answer to a providers query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderLookup {
    /// The capability's canonical form and whoever provides it (possibly nobody).
    Found {
        canonical: String,
        providers: BTreeSet<String>,
    },
    /// A path-shaped capability whose symlink chain does not resolve.
    Unreachable(ResolutionOutcome),
}

pub struct QueryAction<'a, R: Runtime> {
    dump: DumpRepository<'a, R>,
    max_hops: usize,
}

impl<'a, R: Runtime> QueryAction<'a, R> {
    pub fn new(runtime: &'a R, dump_root: PathBuf, max_hops: usize) -> Self {
        Self {
            dump: DumpRepository::new(runtime, dump_root),
            max_hops,
        }
    }

    /// Chase one path through the dump's link table.
    #[tracing::instrument(skip(self))]
    pub fn chase(&self, path: &str) -> Result<ResolutionOutcome> {
        self.dump.ensure_root()?;
        let links = self.dump.load_links()?;
        Ok(PathResolver::new(&links)
            .with_max_hops(self.max_hops)
            .resolve(path))
    }

    /// Look up the providers of one capability.
    #[tracing::instrument(skip(self))]
    pub fn providers(&self, capability: &str) -> Result<ProviderLookup> {
        let dump = self.dump.load()?;
        let paths = PathResolver::new(&dump.links).with_max_hops(self.max_hops);

        let canonical = match paths.canonicalize(capability) {
            Ok(canonical) => canonical.into_owned(),
            Err(outcome) => return Ok(ProviderLookup::Unreachable(outcome)),
        };
        let index = CapabilityIndex::build_with(&dump.graph, &paths);
        Ok(ProviderLookup::Found {
            providers: index.providers(&canonical).clone(),
            canonical,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::DEFAULT_MAX_HOPS;
    use crate::runtime::{MockRuntime, RealRuntime};
    use mockall::predicate::eq;

    fn mock_dump(runtime: &mut MockRuntime, links: &'static str) {
        let root = PathBuf::from("/dump");

        runtime
            .expect_is_dir()
            .with(eq(root.clone()))
            .returning(|_| true);
        runtime.expect_is_dir().returning(|_| false);

        // installed.txt, links.txt and listing dirs exist; per-package files
        // other than provides/ do not
        for present in ["installed.txt", "links.txt", "provides", "provides/bash.txt", "provides/dash.txt"] {
            runtime
                .expect_exists()
                .with(eq(root.join(present)))
                .returning(|_| true);
        }
        runtime.expect_exists().returning(|_| false);

        runtime
            .expect_read_to_string()
            .with(eq(root.join("installed.txt")))
            .returning(|_| Ok("bash\ndash\n".to_string()));
        runtime
            .expect_read_to_string()
            .with(eq(root.join("links.txt")))
            .returning(move |_| Ok(links.to_string()));
        runtime
            .expect_read_to_string()
            .with(eq(root.join("provides/bash.txt")))
            .returning(|_| Ok("/usr/bin/bash\nsh\n".to_string()));
        runtime
            .expect_read_to_string()
            .with(eq(root.join("provides/dash.txt")))
            .returning(|_| Ok("/usr/bin/dash\nsh\n".to_string()));
        runtime
            .expect_read_dir()
            .with(eq(root.join("provides")))
            .returning(|p| Ok(vec![p.join("bash.txt"), p.join("dash.txt")]));
    }

    #[test]
    fn test_providers_of_path() {
        let mut runtime = MockRuntime::new();
        mock_dump(&mut runtime, "/bin/sh -> /usr/bin/bash\n");

        let action = QueryAction::new(&runtime, PathBuf::from("/dump"), DEFAULT_MAX_HOPS);

        assert_eq!(
            action.providers("/bin/sh").unwrap(),
            ProviderLookup::Found {
                canonical: "/usr/bin/bash".into(),
                providers: BTreeSet::from(["bash".to_string()]),
            }
        );
    }

    #[test]
    fn test_providers_of_virtual_capability() {
        let mut runtime = MockRuntime::new();
        mock_dump(&mut runtime, "");

        let action = QueryAction::new(&runtime, PathBuf::from("/dump"), DEFAULT_MAX_HOPS);
        let ProviderLookup::Found { providers, .. } = action.providers("sh").unwrap() else {
            panic!("Expected providers for sh");
        };

        assert_eq!(providers.len(), 2);
    }

    #[test]
    fn test_providers_of_circular_path() {
        let mut runtime = MockRuntime::new();
        mock_dump(&mut runtime, "/a -> /b\n/b -> /a\n");

        let action = QueryAction::new(&runtime, PathBuf::from("/dump"), DEFAULT_MAX_HOPS);

        assert!(matches!(
            action.providers("/a").unwrap(),
            ProviderLookup::Unreachable(ResolutionOutcome::Circular { .. })
        ));
    }

    #[test]
    fn test_chase() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_is_dir()
            .with(eq(PathBuf::from("/dump")))
            .returning(|_| true);
        runtime
            .expect_exists()
            .with(eq(PathBuf::from("/dump/links.txt")))
            .returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(PathBuf::from("/dump/links.txt")))
            .returning(|_| Ok("/p0 -> /p1\n/p1 -> /p2\n".to_string()));

        let action = QueryAction::new(&runtime, PathBuf::from("/dump"), 1);

        assert!(matches!(
            action.chase("/p0").unwrap(),
            ResolutionOutcome::Unresolved { .. }
        ));
        assert_eq!(action.chase("/p1").unwrap().canonical(), Some("/p2"));
    }

    #[test]
    fn test_chase_in_missing_dump_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let action = QueryAction::new(&RealRuntime, dir.path().join("absent"), DEFAULT_MAX_HOPS);

        let err = action.chase("/bin/sh").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
