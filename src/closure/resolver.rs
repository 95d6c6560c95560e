use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::{ConfigurationError, RequirementsResult};
use crate::capability::CapabilityIndex;
use crate::link::{DEFAULT_MAX_HOPS, LinkTable, PathResolver};
use crate::package::{Package, PackageGraph, VersionConstraint};

/// Synthetic package under which must-have names missing from the graph are
/// reported as unresolved requirements.
///
/// The name is reserved: a graph containing a package of this name is
/// rejected with [`ConfigurationError::ReservedPackageName`].
pub const MUST_HAVE_PSEUDO_PACKAGE: &str = "(must-have)";

/// Tuning for a resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Hop budget for path-shaped requirements.
    pub max_hops: usize,
    /// Requirements starting with any of these prefixes are skipped
    /// entirely, e.g. `rpmlib(` for features the package manager itself
    /// satisfies.
    pub ignored_prefixes: Vec<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
            ignored_prefixes: Vec::new(),
        }
    }
}

impl ResolverOptions {
    fn is_ignored(&self, capability: &str) -> bool {
        self.ignored_prefixes
            .iter()
            .any(|prefix| capability.starts_with(prefix.as_str()))
    }
}

/// Computes which packages are transitively needed by a set of must-haves.
///
/// Edges go through capabilities: a requirement names a capability, and every
/// package providing it joins the closure. No single "best" provider is
/// chosen, so the closure is sound but may include alternatives.
#[derive(Debug, Clone)]
pub struct ClosureResolver<'a> {
    graph: &'a PackageGraph,
    index: &'a CapabilityIndex,
    paths: PathResolver<'a>,
    options: ResolverOptions,
}

impl<'a> ClosureResolver<'a> {
    pub fn new(graph: &'a PackageGraph, index: &'a CapabilityIndex, links: &'a LinkTable) -> Self {
        Self::with_options(graph, index, links, ResolverOptions::default())
    }

    pub fn with_options(
        graph: &'a PackageGraph,
        index: &'a CapabilityIndex,
        links: &'a LinkTable,
        options: ResolverOptions,
    ) -> Self {
        Self {
            graph,
            index,
            paths: PathResolver::new(links).with_max_hops(options.max_hops),
            options,
        }
    }

    /// Resolve the closure of `must_haves`.
    ///
    /// When `installed` is given, the result also lists installed packages
    /// outside the closure.
    #[tracing::instrument(skip_all, fields(must_haves = must_haves.len()))]
    pub fn resolve(
        &self,
        must_haves: &BTreeSet<String>,
        installed: Option<&BTreeSet<String>>,
    ) -> Result<RequirementsResult, ConfigurationError> {
        if self.graph.is_empty() {
            return Err(ConfigurationError::EmptyGraph);
        }
        if must_haves.is_empty() {
            return Err(ConfigurationError::EmptyMustHaves);
        }
        if self.graph.contains(MUST_HAVE_PSEUDO_PACKAGE) {
            return Err(ConfigurationError::ReservedPackageName(
                MUST_HAVE_PSEUDO_PACKAGE.to_string(),
            ));
        }

        let mut required = BTreeSet::<String>::new();
        let mut unresolved = UnresolvedLog::default();
        let mut queue = VecDeque::<&Package>::new();

        for name in must_haves {
            match self.graph.get(name) {
                Some(package) => {
                    if required.insert(name.clone()) {
                        queue.push_back(package);
                    }
                }
                None => {
                    warn!("Must-have package {} is not in the package graph", name);
                    unresolved.record(MUST_HAVE_PSEUDO_PACKAGE, name, &[]);
                }
            }
        }

        while let Some(package) = queue.pop_front() {
            debug!("Resolving requirements of {}", package.name);

            for capability in &package.requires {
                if self.options.is_ignored(capability) {
                    continue;
                }

                let providers = match self.paths.canonicalize(capability) {
                    Ok(canonical) => self.index.providers(&canonical),
                    Err(outcome) => {
                        debug!("Requirement {} of {}: {}", capability, package.name, outcome);
                        unresolved.record(
                            &package.name,
                            capability,
                            package.constraints_for(capability),
                        );
                        continue;
                    }
                };

                if providers.is_empty() {
                    debug!("Nothing provides {} (required by {})", capability, package.name);
                    unresolved.record(
                        &package.name,
                        capability,
                        package.constraints_for(capability),
                    );
                    continue;
                }

                for provider in providers {
                    if required.contains(provider) {
                        continue;
                    }
                    required.insert(provider.clone());
                    match self.graph.get(provider) {
                        Some(next) => queue.push_back(next),
                        None => {
                            warn!("Provider {} of {} has no package entry", provider, capability)
                        }
                    }
                }
            }
        }

        let installed_but_not_required =
            installed.map(|all| all.difference(&required).cloned().collect::<BTreeSet<_>>());

        let result =
            RequirementsResult::new(required, unresolved.requirements, installed_but_not_required)
                .with_unresolved_constraints(unresolved.constraints);
        let summary = result.summary();
        info!(
            "Closure has {} package(s); {} unresolved requirement(s) in {} package(s)",
            summary.required, summary.unresolved_requirements, summary.unresolved_packages
        );
        Ok(result)
    }
}

/// Unresolved requirements collected during one run.
#[derive(Default)]
struct UnresolvedLog {
    requirements: BTreeMap<String, BTreeSet<String>>,
    constraints: BTreeMap<String, BTreeMap<String, Vec<VersionConstraint>>>,
}

impl UnresolvedLog {
    fn record(&mut self, package: &str, capability: &str, constraints: &[VersionConstraint]) {
        self.requirements
            .entry(package.to_string())
            .or_default()
            .insert(capability.to_string());
        if !constraints.is_empty() {
            self.constraints
                .entry(package.to_string())
                .or_default()
                .insert(capability.to_string(), constraints.to_vec());
        }
    }
}
