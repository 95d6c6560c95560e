use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::link::{LinkTable, PathResolver, ResolutionOutcome};
use crate::package::PackageGraph;

static NO_PROVIDERS: BTreeSet<String> = BTreeSet::new();

/// A provision that could not be indexed because its path did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedProvision {
    pub package: String,
    pub capability: String,
    pub outcome: ResolutionOutcome,
}

/// Read-only map from capability identifier to the packages providing it.
///
/// Path-shaped provisions and owned files are stored under their canonical
/// path, so two symlink aliases of one file index as the same capability.
/// Every provider is kept; choosing among them is left to the caller.
#[derive(Debug, Clone, Default)]
pub struct CapabilityIndex {
    providers: HashMap<String, BTreeSet<String>>,
    dropped: Vec<DroppedProvision>,
}

impl CapabilityIndex {
    /// Build the index from every package's provisions and owned files.
    pub fn build(graph: &PackageGraph, links: &LinkTable) -> Self {
        Self::build_with(graph, &PathResolver::new(links))
    }

    /// Build the index using an already configured resolver.
    #[tracing::instrument(skip_all, fields(packages = graph.len()))]
    pub fn build_with(graph: &PackageGraph, resolver: &PathResolver<'_>) -> Self {
        // Canonicalization is pure, so packages are processed in parallel and
        // merged afterwards in graph order.
        let per_package: Vec<Vec<Result<String, DroppedProvision>>> = graph
            .packages()
            .par_iter()
            .map(|package| {
                package
                    .provides
                    .iter()
                    .chain(package.files.iter())
                    .map(|capability| {
                        resolver
                            .canonicalize(capability)
                            .map(|c| c.into_owned())
                            .map_err(|outcome| DroppedProvision {
                                package: package.name.clone(),
                                capability: capability.clone(),
                                outcome,
                            })
                    })
                    .collect()
            })
            .collect();

        let mut index = CapabilityIndex::default();
        for (package, entries) in graph.packages().iter().zip(per_package) {
            for entry in entries {
                match entry {
                    Ok(capability) => {
                        index
                            .providers
                            .entry(capability)
                            .or_default()
                            .insert(package.name.clone());
                    }
                    Err(dropped) => {
                        warn!(
                            "Dropping provision {} of {}: {}",
                            dropped.capability, dropped.package, dropped.outcome
                        );
                        index.dropped.push(dropped);
                    }
                }
            }
        }

        debug!(
            "Indexed {} capabilities, dropped {} provisions",
            index.providers.len(),
            index.dropped.len()
        );
        index
    }

    /// Packages providing `capability`, which must already be in canonical
    /// form. Empty if nothing provides it.
    pub fn providers(&self, capability: &str) -> &BTreeSet<String> {
        self.providers.get(capability).unwrap_or(&NO_PROVIDERS)
    }

    pub fn is_provided(&self, capability: &str) -> bool {
        self.providers.contains_key(capability)
    }

    /// Provisions that were left out of the index.
    pub fn dropped(&self) -> &[DroppedProvision] {
        &self.dropped
    }

    /// Number of distinct capabilities indexed.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
