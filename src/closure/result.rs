use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::MUST_HAVE_PSEUDO_PACKAGE;
use crate::package::VersionConstraint;

/// Outcome of a closure resolution.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RequirementsResult {
    required_packages: BTreeSet<String>,
    /// Package name to the requirements of it that nothing provides.
    unresolved_requirements: BTreeMap<String, BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    installed_but_not_required: Option<BTreeSet<String>>,
    /// Version constraints written on unresolved requirements, by package
    /// and capability. Informational only.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    unresolved_constraints: BTreeMap<String, BTreeMap<String, Vec<VersionConstraint>>>,
}

/// Counts describing a [`RequirementsResult`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultSummary {
    pub required: usize,
    pub unresolved_packages: usize,
    pub unresolved_requirements: usize,
    pub invalid_seeds: usize,
    pub installed_but_not_required: Option<usize>,
}

impl RequirementsResult {
    pub(super) fn new(
        required_packages: BTreeSet<String>,
        unresolved_requirements: BTreeMap<String, BTreeSet<String>>,
        installed_but_not_required: Option<BTreeSet<String>>,
    ) -> Self {
        Self {
            required_packages,
            unresolved_requirements,
            installed_but_not_required,
            unresolved_constraints: BTreeMap::new(),
        }
    }

    pub(super) fn with_unresolved_constraints(
        mut self,
        constraints: BTreeMap<String, BTreeMap<String, Vec<VersionConstraint>>>,
    ) -> Self {
        self.unresolved_constraints = constraints;
        self
    }

    pub fn required_packages(&self) -> &BTreeSet<String> {
        &self.required_packages
    }

    pub fn unresolved_requirements(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.unresolved_requirements
    }

    /// Installed packages outside the closure, if the installed set was given.
    pub fn installed_but_not_required(&self) -> Option<&BTreeSet<String>> {
        self.installed_but_not_required.as_ref()
    }

    /// Constraints the requiring package wrote on an unresolved capability.
    pub fn constraints_for(&self, package: &str, capability: &str) -> &[VersionConstraint] {
        self.unresolved_constraints
            .get(package)
            .and_then(|by_capability| by_capability.get(capability))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required_packages.contains(name)
    }

    /// True when no required package has an unmet requirement and every
    /// must-have was found.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved_requirements.is_empty()
    }

    /// Must-have names that were not in the package graph.
    pub fn invalid_seeds(&self) -> Option<&BTreeSet<String>> {
        self.unresolved_requirements.get(MUST_HAVE_PSEUDO_PACKAGE)
    }

    /// Unmet capabilities mapped to the packages that need them.
    pub fn unresolved_by_capability(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut by_capability = BTreeMap::<&str, BTreeSet<&str>>::new();
        for (package, capabilities) in &self.unresolved_requirements {
            if package == MUST_HAVE_PSEUDO_PACKAGE {
                continue;
            }
            for capability in capabilities {
                by_capability
                    .entry(capability.as_str())
                    .or_default()
                    .insert(package.as_str());
            }
        }
        by_capability
    }

    pub fn summary(&self) -> ResultSummary {
        let invalid_seeds = self.invalid_seeds().map_or(0, BTreeSet::len);
        let unresolved_requirements = self
            .unresolved_requirements
            .iter()
            .filter(|(package, _)| package.as_str() != MUST_HAVE_PSEUDO_PACKAGE)
            .map(|(_, capabilities)| capabilities.len())
            .sum();
        let unresolved_packages =
            self.unresolved_requirements.len() - usize::from(invalid_seeds > 0);

        ResultSummary {
            required: self.required_packages.len(),
            unresolved_packages,
            unresolved_requirements,
            invalid_seeds,
            installed_but_not_required: self.installed_but_not_required.as_ref().map(BTreeSet::len),
        }
    }
}
