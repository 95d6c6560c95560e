use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::{VersionConstraint, parse_capability};

/// An installed package and the capabilities it requires and provides.
///
/// Requirement, provision and file lists are ordered sets: insertion order is
/// kept and duplicates are dropped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub provides: Vec<String>,
    /// Files owned by the package. Indexed like path-shaped provisions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Version constraints seen on requirement lines, keyed by capability.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: BTreeMap<String, Vec<VersionConstraint>>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add requirements given as plain capability identifiers.
    pub fn with_requires<I, S>(mut self, requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.requires, requires);
        self
    }

    /// Add provisions given as plain capability identifiers.
    pub fn with_provides<I, S>(mut self, provides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.provides, provides);
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.files, files);
        self
    }

    /// Add a requirement from a listing line, splitting off any version
    /// constraint.
    pub fn add_requirement_line(&mut self, line: &str) {
        self.add_requirement_lines([line]);
    }

    /// Add requirements from listing lines. Duplicates are dropped in one
    /// pass over the whole batch.
    pub fn add_requirement_lines<'l, I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = &'l str>,
    {
        let mut capabilities = Vec::new();
        for line in lines {
            let (capability, constraint) = parse_capability(line);
            if let Some(constraint) = constraint {
                let entry = self.constraints.entry(capability.clone()).or_default();
                if !entry.contains(&constraint) {
                    entry.push(constraint);
                }
            }
            capabilities.push(capability);
        }
        extend_unique(&mut self.requires, capabilities);
    }

    /// Add a provision from a listing line. The version of `name = version`
    /// provisions is dropped.
    pub fn add_provision_line(&mut self, line: &str) {
        self.add_provision_lines([line]);
    }

    pub fn add_provision_lines<'l, I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = &'l str>,
    {
        let capabilities = lines.into_iter().map(|line| parse_capability(line).0);
        extend_unique(&mut self.provides, capabilities);
    }

    /// Constraints recorded for a required capability.
    pub fn constraints_for(&self, capability: &str) -> &[VersionConstraint] {
        self.constraints
            .get(capability)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn extend_unique<I, S>(list: &mut Vec<String>, items: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen: HashSet<String> = list.iter().cloned().collect();
    for item in items {
        let item = item.into();
        if !seen.contains(&item) {
            seen.insert(item.clone());
            list.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::ConstraintOp;

    #[test]
    fn test_builder_keeps_order_and_drops_duplicates() {
        let package = Package::new("bash")
            .with_requires(["libc.so.6", "/bin/sh", "libc.so.6"])
            .with_provides(["bash", "/bin/bash"])
            .with_provides(["bash"]);

        assert_eq!(package.requires, vec!["libc.so.6", "/bin/sh"]);
        assert_eq!(package.provides, vec!["bash", "/bin/bash"]);
        assert!(package.files.is_empty());
    }

    #[test]
    fn test_requirement_line_with_constraint() {
        let mut package = Package::new("coreutils");
        package.add_requirement_line("glibc >= 2.34");
        package.add_requirement_line("glibc < 3");
        package.add_requirement_line("glibc >= 2.34");

        assert_eq!(package.requires, vec!["glibc"]);
        let constraints = package.constraints_for("glibc");
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].op, ConstraintOp::GreaterOrEqual);
        assert_eq!(constraints[1].op, ConstraintOp::Less);
        assert!(package.constraints_for("missing").is_empty());
    }

    #[test]
    fn test_provision_line_drops_version() {
        let mut package = Package::new("bash");
        package.add_provision_line("bash = 5.2.15-5.fc39");
        package.add_provision_line("bash(x86-64) = 5.2.15-5.fc39");

        assert_eq!(package.provides, vec!["bash", "bash(x86-64)"]);
        assert!(package.constraints.is_empty());
    }

    #[test]
    fn test_large_listing_batches() {
        let lines: Vec<String> = (0..50_000)
            .map(|i| format!("perl(Module::N{}) = 1.{}", i % 40_000, i))
            .collect();
        let mut package = Package::new("perl");

        package.add_provision_lines(lines.iter().map(String::as_str));
        package.add_requirement_lines(lines.iter().map(String::as_str));

        assert_eq!(package.provides.len(), 40_000);
        assert_eq!(package.provides[0], "perl(Module::N0)");
        assert_eq!(package.requires.len(), 40_000);
        assert_eq!(package.constraints_for("perl(Module::N1)").len(), 2);
    }

    #[test]
    fn test_serde_roundtrip_omits_empty_optional_fields() {
        let package = Package::new("linux").with_provides(["linux"]);
        let json = serde_json::to_string(&package).unwrap();
        assert_eq!(json, r#"{"name":"linux","requires":[],"provides":["linux"]}"#);

        let parsed: Package = serde_json::from_str(r#"{"name":"linux"}"#).unwrap();
        assert_eq!(parsed, Package::new("linux"));
    }
}
