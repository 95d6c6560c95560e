use std::collections::HashMap;

use super::Package;

/// The package database of one image: an ordered collection of packages
/// keyed by unique name.
#[derive(Debug, Clone, Default)]
pub struct PackageGraph {
    packages: Vec<Package>,
    by_name: HashMap<String, usize>,
}

impl PackageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package. A package with the same name is replaced in place and
    /// returned.
    pub fn insert(&mut self, package: Package) -> Option<Package> {
        match self.by_name.get(&package.name) {
            Some(&i) => Some(std::mem::replace(&mut self.packages[i], package)),
            None => {
                self.by_name.insert(package.name.clone(), self.packages.len());
                self.packages.push(package);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.by_name.get(name).map(|&i| &self.packages[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages in insertion order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(|p| p.name.as_str())
    }
}

impl FromIterator<Package> for PackageGraph {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        let mut graph = PackageGraph::new();
        for package in iter {
            graph.insert(package);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut graph = PackageGraph::new();
        assert!(graph.is_empty());

        graph.insert(Package::new("bash"));
        graph.insert(Package::new("coreutils"));

        assert_eq!(graph.len(), 2);
        assert!(graph.contains("bash"));
        assert!(!graph.contains("Bash"));
        assert_eq!(graph.get("coreutils").unwrap().name, "coreutils");
        assert_eq!(graph.names().collect::<Vec<_>>(), vec!["bash", "coreutils"]);
    }

    #[test]
    fn test_insert_replaces_same_name_in_place() {
        let mut graph: PackageGraph = [Package::new("a"), Package::new("b")].into_iter().collect();

        let previous = graph.insert(Package::new("a").with_provides(["liba"]));

        assert_eq!(previous, Some(Package::new("a")));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.packages()[0].provides, vec!["liba"]);
    }
}
