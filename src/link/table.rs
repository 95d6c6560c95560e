use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator used by the `links.txt` listing format.
pub const LINK_SEPARATOR: &str = " -> ";

/// Mapping from an image path to the path it symbolically links to.
///
/// Each path has at most one direct target. Chains are represented as
/// separate entries and followed by [`super::PathResolver`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    links: BTreeMap<String, String>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path -> target`, returning the previous target if `path` was
    /// already present.
    pub fn insert(&mut self, path: impl Into<String>, target: impl Into<String>) -> Option<String> {
        self.links.insert(path.into(), target.into())
    }

    /// Direct target of `path`, or `None` if `path` is not a link.
    pub fn target(&self, path: &str) -> Option<&str> {
        self.links.get(path).map(String::as_str)
    }

    pub fn is_link(&self, path: &str) -> bool {
        self.links.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterate entries in lexicographic path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.links.iter().map(|(p, t)| (p.as_str(), t.as_str()))
    }

    /// Render the table in the `links.txt` format, one `path -> target` per line.
    pub fn to_listing(&self) -> String {
        let mut out = String::new();
        for (path, target) in self.iter() {
            out.push_str(path);
            out.push_str(LINK_SEPARATOR);
            out.push_str(target);
            out.push('\n');
        }
        out
    }
}

impl<P: Into<String>, T: Into<String>> FromIterator<(P, T)> for LinkTable {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut table = LinkTable::new();
        for (path, target) in iter {
            table.insert(path, target);
        }
        table
    }
}
