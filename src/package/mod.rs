//! Package database model.
//!
//! A [`PackageGraph`] holds every installed [`Package`] of an image together
//! with the capability identifiers it requires and provides. Capabilities are
//! opaque strings; the only structure the resolver cares about is whether one
//! is a filesystem path.

mod graph;
mod meta;
mod version;

pub use graph::PackageGraph;
pub use meta::Package;
pub use version::{ConstraintOp, VersionConstraint, parse_capability};

/// A capability is path-shaped when it names an absolute filesystem path.
/// Path-shaped capabilities are canonicalized through the link table before
/// they are indexed or looked up.
pub fn is_path_shaped(capability: &str) -> bool {
    capability.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_path_shaped() {
        assert!(is_path_shaped("/usr/lib64/libc.so.6"));
        assert!(!is_path_shaped("libc.so.6()(64bit)"));
        assert!(!is_path_shaped("usr/lib/relative"));
        assert!(!is_path_shaped(""));
    }
}
