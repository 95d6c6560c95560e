/// Conditions that make a resolution request meaningless. Returned before
/// any work is done.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The package graph has no packages.
    #[error("package graph is empty; nothing to resolve against")]
    EmptyGraph,
    /// No must-have package names were given.
    #[error("no must-have packages given")]
    EmptyMustHaves,
    /// The graph contains a package whose name is reserved for reporting.
    #[error("package graph contains the reserved name {0:?}")]
    ReservedPackageName(String),
}
