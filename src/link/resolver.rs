use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use super::LinkTable;
use crate::package::is_path_shaped;

/// Hop budget used when none is configured.
pub const DEFAULT_MAX_HOPS: usize = 64;

/// Result of following a path through the link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// The chain ended at a path with no further link.
    Resolved { path: String },
    /// The chain could not be followed to its end.
    Unresolved {
        /// Last path reached inside the table's domain
        last: String,
        reason: UnresolvedReason,
    },
    /// The chain revisited a path. Holds the chain in hop order, ending with
    /// the revisited path.
    Circular { chain: Vec<String> },
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved { .. })
    }

    /// The canonical path, if resolution succeeded.
    pub fn canonical(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::Resolved { path } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionOutcome::Resolved { path } => write!(f, "resolved to {}", path),
            ResolutionOutcome::Unresolved { last, reason } => {
                write!(f, "unresolved at {} ({})", last, reason)
            }
            ResolutionOutcome::Circular { chain } => {
                write!(f, "circular: {}", chain.join(" -> "))
            }
        }
    }
}

/// Why a chain could not be followed to its end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// More than `max_hops` links were followed.
    HopLimitExceeded { max_hops: usize },
    /// A link pointed at a relative path, which the table cannot key.
    NotAbsolute { target: String },
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::HopLimitExceeded { max_hops } => {
                write!(f, "more than {} hops", max_hops)
            }
            UnresolvedReason::NotAbsolute { target } => {
                write!(f, "link target {:?} is not absolute", target)
            }
        }
    }
}

/// Follows paths through a [`LinkTable`].
///
/// Stateless apart from its configuration: every call to [`resolve`] starts a
/// fresh visited-set, so one resolver can be shared across threads.
///
/// [`resolve`]: PathResolver::resolve
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    links: &'a LinkTable,
    max_hops: usize,
}

impl<'a> PathResolver<'a> {
    pub fn new(links: &'a LinkTable) -> Self {
        Self {
            links,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Follow `start` through the link table until a non-link path is reached.
    pub fn resolve(&self, start: &str) -> ResolutionOutcome {
        let mut chain: Vec<&str> = vec![start];
        let mut seen: HashSet<&str> = HashSet::from([start]);
        let mut current = start;

        while let Some(next) = self.links.target(current) {
            if !next.starts_with('/') {
                return ResolutionOutcome::Unresolved {
                    last: current.to_string(),
                    reason: UnresolvedReason::NotAbsolute {
                        target: next.to_string(),
                    },
                };
            }
            // A revisit is reported as a cycle even when the budget is spent.
            if seen.contains(next) {
                chain.push(next);
                return ResolutionOutcome::Circular {
                    chain: chain.into_iter().map(String::from).collect(),
                };
            }
            if chain.len() > self.max_hops {
                return ResolutionOutcome::Unresolved {
                    last: current.to_string(),
                    reason: UnresolvedReason::HopLimitExceeded {
                        max_hops: self.max_hops,
                    },
                };
            }
            chain.push(next);
            seen.insert(next);
            current = next;
        }

        ResolutionOutcome::Resolved {
            path: current.to_string(),
        }
    }

    /// Canonical form of a capability identifier.
    ///
    /// Non-path capabilities are returned verbatim. Path-shaped ones are
    /// resolved; a circular or unresolved chain is returned as `Err` and means
    /// the capability cannot be provided or satisfied through this path.
    pub fn canonicalize<'c>(&self, capability: &'c str) -> Result<Cow<'c, str>, ResolutionOutcome> {
        if !is_path_shaped(capability) {
            return Ok(Cow::Borrowed(capability));
        }
        match self.resolve(capability) {
            ResolutionOutcome::Resolved { path } if path == capability => {
                Ok(Cow::Borrowed(capability))
            }
            ResolutionOutcome::Resolved { path } => Ok(Cow::Owned(path)),
            failed => Err(failed),
        }
    }
}
