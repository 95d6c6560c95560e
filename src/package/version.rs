//! Requirement and provision annotations.
//!
//! RPM listings write versioned capabilities as `name op version`
//! (`coreutils >= 8.32`, `libfoo = 1.2-3`). Only the name takes part in
//! matching; the constraint is carried along for reports and is never
//! evaluated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a version constraint.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintOp {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = ">")]
    Greater,
}

impl ConstraintOp {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "<" => Some(ConstraintOp::Less),
            "<=" => Some(ConstraintOp::LessOrEqual),
            "=" | "==" => Some(ConstraintOp::Equal),
            ">=" => Some(ConstraintOp::GreaterOrEqual),
            ">" => Some(ConstraintOp::Greater),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintOp::Less => "<",
            ConstraintOp::LessOrEqual => "<=",
            ConstraintOp::Equal => "=",
            ConstraintOp::GreaterOrEqual => ">=",
            ConstraintOp::Greater => ">",
        }
    }
}

/// Opaque version constraint attached to a capability.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionConstraint {
    pub op: ConstraintOp,
    pub version: String,
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.as_str(), self.version)
    }
}

/// Split a listing line into its capability identifier and optional
/// version constraint.
///
/// Lines that do not have exactly the `name op version` shape are taken
/// verbatim as the identifier, which keeps RPM rich dependencies such as
/// `(foo if bar)` intact.
pub fn parse_capability(line: &str) -> (String, Option<VersionConstraint>) {
    let line = line.trim();
    if line.starts_with('(') {
        return (line.to_string(), None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if let [name, op, version] = tokens.as_slice()
        && let Some(op) = ConstraintOp::parse(op)
    {
        return (
            name.to_string(),
            Some(VersionConstraint {
                op,
                version: version.to_string(),
            }),
        );
    }

    (line.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_capability() {
        assert_eq!(parse_capability("libc.so.6()(64bit)"), ("libc.so.6()(64bit)".into(), None));
        assert_eq!(parse_capability("  /bin/sh \n"), ("/bin/sh".into(), None));
    }

    #[test]
    fn test_versioned_capability() {
        let (name, constraint) = parse_capability("coreutils >= 8.32");
        assert_eq!(name, "coreutils");
        let constraint = constraint.unwrap();
        assert_eq!(constraint.op, ConstraintOp::GreaterOrEqual);
        assert_eq!(constraint.version, "8.32");
        assert_eq!(constraint.to_string(), ">= 8.32");
    }

    #[test]
    fn test_rpmlib_capability() {
        let (name, constraint) = parse_capability("rpmlib(PayloadIsZstd) <= 5.4.18-1");
        assert_eq!(name, "rpmlib(PayloadIsZstd)");
        assert_eq!(constraint.unwrap().op, ConstraintOp::LessOrEqual);
    }

    #[test]
    fn test_unknown_operator_is_verbatim() {
        assert_eq!(parse_capability("foo ~> 1.0"), ("foo ~> 1.0".into(), None));
    }

    #[test]
    fn test_rich_dependency_is_verbatim() {
        let line = "(glibc-langpack-en = 2.34 if glibc)";
        assert_eq!(parse_capability(line), (line.into(), None));
    }

    #[test]
    fn test_constraint_serializes_operator_symbol() {
        let constraint = VersionConstraint {
            op: ConstraintOp::Equal,
            version: "1.2-3".into(),
        };
        let json = serde_json::to_string(&constraint).unwrap();
        assert_eq!(json, r#"{"op":"=","version":"1.2-3"}"#);
    }
}
