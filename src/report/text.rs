use std::collections::BTreeSet;
use std::fmt::Write;

use crate::closure::{MUST_HAVE_PSEUDO_PACKAGE, RequirementsResult};
use crate::link::ResolutionOutcome;

const INDENT: &str = "  ";

fn section<'a>(out: &mut String, title: &str, items: impl ExactSizeIterator<Item = &'a String>) {
    let _ = writeln!(out, "{} ({}):", title, items.len());
    for item in items {
        let _ = writeln!(out, "{}{}", INDENT, item);
    }
}

/// Plain-text report of a resolution.
pub fn render_text(result: &RequirementsResult) -> String {
    let mut out = String::new();
    let summary = result.summary();

    section(&mut out, "Required packages", result.required_packages().iter());

    if summary.unresolved_requirements > 0 {
        let _ = writeln!(
            out,
            "\nUnresolved requirements ({} in {} package(s)):",
            summary.unresolved_requirements, summary.unresolved_packages
        );
        for (package, capabilities) in result.unresolved_requirements() {
            if package == MUST_HAVE_PSEUDO_PACKAGE {
                continue;
            }
            let _ = writeln!(out, "{}{}:", INDENT, package);
            for capability in capabilities {
                let constraints = result.constraints_for(package, capability);
                if constraints.is_empty() {
                    let _ = writeln!(out, "{}{}{}", INDENT, INDENT, capability);
                } else {
                    let written: Vec<String> = constraints.iter().map(ToString::to_string).collect();
                    let _ = writeln!(
                        out,
                        "{}{}{} ({})",
                        INDENT,
                        INDENT,
                        capability,
                        written.join(", ")
                    );
                }
            }
        }
    }

    if let Some(seeds) = result.invalid_seeds() {
        out.push('\n');
        section(&mut out, "Must-have packages not found", seeds.iter());
    }

    if let Some(unused) = result.installed_but_not_required() {
        out.push('\n');
        section(&mut out, "Installed but not required", unused.iter());
    }

    let _ = writeln!(
        out,
        "\nFully resolved: {}",
        if result.is_fully_resolved() { "yes" } else { "no" }
    );
    out
}

/// One-line description of a path chase.
pub fn render_outcome(path: &str, outcome: &ResolutionOutcome) -> String {
    match outcome {
        ResolutionOutcome::Resolved { path: canonical } if canonical == path => {
            format!("{} is not a symlink\n", path)
        }
        ResolutionOutcome::Resolved { path: canonical } => format!("{} -> {}\n", path, canonical),
        ResolutionOutcome::Unresolved { .. } | ResolutionOutcome::Circular { .. } => {
            format!("{}: {}\n", path, outcome)
        }
    }
}

/// Providers of a capability, one per line, with the canonical form when it
/// differs from the query.
pub fn render_providers(capability: &str, canonical: &str, providers: &BTreeSet<String>) -> String {
    let mut out = String::new();
    if canonical != capability {
        let _ = writeln!(out, "{} (canonical: {})", capability, canonical);
    }
    if providers.is_empty() {
        let _ = writeln!(out, "Nothing provides {}", canonical);
    }
    for provider in providers {
        let _ = writeln!(out, "{}", provider);
    }
    out
}
