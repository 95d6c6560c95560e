use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::closure::{RequirementsResult, ResultSummary};

/// JSON shape of a report: the result plus derived fields.
#[derive(Serialize, Debug)]
pub struct ResultView<'a> {
    pub fully_resolved: bool,
    pub summary: ResultSummary,
    /// Unresolved requirements keyed by capability instead of package.
    pub missing_capabilities: BTreeMap<&'a str, BTreeSet<&'a str>>,
    #[serde(flatten)]
    pub result: &'a RequirementsResult,
}

impl<'a> From<&'a RequirementsResult> for ResultView<'a> {
    fn from(result: &'a RequirementsResult) -> Self {
        Self {
            fully_resolved: result.is_fully_resolved(),
            summary: result.summary(),
            missing_capabilities: result.unresolved_by_capability(),
            result,
        }
    }
}

pub fn render_json(result: &RequirementsResult) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&ResultView::from(result))
        .context("Failed to serialize resolution result")?;
    json.push('\n');
    Ok(json)
}
