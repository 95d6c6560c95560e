//! Rendering of resolution results and lookups for people and tools.

mod json;
mod text;

pub use json::{ResultView, render_json};
pub use text::{render_outcome, render_providers, render_text};

use anyhow::Result;

use crate::closure::RequirementsResult;

/// Report format selected on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(result: &RequirementsResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => render_json(result),
    }
}
