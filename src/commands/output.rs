use anyhow::{Context, Result};
use std::path::Path;

use crate::runtime::Runtime;

/// Print `content` to stdout, or write it to `output` when given.
pub(crate) fn emit<R: Runtime>(runtime: &R, output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => runtime
            .write(path, content.as_bytes())
            .with_context(|| format!("Failed to write report to {:?}", path)),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
