use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::application::ScanLinksAction;
use crate::runtime::Runtime;

/// Scan an unpacked image for symlinks and emit a `links.txt` listing.
#[tracing::instrument(skip(runtime))]
pub fn scan_links<R: Runtime>(runtime: R, rootfs: &Path, output: Option<PathBuf>) -> Result<()> {
    let action = ScanLinksAction::new(&runtime);

    match output {
        Some(path) => {
            let count = action.scan_to_file(rootfs, &path)?;
            println!("Wrote {} link(s) to {}", count, path.display());
        }
        None => print!("{}", action.scan(rootfs)?.to_listing()),
    }
    Ok(())
}
