//! Scan action - produces a link listing from an unpacked image.

use anyhow::{Context, Result};
use std::path::Path;

use crate::dump::LinkScanner;
use crate::link::LinkTable;
use crate::runtime::Runtime;

pub struct ScanLinksAction<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> ScanLinksAction<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    pub fn scan(&self, rootfs: &Path) -> Result<LinkTable> {
        LinkScanner::new(self.runtime)
            .scan(rootfs)
            .with_context(|| format!("Failed to scan links under {:?}", rootfs))
    }

    /// Scan `rootfs` and write the listing to `output`, creating parent
    /// directories as needed. Returns the number of links written.
    #[tracing::instrument(skip(self))]
    pub fn scan_to_file(&self, rootfs: &Path, output: &Path) -> Result<usize> {
        let links = self.scan(rootfs)?;

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
            && !self.runtime.exists(parent)
        {
            self.runtime.create_dir_all(parent)?;
        }
        self.runtime.write(output, links.to_listing().as_bytes())?;
        Ok(links.len())
    }
}
