use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::link::LinkTable;
use crate::runtime::path::resolve_relative_path;
use crate::runtime::{Runtime, image_path};

/// Collects the symlinks of an unpacked image into a [`LinkTable`].
///
/// Paths are recorded image-absolute (`<rootfs>/bin/sh` becomes `/bin/sh`),
/// relative targets are resolved against the link's directory and symlinked
/// directories are not descended into.
pub struct LinkScanner<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> LinkScanner<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    #[tracing::instrument(skip(self))]
    pub fn scan(&self, rootfs: &Path) -> Result<LinkTable> {
        if !self.runtime.is_dir(rootfs) {
            bail!("Image root {:?} is not a directory", rootfs);
        }

        let mut links = LinkTable::new();
        let mut pending: Vec<PathBuf> = vec![rootfs.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in self.runtime.read_dir(&dir)? {
                if self.runtime.is_symlink(&entry) {
                    self.record(rootfs, &entry, &mut links)?;
                } else if self.runtime.is_dir(&entry) {
                    pending.push(entry);
                }
            }
        }

        log::info!("Found {} symlink(s) under {:?}", links.len(), rootfs);
        Ok(links)
    }

    fn record(&self, rootfs: &Path, entry: &Path, links: &mut LinkTable) -> Result<()> {
        let Some(path) = image_path(rootfs, entry) else {
            log::warn!("Skipping link with a non UTF-8 path: {:?}", entry);
            return Ok(());
        };
        let raw_target = self.runtime.read_link(entry)?;

        // Absolute targets are already image-absolute.
        let base = Path::new(&path).parent().unwrap_or(Path::new("/"));
        let target = resolve_relative_path(base, &raw_target);
        match target.to_str() {
            Some(target) => {
                links.insert(path, target);
            }
            None => log::warn!("Skipping link {} with a non UTF-8 target", path),
        }
        Ok(())
    }
}
