//! Loading a package database dump from disk.
//!
//! A dump is the plain-text directory produced when the package database of
//! an image is extracted (see [`DumpRepository`] for the layout). Everything
//! here is I/O; the resolution core only sees the resulting [`Dump`].

use anyhow::{Context, Result, bail};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::link::LinkTable;
use crate::package::{Package, PackageGraph};
use crate::runtime::Runtime;

use super::{find_listed_packages, parse_link_listing, parse_name_list};

pub const INSTALLED_FILE: &str = "installed.txt";
pub const LINKS_FILE: &str = "links.txt";
pub const REQUIRES_DIR: &str = "requires";
pub const PROVIDES_DIR: &str = "provides";
pub const FILES_DIR: &str = "files";

/// Everything a resolution run needs from a dump.
#[derive(Debug, Clone, Default)]
pub struct Dump {
    pub graph: PackageGraph,
    pub links: LinkTable,
    /// Contents of `installed.txt`, in listing order.
    pub installed: Vec<String>,
}

impl Dump {
    pub fn installed_set(&self) -> BTreeSet<String> {
        self.installed.iter().cloned().collect()
    }
}

/// Read access to a dump directory.
///
/// Layout:
/// - `<root>/installed.txt`
/// - `<root>/requires/<name>.txt`
/// - `<root>/provides/<name>.txt`
/// - `<root>/files/<name>.txt` (optional)
/// - `<root>/links.txt` (optional)
pub struct DumpRepository<'a, R: Runtime> {
    runtime: &'a R,
    root: PathBuf,
}

impl<'a, R: Runtime> DumpRepository<'a, R> {
    pub fn new(runtime: &'a R, root: PathBuf) -> Self {
        Self { runtime, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn installed_path(&self) -> PathBuf {
        self.root.join(INSTALLED_FILE)
    }

    pub fn links_path(&self) -> PathBuf {
        self.root.join(LINKS_FILE)
    }

    /// Returns: `<root>/<dir>/<name>.txt`
    pub fn listing_path(&self, dir: &str, name: &str) -> PathBuf {
        self.root.join(dir).join(format!("{}.txt", name))
    }

    /// Fail unless the dump root is an existing directory. Every loader that
    /// tolerates missing files must call this first.
    pub fn ensure_root(&self) -> Result<()> {
        if !self.runtime.is_dir(&self.root) {
            bail!("Dump directory {:?} does not exist", self.root);
        }
        Ok(())
    }

    /// Read an optional file; a missing file reads as empty.
    fn read_optional(&self, path: &Path) -> Result<Option<String>> {
        if !self.runtime.exists(path) {
            return Ok(None);
        }
        self.runtime.read_to_string(path).map(Some)
    }

    /// Names listed in `installed.txt`. Missing file means no names.
    pub fn load_installed(&self) -> Result<Vec<String>> {
        let path = self.installed_path();
        Ok(self
            .read_optional(&path)?
            .map(|content| parse_name_list(&content))
            .unwrap_or_default())
    }

    /// The link table from `links.txt`. Missing file means no links.
    pub fn load_links(&self) -> Result<LinkTable> {
        let path = self.links_path();
        match self.read_optional(&path)? {
            Some(content) => {
                parse_link_listing(&content).with_context(|| format!("Failed to parse {:?}", path))
            }
            None => Ok(LinkTable::new()),
        }
    }

    /// Load one package from its listings. Missing listings are empty.
    pub fn load_package(&self, name: &str) -> Result<Package> {
        let mut package = Package::new(name);

        if let Some(content) = self.read_optional(&self.listing_path(REQUIRES_DIR, name))? {
            package.add_requirement_lines(super::listing_lines(&content));
        }
        if let Some(content) = self.read_optional(&self.listing_path(PROVIDES_DIR, name))? {
            package.add_provision_lines(super::listing_lines(&content));
        }
        if let Some(content) = self.read_optional(&self.listing_path(FILES_DIR, name))? {
            package = package.with_files(parse_name_list(&content));
        }

        Ok(package)
    }

    /// Build the package graph: every installed package plus every package
    /// with a `requires/` or `provides/` listing.
    #[tracing::instrument(skip(self, installed))]
    pub fn load_graph(&self, installed: &[String]) -> Result<PackageGraph> {
        let mut names: BTreeSet<String> = installed.iter().cloned().collect();
        names.extend(find_listed_packages(self.runtime, &self.root.join(REQUIRES_DIR))?);
        names.extend(find_listed_packages(self.runtime, &self.root.join(PROVIDES_DIR))?);

        let mut graph = PackageGraph::new();
        for name in &names {
            let package = self
                .load_package(name)
                .with_context(|| format!("Failed to load package {}", name))?;
            graph.insert(package);
        }

        let unlisted = names.len() - installed.iter().filter(|n| names.contains(*n)).count();
        if unlisted > 0 {
            log::warn!("{} package(s) have listings but are not in {}", unlisted, INSTALLED_FILE);
        }
        Ok(graph)
    }

    /// Load the whole dump.
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Result<Dump> {
        self.ensure_root()?;

        let installed = self.load_installed()?;
        let graph = self.load_graph(&installed)?;
        let links = self.load_links()?;
        log::info!(
            "Loaded dump {:?}: {} package(s), {} installed, {} link(s)",
            self.root,
            graph.len(),
            installed.len(),
            links.len()
        );

        Ok(Dump {
            graph,
            links,
            installed,
        })
    }
}
