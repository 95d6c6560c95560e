//! Line-oriented listing formats used in a dump directory.

use anyhow::{Result, bail};
use std::collections::HashSet;
use std::path::Path;

use crate::link::{LINK_SEPARATOR, LinkTable};
use crate::runtime::path::resolve_relative_path;

/// Meaningful lines of a listing: trimmed, without blanks and `#` comments.
pub fn listing_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Parse a one-name-per-line listing, dropping duplicates but keeping order.
pub fn parse_name_list(content: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    listing_lines(content)
        .filter(|line| seen.insert(*line))
        .map(String::from)
        .collect()
}

/// Parse a `links.txt` listing of `<path> -> <target>` lines.
///
/// Relative targets are resolved against the link's directory, so the table
/// only holds absolute targets. A path listed twice keeps its last target.
pub fn parse_link_listing(content: &str) -> Result<LinkTable> {
    let mut links = LinkTable::new();

    for (number, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((path, target)) = line.split_once(LINK_SEPARATOR) else {
            bail!(
                "Line {}: expected '<path>{}<target>', got {:?}",
                number + 1,
                LINK_SEPARATOR,
                line
            );
        };
        let (path, target) = (path.trim(), target.trim());
        if !path.starts_with('/') {
            bail!("Line {}: link path {:?} is not absolute", number + 1, path);
        }
        if target.is_empty() {
            bail!("Line {}: link {:?} has an empty target", number + 1, path);
        }

        let base = Path::new(path).parent().unwrap_or(Path::new("/"));
        let resolved = resolve_relative_path(base, Path::new(target));
        if let Some(previous) = links.insert(path, resolved.to_string_lossy()) {
            log::warn!("Link {} listed more than once (was -> {})", path, previous);
        }
    }

    Ok(links)
}
