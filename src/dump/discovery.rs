use anyhow::Result;
use std::path::Path;

use crate::runtime::Runtime;

/// Suffix of every per-package listing file.
pub const LISTING_EXTENSION: &str = "txt";

/// Find the packages that have a listing file in `dir`.
///
/// Directory structure: `<dir>/<name>.txt`. A missing directory yields an
/// empty list. Names are returned sorted.
#[tracing::instrument(skip(runtime, dir))]
pub fn find_listed_packages<R: Runtime>(runtime: &R, dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    if !runtime.exists(dir) {
        return Ok(names);
    }

    for entry in runtime.read_dir(dir)? {
        if runtime.is_dir(&entry) {
            continue;
        }
        if entry.extension().and_then(|e| e.to_str()) != Some(LISTING_EXTENSION) {
            log::debug!("Skipping non-listing file {:?}", entry);
            continue;
        }
        if let Some(name) = entry.file_stem().and_then(|s| s.to_str())
            && !name.is_empty()
        {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    #[test]
    fn test_find_listed_packages() {
        let mut runtime = MockRuntime::new();

        // --- Setup Paths ---
        let dir = PathBuf::from("/dump/requires");

        // Directory exists: /dump/requires -> true
        runtime
            .expect_exists()
            .with(eq(dir.clone()))
            .returning(|_| true);

        // Read dir -> two listings, a stray file and a subdirectory
        runtime
            .expect_read_dir()
            .with(eq(dir.clone()))
            .returning(|p| {
                Ok(vec![
                    p.join("zlib.txt"),
                    p.join("bash.txt"),
                    p.join("README.md"),
                    p.join("nested"),
                ])
            });

        runtime
            .expect_is_dir()
            .with(eq(dir.join("nested")))
            .returning(|_| true);
        runtime.expect_is_dir().returning(|_| false);

        // --- Execute & Verify ---

        let names = find_listed_packages(&runtime, &dir).unwrap();
        assert_eq!(names, vec!["bash", "zlib"]);
    }

    #[test]
    fn test_find_listed_packages_no_dir() {
        let mut runtime = MockRuntime::new();
        let dir = PathBuf::from("/dump/files");

        // Directory exists: /dump/files -> false
        runtime
            .expect_exists()
            .with(eq(dir.clone()))
            .returning(|_| false);

        let names = find_listed_packages(&runtime, &dir).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_find_listed_packages_keeps_dotted_names() {
        let mut runtime = MockRuntime::new();
        let dir = PathBuf::from("/dump/provides");

        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_read_dir()
            .returning(|p| Ok(vec![p.join("python3.11.txt"), p.join("libstdc++.txt")]));
        runtime.expect_is_dir().returning(|_| false);

        let names = find_listed_packages(&runtime, &dir).unwrap();
        assert_eq!(names, vec!["libstdc++", "python3.11"]);
    }
}
