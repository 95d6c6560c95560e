//! Lexical path helpers.
//!
//! Paths inside an OS image are always `/`-separated and rooted at the image
//! root, independent of where the image is unpacked on the host.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by processing `.` and `..` components lexically.
/// This does not access the filesystem and does not follow symlinks.
///
/// For absolute paths `..` at the root stays at the root, as the kernel does.
/// Relative paths keep leading `..` components they cannot pop.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    let mut normal_depth = 0usize;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if normal_depth > 0 {
                    result.pop();
                    normal_depth -= 1;
                } else if !result.has_root() {
                    result.push(component);
                }
            }
            Component::Normal(_) => {
                result.push(component);
                normal_depth += 1;
            }
            Component::RootDir | Component::Prefix(_) => {
                result.push(component);
            }
        }
    }
    result
}

/// Resolve a link target the way the kernel would, relative to the directory
/// containing the link, and normalize the result.
///
/// An absolute `target` is only normalized.
pub fn resolve_relative_path(base_dir: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        normalize_path(target)
    } else {
        normalize_path(&base_dir.join(target))
    }
}

/// Convert a host path below `rootfs` into an image-absolute path string
/// (`<rootfs>/usr/lib/libc.so.6` becomes `/usr/lib/libc.so.6`).
///
/// Returns `None` if `host_path` is not below `rootfs` or is not valid UTF-8.
pub fn image_path(rootfs: &Path, host_path: &Path) -> Option<String> {
    let relative = host_path.strip_prefix(rootfs).ok()?;
    let mut image = String::from("/");
    let mut first = true;
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                if !first {
                    image.push('/');
                }
                image.push_str(part.to_str()?);
                first = false;
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(image)
}
