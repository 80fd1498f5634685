//! # Resilient Path Helpers
//!
//! File: cli/src/common/fs/paths.rs
//!
//! Lexical path handling that does not touch the filesystem; the framework
//! directory usually does not exist yet when its path is computed.
//!
use std::path::{Component, Path, PathBuf};

/// Normalizes `path` without resolving symlinks.
///
/// `.` segments and repeated separators are dropped, `..` removes the
/// previous segment. A `..` at the root stays at the root; a leading `..`
/// in a relative path is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_dots_and_separators() {
        assert_eq!(
            normalize_lexically(Path::new("/var/www//./framework/")),
            PathBuf::from("/var/www/framework")
        );
    }

    #[test]
    fn test_normalize_parent_segments() {
        assert_eq!(
            normalize_lexically(Path::new("/var/www/project/../framework")),
            PathBuf::from("/var/www/framework")
        );
        assert_eq!(normalize_lexically(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize_lexically(Path::new("../a")), PathBuf::from("../a"));
    }

    #[test]
    fn test_normalize_empty_result() {
        assert_eq!(normalize_lexically(Path::new("a/..")), PathBuf::from("."));
    }
}
