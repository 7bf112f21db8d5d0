use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::tree::RouteNode;

/// Base names whose presence (with any of the extensions below) marks a
/// directory level as a reachable endpoint.
pub const ROUTE_FILE_NAMES: &[&str] = &["route", "page"];
pub const ROUTE_FILE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Directory names that never contribute route segments.
pub const IGNORED_DIR_NAMES: &[&str] = &["node_modules", "target"];

/// Scan a route directory and build the tree model for it.
///
/// Fails with [`AppError::NotFound`] when the input directory is absent.
/// Every scan walks the full subtree; incremental rescans are the watcher's
/// concern and simply call this again.
pub fn scan_route_tree(input: &Path) -> Result<RouteNode> {
    if !input.is_dir() {
        return Err(AppError::NotFound {
            path: input.to_path_buf(),
        });
    }
    log::info!("Scanning route directory: {}", input.display());
    let tree = scan_directory(input)?;
    log::debug!(
        "Scan complete: {} routes, {} parameters.",
        tree.route_count(),
        tree.param_count()
    );
    Ok(tree)
}

/// Recursively scan one directory level.
///
/// Sibling subdirectories are scanned concurrently; results are reassembled
/// into the node's `BTreeMap`, which is where ordering determinism comes
/// from.
pub fn scan_directory(dir: &Path) -> Result<RouteNode> {
    if !dir.is_dir() {
        return Err(AppError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut node = RouteNode::new();
    node.route = has_route_marker(dir);

    let subdirs = list_subdirectories(dir)?;
    let children = subdirs
        .par_iter()
        .map(|(name, path)| scan_child(name, path))
        .collect::<Result<Vec<_>>>()?;

    node.children = children.into_iter().flatten().collect::<BTreeMap<_, _>>();
    Ok(node)
}

fn scan_child(name: &str, path: &Path) -> Result<Option<(String, RouteNode)>> {
    let mut child = scan_directory(path)?;

    let key = match extract_param_name(name) {
        Some(param) => {
            child.param = Some(param.to_string());
            RouteNode::param_key(param)
        }
        None => name.to_string(),
    };

    if child.is_empty_stub() {
        log::trace!("Dropping empty non-route directory: {}", path.display());
        return Ok(None);
    }
    Ok(Some((key, child)))
}

/// Check every marker base name x extension combination at this level.
fn has_route_marker(dir: &Path) -> bool {
    ROUTE_FILE_NAMES.iter().any(|name| {
        ROUTE_FILE_EXTENSIONS
            .iter()
            .any(|ext| dir.join(format!("{name}.{ext}")).is_file())
    })
}

/// Extract the parameter name from a `[name]` dynamic-segment directory.
fn extract_param_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .filter(|inner| !inner.is_empty())
}

fn list_subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|e| AppError::DirRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::DirRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let file_type = entry.file_type().map_err(|e| AppError::DirRead {
            path: entry.path(),
            source: e,
        })?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || IGNORED_DIR_NAMES.contains(&name.as_str()) {
            log::trace!("Skipping ignored directory: {}", entry.path().display());
            continue;
        }
        subdirs.push((name, entry.path()));
    }
    Ok(subdirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mkdirs(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn missing_root_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = scan_route_tree(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn scans_nested_layout_with_params() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "users/route.ts");
        touch(root, "users/[userId]/route.ts");
        touch(root, "users/[userId]/posts/[postId]/route.ts");
        touch(root, "hyphened-route/page.tsx");

        let tree = scan_route_tree(root).unwrap();
        assert!(!tree.route);

        let users = &tree.children["users"];
        assert!(users.route);

        let user = &users.children["$userId"];
        assert!(users.children.contains_key("$userId"));
        assert_eq!(user.param.as_deref(), Some("userId"));
        assert!(user.route);

        // posts itself has no marker, it only groups its dynamic child
        let posts = &user.children["posts"];
        assert!(!posts.route);
        let post = &posts.children["$postId"];
        assert!(post.route);
        assert_eq!(post.param.as_deref(), Some("postId"));

        assert!(tree.children["hyphened-route"].route);
    }

    #[test]
    fn marker_detection_covers_all_extensions() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "a/route.js");
        touch(root, "b/page.jsx");
        mkdirs(root, "c");
        touch(root, "c/handler.ts");

        let tree = scan_route_tree(root).unwrap();
        assert!(tree.children["a"].route);
        assert!(tree.children["b"].route);
        // c has a file, but not a marker file, and no subdirectories
        assert!(!tree.children.contains_key("c"));
    }

    #[test]
    fn hidden_and_ignored_directories_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, ".git/route.ts");
        touch(root, "node_modules/pkg/route.ts");
        touch(root, "ok/route.ts");

        let tree = scan_route_tree(root).unwrap();
        assert_eq!(tree.children.len(), 1);
        assert!(tree.children.contains_key("ok"));
    }

    #[test]
    fn empty_non_route_directories_are_dropped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        mkdirs(root, "empty/deeper");
        mkdirs(root, "[unusedParam]");
        touch(root, "kept/route.ts");

        let tree = scan_route_tree(root).unwrap();
        assert_eq!(tree.children.len(), 1);
        assert!(tree.children.contains_key("kept"));
    }

    #[test]
    fn rescans_of_an_unchanged_directory_are_identical() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "users/[userId]/route.ts");
        touch(root, "posts/route.ts");
        touch(root, "about/page.ts");

        let first = scan_route_tree(root).unwrap();
        let second = scan_route_tree(root).unwrap();
        assert_eq!(first, second);
    }
}
