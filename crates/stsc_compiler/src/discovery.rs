//! Source file discovery.

use crate::error::{CompilerError, Result};
use std::path::Path;
use stsc_options::FileFilter;

/// Directories never searched for sources.
const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", ".git"];

/// All files under `root` accepted by `filter`, sorted, with forward slashes.
///
/// The filter sees each path relative to `root`.
pub fn discover_source_files(root: &str, filter: &FileFilter) -> Result<Vec<String>> {
    let mut files = Vec::new();
    walk_directory(Path::new(root), root, filter, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_directory(dir: &Path, root: &str, filter: &FileFilter, files: &mut Vec<String>) -> Result<()> {
    let read_error = |source| CompilerError::Read {
        path: dir.to_string_lossy().to_string(),
        source,
    };
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if !SKIPPED_DIRECTORIES.contains(&name) {
                walk_directory(&path, root, filter, files)?;
            }
        } else if path.is_file() {
            let path = stsc_path::normalize_path(&path.to_string_lossy());
            if filter.is_match(&stsc_path::get_relative_path(root, &path)) {
                files.push(path);
            }
        }
    }
    Ok(())
}
