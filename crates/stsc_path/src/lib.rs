//! stsc_path: Path normalization and extension handling.
//!
//! Paths are handled as forward-slash strings so that generated `require`
//! specifiers and source-map entries look the same on every platform.

/// File extensions the compiler reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    /// A storytailor source file.
    St,
    Js,
    Ts,
    /// A source map next to generated JavaScript.
    JsMap,
    Json,
}

impl Extension {
    /// Get the string representation of this extension (including the dot).
    pub fn as_str(&self) -> &'static str {
        match self {
            Extension::St => ".st",
            Extension::Js => ".js",
            Extension::Ts => ".ts",
            Extension::JsMap => ".js.map",
            Extension::Json => ".json",
        }
    }

    /// Try to determine the extension from a file path string.
    pub fn from_path(path: &str) -> Option<Extension> {
        let lower = path.to_lowercase();
        // `.js.map` before `.js`-like endings
        if lower.ends_with(".js.map") {
            Some(Extension::JsMap)
        } else if lower.ends_with(".st") {
            Some(Extension::St)
        } else if lower.ends_with(".js") {
            Some(Extension::Js)
        } else if lower.ends_with(".ts") {
            Some(Extension::Ts)
        } else if lower.ends_with(".json") {
            Some(Extension::Json)
        } else {
            None
        }
    }
}

/// Convert backslashes to forward slashes.
pub fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Normalize a path: forward slashes, no `.` segments, `..` folded into
/// the preceding segment where there is one, no trailing separator.
pub fn normalize_path(path: &str) -> String {
    let path = normalize_slashes(path);
    let root = root_length(&path);
    let (prefix, rest) = path.split_at(root);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if root == 0 {
                    // Above the root of an absolute path stays at the root.
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if prefix.is_empty() && joined.is_empty() {
        return ".".to_string();
    }
    format!("{}{}", prefix, joined)
}

/// Length of the root prefix: `/`, `C:/` or nothing.
fn root_length(path: &str) -> usize {
    let bytes = path.as_bytes();
    if bytes.first() == Some(&b'/') {
        return 1;
    }
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        return 3;
    }
    0
}

/// Check if a path is rooted (absolute).
pub fn is_rooted(path: &str) -> bool {
    root_length(&normalize_slashes(path)) > 0
}

/// Combine two path segments.
pub fn combine_paths(base: &str, relative: &str) -> String {
    if is_rooted(relative) {
        return normalize_path(relative);
    }
    if base.is_empty() {
        return normalize_path(relative);
    }
    normalize_path(&format!("{}{}", ensure_trailing_directory_separator(base), relative))
}

/// Ensure a path ends with a directory separator.
pub fn ensure_trailing_directory_separator(path: &str) -> String {
    if path.ends_with('/') || path.ends_with('\\') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Get the directory of a file path, normalized.
pub fn get_directory_path(path: &str) -> String {
    let normalized = normalize_path(path);
    match normalized.rfind('/') {
        Some(0) => "/".to_string(),
        Some(index) if index + 1 == root_length(&normalized) => normalized[..=index].to_string(),
        Some(index) => normalized[..index].to_string(),
        None => ".".to_string(),
    }
}

/// Get the base name (file name) from a path.
pub fn get_base_name(path: &str) -> &str {
    match path.rfind(is_directory_separator) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Remove the file extension from a path.
pub fn remove_extension(path: &str) -> &str {
    if let Some(Extension::JsMap) = Extension::from_path(path) {
        return &path[..path.len() - Extension::JsMap.as_str().len()];
    }
    let name_start = path.rfind(is_directory_separator).map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}

/// Change the extension of a path.
pub fn change_extension(path: &str, extension: Extension) -> String {
    format!("{}{}", remove_extension(path), extension.as_str())
}

/// Get the relative path from directory `from` to `to`.
pub fn get_relative_path(from: &str, to: &str) -> String {
    let from = normalize_path(from);
    let to = normalize_path(to);
    let from_parts: Vec<&str> = from.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
    let to_parts: Vec<&str> = to.split('/').filter(|s| !s.is_empty() && *s != ".").collect();

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();
    let mut result: Vec<&str> = vec![".."; from_parts.len() - common];
    result.extend(&to_parts[common..]);
    if result.is_empty() {
        return ".".to_string();
    }
    result.join("/")
}

/// A `require` specifier for `target` as seen from directory `from`:
/// relative, forward-slashed and always starting with `./` or `../`.
pub fn module_specifier(from: &str, target: &str) -> String {
    let relative = get_relative_path(from, target);
    if relative.starts_with("../") || relative == ".." {
        relative
    } else {
        format!("./{}", relative)
    }
}

/// Map a file under `source_root` to the same relative location under
/// `output_root`, with a new extension.
pub fn output_path(source_file: &str, source_root: &str, output_root: &str, extension: Extension) -> String {
    let relative = get_relative_path(source_root, source_file);
    combine_paths(output_root, &change_extension(&relative, extension))
}

/// Check if a character is a directory separator.
#[inline]
pub fn is_directory_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_path() {
        assert_eq!(Extension::from_path("story.st"), Some(Extension::St));
        assert_eq!(Extension::from_path("story.js.map"), Some(Extension::JsMap));
        assert_eq!(Extension::from_path("story.JS"), Some(Extension::Js));
        assert_eq!(Extension::from_path("story.txt"), None);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("a\\b\\c"), "a/b/c");
        assert_eq!(normalize_path("a/./b/../c/"), "a/c");
        assert_eq!(normalize_path("../a/../../b"), "../../b");
        assert_eq!(normalize_path("/a/../../b"), "/b");
        assert_eq!(normalize_path("C:\\x\\.\\y"), "C:/x/y");
        assert_eq!(normalize_path("a/.."), ".");
    }

    #[test]
    fn test_get_directory_path() {
        assert_eq!(get_directory_path("/a/b/c.st"), "/a/b");
        assert_eq!(get_directory_path("/c.st"), "/");
        assert_eq!(get_directory_path("file.st"), ".");
    }

    #[test]
    fn test_remove_and_change_extension() {
        assert_eq!(remove_extension("dir.v2/story.st"), "dir.v2/story");
        assert_eq!(remove_extension("dir.v2/story"), "dir.v2/story");
        assert_eq!(remove_extension("story.js.map"), "story");
        assert_eq!(remove_extension(".hidden"), ".hidden");
        assert_eq!(change_extension("a/story.st", Extension::Js), "a/story.js");
    }

    #[test]
    fn test_is_rooted() {
        assert!(is_rooted("/usr/bin"));
        assert!(is_rooted("C:\\Users"));
        assert!(!is_rooted("relative/path"));
        assert!(!is_rooted(""));
    }

    #[test]
    fn test_combine_paths() {
        assert_eq!(combine_paths("/a/b", "c.st"), "/a/b/c.st");
        assert_eq!(combine_paths("/a/b/", "../c.st"), "/a/c.st");
        assert_eq!(combine_paths("", "c.st"), "c.st");
        assert_eq!(combine_paths("/a", "/b/c.st"), "/b/c.st");
    }

    #[test]
    fn test_relative_paths_and_specifiers() {
        assert_eq!(get_relative_path("/p/out", "/p/out/env.js"), "env.js");
        assert_eq!(get_relative_path("/p/out/deep", "/p/lib/env"), "../../lib/env");
        assert_eq!(get_relative_path("/p", "/p"), ".");
        assert_eq!(module_specifier("/p/out", "/p/out/env"), "./env");
        assert_eq!(module_specifier("/p/out/a", "/p/out/env"), "../env");
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path("/p/src/a/story.st", "/p/src", "/p/dist", Extension::Js),
            "/p/dist/a/story.js"
        );
        assert_eq!(output_path("src/x.st", "src", "out", Extension::JsMap), "out/x.js.map");
    }
}
