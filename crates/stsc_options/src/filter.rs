//! Include/exclude filtering of source paths.

use crate::ConfigError;
use regex::Regex;

/// Used when the configuration has no `include` list.
pub const DEFAULT_INCLUDE: &str = r"\.st$";

/// Decides which discovered files are compiled.
///
/// Paths are matched with forward slashes, relative to the source root.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl FileFilter {
    pub fn new(include: Option<&[String]>, exclude: &[String]) -> Result<Self, ConfigError> {
        let include = match include {
            Some(patterns) => compile_patterns("include", patterns)?,
            None => compile_patterns("include", &[DEFAULT_INCLUDE.to_string()])?,
        };
        Ok(Self {
            include,
            exclude: compile_patterns("exclude", exclude)?,
        })
    }

    pub fn is_match(&self, path: &str) -> bool {
        let path = stsc_path::normalize_slashes(path);
        self.include.iter().any(|pattern| pattern.is_match(&path))
            && !self.exclude.iter().any(|pattern| pattern.is_match(&path))
    }
}

fn compile_patterns(field: &'static str, patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| ConfigError::Pattern {
                field,
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
