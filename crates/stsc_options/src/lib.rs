//! stsc_options: project configuration.
//!
//! Parses the JSON configuration file that tells the compiler where the
//! story sources live, where outputs go, and which files to compile.

mod filter;

pub use filter::{FileFilter, DEFAULT_INCLUDE};

use serde::{Deserialize, Serialize};
use stsc_path::Extension;
use thiserror::Error;
use tracing::debug;

/// The configuration file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory scanned for `.st` sources.
    pub source_root: String,
    /// Directory receiving `.js` and `.js.map` files.
    pub javascript_output_root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typescript_output_root: Option<String>,
    #[serde(default = "default_true")]
    pub is_emit_javascript: bool,
    #[serde(default)]
    pub is_emit_typescript: bool,
    /// Module the generated code loads its serializer from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_path: Option<String>,
    /// Regular expressions; a file is compiled when one of them matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// Regular expressions; a matching file is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    /// Columns per indentation level in sources.
    #[serde(default = "default_indent_size")]
    pub indent_size: u32,
}

fn default_true() -> bool {
    true
}

fn default_indent_size() -> u32 {
    2
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a valid configuration: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {field} pattern '{pattern}': {source}")]
    Pattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("'{root}' is required when '{flag}' is true")]
    MissingRoot {
        root: &'static str,
        flag: &'static str,
    },
    #[error("'indentSize' must be at least 1")]
    InvalidIndentSize,
}

impl Config {
    /// Make relative roots and relative environment paths absolute
    /// against `base_dir`, the directory holding the configuration file.
    pub fn resolve_paths(&mut self, base_dir: &str) {
        self.source_root = stsc_path::combine_paths(base_dir, &self.source_root);
        self.javascript_output_root =
            stsc_path::combine_paths(base_dir, &self.javascript_output_root);
        if let Some(root) = &mut self.typescript_output_root {
            *root = stsc_path::combine_paths(base_dir, root);
        }
        if let Some(environment) = &mut self.environment_path {
            if environment.starts_with("./") || environment.starts_with("../") {
                *environment = stsc_path::combine_paths(base_dir, environment);
            }
        }
    }

    /// Check the settings that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_emit_typescript && self.typescript_output_root.is_none() {
            return Err(ConfigError::MissingRoot {
                root: "typescriptOutputRoot",
                flag: "isEmitTypescript",
            });
        }
        if self.indent_size == 0 {
            return Err(ConfigError::InvalidIndentSize);
        }
        self.file_filter().map(|_| ())
    }

    /// Compile the include and exclude patterns.
    pub fn file_filter(&self) -> Result<FileFilter, ConfigError> {
        FileFilter::new(self.include.as_deref(), self.exclude.as_deref().unwrap_or_default())
    }

    /// Where the JavaScript for `source_file` is written.
    pub fn javascript_path(&self, source_file: &str) -> String {
        stsc_path::output_path(
            source_file,
            &self.source_root,
            &self.javascript_output_root,
            Extension::Js,
        )
    }

    /// Where the TypeScript copy of `source_file` is written, if enabled.
    pub fn typescript_path(&self, source_file: &str) -> Option<String> {
        if !self.is_emit_typescript {
            return None;
        }
        self.typescript_output_root.as_ref().map(|root| {
            stsc_path::output_path(source_file, &self.source_root, root, Extension::Ts)
        })
    }
}

/// Parse a configuration from a string. Paths are left as written.
pub fn parse_config(content: &str) -> Result<Config, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read, resolve, and validate a configuration file.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    let mut config = parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;
    config.resolve_paths(&stsc_path::get_directory_path(path));
    config.validate()?;
    debug!(path, source_root = %config.source_root, "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"{ "sourceRoot": "src", "javascriptOutputRoot": "out" }"#;

    #[test]
    fn test_defaults() {
        let config = parse_config(MINIMAL).unwrap();
        assert!(config.is_emit_javascript);
        assert!(!config.is_emit_typescript);
        assert_eq!(config.indent_size, 2);
        assert_eq!(config.include, None);
        assert_eq!(config.environment_path, None);
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(indoc! {r#"
            {
              "sourceRoot": "story",
              "javascriptOutputRoot": "build/js",
              "typescriptOutputRoot": "build/ts",
              "isEmitJavascript": false,
              "isEmitTypescript": true,
              "environmentPath": "./runtime/env",
              "include": ["\\.st$"],
              "exclude": ["^drafts/"],
              "indentSize": 4
            }
        "#})
        .unwrap();
        assert_eq!(config.typescript_output_root.as_deref(), Some("build/ts"));
        assert_eq!(config.exclude, Some(vec!["^drafts/".to_string()]));
        assert_eq!(config.indent_size, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_source_root_is_rejected() {
        assert!(parse_config(r#"{ "javascriptOutputRoot": "out" }"#).is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let mut config = parse_config(indoc! {r#"
            {
              "sourceRoot": "src",
              "javascriptOutputRoot": "/abs/out",
              "typescriptOutputRoot": "../ts",
              "environmentPath": "./env/index"
            }
        "#})
        .unwrap();
        config.resolve_paths("/home/p");
        assert_eq!(config.source_root, "/home/p/src");
        assert_eq!(config.javascript_output_root, "/abs/out");
        assert_eq!(config.typescript_output_root.as_deref(), Some("/home/ts"));
        assert_eq!(config.environment_path.as_deref(), Some("/home/p/env/index"));
    }

    #[test]
    fn test_package_environment_is_not_resolved() {
        let mut config = parse_config(
            r#"{ "sourceRoot": "src", "javascriptOutputRoot": "out", "environmentPath": "my-env" }"#,
        )
        .unwrap();
        config.resolve_paths("/home/p");
        assert_eq!(config.environment_path.as_deref(), Some("my-env"));
    }

    #[test]
    fn test_typescript_requires_root() {
        let config = parse_config(
            r#"{ "sourceRoot": "src", "javascriptOutputRoot": "out", "isEmitTypescript": true }"#,
        )
        .unwrap();
        let error = config.validate().unwrap_err();
        assert!(matches!(error, ConfigError::MissingRoot { root: "typescriptOutputRoot", .. }));
    }

    #[test]
    fn test_zero_indent_size_is_rejected() {
        let mut config = parse_config(MINIMAL).unwrap();
        config.indent_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidIndentSize)));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let mut config = parse_config(MINIMAL).unwrap();
        config.exclude = Some(vec!["(".to_string()]);
        let error = config.validate().unwrap_err();
        assert!(error.to_string().starts_with("invalid exclude pattern '('"));
    }

    #[test]
    fn test_output_paths() {
        let mut config = parse_config(MINIMAL).unwrap();
        config.resolve_paths("/p");
        assert_eq!(config.javascript_path("/p/src/a/b.st"), "/p/out/a/b.js");
        assert_eq!(config.typescript_path("/p/src/a/b.st"), None);

        config.is_emit_typescript = true;
        config.typescript_output_root = Some("/p/ts".to_string());
        assert_eq!(config.typescript_path("/p/src/a/b.st").as_deref(), Some("/p/ts/a/b.ts"));
    }

    #[test]
    fn test_load_config_errors() {
        let missing = std::env::temp_dir().join("stsc_options_missing/stsc.json");
        let error = load_config(&missing.to_string_lossy()).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));

        let dir = std::env::temp_dir().join(format!("stsc_options_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("stsc.json");
        std::fs::write(&path, "{ not json").unwrap();
        let error = load_config(&path.to_string_lossy()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
