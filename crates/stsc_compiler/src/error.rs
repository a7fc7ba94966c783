//! Compiler error types

use std::any::Any;
use stsc_diagnostics::{messages, Diagnostic};
use stsc_emitter::EmitError;
use stsc_options::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompilerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("cannot run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// A panic caught at the top of a compilation.
    #[error("unexpected failure: {message}")]
    Unexpected { message: String },
}

impl CompilerError {
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = match payload.downcast_ref::<&str>() {
            Some(message) => message.to_string(),
            None => payload
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| "unknown panic".to_string()),
        };
        CompilerError::Unexpected { message }
    }

    /// The user-facing form of this failure.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompilerError::Config(ConfigError::Read { path, source })
            | CompilerError::Read { path, source } => Diagnostic::global(
                &messages::CANNOT_READ_FILE_0_1,
                &[path.as_str(), &source.to_string()],
            ),
            CompilerError::Config(error) => {
                Diagnostic::global(&messages::INVALID_CONFIG_0, &[&error.to_string()])
            }
            CompilerError::Emit(EmitError::Write { path, source }) => Diagnostic::global(
                &messages::CANNOT_WRITE_FILE_0_1,
                &[&path.display().to_string(), &source.to_string()],
            ),
            CompilerError::Spawn { tool, source } => Diagnostic::global(
                &messages::EXTERNAL_TOOL_0_FAILED_1,
                &[tool.as_str(), &source.to_string()],
            ),
            CompilerError::Unexpected { message } => {
                Diagnostic::global(&messages::UNEXPECTED_FAILURE_0, &[message.as_str()])
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CompilerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_diagnostic_codes() {
        let read = CompilerError::Read {
            path: "a.st".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let diagnostic = read.to_diagnostic();
        assert_eq!(diagnostic.code, Some(5001));
        assert_eq!(diagnostic.message, "Cannot read file 'a.st': missing.");

        let config = CompilerError::from(ConfigError::InvalidIndentSize);
        assert_eq!(config.to_diagnostic().code, Some(5003));

        let spawn = CompilerError::Spawn {
            tool: "tsc".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(spawn.to_diagnostic().code, Some(6001));
    }

    #[test]
    fn test_panic_becomes_unexpected_failure() {
        let payload = std::panic::catch_unwind(|| panic!("arena exhausted")).unwrap_err();
        let diagnostic = CompilerError::from_panic(payload.as_ref()).to_diagnostic();
        assert_eq!(diagnostic.code, Some(5004));
        assert_eq!(diagnostic.message, "Unexpected failure: arena exhausted.");

        let payload = std::panic::catch_unwind(|| panic!("{} files", 3)).unwrap_err();
        let error = CompilerError::from_panic(payload.as_ref());
        assert_eq!(error.to_string(), "unexpected failure: 3 files");
    }
}
