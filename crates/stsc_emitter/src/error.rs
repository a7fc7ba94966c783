//! Emitter error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EmitError {
    /// The file the failure concerns.
    pub fn path(&self) -> &std::path::Path {
        match self {
            EmitError::Write { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, EmitError>;
