//! stsc_core: Core utilities for the storytailor compiler.
//!
//! Provides the position and range types shared by every stage of the
//! pipeline: tokens, AST nodes, diagnostics and source-map entries all
//! carry them.

pub mod text;

// Re-export commonly used types
pub use text::{Position, TextRange};
