//! stsc_printer: AST to JavaScript.
//!
//! Converts a parsed storytailor module into a CommonJS module that builds
//! and exports a `context` object, together with source-map mappings from
//! the generated code back to the source.

mod expressions;
mod generator;
pub mod incomplete;
pub mod indent_scope;
pub mod template;
mod writer;

pub use generator::{generate, GeneratedModule, PrinterOptions, DEFAULT_ENVIRONMENT};
pub use incomplete::{collect_incomplete, MissingNodeCollector};
