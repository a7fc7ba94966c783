//! stsc_ast: Abstract Syntax Tree definitions for storytailor.
//!
//! This module defines the node types of both grammars (the indentation
//! structured template lines and the embedded JavaScript-like code), the
//! `NodeType` tag enum, operator enums, an arena-backed node factory and a
//! visitor trait for traversal.

pub mod factory;
pub mod node;
pub mod node_type;
pub mod operators;
pub mod visitor;

// Re-export key types
pub use factory::NodeFactory;
pub use node::*;
pub use node_type::NodeType;
pub use operators::{BinaryOperator, UnaryOperator, UpdateOperator};
