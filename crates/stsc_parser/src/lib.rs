//! stsc_parser: Recursive descent parser for storytailor.
//!
//! Parses the token stream from the tokenizer into an arena-allocated AST.
//! Two grammars interleave: indentation-structured template lines on the
//! outside and JavaScript-like statements and expressions inside `*` lines,
//! `*{ ... }` blocks, includes and initializers. Malformed input produces
//! diagnostics and placeholder nodes; parsing never aborts.

mod expressions;
mod operators;
mod outer;
mod parser;
mod scope;
mod statements;
mod utilities;

pub use parser::{parse_module, ParseResult, Parser, ParserConfig};
pub use utilities::{is_identifier, is_reserved_word};
