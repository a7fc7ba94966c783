//! stsc_tokenizer: Lexer for storytailor source text.
//!
//! The tokenizer knows nothing about the grammar. It splits the source into
//! single-meaning punctuation tokens and the `Word` runs between them, so
//! that concatenating every token value reproduces the input exactly:
//! - Line breaks (`\r\n`, `\n`) and each space/tab are their own tokens
//! - Comment delimiters are recognised as synthetic tokens and can be
//!   expanded back into their punctuation with [`expand_comments`]
//! - A zero-length `Endfile` token always terminates the stream

mod token;
mod tokenizer;

pub use token::{Token, TokenType};
pub use tokenizer::{expand_comments, tokenize, Tokenizer};
