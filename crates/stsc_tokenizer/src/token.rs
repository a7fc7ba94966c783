//! Token information produced by the tokenizer.

use std::fmt;
use stsc_core::text::{Position, TextRange};

/// The closed set of token classes.
///
/// Every class except `Word` and `Endfile` corresponds to exactly one
/// literal spelling (two for `Endline`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Endline,
    Space,
    Tab,
    Colon,
    Semicolon,
    Dot,
    Comma,
    Star,
    Slash,
    Backslash,
    ParenOpen,
    ParenClose,
    BraceOpen,
    BraceClose,
    BracketOpen,
    BracketClose,
    AngleOpen,
    AngleClose,
    Equals,
    Plus,
    Minus,
    Percent,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    Exclamation,
    Question,
    At,
    Hash,
    SingleQuote,
    DoubleQuote,
    Backtick,
    CommentLine,
    CommentBlockOpen,
    CommentBlockClose,
    Word,
    Endfile,
}

/// Literal spellings of every punctuation class.
pub(crate) const PUNCTUATION: &[(&str, TokenType)] = &[
    ("\r\n", TokenType::Endline),
    ("\n", TokenType::Endline),
    (" ", TokenType::Space),
    ("\t", TokenType::Tab),
    (":", TokenType::Colon),
    (";", TokenType::Semicolon),
    (".", TokenType::Dot),
    (",", TokenType::Comma),
    ("*", TokenType::Star),
    ("/", TokenType::Slash),
    ("\\", TokenType::Backslash),
    ("(", TokenType::ParenOpen),
    (")", TokenType::ParenClose),
    ("{", TokenType::BraceOpen),
    ("}", TokenType::BraceClose),
    ("[", TokenType::BracketOpen),
    ("]", TokenType::BracketClose),
    ("<", TokenType::AngleOpen),
    (">", TokenType::AngleClose),
    ("=", TokenType::Equals),
    ("+", TokenType::Plus),
    ("-", TokenType::Minus),
    ("%", TokenType::Percent),
    ("&", TokenType::Ampersand),
    ("|", TokenType::Pipe),
    ("^", TokenType::Caret),
    ("~", TokenType::Tilde),
    ("!", TokenType::Exclamation),
    ("?", TokenType::Question),
    ("@", TokenType::At),
    ("#", TokenType::Hash),
    ("'", TokenType::SingleQuote),
    ("\"", TokenType::DoubleQuote),
    ("`", TokenType::Backtick),
    ("//", TokenType::CommentLine),
    ("/*", TokenType::CommentBlockOpen),
    ("*/", TokenType::CommentBlockClose),
];

impl TokenType {
    /// The canonical spelling of a punctuation class, or `None` for `Word`
    /// and `Endfile`.
    pub fn text(self) -> Option<&'static str> {
        match self {
            TokenType::Endline => Some("\n"),
            TokenType::Word | TokenType::Endfile => None,
            other => PUNCTUATION
                .iter()
                .find(|(_, ty)| *ty == other)
                .map(|(text, _)| *text),
        }
    }

    /// Space or tab.
    #[inline]
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenType::Space | TokenType::Tab)
    }

    /// The synthetic comment delimiters.
    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenType::CommentLine | TokenType::CommentBlockOpen | TokenType::CommentBlockClose
        )
    }

    /// Whether this token ends the current line (or the whole input).
    #[inline]
    pub fn is_line_end(self) -> bool {
        matches!(self, TokenType::Endline | TokenType::Endfile)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Endline => write!(f, "end of line"),
            TokenType::Endfile => write!(f, "end of file"),
            TokenType::Word => write!(f, "word"),
            other => write!(f, "{}", other.text().unwrap_or_default()),
        }
    }
}

/// A token: a slice of the source text with its class and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub token_type: TokenType,
    /// The exact source text of this token.
    pub value: &'a str,
    pub start: Position,
    pub end: Position,
    /// Length of `value` in bytes.
    pub length: u32,
}

impl<'a> Token<'a> {
    pub fn new(token_type: TokenType, value: &'a str, start: Position) -> Self {
        Self {
            token_type,
            value,
            start,
            end: start.advance(value),
            length: value.len() as u32,
        }
    }

    #[inline]
    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }

    /// A word token with exactly the given text.
    #[inline]
    pub fn is_word(&self, text: &str) -> bool {
        self.token_type == TokenType::Word && self.value == text
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_type_text() {
        assert_eq!(TokenType::Star.text(), Some("*"));
        assert_eq!(TokenType::CommentBlockClose.text(), Some("*/"));
        assert_eq!(TokenType::Endline.text(), Some("\n"));
        assert_eq!(TokenType::Word.text(), None);
    }

    #[test]
    fn test_token_end_position() {
        let token = Token::new(TokenType::Word, "héllo", Position::new(4, 1, 2));
        assert_eq!(token.end, Position::new(10, 1, 7));
        assert_eq!(token.length, 6);
    }

    #[test]
    fn test_endline_token_moves_to_next_line() {
        let token = Token::new(TokenType::Endline, "\r\n", Position::new(3, 0, 3));
        assert_eq!(token.end, Position::new(5, 1, 0));
    }
}
