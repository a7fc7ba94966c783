//! The storytailor tokenizer.
//!
//! One compiled alternation of every punctuation spelling is searched forward
//! from the current offset. A match starting at the offset is the next
//! token; otherwise everything up to the match (or the end of input) is a
//! single `Word`.

use crate::token::{Token, TokenType, PUNCTUATION};
use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashMap;
use stsc_core::text::Position;

lazy_static! {
    static ref PUNCTUATION_PATTERN: Regex = {
        let mut spellings: Vec<&str> = PUNCTUATION.iter().map(|(text, _)| *text).collect();
        // Leftmost-first alternation: `//` must be tried before `/`.
        spellings.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = spellings
            .iter()
            .map(|text| regex::escape(text))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).expect("punctuation pattern is a valid regex")
    };
    static ref PUNCTUATION_TYPES: FxHashMap<&'static str, TokenType> =
        PUNCTUATION.iter().copied().collect();
}

fn punctuation_type(text: &str) -> TokenType {
    PUNCTUATION_TYPES.get(text).copied().unwrap_or(TokenType::Word)
}

/// Streaming tokenizer over a source string.
///
/// Yields every token in order and finishes with exactly one zero-length
/// `Endfile` token.
pub struct Tokenizer<'a> {
    source: &'a str,
    offset: usize,
    position: Position,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            position: Position::zero(),
            finished: false,
        }
    }

    /// The position the next token will start at.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    fn scan(&mut self) -> Token<'a> {
        let (token_type, end) = match PUNCTUATION_PATTERN.find_at(self.source, self.offset) {
            Some(m) if m.start() == self.offset => (punctuation_type(m.as_str()), m.end()),
            Some(m) => (TokenType::Word, m.start()),
            None => (TokenType::Word, self.source.len()),
        };
        let token = Token::new(token_type, &self.source[self.offset..end], self.position);
        self.offset = end;
        self.position = token.end;
        token
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }
        if self.offset >= self.source.len() {
            self.finished = true;
            return Some(Token::new(TokenType::Endfile, "", self.position));
        }
        Some(self.scan())
    }
}

/// Tokenize a whole source file.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Tokenizer::new(source).collect()
}

/// Split the synthetic comment tokens back into their single-character
/// punctuation (`//` becomes `Slash Slash`, `/*` becomes `Slash Star`,
/// `*/` becomes `Star Slash`), keeping exact sub-positions.
pub fn expand_comments<'a>(tokens: &[Token<'a>]) -> Vec<Token<'a>> {
    let mut expanded = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !token.token_type.is_comment() {
            expanded.push(*token);
            continue;
        }
        let mut position = token.start;
        for (index, ch) in token.value.char_indices() {
            let text = &token.value[index..index + ch.len_utf8()];
            let part = Token::new(punctuation_type(text), text, position);
            position = part.end;
            expanded.push(part);
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(source: &str) -> Vec<TokenType> {
        tokenize(source).iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_empty_source_is_only_endfile() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, TokenType::Endfile);
        assert!(tokens[0].is_empty());
    }

    #[test]
    fn test_words_between_punctuation() {
        assert_eq!(
            types("a.b(c)"),
            vec![
                TokenType::Word,
                TokenType::Dot,
                TokenType::Word,
                TokenType::ParenOpen,
                TokenType::Word,
                TokenType::ParenClose,
                TokenType::Endfile,
            ]
        );
    }

    #[test]
    fn test_longest_spelling_wins() {
        assert_eq!(
            types("//x/*y*/"),
            vec![
                TokenType::CommentLine,
                TokenType::Word,
                TokenType::CommentBlockOpen,
                TokenType::Word,
                TokenType::CommentBlockClose,
                TokenType::Endfile,
            ]
        );
    }

    #[test]
    fn test_crlf_is_one_endline() {
        let tokens = tokenize("a\r\nb");
        assert_eq!(tokens[1].token_type, TokenType::Endline);
        assert_eq!(tokens[1].value, "\r\n");
        assert_eq!(tokens[2].start, Position::new(3, 1, 0));
    }

    #[test]
    fn test_expand_comments() {
        let tokens = expand_comments(&tokenize("a//b"));
        let kinds: Vec<_> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::Word,
                TokenType::Slash,
                TokenType::Slash,
                TokenType::Word,
                TokenType::Endfile,
            ]
        );
        assert_eq!(tokens[2].start, Position::new(2, 0, 2));
        assert_eq!(tokens[2].end, tokens[3].start);
    }
}
