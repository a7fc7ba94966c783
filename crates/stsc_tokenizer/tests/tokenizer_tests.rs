//! Tokenizer integration tests.
//!
//! Verifies token classes, exact source round-tripping and position
//! bookkeeping over storytailor sources.

use proptest::prelude::*;
use stsc_core::text::Position;
use stsc_tokenizer::{expand_comments, tokenize, Token, TokenType};

/// Helper: tokenize and return (type, value) pairs without the trailing Endfile.
fn scan_all(source: &str) -> Vec<(TokenType, String)> {
    tokenize(source)
        .into_iter()
        .filter(|t| t.token_type != TokenType::Endfile)
        .map(|t| (t.token_type, t.value.to_string()))
        .collect()
}

fn join(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.value).collect()
}

// ============================================================================
// Token classes
// ============================================================================

#[test]
fn test_object_line() {
    let tokens = scan_all("hero : base <brave> = 10");
    let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            TokenType::Word,
            TokenType::Space,
            TokenType::Colon,
            TokenType::Space,
            TokenType::Word,
            TokenType::Space,
            TokenType::AngleOpen,
            TokenType::Word,
            TokenType::AngleClose,
            TokenType::Space,
            TokenType::Equals,
            TokenType::Space,
            TokenType::Word,
        ]
    );
    assert_eq!(tokens[0].1, "hero");
    assert_eq!(tokens[12].1, "10");
}

#[test]
fn test_each_whitespace_character_is_a_token() {
    let kinds: Vec<_> = scan_all("\t  x").into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        vec![TokenType::Tab, TokenType::Space, TokenType::Space, TokenType::Word]
    );
}

#[test]
fn test_unicode_word() {
    let tokens = scan_all("héros dragón");
    assert_eq!(tokens[0], (TokenType::Word, "héros".to_string()));
    assert_eq!(tokens[2], (TokenType::Word, "dragón".to_string()));
}

#[test]
fn test_operators_are_single_characters() {
    let kinds: Vec<_> = scan_all(">>>=").into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        vec![
            TokenType::AngleClose,
            TokenType::AngleClose,
            TokenType::AngleClose,
            TokenType::Equals,
        ]
    );
}

#[test]
fn test_endfile_is_last_and_zero_length() {
    let tokens = tokenize("a\n");
    let last = tokens.last().unwrap();
    assert_eq!(last.token_type, TokenType::Endfile);
    assert_eq!(last.length, 0);
    assert_eq!(last.start, Position::new(2, 1, 0));
    assert_eq!(
        tokens.iter().filter(|t| t.token_type == TokenType::Endfile).count(),
        1
    );
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_block_comment_expansion_positions() {
    let tokens = expand_comments(&tokenize("/*x*/"));
    let kinds: Vec<_> = tokens.iter().map(|t| t.token_type).collect();
    assert_eq!(
        kinds,
        vec![
            TokenType::Slash,
            TokenType::Star,
            TokenType::Word,
            TokenType::Star,
            TokenType::Slash,
            TokenType::Endfile,
        ]
    );
    for pair in tokens.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(join(&tokens), "/*x*/");
}

// ============================================================================
// Properties
// ============================================================================

fn source_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Arbitrary printable text
        "\\PC{0,80}",
        // Storytailor-flavoured lines
        "([a-z]{1,6}|[ \t]{1,4}|\\*|\\{|\\}|//|/\\*|\\*/|\r\n|\n|[=<>:@'\"`.,()])*",
    ]
}

proptest! {
    #[test]
    fn prop_round_trip(source in source_strategy()) {
        let tokens = tokenize(&source);
        prop_assert_eq!(join(&tokens), source.clone());
        prop_assert_eq!(join(&expand_comments(&tokens)), source);
    }

    #[test]
    fn prop_positions_are_contiguous(source in source_strategy()) {
        let tokens = tokenize(&source);
        prop_assert_eq!(tokens[0].start, Position::zero());
        for pair in tokens.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
            prop_assert_eq!(pair[0].end.offset, pair[0].start.offset + pair[0].length);
        }
    }

    #[test]
    fn prop_lines_advance_only_on_endline(source in source_strategy()) {
        let tokens = tokenize(&source);
        for token in &tokens {
            if token.token_type == TokenType::Endline {
                prop_assert_eq!(token.end.line, token.start.line + 1);
                prop_assert_eq!(token.end.column, 0);
            } else {
                prop_assert_eq!(token.end.line, token.start.line);
            }
        }
    }
}
