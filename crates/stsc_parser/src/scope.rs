//! The generic bracketed-region parser.
//!
//! Parameter lists, argument lists, array and object literals, code blocks
//! and parenthesized conditions all go through [`Parser::parse_scope`].

use crate::parser::Parser;
use stsc_ast::node::Scope;
use stsc_diagnostics::messages;
use stsc_tokenizer::TokenType;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ScopeOptions {
    /// Token required between items.
    pub separator: Option<TokenType>,
    /// Whether items may continue across lines. Single-line scopes end at
    /// the end of the line with a missing-delimiter diagnostic.
    pub multiline: bool,
}

impl ScopeOptions {
    pub fn separated(separator: TokenType, multiline: bool) -> Self {
        Self {
            separator: Some(separator),
            multiline,
        }
    }

    pub fn unseparated(multiline: bool) -> Self {
        Self {
            separator: None,
            multiline,
        }
    }
}

impl<'a> Parser<'a> {
    /// Parse `open item (sep item)* close`.
    ///
    /// Returns `None` without consuming anything when the current token is
    /// not `open`. Otherwise always returns a scope; a missing `close` is
    /// reported and leaves `close` empty. Tokens no item accepts are
    /// reported and skipped one at a time.
    pub(crate) fn parse_scope<T: Copy>(
        &mut self,
        open: TokenType,
        close: TokenType,
        options: ScopeOptions,
        mut item: impl FnMut(&mut Self) -> Option<T>,
    ) -> Option<Scope<'a, T>> {
        let open_token = self.eat(open)?;
        let close_text = close.text().unwrap_or("token");
        let mut items = Vec::new();
        let mut close_range = None;
        let mut needs_separator = false;

        loop {
            self.skip_trivia(options.multiline);
            if let Some(token) = self.eat(close) {
                close_range = Some(token.range());
                break;
            }
            if self.is_eof() || (!options.multiline && self.is_line_end()) {
                self.expected(close_text);
                break;
            }
            if let Some(separator) = options.separator {
                if self.at(separator) {
                    if !needs_separator {
                        self.error(&messages::UNEXPECTED_TOKEN_0, &[self.current().value]);
                    }
                    self.advance();
                    needs_separator = false;
                    continue;
                }
                if needs_separator {
                    self.expected(separator.text().unwrap_or(","));
                }
            }

            let before = self.cursor;
            if let Some(value) = self.try_parse(&mut item) {
                items.push(value);
                needs_separator = options.separator.is_some();
                if self.cursor == before {
                    self.advance();
                }
                continue;
            }

            let token = self.advance();
            self.error_at(token.range(), &messages::UNEXPECTED_TOKEN_0, &[token.value]);
        }

        Some(self.factory.scope(open_token.range(), items, close_range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use crate::parser::ParserConfig;

    fn word_list(source: &str, multiline: bool) -> (Vec<String>, bool, usize) {
        let arena = Bump::new();
        let mut parser = Parser::from_source(&arena, source, "test.st", ParserConfig::default());
        let scope = parser
            .parse_scope(
                TokenType::ParenOpen,
                TokenType::ParenClose,
                ScopeOptions::separated(TokenType::Comma, multiline),
                |p| p.eat(TokenType::Word).map(|t| t.value),
            )
            .unwrap();
        (
            scope.items.iter().map(|s| s.to_string()).collect(),
            scope.is_closed(),
            parser.diagnostics().len(),
        )
    }

    #[test]
    fn test_separated_items() {
        assert_eq!(word_list("(a, b ,c)", false), (vec!["a".into(), "b".into(), "c".into()], true, 0));
    }

    #[test]
    fn test_unexpected_token_is_skipped() {
        let (items, closed, errors) = word_list("(a, ] b)", false);
        assert_eq!(items, vec!["a".to_string(), "b".to_string()]);
        assert!(closed);
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_single_line_scope_breaks_at_line_end() {
        let (items, closed, errors) = word_list("(a,\nb)", false);
        assert_eq!(items, vec!["a".to_string()]);
        assert!(!closed);
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_multiline_scope_spans_lines() {
        let (items, closed, errors) = word_list("(a,\n  b\n)", true);
        assert_eq!(items.len(), 2);
        assert!(closed);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_not_at_open_consumes_nothing() {
        let arena = Bump::new();
        let mut parser = Parser::from_source(&arena, "a)", "test.st", ParserConfig::default());
        let scope = parser.parse_scope(
            TokenType::ParenOpen,
            TokenType::ParenClose,
            ScopeOptions::unseparated(false),
            |p| p.eat(TokenType::Word),
        );
        assert!(scope.is_none());
        assert_eq!(parser.cursor(), 0);
    }
}
