//! The storytailor parser core: token management, backtracking and the
//! module-level recovery loop.
//!
//! Grammar productions live in sibling modules (`outer`, `statements`,
//! `expressions`, `scope`) as further `impl Parser` blocks.

use bumpalo::Bump;
use stsc_ast::node::*;
use stsc_ast::{NodeFactory, NodeType};
use stsc_core::text::{Position, TextRange};
use stsc_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use stsc_tokenizer::{expand_comments, tokenize, Token, TokenType};
use tracing::trace;

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Parser settings fixed for one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Columns per indentation level. Tabs count as this many columns.
    pub indent_size: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { indent_size: 2 }
    }
}

/// The result of parsing one module.
pub struct ParseResult<'a> {
    pub module: &'a Module<'a>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Saved parser state for backtracking.
pub(crate) struct Checkpoint {
    cursor: usize,
    diagnostics: usize,
    imports: usize,
    locals: usize,
    block_offset: u32,
}

/// The parser produces a `Module` AST from a storytailor token stream.
pub struct Parser<'a> {
    pub(crate) factory: NodeFactory<'a>,
    pub(crate) source: &'a str,
    pub(crate) path: &'a str,
    pub(crate) tokens: Vec<Token<'a>>,
    pub(crate) cursor: usize,
    pub(crate) config: ParserConfig,
    pub(crate) diagnostics: DiagnosticCollection,
    /// Imports seen so far, anywhere in the file.
    pub(crate) imports: Vec<ImportStatement<'a>>,
    /// Names bound as plain JavaScript locals (parameters, `@` variables,
    /// imports, catch bindings) in the scopes enclosing the cursor.
    pub(crate) locals: Vec<&'a str>,
    /// Columns of indentation owned by enclosing template blocks.
    pub(crate) block_offset: u32,
    recursion_depth: u32,
}

/// Tokenize and parse a whole source file.
pub fn parse_module<'a>(
    arena: &'a Bump,
    source: &'a str,
    path: &'a str,
    config: ParserConfig,
) -> ParseResult<'a> {
    Parser::from_source(arena, source, path, config).parse_module()
}

impl<'a> Parser<'a> {
    /// Create a parser over an existing token stream.
    ///
    /// `tokens` must come from tokenizing `source`. Comment tokens are
    /// expanded into their punctuation here.
    pub fn new(
        arena: &'a Bump,
        source: &'a str,
        tokens: &[Token<'a>],
        path: &'a str,
        config: ParserConfig,
    ) -> Self {
        let mut tokens = expand_comments(tokens);
        if tokens.last().map_or(true, |t| t.token_type != TokenType::Endfile) {
            let end = tokens.last().map_or(Position::zero(), |t| t.end);
            tokens.push(Token::new(TokenType::Endfile, "", end));
        }
        Self {
            factory: NodeFactory::new(arena),
            source,
            path,
            tokens,
            cursor: 0,
            config: ParserConfig {
                indent_size: config.indent_size.max(1),
            },
            diagnostics: DiagnosticCollection::new(),
            imports: Vec::new(),
            locals: Vec::new(),
            block_offset: 0,
            recursion_depth: 0,
        }
    }

    /// Tokenize `source` and create a parser over it.
    pub fn from_source(
        arena: &'a Bump,
        source: &'a str,
        path: &'a str,
        config: ParserConfig,
    ) -> Self {
        Self::new(arena, source, &tokenize(source), path, config)
    }

    /// Parse the whole token stream into a module.
    ///
    /// Each iteration parses one line; when no line production accepts the
    /// input, exactly one token is skipped, so the loop always terminates.
    pub fn parse_module(mut self) -> ParseResult<'a> {
        trace!(path = self.path, tokens = self.tokens.len(), "parse_module");
        let mut lines = Vec::new();
        while !self.is_eof() {
            let before = self.cursor;
            if let Some(line) = self.parse_line() {
                lines.push(line);
            }
            if self.cursor == before {
                self.advance();
            }
        }

        let end = self.current().end;
        let module = self.factory.alloc(Module {
            data: NodeData::new(NodeType::Module, TextRange::new(Position::zero(), end)),
            path: self.path,
            lines: self.factory.list(lines),
            imports: self.factory.list(std::mem::take(&mut self.imports)),
        });
        self.diagnostics.sort();
        ParseResult {
            module,
            diagnostics: self.diagnostics.into_diagnostics(),
        }
    }

    /// Index of the current token.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.diagnostics()
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn current(&self) -> Token<'a> {
        self.peek(0)
    }

    /// The token `n` positions ahead; the final `Endfile` repeats forever.
    #[inline]
    pub(crate) fn peek(&self, n: usize) -> Token<'a> {
        let index = (self.cursor + n).min(self.tokens.len() - 1);
        self.tokens[index]
    }

    #[inline]
    pub(crate) fn at(&self, token_type: TokenType) -> bool {
        self.current().token_type == token_type
    }

    #[inline]
    pub(crate) fn at_word(&self, text: &str) -> bool {
        self.current().is_word(text)
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.at(TokenType::Endfile)
    }

    /// At `Endline` or `Endfile`.
    #[inline]
    pub(crate) fn is_line_end(&self) -> bool {
        self.current().token_type.is_line_end()
    }

    /// Consume the current token. `Endfile` is never consumed.
    pub(crate) fn advance(&mut self) -> Token<'a> {
        let token = self.current();
        if token.token_type != TokenType::Endfile {
            self.cursor += 1;
        }
        token
    }

    pub(crate) fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    pub(crate) fn eat(&mut self, token_type: TokenType) -> Option<Token<'a>> {
        if self.at(token_type) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub(crate) fn eat_word(&mut self, text: &str) -> Option<Token<'a>> {
        if self.at_word(text) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// End of the last consumed token.
    pub(crate) fn previous_end(&self) -> Position {
        if self.cursor == 0 {
            return self.current().start;
        }
        self.tokens[self.cursor - 1].end
    }

    /// The range from `start` to the end of the last consumed token.
    pub(crate) fn range_from(&self, start: Position) -> TextRange {
        let end = self.previous_end();
        if end.offset < start.offset {
            TextRange::empty(start)
        } else {
            TextRange::new(start, end)
        }
    }

    /// Source text between two positions.
    pub(crate) fn slice(&self, range: TextRange) -> &'a str {
        &self.source[range.to_range()]
    }

    /// Source text from the current token to the end of the line.
    pub(crate) fn rest_of_line(&self) -> &'a str {
        let start = self.current().start;
        let mut index = self.cursor;
        while !self.tokens[index].token_type.is_line_end() {
            index += 1;
        }
        self.slice(TextRange::new(start, self.tokens[index].start))
    }

    /// Skip to the `Endline` ending the current line (not consuming it).
    pub(crate) fn skip_to_line_end(&mut self) {
        while !self.is_line_end() {
            self.advance();
        }
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    /// Skip spaces and tabs. Returns whether anything was skipped.
    pub(crate) fn skip_whitespace(&mut self) -> bool {
        let before = self.cursor;
        while self.current().token_type.is_whitespace() {
            self.advance();
        }
        self.cursor != before
    }

    #[inline]
    pub(crate) fn at_line_comment(&self) -> bool {
        self.at(TokenType::Slash) && self.peek(1).token_type == TokenType::Slash
    }

    #[inline]
    pub(crate) fn at_block_comment(&self) -> bool {
        self.at(TokenType::Slash) && self.peek(1).token_type == TokenType::Star
    }

    /// Skip whitespace and comments, and line breaks too when `multiline`.
    pub(crate) fn skip_trivia(&mut self, multiline: bool) {
        loop {
            let token = self.current();
            if token.token_type.is_whitespace() || (multiline && token.is(TokenType::Endline)) {
                self.advance();
            } else if self.at_line_comment() {
                self.skip_to_line_end();
            } else if self.at_block_comment() {
                self.skip_block_comment();
            } else {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let open = self.current().range();
        self.advance_by(2);
        loop {
            if self.is_eof() {
                self.error_at(open, &messages::UNTERMINATED_COMMENT, &[]);
                return;
            }
            if self.at(TokenType::Star) && self.peek(1).token_type == TokenType::Slash {
                self.advance_by(2);
                return;
            }
            self.advance();
        }
    }

    /// Whether only trivia remains on this line.
    pub(crate) fn at_end_of_line_ignoring_trivia(&mut self) -> bool {
        self.look_ahead(|p| {
            p.skip_trivia(false);
            p.is_line_end()
        })
    }

    // ========================================================================
    // Backtracking
    // ========================================================================

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.cursor,
            diagnostics: self.diagnostics.len(),
            imports: self.imports.len(),
            locals: self.locals.len(),
            block_offset: self.block_offset,
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.cursor;
        self.diagnostics.truncate(checkpoint.diagnostics);
        self.imports.truncate(checkpoint.imports);
        self.locals.truncate(checkpoint.locals);
        self.block_offset = checkpoint.block_offset;
    }

    /// Run a production; if it returns `None`, rewind every side effect.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        let result = f(self);
        if result.is_none() {
            self.restore(checkpoint);
        }
        result
    }

    /// Look ahead: run `f` and rewind unconditionally.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let checkpoint = self.checkpoint();
        let result = f(self);
        self.restore(checkpoint);
        result
    }

    /// Guard against runaway recursion. Returns `false` (after reporting)
    /// when the limit is hit; callers must then call `leave` regardless.
    pub(crate) fn enter(&mut self) -> bool {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            if self.recursion_depth == MAX_RECURSION_DEPTH + 1 {
                self.error(&messages::NESTING_TOO_DEEP, &[]);
            }
            return false;
        }
        true
    }

    pub(crate) fn leave(&mut self) {
        self.recursion_depth -= 1;
    }

    // ========================================================================
    // Locals
    // ========================================================================

    pub(crate) fn declare_local(&mut self, name: &'a str) {
        self.locals.push(name);
    }

    pub(crate) fn is_local(&self, name: &str) -> bool {
        self.locals.iter().rev().any(|local| *local == name)
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Report at the current token.
    pub(crate) fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let range = self.current().range();
        self.error_at(range, message, args);
    }

    pub(crate) fn error_at(&mut self, range: TextRange, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics.add(Diagnostic::new(message, range, args));
    }

    /// Report `'x' expected` at the current token.
    pub(crate) fn expected(&mut self, text: &str) {
        self.error(&messages::_0_EXPECTED, &[text]);
    }

    /// Consume `token_type` or report it as expected.
    pub(crate) fn expect(&mut self, token_type: TokenType) -> Option<Token<'a>> {
        let token = self.eat(token_type);
        if token.is_none() {
            self.expected(token_type.text().unwrap_or("token"));
        }
        token
    }
}
