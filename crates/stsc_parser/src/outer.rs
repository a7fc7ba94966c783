//! The template (outer) grammar: indentation, line productions, text
//! content and template blocks.

use crate::parser::Parser;
use crate::utilities::{is_identifier, is_reserved_word};
use stsc_ast::node::*;
use stsc_ast::NodeType;
use stsc_core::text::{Position, TextRange};
use stsc_diagnostics::messages;
use stsc_tokenizer::TokenType;
use tracing::trace;

type LineProduction<'a> = fn(&mut Parser<'a>) -> Option<Line<'a>>;

impl<'a> Parser<'a> {
    /// Parse one line of the template grammar.
    ///
    /// Productions are tried in a fixed order because they overlap: a code
    /// block line, a delete line, an object line, a `*` statement, a comment
    /// line and finally a text line. Returns `None` (consuming nothing) for
    /// blank lines.
    pub fn parse_line(&mut self) -> Option<Line<'a>> {
        if self.is_eof() {
            return None;
        }
        let productions: [LineProduction<'a>; 6] = [
            Self::parse_code_block_line,
            Self::parse_delete_line,
            Self::parse_object_line,
            Self::parse_star_statement_line,
            Self::parse_comment_line,
            Self::parse_text_line,
        ];
        let line = productions
            .iter()
            .find_map(|production| self.try_parse(|p| production(p)));
        if let Some(line) = &line {
            trace!(node = ?line.data().node_type, line = line.data().start().line, "parse_line");
        }
        line
    }

    // ========================================================================
    // Indentation and line ends
    // ========================================================================

    /// Consume leading tabs and spaces.
    ///
    /// Columns owned by enclosing template blocks are subtracted, so lines
    /// inside `* if (...) {` are measured from the block's own level.
    pub(crate) fn parse_indent(&mut self) -> Indent {
        let start = self.current().start;
        let size = self.config.indent_size;
        let mut width = 0u32;
        loop {
            match self.current().token_type {
                TokenType::Space => width += 1,
                TokenType::Tab => width += size,
                _ => break,
            }
            self.advance();
        }
        let width = width.saturating_sub(self.block_offset);
        Indent {
            data: NodeData::new(NodeType::Indent, self.range_from(start)),
            width,
            level: width / size,
        }
    }

    /// Skip trailing trivia and consume the line break. Fails (consuming
    /// only trivia) when anything else remains on the line.
    pub(crate) fn consume_line_end(&mut self) -> bool {
        self.skip_trivia(false);
        if self.eat(TokenType::Endline).is_some() {
            return true;
        }
        self.is_eof()
    }

    /// Like `consume_line_end`, but reports and skips leftover content.
    pub(crate) fn finish_line(&mut self) {
        if self.consume_line_end() {
            return;
        }
        let start = self.current().start;
        let rest = self.rest_of_line();
        self.skip_to_line_end();
        let range = self.range_from(start);
        self.error_at(range, &messages::UNEXPECTED_END_OF_LINE, &[rest.trim_end()]);
        self.eat(TokenType::Endline);
    }

    // ========================================================================
    // Line productions
    // ========================================================================

    /// `*{ statements }` spanning any number of lines.
    fn parse_code_block_line(&mut self) -> Option<Line<'a>> {
        let start = self.current().start;
        let indent = self.parse_indent();
        self.eat(TokenType::Star)?;
        if !self.at(TokenType::BraceOpen) {
            return None;
        }
        let block = self.parse_code_block(false)?;
        let statement = self.factory.alloc(Statement::Block(*block));
        let data = NodeData::new(NodeType::OuterStatement, self.range_from(start));
        self.finish_line();
        Some(Line::Outer(OuterStatement {
            data,
            indent,
            statement,
        }))
    }

    /// `delete identifier`
    fn parse_delete_line(&mut self) -> Option<Line<'a>> {
        let start = self.current().start;
        let indent = self.parse_indent();
        let keyword = self.eat_word("delete")?;
        if !self.skip_whitespace() {
            return None;
        }
        let identifier = self.parse_object_key()?;
        let expression = self.factory.alloc(Expression::DeleteLine(DeleteLineExpression {
            data: NodeData::new(NodeType::DeleteLineExpression, self.range_from(keyword.start)),
            identifier,
        }));
        let statement = self.factory.alloc(Statement::Expression(ExpressionStatement {
            data: NodeData::new(NodeType::ExpressionStatement, expression.range()),
            expression,
        }));
        let data = NodeData::new(NodeType::OuterStatement, self.range_from(start));
        if !self.consume_line_end() {
            return None;
        }
        Some(Line::Outer(OuterStatement {
            data,
            indent,
            statement,
        }))
    }

    /// `identifier [: prototype] [<tag>...] [= initializer]`
    ///
    /// Anything else left on the line means the line is text after all.
    fn parse_object_line(&mut self) -> Option<Line<'a>> {
        let start = self.current().start;
        let indent = self.parse_indent();
        let statement_start = self.current().start;
        let identifier = self.parse_object_key()?;
        self.skip_whitespace();

        let mut prototype = None;
        if let Some(colon) = self.eat(TokenType::Colon) {
            self.skip_whitespace();
            let expression = self.parse_postfix_expression(false)?;
            prototype = Some(PrototypeExpression {
                data: NodeData::new(NodeType::PrototypeExpression, self.range_from(colon.start)),
                expression,
            });
            self.skip_whitespace();
        }

        let mut tags = Vec::new();
        while self.at(TokenType::AngleOpen) {
            tags.push(self.parse_tag()?);
            self.skip_whitespace();
        }
        for (index, tag) in tags.iter().enumerate() {
            if tags[..index].iter().any(|t: &Tag<'a>| t.name == tag.name) {
                self.error_at(tag.data.range, &messages::DUPLICATE_TAG_0, &[tag.name]);
            }
        }

        let mut initializer = None;
        if self.at(TokenType::Equals) && self.peek(1).token_type != TokenType::Equals {
            self.advance();
            self.skip_whitespace();
            initializer = Some(self.parse_expression(false)?);
        }

        let statement = self.factory.alloc(Statement::ObjectLine(ObjectLineStatement {
            data: NodeData::new(NodeType::ObjectLineStatement, self.range_from(statement_start)),
            identifier,
            prototype,
            tags: self.factory.list(tags),
            initializer,
        }));
        let data = NodeData::new(NodeType::OuterStatement, self.range_from(start));
        if !self.consume_line_end() {
            return None;
        }
        Some(Line::Outer(OuterStatement {
            data,
            indent,
            statement,
        }))
    }

    /// `* statement`
    ///
    /// Once `*` and whitespace are followed by anything, the line is code:
    /// an unparsable statement is reported rather than reread as text.
    fn parse_star_statement_line(&mut self) -> Option<Line<'a>> {
        let start = self.current().start;
        let indent = self.parse_indent();
        self.eat(TokenType::Star)?;
        if !self.skip_whitespace() || self.is_line_end() || self.at_line_comment() {
            return None;
        }
        let statement = match self.parse_statement(false) {
            Some(statement) => statement,
            None => {
                self.error(&messages::STATEMENT_EXPECTED, &[]);
                let missing = self.factory.missing_statement(TextRange::empty(self.current().start));
                self.skip_to_line_end();
                missing
            }
        };
        let data = NodeData::new(NodeType::OuterStatement, self.range_from(start));
        self.finish_line();
        Some(Line::Outer(OuterStatement {
            data,
            indent,
            statement,
        }))
    }

    /// `// comment`
    fn parse_comment_line(&mut self) -> Option<Line<'a>> {
        let start = self.current().start;
        let indent = self.parse_indent();
        if !self.at_line_comment() {
            return None;
        }
        self.advance_by(2);
        let text = self.rest_of_line();
        self.skip_to_line_end();
        let data = NodeData::new(NodeType::CommentLine, self.range_from(start));
        self.eat(TokenType::Endline);
        Some(Line::Comment(CommentLine { data, indent, text }))
    }

    /// Any other non-blank line.
    fn parse_text_line(&mut self) -> Option<Line<'a>> {
        let start = self.current().start;
        let indent = self.parse_indent();
        if self.is_line_end() {
            return None;
        }
        let content = self.parse_text_content();
        let data = NodeData::new(NodeType::TextLineStatement, self.range_from(start));
        self.eat(TokenType::Endline);
        Some(Line::Text(TextLineStatement {
            data,
            indent,
            content: self.factory.list(content),
        }))
    }

    // ========================================================================
    // Object line pieces
    // ========================================================================

    /// The name of an object or delete line: a plain word or a back-tick
    /// identifier scope.
    pub(crate) fn parse_object_key(&mut self) -> Option<&'a Expression<'a>> {
        let token = self.current();
        match token.token_type {
            TokenType::Word if is_identifier(token.value) && !is_reserved_word(token.value) => {
                self.advance();
                Some(self.factory.alloc(Expression::ContextIdentifier(Identifier {
                    data: NodeData::new(NodeType::ContextIdentifier, token.range()),
                    name: token.value,
                })))
            }
            TokenType::Backtick => {
                let (parts, _) = self.parse_quoted_parts(TokenType::Backtick);
                Some(self.factory.alloc(Expression::IdentifierScope(IdentifierScope {
                    data: NodeData::new(NodeType::IdentifierScope, self.range_from(token.start)),
                    parts: self.factory.list(parts),
                })))
            }
            _ => None,
        }
    }

    /// `<name>` or `<name = value>`
    fn parse_tag(&mut self) -> Option<Tag<'a>> {
        let open = self.eat(TokenType::AngleOpen)?;
        self.skip_whitespace();
        let name = self.eat(TokenType::Word)?;
        if !is_identifier(name.value) {
            return None;
        }
        self.skip_whitespace();
        let mut value = None;
        if self.eat(TokenType::Equals).is_some() {
            self.skip_whitespace();
            value = Some(self.parse_expression(false)?);
            self.skip_whitespace();
        }
        self.eat(TokenType::AngleClose)?;
        Some(Tag {
            data: NodeData::new(NodeType::Tag, self.range_from(open.start)),
            name: name.value,
            value,
        })
    }

    // ========================================================================
    // Text content
    // ========================================================================

    fn flush_chunk(&mut self, parts: &mut Vec<TextContent<'a>>, chunk_start: &mut Option<Position>) {
        if let Some(start) = chunk_start.take() {
            let range = self.range_from(start);
            if !range.is_empty() {
                parts.push(TextContent::Text(TextChunk {
                    data: NodeData::new(NodeType::TextChunk, range),
                    text: self.slice(range),
                }));
            }
        }
    }

    /// Text up to the end of the line. `\` makes the next token literal
    /// and is dropped; `*expr` becomes an include.
    fn parse_text_content(&mut self) -> Vec<TextContent<'a>> {
        let mut parts = Vec::new();
        let mut chunk_start = None;
        while !self.is_line_end() {
            match self.current().token_type {
                TokenType::Backslash => {
                    self.flush_chunk(&mut parts, &mut chunk_start);
                    self.advance();
                    if !self.is_line_end() {
                        chunk_start = Some(self.advance().start);
                    }
                }
                TokenType::Star => {
                    // The pending chunk must end before the include is consumed.
                    if self.look_ahead(Self::parse_include).is_some() {
                        self.flush_chunk(&mut parts, &mut chunk_start);
                        parts.extend(self.parse_include());
                    } else {
                        let star = self.advance();
                        chunk_start.get_or_insert(star.start);
                    }
                }
                _ => {
                    let token = self.advance();
                    chunk_start.get_or_insert(token.start);
                }
            }
        }
        self.flush_chunk(&mut parts, &mut chunk_start);
        parts
    }

    /// Text between quotes. Single and double quoted text ends at the end of
    /// the line; back-tick text may span lines. Returns the parts and the
    /// closing quote's range when found.
    pub(crate) fn parse_quoted_parts(
        &mut self,
        quote: TokenType,
    ) -> (Vec<TextContent<'a>>, Option<TextRange>) {
        let open = self.advance();
        let mut parts = Vec::new();
        let mut chunk_start = None;
        loop {
            let token = self.current();
            if token.token_type == quote {
                self.flush_chunk(&mut parts, &mut chunk_start);
                self.advance();
                return (parts, Some(token.range()));
            }
            if token.token_type == TokenType::Endfile
                || (token.token_type == TokenType::Endline && quote != TokenType::Backtick)
            {
                self.flush_chunk(&mut parts, &mut chunk_start);
                self.error_at(open.range(), &messages::UNTERMINATED_STRING_LITERAL, &[]);
                return (parts, None);
            }
            match token.token_type {
                TokenType::Backslash if self.peek(1).token_type == TokenType::Star => {
                    // `\*` is a literal star; other escapes stay as written.
                    self.flush_chunk(&mut parts, &mut chunk_start);
                    self.advance();
                    chunk_start = Some(self.advance().start);
                }
                TokenType::Backslash => {
                    chunk_start.get_or_insert(token.start);
                    self.advance();
                    if !self.is_eof() {
                        self.advance();
                    }
                }
                TokenType::Star => {
                    if self.look_ahead(Self::parse_include).is_some() {
                        self.flush_chunk(&mut parts, &mut chunk_start);
                        parts.extend(self.parse_include());
                    } else {
                        self.advance();
                        chunk_start.get_or_insert(token.start);
                    }
                }
                _ => {
                    self.advance();
                    chunk_start.get_or_insert(token.start);
                }
            }
        }
    }

    /// `*expr` where `expr` starts right after the star.
    fn parse_include(&mut self) -> Option<TextContent<'a>> {
        let star = self.eat(TokenType::Star)?;
        let next = self.current();
        if next.token_type.is_whitespace() || next.token_type.is_line_end() || self.at_line_comment() {
            return None;
        }
        let expression = self.parse_postfix_expression(false)?;
        Some(TextContent::Include(StringIncludeStatement {
            data: NodeData::new(NodeType::StringIncludeStatement, self.range_from(star.start)),
            expression,
        }))
    }

    // ========================================================================
    // Template blocks
    // ========================================================================

    /// A `{` ending a single-line statement: template lines until `* }`.
    /// The statement continues on the closing line after the `}`.
    pub(crate) fn parse_template_block(&mut self) -> Option<Block<'a>> {
        let open = self.eat(TokenType::BraceOpen)?;
        self.skip_trivia(false);
        self.eat(TokenType::Endline);

        let locals = self.locals.len();
        self.block_offset += self.config.indent_size;
        let mut lines = Vec::new();
        let mut close = None;
        loop {
            if self.is_eof() {
                self.error_at(open.range(), &messages::TEMPLATE_BLOCK_NOT_CLOSED, &[]);
                break;
            }
            if let Some(range) = self.try_parse(Self::parse_template_block_close) {
                close = Some(range);
                break;
            }
            let before = self.cursor;
            if let Some(line) = self.parse_line() {
                lines.push(line);
            }
            if self.cursor == before {
                self.advance();
            }
        }
        self.block_offset -= self.config.indent_size;
        self.locals.truncate(locals);

        let scope = self.factory.scope(open.range(), lines, close);
        Some(Block {
            data: NodeData::new(NodeType::BlockStatement, self.range_from(open.start)),
            body: BlockBody::Template(scope),
            scoped: true,
        })
    }

    /// `* }` at the start of a line.
    fn parse_template_block_close(&mut self) -> Option<TextRange> {
        self.skip_whitespace();
        self.eat(TokenType::Star)?;
        self.skip_whitespace();
        let close = self.eat(TokenType::BraceClose)?;
        Some(close.range())
    }
}
