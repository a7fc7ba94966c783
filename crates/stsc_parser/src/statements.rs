//! Statement productions of the embedded code grammar, plus code blocks.

use crate::parser::Parser;
use crate::scope::ScopeOptions;
use crate::utilities::{is_identifier, is_reserved_word};
use stsc_ast::node::*;
use stsc_ast::NodeType;
use stsc_core::text::TextRange;
use stsc_diagnostics::messages;
use stsc_tokenizer::TokenType;
use tracing::trace;

impl<'a> Parser<'a> {
    /// Parse one statement.
    ///
    /// In single-line mode the statement ends with the line (or continues
    /// through a template block); in multi-line mode it may span lines.
    /// Consumes nothing when no statement starts here.
    pub fn parse_statement(&mut self, multiline: bool) -> Option<&'a Statement<'a>> {
        self.try_parse(|p| {
            if !p.enter() {
                p.leave();
                let range = TextRange::empty(p.current().start);
                p.skip_to_line_end();
                return Some(p.factory.missing_statement(range));
            }
            let statement = p.parse_statement_worker(multiline);
            p.leave();
            let statement = statement?;
            p.try_parse(|p| {
                p.skip_whitespace();
                p.eat(TokenType::Semicolon)
            });
            Some(statement)
        })
    }

    fn parse_statement_worker(&mut self, multiline: bool) -> Option<&'a Statement<'a>> {
        let token = self.current();
        trace!(token = token.value, multiline, "parse_statement");
        let statement = match token.token_type {
            TokenType::BraceOpen => Statement::Block(*self.parse_block(multiline)?),
            TokenType::Semicolon => {
                self.advance();
                Statement::Empty(NodeData::new(NodeType::EmptyStatement, token.range()))
            }
            TokenType::Word => match token.value {
                "let" | "const" | "var" => {
                    Statement::Variable(self.parse_variable_declaration(multiline, true)?)
                }
                "function" | "async" if self.at_function_declaration() => {
                    Statement::Function(self.parse_function_declaration(multiline)?)
                }
                "if" => Statement::If(self.parse_if_statement(multiline)),
                "switch" => Statement::Switch(self.parse_switch_statement(multiline)),
                "case" | "default" => Statement::Case(self.parse_case_statement(multiline)?),
                "while" => Statement::While(self.parse_while_statement(multiline)),
                "do" => Statement::DoWhile(self.parse_do_while_statement(multiline)),
                "for" => self.parse_for_statement(multiline),
                "try" => Statement::Try(self.parse_try_statement(multiline)),
                "throw" => Statement::Throw(self.parse_throw_statement(multiline)),
                "import" => return self.parse_import_statement(),
                "break" => {
                    let (data, label) = self.parse_jump(NodeType::BreakStatement);
                    Statement::Break(BreakStatement { data, label })
                }
                "continue" => {
                    let (data, label) = self.parse_jump(NodeType::ContinueStatement);
                    Statement::Continue(ContinueStatement { data, label })
                }
                "return" => Statement::Return(self.parse_return_statement(multiline)),
                "debugger" => {
                    self.advance();
                    Statement::Debugger(NodeData::new(NodeType::DebuggerStatement, token.range()))
                }
                _ => self.parse_expression_statement(multiline)?,
            },
            _ => self.parse_expression_statement(multiline)?,
        };
        Some(self.factory.alloc(statement))
    }

    fn parse_expression_statement(&mut self, multiline: bool) -> Option<Statement<'a>> {
        let expression = self.parse_expression(multiline)?;
        Some(Statement::Expression(ExpressionStatement {
            data: NodeData::new(NodeType::ExpressionStatement, expression.range()),
            expression,
        }))
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    /// Parse a block body.
    ///
    /// In single-line mode a `{` that ends its line opens a template block;
    /// otherwise `{` opens a code block of multi-line statements.
    pub(crate) fn parse_block(&mut self, multiline: bool) -> Option<&'a Block<'a>> {
        self.try_parse(|p| {
            p.skip_trivia(multiline);
            if !p.at(TokenType::BraceOpen) {
                return None;
            }
            if !multiline && p.look_ahead(|p| {
                p.advance();
                p.at_end_of_line_ignoring_trivia()
            }) {
                let block = p.parse_template_block()?;
                return Some(p.factory.alloc(block));
            }
            p.parse_code_block(true)
        })
    }

    /// `{ statements }`. Unscoped blocks (the `*{ }` line form) leave their
    /// `@` declarations visible to the rest of the file.
    pub(crate) fn parse_code_block(&mut self, scoped: bool) -> Option<&'a Block<'a>> {
        let start = self.current().start;
        let locals = self.locals.len();
        let scope = self.parse_scope(
            TokenType::BraceOpen,
            TokenType::BraceClose,
            ScopeOptions::unseparated(true),
            |p| p.parse_statement(true).copied(),
        )?;
        if scoped {
            self.locals.truncate(locals);
        }
        Some(self.factory.alloc(Block {
            data: NodeData::new(NodeType::BlockStatement, self.range_from(start)),
            body: BlockBody::Code(scope),
            scoped,
        }))
    }

    /// A block, or `'{' expected` and an empty placeholder block.
    fn expect_block(&mut self, multiline: bool) -> &'a Block<'a> {
        if let Some(block) = self.parse_block(multiline) {
            return block;
        }
        self.expected("{");
        let range = TextRange::empty(self.current().start);
        let scope = self.factory.scope(range, Vec::new(), None);
        self.factory.alloc(Block {
            data: NodeData::new(NodeType::BlockStatement, range),
            body: BlockBody::Code(scope),
            scoped: true,
        })
    }

    /// The body of `if`, `while` and `for`: a block or a single statement.
    fn parse_body(&mut self, multiline: bool) -> &'a Statement<'a> {
        if let Some(block) = self.parse_block(multiline) {
            return self.factory.alloc(Statement::Block(*block));
        }
        let statement = self.try_parse(|p| {
            p.skip_trivia(multiline);
            p.parse_statement(multiline)
        });
        match statement {
            Some(statement) => statement,
            None => {
                self.error(&messages::STATEMENT_EXPECTED, &[]);
                self.factory.missing_statement(TextRange::empty(self.current().start))
            }
        }
    }

    /// `( expression )` after `if`, `while` and `switch`.
    pub(crate) fn parse_condition(&mut self, multiline: bool) -> &'a Expression<'a> {
        self.skip_whitespace();
        let mut taken = false;
        let scope = self.parse_scope(
            TokenType::ParenOpen,
            TokenType::ParenClose,
            ScopeOptions::unseparated(multiline),
            |p| {
                if taken {
                    return None;
                }
                let expression = p.parse_expression(multiline)?;
                taken = true;
                Some(*expression)
            },
        );
        match scope {
            Some(scope) => match scope.items.first() {
                Some(expression) => expression,
                None => {
                    self.error_at(scope.data.range, &messages::EXPRESSION_EXPECTED, &[]);
                    self.factory.missing_expression(scope.data.range)
                }
            },
            None => {
                self.expected("(");
                self.factory.missing_expression(TextRange::empty(self.current().start))
            }
        }
    }

    /// Look past trivia for a continuation keyword (`else`, `while`,
    /// `catch`, `finally`) and consume it.
    fn eat_continuation(&mut self, keyword: &str, multiline: bool) -> bool {
        self.try_parse(|p| {
            p.skip_trivia(multiline);
            p.eat_word(keyword)
        })
        .is_some()
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// The name of a declaration: `@name` declares a plain local, a bare
    /// name writes to the context.
    fn parse_binding_name(&mut self) -> Option<&'a Expression<'a>> {
        let start = self.current().start;
        let raw = self.eat(TokenType::At).is_some();
        let name = self.eat(TokenType::Word)?;
        if !is_identifier(name.value) || is_reserved_word(name.value) {
            return None;
        }
        let data = |node_type| NodeData::new(node_type, TextRange::new(start, name.end));
        let expression = if raw {
            self.declare_local(name.value);
            Expression::RawIdentifier(Identifier {
                data: data(NodeType::RawIdentifier),
                name: name.value,
            })
        } else {
            Expression::ContextIdentifier(Identifier {
                data: data(NodeType::ContextIdentifier),
                name: name.value,
            })
        };
        Some(self.factory.alloc(expression))
    }

    pub(crate) fn parse_variable_declaration(
        &mut self,
        multiline: bool,
        allow_initializer: bool,
    ) -> Option<VariableDeclaration<'a>> {
        let keyword = self.advance();
        let kind = match keyword.value {
            "let" => VariableKind::Let,
            "const" => VariableKind::Const,
            "var" => VariableKind::Var,
            _ => return None,
        };
        if !self.skip_whitespace() {
            return None;
        }

        let mut declarators = Vec::new();
        loop {
            self.skip_trivia(multiline);
            let start = self.current().start;
            let Some(name) = self.parse_binding_name() else {
                self.error(&messages::IDENTIFIER_EXPECTED, &[]);
                break;
            };
            let mut initializer = None;
            if allow_initializer {
                let found = self.try_parse(|p| {
                    p.skip_trivia(multiline);
                    p.eat(TokenType::Equals)
                });
                if found.is_some() {
                    self.skip_trivia(multiline);
                    initializer = Some(self.parse_expression(multiline).unwrap_or_else(|| {
                        self.error(&messages::EXPRESSION_EXPECTED, &[]);
                        self.factory.missing_expression(TextRange::empty(self.current().start))
                    }));
                }
            }
            declarators.push(VariableDeclarator {
                data: NodeData::new(NodeType::VariableDeclarator, self.range_from(start)),
                name,
                initializer,
            });
            let comma = self.try_parse(|p| {
                p.skip_trivia(multiline);
                p.eat(TokenType::Comma)
            });
            if comma.is_none() {
                break;
            }
        }

        let range = self.range_from(keyword.start);
        let raw = declarators
            .iter()
            .filter(|d| matches!(d.name, Expression::RawIdentifier(_)))
            .count();
        if raw != 0 && raw != declarators.len() {
            self.error_at(range, &messages::MIXED_DECLARATION_KINDS, &[]);
        }
        Some(VariableDeclaration {
            data: NodeData::new(NodeType::VariableDeclaration, range),
            kind,
            declarators: self.factory.list(declarators),
        })
    }

    /// `function name` or `async function name`, as opposed to a function
    /// expression statement.
    fn at_function_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            if p.eat_word("async").is_some() && !p.skip_whitespace() {
                return false;
            }
            if p.eat_word("function").is_none() {
                return false;
            }
            p.skip_whitespace();
            p.eat(TokenType::Star);
            p.skip_whitespace();
            p.at(TokenType::At) || p.at(TokenType::Word)
        })
    }

    fn parse_function_declaration(&mut self, multiline: bool) -> Option<FunctionDeclaration<'a>> {
        let start = self.current().start;
        let is_async = self.eat_word("async").is_some();
        self.skip_whitespace();
        self.eat_word("function")?;
        self.skip_whitespace();
        let is_generator = self.eat(TokenType::Star).is_some();
        self.skip_whitespace();
        // The name belongs to the enclosing scope; parameters do not.
        let name = self.parse_binding_name()?;
        let locals = self.locals.len();
        self.skip_whitespace();
        let parameters = match self.parse_parameters(multiline) {
            Some(parameters) => parameters,
            None => {
                self.expected("(");
                let range = TextRange::empty(self.current().start);
                self.factory.scope(range, Vec::new(), None)
            }
        };
        let body = self.expect_block(multiline);
        self.locals.truncate(locals);
        Some(FunctionDeclaration {
            data: NodeData::new(NodeType::FunctionDeclaration, self.range_from(start)),
            name,
            is_async,
            is_generator,
            parameters,
            body,
        })
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn parse_if_statement(&mut self, multiline: bool) -> IfStatement<'a> {
        let start = self.advance().start;
        let condition = self.parse_condition(multiline);
        let then_statement = self.parse_body(multiline);
        let else_statement = self
            .eat_continuation("else", multiline)
            .then(|| self.parse_body(multiline));
        IfStatement {
            data: NodeData::new(NodeType::IfStatement, self.range_from(start)),
            condition,
            then_statement,
            else_statement,
        }
    }

    fn parse_switch_statement(&mut self, multiline: bool) -> SwitchStatement<'a> {
        let start = self.advance().start;
        let discriminant = self.parse_condition(multiline);
        let body = self.expect_block(multiline);
        SwitchStatement {
            data: NodeData::new(NodeType::SwitchStatement, self.range_from(start)),
            discriminant,
            body,
        }
    }

    /// `case test:` or `default:`
    fn parse_case_statement(&mut self, multiline: bool) -> Option<CaseStatement<'a>> {
        let keyword = self.advance();
        let mut test = None;
        if keyword.value == "case" {
            if !self.skip_whitespace() {
                return None;
            }
            test = Some(self.parse_expression(multiline)?);
        }
        self.skip_whitespace();
        self.expect(TokenType::Colon);
        Some(CaseStatement {
            data: NodeData::new(NodeType::CaseStatement, self.range_from(keyword.start)),
            test,
        })
    }

    fn parse_while_statement(&mut self, multiline: bool) -> WhileStatement<'a> {
        let start = self.advance().start;
        let condition = self.parse_condition(multiline);
        let body = self.parse_body(multiline);
        WhileStatement {
            data: NodeData::new(NodeType::WhileStatement, self.range_from(start)),
            condition,
            body,
        }
    }

    fn parse_do_while_statement(&mut self, multiline: bool) -> DoWhileStatement<'a> {
        let start = self.advance().start;
        let body = self.parse_body(multiline);
        let condition = if self.eat_continuation("while", multiline) {
            self.parse_condition(multiline)
        } else {
            self.expected("while");
            self.factory.missing_expression(TextRange::empty(self.current().start))
        };
        DoWhileStatement {
            data: NodeData::new(NodeType::DoWhileStatement, self.range_from(start)),
            body,
            condition,
        }
    }

    /// `for (init; test; update)`, `for (x in y)`, `for [await] (x of y)`.
    fn parse_for_statement(&mut self, multiline: bool) -> Statement<'a> {
        let start = self.advance().start;
        let locals = self.locals.len();
        self.skip_whitespace();
        let is_await = self.eat_word("await").is_some();
        self.skip_whitespace();

        let has_head = self.expect(TokenType::ParenOpen).is_some();
        let in_of = if has_head {
            self.try_parse(Self::parse_for_in_of_head)
        } else {
            None
        };
        let statement = match in_of {
            Some((binding, is_of, expression)) => {
                let body = self.parse_body(multiline);
                let range = self.range_from(start);
                if is_of {
                    Statement::ForOf(ForOfStatement {
                        data: NodeData::new(NodeType::ForOfStatement, range),
                        is_await,
                        binding,
                        expression,
                        body,
                    })
                } else {
                    Statement::ForIn(ForInStatement {
                        data: NodeData::new(NodeType::ForInStatement, range),
                        binding,
                        expression,
                        body,
                    })
                }
            }
            None => {
                let (initializer, condition, update) = if has_head {
                    self.parse_for_head(multiline)
                } else {
                    (None, None, None)
                };
                let body = self.parse_body(multiline);
                Statement::For(ForStatement {
                    data: NodeData::new(NodeType::ForStatement, self.range_from(start)),
                    initializer,
                    condition,
                    update,
                    body,
                })
            }
        };
        self.locals.truncate(locals);
        statement
    }

    fn parse_for_binding(&mut self) -> Option<ForInitializer<'a>> {
        if self.at_word("let") || self.at_word("const") || self.at_word("var") {
            let declaration = self.parse_variable_declaration(true, false)?;
            return Some(ForInitializer::Variable(self.factory.alloc(declaration)));
        }
        Some(ForInitializer::Expression(self.parse_postfix_expression(true)?))
    }

    /// `binding in expression)` or `binding of expression)`
    fn parse_for_in_of_head(&mut self) -> Option<(ForInitializer<'a>, bool, &'a Expression<'a>)> {
        self.skip_trivia(true);
        let binding = self.parse_for_binding()?;
        self.skip_trivia(true);
        let is_of = if self.eat_word("of").is_some() {
            true
        } else if self.eat_word("in").is_some() {
            false
        } else {
            return None;
        };
        self.skip_trivia(true);
        let expression = self.parse_expression(true).unwrap_or_else(|| {
            self.error(&messages::EXPRESSION_EXPECTED, &[]);
            self.factory.missing_expression(TextRange::empty(self.current().start))
        });
        self.skip_trivia(true);
        self.expect(TokenType::ParenClose);
        Some((binding, is_of, expression))
    }

    #[allow(clippy::type_complexity)]
    fn parse_for_head(
        &mut self,
        multiline: bool,
    ) -> (
        Option<ForInitializer<'a>>,
        Option<&'a Expression<'a>>,
        Option<&'a Expression<'a>>,
    ) {
        self.skip_trivia(true);
        let initializer = if self.at_word("let") || self.at_word("const") || self.at_word("var") {
            self.parse_variable_declaration(true, true)
                .map(|declaration| ForInitializer::Variable(self.factory.alloc(declaration)))
        } else {
            self.parse_expression(true).map(ForInitializer::Expression)
        };
        self.skip_trivia(true);
        self.expect(TokenType::Semicolon);
        self.skip_trivia(true);
        let condition = self.parse_expression(true);
        self.skip_trivia(true);
        self.expect(TokenType::Semicolon);
        self.skip_trivia(true);
        let update = self.parse_expression(true);
        self.skip_trivia(true);
        if self.expect(TokenType::ParenClose).is_none() && !multiline {
            self.skip_to_line_end();
        }
        (initializer, condition, update)
    }

    fn parse_try_statement(&mut self, multiline: bool) -> TryStatement<'a> {
        let start = self.advance().start;
        let block = self.expect_block(multiline);

        let mut catch_clause = None;
        let catch_start = self.look_ahead(|p| {
            p.skip_trivia(multiline);
            p.current().start
        });
        if self.eat_continuation("catch", multiline) {
            let locals = self.locals.len();
            self.skip_whitespace();
            let mut parameter = None;
            if self.eat(TokenType::ParenOpen).is_some() {
                self.skip_whitespace();
                match self.eat(TokenType::Word) {
                    Some(name) if is_identifier(name.value) => {
                        self.declare_local(name.value);
                        parameter = Some(name.value);
                    }
                    _ => self.error(&messages::IDENTIFIER_EXPECTED, &[]),
                }
                self.skip_whitespace();
                self.expect(TokenType::ParenClose);
            }
            let block = self.expect_block(multiline);
            self.locals.truncate(locals);
            catch_clause = Some(CatchClause {
                data: NodeData::new(NodeType::CatchClause, self.range_from(catch_start)),
                parameter,
                block,
            });
        }

        let mut finally_clause = None;
        let finally_start = self.look_ahead(|p| {
            p.skip_trivia(multiline);
            p.current().start
        });
        if self.eat_continuation("finally", multiline) {
            let block = self.expect_block(multiline);
            finally_clause = Some(FinallyClause {
                data: NodeData::new(NodeType::FinallyClause, self.range_from(finally_start)),
                block,
            });
        }

        let range = self.range_from(start);
        if catch_clause.is_none() && finally_clause.is_none() {
            self.error_at(range, &messages::CATCH_OR_FINALLY_EXPECTED, &[]);
        }
        TryStatement {
            data: NodeData::new(NodeType::TryStatement, range),
            block,
            catch_clause,
            finally_clause,
        }
    }

    fn parse_throw_statement(&mut self, multiline: bool) -> ThrowStatement<'a> {
        let start = self.advance().start;
        self.skip_whitespace();
        let expression = self.parse_expression(multiline).unwrap_or_else(|| {
            self.error(&messages::EXPRESSION_EXPECTED, &[]);
            self.factory.missing_expression(TextRange::empty(self.current().start))
        });
        ThrowStatement {
            data: NodeData::new(NodeType::ThrowStatement, self.range_from(start)),
            expression,
        }
    }

    fn parse_return_statement(&mut self, multiline: bool) -> ReturnStatement<'a> {
        let start = self.advance().start;
        let expression = self.try_parse(|p| {
            p.skip_whitespace();
            p.parse_expression(multiline)
        });
        ReturnStatement {
            data: NodeData::new(NodeType::ReturnStatement, self.range_from(start)),
            expression,
        }
    }

    /// `break [label]` and `continue [label]`.
    fn parse_jump(&mut self, node_type: NodeType) -> (NodeData, Option<&'a str>) {
        let start = self.advance().start;
        let label = self.try_parse(|p| {
            p.skip_whitespace();
            p.eat(TokenType::Word)
                .filter(|t| is_identifier(t.value) && !is_reserved_word(t.value))
                .map(|t| t.value)
        });
        (NodeData::new(node_type, self.range_from(start)), label)
    }

    /// `import [in] name [as alias] from 'path'`
    ///
    /// Every import is also recorded on the module, wherever it appears.
    fn parse_import_statement(&mut self) -> Option<&'a Statement<'a>> {
        let start = self.advance().start;
        if !self.skip_whitespace() {
            return None;
        }
        let is_in = self
            .try_parse(|p| {
                let keyword = p.eat_word("in")?;
                p.skip_whitespace().then_some(keyword)
            })
            .is_some();
        let name = match self.eat(TokenType::Word) {
            Some(name) if is_identifier(name.value) => name.value,
            _ => {
                self.error(&messages::IDENTIFIER_EXPECTED, &[]);
                self.skip_to_line_end();
                return Some(self.factory.missing_statement(self.range_from(start)));
            }
        };
        self.skip_whitespace();
        let alias = self.try_parse(|p| {
            p.eat_word("as")?;
            p.skip_whitespace();
            p.eat(TokenType::Word)
                .filter(|t| is_identifier(t.value))
                .map(|t| t.value)
        });
        self.skip_whitespace();
        if self.eat_word("from").is_none() {
            self.expected("from");
            self.skip_to_line_end();
            return Some(self.factory.missing_statement(self.range_from(start)));
        }
        self.skip_whitespace();
        let path_start = self.current().start;
        let quote = self.current().token_type;
        if !matches!(quote, TokenType::SingleQuote | TokenType::DoubleQuote) {
            self.error(&messages::MODULE_PATH_EXPECTED, &[]);
            self.skip_to_line_end();
            return Some(self.factory.missing_statement(self.range_from(start)));
        }
        let (_, close) = self.parse_quoted_parts(quote);
        if close.is_none() {
            return Some(self.factory.missing_statement(self.range_from(start)));
        }
        let path = self.slice(self.range_from(path_start));

        let import = ImportStatement {
            data: NodeData::new(NodeType::ImportStatement, self.range_from(start)),
            is_in,
            name,
            alias,
            path,
        };
        if !is_in {
            self.declare_local(import.binding());
        }
        self.imports.push(import);
        Some(self.factory.alloc(Statement::Import(import)))
    }
}
