//! Expression productions.
//!
//! There is no precedence climbing. An expression is one prefix operand
//! followed by any number of continuations (member, call, indexer, postfix
//! update, binary operator with a right operand, ternary) applied to the
//! accumulated result, left to right. The printer writes the flat result
//! back out textually, so JavaScript's own precedence applies at run time.

use crate::operators::match_binary_operator;
use crate::parser::Parser;
use crate::scope::ScopeOptions;
use crate::utilities::{
    ends_with_open_exponent, is_digits, is_global_name, is_identifier, is_reserved_word,
    starts_number,
};
use stsc_ast::node::*;
use stsc_ast::{NodeType, UnaryOperator, UpdateOperator};
use stsc_core::text::{Position, TextRange};
use stsc_diagnostics::messages;
use stsc_tokenizer::{Token, TokenType};

impl<'a> Parser<'a> {
    /// Parse a full expression. Consumes nothing when no operand starts here.
    pub fn parse_expression(&mut self, multiline: bool) -> Option<&'a Expression<'a>> {
        self.try_parse(|p| p.parse_expression_guarded(multiline, true))
    }

    /// An operand and its member, call, indexer and update continuations,
    /// without binary or ternary operators. Used by includes, prototypes
    /// and `for` bindings.
    pub fn parse_postfix_expression(&mut self, multiline: bool) -> Option<&'a Expression<'a>> {
        self.try_parse(|p| p.parse_expression_guarded(multiline, false))
    }

    fn parse_expression_guarded(
        &mut self,
        multiline: bool,
        binary: bool,
    ) -> Option<&'a Expression<'a>> {
        if !self.enter() {
            self.leave();
            let range = TextRange::empty(self.current().start);
            self.skip_to_line_end();
            return Some(self.factory.missing_expression(range));
        }
        let result = self.parse_expression_worker(multiline, binary);
        self.leave();
        result
    }

    fn parse_expression_worker(
        &mut self,
        multiline: bool,
        binary: bool,
    ) -> Option<&'a Expression<'a>> {
        let start = self.current().start;
        let mut expression = self.parse_prefix_operand(multiline)?;
        loop {
            if let Some(next) =
                self.try_parse(|p| p.parse_postfix_continuation(expression, start, multiline))
            {
                expression = next;
                continue;
            }
            if !binary {
                break;
            }
            if let Some(next) =
                self.try_parse(|p| p.parse_binary_continuation(expression, start, multiline))
            {
                expression = next;
                continue;
            }
            if let Some(next) =
                self.try_parse(|p| p.parse_conditional_continuation(expression, start, multiline))
            {
                expression = next;
                continue;
            }
            break;
        }
        Some(expression)
    }

    fn missing_here(&mut self) -> &'a Expression<'a> {
        self.error(&messages::EXPRESSION_EXPECTED, &[]);
        self.factory.missing_expression(TextRange::empty(self.current().start))
    }

    // ========================================================================
    // Continuations
    // ========================================================================

    /// `.name`, `?.name`, `(args)`, `?.(args)`, `[index]`, `?.[index]`,
    /// `++` and `--`. On a single line they must touch the operand.
    fn parse_postfix_continuation(
        &mut self,
        object: &'a Expression<'a>,
        start: Position,
        multiline: bool,
    ) -> Option<&'a Expression<'a>> {
        if multiline {
            self.skip_trivia(true);
        }
        let optional = self.at(TokenType::Question) && self.peek(1).is(TokenType::Dot);
        if optional {
            self.advance_by(2);
        }

        let expression = match self.current().token_type {
            TokenType::Dot if !optional => {
                self.advance();
                Expression::Member(self.parse_member_name(object, start, false)?)
            }
            TokenType::Word if optional => {
                Expression::Member(self.parse_member_name(object, start, true)?)
            }
            TokenType::ParenOpen => {
                let arguments = self.parse_arguments(multiline)?;
                Expression::Call(CallExpression {
                    data: NodeData::new(NodeType::CallExpression, self.range_from(start)),
                    callee: object,
                    arguments,
                    optional,
                })
            }
            TokenType::BracketOpen => {
                self.advance();
                self.skip_trivia(true);
                let index = match self.parse_expression(true) {
                    Some(index) => index,
                    None => self.missing_here(),
                };
                self.skip_trivia(true);
                self.expect(TokenType::BracketClose);
                Expression::Indexer(IndexerExpression {
                    data: NodeData::new(NodeType::IndexerExpression, self.range_from(start)),
                    object,
                    index,
                    optional,
                })
            }
            TokenType::Plus | TokenType::Minus if !optional => {
                let operator = self.eat_update_operator()?;
                Expression::Update(UpdateExpression {
                    data: NodeData::new(NodeType::UpdateExpression, self.range_from(start)),
                    operator,
                    prefix: false,
                    operand: object,
                })
            }
            _ => return None,
        };
        Some(self.factory.alloc(expression))
    }

    fn parse_member_name(
        &mut self,
        object: &'a Expression<'a>,
        start: Position,
        optional: bool,
    ) -> Option<MemberExpression<'a>> {
        let name = self.eat(TokenType::Word)?;
        if !is_identifier(name.value) {
            return None;
        }
        Some(MemberExpression {
            data: NodeData::new(NodeType::MemberExpression, self.range_from(start)),
            object,
            property: name.value,
            optional,
        })
    }

    /// `++` or `--` as two touching tokens.
    fn eat_update_operator(&mut self) -> Option<UpdateOperator> {
        let first = self.current();
        let second = self.peek(1);
        let operator = match (first.token_type, second.token_type) {
            (TokenType::Plus, TokenType::Plus) => UpdateOperator::Increment,
            (TokenType::Minus, TokenType::Minus) => UpdateOperator::Decrement,
            _ => return None,
        };
        self.advance_by(2);
        Some(operator)
    }

    /// `left op right`, where `right` is a single prefix operand.
    fn parse_binary_continuation(
        &mut self,
        left: &'a Expression<'a>,
        start: Position,
        multiline: bool,
    ) -> Option<&'a Expression<'a>> {
        self.skip_trivia(multiline);
        let operator_start = self.current().range();
        let (operator, count) = match_binary_operator(&self.tokens[self.cursor..])?;
        self.advance_by(count);
        self.skip_trivia(multiline);
        let right = self.parse_prefix_operand(multiline)?;
        if operator.is_assignment() && !is_assignable(left) {
            self.error_at(operator_start, &messages::INVALID_ASSIGNMENT_TARGET, &[]);
        }
        Some(self.factory.alloc(Expression::Binary(BinaryExpression {
            data: NodeData::new(NodeType::BinaryExpression, self.range_from(start)),
            left,
            operator,
            right,
        })))
    }

    /// `condition ? a : b`
    fn parse_conditional_continuation(
        &mut self,
        condition: &'a Expression<'a>,
        start: Position,
        multiline: bool,
    ) -> Option<&'a Expression<'a>> {
        self.skip_trivia(multiline);
        if !self.at(TokenType::Question)
            || matches!(self.peek(1).token_type, TokenType::Question | TokenType::Dot)
        {
            return None;
        }
        self.advance();
        self.skip_trivia(multiline);
        let when_true = self.parse_expression(multiline)?;
        self.skip_trivia(multiline);
        let when_false = if self.expect(TokenType::Colon).is_some() {
            self.skip_trivia(multiline);
            match self.parse_expression(multiline) {
                Some(expression) => expression,
                None => self.missing_here(),
            }
        } else {
            self.factory.missing_expression(TextRange::empty(self.current().start))
        };
        Some(self.factory.alloc(Expression::Conditional(ConditionalExpression {
            data: NodeData::new(NodeType::ConditionalExpression, self.range_from(start)),
            condition,
            when_true,
            when_false,
        })))
    }

    // ========================================================================
    // Operands
    // ========================================================================

    /// An operand with any prefix operators (`!`, `-`, `++`, `typeof`, ...).
    fn parse_prefix_operand(&mut self, multiline: bool) -> Option<&'a Expression<'a>> {
        let token = self.current();
        let start = token.start;

        let unary = match token.token_type {
            TokenType::Exclamation => Some(UnaryOperator::Exclamation),
            TokenType::Tilde => Some(UnaryOperator::Tilde),
            TokenType::Plus | TokenType::Minus => {
                if let Some(operator) = self.try_parse(Self::eat_update_operator) {
                    let operand = self.parse_nested_operand(multiline)?;
                    return Some(self.factory.alloc(Expression::Update(UpdateExpression {
                        data: NodeData::new(NodeType::UpdateExpression, self.range_from(start)),
                        operator,
                        prefix: true,
                        operand,
                    })));
                }
                Some(if token.is(TokenType::Plus) {
                    UnaryOperator::Plus
                } else {
                    UnaryOperator::Minus
                })
            }
            TokenType::Word if token.value == "void" => Some(UnaryOperator::Void),
            _ => None,
        };
        if let Some(operator) = unary {
            self.advance();
            self.skip_whitespace();
            let operand = self.parse_nested_operand(multiline)?;
            return Some(self.factory.alloc(Expression::Unary(UnaryExpression {
                data: NodeData::new(NodeType::UnaryExpression, self.range_from(start)),
                operator,
                operand,
            })));
        }

        if token.is(TokenType::Word) {
            match token.value {
                "typeof" | "delete" | "await" => {
                    self.advance();
                    if !self.skip_whitespace() && !self.at(TokenType::ParenOpen) {
                        return None;
                    }
                    let expression = self.parse_nested_operand(multiline)?;
                    let range = self.range_from(start);
                    let node = match token.value {
                        "typeof" => Expression::Typeof(TypeofExpression {
                            data: NodeData::new(NodeType::TypeofExpression, range),
                            expression,
                        }),
                        "delete" => Expression::Delete(DeleteExpression {
                            data: NodeData::new(NodeType::DeleteExpression, range),
                            expression,
                        }),
                        _ => Expression::Await(AwaitExpression {
                            data: NodeData::new(NodeType::AwaitExpression, range),
                            expression,
                        }),
                    };
                    return Some(self.factory.alloc(node));
                }
                "yield" => return Some(self.parse_yield(multiline)),
                _ => {}
            }
        }

        self.parse_operand(multiline)
    }

    /// The operand of a prefix operator, guarded against runaway nesting
    /// such as `!!!!...`.
    fn parse_nested_operand(&mut self, multiline: bool) -> Option<&'a Expression<'a>> {
        if !self.enter() {
            self.leave();
            return Some(self.factory.missing_expression(TextRange::empty(self.current().start)));
        }
        let operand = self.parse_prefix_operand(multiline);
        self.leave();
        operand
    }

    fn parse_yield(&mut self, multiline: bool) -> &'a Expression<'a> {
        let start = self.advance().start;
        let delegate = self.eat(TokenType::Star).is_some();
        let expression = self.try_parse(|p| {
            p.skip_whitespace();
            p.parse_expression(multiline)
        });
        self.factory.alloc(Expression::Yield(YieldExpression {
            data: NodeData::new(NodeType::YieldExpression, self.range_from(start)),
            delegate,
            expression,
        }))
    }

    fn parse_operand(&mut self, multiline: bool) -> Option<&'a Expression<'a>> {
        let token = self.current();
        match token.token_type {
            TokenType::Word => self.parse_word_operand(token, multiline),
            TokenType::Dot if self.peek(1).is(TokenType::Word) && is_fraction(self.peek(1).value) => {
                Some(self.parse_number())
            }
            TokenType::At => self.parse_raw_identifier(),
            TokenType::SingleQuote | TokenType::DoubleQuote | TokenType::Backtick => {
                Some(self.parse_string_literal())
            }
            TokenType::ParenOpen => self
                .try_parse(|p| p.parse_arrow_function(token.start, false, multiline))
                .or_else(|| self.parse_paren_expression()),
            TokenType::BracketOpen => self.parse_array_literal(multiline),
            TokenType::BraceOpen => self.parse_object_literal(multiline),
            _ => None,
        }
    }

    fn parse_word_operand(&mut self, token: Token<'a>, multiline: bool) -> Option<&'a Expression<'a>> {
        if starts_number(token.value) {
            return Some(self.parse_number());
        }
        let range = token.range();
        let literal = match token.value {
            "true" | "false" => Some(Expression::Boolean(BooleanLiteral {
                data: NodeData::new(NodeType::BooleanLiteral, range),
                value: token.value == "true",
            })),
            "null" => Some(keyword(Keyword::Null, range)),
            "undefined" => Some(keyword(Keyword::Undefined, range)),
            "this" => Some(keyword(Keyword::This, range)),
            _ => None,
        };
        if let Some(literal) = literal {
            self.advance();
            return Some(self.factory.alloc(literal));
        }

        match token.value {
            "function" => return self.parse_function_expression(token.start, false, multiline),
            "async" => {
                return self.try_parse(|p| {
                    p.advance();
                    if !p.skip_whitespace() {
                        return None;
                    }
                    if p.at_word("function") {
                        p.parse_function_expression(token.start, true, multiline)
                    } else {
                        p.parse_arrow_function(token.start, true, multiline)
                    }
                });
            }
            "new" => return self.parse_new_expression(multiline),
            _ => {}
        }

        if !is_identifier(token.value) || is_reserved_word(token.value) {
            return None;
        }
        if let Some(arrow) = self.try_parse(|p| p.parse_arrow_function(token.start, false, multiline)) {
            return Some(arrow);
        }
        self.advance();
        Some(self.resolve_identifier(token))
    }

    /// Plain locals and JavaScript globals are emitted as written; any other
    /// name is looked up in the context.
    fn resolve_identifier(&self, token: Token<'a>) -> &'a Expression<'a> {
        let identifier = |node_type| Identifier {
            data: NodeData::new(node_type, token.range()),
            name: token.value,
        };
        let expression = if self.is_local(token.value) || is_global_name(token.value) {
            Expression::Identifier(identifier(NodeType::Identifier))
        } else {
            Expression::ContextIdentifier(identifier(NodeType::ContextIdentifier))
        };
        self.factory.alloc(expression)
    }

    /// `@name`
    fn parse_raw_identifier(&mut self) -> Option<&'a Expression<'a>> {
        let at = self.eat(TokenType::At)?;
        let name = self.eat(TokenType::Word)?;
        if !is_identifier(name.value) {
            return None;
        }
        Some(self.factory.alloc(Expression::RawIdentifier(Identifier {
            data: NodeData::new(NodeType::RawIdentifier, self.range_from(at.start)),
            name: name.value,
        })))
    }

    /// Number words are rejoined with their `.` fraction and exponent sign,
    /// which the tokenizer splits off.
    fn parse_number(&mut self) -> &'a Expression<'a> {
        let start = self.current().start;
        let mut last = self.advance();
        if last.is(TokenType::Dot) {
            last = self.advance();
        } else if is_digits(last.value)
            && self.at(TokenType::Dot)
            && self.peek(1).is(TokenType::Word)
            && is_fraction(self.peek(1).value)
        {
            self.advance();
            last = self.advance();
        }
        if ends_with_open_exponent(last.value)
            && matches!(self.current().token_type, TokenType::Plus | TokenType::Minus)
            && self.peek(1).is(TokenType::Word)
            && is_digits(self.peek(1).value)
        {
            self.advance_by(2);
        }
        let range = self.range_from(start);
        self.factory.alloc(Expression::Number(NumberLiteral {
            data: NodeData::new(NodeType::NumberLiteral, range),
            text: self.slice(range),
        }))
    }

    pub(crate) fn parse_string_literal(&mut self) -> &'a Expression<'a> {
        let open = self.current();
        let quote = match open.token_type {
            TokenType::SingleQuote => Quote::Single,
            TokenType::DoubleQuote => Quote::Double,
            _ => Quote::Backtick,
        };
        let (parts, _) = self.parse_quoted_parts(open.token_type);
        self.factory.alloc(Expression::String(StringLiteral {
            data: NodeData::new(NodeType::StringLiteral, self.range_from(open.start)),
            quote,
            parts: self.factory.list(parts),
        }))
    }

    fn parse_paren_expression(&mut self) -> Option<&'a Expression<'a>> {
        let open = self.eat(TokenType::ParenOpen)?;
        self.skip_trivia(true);
        let expression = match self.parse_expression(true) {
            Some(expression) => expression,
            None => self.missing_here(),
        };
        self.skip_trivia(true);
        self.expect(TokenType::ParenClose);
        Some(self.factory.alloc(Expression::Paren(ParenExpression {
            data: NodeData::new(NodeType::ParenExpression, self.range_from(open.start)),
            expression,
        })))
    }

    /// `new Callee(args)`; the callee may be a dotted path.
    fn parse_new_expression(&mut self, multiline: bool) -> Option<&'a Expression<'a>> {
        let start = self.advance().start;
        if !self.skip_whitespace() {
            return None;
        }
        let mut callee = self.parse_operand(multiline)?;
        while self.at(TokenType::Dot) {
            let member_start = callee.range().start;
            let Some(member) = self.try_parse(|p| {
                p.advance();
                p.parse_member_name(callee, member_start, false)
            }) else {
                break;
            };
            callee = self.factory.alloc(Expression::Member(member));
        }
        let arguments = self.parse_arguments(multiline);
        Some(self.factory.alloc(Expression::New(NewExpression {
            data: NodeData::new(NodeType::NewExpression, self.range_from(start)),
            callee,
            arguments,
        })))
    }

    // ========================================================================
    // Lists
    // ========================================================================

    fn at_spread(&self) -> bool {
        (0..3).all(|i| self.peek(i).is(TokenType::Dot))
    }

    /// `...expr` or `expr`, as found in arguments and array elements.
    fn parse_element(&mut self, multiline: bool) -> Option<Expression<'a>> {
        if self.at_spread() {
            let start = self.current().start;
            self.advance_by(3);
            let expression = self.parse_expression(multiline)?;
            return Some(Expression::Spread(SpreadExpression {
                data: NodeData::new(NodeType::SpreadExpression, self.range_from(start)),
                expression,
            }));
        }
        self.parse_expression(multiline).copied()
    }

    fn parse_arguments(&mut self, multiline: bool) -> Option<Scope<'a, Expression<'a>>> {
        self.parse_scope(
            TokenType::ParenOpen,
            TokenType::ParenClose,
            ScopeOptions::separated(TokenType::Comma, multiline),
            |p| p.parse_element(multiline),
        )
    }

    fn parse_array_literal(&mut self, multiline: bool) -> Option<&'a Expression<'a>> {
        let start = self.current().start;
        let elements = self.parse_scope(
            TokenType::BracketOpen,
            TokenType::BracketClose,
            ScopeOptions::separated(TokenType::Comma, multiline),
            |p| p.parse_element(multiline),
        )?;
        Some(self.factory.alloc(Expression::Array(ArrayLiteral {
            data: NodeData::new(NodeType::ArrayLiteral, self.range_from(start)),
            elements,
        })))
    }

    fn parse_object_literal(&mut self, multiline: bool) -> Option<&'a Expression<'a>> {
        let start = self.current().start;
        let properties = self.parse_scope(
            TokenType::BraceOpen,
            TokenType::BraceClose,
            ScopeOptions::separated(TokenType::Comma, multiline),
            |p| p.parse_property(multiline),
        )?;
        Some(self.factory.alloc(Expression::Object(ObjectLiteral {
            data: NodeData::new(NodeType::ObjectLiteral, self.range_from(start)),
            properties,
        })))
    }

    /// `key: value`, `name` shorthand, `[computed]: value` or `...spread`.
    fn parse_property(&mut self, multiline: bool) -> Option<PropertyDeclaration<'a>> {
        let start = self.current().start;
        if self.at_spread() {
            let spread = self.parse_element(multiline)?;
            return Some(PropertyDeclaration {
                data: NodeData::new(NodeType::PropertyDeclaration, self.range_from(start)),
                key: None,
                value: self.factory.alloc(spread),
            });
        }

        let token = self.current();
        let key = match token.token_type {
            TokenType::Word if starts_number(token.value) => {
                self.advance();
                PropertyKey::Number(token.value)
            }
            TokenType::Word if is_identifier(token.value) => {
                self.advance();
                PropertyKey::Name(token.value)
            }
            TokenType::SingleQuote | TokenType::DoubleQuote => match self.parse_string_literal() {
                Expression::String(literal) => PropertyKey::String(literal),
                _ => return None,
            },
            TokenType::BracketOpen => {
                self.advance();
                self.skip_trivia(true);
                let expression = self.parse_expression(true)?;
                self.skip_trivia(true);
                self.eat(TokenType::BracketClose)?;
                PropertyKey::Computed(expression)
            }
            _ => return None,
        };

        let has_value = self
            .try_parse(|p| {
                p.skip_trivia(multiline);
                p.eat(TokenType::Colon)
            })
            .is_some();
        let value = if has_value {
            self.skip_trivia(multiline);
            match self.parse_expression(multiline) {
                Some(value) => value,
                None => self.missing_here(),
            }
        } else {
            match key {
                PropertyKey::Name(_) if !is_reserved_word(token.value) => self.resolve_identifier(token),
                _ => {
                    self.expected(":");
                    self.factory.missing_expression(TextRange::empty(self.current().start))
                }
            }
        };
        Some(PropertyDeclaration {
            data: NodeData::new(NodeType::PropertyDeclaration, self.range_from(start)),
            key: Some(key),
            value,
        })
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// `(params)` with each name declared as a plain local. The caller
    /// truncates the locals when the function body ends.
    pub(crate) fn parse_parameters(&mut self, multiline: bool) -> Option<Scope<'a, Parameter<'a>>> {
        self.parse_scope(
            TokenType::ParenOpen,
            TokenType::ParenClose,
            ScopeOptions::separated(TokenType::Comma, multiline),
            |p| p.parse_parameter(multiline),
        )
    }

    fn parse_parameter(&mut self, multiline: bool) -> Option<Parameter<'a>> {
        let start = self.current().start;
        let rest = self.at_spread();
        if rest {
            self.advance_by(3);
        }
        self.eat(TokenType::At);
        let name = self.eat(TokenType::Word)?;
        if !is_identifier(name.value) || is_reserved_word(name.value) {
            return None;
        }
        let default = self
            .try_parse(|p| {
                p.skip_trivia(multiline);
                p.eat(TokenType::Equals)?;
                p.skip_trivia(multiline);
                p.parse_expression(multiline)
            });
        self.declare_local(name.value);
        Some(Parameter {
            data: NodeData::new(NodeType::Parameter, self.range_from(start)),
            name: name.value,
            rest,
            default,
        })
    }

    /// `function [*] [name] (params) { body }` in expression position.
    fn parse_function_expression(
        &mut self,
        start: Position,
        is_async: bool,
        multiline: bool,
    ) -> Option<&'a Expression<'a>> {
        self.eat_word("function")?;
        self.skip_whitespace();
        let is_generator = self.eat(TokenType::Star).is_some();
        self.skip_whitespace();
        let name = self
            .eat(TokenType::Word)
            .filter(|t| is_identifier(t.value) && !is_reserved_word(t.value))
            .map(|t| t.value);
        let locals = self.locals.len();
        if let Some(name) = name {
            self.declare_local(name);
        }
        self.skip_whitespace();
        let parameters = self.parse_parameters(multiline)?;
        let body = self.parse_block(multiline);
        self.locals.truncate(locals);
        let body = body?;
        Some(self.factory.alloc(Expression::Function(FunctionExpression {
            data: NodeData::new(NodeType::FunctionExpression, self.range_from(start)),
            name,
            is_async,
            is_arrow: false,
            is_generator,
            parameters,
            body: FunctionBody::Block(body),
        })))
    }

    /// `x => body` or `(params) => body`. Fails (to be retried as a
    /// parenthesized expression) unless the parameter list is clean and an
    /// arrow follows it.
    fn parse_arrow_function(
        &mut self,
        start: Position,
        is_async: bool,
        multiline: bool,
    ) -> Option<&'a Expression<'a>> {
        let locals = self.locals.len();
        let errors = self.diagnostics.len();
        let parameters = if self.at(TokenType::ParenOpen) {
            let parameters = self.parse_parameters(multiline)?;
            if !parameters.is_closed() || self.diagnostics.len() != errors {
                return None;
            }
            parameters
        } else {
            let name = self.eat(TokenType::Word)?;
            if !is_identifier(name.value) || is_reserved_word(name.value) {
                return None;
            }
            self.declare_local(name.value);
            let parameter = Parameter {
                data: NodeData::new(NodeType::Parameter, name.range()),
                name: name.value,
                rest: false,
                default: None,
            };
            self.factory.scope(name.range(), vec![parameter], Some(name.range()))
        };
        self.skip_whitespace();
        if !(self.at(TokenType::Equals) && self.peek(1).is(TokenType::AngleClose)) {
            return None;
        }
        self.advance_by(2);

        let body = match self.parse_block(multiline) {
            Some(block) => FunctionBody::Block(block),
            None => {
                self.skip_trivia(multiline);
                FunctionBody::Expression(match self.parse_expression(multiline) {
                    Some(expression) => expression,
                    None => self.missing_here(),
                })
            }
        };
        self.locals.truncate(locals);
        Some(self.factory.alloc(Expression::Function(FunctionExpression {
            data: NodeData::new(NodeType::FunctionExpression, self.range_from(start)),
            name: None,
            is_async,
            is_arrow: true,
            is_generator: false,
            parameters,
            body,
        })))
    }
}

fn keyword<'a>(keyword: Keyword, range: TextRange) -> Expression<'a> {
    Expression::Keyword(KeywordLiteral {
        data: NodeData::new(NodeType::KeywordLiteral, range),
        keyword,
    })
}

/// `5`, `5e3` or `5e` (exponent sign still to come).
fn is_fraction(text: &str) -> bool {
    let digits = text.trim_start_matches(|c: char| c.is_ascii_digit() || c == '_');
    if digits.len() == text.len() {
        return false;
    }
    match digits.strip_prefix(['e', 'E']) {
        Some(exponent) => exponent.is_empty() || is_digits(exponent),
        None => digits.is_empty(),
    }
}

fn is_assignable(expression: &Expression<'_>) -> bool {
    matches!(
        expression,
        Expression::Identifier(_)
            | Expression::RawIdentifier(_)
            | Expression::ContextIdentifier(_)
            | Expression::IdentifierScope(_)
            | Expression::Member(_)
            | Expression::Indexer(_)
            | Expression::Array(_)
            | Expression::Object(_)
            | Expression::Paren(_)
    )
}
