//! AST node definitions for storytailor.
//!
//! Nodes reference their children through arena-allocated references and
//! borrow all text from the source, so every node is `Copy`.

use crate::node_type::NodeType;
use crate::operators::{BinaryOperator, UnaryOperator, UpdateOperator};
use stsc_core::text::{Position, TextRange};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    /// The kind of this node.
    pub node_type: NodeType,
    /// Source position range.
    pub range: TextRange,
}

impl NodeData {
    pub fn new(node_type: NodeType, range: TextRange) -> Self {
        Self { node_type, range }
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.range.start
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.range.end
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// A bracketed region: an opening delimiter, its items and the closing
/// delimiter when one was found.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a, T> {
    pub data: NodeData,
    pub open: TextRange,
    pub items: NodeList<'a, T>,
    pub close: Option<TextRange>,
}

impl<'a, T> Scope<'a, T> {
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.close.is_some()
    }
}

// ============================================================================
// Module and lines
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Module<'a> {
    pub data: NodeData,
    pub path: &'a str,
    pub lines: NodeList<'a, Line<'a>>,
    /// Every import found anywhere in the file, in source order.
    pub imports: NodeList<'a, ImportStatement<'a>>,
}

/// Leading indentation of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    pub data: NodeData,
    /// Width in columns, tabs expanded to the indent size.
    pub width: u32,
    /// `width / indent size`.
    pub level: u32,
}

/// One line of the template grammar.
#[derive(Debug, Clone, Copy)]
pub enum Line<'a> {
    Outer(OuterStatement<'a>),
    Text(TextLineStatement<'a>),
    Comment(CommentLine<'a>),
}

impl<'a> Line<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Line::Outer(n) => &n.data,
            Line::Text(n) => &n.data,
            Line::Comment(n) => &n.data,
        }
    }

    pub fn indent(&self) -> &Indent {
        match self {
            Line::Outer(n) => &n.indent,
            Line::Text(n) => &n.indent,
            Line::Comment(n) => &n.indent,
        }
    }
}

/// An indented line holding code: an object line, a delete line, a
/// `*{ ... }` code block or a `* statement`.
#[derive(Debug, Clone, Copy)]
pub struct OuterStatement<'a> {
    pub data: NodeData,
    pub indent: Indent,
    pub statement: &'a Statement<'a>,
}

/// A line of literal text with optional `*expr` includes.
#[derive(Debug, Clone, Copy)]
pub struct TextLineStatement<'a> {
    pub data: NodeData,
    pub indent: Indent,
    pub content: NodeList<'a, TextContent<'a>>,
}

/// A line holding only a `//` comment.
#[derive(Debug, Clone, Copy)]
pub struct CommentLine<'a> {
    pub data: NodeData,
    pub indent: Indent,
    /// Comment text after the `//`.
    pub text: &'a str,
}

/// Content of text lines, strings and identifier scopes.
#[derive(Debug, Clone, Copy)]
pub enum TextContent<'a> {
    Text(TextChunk<'a>),
    Include(StringIncludeStatement<'a>),
}

impl<'a> TextContent<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TextContent::Text(n) => &n.data,
            TextContent::Include(n) => &n.data,
        }
    }
}

/// A contiguous run of literal source text.
#[derive(Debug, Clone, Copy)]
pub struct TextChunk<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

/// `*expr` inside text.
#[derive(Debug, Clone, Copy)]
pub struct StringIncludeStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Template-specific statements
// ============================================================================

/// `identifier [: prototype] [<tag>...] [= initializer]`
#[derive(Debug, Clone, Copy)]
pub struct ObjectLineStatement<'a> {
    pub data: NodeData,
    /// A `ContextIdentifier` or an `IdentifierScope`.
    pub identifier: &'a Expression<'a>,
    pub prototype: Option<PrototypeExpression<'a>>,
    pub tags: NodeList<'a, Tag<'a>>,
    pub initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct PrototypeExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `<name>` or `<name = value>`
#[derive(Debug, Clone, Copy)]
pub struct Tag<'a> {
    pub data: NodeData,
    pub name: &'a str,
    pub value: Option<&'a Expression<'a>>,
}

/// `delete identifier` as a whole line.
#[derive(Debug, Clone, Copy)]
pub struct DeleteLineExpression<'a> {
    pub data: NodeData,
    pub identifier: &'a Expression<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    ObjectLine(ObjectLineStatement<'a>),
    Block(Block<'a>),
    Expression(ExpressionStatement<'a>),
    Variable(VariableDeclaration<'a>),
    Function(FunctionDeclaration<'a>),
    If(IfStatement<'a>),
    Switch(SwitchStatement<'a>),
    Case(CaseStatement<'a>),
    While(WhileStatement<'a>),
    DoWhile(DoWhileStatement<'a>),
    For(ForStatement<'a>),
    ForIn(ForInStatement<'a>),
    ForOf(ForOfStatement<'a>),
    Try(TryStatement<'a>),
    Throw(ThrowStatement<'a>),
    Import(ImportStatement<'a>),
    Break(BreakStatement<'a>),
    Continue(ContinueStatement<'a>),
    Return(ReturnStatement<'a>),
    Debugger(NodeData),
    Empty(NodeData),
    Missing(NodeData),
}

impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::ObjectLine(n) => &n.data,
            Statement::Block(n) => &n.data,
            Statement::Expression(n) => &n.data,
            Statement::Variable(n) => &n.data,
            Statement::Function(n) => &n.data,
            Statement::If(n) => &n.data,
            Statement::Switch(n) => &n.data,
            Statement::Case(n) => &n.data,
            Statement::While(n) => &n.data,
            Statement::DoWhile(n) => &n.data,
            Statement::For(n) => &n.data,
            Statement::ForIn(n) => &n.data,
            Statement::ForOf(n) => &n.data,
            Statement::Try(n) => &n.data,
            Statement::Throw(n) => &n.data,
            Statement::Import(n) => &n.data,
            Statement::Break(n) => &n.data,
            Statement::Continue(n) => &n.data,
            Statement::Return(n) => &n.data,
            Statement::Debugger(d) | Statement::Empty(d) | Statement::Missing(d) => d,
        }
    }

    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.data().node_type
    }
}

/// A brace-delimited body.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    pub data: NodeData,
    pub body: BlockBody<'a>,
    /// `false` for the body of a `*{ ... }` line, whose declarations stay
    /// visible to the rest of the file.
    pub scoped: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum BlockBody<'a> {
    /// `{ statements }` of embedded code.
    Code(Scope<'a, Statement<'a>>),
    /// A `{` ending a `*` line: template lines up to `* }`.
    Template(Scope<'a, Line<'a>>),
}

impl<'a> BlockBody<'a> {
    pub fn is_closed(&self) -> bool {
        match self {
            BlockBody::Code(scope) => scope.is_closed(),
            BlockBody::Template(scope) => scope.is_closed(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Let,
    Const,
    Var,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Let => "let",
            VariableKind::Const => "const",
            VariableKind::Var => "var",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub kind: VariableKind,
    pub declarators: NodeList<'a, VariableDeclarator<'a>>,
}

impl<'a> VariableDeclaration<'a> {
    /// Whether every declarator names an `@` variable.
    pub fn is_raw(&self) -> bool {
        !self.declarators.is_empty()
            && self
                .declarators
                .iter()
                .all(|d| matches!(d.name, Expression::RawIdentifier(_)))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VariableDeclarator<'a> {
    pub data: NodeData,
    /// A `RawIdentifier` or a `ContextIdentifier`.
    pub name: &'a Expression<'a>,
    pub initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct Parameter<'a> {
    pub data: NodeData,
    pub name: &'a str,
    pub rest: bool,
    pub default: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct FunctionDeclaration<'a> {
    pub data: NodeData,
    /// A `RawIdentifier` or a `ContextIdentifier`.
    pub name: &'a Expression<'a>,
    pub is_async: bool,
    pub is_generator: bool,
    pub parameters: Scope<'a, Parameter<'a>>,
    pub body: &'a Block<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub then_statement: &'a Statement<'a>,
    pub else_statement: Option<&'a Statement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub discriminant: &'a Expression<'a>,
    pub body: &'a Block<'a>,
}

/// `case test:` or `default:` (when `test` is `None`).
#[derive(Debug, Clone, Copy)]
pub struct CaseStatement<'a> {
    pub data: NodeData,
    pub test: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct DoWhileStatement<'a> {
    pub data: NodeData,
    pub body: &'a Statement<'a>,
    pub condition: &'a Expression<'a>,
}

/// The declaration or target at the head of a `for` loop.
#[derive(Debug, Clone, Copy)]
pub enum ForInitializer<'a> {
    Variable(&'a VariableDeclaration<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub initializer: Option<ForInitializer<'a>>,
    pub condition: Option<&'a Expression<'a>>,
    pub update: Option<&'a Expression<'a>>,
    pub body: &'a Statement<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ForInStatement<'a> {
    pub data: NodeData,
    pub binding: ForInitializer<'a>,
    pub expression: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ForOfStatement<'a> {
    pub data: NodeData,
    pub is_await: bool,
    pub binding: ForInitializer<'a>,
    pub expression: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct TryStatement<'a> {
    pub data: NodeData,
    pub block: &'a Block<'a>,
    pub catch_clause: Option<CatchClause<'a>>,
    pub finally_clause: Option<FinallyClause<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    pub parameter: Option<&'a str>,
    pub block: &'a Block<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct FinallyClause<'a> {
    pub data: NodeData,
    pub block: &'a Block<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `import [in] name [as alias] from 'path'`
#[derive(Debug, Clone, Copy)]
pub struct ImportStatement<'a> {
    pub data: NodeData,
    /// `import in` assigns into the context instead of binding a local.
    pub is_in: bool,
    pub name: &'a str,
    pub alias: Option<&'a str>,
    /// The path literal exactly as written, quotes included.
    pub path: &'a str,
}

impl<'a> ImportStatement<'a> {
    /// The name the import is bound to.
    pub fn binding(&self) -> &'a str {
        self.alias.unwrap_or(self.name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BreakStatement<'a> {
    pub data: NodeData,
    pub label: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub struct ContinueStatement<'a> {
    pub data: NodeData,
    pub label: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: Option<&'a Expression<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Expression<'a> {
    Number(NumberLiteral<'a>),
    String(StringLiteral<'a>),
    Boolean(BooleanLiteral),
    Keyword(KeywordLiteral),
    Array(ArrayLiteral<'a>),
    Object(ObjectLiteral<'a>),
    Identifier(Identifier<'a>),
    RawIdentifier(Identifier<'a>),
    ContextIdentifier(Identifier<'a>),
    IdentifierScope(IdentifierScope<'a>),
    Binary(BinaryExpression<'a>),
    Member(MemberExpression<'a>),
    Indexer(IndexerExpression<'a>),
    Call(CallExpression<'a>),
    Update(UpdateExpression<'a>),
    Unary(UnaryExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Paren(ParenExpression<'a>),
    New(NewExpression<'a>),
    Delete(DeleteExpression<'a>),
    Typeof(TypeofExpression<'a>),
    Await(AwaitExpression<'a>),
    Yield(YieldExpression<'a>),
    Function(FunctionExpression<'a>),
    Spread(SpreadExpression<'a>),
    DeleteLine(DeleteLineExpression<'a>),
    Missing(NodeData),
}

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Number(n) => &n.data,
            Expression::String(n) => &n.data,
            Expression::Boolean(n) => &n.data,
            Expression::Keyword(n) => &n.data,
            Expression::Array(n) => &n.data,
            Expression::Object(n) => &n.data,
            Expression::Identifier(n)
            | Expression::RawIdentifier(n)
            | Expression::ContextIdentifier(n) => &n.data,
            Expression::IdentifierScope(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Member(n) => &n.data,
            Expression::Indexer(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::Update(n) => &n.data,
            Expression::Unary(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Paren(n) => &n.data,
            Expression::New(n) => &n.data,
            Expression::Delete(n) => &n.data,
            Expression::Typeof(n) => &n.data,
            Expression::Await(n) => &n.data,
            Expression::Yield(n) => &n.data,
            Expression::Function(n) => &n.data,
            Expression::Spread(n) => &n.data,
            Expression::DeleteLine(n) => &n.data,
            Expression::Missing(d) => d,
        }
    }

    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.data().node_type
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Expression::Missing(_))
    }

    /// The bare name of an identifier of any flavour.
    pub fn identifier_name(&self) -> Option<&'a str> {
        match self {
            Expression::Identifier(n)
            | Expression::RawIdentifier(n)
            | Expression::ContextIdentifier(n) => Some(n.name),
            _ => None,
        }
    }
}

// -- Literals --

/// A numeric literal exactly as written (`42`, `3.14`, `0xff`, `1e-3`).
#[derive(Debug, Clone, Copy)]
pub struct NumberLiteral<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
    Backtick,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
            Quote::Backtick => '`',
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StringLiteral<'a> {
    pub data: NodeData,
    pub quote: Quote,
    pub parts: NodeList<'a, TextContent<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct BooleanLiteral {
    pub data: NodeData,
    pub value: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Null,
    Undefined,
    This,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Null => "null",
            Keyword::Undefined => "undefined",
            Keyword::This => "this",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordLiteral {
    pub data: NodeData,
    pub keyword: Keyword,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayLiteral<'a> {
    pub data: NodeData,
    pub elements: Scope<'a, Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectLiteral<'a> {
    pub data: NodeData,
    pub properties: Scope<'a, PropertyDeclaration<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum PropertyKey<'a> {
    Name(&'a str),
    String(&'a StringLiteral<'a>),
    Number(&'a str),
    Computed(&'a Expression<'a>),
}

/// An object literal member. `key` is `None` for `...spread` members.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDeclaration<'a> {
    pub data: NodeData,
    pub key: Option<PropertyKey<'a>>,
    pub value: &'a Expression<'a>,
}

// -- Identifiers --

#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a> {
    pub data: NodeData,
    pub name: &'a str,
}

/// A back-tick quoted identifier built from text and includes.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierScope<'a> {
    pub data: NodeData,
    pub parts: NodeList<'a, TextContent<'a>>,
}

// -- Operators --

#[derive(Debug, Clone, Copy)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator: BinaryOperator,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct MemberExpression<'a> {
    pub data: NodeData,
    pub object: &'a Expression<'a>,
    pub property: &'a str,
    /// `?.`
    pub optional: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct IndexerExpression<'a> {
    pub data: NodeData,
    pub object: &'a Expression<'a>,
    pub index: &'a Expression<'a>,
    pub optional: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub callee: &'a Expression<'a>,
    pub arguments: Scope<'a, Expression<'a>>,
    pub optional: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct UpdateExpression<'a> {
    pub data: NodeData,
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct UnaryExpression<'a> {
    pub data: NodeData,
    pub operator: UnaryOperator,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub when_true: &'a Expression<'a>,
    pub when_false: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ParenExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub callee: &'a Expression<'a>,
    pub arguments: Option<Scope<'a, Expression<'a>>>,
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeofExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct AwaitExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct YieldExpression<'a> {
    pub data: NodeData,
    /// `yield*`
    pub delegate: bool,
    pub expression: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum FunctionBody<'a> {
    Block(&'a Block<'a>),
    Expression(&'a Expression<'a>),
}

/// `function` expressions and arrow functions.
#[derive(Debug, Clone, Copy)]
pub struct FunctionExpression<'a> {
    pub data: NodeData,
    pub name: Option<&'a str>,
    pub is_async: bool,
    pub is_arrow: bool,
    pub is_generator: bool,
    pub parameters: Scope<'a, Parameter<'a>>,
    pub body: FunctionBody<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct SpreadExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}
