//! NodeType enum - the tag carried by every AST node.

/// The kind of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum NodeType {
    // ========================================================================
    // Template grammar
    // ========================================================================
    Module,
    OuterStatement,
    TextLineStatement,
    CommentLine,
    TextChunk,
    StringIncludeStatement,
    ObjectLineStatement,
    PrototypeExpression,
    DeleteLineExpression,
    Tag,
    Scope,
    Indent,

    // ========================================================================
    // Literals
    // ========================================================================
    NumberLiteral,
    StringLiteral,
    BooleanLiteral,
    KeywordLiteral,
    ArrayLiteral,
    ObjectLiteral,

    // ========================================================================
    // Identifiers
    // ========================================================================
    Identifier,
    RawIdentifier,
    ContextIdentifier,
    IdentifierScope,

    // ========================================================================
    // Declarations
    // ========================================================================
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,
    PropertyDeclaration,
    Parameter,

    // ========================================================================
    // Statements
    // ========================================================================
    BlockStatement,
    ExpressionStatement,
    IfStatement,
    SwitchStatement,
    CaseStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    TryStatement,
    CatchClause,
    FinallyClause,
    ThrowStatement,
    ImportStatement,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    DebuggerStatement,
    EmptyStatement,

    // ========================================================================
    // Expressions
    // ========================================================================
    BinaryExpression,
    MemberExpression,
    IndexerExpression,
    CallExpression,
    UpdateExpression,
    UnaryExpression,
    ConditionalExpression,
    ParenExpression,
    NewExpression,
    DeleteExpression,
    TypeofExpression,
    AwaitExpression,
    YieldExpression,
    FunctionExpression,
    SpreadExpression,

    /// Placeholder for a construct the parser expected but could not find.
    Missing,
}

impl NodeType {
    /// Whether this kind is produced by the template (outer) grammar.
    #[inline]
    pub fn is_template(self) -> bool {
        (self as u8) <= (NodeType::Indent as u8)
    }

    /// Whether this kind is a statement.
    #[inline]
    pub fn is_statement(self) -> bool {
        let v = self as u8;
        v >= NodeType::BlockStatement as u8 && v <= NodeType::EmptyStatement as u8
    }

    /// Human readable name used in diagnostics ("if statement", "call expression").
    pub fn describe(self) -> &'static str {
        match self {
            NodeType::Module => "module",
            NodeType::OuterStatement => "line",
            NodeType::TextLineStatement => "text line",
            NodeType::CommentLine => "comment line",
            NodeType::TextChunk => "text",
            NodeType::StringIncludeStatement => "include",
            NodeType::ObjectLineStatement => "object line",
            NodeType::PrototypeExpression => "prototype",
            NodeType::DeleteLineExpression => "delete line",
            NodeType::Tag => "tag",
            NodeType::Scope => "scope",
            NodeType::Indent => "indentation",
            NodeType::NumberLiteral => "number",
            NodeType::StringLiteral => "string",
            NodeType::BooleanLiteral => "boolean",
            NodeType::KeywordLiteral => "keyword",
            NodeType::ArrayLiteral => "array",
            NodeType::ObjectLiteral => "object",
            NodeType::Identifier | NodeType::RawIdentifier | NodeType::ContextIdentifier => {
                "identifier"
            }
            NodeType::IdentifierScope => "identifier scope",
            NodeType::VariableDeclaration | NodeType::VariableDeclarator => "variable declaration",
            NodeType::FunctionDeclaration => "function declaration",
            NodeType::PropertyDeclaration => "property",
            NodeType::Parameter => "parameter",
            NodeType::BlockStatement => "block",
            NodeType::ExpressionStatement => "expression statement",
            NodeType::IfStatement => "if statement",
            NodeType::SwitchStatement => "switch statement",
            NodeType::CaseStatement => "case clause",
            NodeType::WhileStatement => "while statement",
            NodeType::DoWhileStatement => "do statement",
            NodeType::ForStatement | NodeType::ForInStatement | NodeType::ForOfStatement => {
                "for statement"
            }
            NodeType::TryStatement => "try statement",
            NodeType::CatchClause => "catch clause",
            NodeType::FinallyClause => "finally clause",
            NodeType::ThrowStatement => "throw statement",
            NodeType::ImportStatement => "import statement",
            NodeType::BreakStatement => "break statement",
            NodeType::ContinueStatement => "continue statement",
            NodeType::ReturnStatement => "return statement",
            NodeType::DebuggerStatement => "debugger statement",
            NodeType::EmptyStatement => "empty statement",
            NodeType::BinaryExpression => "binary expression",
            NodeType::MemberExpression => "member access",
            NodeType::IndexerExpression => "element access",
            NodeType::CallExpression => "call expression",
            NodeType::UpdateExpression => "update expression",
            NodeType::UnaryExpression => "unary expression",
            NodeType::ConditionalExpression => "conditional expression",
            NodeType::ParenExpression => "parenthesized expression",
            NodeType::NewExpression => "new expression",
            NodeType::DeleteExpression => "delete expression",
            NodeType::TypeofExpression => "typeof expression",
            NodeType::AwaitExpression => "await expression",
            NodeType::YieldExpression => "yield expression",
            NodeType::FunctionExpression => "function expression",
            NodeType::SpreadExpression => "spread element",
            NodeType::Missing => "missing node",
        }
    }
}
