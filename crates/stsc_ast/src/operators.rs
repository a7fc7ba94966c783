//! Operator enums shared by the parser and the code generator.
//!
//! Binary operators are named after their token spelling (`>>>` is
//! `MoreMoreMore`), which is also how the parser's operator table matches
//! them.

use std::fmt;

/// A binary (infix) operator, assignments included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Assignment
    Equals,
    PlusEquals,
    MinusEquals,
    StarEquals,
    StarStarEquals,
    SlashEquals,
    PercentEquals,
    LessLessEquals,
    MoreMoreEquals,
    MoreMoreMoreEquals,
    AmpersandEquals,
    PipeEquals,
    CaretEquals,
    AmpersandAmpersandEquals,
    PipePipeEquals,
    QuestionQuestionEquals,

    // Equality and relational
    EqualsEqualsEquals,
    EqualsEquals,
    ExclamationEqualsEquals,
    ExclamationEquals,
    Less,
    LessEquals,
    More,
    MoreEquals,
    In,
    Instanceof,

    // Arithmetic
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,

    // Bitwise
    LessLess,
    MoreMore,
    MoreMoreMore,
    Ampersand,
    Pipe,
    Caret,

    // Logical
    AmpersandAmpersand,
    PipePipe,
    QuestionQuestion,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Equals => "=",
            BinaryOperator::PlusEquals => "+=",
            BinaryOperator::MinusEquals => "-=",
            BinaryOperator::StarEquals => "*=",
            BinaryOperator::StarStarEquals => "**=",
            BinaryOperator::SlashEquals => "/=",
            BinaryOperator::PercentEquals => "%=",
            BinaryOperator::LessLessEquals => "<<=",
            BinaryOperator::MoreMoreEquals => ">>=",
            BinaryOperator::MoreMoreMoreEquals => ">>>=",
            BinaryOperator::AmpersandEquals => "&=",
            BinaryOperator::PipeEquals => "|=",
            BinaryOperator::CaretEquals => "^=",
            BinaryOperator::AmpersandAmpersandEquals => "&&=",
            BinaryOperator::PipePipeEquals => "||=",
            BinaryOperator::QuestionQuestionEquals => "??=",
            BinaryOperator::EqualsEqualsEquals => "===",
            BinaryOperator::EqualsEquals => "==",
            BinaryOperator::ExclamationEqualsEquals => "!==",
            BinaryOperator::ExclamationEquals => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::More => ">",
            BinaryOperator::MoreEquals => ">=",
            BinaryOperator::In => "in",
            BinaryOperator::Instanceof => "instanceof",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Star => "*",
            BinaryOperator::StarStar => "**",
            BinaryOperator::Slash => "/",
            BinaryOperator::Percent => "%",
            BinaryOperator::LessLess => "<<",
            BinaryOperator::MoreMore => ">>",
            BinaryOperator::MoreMoreMore => ">>>",
            BinaryOperator::Ampersand => "&",
            BinaryOperator::Pipe => "|",
            BinaryOperator::Caret => "^",
            BinaryOperator::AmpersandAmpersand => "&&",
            BinaryOperator::PipePipe => "||",
            BinaryOperator::QuestionQuestion => "??",
        }
    }

    /// Whether this operator writes to its left operand.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinaryOperator::Equals
                | BinaryOperator::PlusEquals
                | BinaryOperator::MinusEquals
                | BinaryOperator::StarEquals
                | BinaryOperator::StarStarEquals
                | BinaryOperator::SlashEquals
                | BinaryOperator::PercentEquals
                | BinaryOperator::LessLessEquals
                | BinaryOperator::MoreMoreEquals
                | BinaryOperator::MoreMoreMoreEquals
                | BinaryOperator::AmpersandEquals
                | BinaryOperator::PipeEquals
                | BinaryOperator::CaretEquals
                | BinaryOperator::AmpersandAmpersandEquals
                | BinaryOperator::PipePipeEquals
                | BinaryOperator::QuestionQuestionEquals
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix unary operators other than `++`/`--` and the keyword operators
/// that have their own node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Exclamation,
    Minus,
    Plus,
    Tilde,
    Void,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Exclamation => "!",
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Tilde => "~",
            UnaryOperator::Void => "void",
        }
    }
}

/// `++` or `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}
