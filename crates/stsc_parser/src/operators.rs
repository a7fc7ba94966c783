//! The binary operator table.
//!
//! The tokenizer emits every punctuation character as its own token, so a
//! multi-character operator is a run of adjacent single-character tokens.
//! Entries are tried in order, longest spelling first, so that `>>>`
//! wins over `>>` and `>`.

use stsc_ast::BinaryOperator;
use stsc_tokenizer::{Token, TokenType};

pub(crate) const BINARY_OPERATORS: &[(&str, BinaryOperator)] = &[
    ("instanceof", BinaryOperator::Instanceof),
    (">>>=", BinaryOperator::MoreMoreMoreEquals),
    ("===", BinaryOperator::EqualsEqualsEquals),
    ("!==", BinaryOperator::ExclamationEqualsEquals),
    ("**=", BinaryOperator::StarStarEquals),
    ("<<=", BinaryOperator::LessLessEquals),
    (">>=", BinaryOperator::MoreMoreEquals),
    (">>>", BinaryOperator::MoreMoreMore),
    ("&&=", BinaryOperator::AmpersandAmpersandEquals),
    ("||=", BinaryOperator::PipePipeEquals),
    ("??=", BinaryOperator::QuestionQuestionEquals),
    ("==", BinaryOperator::EqualsEquals),
    ("!=", BinaryOperator::ExclamationEquals),
    ("<=", BinaryOperator::LessEquals),
    (">=", BinaryOperator::MoreEquals),
    ("+=", BinaryOperator::PlusEquals),
    ("-=", BinaryOperator::MinusEquals),
    ("*=", BinaryOperator::StarEquals),
    ("/=", BinaryOperator::SlashEquals),
    ("%=", BinaryOperator::PercentEquals),
    ("&=", BinaryOperator::AmpersandEquals),
    ("|=", BinaryOperator::PipeEquals),
    ("^=", BinaryOperator::CaretEquals),
    ("**", BinaryOperator::StarStar),
    ("<<", BinaryOperator::LessLess),
    (">>", BinaryOperator::MoreMore),
    ("&&", BinaryOperator::AmpersandAmpersand),
    ("||", BinaryOperator::PipePipe),
    ("??", BinaryOperator::QuestionQuestion),
    ("in", BinaryOperator::In),
    ("=", BinaryOperator::Equals),
    ("<", BinaryOperator::Less),
    (">", BinaryOperator::More),
    ("+", BinaryOperator::Plus),
    ("-", BinaryOperator::Minus),
    ("*", BinaryOperator::Star),
    ("/", BinaryOperator::Slash),
    ("%", BinaryOperator::Percent),
    ("&", BinaryOperator::Ampersand),
    ("|", BinaryOperator::Pipe),
    ("^", BinaryOperator::Caret),
];

fn is_word_operator(spelling: &str) -> bool {
    spelling.chars().all(|c| c.is_ascii_alphabetic())
}

/// Match the operator starting at `tokens[0]`.
///
/// Returns the operator and the number of tokens it spans.
pub(crate) fn match_binary_operator(tokens: &[Token<'_>]) -> Option<(BinaryOperator, usize)> {
    let first = tokens.first()?;
    BINARY_OPERATORS.iter().find_map(|(spelling, operator)| {
        if is_word_operator(spelling) {
            return first.is_word(spelling).then_some((*operator, 1));
        }
        let count = spelling.len();
        if tokens.len() < count {
            return None;
        }
        let matches = spelling
            .chars()
            .zip(tokens)
            .all(|(c, token)| token.token_type != TokenType::Word && token.value.len() == 1 && token.value.starts_with(c));
        matches.then_some((*operator, count))
    })
}
