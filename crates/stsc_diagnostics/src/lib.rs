//! stsc_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every user-facing problem the compiler finds is a [`Diagnostic`] built
//! from a [`DiagnosticMessage`] template in the [`messages`] catalogue.
//! Diagnostics are accumulated, never thrown.

use stsc_core::text::TextRange;
use std::fmt;

/// Diagnostic severity, matching the Language Server Protocol levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
    Hint,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Info => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// A diagnostic message template with a code and severity.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1005, 2001).
    pub code: u32,
    /// The severity of this diagnostic.
    pub severity: DiagnosticSeverity,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// The tool name attached to diagnostics produced by this compiler.
pub const STSC_SOURCE: &str = "stsc";

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub range: TextRange,
    pub code: Option<u32>,
    /// The tool that produced this diagnostic (`stsc`, `tsc`, ...).
    pub source: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic from a catalogue message at a source range.
    pub fn new(message: &DiagnosticMessage, range: TextRange, args: &[&str]) -> Self {
        Self {
            severity: message.severity,
            message: format_message(message.message, args),
            range,
            code: Some(message.code),
            source: Some(STSC_SOURCE.to_string()),
        }
    }

    /// Create a diagnostic that has no meaningful location (file-level failures).
    pub fn global(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self::new(message, TextRange::default(), args)
    }

    /// Replace the reporting tool name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.range.start, self.severity)?;
        if let Some(code) = self.code {
            write!(f, " STS{}", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during compilation.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop every diagnostic recorded after the first `len`.
    ///
    /// The parser uses this to discard diagnostics from an abandoned
    /// alternative when it backtracks.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn extend_from_slice(&mut self, diagnostics: &[Diagnostic]) {
        self.diagnostics.extend_from_slice(diagnostics);
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Sort diagnostics by position, keeping insertion order for ties.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by_key(|d| (d.range.start.offset, d.range.end.offset));
    }
}

impl IntoIterator for DiagnosticCollection {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, severity: DiagnosticSeverity::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, severity: DiagnosticSeverity::Warning, message: $msg }
        };
        ($code:expr, Info, $msg:expr) => {
            DiagnosticMessage { code: $code, severity: DiagnosticSeverity::Info, message: $msg }
        };
        ($code:expr, Hint, $msg:expr) => {
            DiagnosticMessage { code: $code, severity: DiagnosticSeverity::Hint, message: $msg }
        };
    }

    // ========================================================================
    // Parser errors (1000-1999)
    // ========================================================================
    pub const UNEXPECTED_TOKEN_0: DiagnosticMessage = diag!(1001, Error, "Unexpected token '{0}'.");
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1002, Error, "Identifier expected.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1003, Error, "Expression expected.");
    pub const STATEMENT_EXPECTED: DiagnosticMessage = diag!(1004, Error, "Statement expected.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1006, Error, "Unterminated string literal.");
    pub const UNTERMINATED_COMMENT: DiagnosticMessage = diag!(1007, Error, "'*/' expected.");
    pub const UNEXPECTED_END_OF_LINE: DiagnosticMessage = diag!(1008, Error, "Unexpected content at end of line: '{0}'.");
    pub const TEMPLATE_BLOCK_NOT_CLOSED: DiagnosticMessage = diag!(1009, Error, "Block opened here is never closed with '* }}'.");
    pub const MODULE_PATH_EXPECTED: DiagnosticMessage = diag!(1010, Error, "Module path string expected after 'from'.");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(1011, Error, "Invalid left-hand side in assignment.");
    pub const CATCH_OR_FINALLY_EXPECTED: DiagnosticMessage = diag!(1012, Error, "'catch' or 'finally' expected.");
    pub const DUPLICATE_TAG_0: DiagnosticMessage = diag!(1013, Warning, "Tag '{0}' is declared more than once on this line.");
    pub const MIXED_DECLARATION_KINDS: DiagnosticMessage = diag!(1015, Error, "'@' variables and context variables cannot be declared together.");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(1016, Error, "Expression or statement is nested too deeply.");

    // ========================================================================
    // Code generation errors (2000-2999)
    // ========================================================================
    pub const CANNOT_GENERATE_INCOMPLETE_0: DiagnosticMessage = diag!(2001, Error, "Cannot generate code for incomplete {0}.");

    // ========================================================================
    // Configuration and I/O errors (5000-5999)
    // ========================================================================
    pub const CANNOT_READ_FILE_0_1: DiagnosticMessage = diag!(5001, Error, "Cannot read file '{0}': {1}.");
    pub const CANNOT_WRITE_FILE_0_1: DiagnosticMessage = diag!(5002, Error, "Cannot write file '{0}': {1}.");
    pub const INVALID_CONFIG_0: DiagnosticMessage = diag!(5003, Error, "Invalid configuration: {0}.");
    pub const UNEXPECTED_FAILURE_0: DiagnosticMessage = diag!(5004, Error, "Unexpected failure: {0}.");

    // ========================================================================
    // External tool diagnostics (6000-6999)
    // ========================================================================
    pub const EXTERNAL_TOOL_0_FAILED_1: DiagnosticMessage = diag!(6001, Error, "External tool '{0}' failed: {1}.");
    pub const EXTERNAL_TOOL_OUTPUT_0: DiagnosticMessage = diag!(6002, Info, "{0}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use stsc_core::text::Position;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(Position::new(start, 0, start), Position::new(end, 0, end))
    }

    #[test]
    fn test_format_message() {
        let msg = format_message("'{0}' expected.", &[")"]);
        assert_eq!(msg, "')' expected.");
    }

    #[test]
    fn test_format_message_no_args() {
        let msg = format_message("Expression expected.", &[]);
        assert_eq!(msg, "Expression expected.");
    }

    #[test]
    fn test_format_message_two_args() {
        let msg = format_message("Cannot read file '{0}': {1}.", &["a.st", "not found"]);
        assert_eq!(msg, "Cannot read file 'a.st': not found.");
    }

    #[test]
    fn test_escaped_brace_in_template_block_message() {
        let diag = Diagnostic::global(&messages::TEMPLATE_BLOCK_NOT_CLOSED, &[]);
        assert!(diag.message.contains("'* }}'"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(&messages::_0_EXPECTED, range(10, 11), &[")"]);
        let display = format!("{}", diag);
        assert_eq!(display, "1:11 - error STS1005: ')' expected.");
    }

    #[test]
    fn test_diagnostic_source_defaults_to_compiler() {
        let diag = Diagnostic::new(&messages::IDENTIFIER_EXPECTED, range(0, 1), &[]);
        assert_eq!(diag.source.as_deref(), Some(STSC_SOURCE));
        assert_eq!(diag.code, Some(1002));
        assert!(diag.is_error());

        let diag = diag.with_source("tsc");
        assert_eq!(diag.source.as_deref(), Some("tsc"));
    }

    #[test]
    fn test_diagnostic_collection() {
        let mut collection = DiagnosticCollection::new();
        assert!(collection.is_empty());

        collection.add(Diagnostic::new(&messages::DUPLICATE_TAG_0, range(0, 1), &["brave"]));
        assert!(!collection.has_errors());

        collection.add(Diagnostic::new(&messages::EXPRESSION_EXPECTED, range(3, 4), &[]));
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 1);
        assert_eq!(collection.len(), 2);

        collection.truncate(1);
        assert_eq!(collection.len(), 1);
        assert!(!collection.has_errors());
    }

    #[test]
    fn test_diagnostic_collection_sort() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::new(&messages::STATEMENT_EXPECTED, range(10, 11), &[]));
        collection.add(Diagnostic::new(&messages::IDENTIFIER_EXPECTED, range(5, 6), &[]));
        collection.sort();
        assert_eq!(collection.diagnostics()[0].code, Some(1002));
        assert_eq!(collection.diagnostics()[1].code, Some(1004));
    }
}
