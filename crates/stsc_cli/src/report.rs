//! Diagnostic rendering for the terminal.

use miette::{LabeledSpan, NamedSource, Severity, SourceCode, SourceSpan};
use std::fmt;
use stsc_diagnostics::{Diagnostic, DiagnosticSeverity};
use thiserror::Error;

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// One line per diagnostic: `path(line:column): error STS1005: message`.
pub fn print_diagnostic(path: &str, diagnostic: &Diagnostic, use_color: bool) {
    let location = if has_location(diagnostic) {
        format!("{}({})", path, diagnostic.range)
    } else {
        path.to_string()
    };
    let code = diagnostic_code(diagnostic);
    if use_color {
        let color = match diagnostic.severity {
            DiagnosticSeverity::Error => RED,
            DiagnosticSeverity::Warning => YELLOW,
            _ => CYAN,
        };
        eprintln!(
            "{}{}{}: {}{}{}{} {}{}{}: {}",
            CYAN, location, RESET, BOLD, color, diagnostic.severity, RESET, CYAN, code, RESET, diagnostic.message
        );
    } else {
        eprintln!("{}: {} {}: {}", location, diagnostic.severity, code, diagnostic.message);
    }
}

/// Render with a source snippet. `source` is the text of `path`, when readable.
pub fn print_pretty(path: &str, source: Option<&str>, diagnostic: &Diagnostic) {
    let snippet = source.filter(|_| has_location(diagnostic)).map(|source| {
        let start = (diagnostic.range.start.offset as usize).min(source.len());
        let end = (diagnostic.range.end.offset as usize).clamp(start, source.len());
        (
            NamedSource::new(path, source.to_string()),
            SourceSpan::from((start, end - start)),
        )
    });
    let message = match snippet {
        Some(_) => diagnostic.message.clone(),
        None => format!("{}: {}", path, diagnostic.message),
    };
    let report = Report {
        message,
        code: diagnostic_code(diagnostic),
        severity: match diagnostic.severity {
            DiagnosticSeverity::Error => Severity::Error,
            DiagnosticSeverity::Warning => Severity::Warning,
            DiagnosticSeverity::Info | DiagnosticSeverity::Hint => Severity::Advice,
        },
        snippet,
    };
    eprintln!("{:?}", miette::Report::new(report));
}

/// File-level failures carry no meaningful position.
fn has_location(diagnostic: &Diagnostic) -> bool {
    diagnostic.code.map_or(true, |code| code < 5000)
}

fn diagnostic_code(diagnostic: &Diagnostic) -> String {
    let prefix = match diagnostic.source.as_deref() {
        Some("stsc") | None => "STS",
        Some(tool) => tool,
    };
    match diagnostic.code {
        Some(code) => format!("{}{}", prefix, code),
        None => prefix.to_string(),
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
struct Report {
    message: String,
    code: String,
    severity: Severity,
    snippet: Option<(NamedSource<String>, SourceSpan)>,
}

impl miette::Diagnostic for Report {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.snippet.as_ref().map(|(source, _)| source as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (_, span) = self.snippet.as_ref()?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(None, *span))))
    }
}
