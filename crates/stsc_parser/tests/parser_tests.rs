//! Parser integration tests.
//!
//! Verifies that the parser builds the expected template lines, statements
//! and expressions from storytailor source, and that it recovers from
//! malformed input.

use bumpalo::Bump;
use indoc::indoc;
use pretty_assertions::assert_eq;
use stsc_ast::node::*;
use stsc_ast::BinaryOperator;
use stsc_diagnostics::Diagnostic;
use stsc_parser::{parse_module, Parser, ParserConfig};

/// Helper: parse source text and hand the module and diagnostics to `f`.
fn with_module<R>(source: &str, f: impl FnOnce(&Module<'_>, &[Diagnostic]) -> R) -> R {
    let arena = Bump::new();
    let result = parse_module(&arena, source, "test.st", ParserConfig::default());
    f(result.module, &result.diagnostics)
}

/// Helper: the statement wrapped by an outer line.
fn outer<'a>(line: &Line<'a>) -> &'a Statement<'a> {
    match line {
        Line::Outer(outer) => outer.statement,
        other => panic!("expected an outer statement, found {:?}", other.data().node_type),
    }
}

/// Helper: the expression of an expression statement.
fn expression<'a>(statement: &'a Statement<'a>) -> &'a Expression<'a> {
    match statement {
        Statement::Expression(statement) => statement.expression,
        other => panic!("expected an expression statement, found {:?}", other.node_type()),
    }
}

fn error_codes(diagnostics: &[Diagnostic]) -> Vec<u32> {
    diagnostics.iter().filter(|d| d.is_error()).filter_map(|d| d.code).collect()
}

// ============================================================================
// Object Lines and Indentation
// ============================================================================

#[test]
fn test_object_lines_carry_indent_levels() {
    let source = "a\n\tb = 1\n\tc\n\t\td = 2\ne";
    with_module(source, |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let levels: Vec<u32> = module.lines.iter().map(|l| l.indent().level).collect();
        assert_eq!(levels, vec![0, 1, 1, 2, 0]);
        for line in module.lines {
            assert!(matches!(outer(line), Statement::ObjectLine(_)));
        }
    });
}

#[test]
fn test_spaces_and_tabs_mix() {
    with_module("a\n    b\n\t  c", |module, _| {
        let widths: Vec<u32> = module.lines.iter().map(|l| l.indent().width).collect();
        assert_eq!(widths, vec![0, 4, 4]);
        assert_eq!(module.lines[2].indent().level, 2);
    });
}

#[test]
fn test_custom_indent_size() {
    let arena = Bump::new();
    let result = parse_module(&arena, "a\n\tb\n    c", "test.st", ParserConfig { indent_size: 4 });
    let levels: Vec<u32> = result.module.lines.iter().map(|l| l.indent().level).collect();
    assert_eq!(levels, vec![0, 1, 1]);
}

#[test]
fn test_object_line_with_prototype_and_tags() {
    with_module("hero: base <brave> <age = 3> = 'x'", |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let Statement::ObjectLine(line) = outer(&module.lines[0]) else {
            panic!("expected an object line");
        };
        assert_eq!(line.identifier.identifier_name(), Some("hero"));
        assert!(line.prototype.is_some());
        let tags: Vec<&str> = line.tags.iter().map(|t| t.name).collect();
        assert_eq!(tags, vec!["brave", "age"]);
        assert!(line.tags[0].value.is_none());
        assert!(matches!(line.tags[1].value, Some(Expression::Number(n)) if n.text == "3"));
        assert!(matches!(line.initializer, Some(Expression::String(_))));
    });
}

#[test]
fn test_duplicate_tag_is_a_warning() {
    with_module("hero <brave> <brave = 2>", |module, diagnostics| {
        assert!(matches!(outer(&module.lines[0]), Statement::ObjectLine(_)));
        assert!(error_codes(diagnostics).is_empty());
        let codes: Vec<u32> = diagnostics.iter().filter_map(|d| d.code).collect();
        assert_eq!(codes, vec![1013]);
        assert!(diagnostics[0].message.contains("'brave'"));
    });
}

#[test]
fn test_backtick_object_key() {
    with_module("`room *index` = 1", |module, _| {
        let Statement::ObjectLine(line) = outer(&module.lines[0]) else {
            panic!("expected an object line");
        };
        let Expression::IdentifierScope(scope) = line.identifier else {
            panic!("expected an identifier scope");
        };
        assert_eq!(scope.parts.len(), 2);
        assert!(matches!(scope.parts[1], TextContent::Include(_)));
    });
}

#[test]
fn test_object_line_falls_back_to_text() {
    with_module("hero is brave", |module, _| {
        assert!(matches!(module.lines[0], Line::Text(_)));
    });
}

#[test]
fn test_delete_line() {
    with_module("delete hero", |module, diagnostics| {
        assert!(diagnostics.is_empty());
        assert!(matches!(
            expression(outer(&module.lines[0])),
            Expression::DeleteLine(d) if d.identifier.identifier_name() == Some("hero")
        ));
    });
}

// ============================================================================
// Text Lines
// ============================================================================

#[test]
fn test_text_line_with_include() {
    with_module("Hello *name", |module, diagnostics| {
        assert!(diagnostics.is_empty());
        let Line::Text(text) = &module.lines[0] else {
            panic!("expected a text line");
        };
        assert_eq!(text.content.len(), 2);
        assert!(matches!(text.content[0], TextContent::Text(t) if t.text == "Hello "));
        let TextContent::Include(include) = text.content[1] else {
            panic!("expected an include");
        };
        assert!(matches!(include.expression, Expression::ContextIdentifier(i) if i.name == "name"));
    });
}

#[test]
fn test_text_chunks_stop_at_includes() {
    with_module("a *x b *y", |module, diagnostics| {
        assert!(diagnostics.is_empty());
        let Line::Text(text) = &module.lines[0] else {
            panic!("expected a text line");
        };
        assert_eq!(text.content.len(), 4);
        assert!(matches!(text.content[0], TextContent::Text(t) if t.text == "a "));
        assert!(matches!(text.content[1], TextContent::Include(_)));
        assert!(matches!(text.content[2], TextContent::Text(t) if t.text == " b "));
        assert!(matches!(text.content[3], TextContent::Include(_)));
    });
}

#[test]
fn test_include_takes_member_chain_but_not_operators() {
    with_module("You see *room.name + more.", |module, _| {
        let Line::Text(text) = &module.lines[0] else {
            panic!("expected a text line");
        };
        assert!(matches!(text.content[1], TextContent::Include(i) if matches!(i.expression, Expression::Member(_))));
        assert!(matches!(text.content[2], TextContent::Text(t) if t.text == " + more."));
    });
}

#[test]
fn test_star_before_space_is_text() {
    with_module("5 * 3 stars", |module, _| {
        let Line::Text(text) = &module.lines[0] else {
            panic!("expected a text line");
        };
        assert_eq!(text.content.len(), 1);
    });
}

#[test]
fn test_backslash_escapes_star() {
    with_module("\\*not an include", |module, _| {
        let Line::Text(text) = &module.lines[0] else {
            panic!("expected a text line");
        };
        assert_eq!(text.content.len(), 1);
        assert!(matches!(text.content[0], TextContent::Text(t) if t.text == "*not an include"));
    });
}

#[test]
fn test_comment_line() {
    with_module("// note\nHello there", |module, _| {
        assert!(matches!(module.lines[0], Line::Comment(c) if c.text == " note"));
        assert!(matches!(module.lines[1], Line::Text(_)));
    });
}

#[test]
fn test_blank_lines_produce_nothing() {
    with_module("a\n\n   \nb", |module, _| {
        assert_eq!(module.lines.len(), 2);
    });
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_operator_longest_match() {
    with_module("* @x = a >>> 2", |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let Expression::Binary(binary) = expression(outer(&module.lines[0])) else {
            panic!("expected a binary expression");
        };
        assert_eq!(binary.operator, BinaryOperator::MoreMoreMore);
        assert!(matches!(binary.left, Expression::Binary(b) if b.operator == BinaryOperator::Equals));
    });
}

#[test]
fn test_binary_chain_is_left_to_right() {
    with_module("* @x = 1 + 2 * 3", |module, _| {
        let Expression::Binary(outer_binary) = expression(outer(&module.lines[0])) else {
            panic!("expected a binary expression");
        };
        assert_eq!(outer_binary.operator, BinaryOperator::Star);
        assert!(matches!(outer_binary.right, Expression::Number(n) if n.text == "3"));
    });
}

#[test]
fn test_incomplete_if_reports_and_still_builds() {
    with_module("* if (", |module, diagnostics| {
        assert!(diagnostics.iter().any(|d| d.is_error()));
        assert!(matches!(outer(&module.lines[0]), Statement::If(_)));
    });
}

#[test]
fn test_variable_declarations() {
    with_module("* let @count = 1, @total\n* const hero = 'Ann'", |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let Statement::Variable(raw) = outer(&module.lines[0]) else {
            panic!("expected a declaration");
        };
        assert!(raw.is_raw());
        assert_eq!(raw.declarators.len(), 2);
        let Statement::Variable(context) = outer(&module.lines[1]) else {
            panic!("expected a declaration");
        };
        assert!(!context.is_raw());
        assert_eq!(context.kind, VariableKind::Const);
    });
}

#[test]
fn test_mixed_declaration_kinds() {
    with_module("* let @a = 1, b = 2", |_, diagnostics| {
        assert_eq!(error_codes(diagnostics), vec![1015]);
    });
}

#[test]
fn test_raw_locals_resolve_as_plain_identifiers() {
    let source = indoc! {"
        *{
          let @a = 1
          @a++
        }
        * a = b
    "};
    with_module(source, |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let Statement::Block(block) = outer(&module.lines[0]) else {
            panic!("expected a block");
        };
        let BlockBody::Code(scope) = block.body else {
            panic!("expected a code block");
        };
        assert_eq!(scope.items.len(), 2);
        let Expression::Binary(binary) = expression(outer(&module.lines[1])) else {
            panic!("expected an assignment");
        };
        assert!(matches!(binary.left, Expression::Identifier(i) if i.name == "a"));
        assert!(matches!(binary.right, Expression::ContextIdentifier(i) if i.name == "b"));
    });
}

#[test]
fn test_globals_are_plain_identifiers() {
    with_module("* @x = Math.max(1, 2)", |module, _| {
        let Expression::Call(call) = expression(outer(&module.lines[0])) else {
            panic!("expected a call");
        };
        assert_eq!(call.arguments.items.len(), 2);
    });
}

#[test]
fn test_template_block() {
    let source = indoc! {"
        * if (ready) {
          Let's go
        * } else {
          Not yet
        * }
        after
    "};
    with_module(source, |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(module.lines.len(), 2);
        let Statement::If(statement) = outer(&module.lines[0]) else {
            panic!("expected an if statement");
        };
        let Statement::Block(then_block) = statement.then_statement else {
            panic!("expected a block");
        };
        let BlockBody::Template(lines) = then_block.body else {
            panic!("expected a template block");
        };
        assert!(lines.is_closed());
        assert_eq!(lines.items.len(), 1);
        assert_eq!(lines.items[0].indent().level, 0);
        assert!(statement.else_statement.is_some());
    });
}

#[test]
fn test_unclosed_template_block() {
    with_module("* while (x) {\n  forever", |_, diagnostics| {
        assert!(error_codes(diagnostics).contains(&1009));
    });
}

#[test]
fn test_function_parameters_are_locals() {
    let source = indoc! {"
        * function greet(who) {
          Hello *who
        * }
    "};
    with_module(source, |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let Statement::Function(function) = outer(&module.lines[0]) else {
            panic!("expected a function");
        };
        assert!(matches!(function.name, Expression::ContextIdentifier(_)));
        let BlockBody::Template(lines) = function.body.body else {
            panic!("expected a template body");
        };
        let Line::Text(text) = &lines.items[0] else {
            panic!("expected a text line");
        };
        let TextContent::Include(include) = text.content[1] else {
            panic!("expected an include");
        };
        assert!(matches!(include.expression, Expression::Identifier(i) if i.name == "who"));
    });
}

#[test]
fn test_for_of_and_classic_for() {
    let source = indoc! {"
        *{
          for (let @item of items) { total += @item }
          for (let @i = 0; @i < 3; @i++) {}
        }
    "};
    with_module(source, |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let Statement::Block(block) = outer(&module.lines[0]) else {
            panic!("expected a block");
        };
        let BlockBody::Code(scope) = block.body else {
            panic!("expected a code block");
        };
        assert!(matches!(scope.items[0], Statement::ForOf(_)));
        let Statement::For(classic) = scope.items[1] else {
            panic!("expected a for statement");
        };
        assert!(classic.initializer.is_some());
        assert!(classic.condition.is_some());
        assert!(classic.update.is_some());
    });
}

#[test]
fn test_try_requires_catch_or_finally() {
    with_module("*{ try { a() } }", |_, diagnostics| {
        assert_eq!(error_codes(diagnostics), vec![1012]);
    });
    with_module("*{ try { a() } catch (e) { b(e) } finally { c() } }", |_, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    });
}

#[test]
fn test_arrow_functions_and_literals() {
    with_module("* @f = (a, b) => [a, ...b, { c: 1, d }]", |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let Expression::Binary(binary) = expression(outer(&module.lines[0])) else {
            panic!("expected an assignment");
        };
        let Expression::Function(function) = binary.right else {
            panic!("expected an arrow function");
        };
        assert!(function.is_arrow);
        assert_eq!(function.parameters.items.len(), 2);
    });
}

#[test]
fn test_numbers_are_rejoined() {
    with_module("* @x = [1.5, 2e-3, .25, 0xff]", |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let Expression::Binary(binary) = expression(outer(&module.lines[0])) else {
            panic!("expected an assignment");
        };
        let Expression::Array(array) = binary.right else {
            panic!("expected an array");
        };
        let texts: Vec<&str> = array
            .elements
            .items
            .iter()
            .map(|e| match e {
                Expression::Number(n) => n.text,
                _ => "?",
            })
            .collect();
        assert_eq!(texts, vec!["1.5", "2e-3", ".25", "0xff"]);
    });
}

#[test]
fn test_strings_keep_escapes_and_includes() {
    with_module("* @s = \"say \\\"*name\\\"\"", |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        let Expression::Binary(binary) = expression(outer(&module.lines[0])) else {
            panic!("expected an assignment");
        };
        let Expression::String(string) = binary.right else {
            panic!("expected a string");
        };
        assert_eq!(string.quote, Quote::Double);
        assert_eq!(string.parts.len(), 3);
        assert!(matches!(string.parts[0], TextContent::Text(t) if t.text == "say \\\""));
        assert!(matches!(string.parts[1], TextContent::Include(_)));
        assert!(matches!(string.parts[2], TextContent::Text(t) if t.text == "\\\""));
    });
}

#[test]
fn test_unterminated_string() {
    with_module("* @s = 'open", |_, diagnostics| {
        assert_eq!(error_codes(diagnostics), vec![1006]);
    });
}

// ============================================================================
// Imports
// ============================================================================

#[test]
fn test_imports_are_collected() {
    let source = indoc! {"
        * import chalk from 'chalk'
        text
        * import in data as info from \"./data\"
    "};
    with_module(source, |module, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(module.imports.len(), 2);
        let first = module.imports[0];
        assert!(!first.is_in);
        assert_eq!(first.name, "chalk");
        assert_eq!(first.path, "'chalk'");
        let second = module.imports[1];
        assert!(second.is_in);
        assert_eq!(second.binding(), "info");
        assert_eq!(second.path, "\"./data\"");
    });
}

#[test]
fn test_import_without_path() {
    with_module("* import chalk from", |module, diagnostics| {
        assert!(error_codes(diagnostics).contains(&1010));
        assert!(module.imports.is_empty());
    });
}

// ============================================================================
// Recovery
// ============================================================================

#[test]
fn test_failed_productions_consume_nothing() {
    let arena = Bump::new();
    let mut parser = Parser::from_source(&arena, ") x", "test.st", ParserConfig::default());
    assert!(parser.parse_expression(false).is_none());
    assert!(parser.parse_statement(false).is_none());
    assert!(parser.parse_postfix_expression(true).is_none());
    assert_eq!(parser.cursor(), 0);
    assert!(parser.diagnostics().is_empty());

    let mut parser = Parser::from_source(&arena, "\nrest", "test.st", ParserConfig::default());
    assert!(parser.parse_line().is_none());
    assert_eq!(parser.cursor(), 0);
}

#[test]
fn test_malformed_input_terminates() {
    let source = "}}}\n* ((((\n* let = \n*{ ) ] \n";
    with_module(source, |module, diagnostics| {
        assert!(!diagnostics.is_empty());
        assert!(!module.lines.is_empty());
    });
}

#[test]
fn test_unexpected_end_of_line() {
    with_module("* @x = 1 )", |_, diagnostics| {
        assert_eq!(error_codes(diagnostics), vec![1008]);
    });
}

#[test]
fn test_deep_nesting_is_reported() {
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let source = format!("* @x = {}", "(".repeat(400));
            with_module(&source, |_, diagnostics| error_codes(diagnostics).contains(&1016))
        })
        .unwrap();
    assert!(handle.join().unwrap());
}
