//! Code generator tests.
//!
//! Each test parses storytailor source and checks the generated module
//! body, the lines between the fixed preamble and the export footer.

use bumpalo::Bump;
use indoc::indoc;
use pretty_assertions::assert_eq;
use stsc_parser::{parse_module, ParserConfig};
use stsc_printer::{generate, GeneratedModule, PrinterOptions};

fn compile_with(source: &str, options: &PrinterOptions) -> GeneratedModule {
    let arena = Bump::new();
    let config = ParserConfig {
        indent_size: options.indent_size,
    };
    let result = parse_module(&arena, source, "test.st", config);
    generate(result.module, options)
}

fn compile(source: &str) -> GeneratedModule {
    compile_with(source, &PrinterOptions::default())
}

/// Helper: the generated lines between the preamble and the footer.
fn body(source: &str) -> String {
    let javascript = compile(source).javascript;
    let lines: Vec<&str> = javascript.lines().collect();
    lines[3..lines.len() - 1].join("\n")
}

// ============================================================================
// Module Frame
// ============================================================================

#[test]
fn test_preamble_and_footer() {
    let generated = compile("");
    assert_eq!(
        generated.javascript,
        indoc! {"
            const environment = require('storytailor/environment');
            let context = { __text: [] };
            const serializer = environment.getSerializer();
            module.exports = context;
        "}
    );
    assert!(generated.diagnostics.is_empty());
}

#[test]
fn test_custom_environment_specifier() {
    let options = PrinterOptions {
        environment: "./runtime/env".to_string(),
        ..PrinterOptions::default()
    };
    let generated = compile_with("", &options);
    assert!(generated
        .javascript
        .starts_with("const environment = require('./runtime/env');\n"));
}

// ============================================================================
// Indent Scope
// ============================================================================

#[test]
fn test_nested_object_paths() {
    let source = indoc! {"
        a
          b = 1
          c
            d = 2
        e
    "};
    assert_eq!(
        body(source),
        indoc! {"
            context['a'] = context['a'] || { __text: [] };
            context['a']['b'] = 1;
            context['a']['c'] = context['a']['c'] || { __text: [] };
            context['a']['c']['d'] = 2;
            context['e'] = context['e'] || { __text: [] };"}
    );
}

#[test]
fn test_text_lines_attach_to_parent_with_excess_indent() {
    let source = indoc! {"
        a
          Hello there
              indented more
        Top level
    "};
    assert_eq!(
        body(source),
        indoc! {"
            context['a'] = context['a'] || { __text: [] };
            context['a']['__text'] = [...context['a']['__text'], `Hello there`];
            context['a']['__text'] = [...context['a']['__text'], `    indented more`];
            context['__text'] = [...context['__text'], `Top level`];"}
    );
}

#[test]
fn test_star_line_keeps_deeper_ancestors() {
    let source = indoc! {"
        hero
          name = 1
        * let @y = 1
          age = 3
    "};
    assert_eq!(
        body(source),
        indoc! {"
            context['hero'] = context['hero'] || { __text: [] };
            context['hero']['name'] = 1;
            let y = 1;
            context['hero']['age'] = 3;"}
    );
}

#[test]
fn test_text_line_keeps_deeper_ancestors() {
    let source = indoc! {"
        a
          b
            c
          some text here
              x = 1
    "};
    assert_eq!(
        body(source),
        indoc! {"
            context['a'] = context['a'] || { __text: [] };
            context['a']['b'] = context['a']['b'] || { __text: [] };
            context['a']['b']['c'] = context['a']['b']['c'] || { __text: [] };
            context['a']['__text'] = [...context['a']['__text'], `some text here`];
            context['a']['b']['c']['x'] = 1;"}
    );
}

#[test]
fn test_delete_line_keeps_deeper_ancestors() {
    let source = indoc! {"
        a
          b
            c = 1
          delete b
            d = 2
    "};
    assert_eq!(
        body(source),
        indoc! {"
            context['a'] = context['a'] || { __text: [] };
            context['a']['b'] = context['a']['b'] || { __text: [] };
            context['a']['b']['c'] = 1;
            delete context['a']['b'];
            context['a']['b']['d'] = 2;"}
    );
}

#[test]
fn test_interpolated_text_line() {
    let source = indoc! {"
        name = 'World'
        Hello *name
    "};
    assert_eq!(
        body(source),
        indoc! {r"
            context['name'] = `World`;
            context['__text'] = [...context['__text'], `Hello ${serializer.serialize(context['name'], '\r\n')}`];"}
    );
}

#[test]
fn test_text_include_uses_serializer() {
    assert_eq!(
        body("Hello *name"),
        r"context['__text'] = [...context['__text'], `Hello ${serializer.serialize(context['name'], '\r\n')}`];"
    );
}

#[test]
fn test_text_is_escaped_for_template_literal() {
    assert_eq!(
        body("Costs `5` or ${x}"),
        r"context['__text'] = [...context['__text'], `Costs \`5\` or \${x}`];"
    );
}

#[test]
fn test_prototype_and_tags() {
    assert_eq!(
        body("hero: base <brave> <level = 3> = { hp: 10 }"),
        indoc! {"
            context['hero'] = Object.setPrototypeOf({ hp: 10 }, context['base']);
            context['hero']['__tags'] = { ...context['hero']['__tags'], 'brave': true, 'level': 3 };"}
    );
}

#[test]
fn test_prototype_without_initializer() {
    assert_eq!(
        body("hero: base"),
        "context['hero'] = Object.setPrototypeOf(context['hero'] || { __text: [] }, context['base']);"
    );
}

#[test]
fn test_delete_line() {
    let source = indoc! {"
        a
          b = 1
          delete b
    "};
    assert_eq!(
        body(source),
        indoc! {"
            context['a'] = context['a'] || { __text: [] };
            context['a']['b'] = 1;
            delete context['a']['b'];"}
    );
}

#[test]
fn test_comment_line() {
    assert_eq!(body("// a note"), "// a note");
}

// ============================================================================
// Code
// ============================================================================

#[test]
fn test_code_block_line_is_not_braced() {
    let source = indoc! {"
        *{
          let @count = 2;
          total = @count * 3;
        }
    "};
    assert_eq!(
        body(source),
        indoc! {"
            let count = 2;
            context['total'] = count * 3;"}
    );
}

#[test]
fn test_context_variables_and_functions() {
    let source = indoc! {"
        * let score = 1, bonus
        * function add(n) { return score + n; }
    "};
    assert_eq!(
        body(source),
        indoc! {"
            context['score'] = 1, context['bonus'] = undefined;
            context['add'] = function add(n) {
              return context['score'] + n;
            };"}
    );
}

#[test]
fn test_template_block_inside_object() {
    let source = indoc! {"
        hero
          * if (hero.brave) {
            Bold words.
          * } else {
            Quiet words.
          * }
    "};
    assert_eq!(
        body(source),
        indoc! {"
            context['hero'] = context['hero'] || { __text: [] };
            if (context['hero']['brave']) {
              context['hero']['__text'] = [...context['hero']['__text'], `Bold words.`];
            } else {
              context['hero']['__text'] = [...context['hero']['__text'], `Quiet words.`];
            }"}
    );
}

#[test]
fn test_calls_and_arrows() {
    assert_eq!(
        body("* items.forEach((item) => console.log(item))"),
        "context['items']['forEach']((item) => console['log'](item));"
    );
}

#[test]
fn test_strings_become_template_literals() {
    assert_eq!(
        body(r"msg = 'it\'s `odd`'"),
        r"context['msg'] = `it\'s \`odd\``;"
    );
}

#[test]
fn test_unary_operators_do_not_merge() {
    assert_eq!(body("x = - -y"), "context['x'] = - -context['y'];");
}

#[test]
fn test_imports_are_hoisted() {
    let source = indoc! {r#"
        Some text
        * import dice from './dice'
        * import roll as r from "./dice"
        * import in names from './names'
    "#};
    assert_eq!(
        body(source),
        indoc! {r#"
            const dice = require('./dice');
            const r = require("./dice")['roll'];
            context['names'] = require('./names');
            context['__text'] = [...context['__text'], `Some text`];"#}
    );
}

// ============================================================================
// Diagnostics and Mappings
// ============================================================================

#[test]
fn test_incomplete_code_is_reported() {
    let generated = compile("* if (");
    assert!(generated.javascript.contains("if (undefined)"));
    assert!(generated
        .diagnostics
        .iter()
        .any(|d| d.is_error() && d.code == Some(2001)));
}

#[test]
fn test_lines_map_back_to_source() {
    let generated = compile("a = 1\n  b = 2");
    let line_starts: Vec<(u32, u32, u32)> = generated
        .mappings
        .iter()
        .filter(|m| m.generated_column == 0)
        .map(|m| (m.generated_line, m.original_line, m.original_column))
        .collect();
    assert_eq!(line_starts, vec![(3, 0, 0), (4, 1, 2)]);
}
