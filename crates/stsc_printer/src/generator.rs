//! Module, line and statement generation.
//!
//! The generated module builds one `context` object. Object lines assign
//! nested properties of it, text lines append to the `__text` array of the
//! object they are indented under, and code runs in place.

use crate::incomplete::collect_incomplete;
use crate::indent_scope::IndentScope;
use crate::template::{escape_string, escape_text, quote};
use crate::writer::TextWriter;
use stsc_ast::node::*;
use stsc_diagnostics::Diagnostic;
use stsc_sourcemap::Mapping;
use tracing::debug;

/// Module specifier used when no environment path is configured.
pub const DEFAULT_ENVIRONMENT: &str = "storytailor/environment";

/// Options for the generator.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// `require` specifier of the runtime environment module.
    pub environment: String,
    /// Columns per indentation level in the source. Must match the
    /// parser's setting.
    pub indent_size: u32,
    /// Indentation string of the generated code.
    pub indent_str: String,
    /// Newline string of the generated code.
    pub new_line: String,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            indent_size: 2,
            indent_str: "  ".to_string(),
            new_line: "\n".to_string(),
        }
    }
}

/// Generated JavaScript and its mappings into the source file.
#[derive(Debug)]
pub struct GeneratedModule {
    pub javascript: String,
    pub mappings: Vec<Mapping>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate the JavaScript module for `module`.
pub fn generate(module: &Module<'_>, options: &PrinterOptions) -> GeneratedModule {
    debug!(path = module.path, lines = module.lines.len(), "generate");
    let diagnostics = collect_incomplete(module);
    let mut generator = Generator::new(options);
    generator.emit_module(module);
    let (javascript, mappings) = generator.writer.finish();
    GeneratedModule {
        javascript,
        mappings,
        diagnostics,
    }
}

/// The code generator. One instance generates one module.
pub(crate) struct Generator<'o> {
    pub(crate) writer: TextWriter,
    pub(crate) scope: IndentScope,
    options: &'o PrinterOptions,
}

impl<'o> Generator<'o> {
    pub(crate) fn new(options: &'o PrinterOptions) -> Self {
        Self {
            writer: TextWriter::new(&options.indent_str, &options.new_line),
            scope: IndentScope::new(),
            options,
        }
    }

    fn emit_module(&mut self, module: &Module<'_>) {
        let options = self.options;
        self.statement_text(&format!(
            "const environment = require({});",
            quote(&options.environment)
        ));
        self.statement_text("let context = { __text: [] };");
        self.statement_text("const serializer = environment.getSerializer();");
        self.emit_imports(module.imports);
        for line in module.lines.iter() {
            self.emit_line(line);
        }
        self.statement_text("module.exports = context;");
    }

    fn statement_text(&mut self, text: &str) {
        self.writer.write_indent();
        self.writer.write(text);
        self.writer.write_newline();
    }

    /// Imports are hoisted to the top of the module. A local name is bound
    /// once; later imports of the same name are dropped.
    fn emit_imports(&mut self, imports: &[ImportStatement<'_>]) {
        let mut bound: Vec<&str> = Vec::new();
        for import in imports {
            let binding = import.binding();
            if !import.is_in {
                if bound.contains(&binding) {
                    continue;
                }
                bound.push(binding);
            }

            let mut value = format!("require({})", import.path);
            if import.alias.is_some() {
                value.push('[');
                value.push_str(&quote(import.name));
                value.push(']');
            }

            self.writer.write_indent();
            self.writer.add_mapping(import.data.start());
            if import.is_in {
                self.writer.write(&format!("context[{}] = {};", quote(binding), value));
            } else {
                self.writer.write(&format!("const {} = {};", binding, value));
            }
            self.writer.write_newline();
        }
    }

    // ========================================================================
    // Lines
    // ========================================================================

    pub(crate) fn emit_line(&mut self, line: &Line<'_>) {
        match line {
            Line::Outer(outer) => {
                self.scope.enter_line(outer.indent.level);
                match outer.statement {
                    Statement::ObjectLine(object) => self.emit_object_line(object),
                    Statement::Expression(ExpressionStatement {
                        expression: Expression::DeleteLine(delete),
                        ..
                    }) => self.emit_delete_line(delete),
                    statement => self.emit_statement_line(statement),
                }
            }
            Line::Text(text) => {
                self.scope.enter_line(text.indent.level);
                self.emit_text_line(text);
            }
            Line::Comment(comment) => {
                self.writer.write_indent();
                self.writer.add_mapping(comment.data.start());
                self.writer.write("//");
                self.writer.write(comment.text);
                self.writer.write_newline();
            }
        }
    }

    /// `<path> = <init>;` and the `__tags` merge, then open the object for
    /// the lines indented under it.
    fn emit_object_line(&mut self, line: &ObjectLineStatement<'_>) {
        self.writer.write_indent();
        self.writer.add_mapping(line.data.start());
        let key = self.write_child_path(line.identifier);
        let path = self.scope.child_path(&key);
        self.writer.write(" = ");

        if line.prototype.is_some() {
            self.writer.write("Object.setPrototypeOf(");
        }
        match line.initializer {
            Some(initializer) => self.print_expression(initializer),
            None => {
                self.writer.write(&path);
                self.writer.write(" || { __text: [] }");
            }
        }
        if let Some(prototype) = &line.prototype {
            self.writer.write(", ");
            self.print_expression(prototype.expression);
            self.writer.write(")");
        }
        self.writer.write(";");
        self.writer.write_newline();

        if let Some(first) = line.tags.first() {
            self.writer.write_indent();
            self.writer.add_mapping(first.data.start());
            self.writer
                .write(&format!("{0}['__tags'] = {{ ...{0}['__tags']", path));
            for tag in line.tags.iter() {
                self.writer.write(", ");
                self.writer.add_mapping(tag.data.start());
                self.writer.write(&quote(tag.name));
                self.writer.write(": ");
                match tag.value {
                    Some(value) => self.print_expression(value),
                    None => self.writer.write("true"),
                }
            }
            self.writer.write(" };");
            self.writer.write_newline();
        }

        self.scope.push(key);
    }

    fn emit_delete_line(&mut self, line: &DeleteLineExpression<'_>) {
        self.writer.write_indent();
        self.writer.add_mapping(line.data.start());
        self.writer.write("delete ");
        self.write_child_path(line.identifier);
        self.writer.write(";");
        self.writer.write_newline();
    }

    /// Append a template literal to the parent object's `__text`.
    fn emit_text_line(&mut self, line: &TextLineStatement<'_>) {
        let parent = self.scope.path();
        let owned = self.scope.owned_width(self.options.indent_size);
        let excess = line.indent.width.saturating_sub(owned) as usize;

        self.writer.write_indent();
        self.writer.add_mapping(line.data.start());
        self.writer
            .write(&format!("{0}['__text'] = [...{0}['__text'], `", parent));
        self.writer.write(&" ".repeat(excess));
        self.print_template_parts(line.content, escape_text);
        self.writer.write("`];");
        self.writer.write_newline();
    }

    /// Write `<parent path>[<key>]` and return the rendered key.
    pub(crate) fn write_child_path(&mut self, identifier: &Expression<'_>) -> String {
        self.writer.write(&self.scope.path());
        self.writer.write("[");
        let start = self.writer.len();
        match identifier {
            Expression::IdentifierScope(scope) => {
                self.writer.write("`");
                self.print_template_parts(scope.parts, escape_string);
                self.writer.write("`");
            }
            other => match other.identifier_name() {
                Some(name) => self.writer.write(&quote(name)),
                None => self.print_expression(other),
            },
        }
        let key = self.writer.text_since(start).to_string();
        self.writer.write("]");
        key
    }

    /// Text chunks and `${serializer.serialize(...)}` splices.
    pub(crate) fn print_template_parts(
        &mut self,
        parts: &[TextContent<'_>],
        escape: fn(&str, &mut String),
    ) {
        for part in parts {
            match part {
                TextContent::Text(chunk) => {
                    self.writer.add_mapping(chunk.data.start());
                    let mut escaped = String::with_capacity(chunk.text.len());
                    escape(chunk.text, &mut escaped);
                    self.writer.write(&escaped);
                }
                TextContent::Include(include) => {
                    self.writer.add_mapping(include.data.start());
                    self.writer.write("${serializer.serialize(");
                    self.print_expression(include.expression);
                    self.writer.write(", '\\r\\n')}");
                }
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// A statement on its own output line. Unscoped blocks are flattened
    /// into their statements; hoisted imports and placeholders emit nothing.
    pub(crate) fn emit_statement_line(&mut self, statement: &Statement<'_>) {
        match statement {
            Statement::Import(_) | Statement::Missing(_) => {}
            Statement::Block(Block {
                body: BlockBody::Code(scope),
                scoped: false,
                ..
            }) => {
                for item in scope.items.iter() {
                    self.emit_statement_line(item);
                }
            }
            _ => {
                self.writer.write_indent();
                self.print_statement(statement);
                self.writer.write_newline();
            }
        }
    }

    /// Print a statement at the current position, without a trailing newline.
    pub(crate) fn print_statement(&mut self, statement: &Statement<'_>) {
        self.writer.add_mapping(statement.data().start());
        match statement {
            // Object lines are whole outer lines and never nested.
            Statement::ObjectLine(_) => {}
            Statement::Block(block) => self.print_block(block),
            Statement::Expression(n) => {
                self.print_expression(n.expression);
                self.writer.write(";");
            }
            Statement::Variable(n) => {
                self.print_variable_declaration(n);
                self.writer.write(";");
            }
            Statement::Function(n) => self.print_function_declaration(n),
            Statement::If(n) => {
                self.writer.write("if (");
                self.print_expression(n.condition);
                self.writer.write(") ");
                self.print_statement(n.then_statement);
                if let Some(else_statement) = n.else_statement {
                    if matches!(n.then_statement, Statement::Block(_)) {
                        self.writer.write(" ");
                    } else {
                        self.writer.write_newline();
                        self.writer.write_indent();
                    }
                    self.writer.write("else ");
                    self.print_statement(else_statement);
                }
            }
            Statement::Switch(n) => {
                self.writer.write("switch (");
                self.print_expression(n.discriminant);
                self.writer.write(") ");
                self.print_block(n.body);
            }
            Statement::Case(n) => match n.test {
                Some(test) => {
                    self.writer.write("case ");
                    self.print_expression(test);
                    self.writer.write(":");
                }
                None => self.writer.write("default:"),
            },
            Statement::While(n) => {
                self.writer.write("while (");
                self.print_expression(n.condition);
                self.writer.write(") ");
                self.print_statement(n.body);
            }
            Statement::DoWhile(n) => {
                self.writer.write("do ");
                self.print_statement(n.body);
                self.writer.write(" while (");
                self.print_expression(n.condition);
                self.writer.write(");");
            }
            Statement::For(n) => {
                self.writer.write("for (");
                if let Some(initializer) = &n.initializer {
                    match initializer {
                        ForInitializer::Variable(declaration) => {
                            self.print_variable_declaration(declaration)
                        }
                        ForInitializer::Expression(expression) => self.print_expression(expression),
                    }
                }
                self.writer.write(";");
                if let Some(condition) = n.condition {
                    self.writer.write(" ");
                    self.print_expression(condition);
                }
                self.writer.write(";");
                if let Some(update) = n.update {
                    self.writer.write(" ");
                    self.print_expression(update);
                }
                self.writer.write(") ");
                self.print_statement(n.body);
            }
            Statement::ForIn(n) => {
                self.writer.write("for (");
                self.print_loop_binding(&n.binding);
                self.writer.write(" in ");
                self.print_expression(n.expression);
                self.writer.write(") ");
                self.print_statement(n.body);
            }
            Statement::ForOf(n) => {
                self.writer.write(if n.is_await { "for await (" } else { "for (" });
                self.print_loop_binding(&n.binding);
                self.writer.write(" of ");
                self.print_expression(n.expression);
                self.writer.write(") ");
                self.print_statement(n.body);
            }
            Statement::Try(n) => {
                self.writer.write("try ");
                self.print_block(n.block);
                if let Some(catch_clause) = &n.catch_clause {
                    self.writer.write(" catch ");
                    if let Some(parameter) = catch_clause.parameter {
                        self.writer.write(&format!("({}) ", parameter));
                    }
                    self.print_block(catch_clause.block);
                }
                if let Some(finally_clause) = &n.finally_clause {
                    self.writer.write(" finally ");
                    self.print_block(finally_clause.block);
                }
            }
            Statement::Throw(n) => {
                self.writer.write("throw ");
                self.print_expression(n.expression);
                self.writer.write(";");
            }
            Statement::Return(n) => {
                self.writer.write("return");
                if let Some(expression) = n.expression {
                    self.writer.write(" ");
                    self.print_expression(expression);
                }
                self.writer.write(";");
            }
            Statement::Break(n) => self.print_jump("break", n.label),
            Statement::Continue(n) => self.print_jump("continue", n.label),
            Statement::Debugger(_) => self.writer.write("debugger;"),
            Statement::Import(_) | Statement::Empty(_) | Statement::Missing(_) => {
                self.writer.write(";")
            }
        }
    }

    fn print_jump(&mut self, keyword: &str, label: Option<&str>) {
        self.writer.write(keyword);
        if let Some(label) = label {
            self.writer.write(" ");
            self.writer.write(label);
        }
        self.writer.write(";");
    }

    pub(crate) fn print_block(&mut self, block: &Block<'_>) {
        match &block.body {
            BlockBody::Code(scope) => {
                if scope.items.is_empty() {
                    self.writer.write("{}");
                    return;
                }
                self.writer.write("{");
                self.writer.write_newline();
                self.writer.increase_indent();
                for statement in scope.items.iter() {
                    self.emit_statement_line(statement);
                }
                self.writer.decrease_indent();
                self.writer.write_indent();
                self.writer.write("}");
            }
            BlockBody::Template(scope) => {
                self.writer.write("{");
                self.writer.write_newline();
                self.writer.increase_indent();
                for line in scope.items.iter() {
                    self.emit_line(line);
                }
                self.writer.decrease_indent();
                self.writer.write_indent();
                self.writer.write("}");
            }
        }
    }

    /// `@` declarations stay JavaScript declarations. Context declarations
    /// become assignments to context properties.
    fn print_variable_declaration(&mut self, declaration: &VariableDeclaration<'_>) {
        if declaration.is_raw() {
            self.writer.write(declaration.kind.as_str());
            self.writer.write(" ");
        }
        for (i, declarator) in declaration.declarators.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.print_expression(declarator.name);
            match declarator.initializer {
                Some(initializer) => {
                    self.writer.write(" = ");
                    self.print_expression(initializer);
                }
                None if !declaration.is_raw() => self.writer.write(" = undefined"),
                None => {}
            }
        }
    }

    fn print_loop_binding(&mut self, binding: &ForInitializer<'_>) {
        match binding {
            ForInitializer::Variable(declaration) if declaration.is_raw() => {
                self.print_variable_declaration(declaration)
            }
            ForInitializer::Variable(declaration) => {
                if let Some(declarator) = declaration.declarators.first() {
                    self.print_expression(declarator.name);
                }
            }
            ForInitializer::Expression(expression) => self.print_expression(expression),
        }
    }

    fn print_function_declaration(&mut self, declaration: &FunctionDeclaration<'_>) {
        let name = declaration.name.identifier_name();
        let is_raw = matches!(declaration.name, Expression::RawIdentifier(_));
        if !is_raw {
            self.print_expression(declaration.name);
            self.writer.write(" = ");
        }
        self.print_function_head(declaration.is_async, declaration.is_generator, name);
        self.print_parameters(&declaration.parameters);
        self.writer.write(" ");
        self.print_block(declaration.body);
        if !is_raw {
            self.writer.write(";");
        }
    }

    pub(crate) fn print_function_head(&mut self, is_async: bool, is_generator: bool, name: Option<&str>) {
        if is_async {
            self.writer.write("async ");
        }
        self.writer.write("function");
        if is_generator {
            self.writer.write("*");
        }
        if let Some(name) = name {
            self.writer.write(" ");
            self.writer.write(name);
        }
    }

    pub(crate) fn print_parameters(&mut self, parameters: &Scope<'_, Parameter<'_>>) {
        self.writer.write("(");
        for (i, parameter) in parameters.items.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.writer.add_mapping(parameter.data.start());
            if parameter.rest {
                self.writer.write("...");
            }
            self.writer.write(parameter.name);
            if let Some(default) = parameter.default {
                self.writer.write(" = ");
                self.print_expression(default);
            }
        }
        self.writer.write(")");
    }
}
