//! Expression generation.
//!
//! Expressions are written in the order they were parsed. Binary chains
//! are flat, so JavaScript's own precedence applies when the generated
//! code runs.

use crate::generator::Generator;
use crate::template::{escape_string, quote};
use stsc_ast::node::*;
use stsc_ast::{UnaryOperator, UpdateOperator};

impl<'o> Generator<'o> {
    pub(crate) fn print_expression(&mut self, expression: &Expression<'_>) {
        self.writer.add_mapping(expression.data().start());
        match expression {
            Expression::Number(n) => self.writer.write(n.text),
            Expression::String(n) => {
                self.writer.write("`");
                self.print_template_parts(n.parts, escape_string);
                self.writer.write("`");
            }
            Expression::Boolean(n) => self.writer.write(if n.value { "true" } else { "false" }),
            Expression::Keyword(n) => self.writer.write(n.keyword.as_str()),
            Expression::Array(n) => {
                self.writer.write("[");
                self.print_list(n.elements.items);
                self.writer.write("]");
            }
            Expression::Object(n) => self.print_object_literal(n),
            Expression::Identifier(n) | Expression::RawIdentifier(n) => self.writer.write(n.name),
            Expression::ContextIdentifier(n) => {
                self.writer.write(&format!("context[{}]", quote(n.name)));
            }
            Expression::IdentifierScope(n) => {
                self.writer.write("context[`");
                self.print_template_parts(n.parts, escape_string);
                self.writer.write("`]");
            }
            Expression::Binary(n) => {
                self.print_expression(n.left);
                self.writer.write(" ");
                self.writer.write(n.operator.as_str());
                self.writer.write(" ");
                self.print_expression(n.right);
            }
            Expression::Member(n) => {
                self.print_expression(n.object);
                if n.optional {
                    self.writer.write("?.");
                }
                self.writer.write(&format!("[{}]", quote(n.property)));
            }
            Expression::Indexer(n) => {
                self.print_expression(n.object);
                if n.optional {
                    self.writer.write("?.");
                }
                self.writer.write("[");
                self.print_expression(n.index);
                self.writer.write("]");
            }
            Expression::Call(n) => {
                self.print_expression(n.callee);
                if n.optional {
                    self.writer.write("?.");
                }
                self.print_arguments(&n.arguments);
            }
            Expression::Update(n) => {
                if n.prefix {
                    self.writer.write(n.operator.as_str());
                    self.print_expression(n.operand);
                } else {
                    self.print_expression(n.operand);
                    self.writer.write(n.operator.as_str());
                }
            }
            Expression::Unary(n) => {
                self.writer.write(n.operator.as_str());
                if needs_space(n.operator, n.operand) {
                    self.writer.write(" ");
                }
                self.print_expression(n.operand);
            }
            Expression::Conditional(n) => {
                self.print_expression(n.condition);
                self.writer.write(" ? ");
                self.print_expression(n.when_true);
                self.writer.write(" : ");
                self.print_expression(n.when_false);
            }
            Expression::Paren(n) => {
                self.writer.write("(");
                self.print_expression(n.expression);
                self.writer.write(")");
            }
            Expression::New(n) => {
                self.writer.write("new ");
                self.print_expression(n.callee);
                if let Some(arguments) = &n.arguments {
                    self.print_arguments(arguments);
                }
            }
            Expression::Delete(n) => {
                self.writer.write("delete ");
                self.print_expression(n.expression);
            }
            Expression::Typeof(n) => {
                self.writer.write("typeof ");
                self.print_expression(n.expression);
            }
            Expression::Await(n) => {
                self.writer.write("await ");
                self.print_expression(n.expression);
            }
            Expression::Yield(n) => {
                self.writer.write(if n.delegate { "yield*" } else { "yield" });
                if let Some(expression) = n.expression {
                    self.writer.write(" ");
                    self.print_expression(expression);
                }
            }
            Expression::Function(n) => self.print_function_expression(n),
            Expression::Spread(n) => {
                self.writer.write("...");
                self.print_expression(n.expression);
            }
            Expression::DeleteLine(n) => {
                self.writer.write("delete ");
                self.write_child_path(n.identifier);
            }
            Expression::Missing(_) => self.writer.write("undefined"),
        }
    }

    fn print_list(&mut self, items: &[Expression<'_>]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.print_expression(item);
        }
    }

    fn print_arguments(&mut self, arguments: &Scope<'_, Expression<'_>>) {
        self.writer.write("(");
        self.print_list(arguments.items);
        self.writer.write(")");
    }

    fn print_object_literal(&mut self, object: &ObjectLiteral<'_>) {
        let properties = object.properties.items;
        if properties.is_empty() {
            self.writer.write("{}");
            return;
        }
        self.writer.write("{ ");
        for (i, property) in properties.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.writer.add_mapping(property.data.start());
            // Spread members carry their `...` in the value.
            if let Some(key) = &property.key {
                self.print_property_key(key);
                self.writer.write(": ");
            }
            self.print_expression(property.value);
        }
        self.writer.write(" }");
    }

    fn print_property_key(&mut self, key: &PropertyKey<'_>) {
        match key {
            PropertyKey::Name(name) | PropertyKey::Number(name) => self.writer.write(name),
            PropertyKey::String(literal) => {
                self.writer.write("[`");
                self.print_template_parts(literal.parts, escape_string);
                self.writer.write("`]");
            }
            PropertyKey::Computed(expression) => {
                self.writer.write("[");
                self.print_expression(expression);
                self.writer.write("]");
            }
        }
    }

    fn print_function_expression(&mut self, function: &FunctionExpression<'_>) {
        if function.is_arrow {
            if function.is_async {
                self.writer.write("async ");
            }
            self.print_parameters(&function.parameters);
            self.writer.write(" => ");
            match function.body {
                FunctionBody::Block(block) => self.print_block(block),
                FunctionBody::Expression(body @ Expression::Object(_)) => {
                    self.writer.write("(");
                    self.print_expression(body);
                    self.writer.write(")");
                }
                FunctionBody::Expression(body) => self.print_expression(body),
            }
            return;
        }

        self.print_function_head(function.is_async, function.is_generator, function.name);
        self.print_parameters(&function.parameters);
        self.writer.write(" ");
        match function.body {
            FunctionBody::Block(block) => self.print_block(block),
            FunctionBody::Expression(body) => {
                self.writer.write("{ return ");
                self.print_expression(body);
                self.writer.write("; }");
            }
        }
    }
}

/// `- -x` and `+ +x` must not run together into `--x` / `++x`.
fn needs_space(operator: UnaryOperator, operand: &Expression<'_>) -> bool {
    match (operator, operand) {
        (UnaryOperator::Void, _) => true,
        (UnaryOperator::Minus, Expression::Unary(inner)) => inner.operator == UnaryOperator::Minus,
        (UnaryOperator::Plus, Expression::Unary(inner)) => inner.operator == UnaryOperator::Plus,
        (UnaryOperator::Minus, Expression::Update(inner)) => {
            inner.prefix && inner.operator == UpdateOperator::Decrement
        }
        (UnaryOperator::Plus, Expression::Update(inner)) => {
            inner.prefix && inner.operator == UpdateOperator::Increment
        }
        _ => false,
    }
}
