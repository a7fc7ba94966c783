//! AST visitor trait for traversing the syntax tree.
//!
//! Default implementations walk into children, so an implementation only
//! overrides the node kinds it cares about.

use crate::node::*;

/// A visitor that traverses the AST. Default implementations walk into children.
pub trait AstVisitor<'a> {
    fn visit_module(&mut self, node: &Module<'a>) {
        for line in node.lines.iter() {
            self.visit_line(line);
        }
    }

    fn visit_line(&mut self, line: &Line<'a>) {
        match line {
            Line::Outer(n) => self.visit_statement(n.statement),
            Line::Text(n) => self.visit_text_content(n.content),
            Line::Comment(_) => {}
        }
    }

    fn visit_text_content(&mut self, content: &[TextContent<'a>]) {
        for part in content.iter() {
            if let TextContent::Include(include) = part {
                self.visit_expression(include.expression);
            }
        }
    }

    // -- Statements --

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        match stmt {
            Statement::ObjectLine(n) => self.visit_object_line(n),
            Statement::Block(n) => self.visit_block(n),
            Statement::Expression(n) => self.visit_expression(n.expression),
            Statement::Variable(n) => self.visit_variable_declaration(n),
            Statement::Function(n) => {
                self.visit_expression(n.name);
                self.visit_parameters(&n.parameters);
                self.visit_block(n.body);
            }
            Statement::If(n) => {
                self.visit_expression(n.condition);
                self.visit_statement(n.then_statement);
                if let Some(else_statement) = n.else_statement {
                    self.visit_statement(else_statement);
                }
            }
            Statement::Switch(n) => {
                self.visit_expression(n.discriminant);
                self.visit_block(n.body);
            }
            Statement::Case(n) => {
                if let Some(test) = n.test {
                    self.visit_expression(test);
                }
            }
            Statement::While(n) => {
                self.visit_expression(n.condition);
                self.visit_statement(n.body);
            }
            Statement::DoWhile(n) => {
                self.visit_statement(n.body);
                self.visit_expression(n.condition);
            }
            Statement::For(n) => {
                if let Some(init) = &n.initializer {
                    self.visit_for_initializer(init);
                }
                if let Some(condition) = n.condition {
                    self.visit_expression(condition);
                }
                if let Some(update) = n.update {
                    self.visit_expression(update);
                }
                self.visit_statement(n.body);
            }
            Statement::ForIn(n) => {
                self.visit_for_initializer(&n.binding);
                self.visit_expression(n.expression);
                self.visit_statement(n.body);
            }
            Statement::ForOf(n) => {
                self.visit_for_initializer(&n.binding);
                self.visit_expression(n.expression);
                self.visit_statement(n.body);
            }
            Statement::Try(n) => {
                self.visit_block(n.block);
                if let Some(catch_clause) = &n.catch_clause {
                    self.visit_block(catch_clause.block);
                }
                if let Some(finally_clause) = &n.finally_clause {
                    self.visit_block(finally_clause.block);
                }
            }
            Statement::Throw(n) => self.visit_expression(n.expression),
            Statement::Return(n) => {
                if let Some(expression) = n.expression {
                    self.visit_expression(expression);
                }
            }
            Statement::Missing(data) => self.visit_missing(data),
            Statement::Import(_)
            | Statement::Break(_)
            | Statement::Continue(_)
            | Statement::Debugger(_)
            | Statement::Empty(_) => {}
        }
    }

    fn visit_object_line(&mut self, node: &ObjectLineStatement<'a>) {
        self.visit_expression(node.identifier);
        if let Some(prototype) = &node.prototype {
            self.visit_expression(prototype.expression);
        }
        for tag in node.tags.iter() {
            if let Some(value) = tag.value {
                self.visit_expression(value);
            }
        }
        if let Some(init) = node.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_block(&mut self, node: &Block<'a>) {
        match &node.body {
            BlockBody::Code(scope) => {
                for stmt in scope.items.iter() {
                    self.visit_statement(stmt);
                }
            }
            BlockBody::Template(scope) => {
                for line in scope.items.iter() {
                    self.visit_line(line);
                }
            }
        }
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration<'a>) {
        for declarator in node.declarators.iter() {
            self.visit_expression(declarator.name);
            if let Some(init) = declarator.initializer {
                self.visit_expression(init);
            }
        }
    }

    fn visit_for_initializer(&mut self, node: &ForInitializer<'a>) {
        match node {
            ForInitializer::Variable(declaration) => self.visit_variable_declaration(declaration),
            ForInitializer::Expression(expression) => self.visit_expression(expression),
        }
    }

    fn visit_parameters(&mut self, parameters: &Scope<'a, Parameter<'a>>) {
        for parameter in parameters.items.iter() {
            if let Some(default) = parameter.default {
                self.visit_expression(default);
            }
        }
    }

    // -- Expressions --

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        match expr {
            Expression::String(n) => self.visit_text_content(n.parts),
            Expression::IdentifierScope(n) => self.visit_text_content(n.parts),
            Expression::Array(n) => {
                for element in n.elements.items.iter() {
                    self.visit_expression(element);
                }
            }
            Expression::Object(n) => {
                for property in n.properties.items.iter() {
                    if let Some(PropertyKey::Computed(key)) = property.key {
                        self.visit_expression(key);
                    }
                    self.visit_expression(property.value);
                }
            }
            Expression::Binary(n) => {
                self.visit_expression(n.left);
                self.visit_expression(n.right);
            }
            Expression::Member(n) => self.visit_expression(n.object),
            Expression::Indexer(n) => {
                self.visit_expression(n.object);
                self.visit_expression(n.index);
            }
            Expression::Call(n) => {
                self.visit_expression(n.callee);
                for argument in n.arguments.items.iter() {
                    self.visit_expression(argument);
                }
            }
            Expression::Update(n) => self.visit_expression(n.operand),
            Expression::Unary(n) => self.visit_expression(n.operand),
            Expression::Conditional(n) => {
                self.visit_expression(n.condition);
                self.visit_expression(n.when_true);
                self.visit_expression(n.when_false);
            }
            Expression::Paren(n) => self.visit_expression(n.expression),
            Expression::New(n) => {
                self.visit_expression(n.callee);
                if let Some(arguments) = &n.arguments {
                    for argument in arguments.items.iter() {
                        self.visit_expression(argument);
                    }
                }
            }
            Expression::Delete(n) => self.visit_expression(n.expression),
            Expression::Typeof(n) => self.visit_expression(n.expression),
            Expression::Await(n) => self.visit_expression(n.expression),
            Expression::Yield(n) => {
                if let Some(expression) = n.expression {
                    self.visit_expression(expression);
                }
            }
            Expression::Function(n) => {
                self.visit_parameters(&n.parameters);
                match n.body {
                    FunctionBody::Block(block) => self.visit_block(block),
                    FunctionBody::Expression(expression) => self.visit_expression(expression),
                }
            }
            Expression::Spread(n) => self.visit_expression(n.expression),
            Expression::DeleteLine(n) => self.visit_expression(n.identifier),
            Expression::Missing(data) => self.visit_missing(data),
            Expression::Number(_)
            | Expression::Boolean(_)
            | Expression::Keyword(_)
            | Expression::Identifier(_)
            | Expression::RawIdentifier(_)
            | Expression::ContextIdentifier(_) => {}
        }
    }

    /// Called for every `Missing` placeholder, statement or expression.
    fn visit_missing(&mut self, _data: &NodeData) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::NodeFactory;
    use crate::node_type::NodeType;
    use crate::operators::BinaryOperator;
    use bumpalo::Bump;
    use stsc_core::text::{Position, TextRange};

    struct MissingCounter(usize);

    impl<'a> AstVisitor<'a> for MissingCounter {
        fn visit_missing(&mut self, _data: &NodeData) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_visitor_reaches_nested_missing_nodes() {
        let arena = Bump::new();
        let factory = NodeFactory::new(&arena);
        let range = TextRange::empty(Position::zero());
        let binary = factory.alloc(Expression::Binary(BinaryExpression {
            data: NodeData::new(NodeType::BinaryExpression, range),
            left: factory.missing_expression(range),
            operator: BinaryOperator::Plus,
            right: factory.missing_expression(range),
        }));
        let statement = Statement::If(IfStatement {
            data: NodeData::new(NodeType::IfStatement, range),
            condition: binary,
            then_statement: factory.missing_statement(range),
            else_statement: None,
        });

        let mut counter = MissingCounter(0);
        counter.visit_statement(&statement);
        assert_eq!(counter.0, 3);
    }
}
