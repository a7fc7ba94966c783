use stsc_ast::node::{Module, NodeData};
use stsc_ast::visitor::AstVisitor;
use stsc_diagnostics::{messages, Diagnostic};

/// Finds the placeholders the parser left for constructs it could not
/// read. Generated code substitutes `undefined` or nothing for them.
#[derive(Default)]
pub struct MissingNodeCollector {
    diagnostics: Vec<Diagnostic>,
}

impl<'a> AstVisitor<'a> for MissingNodeCollector {
    fn visit_missing(&mut self, data: &NodeData) {
        self.diagnostics.push(Diagnostic::new(
            &messages::CANNOT_GENERATE_INCOMPLETE_0,
            data.range,
            &["syntax"],
        ));
    }
}

/// One diagnostic per placeholder node in `module`.
pub fn collect_incomplete(module: &Module<'_>) -> Vec<Diagnostic> {
    let mut collector = MissingNodeCollector::default();
    collector.visit_module(module);
    collector.diagnostics
}
