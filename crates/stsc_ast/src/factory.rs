//! Arena-backed node construction.
//!
//! All nodes of one module live in a single bump arena; the whole tree is
//! freed at once when the arena is dropped.

use crate::node::*;
use crate::node_type::NodeType;
use bumpalo::Bump;
use stsc_core::text::TextRange;

/// Allocates AST nodes and node lists into a bump arena.
#[derive(Clone, Copy)]
pub struct NodeFactory<'a> {
    arena: &'a Bump,
}

impl<'a> NodeFactory<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self { arena }
    }

    /// Get a reference to the underlying bump allocator.
    #[inline]
    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    /// Allocate a node in the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, node: T) -> &'a T {
        self.arena.alloc(node)
    }

    /// Move a list of nodes into the arena.
    pub fn list<T: Copy>(&self, items: Vec<T>) -> NodeList<'a, T> {
        if items.is_empty() {
            return &[];
        }
        self.arena.alloc_slice_copy(&items)
    }

    /// Allocate a string in the arena.
    #[inline]
    pub fn alloc_str(&self, text: &str) -> &'a str {
        self.arena.alloc_str(text)
    }

    pub fn missing_expression(&self, range: TextRange) -> &'a Expression<'a> {
        self.alloc(Expression::Missing(NodeData::new(NodeType::Missing, range)))
    }

    pub fn missing_statement(&self, range: TextRange) -> &'a Statement<'a> {
        self.alloc(Statement::Missing(NodeData::new(NodeType::Missing, range)))
    }

    pub fn scope<T: Copy>(
        &self,
        open: TextRange,
        items: Vec<T>,
        close: Option<TextRange>,
    ) -> Scope<'a, T> {
        let end = close.unwrap_or(open);
        Scope {
            data: NodeData::new(NodeType::Scope, open.union(&end)),
            open,
            items: self.list(items),
            close,
        }
    }
}
