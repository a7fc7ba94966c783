//! The indent-scope stack: which nested context object a line belongs to.
//!
//! Every object line replaces the stored stack with its parents plus
//! itself. Other lines only read it: their parents are the entries
//! indented less than the line, outermost first. A shallow text or `*`
//! line therefore leaves deeper ancestors in place for the lines after it.

/// One open object: the level of the line that declared it and its
/// rendered property key (`'name'` or a template literal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeEntry {
    pub indent: u32,
    pub key: String,
}

#[derive(Debug, Default)]
pub struct IndentScope {
    entries: Vec<ScopeEntry>,
    level: u32,
}

impl IndentScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the following lookups for a line at `level`. The stored
    /// stack is left untouched.
    pub fn enter_line(&mut self, level: u32) {
        self.level = level;
    }

    /// Store the current line's parents plus a new entry for the object it
    /// declares as the current scope.
    pub fn push(&mut self, key: String) {
        let keep = self.parents().len();
        self.entries.truncate(keep);
        self.entries.push(ScopeEntry {
            indent: self.level,
            key,
        });
    }

    /// The stored stack, including entries that are not parents of the
    /// current line.
    pub fn entries(&self) -> &[ScopeEntry] {
        &self.entries
    }

    /// Entries that are parents of the current line.
    pub fn parents(&self) -> &[ScopeEntry] {
        let count = self.entries.iter().take_while(|e| e.indent < self.level).count();
        &self.entries[..count]
    }

    /// JavaScript access path of the current line's innermost parent.
    pub fn path(&self) -> String {
        let mut path = String::from("context");
        for entry in self.parents() {
            path.push('[');
            path.push_str(&entry.key);
            path.push(']');
        }
        path
    }

    /// Access path of a property `key` of the innermost parent.
    pub fn child_path(&self, key: &str) -> String {
        format!("{}[{}]", self.path(), key)
    }

    /// Columns of indentation owned by the parent objects. Text indented
    /// further keeps the excess as leading spaces.
    pub fn owned_width(&self, indent_size: u32) -> u32 {
        self.parents()
            .last()
            .map_or(0, |entry| (entry.indent + 1) * indent_size)
    }
}
