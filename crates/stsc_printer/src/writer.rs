//! Output buffer that tracks the generated position for source maps.

use stsc_core::text::Position;
use stsc_sourcemap::Mapping;

pub(crate) struct TextWriter {
    output: String,
    indent_str: String,
    new_line: String,
    indent_level: u32,
    line: u32,
    column: u32,
    mappings: Vec<Mapping>,
}

impl TextWriter {
    pub(crate) fn new(indent_str: &str, new_line: &str) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_str: indent_str.to_string(),
            new_line: new_line.to_string(),
            indent_level: 0,
            line: 0,
            column: 0,
            mappings: Vec::new(),
        }
    }

    /// Append text, which may span lines.
    pub(crate) fn write(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.output.push_str(text);
    }

    /// Bytes written so far.
    pub(crate) fn len(&self) -> usize {
        self.output.len()
    }

    pub(crate) fn text_since(&self, start: usize) -> &str {
        self.output.get(start..).unwrap_or_default()
    }

    pub(crate) fn write_newline(&mut self) {
        self.output.push_str(&self.new_line);
        self.line += 1;
        self.column = 0;
    }

    pub(crate) fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_str);
            self.column += self.indent_str.chars().count() as u32;
        }
    }

    pub(crate) fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(crate) fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Map the current output position to `original` in source 0.
    pub(crate) fn add_mapping(&mut self, original: Position) {
        if let Some(last) = self.mappings.last() {
            if last.generated_line == self.line && last.generated_column == self.column {
                return;
            }
        }
        self.mappings.push(Mapping {
            generated_line: self.line,
            generated_column: self.column,
            source_index: Some(0),
            original_line: original.line,
            original_column: original.column,
            name_index: None,
        });
    }

    pub(crate) fn finish(self) -> (String, Vec<Mapping>) {
        (self.output, self.mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_lines_and_columns() {
        let mut writer = TextWriter::new("  ", "\n");
        writer.write("ab");
        writer.add_mapping(Position::new(4, 1, 2));
        writer.write_newline();
        writer.increase_indent();
        writer.write_indent();
        writer.write("`x\ny`");
        writer.add_mapping(Position::new(9, 2, 0));
        let (output, mappings) = writer.finish();
        assert_eq!(output, "ab\n  `x\ny`");
        assert_eq!((mappings[0].generated_line, mappings[0].generated_column), (0, 2));
        assert_eq!((mappings[1].generated_line, mappings[1].generated_column), (2, 2));
        assert_eq!(mappings[1].original_line, 2);
    }

    #[test]
    fn test_first_mapping_at_a_position_wins() {
        let mut writer = TextWriter::new("  ", "\n");
        writer.add_mapping(Position::new(0, 0, 0));
        writer.add_mapping(Position::new(3, 0, 3));
        let (_, mappings) = writer.finish();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].original_column, 0);
    }
}
