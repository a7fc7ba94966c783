//! Position and range types for source location tracking.
//!
//! These types are used throughout the compiler to track where tokens,
//! AST nodes, and diagnostics originate in the source text.

use std::fmt;
use std::ops::Range;

/// A location in source text.
///
/// All three fields are zero-based. `offset` is a byte offset into the UTF-8
/// source, `column` counts characters from the start of the line.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub offset: u32,
    /// 0-based line number.
    pub line: u32,
    /// 0-based column, in characters.
    pub column: u32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The position at the very start of a source file.
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Advance this position over `text`, which must start at this position.
    ///
    /// Line breaks (`\n`) move to the start of the next line; every other
    /// character advances the column by one.
    pub fn advance(&self, text: &str) -> Position {
        let mut next = *self;
        for ch in text.chars() {
            if ch == '\n' {
                next.line += 1;
                next.column = 0;
            } else {
                next.column += 1;
            }
        }
        next.offset += text.len() as u32;
        next
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Editors count lines and columns from one.
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A text range with start and end positions.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextRange {
    /// Where this range starts (inclusive).
    pub start: Position,
    /// Where this range ends (exclusive).
    pub end: Position,
}

impl TextRange {
    /// Create a new text range.
    #[inline]
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(end.offset >= start.offset);
        Self { start, end }
    }

    /// Create an empty range at a position.
    #[inline]
    pub fn empty(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// The length of this range in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end.offset - self.start.offset
    }

    /// Whether this range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Whether this range contains a byte offset.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start.offset && offset < self.end.offset
    }

    /// Convert to a byte range.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start.offset as usize..self.end.offset as usize
    }

    /// Return a new range covering both this range and the other.
    pub fn union(&self, other: &TextRange) -> TextRange {
        let start = if other.start.offset < self.start.offset { other.start } else { self.start };
        let end = if other.end.offset > self.end.offset { other.end } else { self.end };
        TextRange::new(start, end)
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_plain_text() {
        let pos = Position::zero().advance("hello");
        assert_eq!(pos, Position::new(5, 0, 5));
    }

    #[test]
    fn test_advance_over_line_break() {
        let pos = Position::new(3, 0, 3).advance("ab\ncd");
        assert_eq!(pos.offset, 8);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_advance_counts_characters_not_bytes() {
        let pos = Position::zero().advance("héé");
        assert_eq!(pos.offset, 5);
        assert_eq!(pos.column, 3);
    }

    #[test]
    fn test_text_range() {
        let range = TextRange::new(Position::new(5, 0, 5), Position::new(15, 0, 15));
        assert_eq!(range.len(), 10);
        assert!(range.contains(5));
        assert!(range.contains(14));
        assert!(!range.contains(15));
        assert_eq!(range.to_range(), 5..15);
    }

    #[test]
    fn test_range_union() {
        let a = TextRange::new(Position::new(2, 0, 2), Position::new(4, 0, 4));
        let b = TextRange::new(Position::new(8, 1, 0), Position::new(9, 1, 1));
        let u = a.union(&b);
        assert_eq!(u.start, a.start);
        assert_eq!(u.end, b.end);
    }

    #[test]
    fn test_display_is_one_based() {
        let pos = Position::new(12, 2, 4);
        assert_eq!(pos.to_string(), "3:5");
    }
}
