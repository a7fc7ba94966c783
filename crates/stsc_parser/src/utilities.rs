//! Parser utility functions.

use unicode_xid::UnicodeXID;

/// Words that can never name a variable, object line or parameter.
const RESERVED_WORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "false", "finally", "for",
    "function", "if", "import", "in", "instanceof", "let", "new", "null", "return", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield",
];

/// Names resolved as plain JavaScript identifiers instead of context lookups.
const GLOBAL_NAMES: &[&str] = &[
    "Array", "BigInt", "Boolean", "Date", "Error", "Infinity", "Intl", "JSON", "Map", "Math",
    "NaN", "Number", "Object", "Promise", "Proxy", "RangeError", "Reflect", "RegExp", "Set",
    "String", "Symbol", "TypeError", "WeakMap", "WeakSet", "arguments", "clearTimeout",
    "console", "context", "decodeURI", "decodeURIComponent", "encodeURI",
    "encodeURIComponent", "environment", "globalThis", "isFinite", "isNaN", "module",
    "parseFloat", "parseInt", "require", "serializer", "setTimeout",
];

/// Check if a word is a valid identifier (`$` and `_` allowed anywhere).
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '$' || first == '_' || first.is_xid_start() => {}
        _ => return false,
    }
    chars.all(|c| c == '$' || c.is_xid_continue())
}

/// Check if a word is reserved.
pub fn is_reserved_word(text: &str) -> bool {
    RESERVED_WORDS.contains(&text)
}

/// Check if a name refers to a well-known JavaScript global.
pub fn is_global_name(text: &str) -> bool {
    GLOBAL_NAMES.binary_search(&text).is_ok()
}

/// A word that can start a numeric literal.
pub fn starts_number(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Digits only (numeric separators allowed), used for fraction parts.
pub fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit() || c == '_')
}

/// A number word ending in an exponent marker whose sign is a separate
/// token (`1e` in `1e-5`).
pub fn ends_with_open_exponent(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    if lower.starts_with("0x") {
        return false;
    }
    match lower.strip_suffix('e') {
        Some(mantissa) => mantissa.is_empty() || is_digits(mantissa),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("hero"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$el"));
        assert!(is_identifier("dragón"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_global_names_are_sorted() {
        let mut sorted = GLOBAL_NAMES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, GLOBAL_NAMES);
        assert!(is_global_name("Math"));
        assert!(!is_global_name("hero"));
    }

    #[test]
    fn test_open_exponent() {
        assert!(ends_with_open_exponent("1e"));
        assert!(ends_with_open_exponent("25E"));
        assert!(!ends_with_open_exponent("0xe"));
        assert!(!ends_with_open_exponent("12"));
    }
}
