//! Operator and bracket scanning over whitespace-free source.
//!
//! The operator scans check symbols in the fixed order of
//! [`RESERVED_OPERATOR_SYMBOLS`] and stop at the first symbol that has a
//! qualifying occurrence, not at the leftmost operator in the string. That
//! order is the only precedence the parser has, so it must stay as is.
//!
//! Only the first (forward) or last (backward) occurrence of each symbol is
//! considered, and an occurrence at index 0 never counts: a leading sign is
//! part of its operand rather than a split point.

/// Binary operator symbols, in scan order.
pub const RESERVED_OPERATOR_SYMBOLS: [char; 5] = ['+', '-', '/', '*', '^'];

/// Opening and closing bracket pairs, in the order the parser resolves them.
pub const BRACKET_PAIRS: [(char, char); 2] = [('(', ')'), ('[', ']')];

/// Finds the operator to split on when scanning forward from `min_index`.
///
/// Returns `(s.len(), None)` when no symbol has an occurrence in
/// `[min_index, s.len())` at a positive index.
pub fn find_next_operator(s: &str, min_index: usize) -> (usize, Option<char>) {
    let bytes = s.as_bytes();
    let start = min_index.min(bytes.len());

    for symbol in RESERVED_OPERATOR_SYMBOLS {
        let found = bytes[start..]
            .iter()
            .position(|&b| b == symbol as u8)
            .map(|index| index + start);

        if let Some(index) = found.filter(|&index| index > 0) {
            return (index, Some(symbol));
        }
    }

    (bytes.len(), None)
}

/// Finds the operator to split on when scanning backward from `max_index`
/// (exclusive).
///
/// Returns `(0, None)` when no symbol has an occurrence in `[0, max_index)`
/// at a positive index.
pub fn find_prev_operator(s: &str, max_index: usize) -> (usize, Option<char>) {
    let bytes = s.as_bytes();
    let end = max_index.min(bytes.len());

    for symbol in RESERVED_OPERATOR_SYMBOLS {
        let found = bytes[..end].iter().rposition(|&b| b == symbol as u8);

        if let Some(index) = found.filter(|&index| index > 0) {
            return (index, Some(symbol));
        }
    }

    (0, None)
}

/// Finds the bracket closing the one opened at `open_index`.
///
/// Only brackets of the same type are counted, so `(` is never balanced
/// against `]`. Returns `None` when the nesting never returns to zero.
pub fn find_matching_close(s: &str, open: char, close: char, open_index: usize) -> Option<usize> {
    let rest = s.get(open_index + open.len_utf8()..)?;
    let base = open_index + open.len_utf8();
    let mut depth = 1usize;

    for (index, c) in rest.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
        }

        if depth == 0 {
            return Some(base + index);
        }
    }

    None
}
