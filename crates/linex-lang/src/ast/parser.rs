use super::error::ParseError;
use super::locate::{BRACKET_PAIRS, find_matching_close, find_next_operator, find_prev_operator};
use super::node::{BinaryOp, Expr};

/// Removes every whitespace character from `code`.
///
/// Offsets reported by [`ParseError`] refer to the returned string.
pub fn strip_whitespace(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Builds expression trees by recursively splitting the source string.
///
/// There is no tokenizer: brackets are resolved first (parentheses before
/// square brackets), then the string is split at the operator picked by the
/// scan order of [`super::locate::RESERVED_OPERATOR_SYMBOLS`].
#[derive(Debug, Clone)]
pub struct Parser {
    max_depth: u32,
}

impl Parser {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    pub fn parse(&self, code: &str) -> Result<Expr, ParseError> {
        let source = strip_whitespace(code);
        self.parse_str(&source, 0, 0)
    }

    /// Parses `s`, which starts at byte `offset` of the stripped source.
    fn parse_str(&self, s: &str, offset: usize, depth: u32) -> Result<Expr, ParseError> {
        if depth >= self.max_depth {
            return Err(ParseError::RecursionLimit(self.max_depth));
        }

        for (open, close) in BRACKET_PAIRS {
            let Some(open_index) = s.find(open) else {
                continue;
            };

            let close_index = find_matching_close(s, open, close, open_index).ok_or(
                ParseError::UnmatchedBracket {
                    open,
                    offset: offset + open_index,
                },
            )?;

            if close_index == open_index + 1 {
                return Err(ParseError::EmptyBrackets {
                    open,
                    close,
                    offset: offset + open_index,
                });
            }

            return self.parse_bracketed(s, offset, depth, (open, close), open_index, close_index);
        }

        match find_next_operator(s, 0) {
            (index, Some(symbol)) => {
                log::trace!("split `{}` at `{}` ({})", s, symbol, offset + index);
                self.split_at(s, offset, depth, index, symbol)
            }
            (_, None) => {
                if s.is_empty() {
                    return Err(ParseError::EmptyOperand(offset));
                }

                log::trace!("terminal `{}` ({})", s, offset);
                Ok(Expr::variable(s))
            }
        }
    }

    fn parse_bracketed(
        &self,
        s: &str,
        offset: usize,
        depth: u32,
        (open, close): (char, char),
        open_index: usize,
        close_index: usize,
    ) -> Result<Expr, ParseError> {
        let (prev_index, prev_symbol) = find_prev_operator(s, open_index);
        let (next_index, next_symbol) = find_next_operator(s, close_index);

        match (prev_symbol, next_symbol) {
            // An operator before the bracket: everything after it is the right operand.
            (Some(symbol), _) => {
                log::trace!("split `{}` at `{}` before `{}` ({})", s, symbol, open, offset + prev_index);
                self.split_at(s, offset, depth, prev_index, symbol)
            }
            // The bracket leads: it becomes the left operand of the next operator.
            (None, Some(symbol)) => {
                log::trace!("split `{}` at `{}` after `{}` ({})", s, symbol, close, offset + next_index);
                self.split_at(s, offset, depth, next_index, symbol)
            }
            (None, None) => self.parse_group(s, offset, depth, (open, close), open_index, close_index),
        }
    }

    /// Builds the node for a string that is exactly `name<open>interior<close>`.
    fn parse_group(
        &self,
        s: &str,
        offset: usize,
        depth: u32,
        (open, close): (char, char),
        open_index: usize,
        close_index: usize,
    ) -> Result<Expr, ParseError> {
        let trailing = close_index + close.len_utf8();
        if trailing < s.len() {
            return Err(ParseError::TrailingCharacters {
                close,
                offset: offset + trailing,
            });
        }

        let name = &s[..open_index];
        let interior_start = open_index + open.len_utf8();
        let interior = self.parse_str(&s[interior_start..close_index], offset + interior_start, depth + 1)?;

        match open {
            '[' if name.is_empty() => Err(ParseError::MissingArrayName(offset + open_index)),
            '[' => {
                log::trace!("array access `{}` ({})", name, offset);
                Ok(Expr::array_access(name, interior))
            }
            _ if name.is_empty() => Ok(Expr::paren(interior)),
            _ => Err(ParseError::UnexpectedPrefix {
                name: name.into(),
                offset,
            }),
        }
    }

    /// Parses both sides of the operator at `index` and combines them.
    fn split_at(&self, s: &str, offset: usize, depth: u32, index: usize, symbol: char) -> Result<Expr, ParseError> {
        let right_start = index + symbol.len_utf8();
        let left = self.parse_str(&s[..index], offset, depth + 1)?;
        let right = self.parse_str(&s[right_start..], offset + right_start, depth + 1)?;

        combine(symbol, left, right, offset + index)
    }
}

/// Assembles the binary node for `symbol` from two parsed operands.
fn combine(symbol: char, left: Expr, right: Expr, offset: usize) -> Result<Expr, ParseError> {
    BinaryOp::from_symbol(symbol)
        .map(|op| Expr::binary(op, left, right))
        .ok_or(ParseError::UnsupportedOperator(symbol, offset))
}
