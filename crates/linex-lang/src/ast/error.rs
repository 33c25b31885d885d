use thiserror::Error;

use super::IdentName;

/// Structural failures raised while building a tree.
///
/// Offsets are byte positions in the whitespace-stripped source.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ParseError {
    #[error("Unmatched bracket `{open}`")]
    UnmatchedBracket { open: char, offset: usize },
    #[error("Empty brackets `{open}{close}`")]
    EmptyBrackets {
        open: char,
        close: char,
        offset: usize,
    },
    #[error("Missing operand")]
    EmptyOperand(usize),
    #[error("Missing array name before `[`")]
    MissingArrayName(usize),
    #[error("Unexpected `{name}` before `(`")]
    UnexpectedPrefix { name: IdentName, offset: usize },
    #[error("Unexpected characters after closing `{close}`")]
    TrailingCharacters { close: char, offset: usize },
    #[error("Operator: {0} not implemented")]
    UnsupportedOperator(char, usize),
    #[error("Maximum nesting depth exceeded \"{0}\"")]
    RecursionLimit(u32),
}

impl ParseError {
    #[cold]
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::UnmatchedBracket { offset, .. } => Some(*offset),
            ParseError::EmptyBrackets { offset, .. } => Some(*offset),
            ParseError::EmptyOperand(offset) => Some(*offset),
            ParseError::MissingArrayName(offset) => Some(*offset),
            ParseError::UnexpectedPrefix { offset, .. } => Some(*offset),
            ParseError::TrailingCharacters { offset, .. } => Some(*offset),
            ParseError::UnsupportedOperator(_, offset) => Some(*offset),
            ParseError::RecursionLimit(_) => None,
        }
    }
}
