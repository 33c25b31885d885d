use thiserror::Error;

use crate::{IdentName, number::Number};

#[derive(Error, Debug, PartialEq, Clone)]
pub enum EvalError {
    #[error("\"{0}\" is not defined")]
    NotDefined(IdentName),
    #[error("Index out of bounds {index} for \"{name}\" of length {len}")]
    IndexOutOfBounds {
        name: IdentName,
        index: Number,
        len: usize,
    },
    #[error("Invalid index {index} for \"{name}\"")]
    InvalidIndex { name: IdentName, index: Number },
    #[error("\"{0}\" is a sequence, expected a scalar")]
    NotScalar(IdentName),
    #[error("\"{0}\" is a scalar and cannot be indexed")]
    NotIndexable(IdentName),
    #[error("Maximum recursion depth exceeded \"{0}\"")]
    RecursionError(u32),
}
