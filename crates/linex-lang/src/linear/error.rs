use thiserror::Error;

use crate::IdentName;

#[derive(Error, Debug, PartialEq, Clone)]
pub enum LinearizeError {
    #[error("\"{0}\" is not defined")]
    NotDefined(IdentName),
    #[error("\"{0}\" is a scalar and cannot be indexed")]
    NotIndexable(IdentName),
    #[error("Maximum recursion depth exceeded \"{0}\"")]
    RecursionError(u32),
}
