use smol_str::SmolStr;

pub mod code;
pub mod error;
pub mod locate;
pub mod node;
pub mod parser;

pub type IdentName = SmolStr;

pub use node::{BinaryOp, Expr, Terminal};
