//! Lowering of expression trees into flat `target = value` programs.
//!
//! [`Linearizer`] produces a nested [`Block`] in which every line is followed
//! by the blocks computing its operands. [`flatten_write`] walks that
//! structure back to front, so the text it writes defines each register
//! before reading it.

pub mod error;
pub mod instruction;
pub mod lower;
pub mod writer;

pub use error::LinearizeError;
pub use instruction::{Assignment, Block, Branch, Instruction, Register};
pub use lower::Linearizer;
pub use writer::flatten_write;
