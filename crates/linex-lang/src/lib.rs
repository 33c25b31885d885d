//! `linex-lang` parses arithmetic expressions, evaluates them against an
//! environment of scalars and sequences, and lowers them into flat
//! `target = value` programs.
//!
//! Expressions use the operators `+ - * / ^`, parentheses, and bracketed
//! array indexing such as `a[c[5 - 3*i]]`. Whitespace is ignored.
//!
//! ## Examples
//!
//! ```
//! use linex_lang::{Env, Engine};
//!
//! let env = Env::new()
//!     .with_sequence("a", [0, 5, 10, 15, 20, 25])
//!     .with_sequence("c", 0..15)
//!     .with_scalar("i", 1);
//!
//! // Evaluate
//! assert_eq!(linex_lang::evaluate("a[c[5 - 3*i]] + 15", &env).unwrap(), linex_lang::Number::from(25));
//!
//! // Parse into a tree and print it back
//! let expr = linex_lang::parse("a[5] * 2").unwrap();
//! assert_eq!(expr.to_string(), "a[5]*2");
//!
//! // Lower into assignments, definitions first
//! let block = linex_lang::linearize("2 + 3", &env).unwrap();
//! let mut out = Vec::new();
//! linex_lang::flatten_write(&block, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "z = 3\ny = 2\nx = y + z\n");
//!
//! // Or use an engine with custom limits
//! let mut engine = Engine::default();
//! engine.set_max_depth(64);
//! assert_eq!(engine.eval("2 ^ 3 ^ 2", &env).unwrap(), linex_lang::Number::from(512));
//! ```
mod ast;
mod engine;
mod env;
mod error;
mod eval;
mod linear;
mod number;

pub use ast::IdentName;
pub use ast::error::ParseError;
pub use ast::locate::{find_matching_close, find_next_operator, find_prev_operator};
pub use ast::{BinaryOp, Expr, Terminal};
pub use ast::parser::{Parser, strip_whitespace};
pub use engine::{Engine, Options};
pub use env::{Binding, Env};
pub use error::{Error, InnerError};
pub use eval::Evaluator;
pub use eval::error::EvalError;
pub use linear::{
    Assignment, Block, Branch, Instruction, LinearizeError, Linearizer, Register, flatten_write,
};
pub use number::Number;

pub type LinexResult<T> = Result<T, Error>;

/// Parses `code` with the default [`Options`].
#[allow(clippy::result_large_err)]
pub fn parse(code: &str) -> LinexResult<Expr> {
    Engine::default().parse(code)
}

/// Parses and evaluates `code` against `env` with the default [`Options`].
#[allow(clippy::result_large_err)]
pub fn evaluate(code: &str, env: &Env) -> LinexResult<Number> {
    Engine::default().eval(code, env)
}

/// Parses and linearizes `code` against `env` with the default [`Options`].
#[allow(clippy::result_large_err)]
pub fn linearize(code: &str, env: &Env) -> LinexResult<Block> {
    Engine::default().linearize(code, env)
}
