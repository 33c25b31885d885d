#[cfg(feature = "ast-json")]
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::number::Number;

use super::IdentName;

/// The value carried by a terminal `Variable`.
///
/// Names that read as a finite floating-point numeral are stored as numbers,
/// everything else is kept symbolic and resolved against an environment.
#[cfg_attr(feature = "ast-json", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub enum Terminal {
    Number(Number),
    Symbol(IdentName),
}

impl Terminal {
    pub fn from_name(name: &str) -> Self {
        match name.parse::<f64>() {
            Ok(value) if value.is_finite() => Terminal::Number(value.into()),
            _ => Terminal::Symbol(IdentName::new(name)),
        }
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Terminal::Number(n) => write!(f, "{}", n),
            Terminal::Symbol(name) => write!(f, "{}", name),
        }
    }
}

#[cfg_attr(feature = "ast-json", derive(Serialize, Deserialize))]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum BinaryOp {
    Sum,
    Sub,
    Product,
    Div,
    Exponent,
}

impl BinaryOp {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(BinaryOp::Sum),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Product),
            '/' => Some(BinaryOp::Div),
            '^' => Some(BinaryOp::Exponent),
            _ => None,
        }
    }

    /// The symbol this operator is written with in source text.
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Sum => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Product => '*',
            BinaryOp::Div => '/',
            BinaryOp::Exponent => '^',
        }
    }

    /// The operator text used in emitted instructions.
    pub fn op_text(self) -> &'static str {
        match self {
            BinaryOp::Sum => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Product => "*",
            BinaryOp::Div => "/",
            BinaryOp::Exponent => "**",
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.symbol())
    }
}

/// An arithmetic expression tree.
///
/// Operands are owned exclusively by their parent node, so a tree never
/// shares subtrees and cannot contain cycles.
#[cfg_attr(feature = "ast-json", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub enum Expr {
    /// A bare name or numeral.
    Variable { name: IdentName, value: Terminal },
    /// `name[index]`, resolved against a sequence bound in the environment.
    ArrayAccess { name: IdentName, index: Box<Expr> },
    /// A parenthesized group.
    Paren(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn variable(name: &str) -> Self {
        Expr::Variable {
            name: IdentName::new(name),
            value: Terminal::from_name(name),
        }
    }

    pub fn array_access(name: &str, index: Expr) -> Self {
        Expr::ArrayAccess {
            name: IdentName::new(name),
            index: Box::new(index),
        }
    }

    pub fn paren(inner: Expr) -> Self {
        Expr::Paren(Box::new(inner))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Expr::Variable { .. })
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Variable { .. } => 1,
            Expr::ArrayAccess { index, .. } => 1 + index.depth(),
            Expr::Paren(inner) => 1 + inner.depth(),
            Expr::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}
