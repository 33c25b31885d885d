use crate::Env;
use crate::ast::node::Expr;
use crate::env::Binding;

use super::error::LinearizeError;
use super::instruction::{Assignment, Block, Branch, Register};

/// Lowers an expression tree into nested assignment blocks.
///
/// Each node writes its value to a register named after its branch and
/// array depth. Registers are not unique per node: two binary operands on
/// the same side at the same array depth share a name, and the flattened
/// program relies on emission order to read the right value.
#[derive(Debug, Clone)]
pub struct Linearizer<'a> {
    env: &'a Env,
    depth: u32,
    max_depth: u32,
}

impl<'a> Linearizer<'a> {
    pub fn new(env: &'a Env, max_depth: u32) -> Self {
        Self {
            env,
            depth: 0,
            max_depth,
        }
    }

    /// Lowers `expr` as the root of the program, writing its value to `x`.
    pub fn linearize(&mut self, expr: &Expr) -> Result<Block, LinearizeError> {
        self.lower(expr, Register::root())
    }

    /// Lowers `expr` into the register selected by `branch` at `array_depth`.
    pub fn linearize_at(&mut self, expr: &Expr, branch: Branch, array_depth: usize) -> Result<Block, LinearizeError> {
        self.lower(expr, Register::new(branch, array_depth))
    }

    fn lower(&mut self, expr: &Expr, register: Register) -> Result<Block, LinearizeError> {
        self.enter_scope()?;
        let result = self.lower_expr(expr, register);
        self.exit_scope();
        result
    }

    fn lower_expr(&mut self, expr: &Expr, register: Register) -> Result<Block, LinearizeError> {
        let mut block = Block::new();

        match expr {
            Expr::Binary { op, left, right } => {
                let left_register = register.operand(Branch::Left);
                let right_register = register.operand(Branch::Right);
                let left = self.lower(left, left_register)?;
                let right = self.lower(right, right_register)?;

                block.push_assign(Assignment::new(
                    register.to_string(),
                    format!("{} {} {}", left_register, op.op_text(), right_register),
                ));
                block.push_block(left);
                block.push_block(right);
            }
            Expr::ArrayAccess { name, index } => {
                let binding = match self.env.resolve(name) {
                    Some(binding @ Binding::Sequence(_)) => binding,
                    Some(Binding::Scalar(_)) => return Err(LinearizeError::NotIndexable(name.clone())),
                    None => return Err(LinearizeError::NotDefined(name.clone())),
                };

                let index_register = register.deeper();
                let index = self.lower(index, index_register)?;

                block.push_assign(Assignment::new(
                    register.to_string(),
                    format!("{}[{}]", name, index_register),
                ));
                block.push_assign(Assignment::new(name.as_str(), binding.to_string()));
                block.push_block(index);
            }
            Expr::Variable { name, .. } => {
                let value = match self.env.resolve(name) {
                    Some(binding) => binding.to_string(),
                    None => name.to_string(),
                };
                block.push_assign(Assignment::new(register.to_string(), value));
            }
            Expr::Paren(inner) => return self.lower(inner, register),
        }

        Ok(block)
    }

    fn enter_scope(&mut self) -> Result<(), LinearizeError> {
        if self.depth >= self.max_depth {
            return Err(LinearizeError::RecursionError(self.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    fn exit_scope(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }
}
