pub mod error;

use crate::Env;
use crate::ast::node::{BinaryOp, Expr, Terminal};
use crate::env::Binding;
use crate::number::Number;
use error::EvalError;

/// Reduces an expression tree to a number against a read-only environment.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    env: &'a Env,
    /// Current recursion depth, used to prevent stack exhaustion on deep trees.
    depth: u32,
    max_depth: u32,
}

impl<'a> Evaluator<'a> {
    pub fn new(env: &'a Env, max_depth: u32) -> Self {
        Self {
            env,
            depth: 0,
            max_depth,
        }
    }

    pub fn eval(&mut self, expr: &Expr) -> Result<Number, EvalError> {
        self.enter_scope()?;
        let result = self.eval_expr(expr);
        self.exit_scope();
        result
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Number, EvalError> {
        match expr {
            Expr::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(apply(*op, left, right))
            }
            Expr::ArrayAccess { name, index } => {
                let values = match self.env.resolve(name) {
                    Some(Binding::Sequence(values)) => values,
                    Some(Binding::Scalar(_)) => return Err(EvalError::NotIndexable(name.clone())),
                    None => return Err(EvalError::NotDefined(name.clone())),
                };

                let index = self.eval(index)?;
                let position = index.to_index().ok_or_else(|| EvalError::InvalidIndex {
                    name: name.clone(),
                    index,
                })?;

                values.get(position).copied().ok_or_else(|| EvalError::IndexOutOfBounds {
                    name: name.clone(),
                    index,
                    len: values.len(),
                })
            }
            Expr::Variable { name, value } => match self.env.resolve(name) {
                Some(Binding::Scalar(n)) => Ok(*n),
                Some(Binding::Sequence(_)) => Err(EvalError::NotScalar(name.clone())),
                None => match value {
                    Terminal::Number(n) => Ok(*n),
                    Terminal::Symbol(symbol) => Err(EvalError::NotDefined(symbol.clone())),
                },
            },
            Expr::Paren(inner) => self.eval(inner),
        }
    }

    fn enter_scope(&mut self) -> Result<(), EvalError> {
        if self.depth >= self.max_depth {
            return Err(EvalError::RecursionError(self.max_depth));
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

#[inline(always)]
fn apply(op: BinaryOp, left: Number, right: Number) -> Number {
    match op {
        BinaryOp::Sum => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Product => left * right,
        BinaryOp::Div => left / right,
        BinaryOp::Exponent => left.pow(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn env() -> Env {
        Env::new()
            .with_sequence("a", (0..6).map(|i| i * 5))
            .with_sequence("c", 0..15)
            .with_scalar("i", 1)
    }

    fn var(name: &str) -> Expr {
        Expr::variable(name)
    }

    fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::binary(op, left, right)
    }

    fn eval(expr: &Expr, env: &Env) -> Result<Number, EvalError> {
        Evaluator::new(env, 64).eval(expr)
    }

    #[rstest]
    #[case::numeral(var("2.5"), 2.5)]
    #[case::scalar_binding(var("i"), 1.0)]
    #[case::sum(bin(BinaryOp::Sum, var("5"), var("2")), 7.0)]
    #[case::sub(bin(BinaryOp::Sub, var("5"), var("2")), 3.0)]
    #[case::product(bin(BinaryOp::Product, var("5"), var("2")), 10.0)]
    #[case::div(bin(BinaryOp::Div, var("5"), var("2")), 2.5)]
    #[case::exponent(bin(BinaryOp::Exponent, var("2"), var("3")), 8.0)]
    #[case::paren(Expr::paren(bin(BinaryOp::Sum, var("1"), var("i"))), 2.0)]
    #[case::array_access(Expr::array_access("a", var("5")), 25.0)]
    #[case::index_truncates(Expr::array_access("a", var("2.9")), 10.0)]
    #[case::nested_array_access(
        Expr::array_access("a", Expr::array_access("c", bin(BinaryOp::Sub, var("5"), bin(BinaryOp::Product, var("3"), var("i"))))),
        10.0
    )]
    fn test_eval(env: Env, #[case] expr: Expr, #[case] expected: f64) {
        assert_eq!(eval(&expr, &env), Ok(expected.into()));
    }

    #[rstest]
    fn test_env_shadows_numeral(env: Env) {
        let env = env.with_scalar("5", 50);
        assert_eq!(eval(&var("5"), &env), Ok(50.into()));
    }

    #[rstest]
    #[case::unbound_variable(var("x"), EvalError::NotDefined("x".into()))]
    #[case::unbound_array(Expr::array_access("b", var("0")), EvalError::NotDefined("b".into()))]
    #[case::sequence_as_scalar(var("a"), EvalError::NotScalar("a".into()))]
    #[case::scalar_indexed(Expr::array_access("i", var("0")), EvalError::NotIndexable("i".into()))]
    #[case::out_of_bounds(
        Expr::array_access("a", var("6")),
        EvalError::IndexOutOfBounds { name: "a".into(), index: 6.into(), len: 6 }
    )]
    #[case::negative_index(
        Expr::array_access("a", var("-1")),
        EvalError::InvalidIndex { name: "a".into(), index: (-1).into() }
    )]
    #[case::unbound_in_index(Expr::array_access("a", var("j")), EvalError::NotDefined("j".into()))]
    fn test_eval_error(env: Env, #[case] expr: Expr, #[case] expected: EvalError) {
        assert_eq!(eval(&expr, &env), Err(expected));
    }

    #[rstest]
    fn test_division_by_zero_is_not_an_error(env: Env) {
        let expr = bin(BinaryOp::Div, var("1"), var("0"));
        assert_eq!(eval(&expr, &env), Ok(f64::INFINITY.into()));
    }

    #[rstest]
    fn test_recursion_error(env: Env) {
        let expr = (0..20).fold(var("1"), |acc, _| Expr::paren(acc));
        assert_eq!(Evaluator::new(&env, 10).eval(&expr), Err(EvalError::RecursionError(10)));
        assert_eq!(Evaluator::new(&env, 32).eval(&expr), Ok(1.into()));
    }

    #[rstest]
    fn test_depth_is_restored_between_calls(env: Env) {
        let expr = bin(BinaryOp::Sum, var("1"), var("2"));
        let mut evaluator = Evaluator::new(&env, 2);
        assert_eq!(evaluator.eval(&expr), Ok(3.into()));
        assert_eq!(evaluator.eval(&expr), Ok(3.into()));
    }
}
