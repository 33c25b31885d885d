use std::io::Write;

use crate::{
    Env, Number,
    ast::{node::Expr, parser::Parser, parser::strip_whitespace},
    error::{Error, InnerError},
    eval::Evaluator,
    linear::{Block, Linearizer, flatten_write},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Maximum recursion depth shared by the parser, evaluator and linearizer.
    pub max_depth: u32,
}

#[cfg(debug_assertions)]
// Debug builds run on smaller stacks.
impl Default for Options {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

#[cfg(not(debug_assertions))]
impl Default for Options {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

/// Entry point tying the parser, evaluator and linearizer together.
///
/// ```
/// use linex_lang::{Engine, Env};
///
/// let engine = Engine::default();
/// let env = Env::new().with_sequence("a", [0, 5, 10]).with_scalar("i", 1);
///
/// assert_eq!(engine.eval("a[i] * 2 + 1", &env).unwrap(), linex_lang::Number::from(11));
///
/// let mut out = Vec::new();
/// engine.emit("2 + 3", &env, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "z = 3\ny = 2\nx = y + z\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub(crate) options: Options,
}

impl Engine {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.options.max_depth = max_depth;
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    #[allow(clippy::result_large_err)]
    pub fn parse(&self, code: &str) -> Result<Expr, Error> {
        log::debug!("parse `{}`", code);
        Parser::new(self.options.max_depth)
            .parse(code)
            .map_err(|e| Error::from_error(strip_whitespace(code), InnerError::Parse(e)))
    }

    #[allow(clippy::result_large_err)]
    pub fn eval(&self, code: &str, env: &Env) -> Result<Number, Error> {
        let expr = self.parse(code)?;
        log::debug!("eval `{}`", expr);
        self.evaluate(&expr, env)
    }

    /// Evaluates an already parsed tree.
    #[allow(clippy::result_large_err)]
    pub fn evaluate(&self, expr: &Expr, env: &Env) -> Result<Number, Error> {
        Evaluator::new(env, self.options.max_depth)
            .eval(expr)
            .map_err(|e| Error::from_error(expr.to_code(), InnerError::Eval(e)))
    }

    #[allow(clippy::result_large_err)]
    pub fn linearize(&self, code: &str, env: &Env) -> Result<Block, Error> {
        let expr = self.parse(code)?;
        log::debug!("linearize `{}`", expr);
        Linearizer::new(env, self.options.max_depth)
            .linearize(&expr)
            .map_err(|e| Error::from_error(expr.to_code(), InnerError::Linearize(e)))
    }

    /// Linearizes `code` and writes the flattened program to `sink`.
    #[allow(clippy::result_large_err)]
    pub fn emit<W: Write>(&self, code: &str, env: &Env, sink: &mut W) -> Result<(), Error> {
        let block = self.linearize(code, env)?;
        flatten_write(&block, sink).map_err(|e| Error::from_error(strip_whitespace(code), InnerError::Io(e)))
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::error::ParseError;
    use crate::eval::error::EvalError;
    use crate::linear::error::LinearizeError;
    use rstest::{fixture, rstest};

    #[fixture]
    fn env() -> Env {
        Env::new()
            .with_sequence("a", [0, 5, 10, 15, 20, 25])
            .with_scalar("i", 1)
    }

    #[test]
    fn test_engine_default() {
        let engine = Engine::default();
        assert_eq!(engine.options(), &Options::default());
    }

    #[test]
    fn test_set_max_depth() {
        let mut engine = Engine::default();
        engine.set_max_depth(4);
        assert_eq!(engine.options().max_depth, 4);
        assert!(matches!(
            engine.parse("1+2+3+4+5+6").map_err(|e| e.cause),
            Err(InnerError::Parse(ParseError::RecursionLimit(4)))
        ));
    }

    #[rstest]
    #[case("5 * 2 + 3", 13.0)]
    #[case("a[i] * 2 + 1", 11.0)]
    #[case("2 * (1 + 2) + 4", 14.0)]
    fn test_eval(env: Env, #[case] code: &str, #[case] expected: f64) {
        assert_eq!(Engine::default().eval(code, &env).unwrap(), Number::from(expected));
    }

    #[rstest]
    fn test_eval_error_points_at_source(env: Env) {
        let err = Engine::default().eval("1 + (2", &env).unwrap_err();
        assert!(matches!(
            err.cause,
            InnerError::Parse(ParseError::UnmatchedBracket { open: '(', offset: 2 })
        ));
        assert_eq!(err.source_code, "1+(2");
        assert_eq!(err.location.offset(), 2);
    }

    #[rstest]
    fn test_eval_unbound(env: Env) {
        let err = Engine::default().eval("k + 1", &env).unwrap_err();
        assert!(matches!(err.cause, InnerError::Eval(EvalError::NotDefined(ref name)) if name == "k"));
    }

    #[rstest]
    fn test_linearize(env: Env) {
        let block = Engine::default().linearize("a[i] + 2", &env).unwrap();
        assert_eq!(
            block.lines(),
            vec!["z = 2", "yy = 1", "a = [0, 5, 10, 15, 20, 25]", "y = a[yy]", "x = y + z"]
        );
    }

    #[rstest]
    fn test_linearize_unbound_array(env: Env) {
        let err = Engine::default().linearize("b[0]", &env).unwrap_err();
        assert!(matches!(err.cause, InnerError::Linearize(LinearizeError::NotDefined(ref name)) if name == "b"));
    }

    #[rstest]
    fn test_emit(env: Env) {
        let mut out = Vec::new();
        Engine::default().emit("2 + 3", &env, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "z = 3\ny = 2\nx = y + z\n");
    }

    #[test]
    fn test_version() {
        let version = Engine::version();
        assert!(!version.is_empty());
    }
}
