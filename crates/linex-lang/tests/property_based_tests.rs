//! Property-based tests for parsing, evaluation and linearization.
use linex_lang::{Env, Expr, Parser, strip_whitespace};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

fn env() -> Env {
    Env::new()
        .with_sequence("a", (0..16).map(|i| i * 5))
        .with_sequence("c", 0..16)
        .with_scalar("i", 1)
        .with_scalar("n", 2)
}

mod strategies {
    use super::*;

    pub fn operator() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just("+"), Just("-"), Just("*"), Just("/"), Just("^")]
    }

    /// Numerals and names that never collide with register names.
    pub fn operand() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u32..100).prop_map(|n| n.to_string()),
            Just("i".to_string()),
            Just("n".to_string()),
        ]
    }

    /// Well-formed expressions with whitespace sprinkled between tokens.
    pub fn expression() -> impl Strategy<Value = String> {
        operand().prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                (inner.clone(), operator(), inner.clone()).prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
                inner.clone().prop_map(|e| format!("a[{}]", e)),
                inner.prop_map(|e| format!("({})", e)),
            ]
        })
    }

    /// Arbitrary strings over the expression alphabet, balanced or not.
    pub fn noise() -> impl Strategy<Value = String> {
        "[0-9a-c+\\-*/^()\\[\\] .]{0,32}"
    }
}

fn is_register(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first @ ('x' | 'y' | 'z')) => chars.all(|c| c == first),
        _ => false,
    }
}

fn registers_read(value: &str) -> Vec<&str> {
    value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| is_register(token))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn parser_never_panics(code in strategies::noise()) {
        let _ = Parser::new(64).parse(&code);
    }

    #[test]
    fn printed_form_matches_stripped_source(code in strategies::noise()) {
        if let Ok(expr) = Parser::new(64).parse(&code) {
            let printed = expr.to_code();
            prop_assert_eq!(&printed, &strip_whitespace(&code));
            prop_assert_eq!(Parser::new(64).parse(&printed), Ok(expr));
        }
    }

    #[test]
    fn generated_expressions_round_trip(code in strategies::expression()) {
        if let Ok(expr) = Parser::new(64).parse(&code) {
            prop_assert_eq!(expr.to_code(), strip_whitespace(&code));
        }
    }

    #[test]
    fn evaluation_is_deterministic(code in strategies::expression()) {
        let env = env();
        if let Ok(expr) = linex_lang::parse(&code) {
            let first = linex_lang::Evaluator::new(&env, 256).eval(&expr);
            let second = linex_lang::Evaluator::new(&env, 256).eval(&expr);
            // NaN results compare unequal, so compare the rendered outcomes.
            prop_assert_eq!(format!("{:?}", first), format!("{:?}", second));
        }
    }

    #[test]
    fn registers_are_defined_before_use(code in strategies::expression()) {
        let env = env();
        let expr: Expr = match linex_lang::parse(&code) {
            Ok(expr) => expr,
            Err(_) => return Ok(()),
        };
        let Ok(block) = linex_lang::Linearizer::new(&env, 256).linearize(&expr) else {
            return Ok(());
        };

        let mut defined = FxHashSet::default();
        let lines = block.lines();
        for line in &lines {
            let (target, value) = line.split_once(" = ").ok_or_else(|| TestCaseError::fail(line.clone()))?;
            for register in registers_read(value) {
                prop_assert!(defined.contains(register), "`{}` read before definition in {:?}", register, lines);
            }
            defined.insert(target.to_string());
        }
        prop_assert_eq!(lines.last().and_then(|l| l.split_once(" = ")).map(|(t, _)| t), Some("x"));
    }
}
