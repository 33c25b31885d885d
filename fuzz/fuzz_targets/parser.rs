#![no_main]

use arbitrary::Arbitrary;
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Operator {
    Sum,
    Sub,
    Product,
    Div,
    Exponent,
}

#[derive(Debug, Clone, Arbitrary)]
enum Term {
    Number(u8),
    Name(bool),
    Index(Box<Term>),
    Group(Vec<(Operator, Term)>),
    Raw(String),
}

impl Term {
    fn to_code(&self) -> String {
        match self {
            Term::Number(n) => n.to_string(),
            Term::Name(true) => "i".to_string(),
            Term::Name(false) => "a".to_string(),
            Term::Index(inner) => format!("a[{}]", inner.to_code()),
            Term::Group(terms) => format!(
                "({})",
                terms
                    .iter()
                    .map(|(op, term)| {
                        let op = match op {
                            Operator::Sum => "+",
                            Operator::Sub => "-",
                            Operator::Product => "*",
                            Operator::Div => "/",
                            Operator::Exponent => "^",
                        };
                        format!("{}{}", op, term.to_code())
                    })
                    .join("")
            ),
            Term::Raw(code) => code.clone(),
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
struct Context {
    raw_code: Option<String>,
    generated: Option<Term>,
}

fuzz_target!(|context: Context| {
    let code = match (&context.raw_code, &context.generated) {
        (Some(raw), _) => raw.clone(),
        (_, Some(term)) => term.to_code(),
        _ => "".to_string(),
    };

    let env = linex_lang::Env::new().with_sequence("a", [0, 5, 10]).with_scalar("i", 1);
    let engine = linex_lang::Engine::default();

    if let Ok(expr) = engine.parse(&code) {
        assert_eq!(expr.to_code(), linex_lang::strip_whitespace(&code));
        let _ = engine.evaluate(&expr, &env);
    }

    let mut out = Vec::new();
    let _ = engine.emit(&code, &env, &mut out);
});
