use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fmt::{self, Display, Formatter};

use crate::{IdentName, number::Number};

/// A value bound to a name in an [`Env`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Binding {
    Scalar(Number),
    Sequence(Vec<Number>),
}

impl Display for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Scalar(n) => write!(f, "{}", n),
            Binding::Sequence(values) => write!(f, "[{}]", values.iter().join(", ")),
        }
    }
}

impl From<Number> for Binding {
    fn from(value: Number) -> Self {
        Binding::Scalar(value)
    }
}

impl From<Vec<Number>> for Binding {
    fn from(values: Vec<Number>) -> Self {
        Binding::Sequence(values)
    }
}

/// Caller-owned mapping from names to scalars or zero-indexed sequences.
///
/// The parser never looks at it; the evaluator and linearizer only read it,
/// so one environment can be shared by any number of evaluations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Env {
    context: FxHashMap<IdentName, Binding>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an environment from a JSON object whose values are numbers or
    /// arrays of numbers, e.g. `{"i": 1, "a": [0, 5, 10]}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn define(&mut self, name: &str, binding: Binding) {
        self.context.insert(IdentName::new(name), binding);
    }

    pub fn define_scalar(&mut self, name: &str, value: impl Into<Number>) {
        self.define(name, Binding::Scalar(value.into()));
    }

    pub fn define_sequence<I, N>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<Number>,
    {
        self.define(name, Binding::Sequence(values.into_iter().map(Into::into).collect()));
    }

    pub fn with_scalar(mut self, name: &str, value: impl Into<Number>) -> Self {
        self.define_scalar(name, value);
        self
    }

    pub fn with_sequence<I, N>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Number>,
    {
        self.define_sequence(name, values);
        self
    }

    #[inline(always)]
    pub fn resolve(&self, name: &str) -> Option<&Binding> {
        self.context.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.context.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.context.len()
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
    }
}

impl<K: AsRef<str>> FromIterator<(K, Binding)> for Env {
    fn from_iter<T: IntoIterator<Item = (K, Binding)>>(iter: T) -> Self {
        Self {
            context: iter
                .into_iter()
                .map(|(name, binding)| (IdentName::new(name.as_ref()), binding))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn env() -> Env {
        Env::new()
            .with_sequence("a", [0, 5, 10])
            .with_scalar("i", 1)
    }

    #[rstest]
    fn test_resolve(env: Env) {
        assert_eq!(env.resolve("i"), Some(&Binding::Scalar(1.into())));
        assert_eq!(
            env.resolve("a"),
            Some(&Binding::Sequence(vec![0.into(), 5.into(), 10.into()]))
        );
        assert_eq!(env.resolve("missing"), None);
        assert!(env.contains("a"));
        assert_eq!(env.len(), 2);
    }

    #[rstest]
    fn test_define_overwrites(mut env: Env) {
        env.define_scalar("a", 2.5);
        assert_eq!(env.resolve("a"), Some(&Binding::Scalar(2.5.into())));
    }

    #[rstest]
    #[case::scalar(Binding::Scalar(3.into()), "3")]
    #[case::fractional(Binding::Scalar(0.25.into()), "0.25")]
    #[case::sequence(Binding::Sequence(vec![0.into(), 5.into(), 1.5.into()]), "[0, 5, 1.5]")]
    #[case::empty_sequence(Binding::Sequence(vec![]), "[]")]
    fn test_binding_display(#[case] binding: Binding, #[case] expected: &str) {
        assert_eq!(binding.to_string(), expected);
    }

    #[rstest]
    fn test_from_json(env: Env) {
        assert_eq!(Env::from_json(r#"{"a": [0, 5, 10], "i": 1}"#).unwrap(), env);
    }

    #[test]
    fn test_from_json_rejects_non_numeric() {
        assert!(Env::from_json(r#"{"a": "text"}"#).is_err());
        assert!(Env::from_json(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn test_from_iterator() {
        let env: Env = vec![("x", Binding::Scalar(2.into()))].into_iter().collect();
        assert_eq!(env.resolve("x"), Some(&Binding::Scalar(2.into())));
        assert!(!env.is_empty());
    }
}
