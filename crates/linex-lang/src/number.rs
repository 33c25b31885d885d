#[cfg(feature = "ast-json")]
use serde::Serialize;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A floating-point value produced by evaluation and stored in environments.
#[cfg_attr(feature = "ast-json", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, PartialOrd, Copy, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct Number(f64);

impl Number {
    /// Creates a new `Number` from an `f64` value.
    pub const fn new(value: f64) -> Self {
        Number(value)
    }

    /// Returns the underlying `f64` value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Truncates toward zero, returning `None` for values that cannot address
    /// a sequence slot (negative, NaN or infinite).
    pub fn to_index(self) -> Option<usize> {
        if !self.0.is_finite() {
            return None;
        }

        let truncated = self.0.trunc();
        if truncated < 0.0 {
            None
        } else {
            Some(truncated as usize)
        }
    }

    /// Returns `true` if the number has no fractional part.
    pub fn is_int(&self) -> bool {
        self.0.is_finite() && self.0.fract() == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Raises `self` to the power of `exp`.
    pub fn pow(self, exp: Self) -> Self {
        Number(self.0.powf(exp.0))
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number(value as f64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number(value as f64)
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Number(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number(value)
    }
}

impl From<Number> for f64 {
    fn from(value: Number) -> Self {
        value.0
    }
}

impl PartialEq<f64> for Number {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

/// 2^53; integral values below it print without a fractional part.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Prints the shortest text that parses back to the same `f64`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_int() && self.0.abs() < MAX_EXACT_INT {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Number(self.0 + other.0)
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Number(self.0 - other.0)
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Number(self.0 * other.0)
    }
}

impl Div for Number {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        Number(self.0 / other.0)
    }
}
