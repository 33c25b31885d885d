use std::fmt::{self, Display, Formatter, Write};

use super::node::Expr;

impl Expr {
    /// Converts the expression back to source text.
    ///
    /// Numerals keep the spelling they were parsed from, so for every tree
    /// produced by the parser the output equals the whitespace-stripped input
    /// and parses back to the same tree.
    ///
    /// ```
    /// let expr = linex_lang::parse("a[i] * 2 + 1").unwrap();
    /// assert_eq!(expr.to_code(), "a[i]*2+1");
    /// ```
    pub fn to_code(&self) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = self.format_to_code(&mut output);
        output
    }

    fn format_to_code<W: Write>(&self, buf: &mut W) -> fmt::Result {
        match self {
            Expr::Variable { name, .. } => buf.write_str(name),
            Expr::ArrayAccess { name, index } => {
                buf.write_str(name)?;
                buf.write_char('[')?;
                index.format_to_code(buf)?;
                buf.write_char(']')
            }
            Expr::Paren(inner) => {
                buf.write_char('(')?;
                inner.format_to_code(buf)?;
                buf.write_char(')')
            }
            Expr::Binary { op, left, right } => {
                left.format_to_code(buf)?;
                buf.write_char(op.symbol())?;
                right.format_to_code(buf)
            }
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_to_code(f)
    }
}
