use miette::{Diagnostic, SourceOffset, SourceSpan};

use crate::{ast::error::ParseError, eval::error::EvalError, linear::error::LinearizeError};

#[derive(Debug, thiserror::Error)]
pub enum InnerError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Linearize(#[from] LinearizeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Represents a high-level error with diagnostic information for the user.
#[derive(Debug, thiserror::Error)]
#[error("{cause}")]
pub struct Error {
    /// The underlying cause of the error.
    pub cause: InnerError,
    /// The whitespace-stripped source the error refers to.
    pub source_code: String,
    /// The location in the source code for diagnostics.
    pub location: SourceSpan,
}

impl Error {
    pub fn from_error(source_code: impl Into<String>, cause: InnerError) -> Self {
        let source_code = source_code.into();
        let offset = match &cause {
            InnerError::Parse(err) => err.offset().unwrap_or(0),
            InnerError::Eval(_) | InnerError::Linearize(_) | InnerError::Io(_) => 0,
        };

        let offset = offset.min(source_code.len());
        let length = if offset < source_code.len() { 1 } else { 0 };
        let location = SourceSpan::new(SourceOffset::from(offset), length);

        Self {
            cause,
            source_code,
            location,
        }
    }
}

impl Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let c = match &self.cause {
            InnerError::Parse(ParseError::UnmatchedBracket { .. }) => "ParseError::UnmatchedBracket",
            InnerError::Parse(ParseError::EmptyBrackets { .. }) => "ParseError::EmptyBrackets",
            InnerError::Parse(ParseError::EmptyOperand(_)) => "ParseError::EmptyOperand",
            InnerError::Parse(ParseError::MissingArrayName(_)) => "ParseError::MissingArrayName",
            InnerError::Parse(ParseError::UnexpectedPrefix { .. }) => "ParseError::UnexpectedPrefix",
            InnerError::Parse(ParseError::TrailingCharacters { .. }) => "ParseError::TrailingCharacters",
            InnerError::Parse(ParseError::UnsupportedOperator(_, _)) => "ParseError::UnsupportedOperator",
            InnerError::Parse(ParseError::RecursionLimit(_)) => "ParseError::RecursionLimit",
            InnerError::Eval(EvalError::NotDefined(_)) => "EvalError::NotDefined",
            InnerError::Eval(EvalError::IndexOutOfBounds { .. }) => "EvalError::IndexOutOfBounds",
            InnerError::Eval(EvalError::InvalidIndex { .. }) => "EvalError::InvalidIndex",
            InnerError::Eval(EvalError::NotScalar(_)) => "EvalError::NotScalar",
            InnerError::Eval(EvalError::NotIndexable(_)) => "EvalError::NotIndexable",
            InnerError::Eval(EvalError::RecursionError(_)) => "EvalError::RecursionError",
            InnerError::Linearize(LinearizeError::NotDefined(_)) => "LinearizeError::NotDefined",
            InnerError::Linearize(LinearizeError::NotIndexable(_)) => "LinearizeError::NotIndexable",
            InnerError::Linearize(LinearizeError::RecursionError(_)) => "LinearizeError::RecursionError",
            InnerError::Io(_) => "IOError",
        };

        Some(Box::new(c))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let msg = match &self.cause {
            InnerError::Parse(ParseError::UnmatchedBracket { open, .. }) => {
                Some(format!("Every `{open}` needs a matching closing bracket."))
            }
            InnerError::Parse(ParseError::EmptyBrackets { .. }) => {
                Some("Brackets must contain an expression.".to_string())
            }
            InnerError::Parse(ParseError::EmptyOperand(_)) => {
                Some("Each operator needs an operand on both sides.".to_string())
            }
            InnerError::Parse(ParseError::UnexpectedPrefix { .. }) => {
                Some("Function calls are not supported. Insert an operator before `(`.".to_string())
            }
            InnerError::Parse(ParseError::RecursionLimit(_)) => {
                Some("The expression is nested too deeply. Raise `max_depth` or simplify it.".to_string())
            }
            InnerError::Eval(EvalError::NotDefined(name)) | InnerError::Linearize(LinearizeError::NotDefined(name)) => {
                Some(format!("'{name}' is not defined. Did you forget to bind it in the environment?"))
            }
            InnerError::Eval(EvalError::IndexOutOfBounds { .. }) | InnerError::Eval(EvalError::InvalidIndex { .. }) => {
                Some("Array indices must be non-negative and smaller than the sequence length.".to_string())
            }
            InnerError::Eval(EvalError::RecursionError(_)) | InnerError::Linearize(LinearizeError::RecursionError(_)) => {
                Some("The expression is nested too deeply. Raise `max_depth` or simplify it.".to_string())
            }
            _ => None,
        };

        msg.map(|m| Box::new(m) as Box<dyn std::fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(miette::LabeledSpan::new_with_span(
            Some(format!("{}", self.cause)),
            self.location,
        ))))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source_code)
    }
}
