//! Errors raised while parsing a literal expression.

use std::fmt;

/// An error for a literal that is not parsable.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralError {
    /// The expression uses a form outside the literal subset (a call, a
    /// name reference, a comprehension, an unsupported operator, ...).
    Unsupported(String),
    /// The elements of one container observation disagree on their kind,
    /// beyond what numeric widening can absorb.
    InconsistentTypes(Vec<String>),
    /// A map key folded to a kind other than `integer` or `string`.
    BadMapKey(String),
    /// A numeric literal that does not fit the supported range.
    InvalidNumber(String),
    /// A string literal was never closed.
    UnterminatedString,
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralError::Unsupported(what) => write!(f, "{} is not supported", what),
            LiteralError::InconsistentTypes(found) => {
                write!(f, "Expecting one type, got [{}]", found.join(", "))
            }
            LiteralError::BadMapKey(kind) => {
                write!(f, "Dictionary keys cannot be of type {}", kind)
            }
            LiteralError::InvalidNumber(text) => write!(f, "invalid number literal: {}", text),
            LiteralError::UnterminatedString => write!(f, "unterminated string literal"),
        }
    }
}

impl std::error::Error for LiteralError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            LiteralError::Unsupported("ListComp".into()).to_string(),
            "ListComp is not supported"
        );
        assert_eq!(
            LiteralError::InconsistentTypes(vec!["integer".into(), "string".into()]).to_string(),
            "Expecting one type, got [integer, string]"
        );
        assert_eq!(
            LiteralError::BadMapKey("double".into()).to_string(),
            "Dictionary keys cannot be of type double"
        );
    }
}
