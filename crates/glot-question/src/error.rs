//! Errors terminating the conversion of one question.
//!
//! Every variant is terminal for its question: a degraded or partial schema
//! is never published. Variants carry the slot they concern and, where they
//! exist, the indices of the offending examples.

use std::fmt;

use glot_schema::UnifyError;

/// A failure while converting one question into a resolved schema.
#[derive(Clone, Debug, PartialEq)]
pub enum ConvertError {
    /// Imports in the supporting code, an argument-less entry call, or an
    /// expression form the literal subset cannot express.
    UnsupportedConstruct { reason: String },
    /// Elements of one container observation disagree on their kind.
    InconsistentTypes { slot: String, found: Vec<String> },
    /// Two examples (or an example and an annotation) produced types that do
    /// not unify for the same slot.
    TypeConflict {
        slot: String,
        conflict: UnifyError,
        examples: Vec<usize>,
    },
    /// Every observation for the slot was an empty container.
    NoNonNullType { slot: String },
    /// The solution does not define the entry function.
    EntryFunctionNotFound { name: String },
    /// The entry function signature uses unsupported parameter forms.
    InvalidSignature { reason: String },
    /// No retained example statement in the supporting code.
    NoTestCases,
}

impl ConvertError {
    /// Stable machine-readable name for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::UnsupportedConstruct { .. } => "unsupported_construct",
            ConvertError::InconsistentTypes { .. } => "inconsistent_types",
            ConvertError::TypeConflict { .. } => "type_conflict",
            ConvertError::NoNonNullType { .. } => "no_non_null_type",
            ConvertError::EntryFunctionNotFound { .. } => "entry_function_not_found",
            ConvertError::InvalidSignature { .. } => "invalid_signature",
            ConvertError::NoTestCases => "no_test_cases",
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::UnsupportedConstruct { reason } => write!(f, "{}", reason),
            ConvertError::InconsistentTypes { slot, found } => {
                write!(f, "{}: Expecting one type, got [{}]", slot, found.join(", "))
            }
            ConvertError::TypeConflict {
                slot,
                conflict,
                examples,
            } => {
                write!(f, "{}: {} (examples ", slot, conflict)?;
                for (i, idx) in examples.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", idx)?;
                }
                write!(f, ")")
            }
            ConvertError::NoNonNullType { slot } => {
                write!(f, "{}: No Non-Null types found", slot)
            }
            ConvertError::EntryFunctionNotFound { name } => {
                write!(f, "Unable to find entry function '{}'", name)
            }
            ConvertError::InvalidSignature { reason } => {
                write!(f, "Invalid signature: {}", reason)
            }
            ConvertError::NoTestCases => write!(f, "No test cases were found"),
        }
    }
}

impl std::error::Error for ConvertError {}

#[cfg(test)]
mod tests {
    use super::*;
    use glot_schema::Type;

    #[test]
    fn display_messages() {
        let err = ConvertError::UnsupportedConstruct {
            reason: "Imports are not supported".into(),
        };
        assert_eq!(err.to_string(), "Imports are not supported");

        let err = ConvertError::InconsistentTypes {
            slot: "numbers".into(),
            found: vec!["string".into(), "float".into()],
        };
        assert_eq!(
            err.to_string(),
            "numbers: Expecting one type, got [string, float]"
        );

        let err = ConvertError::TypeConflict {
            slot: "return".into(),
            conflict: UnifyError::KindMismatch {
                left: Type::integer(),
                right: Type::string(),
            },
            examples: vec![0, 2],
        };
        assert_eq!(
            err.to_string(),
            "return: cannot unify `integer` with `string` (examples 0, 2)"
        );
    }

    #[test]
    fn kinds_are_stable() {
        assert_eq!(ConvertError::NoTestCases.kind(), "no_test_cases");
        assert_eq!(
            ConvertError::NoNonNullType { slot: "a".into() }.kind(),
            "no_non_null_type"
        );
    }
}
