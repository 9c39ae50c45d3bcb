//! Error type for DSL parsing and language rendering.

use std::fmt;

/// An error raised while parsing a DSL type string or rendering a type
/// into a target language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A type string has mismatched `<` and `>` characters.
    UnbalancedAngles(String),
    /// A type string mixes the `T[]` array suffix with `<>` generics.
    MixedArraySyntax(String),
    /// A `map<...>` is missing its `;` key/value separator.
    MalformedMap(String),
    /// A primitive or `null` was given children, e.g. `integer<string>`.
    LeafWithChildren(String),
    /// A container word appeared with no element type, e.g. bare `list`.
    BareContainer(String),
    /// A leaf word that is neither a primitive nor `null`.
    UnknownTypeName(String),
    /// Extra characters after the closing `>` of a type string.
    TrailingCharacters(String),
    /// A `null` placeholder reached the renderer; published types must be
    /// fully concrete.
    NullInPublishedType,
    /// The type cannot be expressed in the target language.
    UnsupportedByLanguage { language: String, ty: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::UnbalancedAngles(s) => {
                write!(f, "\"{}\" does not have the same number of < and >", s)
            }
            SchemaError::MixedArraySyntax(s) => {
                write!(f, "\"{}\" has both [] and <>", s)
            }
            SchemaError::MalformedMap(s) => write!(
                f,
                "expected map to be in the form map<KEY;VALUE>, but got \"{}\"",
                s
            ),
            SchemaError::LeafWithChildren(s) => {
                write!(f, "primitive \"{}\" must be a leaf node", s)
            }
            SchemaError::BareContainer(s) => {
                write!(f, "container type \"{}\" must have an element type", s)
            }
            SchemaError::UnknownTypeName(s) => write!(f, "unknown type name \"{}\"", s),
            SchemaError::TrailingCharacters(s) => {
                write!(f, "\"{}\" has extra characters after the last >", s)
            }
            SchemaError::NullInPublishedType => {
                write!(f, "null placeholder in a published type")
            }
            SchemaError::UnsupportedByLanguage { language, ty } => {
                write!(f, "type \"{}\" is not supported by {}", ty, language)
            }
        }
    }
}

impl std::error::Error for SchemaError {}
