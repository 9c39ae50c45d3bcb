//! Generic type algebra for cross-language schema inference.
//!
//! Defines the language-agnostic [`Type`] tree, its canonical DSL string
//! form (`list<integer>`, `map<string;double>`, ...), structural
//! unification with numeric widening, and the per-language renderer table
//! used by code-generation collaborators.

mod error;
mod lang;
mod parse;
mod ty;
mod unify;

pub use error::SchemaError;
pub use lang::{translate, LanguageSet, LanguageSpec};
pub use ty::{Prim, Type};
pub use unify::{generic_eq, promote, unify, UnifyError};
