//! Question conversion: from informally-typed example code to a resolved,
//! language-agnostic schema.
//!
//! Given an entry function name, a solution (used only for signature and
//! annotation extraction, never executed), and supporting test code, this
//! crate scans the retained `assert` examples, infers a type per slot from
//! the literal evidence, consolidates the observations across examples,
//! and publishes an immutable [`ParsedQuestion`]. Any unrecoverable
//! disagreement fails the whole question with a typed [`ConvertError`].

mod consolidate;
mod error;
mod question;
mod scan;
mod signature;

pub use consolidate::{consolidate, Observation};
pub use error::ConvertError;
pub use question::{
    parse_question, parse_question_with, Inputs, ParamSchema, ParsedQuestion, QuestionSchema,
    ReturnSchema, TestCase,
};
pub use scan::{scan_test_cases, Example};
pub use signature::{extract_signature, Param, Signature};
