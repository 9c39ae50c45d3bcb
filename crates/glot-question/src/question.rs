//! Question assembly.
//!
//! Drives signature extraction, assertion scanning, and per-slot
//! consolidation, then publishes the immutable resolved question: the
//! schema (one type per parameter plus the return), the indexed example
//! table, and the annotation flag.

use glot_literal::{NumericWidening, Value};
use glot_schema::Type;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::consolidate::{consolidate, Observation};
use crate::error::ConvertError;
use crate::scan::scan_test_cases;
use crate::signature::extract_signature;

/// A resolved parameter slot.
#[derive(Clone, Debug, Serialize)]
pub struct ParamSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

/// The resolved return slot.
#[derive(Clone, Debug, Serialize)]
pub struct ReturnSchema {
    #[serde(rename = "type")]
    pub ty: Type,
}

/// The published schema: ordered parameter slots plus the return slot,
/// immutable once assembled.
#[derive(Clone, Debug, Serialize)]
pub struct QuestionSchema {
    pub params: Vec<ParamSchema>,
    #[serde(rename = "return")]
    pub ret: ReturnSchema,
}

/// Named inputs of one example, in declared parameter order.
#[derive(Clone, Debug)]
pub struct Inputs(pub Vec<(String, Value)>);

impl Serialize for Inputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One normalized example in the published table.
#[derive(Clone, Debug, Serialize)]
pub struct TestCase {
    pub idx: usize,
    pub inputs: Inputs,
    pub outputs: Value,
}

/// The finished question: schema, example table, and annotation flag.
#[derive(Clone, Debug, Serialize)]
pub struct ParsedQuestion {
    pub qid: String,
    pub schema: QuestionSchema,
    pub test_list: Vec<TestCase>,
    pub entry_fn_name: String,
    pub use_type_annotation: bool,
}

/// Convert one question with the default numeric widening thresholds.
pub fn parse_question(
    qid: &str,
    testing_code: &str,
    solution: &str,
    entry_fn_name: &str,
) -> Result<ParsedQuestion, ConvertError> {
    parse_question_with(
        qid,
        testing_code,
        solution,
        entry_fn_name,
        NumericWidening::default(),
    )
}

/// Convert one question.
///
/// Fails fast: the first unrecoverable error aborts the whole question and
/// nothing partial is published.
pub fn parse_question_with(
    qid: &str,
    testing_code: &str,
    solution: &str,
    entry_fn_name: &str,
    widening: NumericWidening,
) -> Result<ParsedQuestion, ConvertError> {
    let signature = extract_signature(solution, entry_fn_name)?;
    let param_names: Vec<String> = signature.params.iter().map(|p| p.name.clone()).collect();

    let examples = scan_test_cases(testing_code, entry_fn_name, &param_names, widening)?;
    if examples.is_empty() {
        return Err(ConvertError::NoTestCases);
    }

    let mut params = Vec::with_capacity(signature.params.len());
    for (slot_idx, param) in signature.params.iter().enumerate() {
        let observations: Vec<Observation> = examples
            .iter()
            .map(|e| Observation {
                example: e.idx,
                ty: e.inputs[slot_idx].ty.clone(),
            })
            .collect();
        let ty = consolidate(&param.name, param.seed.as_ref(), &observations)?;
        params.push(ParamSchema {
            name: param.name.clone(),
            ty,
        });
    }

    let return_observations: Vec<Observation> = examples
        .iter()
        .map(|e| Observation {
            example: e.idx,
            ty: e.output.ty.clone(),
        })
        .collect();
    let ret = ReturnSchema {
        ty: consolidate("return", signature.return_seed.as_ref(), &return_observations)?,
    };

    let test_list = examples
        .into_iter()
        .map(|example| TestCase {
            idx: example.idx,
            inputs: Inputs(
                param_names
                    .iter()
                    .cloned()
                    .zip(example.inputs.into_iter().map(|p| p.value))
                    .collect(),
            ),
            outputs: example.output.value,
        })
        .collect();

    Ok(ParsedQuestion {
        qid: qid.to_string(),
        schema: QuestionSchema { params, ret },
        test_list,
        entry_fn_name: entry_fn_name.to_string(),
        use_type_annotation: signature.use_type_annotation,
    })
}
