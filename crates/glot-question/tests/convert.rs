//! End-to-end conversion tests: raw solution + test code in, resolved
//! schema and example table out.

use glot_question::{parse_question, ConvertError};
use insta::assert_snapshot;

#[test]
fn annotated_signature_with_empty_literal_evidence() {
    let solution = "def sum_product(numbers: List[int]) -> Tuple[int, int]:\n    return (sum(numbers), 1)\n";
    let testing = "assert sum_product([]) == (0, 1)\n";
    let question = parse_question("q1", testing, solution, "sum_product").unwrap();

    assert_eq!(question.schema.params.len(), 1);
    assert_eq!(question.schema.params[0].name, "numbers");
    assert_eq!(question.schema.params[0].ty.to_string(), "list<integer>");
    assert_eq!(
        question.schema.ret.ty.to_string(),
        "tuple<integer|integer>"
    );
    assert!(question.use_type_annotation);
    assert_eq!(question.test_list.len(), 1);
}

#[test]
fn inconsistent_container_elements_fail() {
    let solution = "def count_integer(values):\n    return 0\n";
    let testing = "assert count_integer([1, 2, 'abc', 1.2]) == 2\n";
    let err = parse_question("q2", testing, solution, "count_integer").unwrap_err();
    match err {
        ConvertError::InconsistentTypes { slot, found } => {
            assert_eq!(slot, "values");
            assert_eq!(found, vec!["string".to_string(), "float".to_string()]);
        }
        other => panic!("expected InconsistentTypes, got {:?}", other),
    }
}

#[test]
fn empty_then_concrete_evidence_resolves() {
    let solution = "def f(xs):\n    return len(xs)\n";
    let testing = "assert f([]) == 0\nassert f([1, 2]) == 2\n";
    let question = parse_question("q3", testing, solution, "f").unwrap();
    assert_eq!(question.schema.params[0].ty.to_string(), "list<integer>");
    assert!(!question.use_type_annotation);
}

#[test]
fn only_empty_evidence_fails() {
    let solution = "def f(xs):\n    return 0\n";
    let testing = "assert f([]) == 0\nassert f([]) == 0\n";
    let err = parse_question("q4", testing, solution, "f").unwrap_err();
    assert!(matches!(err, ConvertError::NoNonNullType { slot } if slot == "xs"));
}

#[test]
fn numeric_evidence_widens_across_examples() {
    let solution = "def f(x):\n    return x\n";
    let testing = "assert f(1.5) == 1.5\nassert f(2) == 2\n";
    let question = parse_question("q5", testing, solution, "f").unwrap();
    assert_eq!(question.schema.params[0].ty.to_string(), "float");
}

#[test]
fn depth_disagreement_fails() {
    let solution = "def f(x):\n    return x\n";
    let testing = "assert f([[1]]) == 1\nassert f([[[2]]]) == 1\n";
    let err = parse_question("q6", testing, solution, "f").unwrap_err();
    match err {
        ConvertError::TypeConflict { slot, examples, .. } => {
            assert_eq!(slot, "x");
            assert_eq!(examples, vec![0, 1]);
        }
        other => panic!("expected TypeConflict, got {:?}", other),
    }
}

#[test]
fn duplicate_parameter_names_are_disambiguated() {
    let solution = "def f(a, A):\n    return a\n";
    let testing = "assert f(1, 2) == 3\n";
    let question = parse_question("q7", testing, solution, "f").unwrap();
    let names: Vec<&str> = question
        .schema
        .params
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "A1"]);
    // The example table uses the disambiguated names.
    assert_eq!(question.test_list[0].inputs.0[1].0, "A1");
}

#[test]
fn imports_fail_the_whole_question() {
    let solution = "def f(x):\n    return x\n";
    let testing = "import math\nassert f(1) == 1\n";
    let err = parse_question("q8", testing, solution, "f").unwrap_err();
    assert_eq!(err.to_string(), "Imports are not supported");
}

#[test]
fn no_retained_examples_fails() {
    let solution = "def f(x):\n    return x\n";
    let testing = "print(f(1))\nresult = f(2)\n";
    let err = parse_question("q9", testing, solution, "f").unwrap_err();
    assert!(matches!(err, ConvertError::NoTestCases));
}

#[test]
fn skipped_statements_do_not_shift_example_indices() {
    let solution = "def f(x):\n    return x\n";
    let testing = "helper = 1\nassert f(1) == 1\nprint('checking')\nassert f(2) == 2\n";
    let question = parse_question("q10", testing, solution, "f").unwrap();
    let indices: Vec<usize> = question.test_list.iter().map(|t| t.idx).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn published_question_serializes_to_the_wire_shape() {
    let solution = "def f(counts):\n    return True\n";
    let testing = "assert f({'a': 1})\nassert not f({'b': 2})\n";
    let question = parse_question("q11", testing, solution, "f").unwrap();
    let json = serde_json::to_value(&question).unwrap();

    assert_eq!(json["schema"]["params"][0]["type"], "map<string;integer>");
    assert_eq!(json["schema"]["return"]["type"], "boolean");
    assert_eq!(json["test_list"][0]["inputs"]["counts"]["a"], 1);
    assert_eq!(json["test_list"][0]["outputs"], true);
    assert_eq!(json["test_list"][1]["outputs"], false);
    assert_eq!(json["use_type_annotation"], false);
    assert_eq!(json["entry_fn_name"], "f");
}

#[test]
fn published_json_is_stable() {
    let solution = "def pair(a, b):\n    return (a, b)\n";
    let testing = "assert pair(1, 'x') == (1, 'x')\n";
    let question = parse_question("q", testing, solution, "pair").unwrap();
    assert_snapshot!(
        serde_json::to_string(&question).unwrap(),
        @r#"{"qid":"q","schema":{"params":[{"name":"a","type":"integer"},{"name":"b","type":"string"}],"return":{"type":"tuple<integer|string>"}},"test_list":[{"idx":0,"inputs":{"a":1,"b":"x"},"outputs":[1,"x"]}],"entry_fn_name":"pair","use_type_annotation":false}"#
    );
}

#[test]
fn annotation_conflicting_with_evidence_fails() {
    let solution = "def f(x: int):\n    return x\n";
    let testing = "assert f('a') == 'a'\n";
    let err = parse_question("q12", testing, solution, "f").unwrap_err();
    assert!(matches!(err, ConvertError::TypeConflict { slot, .. } if slot == "x"));
}

#[test]
fn widening_thresholds_apply_end_to_end() {
    let solution = "def f(x):\n    return x\n";
    let testing = "assert f(1000000000) == 1000000000\n";
    let question = parse_question("q13", testing, solution, "f").unwrap();
    assert_eq!(question.schema.params[0].ty.to_string(), "long");

    let testing = "assert f(0.1234567) == 0.0\n";
    let question = parse_question("q14", testing, solution, "f").unwrap();
    assert_eq!(question.schema.params[0].ty.to_string(), "double");
    // The return slot folds its own evidence: a plain 0.0 stays float.
    assert_eq!(question.schema.ret.ty.to_string(), "float");
}
