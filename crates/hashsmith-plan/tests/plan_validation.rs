use hashsmith_core::LengthRange;
use hashsmith_plan::{plan_json_schema_value, validate_plan, validate_plan_json};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

fn load_json(path: &Path) -> Value {
    let contents =
        fs::read_to_string(path).unwrap_or_else(|_| panic!("missing json at {}", path.display()));
    serde_json::from_str(&contents).expect("parse json")
}

fn example_plan(file: &str) -> Value {
    load_json(&Path::new(env!("CARGO_MANIFEST_DIR")).join(format!("../../plans/examples/{file}")))
}

fn plan_schema() -> Value {
    plan_json_schema_value().expect("plan schema value")
}

#[test]
fn minimal_plan_validates_against_schema() {
    let plan_json = example_plan("minimal.plan.json");
    let schema = plan_schema();

    let structural = validate_plan_json(&plan_json, &schema).expect("validate plan json schema");
    assert!(structural.errors.is_empty(), "structural errors found");

    let validated = validate_plan(&plan_json, &schema).expect("plan validation should succeed");
    assert!(validated.warnings.is_empty(), "unexpected warnings");
    assert_eq!(validated.estimate, 6);

    let out: Vec<String> = validated.pattern.raw_sequence().collect();
    assert_eq!(out, ["a1", "a22", "a333", "bb1", "bb22", "bb333"]);
}

#[test]
fn wallet_plan_counts() {
    let validated = validate_plan(&example_plan("tp_wallet.plan.json"), &plan_schema())
        .expect("plan validation should succeed");
    assert!(validated.warnings.is_empty(), "unexpected warnings");
    assert_eq!(validated.estimate, 118_908);

    let options = validated.plan.options.clone().unwrap_or_default();
    let range = LengthRange::new(
        options.min_len.unwrap_or(0),
        options.max_len.unwrap_or(usize::MAX),
    );
    assert_eq!(validated.pattern.raw_sequence().count(), 43_920);
    assert_eq!(validated.pattern.generate(range).count(), 43_920);

    let first: Vec<String> = validated.pattern.raw_sequence().take(3).collect();
    assert_eq!(first, ["qunandyun369", "qunandyun369$", "qunandyun369&"]);
}

#[test]
fn mixed_plan_counts() {
    let validated = validate_plan(&example_plan("pin_and_words.plan.json"), &plan_schema())
        .expect("plan validation should succeed");
    assert_eq!(validated.estimate, 1102);

    let out: Vec<String> = validated.pattern.raw_sequence().collect();
    assert_eq!(out.len(), 1102);
    assert_eq!(&out[..5], ["11", "12", "21", "22", "admin.0101"]);
    assert_eq!(out.last().map(String::as_str), Some("admin!.3112"));
}

#[test]
fn missing_pattern_fails_structurally() {
    let plan_json = json!({ "plan_version": "0.1" });
    let report = validate_plan(&plan_json, &plan_schema()).expect_err("missing pattern must fail");
    assert!(
        report.codes().all(|code| code == "schema_violation"),
        "unexpected codes: {:?}",
        report.codes().collect::<Vec<_>>()
    );
    assert!(!report.errors.is_empty());
}

#[test]
fn unknown_transform_fails_structurally() {
    let plan_json = json!({
        "plan_version": "0.1",
        "pattern": { "type": "literal", "items": ["a"], "transforms": ["rot13"] }
    });
    let report = validate_plan(&plan_json, &plan_schema()).expect_err("unknown transform");
    assert!(!report.is_ok());
}

#[test]
fn semantic_errors_are_reported() {
    let plan_json = json!({
        "plan_version": "0.1",
        "pattern": {
            "type": "interleave",
            "separator": "-",
            "parts": [
                { "type": "repeat", "count": 0, "pattern": { "type": "literal", "items": ["x"] } }
            ]
        }
    });
    let report = validate_plan(&plan_json, &plan_schema()).expect_err("repeat count zero");
    let codes: Vec<&str> = report.codes().collect();
    assert_eq!(codes, ["repeat_count_zero"]);
    assert_eq!(report.errors[0].path, "/pattern/parts/0/count");
}

#[test]
fn estimate_limit_is_a_warning() {
    let plan_json = json!({
        "plan_version": "0.1",
        "options": { "max_estimate": 10 },
        "pattern": { "type": "date", "years": [2000], "formats": ["MMDD"] }
    });
    let validated = validate_plan(&plan_json, &plan_schema()).expect("warnings do not fail");
    let codes: Vec<&str> = validated
        .warnings
        .iter()
        .map(|issue| issue.code.as_str())
        .collect();
    assert_eq!(codes, ["estimate_exceeds_limit"]);
    assert_eq!(validated.estimate, 366);
}

#[test]
fn unknown_date_format_warns_and_falls_back() {
    let plan_json = json!({
        "plan_version": "0.1",
        "pattern": { "type": "date", "years": [2001], "formats": ["YYYY"] }
    });
    let validated = validate_plan(&plan_json, &plan_schema()).expect("warnings do not fail");
    assert_eq!(validated.warnings.len(), 1);
    assert_eq!(validated.warnings[0].code, "unknown_date_format");

    let first = validated.pattern.raw_sequence().next();
    assert_eq!(first.as_deref(), Some("20010101"));
}
