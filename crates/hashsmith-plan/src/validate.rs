use hashsmith_core::{DateFormat, Pattern, SUPPORTED_YEARS};
use jsonschema::JSONSchema;
use serde_json::Value;

use crate::PLAN_VERSION;
use crate::build::build_plan;
use crate::errors::{PlanError, ValidationIssue, ValidationReport};
use crate::model::{DateSpec, FunctionSpec, LiteralSpec, PatternPlan, PatternSpec, PlanOptions};

/// Validated plan with its built pattern and accumulated warnings.
#[derive(Debug, Clone)]
pub struct ValidatedPlan {
    pub plan: PatternPlan,
    pub pattern: Pattern,
    pub estimate: u128,
    pub warnings: Vec<ValidationIssue>,
}

/// Validate a plan JSON document against the plan JSON Schema.
pub fn validate_plan_json(
    plan_json: &Value,
    plan_schema: &Value,
) -> Result<ValidationReport, PlanError> {
    let compiled =
        JSONSchema::compile(plan_schema).map_err(|err| PlanError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(plan_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push(ValidationIssue::error(
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    Ok(report)
}

/// Semantic checks on a parsed plan.
pub fn validate_plan_model(plan: &PatternPlan) -> ValidationReport {
    let mut report = ValidationReport::default();

    if plan.plan_version != PLAN_VERSION {
        report.push(ValidationIssue::error(
            "plan_version_mismatch",
            "/plan_version",
            format!(
                "plan_version '{}' is not supported (expected '{PLAN_VERSION}')",
                plan.plan_version
            ),
            Some("update plan_version after migrating the plan"),
        ));
    }

    if let Some(options) = &plan.options {
        validate_options(options, &mut report);
    }

    validate_spec(&plan.pattern, "/pattern", &mut report);
    report
}

/// Validate the plan end-to-end, returning structured issues on failure.
pub fn validate_plan(
    plan_json: &Value,
    plan_schema: &Value,
) -> Result<ValidatedPlan, ValidationReport> {
    let structural = match validate_plan_json(plan_json, plan_schema) {
        Ok(report) => report,
        Err(err) => {
            let mut report = ValidationReport::default();
            report.push(ValidationIssue::error(
                "schema_validation_error",
                "/",
                err.to_string(),
                None,
            ));
            return Err(report);
        }
    };

    if !structural.is_ok() {
        return Err(structural);
    }

    let plan: PatternPlan = match serde_json::from_value(plan_json.clone()) {
        Ok(plan) => plan,
        Err(err) => {
            let mut report = ValidationReport::default();
            report.push(ValidationIssue::error(
                "invalid_plan_json",
                "/",
                err.to_string(),
                None,
            ));
            return Err(report);
        }
    };

    let mut report = validate_plan_model(&plan);
    if !report.is_ok() {
        return Err(report);
    }

    let pattern = match build_plan(&plan) {
        Ok(pattern) => pattern,
        Err(err) => {
            report.push(ValidationIssue::error(
                "pattern_build_failed",
                "/pattern",
                err.to_string(),
                None,
            ));
            return Err(report);
        }
    };

    let estimate = pattern.estimate_count();
    if let Some(limit) = plan.options.as_ref().and_then(|options| options.max_estimate) {
        if estimate > u128::from(limit) {
            report.push(ValidationIssue::warning(
                "estimate_exceeds_limit",
                "/options/max_estimate",
                format!("pattern may produce up to {estimate} candidates (limit {limit})"),
                Some("narrow the pattern or raise options.max_estimate"),
            ));
        }
    }

    Ok(ValidatedPlan {
        plan,
        pattern,
        estimate,
        warnings: report.warnings,
    })
}

fn validate_options(options: &PlanOptions, report: &mut ValidationReport) {
    if let (Some(min), Some(max)) = (options.min_len, options.max_len) {
        if min > max {
            report.push(ValidationIssue::error(
                "invalid_length_range",
                "/options",
                format!("min_len {min} is greater than max_len {max}"),
                Some("swap the bounds or drop one of them"),
            ));
        }
    }

    if options.max_count == Some(0) {
        report.push(ValidationIssue::warning(
            "max_count_zero",
            "/options/max_count",
            "max_count is 0, nothing will be written",
            None,
        ));
    }
}

fn validate_spec(spec: &PatternSpec, path: &str, report: &mut ValidationReport) {
    match spec {
        PatternSpec::Literal(spec) => validate_literal(spec, path, report),
        PatternSpec::Date(spec) => validate_date(spec, path, report),
        PatternSpec::Sequential(spec) => {
            validate_children(&spec.parts, &format!("{path}/parts"), "sequential", report);
        }
        PatternSpec::Alternative(spec) => {
            validate_children(&spec.options, &format!("{path}/options"), "alternative", report);
        }
        PatternSpec::Interleave(spec) => {
            validate_children(&spec.parts, &format!("{path}/parts"), "interleave", report);
        }
        PatternSpec::Repeat(spec) => {
            if spec.count == 0 {
                report.push(ValidationIssue::error(
                    "repeat_count_zero",
                    format!("{path}/count"),
                    "repeat count must be at least 1",
                    Some("use count >= 1 or drop the repeat node"),
                ));
            }
            validate_spec(&spec.pattern, &format!("{path}/pattern"), report);
        }
    }
}

fn validate_children(
    children: &[PatternSpec],
    path: &str,
    kind: &str,
    report: &mut ValidationReport,
) {
    if children.is_empty() {
        report.push(ValidationIssue::error(
            "children_empty",
            path,
            format!("{kind} pattern requires at least one child"),
            None,
        ));
    }
    for (idx, child) in children.iter().enumerate() {
        validate_spec(child, &format!("{path}/{idx}"), report);
    }
}

fn validate_literal(spec: &LiteralSpec, path: &str, report: &mut ValidationReport) {
    if spec.items.is_empty() {
        report.push(ValidationIssue::warning(
            "literal_empty",
            format!("{path}/items"),
            "literal has no items and produces nothing",
            None,
        ));
    }

    validate_functions(&spec.functions, &format!("{path}/functions"), report);

    for (idx, stage) in spec.alter.iter().enumerate() {
        let stage_path = format!("{path}/alter/{idx}");
        if stage.transforms.is_empty() && stage.functions.is_empty() {
            report.push(ValidationIssue::warning(
                "alter_stage_empty",
                stage_path.as_str(),
                "alter stage has no transforms; it only realizes the literal",
                None,
            ));
        }
        validate_functions(&stage.functions, &format!("{stage_path}/functions"), report);
    }
}

fn validate_functions(functions: &[FunctionSpec], path: &str, report: &mut ValidationReport) {
    for (idx, function) in functions.iter().enumerate() {
        if let FunctionSpec::Replace { from, .. } = function {
            if from.is_empty() {
                report.push(ValidationIssue::warning(
                    "replace_from_empty",
                    format!("{path}/{idx}/from"),
                    "replace with an empty 'from' leaves values unchanged",
                    None,
                ));
            }
        }
    }
}

fn validate_date(spec: &DateSpec, path: &str, report: &mut ValidationReport) {
    if spec.years.is_some() && spec.year_range.is_some() {
        report.push(ValidationIssue::error(
            "years_conflict",
            path,
            "set either years or year_range, not both",
            None,
        ));
    }

    if let Some(range) = spec.year_range {
        if range.start > range.end {
            report.push(ValidationIssue::error(
                "invalid_year_range",
                format!("{path}/year_range"),
                format!("year_range start {} is after end {}", range.start, range.end),
                None,
            ));
        }
    }

    if let Some(years) = &spec.years {
        for (idx, year) in years.iter().enumerate() {
            if !SUPPORTED_YEARS.contains(year) {
                report.push(year_out_of_range(format!("{path}/years/{idx}"), *year));
            }
        }
    }

    if let Some(range) = spec.year_range {
        for (field, year) in [("start", range.start), ("end", range.end)] {
            if !SUPPORTED_YEARS.contains(&year) {
                report.push(year_out_of_range(format!("{path}/year_range/{field}"), year));
            }
        }
    }

    if spec.years.as_ref().is_some_and(Vec::is_empty) {
        report.push(ValidationIssue::warning(
            "date_years_empty",
            format!("{path}/years"),
            "date pattern has no years and produces nothing",
            Some("omit years to use the default birth-year span"),
        ));
    }

    if let Some(formats) = &spec.formats {
        if formats.is_empty() {
            report.push(ValidationIssue::warning(
                "date_formats_empty",
                format!("{path}/formats"),
                "date pattern has no formats and produces nothing",
                Some("omit formats to use every default format"),
            ));
        }
        for (idx, name) in formats.iter().enumerate() {
            if DateFormat::parse(name).is_none() {
                report.push(ValidationIssue::warning(
                    "unknown_date_format",
                    format!("{path}/formats/{idx}"),
                    format!("unknown date format '{name}'"),
                    Some("unknown formats render as YYYYMMDD"),
                ));
            }
        }
    }
}

fn year_out_of_range(path: String, year: i32) -> ValidationIssue {
    ValidationIssue::error(
        "year_out_of_range",
        path,
        format!(
            "year {year} is outside {}..={}",
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        ),
        Some("dates can only be rendered for four-digit calendar years"),
    )
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
