//! Declarative pattern plans.
//!
//! A `plan.json` describes a pattern tree as data. This crate owns the plan
//! contract (serde + JSON Schema), structural and semantic validation, and
//! the conversion of a validated plan into a [`hashsmith_core::Pattern`].

pub mod build;
pub mod errors;
pub mod model;
pub mod schema;
pub mod validate;

pub use build::{build_pattern, build_plan};
pub use errors::{IssueSeverity, PlanError, Result, ValidationIssue, ValidationReport};
pub use model::{
    AlterStage, AlternativeSpec, DateSpec, FunctionSpec, InterleaveSpec, LiteralSpec,
    PatternPlan, PatternSpec, PlanOptions, RepeatSpec, SequentialSpec, YearRange,
};
pub use schema::{plan_json_schema, plan_json_schema_value};
pub use validate::{ValidatedPlan, validate_plan, validate_plan_json, validate_plan_model};

/// Current contract version for `plan.json` documents.
pub const PLAN_VERSION: &str = "0.1";
