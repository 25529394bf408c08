use schemars::schema::RootSchema;
use schemars::schema_for;
use serde_json::Value;

use crate::errors::Result;
use crate::model::PatternPlan;

/// Emit the JSON Schema for `plan.json`.
pub fn plan_json_schema() -> RootSchema {
    schema_for!(PatternPlan)
}

/// The plan JSON Schema as a JSON value, ready for validation.
pub fn plan_json_schema_value() -> Result<Value> {
    Ok(serde_json::to_value(plan_json_schema())?)
}
