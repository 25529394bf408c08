use hashsmith_core::Transform;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical plan definition for wordlist generation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PatternPlan {
    /// Contract version for the plan format.
    pub plan_version: String,
    /// Cosmetic plan name, recorded in run artifacts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Output defaults; command-line flags take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PlanOptions>,
    /// Root of the pattern tree.
    pub pattern: PatternSpec,
}

/// Plan-level output defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PlanOptions {
    /// Minimum candidate length in characters (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_len: Option<usize>,
    /// Maximum candidate length in characters (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    /// Stop after this many written candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u64>,
    /// Warn when the structural estimate exceeds this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_estimate: Option<u64>,
}

/// Pattern node description.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternSpec {
    /// Base strings with transforms.
    Literal(LiteralSpec),
    /// Calendar dates rendered by template.
    Date(DateSpec),
    /// Cartesian concatenation of parts.
    Sequential(SequentialSpec),
    /// Options chained one after another.
    Alternative(AlternativeSpec),
    /// Self product of one pattern.
    Repeat(RepeatSpec),
    /// Cartesian product joined by a separator.
    Interleave(InterleaveSpec),
}

impl PatternSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            PatternSpec::Literal(_) => "literal",
            PatternSpec::Date(_) => "date",
            PatternSpec::Sequential(_) => "sequential",
            PatternSpec::Alternative(_) => "alternative",
            PatternSpec::Repeat(_) => "repeat",
            PatternSpec::Interleave(_) => "interleave",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LiteralSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub items: Vec<String>,
    /// Named transforms applied lazily to every item.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<Transform>,
    /// Declarative string functions applied after the named transforms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionSpec>,
    /// Realize-then-transform stages, applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alter: Vec<AlterStage>,
}

/// One realization stage: the literal's output becomes the new item list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AlterStage {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<Transform>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionSpec>,
}

/// String functions expressible in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FunctionSpec {
    Append { value: String },
    Prepend { value: String },
    Replace { from: String, to: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Explicit years, in output order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<Vec<i32>>,
    /// Inclusive year span; alternative to `years`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_range: Option<YearRange>,
    /// Template names (MMDD, YYMMDD, YYYYMMDD, DDMM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SequentialSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub parts: Vec<PatternSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AlternativeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub options: Vec<PatternSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RepeatSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub pattern: Box<PatternSpec>,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InterleaveSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub separator: String,
    pub parts: Vec<PatternSpec>,
}
