use hashsmith_core::{
    Alteration, COMMON_BIRTH_YEARS, CustomTransform, DEFAULT_DATE_FORMATS, DateFormat,
    DatePattern, GenerationError, Literal, Pattern, SUPPORTED_YEARS,
};
use tracing::debug;

use crate::model::{
    AlterStage, DateSpec, FunctionSpec, LiteralSpec, PatternPlan, PatternSpec, YearRange,
};

/// Build the pattern tree described by a plan.
pub fn build_plan(plan: &PatternPlan) -> Result<Pattern, GenerationError> {
    let pattern = build_pattern(&plan.pattern)?;
    debug!(
        plan = plan.name.as_deref().unwrap_or(""),
        root = pattern.kind(),
        estimate = %pattern.estimate_count(),
        "plan built"
    );
    Ok(pattern)
}

/// Build one node, recursing into composite parts.
///
/// Literal `alter` stages are realized here, so building can be as costly as
/// enumerating those literals.
pub fn build_pattern(spec: &PatternSpec) -> Result<Pattern, GenerationError> {
    let (pattern, name) = match spec {
        PatternSpec::Literal(spec) => (Pattern::Literal(build_literal(spec)), &spec.name),
        PatternSpec::Date(spec) => (Pattern::Date(build_date(spec)), &spec.name),
        PatternSpec::Sequential(spec) => (
            Pattern::sequential(build_children(&spec.parts)?)?,
            &spec.name,
        ),
        PatternSpec::Alternative(spec) => (
            Pattern::alternative(build_children(&spec.options)?)?,
            &spec.name,
        ),
        PatternSpec::Repeat(spec) => (
            Pattern::repeat(build_pattern(&spec.pattern)?, spec.count)?,
            &spec.name,
        ),
        PatternSpec::Interleave(spec) => (
            Pattern::interleave(spec.separator.clone(), build_children(&spec.parts)?)?,
            &spec.name,
        ),
    };

    Ok(match name {
        Some(name) => pattern.named(name.clone()),
        None => pattern,
    })
}

fn build_children(specs: &[PatternSpec]) -> Result<Vec<Pattern>, GenerationError> {
    specs.iter().map(build_pattern).collect()
}

fn build_literal(spec: &LiteralSpec) -> Literal {
    let mut literal = Literal::from_parts(
        spec.items.clone(),
        spec.transforms.clone(),
        spec.functions.iter().map(FunctionSpec::to_custom).collect(),
    );
    for stage in &spec.alter {
        literal = literal.with_transforms(stage_alterations(stage));
    }
    literal
}

fn stage_alterations(stage: &AlterStage) -> Vec<Alteration> {
    stage
        .transforms
        .iter()
        .copied()
        .map(Alteration::Named)
        .chain(
            stage
                .functions
                .iter()
                .map(|function| Alteration::Custom(function.to_custom())),
        )
        .collect()
}

fn build_date(spec: &DateSpec) -> DatePattern {
    let years: Vec<i32> = match (&spec.years, spec.year_range) {
        (Some(years), _) => years.clone(),
        // Years outside the supported span render nothing, so the range is
        // clipped before it is expanded.
        (None, Some(YearRange { start, end })) => {
            (start.max(*SUPPORTED_YEARS.start())..=end.min(*SUPPORTED_YEARS.end())).collect()
        }
        (None, None) => COMMON_BIRTH_YEARS.collect(),
    };
    let formats: Vec<DateFormat> = match &spec.formats {
        Some(names) => names.iter().map(|name| DateFormat::from_name(name)).collect(),
        None => DEFAULT_DATE_FORMATS.to_vec(),
    };
    DatePattern::new(years, formats)
}

impl FunctionSpec {
    /// Closure performing this function on a candidate.
    pub fn to_custom(&self) -> CustomTransform {
        match self.clone() {
            FunctionSpec::Append { value } => {
                CustomTransform::new(move |text| format!("{text}{value}"))
            }
            FunctionSpec::Prepend { value } => {
                CustomTransform::new(move |text| format!("{value}{text}"))
            }
            FunctionSpec::Replace { from, to } => CustomTransform::new(move |text| {
                if from.is_empty() {
                    text.to_string()
                } else {
                    text.replace(&from, &to)
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RepeatSpec, SequentialSpec};
    use hashsmith_core::Transform;

    fn literal(items: &[&str]) -> LiteralSpec {
        LiteralSpec {
            name: None,
            items: items.iter().map(|item| item.to_string()).collect(),
            transforms: Vec::new(),
            functions: Vec::new(),
            alter: Vec::new(),
        }
    }

    fn collect(pattern: &Pattern) -> Vec<String> {
        pattern.raw_sequence().collect()
    }

    #[test]
    fn functions_follow_named_transforms() {
        let mut spec = literal(&["pass"]);
        spec.transforms = vec![Transform::Upper];
        spec.functions = vec![
            FunctionSpec::Append {
                value: "!".to_string(),
            },
            FunctionSpec::Replace {
                from: "ss".to_string(),
                to: "$$".to_string(),
            },
        ];
        let pattern = build_pattern(&PatternSpec::Literal(spec)).expect("build literal");
        assert_eq!(collect(&pattern), ["pass", "PASS", "pass!", "pa$$"]);
    }

    #[test]
    fn alter_stages_realize_in_order() {
        let mut spec = literal(&["hello"]);
        spec.alter = vec![
            AlterStage {
                transforms: vec![Transform::Upper],
                functions: Vec::new(),
            },
            AlterStage {
                transforms: Vec::new(),
                functions: vec![FunctionSpec::Prepend {
                    value: "_".to_string(),
                }],
            },
        ];
        let pattern = build_pattern(&PatternSpec::Literal(spec)).expect("build literal");
        assert_eq!(collect(&pattern), ["hello", "_hello", "HELLO", "_HELLO"]);
        assert_eq!(pattern.estimate_count(), 4);
    }

    #[test]
    fn date_defaults_cover_common_years() {
        let pattern = build_pattern(&PatternSpec::Date(DateSpec::default())).expect("build date");
        assert_eq!(pattern.estimate_count(), 25 * 366 * 4);

        let ranged = build_pattern(&PatternSpec::Date(DateSpec {
            year_range: Some(YearRange {
                start: 1999,
                end: 2000,
            }),
            formats: Some(vec!["YYYY".to_string()]),
            ..DateSpec::default()
        }))
        .expect("build date");
        let out = collect(&ranged);
        assert_eq!(out.first().map(String::as_str), Some("19990101"));
        assert_eq!(out.len(), 365 + 366);
    }

    #[test]
    fn year_range_is_clipped_to_supported_years() {
        let pattern = build_pattern(&PatternSpec::Date(DateSpec {
            year_range: Some(YearRange {
                start: i32::MIN,
                end: i32::MAX,
            }),
            formats: Some(vec!["MMDD".to_string()]),
            ..DateSpec::default()
        }))
        .expect("build date");
        assert_eq!(pattern.estimate_count(), 9999 * 366);
        assert_eq!(pattern.raw_sequence().next().as_deref(), Some("0101"));
    }

    #[test]
    fn names_are_carried_onto_nodes() {
        let spec = PatternSpec::Sequential(SequentialSpec {
            name: Some("outer".to_string()),
            parts: vec![PatternSpec::Repeat(RepeatSpec {
                name: None,
                pattern: Box::new(PatternSpec::Literal(literal(&["a", "b"]))),
                count: 2,
            })],
        });
        let pattern = build_pattern(&spec).expect("build sequential");
        assert_eq!(pattern.name(), Some("outer"));
        assert_eq!(collect(&pattern), ["aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn malformed_composites_fail_to_build() {
        let spec = PatternSpec::Sequential(SequentialSpec {
            name: None,
            parts: Vec::new(),
        });
        assert!(matches!(
            build_pattern(&spec),
            Err(GenerationError::InvalidPattern(_))
        ));
    }
}
