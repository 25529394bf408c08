use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;

/// Lazy sequence of candidate strings produced by a pattern node.
pub type Candidates<'a> = Box<dyn Iterator<Item = String> + 'a>;

/// Inclusive bounds on candidate length, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn at_least(min: usize) -> Self {
        Self {
            min,
            ..Self::default()
        }
    }

    pub fn at_most(max: usize) -> Self {
        Self {
            max,
            ..Self::default()
        }
    }

    /// True when no string can satisfy the bounds.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, candidate: &str) -> bool {
        let len = candidate.chars().count();
        self.min <= len && len <= self.max
    }
}

impl Default for LengthRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: usize::MAX,
        }
    }
}

impl Pattern {
    /// Length-filtered candidates.
    ///
    /// A pass-through predicate over [`Pattern::raw_sequence`]: order is kept
    /// and nothing is buffered beyond what the node itself materializes.
    pub fn generate(&self, range: LengthRange) -> Candidates<'_> {
        Box::new(
            self.raw_sequence()
                .filter(move |candidate| range.contains(candidate)),
        )
    }
}
