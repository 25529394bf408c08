//! Pattern node tree.
//!
//! [`Pattern`] is a closed set of node kinds. Leaves ([`Literal`],
//! [`DatePattern`]) produce strings directly; composites own their children
//! exclusively and combine the children's sequences. Nodes are immutable once
//! built: fluent operations return new nodes.

mod composite;
mod date;
mod literal;

use std::ops::{BitAnd, BitOr};

pub use composite::{Alternative, Interleave, Repeat, Sequential};
pub use date::{
    COMMON_BIRTH_YEARS, DEFAULT_DATE_FORMATS, DateFormat, DatePattern, SUPPORTED_YEARS,
};
pub use literal::Literal;

use crate::errors::Result;
use crate::generate::Candidates;

/// One node of a candidate composition tree.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(Literal),
    Date(DatePattern),
    Sequential(Sequential),
    Alternative(Alternative),
    Repeat(Repeat),
    Interleave(Interleave),
}

impl Pattern {
    pub fn literal<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Pattern::Literal(Literal::new(items))
    }

    pub fn dates<Y, F>(years: Y, formats: F) -> Self
    where
        Y: IntoIterator<Item = i32>,
        F: IntoIterator<Item = DateFormat>,
    {
        Pattern::Date(DatePattern::new(years, formats))
    }

    /// Dates over [`COMMON_BIRTH_YEARS`] in every [`DEFAULT_DATE_FORMATS`] entry.
    pub fn common_dates() -> Self {
        Pattern::Date(DatePattern::common())
    }

    pub fn sequential(children: Vec<Pattern>) -> Result<Self> {
        Sequential::new(children).map(Pattern::Sequential)
    }

    pub fn alternative(children: Vec<Pattern>) -> Result<Self> {
        Alternative::new(children).map(Pattern::Alternative)
    }

    pub fn repeat(child: Pattern, count: u32) -> Result<Self> {
        Repeat::new(child, count).map(Pattern::Repeat)
    }

    pub fn interleave(separator: impl Into<String>, children: Vec<Pattern>) -> Result<Self> {
        Interleave::new(separator, children).map(Pattern::Interleave)
    }

    /// Unfiltered candidate sequence in deterministic order.
    pub fn raw_sequence(&self) -> Candidates<'_> {
        match self {
            Pattern::Literal(node) => node.raw_sequence(),
            Pattern::Date(node) => node.raw_sequence(),
            Pattern::Sequential(node) => node.raw_sequence(),
            Pattern::Alternative(node) => node.raw_sequence(),
            Pattern::Repeat(node) => node.raw_sequence(),
            Pattern::Interleave(node) => node.raw_sequence(),
        }
    }

    /// Structural upper bound on the number of raw candidates.
    ///
    /// Computed without generating anything; saturates at `u128::MAX`.
    pub fn estimate_count(&self) -> u128 {
        match self {
            Pattern::Literal(node) => node.estimate_count(),
            Pattern::Date(node) => node.estimate_count(),
            Pattern::Sequential(node) => node.estimate_count(),
            Pattern::Alternative(node) => node.estimate_count(),
            Pattern::Repeat(node) => node.estimate_count(),
            Pattern::Interleave(node) => node.estimate_count(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Pattern::Literal(_) => "literal",
            Pattern::Date(_) => "date",
            Pattern::Sequential(_) => "sequential",
            Pattern::Alternative(_) => "alternative",
            Pattern::Repeat(_) => "repeat",
            Pattern::Interleave(_) => "interleave",
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Pattern::Literal(node) => node.name(),
            Pattern::Date(node) => node.name(),
            Pattern::Sequential(node) => node.name(),
            Pattern::Alternative(node) => node.name(),
            Pattern::Repeat(node) => node.name(),
            Pattern::Interleave(node) => node.name(),
        }
    }

    /// Attach a cosmetic name. Generation is unaffected.
    pub fn named(self, name: impl Into<String>) -> Self {
        match self {
            Pattern::Literal(node) => Pattern::Literal(node.named(name)),
            Pattern::Date(node) => Pattern::Date(node.named(name)),
            Pattern::Sequential(node) => Pattern::Sequential(node.named(name)),
            Pattern::Alternative(node) => Pattern::Alternative(node.named(name)),
            Pattern::Repeat(node) => Pattern::Repeat(node.named(name)),
            Pattern::Interleave(node) => Pattern::Interleave(node.named(name)),
        }
    }
}

impl From<Literal> for Pattern {
    fn from(value: Literal) -> Self {
        Pattern::Literal(value)
    }
}

impl From<DatePattern> for Pattern {
    fn from(value: DatePattern) -> Self {
        Pattern::Date(value)
    }
}

impl From<Sequential> for Pattern {
    fn from(value: Sequential) -> Self {
        Pattern::Sequential(value)
    }
}

impl From<Alternative> for Pattern {
    fn from(value: Alternative) -> Self {
        Pattern::Alternative(value)
    }
}

impl From<Repeat> for Pattern {
    fn from(value: Repeat) -> Self {
        Pattern::Repeat(value)
    }
}

impl From<Interleave> for Pattern {
    fn from(value: Interleave) -> Self {
        Pattern::Interleave(value)
    }
}

/// `a & b` is a two-child [`Sequential`].
impl BitAnd for Pattern {
    type Output = Pattern;

    fn bitand(self, rhs: Pattern) -> Pattern {
        Pattern::Sequential(Sequential::pair(self, rhs))
    }
}

/// `a | b` is a two-child [`Alternative`].
impl BitOr for Pattern {
    type Output = Pattern;

    fn bitor(self, rhs: Pattern) -> Pattern {
        Pattern::Alternative(Alternative::pair(self, rhs))
    }
}
