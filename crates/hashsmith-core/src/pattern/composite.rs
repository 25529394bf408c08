use tracing::debug;

use super::Pattern;
use crate::errors::{GenerationError, Result};
use crate::generate::Candidates;

/// Cartesian concatenation of ordered children.
#[derive(Debug, Clone)]
pub struct Sequential {
    children: Vec<Pattern>,
    name: Option<String>,
}

impl Sequential {
    pub fn new(children: Vec<Pattern>) -> Result<Self> {
        if children.is_empty() {
            return Err(GenerationError::InvalidPattern(
                "sequential pattern requires at least one child".to_string(),
            ));
        }
        Ok(Self {
            children,
            name: None,
        })
    }

    pub(crate) fn pair(left: Pattern, right: Pattern) -> Self {
        Self {
            children: vec![left, right],
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn children(&self) -> &[Pattern] {
        &self.children
    }

    /// Every child is realized on the first pull, before the first
    /// combination is produced.
    pub fn raw_sequence(&self) -> Candidates<'_> {
        deferred(move || {
            let pools = materialize("sequential", &self.children);
            let slots = (0..pools.len()).collect();
            Product::new(pools, slots, String::new())
        })
    }

    pub fn estimate_count(&self) -> u128 {
        product_estimate(&self.children)
    }
}

/// Children's sequences chained in order, without dedup.
#[derive(Debug, Clone)]
pub struct Alternative {
    children: Vec<Pattern>,
    name: Option<String>,
}

impl Alternative {
    pub fn new(children: Vec<Pattern>) -> Result<Self> {
        if children.is_empty() {
            return Err(GenerationError::InvalidPattern(
                "alternative pattern requires at least one child".to_string(),
            ));
        }
        Ok(Self {
            children,
            name: None,
        })
    }

    pub(crate) fn pair(left: Pattern, right: Pattern) -> Self {
        Self {
            children: vec![left, right],
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn children(&self) -> &[Pattern] {
        &self.children
    }

    pub fn raw_sequence(&self) -> Candidates<'_> {
        Box::new(self.children.iter().flat_map(Pattern::raw_sequence))
    }

    pub fn estimate_count(&self) -> u128 {
        self.children
            .iter()
            .map(Pattern::estimate_count)
            .fold(0, u128::saturating_add)
    }
}

/// Self cartesian product of one child, `count` positions wide.
#[derive(Debug, Clone)]
pub struct Repeat {
    child: Box<Pattern>,
    count: u32,
    name: Option<String>,
}

impl Repeat {
    pub fn new(child: Pattern, count: u32) -> Result<Self> {
        if count == 0 {
            return Err(GenerationError::InvalidPattern(
                "repeat count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            child: Box::new(child),
            count,
            name: None,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn child(&self) -> &Pattern {
        &self.child
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// The child is realized once and reused for every position.
    pub fn raw_sequence(&self) -> Candidates<'_> {
        deferred(move || {
            let pools = materialize("repeat", std::slice::from_ref(self.child.as_ref()));
            let slots = vec![0; self.count as usize];
            Product::new(pools, slots, String::new())
        })
    }

    pub fn estimate_count(&self) -> u128 {
        self.child.estimate_count().saturating_pow(self.count)
    }
}

/// Cartesian product of children joined by a separator.
#[derive(Debug, Clone)]
pub struct Interleave {
    separator: String,
    children: Vec<Pattern>,
    name: Option<String>,
}

impl Interleave {
    pub fn new(separator: impl Into<String>, children: Vec<Pattern>) -> Result<Self> {
        if children.is_empty() {
            return Err(GenerationError::InvalidPattern(
                "interleave pattern requires at least one child".to_string(),
            ));
        }
        Ok(Self {
            separator: separator.into(),
            children,
            name: None,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn children(&self) -> &[Pattern] {
        &self.children
    }

    pub fn raw_sequence(&self) -> Candidates<'_> {
        deferred(move || {
            let pools = materialize("interleave", &self.children);
            let slots = (0..pools.len()).collect();
            Product::new(pools, slots, self.separator.clone())
        })
    }

    pub fn estimate_count(&self) -> u128 {
        product_estimate(&self.children)
    }
}

/// Postpone building the product until the consumer first pulls.
fn deferred<'a, F>(build: F) -> Candidates<'a>
where
    F: FnOnce() -> Product + 'a,
{
    Box::new(std::iter::once_with(build).flatten())
}

fn materialize(kind: &str, children: &[Pattern]) -> Vec<Vec<String>> {
    let pools: Vec<Vec<String>> = children
        .iter()
        .map(|child| child.raw_sequence().collect())
        .collect();
    debug!(
        node = kind,
        pools = ?pools.iter().map(Vec::len).collect::<Vec<_>>(),
        "children materialized"
    );
    pools
}

fn product_estimate(children: &[Pattern]) -> u128 {
    children
        .iter()
        .map(Pattern::estimate_count)
        .fold(1, u128::saturating_mul)
}

/// Odometer over materialized pools; the right-most slot turns fastest.
///
/// `slots[i]` names the pool feeding output position `i`, so a repeat can
/// point every position at the same pool without copying it.
struct Product {
    pools: Vec<Vec<String>>,
    slots: Vec<usize>,
    cursor: Vec<usize>,
    separator: String,
    exhausted: bool,
}

impl Product {
    fn new(pools: Vec<Vec<String>>, slots: Vec<usize>, separator: String) -> Self {
        let exhausted = slots.iter().any(|&slot| pools[slot].is_empty());
        let cursor = vec![0; slots.len()];
        Self {
            pools,
            slots,
            cursor,
            separator,
            exhausted,
        }
    }

    fn advance(&mut self) {
        for position in (0..self.cursor.len()).rev() {
            self.cursor[position] += 1;
            if self.cursor[position] < self.pools[self.slots[position]].len() {
                return;
            }
            self.cursor[position] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for Product {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let mut combined = String::new();
        for (position, (&slot, &index)) in self.slots.iter().zip(&self.cursor).enumerate() {
            if position > 0 {
                combined.push_str(&self.separator);
            }
            combined.push_str(&self.pools[slot][index]);
        }
        self.advance();
        Some(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(pattern: &Pattern) -> Vec<String> {
        pattern.raw_sequence().collect()
    }

    #[test]
    fn sequential_varies_rightmost_fastest() {
        let pattern = Pattern::sequential(vec![
            Pattern::literal(["a", "b"]),
            Pattern::literal(["1", "2"]),
            Pattern::literal(["x"]),
        ])
        .expect("sequential");
        assert_eq!(collect(&pattern), ["a1x", "a2x", "b1x", "b2x"]);
        assert_eq!(pattern.estimate_count(), 4);
    }

    #[test]
    fn empty_child_yields_nothing() {
        let pattern = Pattern::sequential(vec![
            Pattern::literal(["a"]),
            Pattern::literal(Vec::<String>::new()),
        ])
        .expect("sequential");
        assert!(collect(&pattern).is_empty());
        assert_eq!(pattern.estimate_count(), 0);
    }

    #[test]
    fn alternative_chains_without_dedup() {
        let pattern = Pattern::alternative(vec![
            Pattern::literal(["a", "b"]),
            Pattern::literal(["b", "c"]),
        ])
        .expect("alternative");
        assert_eq!(collect(&pattern), ["a", "b", "b", "c"]);
        assert_eq!(pattern.estimate_count(), 4);
    }

    #[test]
    fn repeat_draws_with_replacement() {
        let pattern = Pattern::repeat(Pattern::literal(["0", "1"]), 3).expect("repeat");
        assert_eq!(
            collect(&pattern),
            ["000", "001", "010", "011", "100", "101", "110", "111"]
        );
        assert_eq!(pattern.estimate_count(), 8);
    }

    #[test]
    fn interleave_joins_with_separator() {
        let pattern = Pattern::interleave(
            "-",
            vec![Pattern::literal(["a", "b"]), Pattern::literal(["1"]), Pattern::literal(["x"])],
        )
        .expect("interleave");
        assert_eq!(collect(&pattern), ["a-1-x", "b-1-x"]);
        assert_eq!(pattern.estimate_count(), 2);
    }

    #[test]
    fn malformed_composites_are_rejected() {
        assert!(matches!(
            Pattern::sequential(Vec::new()),
            Err(GenerationError::InvalidPattern(_))
        ));
        assert!(matches!(
            Pattern::alternative(Vec::new()),
            Err(GenerationError::InvalidPattern(_))
        ));
        assert!(matches!(
            Pattern::interleave("_", Vec::new()),
            Err(GenerationError::InvalidPattern(_))
        ));
        assert!(matches!(
            Pattern::repeat(Pattern::literal(["a"]), 0),
            Err(GenerationError::InvalidPattern(_))
        ));
    }

    #[test]
    fn children_are_realized_on_first_pull() {
        use crate::pattern::Literal;
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counted = {
            let calls = Arc::clone(&calls);
            Literal::new(["a", "b"]).with_function(move |text| {
                calls.fetch_add(1, Ordering::SeqCst);
                text.to_uppercase()
            })
        };
        let child: Pattern = counted.into();

        let sequential = Pattern::sequential(vec![child.clone(), Pattern::literal(["1"])])
            .expect("sequential");
        let repeat = Pattern::repeat(child.clone(), 2).expect("repeat");
        let interleave =
            Pattern::interleave("-", vec![child, Pattern::literal(["1"])]).expect("interleave");
        let alternative = Pattern::alternative(vec![sequential.clone(), repeat.clone()])
            .expect("alternative");

        for pattern in [&sequential, &repeat, &interleave, &alternative] {
            let mut sequence = pattern.raw_sequence();
            assert_eq!(calls.load(Ordering::SeqCst), 0, "{} did work early", pattern.kind());
            assert!(sequence.next().is_some());
            assert!(calls.load(Ordering::SeqCst) > 0);
            calls.store(0, Ordering::SeqCst);
        }

        drop(sequential.generate(crate::generate::LengthRange::default()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn single_child_product_passes_values_through() {
        let pattern = Pattern::interleave("-", vec![Pattern::literal(["a", "b"])]).expect("interleave");
        assert_eq!(collect(&pattern), ["a", "b"]);
    }
}
