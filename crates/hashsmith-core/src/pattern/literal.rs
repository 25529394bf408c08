use tracing::debug;

use crate::generate::Candidates;
use crate::transform::{Alteration, CustomTransform, Transform};

/// Ordered base strings plus the transforms applied to each of them.
///
/// Each base item yields itself first, then every named transform result,
/// then every custom function result, skipping values already produced for
/// that same item. Duplicate base items are kept as given.
#[derive(Debug, Clone, Default)]
pub struct Literal {
    items: Vec<String>,
    transforms: Vec<Transform>,
    functions: Vec<CustomTransform>,
    name: Option<String>,
}

impl Literal {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Literal with a transform configuration applied lazily at generation.
    pub fn from_parts(
        items: Vec<String>,
        transforms: Vec<Transform>,
        functions: Vec<CustomTransform>,
    ) -> Self {
        Self {
            items,
            transforms,
            functions,
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

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn functions(&self) -> &[CustomTransform] {
        &self.functions
    }

    /// Realize the current output and layer new alterations on top of it.
    ///
    /// The returned literal's base items are this literal's full output, and
    /// its transform list is exactly `alterations` (named ones first, then
    /// custom ones, each group in the order given). With no alterations the
    /// output sequence is unchanged.
    ///
    /// This enumerates the whole node before returning: every call costs
    /// O(size of the current output) in time and memory, and chained calls
    /// compound. Avoid chaining on literals whose output is already large.
    pub fn with_transforms<I, A>(&self, alterations: I) -> Literal
    where
        I: IntoIterator<Item = A>,
        A: Into<Alteration>,
    {
        let items: Vec<String> = self.raw_sequence().collect();
        let mut transforms = Vec::new();
        let mut functions = Vec::new();
        for alteration in alterations {
            match alteration.into() {
                Alteration::Named(transform) => transforms.push(transform),
                Alteration::Custom(function) => functions.push(function),
            }
        }
        debug!(
            name = self.name.as_deref().unwrap_or(""),
            realized = items.len(),
            transforms = transforms.len(),
            functions = functions.len(),
            "literal realized for alteration"
        );

        Literal {
            items,
            transforms,
            functions,
            name: self.name.clone(),
        }
    }

    /// Append a custom function to the existing configuration.
    ///
    /// Unlike [`Literal::with_transforms`] nothing is realized: earlier
    /// transforms and functions keep applying to the original base items.
    pub fn with_function<F>(mut self, function: F) -> Literal
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.functions.push(CustomTransform::new(function));
        self
    }

    pub fn raw_sequence(&self) -> Candidates<'_> {
        Box::new(self.items.iter().flat_map(move |item| self.expand(item)))
    }

    /// Upper bound; per-item dedup can only lower the real count.
    pub fn estimate_count(&self) -> u128 {
        let per_item = 1 + self.transforms.len() as u128 + self.functions.len() as u128;
        (self.items.len() as u128).saturating_mul(per_item)
    }

    fn expand(&self, item: &str) -> Vec<String> {
        let mut produced = vec![item.to_string()];
        let named = self.transforms.iter().map(|transform| transform.apply(item));
        let custom = self.functions.iter().map(|function| function.apply(item));
        for candidate in named.chain(custom) {
            if !produced.contains(&candidate) {
                produced.push(candidate);
            }
        }
        produced
    }
}
