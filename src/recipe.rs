//! Recipe dispatch: type-driven transformation of arbitrary input data.
//!
//! A recipe is a registered pair of (type descriptor, transform). Dispatch
//! repeatedly looks up the current positional data's descriptor and applies
//! the matching transform until no rule matches, bounded by
//! [`MAX_RECIPE_DEPTH`] so misconfigured recipe chains terminate with a
//! diagnosable error instead of recursing forever.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::attr::AttributeTable;
use crate::error::{Error, Result};
use crate::value::Value;

/// Bound on the recipe fixpoint loop.
pub const MAX_RECIPE_DEPTH: usize = 16;

/// Replacement data plus attribute mutations returned by a transform.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeOutput {
    /// The replacement positional data.
    pub data: Value,
    /// Attribute mutations; only keys the user left unset are filled.
    pub attrs: Vec<(String, Value)>,
}

impl RecipeOutput {
    /// Output replacing the data with no attribute mutations.
    #[must_use]
    pub fn new(data: Value) -> Self {
        Self {
            data,
            attrs: Vec::new(),
        }
    }

    /// Add one attribute mutation.
    #[must_use]
    pub fn attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attrs.push((key.to_string(), value.into()));
        self
    }
}

type TransformFn = dyn Fn(Value, &BTreeMap<String, Value>) -> RecipeOutput + Send + Sync;

/// A registered transform rule.
#[derive(Clone)]
pub struct Recipe {
    transform: Arc<TransformFn>,
}

impl Recipe {
    /// Wrap a transform function.
    ///
    /// The transform receives the current positional data and a read-only
    /// view of the attribute map, and returns replacement data plus
    /// attribute mutations.
    #[must_use]
    pub fn new(
        transform: impl Fn(Value, &BTreeMap<String, Value>) -> RecipeOutput + Send + Sync + 'static,
    ) -> Self {
        Self {
            transform: Arc::new(transform),
        }
    }

    fn apply(&self, data: Value, attrs: &BTreeMap<String, Value>) -> RecipeOutput {
        (self.transform)(data, attrs)
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe").finish_non_exhaustive()
    }
}

/// The open registry mapping type descriptors to transform rules.
#[derive(Debug, Clone, Default)]
pub struct RecipeRegistry {
    rules: BTreeMap<String, Recipe>,
}

impl RecipeRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform for a type descriptor.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] when the descriptor already has a
    /// rule; use [`register_override`](Self::register_override) to replace
    /// deliberately.
    pub fn register(&mut self, descriptor: &str, recipe: Recipe) -> Result<()> {
        if self.rules.contains_key(descriptor) {
            return Err(Error::DuplicateRegistration {
                registry: "recipe",
                entry: descriptor.to_string(),
            });
        }
        self.rules.insert(descriptor.to_string(), recipe);
        Ok(())
    }

    /// Register a transform, replacing any existing rule for the descriptor.
    pub fn register_override(&mut self, descriptor: &str, recipe: Recipe) {
        self.rules.insert(descriptor.to_string(), recipe);
    }

    /// Look up the rule for a descriptor.
    #[must_use]
    pub fn get(&self, descriptor: &str) -> Option<&Recipe> {
        self.rules.get(descriptor)
    }

    /// Registered descriptors, in order.
    pub fn descriptors(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Apply registered recipes to `data` until no rule matches.
///
/// Attribute mutations only fill keys not already present in `attrs`, so
/// explicit user values always win. Data whose descriptor has no rule passes
/// through unchanged; that is the normal exit, not an error.
///
/// # Errors
///
/// [`Error::RecipeCycleDetected`] when the fixpoint is not reached within
/// [`MAX_RECIPE_DEPTH`] steps; [`Error::UnknownAttribute`] when a transform
/// emits a mutation for an unregistered key (a recipe configuration error).
pub fn dispatch(
    registry: &RecipeRegistry,
    table: &AttributeTable,
    data: Value,
    attrs: &mut BTreeMap<String, Value>,
) -> Result<Value> {
    let mut data = data;
    let mut depth = 0;
    while let Some(recipe) = registry.get(data.descriptor()) {
        if depth >= MAX_RECIPE_DEPTH {
            return Err(Error::RecipeCycleDetected {
                descriptor: data.descriptor().to_string(),
                max_depth: MAX_RECIPE_DEPTH,
            });
        }
        let output = recipe.apply(data, attrs);
        for (key, value) in output.attrs {
            let canonical = table
                .canonicalize(&key)
                .ok_or(Error::UnknownAttribute { name: key })?
                .to_string();
            attrs.entry(canonical).or_insert(value);
        }
        data = output.data;
        depth += 1;
    }
    Ok(data)
}
