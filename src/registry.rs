//! The process-wide registry and pipeline entry point.
//!
//! A [`Registry`] owns the attribute table, the declared magic groups, and
//! the recipe registry. Registration takes `&mut self` and therefore happens
//! during an explicit setup phase, serialized by ownership; resolution takes
//! `&self`, so concurrent resolves over a shared registry (e.g. behind an
//! `Arc`) are safe with no locking on the hot path.

use crate::attr::{default_groups, AttrDef, AttributeTable, MagicGroup};
use crate::error::{Error, Result};
use crate::pipeline;
use crate::recipe::{Recipe, RecipeRegistry};
use crate::series::SeriesSpec;
use crate::value::Value;

/// Attribute table, magic groups, and recipes behind one handle.
#[derive(Debug, Clone)]
pub struct Registry {
    table: AttributeTable,
    magic: Vec<MagicGroup>,
    recipes: RecipeRegistry,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Registry {
    /// An empty registry for fully custom setups.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            table: AttributeTable::empty(),
            magic: Vec::new(),
            recipes: RecipeRegistry::new(),
        }
    }

    /// The seeded registry: core attribute table, aliases, and the
    /// `line`/`marker`/`xaxis`/`yaxis` magic groups. Recipes start empty.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            table: AttributeTable::with_defaults(),
            magic: Vec::new(),
            recipes: RecipeRegistry::new(),
        };
        for group in default_groups() {
            registry
                .install_group(group, false)
                .expect("seeded magic groups must be consistent");
        }
        registry
    }

    /// Register a new canonical attribute with its aliases and default.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] on key or alias collision.
    pub fn register_attribute(&mut self, def: AttrDef) -> Result<()> {
        self.table.register(def)
    }

    /// Register an alias for an existing canonical key.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAttribute`] for an unregistered canonical key,
    /// [`Error::DuplicateRegistration`] if the alias is taken.
    pub fn register_alias(&mut self, alias: &str, canonical: &str) -> Result<()> {
        self.table.register_alias(alias, canonical)
    }

    /// Re-point an alias, replacing any previous target.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAttribute`] for an unregistered canonical key,
    /// [`Error::DuplicateRegistration`] if the alias names a canonical key.
    pub fn register_alias_override(&mut self, alias: &str, canonical: &str) -> Result<()> {
        self.table.register_alias_override(alias, canonical)
    }

    /// Declare a new magic group.
    ///
    /// The group name is entered into the attribute table as a composite key
    /// if not already present; every rule target must resolve to a
    /// registered attribute.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] when a group of this name exists,
    /// [`Error::UnknownAttribute`] for an unregistered rule target.
    pub fn register_magic_group(&mut self, group: MagicGroup) -> Result<()> {
        if self.magic.iter().any(|g| g.name() == group.name()) {
            return Err(Error::DuplicateRegistration {
                registry: "magic group",
                entry: group.name().to_string(),
            });
        }
        self.install_group(group, false)
    }

    /// Declare a magic group, replacing an existing group of the same name.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAttribute`] for an unregistered rule target.
    pub fn register_magic_group_override(&mut self, group: MagicGroup) -> Result<()> {
        self.install_group(group, true)
    }

    /// Register a recipe for a type descriptor.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] when the descriptor already has a
    /// rule.
    pub fn register_recipe(&mut self, descriptor: &str, recipe: Recipe) -> Result<()> {
        self.recipes.register(descriptor, recipe)
    }

    /// Register a recipe, replacing any existing rule for the descriptor.
    pub fn register_recipe_override(&mut self, descriptor: &str, recipe: Recipe) {
        self.recipes.register_override(descriptor, recipe);
    }

    /// Resolve one plot command into its ordered series specifications.
    ///
    /// Runs the fixed stage sequence alias resolution → magic expansion →
    /// recipe fixpoint → group split → broadcast. On failure nothing
    /// caller-visible has been mutated.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the taxonomy; registration errors
    /// never surface here.
    pub fn resolve<K, V, I>(&self, data: impl Into<Value>, attrs: I) -> Result<Vec<SeriesSpec>>
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let raw = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        pipeline::run(self, data.into(), raw)
    }

    /// The attribute table.
    #[must_use]
    pub fn table(&self) -> &AttributeTable {
        &self.table
    }

    /// The declared magic groups.
    #[must_use]
    pub fn magic_groups(&self) -> &[MagicGroup] {
        &self.magic
    }

    /// The recipe registry.
    #[must_use]
    pub fn recipes(&self) -> &RecipeRegistry {
        &self.recipes
    }

    fn install_group(&mut self, group: MagicGroup, replace: bool) -> Result<()> {
        for rule in group.rules() {
            if self.table.canonicalize(rule.target()).is_none() {
                return Err(Error::UnknownAttribute {
                    name: rule.target().to_string(),
                });
            }
        }
        if !self.table.is_taken(group.name()) {
            self.table.register(AttrDef::composite(group.name()))?;
        }
        if replace {
            self.magic.retain(|g| g.name() != group.name());
        }
        self.magic.push(group);
        Ok(())
    }
}
