//! The canonical attribute table.
//!
//! Maps canonical attribute keys to their metadata: aliases, default value,
//! and boolean-convenience tags. Immutable after registration; the pipeline
//! only ever reads it.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::value::Value;

/// Metadata for one canonical attribute key.
#[derive(Debug, Clone)]
pub struct AttrDef {
    key: String,
    aliases: Vec<String>,
    default: Option<Value>,
    bool_tags: Option<(Value, Value)>,
}

impl AttrDef {
    /// A plain attribute with a declared default value.
    #[must_use]
    pub fn new(key: &str, default: impl Into<Value>) -> Self {
        Self {
            key: key.to_string(),
            aliases: Vec::new(),
            default: Some(default.into()),
            bool_tags: None,
        }
    }

    /// A composite key: a magic-group name or other pipeline-consumed entry.
    ///
    /// Composite keys carry no default and never appear in resolved output.
    #[must_use]
    pub fn composite(key: &str) -> Self {
        Self {
            key: key.to_string(),
            aliases: Vec::new(),
            default: None,
            bool_tags: None,
        }
    }

    /// Add one alias.
    #[must_use]
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Add several aliases.
    #[must_use]
    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(ToString::to_string));
        self
    }

    /// Declare boolean-convenience tags: `true` normalizes to `on`,
    /// `false` to `off` during magic expansion.
    #[must_use]
    pub fn bool_tags(mut self, on: Value, off: Value) -> Self {
        self.bool_tags = Some((on, off));
        self
    }

    /// The canonical key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The declared default, None for composite keys.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether this is a composite (pipeline-consumed) key.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.default.is_none()
    }

    /// Boolean-convenience tags, if declared.
    #[must_use]
    pub fn tag_pair(&self) -> Option<&(Value, Value)> {
        self.bool_tags.as_ref()
    }
}

/// Immutable-after-init mapping from canonical keys to [`AttrDef`] metadata.
#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
    defs: BTreeMap<String, AttrDef>,
    aliases: BTreeMap<String, String>,
}

impl AttributeTable {
    /// An empty table, for fully custom setups.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The seeded default table covering the core attribute set.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        for def in default_defs() {
            table
                .register(def)
                .expect("seeded attribute table must be consistent");
        }
        table
    }

    /// Register a new attribute definition together with its aliases.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRegistration`] if the key or any alias collides with
    /// an existing key or alias.
    pub fn register(&mut self, def: AttrDef) -> Result<()> {
        if self.is_taken(def.key()) {
            return Err(Error::DuplicateRegistration {
                registry: "attribute",
                entry: def.key().to_string(),
            });
        }
        for alias in &def.aliases {
            if self.is_taken(alias) {
                return Err(Error::DuplicateRegistration {
                    registry: "alias",
                    entry: alias.clone(),
                });
            }
        }
        for alias in &def.aliases {
            self.aliases.insert(alias.clone(), def.key().to_string());
        }
        self.defs.insert(def.key().to_string(), def);
        Ok(())
    }

    /// Register one alias for an existing canonical key.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAttribute`] if `canonical` is not registered;
    /// [`Error::DuplicateRegistration`] if `alias` is already taken.
    pub fn register_alias(&mut self, alias: &str, canonical: &str) -> Result<()> {
        if !self.defs.contains_key(canonical) {
            return Err(Error::UnknownAttribute {
                name: canonical.to_string(),
            });
        }
        if self.is_taken(alias) {
            return Err(Error::DuplicateRegistration {
                registry: "alias",
                entry: alias.to_string(),
            });
        }
        self.aliases.insert(alias.to_string(), canonical.to_string());
        Ok(())
    }

    /// Re-point an alias, replacing any previous target.
    ///
    /// A canonical key can still not be shadowed: aliasing over an existing
    /// key of different meaning stays an error.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAttribute`] if `canonical` is not registered;
    /// [`Error::DuplicateRegistration`] if `alias` names a canonical key.
    pub fn register_alias_override(&mut self, alias: &str, canonical: &str) -> Result<()> {
        if !self.defs.contains_key(canonical) {
            return Err(Error::UnknownAttribute {
                name: canonical.to_string(),
            });
        }
        if self.defs.contains_key(alias) {
            return Err(Error::DuplicateRegistration {
                registry: "alias",
                entry: alias.to_string(),
            });
        }
        self.aliases.insert(alias.to_string(), canonical.to_string());
        Ok(())
    }

    /// Resolve a name to its canonical key: identity for canonical keys,
    /// rewrite for aliases, None for unknown names.
    #[must_use]
    pub fn canonicalize(&self, name: &str) -> Option<&str> {
        if let Some(def) = self.defs.get(name) {
            return Some(def.key());
        }
        self.aliases.get(name).map(String::as_str)
    }

    /// Look up a definition by canonical key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrDef> {
        self.defs.get(key)
    }

    /// Whether `name` is taken as a canonical key or an alias.
    #[must_use]
    pub fn is_taken(&self, name: &str) -> bool {
        self.defs.contains_key(name) || self.aliases.contains_key(name)
    }

    /// All definitions, in key order.
    pub fn defs(&self) -> impl Iterator<Item = &AttrDef> {
        self.defs.values()
    }

    /// Number of registered canonical keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// The seeded core attribute set.
fn default_defs() -> Vec<AttrDef> {
    vec![
        AttrDef::new("seriestype", Value::symbol("path")).aliases(&["st", "t"]),
        AttrDef::new("linewidth", 1.0f32).aliases(&["lw", "width"]),
        AttrDef::new("linestyle", Value::symbol("solid")).aliases(&["ls", "style"]),
        AttrDef::new("alpha", 1.0f32).aliases(&["a", "opacity"]),
        AttrDef::new("color", Value::symbol("auto")).aliases(&["c", "colour"]),
        AttrDef::new("markershape", Value::symbol("none")).alias("shape"),
        AttrDef::new("markersize", 4.0f32).alias("ms"),
        AttrDef::new("label", "").alias("lab"),
        AttrDef::new("xlabel", "").alias("xlab"),
        AttrDef::new("ylabel", "").alias("ylab"),
        AttrDef::new("xlim", Value::symbol("auto")).aliases(&["xlims", "xlimit"]),
        AttrDef::new("ylim", Value::symbol("auto")).aliases(&["ylims", "ylimit"]),
        AttrDef::new("xticks", Value::symbol("auto")),
        AttrDef::new("yticks", Value::symbol("auto")),
        AttrDef::new("xscale", Value::symbol("identity")),
        AttrDef::new("yscale", Value::symbol("identity")),
        AttrDef::new("xflip", false),
        AttrDef::new("yflip", false),
        AttrDef::new("grid", Value::symbol("on"))
            .bool_tags(Value::symbol("on"), Value::symbol("off")),
        AttrDef::new("legend", Value::symbol("best"))
            .alias("leg")
            .bool_tags(Value::symbol("best"), Value::symbol("none")),
        // Composite keys, consumed before broadcasting.
        AttrDef::composite("line").alias("l"),
        AttrDef::composite("marker").alias("m"),
        AttrDef::composite("xaxis"),
        AttrDef::composite("yaxis"),
        AttrDef::composite("group").alias("g"),
    ]
}
