//! Attribute handling: the canonical table, alias resolution, magic-argument
//! expansion, and per-series broadcasting.
//!
//! # Components
//!
//! - **Table**: canonical keys with aliases, defaults, and convenience tags
//! - **Alias**: rewrites raw names onto canonical keys
//! - **Magic**: decomposes composite shorthand values via declared rules
//! - **Broadcast**: expands scalar/vector/matrix values to one per series

mod alias;
mod broadcast;
mod magic;
mod table;

pub use alias::resolve_aliases;
pub use broadcast::{broadcast, broadcast_grouped};
pub use magic::{
    expand_magic, MagicGroup, MagicRule, Predicate, AXIS_SCALES, LINE_STYLES, MARKER_SHAPES,
    SERIES_TYPES,
};
pub use table::{AttrDef, AttributeTable};

pub(crate) use magic::default_groups;
