//! # Trazar
//!
//! Plot-command resolution pipeline: aliases, magic arguments, recipes, and
//! per-series attribute broadcasting.
//!
//! Trazar normalizes heterogeneous, highly flexible plotting commands into a
//! canonical, fully-resolved set of per-series visual specifications before
//! any rendering occurs. Users may spell an attribute fully, partially,
//! through a shorthand alias, or not at all, and may supply one matrix-valued
//! call that expands into several independent series with individually
//! varying attributes. Rendering backends receive [`SeriesSpec`] values with
//! every attribute concrete.
//!
//! ## Pipeline
//!
//! Resolution is a fixed linear sequence of pure stages:
//!
//! ```text
//! Raw → AliasResolved → MagicExpanded → RecipeFixpoint → Grouped → Broadcast → Resolved
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use trazar::{Registry, Value};
//!
//! let registry = Registry::with_defaults();
//!
//! // One matrix-valued call, three independently styled series.
//! let matrix = Value::matrix(vec![
//!     vec![1.0, 2.0, 3.0],
//!     vec![2.0, 4.0, 6.0],
//!     vec![3.0, 6.0, 9.0],
//! ]);
//! let series = registry.resolve(
//!     matrix,
//!     [("lw", Value::from(vec![4.0f32, 1.0, 2.0]))],
//! )?;
//!
//! assert_eq!(series.len(), 3);
//! assert_eq!(series[0].attr("linewidth"), Some(&Value::Number(4.0)));
//! # Ok::<(), trazar::Error>(())
//! ```
//!
//! ## Extension points
//!
//! Aliases, magic groups, and recipes are open registries populated through
//! [`Registry::register_alias`], [`Registry::register_magic_group`], and
//! [`Registry::register_recipe`] during an explicit setup phase. Resolution
//! borrows the registry immutably, so concurrent resolves need no locking.
//!
//! ## Feature Flags
//!
//! - `serde`: Serde serialization for [`Value`], [`Matrix`](value::Matrix),
//!   and [`SeriesSpec`]

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

// ============================================================================
// Core Modules
// ============================================================================

/// Dynamic values flowing through the pipeline.
pub mod value;

/// Attribute table, aliases, magic arguments, and broadcasting.
pub mod attr;

/// Type-driven recipe dispatch.
pub mod recipe;

/// Group splitting.
pub mod group;

/// Resolved per-series specifications.
pub mod series;

/// The registry and pipeline entry point.
pub mod registry;

mod pipeline;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trazar operations.
pub mod error;

pub use error::{Error, Result};
pub use registry::Registry;
pub use series::SeriesSpec;
pub use value::{Matrix, Symbol, Value};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use trazar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attr::{AttrDef, AttributeTable, MagicGroup, MagicRule, Predicate};
    pub use crate::error::{Error, Result};
    pub use crate::group::GroupPartition;
    pub use crate::recipe::{Recipe, RecipeOutput, RecipeRegistry};
    pub use crate::registry::Registry;
    pub use crate::series::SeriesSpec;
    pub use crate::value::{Matrix, Symbol, Value};
}
