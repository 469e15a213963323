//! Alias resolution: rewrite a raw attribute map onto canonical keys.

use std::collections::BTreeMap;

use super::table::AttributeTable;
use crate::error::{Error, Result};
use crate::value::Value;

/// Rewrite raw `(name, value)` pairs into a map keyed purely by canonical
/// attribute keys.
///
/// Canonical names pass through, known aliases rewrite, unknown names fail.
/// The result is independent of input ordering; supplying the same attribute
/// through two names is ambiguous intent and is rejected rather than picking
/// one.
///
/// # Errors
///
/// [`Error::UnknownAttribute`] for an unrecognized name,
/// [`Error::ConflictingAlias`] when two names resolve to the same key.
pub fn resolve_aliases(
    table: &AttributeTable,
    raw: Vec<(String, Value)>,
) -> Result<BTreeMap<String, Value>> {
    let mut sources: BTreeMap<String, String> = BTreeMap::new();
    let mut out = BTreeMap::new();
    for (name, value) in raw {
        let canonical = table
            .canonicalize(&name)
            .ok_or_else(|| Error::UnknownAttribute { name: name.clone() })?
            .to_string();
        if let Some(first) = sources.get(&canonical) {
            return Err(Error::ConflictingAlias {
                canonical,
                first: first.clone(),
                second: name,
            });
        }
        sources.insert(canonical.clone(), name);
        out.insert(canonical, value);
    }
    Ok(out)
}
