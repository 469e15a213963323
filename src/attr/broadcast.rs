//! Per-series attribute broadcasting.
//!
//! Expands scalar, vector, and matrix attribute values into one concrete
//! value per series, filling declared defaults for every key the command
//! left unset.

use std::collections::BTreeMap;

use super::table::AttributeTable;
use crate::error::{Error, Result};
use crate::group::GroupPartition;
use crate::value::{Matrix, Value};

/// Resolve one complete attribute map per series for an ungrouped command.
///
/// Scalars replicate to all `n` series; length-`n` lists assign elementwise;
/// length-1 lists collapse to scalars; matrices align the axis whose extent
/// equals `n` (columns first, matching how matrix data splits). Every
/// non-composite table key appears in each output map, defaulted if absent
/// from `attrs`.
///
/// # Errors
///
/// [`Error::BroadcastShapeMismatch`] when a value's arity is neither 1 nor `n`.
pub fn broadcast(
    table: &AttributeTable,
    attrs: &BTreeMap<String, Value>,
    n: usize,
) -> Result<Vec<BTreeMap<String, Value>>> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let mut map = BTreeMap::new();
        for def in table.defs() {
            let Some(default) = def.default_value() else {
                continue;
            };
            let value = match attrs.get(def.key()) {
                Some(v) => slot(def.key(), v, i, n)?,
                None => default.clone(),
            };
            map.insert(def.key().to_string(), value);
        }
        out.push(map);
    }
    Ok(out)
}

/// Resolve one complete attribute map per group partition.
///
/// Group-count arity assigns elementwise across groups. A vector whose
/// length matches the original row count instead (per-row values) is
/// re-sliced by each group's row indices; when the two counts coincide the
/// group-count interpretation wins.
///
/// # Errors
///
/// [`Error::BroadcastShapeMismatch`] when a value matches neither arity.
pub fn broadcast_grouped(
    table: &AttributeTable,
    attrs: &BTreeMap<String, Value>,
    partitions: &[GroupPartition],
    n_rows: usize,
) -> Result<Vec<BTreeMap<String, Value>>> {
    let n = partitions.len();
    let mut out = Vec::with_capacity(n);
    for (i, part) in partitions.iter().enumerate() {
        let mut map = BTreeMap::new();
        for def in table.defs() {
            let Some(default) = def.default_value() else {
                continue;
            };
            let value = match attrs.get(def.key()) {
                Some(v) => grouped_slot(def.key(), v, i, n, part, n_rows)?,
                None => default.clone(),
            };
            map.insert(def.key().to_string(), value);
        }
        out.push(map);
    }
    Ok(out)
}

/// The per-series value of `value` for series `i` of `n`.
fn slot(key: &str, value: &Value, i: usize, n: usize) -> Result<Value> {
    match value {
        Value::List(items) => match items.len() {
            1 => Ok(items[0].clone()),
            len if len == n => Ok(items[i].clone()),
            len => Err(Error::BroadcastShapeMismatch {
                key: key.to_string(),
                expected: n,
                got: len,
            }),
        },
        Value::Matrix(m) => matrix_lane(key, m, i, n),
        scalar => Ok(scalar.clone()),
    }
}

/// The per-group value of `value` for partition `i` of `n`.
fn grouped_slot(
    key: &str,
    value: &Value,
    i: usize,
    n: usize,
    part: &GroupPartition,
    n_rows: usize,
) -> Result<Value> {
    match value {
        Value::List(items) => {
            if items.len() == 1 {
                Ok(items[0].clone())
            } else if items.len() == n {
                Ok(items[i].clone())
            } else if items.len() == n_rows {
                Ok(Value::List(
                    part.rows().iter().map(|&r| items[r].clone()).collect(),
                ))
            } else {
                Err(Error::BroadcastShapeMismatch {
                    key: key.to_string(),
                    expected: n,
                    got: items.len(),
                })
            }
        }
        Value::Matrix(m) => matrix_lane(key, m, i, n),
        scalar => Ok(scalar.clone()),
    }
}

/// Select the matrix lane aligned with the series axis: columns first, then
/// rows.
fn matrix_lane(key: &str, m: &Matrix, i: usize, n: usize) -> Result<Value> {
    if m.ncols() == n {
        Ok(Value::List(
            m.column(i).iter().map(|&v| Value::Number(v)).collect(),
        ))
    } else if m.nrows() == n {
        Ok(Value::List(
            m.row(i).into_iter().map(Value::Number).collect(),
        ))
    } else {
        Err(Error::BroadcastShapeMismatch {
            key: key.to_string(),
            expected: n,
            got: m.ncols(),
        })
    }
}
