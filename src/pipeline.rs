//! The resolution pipeline driver.
//!
//! Stages run in a fixed linear order with no branching back:
//!
//! ```text
//! Raw → AliasResolved → MagicExpanded → RecipeFixpoint → Grouped → Broadcast → Resolved
//! ```
//!
//! No transition is skipped: a command with no magic arguments, no
//! custom-typed data, and no grouping still passes through every stage as a
//! no-op. Each stage is a pure function of its input plus the read-only
//! registry, so a failed resolve leaves no caller-visible state behind.

use std::collections::BTreeMap;

use crate::attr::{broadcast, broadcast_grouped, expand_magic, resolve_aliases};
use crate::error::Result;
use crate::group::{group_labels, split_groups};
use crate::recipe;
use crate::registry::Registry;
use crate::series::SeriesSpec;
use crate::value::Value;

/// Run the full pipeline for one command.
pub(crate) fn run(
    registry: &Registry,
    data: Value,
    raw: Vec<(String, Value)>,
) -> Result<Vec<SeriesSpec>> {
    let attrs = resolve_aliases(registry.table(), raw)?;
    let mut attrs = expand_magic(registry.table(), registry.magic_groups(), attrs)?;
    let data = recipe::dispatch(registry.recipes(), registry.table(), data, &mut attrs)?;

    match attrs.remove("group") {
        Some(group_value) => grouped(registry, data, &attrs, &group_value),
        None => ungrouped(registry, data, &attrs),
    }
}

/// Ungrouped: the data's own shape implies the series count.
fn ungrouped(
    registry: &Registry,
    data: Value,
    attrs: &BTreeMap<String, Value>,
) -> Result<Vec<SeriesSpec>> {
    match series_columns(&data) {
        Some(columns) => {
            let maps = broadcast(registry.table(), attrs, columns.len())?;
            Ok(columns
                .into_iter()
                .zip(maps)
                .map(|(column, map)| SeriesSpec::new(numeric_list(&column), None, map))
                .collect())
        }
        // Non-columnar data passed through a recipe-less pipeline stays one
        // series, unchanged.
        None => {
            let mut maps = broadcast(registry.table(), attrs, 1)?;
            let map = maps.pop().unwrap_or_default();
            Ok(vec![SeriesSpec::new(data, None, map)])
        }
    }
}

/// Grouped: partition rows by label, one broadcast slot per group. With
/// matrix data every (group, column) pair becomes a series, group-major.
fn grouped(
    registry: &Registry,
    data: Value,
    attrs: &BTreeMap<String, Value>,
    group_value: &Value,
) -> Result<Vec<SeriesSpec>> {
    let labels = group_labels(group_value);
    let columns = series_columns(&data).unwrap_or_default();
    let n_rows = columns.first().map(Vec::len).unwrap_or(0);
    let partitions = split_groups(&labels, n_rows)?;
    let maps = broadcast_grouped(registry.table(), attrs, &partitions, n_rows)?;

    let label_unset = !attrs.contains_key("label");
    let mut out = Vec::with_capacity(partitions.len() * columns.len());
    for (gi, part) in partitions.iter().enumerate() {
        for column in &columns {
            let slice: Vec<f32> = part.rows().iter().map(|&r| column[r]).collect();
            let mut map = maps[gi].clone();
            if label_unset {
                // Legend entries default to the group labels.
                map.insert("label".to_string(), Value::Text(part.label().to_string()));
            }
            out.push(SeriesSpec::new(
                numeric_list(&slice),
                Some(part.label().to_string()),
                map,
            ));
        }
    }
    Ok(out)
}

/// Interpret resolved data as per-series numeric columns.
///
/// Matrices split by column; a flat numeric list is one column; a list of
/// numeric lists is already columnar. Anything else is not columnar.
fn series_columns(data: &Value) -> Option<Vec<Vec<f32>>> {
    match data {
        Value::Number(n) => Some(vec![vec![*n]]),
        Value::Matrix(m) => Some((0..m.ncols()).map(|c| m.column(c).to_vec()).collect()),
        Value::List(items) => {
            if items.is_empty() {
                return None;
            }
            if items.iter().all(|v| matches!(v, Value::Number(_))) {
                let column = items.iter().filter_map(Value::as_number).collect();
                return Some(vec![column]);
            }
            items
                .iter()
                .map(|item| {
                    item.as_list().and_then(|inner| {
                        inner
                            .iter()
                            .map(Value::as_number)
                            .collect::<Option<Vec<f32>>>()
                    })
                })
                .collect()
        }
        _ => None,
    }
}

fn numeric_list(values: &[f32]) -> Value {
    Value::List(values.iter().map(|&v| Value::Number(v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_columns_matrix() {
        let m = Value::matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let cols = series_columns(&m).unwrap();
        assert_eq!(cols, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_series_columns_flat_list() {
        let v = Value::from(vec![1.0f32, 2.0, 3.0]);
        assert_eq!(series_columns(&v), Some(vec![vec![1.0, 2.0, 3.0]]));
    }

    #[test]
    fn test_series_columns_nested_lists() {
        let v = Value::List(vec![
            Value::from(vec![1.0f32, 2.0]),
            Value::from(vec![3.0f32, 4.0]),
        ]);
        let cols = series_columns(&v).unwrap();
        assert_eq!(cols.len(), 2);
    }

    #[test]
    fn test_series_columns_rejects_mixed() {
        let v = Value::List(vec![Value::Number(1.0), Value::from("x")]);
        assert_eq!(series_columns(&v), None);
        assert_eq!(series_columns(&Value::from("text")), None);
    }

    #[test]
    fn test_scalar_is_single_point_column() {
        assert_eq!(series_columns(&Value::Number(5.0)), Some(vec![vec![5.0]]));
    }
}
