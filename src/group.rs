//! Group splitting: partition data rows into per-label series.

use crate::error::{Error, Result};
use crate::value::Value;

/// One group partition: a label and the row indices carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPartition {
    label: String,
    rows: Vec<usize>,
}

impl GroupPartition {
    /// Create a partition from a label and its row indices.
    #[must_use]
    pub fn new(label: &str, rows: Vec<usize>) -> Self {
        Self {
            label: label.to_string(),
            rows,
        }
    }

    /// The group label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Row indices belonging to this group, in input order.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }
}

/// Partition row indices by distinct label, preserving first-encountered
/// label order.
///
/// The partitions are exhaustive and disjoint: every row index appears in
/// exactly one partition.
///
/// # Errors
///
/// [`Error::GroupKeyLengthMismatch`] when the label count differs from the
/// row count.
pub fn split_groups(labels: &[String], n_rows: usize) -> Result<Vec<GroupPartition>> {
    if labels.len() != n_rows {
        return Err(Error::GroupKeyLengthMismatch {
            expected: n_rows,
            got: labels.len(),
        });
    }
    let mut parts: Vec<GroupPartition> = Vec::new();
    for (row, label) in labels.iter().enumerate() {
        match parts.iter_mut().find(|p| p.label == *label) {
            Some(part) => part.rows.push(row),
            None => parts.push(GroupPartition::new(label, vec![row])),
        }
    }
    Ok(parts)
}

/// Render a grouping-key value into its per-row label strings.
///
/// A non-sequence value is a single label.
#[must_use]
pub fn group_labels(value: &Value) -> Vec<String> {
    match value {
        Value::List(items) => items.iter().map(label_of).collect(),
        other => vec![label_of(other)],
    }
}

fn label_of(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Text(s) => s.clone(),
        Value::Symbol(s) => s.name().to_string(),
        other => format!("{other:?}"),
    }
}


// ============================================================================
// Property-based tests with proptest
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Partition invariant: the union of partition row sets equals the
        /// full row-index set and pairwise intersections are empty.
        #[test]
        fn prop_partitions_exhaustive_and_disjoint(
            labels in prop::collection::vec("[a-d]", 0..200)
        ) {
            let n = labels.len();
            let parts = split_groups(&labels, n).unwrap();

            let mut seen = vec![false; n];
            for part in &parts {
                for &row in part.rows() {
                    prop_assert!(!seen[row], "row {} appears in two partitions", row);
                    seen[row] = true;
                }
            }
            prop_assert!(seen.iter().all(|&s| s), "some row is missing from every partition");
        }

        /// Label order is first-encountered order, never sort order.
        #[test]
        fn prop_first_seen_order(
            labels in prop::collection::vec("[a-d]", 1..100)
        ) {
            let parts = split_groups(&labels, labels.len()).unwrap();
            let mut expected: Vec<&String> = Vec::new();
            for label in &labels {
                if !expected.contains(&label) {
                    expected.push(label);
                }
            }
            let got: Vec<&str> = parts.iter().map(GroupPartition::label).collect();
            let expected: Vec<&str> = expected.iter().map(|s| s.as_str()).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
