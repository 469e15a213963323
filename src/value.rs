//! Dynamic values flowing through the resolution pipeline.
//!
//! A [`Value`] carries everything a plot command may supply: scalars, symbol
//! tags, ordered sequences, 2-D matrices, and tagged custom data for recipe
//! dispatch.

use std::fmt;

/// A lightweight symbol tag, written `:name` in command shorthand.
///
/// Symbols identify modes and styles (`:log`, `:dash`, `:scatter`) without
/// the quoting overhead of text values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from its bare name (no leading colon).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The symbol's bare name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A 2-D numeric array in column-major storage.
///
/// Columns are the series axis: a matrix-valued data argument expands into
/// one series per column. All columns share the same row count; ragged input
/// is truncated to the shortest column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    columns: Vec<Vec<f32>>,
    nrows: usize,
}

impl Matrix {
    /// Build a matrix from columns, truncating ragged columns to the
    /// shortest length.
    #[must_use]
    pub fn from_columns(columns: Vec<Vec<f32>>) -> Self {
        let nrows = columns.iter().map(Vec::len).min().unwrap_or(0);
        let columns = columns
            .into_iter()
            .map(|mut c| {
                c.truncate(nrows);
                c
            })
            .collect();
        Self { columns, nrows }
    }

    /// Number of columns (the series axis).
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// One column as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= ncols()`.
    #[must_use]
    pub fn column(&self, i: usize) -> &[f32] {
        &self.columns[i]
    }

    /// One row, gathered across columns.
    #[must_use]
    pub fn row(&self, i: usize) -> Vec<f32> {
        self.columns.iter().map(|c| c[i]).collect()
    }

    /// Iterate over all cells.
    pub fn cells(&self) -> impl Iterator<Item = f32> + '_ {
        self.columns.iter().flatten().copied()
    }
}

/// A dynamic value supplied by a plot command.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A numeric value.
    Number(f32),
    /// A boolean convenience value (normalized to tags during expansion).
    Bool(bool),
    /// A text value.
    Text(String),
    /// A symbol tag.
    Symbol(Symbol),
    /// An ordered sequence; doubles as the composite container for magic
    /// arguments.
    List(Vec<Value>),
    /// A 2-D numeric array.
    Matrix(Matrix),
    /// Tagged custom data, transformed by a registered recipe.
    Custom {
        /// Registered type descriptor used for recipe dispatch.
        descriptor: String,
        /// Opaque payload handed to the recipe transform.
        payload: Box<Value>,
    },
}

impl Value {
    /// Shorthand for a symbol value.
    #[must_use]
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    /// Shorthand for a matrix value built from columns.
    #[must_use]
    pub fn matrix(columns: Vec<Vec<f32>>) -> Self {
        Value::Matrix(Matrix::from_columns(columns))
    }

    /// Tagged custom data for recipe dispatch.
    #[must_use]
    pub fn custom(descriptor: impl Into<String>, payload: Value) -> Self {
        Value::Custom {
            descriptor: descriptor.into(),
            payload: Box::new(payload),
        }
    }

    /// The value's type descriptor, the single key used for recipe lookup.
    ///
    /// Built-in values own `number`, `bool`, `text`, `symbol`, `list`, and
    /// `matrix`; custom values report their registered tag.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Matrix(_) => "matrix",
            Value::Custom { descriptor, .. } => descriptor,
        }
    }

    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as bool, or None if not a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as text, or None if not a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get as symbol, or None if not a symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Get as list elements, or None if not a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// All scalar leaves, with nested lists flattened.
    ///
    /// Matrices count as a single leaf; predicates that accept them inspect
    /// cells directly.
    #[must_use]
    pub fn scalars(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        self.push_scalars(&mut out);
        out
    }

    fn push_scalars<'a>(&'a self, out: &mut Vec<&'a Value>) {
        match self {
            Value::List(items) => {
                for item in items {
                    item.push_scalars(out);
                }
            }
            other => out.push(other),
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v as f32)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f32)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Number(v as f32)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::List(vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self {
        Value::List(vec![a.into(), b.into(), c.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>, D: Into<Value>> From<(A, B, C, D)> for Value {
    fn from((a, b, c, d): (A, B, C, D)) -> Self {
        Value::List(vec![a.into(), b.into(), c.into(), d.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>, D: Into<Value>, E: Into<Value>>
    From<(A, B, C, D, E)> for Value
{
    fn from((a, b, c, d, e): (A, B, C, D, E)) -> Self {
        Value::List(vec![a.into(), b.into(), c.into(), d.into(), e.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_display() {
        let s = Symbol::new("log");
        assert_eq!(s.to_string(), ":log");
        assert_eq!(s.name(), "log");
    }

    #[test]
    fn test_matrix_from_columns() {
        let m = Matrix::from_columns(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.column(1), &[3.0, 4.0]);
        assert_eq!(m.row(0), vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_matrix_ragged_truncates() {
        let m = Matrix::from_columns(vec![vec![1.0, 2.0, 3.0], vec![4.0]]);
        assert_eq!(m.nrows(), 1);
        assert_eq!(m.column(0), &[1.0]);
    }

    #[test]
    fn test_matrix_empty() {
        let m = Matrix::from_columns(vec![]);
        assert_eq!(m.ncols(), 0);
        assert_eq!(m.nrows(), 0);
    }

    #[test]
    fn test_descriptors() {
        assert_eq!(Value::Number(1.0).descriptor(), "number");
        assert_eq!(Value::Bool(true).descriptor(), "bool");
        assert_eq!(Value::from("hi").descriptor(), "text");
        assert_eq!(Value::symbol("log").descriptor(), "symbol");
        assert_eq!(Value::from(vec![1.0f32]).descriptor(), "list");
        assert_eq!(Value::matrix(vec![vec![1.0]]).descriptor(), "matrix");
        assert_eq!(
            Value::custom("timeseries", Value::Number(1.0)).descriptor(),
            "timeseries"
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::from("hi").as_text(), Some("hi"));
        assert_eq!(
            Value::symbol("dash").as_symbol(),
            Some(&Symbol::new("dash"))
        );
        assert_eq!(Value::Number(1.0).as_text(), None);
        assert_eq!(Value::from("hi").as_number(), None);
    }

    #[test]
    fn test_tuple_conversion() {
        let v: Value = (1.0f32, "label", Value::symbol("log")).into();
        let items = v.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Value::Number(1.0));
        assert_eq!(items[1], Value::Text("label".to_string()));
    }

    #[test]
    fn test_scalars_flattens_nested_lists() {
        let v = Value::List(vec![
            Value::Number(1.0),
            Value::List(vec![Value::Number(2.0), Value::Number(3.0)]),
        ]);
        let scalars = v.scalars();
        assert_eq!(scalars.len(), 3);
        assert!(scalars.iter().all(|s| s.as_number().is_some()));
    }

    #[test]
    fn test_scalars_on_scalar() {
        let v = Value::symbol("path");
        assert_eq!(v.scalars(), vec![&Value::symbol("path")]);
    }

    #[test]
    fn test_vec_conversion() {
        let v: Value = vec![4.0f32, 1.0, 0.0].into();
        assert_eq!(v.as_list().map(<[Value]>::len), Some(3));
    }

    #[test]
    fn test_matrix_cells() {
        let m = Matrix::from_columns(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let cells: Vec<f32> = m.cells().collect();
        assert_eq!(cells, vec![1.0, 2.0, 3.0, 4.0]);
    }
}
