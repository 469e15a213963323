//! Fully resolved per-series specifications.

use std::collections::BTreeMap;

use crate::value::Value;

/// One fully resolved series, ready for a rendering backend.
///
/// Carries the positional data slice, an optional group label, and a
/// complete attribute map: every canonical attribute key is present with a
/// concrete value. Renderers never re-resolve aliases or magic arguments.
/// Immutable once produced; owned by the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesSpec {
    data: Value,
    group: Option<String>,
    attrs: BTreeMap<String, Value>,
}

impl SeriesSpec {
    pub(crate) fn new(data: Value, group: Option<String>, attrs: BTreeMap<String, Value>) -> Self {
        Self { data, group, attrs }
    }

    /// The series' positional data.
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// The group label, when this series came from a grouped command.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// The complete attribute map.
    #[must_use]
    pub fn attrs(&self) -> &BTreeMap<String, Value> {
        &self.attrs
    }

    /// One attribute's resolved value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// The positional data as numeric points, when it is numeric.
    #[must_use]
    pub fn points(&self) -> Option<Vec<f32>> {
        match &self.data {
            Value::Number(n) => Some(vec![*n]),
            Value::List(items) => items.iter().map(Value::as_number).collect(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(data: Value) -> SeriesSpec {
        SeriesSpec::new(data, Some("a".to_string()), BTreeMap::new())
    }

    #[test]
    fn test_points_numeric() {
        let s = spec(Value::from(vec![1.0f32, 2.0, 3.0]));
        assert_eq!(s.points(), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_points_scalar() {
        let s = spec(Value::Number(7.0));
        assert_eq!(s.points(), Some(vec![7.0]));
    }

    #[test]
    fn test_points_non_numeric() {
        let s = spec(Value::from("text"));
        assert_eq!(s.points(), None);
        let mixed = spec(Value::List(vec![Value::Number(1.0), Value::from("x")]));
        assert_eq!(mixed.points(), None);
    }

    #[test]
    fn test_accessors() {
        let mut attrs = BTreeMap::new();
        attrs.insert("alpha".to_string(), Value::Number(0.5));
        let s = SeriesSpec::new(Value::Number(1.0), None, attrs);
        assert_eq!(s.group(), None);
        assert_eq!(s.attr("alpha"), Some(&Value::Number(0.5)));
        assert_eq!(s.attr("missing"), None);
        assert_eq!(s.attrs().len(), 1);
    }
}
