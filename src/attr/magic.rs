//! Magic-argument expansion.
//!
//! A magic argument is one composite value that decomposes into several
//! canonical attributes: `line = (0.5, 4, :dash)` sets alpha, line width,
//! and line style in a single keyword. Decomposition is driven by declared,
//! ordered (predicate, target) rule lists, never by ad hoc type branching,
//! so precedence stays explicit and testable.

use std::collections::BTreeMap;

use super::table::{AttrDef, AttributeTable};
use crate::error::{Error, Result};
use crate::value::Value;

/// Series type tags accepted by the `line` magic group.
pub const SERIES_TYPES: &[&str] = &[
    "path",
    "line",
    "scatter",
    "bar",
    "histogram",
    "density",
    "heatmap",
    "area",
];

/// Line style tags.
pub const LINE_STYLES: &[&str] = &["auto", "solid", "dash", "dot", "dashdot"];

/// Marker shape tags.
pub const MARKER_SHAPES: &[&str] = &[
    "auto",
    "none",
    "circle",
    "o",
    "square",
    "s",
    "diamond",
    "d",
    "cross",
    "x",
    "plus",
    "+",
    "star",
    "triangle",
    "utriangle",
    "dtriangle",
];

/// Axis scale tags.
pub const AXIS_SCALES: &[&str] = &["identity", "linear", "ln", "log", "log2", "log10"];

/// A shape/type predicate over one tuple element.
///
/// Predicates inspect the element's runtime shape only, independently of its
/// position in the tuple. A vector-valued element matches when every scalar
/// inside it matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A text value.
    Text,
    /// A boolean value.
    Bool,
    /// A 2-element numeric sequence, e.g. axis limits.
    NumberPair,
    /// Numeric with every element inside `[0, 1]`, e.g. an alpha.
    UnitInterval,
    /// Numeric (scalar, vector, or matrix).
    Numeric,
    /// A symbol (or vector of symbols) drawn from a fixed tag set.
    SymbolIn(&'static [&'static str]),
    /// Any symbol (or vector of symbols).
    SymbolAny,
}

impl Predicate {
    /// Whether `value` satisfies this predicate.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Predicate::Text => matches!(value, Value::Text(_)),
            Predicate::Bool => matches!(value, Value::Bool(_)),
            Predicate::NumberPair => match value {
                Value::List(items) => {
                    items.len() == 2 && items.iter().all(|v| matches!(v, Value::Number(_)))
                }
                _ => false,
            },
            Predicate::UnitInterval => numbers_within(value, 0.0, 1.0),
            Predicate::Numeric => numbers_within(value, f32::NEG_INFINITY, f32::INFINITY),
            Predicate::SymbolIn(set) => symbols_satisfy(value, |name| set.contains(&name)),
            Predicate::SymbolAny => symbols_satisfy(value, |_| true),
        }
    }
}

/// Every scalar is a number inside `[lo, hi]`; matrices check all cells.
fn numbers_within(value: &Value, lo: f32, hi: f32) -> bool {
    match value {
        Value::Number(n) => *n >= lo && *n <= hi,
        Value::Matrix(m) => m.nrows() > 0 && m.cells().all(|c| c >= lo && c <= hi),
        Value::List(_) => {
            let scalars = value.scalars();
            !scalars.is_empty()
                && scalars
                    .iter()
                    .all(|v| v.as_number().is_some_and(|n| n >= lo && n <= hi))
        }
        _ => false,
    }
}

/// Every scalar is a symbol whose name satisfies `accept`.
fn symbols_satisfy(value: &Value, accept: impl Fn(&str) -> bool) -> bool {
    match value {
        Value::Symbol(s) => accept(s.name()),
        Value::List(_) => {
            let scalars = value.scalars();
            !scalars.is_empty()
                && scalars
                    .iter()
                    .all(|v| v.as_symbol().is_some_and(|s| accept(s.name())))
        }
        _ => false,
    }
}

/// One decomposition rule: the first rule whose predicate matches claims the
/// element for its target key.
#[derive(Debug, Clone, PartialEq)]
pub struct MagicRule {
    target: String,
    pred: Predicate,
    emit: Option<Value>,
}

impl MagicRule {
    /// A rule storing the matched element under `target`.
    #[must_use]
    pub fn new(target: &str, pred: Predicate) -> Self {
        Self {
            target: target.to_string(),
            pred,
            emit: None,
        }
    }

    /// A rule storing a fixed value instead of the element, e.g. the
    /// `:flip` tag emitting `true` for the flip key.
    #[must_use]
    pub fn constant(target: &str, pred: Predicate, emit: Value) -> Self {
        Self {
            target: target.to_string(),
            pred,
            emit: Some(emit),
        }
    }

    /// The canonical key this rule assigns to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The rule's predicate.
    #[must_use]
    pub fn pred(&self) -> &Predicate {
        &self.pred
    }

    fn emit_value(&self) -> Option<&Value> {
        self.emit.as_ref()
    }
}

/// A declared magic group: a composite keyword name plus its ordered
/// decomposition rules.
#[derive(Debug, Clone, PartialEq)]
pub struct MagicGroup {
    name: String,
    rules: Vec<MagicRule>,
}

impl MagicGroup {
    /// Declare a group from its ordered rule list.
    #[must_use]
    pub fn new(name: &str, rules: Vec<MagicRule>) -> Self {
        Self {
            name: name.to_string(),
            rules,
        }
    }

    /// The composite keyword this group expands.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered decomposition rules.
    #[must_use]
    pub fn rules(&self) -> &[MagicRule] {
        &self.rules
    }

    /// The `line` group: series type, line style, alpha, line width.
    #[must_use]
    pub fn line() -> Self {
        Self::new(
            "line",
            vec![
                MagicRule::new("seriestype", Predicate::SymbolIn(SERIES_TYPES)),
                MagicRule::new("linestyle", Predicate::SymbolIn(LINE_STYLES)),
                MagicRule::new("alpha", Predicate::UnitInterval),
                MagicRule::new("linewidth", Predicate::Numeric),
            ],
        )
    }

    /// The `marker` group: shape, alpha, size.
    #[must_use]
    pub fn marker() -> Self {
        Self::new(
            "marker",
            vec![
                MagicRule::new("markershape", Predicate::SymbolIn(MARKER_SHAPES)),
                MagicRule::new("alpha", Predicate::UnitInterval),
                MagicRule::new("markersize", Predicate::Numeric),
            ],
        )
    }

    /// The `xaxis` group: label, limits, scale, flip, ticks.
    #[must_use]
    pub fn xaxis() -> Self {
        Self::axis("xaxis", "x")
    }

    /// The `yaxis` group: label, limits, scale, flip, ticks.
    #[must_use]
    pub fn yaxis() -> Self {
        Self::axis("yaxis", "y")
    }

    fn axis(name: &str, prefix: &str) -> Self {
        Self::new(
            name,
            vec![
                MagicRule::new(&format!("{prefix}label"), Predicate::Text),
                MagicRule::new(&format!("{prefix}lim"), Predicate::NumberPair),
                MagicRule::new(&format!("{prefix}scale"), Predicate::SymbolIn(AXIS_SCALES)),
                MagicRule::constant(
                    &format!("{prefix}flip"),
                    Predicate::SymbolIn(&["flip"]),
                    Value::Bool(true),
                ),
                MagicRule::new(&format!("{prefix}ticks"), Predicate::Numeric),
            ],
        )
    }
}

/// The seeded magic groups.
pub(crate) fn default_groups() -> Vec<MagicGroup> {
    vec![
        MagicGroup::line(),
        MagicGroup::marker(),
        MagicGroup::xaxis(),
        MagicGroup::yaxis(),
    ]
}

/// Expand every magic argument in `attrs` and normalize boolean convenience
/// values into their declared tag representation.
///
/// An explicitly supplied target key always wins over a magic-derived value
/// for the same key; the magic-derived value is discarded silently.
///
/// # Errors
///
/// [`Error::UnrecognizedMagicComponent`] when a tuple element matches no
/// rule of its group.
pub fn expand_magic(
    table: &AttributeTable,
    groups: &[MagicGroup],
    attrs: BTreeMap<String, Value>,
) -> Result<BTreeMap<String, Value>> {
    let mut out: BTreeMap<String, Value> = BTreeMap::new();
    let mut derived: Vec<(String, Value)> = Vec::new();

    for (key, value) in attrs {
        match groups.iter().find(|g| g.name() == key) {
            Some(group) => derived.extend(decompose(group, value)?),
            None => {
                out.insert(key, value);
            }
        }
    }

    // Explicit-over-magic precedence: only fill targets the user left unset.
    for (key, value) in derived {
        out.entry(key).or_insert(value);
    }

    for (key, value) in &mut out {
        normalize_bool(table.get(key), value);
    }

    Ok(out)
}

/// Assign each tuple element to the first rule whose predicate matches.
/// A non-sequence value is treated as a 1-tuple.
fn decompose(group: &MagicGroup, value: Value) -> Result<Vec<(String, Value)>> {
    let elements = match value {
        Value::List(items) => items,
        other => vec![other],
    };
    let mut out = Vec::with_capacity(elements.len());
    for element in elements {
        match group.rules().iter().find(|r| r.pred().matches(&element)) {
            Some(rule) => {
                let value = match rule.emit_value() {
                    Some(constant) => constant.clone(),
                    None => element,
                };
                out.push((rule.target().to_string(), value));
            }
            None => {
                return Err(Error::UnrecognizedMagicComponent {
                    group: group.name().to_string(),
                    component: format!("{element:?}"),
                })
            }
        }
    }
    Ok(out)
}

/// Rewrite a raw boolean into the attribute's declared on/off tag.
fn normalize_bool(def: Option<&AttrDef>, value: &mut Value) {
    if let Value::Bool(b) = value {
        if let Some((on, off)) = def.and_then(AttrDef::tag_pair) {
            *value = if *b { on.clone() } else { off.clone() };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AttributeTable {
        AttributeTable::with_defaults()
    }

    fn expand(attrs: Vec<(&str, Value)>) -> Result<BTreeMap<String, Value>> {
        let map = attrs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        expand_magic(&table(), &default_groups(), map)
    }

    #[test]
    fn test_xaxis_expansion() {
        let resolved = expand(vec![(
            "xaxis",
            Value::from((
                "lbl",
                (0.0f32, 10.0f32),
                0.5f32,
                Value::symbol("log"),
                Value::symbol("flip"),
            )),
        )])
        .unwrap();

        assert_eq!(resolved.get("xlabel"), Some(&Value::from("lbl")));
        assert_eq!(
            resolved.get("xlim"),
            Some(&Value::from((0.0f32, 10.0f32)))
        );
        assert_eq!(resolved.get("xticks"), Some(&Value::Number(0.5)));
        assert_eq!(resolved.get("xscale"), Some(&Value::symbol("log")));
        assert_eq!(resolved.get("xflip"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_line_expansion() {
        let resolved = expand(vec![(
            "line",
            Value::from((
                0.5f32,
                vec![4.0f32, 1.0, 0.0],
                Value::from(vec![
                    Value::symbol("path"),
                    Value::symbol("scatter"),
                    Value::symbol("density"),
                ]),
            )),
        )])
        .unwrap();

        assert_eq!(resolved.get("alpha"), Some(&Value::Number(0.5)));
        assert_eq!(
            resolved.get("linewidth"),
            Some(&Value::from(vec![4.0f32, 1.0, 0.0]))
        );
        let types = resolved.get("seriestype").unwrap().as_list().unwrap();
        assert_eq!(types.len(), 3);
    }

    #[test]
    fn test_marker_expansion() {
        let resolved = expand(vec![(
            "marker",
            Value::from((
                10.0f32,
                0.3f32,
                Value::from(vec![
                    Value::symbol("s"),
                    Value::symbol("o"),
                    Value::symbol("x"),
                ]),
            )),
        )])
        .unwrap();

        assert_eq!(resolved.get("markersize"), Some(&Value::Number(10.0)));
        assert_eq!(resolved.get("alpha"), Some(&Value::Number(0.3)));
        assert!(resolved.contains_key("markershape"));
    }

    #[test]
    fn test_first_declared_rule_wins_on_overlap() {
        // 0.5 satisfies both UnitInterval (alpha) and Numeric (markersize);
        // alpha is declared first and claims it.
        let resolved = expand(vec![("marker", Value::Number(0.5))]).unwrap();
        assert_eq!(resolved.get("alpha"), Some(&Value::Number(0.5)));
        assert!(!resolved.contains_key("markersize"));
    }

    #[test]
    fn test_number_pair_beats_numeric() {
        // (0, 10) matches NumberPair and Numeric; NumberPair is declared
        // first and routes to limits, not ticks.
        let resolved = expand(vec![("xaxis", Value::from((0.0f32, 10.0f32)))]).unwrap();
        assert!(resolved.contains_key("xlim"));
        assert!(!resolved.contains_key("xticks"));
    }

    #[test]
    fn test_order_independent_for_disjoint_predicates() {
        // Label, limits, and scale hit disjoint rules; tuple position is
        // irrelevant.
        let forward = expand(vec![(
            "xaxis",
            Value::from(("lbl", (0.0f32, 10.0f32), Value::symbol("log"))),
        )])
        .unwrap();
        let shuffled = expand(vec![(
            "xaxis",
            Value::from((Value::symbol("log"), "lbl", (0.0f32, 10.0f32))),
        )])
        .unwrap();
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_explicit_wins_over_magic() {
        let resolved = expand(vec![
            ("alpha", Value::Number(0.9)),
            ("marker", Value::from((10.0f32, 0.3f32))),
        ])
        .unwrap();
        assert_eq!(resolved.get("alpha"), Some(&Value::Number(0.9)));
        assert_eq!(resolved.get("markersize"), Some(&Value::Number(10.0)));
    }

    #[test]
    fn test_singleton_treated_as_one_tuple() {
        let resolved = expand(vec![("line", Value::symbol("dash"))]).unwrap();
        assert_eq!(resolved.get("linestyle"), Some(&Value::symbol("dash")));
    }

    #[test]
    fn test_unrecognized_component() {
        let err = expand(vec![("line", Value::from("not-a-line-thing"))]).unwrap_err();
        match err {
            Error::UnrecognizedMagicComponent { group, .. } => assert_eq!(group, "line"),
            other => panic!("expected UnrecognizedMagicComponent, got {other:?}"),
        }
    }

    #[test]
    fn test_bool_normalization() {
        let resolved = expand(vec![("legend", Value::Bool(false))]).unwrap();
        assert_eq!(resolved.get("legend"), Some(&Value::symbol("none")));

        let resolved = expand(vec![("grid", Value::Bool(true))]).unwrap();
        assert_eq!(resolved.get("grid"), Some(&Value::symbol("on")));
    }

    #[test]
    fn test_bool_without_tags_left_alone() {
        let resolved = expand(vec![("xflip", Value::Bool(true))]).unwrap();
        assert_eq!(resolved.get("xflip"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_predicate_unit_interval() {
        assert!(Predicate::UnitInterval.matches(&Value::Number(0.5)));
        assert!(Predicate::UnitInterval.matches(&Value::Number(1.0)));
        assert!(!Predicate::UnitInterval.matches(&Value::Number(4.0)));
        assert!(!Predicate::UnitInterval.matches(&Value::from(vec![4.0f32, 1.0, 0.0])));
        assert!(Predicate::UnitInterval.matches(&Value::from(vec![0.2f32, 1.0, 0.0])));
        assert!(!Predicate::UnitInterval.matches(&Value::from("text")));
    }

    #[test]
    fn test_predicate_symbols() {
        assert!(Predicate::SymbolIn(SERIES_TYPES).matches(&Value::symbol("scatter")));
        assert!(!Predicate::SymbolIn(SERIES_TYPES).matches(&Value::symbol("dash")));
        assert!(Predicate::SymbolAny.matches(&Value::symbol("anything")));
        assert!(!Predicate::SymbolAny.matches(&Value::Number(1.0)));
        assert!(Predicate::SymbolIn(MARKER_SHAPES).matches(&Value::from(vec![
            Value::symbol("s"),
            Value::symbol("o"),
        ])));
    }

    #[test]
    fn test_predicate_numeric_matrix() {
        let m = Value::matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(Predicate::Numeric.matches(&m));
        assert!(!Predicate::UnitInterval.matches(&m));
    }

    #[test]
    fn test_non_magic_attrs_untouched() {
        let resolved = expand(vec![("linewidth", Value::Number(2.0))]).unwrap();
        assert_eq!(resolved.get("linewidth"), Some(&Value::Number(2.0)));
        assert_eq!(resolved.len(), 1);
    }
}
