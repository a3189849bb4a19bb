//! The dynamic value carried by each interpolation, and the two reserved
//! sentinels (spec §6, Data Model Invariant 6).

use std::borrow::Cow;

use crate::result::TemplateResult;

/// A value bound into a template. Rust has no single "any JS value" type, so
/// this closed enum stands in for the primitive/Node/TemplateResult/sentinel
/// union spec.md §3 describes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JS `null`/`undefined` collapse onto this one variant; both coerce to
    /// `""` at commit time (spec §4.4).
    Null,
    Bool(bool),
    Number(f64),
    Text(Cow<'static, str>),
    /// A concrete DOM node to be inserted as-is.
    Node(web_sys::Node),
    /// A nested template result, re-rendered in place.
    Template(TemplateResult),
    /// The `nothing` sentinel (spec §6).
    Nothing,
    /// The `noChange` sentinel (spec §6).
    NoChange,
}

impl Value {
    /// Whether dirty-checking via `==` is meaningful for this value (spec
    /// Data Model Invariant 5). `Node`/`Template`/`NoChange` are excluded:
    /// nodes and templates are handled by identity/instance bookkeeping in
    /// the part commit logic, and `NoChange` is never itself "the previous
    /// value" worth comparing against.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Text(_) | Value::Nothing
        )
    }

    /// Coerce to the string form used for text nodes and attribute
    /// concatenation (spec §4.4, §4.5). `nothing`/`noChange` have no textual
    /// form and must be handled by the caller before reaching here.
    pub fn to_text(&self) -> Cow<'static, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Number(n) => Cow::Owned(format_number(*n)),
            Value::Text(s) => s.clone(),
            Value::Node(_) | Value::Template(_) => {
                debug_assert!(false, "node/template values have no textual form");
                Cow::Borrowed("")
            }
            Value::Nothing | Value::NoChange => {
                debug_assert!(false, "sentinels have no textual form");
                Cow::Borrowed("")
            }
        }
    }
}

/// Mirrors JS `Number.prototype.toString()` closely enough for our
/// purposes: integral floats print without a trailing `.0`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<&'static str> for Value {
    fn from(v: &'static str) -> Self {
        Value::Text(Cow::Borrowed(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Cow::Owned(v))
    }
}

impl From<Cow<'static, str>> for Value {
    fn from(v: Cow<'static, str>) -> Self {
        Value::Text(v)
    }
}

impl From<web_sys::Node> for Value {
    fn from(v: web_sys::Node) -> Self {
        Value::Node(v)
    }
}

impl From<TemplateResult> for Value {
    fn from(v: TemplateResult) -> Self {
        Value::Template(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Build a [`Value`] from any other displayable type by stringifying it
/// immediately (spec §4.4 "other objects... fall through to primitive text
/// path using string coercion"). Kept as an explicit opt-in rather than a
/// blanket `impl<T: Display> From<T>` so that `bool`/`f64`/etc. keep their
/// dedicated variants (needed for `?bool`/`.prop` dispatch) instead of being
/// swallowed by a generic stringifying conversion.
pub fn from_display(v: impl std::fmt::Display) -> Value {
    Value::Text(Cow::Owned(v.to_string()))
}

/// The `nothing` sentinel. Renders as an empty node range, removes a
/// single-value attribute, or removes the whole attribute when it appears
/// in any interpolated segment (spec §4.4, §4.5).
#[allow(non_upper_case_globals)]
pub const nothing: Value = Value::Nothing;

/// The `noChange` sentinel. Leaves the previous DOM effect untouched,
/// including for components inside an attribute interpolation (spec §4.5).
#[allow(non_upper_case_globals)]
pub const noChange: Value = Value::NoChange;
