//! The tagged-literal surface (spec §1 "external collaborators", §6 "Tag
//! factories"). Deliberately trivial: these functions just package their
//! arguments, they never parse or touch the DOM.

use crate::value::Value;

/// Distinguishes an `html` result from an `svg` one (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Html,
    Svg,
}

/// `{type, strings, values}` (spec §3 "TemplateResult"). `strings` is a
/// `&'static` slice because Rust has no tagged-template-literal syntax: the
/// caller supplies the statically-interned fragment array directly, which
/// gives the same "pointer identity is call-site identity" cache key JS
/// template literals provide for free (see `SPEC_FULL.md`).
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateResult {
    pub kind: ResultKind,
    pub strings: &'static [&'static str],
    pub values: Vec<Value>,
}

/// Build an HTML [`TemplateResult`]. Pure constructor — no parsing, no DOM
/// access (spec §6).
pub fn html(strings: &'static [&'static str], values: Vec<Value>) -> TemplateResult {
    TemplateResult {
        kind: ResultKind::Html,
        strings,
        values,
    }
}

/// Build an SVG [`TemplateResult`]. Pure constructor — no parsing, no DOM
/// access (spec §6).
pub fn svg(strings: &'static [&'static str], values: Vec<Value>) -> TemplateResult {
    TemplateResult {
        kind: ResultKind::Svg,
        strings,
        values,
    }
}

/// Build the `strings`/`values` pair for a [`TemplateResult`] from a
/// fragment array and a list of interpolated expressions, the way a
/// tagged-template call site would. Thin sugar over [`html`]; does no
/// parsing.
///
/// ```
/// # use webtpl::{html_template, Value};
/// let name = "world";
/// let t = html_template!(["<p>Hello, ", "!</p>"], [Value::from(name)]);
/// ```
#[macro_export]
macro_rules! html_template {
    ([$($s:literal),* $(,)?], [$($v:expr),* $(,)?]) => {
        $crate::html(&[$($s),*], ::std::vec![$($v),*])
    };
}

/// Same as [`html_template!`] but produces an SVG result.
#[macro_export]
macro_rules! svg_template {
    ([$($s:literal),* $(,)?], [$($v:expr),* $(,)?]) => {
        $crate::svg(&[$($s),*], ::std::vec![$($v),*])
    };
}
