//! # `webtpl`
//!
//! A small DOM-oriented templating engine: write HTML with interpolations
//! via [`html`]/[`svg`] (or the [`html_template!`]/[`svg_template!`] sugar
//! macros), [`render`] the result into a container, and re-render the same
//! container as often as you like — unchanged subtrees are dirty-checked
//! and left alone rather than rebuilt.
//!
//! ```no_run
//! use webtpl::{html_template, render, Value};
//!
//! let name = "world";
//! let result = html_template!(["<p>Hello, ", "!</p>"], [Value::from(name)]);
//! render(result, webtpl::document().body().unwrap().as_ref());
//! ```
//!
//! ## Feature flags
//!
//! - `wasm-bindgen-interning` (_default_) — enables interning for
//!   `wasm-bindgen` strings, trading a little binary size for faster
//!   marshalling of the attribute/text values this crate writes on every
//!   commit.

mod instance;
mod macros;
mod marker;
mod part;
mod part_descriptor;
mod render;
mod result;
mod scanner;
mod template;
mod util;
mod value;
mod version_registry;

pub use crate::part_descriptor::AttributeKind;
pub use crate::render::{render, render_with_options, RenderOptions};
pub use crate::result::{html, svg, ResultKind, TemplateResult};
pub use crate::util::{document, window};
pub use crate::value::{from_display, noChange, nothing, Value};
pub use crate::version_registry::registered_versions;

/// Re-export of `js-sys` and `wasm-bindgen` for convenience, matching the
/// pattern other DOM-facing crates in this ecosystem use for their own
/// wasm-bindgen re-exports.
pub use {js_sys, wasm_bindgen};
