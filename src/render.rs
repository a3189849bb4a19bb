//! The render entry point (spec §5). Each container keeps exactly one root
//! `NodePart`, keyed off an expando id stamped onto the container node the
//! first time it is rendered into — the same identity trick the teacher
//! uses to give plain DOM nodes a stable lookup key without a side table
//! keyed by the node itself.

use std::cell::RefCell;

use hashbrown::HashMap;
use wasm_bindgen::{JsValue, UnwrapThrowExt};
use web_sys::Node;

use crate::part::NodePart;
use crate::value::Value;

const ROOT_ID_PROP: &str = "__webtpl_root_id";

thread_local! {
    static NEXT_ROOT_ID: std::cell::Cell<u32> = std::cell::Cell::new(0);
    static ROOTS: RefCell<HashMap<u32, NodePart>> = RefCell::new(HashMap::new());
}

/// Options accepted by [`render_with_options`]. `event_context` is reserved
/// for a future event-listener part (spec §6): it is recorded on every
/// `Part` constructed for this render but never read.
#[derive(Default)]
pub struct RenderOptions {
    pub event_context: Option<JsValue>,
}

/// Render `value` into `container`, reusing the previous render's root part
/// (and, transitively, its template instance and sub-parts) when the
/// container has been rendered into before (spec §5, Data Model Invariant
/// 4: rendering the same container twice dirty-checks rather than
/// rebuilding).
pub fn render(value: impl Into<Value>, container: &Node) {
    render_with_options(value, container, RenderOptions::default());
}

/// Same as [`render`], but with an explicit [`RenderOptions`]. `options` only
/// takes effect the first time `container` is rendered into — later calls
/// reuse the root installed by the first one.
pub fn render_with_options(value: impl Into<Value>, container: &Node, options: RenderOptions) {
    let value = value.into();
    let id = root_id(container);
    ROOTS.with(|roots| {
        let mut roots = roots.borrow_mut();
        let part = roots.entry(id).or_insert_with(|| {
            let anchor = crate::util::document().create_comment(crate::marker::comment_body());
            container.append_child(&anchor).unwrap_throw();
            NodePart::new(anchor, options.event_context)
        });
        part.commit(&value);
    });
}

fn root_id(container: &Node) -> u32 {
    let existing = js_sys::Reflect::get(container, &JsValue::from_str(ROOT_ID_PROP))
        .ok()
        .and_then(|v| v.as_f64());
    if let Some(id) = existing {
        return id as u32;
    }
    let id = NEXT_ROOT_ID.with(|n| {
        let id = n.get();
        n.set(id + 1);
        id
    });
    js_sys::Reflect::set(
        container,
        &JsValue::from_str(ROOT_ID_PROP),
        &JsValue::from_f64(id as f64),
    )
    .unwrap_throw();
    id
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::{html_template, nothing};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_div() -> web_sys::Element {
        crate::util::document().create_element("div").unwrap_throw()
    }

    /// The engine's own marker comments are an implementation detail left
    /// in the live tree (spec §6 "Persistent marker format"); strip them
    /// before asserting on serialized output, same as the source tests do.
    fn strip_markers(html: &str) -> String {
        let mut out = String::new();
        let mut rest = html;
        while let Some(start) = rest.find("<!--") {
            out.push_str(&rest[..start]);
            rest = match rest[start..].find("-->") {
                Some(end) => &rest[start + end + 3..],
                None => "",
            };
        }
        out.push_str(rest);
        out
    }

    #[wasm_bindgen_test]
    fn renders_text_interpolation() {
        let div = test_div();
        render(html_template!(["<p>", "</p>"], [Value::from("hi")]), div.as_ref());
        assert_eq!(strip_markers(&div.inner_html()), "<p>hi</p>");
    }

    #[wasm_bindgen_test]
    fn rerender_reuses_container_root() {
        let div = test_div();
        render(html_template!(["<p>", "</p>"], [Value::from("a")]), div.as_ref());
        let first_id = root_id(div.as_ref());
        render(html_template!(["<p>", "</p>"], [Value::from("b")]), div.as_ref());
        let second_id = root_id(div.as_ref());
        assert_eq!(first_id, second_id);
    }

    #[wasm_bindgen_test]
    fn nothing_clears_prior_render() {
        let div = test_div();
        render(html_template!(["<p>", "</p>"], [Value::from("a")]), div.as_ref());
        render(nothing, div.as_ref());
        assert!(!div.inner_html().contains('p'));
    }

    #[wasm_bindgen_test]
    fn event_context_is_accepted_but_has_no_observable_effect() {
        let div = test_div();
        let options = RenderOptions {
            event_context: Some(JsValue::from_str("ctx")),
        };
        render_with_options(
            html_template!(["<p>", "</p>"], [Value::from("hi")]),
            div.as_ref(),
            options,
        );
        assert_eq!(strip_markers(&div.inner_html()), "<p>hi</p>");
    }
}
