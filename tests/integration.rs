use wasm_bindgen_test::*;
use web_sys::{Document, Element, Window};

use webtpl::{html_template, noChange, nothing, render, Value};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().unwrap()
}

fn document() -> Document {
    window().document().unwrap()
}

/// A fresh, unattached container per test: unlike the DOM-wide single
/// `#test-container` pattern, a detached element needs no cleanup between
/// tests and keeps each test's root-part state independent.
fn test_div() -> Element {
    document().create_element("div").unwrap()
}

/// The engine leaves its own marker comments in the live tree (spec §6);
/// strip them before asserting on serialized output.
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
fn text_interpolation() {
    let div = test_div();
    render(
        html_template!(["<div>", "</div>"], [Value::from("A")]),
        div.as_ref(),
    );
    assert_eq!(strip_markers(&div.inner_html()), "<div>A</div>");
}

#[wasm_bindgen_test]
fn multi_value_attribute_interpolation() {
    let div = test_div();
    render(
        html_template!(
            ["<div a=\"", " ", "\"></div>"],
            [Value::from("x"), Value::from("y")]
        ),
        div.as_ref(),
    );
    assert_eq!(strip_markers(&div.inner_html()), "<div a=\"x y\"></div>");
}

#[wasm_bindgen_test]
fn boolean_attributes() {
    let div = test_div();
    render(
        html_template!(
            ["<div ?hidden=", " ?open=", "></div>"],
            [Value::from(false), Value::from(true)]
        ),
        div.as_ref(),
    );
    assert_eq!(strip_markers(&div.inner_html()), "<div open=\"\"></div>");
}

#[wasm_bindgen_test]
fn property_binding_keeps_native_type() {
    let div = test_div();
    render(
        html_template!(["<div .foo=\"", "\"></div>"], [Value::from(123i64)]),
        div.as_ref(),
    );
    let child = div.query_selector("div").unwrap().unwrap();
    let foo = js_sys::Reflect::get(&child, &"foo".into()).unwrap();
    assert_eq!(foo.as_f64(), Some(123.0));
}

#[wasm_bindgen_test]
fn swapping_templates_replaces_the_rendered_element() {
    let div = test_div();
    render(
        html_template!(["<div>", "</div>"], [Value::from("x")]),
        div.as_ref(),
    );
    assert!(div.query_selector("div").unwrap().is_some());

    render(
        html_template!(["<span>", "</span>"], [Value::from("x")]),
        div.as_ref(),
    );
    assert!(div.query_selector("div").unwrap().is_none());
    assert!(div.query_selector("span").unwrap().is_some());
}

#[wasm_bindgen_test]
fn raw_text_element_interpolation() {
    let div = test_div();
    render(
        html_template!(["<script>a=", "</script>"], [Value::from("v")]),
        div.as_ref(),
    );
    assert_eq!(strip_markers(&div.inner_html()), "<script>a=v</script>");
}

#[wasm_bindgen_test]
fn interpolated_nothing_removes_the_whole_attribute() {
    let div = test_div();
    render(
        html_template!(
            ["<div attribute=\"it's ", "\"></div>"],
            [nothing]
        ),
        div.as_ref(),
    );
    assert_eq!(strip_markers(&div.inner_html()), "<div></div>");
}

#[wasm_bindgen_test]
fn svg_namespace_and_case_sensitive_attribute_names() {
    // The literal markup's own `<svg>` root tag is what triggers the
    // browser's foreign-content parsing, independent of whether `html` or
    // `svg` built the result (spec §8 scenario 8 uses `html` for exactly
    // this reason).
    let div = test_div();
    render(
        html_template!(
            ["<svg viewBox=\"0 0 ", " ", "\"></svg>"],
            [Value::from(100i64), Value::from(100i64)]
        ),
        div.as_ref(),
    );
    let svg = div.query_selector("svg").unwrap().unwrap();
    assert_eq!(svg.get_attribute("viewBox").as_deref(), Some("0 0 100 100"));
    assert_eq!(svg.namespace_uri().as_deref(), Some("http://www.w3.org/2000/svg"));
}

#[wasm_bindgen_test]
fn no_change_preserves_the_prior_dom_effect() {
    let div = test_div();
    render(
        html_template!(["<div a=\"", "\">", "</div>"], [Value::from("x"), Value::from("hi")]),
        div.as_ref(),
    );
    render(
        html_template!(["<div a=\"", "\">", "</div>"], [noChange, Value::from("hi")]),
        div.as_ref(),
    );
    let child = div.query_selector("div").unwrap().unwrap();
    assert_eq!(child.get_attribute("a").as_deref(), Some("x"));
}

#[wasm_bindgen_test]
fn rerendering_the_same_template_reuses_the_instance() {
    let div = test_div();
    render(
        html_template!(["<p>", "</p>"], [Value::from("a")]),
        div.as_ref(),
    );
    let first = div.query_selector("p").unwrap().unwrap();
    render(
        html_template!(["<p>", "</p>"], [Value::from("b")]),
        div.as_ref(),
    );
    let second = div.query_selector("p").unwrap().unwrap();
    assert!(first.is_same_node(Some(&second)));
    assert_eq!(strip_markers(&div.inner_html()), "<p>b</p>");
}
