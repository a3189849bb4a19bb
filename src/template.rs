//! The template factory and process-wide template cache (spec §4.2, and the
//! "Template cache" row of §2).

use std::rc::Rc;

use hashbrown::HashMap;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Comment, DocumentFragment, Element, Node};

use crate::marker;
use crate::part_descriptor::{parse_attr_prefix, NodeIndex, TemplatePart};
use crate::result::ResultKind;
use crate::scanner;
use crate::util::document;

const RAW_TEXT_TAGS: [&str; 3] = ["SCRIPT", "STYLE", "TEXTAREA"];
// web-sys's generated `NodeFilter` binding exposes it only as a dictionary
// type (no `SHOW_*` associated consts), so the DOM spec's constant values
// are inlined here: https://dom.spec.whatwg.org/#dom-nodefilter-show_element
const SHOW_ELEMENT: u32 = 0x1;
const SHOW_COMMENT: u32 = 0x80;
pub(crate) const WALKER_SHOW_MASK: u32 = SHOW_ELEMENT | SHOW_COMMENT;

/// Identifies a compiled [`Template`] by the pointer identity of its
/// `strings` slice (spec Data Model Invariant 1): the direct analogue of a
/// JS tagged-template literal's `strings` identity, since `&'static`
/// fragment arrays are interned once per call site.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    ptr: *const &'static str,
    len: usize,
    kind: ResultKind,
}

impl TemplateKey {
    fn new(strings: &'static [&'static str], kind: ResultKind) -> Self {
        TemplateKey {
            ptr: strings.as_ptr(),
            len: strings.len(),
            kind,
        }
    }
}

/// A compiled prototype: an inert document fragment plus its ordered part
/// descriptors (spec §3 "Template").
pub struct Template {
    pub kind: ResultKind,
    content: DocumentFragment,
    pub parts: Vec<TemplatePart>,
}

impl Template {
    /// Deep-clone the inert content for a new instance (spec §4.3 step 1).
    pub fn clone_content(&self) -> DocumentFragment {
        self.content
            .clone_node_with_deep(true)
            .unwrap_throw()
            .unchecked_into()
    }
}

thread_local! {
    static TEMPLATE_CACHE: std::cell::RefCell<HashMap<TemplateKey, Rc<Template>>> =
        std::cell::RefCell::new(HashMap::new());
}

/// Look up the cached `Template` for `strings`, compiling and inserting one
/// if this is the first time this call site has rendered (spec Data Model
/// Invariant 1: "a Template is produced at most once per distinct `strings`
/// identity").
pub fn get_or_compile(strings: &'static [&'static str], kind: ResultKind) -> Rc<Template> {
    let key = TemplateKey::new(strings, kind);
    if let Some(cached) = TEMPLATE_CACHE.with(|c| c.borrow().get(&key).cloned()) {
        return cached;
    }
    crate::console_log!("webtpl: compiling new template ({} fragments)", strings.len());
    let compiled = Rc::new(compile(strings, kind));
    TEMPLATE_CACHE.with(|c| c.borrow_mut().insert(key, compiled.clone()));
    compiled
}

fn compile(strings: &'static [&'static str], kind: ResultKind) -> Template {
    let scanned = scanner::scan(strings, kind);
    let mut attr_names = scanned.attr_names.into_iter();

    let template_el: web_sys::HtmlTemplateElement = document()
        .create_element("template")
        .unwrap_throw()
        .unchecked_into();
    template_el.set_inner_html(&scanned.html);

    let content = template_el.content();
    if kind == ResultKind::Svg {
        unwrap_svg_root(&content);
    }

    let parts = walk(&content, &mut attr_names);

    Template {
        kind,
        content,
        parts,
    }
}

/// Browsers route `<template>` content parsed from `<svg>...</svg>` markup
/// through the foreign-content algorithm so descendants land in the SVG
/// namespace; we then discard the wrapper element itself, keeping only its
/// children (spec §4.2 step 1).
fn unwrap_svg_root(content: &DocumentFragment) {
    let svg_el = content.first_child().unwrap_throw();
    while let Some(child) = svg_el.first_child() {
        content.append_child(&child).unwrap_throw();
    }
    content.remove_child(&svg_el).unwrap_throw();
}

fn walk(root: &Node, attr_names: &mut std::vec::IntoIter<&'static str>) -> Vec<TemplatePart> {
    let walker = document()
        .create_tree_walker_with_what_to_show(root, WALKER_SHOW_MASK)
        .unwrap_throw();
    let mut parts = Vec::new();
    let mut index: NodeIndex = 0;
    while let Some(node) = walker.next_node().unwrap_throw() {
        match node.node_type() {
            Node::ELEMENT_NODE => {
                process_element(node.unchecked_ref::<Element>(), index, attr_names, &mut parts);
            }
            Node::COMMENT_NODE => {
                process_comment(node.unchecked_ref::<Comment>(), index, &mut parts);
            }
            _ => {}
        }
        index += 1;
    }
    parts
}

fn process_element(
    el: &Element,
    index: NodeIndex,
    attr_names: &mut std::vec::IntoIter<&'static str>,
    parts: &mut Vec<TemplatePart>,
) {
    if is_raw_text_tag(&el.tag_name()) {
        split_raw_text(el);
        return;
    }

    // Snapshot the attribute name list before mutating: removing an
    // attribute shifts the live `NamedNodeMap`, so we iterate a plain
    // `Vec` instead of rewinding a live iterator.
    let names: Vec<String> = {
        let map = el.attributes();
        (0..map.length())
            .filter_map(|i| map.item(i))
            .map(|attr| attr.name())
            .collect()
    };

    for name in names {
        if name == marker::mark() {
            el.remove_attribute(&name).unwrap_throw();
            parts.push(TemplatePart::Element { index });
            continue;
        }
        if !name.ends_with(marker::ATTR_SUFFIX) {
            continue;
        }
        // The raw attribute name (with its `.`/`?`/`@` prefix, if any) comes
        // from `attr_names`, not from stripping the suffix here: the name
        // the browser parsed may have been case-folded.
        let value = el.get_attribute(&name).unwrap_or_default();
        el.remove_attribute(&name).unwrap_throw();

        let raw_name = attr_names
            .next()
            .expect("scanner and factory disagree on attribute binding count");
        let (kind, residual) = parse_attr_prefix(raw_name);

        let statics: Vec<String> = value
            .split(marker::mark())
            .map(|s| s.to_string())
            .collect();
        let strings = if statics.len() == 2 && statics[0].is_empty() && statics[1].is_empty() {
            None
        } else {
            Some(statics)
        };

        parts.push(TemplatePart::Attribute {
            index,
            name: residual.to_string(),
            strings,
            kind,
        });
    }
}

fn is_raw_text_tag(tag_name: &str) -> bool {
    RAW_TEXT_TAGS.contains(&tag_name.to_ascii_uppercase().as_str())
}

/// Rebuild a raw-text element's single text child as a run of
/// `Text`/`Comment` children, one marker comment per interpolation (spec
/// §4.2 "Raw-text element").
///
/// The freshly created marker comments are given the same body the
/// scanner's `<?MARK>` node markers use, so the tree walker's normal
/// comment handling (`process_comment`) recognizes and anchors them without
/// needing a second, index-synchronized code path here.
fn split_raw_text(el: &Element) {
    let text = el.text_content().unwrap_or_default();
    if !text.contains(marker::mark()) {
        return;
    }
    let segments: Vec<&str> = text.split(marker::mark()).collect();
    el.set_text_content(None);
    let doc = document();
    for segment in &segments[..segments.len() - 1] {
        if !segment.is_empty() {
            el.append_child(&doc.create_text_node(segment)).unwrap_throw();
        }
        el.append_child(&doc.create_comment(marker::comment_body()))
            .unwrap_throw();
    }
    if let Some(last) = segments.last() {
        if !last.is_empty() {
            el.append_child(&doc.create_text_node(last)).unwrap_throw();
        }
    }
}

fn process_comment(comment: &Comment, index: NodeIndex, parts: &mut Vec<TemplatePart>) {
    let data = comment.data();
    if data == marker::comment_body() {
        parts.push(TemplatePart::Node { index });
        return;
    }
    // Bindings strictly inside an authored `<!-- ... -->` comment are
    // present but inert (spec §4.2, §7): they still consume a value slot
    // each so later bindings keep their correct positional value.
    let occurrences = data.matches(marker::mark()).count();
    for _ in 0..occurrences {
        parts.push(TemplatePart::Comment { index });
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::result::ResultKind;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn compiles_node_and_attribute_parts() {
        let strings: &'static [&'static str] = &["<div a=\"", "\">", "</div>"];
        let t = compile(strings, ResultKind::Html);
        assert_eq!(t.parts.len(), 2);
    }

    #[wasm_bindgen_test]
    fn svg_fragment_gets_svg_namespace() {
        let strings: &'static [&'static str] = &["<circle r=\"5\"></circle>"];
        let t = compile(strings, ResultKind::Svg);
        let content = t.clone_content();
        let circle = content.first_child().unwrap();
        use wasm_bindgen::JsCast;
        let circle: Element = circle.unchecked_into();
        assert_eq!(
            circle.namespace_uri().as_deref(),
            Some("http://www.w3.org/2000/svg")
        );
    }

    #[wasm_bindgen_test]
    fn cache_hits_on_repeat_call() {
        static STRINGS: &[&str] = &["<p>", "</p>"];
        let a = get_or_compile(STRINGS, ResultKind::Html);
        let b = get_or_compile(STRINGS, ResultKind::Html);
        assert!(Rc::ptr_eq(&a, &b));
    }
}
