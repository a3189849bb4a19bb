//! `NodePart`: a binding anchored on a single marker comment, owning
//! whatever it last inserted immediately after that anchor (spec §4.4).

use std::rc::Rc;

use wasm_bindgen::{JsValue, UnwrapThrowExt};
use web_sys::{Comment, Node};

use crate::instance::TemplateInstance;
use crate::result::TemplateResult;
use crate::template::{self, Template};
use crate::value::Value;

enum Committed {
    Initial,
    Nothing,
    Text {
        node: web_sys::Text,
        value: std::borrow::Cow<'static, str>,
    },
    Node {
        node: Node,
    },
    Template {
        template: Rc<Template>,
        instance: TemplateInstance,
        inserted: Vec<Node>,
    },
}

pub struct NodePart {
    anchor: Comment,
    parent: Node,
    committed: Committed,
    /// Carried from `render`'s `RenderOptions` (spec §6), reserved for a
    /// future event-listener part; never read here, but threaded down to
    /// any nested `TemplateInstance`'s own parts.
    event_context: Option<JsValue>,
}

impl NodePart {
    pub fn new(anchor: Comment, event_context: Option<JsValue>) -> Self {
        let parent = anchor
            .parent_node()
            .expect_throw("a node-marker comment must have a parent");
        NodePart {
            anchor,
            parent,
            committed: Committed::Initial,
            event_context,
        }
    }

    /// Apply the six-way commit dispatch: `noChange` is a no-op, `nothing`
    /// clears the range, a `Node` is inserted by identity, a
    /// `TemplateResult` becomes (or updates) a nested `TemplateInstance`,
    /// and everything else coerces to text (spec §4.4).
    pub fn commit(&mut self, value: &Value) {
        match value {
            Value::NoChange => {}
            Value::Nothing => {
                if !matches!(self.committed, Committed::Nothing) {
                    self.clear();
                    self.committed = Committed::Nothing;
                }
            }
            Value::Node(node) => self.commit_node(node.clone()),
            Value::Template(result) => self.commit_template(result),
            primitive => self.commit_text(primitive.to_text()),
        }
    }

    fn commit_text(&mut self, text: std::borrow::Cow<'static, str>) {
        match std::mem::replace(&mut self.committed, Committed::Initial) {
            Committed::Text { node, value } if value == text => {
                self.committed = Committed::Text { node, value };
            }
            Committed::Text { node, .. } => {
                node.set_data(&text);
                self.committed = Committed::Text { node, value: text };
            }
            other => {
                self.clear_committed(other);
                let node = crate::util::document().create_text_node(&text);
                self.insert_nodes(std::slice::from_ref(node.as_ref()));
                self.committed = Committed::Text { node, value: text };
            }
        }
    }

    fn commit_node(&mut self, node: Node) {
        if let Committed::Node { node: current } = &self.committed {
            if current.is_same_node(Some(&node)) {
                return;
            }
        }
        let old = std::mem::replace(&mut self.committed, Committed::Initial);
        self.clear_committed(old);
        self.insert_nodes(std::slice::from_ref(&node));
        self.committed = Committed::Node { node };
    }

    fn commit_template(&mut self, result: &TemplateResult) {
        let tpl = template::get_or_compile(result.strings, result.kind);
        if let Committed::Template {
            template: current,
            instance,
            ..
        } = &mut self.committed
        {
            if Rc::ptr_eq(current, &tpl) {
                instance.update(&result.values);
                return;
            }
        }
        let old = std::mem::replace(&mut self.committed, Committed::Initial);
        self.clear_committed(old);

        let (mut instance, fragment) =
            TemplateInstance::create(tpl.clone(), self.event_context.clone());
        let inserted = collect_children(fragment.as_ref());
        instance.update(&result.values);
        self.insert_nodes(std::slice::from_ref(fragment.as_ref()));
        self.committed = Committed::Template {
            template: tpl,
            instance,
            inserted,
        };
    }

    fn clear(&mut self) {
        let old = std::mem::replace(&mut self.committed, Committed::Initial);
        self.clear_committed(old);
    }

    fn clear_committed(&self, committed: Committed) {
        match committed {
            Committed::Initial | Committed::Nothing => {}
            Committed::Text { node, .. } => self.remove_node(node.as_ref()),
            Committed::Node { node } => self.remove_node(&node),
            Committed::Template { inserted, .. } => {
                for node in inserted {
                    self.remove_node(&node);
                }
            }
        }
    }

    fn remove_node(&self, node: &Node) {
        let _ = self.parent.remove_child(node);
    }

    fn insert_nodes(&self, nodes: &[Node]) {
        let before = self.anchor.next_sibling();
        for node in nodes {
            self.parent
                .insert_before(node, before.as_ref())
                .unwrap_throw();
        }
    }
}

fn collect_children(node: &Node) -> Vec<Node> {
    let list = node.child_nodes();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}
