//! `TemplateInstance`: one concrete clone of a `Template`, rewalked to bind
//! live `Part`s onto its nodes (spec §4.3).

use std::rc::Rc;

use hashbrown::HashMap;
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt};
use web_sys::{Comment, DocumentFragment, Element, Node};

use crate::part::{AttributePart, NodePart, Part};
use crate::part_descriptor::{AttributeKind, NodeIndex, TemplatePart};
use crate::template::{Template, WALKER_SHOW_MASK};
use crate::value::Value;

pub struct TemplateInstance {
    template: Rc<Template>,
    parts: Vec<Option<Part>>,
}

impl TemplateInstance {
    /// Clone the template's prototype content and rewalk it with the same
    /// tree walker shape the factory used, pairing each `TemplatePart` with
    /// the actual node at its recorded index (spec §4.3 steps 1-2).
    /// `event_context` comes from `RenderOptions` and is handed to every
    /// constructed `Part` unread, reserved for a future event-listener part.
    pub fn create(
        template: Rc<Template>,
        event_context: Option<JsValue>,
    ) -> (TemplateInstance, DocumentFragment) {
        let content = template.clone_content();
        let wanted: hashbrown::HashSet<NodeIndex> =
            template.parts.iter().map(TemplatePart::index).collect();

        let mut nodes: HashMap<NodeIndex, Node> = HashMap::new();
        {
            let walker = crate::util::document()
                .create_tree_walker_with_what_to_show(content.as_ref(), WALKER_SHOW_MASK)
                .unwrap_throw();
            let mut index: NodeIndex = 0;
            while let Some(node) = walker.next_node().unwrap_throw() {
                if wanted.contains(&index) {
                    nodes.insert(index, node);
                }
                index += 1;
            }
        }

        let parts = template
            .parts
            .iter()
            .map(|descriptor| build_part(descriptor, &nodes, &event_context))
            .collect();

        (TemplateInstance { template, parts }, content)
    }

    /// Thread `values` across the instance's parts in declaration order,
    /// each consuming as many entries as its descriptor's `value_count`
    /// (spec §4.3 step 3, the "running bindingIndex" cursor).
    pub fn update(&mut self, values: &[Value]) {
        let mut cursor = 0;
        for (descriptor, part) in self.template.parts.iter().zip(self.parts.iter_mut()) {
            let n = descriptor.value_count();
            let slice = &values[cursor..cursor + n];
            cursor += n;
            if let Some(part) = part {
                part.commit(slice);
            }
        }
    }
}

fn build_part(
    descriptor: &TemplatePart,
    nodes: &HashMap<NodeIndex, Node>,
    event_context: &Option<JsValue>,
) -> Option<Part> {
    match descriptor {
        TemplatePart::Node { index } => {
            let comment: Comment = nodes
                .get(index)
                .expect_throw("instance and template disagree on node positions")
                .clone()
                .unchecked_into();
            Some(Part::Node(NodePart::new(comment, event_context.clone())))
        }
        TemplatePart::Attribute {
            kind: AttributeKind::Event,
            ..
        } => None,
        TemplatePart::Attribute {
            index,
            name,
            strings,
            kind,
        } => {
            let element: Element = nodes
                .get(index)
                .expect_throw("instance and template disagree on node positions")
                .clone()
                .unchecked_into();
            Some(Part::Attribute(AttributePart::new(
                element,
                name.clone(),
                *kind,
                strings.clone(),
                event_context.clone(),
            )))
        }
        TemplatePart::Element { .. } | TemplatePart::Comment { .. } => None,
    }
}
