//! Live, per-instance parts (spec §3 "Part hierarchy", §4.4, §4.5).

mod attribute;
mod node;

pub use attribute::AttributePart;
pub use node::NodePart;

/// A live binding owned by one `TemplateInstance` slot. `Element`/`Comment`
/// descriptors never produce one of these (spec §3).
pub enum Part {
    Node(NodePart),
    Attribute(AttributePart),
}

impl Part {
    pub fn commit(&mut self, values: &[crate::value::Value]) {
        match self {
            Part::Node(p) => p.commit(&values[0]),
            Part::Attribute(p) => p.commit(values),
        }
    }
}
