//! Static descriptors produced once per compiled `Template` (spec §3
//! "TemplatePart", §4.2).

/// The binding rule for an `ATTRIBUTE` descriptor, selected by the single
/// leading prefix character on the authored attribute name (spec §6
/// "Attribute-name prefix grammar").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// No prefix: `setAttribute`/`removeAttribute`.
    Attr,
    /// `.name` — assign to the element's JS property.
    Property,
    /// `?name` — presence-only attribute.
    Boolean,
    /// `@name` — reserved for event listeners. The factory records this
    /// kind but the binder never constructs a live part for it (spec §6,
    /// §9: declared, not activated).
    Event,
}

/// The node index a descriptor anchors to is this node's zero-based
/// position in depth-first pre-order of the inert fragment, as visited by
/// the shared tree walker (spec §3).
pub type NodeIndex = u32;

#[derive(Debug, Clone)]
pub enum TemplatePart {
    Attribute {
        index: NodeIndex,
        name: String,
        /// `None` for a single-value binding; `Some(statics)` (length
        /// `k + 1`) for an interpolation of `k` values.
        strings: Option<Vec<String>>,
        kind: AttributeKind,
    },
    Node {
        index: NodeIndex,
    },
    /// Reserved; no binding class is attached to it yet (spec §3, §9).
    Element {
        index: NodeIndex,
    },
    /// An inactive placeholder: it keeps the value-index ledger in sync
    /// without producing a live binding (spec §4.2).
    Comment {
        index: NodeIndex,
    },
}

impl TemplatePart {
    pub fn index(&self) -> NodeIndex {
        match self {
            TemplatePart::Attribute { index, .. }
            | TemplatePart::Node { index }
            | TemplatePart::Element { index }
            | TemplatePart::Comment { index } => *index,
        }
    }

    /// How many entries of the dynamic `values` array this descriptor
    /// consumes (spec §4.2 "the running `bindingIndex`").
    pub fn value_count(&self) -> usize {
        match self {
            TemplatePart::Attribute {
                strings: Some(statics),
                ..
            } => statics.len() - 1,
            TemplatePart::Attribute { strings: None, .. } => 1,
            TemplatePart::Node { .. } | TemplatePart::Element { .. } | TemplatePart::Comment { .. } => 1,
        }
    }
}

/// Parse the single leading prefix character off a raw attribute name as
/// authored (spec §6). Returns the residual name with the prefix stripped.
pub fn parse_attr_prefix(raw: &str) -> (AttributeKind, &str) {
    let mut chars = raw.chars();
    match chars.next() {
        Some('.') => (AttributeKind::Property, &raw[1..]),
        Some('?') => (AttributeKind::Boolean, &raw[1..]),
        Some('@') => (AttributeKind::Event, &raw[1..]),
        _ => (AttributeKind::Attr, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_parsing() {
        assert_eq!(parse_attr_prefix(".foo"), (AttributeKind::Property, "foo"));
        assert_eq!(parse_attr_prefix("?foo"), (AttributeKind::Boolean, "foo"));
        assert_eq!(parse_attr_prefix("@foo"), (AttributeKind::Event, "foo"));
        assert_eq!(parse_attr_prefix("foo"), (AttributeKind::Attr, "foo"));
    }

    #[test]
    fn value_counts() {
        let attr = TemplatePart::Attribute {
            index: 0,
            name: "a".into(),
            strings: Some(vec!["".into(), " ".into(), "".into()]),
            kind: AttributeKind::Attr,
        };
        assert_eq!(attr.value_count(), 2);

        let single = TemplatePart::Attribute {
            index: 0,
            name: "a".into(),
            strings: None,
            kind: AttributeKind::Attr,
        };
        assert_eq!(single.value_count(), 1);

        assert_eq!(TemplatePart::Node { index: 1 }.value_count(), 1);
        assert_eq!(TemplatePart::Comment { index: 2 }.value_count(), 1);
    }
}
