//! The HTML scanner (spec §4.1): a stateful five-mode mini-parser that walks
//! the static fragments of a template result and produces a single HTML
//! string with markers spliced in at every interpolation point.
//!
//! This never touches the DOM and never throws (spec §7): on a pattern it
//! doesn't recognize it simply stays in the current mode, the same
//! "defined-but-surprising" permissiveness a real HTML parser has.

use crate::marker::{self, ATTR_SUFFIX};
use crate::result::ResultKind;

const RAW_TEXT_ELEMENTS: [&str; 3] = ["script", "style", "textarea"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Text,
    Tag,
    Dq,
    Sq,
    Comment,
    Raw(&'static str),
}

/// An attribute currently open inside a `Tag`/`Dq`/`Sq` run. Tracked so we
/// only splice `ATTR_SUFFIX` and push into `attr_names` once we actually
/// learn the attribute is dynamic (i.e. a fragment boundary lands inside
/// its value) rather than on every attribute the scanner passes over.
struct OpenAttr {
    name: &'static str,
    /// Byte offset in the output buffer right after `name`, where
    /// `ATTR_SUFFIX` gets spliced in once the attribute turns out dynamic.
    name_output_pos: usize,
    /// Whether `ATTR_SUFFIX` has already been spliced in for this run
    /// (set the first time a boundary lands inside this attribute's value;
    /// later interpolations in the same quoted run must not splice again).
    suffix_spliced: bool,
}

struct ScanState {
    mode: Mode,
    pending_raw: Option<&'static str>,
    open_attr: Option<OpenAttr>,
}

/// Output of [`scan`]: the annotated HTML source plus the raw attribute-name
/// tokens encountered, in the order the factory will need to pop them.
pub struct ScanOutput {
    pub html: String,
    pub attr_names: Vec<&'static str>,
}

/// Scan `strings` (the static fragments around `strings.len() - 1`
/// interpolations) into a single marker-annotated HTML source.
pub fn scan(strings: &'static [&'static str], kind: ResultKind) -> ScanOutput {
    let mut st = ScanState {
        mode: Mode::Text,
        pending_raw: None,
        open_attr: None,
    };
    let mut html = String::new();
    let mut attr_names = Vec::new();

    let n = strings.len() - 1;
    for (i, s) in strings.iter().copied().enumerate() {
        scan_fragment(s, &mut st, &mut html);
        if i < n {
            insert_marker(&mut st, &mut html, &mut attr_names);
        }
    }

    if kind == ResultKind::Svg {
        html = format!("<svg>{html}</svg>");
    }

    ScanOutput { html, attr_names }
}

/// Decide which marker belongs at the boundary we just reached, given the
/// state the fragment scan left us in (spec §4.1 "Marker insertion rule").
fn insert_marker(st: &mut ScanState, html: &mut String, attr_names: &mut Vec<&'static str>) {
    match st.mode {
        Mode::Dq | Mode::Sq => {
            if let Some(attr) = st.open_attr.as_mut() {
                if !attr.suffix_spliced {
                    html.insert_str(attr.name_output_pos, ATTR_SUFFIX);
                    attr_names.push(attr.name);
                    attr.suffix_spliced = true;
                }
            }
            html.push_str(marker::mark());
        }
        Mode::Tag => {
            if let Some(attr) = st.open_attr.take() {
                // Unquoted value expected directly: `name=` ended the
                // fragment with no opening quote.
                html.insert_str(attr.name_output_pos, ATTR_SUFFIX);
                attr_names.push(attr.name);
                html.push_str(marker::mark());
            } else {
                // No attribute name in play: either immediately after `<`
                // (dynamic tag name, a documented non-goal) or between
                // attributes. Either way, fall back to a plain marker.
                html.push_str(marker::mark());
            }
        }
        Mode::Comment | Mode::Raw(_) => {
            html.push_str(marker::mark());
        }
        Mode::Text => {
            html.push_str(marker::node_marker());
        }
    }
}

fn scan_fragment(s: &'static str, st: &mut ScanState, html: &mut String) {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match st.mode {
            Mode::Text => {
                i = scan_text(s, bytes, i, st, html);
            }
            Mode::Tag => {
                i = scan_tag(s, bytes, i, st, html);
            }
            Mode::Dq => {
                i = scan_quoted(s, bytes, i, st, html, b'"');
            }
            Mode::Sq => {
                i = scan_quoted(s, bytes, i, st, html, b'\'');
            }
            Mode::Comment => {
                i = scan_comment(s, bytes, i, st, html);
            }
            Mode::Raw(name) => {
                i = scan_raw(s, bytes, i, st, html, name);
            }
        }
    }
}

fn scan_text(s: &str, bytes: &[u8], i: usize, st: &mut ScanState, html: &mut String) -> usize {
    if s[i..].starts_with("<!--") {
        html.push_str(&s[i..i + 4]);
        st.mode = Mode::Comment;
        return i + 4;
    }
    if bytes[i] == b'<' {
        if i + 1 == bytes.len() {
            // Bare `<` right at the boundary: the "dynamic tag name" case
            // (spec §7 non-goal, handled permissively).
            html.push('<');
            st.mode = Mode::Tag;
            st.pending_raw = None;
            st.open_attr = None;
            return i + 1;
        }
        if bytes[i + 1].is_ascii_alphabetic() {
            let start = i + 1;
            let mut j = start;
            while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'-') {
                j += 1;
            }
            let tag_name = &s[start..j];
            html.push_str(&s[i..j]);
            st.mode = Mode::Tag;
            st.pending_raw = raw_tag(tag_name);
            st.open_attr = None;
            return j;
        }
    }
    push_char_at(s, i, html)
}

fn raw_tag(name: &str) -> Option<&'static str> {
    RAW_TEXT_ELEMENTS
        .iter()
        .find(|raw| name.eq_ignore_ascii_case(raw))
        .copied()
}

fn scan_tag(s: &'static str, bytes: &[u8], i: usize, st: &mut ScanState, html: &mut String) -> usize {
    match bytes[i] {
        b'>' => {
            html.push('>');
            st.mode = match st.pending_raw.take() {
                Some(raw) => Mode::Raw(raw),
                None => Mode::Text,
            };
            st.open_attr = None;
            i + 1
        }
        b'"' => {
            html.push('"');
            st.mode = Mode::Dq;
            i + 1
        }
        b'\'' => {
            html.push('\'');
            st.mode = Mode::Sq;
            i + 1
        }
        b'=' => {
            html.push('=');
            // Look ahead without consuming: the quote handling above will
            // run on the next byte in the next loop iteration. Here we only
            // need to detect the unquoted-value boundary case, which
            // `insert_marker` handles once `i == bytes.len()`.
            i + 1
        }
        c if c.is_ascii_whitespace() => {
            html.push(c as char);
            st.open_attr = None;
            i + 1
        }
        _ => {
            let start = i;
            let mut j = i;
            while j < bytes.len() && !is_tag_delim(bytes[j]) {
                j += 1;
            }
            let name = &s[start..j];
            html.push_str(name);
            let name_output_pos = html.len();
            st.open_attr = Some(OpenAttr {
                name,
                name_output_pos,
                suffix_spliced: false,
            });
            j
        }
    }
}

fn is_tag_delim(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'=' | b'>' | b'"' | b'\'')
}

fn scan_quoted(
    s: &str,
    bytes: &[u8],
    i: usize,
    st: &mut ScanState,
    html: &mut String,
    quote: u8,
) -> usize {
    let c = bytes[i];
    if c == quote {
        html.push(c as char);
        st.mode = Mode::Tag;
        st.open_attr = None;
        return i + 1;
    }
    push_char_at(s, i, html)
}

fn scan_comment(s: &str, bytes: &[u8], i: usize, st: &mut ScanState, html: &mut String) -> usize {
    if s[i..].starts_with("-->") {
        html.push_str(&s[i..i + 3]);
        st.mode = Mode::Text;
        return i + 3;
    }
    push_char_at(s, i, html)
}

fn scan_raw(
    s: &str,
    bytes: &[u8],
    i: usize,
    st: &mut ScanState,
    html: &mut String,
    name: &'static str,
) -> usize {
    if bytes[i] == b'<'
        && bytes.get(i + 1) == Some(&b'/')
        && s.get(i + 2..).map_or(false, |rest| {
            rest.len() >= name.len() && rest[..name.len()].eq_ignore_ascii_case(name)
        })
    {
        html.push_str("</");
        html.push_str(&s[i + 2..i + 2 + name.len()]);
        st.mode = Mode::Tag;
        return i + 2 + name.len();
    }
    push_char_at(s, i, html)
}

/// Push the full UTF-8 char starting at byte offset `i` and return the
/// offset just past it. Attribute/text/comment content can contain
/// arbitrary Unicode even though the delimiters the scanner looks for
/// (`<`, quotes, `-->`) are all single ASCII bytes.
fn push_char_at(s: &str, i: usize, html: &mut String) -> usize {
    let ch = s[i..].chars().next().expect("valid char boundary");
    html.push(ch);
    i + ch.len_utf8()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_html(strings: &'static [&'static str]) -> ScanOutput {
        scan(strings, ResultKind::Html)
    }

    #[test]
    fn text_interpolation_inserts_node_marker() {
        let out = scan_html(&["<div>", "</div>"]);
        assert_eq!(out.html, format!("<div>{}</div>", marker::node_marker()));
        assert!(out.attr_names.is_empty());
    }

    #[test]
    fn quoted_attribute_single_value() {
        let out = scan_html(&["<div a=\"", "\"></div>"]);
        assert_eq!(
            out.html,
            format!(
                "<div a{}=\"{}\"></div>",
                ATTR_SUFFIX,
                marker::mark()
            )
        );
        assert_eq!(out.attr_names, vec!["a"]);
    }

    #[test]
    fn quoted_attribute_interpolation_run_pushes_name_once() {
        let out = scan_html(&["<div a=\"", " ", "\"></div>"]);
        assert_eq!(out.attr_names, vec!["a"]);
        assert_eq!(
            out.html,
            format!(
                "<div a{}=\"{} {}\"></div>",
                ATTR_SUFFIX,
                marker::mark(),
                marker::mark()
            )
        );
    }

    #[test]
    fn static_attribute_is_untouched() {
        let out = scan_html(&["<div class=\"foo\">", "</div>"]);
        assert!(out.attr_names.is_empty());
        assert!(out.html.contains("class=\"foo\""));
        assert!(!out.html.contains(ATTR_SUFFIX));
    }

    #[test]
    fn boolean_attribute_prefix_travels_through_as_part_of_name() {
        let out = scan_html(&["<div ?hidden=\"", "\"></div>"]);
        assert_eq!(out.attr_names, vec!["?hidden"]);
    }

    #[test]
    fn raw_text_element_interpolation_gets_plain_mark() {
        let out = scan_html(&["<script>a=", "</script>"]);
        assert_eq!(out.html, format!("<script>a={}</script>", marker::mark()));
        assert!(out.attr_names.is_empty());
    }

    #[test]
    fn comment_interpolation_gets_plain_mark() {
        let out = scan_html(&["<!-- ", " -->"]);
        assert_eq!(out.html, format!("<!-- {} -->", marker::mark()));
    }

    #[test]
    fn svg_wraps_whole_output() {
        let out = scan(&["<rect/>"], ResultKind::Svg);
        assert_eq!(out.html, "<svg><rect/></svg>");
    }

    #[test]
    fn unquoted_attribute_value_boundary() {
        let out = scan_html(&["<div .foo=", "></div>"]);
        assert_eq!(out.attr_names, vec![".foo"]);
        assert_eq!(
            out.html,
            format!("<div .foo{}={}></div>", ATTR_SUFFIX, marker::mark())
        );
    }
}
