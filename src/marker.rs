//! Per-process marker tokens shared by the scanner, factory, and instance
//! binder (spec §4.1 "Marker vocabulary").
//!
//! All markers are derived from one random token, chosen so it parses as
//! both a valid HTML element name and a valid attribute name.

use std::sync::OnceLock;

/// Suffix appended to a bound attribute's *name* in the scanned HTML so the
/// template factory can find it again once the browser has parsed it.
pub const ATTR_SUFFIX: &str = "$wt$";

struct Markers {
    mark: String,
    node_marker: String,
    comment_body: String,
}

fn markers() -> &'static Markers {
    static MARKERS: OnceLock<Markers> = OnceLock::new();
    MARKERS.get_or_init(|| {
        let mark = format!("wt${}$", random_token());
        let comment_body = format!("?{mark}");
        let node_marker = format!("<{comment_body}>");
        Markers {
            mark,
            node_marker,
            comment_body,
        }
    })
}

/// The bare marker token. Valid wherever an HTML parser accepts an element
/// or attribute name.
pub fn mark() -> &'static str {
    &markers().mark
}

/// `<?MARK>` — parses as a single bogus-comment node in text position.
pub fn node_marker() -> &'static str {
    &markers().node_marker
}

/// The body text of a marker comment (`NODE_MARKER` without the angle
/// brackets).
pub fn comment_body() -> &'static str {
    &markers().comment_body
}

#[cfg(target_arch = "wasm32")]
fn random_token() -> u64 {
    (js_sys::Math::random() * 1e15) as u64
}

// `js_sys::Math::random` needs a JS engine. Host-side unit tests (the
// scanner and part bookkeeping tests) run on the native target, so fall
// back to a counter folded through `RandomState`'s hasher, which is seeded
// per-process by the standard library.
#[cfg(not(target_arch = "wasm32"))]
fn random_token() -> u64 {
    use std::cell::Cell;
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    thread_local! {
        static COUNTER: Cell<u64> = const { Cell::new(0) };
    }
    let count = COUNTER.with(|c| {
        let v = c.get();
        c.set(v + 1);
        v
    });
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(count);
    hasher.finish()
}
