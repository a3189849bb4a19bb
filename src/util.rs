//! `window`/`document` accessors, cached the same way the teacher's root
//! module does: looked up once per thread and reused, since this crate only
//! ever runs on a single DOM-owning thread.

use wasm_bindgen::UnwrapThrowExt;

thread_local! {
    static WINDOW: web_sys::Window = web_sys::window().expect_throw("webtpl requires a `window`");
    static DOCUMENT: web_sys::Document = WINDOW.with(web_sys::Window::document).expect_throw("webtpl requires a `document`");
}

pub fn window() -> web_sys::Window {
    WINDOW.with(Clone::clone)
}

pub fn document() -> web_sys::Document {
    DOCUMENT.with(Clone::clone)
}
