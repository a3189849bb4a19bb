//! Diagnostic logging. No `log`/`tracing` dependency: like the sibling
//! packages this crate is grounded on, diagnostics go straight to the
//! browser console.

#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {
        web_sys::console::log_1(&::std::format!($($arg)*).into())
    };
}
