//! Module-scope version registry (spec §6 "Module-scope registry"): lets
//! two incompatible copies of this crate loaded into the same page detect
//! each other. Not part of the hot path.

use std::cell::RefCell;

/// This build's version, read from the crate's own manifest at compile
/// time — the Rust substitute for a bundler-injected version string.
const VERSION: &str = env!("CARGO_PKG_VERSION");

thread_local! {
    // Pre-populated with this build's own version rather than pushed to on
    // an explicit "module load" step: `thread_local!` already lazily runs
    // its initializer on first access, the same trick every other cache in
    // this crate (`TEMPLATE_CACHE`, `ROOTS`) relies on for lazy init.
    static VERSIONS: RefCell<Vec<&'static str>> = RefCell::new(vec![VERSION]);
}

/// Record a second copy's version string, e.g. one loaded as a transitive
/// dependency under a different semver range. Exists so embedders that
/// detect a mismatch (by inspecting `registered_versions()`) have a way to
/// make the mismatch visible to a later caller too.
pub fn register_version(version: &'static str) {
    VERSIONS.with(|v| {
        let mut v = v.borrow_mut();
        if !v.contains(&version) {
            v.push(version);
        }
    });
}

/// All distinct versions of this crate registered in this process so far.
/// More than one entry means two incompatible copies were loaded into the
/// same page.
pub fn registered_versions() -> Vec<&'static str> {
    VERSIONS.with(|v| v.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_this_crate_s_own_version() {
        assert_eq!(registered_versions(), vec![VERSION]);
    }

    #[test]
    fn registering_the_same_version_twice_does_not_duplicate() {
        register_version(VERSION);
        assert_eq!(registered_versions(), vec![VERSION]);
    }
}
