//! Process-wide registry access without an explicit `init()`.
//!
//! Kept in its own test binary so no other test initializes the registry
//! first.

use tpwire::rerror::{registry, Rerror};

#[test]
fn test_global_before_init_builds_default_registry() {
    let reg = registry::global();

    assert_eq!(reg.len(), Rerror::FRAMEWORK.len());
    for r in Rerror::FRAMEWORK.iter() {
        assert_eq!(reg.meta_setting(r.code).as_str(), r.encode());
    }

    // Later init() hands back the same instance
    assert!(std::ptr::eq(reg, registry::init()));
    assert!(std::ptr::eq(reg, registry::global()));
}
