#![cfg(feature = "tracing-basic")]

use crm_core::{init_tracing, CrmConfig};

#[test]
fn tracing_can_only_be_installed_once() {
    let mut config = CrmConfig::new();
    config.set("log.filter", "crm=debug");
    let snap = config.snapshot();

    init_tracing(&snap).expect("first install succeeds");
    assert!(init_tracing(&snap).is_err());
}
