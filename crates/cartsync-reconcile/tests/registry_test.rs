//! Cell registry and clone enumeration tests.

use std::sync::Arc;

use cartsync_core::codec;
use cartsync_core::constants::FN_ENUMERATE_CLONES;
use cartsync_core::identity::HashB64Encoder;
use cartsync_core::models::GroupId;
use cartsync_core::traits::CallTarget;
use cartsync_core::CartError;
use cartsync_reconcile::registry::enumerate_clones;
use cartsync_reconcile::{CellRegistry, IdentityHint};
use test_fixtures::builders::{backing, cell, clone_info};
use test_fixtures::{Reply, ScriptedTransport};

fn registry() -> CellRegistry {
    CellRegistry::new(Arc::new(HashB64Encoder))
}

fn hint(label: &str, created_at: i64) -> IdentityHint {
    IdentityHint::new(backing(label), created_at)
}

// ── register / list ─────────────────────────────────────────────────────

#[test]
fn register_derives_group_id_from_hint() {
    let reg = registry();
    let id = reg.register(cell("A", "alice"), &hint("A", 10)).unwrap();
    assert_eq!(id, GroupId::from("cart_uQQ_10"));
    assert_eq!(reg.get(&id).unwrap(), Some(cell("A", "alice")));
}

#[test]
fn list_preserves_registration_order() {
    let reg = registry();
    reg.register(cell("C", "alice"), &hint("C", 30)).unwrap();
    reg.register(cell("A", "alice"), &hint("A", 10)).unwrap();
    reg.register(cell("B", "alice"), &hint("B", 20)).unwrap();

    let ids: Vec<String> = reg.list().unwrap().into_iter().map(|(id, _)| id.0).collect();
    assert_eq!(ids, ["cart_uQw_30", "cart_uQQ_10", "cart_uQg_20"]);
}

#[test]
fn re_register_replaces_in_place() {
    let reg = registry();
    reg.register(cell("A", "alice"), &hint("A", 10)).unwrap();
    reg.register(cell("B", "alice"), &hint("B", 20)).unwrap();
    let id = reg.register(cell("A", "bob"), &hint("A", 10)).unwrap();

    assert_eq!(reg.len().unwrap(), 2);
    let listed = reg.list().unwrap();
    assert_eq!(listed[0], (id, cell("A", "bob")));
    assert!(!reg.contains_cell(&cell("A", "alice")).unwrap());
}

#[test]
fn register_never_drops_other_entries() {
    let reg = registry();
    for (i, label) in ["A", "B", "C"].iter().enumerate() {
        reg.register(cell(label, "alice"), &hint(label, i as i64)).unwrap();
    }
    assert_eq!(reg.len().unwrap(), 3);
}

// ── replace_all ─────────────────────────────────────────────────────────

#[test]
fn replace_all_drops_missing_entries() {
    let reg = registry();
    reg.register(cell("A", "alice"), &hint("A", 10)).unwrap();
    reg.register(cell("B", "alice"), &hint("B", 20)).unwrap();

    reg.replace_all([(GroupId::from("g-only"), cell("C", "alice"))])
        .unwrap();

    assert_eq!(reg.len().unwrap(), 1);
    assert!(reg.contains_cell(&cell("C", "alice")).unwrap());
    assert!(!reg.contains_cell(&cell("A", "alice")).unwrap());
}

#[test]
fn replace_all_with_nothing_empties_registry() {
    let reg = registry();
    reg.register(cell("A", "alice"), &hint("A", 10)).unwrap();
    reg.replace_all(Vec::new()).unwrap();
    assert!(reg.is_empty().unwrap());
}

#[test]
fn replace_all_from_clones_builds_unseeded_references() {
    let reg = registry();
    let n = reg
        .replace_all_from_clones(&[clone_info("A", "alice", 10), clone_info("B", "bob", 20)])
        .unwrap();

    assert_eq!(n, 2);
    assert_eq!(
        reg.get(&GroupId::from("cart_uQg_20")).unwrap(),
        Some(cell("B", "bob"))
    );
    assert!(reg.list().unwrap().iter().all(|(_, c)| c.network_seed.is_empty()));
}

#[test]
fn replace_all_from_clones_collapses_repeated_rows() {
    let reg = registry();
    let n = reg
        .replace_all_from_clones(&[
            clone_info("A", "alice", 10),
            clone_info("B", "alice", 20),
            clone_info("A", "bob", 10),
        ])
        .unwrap();

    assert_eq!(n, 2);
    let listed = reg.list().unwrap();
    assert_eq!(listed[0].1, cell("A", "bob"), "last row wins, first position kept");
}

#[test]
fn replace_for_an_older_pass_is_refused_once_a_newer_pass_read_the_set() {
    let reg = registry();
    reg.replace_for_pass(2, &[clone_info("A", "alice", 10), clone_info("B", "bob", 20)])
        .unwrap();
    reg.list_for_pass(3).unwrap();

    assert_eq!(reg.replace_for_pass(1, &[clone_info("B", "bob", 20)]).unwrap(), None);
    assert_eq!(reg.len().unwrap(), 2);
    assert_eq!(reg.generation().unwrap(), 3);

    assert_eq!(reg.replace_for_pass(3, &[clone_info("B", "bob", 20)]).unwrap(), Some(1));
}

#[test]
fn listing_for_an_older_pass_keeps_the_newer_stamp() {
    let reg = registry();
    reg.list_for_pass(5).unwrap();
    reg.list_for_pass(2).unwrap();
    assert_eq!(reg.generation().unwrap(), 5);
}

// ── enumerate_clones ────────────────────────────────────────────────────

#[tokio::test]
async fn enumerate_returns_rows_from_base_cell() {
    let transport = ScriptedTransport::new();
    transport.clones(&[clone_info("A", "alice", 10)]);

    let rows = enumerate_clones(&transport, FN_ENUMERATE_CLONES).await.unwrap();
    assert_eq!(rows, vec![clone_info("A", "alice", 10)]);
    assert_eq!(transport.targets_of(FN_ENUMERATE_CLONES), vec![CallTarget::Base]);
}

#[tokio::test]
async fn enumerate_nil_reply_is_empty() {
    let transport = ScriptedTransport::new();
    transport.on_base(FN_ENUMERATE_CLONES, Reply::Bytes(codec::nil_payload()));

    let rows = enumerate_clones(&transport, FN_ENUMERATE_CLONES).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn enumerate_transport_failure_is_registry_unavailable() {
    let transport = ScriptedTransport::new();
    transport.on_base(FN_ENUMERATE_CLONES, Reply::unreachable("base", "offline"));

    let err = enumerate_clones(&transport, FN_ENUMERATE_CLONES)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::RegistryUnavailable { .. }), "{err}");
    assert!(err.to_string().contains("offline"));
}

#[tokio::test]
async fn enumerate_malformed_reply_is_registry_unavailable() {
    let transport = ScriptedTransport::new();
    transport.on_base(FN_ENUMERATE_CLONES, Reply::value(&"not a list"));

    let err = enumerate_clones(&transport, FN_ENUMERATE_CLONES)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::RegistryUnavailable { .. }));
}
