//! Golden dataset tests for reconciliation.
//!
//! Each scenario scripts enumeration and per-cell replies, runs a full
//! refresh through `CartStore`, and compares the committed views and pass
//! counters with the expected outcome.

use cartsync_core::config::CartSyncConfig;
use cartsync_reconcile::CartStore;
use test_fixtures::builders::agent;
use test_fixtures::{list_fixtures, load_fixture, ReconcileScenario};

async fn check(path: &str) {
    let scenario: ReconcileScenario = load_fixture(path);
    let transport = scenario.transport();
    let store = CartStore::new(
        transport,
        scenario.self_identity(),
        scenario.role(),
        CartSyncConfig::default(),
    );

    let report = store.refresh().await.unwrap();
    assert!(report.committed, "{path}: pass was not committed");

    let state = store.state();
    let expected = &scenario.expected;
    let got: Vec<(&str, String, Vec<u8>)> = state
        .views
        .iter()
        .map(|v| {
            let from = String::from_utf8(v.cell.cell_id.backing_id().as_bytes().to_vec()).unwrap();
            (v.group_id.as_str(), from, v.cart.owner.as_bytes().to_vec())
        })
        .collect();
    let want: Vec<(&str, String, Vec<u8>)> = expected
        .views
        .iter()
        .map(|v| {
            (
                v.group_id.as_str(),
                v.from_cell.clone(),
                agent(&v.owner).as_bytes().to_vec(),
            )
        })
        .collect();
    assert_eq!(got, want, "{path}: {}", scenario.description);

    assert!(state.is_consistent(), "{path}: inconsistent snapshot");
    assert_eq!(state.error, None, "{path}");
    assert_eq!(report.stats.cells_attempted, scenario.registry.len(), "{path}");
    assert_eq!(report.stats.cells_failed, expected.cells_failed, "{path}");
    assert_eq!(report.stats.records_skipped, expected.records_skipped, "{path}");
    assert_eq!(
        report.stats.duplicates_discarded, expected.duplicates_discarded,
        "{path}"
    );
    assert_eq!(report.stats.hidden, expected.hidden, "{path}");
}

#[tokio::test]
async fn golden_owner_view_two_cells() {
    check("golden/reconcile/owner_view_two_cells.json").await;
}

#[tokio::test]
async fn golden_partial_failure() {
    check("golden/reconcile/partial_failure.json").await;
}

#[tokio::test]
async fn golden_scanner_sees_all() {
    check("golden/reconcile/scanner_sees_all.json").await;
}

#[tokio::test]
async fn golden_undecodable_records() {
    check("golden/reconcile/undecodable_records.json").await;
}

#[tokio::test]
async fn golden_hidden_then_duplicate() {
    check("golden/reconcile/hidden_then_duplicate.json").await;
}

#[test]
fn every_golden_file_has_a_test() {
    assert_eq!(list_fixtures("golden/reconcile").len(), 5);
}
