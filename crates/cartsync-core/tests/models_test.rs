use cartsync_core::codec;
use cartsync_core::identity::{encode_hash_b64, HashB64Encoder};
use cartsync_core::models::*;

fn cart(backing: u8, created_at: i64, owner: u8) -> Cart {
    Cart {
        original_backing_id: BackingId::from(vec![0; 3]),
        cart_backing_id: BackingId::from(vec![backing; 3]),
        document_ref: DocumentRef::from(vec![7; 3]),
        owner: AgentKey::from(vec![owner; 3]),
        status: CartStatus::Active,
        created_at,
        meta: None,
    }
}

fn cell(backing: u8) -> CellReference {
    CellReference::unseeded(CellId::new(
        BackingId::from(vec![backing; 3]),
        AgentKey::from(vec![9; 3]),
    ))
}

#[test]
fn group_id_embeds_encoded_backing_and_timestamp() {
    let c = cart(1, 1_700_000, 5);
    let id = GroupId::for_cart(&HashB64Encoder, &c);
    assert_eq!(
        id.as_str(),
        format!("cart_{}_1700000", encode_hash_b64(&[1, 1, 1]))
    );
}

#[test]
fn identity_key_ignores_owner_and_status() {
    let a = cart(1, 100, 5);
    let mut b = cart(1, 100, 6);
    b.status = CartStatus::Processed;
    assert_eq!(a.identity_key(), b.identity_key());
    assert_ne!(a.identity_key(), cart(1, 101, 5).identity_key());
    assert_ne!(a.identity_key(), cart(2, 100, 5).identity_key());
}

#[test]
fn view_title_uses_creation_time() {
    let view = CartView::new(&HashB64Encoder, cart(1, 100, 5), cell(1));
    assert_eq!(view.title, "Cart 100");
    assert_eq!(view.cell, cell(1));
}

#[test]
fn state_from_views_is_consistent() {
    let views = vec![
        CartView::new(&HashB64Encoder, cart(1, 100, 5), cell(1)),
        CartView::new(&HashB64Encoder, cart(2, 200, 5), cell(2)),
    ];
    let state = ReconciliationState::from_views(views.clone());
    assert!(state.is_consistent());
    assert_eq!(state.len(), 2);
    assert!(!state.loading);
    assert!(state.error.is_none());

    let keys: Vec<_> = state.by_id.keys().cloned().collect();
    assert_eq!(keys, vec![views[0].group_id.clone(), views[1].group_id.clone()]);
    assert_eq!(state.cell(&views[1].group_id), Some(&cell(2)));
}

#[test]
fn duplicated_view_breaks_consistency() {
    let view = CartView::new(&HashB64Encoder, cart(1, 100, 5), cell(1));
    let mut state = ReconciliationState::from_views(vec![view.clone()]);
    state.views.push(view);
    assert!(!state.is_consistent());
}

#[test]
fn failed_state_keeps_content() {
    let views = vec![CartView::new(&HashB64Encoder, cart(1, 100, 5), cell(1))];
    let state = ReconciliationState::from_views(views).begin_loading();
    assert!(state.loading);

    let failed = state.failed("boom");
    assert!(!failed.loading);
    assert_eq!(failed.error.as_deref(), Some("boom"));
    assert_eq!(failed.by_id, state.by_id);
    assert_eq!(failed.cells, state.cells);
    assert_eq!(failed.views, state.views);
}

#[test]
fn begin_loading_clears_error() {
    let state = ReconciliationState::default().failed("old").begin_loading();
    assert!(state.loading);
    assert!(state.error.is_none());
}

#[test]
fn status_machine_is_linear() {
    use CartStatus::*;
    assert!(Active.can_advance_to(CheckedOut));
    assert!(CheckedOut.can_advance_to(Processed));
    assert!(!CheckedOut.can_advance_to(Active));
    assert!(!Processed.can_advance_to(Active));
    assert!(!Active.can_advance_to(Active));
}

#[test]
fn created_at_is_microseconds() {
    let c = cart(1, 1_700_000_000_000_000, 5);
    let at = c.created_at_utc().unwrap();
    assert_eq!(at.timestamp(), 1_700_000_000);
}

#[test]
fn role_round_trips_as_string() {
    let json = serde_json::to_string(&Role::Scanner).unwrap();
    assert_eq!(json, "\"scanner\"");
    let back: Role = serde_json::from_str("\"customer\"").unwrap();
    assert_eq!(back, Role::Owner("customer".into()));
}

#[test]
fn cart_uses_stored_field_names() {
    let mut c = cart(1, 100, 5);
    c.meta = Some(serde_json::json!({"label": "groceries"}));
    let value = serde_json::to_value(&c).unwrap();
    for field in [
        "original_dna_hash",
        "cart_dna_hash",
        "document_hash",
        "owner",
        "status",
        "created_at",
        "meta",
    ] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
    assert_eq!(value["status"], "Active");
}

#[test]
fn cart_entry_decodes_from_msgpack_with_meta() {
    let mut c = cart(3, 300, 4);
    c.meta = Some(serde_json::json!({"items": 2}));
    let bytes = codec::encode(&c).unwrap();
    let back: Cart = codec::decode(&bytes).unwrap();
    assert_eq!(back, c);
}

#[test]
fn clone_info_maps_to_cell_id() {
    let info = CloneInfo {
        backing_id: BackingId::from(vec![4; 3]),
        agent: AgentKey::from(vec![9; 3]),
        created_at: 10,
    };
    assert_eq!(CellReference::unseeded(info.cell_id()), cell(4));
}

#[test]
fn non_present_records_have_no_bytes() {
    for entry in [RecordEntry::Hidden, RecordEntry::NotApplicable, RecordEntry::NotStored] {
        assert!(RawRecord { entry }.entry_bytes().is_none());
    }
    assert_eq!(RawRecord::present(vec![1]).entry_bytes(), Some(&[1u8][..]));
}
