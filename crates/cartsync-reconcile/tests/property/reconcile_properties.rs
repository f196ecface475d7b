use std::collections::HashSet;

use cartsync_core::identity::HashB64Encoder;
use cartsync_core::models::{BackingId, Cart, CellReference, GroupId, ReconciliationState, Role};
use cartsync_reconcile::reconcile::dedup::{Admission, Deduplicator};
use cartsync_reconcile::VisibilityFilter;
use proptest::prelude::*;
use test_fixtures::builders::{cart, cell, identity_of};

const BACKINGS: [&str; 3] = ["x", "y", "z"];
const OWNERS: [&str; 2] = ["alice", "bob"];
const CELLS: [&str; 3] = ["cellA", "cellB", "cellC"];

/// (cell index, cart) pairs in fetch order.
fn arb_sightings() -> impl Strategy<Value = Vec<(usize, Cart)>> {
    prop::collection::vec((0..CELLS.len(), 0..BACKINGS.len(), 0i64..4, 0..OWNERS.len()), 0..24)
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(c, b, t, o)| (c, cart(BACKINGS[b], t, OWNERS[o])))
                .collect()
        })
}

fn cell_at(i: usize) -> CellReference {
    cell(CELLS[i], "alice")
}

fn run(sightings: &[(usize, Cart)], role: &Role, me: &str) -> (Vec<GroupId>, ReconciliationState) {
    let filter = VisibilityFilter::new(role, me, &HashB64Encoder);
    let mut dedup = Deduplicator::new(filter, &HashB64Encoder);
    for (i, c) in sightings {
        dedup.offer(c.clone(), &cell_at(*i));
    }
    let state = ReconciliationState::from_views(dedup.into_views());
    let ids = state.views.iter().map(|v| v.group_id.clone()).collect();
    (ids, state)
}

proptest! {
    #[test]
    fn group_ids_are_injective(
        a in prop::collection::vec(any::<u8>(), 0..12),
        ta in any::<i64>(),
        b in prop::collection::vec(any::<u8>(), 0..12),
        tb in any::<i64>(),
    ) {
        let ga = GroupId::derive(&HashB64Encoder, &BackingId::from(a.clone()), ta);
        let gb = GroupId::derive(&HashB64Encoder, &BackingId::from(b.clone()), tb);
        prop_assert_eq!(ga == gb, a == b && ta == tb);
    }

    #[test]
    fn at_most_one_view_per_identity(sightings in arb_sightings()) {
        let (ids, state) = run(&sightings, &Role::Scanner, &identity_of("alice"));
        let unique: HashSet<_> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());
        prop_assert!(state.is_consistent());
    }

    #[test]
    fn first_sighting_wins(sightings in arb_sightings()) {
        let (_, state) = run(&sightings, &Role::Scanner, &identity_of("alice"));
        for view in &state.views {
            let first = sightings
                .iter()
                .find(|(_, c)| c.identity_key() == view.cart.identity_key())
                .unwrap();
            prop_assert_eq!(&view.cell, &cell_at(first.0));
            prop_assert_eq!(&view.cart, &first.1);
        }
    }

    #[test]
    fn owner_view_is_subset_of_scanner_view(sightings in arb_sightings()) {
        let me = identity_of("alice");
        let (all, _) = run(&sightings, &Role::Scanner, &me);
        let (mine, state) = run(&sightings, &Role::parse("customer"), &me);
        let all: HashSet<_> = all.into_iter().collect();
        prop_assert!(mine.iter().all(|id| all.contains(id)));
        prop_assert!(state.views.iter().all(|v| v.cart.owner.as_bytes() == b"alice"));
    }

    #[test]
    fn re_offering_accepted_carts_changes_nothing(sightings in arb_sightings()) {
        let role = Role::Scanner;
        let me = identity_of("alice");
        let filter = VisibilityFilter::new(&role, &me, &HashB64Encoder);
        let mut dedup = Deduplicator::new(filter, &HashB64Encoder);
        let mut accepted = Vec::new();
        for (i, c) in &sightings {
            if dedup.offer(c.clone(), &cell_at(*i)) == Admission::Accepted {
                accepted.push((*i, c.clone()));
            }
        }
        for (i, c) in accepted {
            prop_assert_eq!(dedup.offer(c, &cell_at(i)), Admission::Duplicate);
        }
    }
}
