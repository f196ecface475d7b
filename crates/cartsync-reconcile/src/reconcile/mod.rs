//! The reconciliation pass.
//!
//! 1. Mark the published state as loading.
//! 2. Fetch every registered cell in registry order. A failing cell is
//!    logged and skipped.
//! 3. Deduplicate by `(cartBackingId, createdAt)`, first seen wins, then
//!    apply the visibility filter.
//! 4. Derive `by_id` and `cells` from the accepted views only.
//! 5. Commit the whole snapshot at once.
//!
//! Fetches may overlap up to `fetch_concurrency`, but results are consumed in
//! registry order so the dedup winner never depends on timing.

pub mod dedup;

use futures::stream::{self, StreamExt};

use cartsync_core::config::CartSyncConfig;
use cartsync_core::errors::CartResult;
use cartsync_core::models::{CellReference, GroupId, PassStats, ReconciliationState, Role};
use cartsync_core::traits::{IEntryDecoder, IIdentityEncoder, ICellTransport};
use cartsync_observability::events;

use crate::fetcher::CartFetcher;
use crate::publish::StatePublisher;
use crate::registry::CellRegistry;
use crate::visibility::VisibilityFilter;

use self::dedup::Deduplicator;

/// State and counters produced by [`ReconciliationLoop::run`].
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub state: ReconciliationState,
    pub stats: PassStats,
}

/// What a committed (or discarded) pass reports to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    pub stats: PassStats,
    /// `false` when a newer pass had already committed.
    pub committed: bool,
}

pub struct ReconciliationLoop<'a, T> {
    transport: &'a T,
    decoder: &'a dyn IEntryDecoder,
    encoder: &'a dyn IIdentityEncoder,
    config: &'a CartSyncConfig,
}

impl<'a, T: ICellTransport> ReconciliationLoop<'a, T> {
    pub fn new(
        transport: &'a T,
        decoder: &'a dyn IEntryDecoder,
        encoder: &'a dyn IIdentityEncoder,
        config: &'a CartSyncConfig,
    ) -> Self {
        Self {
            transport,
            decoder,
            encoder,
            config,
        }
    }

    /// Fetch, deduplicate, and filter over a registry snapshot.
    /// Never fails: cell-level failures are absorbed and counted.
    pub async fn run(
        &self,
        snapshot: &[(GroupId, CellReference)],
        role: &Role,
        self_identity: &str,
        generation: u64,
    ) -> PassOutcome {
        events::pass_started(generation, snapshot.len(), role.as_str());

        let fetcher = CartFetcher::new(
            self.transport,
            self.decoder,
            &self.config.remote.read_all_carts,
        )
        .with_timeout(self.config.reconcile.fetch_timeout());
        let fetcher = &fetcher;

        // `buffered` yields in input order regardless of completion order.
        let reports: Vec<_> = stream::iter(snapshot)
            .map(|(group_id, cell)| async move { (group_id, cell, fetcher.fetch(cell).await) })
            .buffered(self.config.reconcile.fetch_concurrency.max(1))
            .collect()
            .await;

        let filter = VisibilityFilter::new(role, self_identity, self.encoder);
        let mut dedup = Deduplicator::new(filter, self.encoder);
        let mut stats = PassStats {
            generation,
            cells_attempted: snapshot.len(),
            ..PassStats::default()
        };

        for (group_id, cell, report) in reports {
            stats.records_skipped += report.skipped;
            if let Some(err) = report.failure {
                stats.cells_failed += 1;
                events::cell_fetch_failed(group_id.as_str(), &cell.to_string(), &err.to_string());
                continue;
            }
            for cart in report.carts {
                dedup.offer(cart, cell);
            }
        }

        stats.duplicates_discarded = dedup.duplicates();
        stats.hidden = dedup.hidden();
        let views = dedup.into_views();
        stats.views_accepted = views.len();

        PassOutcome {
            state: ReconciliationState::from_views(views),
            stats,
        }
    }

    /// Run a full pass against the registry and commit it.
    ///
    /// `generation` must come from [`StatePublisher::begin_pass`]. If the
    /// registry cannot be read, the published error is set, the previous
    /// content is kept, and the error is returned.
    pub async fn run_and_commit(
        &self,
        generation: u64,
        registry: &CellRegistry,
        publisher: &StatePublisher,
        role: &Role,
        self_identity: &str,
    ) -> CartResult<PassReport> {
        let snapshot = match registry.list_for_pass(generation) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                events::pass_failed(generation, &e.to_string());
                publisher.fail(generation, &e);
                return Err(e);
            }
        };

        let outcome = self.run(&snapshot, role, self_identity, generation).await;
        let committed = publisher.commit(generation, outcome.state);
        if committed {
            events::pass_committed(&outcome.stats);
        }
        Ok(PassReport {
            stats: outcome.stats,
            committed,
        })
    }
}
