//! CartStore: the published facade over the registry, reconciliation passes,
//! cart creation, and the snapshot publisher.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use cartsync_core::codec::MsgpackEntryDecoder;
use cartsync_core::config::CartSyncConfig;
use cartsync_core::errors::{CartError, CartResult};
use cartsync_core::identity::HashB64Encoder;
use cartsync_core::models::{
    Cart, CellReference, DocumentRef, GroupId, PassStats, ReconciliationState, Role,
};
use cartsync_core::traits::{IEntryDecoder, IIdentityEncoder, ICellTransport};
use cartsync_observability::{events, ReconcileMetrics};

use crate::lifecycle::CartLifecycle;
use crate::publish::{StatePublisher, SubscriptionId};
use crate::reconcile::{PassReport, ReconciliationLoop};
use crate::registry::{enumerate_clones, CellRegistry};

pub struct CartStore<T> {
    transport: T,
    decoder: Arc<dyn IEntryDecoder>,
    encoder: Arc<dyn IIdentityEncoder>,
    config: CartSyncConfig,
    registry: CellRegistry,
    publisher: StatePublisher,
    role: Mutex<Role>,
    self_identity: String,
    metrics: Mutex<ReconcileMetrics>,
}

impl<T: ICellTransport> CartStore<T> {
    /// Store with the default MessagePack decoder and `u`-base64 identity encoding.
    pub fn new(
        transport: T,
        self_identity: impl Into<String>,
        role: Role,
        config: CartSyncConfig,
    ) -> Self {
        Self::with_codecs(
            transport,
            self_identity,
            role,
            config,
            Arc::new(MsgpackEntryDecoder),
            Arc::new(HashB64Encoder),
        )
    }

    pub fn with_codecs(
        transport: T,
        self_identity: impl Into<String>,
        role: Role,
        config: CartSyncConfig,
        decoder: Arc<dyn IEntryDecoder>,
        encoder: Arc<dyn IIdentityEncoder>,
    ) -> Self {
        let publisher = StatePublisher::new(config.reconcile.discard_stale_passes);
        Self {
            transport,
            registry: CellRegistry::new(encoder.clone()),
            decoder,
            encoder,
            config,
            publisher,
            role: Mutex::new(role),
            self_identity: self_identity.into(),
            metrics: Mutex::new(ReconcileMetrics::new()),
        }
    }

    // ── Subscription ───────────────────────────────────────────────────

    /// The callback receives the current snapshot now and every replacement after.
    pub fn subscribe(
        &self,
        callback: impl Fn(&ReconciliationState) + Send + Sync + 'static,
    ) -> CartResult<SubscriptionId> {
        self.publisher.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> CartResult<bool> {
        self.publisher.unsubscribe(id)
    }

    pub fn watch(&self) -> watch::Receiver<Arc<ReconciliationState>> {
        self.publisher.watch()
    }

    pub fn state(&self) -> Arc<ReconciliationState> {
        self.publisher.current()
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn get_cart_data(&self, group_id: &GroupId) -> Option<Cart> {
        self.publisher.current().cart(group_id).cloned()
    }

    pub fn get_cart_cell(&self, group_id: &GroupId) -> Option<CellReference> {
        self.publisher.current().cell(group_id).cloned()
    }

    pub fn role(&self) -> CartResult<Role> {
        Ok(self.lock_role()?.clone())
    }

    pub fn self_identity(&self) -> &str {
        &self.self_identity
    }

    pub fn registry(&self) -> &CellRegistry {
        &self.registry
    }

    pub fn config(&self) -> &CartSyncConfig {
        &self.config
    }

    pub fn metrics(&self) -> CartResult<ReconcileMetrics> {
        Ok(self.lock_metrics()?.clone())
    }

    // ── Operations ─────────────────────────────────────────────────────

    /// Run a pass against the registry as it stands.
    pub async fn reconcile(&self) -> CartResult<PassReport> {
        let generation = self.publisher.begin_pass();
        self.reconcile_as(generation).await
    }

    /// Rebuild the registry from clone enumeration, then reconcile.
    ///
    /// An enumeration failure leaves the registry and the published content
    /// untouched and sets the published error.
    pub async fn refresh(&self) -> CartResult<PassReport> {
        let generation = self.publisher.begin_pass();

        let infos = match enumerate_clones(&self.transport, &self.config.remote.enumerate_clones).await {
            Ok(infos) => infos,
            Err(e) => return Err(self.fail_pass(generation, e)),
        };
        let replaced = if self.config.reconcile.discard_stale_passes {
            self.registry.replace_for_pass(generation, &infos)
        } else {
            self.registry.replace_all_from_clones(&infos).map(Some)
        };
        match replaced {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(self.discard_pass(generation)),
            Err(e) => return Err(self.fail_pass(generation, e)),
        }

        self.reconcile_as(generation).await
    }

    /// Switch the viewer role, then refresh.
    pub async fn set_role(&self, role: Role) -> CartResult<PassReport> {
        {
            let mut current = self.lock_role()?;
            events::role_changed(current.as_str(), role.as_str());
            *current = role;
        }
        self.refresh().await
    }

    /// Create a cart in a freshly cloned cell. All-or-nothing: on failure the
    /// published error is set and nothing is registered.
    pub async fn create_cart(&self, document: &DocumentRef, name: &str) -> CartResult<Cart> {
        let role = self.role()?;
        let lifecycle = CartLifecycle::new(
            &self.transport,
            self.decoder.as_ref(),
            self.encoder.as_ref(),
            &self.config,
            &self.registry,
            &self.publisher,
        );
        let result = lifecycle
            .create_cart(document, name, &role, &self.self_identity)
            .await;

        self.record_metrics(|metrics| {
            metrics.record_creation(result.is_ok());
            if let Ok(created) = &result {
                match &created.pass {
                    Some(report) => metrics.record_pass(&report.stats, report.committed),
                    None => metrics.record_failure(),
                }
            }
        });
        result.map(|created| created.cart)
    }

    async fn reconcile_as(&self, generation: u64) -> CartResult<PassReport> {
        let role = match self.role() {
            Ok(role) => role,
            Err(e) => return Err(self.fail_pass(generation, e)),
        };
        let pass = ReconciliationLoop::new(
            &self.transport,
            self.decoder.as_ref(),
            self.encoder.as_ref(),
            &self.config,
        );
        let result = pass
            .run_and_commit(generation, &self.registry, &self.publisher, &role, &self.self_identity)
            .await;

        self.record_metrics(|metrics| match &result {
            Ok(report) => metrics.record_pass(&report.stats, report.committed),
            Err(_) => metrics.record_failure(),
        });
        result
    }

    /// A newer pass already owns the registry: publish nothing.
    fn discard_pass(&self, generation: u64) -> PassReport {
        let newer = self.registry.generation().unwrap_or(generation);
        events::pass_discarded(generation, newer);
        let stats = PassStats {
            generation,
            ..PassStats::default()
        };
        self.record_metrics(|metrics| metrics.record_pass(&stats, false));
        PassReport {
            stats,
            committed: false,
        }
    }

    fn fail_pass(&self, generation: u64, error: CartError) -> CartError {
        events::pass_failed(generation, &error.to_string());
        self.publisher.fail(generation, &error);
        self.record_metrics(|metrics| metrics.record_failure());
        error
    }

    /// Metrics never decide an operation's outcome. A poisoned lock only
    /// costs the sample.
    fn record_metrics(&self, record: impl FnOnce(&mut ReconcileMetrics)) {
        match self.lock_metrics() {
            Ok(mut metrics) => record(&mut metrics),
            Err(e) => tracing::warn!(error = %e, "metrics sample dropped"),
        }
    }

    fn lock_role(&self) -> CartResult<MutexGuard<'_, Role>> {
        self.role
            .lock()
            .map_err(|e| CartError::ConcurrencyError(format!("role lock: {e}")))
    }

    fn lock_metrics(&self) -> CartResult<MutexGuard<'_, ReconcileMetrics>> {
        self.metrics
            .lock()
            .map_err(|e| CartError::ConcurrencyError(format!("metrics lock: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use test_fixtures::builders::{cart, cloned_cell, document, identity_of};
    use test_fixtures::ScriptedTransport;

    use super::*;

    fn poison_metrics(store: &CartStore<ScriptedTransport>) {
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _held = store.metrics.lock().unwrap();
            panic!("metrics writer died");
        }));
        assert!(store.metrics.is_poisoned());
    }

    #[tokio::test]
    async fn poisoned_metrics_do_not_fail_a_completed_creation() {
        let transport = ScriptedTransport::new();
        let cloned = cloned_cell("new", "alice", 500, "seed");
        transport.creation(&cloned, &cart("new", 500, "alice"));
        transport.carts(&cloned.cell_id, &[cart("new", 500, "alice")]);
        let store = CartStore::new(
            transport,
            identity_of("alice"),
            Role::parse("customer"),
            CartSyncConfig::default(),
        );
        poison_metrics(&store);

        let created = store.create_cart(&document("doc"), "groceries").await.unwrap();

        assert_eq!(created, cart("new", 500, "alice"));
        assert_eq!(store.state().len(), 1);
        assert!(matches!(store.metrics(), Err(CartError::ConcurrencyError(_))));
    }

    #[tokio::test]
    async fn poisoned_metrics_do_not_fail_a_pass() {
        let store = CartStore::new(
            ScriptedTransport::new(),
            identity_of("alice"),
            Role::Scanner,
            CartSyncConfig::default(),
        );
        poison_metrics(&store);

        assert!(store.reconcile().await.unwrap().committed);
    }
}
