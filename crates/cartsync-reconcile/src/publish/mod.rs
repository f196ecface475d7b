//! Ownership and publication of the reconciliation snapshot.
//!
//! The snapshot lives in a `watch` channel and is only ever replaced whole.
//! Callback subscribers receive the current snapshot on subscription and
//! every replacement after it. Commits carry the generation of the pass that
//! produced them; a commit older than the newest committed generation is
//! dropped.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::debug;

use cartsync_core::errors::{CartError, CartResult};
use cartsync_core::models::ReconciliationState;
use cartsync_observability::events;

pub type SubscriptionId = u64;

type Callback = Arc<dyn Fn(&ReconciliationState) + Send + Sync>;

pub struct StatePublisher {
    tx: watch::Sender<Arc<ReconciliationState>>,
    callbacks: Mutex<BTreeMap<SubscriptionId, Callback>>,
    next_subscription: AtomicU64,
    /// Last generation handed out by `begin_pass`.
    started: AtomicU64,
    /// Newest generation whose result was published.
    committed: AtomicU64,
    discard_stale: bool,
}

impl StatePublisher {
    pub fn new(discard_stale: bool) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(ReconciliationState::default()));
        Self {
            tx,
            callbacks: Mutex::new(BTreeMap::new()),
            next_subscription: AtomicU64::new(1),
            started: AtomicU64::new(0),
            committed: AtomicU64::new(0),
            discard_stale,
        }
    }

    pub fn current(&self) -> Arc<ReconciliationState> {
        self.tx.borrow().clone()
    }

    /// Async receiver that observes every replacement.
    pub fn watch(&self) -> watch::Receiver<Arc<ReconciliationState>> {
        self.tx.subscribe()
    }

    /// Register a callback. It is invoked immediately with the current snapshot.
    pub fn subscribe(
        &self,
        callback: impl Fn(&ReconciliationState) + Send + Sync + 'static,
    ) -> CartResult<SubscriptionId> {
        let id = self.next_subscription.fetch_add(1, Ordering::SeqCst);
        let callback: Callback = Arc::new(callback);
        self.lock_callbacks()?.insert(id, callback.clone());
        callback(&self.current());
        debug!(subscription = id, "subscribed to cart state");
        Ok(id)
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> CartResult<bool> {
        let removed = self.lock_callbacks()?.remove(&id).is_some();
        debug!(subscription = id, removed, "unsubscribed from cart state");
        Ok(removed)
    }

    pub fn subscriber_count(&self) -> CartResult<usize> {
        Ok(self.lock_callbacks()?.len())
    }

    /// Start a pass: allocate its generation and publish the current content
    /// marked as loading, with any prior error cleared.
    pub fn begin_pass(&self) -> u64 {
        let generation = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        let loading = self.current().begin_loading();
        self.tx.send_replace(Arc::new(loading));
        self.notify();
        generation
    }

    /// Publish the result of pass `generation`. Returns `false` when the
    /// commit was dropped because a newer pass already committed.
    pub fn commit(&self, generation: u64, mut state: ReconciliationState) -> bool {
        // Stay in the loading state while a newer pass is still in flight.
        state.loading = self.started.load(Ordering::SeqCst) > generation
            && self.committed.load(Ordering::SeqCst) < generation;
        self.publish_guarded(generation, state)
    }

    /// Record a failed pass: keep the current content, set `error`, clear
    /// `loading`. Subject to the same generation guard as [`commit`](Self::commit).
    pub fn fail(&self, generation: u64, error: &CartError) -> bool {
        let failed = self.current().failed(error.to_string());
        self.publish_guarded(generation, failed)
    }

    /// Set `error` on the current content for a failure that is not a pass
    /// result, so no newer commit can drop it. Settles `generation`;
    /// `loading` stays on only while a later pass is in flight.
    pub fn publish_error(&self, generation: u64, error: &CartError) {
        self.tx.send_modify(|slot| {
            let settled = self.committed.fetch_max(generation, Ordering::SeqCst).max(generation);
            let mut failed = slot.failed(error.to_string());
            failed.loading = self.started.load(Ordering::SeqCst) > settled;
            *slot = Arc::new(failed);
        });
        self.notify();
    }

    pub fn last_started(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }

    pub fn last_committed(&self) -> u64 {
        self.committed.load(Ordering::SeqCst)
    }

    fn publish_guarded(&self, generation: u64, state: ReconciliationState) -> bool {
        let mut newer = 0;
        let published = self.tx.send_if_modified(|slot| {
            let previous = self.committed.fetch_max(generation, Ordering::SeqCst);
            if self.discard_stale && previous > generation {
                newer = previous;
                return false;
            }
            *slot = Arc::new(state);
            true
        });
        if published {
            self.notify();
        } else {
            events::pass_discarded(generation, newer);
        }
        published
    }

    fn notify(&self) {
        let callbacks: Vec<Callback> = match self.lock_callbacks() {
            Ok(cbs) => cbs.values().cloned().collect(),
            Err(e) => {
                tracing::error!(error = %e, "subscriber table unavailable, skipping notification");
                return;
            }
        };
        let snapshot = self.current();
        for callback in callbacks {
            callback(&snapshot);
        }
    }

    fn lock_callbacks(&self) -> CartResult<MutexGuard<'_, BTreeMap<SubscriptionId, Callback>>> {
        self.callbacks
            .lock()
            .map_err(|e| CartError::ConcurrencyError(format!("subscriber lock: {e}")))
    }
}

impl Default for StatePublisher {
    fn default() -> Self {
        Self::new(true)
    }
}
