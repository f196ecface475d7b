//! All-or-nothing cart creation.
//!
//! Clone a new cell, write the cart's first entry into it, decode the entry,
//! register the cell, then reconcile. A failure at any remote step aborts the
//! whole operation before the cell is registered.

use cartsync_core::codec;
use cartsync_core::config::CartSyncConfig;
use cartsync_core::errors::{CartError, CartResult, LifecycleError};
use cartsync_core::models::{
    Cart, CellReference, ClonedCell, CreateCartEntryInput, CreateCartInput, DocumentRef, GroupId,
    RawRecord, Role,
};
use cartsync_core::traits::{CallTarget, IEntryDecoder, IIdentityEncoder, ICellTransport};
use cartsync_observability::events;

use crate::publish::StatePublisher;
use crate::reconcile::{PassReport, ReconciliationLoop};
use crate::registry::{CellRegistry, IdentityHint};

/// A cart that was created and registered.
#[derive(Debug, Clone)]
pub struct CreatedCart {
    pub cart: Cart,
    pub group_id: GroupId,
    pub cell: CellReference,
    /// The reconciliation triggered after registration. `None` if it failed;
    /// the failure is then visible in the published error.
    pub pass: Option<PassReport>,
}

pub struct CartLifecycle<'a, T> {
    transport: &'a T,
    decoder: &'a dyn IEntryDecoder,
    encoder: &'a dyn IIdentityEncoder,
    config: &'a CartSyncConfig,
    registry: &'a CellRegistry,
    publisher: &'a StatePublisher,
}

impl<'a, T: ICellTransport> CartLifecycle<'a, T> {
    pub fn new(
        transport: &'a T,
        decoder: &'a dyn IEntryDecoder,
        encoder: &'a dyn IIdentityEncoder,
        config: &'a CartSyncConfig,
        registry: &'a CellRegistry,
        publisher: &'a StatePublisher,
    ) -> Self {
        Self {
            transport,
            decoder,
            encoder,
            config,
            registry,
            publisher,
        }
    }

    pub async fn create_cart(
        &self,
        document: &DocumentRef,
        name: &str,
        role: &Role,
        self_identity: &str,
    ) -> CartResult<CreatedCart> {
        let generation = self.publisher.begin_pass();

        let (cart, cloned) = match self.provision(document, name).await {
            Ok(created) => created,
            Err(e) => {
                let err = CartError::from(e);
                self.publisher.publish_error(generation, &err);
                return Err(err);
            }
        };

        let cell = CellReference::new(cloned.cell_id.clone(), cloned.network_seed.clone());
        let hint = IdentityHint::new(cloned.cell_id.backing_id().clone(), cloned.created_at);
        let group_id = match self.registry.register(cell.clone(), &hint) {
            Ok(group_id) => group_id,
            Err(e) => {
                events::cart_creation_failed("register", &e.to_string());
                self.publisher.publish_error(generation, &e);
                return Err(e);
            }
        };
        events::cart_created(group_id.as_str(), &cell.to_string());

        // The creation's own loading state covers the follow-up pass, unless a
        // newer pass started meanwhile and could commit without the new cell.
        let pass_generation = if self.publisher.last_started() == generation {
            generation
        } else {
            self.publisher.begin_pass()
        };
        let reconcile = ReconciliationLoop::new(self.transport, self.decoder, self.encoder, self.config);
        let pass = reconcile
            .run_and_commit(
                pass_generation,
                self.registry,
                self.publisher,
                role,
                self_identity,
            )
            .await
            .ok();

        Ok(CreatedCart {
            cart,
            group_id,
            cell,
            pass,
        })
    }

    /// The two remote steps plus decoding of the created entry.
    async fn provision(
        &self,
        document: &DocumentRef,
        name: &str,
    ) -> Result<(Cart, ClonedCell), LifecycleError> {
        let input = CreateCartInput {
            document_hash: document.clone(),
            cart_name: name.to_string(),
        };

        let cloned = self.clone_cell(&input).await.inspect_err(|e| {
            events::cart_creation_failed("clone", &e.to_string());
        })?;

        let record = self.create_entry(&cloned, input).await.inspect_err(|e| {
            events::cart_creation_failed("create_entry", &e.to_string());
        })?;

        let cart = self
            .decoder
            .decode(&record)
            .map_err(|e| LifecycleError::EntryUndecodable {
                reason: e.to_string(),
            })
            .inspect_err(|e| events::cart_creation_failed("decode", &e.to_string()))?;

        Ok((cart, cloned))
    }

    async fn clone_cell(&self, input: &CreateCartInput) -> Result<ClonedCell, LifecycleError> {
        let clone_failed = |reason: String| LifecycleError::CloneFailed { reason };

        let payload = codec::encode(input).map_err(|e| clone_failed(e.to_string()))?;
        let reply = self
            .transport
            .invoke(&CallTarget::Base, &self.config.remote.clone_cell, payload)
            .await
            .map_err(|e| clone_failed(e.to_string()))?;
        codec::decode(&reply).map_err(|e| clone_failed(e.to_string()))
    }

    async fn create_entry(
        &self,
        cloned: &ClonedCell,
        input: CreateCartInput,
    ) -> Result<RawRecord, LifecycleError> {
        let entry_failed = |reason: String| LifecycleError::EntryCreationFailed {
            cell: cloned.cell_id.to_string(),
            reason,
        };

        let payload = codec::encode(&CreateCartEntryInput {
            input,
            created_at: cloned.created_at,
        })
        .map_err(|e| entry_failed(e.to_string()))?;
        let reply = self
            .transport
            .invoke(
                &CallTarget::Cell(cloned.cell_id.clone()),
                &self.config.remote.create_cart_entry,
                payload,
            )
            .await
            .map_err(|e| entry_failed(e.to_string()))?;
        codec::decode(&reply).map_err(|e| entry_failed(e.to_string()))
    }
}
