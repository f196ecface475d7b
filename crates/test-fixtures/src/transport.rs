//! In-memory [`ICellTransport`] driven by per-target scripts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::Notify;

use cartsync_core::codec;
use cartsync_core::constants::{
    FN_CLONE_CELL, FN_CREATE_CART_ENTRY, FN_ENUMERATE_CLONES, FN_READ_ALL_CARTS,
};
use cartsync_core::errors::TransportError;
use cartsync_core::models::{Cart, CellId, CloneInfo, ClonedCell, RawRecord};
use cartsync_core::traits::{CallTarget, ICellTransport};

use crate::builders;

/// What a scripted call answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Bytes(Vec<u8>),
    Fail(TransportError),
}

impl Reply {
    pub fn value<T: Serialize + ?Sized>(value: &T) -> Self {
        Reply::Bytes(codec::encode(value).expect("fixture value encodes"))
    }

    pub fn records(records: &[RawRecord]) -> Self {
        Reply::value(records)
    }

    pub fn carts(carts: &[Cart]) -> Self {
        let records: Vec<RawRecord> = carts.iter().map(builders::record).collect();
        Reply::records(&records)
    }

    pub fn unreachable(target: &str, reason: &str) -> Self {
        Reply::Fail(TransportError::Unreachable {
            cell: target.to_string(),
            reason: reason.to_string(),
        })
    }
}

/// One observed invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub target: CallTarget,
    pub function: String,
    pub payload: Vec<u8>,
}

type ScriptKey = (Option<CellId>, String);

#[derive(Default)]
struct Inner {
    replies: Mutex<HashMap<ScriptKey, Reply>>,
    gates: Mutex<HashMap<ScriptKey, Arc<Notify>>>,
    calls: Mutex<Vec<Call>>,
}

/// Cloning shares the script, so a test can keep a handle after moving a
/// copy into the code under test.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Inner>,
}

fn key(target: &CallTarget, function: &str) -> ScriptKey {
    let cell = match target {
        CallTarget::Base => None,
        CallTarget::Cell(id) => Some(id.clone()),
    };
    (cell, function.to_string())
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, target: CallTarget, function: &str, reply: Reply) -> &Self {
        self.inner
            .replies
            .lock()
            .unwrap()
            .insert(key(&target, function), reply);
        self
    }

    pub fn on_base(&self, function: &str, reply: Reply) -> &Self {
        self.on(CallTarget::Base, function, reply)
    }

    pub fn on_cell(&self, cell: &CellId, function: &str, reply: Reply) -> &Self {
        self.on(CallTarget::Cell(cell.clone()), function, reply)
    }

    /// Script the clone enumeration reply.
    pub fn clones(&self, infos: &[CloneInfo]) -> &Self {
        self.on_base(FN_ENUMERATE_CLONES, Reply::value(infos))
    }

    /// Script a cell's "read all carts" reply.
    pub fn carts(&self, cell: &CellId, carts: &[Cart]) -> &Self {
        self.on_cell(cell, FN_READ_ALL_CARTS, Reply::carts(carts))
    }

    pub fn fail_cell(&self, cell: &CellId, reason: &str) -> &Self {
        self.on_cell(
            cell,
            FN_READ_ALL_CARTS,
            Reply::unreachable(&cell.to_string(), reason),
        )
    }

    /// Script a successful creation: the clone reply and the created entry.
    pub fn creation(&self, cloned: &ClonedCell, cart: &Cart) -> &Self {
        self.on_base(FN_CLONE_CELL, Reply::value(cloned));
        self.on_cell(
            &cloned.cell_id,
            FN_CREATE_CART_ENTRY,
            Reply::value(&builders::record(cart)),
        )
    }

    /// Hold the next call to `function` on `target` until the returned
    /// handle is notified. The reply is captured before waiting, so later
    /// re-scripting does not change what the held call sees.
    pub fn gate_next_call(&self, target: CallTarget, function: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.inner
            .gates
            .lock()
            .unwrap()
            .insert(key(&target, function), gate.clone());
        gate
    }

    pub fn gate_next_base(&self, function: &str) -> Arc<Notify> {
        self.gate_next_call(CallTarget::Base, function)
    }

    /// Hold the next "read all carts" call to `cell`.
    pub fn gate_next(&self, cell: &CellId) -> Arc<Notify> {
        self.gate_next_call(CallTarget::Cell(cell.clone()), FN_READ_ALL_CARTS)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, function: &str) -> usize {
        self.inner
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.function == function)
            .count()
    }

    pub fn calls_to_cell(&self, cell: &CellId, function: &str) -> usize {
        let target = CallTarget::Cell(cell.clone());
        self.inner
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.target == target && c.function == function)
            .count()
    }

    /// Targets of every call to `function`, in call order.
    pub fn targets_of(&self, function: &str) -> Vec<CallTarget> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.function == function)
            .map(|c| c.target.clone())
            .collect()
    }
}

impl ICellTransport for ScriptedTransport {
    async fn invoke(
        &self,
        target: &CallTarget,
        function: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError> {
        let key = key(target, function);
        self.inner.calls.lock().unwrap().push(Call {
            target: target.clone(),
            function: function.to_string(),
            payload,
        });
        let reply = self.inner.replies.lock().unwrap().get(&key).cloned();
        let gate = self.inner.gates.lock().unwrap().remove(&key);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match reply {
            Some(Reply::Bytes(bytes)) => Ok(bytes),
            Some(Reply::Fail(err)) => Err(err),
            None => Err(TransportError::Unreachable {
                cell: target.to_string(),
                reason: format!("no script for {function}"),
            }),
        }
    }
}
