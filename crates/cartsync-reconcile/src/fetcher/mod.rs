//! Per-cell fetch: one "read all carts" call, then per-record decoding.
//!
//! A record that fails to decode is skipped. A cell whose call fails, times
//! out, or replies with something that is not a record list yields no carts
//! and a reported failure; it never aborts the caller.

use std::time::Duration;

use cartsync_core::codec;
use cartsync_core::errors::{DecodeError, TransportError};
use cartsync_core::models::{Cart, CellReference, RawRecord};
use cartsync_core::traits::{CallTarget, IEntryDecoder, ICellTransport};
use cartsync_observability::events;

/// Result of fetching one cell.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub carts: Vec<Cart>,
    /// Records that failed to decode.
    pub skipped: usize,
    /// Set when the whole cell failed; `carts` is then empty.
    pub failure: Option<TransportError>,
}

impl FetchReport {
    pub fn failed(error: TransportError) -> Self {
        Self {
            carts: Vec::new(),
            skipped: 0,
            failure: Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Reads every cart from a single cell.
pub struct CartFetcher<'a, T> {
    transport: &'a T,
    decoder: &'a dyn IEntryDecoder,
    function: &'a str,
    timeout: Option<Duration>,
}

impl<'a, T: ICellTransport> CartFetcher<'a, T> {
    pub fn new(transport: &'a T, decoder: &'a dyn IEntryDecoder, function: &'a str) -> Self {
        Self {
            transport,
            decoder,
            function,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn fetch(&self, cell: &CellReference) -> FetchReport {
        let records = match self.read_records(cell).await {
            Ok(records) => records,
            Err(e) => return FetchReport::failed(e),
        };

        let cell_str = cell.to_string();
        let mut report = FetchReport::default();
        for decoded in decode_records(self.decoder, &records) {
            match decoded {
                Ok(cart) => report.carts.push(cart),
                Err(e) => {
                    events::record_skipped(&cell_str, &e.to_string());
                    report.skipped += 1;
                }
            }
        }
        report
    }

    async fn read_records(&self, cell: &CellReference) -> Result<Vec<RawRecord>, TransportError> {
        let target = CallTarget::Cell(cell.cell_id.clone());
        let call = self
            .transport
            .invoke(&target, self.function, codec::nil_payload());

        let reply = match self.timeout {
            Some(budget) => tokio::time::timeout(budget, call).await.map_err(|_| {
                TransportError::Timeout {
                    function: self.function.to_string(),
                    after_ms: millis(budget),
                }
            })??,
            None => call.await?,
        };

        codec::decode::<Option<Vec<RawRecord>>>(&reply)
            .map(Option::unwrap_or_default)
            .map_err(|e| TransportError::MalformedReply {
                function: self.function.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Decode each record independently into a tagged result.
pub fn decode_records(
    decoder: &dyn IEntryDecoder,
    records: &[RawRecord],
) -> Vec<Result<Cart, DecodeError>> {
    records.iter().map(|r| decoder.decode(r)).collect()
}
