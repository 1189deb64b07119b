// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Restricted-side client: one extraction round-trip per call.

use std::time::Duration;

use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use cellpress_core::error::{CellpressError, Result};
use cellpress_core::types::RawDocument;

use crate::bus::LocalBus;
use crate::protocol::{DATA_RESPONSE_TAG, Envelope, Origin, WireMessage};

/// Fetches the raw document from the privileged context.
///
/// Per call: attach one listener, broadcast the command, accept the first
/// provenance-checked response, detach. There is no retry at this layer —
/// retry policy belongs to the caller.
pub struct BridgeClient {
    bus: LocalBus,
    timeout: Duration,
}

impl BridgeClient {
    pub fn new(bus: LocalBus, timeout: Duration) -> Self {
        Self { bus, timeout }
    }

    /// One extraction round-trip.
    ///
    /// The listener is attached before the command is broadcast so the reply
    /// cannot be missed, and is dropped after the first matching response
    /// (at-most-once consumption). The round-trip is bounded by the
    /// configured timeout rather than hanging on a silent host.
    pub async fn fetch(&self) -> Result<RawDocument> {
        let mut rx = self.bus.attach();

        debug!("initiating extraction protocol");
        self.bus.post(Origin::Local, WireMessage::extract_command());

        let waited_ms = self.timeout.as_millis() as u64;
        let message = tokio::time::timeout(self.timeout, await_response(&mut rx))
            .await
            .map_err(|_| CellpressError::ExtractionTimeout { waited_ms })??;
        drop(rx);

        match message.payload {
            Some(value) if !value.is_null() => Ok(serde_json::from_value(value)?),
            _ => Err(CellpressError::Extraction("empty payload".into())),
        }
    }
}

/// Wait for the first response that passes the provenance and tag checks.
async fn await_response(rx: &mut Receiver<Envelope>) -> Result<WireMessage> {
    loop {
        match rx.recv().await {
            Ok(env) => {
                // Same checks the page-side listener performs: local origin
                // and the response tag, everything else is ignored.
                if env.origin != Origin::Local || env.message.tag != DATA_RESPONSE_TAG {
                    continue;
                }
                return Ok(env.message);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "client lagged behind the bus");
            }
            Err(RecvError::Closed) => {
                return Err(CellpressError::BridgeClosed(
                    "no privileged context attached".into(),
                ));
            }
        }
    }
}
