// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local broadcast bus shared by the restricted and privileged contexts.
//
// Stands in for the page-scoped message channel: every attached context sees
// every envelope, including its own. The bus is not network-addressable —
// "external" traffic can only appear here when a caller explicitly posts with
// an `External` origin, which receivers are required to drop.

use tokio::sync::broadcast;
use tracing::debug;

use crate::protocol::{Envelope, Origin, WireMessage};

const BUS_CAPACITY: usize = 64;

/// Cloneable handle to the shared message bus.
#[derive(Debug, Clone)]
pub struct LocalBus {
    tx: broadcast::Sender<Envelope>,
}

impl LocalBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Broadcast a message to every attached context. A bus with no
    /// subscribers swallows the message, like a page nobody is listening to.
    pub fn post(&self, origin: Origin, message: WireMessage) {
        debug!(tag = %message.tag, ?origin, "bus post");
        let _ = self.tx.send(Envelope { origin, message });
    }

    /// Attach a listener. Only envelopes posted after this call are seen.
    pub fn attach(&self) -> broadcast::Receiver<Envelope> {
        self.tx.subscribe()
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new()
    }
}
