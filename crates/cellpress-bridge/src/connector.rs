// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Privileged-side connector: answers extraction commands with a serialized
// snapshot of the host's notebook model.
//
// Every failure mode collapses to a null response payload. A raw error must
// never cross the boundary — the restricted side only learns "no data".

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use cellpress_core::types::RawDocument;

use crate::bus::LocalBus;
use crate::host::{HostModel, recover_title};
use crate::protocol::{EXTRACT_CMD_TAG, Origin, WireMessage};

/// Serves extraction commands on the local bus for the lifetime of the bus.
pub struct ModelConnector {
    bus: LocalBus,
    host: Arc<dyn HostModel>,
    rx: tokio::sync::broadcast::Receiver<crate::protocol::Envelope>,
}

impl ModelConnector {
    /// Attaches to the bus immediately — commands posted after construction
    /// are served even if the connector task has not been polled yet.
    pub fn new(bus: LocalBus, host: Arc<dyn HostModel>) -> Self {
        let rx = bus.attach();
        Self { bus, host, rx }
    }

    /// Serve commands on a background task until the bus closes.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.serve())
    }

    async fn serve(mut self) {
        loop {
            match self.rx.recv().await {
                Ok(env) => {
                    if env.origin != Origin::Local || env.message.tag != EXTRACT_CMD_TAG {
                        continue;
                    }
                    let payload = self.extract();
                    self.bus.post(Origin::Local, WireMessage::data_response(payload));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "connector lagged behind the bus");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    /// Snapshot the notebook: locate the model, recover the title, walk the
    /// cells, serialize.
    fn extract(&self) -> Option<Value> {
        let Some(notebook) = self.host.notebook() else {
            error!("host notebook model not accessible");
            return None;
        };

        let title = recover_title(notebook, self.host.as_ref());

        let cells = match notebook.cells() {
            Ok(cells) => cells,
            Err(err) => {
                error!(%err, "cell serialization failed");
                return None;
            }
        };

        info!(cell_count = cells.len(), %title, "extracted notebook");

        let raw = RawDocument {
            title: Some(title),
            cells: Some(cells),
        };
        match serde_json::to_value(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                error!(%err, "raw document serialization failed");
                None
            }
        }
    }
}
