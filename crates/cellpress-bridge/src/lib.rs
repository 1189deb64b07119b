// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cellpress-bridge — the extraction protocol between the restricted context
// (no access to the host's private notebook model) and the privileged context
// (full access). The two sides share nothing but tagged messages on a local
// bus; the host model itself never crosses the boundary, only its serialized
// snapshot.

pub mod bus;
pub mod client;
pub mod connector;
pub mod host;
pub mod protocol;

pub use bus::LocalBus;
pub use client::BridgeClient;
pub use connector::ModelConnector;
pub use host::{HostModel, NotebookModel};
