// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire message contract for the extraction round-trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tag of the broadcast extraction command sent by the restricted context.
pub const EXTRACT_CMD_TAG: &str = "COLAB_EXTRACT_CMD";

/// Tag of the response broadcast by the privileged context.
pub const DATA_RESPONSE_TAG: &str = "COLAB_DATA_RESPONSE";

/// A tagged message on the local bus.
///
/// The payload is an untyped JSON value: the privileged side serializes the
/// raw document into it, and a `null`/absent payload signals extraction
/// failure without carrying an error object across the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub payload: Option<Value>,
}

impl WireMessage {
    pub fn extract_command() -> Self {
        Self {
            tag: EXTRACT_CMD_TAG.to_owned(),
            payload: None,
        }
    }

    pub fn data_response(payload: Option<Value>) -> Self {
        Self {
            tag: DATA_RESPONSE_TAG.to_owned(),
            payload,
        }
    }
}

/// Where an envelope originated. Listeners only trust `Local` envelopes,
/// mirroring the page-side source check — an arbitrary external sender must
/// not be able to satisfy a pending extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Local,
    External,
}

/// A message plus its provenance, as seen by bus subscribers.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub origin: Origin,
    pub message: WireMessage,
}
