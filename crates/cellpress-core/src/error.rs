// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Cellpress.

use thiserror::Error;

/// Top-level error type for all Cellpress operations.
#[derive(Debug, Error)]
pub enum CellpressError {
    // -- Extraction errors --
    #[error("host notebook model not accessible")]
    HostModelUnreachable,

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("extraction timed out after {waited_ms}ms")]
    ExtractionTimeout { waited_ms: u64 },

    #[error("bridge transport closed: {0}")]
    BridgeClosed(String),

    // -- Render errors --
    #[error("template error: {0}")]
    Template(String),

    #[error("render surface error: {0}")]
    Render(String),

    // -- Generation strategy errors --
    #[error("generation strategy failed: {0}")]
    Strategy(String),

    #[error("required generation libraries not loaded: {0}")]
    StrategyUnavailable(String),

    #[error("operation timed out after {limit_ms}ms")]
    StrategyTimeout { limit_ms: u64 },

    #[error("all generation methods failed")]
    AllStrategiesFailed,

    // -- Session --
    #[error("a generation run is already in flight")]
    SessionBusy,

    // -- Ambient --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CellpressError>;
