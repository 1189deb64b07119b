// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{MethodSelection, PageSize, PdfOptions};

/// Tunables for one engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on the extraction round-trip. The host model normally
    /// answers within milliseconds; a silent host fails the run instead of
    /// hanging it.
    pub extraction_timeout_ms: u64,
    /// Settle delay between the render surface's load event and the print
    /// invocation, long enough for embedded data URIs to rasterize.
    pub settle_delay_ms: u64,
    /// Default per-attempt timeout for generation strategies.
    pub strategy_timeout_ms: u64,
    /// Override for the page template; the embedded template is used when
    /// absent.
    pub template_path: Option<PathBuf>,
    /// Override for the stylesheet injected into `{{STYLES}}`.
    pub stylesheet_path: Option<PathBuf>,
    pub default_page_size: PageSize,
    pub default_margin: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            extraction_timeout_ms: 15_000,
            settle_delay_ms: 500,
            strategy_timeout_ms: 10_000,
            template_path: None,
            stylesheet_path: None,
            default_page_size: PageSize::A4,
            default_margin: "20mm".to_owned(),
        }
    }
}

impl PdfOptions {
    /// Strategy-chain options seeded from the engine configuration. The
    /// single source for page size, margin, and the per-attempt timeout when
    /// a chain deployment is driven by an `EngineConfig`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            method: MethodSelection::Auto,
            filename: None,
            page_size: config.default_page_size,
            margin: config.default_margin.clone(),
            timeout_ms: config.strategy_timeout_ms,
        }
    }
}
