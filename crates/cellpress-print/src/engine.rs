// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The session-guarded engine: extraction → normalization → filtering →
// render/print, at most one run in flight per engine instance.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, error, info};

use cellpress_bridge::{BridgeClient, LocalBus};
use cellpress_core::EngineConfig;
use cellpress_core::error::Result;
use cellpress_core::human_errors::humanize_error;
use cellpress_core::types::{GenerateOptions, RunId};
use cellpress_document::{apply_filters, normalize};

use crate::orchestrator::RenderOrchestrator;
use crate::surface::SurfaceHost;
use crate::template::TemplateStore;

/// User-facing busy/alert surface. The host decides how busy state and
/// alerts are shown; the engine guarantees balanced show/hide calls and at
/// most one alert per failed run.
pub trait StatusIndicator: Send + Sync {
    fn show_busy(&self);
    fn hide_busy(&self);
    /// Present one human-readable failure message.
    fn alert(&self, message: &str);
}

/// Indicator that only logs. Suits headless hosts and tests that do not
/// inspect the indicator.
pub struct LogIndicator;

impl StatusIndicator for LogIndicator {
    fn show_busy(&self) {
        debug!("busy indicator on");
    }

    fn hide_busy(&self) {
        debug!("busy indicator off");
    }

    fn alert(&self, message: &str) {
        error!(message, "generation alert");
    }
}

/// Outcome of one `generate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The pipeline ran to completion and print was invoked.
    Completed,
    /// Another run was already in flight; this request was discarded.
    Dropped,
    /// The pipeline failed; the user was alerted once.
    Failed,
}

/// End-to-end notebook-to-print engine.
pub struct PressEngine {
    client: BridgeClient,
    orchestrator: RenderOrchestrator,
    indicator: Arc<dyn StatusIndicator>,
    running: AtomicBool,
}

impl PressEngine {
    pub fn new(
        bus: LocalBus,
        surfaces: Arc<dyn SurfaceHost>,
        indicator: Arc<dyn StatusIndicator>,
        config: &EngineConfig,
    ) -> Self {
        let client = BridgeClient::new(bus, Duration::from_millis(config.extraction_timeout_ms));
        let orchestrator = RenderOrchestrator::new(
            surfaces,
            TemplateStore::from_config(config),
            Duration::from_millis(config.settle_delay_ms),
        );
        Self {
            client,
            orchestrator,
            indicator,
            running: AtomicBool::new(false),
        }
    }

    /// Run one extraction-to-print pipeline.
    ///
    /// If a run is already in flight the request is dropped without side
    /// effects. Any pipeline failure is reported to the user exactly once,
    /// and the engine is immediately ready for the next request.
    pub async fn generate(&self, options: &GenerateOptions) -> RunStatus {
        let Some(_session) = Session::acquire(self) else {
            debug!("generation already in flight, dropping request");
            return RunStatus::Dropped;
        };

        let run_id = RunId::new();
        info!(%run_id, ?options, "generation started");

        match self.run_pipeline(options).await {
            Ok(()) => {
                info!(%run_id, "generation completed");
                RunStatus::Completed
            }
            Err(err) => {
                error!(%run_id, %err, "generation failed");
                self.indicator.alert(&humanize_error(&err).alert_text());
                RunStatus::Failed
            }
        }
    }

    async fn run_pipeline(&self, options: &GenerateOptions) -> Result<()> {
        let raw = self.client.fetch().await?;
        let doc = apply_filters(normalize(raw), options);
        self.orchestrator.render(&doc).await
    }
}

/// Exclusive run token. Acquiring it flips the engine busy; dropping it —
/// on success, failure, or panic unwind alike — restores idle state and
/// hides the busy indicator.
struct Session<'a> {
    engine: &'a PressEngine,
}

impl<'a> Session<'a> {
    fn acquire(engine: &'a PressEngine) -> Option<Self> {
        engine
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        engine.indicator.show_busy();
        Some(Self { engine })
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.engine.indicator.hide_busy();
        self.engine.running.store(false, Ordering::Release);
    }
}
