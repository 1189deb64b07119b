// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Off-screen render surface abstraction.
//
// The platform owns the real surface (a hidden frame in the page). Cellpress
// talks to it through these traits; an in-memory implementation backs
// desktop/CI builds and the test suite.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use cellpress_core::error::Result;

/// Fixed identifier of the off-screen render surface. Each run removes any
/// prior surface under this id before mounting its own, so a stale surface
/// can never be referenced concurrently — safe under the one-run-in-flight
/// invariant.
pub const SURFACE_ID: &str = "cellpress-render-frame";

/// One mounted off-screen surface.
#[async_trait]
pub trait RenderSurface: Send {
    /// Write the final HTML into the surface's own document context.
    fn write_document(&mut self, html: &str) -> Result<()>;

    /// Resolve when the surface's load event has fired.
    async fn wait_loaded(&mut self) -> Result<()>;

    /// Invoke the platform print action on the surface. Returns once print
    /// has been invoked, without waiting for the dialog to close.
    fn invoke_print(&mut self) -> Result<()>;
}

/// Creates and replaces surfaces in the active page.
pub trait SurfaceHost: Send + Sync {
    /// Remove any surface left under `id` and mount a fresh zero-visible-area
    /// surface in its place.
    fn replace_surface(&self, id: &str) -> Result<Box<dyn RenderSurface>>;
}

// ---------------------------------------------------------------------------
// In-memory implementation (desktop/CI, tests)
// ---------------------------------------------------------------------------

/// Record of everything an in-memory surface host did.
#[derive(Debug, Default)]
pub struct SurfaceLog {
    /// How many surfaces were mounted.
    pub created: usize,
    /// Documents on which print was invoked, in order.
    pub printed: Vec<String>,
}

/// Surface host that renders into memory instead of a page.
pub struct MemorySurfaceHost {
    log: Arc<Mutex<SurfaceLog>>,
    /// Simulated delay before the load event fires.
    load_delay: Duration,
}

impl MemorySurfaceHost {
    pub fn new() -> Self {
        Self::with_load_delay(Duration::ZERO)
    }

    pub fn with_load_delay(load_delay: Duration) -> Self {
        Self {
            log: Arc::new(Mutex::new(SurfaceLog::default())),
            load_delay,
        }
    }

    /// Shared handle to the activity log.
    pub fn log(&self) -> Arc<Mutex<SurfaceLog>> {
        Arc::clone(&self.log)
    }
}

impl Default for MemorySurfaceHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceHost for MemorySurfaceHost {
    fn replace_surface(&self, _id: &str) -> Result<Box<dyn RenderSurface>> {
        if let Ok(mut log) = self.log.lock() {
            log.created += 1;
        }
        Ok(Box::new(MemorySurface {
            html: None,
            load_delay: self.load_delay,
            log: Arc::clone(&self.log),
        }))
    }
}

struct MemorySurface {
    html: Option<String>,
    load_delay: Duration,
    log: Arc<Mutex<SurfaceLog>>,
}

#[async_trait]
impl RenderSurface for MemorySurface {
    fn write_document(&mut self, html: &str) -> Result<()> {
        self.html = Some(html.to_owned());
        Ok(())
    }

    async fn wait_loaded(&mut self) -> Result<()> {
        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }
        Ok(())
    }

    fn invoke_print(&mut self) -> Result<()> {
        let html = self.html.clone().unwrap_or_default();
        if let Ok(mut log) = self.log.lock() {
            log.printed.push(html);
        }
        Ok(())
    }
}
