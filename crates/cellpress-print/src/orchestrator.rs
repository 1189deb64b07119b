// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render/print orchestration: canonical document → mounted surface → print.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use cellpress_core::error::Result;
use cellpress_core::types::CanonicalDocument;

use crate::html::render_body;
use crate::surface::{SURFACE_ID, SurfaceHost};
use crate::template::{TemplateStore, hydrate};

/// Builds the full printable document and drives the render surface.
pub struct RenderOrchestrator {
    surfaces: Arc<dyn SurfaceHost>,
    templates: TemplateStore,
    /// Delay between the load event and the print invocation, long enough
    /// for embedded images and data URIs to rasterize.
    settle_delay: Duration,
}

impl RenderOrchestrator {
    pub fn new(
        surfaces: Arc<dyn SurfaceHost>,
        templates: TemplateStore,
        settle_delay: Duration,
    ) -> Self {
        Self {
            surfaces,
            templates,
            settle_delay,
        }
    }

    /// Hydrate the template with the sanitized title, generation date, and
    /// the assembled body.
    pub fn build_document(&self, doc: &CanonicalDocument) -> Result<String> {
        let template = self.templates.template()?;
        let styles = self.templates.stylesheet()?;
        let body = render_body(doc);
        Ok(hydrate(template, &doc.title, styles, &body))
    }

    /// Mount the off-screen surface, write the document, wait for assets to
    /// load plus the settle delay, then invoke print.
    ///
    /// Resolves once print has been invoked; the print/export dialog is the
    /// platform's business.
    pub async fn render(&self, doc: &CanonicalDocument) -> Result<()> {
        let html = self.build_document(doc)?;
        debug!(bytes = html.len(), "printable document assembled");

        let mut surface = self.surfaces.replace_surface(SURFACE_ID)?;
        surface.write_document(&html)?;
        surface.wait_loaded().await?;
        tokio::time::sleep(self.settle_delay).await;
        surface.invoke_print()?;

        info!(title = %doc.title, blocks = doc.content.len(), "print invoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurfaceHost;
    use cellpress_core::types::{BlockKind, ContentBlock};

    fn sample_doc() -> CanonicalDocument {
        CanonicalDocument {
            title: "# Report".into(),
            content: vec![ContentBlock {
                kind: BlockKind::Markdown,
                source: "# Report".into(),
                outputs: Vec::new(),
            }],
        }
    }

    #[tokio::test]
    async fn render_prints_hydrated_document() {
        let host = Arc::new(MemorySurfaceHost::new());
        let log = host.log();
        let orchestrator =
            RenderOrchestrator::new(host, TemplateStore::embedded(), Duration::ZERO);

        orchestrator.render(&sample_doc()).await.unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.created, 1);
        assert_eq!(log.printed.len(), 1);
        let printed = &log.printed[0];
        // Sanitized title in the header, raw markdown in the body.
        assert!(printed.contains("<h1>Report</h1>"));
        assert!(printed.contains(r#"<div class="cell markdown"># Report</div>"#));
        assert!(!printed.contains("{{"));
    }

    #[tokio::test]
    async fn each_render_replaces_the_surface() {
        let host = Arc::new(MemorySurfaceHost::new());
        let log = host.log();
        let orchestrator =
            RenderOrchestrator::new(host, TemplateStore::embedded(), Duration::ZERO);

        orchestrator.render(&sample_doc()).await.unwrap();
        orchestrator.render(&sample_doc()).await.unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.created, 2);
        assert_eq!(log.printed.len(), 2);
    }
}
