// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generation strategies.
//
// Each strategy is an independent way to turn printable HTML into an
// artifact. An empty artifact means the strategy ran but the platform
// consumed the output (a native print dialog cannot hand bytes back).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use cellpress_core::error::{CellpressError, Result};
use cellpress_core::types::{PageSize, PdfOptions};

use crate::surface::{SURFACE_ID, SurfaceHost};

/// One document-generation method.
#[async_trait]
pub trait GenerationStrategy: Send + Sync {
    /// Name used for selection and logging: `"print"`, `"canvas"`, `"css"`.
    fn name(&self) -> &'static str;

    /// Produce artifact bytes from the printable HTML.
    async fn generate(&self, html: &str, options: &PdfOptions) -> Result<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// Strategy 1: native print surface
// ---------------------------------------------------------------------------

/// Hands the document to the platform's print facility via the off-screen
/// surface. The artifact is produced by the platform's own dialog, so this
/// strategy never yields bytes itself.
pub struct PrintSurfaceStrategy {
    surfaces: Arc<dyn SurfaceHost>,
    settle_delay: Duration,
}

impl PrintSurfaceStrategy {
    pub fn new(surfaces: Arc<dyn SurfaceHost>, settle_delay: Duration) -> Self {
        Self {
            surfaces,
            settle_delay,
        }
    }
}

#[async_trait]
impl GenerationStrategy for PrintSurfaceStrategy {
    fn name(&self) -> &'static str {
        "print"
    }

    async fn generate(&self, html: &str, _options: &PdfOptions) -> Result<Vec<u8>> {
        let mut surface = self.surfaces.replace_surface(SURFACE_ID)?;
        surface.write_document(html)?;
        surface.wait_loaded().await?;
        tokio::time::sleep(self.settle_delay).await;
        surface.invoke_print()?;
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Strategy 2: rasterize then encode
// ---------------------------------------------------------------------------

/// Rasterizes laid-out HTML into an encoded page image.
pub trait HtmlRasterizer: Send + Sync {
    fn rasterize(&self, html: &str, width_mm: f32) -> Result<Vec<u8>>;
}

/// Wraps an encoded page image into a PDF.
pub trait PdfEncoder: Send + Sync {
    fn encode(&self, page_image: &[u8], page_size: PageSize, margin: &str) -> Result<Vec<u8>>;
}

/// Raster-then-encode strategy. Both libraries are external runtime
/// capabilities; either one missing makes the strategy a checked no-op.
pub struct RasterEncodeStrategy {
    rasterizer: Option<Arc<dyn HtmlRasterizer>>,
    encoder: Option<Arc<dyn PdfEncoder>>,
}

impl RasterEncodeStrategy {
    pub fn new(
        rasterizer: Option<Arc<dyn HtmlRasterizer>>,
        encoder: Option<Arc<dyn PdfEncoder>>,
    ) -> Self {
        Self {
            rasterizer,
            encoder,
        }
    }

    /// Both capabilities absent — the common deployment.
    pub fn unavailable() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
impl GenerationStrategy for RasterEncodeStrategy {
    fn name(&self) -> &'static str {
        "canvas"
    }

    async fn generate(&self, html: &str, options: &PdfOptions) -> Result<Vec<u8>> {
        let (Some(rasterizer), Some(encoder)) = (&self.rasterizer, &self.encoder) else {
            return Err(CellpressError::StrategyUnavailable(
                "rasterizer and encoder libraries".into(),
            ));
        };

        let page_image = rasterizer.rasterize(html, options.page_size.width_mm())?;
        encoder.encode(&page_image, options.page_size, &options.margin)
    }
}

// ---------------------------------------------------------------------------
// Strategy 3: CSS paged media
// ---------------------------------------------------------------------------

/// A print-capable window the strategy can open.
pub trait PrintWindow: Send + Sync {
    /// Open a window with the given document and invoke print on it.
    fn open_and_print(&self, html: &str) -> Result<()>;
}

/// Wraps the document in print-media page rules and hands it to a new
/// print-capable window; yields the print-styled document as the artifact.
pub struct PagedMediaStrategy {
    window: Arc<dyn PrintWindow>,
}

impl PagedMediaStrategy {
    pub fn new(window: Arc<dyn PrintWindow>) -> Self {
        Self { window }
    }
}

/// Prefix the document with `@media print` page rules.
pub fn with_print_styles(html: &str, options: &PdfOptions) -> String {
    format!(
        "<style>\n\
         @media print {{\n\
           body {{ margin: 0; padding: 0; }}\n\
           @page {{ size: {size}; margin: {margin}; }}\n\
           .no-print {{ display: none !important; }}\n\
         }}\n\
         </style>\n{html}",
        size = options.page_size.css_keyword(),
        margin = options.margin,
    )
}

#[async_trait]
impl GenerationStrategy for PagedMediaStrategy {
    fn name(&self) -> &'static str {
        "css"
    }

    async fn generate(&self, html: &str, options: &PdfOptions) -> Result<Vec<u8>> {
        let styled = with_print_styles(html, options);
        self.window.open_and_print(&styled)?;
        Ok(styled.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurfaceHost;

    #[tokio::test]
    async fn print_surface_strategy_yields_no_bytes() {
        let host = Arc::new(MemorySurfaceHost::new());
        let log = host.log();
        let strategy = PrintSurfaceStrategy::new(host, Duration::ZERO);

        let bytes = strategy
            .generate("<html>x</html>", &PdfOptions::default())
            .await
            .unwrap();

        assert!(bytes.is_empty());
        assert_eq!(log.lock().unwrap().printed.len(), 1);
    }

    #[tokio::test]
    async fn raster_strategy_is_checked_noop_without_libraries() {
        let strategy = RasterEncodeStrategy::unavailable();
        let err = strategy
            .generate("<html>x</html>", &PdfOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CellpressError::StrategyUnavailable(_)));
    }

    #[tokio::test]
    async fn paged_media_strategy_injects_page_rules() {
        struct NullWindow;
        impl PrintWindow for NullWindow {
            fn open_and_print(&self, _html: &str) -> Result<()> {
                Ok(())
            }
        }

        let strategy = PagedMediaStrategy::new(Arc::new(NullWindow));
        let bytes = strategy
            .generate("<html>x</html>", &PdfOptions::default())
            .await
            .unwrap();
        let styled = String::from_utf8(bytes).unwrap();
        assert!(styled.contains("@page { size: A4; margin: 20mm; }"));
        assert!(styled.ends_with("<html>x</html>"));
    }
}
