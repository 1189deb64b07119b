// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Best-available generation: try strategies in priority order, first
// non-empty artifact wins. Failures are logged and skipped, never retried.
// Total failure still hands the caller something printable.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{error, info, warn};

use cellpress_core::error::{CellpressError, Result};
use cellpress_core::types::{GenerationResult, Method, MethodSelection, PdfOptions};

use crate::strategy::{
    GenerationStrategy, HtmlRasterizer, PagedMediaStrategy, PdfEncoder, PrintSurfaceStrategy,
    PrintWindow, RasterEncodeStrategy,
};
use crate::surface::SurfaceHost;

/// Ordered set of generation strategies.
pub struct StrategyChain {
    strategies: Vec<Box<dyn GenerationStrategy>>,
}

impl StrategyChain {
    pub fn new(strategies: Vec<Box<dyn GenerationStrategy>>) -> Self {
        Self { strategies }
    }

    /// The standard priority order: native print surface, raster-then-encode,
    /// CSS paged media.
    pub fn standard(
        surfaces: Arc<dyn SurfaceHost>,
        window: Arc<dyn PrintWindow>,
        rasterizer: Option<Arc<dyn HtmlRasterizer>>,
        encoder: Option<Arc<dyn PdfEncoder>>,
        settle_delay: Duration,
    ) -> Self {
        Self::new(vec![
            Box::new(PrintSurfaceStrategy::new(surfaces, settle_delay)),
            Box::new(RasterEncodeStrategy::new(rasterizer, encoder)),
            Box::new(PagedMediaStrategy::new(window)),
        ])
    }

    /// Run the chain (or one named strategy) over the printable HTML.
    ///
    /// Never errors: total failure is reported in the result together with a
    /// self-contained fallback artifact.
    pub async fn generate(&self, html: &str, options: &PdfOptions) -> GenerationResult {
        let outcome = match options.method {
            MethodSelection::Auto => self.try_each(html, options).await.map(|d| (d, "fallback")),
            MethodSelection::Only(method) => self
                .try_named(method, html, options)
                .await
                .map(|d| (d, method.name())),
        };

        match outcome {
            Some((data, label)) => {
                info!(method = label, bytes = data.len(), "artifact generated");
                GenerationResult::succeeded(
                    BASE64.encode(&data),
                    options.filename_or_default(),
                    label,
                )
            }
            None => {
                error!("all generation methods failed");
                GenerationResult::failed(
                    CellpressError::AllStrategiesFailed.to_string(),
                    fallback_artifact(html),
                )
            }
        }
    }

    async fn try_each(&self, html: &str, options: &PdfOptions) -> Option<Vec<u8>> {
        for strategy in &self.strategies {
            if let Some(data) = attempt(strategy.as_ref(), html, options).await {
                return Some(data);
            }
        }
        None
    }

    async fn try_named(&self, method: Method, html: &str, options: &PdfOptions) -> Option<Vec<u8>> {
        let strategy = self
            .strategies
            .iter()
            .find(|s| s.name() == method.name())?;
        attempt(strategy.as_ref(), html, options).await
    }
}

/// One timed attempt. Timeouts are reported distinctly from strategy-internal
/// errors, but both mean "skip".
async fn attempt(
    strategy: &dyn GenerationStrategy,
    html: &str,
    options: &PdfOptions,
) -> Option<Vec<u8>> {
    match with_timeout(strategy.generate(html, options), options.timeout_ms).await {
        Ok(data) if !data.is_empty() => Some(data),
        Ok(_) => {
            warn!(method = strategy.name(), "strategy yielded no data — skipping");
            None
        }
        Err(CellpressError::StrategyTimeout { limit_ms }) => {
            warn!(method = strategy.name(), limit_ms, "strategy timed out — skipping");
            None
        }
        Err(err) => {
            warn!(method = strategy.name(), %err, "strategy failed — skipping");
            None
        }
    }
}

/// Race a strategy's future against its allotted time.
pub async fn with_timeout<F>(fut: F, limit_ms: u64) -> Result<Vec<u8>>
where
    F: Future<Output = Result<Vec<u8>>>,
{
    tokio::time::timeout(Duration::from_millis(limit_ms), fut)
        .await
        .map_err(|_| CellpressError::StrategyTimeout { limit_ms })?
}

/// Wrap the original document with manual print-to-PDF instructions, base64
/// encoded so the caller can persist or display it as-is.
fn fallback_artifact(html: &str) -> String {
    let page = format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Print to PDF</title>
  <style>
    body {{ font-family: sans-serif; padding: 40px; max-width: 800px; margin: 0 auto; }}
    .instructions {{ background: #f5f5f5; padding: 20px; border-radius: 8px; margin: 20px 0; }}
    code {{ background: #e0e0e0; padding: 2px 4px; border-radius: 4px; }}
  </style>
</head>
<body>
  <h1>Print to PDF</h1>
  <div class="instructions">
    <p>To generate a PDF:</p>
    <ol>
      <li>Press <code>Ctrl + P</code> (Windows/Linux) or <code>Cmd + P</code> (Mac)</li>
      <li>Change destination to "Save as PDF"</li>
      <li>Click "Save"</li>
    </ol>
  </div>
  <hr>
{html}
</body>
</html>
"#
    );
    BASE64.encode(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cellpress_core::EngineConfig;

    use crate::surface::MemorySurfaceHost;

    struct ThrowingStrategy(&'static str);

    #[async_trait]
    impl GenerationStrategy for ThrowingStrategy {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn generate(&self, _html: &str, _options: &PdfOptions) -> Result<Vec<u8>> {
            Err(CellpressError::Strategy("boom".into()))
        }
    }

    struct FixedStrategy(&'static str, &'static [u8]);

    #[async_trait]
    impl GenerationStrategy for FixedStrategy {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn generate(&self, _html: &str, _options: &PdfOptions) -> Result<Vec<u8>> {
            Ok(self.1.to_vec())
        }
    }

    struct StalledStrategy(&'static str);

    #[async_trait]
    impl GenerationStrategy for StalledStrategy {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn generate(&self, _html: &str, _options: &PdfOptions) -> Result<Vec<u8>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(b"too late".to_vec())
        }
    }

    fn decode(b64: &str) -> String {
        String::from_utf8(BASE64.decode(b64).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn auto_mode_falls_through_to_first_working_strategy() {
        // Scenario C: strategy 1 throws, strategy 2's libraries are absent,
        // strategy 3 succeeds.
        let chain = StrategyChain::new(vec![
            Box::new(ThrowingStrategy("print")),
            Box::new(RasterEncodeStrategy::unavailable()),
            Box::new(FixedStrategy("css", b"%PDF-ish")),
        ]);

        let result = chain.generate("<p>x</p>", &PdfOptions::default()).await;

        assert!(result.success);
        assert_eq!(result.method.as_deref(), Some("fallback"));
        assert_eq!(decode(result.data.as_deref().unwrap()), "%PDF-ish");
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn total_failure_reports_error_and_fallback() {
        // Scenario D: every strategy fails.
        let chain = StrategyChain::new(vec![
            Box::new(ThrowingStrategy("print")),
            Box::new(RasterEncodeStrategy::unavailable()),
            Box::new(ThrowingStrategy("css")),
        ]);

        let result = chain.generate("<p>the content</p>", &PdfOptions::default()).await;

        assert!(!result.success);
        assert!(result.error.is_some());
        let fallback = decode(result.fallback.as_deref().unwrap());
        assert!(fallback.contains("<p>the content</p>"));
        assert!(fallback.contains("Save as PDF"));
    }

    #[tokio::test]
    async fn named_method_skips_the_rest_of_the_chain() {
        let chain = StrategyChain::new(vec![
            Box::new(FixedStrategy("print", b"from print")),
            Box::new(FixedStrategy("css", b"from css")),
        ]);

        let options = PdfOptions {
            method: MethodSelection::Only(Method::Css),
            ..PdfOptions::default()
        };
        let result = chain.generate("<p>x</p>", &options).await;

        assert!(result.success);
        assert_eq!(result.method.as_deref(), Some("css"));
        assert_eq!(decode(result.data.as_deref().unwrap()), "from css");
    }

    #[tokio::test]
    async fn named_failing_method_has_no_fallback_strategy() {
        let chain = StrategyChain::new(vec![
            Box::new(FixedStrategy("print", b"would work")),
            Box::new(ThrowingStrategy("css")),
        ]);

        let options = PdfOptions {
            method: MethodSelection::Only(Method::Css),
            ..PdfOptions::default()
        };
        let result = chain.generate("<p>x</p>", &options).await;

        assert!(!result.success);
        assert!(result.fallback.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_strategy_is_timed_out_and_skipped() {
        let chain = StrategyChain::new(vec![
            Box::new(StalledStrategy("print")),
            Box::new(FixedStrategy("css", b"rescued")),
        ]);

        let options = PdfOptions {
            timeout_ms: 10_000,
            ..PdfOptions::default()
        };
        let result = chain.generate("<p>x</p>", &options).await;

        assert!(result.success);
        assert_eq!(decode(result.data.as_deref().unwrap()), "rescued");
    }

    #[tokio::test]
    async fn empty_artifact_means_keep_looking() {
        let chain = StrategyChain::new(vec![
            Box::new(FixedStrategy("print", b"")),
            Box::new(FixedStrategy("css", b"real bytes")),
        ]);

        let result = chain.generate("<p>x</p>", &PdfOptions::default()).await;

        assert!(result.success);
        assert_eq!(decode(result.data.as_deref().unwrap()), "real bytes");
    }

    #[tokio::test]
    async fn standard_order_falls_back_to_css_when_canvas_is_unavailable() {
        struct NullWindow;
        impl PrintWindow for NullWindow {
            fn open_and_print(&self, _html: &str) -> Result<()> {
                Ok(())
            }
        }

        let host = Arc::new(MemorySurfaceHost::new());
        let log = host.log();
        let chain =
            StrategyChain::standard(host, Arc::new(NullWindow), None, None, Duration::ZERO);

        let options = PdfOptions::from_config(&EngineConfig::default());
        let result = chain.generate("<p>x</p>", &options).await;

        // The print surface runs first and the platform consumes its output,
        // so auto mode moves past it; the raster strategy has no libraries;
        // the css strategy supplies the artifact.
        assert_eq!(log.lock().unwrap().printed.len(), 1);
        assert!(result.success);
        assert_eq!(result.method.as_deref(), Some("fallback"));
        let artifact = decode(result.data.as_deref().unwrap());
        assert!(artifact.contains("@media print"));
        assert!(artifact.ends_with("<p>x</p>"));
    }

    #[tokio::test]
    async fn filename_defaults_when_not_provided() {
        let chain = StrategyChain::new(vec![Box::new(FixedStrategy("print", b"x"))]);
        let result = chain.generate("<p>x</p>", &PdfOptions::default()).await;
        assert!(result.filename.unwrap().ends_with(".pdf"));
    }
}
