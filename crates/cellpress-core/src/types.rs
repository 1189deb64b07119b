// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Cellpress notebook-to-print pipeline.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Raw document model (host-defined shape, tolerant deserialization)
// ---------------------------------------------------------------------------

/// A payload that may arrive as a single string or as ordered fragments.
///
/// Host output records are not consistent about this: the same MIME key can
/// carry `"<svg .../>"` on one cell and `["<svg ", ".../>"]` on the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextPayload {
    Single(String),
    Fragments(Vec<String>),
}

impl TextPayload {
    /// The payload as one string, fragments concatenated in order.
    pub fn joined(&self) -> String {
        match self {
            Self::Single(s) => s.clone(),
            Self::Fragments(parts) => parts.concat(),
        }
    }
}

impl From<&str> for TextPayload {
    fn from(s: &str) -> Self {
        Self::Single(s.to_owned())
    }
}

/// One free-form output record attached to a raw cell.
///
/// The shape is host-defined: a mapping from MIME-type-like keys to payloads,
/// plus an optional stream marker with literal stream text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOutput {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, TextPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_text: Option<TextPayload>,

    /// Host marker such as `"stream"` — informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,
}

/// One cell of the raw document as serialized by the privileged context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCell {
    #[serde(default)]
    pub id: String,

    /// Host type marker: `"text"` for markdown cells, anything else is code.
    #[serde(rename = "type", default)]
    pub cell_type: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub outputs: Vec<RawOutput>,
}

/// The raw document handed across the extraction boundary.
///
/// Both fields are optional because the host never guarantees the shape —
/// the normalizer owns the recovery policy for missing pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub cells: Option<Vec<RawCell>>,
}

// ---------------------------------------------------------------------------
// Canonical document model
// ---------------------------------------------------------------------------

/// Raster image MIME types recognized in output records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RasterMime {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl RasterMime {
    /// MIME type string as it appears in output record keys and data URIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// A normalized output: exactly one recognized content value per raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NormalizedOutput {
    /// Direct raster image, base64 payload carried through unchanged.
    Image { mime: RasterMime, data: String },
    /// Inline vector markup.
    Svg { markup: String },
    /// An image referenced by URL, recovered from wrapper markup.
    ImageSrc { url: String },
    /// Plain or stream text.
    Text { content: String },
}

/// Kind of a content block. Closed — there is no third kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Markdown,
    Code,
}

/// One typed block of the canonical document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub source: String,
    pub outputs: Vec<NormalizedOutput>,
}

/// The pipeline's stable representation of a notebook, owned by the render
/// stage for the duration of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalDocument {
    pub title: String,
    pub content: Vec<ContentBlock>,
}

// ---------------------------------------------------------------------------
// Generation options and results
// ---------------------------------------------------------------------------

/// A named generation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Print,
    Canvas,
    Css,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Canvas => "canvas",
            Self::Css => "css",
        }
    }
}

/// Strategy selection: try everything in priority order, or one named method
/// with no fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodSelection {
    Auto,
    Only(Method),
}

/// Page sizes supported by the generation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// CSS `@page size` keyword.
    pub fn css_keyword(&self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::Letter => "letter",
        }
    }

    /// Page width in millimetres.
    pub fn width_mm(&self) -> f32 {
        match self {
            Self::A4 => 210.0,
            Self::Letter => 215.9,
        }
    }
}

/// Options for one strategy-chain invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfOptions {
    pub method: MethodSelection,
    /// Output filename; generated from the current timestamp when absent.
    pub filename: Option<String>,
    pub page_size: PageSize,
    pub margin: String,
    /// Per-attempt timeout for each strategy.
    pub timeout_ms: u64,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            method: MethodSelection::Auto,
            filename: None,
            page_size: PageSize::A4,
            margin: "20mm".to_owned(),
            timeout_ms: 10_000,
        }
    }
}

impl PdfOptions {
    /// The configured filename, or a timestamped default.
    pub fn filename_or_default(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| format!("notebook-{}.pdf", Utc::now().timestamp_millis()))
    }
}

/// Caller-facing toggles passed through from the UI layer.
///
/// The core pipeline never reads these — they drive an explicit pre-filter
/// stage applied to the canonical document before rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub include_code: bool,
    pub include_output: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            include_code: true,
            include_output: true,
        }
    }
}

/// Result of one strategy-chain invocation. Created fresh per call, never
/// persisted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    /// Artifact bytes, base64-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Which method produced the artifact (`"fallback"` in auto mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Self-contained printable HTML with manual instructions, base64-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl GenerationResult {
    pub fn succeeded(data: String, filename: String, method: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            filename: Some(filename),
            method: Some(method.to_owned()),
            error: None,
            fallback: None,
        }
    }

    pub fn failed(error: String, fallback: String) -> Self {
        Self {
            success: false,
            data: None,
            filename: None,
            method: None,
            error: Some(error),
            fallback: Some(fallback),
        }
    }
}
