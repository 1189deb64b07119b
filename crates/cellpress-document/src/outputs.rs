// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-record output normalization.
//
// Hosts embed visual outputs either as direct image payloads or smuggled
// inside HTML/markdown wrapper markup. A single first-match scan recovers the
// common case (one leading image per record) without a full markup parse —
// only the first embedded image per record is recovered.

use once_cell::sync::Lazy;
use regex::Regex;

use cellpress_core::types::{NormalizedOutput, RasterMime, RawOutput};

const MIME_PNG: &str = "image/png";
const MIME_JPEG: &str = "image/jpeg";
const MIME_SVG: &str = "image/svg+xml";
const MIME_HTML: &str = "text/html";
const MIME_MARKDOWN: &str = "text/markdown";
const MIME_PLAIN: &str = "text/plain";

/// First `<img src="...">` inside an HTML wrapper.
static HTML_IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]*\ssrc=["']([^"']+)["']"#).unwrap());

/// First markdown image reference.
static MD_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]\(([^)\s]+)\)").unwrap());

/// Substrings of a stringified plotting-library object handle. These are the
/// host's default object representation leaking into text output, not
/// user-intended content.
const PLOT_HANDLE_SIGNATURES: &[&str] = &["object at 0x", "<Figure size"];

fn is_plot_handle(text: &str) -> bool {
    PLOT_HANDLE_SIGNATURES.iter().any(|sig| text.contains(sig))
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Normalize one raw output record. At most one value is produced per record,
/// first matching rule wins; records yielding no recognized content are
/// dropped.
pub fn normalize_output(record: &RawOutput) -> Option<NormalizedOutput> {
    // Direct raster payloads, PNG before JPEG, carried through unchanged.
    if let Some(payload) = record.data.get(MIME_PNG) {
        return Some(NormalizedOutput::Image {
            mime: RasterMime::Png,
            data: payload.joined(),
        });
    }
    if let Some(payload) = record.data.get(MIME_JPEG) {
        return Some(NormalizedOutput::Image {
            mime: RasterMime::Jpeg,
            data: payload.joined(),
        });
    }

    // Direct vector payload, fragments concatenated in order.
    if let Some(payload) = record.data.get(MIME_SVG) {
        return Some(NormalizedOutput::Svg {
            markup: payload.joined(),
        });
    }

    // Rich HTML: recover the first embedded image URL, nothing else.
    if let Some(payload) = record.data.get(MIME_HTML) {
        if let Some(url) = first_capture(&HTML_IMG_SRC, &payload.joined()) {
            return Some(NormalizedOutput::ImageSrc { url });
        }
    }

    // Rich markdown: same first-image recovery.
    if let Some(payload) = record.data.get(MIME_MARKDOWN) {
        if let Some(url) = first_capture(&MD_IMAGE, &payload.joined()) {
            return Some(NormalizedOutput::ImageSrc { url });
        }
    }

    // Plain text, unless it is a stringified plotting handle — those are
    // suppressed entirely, not emitted as empty entries.
    if let Some(payload) = record.data.get(MIME_PLAIN) {
        let content = payload.joined();
        if is_plot_handle(&content) {
            return None;
        }
        return Some(NormalizedOutput::Text { content });
    }

    // Stream records carry their text outside the data map.
    if let Some(stream) = &record.stream_text {
        return Some(NormalizedOutput::Text {
            content: stream.joined(),
        });
    }

    None
}
