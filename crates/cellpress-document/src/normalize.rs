// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raw document → canonical document.
//
// Pure and deterministic: same raw document in, same canonical document out.
// Malformed input is recovered locally (an "Error"-titled empty document),
// never raised.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use cellpress_core::types::{
    BlockKind, CanonicalDocument, ContentBlock, RawCell, RawDocument,
};

use crate::outputs::normalize_output;

/// Inline markdown image syntax: `![alt](url)`.
static INLINE_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").unwrap());

/// Title used when the raw document carries no cell list at all.
const ERROR_TITLE: &str = "Error";

/// Title used when cells are present but the title is not.
const UNTITLED: &str = "Untitled Notebook";

/// Map a raw document to the canonical model.
///
/// Blocks preserve the original cell order; cells with blank text and no
/// outputs are dropped.
pub fn normalize(raw: RawDocument) -> CanonicalDocument {
    let Some(cells) = raw.cells else {
        return CanonicalDocument {
            title: ERROR_TITLE.to_owned(),
            content: Vec::new(),
        };
    };

    let title = raw.title.unwrap_or_else(|| UNTITLED.to_owned());
    let cell_count = cells.len();
    let content: Vec<ContentBlock> = cells.iter().filter_map(transform_cell).collect();

    debug!(cell_count, block_count = content.len(), "normalized document");

    CanonicalDocument { title, content }
}

fn transform_cell(cell: &RawCell) -> Option<ContentBlock> {
    if cell.text.trim().is_empty() && cell.outputs.is_empty() {
        return None;
    }

    let kind = classify(&cell.cell_type);

    let source = clean_source(&cell.text);
    let source = match kind {
        BlockKind::Markdown => rewrite_inline_images(&source),
        BlockKind::Code => source,
    };

    let outputs = cell.outputs.iter().filter_map(normalize_output).collect();

    Some(ContentBlock {
        kind,
        source,
        outputs,
    })
}

/// Host type markers for markdown cells; everything else is code.
fn classify(cell_type: &str) -> BlockKind {
    match cell_type {
        "text" | "markdown" => BlockKind::Markdown,
        _ => BlockKind::Code,
    }
}

/// Normalize line endings, keep indentation untouched.
fn clean_source(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Rewrite every `![alt](url)` into an embeddable image tag. All other text
/// passes through unmodified — host text is already rendered/sanitized.
fn rewrite_inline_images(text: &str) -> String {
    INLINE_IMAGE
        .replace_all(text, r#"<img src="$2" alt="$1">"#)
        .into_owned()
}
