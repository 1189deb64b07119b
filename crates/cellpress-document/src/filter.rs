// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Options-driven pre-filter over the canonical document.
//
// The include_code/include_output toggles come from the UI layer; applying
// them here keeps the normalizer and the renderer oblivious to UI options.

use cellpress_core::types::{BlockKind, CanonicalDocument, GenerateOptions};

/// Apply the caller's toggles to an already-canonical document.
///
/// `include_code = false` blanks code-block sources (their outputs survive);
/// `include_output = false` clears output lists. Blocks left with blank
/// source and no outputs are dropped, consistent with the normalizer's
/// cell-dropping invariant.
pub fn apply_filters(doc: CanonicalDocument, options: &GenerateOptions) -> CanonicalDocument {
    if options.include_code && options.include_output {
        return doc;
    }

    let content = doc
        .content
        .into_iter()
        .filter_map(|mut block| {
            if !options.include_code && block.kind == BlockKind::Code {
                block.source.clear();
            }
            if !options.include_output {
                block.outputs.clear();
            }
            if block.source.trim().is_empty() && block.outputs.is_empty() {
                None
            } else {
                Some(block)
            }
        })
        .collect();

    CanonicalDocument {
        title: doc.title,
        content,
    }
}
