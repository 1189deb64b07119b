// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canonical document → printable body HTML.
//
// Markdown sources are trusted (already rendered/sanitized by the host) and
// pass through as-is; code sources and text outputs are escaped.

use cellpress_core::types::{BlockKind, CanonicalDocument, ContentBlock, NormalizedOutput};

/// Minimal HTML escaping for text dropped into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Assemble the `{{CONTENT}}` body by walking the content blocks in order.
pub fn render_body(doc: &CanonicalDocument) -> String {
    doc.content
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &ContentBlock) -> String {
    match block.kind {
        BlockKind::Markdown => {
            format!(r#"<div class="cell markdown">{}</div>"#, block.source)
        }
        BlockKind::Code => {
            let outputs: String = block.outputs.iter().map(render_output).collect();
            let mut html = String::from("<div class=\"cell code-group\">\n");
            if !block.source.is_empty() {
                html.push_str(&format!(
                    "  <pre class=\"code-source\"><code>{}</code></pre>\n",
                    escape_html(&block.source)
                ));
            }
            html.push_str(&format!("  <div class=\"outputs\">{outputs}</div>\n</div>"));
            html
        }
    }
}

fn render_output(output: &NormalizedOutput) -> String {
    match output {
        NormalizedOutput::Image { mime, data } => {
            format!(r#"<img src="data:{};base64,{}" />"#, mime.as_str(), data)
        }
        NormalizedOutput::Svg { markup } => markup.clone(),
        NormalizedOutput::ImageSrc { url } => {
            format!(r#"<img src="{}" />"#, escape_html(url))
        }
        NormalizedOutput::Text { content } => {
            format!(r#"<pre class="output">{}</pre>"#, escape_html(content))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellpress_core::types::RasterMime;

    fn doc(content: Vec<ContentBlock>) -> CanonicalDocument {
        CanonicalDocument {
            title: "T".into(),
            content,
        }
    }

    #[test]
    fn markdown_blocks_pass_through_untouched() {
        let body = render_body(&doc(vec![ContentBlock {
            kind: BlockKind::Markdown,
            source: r#"<img src="x.png" alt="a">"#.into(),
            outputs: Vec::new(),
        }]));
        assert!(body.contains(r#"<div class="cell markdown"><img src="x.png" alt="a"></div>"#));
    }

    #[test]
    fn code_sources_are_escaped() {
        let body = render_body(&doc(vec![ContentBlock {
            kind: BlockKind::Code,
            source: "if a < b: print('<&>')".into(),
            outputs: Vec::new(),
        }]));
        assert!(body.contains("a &lt; b"));
        assert!(body.contains("&lt;&amp;&gt;"));
    }

    #[test]
    fn image_output_becomes_data_uri() {
        let body = render_body(&doc(vec![ContentBlock {
            kind: BlockKind::Code,
            source: "plot()".into(),
            outputs: vec![NormalizedOutput::Image {
                mime: RasterMime::Png,
                data: "AAAA".into(),
            }],
        }]));
        assert!(body.contains(r#"<img src="data:image/png;base64,AAAA" />"#));
    }

    #[test]
    fn svg_output_is_inlined_verbatim() {
        let body = render_body(&doc(vec![ContentBlock {
            kind: BlockKind::Code,
            source: "draw()".into(),
            outputs: vec![NormalizedOutput::Svg {
                markup: "<svg><rect/></svg>".into(),
            }],
        }]));
        assert!(body.contains("<svg><rect/></svg>"));
    }

    #[test]
    fn image_src_output_references_url() {
        let body = render_body(&doc(vec![ContentBlock {
            kind: BlockKind::Code,
            source: "show()".into(),
            outputs: vec![NormalizedOutput::ImageSrc {
                url: "https://example.com/p.png".into(),
            }],
        }]));
        assert!(body.contains(r#"<img src="https://example.com/p.png" />"#));
    }

    #[test]
    fn text_output_is_escaped_preformatted() {
        let body = render_body(&doc(vec![ContentBlock {
            kind: BlockKind::Code,
            source: "print()".into(),
            outputs: vec![NormalizedOutput::Text {
                content: "<done>".into(),
            }],
        }]));
        assert!(body.contains(r#"<pre class="output">&lt;done&gt;</pre>"#));
    }

    #[test]
    fn sourceless_code_block_omits_source_pre() {
        let body = render_body(&doc(vec![ContentBlock {
            kind: BlockKind::Code,
            source: String::new(),
            outputs: vec![NormalizedOutput::Text {
                content: "kept".into(),
            }],
        }]));
        assert!(!body.contains("code-source"));
        assert!(body.contains("kept"));
    }
}
