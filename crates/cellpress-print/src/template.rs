// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page template and stylesheet handling.
//
// Templates are static assets: embedded defaults, optionally overridden by
// files on disk, loaded lazily on first use and cached for the process
// lifetime (no invalidation needed). Hydration is literal placeholder
// substitution — body HTML is trusted/pre-rendered, only the title gets
// sanitized.

use std::path::PathBuf;

use chrono::Utc;
use once_cell::sync::OnceCell;
use tracing::debug;

use cellpress_core::EngineConfig;
use cellpress_core::error::Result;

pub const TITLE_SLOT: &str = "{{TITLE}}";
pub const DATE_SLOT: &str = "{{DATE}}";
pub const STYLES_SLOT: &str = "{{STYLES}}";
pub const CONTENT_SLOT: &str = "{{CONTENT}}";

const DEFAULT_TEMPLATE: &str = include_str!("../assets/minimal.html");
const DEFAULT_STYLESHEET: &str = include_str!("../assets/system.css");

/// Markdown decoration stripped from titles before substitution.
const TITLE_MARKERS: [char; 4] = ['#', '*', '_', '`'];

/// Lazily-loaded template and stylesheet text.
pub struct TemplateStore {
    template_path: Option<PathBuf>,
    stylesheet_path: Option<PathBuf>,
    template: OnceCell<String>,
    stylesheet: OnceCell<String>,
}

impl TemplateStore {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            template_path: config.template_path.clone(),
            stylesheet_path: config.stylesheet_path.clone(),
            template: OnceCell::new(),
            stylesheet: OnceCell::new(),
        }
    }

    /// Embedded assets only, no file overrides.
    pub fn embedded() -> Self {
        Self {
            template_path: None,
            stylesheet_path: None,
            template: OnceCell::new(),
            stylesheet: OnceCell::new(),
        }
    }

    /// The page template, fetched on first use.
    pub fn template(&self) -> Result<&str> {
        self.template
            .get_or_try_init(|| load(self.template_path.as_ref(), DEFAULT_TEMPLATE))
            .map(String::as_str)
    }

    /// The stylesheet injected into `{{STYLES}}`.
    pub fn stylesheet(&self) -> Result<&str> {
        self.stylesheet
            .get_or_try_init(|| load(self.stylesheet_path.as_ref(), DEFAULT_STYLESHEET))
            .map(String::as_str)
    }
}

fn load(path: Option<&PathBuf>, embedded: &str) -> Result<String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading template asset override");
            Ok(std::fs::read_to_string(path)?)
        }
        None => Ok(embedded.to_owned()),
    }
}

/// Strip markdown heading/emphasis markers and surrounding whitespace.
pub fn sanitize_title(title: &str) -> String {
    title.replace(TITLE_MARKERS, "").trim().to_owned()
}

/// Substitute the literal placeholders. Absent placeholders are a no-op, so
/// both the self-contained and the separate-stylesheet template lineages
/// hydrate with the same call.
pub fn hydrate(template: &str, title: &str, styles: &str, content: &str) -> String {
    let date = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    template
        .replace(TITLE_SLOT, &sanitize_title(title))
        .replace(DATE_SLOT, &date)
        .replace(STYLES_SLOT, styles)
        .replace(CONTENT_SLOT, content)
}
