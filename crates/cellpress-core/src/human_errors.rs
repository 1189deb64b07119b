// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the single end-user alert.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The engine shows exactly one of these per failed run — raw error chains
// never reach the user.

use crate::error::CellpressError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Timing or host hiccup — trying again usually works.
    Transient,
    /// User must do something (open the notebook, retry later).
    ActionRequired,
    /// Cannot be fixed by retrying — missing capability, bad data.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether trying again is worthwhile.
    pub retriable: bool,
    pub severity: Severity,
}

impl HumanError {
    /// One-line form used for the alert surface.
    pub fn alert_text(&self) -> String {
        format!("{} {}", self.message, self.suggestion)
    }
}

/// Convert a `CellpressError` into a `HumanError`.
pub fn humanize_error(err: &CellpressError) -> HumanError {
    match err {
        CellpressError::HostModelUnreachable => HumanError {
            message: "We couldn't reach the notebook.".into(),
            suggestion: "Make sure the notebook has finished loading, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CellpressError::Extraction(_) => HumanError {
            message: "Reading the notebook didn't work.".into(),
            suggestion: "Reload the page and try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CellpressError::ExtractionTimeout { .. } => HumanError {
            message: "The notebook took too long to answer.".into(),
            suggestion: "The page may be busy running cells. Wait a moment and try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CellpressError::BridgeClosed(_) => HumanError {
            message: "The connection to the notebook was lost.".into(),
            suggestion: "Reload the page and try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CellpressError::Template(_) => HumanError {
            message: "The print layout couldn't be prepared.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CellpressError::Render(_) => HumanError {
            message: "The printable page couldn't be built.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CellpressError::Strategy(_) => HumanError {
            message: "Creating the PDF didn't work.".into(),
            suggestion: "Try again, or use your browser's own Print → Save as PDF.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CellpressError::StrategyUnavailable(_) => HumanError {
            message: "This PDF method isn't available here.".into(),
            suggestion: "Pick a different method, or use automatic mode.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        CellpressError::StrategyTimeout { .. } => HumanError {
            message: "Creating the PDF took too long.".into(),
            suggestion: "Large notebooks can be slow. Try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CellpressError::AllStrategiesFailed => HumanError {
            message: "We couldn't create the PDF automatically.".into(),
            suggestion: "Use the saved page with the included print instructions instead.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CellpressError::SessionBusy => HumanError {
            message: "A document is already being generated.".into(),
            suggestion: "Wait for it to finish, then try again.".into(),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        CellpressError::Io(_) => HumanError {
            message: "There was a problem reading a template file.".into(),
            suggestion: "Check the configured template path, or remove the override.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CellpressError::Serialization(_) => HumanError {
            message: "The notebook data couldn't be understood.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
