// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Read-only view of the host's private notebook model.
//
// Only the privileged context holds an implementation of these traits; the
// restricted context never sees them. Everything the pipeline learns about
// the notebook flows through this seam as plain data.

use cellpress_core::error::Result;
use cellpress_core::types::RawCell;

/// The live notebook object inside the host model.
pub trait NotebookModel: Send + Sync {
    /// The host's naming accessor. May fail on detached or half-loaded
    /// models, in which case the next recovery tier is tried.
    fn display_name(&self) -> Result<String>;

    /// The plain name field on the underlying model, when populated.
    fn model_name(&self) -> Option<String>;

    /// Walk the cell list and serialize each cell with its outputs.
    /// A failure here is reported as a null response payload by the
    /// connector, never propagated raw across the boundary.
    fn cells(&self) -> Result<Vec<RawCell>>;
}

/// The privileged context's handle on the host environment.
pub trait HostModel: Send + Sync {
    /// Locate the live notebook model. `None` when unreachable.
    fn notebook(&self) -> Option<&dyn NotebookModel>;

    /// The window/tab title, when one exists.
    fn tab_title(&self) -> Option<String>;
}

/// Suffix the host appends to the tab title.
pub const TAB_TITLE_SUFFIX: &str = " - Colab";

/// File-extension decoration stripped from derived titles.
pub const NOTEBOOK_EXTENSION: &str = ".ipynb";

/// Literal last-resort title.
pub const DEFAULT_TITLE: &str = "Notebook";

/// Recover the document title, best source first:
/// naming accessor, then the model's name field, then the tab title with the
/// host suffix and file extension stripped, then the literal fallback.
pub fn recover_title(notebook: &dyn NotebookModel, host: &dyn HostModel) -> String {
    if let Ok(name) = notebook.display_name() {
        return name;
    }
    if let Some(name) = notebook.model_name() {
        return name;
    }
    if let Some(tab) = host.tab_title() {
        return tab
            .replace(TAB_TITLE_SUFFIX, "")
            .replace(NOTEBOOK_EXTENSION, "");
    }
    DEFAULT_TITLE.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellpress_core::error::CellpressError;

    struct TierNotebook {
        accessor: Option<String>,
        field: Option<String>,
    }

    impl NotebookModel for TierNotebook {
        fn display_name(&self) -> Result<String> {
            self.accessor
                .clone()
                .ok_or_else(|| CellpressError::Extraction("accessor detached".into()))
        }

        fn model_name(&self) -> Option<String> {
            self.field.clone()
        }

        fn cells(&self) -> Result<Vec<RawCell>> {
            Ok(Vec::new())
        }
    }

    struct TierHost {
        tab: Option<String>,
        notebook: TierNotebook,
    }

    impl HostModel for TierHost {
        fn notebook(&self) -> Option<&dyn NotebookModel> {
            Some(&self.notebook)
        }

        fn tab_title(&self) -> Option<String> {
            self.tab.clone()
        }
    }

    fn host(accessor: Option<&str>, field: Option<&str>, tab: Option<&str>) -> TierHost {
        TierHost {
            tab: tab.map(str::to_owned),
            notebook: TierNotebook {
                accessor: accessor.map(str::to_owned),
                field: field.map(str::to_owned),
            },
        }
    }

    #[test]
    fn accessor_wins_when_available() {
        let h = host(Some("Analysis"), Some("ignored"), Some("ignored - Colab"));
        assert_eq!(recover_title(&h.notebook, &h), "Analysis");
    }

    #[test]
    fn name_field_used_when_accessor_throws() {
        let h = host(None, Some("FromField"), Some("ignored"));
        assert_eq!(recover_title(&h.notebook, &h), "FromField");
    }

    #[test]
    fn tab_title_stripped_of_suffix_and_extension() {
        let h = host(None, None, Some("MyNotebook.ipynb - Colab"));
        assert_eq!(recover_title(&h.notebook, &h), "MyNotebook");
    }

    #[test]
    fn literal_fallback_when_everything_is_missing() {
        let h = host(None, None, None);
        assert_eq!(recover_title(&h.notebook, &h), "Notebook");
    }
}
