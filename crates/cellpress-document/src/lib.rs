// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cellpress-document — pure normalization of raw notebook documents into the
// canonical document model, plus the options-driven pre-filter stage.
//
// Nothing in this crate performs I/O or holds state: `normalize` is a pure
// function from a raw document to a canonical one.

pub mod filter;
pub mod normalize;
pub mod outputs;

pub use filter::apply_filters;
pub use normalize::normalize;
