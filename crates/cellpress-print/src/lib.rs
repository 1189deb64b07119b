// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cellpress-print — turns a canonical document into a printed or exported
// artifact: template hydration, HTML assembly, the off-screen render surface,
// the best-available generation strategy chain, and the session-guarded
// `PressEngine::generate()` entry point.

pub mod chain;
pub mod engine;
pub mod html;
pub mod orchestrator;
pub mod strategy;
pub mod surface;
pub mod template;

pub use chain::StrategyChain;
pub use engine::{PressEngine, RunStatus, StatusIndicator};
pub use orchestrator::RenderOrchestrator;
pub use surface::{RenderSurface, SurfaceHost};
pub use template::TemplateStore;
