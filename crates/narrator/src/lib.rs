//! Narrator: generative collaborators for the LastSignal engine.
//!
//! The engine runs complete matches on deterministic policy alone; this
//! crate supplies the optional flavor layer on top. Three collaborators
//! plug into the engine's oracle slots:
//!
//! - [`alteration`]: template-driven corruption of altered fragments
//! - [`decision`]: heuristic faction decisions beyond the built-in ladder
//! - [`narrative`]: templated closing narration of a finished match
//!
//! Each one can decline or fail; the engine then falls back to its own
//! policy, so a missing or broken narrator never stalls a match.

pub mod alteration;
pub mod decision;
pub mod narrative;
pub mod templates;

pub use alteration::TemplateAlteration;
pub use decision::HeuristicDecision;
pub use narrative::TemplateNarrator;
pub use templates::{DistortionRule, NarratorTemplates, TemplateError};

use signal_core::Oracles;

/// The full collaborator set, built from one template library.
pub fn standard_oracles(templates: NarratorTemplates) -> Oracles {
    Oracles::none()
        .with_alteration(Box::new(TemplateAlteration::new(templates.clone())))
        .with_decision(Box::new(HeuristicDecision::new()))
        .with_narrative(Box::new(TemplateNarrator::new(templates)))
}
