//! Template library.
//!
//! All text the narrator produces comes from these templates. Defaults
//! ship in code; a TOML file can override any section, and sections left
//! out of the file fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse templates: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A phrase substitution applied while corrupting fragment content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistortionRule {
    pub find: String,
    pub replace: String,
}

/// Templates for fragment corruption and the post-match narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorTemplates {
    /// Prefixes for altered fragments; `{player}` expands to the actor's id
    #[serde(default = "default_alteration_prefixes")]
    pub alteration_prefixes: Vec<String>,

    /// Phrase substitutions applied to altered content, in order
    #[serde(default = "default_distortions")]
    pub distortions: Vec<DistortionRule>,

    /// Sector names rotated during alteration so locations drift
    #[serde(default = "default_sectors")]
    pub sectors: Vec<String>,

    /// Narrative openings; `{players}` and `{rounds}` expand
    #[serde(default = "default_openings")]
    pub openings: Vec<String>,

    /// Escalation lines picked when the matching events occurred
    #[serde(default = "default_war_lines")]
    pub war_lines: Vec<String>,
    #[serde(default = "default_cult_lines")]
    pub cult_lines: Vec<String>,
    #[serde(default = "default_crash_lines")]
    pub crash_lines: Vec<String>,
    #[serde(default = "default_alliance_lines")]
    pub alliance_lines: Vec<String>,

    /// Conclusions; `{winner}` and `{influence}` expand
    #[serde(default = "default_conclusions")]
    pub conclusions: Vec<String>,
}

impl Default for NarratorTemplates {
    fn default() -> Self {
        Self {
            alteration_prefixes: default_alteration_prefixes(),
            distortions: default_distortions(),
            sectors: default_sectors(),
            openings: default_openings(),
            war_lines: default_war_lines(),
            cult_lines: default_cult_lines(),
            crash_lines: default_crash_lines(),
            alliance_lines: default_alliance_lines(),
            conclusions: default_conclusions(),
        }
    }
}

impl NarratorTemplates {
    /// Loads templates from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses templates from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, TemplateError> {
        Ok(toml::from_str(content)?)
    }
}

fn default_alteration_prefixes() -> Vec<String> {
    [
        "[intercepted transmission from {player}]",
        "[recovered from a corrupted cache, courtesy of {player}]",
        "[{player} relay, integrity unverified]",
        "[fragment reassembled by {player}]",
    ]
    .map(String::from)
    .to_vec()
}

fn default_distortions() -> Vec<DistortionRule> {
    let rules = [
        (" is ", " was never "),
        (" will ", " will not "),
        (" safe ", " compromised "),
        (" destroy ", " spare "),
        (" contains ", " once contained "),
    ];
    rules
        .iter()
        .map(|(find, replace)| DistortionRule {
            find: find.to_string(),
            replace: replace.to_string(),
        })
        .collect()
}

fn default_sectors() -> Vec<String> {
    ["Alpha", "Beta", "Gamma", "Delta", "Omega"]
        .map(String::from)
        .to_vec()
}

fn default_openings() -> Vec<String> {
    [
        "As the grid entered its final collapse, {players} raced to shape what \
         the survivors would remember across {rounds} rounds.",
        "The last signal carried many voices. For {rounds} rounds, {players} \
         fought to make theirs the loudest.",
    ]
    .map(String::from)
    .to_vec()
}

fn default_war_lines() -> Vec<String> {
    [
        "Factions turned their remaining weapons on each other.",
        "Old grudges flared into open strikes across the dying network.",
    ]
    .map(String::from)
    .to_vec()
}

fn default_cult_lines() -> Vec<String> {
    [
        "Some factions stopped questioning and started worshipping.",
        "A single repeated signal hardened into scripture.",
    ]
    .map(String::from)
    .to_vec()
}

fn default_crash_lines() -> Vec<String> {
    [
        "Contradictory intelligence drove whole factions dark.",
        "Systems failed under the weight of stories that could not all be true.",
    ]
    .map(String::from)
    .to_vec()
}

fn default_alliance_lines() -> Vec<String> {
    [
        "Shared beliefs pulled unlikely partners together.",
        "Factions that trusted the same signals closed ranks.",
    ]
    .map(String::from)
    .to_vec()
}

fn default_conclusions() -> Vec<String> {
    [
        "When reality crystallized, {winner}'s story held with {influence} \
         influence. The collapsed world runs on it now.",
        "The grid went silent believing {winner}'s version of events, sealed \
         with {influence} influence.",
    ]
    .map(String::from)
    .to_vec()
}
