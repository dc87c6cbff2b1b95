//! Template-driven fragment corruption.
//!
//! Rewrites fragment content the way a generative narrator would: a
//! provenance prefix, phrase-level distortions, and a sector drift so
//! locations stop lining up between copies.

use rand::seq::SliceRandom;
use signal_core::oracle::{AlterationContext, AlterationOracle, OracleError};

use crate::templates::NarratorTemplates;

/// Corrupts fragment content from the template library.
pub struct TemplateAlteration {
    templates: NarratorTemplates,
}

impl TemplateAlteration {
    pub fn new(templates: NarratorTemplates) -> Self {
        Self { templates }
    }

    /// Rotates the first sector name found in the content to the next one
    /// in the template list.
    fn drift_sector(&self, content: &str) -> String {
        let sectors = &self.templates.sectors;
        for (index, sector) in sectors.iter().enumerate() {
            if content.contains(sector.as_str()) {
                let next = &sectors[(index + 1) % sectors.len()];
                return content.replacen(sector.as_str(), next, 1);
            }
        }
        content.to_string()
    }
}

impl Default for TemplateAlteration {
    fn default() -> Self {
        Self::new(NarratorTemplates::default())
    }
}

impl AlterationOracle for TemplateAlteration {
    fn alter(&self, source: &str, context: &AlterationContext) -> Result<String, OracleError> {
        let prefix = self
            .templates
            .alteration_prefixes
            .choose(&mut rand::thread_rng())
            .ok_or(OracleError::Unavailable)?
            .replace("{player}", &context.player_id);

        let mut distorted = self.drift_sector(source);
        for rule in &self.templates.distortions {
            distorted = distorted.replace(&rule.find, &rule.replace);
        }

        let content = format!("{} {}", prefix, distorted);
        if content == source {
            return Err(OracleError::Failed(
                "produced content identical to the source".to_string(),
            ));
        }
        Ok(content)
    }
}
