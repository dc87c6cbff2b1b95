//! Template-driven match narration.
//!
//! Builds the three-part closing narrative from the event log: an
//! opening naming the players, escalation lines for each kind of
//! upheaval the match produced, and a conclusion crowning the winner.

use rand::seq::SliceRandom;
use signal_core::oracle::{NarrativeOracle, OracleError};
use signal_events::{EventCategory, NarrativeReport, PlayerSummary, WorldEvent};

use crate::templates::NarratorTemplates;

/// Narrates a finished match from the template library.
pub struct TemplateNarrator {
    templates: NarratorTemplates,
}

impl TemplateNarrator {
    pub fn new(templates: NarratorTemplates) -> Self {
        Self { templates }
    }

    fn escalation_lines(&self, events: &[WorldEvent]) -> Vec<&str> {
        let count =
            |category| events.iter().filter(|e| e.category == category).count();
        let sections = [
            (EventCategory::War, &self.templates.war_lines),
            (EventCategory::Cult, &self.templates.cult_lines),
            (EventCategory::Crash, &self.templates.crash_lines),
            (EventCategory::Alliance, &self.templates.alliance_lines),
        ];

        let mut rng = rand::thread_rng();
        sections
            .iter()
            .filter(|(category, lines)| count(*category) > 0 && !lines.is_empty())
            .filter_map(|(_, lines)| lines.choose(&mut rng).map(String::as_str))
            .collect()
    }
}

impl Default for TemplateNarrator {
    fn default() -> Self {
        Self::new(NarratorTemplates::default())
    }
}

impl NarrativeOracle for TemplateNarrator {
    fn narrate(
        &self,
        events: &[WorldEvent],
        standings: &[PlayerSummary],
        winner: &PlayerSummary,
    ) -> Result<NarrativeReport, OracleError> {
        let mut rng = rand::thread_rng();

        let names: Vec<&str> = standings.iter().map(|p| p.name.as_str()).collect();
        let rounds = events.iter().map(|e| e.round).max().unwrap_or(0) + 1;
        let summary = self
            .templates
            .openings
            .choose(&mut rng)
            .ok_or(OracleError::Unavailable)?
            .replace("{players}", &names.join(", "))
            .replace("{rounds}", &rounds.to_string());

        let lines = self.escalation_lines(events);
        if lines.is_empty() {
            // A quiet match reads better from the engine's own template
            return Err(OracleError::Failed("no upheaval to narrate".to_string()));
        }
        let key_moments = lines.join(" ");

        let conclusion = self
            .templates
            .conclusions
            .choose(&mut rng)
            .ok_or(OracleError::Unavailable)?
            .replace("{winner}", &winner.name)
            .replace("{influence}", &format!("{:.1}", winner.influence));

        Ok(NarrativeReport {
            summary,
            key_moments,
            conclusion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, influence: f64) -> PlayerSummary {
        PlayerSummary {
            id: format!("player_{}", name.to_lowercase()),
            name: name.to_string(),
            influence,
            actions_taken: 4,
        }
    }

    fn eventful_log() -> Vec<WorldEvent> {
        vec![
            WorldEvent::new(0, "strike launched", EventCategory::War),
            WorldEvent::new(1, "cult formed", EventCategory::Cult),
            WorldEvent::new(2, "alliance formed", EventCategory::Alliance),
        ]
    }

    #[test]
    fn test_narrative_names_players_and_winner() {
        let narrator = TemplateNarrator::default();
        let standings = vec![player("Alice", 3.3), player("Bob", 1.5)];
        let report = narrator
            .narrate(&eventful_log(), &standings, &standings[0])
            .unwrap();

        assert!(report.summary.contains("Alice, Bob"));
        assert!(report.summary.contains('3'));
        assert!(report.conclusion.contains("Alice"));
        assert!(report.conclusion.contains("3.3"));
    }

    #[test]
    fn test_escalation_covers_each_present_category() {
        let narrator = TemplateNarrator::default();
        let lines = narrator.escalation_lines(&eventful_log());
        // War, cult, and alliance fired; no crashes occurred
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_quiet_match_declines() {
        let narrator = TemplateNarrator::default();
        let standings = vec![player("Alice", 0.5)];
        let result = narrator.narrate(&[], &standings, &standings[0]);
        assert!(matches!(result, Err(OracleError::Failed(_))));
    }
}
