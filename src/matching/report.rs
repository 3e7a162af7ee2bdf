// src/matching/report.rs
// Run report document and dashboard summary for a suggestion list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::core::{Person, PersonId};
use crate::models::matching::{Confidence, MatchSuggestion};
use crate::models::stats_models::SuggestionStats;
use crate::utils::progress_bars::logging::MatchMode;
use crate::utils::settings::MatchingSettings;

/// Output document of a batch matching run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<PersonId>,
    pub compatibility_threshold: u32,
    pub weight_total: f64,
    pub stats: SuggestionStats,
    pub suggestions: Vec<MatchSuggestion>,
}

impl MatchReport {
    pub fn new(
        run_id: String,
        mode: MatchMode,
        target_id: Option<PersonId>,
        settings: &MatchingSettings,
        people: &[Person],
        suggestions: Vec<MatchSuggestion>,
    ) -> Self {
        Self {
            run_id,
            generated_at: Utc::now(),
            mode: mode.label().to_string(),
            target_id,
            compatibility_threshold: settings.compatibility_threshold,
            weight_total: settings.weightings.total(),
            stats: summarize_suggestions(&suggestions, people),
            suggestions,
        }
    }
}

pub fn summarize_suggestions(suggestions: &[MatchSuggestion], people: &[Person]) -> SuggestionStats {
    let mut stats = SuggestionStats {
        total_suggestions: suggestions.len(),
        people_with_questionnaire: people.iter().filter(|p| p.has_questionnaire()).count(),
        ..Default::default()
    };

    let mut matched = HashSet::new();
    let mut score_sum: u64 = 0;

    for suggestion in suggestions {
        match suggestion.confidence {
            Confidence::High => stats.high_confidence += 1,
            Confidence::Medium => stats.medium_confidence += 1,
            Confidence::Low => stats.low_confidence += 1,
        }
        let score = suggestion.score.compatibility_score;
        score_sum += u64::from(score);
        stats.best_compatibility = stats.best_compatibility.max(score);
        matched.insert(suggestion.person_a.id);
        matched.insert(suggestion.person_b.id);
    }

    stats.people_matched = matched.len();
    if !suggestions.is_empty() {
        stats.avg_compatibility = score_sum as f64 / suggestions.len() as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::dedup::generate_all_match_suggestions;
    use crate::models::core::{Answer, Gender, QuestionnaireResponse};
    use uuid::Uuid;

    fn person(id: u64, gender: Gender, smoke: Option<&str>) -> Person {
        Person {
            id,
            name: format!("Person {}", id),
            age: 35,
            gender,
            location: "Baton Rouge".to_string(),
            job: Some("engineer".to_string()),
            interests: Vec::new(),
            questionnaire: smoke.map(|answer| {
                vec![QuestionnaireResponse {
                    question_id: 20,
                    question_text: "Do you smoke?".to_string(),
                    answer: Answer::from(answer),
                }]
            }),
        }
    }

    #[test]
    fn test_empty_summary() {
        let stats = summarize_suggestions(&[], &[]);
        assert_eq!(stats, SuggestionStats::default());
    }

    #[test]
    fn test_summary_counts() {
        let people = vec![
            person(1, Gender::Male, Some("No, never")),
            person(2, Gender::Female, Some("No, never")),
            person(3, Gender::Female, Some("Occasionally")),
            person(4, Gender::Female, None),
        ];
        let settings = MatchingSettings {
            compatibility_threshold: 50,
            ..MatchingSettings::default()
        };
        let suggestions = generate_all_match_suggestions(&people, &settings);
        let stats = summarize_suggestions(&suggestions, &people);

        assert_eq!(stats.total_suggestions, 2);
        assert_eq!(stats.low_confidence, 2);
        assert_eq!(stats.high_confidence, 0);
        assert_eq!(stats.best_compatibility, 60);
        assert!((stats.avg_compatibility - 55.0).abs() < 1e-9);
        assert_eq!(stats.people_with_questionnaire, 3);
        assert_eq!(stats.people_matched, 3);

        let report = MatchReport::new(Uuid::new_v4().to_string(), MatchMode::Global, None, &settings, &people, suggestions);
        assert_eq!(report.stats, stats);
        assert_eq!(report.mode, "global");
        assert_eq!(report.weight_total, 100.0);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("targetId").is_none());
        assert_eq!(json["suggestions"].as_array().map(|s| s.len()), Some(2));
        assert!(Uuid::parse_str(&report.run_id).is_ok());
    }
}
