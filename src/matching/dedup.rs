// src/matching/dedup.rs
// Global suggestions: every person against the full pool, mirrored pairs collapsed.

use indicatif::ProgressBar;
use log::info;
use std::collections::HashSet;

use crate::matching::suggestions::generate_match_suggestions;
use crate::models::core::{Person, PersonId};
use crate::models::matching::MatchSuggestion;
use crate::utils::settings::MatchingSettings;

/// Runs the single-target generator for every person and keeps one
/// suggestion per unordered pair. The direction computed first (in `people`
/// order) survives. Result is ranked by score, ties keep generation order.
pub fn generate_all_match_suggestions(
    people: &[Person],
    settings: &MatchingSettings,
) -> Vec<MatchSuggestion> {
    generate_all_with_progress(people, settings, None)
}

pub fn generate_all_with_progress(
    people: &[Person],
    settings: &MatchingSettings,
    progress: Option<&ProgressBar>,
) -> Vec<MatchSuggestion> {
    let mut all_suggestions = Vec::new();
    for person in people {
        all_suggestions.extend(generate_match_suggestions(person, people, settings));
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }
    let generated = all_suggestions.len();

    let mut unique = dedupe_mirrored_pairs(all_suggestions);
    unique.sort_by(|a, b| b.score.compatibility_score.cmp(&a.score.compatibility_score));

    info!(
        "Generated {} suggestions for {} people, {} unique pairs after deduplication",
        generated,
        people.len(),
        unique.len()
    );
    unique
}

/// Drops every suggestion whose unordered pair was already seen earlier in the list.
pub fn dedupe_mirrored_pairs(suggestions: Vec<MatchSuggestion>) -> Vec<MatchSuggestion> {
    let mut seen: HashSet<(PersonId, PersonId)> = HashSet::with_capacity(suggestions.len());
    suggestions
        .into_iter()
        .filter(|suggestion| seen.insert(suggestion.pair_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::{Answer, Gender, QuestionnaireResponse};
    use crate::models::matching::{Confidence, MatchScore};
    use std::collections::HashMap;

    fn person(id: u64, gender: Gender, age: u32, smoke: &str) -> Person {
        Person {
            id,
            name: format!("Person {}", id),
            age,
            gender,
            location: format!("Town {}", id),
            job: None,
            interests: Vec::new(),
            questionnaire: Some(vec![QuestionnaireResponse {
                question_id: 20,
                question_text: "Do you smoke?".to_string(),
                answer: Answer::from(smoke),
            }]),
        }
    }

    fn population() -> Vec<Person> {
        vec![
            person(1, Gender::Male, 30, "No, never"),
            person(2, Gender::Female, 31, "No, never"),
            person(3, Gender::Female, 52, "Occasionally"),
            person(4, Gender::Male, 29, "Yes, daily"),
            person(5, Gender::Unspecified, 30, "No, never"),
        ]
    }

    fn settings(threshold: u32) -> MatchingSettings {
        MatchingSettings {
            compatibility_threshold: threshold,
            ..MatchingSettings::default()
        }
    }

    #[test]
    fn test_each_unordered_pair_appears_once() {
        let people = population();
        let suggestions = generate_all_match_suggestions(&people, &settings(0));

        let mut pair_counts: HashMap<(u64, u64), usize> = HashMap::new();
        for suggestion in &suggestions {
            *pair_counts.entry(suggestion.pair_key()).or_default() += 1;
            assert_ne!(suggestion.person_a.gender, suggestion.person_b.gender);
            assert_ne!(suggestion.person_a.id, suggestion.person_b.id);
        }
        // Two men x two women
        assert_eq!(pair_counts.len(), 4);
        assert!(pair_counts.values().all(|&count| count == 1));
    }

    #[test]
    fn test_first_direction_wins_and_sorted() {
        let people = population();
        let suggestions = generate_all_match_suggestions(&people, &settings(0));

        // Person 1 is processed first, so every pair involving 1 is kept from 1's side
        for suggestion in suggestions.iter().filter(|s| s.pair_key().0 == 1) {
            assert_eq!(suggestion.person_a.id, 1);
        }

        let scores: Vec<u8> = suggestions.iter().map(|s| s.score.compatibility_score).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
        assert_eq!(suggestions[0].pair_key(), (1, 2));
    }

    #[test]
    fn test_tied_pairs_keep_generation_order() {
        let people = vec![
            person(1, Gender::Male, 30, "No, never"),
            person(9, Gender::Female, 30, "No, never"),
            person(3, Gender::Female, 30, "No, never"),
            person(7, Gender::Female, 30, "No, never"),
        ];
        let suggestions = generate_all_match_suggestions(&people, &settings(0));

        let pairs: Vec<(u64, u64)> = suggestions
            .iter()
            .map(|s| (s.person_a.id, s.person_b.id))
            .collect();
        assert_eq!(pairs, vec![(1, 9), (1, 3), (1, 7)]);
    }

    #[test]
    fn test_threshold_above_maximum_yields_nothing() {
        let people = population();
        assert!(generate_all_match_suggestions(&people, &settings(101)).is_empty());
        assert!(generate_all_match_suggestions(&[], &settings(0)).is_empty());
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let people = population();
        let make = |a: &Person, b: &Person, score: u8| MatchSuggestion {
            person_a: a.clone(),
            person_b: b.clone(),
            score: MatchScore {
                compatibility_score: score,
                ..MatchScore::incomplete(b.id)
            },
            confidence: Confidence::from_score(score),
            suggested_introduction: String::new(),
        };
        let input = vec![
            make(&people[1], &people[0], 70),
            make(&people[0], &people[1], 70),
            make(&people[0], &people[2], 40),
        ];

        let unique = dedupe_mirrored_pairs(input);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].person_a.id, 2);
        assert_eq!(unique[1].pair_key(), (1, 3));
    }
}
