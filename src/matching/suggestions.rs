// src/matching/suggestions.rs
// Ranked match suggestions for a single target person.

use log::{debug, info};

use crate::matching::scorer::calculate_compatibility;
use crate::models::core::Person;
use crate::models::matching::{Confidence, MatchScore, MatchSuggestion};
use crate::utils::settings::MatchingSettings;

const MAX_SHARED_INTERESTS: usize = 2;

/// Opposite-gender candidates from the pool, excluding the target itself.
/// A target without a male/female tag gets no candidates.
pub fn eligible_candidates<'a>(target: &Person, pool: &'a [Person]) -> Vec<&'a Person> {
    let Some(wanted) = target.gender.opposite() else {
        debug!(
            "Target {} has no male/female gender tag; no candidates",
            target.id
        );
        return Vec::new();
    };

    pool.iter()
        .filter(|candidate| candidate.id != target.id && candidate.gender == wanted)
        .collect()
}

/// Scores every eligible candidate, keeps those at or above the threshold and
/// ranks them by score (ties keep pool order).
pub fn generate_match_suggestions(
    target: &Person,
    pool: &[Person],
    settings: &MatchingSettings,
) -> Vec<MatchSuggestion> {
    if !settings.enabled {
        debug!("Matching disabled; skipping suggestions for {}", target.id);
        return Vec::new();
    }

    let candidates = eligible_candidates(target, pool);
    let threshold = settings.compatibility_threshold;

    let mut qualified: Vec<(&Person, MatchScore)> = candidates
        .into_iter()
        .map(|candidate| {
            let score = calculate_compatibility(
                target,
                candidate,
                &settings.weightings,
                settings.question_set.as_ref(),
            );
            (candidate, score)
        })
        .filter(|(_, score)| u32::from(score.compatibility_score) >= threshold)
        .collect();

    qualified.sort_by(|(_, a), (_, b)| b.compatibility_score.cmp(&a.compatibility_score));

    debug!(
        "{} ({}): {} suggestions at or above {}%",
        target.name,
        target.id,
        qualified.len(),
        threshold
    );

    qualified
        .into_iter()
        .map(|(candidate, score)| {
            let suggested_introduction = generate_introduction(target, candidate, &score);
            MatchSuggestion {
                person_a: target.clone(),
                person_b: candidate.clone(),
                confidence: Confidence::from_score(score.compatibility_score),
                score,
                suggested_introduction,
            }
        })
        .collect()
}

/// Introduction blurb addressed to `target` about `candidate`.
pub fn generate_introduction(target: &Person, candidate: &Person, score: &MatchScore) -> String {
    let descriptor = match candidate.job.as_deref().map(str::trim) {
        Some(job) if !job.is_empty() => format!("{}-year-old {}", candidate.age, job),
        _ => format!("{}-year-old", candidate.age),
    };

    let mut intro = format!(
        "Hi {}! I'd like to introduce you to {}, a {} from {}.",
        target.name, candidate.name, descriptor, candidate.location
    );

    let shared_interests: Vec<&str> = target
        .interests
        .iter()
        .filter(|interest| candidate.interests.contains(interest))
        .take(MAX_SHARED_INTERESTS)
        .map(String::as_str)
        .collect();
    if !shared_interests.is_empty() {
        intro.push_str(&format!(
            " You both share interests in {}.",
            shared_interests.join(" and ")
        ));
    }

    if let Some(reason) = score.match_reasons.first() {
        intro.push_str(&format!(
            " Based on your questionnaire responses, you have {}.",
            reason.to_lowercase()
        ));
    }

    intro.push_str(&format!(
        " Your compatibility score is {}% - I think you two could be a great match!",
        score.compatibility_score
    ));

    intro
}

/// Logs a one-line summary per suggestion for operators.
pub fn log_suggestions(target: &Person, suggestions: &[MatchSuggestion]) {
    info!(
        "💞 {} suggestion(s) for {} ({})",
        suggestions.len(),
        target.name,
        target.id
    );
    for suggestion in suggestions {
        info!(
            "   {} → {}: {}% ({} confidence)",
            suggestion.person_a.name,
            suggestion.person_b.name,
            suggestion.score.compatibility_score,
            suggestion.confidence
        );
    }
}
