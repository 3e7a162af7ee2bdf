// src/matching/scorer.rs
// Pairwise compatibility: per-question comparisons, category breakdown, weighted score and insights.

use log::{debug, warn};

use crate::matching::category::{aggregate_comparisons, aggregate_legacy};
use crate::matching::comparator::{compare_with_strategy, round_score};
use crate::models::core::{Person, Question, QuestionSet};
use crate::models::matching::{CategoryBreakdown, ComparisonStatus, MatchScore, QuestionComparison};
use crate::utils::settings::Weightings;

const CLOSE_AGE_YEARS: u32 = 5;
const LARGE_AGE_GAP_YEARS: u32 = 15;

const STRONG_VALUES: u8 = 80;
const STRONG_GOALS: u8 = 85;
const STRONG_PERSONALITY: u8 = 80;
const STRONG_LIFESTYLE: u8 = 75;

const WEAK_VALUES: u8 = 60;
const WEAK_GOALS: u8 = 50;
const WEAK_LIFESTYLE: u8 = 50;

/// Scores `person_b` against `person_a`. Never fails: missing questionnaire
/// data on either side yields a zero score with a single concern.
pub fn calculate_compatibility(
    person_a: &Person,
    person_b: &Person,
    weightings: &Weightings,
    question_set: Option<&QuestionSet>,
) -> MatchScore {
    let (responses_a, responses_b) = match (person_a.responses(), person_b.responses()) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            debug!(
                "Missing questionnaire data for pair {} / {}",
                person_a.id, person_b.id
            );
            return MatchScore::incomplete(person_b.id);
        }
    };

    let questions = question_set
        .map(|set| set.for_gender(person_a.gender))
        .unwrap_or_default();
    let detailed_comparisons = build_comparisons(person_a, person_b, questions);

    let breakdown = if detailed_comparisons.is_empty() {
        aggregate_legacy(responses_a, responses_b)
    } else {
        aggregate_comparisons(&detailed_comparisons)
    };

    let compatibility_score = weighted_score(&breakdown, weightings);
    let (match_reasons, concerns) = match_insights(person_a, person_b, &breakdown);

    debug!(
        "Pair {} / {}: score {} from {:?} ({} comparisons)",
        person_a.id,
        person_b.id,
        compatibility_score,
        breakdown,
        detailed_comparisons.len()
    );

    MatchScore {
        subject_id: person_b.id,
        compatibility_score,
        breakdown,
        match_reasons,
        concerns,
        detailed_comparisons,
    }
}

/// One comparison per configured question, in question order.
fn build_comparisons(person_a: &Person, person_b: &Person, questions: &[Question]) -> Vec<QuestionComparison> {
    questions
        .iter()
        .map(|question| {
            let answer_a = person_a.response_for(question.id).map(|r| r.answer.clone());
            let answer_b = person_b.response_for(question.id).map(|r| r.answer.clone());

            let (status, score) = match (&answer_a, &answer_b) {
                (Some(a), Some(b)) => {
                    let score = compare_with_strategy(a, b, question.comparison_strategy());
                    (ComparisonStatus::from_score(score), score)
                }
                _ => (ComparisonStatus::NotApplicable, 0),
            };

            QuestionComparison {
                question_id: question.id,
                question_text: question.text.clone(),
                answer_a,
                answer_b,
                status,
                category: question.category.clone(),
                score,
            }
        })
        .collect()
}

/// Weighted sum over 100 using the raw weights. Totals other than 100 scale
/// the result; it is clamped to 0-100 afterwards.
pub fn weighted_score(breakdown: &CategoryBreakdown, weightings: &Weightings) -> u8 {
    let weighted = f64::from(breakdown.lifestyle) * weightings.lifestyle
        + f64::from(breakdown.values) * weightings.values
        + f64::from(breakdown.personality) * weightings.personality
        + f64::from(breakdown.physical_preferences) * weightings.physical_preferences
        + f64::from(breakdown.relationship_goals) * weightings.relationship_goals;
    let raw = weighted / 100.0;

    if raw > 100.5 {
        warn!(
            "Weighted score {:.1} exceeds 100 (weight total {}); clamping",
            raw,
            weightings.total()
        );
    }
    round_score(raw)
}

fn match_insights(
    person_a: &Person,
    person_b: &Person,
    breakdown: &CategoryBreakdown,
) -> (Vec<String>, Vec<String>) {
    let mut reasons = Vec::new();
    let mut concerns = Vec::new();

    if breakdown.values >= STRONG_VALUES {
        reasons.push("Strong alignment on core values and life principles".to_string());
    }
    if breakdown.relationship_goals >= STRONG_GOALS {
        reasons.push("Similar relationship goals and expectations".to_string());
    }
    if breakdown.personality >= STRONG_PERSONALITY {
        reasons.push("Compatible personality types and social preferences".to_string());
    }
    if breakdown.lifestyle >= STRONG_LIFESTYLE {
        reasons.push("Similar lifestyle choices and daily habits".to_string());
    }

    let age_gap = person_a.age.abs_diff(person_b.age);
    if age_gap <= CLOSE_AGE_YEARS {
        reasons.push("Close in age with similar life stages".to_string());
    } else if age_gap > LARGE_AGE_GAP_YEARS {
        concerns.push(format!(
            "Significant age gap ({} years) may affect compatibility",
            age_gap
        ));
    }

    if person_a.location == person_b.location {
        reasons.push("Same location - easy to meet in person".to_string());
    }

    if breakdown.values < WEAK_VALUES {
        concerns.push("Different core values may lead to conflicts".to_string());
    }
    if breakdown.relationship_goals < WEAK_GOALS {
        concerns.push("Misaligned relationship expectations".to_string());
    }
    if breakdown.lifestyle < WEAK_LIFESTYLE {
        concerns.push("Very different lifestyle preferences".to_string());
    }

    (reasons, concerns)
}
