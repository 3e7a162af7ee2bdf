// src/matching/category.rs
// Folds per-question scores into the five compatibility buckets.

use log::warn;
use std::collections::BTreeSet;

use crate::matching::comparator::{compare_responses, round_score, NEUTRAL_SCORE};
use crate::models::core::QuestionnaireResponse;
use crate::models::matching::{CategoryBreakdown, ComparisonStatus, QuestionComparison};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryBucket {
    Lifestyle,
    Values,
    Personality,
    PhysicalPreferences,
    RelationshipGoals,
}

impl CategoryBucket {
    pub const ALL: [CategoryBucket; 5] = [
        CategoryBucket::Lifestyle,
        CategoryBucket::Values,
        CategoryBucket::Personality,
        CategoryBucket::PhysicalPreferences,
        CategoryBucket::RelationshipGoals,
    ];

    /// Bucket for a configured category label. `None` for labels we don't know.
    pub fn from_label(label: &str) -> Option<Self> {
        // Labels are lowercased before matching, so the camelCase bucket names
        // arrive as "physicalpreferences" / "relationshipgoals" and get their own
        // buckets here instead of falling through to lifestyle.
        match label.trim().to_lowercase().as_str() {
            "lifestyle" | "basic" => Some(CategoryBucket::Lifestyle),
            "values" => Some(CategoryBucket::Values),
            "personality" => Some(CategoryBucket::Personality),
            "physicalpreferences" | "physical_preferences" | "preferences" => {
                Some(CategoryBucket::PhysicalPreferences)
            }
            "relationshipgoals" | "relationship_goals" | "relationship" | "family" => {
                Some(CategoryBucket::RelationshipGoals)
            }
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            CategoryBucket::Lifestyle => 0,
            CategoryBucket::Values => 1,
            CategoryBucket::Personality => 2,
            CategoryBucket::PhysicalPreferences => 3,
            CategoryBucket::RelationshipGoals => 4,
        }
    }

    /// Known question phrasings used when no question set is configured.
    fn legacy_phrasings(self) -> &'static [&'static str] {
        match self {
            CategoryBucket::Lifestyle => &LEGACY_LIFESTYLE,
            CategoryBucket::Values => &LEGACY_VALUES,
            CategoryBucket::Personality => &LEGACY_PERSONALITY,
            CategoryBucket::PhysicalPreferences => &LEGACY_PHYSICAL_PREFERENCES,
            CategoryBucket::RelationshipGoals => &LEGACY_RELATIONSHIP_GOALS,
        }
    }
}

const LEGACY_LIFESTYLE: [&str; 11] = [
    "Do you smoke?",
    "Do you drink?",
    "Do you like going out sometimes to party?",
    "Do you like staying home sometimes relaxing and watching a movie?",
    "Do you like hanging out on the beach?",
    "Do you like to work out and exercise?",
    "Do you like to travel?",
    "Do you like to clean house?",
    "Do you like to cook?",
    "Do you dress to impress or comfy?",
    "Dogs or cats?",
];

const LEGACY_VALUES: [&str; 5] = [
    "What do you consider good table manners?",
    "How do you feel about plastic surgery like breast implants?",
    "Would you rather marry for money or love?",
    "Are you a religious person? What is your religion?",
    "What is the most important thing in a relationship?",
];

const LEGACY_PERSONALITY: [&str; 5] = [
    "Are you affectionate and clingy?",
    "Are you adventurous and outgoing?",
    "Are you shy?",
    "Introvert or extrovert or ambivert?",
    "What is your biggest pet peeve?",
];

const LEGACY_PHYSICAL_PREFERENCES: [&str; 6] = [
    "What physically do you want in a woman?",
    "What physically do you want in a man?",
    "What is your opinion of makeup on a woman?",
    "What is your opinion on tattoos on a woman?",
    "What is your opinion of facial hair on a man?",
    "What is your opinion on tattoos on a man?",
];

const LEGACY_RELATIONSHIP_GOALS: [&str; 4] = [
    "Are you looking for date to marry or just for fun or something in between?",
    "Do you want more children?",
    "How important is sex to you when in a relationship?",
    "When in a committed relationship how many times a week do you want to have sex?",
];

#[derive(Debug, Default)]
struct BucketScores {
    scores: [Vec<u8>; 5],
}

impl BucketScores {
    fn push(&mut self, bucket: CategoryBucket, score: u8) {
        self.scores[bucket.index()].push(score);
    }

    fn average(&self, bucket: CategoryBucket) -> u8 {
        let scores = &self.scores[bucket.index()];
        if scores.is_empty() {
            return NEUTRAL_SCORE;
        }
        let total: u32 = scores.iter().map(|&s| u32::from(s)).sum();
        round_score(f64::from(total) / scores.len() as f64)
    }

    fn into_breakdown(self) -> CategoryBreakdown {
        CategoryBreakdown {
            lifestyle: self.average(CategoryBucket::Lifestyle),
            values: self.average(CategoryBucket::Values),
            personality: self.average(CategoryBucket::Personality),
            physical_preferences: self.average(CategoryBucket::PhysicalPreferences),
            relationship_goals: self.average(CategoryBucket::RelationshipGoals),
        }
    }
}

/// Averages answered comparisons per bucket. Empty buckets score 50.
/// Unknown category labels are counted under lifestyle.
pub fn aggregate_comparisons(comparisons: &[QuestionComparison]) -> CategoryBreakdown {
    let mut buckets = BucketScores::default();
    let mut unknown_labels: BTreeSet<&str> = BTreeSet::new();

    for comparison in comparisons
        .iter()
        .filter(|c| c.status != ComparisonStatus::NotApplicable)
    {
        let bucket = CategoryBucket::from_label(&comparison.category).unwrap_or_else(|| {
            unknown_labels.insert(comparison.category.as_str());
            CategoryBucket::Lifestyle
        });
        buckets.push(bucket, comparison.score);
    }

    if !unknown_labels.is_empty() {
        warn!(
            "Unrecognized question categories folded into lifestyle: {:?}",
            unknown_labels
        );
    }

    buckets.into_breakdown()
}

/// Breakdown from raw responses matched against the built-in phrasing table.
pub fn aggregate_legacy(
    responses_a: &[QuestionnaireResponse],
    responses_b: &[QuestionnaireResponse],
) -> CategoryBreakdown {
    let mut buckets = BucketScores::default();

    for bucket in CategoryBucket::ALL {
        for phrasing in bucket.legacy_phrasings() {
            let stem = phrasing.split('?').next().unwrap_or(phrasing);
            let response_a = responses_a.iter().find(|r| r.question_text.contains(stem));
            let response_b = responses_b.iter().find(|r| r.question_text.contains(stem));

            if let (Some(a), Some(b)) = (response_a, response_b) {
                buckets.push(bucket, compare_responses(&a.answer, &b.answer, phrasing));
            }
        }
    }

    buckets.into_breakdown()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::Answer;

    fn comparison(category: &str, status: ComparisonStatus, score: u8) -> QuestionComparison {
        QuestionComparison {
            question_id: 1,
            question_text: "Question?".to_string(),
            answer_a: Some(Answer::from("a")),
            answer_b: Some(Answer::from("b")),
            status,
            category: category.to_string(),
            score,
        }
    }

    fn response(id: u64, question: &str, answer: &str) -> QuestionnaireResponse {
        QuestionnaireResponse {
            question_id: id,
            question_text: question.to_string(),
            answer: Answer::from(answer),
        }
    }

    #[test]
    fn test_empty_comparisons_are_neutral() {
        let breakdown = aggregate_comparisons(&[]);
        assert_eq!(
            breakdown,
            CategoryBreakdown {
                lifestyle: 50,
                values: 50,
                personality: 50,
                physical_preferences: 50,
                relationship_goals: 50,
            }
        );
    }

    #[test]
    fn test_category_folding() {
        let comparisons = vec![
            comparison("lifestyle", ComparisonStatus::Match, 100),
            comparison("basic", ComparisonStatus::Mismatch, 51),
            comparison("preferences", ComparisonStatus::Partial, 70),
            comparison("family", ComparisonStatus::Match, 90),
            comparison("relationship", ComparisonStatus::Mismatch, 20),
            comparison("Values", ComparisonStatus::Match, 80),
        ];
        let breakdown = aggregate_comparisons(&comparisons);
        assert_eq!(breakdown.lifestyle, 76); // (100 + 51) / 2 = 75.5
        assert_eq!(breakdown.physical_preferences, 70);
        assert_eq!(breakdown.relationship_goals, 55);
        assert_eq!(breakdown.values, 80);
        assert_eq!(breakdown.personality, 50);
    }

    #[test]
    fn test_unknown_labels_fold_into_lifestyle() {
        let comparisons = vec![
            comparison("general", ComparisonStatus::Mismatch, 10),
            comparison("astrology", ComparisonStatus::Mismatch, 30),
        ];
        let breakdown = aggregate_comparisons(&comparisons);
        assert_eq!(breakdown.lifestyle, 20);
        assert_eq!(breakdown.values, 50);
    }

    #[test]
    fn test_not_applicable_is_skipped() {
        let comparisons = vec![
            comparison("values", ComparisonStatus::NotApplicable, 0),
            comparison("values", ComparisonStatus::Match, 90),
        ];
        assert_eq!(aggregate_comparisons(&comparisons).values, 90);
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(CategoryBucket::from_label("physicalPreferences"), Some(CategoryBucket::PhysicalPreferences));
        assert_eq!(CategoryBucket::from_label("relationship_goals"), Some(CategoryBucket::RelationshipGoals));
        assert_eq!(CategoryBucket::from_label(" Personality "), Some(CategoryBucket::Personality));
        assert_eq!(CategoryBucket::from_label("general"), None);
    }

    #[test]
    fn test_legacy_aggregation() {
        let responses_a = vec![
            response(20, "Do you smoke?", "No, never"),
            response(21, "Do you drink?", "Occasionally"),
            response(51, "Are you looking for date to marry or just for fun or something in between?", "Date to marry"),
            response(17, "Are you affectionate and clingy? (be honest)", "Very affectionate"),
        ];
        let responses_b = vec![
            response(20, "Do you smoke?", "No, never"),
            response(21, "Do you drink?", "Yes, regularly"),
            response(51, "Are you looking for date to marry or just for fun or something in between?", "Just for fun"),
        ];

        let breakdown = aggregate_legacy(&responses_a, &responses_b);
        assert_eq!(breakdown.lifestyle, 75); // smoke 100, drink 50
        assert_eq!(breakdown.relationship_goals, 30);
        // Only one side answered the personality question
        assert_eq!(breakdown.personality, 50);
        assert_eq!(breakdown.values, 50);
        assert_eq!(breakdown.physical_preferences, 50);
    }

    #[test]
    fn test_legacy_with_no_known_questions() {
        let responses = vec![response(1, "What is your full name?", "Alex")];
        let breakdown = aggregate_legacy(&responses, &responses);
        assert_eq!(breakdown.lifestyle, 50);
        assert_eq!(breakdown.relationship_goals, 50);
    }
}
