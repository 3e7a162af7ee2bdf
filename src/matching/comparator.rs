// src/matching/comparator.rs
// Per-question answer comparison. Each heuristic family returns a 0-100 similarity.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::models::core::{Answer, ComparisonStrategy};

/// Used when an age-range answer does not contain two numbers.
pub const DEFAULT_AGE_RANGE: (u64, u64) = (25, 35);
/// Token-overlap score when neither answer has a usable token.
pub const NEUTRAL_SCORE: u8 = 50;
/// Tokens must be longer than this to count for overlap.
const MIN_TOKEN_CHARS: usize = 3;

const NEVER_KEYWORDS: [&str; 3] = ["never", "no", "don't"];
const OCCASIONAL_KEYWORDS: [&str; 3] = ["occasionally", "sometimes", "rarely"];
const REGULAR_KEYWORDS: [&str; 4] = ["regularly", "often", "yes", "daily"];

const MARRIAGE_KEYWORDS: [&str; 5] = ["marriage", "marry", "serious", "committed", "long-term"];
const CASUAL_KEYWORDS: [&str; 4] = ["fun", "casual", "dating", "explore"];

const WANTS_CHILDREN_KEYWORDS: [&str; 3] = ["yes", "want", "would like"];
const NO_CHILDREN_KEYWORDS: [&str; 3] = ["no", "don't want", "enough"];

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid number regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrequencyLevel {
    Never = 0,
    Occasional = 1,
    Regular = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelationshipGoal {
    Marriage,
    Casual,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildrenPreference {
    Yes,
    No,
    Maybe,
}

/// Rounds half up, then clamps into the 0-100 score range.
pub(crate) fn round_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor().clamp(0.0, 100.0) as u8
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Compares two answers, choosing the heuristic from the question wording.
pub fn compare_responses(answer_a: &Answer, answer_b: &Answer, question_text: &str) -> u8 {
    compare_with_strategy(
        answer_a,
        answer_b,
        ComparisonStrategy::infer_from_text(question_text),
    )
}

pub fn compare_with_strategy(answer_a: &Answer, answer_b: &Answer, strategy: ComparisonStrategy) -> u8 {
    let text_a = answer_a.comparable_text();
    let text_b = answer_b.comparable_text();

    match strategy {
        ComparisonStrategy::AgeRange => age_range_compatibility(&text_a, &text_b),
        ComparisonStrategy::LifestyleFrequency => lifestyle_compatibility(&text_a, &text_b),
        ComparisonStrategy::GoalTaxonomy => goal_compatibility(&text_a, &text_b),
        ComparisonStrategy::ChildrenPreference => children_compatibility(&text_a, &text_b),
        ComparisonStrategy::TokenOverlap => token_overlap_similarity(&text_a, &text_b),
    }
}

/// First two integers in the text as a (min, max) range. Reversed bounds
/// such as "35-25" are reordered, so they score like "25-35" rather than as
/// an empty range. Falls back to the default range unless both numbers parse.
fn extract_age_range(text: &str) -> (u64, u64) {
    let mut matches = NUMBER_RE.find_iter(text).map(|m| m.as_str().parse::<u64>());

    match (matches.next(), matches.next()) {
        (Some(Ok(first)), Some(Ok(second))) => (first.min(second), first.max(second)),
        _ => DEFAULT_AGE_RANGE,
    }
}

pub fn age_range_compatibility(text_a: &str, text_b: &str) -> u8 {
    let (min_a, max_a) = extract_age_range(text_a);
    let (min_b, max_b) = extract_age_range(text_b);

    let overlap = max_a.min(max_b).saturating_sub(min_a.max(min_b));
    let total_span = max_a.max(max_b) - min_a.min(min_b);

    // Both answers are the same single age.
    if total_span == 0 {
        return 100;
    }

    round_score(overlap as f64 / total_span as f64 * 100.0)
}

fn frequency_level(text: &str) -> FrequencyLevel {
    if contains_any(text, &NEVER_KEYWORDS) {
        FrequencyLevel::Never
    } else if contains_any(text, &OCCASIONAL_KEYWORDS) {
        FrequencyLevel::Occasional
    } else if contains_any(text, &REGULAR_KEYWORDS) {
        FrequencyLevel::Regular
    } else {
        FrequencyLevel::Occasional
    }
}

pub fn lifestyle_compatibility(text_a: &str, text_b: &str) -> u8 {
    let level_a = frequency_level(text_a) as i32;
    let level_b = frequency_level(text_b) as i32;
    let difference = (level_a - level_b).abs() as f64;

    round_score((1.0 - difference / 2.0) * 100.0)
}

fn relationship_goal(text: &str) -> RelationshipGoal {
    if contains_any(text, &MARRIAGE_KEYWORDS) {
        RelationshipGoal::Marriage
    } else if contains_any(text, &CASUAL_KEYWORDS) {
        RelationshipGoal::Casual
    } else {
        RelationshipGoal::Open
    }
}

pub fn goal_compatibility(text_a: &str, text_b: &str) -> u8 {
    let goal_a = relationship_goal(text_a);
    let goal_b = relationship_goal(text_b);

    if goal_a == goal_b {
        95
    } else if goal_a == RelationshipGoal::Open || goal_b == RelationshipGoal::Open {
        70
    } else {
        30
    }
}

fn children_preference(text: &str) -> ChildrenPreference {
    if contains_any(text, &WANTS_CHILDREN_KEYWORDS) {
        ChildrenPreference::Yes
    } else if contains_any(text, &NO_CHILDREN_KEYWORDS) {
        ChildrenPreference::No
    } else {
        ChildrenPreference::Maybe
    }
}

pub fn children_compatibility(text_a: &str, text_b: &str) -> u8 {
    let pref_a = children_preference(text_a);
    let pref_b = children_preference(text_b);

    if pref_a == pref_b {
        90
    } else if pref_a == ChildrenPreference::Maybe || pref_b == ChildrenPreference::Maybe {
        65
    } else {
        20
    }
}

fn significant_tokens(text: &str) -> HashSet<&str> {
    text.split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .collect()
}

pub fn token_overlap_similarity(text_a: &str, text_b: &str) -> u8 {
    let tokens_a = significant_tokens(text_a);
    let tokens_b = significant_tokens(text_b);

    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        return NEUTRAL_SCORE;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();

    round_score(intersection as f64 / union as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Answer {
        Answer::from(value)
    }

    #[test]
    fn test_round_score_half_up_and_clamp() {
        assert_eq!(round_score(33.333), 33);
        assert_eq!(round_score(32.5), 33);
        assert_eq!(round_score(150.0), 100);
        assert_eq!(round_score(-4.0), 0);
        assert_eq!(round_score(f64::NAN), 0);
    }

    #[test]
    fn test_age_range_overlap() {
        let score = compare_responses(
            &text("25-35"),
            &text("30-40"),
            "What is your preferred age range for your man/woman?",
        );
        assert_eq!(score, 33);

        assert_eq!(age_range_compatibility("25-35", "25-35"), 100);
        assert_eq!(age_range_compatibility("20 to 25", "40 to 50"), 0);
        // Reversed bounds are read as the same range
        assert_eq!(age_range_compatibility("35-25", "25-35"), 100);
    }

    #[test]
    fn test_age_range_defaults_and_zero_span() {
        // Fewer than two numbers falls back to 25-35 on that side
        assert_eq!(age_range_compatibility("anything goes", "25 to 35"), 100);
        assert_eq!(age_range_compatibility("around 30", "30-40"), 33);
        // Identical single-point ranges would divide by zero
        assert_eq!(age_range_compatibility("30-30", "30 and 30"), 100);
        // Touching ranges have no overlap
        assert_eq!(age_range_compatibility("30-30", "30-40"), 0);
    }

    #[test]
    fn test_age_range_uses_first_two_numbers_only() {
        // A huge leading number is kept, not skipped in favour of later ones
        assert_eq!(age_range_compatibility("99999999999 30 40", "30-40"), 0);
        // Unparseable first number falls back to the default range
        assert_eq!(
            age_range_compatibility("99999999999999999999999 30 40", "25-35"),
            100
        );
    }

    #[test]
    fn test_lifestyle_frequency() {
        assert_eq!(compare_responses(&text("No, never"), &text("No, never"), "Do you smoke?"), 100);
        assert_eq!(compare_responses(&text("Occasionally"), &text("Yes, regularly"), "Do you drink?"), 50);
        assert_eq!(compare_responses(&text("Never"), &text("Yes, regularly"), "Do you drink?"), 0);
        // Unrecognised answers default to occasional
        assert_eq!(lifestyle_compatibility("socially", "sometimes"), 100);
        // Never keywords are checked before regular ones
        assert_eq!(lifestyle_compatibility("yes but never indoors", "never"), 100);
    }

    #[test]
    fn test_goal_taxonomy() {
        let question = "What are you looking for? Date, Marriage, Just for fun, Something else?";
        assert_eq!(compare_responses(&text("looking for marriage"), &text("just casual fun"), question), 30);
        assert_eq!(compare_responses(&text("Date to marry"), &text("Something serious"), question), 95);
        assert_eq!(compare_responses(&text("Date to marry"), &text("Not sure yet"), question), 70);
        assert_eq!(goal_compatibility("something in between", "no idea"), 95);
    }

    #[test]
    fn test_children_preference() {
        let question = "Do you want more children?";
        assert_eq!(compare_responses(&text("Yes"), &text("Yes"), question), 90);
        assert_eq!(compare_responses(&text("Yes"), &text("Maybe"), question), 65);
        assert_eq!(compare_responses(&text("Yes"), &text("No"), question), 20);
        assert_eq!(compare_responses(&text("I have enough"), &text("Undecided"), question), 65);
    }

    #[test]
    fn test_token_overlap() {
        assert_eq!(token_overlap_similarity("", ""), NEUTRAL_SCORE);
        // Short tokens are ignored entirely
        assert_eq!(token_overlap_similarity("a b to", "on it"), NEUTRAL_SCORE);
        assert_eq!(token_overlap_similarity("honesty and trust", "trust and loyalty"), 33);
        // Repeated tokens count once
        assert_eq!(token_overlap_similarity("love love love", "love"), 100);

        let score = compare_responses(
            &Answer::Multi(vec!["Family".to_string(), "Honesty".to_string()]),
            &text("honesty above everything"),
            "What is the most important thing in life?",
        );
        assert_eq!(score, 25);
    }

    #[test]
    fn test_explicit_strategy() {
        let score = compare_with_strategy(&text("No, never"), &text("daily"), ComparisonStrategy::LifestyleFrequency);
        assert_eq!(score, 0);
        let score = compare_with_strategy(&text("No, never"), &text("daily"), ComparisonStrategy::TokenOverlap);
        assert_eq!(score, 0);
    }
}
