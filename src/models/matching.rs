// src/models/matching.rs
// Derived scoring records. Computed fresh per call, never cached.

use serde::{Deserialize, Serialize};

use crate::models::core::{Answer, Person, PersonId, QuestionId};

pub const MATCH_STATUS_THRESHOLD: u8 = 80;
pub const PARTIAL_STATUS_THRESHOLD: u8 = 60;

pub const HIGH_CONFIDENCE_THRESHOLD: u8 = 85;
pub const MEDIUM_CONFIDENCE_THRESHOLD: u8 = 70;

pub const INCOMPLETE_QUESTIONNAIRE_CONCERN: &str = "Incomplete questionnaire data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    Match,
    Partial,
    Mismatch,
    NotApplicable,
}

impl ComparisonStatus {
    pub fn from_score(score: u8) -> Self {
        if score >= MATCH_STATUS_THRESHOLD {
            ComparisonStatus::Match
        } else if score >= PARTIAL_STATUS_THRESHOLD {
            ComparisonStatus::Partial
        } else {
            ComparisonStatus::Mismatch
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionComparison {
    pub question_id: QuestionId,
    #[serde(rename = "question")]
    pub question_text: String,
    /// `None` when the subject gave no response to this question.
    pub answer_a: Option<Answer>,
    pub answer_b: Option<Answer>,
    pub status: ComparisonStatus,
    pub category: String,
    pub score: u8,
}

/// Per-bucket scores, each 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub lifestyle: u8,
    pub values: u8,
    pub personality: u8,
    pub physical_preferences: u8,
    pub relationship_goals: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub matches: usize,
    pub partial: usize,
    pub mismatches: usize,
    pub not_applicable: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    /// The person being scored against the subject.
    pub subject_id: PersonId,
    pub compatibility_score: u8,
    pub breakdown: CategoryBreakdown,
    pub match_reasons: Vec<String>,
    pub concerns: Vec<String>,
    pub detailed_comparisons: Vec<QuestionComparison>,
}

impl MatchScore {
    /// Zero result returned when either side has no questionnaire responses.
    pub fn incomplete(subject_id: PersonId) -> Self {
        Self {
            subject_id,
            compatibility_score: 0,
            breakdown: CategoryBreakdown::default(),
            match_reasons: Vec::new(),
            concerns: vec![INCOMPLETE_QUESTIONNAIRE_CONCERN.to_string()],
            detailed_comparisons: Vec::new(),
        }
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.detailed_comparisons
            .iter()
            .fold(StatusCounts::default(), |mut counts, comparison| {
                match comparison.status {
                    ComparisonStatus::Match => counts.matches += 1,
                    ComparisonStatus::Partial => counts.partial += 1,
                    ComparisonStatus::Mismatch => counts.mismatches += 1,
                    ComparisonStatus::NotApplicable => counts.not_applicable += 1,
                }
                counts
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_CONFIDENCE_THRESHOLD {
            Confidence::High
        } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSuggestion {
    pub person_a: Person,
    pub person_b: Person,
    pub score: MatchScore,
    pub confidence: Confidence,
    pub suggested_introduction: String,
}

impl MatchSuggestion {
    /// Order-independent key of the suggested pair.
    pub fn pair_key(&self) -> (PersonId, PersonId) {
        let (a, b) = (self.person_a.id, self.person_b.id);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}
