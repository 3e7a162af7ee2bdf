// src/models/core.rs
// Person, questionnaire and question-set records supplied by the member directory and admin settings

use serde::{Deserialize, Serialize};

pub type PersonId = u64;
pub type QuestionId = u64;

/// Gender tag used only for the opposite-gender matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Gender {
    /// The only gender this one is paired with. `None` for an unspecified tag.
    pub fn opposite(self) -> Option<Gender> {
        match self {
            Gender::Male => Some(Gender::Female),
            Gender::Female => Some(Gender::Male),
            Gender::Unspecified => None,
        }
    }
}

/// A questionnaire answer: free text / single select, or a multi-select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Multi(Vec<String>),
}

impl Answer {
    /// Lowercased text used by the comparator. Multi-select values are space-joined.
    pub fn comparable_text(&self) -> String {
        match self {
            Answer::Text(text) => text.to_lowercase(),
            Answer::Multi(values) => values.join(" ").to_lowercase(),
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponse {
    pub question_id: QuestionId,
    #[serde(rename = "question", alias = "questionText")]
    pub question_text: String,
    pub answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub questionnaire: Option<Vec<QuestionnaireResponse>>,
}

impl Person {
    /// Responses, if the person has answered at least one question.
    pub fn responses(&self) -> Option<&[QuestionnaireResponse]> {
        match &self.questionnaire {
            Some(responses) if !responses.is_empty() => Some(responses.as_slice()),
            _ => None,
        }
    }

    pub fn has_questionnaire(&self) -> bool {
        self.responses().is_some()
    }

    pub fn response_for(&self, question_id: QuestionId) -> Option<&QuestionnaireResponse> {
        self.questionnaire
            .as_deref()
            .and_then(|responses| responses.iter().find(|r| r.question_id == question_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Text,
    Textarea,
    Select,
}

/// Heuristic family used to compare two answers to one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonStrategy {
    AgeRange,
    LifestyleFrequency,
    GoalTaxonomy,
    ChildrenPreference,
    TokenOverlap,
}

impl ComparisonStrategy {
    /// Strategy implied by the literal question wording. First match wins.
    pub fn infer_from_text(question_text: &str) -> Self {
        if question_text.contains("preferred age range") {
            ComparisonStrategy::AgeRange
        } else if question_text.contains("smoke") || question_text.contains("drink") {
            ComparisonStrategy::LifestyleFrequency
        } else if question_text.contains("looking for") {
            ComparisonStrategy::GoalTaxonomy
        } else if question_text.contains("children") {
            ComparisonStrategy::ChildrenPreference
        } else {
            ComparisonStrategy::TokenOverlap
        }
    }
}

fn default_category() -> String {
    "general".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question", alias = "text")]
    pub text: String,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_category")]
    pub category: String,
    /// Explicit comparison heuristic. Falls back to the text-inferred one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<ComparisonStrategy>,
}

impl Question {
    pub fn comparison_strategy(&self) -> ComparisonStrategy {
        self.strategy
            .unwrap_or_else(|| ComparisonStrategy::infer_from_text(&self.text))
    }
}

/// Gender-specific question lists configured by the admin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    #[serde(default)]
    pub men: Vec<Question>,
    #[serde(default)]
    pub women: Vec<Question>,
}

impl QuestionSet {
    /// The men's list for a male subject, the women's list otherwise.
    pub fn for_gender(&self, gender: Gender) -> &[Question] {
        match gender {
            Gender::Male => &self.men,
            _ => &self.women,
        }
    }
}
