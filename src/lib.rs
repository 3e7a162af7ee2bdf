// src/lib.rs
pub mod matching;
pub mod models;
pub mod utils;

pub use models::core::{Answer, Gender, Person, PersonId, Question, QuestionSet, QuestionnaireResponse};
pub use models::matching::{
    CategoryBreakdown, ComparisonStatus, Confidence, MatchScore, MatchSuggestion, QuestionComparison,
};
pub use utils::settings::{MatchingSettings, Weightings};
