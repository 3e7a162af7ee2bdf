// src/models/stats_models.rs

use serde::{Deserialize, Serialize};

/// Summary of a suggestion list, as shown on the matching dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionStats {
    pub total_suggestions: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
    pub avg_compatibility: f64,
    pub best_compatibility: u8,
    /// People in the population with at least one questionnaire response.
    pub people_with_questionnaire: usize,
    /// Distinct people appearing on either side of a suggestion.
    pub people_matched: usize,
}
