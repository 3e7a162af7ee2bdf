//! Admin matching settings: enable flag, threshold, category weightings and question set.
//! Loaded from a JSON settings file, with environment variable overrides.

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::models::core::QuestionSet;

/// Weight totals are displayed against this, but never normalised to it.
pub const EXPECTED_WEIGHT_TOTAL: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weightings {
    pub lifestyle: f64,
    pub values: f64,
    pub personality: f64,
    pub physical_preferences: f64,
    pub relationship_goals: f64,
}

impl Default for Weightings {
    fn default() -> Self {
        Self {
            lifestyle: 20.0,
            values: 30.0,
            personality: 25.0,
            physical_preferences: 10.0,
            relationship_goals: 15.0,
        }
    }
}

impl Weightings {
    pub fn total(&self) -> f64 {
        self.lifestyle
            + self.values
            + self.personality
            + self.physical_preferences
            + self.relationship_goals
    }

    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("lifestyle", self.lifestyle),
            ("values", self.values),
            ("personality", self.personality),
            ("physicalPreferences", self.physical_preferences),
            ("relationshipGoals", self.relationship_goals),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingSettings {
    pub enabled: bool,
    /// Minimum compatibility score for a pair to be suggested.
    pub compatibility_threshold: u32,
    pub weightings: Weightings,
    /// Runs without a target generate suggestions for everyone only when set.
    #[serde(default = "default_auto_suggest")]
    pub auto_suggest_matches: bool,
    /// Per-gender questions. Without it, scoring uses the built-in phrasing table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_set: Option<QuestionSet>,
}

fn default_auto_suggest() -> bool {
    true
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            compatibility_threshold: 10,
            weightings: Weightings::default(),
            auto_suggest_matches: true,
            question_set: None,
        }
    }
}

fn env_override<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: could not parse '{}'", key, raw);
            None
        }
    }
}

impl MatchingSettings {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_env_overrides();
        settings
    }

    /// Reads a settings JSON file. Accepts either the bare settings object or
    /// an admin settings document carrying `aiMatching` and `questionnaire`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(raw).context("Settings are not valid JSON")?;

        if let Some(ai_matching) = value.get("aiMatching") {
            let mut settings: MatchingSettings = serde_json::from_value(ai_matching.clone())
                .context("Invalid aiMatching section")?;
            if let Some(questionnaire) = value.get("questionnaire") {
                let question_set = AdminQuestionnaire::deserialize(questionnaire)
                    .context("Invalid questionnaire section")?;
                settings.question_set = Some(question_set.into_question_set());
            }
            return Ok(settings);
        }

        serde_json::from_value(value).context("Invalid matching settings")
    }

    /// Whether a run without a target should generate suggestions for everyone.
    /// `force` comes from an explicit request; otherwise auto-suggest decides.
    pub fn runs_global_suggestions(&self, force: bool) -> bool {
        force || self.auto_suggest_matches
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(enabled) = env_override::<bool>("MATCHING_ENABLED") {
            self.enabled = enabled;
        }
        if let Some(threshold) = env_override::<u32>("MATCHING_THRESHOLD") {
            self.compatibility_threshold = threshold;
        }
        if let Some(weight) = env_override::<f64>("MATCHING_WEIGHT_LIFESTYLE") {
            self.weightings.lifestyle = weight;
        }
        if let Some(weight) = env_override::<f64>("MATCHING_WEIGHT_VALUES") {
            self.weightings.values = weight;
        }
        if let Some(weight) = env_override::<f64>("MATCHING_WEIGHT_PERSONALITY") {
            self.weightings.personality = weight;
        }
        if let Some(weight) = env_override::<f64>("MATCHING_WEIGHT_PHYSICAL") {
            self.weightings.physical_preferences = weight;
        }
        if let Some(weight) = env_override::<f64>("MATCHING_WEIGHT_GOALS") {
            self.weightings.relationship_goals = weight;
        }
        debug!(
            "Matching settings after env overrides: enabled={}, threshold={}, weightings={:?}",
            self.enabled, self.compatibility_threshold, self.weightings
        );
    }

    /// Rejects weights outside 0-100. A total other than 100 is allowed and
    /// only logged, since it scales every overall score.
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in self.weightings.named() {
            if !weight.is_finite() || !(0.0..=100.0).contains(&weight) {
                bail!("Weighting '{}' must be between 0 and 100, got {}", name, weight);
            }
        }

        let total = self.weightings.total();
        if (total - EXPECTED_WEIGHT_TOTAL).abs() > f64::EPSILON {
            warn!(
                "Category weightings total {}% (not 100%); overall scores scale by {:.2}",
                total,
                total / EXPECTED_WEIGHT_TOTAL
            );
        }
        if self.compatibility_threshold > 100 {
            warn!(
                "Compatibility threshold {} is above 100; no pair can qualify",
                self.compatibility_threshold
            );
        }
        Ok(())
    }

    pub fn log_config(&self) {
        if self.enabled {
            info!("💞 Matching ENABLED");
            info!("   Compatibility threshold: {}%", self.compatibility_threshold);
            for (name, weight) in self.weightings.named() {
                info!("   Weight {}: {}", name, weight);
            }
            info!("   Weight total: {}%", self.weightings.total());
            info!("   Auto-suggest matches: {}", self.auto_suggest_matches);
            match &self.question_set {
                Some(set) => info!(
                    "   Question set: {} men's / {} women's questions",
                    set.men.len(),
                    set.women.len()
                ),
                None => info!("   No question set configured - using built-in question table"),
            }
        } else {
            info!("💞 Matching DISABLED - no suggestions will be produced");
        }
    }
}

#[derive(Debug, Deserialize)]
struct AdminQuestionList {
    #[serde(default)]
    questions: Vec<crate::models::core::Question>,
}

/// Questionnaire section of the admin settings document.
#[derive(Debug, Deserialize)]
struct AdminQuestionnaire {
    #[serde(default)]
    men: Option<AdminQuestionList>,
    #[serde(default)]
    women: Option<AdminQuestionList>,
}

impl AdminQuestionnaire {
    fn into_question_set(self) -> QuestionSet {
        QuestionSet {
            men: self.men.map(|list| list.questions).unwrap_or_default(),
            women: self.women.map(|list| list.questions).unwrap_or_default(),
        }
    }
}
