// src/utils/progress_bars/logging.rs - Logging helpers for matching runs
use log::{debug, info, warn};
use std::time::Instant;

use crate::models::stats_models::SuggestionStats;

/// Which suggestion flow a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// One target against the pool.
    SingleTarget,
    /// Every person against the pool, mirrored pairs collapsed.
    Global,
}

impl MatchMode {
    pub fn label(self) -> &'static str {
        match self {
            MatchMode::SingleTarget => "single_target",
            MatchMode::Global => "global",
        }
    }
}

#[derive(Clone)]
pub struct MatchingLogger {
    mode_name: &'static str,
    mode_emoji: &'static str,
    start_time: Instant,
}

impl MatchingLogger {
    pub fn new(mode: MatchMode) -> Self {
        let (mode_name, mode_emoji) = match mode {
            MatchMode::SingleTarget => ("TARGET", "🎯"),
            MatchMode::Global => ("GLOBAL", "🌐"),
        };

        Self {
            mode_name,
            mode_emoji,
            start_time: Instant::now(),
        }
    }

    pub fn log_start(&self, run_id: &str, threshold: u32) {
        info!(
            "[{}] {} 🚀 Starting {} matching (run ID: {}, threshold: {}%)",
            self.mode_name,
            self.mode_emoji,
            self.mode_name.to_lowercase(),
            run_id,
            threshold
        );
    }

    pub fn log_phase(&self, phase: &str, details: Option<&str>) {
        let elapsed = self.start_time.elapsed();
        let msg = if let Some(details) = details {
            format!(
                "[{}] {} 🔄 Phase: {} - {} [+{:.1}s]",
                self.mode_name, self.mode_emoji, phase, details, elapsed.as_secs_f32()
            )
        } else {
            format!(
                "[{}] {} 🔄 Phase: {} [+{:.1}s]",
                self.mode_name, self.mode_emoji, phase, elapsed.as_secs_f32()
            )
        };
        info!("{}", msg);
    }

    pub fn log_data_loaded(&self, count: usize, with_questionnaire: usize) {
        info!(
            "[{}] {} 📊 Loaded {} people ({} with questionnaire responses)",
            self.mode_name, self.mode_emoji, count, with_questionnaire
        );
        let missing = count.saturating_sub(with_questionnaire);
        if missing > 0 {
            warn!(
                "[{}] {} ⚠️  {} people have no questionnaire data and will score 0",
                self.mode_name, self.mode_emoji, missing
            );
        }
    }

    pub fn log_completion(&self, stats: &SuggestionStats) {
        let duration = self.start_time.elapsed();
        info!(
            "[{}] {} 🎉 COMPLETED: {} suggestions in {:.2?}",
            self.mode_name, self.mode_emoji, stats.total_suggestions, duration
        );
        info!(
            "[{}] {} 📊 Results: {} people matched, avg score: {:.1}, best: {}",
            self.mode_name,
            self.mode_emoji,
            stats.people_matched,
            stats.avg_compatibility,
            stats.best_compatibility
        );
        info!(
            "[{}] {} 🏷️  Confidence: {} high, {} medium, {} low",
            self.mode_name,
            self.mode_emoji,
            stats.high_confidence,
            stats.medium_confidence,
            stats.low_confidence
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!("[{}] {} ⚠️  {}", self.mode_name, self.mode_emoji, message);
    }

    pub fn log_debug(&self, message: &str) {
        debug!("[{}] {} {}", self.mode_name, self.mode_emoji, message);
    }

    pub fn get_elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}
