// src/matching/mod.rs
pub mod category;
pub mod comparator;
pub mod dedup;
pub mod report;
pub mod scorer;
pub mod suggestions;

pub use category::{aggregate_comparisons, aggregate_legacy, CategoryBucket};
pub use comparator::{compare_responses, compare_with_strategy};
pub use dedup::{generate_all_match_suggestions, generate_all_with_progress};
pub use report::{summarize_suggestions, MatchReport};
pub use scorer::calculate_compatibility;
pub use suggestions::{generate_match_suggestions, generate_introduction};
