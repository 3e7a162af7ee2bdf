pub mod core;
pub mod matching;
pub mod stats_models;

pub use self::core::*;
pub use matching::*;
pub use stats_models::*;
