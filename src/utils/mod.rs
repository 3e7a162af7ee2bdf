pub mod env;
pub mod people_loader;
pub mod progress_bars;
pub mod settings;
