// src/bin/score_pair.rs
// Scores one pair of people and prints the full breakdown.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use matchmaker_lib::matching::calculate_compatibility;
use matchmaker_lib::models::matching::Confidence;
use matchmaker_lib::utils::env::load_env;
use matchmaker_lib::utils::people_loader::{find_person, load_people};
use matchmaker_lib::utils::settings::MatchingSettings;

#[derive(Parser)]
#[command(author, version, about = "Score the compatibility of two people", long_about = None)]
struct ScorePairArgs {
    /// JSON file with the people directory
    #[arg(long)]
    people: PathBuf,

    /// Matching settings JSON
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Subject person id (selects the question set by gender)
    #[arg(long)]
    a: u64,

    /// Person scored against the subject
    #[arg(long)]
    b: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    load_env();
    let args = ScorePairArgs::parse();

    let settings = match &args.settings {
        Some(path) => MatchingSettings::from_file(path)?,
        None => MatchingSettings::from_env(),
    };
    settings.validate().context("Invalid matching settings")?;

    let people = load_people(&args.people)?;
    let person_a = find_person(&people, args.a)?;
    let person_b = find_person(&people, args.b)?;

    if person_a.gender.opposite() != Some(person_b.gender) {
        warn!(
            "{} and {} would never be suggested to each other (gender rule)",
            person_a.name, person_b.name
        );
    }

    let score = calculate_compatibility(
        person_a,
        person_b,
        &settings.weightings,
        settings.question_set.as_ref(),
    );
    let counts = score.status_counts();

    info!(
        "{} × {}: {}% ({} confidence)",
        person_a.name,
        person_b.name,
        score.compatibility_score,
        Confidence::from_score(score.compatibility_score)
    );
    info!(
        "Questions: {} match, {} partial, {} mismatch, {} not applicable",
        counts.matches, counts.partial, counts.mismatches, counts.not_applicable
    );

    let rendered = serde_json::to_string_pretty(&score).context("Failed to serialize score")?;
    println!("{}", rendered);
    Ok(())
}
