use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use matchmaker_lib::matching::suggestions::log_suggestions;
use matchmaker_lib::matching::{generate_all_with_progress, generate_match_suggestions, MatchReport};
use matchmaker_lib::utils::env::load_env;
use matchmaker_lib::utils::people_loader::{find_person, load_people};
use matchmaker_lib::utils::progress_bars::logging::{MatchMode, MatchingLogger};
use matchmaker_lib::utils::progress_bars::progress_config::ProgressConfig;
use matchmaker_lib::utils::settings::MatchingSettings;

#[derive(Parser)]
#[command(author, version, about = "Generate questionnaire-based match suggestions", long_about = None)]
struct MatchArgs {
    /// JSON file with the people to match
    #[arg(long)]
    people: PathBuf,

    /// Matching settings JSON (bare settings or a full admin settings document)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Only suggest matches for this person id
    #[arg(long)]
    target: Option<u64>,

    /// Generate suggestions for everyone even when auto-suggest is off
    #[arg(long, conflicts_with = "target")]
    all: bool,

    /// Override the compatibility threshold
    #[arg(long)]
    threshold: Option<u32>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = MatchArgs::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
    info!("Starting questionnaire match suggestion run");
    load_env();

    let mut settings = match &args.settings {
        Some(path) => {
            let mut settings = MatchingSettings::from_file(path)?;
            settings.apply_env_overrides();
            settings
        }
        None => MatchingSettings::from_env(),
    };
    if let Some(threshold) = args.threshold {
        settings.compatibility_threshold = threshold;
    }
    settings.validate().context("Invalid matching settings")?;
    settings.log_config();

    if args.target.is_none() && !settings.runs_global_suggestions(args.all) {
        bail!("Auto-suggest matches is off; pass --target <id> or --all");
    }

    let progress_config = ProgressConfig::from_env();
    let people = load_people(&args.people)?;

    let mode = if args.target.is_some() {
        MatchMode::SingleTarget
    } else {
        MatchMode::Global
    };
    let run_id = Uuid::new_v4().to_string();
    let logger = MatchingLogger::new(mode);
    logger.log_start(&run_id, settings.compatibility_threshold);
    logger.log_data_loaded(
        people.len(),
        people.iter().filter(|p| p.has_questionnaire()).count(),
    );

    let suggestions = match args.target {
        Some(target_id) => {
            let target = find_person(&people, target_id)?;
            if !target.has_questionnaire() {
                logger.log_warning(&format!(
                    "{} ({}) has no questionnaire responses; every pairing scores 0",
                    target.name, target.id
                ));
            }
            logger.log_phase("Scoring candidates", Some(target.name.as_str()));
            let suggestions = generate_match_suggestions(target, &people, &settings);
            log_suggestions(target, &suggestions);
            suggestions
        }
        None => {
            logger.log_phase("Scoring all people", None);
            let pb = progress_config.create_bar(people.len() as u64, "Generating suggestions");
            let suggestions = generate_all_with_progress(&people, &settings, pb.as_ref());
            if let Some(pb) = pb {
                pb.finish_with_message(format!("{} unique suggestions", suggestions.len()));
            }
            suggestions
        }
    };
    logger.log_debug(&format!(
        "Scoring finished after {:.2?}",
        logger.get_elapsed()
    ));

    let report = MatchReport::new(run_id, mode, args.target, &settings, &people, suggestions);
    logger.log_debug(&format!("Report generated at {}", report.generated_at));
    logger.log_completion(&report.stats);

    let rendered = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
