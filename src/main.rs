mod analysis;
mod api;
mod cache;
mod config;
mod display;
mod domain;
mod error;
mod history;
mod mapping;
mod rate_limit;
mod service;

use anyhow::Context;
use api::client::RiotApiClient;
use clap::Parser;
use config::Config;
use display::output::{
    display_digest, display_error, display_info, display_match_history, display_profile,
    display_success, display_warning,
};
use analysis::recommender::RecommendationEngine;
use domain::{MatchSummary, PerformanceDigest, ProfileSummary};
use error::{AppError, MatchFailure};
use history::split_history;
use indicatif::ProgressBar;
use serde::Serialize;
use service::{parse_count, read_history, InsightService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "TFT Insight")]
#[command(about = "Summarize recent TFT games and get simple improvement tips", long_about = None)]
struct Args {
    /// Riot Game Name
    #[arg(required_unless_present = "history")]
    game_name: Option<String>,

    /// Riot Tag (tag line)
    #[arg(required_unless_present = "history")]
    tag_line: Option<String>,

    /// Region (default: na1)
    #[arg(short, long)]
    region: Option<String>,

    /// Number of recent matches to analyze (default: 5)
    #[arg(short, long)]
    count: Option<String>,

    /// Print a single JSON document instead of tables
    #[arg(long)]
    json: bool,

    /// Digest matches saved by an earlier `--json` run instead of calling Riot
    #[arg(long, value_name = "FILE", conflicts_with_all = ["region", "count"])]
    history: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FailureReport {
    match_id: String,
    message: String,
    code: u16,
}

impl From<&MatchFailure> for FailureReport {
    fn from(failure: &MatchFailure) -> Self {
        FailureReport {
            match_id: failure.match_id.clone(),
            message: failure.error.to_string(),
            code: failure.error.code(),
        }
    }
}

#[derive(Serialize)]
struct Report {
    profile: Option<ProfileSummary>,
    matches: Vec<MatchSummary>,
    failures: Vec<FailureReport>,
    digest: Option<PerformanceDigest>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tft_insight=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    if let Some(path) = &args.history {
        return digest_saved(path, args.json);
    }
    let (Some(game_name), Some(tag_line)) = (args.game_name, args.tag_line) else {
        let missing = AppError::InvalidInput("game name and tag line are required".to_string());
        return Err(missing.into());
    };

    let mut config = Config::from_env()?;
    if let Some(region) = args.region {
        config.region = region;
    }
    let count = parse_count(args.count.as_deref())?;
    let player_key = format!("{}#{}", game_name, tag_line);
    let quiet = args.json;

    if !quiet {
        display_info(&format!(
            "Fetching data for {} in region {}",
            player_key, config.region
        ));
    }

    let client = Arc::new(RiotApiClient::new(config)?);
    let service = InsightService::new(client.clone());

    // Step 1: Riot ID -> PUUID
    let puuid = service.lookup_player(&game_name, &tag_line).await?;
    if !quiet {
        let short = puuid.get(0..8).unwrap_or(puuid.as_str());
        display_success(&format!("Found PUUID: {}", short));
    }

    // Step 2: rank summary (unranked players still get a history)
    let profile = match service.get_profile_summary(&puuid).await {
        Ok(profile) => Some(profile),
        Err(AppError::UnrankedPlayer(_)) => {
            if !quiet {
                display_warning("No ranked entry for this player");
            }
            None
        }
        Err(e) => return Err(e.into()),
    };

    // Step 3: match history
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_message(format!("Fetching up to {} matches", count));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let results = service.get_match_history(&puuid, count).await;
    spinner.finish_and_clear();

    let (matches, failures) = split_history(results?);
    if !quiet {
        display_success(&format!(
            "Resolved {} matches ({} failed)",
            matches.len(),
            failures.len()
        ));
    }

    // Step 4: digest over the matches that resolved
    let digest = if matches.is_empty() {
        None
    } else {
        Some(service.get_recommendations(&matches)?)
    };

    if quiet {
        let report = Report {
            profile,
            matches,
            failures: failures.iter().map(FailureReport::from).collect(),
            digest,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(profile) = &profile {
        display_profile(profile, &player_key);
    }
    display_match_history(&matches, &failures);
    match &digest {
        Some(digest) => display_digest(digest, &player_key),
        None => display_warning("No matches resolved, nothing to recommend"),
    }

    tracing::debug!(requests = client.requests_made(), "riot requests made");
    Ok(())
}

/// Re-digests the `matches` of a saved report. No provider calls are made.
fn digest_saved(path: &Path, json: bool) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading saved history {}", path.display()))?;
    let matches = read_history(&raw)?;
    let digest = RecommendationEngine::digest(&matches)?;

    if json {
        let report = Report {
            profile: None,
            matches,
            failures: Vec::new(),
            digest: Some(digest),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    display_info(&format!(
        "Loaded {} saved matches from {}",
        matches.len(),
        path.display()
    ));
    display_match_history(&matches, &[]);
    display_digest(&digest, &path.display().to_string());
    Ok(())
}
