use crate::domain::{MatchSummary, PerformanceDigest, ProfileSummary, UsageCount};
use crate::error::MatchFailure;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MatchRow {
    played: String,
    place: String,
    level: String,
    gold: String,
    round: String,
    damage: String,
    traits: String,
    units: String,
}

#[derive(Tabled)]
struct UsageRow {
    rank: String,
    name: String,
    count: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

pub fn display_profile(profile: &ProfileSummary, player_name: &str) {
    println!("\n{}", format!("🏆 {}", player_name).bold().cyan());
    println!("{}", "=".repeat(60).cyan());
    println!(
        "{} {} ({} LP)",
        "Rank:".bold(),
        profile.complete_rank.yellow(),
        profile.league_points
    );
    println!("{} {}", "Games:".bold(), profile.games_played);
    println!(
        "{} {:.1}%\n",
        "Top 4 rate:".bold(),
        profile.top_four_percent * 100.0
    );
}

fn colored_placement(placement: u8) -> String {
    let text = format!("#{}", placement);
    match placement {
        1 => text.yellow().bold().to_string(),
        2..=4 => text.green().to_string(),
        _ => text.red().to_string(),
    }
}

/// Most recent match first.
pub fn display_match_history(matches: &[MatchSummary], failures: &[MatchFailure]) {
    println!(
        "\n{}",
        format!("📊 MATCH HISTORY (Last {} Games)", matches.len() + failures.len())
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());

    let mut ordered: Vec<&MatchSummary> = matches.iter().collect();
    ordered.sort_by(|a, b| b.datetime.cmp(&a.datetime));

    let rows: Vec<MatchRow> = ordered
        .into_iter()
        .map(|m| MatchRow {
            played: m.datetime.replace('T', " ").chars().take(16).collect(),
            place: colored_placement(m.placement),
            level: m.level.to_string(),
            gold: m.gold_left.to_string(),
            round: m.last_round.to_string(),
            damage: m.damage_dealt.to_string(),
            traits: m
                .traits
                .iter()
                .map(|t| format!("{} {}", t.units, t.name))
                .collect::<Vec<_>>()
                .join(", "),
            units: m
                .units
                .iter()
                .map(|u| format!("{}{}", u.name, "★".repeat(u.tier as usize)))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    if !rows.is_empty() {
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}\n", table);
    }

    for failure in failures {
        println!(
            "  {} {} ({})",
            "✗".red(),
            failure.match_id,
            failure.error.to_string().dimmed()
        );
    }
    if !failures.is_empty() {
        println!();
    }
}

fn usage_table(title: &str, counts: &[UsageCount]) {
    println!("{}", title.bold().yellow());
    let rows: Vec<UsageRow> = counts
        .iter()
        .enumerate()
        .map(|(idx, c)| UsageRow {
            rank: format!("#{}", idx + 1),
            name: c.name.clone(),
            count: c.count.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_digest(digest: &PerformanceDigest, player_name: &str) {
    println!(
        "\n{}",
        format!("🎮 Recommendations for {}", player_name).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    println!("{} {}", "Avg placement:".bold(), digest.avg_placement);
    println!("{} {}%", "Top 4:".bold(), digest.top4_percent);
    println!("{} {}", "Avg level:".bold(), digest.avg_level);
    println!("{} {}\n", "Avg gold left:".bold(), digest.avg_gold);

    usage_table("Most used traits", &digest.most_used_traits);
    usage_table("Most used units", &digest.most_used_units);

    println!("{}", "Tips".bold().yellow());
    for tip in &digest.recommendations {
        println!("  • {}", tip);
    }
    println!();
}
