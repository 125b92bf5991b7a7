use super::usage_stats::UsageTracker;
use crate::domain::{MatchSummary, PerformanceDigest};
use crate::error::AppError;

pub const TOP_TRAITS: usize = 3;
pub const TOP_UNITS: usize = 5;

pub const STABILIZE_TIP: &str = "Try to stabilize your early game to reach top 4 more consistently.";
pub const ECONOMY_TIP: &str = "Consider saving more gold for stronger level-ups and rounds.";
pub const LEVELING_TIP: &str = "Focus on leveling up slightly faster to unlock stronger units.";

const PLACEMENT_THRESHOLD: f64 = 4.0;
const GOLD_THRESHOLD: f64 = 10.0;
const LEVEL_THRESHOLD: f64 = 7.0;

/// Unrounded aggregates; rounding happens only when the digest is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub placement: f64,
    pub level: f64,
    pub gold: f64,
    pub top4_rate: f64,
}

impl Averages {
    pub fn over(matches: &[MatchSummary]) -> Result<Self, AppError> {
        if matches.is_empty() {
            return Err(AppError::InvalidInput(
                "at least one match is required to compute averages".to_string(),
            ));
        }

        let mut total_placement = 0u64;
        let mut total_level = 0u64;
        let mut total_gold = 0u64;
        let mut top4 = 0usize;

        for m in matches {
            total_placement += m.placement as u64;
            total_level += m.level as u64;
            total_gold += m.gold_left as u64;
            if m.placement <= 4 {
                top4 += 1;
            }
        }

        let n = matches.len() as f64;
        Ok(Averages {
            placement: total_placement as f64 / n,
            level: total_level as f64 / n,
            gold: total_gold as f64 / n,
            top4_rate: top4 as f64 / n,
        })
    }
}

pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn digest(matches: &[MatchSummary]) -> Result<PerformanceDigest, AppError> {
        let averages = Averages::over(matches)?;

        let mut traits = UsageTracker::new();
        let mut units = UsageTracker::new();
        for m in matches {
            for t in &m.traits {
                traits.record(&t.name);
            }
            for u in &m.units {
                units.record(&u.name);
            }
        }

        let most_used_traits = traits.top(TOP_TRAITS);
        let most_used_units = units.top(TOP_UNITS);

        let mut recommendations = Self::tips(&averages);
        recommendations.push(format!(
            "Your most frequent traits: {}.",
            join_names(most_used_traits.iter().map(|c| c.name.as_str()))
        ));
        recommendations.push(format!(
            "Your most frequent units: {}.",
            join_names(most_used_units.iter().map(|c| c.name.as_str()))
        ));

        Ok(PerformanceDigest {
            avg_placement: format!("{:.2}", averages.placement),
            top4_percent: format!("{:.1}", averages.top4_rate * 100.0),
            avg_level: format!("{:.2}", averages.level),
            avg_gold: format!("{:.1}", averages.gold),
            most_used_traits,
            most_used_units,
            recommendations,
        })
    }

    /// Threshold rules, always checked in the same order.
    pub fn tips(averages: &Averages) -> Vec<String> {
        let mut tips = Vec::new();
        if averages.placement > PLACEMENT_THRESHOLD {
            tips.push(STABILIZE_TIP.to_string());
        }
        if averages.gold < GOLD_THRESHOLD {
            tips.push(ECONOMY_TIP.to_string());
        }
        if averages.level < LEVEL_THRESHOLD {
            tips.push(LEVELING_TIP.to_string());
        }
        tips
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}
