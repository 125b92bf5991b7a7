//! Value types handed between the normalizer, the fetcher and the
//! recommendation engine. None of them change after construction.

use serde::{Deserialize, Serialize};

/// Opaque, stable account identifier (Riot PUUID).
pub type PlayerId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: String,
    /// ISO-8601, UTC.
    pub datetime: String,
    pub placement: u8,
    pub level: u32,
    pub gold_left: u32,
    pub last_round: u32,
    pub damage_dealt: u32,
    pub traits: Vec<TraitSummary>,
    pub units: Vec<UnitSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitSummary {
    pub name: String,
    pub units: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSummary {
    pub name: String,
    pub tier: u8,
    pub cost: u32,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageCount {
    pub name: String,
    pub count: usize,
}

/// Aggregates are pre-formatted to their display precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceDigest {
    pub avg_placement: String,
    pub top4_percent: String,
    pub avg_level: String,
    pub avg_gold: String,
    pub most_used_traits: Vec<UsageCount>,
    pub most_used_units: Vec<UsageCount>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub games_played: u32,
    pub complete_rank: String,
    pub league_points: i32,
    /// Fraction in [0, 1], not a percentage.
    pub top_four_percent: f64,
}
