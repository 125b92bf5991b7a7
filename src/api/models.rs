use serde::Deserialize;
use std::collections::HashMap;

// Account V1 response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
}

// TFT League V1 response (one entry per queue)
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct LeagueEntryDto {
    #[serde(default)]
    pub queue_type: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub league_points: i32,
    pub wins: u32,
    pub losses: u32,
}

// TFT Match V1 response
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[allow(dead_code)]
pub struct MatchMetadata {
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MatchInfo {
    /// Milliseconds since the Unix epoch.
    pub game_datetime: i64,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ParticipantDto {
    pub puuid: String,
    pub placement: u8,
    pub level: u32,
    #[serde(default)]
    pub gold_left: u32,
    #[serde(default)]
    pub last_round: u32,
    #[serde(default)]
    pub total_damage_to_players: u32,
    #[serde(default)]
    pub traits: Vec<TraitDto>,
    #[serde(default)]
    pub units: Vec<UnitDto>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TraitDto {
    pub name: String,
    #[serde(default)]
    pub num_units: u32,
    /// 0 = inactive, then bronze/silver/gold/chromatic.
    #[serde(default)]
    pub style: u8,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UnitDto {
    pub character_id: String,
    #[serde(default)]
    pub tier: Option<u8>,
    #[serde(default)]
    pub items: Vec<i64>,
    #[serde(default, rename = "itemNames")]
    pub item_names: Vec<String>,
}

// CommunityDragon static TFT data
#[derive(Debug, Deserialize)]
pub struct StaticDataDto {
    pub sets: HashMap<String, StaticSetDto>,
}

#[derive(Debug, Deserialize)]
pub struct StaticSetDto {
    #[serde(default)]
    pub champions: Vec<StaticChampionDto>,
    #[serde(default)]
    pub traits: Vec<StaticTraitDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StaticChampionDto {
    pub api_name: String,
    pub name: String,
    #[serde(default)]
    pub cost: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StaticTraitDto {
    pub api_name: String,
    pub name: String,
}
