use crate::api::models::LeagueEntryDto;
use crate::domain::ProfileSummary;
use crate::error::AppError;

pub struct ProfileSummarizer;

impl ProfileSummarizer {
    /// Summarizes the first league entry; an empty list means the player is unranked.
    pub fn summarize(player_id: &str, entries: &[LeagueEntryDto]) -> Result<ProfileSummary, AppError> {
        let entry = entries
            .first()
            .ok_or_else(|| AppError::UnrankedPlayer(player_id.to_string()))?;

        let games_played = entry.wins + entry.losses;
        let top_four_percent = if games_played == 0 {
            0.0
        } else {
            entry.wins as f64 / games_played as f64
        };

        Ok(ProfileSummary {
            games_played,
            complete_rank: format!("{} {}", entry.tier, entry.rank).trim().to_string(),
            league_points: entry.league_points,
            top_four_percent,
        })
    }
}
