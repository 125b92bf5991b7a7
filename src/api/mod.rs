pub mod client;
pub mod endpoints;
pub mod models;

use crate::error::AppError;
use crate::mapping::NameMapping;
use async_trait::async_trait;
use models::{AccountDto, LeagueEntryDto, MatchDto};

/// Match id listing and match detail lookups.
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Most recent first; may return fewer than `count`.
    async fn fetch_match_ids(&self, player_id: &str, count: usize) -> Result<Vec<String>, AppError>;

    async fn fetch_match_detail(&self, match_id: &str) -> Result<MatchDto, AppError>;
}

#[async_trait]
pub trait RankSource: Send + Sync {
    /// Empty when the player has no ranked entry.
    async fn fetch_rank_records(&self, player_id: &str) -> Result<Vec<LeagueEntryDto>, AppError>;
}

#[async_trait]
pub trait AccountSource: Send + Sync {
    async fn fetch_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError>;
}

/// Static identifier → display-name data.
#[async_trait]
pub trait StaticDataSource: Send + Sync {
    async fn fetch_name_mapping(&self) -> Result<NameMapping, AppError>;
}
