//! In-memory, write-once caches shared across requests.
//!
//! Match results never change once played and Riot IDs map to a fixed PUUID,
//! so entries are never invalidated. Two concurrent misses on the same key may
//! both hit the network; both write the same value.

use crate::api::models::MatchDto;
use crate::domain::{MatchSummary, PlayerId};
use crate::error::AppError;
use crate::mapping::NameMapping;
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Raw provider matches keyed by match id, plus each player's normalized view
/// of them. A match detail is fetched once no matter how many players ask.
#[derive(Clone)]
pub struct MatchCache {
    raw: Cache<String, Arc<MatchDto>>,
    summaries: Cache<(PlayerId, String), Arc<MatchSummary>>,
}

impl MatchCache {
    pub fn new() -> Self {
        MatchCache {
            raw: Cache::builder().name("raw_matches").build(),
            summaries: Cache::builder().name("match_summaries").build(),
        }
    }

    fn key(player_id: &str, match_id: &str) -> (PlayerId, String) {
        (player_id.to_string(), match_id.to_string())
    }

    pub async fn get_raw(&self, match_id: &str) -> Option<Arc<MatchDto>> {
        self.raw.get(match_id).await
    }

    pub async fn insert_raw(&self, match_id: &str, raw: Arc<MatchDto>) {
        self.raw.insert(match_id.to_string(), raw).await;
    }

    pub async fn get(&self, player_id: &str, match_id: &str) -> Option<Arc<MatchSummary>> {
        self.summaries.get(&Self::key(player_id, match_id)).await
    }

    pub async fn insert(&self, player_id: &str, summary: Arc<MatchSummary>) {
        self.summaries
            .insert(Self::key(player_id, &summary.match_id), summary)
            .await;
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct PlayerCache {
    players: Cache<String, PlayerId>,
}

impl PlayerCache {
    pub fn new() -> Self {
        PlayerCache {
            players: Cache::builder().name("players").build(),
        }
    }

    pub fn player_key(game_name: &str, tag_line: &str) -> String {
        format!("{}#{}", game_name, tag_line)
    }

    pub async fn get(&self, game_name: &str, tag_line: &str) -> Option<PlayerId> {
        self.players.get(&Self::player_key(game_name, tag_line)).await
    }

    pub async fn insert(&self, game_name: &str, tag_line: &str, puuid: PlayerId) {
        self.players
            .insert(Self::player_key(game_name, tag_line), puuid)
            .await;
    }
}

impl Default for PlayerCache {
    fn default() -> Self {
        Self::new()
    }
}

/// The static name table is loaded at most once per process.
#[derive(Default)]
pub struct MappingCache {
    cell: OnceCell<Arc<NameMapping>>,
}

impl MappingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<NameMapping>, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<NameMapping, AppError>>,
    {
        self.cell
            .get_or_try_init(|| async move { load().await.map(Arc::new) })
            .await
            .cloned()
    }
}
