use crate::analysis::profile::ProfileSummarizer;
use crate::analysis::recommender::RecommendationEngine;
use crate::api::{AccountSource, MatchSource, RankSource, StaticDataSource};
use crate::cache::{MappingCache, MatchCache, PlayerCache};
use crate::domain::{MatchSummary, PerformanceDigest, PlayerId, ProfileSummary};
use crate::error::AppError;
use crate::history::{MatchHistoryFetcher, MatchResult};
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_MATCH_COUNT: usize = 5;

/// Reads a user-supplied match count. Absent, zero or non-numeric input
/// means the default; a negative number is rejected.
pub fn parse_count(raw: Option<&str>) -> Result<usize, AppError> {
    let Some(parsed) = raw.and_then(|r| r.trim().parse::<i64>().ok()) else {
        return Ok(DEFAULT_MATCH_COUNT);
    };
    match parsed {
        0 => Ok(DEFAULT_MATCH_COUNT),
        n if n < 0 => Err(AppError::InvalidInput(format!(
            "match count must be positive, got {}",
            n
        ))),
        n => Ok(n as usize),
    }
}

/// A previously emitted history: either a full `--json` report or a bare list.
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedHistory {
    Report { matches: Vec<MatchSummary> },
    Matches(Vec<MatchSummary>),
}

/// Parses match summaries saved by an earlier run so they can be digested
/// again without touching the provider.
pub fn read_history(json: &str) -> Result<Vec<MatchSummary>, AppError> {
    let saved: SavedHistory =
        serde_json::from_str(json).map_err(|e| AppError::JsonError(e.to_string()))?;
    Ok(match saved {
        SavedHistory::Report { matches } | SavedHistory::Matches(matches) => matches,
    })
}

/// Riot ID to PUUID resolution, memoized by `name#tag`.
pub struct PlayerDirectory<S> {
    source: Arc<S>,
    players: PlayerCache,
}

impl<S: AccountSource> PlayerDirectory<S> {
    pub fn new(source: Arc<S>) -> Self {
        PlayerDirectory {
            source,
            players: PlayerCache::new(),
        }
    }

    pub async fn lookup(&self, game_name: &str, tag_line: &str) -> Result<PlayerId, AppError> {
        if game_name.trim().is_empty() || tag_line.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "both game name and tag line are required".to_string(),
            ));
        }

        if let Some(puuid) = self.players.get(game_name, tag_line).await {
            tracing::debug!(game_name, tag_line, "player cache hit");
            return Ok(puuid);
        }

        let account = self.source.fetch_account(game_name, tag_line).await?;
        self.players
            .insert(game_name, tag_line, account.puuid.clone())
            .await;
        Ok(account.puuid)
    }
}

/// Everything the presentation layer needs, over one provider handle.
pub struct InsightService<S> {
    source: Arc<S>,
    players: PlayerDirectory<S>,
    mappings: MappingCache,
    history: MatchHistoryFetcher<S>,
}

impl<S> InsightService<S>
where
    S: MatchSource + RankSource + AccountSource + StaticDataSource,
{
    pub fn new(source: Arc<S>) -> Self {
        InsightService {
            history: MatchHistoryFetcher::new(source.clone(), MatchCache::new()),
            players: PlayerDirectory::new(source.clone()),
            source,
            mappings: MappingCache::new(),
        }
    }

    pub async fn lookup_player(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<PlayerId, AppError> {
        self.players.lookup(game_name, tag_line).await
    }

    pub async fn get_match_history(
        &self,
        player_id: &str,
        count: usize,
    ) -> Result<Vec<MatchResult>, AppError> {
        let source = self.source.clone();
        let names = self
            .mappings
            .get_or_load(|| async move { source.fetch_name_mapping().await })
            .await?;
        self.history.fetch(player_id, count, &names).await
    }

    pub fn get_recommendations(
        &self,
        matches: &[MatchSummary],
    ) -> Result<PerformanceDigest, AppError> {
        RecommendationEngine::digest(matches)
    }

    pub async fn get_profile_summary(&self, player_id: &str) -> Result<ProfileSummary, AppError> {
        let entries = self.source.fetch_rank_records(player_id).await?;
        ProfileSummarizer::summarize(player_id, &entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::tests::mapping;
    use crate::api::models::{AccountDto, LeagueEntryDto, MatchDto};
    use crate::history::split_history;
    use crate::history::tests::FakeMatches;
    use crate::mapping::NameMapping;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeRiot {
        matches: FakeMatches,
        ranked: bool,
        account_calls: AtomicUsize,
        mapping_calls: AtomicUsize,
    }

    #[async_trait]
    impl MatchSource for FakeRiot {
        async fn fetch_match_ids(
            &self,
            player_id: &str,
            count: usize,
        ) -> Result<Vec<String>, AppError> {
            self.matches.fetch_match_ids(player_id, count).await
        }

        async fn fetch_match_detail(&self, match_id: &str) -> Result<MatchDto, AppError> {
            self.matches.fetch_match_detail(match_id).await
        }
    }

    #[async_trait]
    impl RankSource for FakeRiot {
        async fn fetch_rank_records(
            &self,
            _player_id: &str,
        ) -> Result<Vec<LeagueEntryDto>, AppError> {
            if !self.ranked {
                return Ok(vec![]);
            }
            Ok(vec![LeagueEntryDto {
                queue_type: "RANKED_TFT".to_string(),
                tier: "GOLD".to_string(),
                rank: "I".to_string(),
                league_points: 75,
                wins: 9,
                losses: 11,
            }])
        }
    }

    #[async_trait]
    impl AccountSource for FakeRiot {
        async fn fetch_account(
            &self,
            game_name: &str,
            tag_line: &str,
        ) -> Result<AccountDto, AppError> {
            self.account_calls.fetch_add(1, Ordering::SeqCst);
            Ok(AccountDto {
                puuid: "me".to_string(),
                game_name: game_name.to_string(),
                tag_line: tag_line.to_string(),
            })
        }
    }

    #[async_trait]
    impl StaticDataSource for FakeRiot {
        async fn fetch_name_mapping(&self) -> Result<NameMapping, AppError> {
            self.mapping_calls.fetch_add(1, Ordering::SeqCst);
            Ok(mapping())
        }
    }

    fn service(riot: FakeRiot) -> (Arc<FakeRiot>, InsightService<FakeRiot>) {
        let riot = Arc::new(riot);
        (riot.clone(), InsightService::new(riot))
    }

    #[test]
    fn count_defaults_like_the_web_form() {
        assert_eq!(parse_count(None).unwrap(), 5);
        assert_eq!(parse_count(Some("abc")).unwrap(), 5);
        assert_eq!(parse_count(Some("0")).unwrap(), 5);
        assert_eq!(parse_count(Some(" 12 ")).unwrap(), 12);
        assert!(matches!(parse_count(Some("-2")), Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn player_lookup_is_memoized() {
        let riot = Arc::new(FakeRiot::default());
        let directory = PlayerDirectory::new(riot.clone());

        assert_eq!(directory.lookup("Name", "NA1").await.unwrap(), "me");
        assert_eq!(directory.lookup("Name", "NA1").await.unwrap(), "me");
        assert_eq!(riot.account_calls.load(Ordering::SeqCst), 1);

        directory.lookup("Name", "EUW").await.unwrap();
        assert_eq!(riot.account_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn player_lookup_requires_both_parts() {
        let directory = PlayerDirectory::new(Arc::new(FakeRiot::default()));
        assert!(matches!(
            directory.lookup("Name", " ").await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            directory.lookup("", "NA1").await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn service_lookup_goes_through_the_directory() {
        let (riot, service) = service(FakeRiot::default());
        service.lookup_player("Name", "NA1").await.unwrap();
        service.lookup_player("Name", "NA1").await.unwrap();
        assert_eq!(riot.account_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn saved_history_digests_like_a_live_one() {
        let (_, service) = service(FakeRiot {
            matches: FakeMatches::with_ids(3),
            ..Default::default()
        });
        let (summaries, _) = split_history(service.get_match_history("me", 3).await.unwrap());
        let live = service.get_recommendations(&summaries).unwrap();

        let report = serde_json::json!({
            "profile": null,
            "matches": summaries,
            "failures": [],
            "digest": live,
        });
        let saved = read_history(&report.to_string()).unwrap();
        assert_eq!(saved, summaries);
        assert_eq!(service.get_recommendations(&saved).unwrap(), live);

        let bare = serde_json::to_string(&summaries).unwrap();
        assert_eq!(read_history(&bare).unwrap(), summaries);
    }

    #[test]
    fn unreadable_history_is_a_json_error() {
        assert!(matches!(read_history("{\"matches\": 3}"), Err(AppError::JsonError(_))));
        assert!(matches!(read_history("not json"), Err(AppError::JsonError(_))));
    }

    #[tokio::test]
    async fn history_then_digest_end_to_end() {
        let (riot, service) = service(FakeRiot {
            matches: FakeMatches::with_ids(3),
            ..Default::default()
        });

        let results = service.get_match_history("me", 3).await.unwrap();
        let (summaries, failures) = split_history(results);
        assert!(failures.is_empty());

        let digest = service.get_recommendations(&summaries).unwrap();
        assert_eq!(digest.avg_placement, "2.00");
        assert_eq!(digest.top4_percent, "100.0");
        assert_eq!(digest.avg_level, "8.00");
        assert_eq!(digest.most_used_traits[0].name, "Sorcerer");
        assert_eq!(digest.most_used_units[0].name, "Ahri");

        service.get_match_history("me", 3).await.unwrap();
        assert_eq!(riot.mapping_calls.load(Ordering::SeqCst), 1);
        assert_eq!(riot.matches.detail_calls(), 3);
    }

    #[tokio::test]
    async fn empty_digest_is_invalid_input() {
        let (_, service) = service(FakeRiot::default());
        assert!(matches!(
            service.get_recommendations(&[]),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn profile_summary_and_unranked() {
        let (_, ranked) = service(FakeRiot {
            ranked: true,
            ..Default::default()
        });
        let profile = ranked.get_profile_summary("me").await.unwrap();
        assert_eq!(profile.complete_rank, "GOLD I");
        assert_eq!(profile.games_played, 20);
        assert!((profile.top_four_percent - 0.45).abs() < 1e-9);

        let (_, unranked) = service(FakeRiot::default());
        assert_eq!(
            unranked.get_profile_summary("me").await,
            Err(AppError::UnrankedPlayer("me".to_string()))
        );
    }
}
