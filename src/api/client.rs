use crate::config::Config;
use crate::error::AppError;
use crate::mapping::NameMapping;
use crate::rate_limit::{retry_delay, ApiRateLimiter, MAX_RETRIES};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::endpoints;
use super::models::*;
use super::{AccountSource, MatchSource, RankSource, StaticDataSource};

const USER_AGENT: &str = concat!("tft_insight/", env!("CARGO_PKG_VERSION"));

pub struct RiotApiClient {
    config: Config,
    http: reqwest::Client,
    rate_limiter: ApiRateLimiter,
}

impl RiotApiClient {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(RiotApiClient {
            config,
            http,
            rate_limiter: ApiRateLimiter::default(),
        })
    }

    pub fn requests_made(&self) -> u64 {
        self.rate_limiter.requests_made()
    }

    /// GETs a Riot endpoint, retrying 429s with back-off. Any other status is
    /// handed back to the caller.
    async fn send(&self, url: &str) -> Result<reqwest::Response, AppError> {
        let mut retry_count = 0;

        loop {
            self.rate_limiter.acquire().await;
            tracing::debug!(url, "riot request");

            let response = self
                .http
                .get(url)
                .header("X-Riot-Token", &self.config.api_key)
                .send()
                .await?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }
            if retry_count >= MAX_RETRIES {
                return Err(AppError::RateLimited);
            }
            let wait = retry_delay(retry_count);
            tracing::warn!(url, wait_ms = wait.as_millis() as u64, "rate limited, retrying");
            tokio::time::sleep(wait).await;
            retry_count += 1;
        }
    }

    async fn execute_request<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let response = self.send(url).await?;
        decode(url, response).await
    }

    pub async fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        let url = endpoints::account(&self.config.match_base(), game_name, tag_line);

        let response = self.send(&url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line)));
        }
        decode(&url, response).await
    }

    pub async fn get_match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, AppError> {
        let url = endpoints::match_ids(&self.config.match_base(), puuid, count);
        self.execute_request(&url).await
    }

    pub async fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        let url = endpoints::match_detail(&self.config.match_base(), match_id);
        self.execute_request(&url).await
    }

    pub async fn get_league_entries(&self, puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError> {
        let url = endpoints::league_entries(&self.config.league_base(), puuid);
        self.execute_request(&url).await
    }

    /// CommunityDragon is not a Riot host: no token, no Riot rate limit.
    pub async fn get_static_data(&self) -> Result<NameMapping, AppError> {
        tracing::debug!(url = %self.config.static_data_url, "loading static data");

        let data: StaticDataDto = self
            .http
            .get(&self.config.static_data_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mapping = NameMapping::from_static_data(data);
        tracing::info!(
            units = mapping.unit_count(),
            traits = mapping.trait_count(),
            "static name mapping loaded"
        );
        Ok(mapping)
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::UpstreamUnavailable(format!("{} returned {}", url, status)));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::JsonError(format!("{}: {}", url, e)))
}

#[async_trait]
impl MatchSource for RiotApiClient {
    async fn fetch_match_ids(&self, player_id: &str, count: usize) -> Result<Vec<String>, AppError> {
        self.get_match_ids(player_id, count).await
    }

    async fn fetch_match_detail(&self, match_id: &str) -> Result<MatchDto, AppError> {
        self.get_match(match_id).await
    }
}

#[async_trait]
impl RankSource for RiotApiClient {
    async fn fetch_rank_records(&self, player_id: &str) -> Result<Vec<LeagueEntryDto>, AppError> {
        self.get_league_entries(player_id).await
    }
}

#[async_trait]
impl AccountSource for RiotApiClient {
    async fn fetch_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        self.get_account(game_name, tag_line).await
    }
}

#[async_trait]
impl StaticDataSource for RiotApiClient {
    async fn fetch_name_mapping(&self) -> Result<NameMapping, AppError> {
        self.get_static_data().await
    }
}
