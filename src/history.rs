use crate::analysis::normalizer::MatchNormalizer;
use crate::api::MatchSource;
use crate::cache::MatchCache;
use crate::domain::MatchSummary;
use crate::error::{AppError, MatchFailure};
use crate::mapping::NameMapping;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Upper bound on match-detail calls outstanding at once, across all requests.
pub const MAX_IN_FLIGHT: usize = 5;

pub type MatchResult = Result<MatchSummary, MatchFailure>;

pub struct MatchHistoryFetcher<S> {
    source: Arc<S>,
    cache: MatchCache,
    slots: Arc<Semaphore>,
}

impl<S: MatchSource> MatchHistoryFetcher<S> {
    pub fn new(source: Arc<S>, cache: MatchCache) -> Self {
        MatchHistoryFetcher {
            source,
            cache,
            slots: Arc::new(Semaphore::new(MAX_IN_FLIGHT)),
        }
    }

    /// Resolves up to `count` recent matches for `player_id`.
    ///
    /// Only the id listing can fail the whole call. Each match resolves on its
    /// own: a failed detail fetch or normalization becomes a `MatchFailure` in
    /// the output and the remaining matches still complete. Output order
    /// follows completion, not the provider's listing.
    pub async fn fetch(
        &self,
        player_id: &str,
        count: usize,
        names: &NameMapping,
    ) -> Result<Vec<MatchResult>, AppError> {
        if count == 0 {
            return Err(AppError::InvalidInput("match count must be positive".to_string()));
        }

        let mut match_ids = self.source.fetch_match_ids(player_id, count).await?;
        match_ids.truncate(count);
        tracing::debug!(
            player_id,
            requested = count,
            listed = match_ids.len(),
            "match ids fetched"
        );

        let mut pending: FuturesUnordered<_> = match_ids
            .iter()
            .map(|id| self.resolve(player_id, id, names))
            .collect();

        let mut results = Vec::with_capacity(match_ids.len());
        while let Some(result) = pending.next().await {
            if let Err(failure) = &result {
                tracing::warn!(
                    match_id = %failure.match_id,
                    error = %failure.error,
                    "match skipped"
                );
            }
            results.push(result);
        }

        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::info!(
            player_id,
            resolved = results.len() - failed,
            failed,
            "match history resolved"
        );
        Ok(results)
    }

    async fn resolve(&self, player_id: &str, match_id: &str, names: &NameMapping) -> MatchResult {
        if let Some(hit) = self.cache.get(player_id, match_id).await {
            tracing::debug!(match_id, "match cache hit");
            return Ok(hit.as_ref().clone());
        }

        let raw = match self.cache.get_raw(match_id).await {
            Some(raw) => {
                tracing::debug!(match_id, "raw match cache hit");
                raw
            }
            None => {
                let _permit = self.slots.acquire().await.map_err(|_| {
                    MatchFailure::new(
                        match_id,
                        AppError::UpstreamUnavailable("fetch pool closed".to_string()),
                    )
                })?;
                let raw = Arc::new(
                    self.source
                        .fetch_match_detail(match_id)
                        .await
                        .map_err(|e| MatchFailure::new(match_id, e))?,
                );
                self.cache.insert_raw(match_id, raw.clone()).await;
                raw
            }
        };

        let summary = MatchNormalizer::normalize(&raw, player_id, names)
            .map_err(|e| MatchFailure::new(match_id, e))?;
        self.cache.insert(player_id, Arc::new(summary.clone())).await;
        Ok(summary)
    }
}

/// Splits fetch output into the usable summaries and the failures.
pub fn split_history(results: Vec<MatchResult>) -> (Vec<MatchSummary>, Vec<MatchFailure>) {
    let mut summaries = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(failure) => failures.push(failure),
        }
    }
    (summaries, failures)
}
