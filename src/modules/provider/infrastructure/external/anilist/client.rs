use crate::modules::provider::domain::entities::{MediaDetails, MediaSummary, ResolvedRecommendation};
use crate::modules::provider::domain::services::TitleMatcher;
use crate::modules::provider::infrastructure::cache::{CacheStats, ResponseCache};
use crate::modules::provider::infrastructure::http_client::{
    RetryPolicy, RetryUtil, SerialRequestQueue,
};
use crate::shared::errors::{AppError, AppResult};
use futures::future::join_all;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    dto::{AniListRequest, AniListResponse, MediaData, PageData},
    mapper::AniListMapper,
    queries::AniListOperation,
    transport::{GraphqlTransport, HttpGraphqlTransport, TransportResponse, ANILIST_API_URL},
};

/// Searches shorter than this never reach the network
pub const MIN_SEARCH_LENGTH: usize = 2;

#[derive(Debug, Clone)]
pub struct MetadataClientConfig {
    pub endpoint: String,
    pub cache_size: usize,
    pub cache_ttl: Duration,
    pub queue_delay: Duration,
    pub retry_policy: RetryPolicy,
    /// Titles looked up together by `resolve_titles`
    pub resolve_batch_size: usize,
    /// Search results considered per title by `resolve_titles`
    pub resolve_per_page: u32,
}

impl Default for MetadataClientConfig {
    fn default() -> Self {
        Self {
            endpoint: ANILIST_API_URL.to_string(),
            cache_size: 1000,
            cache_ttl: Duration::from_secs(10 * 60),
            queue_delay: Duration::from_millis(25),
            retry_policy: RetryPolicy::anilist(),
            resolve_batch_size: 5,
            resolve_per_page: 3,
        }
    }
}

/// Rate-limited, cached AniList GraphQL client
pub struct AniListClient {
    transport: Arc<dyn GraphqlTransport>,
    cache: ResponseCache<Value>,
    queue: SerialRequestQueue,
    retry_policy: RetryPolicy,
    matcher: TitleMatcher,
    resolve_batch_size: usize,
    resolve_per_page: u32,
}

impl AniListClient {
    pub fn new(config: MetadataClientConfig) -> AppResult<Self> {
        let transport = Arc::new(HttpGraphqlTransport::new(config.endpoint.clone())?);
        Ok(Self::with_transport(transport, config))
    }

    pub fn with_transport(transport: Arc<dyn GraphqlTransport>, config: MetadataClientConfig) -> Self {
        Self {
            transport,
            cache: ResponseCache::new("AniList", config.cache_size, config.cache_ttl),
            queue: SerialRequestQueue::new("AniList", config.queue_delay),
            retry_policy: config.retry_policy,
            matcher: TitleMatcher::default(),
            resolve_batch_size: config.resolve_batch_size.max(1),
            resolve_per_page: config.resolve_per_page.max(1),
        }
    }

    /// Trending anime, adult titles excluded
    pub async fn fetch_trending(&self, page: u32, per_page: u32) -> AppResult<Vec<MediaSummary>> {
        let data = self
            .execute(
                AniListOperation::Trending,
                json!({ "page": page, "perPage": per_page }),
            )
            .await?;
        Self::parse_page(data)
    }

    /// Search by text, most popular first. Terms under two characters return
    /// an empty list without touching the network.
    pub async fn search_by_text(
        &self,
        term: &str,
        page: u32,
        per_page: u32,
    ) -> AppResult<Vec<MediaSummary>> {
        if term.chars().count() < MIN_SEARCH_LENGTH {
            return Ok(Vec::new());
        }

        let data = self
            .execute(
                AniListOperation::Search,
                json!({ "search": term, "page": page, "perPage": per_page }),
            )
            .await?;
        Self::parse_page(data)
    }

    pub async fn fetch_details(&self, id: u32) -> AppResult<MediaDetails> {
        let data = self
            .execute(AniListOperation::Details, json!({ "id": id }))
            .await?;

        let media_data: MediaData = serde_json::from_value(data).map_err(|e| {
            AppError::ParseError(format!("Failed to parse AniList details response: {}", e))
        })?;

        media_data
            .media
            .and_then(AniListMapper::to_details)
            .ok_or_else(|| AppError::NotFound(format!("Anime with AniList id {}", id)))
    }

    /// Resolve free-text titles to media records.
    ///
    /// Titles are looked up in batches; a batch's lookups are issued together
    /// and still pass through the cache and the serial queue. A failed lookup
    /// only drops its own title. Titles with no search results are omitted.
    pub async fn resolve_titles(&self, titles: &[String]) -> Vec<ResolvedRecommendation> {
        if titles.is_empty() {
            return Vec::new();
        }

        let mut resolved = Vec::with_capacity(titles.len());
        for batch in titles.chunks(self.resolve_batch_size) {
            let results = join_all(batch.iter().map(|title| self.resolve_title(title))).await;
            resolved.extend(results.into_iter().flatten());
        }

        info!(
            "Resolved {} out of {} recommended titles",
            resolved.len(),
            titles.len()
        );
        resolved
    }

    async fn resolve_title(&self, title: &str) -> Option<ResolvedRecommendation> {
        match self.search_by_text(title, 1, self.resolve_per_page).await {
            Ok(results) => {
                let resolved = self.matcher.select(title, results);
                if resolved.media.is_none() {
                    debug!("No AniList match for title '{}'", title);
                    return None;
                }
                Some(resolved)
            }
            Err(e) => {
                warn!("Failed to resolve title '{}': {}", title, e);
                None
            }
        }
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Cache, then queue, then the network (with one retry on HTTP 500)
    async fn execute(&self, operation: AniListOperation, variables: Value) -> AppResult<Value> {
        let cache_key = format!("{}:{}", operation.name(), variables);

        if let Some(data) = self.cache.get(&cache_key).await {
            return Ok(data);
        }

        let transport = self.transport.clone();
        let retry_policy = self.retry_policy.clone();
        let request = AniListRequest {
            query: operation.query().to_string(),
            variables,
        };
        let label = format!("AniList {}", operation.name());

        let data = self
            .queue
            .enqueue(label.clone(), move || async move {
                RetryUtil::with_retry(&retry_policy, &label, AppError::is_server_error, |_| {
                    let transport = transport.clone();
                    let request = request.clone();
                    async move {
                        let response = transport.post(&request).await?;
                        Self::read_response(response)
                    }
                })
                .await
            })
            .await?;

        self.cache.put(cache_key, data.clone()).await;
        Ok(data)
    }

    fn read_response(response: TransportResponse) -> AppResult<Value> {
        if !(200..300).contains(&response.status) {
            return Err(AppError::upstream_status(
                response.status,
                format!("AniList API returned HTTP {}", response.status),
            ));
        }

        let parsed: AniListResponse = serde_json::from_str(&response.body).map_err(|e| {
            AppError::ParseError(format!("Failed to parse AniList response: {}", e))
        })?;

        if let Some(errors) = parsed.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            return Err(AppError::graphql(format!(
                "AniList GraphQL errors: {}",
                messages.join(", ")
            )));
        }

        parsed
            .data
            .ok_or_else(|| AppError::ParseError("AniList response has no data".to_string()))
    }

    fn parse_page(data: Value) -> AppResult<Vec<MediaSummary>> {
        let page: PageData = serde_json::from_value(data).map_err(|e| {
            AppError::ParseError(format!("Failed to parse AniList page response: {}", e))
        })?;

        Ok(page
            .page
            .media
            .into_iter()
            .filter_map(AniListMapper::to_summary)
            .collect())
    }
}
