use crate::modules::provider::infrastructure::cache::{CacheStats, ResponseCache};
use crate::modules::provider::infrastructure::http_client::{
    RetryPolicy, RetryUtil, SerialRequestQueue,
};
use crate::modules::recommendation::domain::entities::{
    QuizAnswers, RecommendationKind, RecommendationResult, RecommendationSource, SeedAnime,
};
use crate::modules::recommendation::domain::services::{
    fallback_titles, parse_recommendation_response, PromptBuilder, SYSTEM_PROMPT,
};
use crate::shared::errors::{AppError, AppResult};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::response_extractors::{extract_text, proxy_error};
use super::transport::{
    ChatCompletionRequest, ChatMessage, HttpRecommendationTransport, RecommendationTransport,
};

pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.2-3b-instruct:free";
pub const DEFAULT_RECOMMENDATIONS_URL: &str = "http://localhost:3000/api/recommendations";

#[derive(Debug, Clone)]
pub struct RecommendationClientConfig {
    pub endpoint: String,
    pub model: String,
    pub cache_size: usize,
    pub cache_ttl: Duration,
    pub queue_delay: Duration,
    /// Per-attempt limit; a timed-out attempt counts as failed
    pub request_timeout: Duration,
    pub retry_policy: RetryPolicy,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for RecommendationClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RECOMMENDATIONS_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            cache_size: 500,
            cache_ttl: Duration::from_secs(24 * 60 * 60),
            queue_delay: Duration::from_millis(50),
            request_timeout: Duration::from_secs(15),
            retry_policy: RetryPolicy::recommendations(),
            temperature: 0.3,
            max_tokens: 150,
        }
    }
}

/// LLM-backed recommendation client.
///
/// Never fails outward: every error path ends in the fallback list for the
/// request's kind, tagged `RecommendationSource::Fallback`.
pub struct RecommendationClient {
    transport: Arc<dyn RecommendationTransport>,
    cache: ResponseCache<RecommendationResult>,
    queue: SerialRequestQueue,
    retry_policy: RetryPolicy,
    request_timeout: Duration,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl RecommendationClient {
    pub fn new(config: RecommendationClientConfig) -> AppResult<Self> {
        let transport = Arc::new(HttpRecommendationTransport::new(config.endpoint.clone())?);
        Ok(Self::with_transport(transport, config))
    }

    pub fn with_transport(
        transport: Arc<dyn RecommendationTransport>,
        config: RecommendationClientConfig,
    ) -> Self {
        Self {
            transport,
            cache: ResponseCache::new("Recommendations", config.cache_size, config.cache_ttl),
            queue: SerialRequestQueue::new("Recommendations", config.queue_delay),
            retry_policy: config.retry_policy,
            request_timeout: config.request_timeout,
            model: config.model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub async fn get_quiz_recommendations(&self, answers: &QuizAnswers) -> RecommendationResult {
        let prompt = PromptBuilder::quiz(answers);
        self.recommend(RecommendationKind::Quiz, prompt, Vec::new())
            .await
    }

    pub async fn get_seed_recommendations(&self, seeds: &[SeedAnime]) -> RecommendationResult {
        let seed_titles: Vec<String> = seeds.iter().filter_map(SeedAnime::display_title).collect();

        if seed_titles.is_empty() {
            warn!("Seed recommendations requested without any usable seed titles");
            return Self::fallback(
                RecommendationKind::Seeds,
                seed_titles,
                Some("No seed titles provided".to_string()),
            );
        }

        let prompt = PromptBuilder::seeds(&seed_titles);
        self.recommend(RecommendationKind::Seeds, prompt, seed_titles)
            .await
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    async fn recommend(
        &self,
        kind: RecommendationKind,
        prompt: String,
        seed_titles: Vec<String>,
    ) -> RecommendationResult {
        let cache_key = format!("{}:{}", kind.cache_tag(), prompt);
        if let Some(cached) = self.cache.get(&cache_key).await {
            debug!("Serving {} recommendations from cache", kind.cache_tag());
            return cached;
        }

        match self.request_text(kind, prompt).await {
            Ok(text) => {
                let parsed = parse_recommendation_response(&text, kind);
                let result = RecommendationResult {
                    titles: parsed.titles,
                    source: parsed.source,
                    kind,
                    seed_titles,
                    timestamp: Utc::now(),
                    error: (parsed.source == RecommendationSource::Fallback)
                        .then(|| "Too few titles in model response".to_string()),
                };

                if result.source == RecommendationSource::Ai {
                    info!(
                        "Got {} {} recommendations from model",
                        result.titles.len(),
                        kind.cache_tag()
                    );
                    self.cache.put(cache_key, result.clone()).await;
                }
                result
            }
            Err(e) => {
                warn!(
                    "{} recommendations failed, using fallback list: {}",
                    kind.cache_tag(),
                    e
                );
                Self::fallback(kind, seed_titles, Some(e.to_string()))
            }
        }
    }

    /// Queue the proxy call; each attempt is bounded by the request timeout
    /// and must yield non-empty text to count as a success.
    async fn request_text(&self, kind: RecommendationKind, prompt: String) -> AppResult<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let transport = self.transport.clone();
        let retry_policy = self.retry_policy.clone();
        let request_timeout = self.request_timeout;
        let label = format!("{} recommendations", kind.cache_tag());

        self.queue
            .enqueue(label.clone(), move || async move {
                RetryUtil::with_retry(&retry_policy, &label, |_| true, |attempt| {
                    let transport = transport.clone();
                    let request = request.clone();
                    async move {
                        debug!("Recommendation proxy attempt {}", attempt);
                        let payload = timeout(request_timeout, transport.complete(&request))
                            .await
                            .map_err(|_| {
                                AppError::NetworkError(format!(
                                    "Recommendation request timed out after {:?}",
                                    request_timeout
                                ))
                            })??;

                        match extract_text(&payload) {
                            Some((field, text)) => {
                                debug!("Recommendation text taken from {}", field);
                                Ok(text)
                            }
                            None => Err(match proxy_error(&payload) {
                                Some(message) => AppError::UpstreamError {
                                    status: None,
                                    message,
                                },
                                None => AppError::ParseError(format!(
                                    "Unrecognized recommendation response shape: {}",
                                    Self::describe_keys(&payload)
                                )),
                            }),
                        }
                    }
                })
                .await
            })
            .await
    }

    fn describe_keys(payload: &serde_json::Value) -> String {
        match payload.as_object() {
            Some(map) if !map.is_empty() => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                format!("keys [{}]", keys.join(", "))
            }
            _ => "no keys".to_string(),
        }
    }

    fn fallback(
        kind: RecommendationKind,
        seed_titles: Vec<String>,
        error: Option<String>,
    ) -> RecommendationResult {
        RecommendationResult {
            titles: fallback_titles(kind),
            source: RecommendationSource::Fallback,
            kind,
            seed_titles,
            timestamp: Utc::now(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::recommendation::infrastructure::transport::MockRecommendationTransport;
    use mockall::Sequence;
    use serde_json::json;
    use tokio::time::{sleep, Instant};

    fn client(mock: MockRecommendationTransport) -> RecommendationClient {
        RecommendationClient::with_transport(Arc::new(mock), RecommendationClientConfig::default())
    }

    fn completion(content: &str) -> AppResult<serde_json::Value> {
        Ok(json!({ "choices": [{ "message": { "content": content } }] }))
    }

    #[tokio::test]
    async fn test_quiz_request_body() {
        let mut mock = MockRecommendationTransport::new();
        mock.expect_complete()
            .withf(|req| {
                req.model == DEFAULT_MODEL
                    && req.max_tokens == 150
                    && req.messages.len() == 2
                    && req.messages[0].role == "system"
                    && req.messages[1].content
                        == "Genre: Dark, Pace: Medium, Era: Any, Violence: Medium, Focus: Balanced"
            })
            .times(1)
            .returning(|_| completion("Monster, Berserk, Psycho-Pass, Parasyte, Claymore"));

        let answers = QuizAnswers {
            vibe: Some("Dark".to_string()),
            ..Default::default()
        };
        let result = client(mock).get_quiz_recommendations(&answers).await;

        assert_eq!(result.source, RecommendationSource::Ai);
        assert_eq!(result.kind, RecommendationKind::Quiz);
        assert_eq!(result.titles.len(), 5);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_ai_results_are_cached_by_prompt() {
        let mut mock = MockRecommendationTransport::new();
        mock.expect_complete()
            .times(1)
            .returning(|_| completion("Monster, Berserk, Psycho-Pass, Parasyte, Claymore"));

        let client = client(mock);
        let seeds = vec![SeedAnime::Raw("Naruto".to_string())];
        let first = client.get_seed_recommendations(&seeds).await;
        let second = client.get_seed_recommendations(&seeds).await;

        assert_eq!(first, second);
        assert_eq!(first.seed_titles, vec!["Naruto"]);
        assert_eq!(client.cache_stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_seed_prompt_uses_display_titles() {
        let mut mock = MockRecommendationTransport::new();
        mock.expect_complete()
            .withf(|req| req.messages[1].content == "Recommend anime similar to: Mushishi, Haibane Renmei")
            .returning(|_| completion("Natsume's Book of Friends, Kino's Journey, Aria, Barakamon, Non Non Biyori"));

        let seeds = vec![
            SeedAnime::Raw("Mushishi".to_string()),
            SeedAnime::Raw("  ".to_string()),
            SeedAnime::Raw("Haibane Renmei".to_string()),
        ];
        let result = client(mock).get_seed_recommendations(&seeds).await;
        assert_eq!(result.source, RecommendationSource::Ai);
    }

    #[tokio::test]
    async fn test_no_seeds_returns_fallback_without_network() {
        let mut mock = MockRecommendationTransport::new();
        mock.expect_complete().never();

        let result = client(mock).get_seed_recommendations(&[]).await;
        assert!(result.is_fallback());
        assert_eq!(result.titles, fallback_titles(RecommendationKind::Seeds));
    }

    #[tokio::test]
    async fn test_too_few_titles_is_fallback_and_not_cached() {
        let mut mock = MockRecommendationTransport::new();
        mock.expect_complete()
            .times(2)
            .returning(|_| completion("Here are some recommendations based on your taste: X"));

        let client = client(mock);
        let answers = QuizAnswers::default();
        let result = client.get_quiz_recommendations(&answers).await;
        assert!(result.is_fallback());
        assert_eq!(result.titles, fallback_titles(RecommendationKind::Quiz));

        // Not cached: the next call asks the model again
        let _ = client.get_quiz_recommendations(&answers).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_then_succeeds() {
        let mut seq = Sequence::new();
        let mut mock = MockRecommendationTransport::new();
        mock.expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::upstream_status(502, "Bad Gateway")));
        mock.expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json!({ "unexpected": true })));
        mock.expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json!({ "titles": ["Akira", "Paprika", "Perfect Blue", "Redline", "Tekkonkinkreet"], "source": "ai" })));

        let result = client(mock)
            .get_quiz_recommendations(&QuizAnswers::default())
            .await;

        assert_eq!(result.source, RecommendationSource::Ai);
        assert_eq!(result.titles[0], "Akira");
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_attempts_return_fallback() {
        let mut mock = MockRecommendationTransport::new();
        mock.expect_complete()
            .times(3)
            .returning(|_| Err(AppError::NetworkError("connection refused".to_string())));

        let result = client(mock)
            .get_seed_recommendations(&[SeedAnime::Raw("Naruto".to_string())])
            .await;

        assert!(result.is_fallback());
        assert_eq!(result.titles, fallback_titles(RecommendationKind::Seeds));
        assert!(result.error.unwrap().contains("connection refused"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_proxy_error_body_counts_as_failure() {
        let mut mock = MockRecommendationTransport::new();
        mock.expect_complete()
            .times(3)
            .returning(|_| Ok(json!({ "error": "API key not configured" })));

        let result = client(mock)
            .get_quiz_recommendations(&QuizAnswers::default())
            .await;
        assert!(result.is_fallback());
        assert!(result.error.unwrap().contains("API key not configured"));
    }

    /// Transport that never answers within the timeout
    struct SlowTransport;

    #[async_trait::async_trait]
    impl RecommendationTransport for SlowTransport {
        async fn complete(&self, _request: &ChatCompletionRequest) -> AppResult<serde_json::Value> {
            sleep(Duration::from_secs(60)).await;
            completion("Monster, Berserk, Psycho-Pass, Parasyte, Claymore")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeouts_exhaust_attempts_then_fallback() {
        let client = RecommendationClient::with_transport(
            Arc::new(SlowTransport),
            RecommendationClientConfig::default(),
        );

        let started = Instant::now();
        let result = client.get_quiz_recommendations(&QuizAnswers::default()).await;
        let elapsed = started.elapsed();

        assert!(result.is_fallback());
        assert!(result.error.unwrap().contains("timed out"));
        // Three 15s attempts plus two back-off pauses, never the full 60s per call
        assert!(elapsed >= Duration::from_secs(45));
        assert!(elapsed < Duration::from_secs(60));
    }
}
