use crate::modules::provider::infrastructure::external::anilist::ANILIST_API_URL;
use crate::modules::provider::MetadataClientConfig;
use crate::modules::recommendation::infrastructure::{
    RecommendationClientConfig, DEFAULT_MODEL, DEFAULT_RECOMMENDATIONS_URL,
};
use crate::shared::errors::{AppError, AppResult};
use std::str::FromStr;
use std::time::Duration;

/// Client settings resolved from the environment (and `.env`, when present)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub anilist_api_url: String,
    pub recommendations_api_url: String,
    pub model: String,
    pub metadata_cache_size: usize,
    pub metadata_cache_ttl: Duration,
    pub metadata_queue_delay: Duration,
    pub recommendation_cache_size: usize,
    pub recommendation_cache_ttl: Duration,
    pub recommendation_queue_delay: Duration,
    pub recommendation_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            anilist_api_url: ANILIST_API_URL.to_string(),
            recommendations_api_url: DEFAULT_RECOMMENDATIONS_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            metadata_cache_size: 1000,
            metadata_cache_ttl: Duration::from_secs(10 * 60),
            metadata_queue_delay: Duration::from_millis(25),
            recommendation_cache_size: 500,
            recommendation_cache_ttl: Duration::from_secs(24 * 60 * 60),
            recommendation_queue_delay: Duration::from_millis(50),
            recommendation_timeout: Duration::from_secs(15),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        // Load environment variables
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults
    pub fn from_lookup<L>(lookup: L) -> AppResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Ok(Self {
            anilist_api_url: get("ANILIST_API_URL").unwrap_or(defaults.anilist_api_url),
            recommendations_api_url: get("RECOMMENDATIONS_API_URL")
                .unwrap_or(defaults.recommendations_api_url),
            model: get("OPENROUTER_MODEL").unwrap_or(defaults.model),
            metadata_cache_size: parse_or(&get, "METADATA_CACHE_SIZE", defaults.metadata_cache_size)?,
            metadata_cache_ttl: secs_or(&get, "METADATA_CACHE_TTL_SECS", defaults.metadata_cache_ttl)?,
            metadata_queue_delay: millis_or(
                &get,
                "METADATA_QUEUE_DELAY_MS",
                defaults.metadata_queue_delay,
            )?,
            recommendation_cache_size: parse_or(
                &get,
                "RECOMMENDATION_CACHE_SIZE",
                defaults.recommendation_cache_size,
            )?,
            recommendation_cache_ttl: secs_or(
                &get,
                "RECOMMENDATION_CACHE_TTL_SECS",
                defaults.recommendation_cache_ttl,
            )?,
            recommendation_queue_delay: millis_or(
                &get,
                "RECOMMENDATION_QUEUE_DELAY_MS",
                defaults.recommendation_queue_delay,
            )?,
            recommendation_timeout: secs_or(
                &get,
                "RECOMMENDATION_TIMEOUT_SECS",
                defaults.recommendation_timeout,
            )?,
        })
    }

    pub fn metadata_config(&self) -> MetadataClientConfig {
        MetadataClientConfig {
            endpoint: self.anilist_api_url.clone(),
            cache_size: self.metadata_cache_size,
            cache_ttl: self.metadata_cache_ttl,
            queue_delay: self.metadata_queue_delay,
            ..MetadataClientConfig::default()
        }
    }

    pub fn recommendation_config(&self) -> RecommendationClientConfig {
        RecommendationClientConfig {
            endpoint: self.recommendations_api_url.clone(),
            model: self.model.clone(),
            cache_size: self.recommendation_cache_size,
            cache_ttl: self.recommendation_cache_ttl,
            queue_delay: self.recommendation_queue_delay,
            request_timeout: self.recommendation_timeout,
            ..RecommendationClientConfig::default()
        }
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::ConfigError(format!("{} must be a number, got '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

fn secs_or<G>(get: &G, key: &str, default: Duration) -> AppResult<Duration>
where
    G: Fn(&str) -> Option<String>,
{
    parse_or(get, key, default.as_secs()).map(Duration::from_secs)
}

fn millis_or<G>(get: &G, key: &str, default: Duration) -> AppResult<Duration>
where
    G: Fn(&str) -> Option<String>,
{
    parse_or(get, key, default.as_millis() as u64).map(Duration::from_millis)
}
