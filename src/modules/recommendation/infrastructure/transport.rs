use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body POSTed to the recommendation proxy
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Seam between the recommendation client and the proxy endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationTransport: Send + Sync {
    /// Returns the proxy's JSON payload, whatever its shape
    async fn complete(&self, request: &ChatCompletionRequest) -> AppResult<Value>;
}

pub struct HttpRecommendationTransport {
    client: Client,
    endpoint: String,
}

impl HttpRecommendationTransport {
    pub fn new(endpoint: impl Into<String>) -> AppResult<Self> {
        // The caller enforces the per-attempt timeout
        let client = Client::builder()
            .user_agent("animerec/0.1")
            .build()
            .map_err(|e| AppError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl RecommendationTransport for HttpRecommendationTransport {
    async fn complete(&self, request: &ChatCompletionRequest) -> AppResult<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Recommendation proxy returned {}: {}", status, body);
            return Err(AppError::upstream_status(
                status.as_u16(),
                format!("Recommendation proxy returned {}", status),
            ));
        }

        response.json::<Value>().await.map_err(|e| {
            AppError::ParseError(format!("Recommendation proxy sent invalid JSON: {}", e))
        })
    }
}
