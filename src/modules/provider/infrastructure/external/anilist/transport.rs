use super::dto::AniListRequest;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const ANILIST_API_URL: &str = "https://graphql.anilist.co";

/// Raw HTTP outcome of one GraphQL POST. Status handling is the client's job.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Seam between the metadata client and the network
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn post(&self, request: &AniListRequest) -> AppResult<TransportResponse>;
}

pub struct HttpGraphqlTransport {
    client: Client,
    endpoint: String,
}

impl HttpGraphqlTransport {
    pub fn new(endpoint: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
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
impl GraphqlTransport for HttpGraphqlTransport {
    async fn post(&self, request: &AniListRequest) -> AppResult<TransportResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            log::warn!("AniList: failed to read response body: {}", e);
            AppError::NetworkError(format!("Failed to read AniList response: {}", e))
        })?;

        Ok(TransportResponse { status, body })
    }
}
