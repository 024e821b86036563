/// Hand-written transports standing in for the network
use animerec_lib::modules::provider::infrastructure::external::anilist::{
    dto::AniListRequest, GraphqlTransport, TransportResponse,
};
use animerec_lib::modules::recommendation::infrastructure::{
    ChatCompletionRequest, RecommendationTransport,
};
use animerec_lib::shared::errors::AppResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

type GraphqlHandler = Box<dyn Fn(&AniListRequest) -> AppResult<TransportResponse> + Send + Sync>;

/// Answers GraphQL requests from a handler and records what it was sent
pub struct FakeGraphqlTransport {
    handler: GraphqlHandler,
    latency: Duration,
    requests: Mutex<Vec<AniListRequest>>,
}

impl FakeGraphqlTransport {
    pub fn new<H>(handler: H) -> Self
    where
        H: Fn(&AniListRequest) -> AppResult<TransportResponse> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            latency: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request takes `latency` to answer
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<AniListRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `search` variables of every search request, in arrival order
    pub fn search_terms(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.variables.get("search").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl GraphqlTransport for FakeGraphqlTransport {
    async fn post(&self, request: &AniListRequest) -> AppResult<TransportResponse> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        (self.handler)(request)
    }
}

pub fn ok(body: String) -> AppResult<TransportResponse> {
    Ok(TransportResponse { status: 200, body })
}

pub fn status(status: u16) -> AppResult<TransportResponse> {
    Ok(TransportResponse {
        status,
        body: String::from("{\"errors\":[{\"message\":\"failure\"}]}"),
    })
}

/// Replays scripted proxy responses in order; the last one repeats
pub struct ScriptedRecommendationTransport {
    script: Mutex<VecDeque<AppResult<Value>>>,
    last: Mutex<Option<AppResult<Value>>>,
    latency: Duration,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl ScriptedRecommendationTransport {
    pub fn new(script: Vec<AppResult<Value>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            latency: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_response(&self) -> AppResult<Value> {
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(response) = script.pop_front() {
            *last = Some(response.clone());
            return response;
        }
        last.clone()
            .unwrap_or_else(|| Ok(Value::Null))
    }
}

#[async_trait]
impl RecommendationTransport for ScriptedRecommendationTransport {
    async fn complete(&self, request: &ChatCompletionRequest) -> AppResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.next_response()
    }
}
