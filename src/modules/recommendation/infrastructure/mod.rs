pub mod client;
pub mod response_extractors;
pub mod transport;

pub use client::{RecommendationClient, RecommendationClientConfig, DEFAULT_MODEL, DEFAULT_RECOMMENDATIONS_URL};
pub use transport::{
    ChatCompletionRequest, ChatMessage, HttpRecommendationTransport, RecommendationTransport,
};
