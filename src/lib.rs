pub mod modules;
pub mod shared;

pub use modules::provider::{
    AniListClient, MatchConfidence, MediaDetails, MediaSummary, MetadataClientConfig,
    ResolvedRecommendation,
};
pub use modules::recommendation::{
    QuizAnswers, RecommendationClient, RecommendationClientConfig, RecommendationOutcome,
    RecommendationPipeline, RecommendationResult, RecommendationSource, SeedAnime,
};
pub use shared::errors::{AppError, AppResult};
pub use shared::AppConfig;
