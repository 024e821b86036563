pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{RecommendationOutcome, RecommendationPipeline};
pub use domain::{
    QuizAnswers, RecommendationKind, RecommendationResult, RecommendationSource, SeedAnime,
};
pub use infrastructure::{RecommendationClient, RecommendationClientConfig};
