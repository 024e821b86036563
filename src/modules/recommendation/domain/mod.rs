pub mod entities;
pub mod services;

pub use entities::{
    QuizAnswers, RecommendationKind, RecommendationResult, RecommendationSource, SeedAnime,
};
pub use services::{fallback_titles, parse_recommendation_response, PromptBuilder};
