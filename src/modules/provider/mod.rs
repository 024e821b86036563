pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use domain::{
    MatchConfidence, MediaDetails, MediaSummary, ResolvedRecommendation, TitleMatcher,
};
pub use infrastructure::{AniListClient, CacheStats, MetadataClientConfig, ResponseCache};
