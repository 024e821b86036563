pub mod pipeline;

pub use pipeline::{RecommendationOutcome, RecommendationPipeline};
