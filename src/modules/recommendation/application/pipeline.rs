use crate::modules::provider::{AniListClient, ResolvedRecommendation};
use crate::modules::recommendation::domain::entities::{
    QuizAnswers, RecommendationResult, SeedAnime,
};
use crate::modules::recommendation::infrastructure::RecommendationClient;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Recommended titles and their metadata matches
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOutcome {
    pub recommendation: RecommendationResult,
    /// In recommendation order; unmatched titles are absent
    pub resolved: Vec<ResolvedRecommendation>,
}

impl RecommendationOutcome {
    pub fn unresolved_titles(&self) -> Vec<&str> {
        self.recommendation
            .titles
            .iter()
            .filter(|title| {
                !self
                    .resolved
                    .iter()
                    .any(|item| &item.search_title == *title)
            })
            .map(String::as_str)
            .collect()
    }
}

/// Asks the recommendation client for titles, then resolves them against
/// the metadata client.
pub struct RecommendationPipeline {
    metadata: Arc<AniListClient>,
    recommendations: Arc<RecommendationClient>,
}

impl RecommendationPipeline {
    pub fn new(metadata: Arc<AniListClient>, recommendations: Arc<RecommendationClient>) -> Self {
        Self {
            metadata,
            recommendations,
        }
    }

    pub async fn recommend_from_quiz(&self, answers: &QuizAnswers) -> RecommendationOutcome {
        let recommendation = self.recommendations.get_quiz_recommendations(answers).await;
        self.resolve(recommendation).await
    }

    pub async fn recommend_from_seeds(&self, seeds: &[SeedAnime]) -> RecommendationOutcome {
        let recommendation = self.recommendations.get_seed_recommendations(seeds).await;
        self.resolve(recommendation).await
    }

    /// Look each typed title up once; the top search hit becomes the seed,
    /// otherwise the text is passed along as typed.
    pub async fn seeds_from_titles(&self, titles: &[String]) -> Vec<SeedAnime> {
        let mut seeds = Vec::with_capacity(titles.len());
        for title in titles {
            match self.metadata.search_by_text(title, 1, 1).await {
                Ok(results) => match results.into_iter().next() {
                    Some(media) => seeds.push(SeedAnime::Media(media)),
                    None => seeds.push(SeedAnime::Raw(title.clone())),
                },
                Err(e) => {
                    warn!("Seed lookup for '{}' failed: {}", title, e);
                    seeds.push(SeedAnime::Raw(title.clone()));
                }
            }
        }
        seeds
    }

    async fn resolve(&self, recommendation: RecommendationResult) -> RecommendationOutcome {
        let resolved = self.metadata.resolve_titles(&recommendation.titles).await;
        info!(
            "{} recommendation ({:?}): {} titles, {} resolved",
            recommendation.kind.cache_tag(),
            recommendation.source,
            recommendation.titles.len(),
            resolved.len()
        );

        RecommendationOutcome {
            recommendation,
            resolved,
        }
    }
}
