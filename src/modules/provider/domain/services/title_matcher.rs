use crate::modules::provider::domain::entities::{MediaSummary, ResolvedRecommendation};
use crate::modules::provider::domain::value_objects::MatchConfidence;
use strsim::jaro_winkler;
use tracing::debug;

/// Picks the metadata record that best answers a free-text title.
///
/// Rule, in order:
/// 1. the first result whose romaji or english title contains the query
///    (case-insensitive): `High` if it is the top result, `Medium` otherwise;
/// 2. no containment match: the top result, always `Medium`;
/// 3. no results: no media, `Low`.
///
/// Jaro-Winkler similarity below the threshold only flags a weak top-result
/// pick in the logs; it never changes the confidence.
#[derive(Debug, Clone)]
pub struct TitleMatcher {
    similarity_threshold: f64,
}

impl Default for TitleMatcher {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.75,
        }
    }
}

impl TitleMatcher {
    pub fn new(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold: similarity_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn select(&self, search_title: &str, results: Vec<MediaSummary>) -> ResolvedRecommendation {
        let position = results
            .iter()
            .position(|media| media.title.contains(search_title));

        let (media, confidence) = match position {
            Some(0) => (results.into_iter().next(), MatchConfidence::High),
            Some(index) => (results.into_iter().nth(index), MatchConfidence::Medium),
            None => {
                match results.into_iter().next() {
                    Some(top) => {
                        if !self.is_close(search_title, &top) {
                            debug!(
                                "Weak match for '{}': using top result '{}'",
                                search_title,
                                top.display_title()
                            );
                        }
                        (Some(top), MatchConfidence::Medium)
                    }
                    None => (None, MatchConfidence::Low),
                }
            }
        };

        ResolvedRecommendation {
            media,
            confidence,
            search_title: search_title.to_string(),
        }
    }

    /// Whether the top result's title is within the similarity threshold
    pub fn is_close(&self, search_title: &str, media: &MediaSummary) -> bool {
        self.similarity(search_title, media) >= self.similarity_threshold
    }

    /// Best Jaro-Winkler score between the query and the romaji/english titles
    pub fn similarity(&self, search_title: &str, media: &MediaSummary) -> f64 {
        let query = search_title.trim().to_lowercase();
        [&media.title.romaji, &media.title.english]
            .into_iter()
            .flatten()
            .map(|title| jaro_winkler(&query, &title.trim().to_lowercase()))
            .fold(0.0, f64::max)
    }
}
