use crate::modules::provider::domain::entities::MediaSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a title list came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Ai,
    Fallback,
}

/// Which input produced the prompt. Each kind has its own fallback list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Quiz,
    Seeds,
}

impl RecommendationKind {
    pub fn cache_tag(&self) -> &'static str {
        match self {
            RecommendationKind::Quiz => "quiz",
            RecommendationKind::Seeds => "seeds",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    /// At most 12, in model (or fallback) preference order
    pub titles: Vec<String>,
    pub source: RecommendationSource,
    pub kind: RecommendationKind,
    /// Seed titles the prompt was built from; empty for quiz results
    #[serde(default)]
    pub seed_titles: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// Why a fallback list was returned, when it was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendationResult {
    pub fn is_fallback(&self) -> bool {
        self.source == RecommendationSource::Fallback
    }
}

/// Preference quiz answers. Missing answers fall back to neutral defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizAnswers {
    pub vibe: Option<String>,
    pub pace: Option<String>,
    pub era: Option<String>,
    pub violence: Option<String>,
    pub focus: Option<String>,
}

impl QuizAnswers {
    pub fn vibe(&self) -> &str {
        Self::answer(&self.vibe, "Mixed")
    }

    pub fn pace(&self) -> &str {
        Self::answer(&self.pace, "Medium")
    }

    pub fn era(&self) -> &str {
        Self::answer(&self.era, "Any")
    }

    pub fn violence(&self) -> &str {
        Self::answer(&self.violence, "Medium")
    }

    pub fn focus(&self) -> &str {
        Self::answer(&self.focus, "Balanced")
    }

    fn answer<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}

/// A title the user already likes
#[derive(Debug, Clone, PartialEq)]
pub enum SeedAnime {
    Media(MediaSummary),
    Raw(String),
}

impl SeedAnime {
    /// English, else romaji, else the raw text
    pub fn display_title(&self) -> Option<String> {
        match self {
            SeedAnime::Media(media) => media.title.preferred().map(str::to_string),
            SeedAnime::Raw(title) => {
                let title = title.trim();
                (!title.is_empty()).then(|| title.to_string())
            }
        }
    }
}
