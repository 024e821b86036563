use super::media::MediaSummary;
use crate::modules::provider::domain::value_objects::MatchConfidence;
use serde::{Deserialize, Serialize};

/// A recommended title joined to its metadata record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedRecommendation {
    /// Absent when nothing matched; such items are dropped before display
    pub media: Option<MediaSummary>,
    pub confidence: MatchConfidence,
    pub search_title: String,
}
