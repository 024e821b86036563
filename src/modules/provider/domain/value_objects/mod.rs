pub mod match_confidence;
pub mod media_enums;

pub use match_confidence::MatchConfidence;
pub use media_enums::{MediaFormat, MediaSeason, MediaStatus};
