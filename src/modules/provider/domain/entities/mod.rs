pub mod media;
pub mod resolved_recommendation;

pub use media::{
    CharacterSummary, CoverImageUrls, ExternalLink, MediaDetails, MediaSummary, PartialDate,
    RelatedMedia, TitleVariants, Trailer,
};
pub use resolved_recommendation::ResolvedRecommendation;
