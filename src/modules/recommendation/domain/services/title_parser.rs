//! Best-effort conversion of free model text into a title list

use crate::modules::recommendation::domain::entities::{RecommendationKind, RecommendationSource};

pub const MAX_TITLES: usize = 12;
pub const MIN_TITLES: usize = 5;

/// Substrings that mark a chunk as chatter rather than a title
const FILLER_PHRASES: [&str; 3] = ["here", "based", "recommend"];

const QUIZ_FALLBACK: [&str; MAX_TITLES] = [
    "Attack on Titan",
    "Demon Slayer",
    "My Hero Academia",
    "Death Note",
    "One Punch Man",
    "Mob Psycho 100",
    "Jujutsu Kaisen",
    "Spirited Away",
    "Your Name",
    "Weathering with You",
    "A Silent Voice",
    "Princess Mononoke",
];

const SEEDS_FALLBACK: [&str; MAX_TITLES] = [
    "Attack on Titan",
    "Demon Slayer",
    "Jujutsu Kaisen",
    "My Hero Academia",
    "One Piece",
    "Naruto",
    "Dragon Ball Super",
    "Hunter x Hunter",
    "Fullmetal Alchemist Brotherhood",
    "Death Note",
    "One Punch Man",
    "Mob Psycho 100",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitles {
    pub titles: Vec<String>,
    pub source: RecommendationSource,
}

/// Curated list used whenever the model path fails or under-produces
pub fn fallback_titles(kind: RecommendationKind) -> Vec<String> {
    let list = match kind {
        RecommendationKind::Quiz => &QUIZ_FALLBACK,
        RecommendationKind::Seeds => &SEEDS_FALLBACK,
    };
    list.iter().map(|title| title.to_string()).collect()
}

/// Split on commas and newlines, keep chunks of 3..=49 characters that are
/// not filler, cap at 12. Fewer than 5 survivors means the whole parse is
/// discarded in favour of the fallback list for `kind`.
pub fn parse_recommendation_response(content: &str, kind: RecommendationKind) -> ParsedTitles {
    let titles: Vec<String> = content
        .split([',', '\n'])
        .map(str::trim)
        .filter(|title| {
            let len = title.chars().count();
            len > 2 && len < 50
        })
        .filter(|title| !is_filler(title))
        .take(MAX_TITLES)
        .map(str::to_string)
        .collect();

    if titles.len() < MIN_TITLES {
        tracing::debug!(
            "Only {} usable titles in model response, using {} fallback list",
            titles.len(),
            kind.cache_tag()
        );
        return ParsedTitles {
            titles: fallback_titles(kind),
            source: RecommendationSource::Fallback,
        };
    }

    ParsedTitles {
        titles,
        source: RecommendationSource::Ai,
    }
}

fn is_filler(title: &str) -> bool {
    let lower = title.to_lowercase();
    FILLER_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
