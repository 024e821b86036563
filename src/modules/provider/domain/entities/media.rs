use crate::modules::provider::domain::value_objects::{MediaFormat, MediaSeason, MediaStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleVariants {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

impl TitleVariants {
    /// English if present, else romaji, else native
    pub fn preferred(&self) -> Option<&str> {
        [&self.english, &self.romaji, &self.native]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|title| !title.trim().is_empty())
    }

    /// Case-insensitive substring check against the romaji and english titles
    pub fn contains(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.romaji, &self.english]
            .into_iter()
            .flatten()
            .any(|title| title.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverImageUrls {
    pub large: Option<String>,
    pub medium: Option<String>,
}

/// Anime record as returned by list and search queries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaSummary {
    pub id: u32,
    pub title: TitleVariants,
    pub description: Option<String>,
    pub cover_image: CoverImageUrls,
    /// 0-100
    pub mean_score: Option<u8>,
    pub genres: Vec<String>,
    pub format: Option<MediaFormat>,
    pub episodes: Option<u32>,
    pub start_year: Option<i32>,
    pub status: Option<MediaStatus>,
    pub popularity: Option<u32>,
}

impl MediaSummary {
    pub fn display_title(&self) -> String {
        self.title
            .preferred()
            .map(str::to_string)
            .unwrap_or_else(|| format!("AniList #{}", self.id))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartialDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl PartialDate {
    pub fn to_naive_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterSummary {
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelatedMedia {
    pub id: u32,
    pub title: TitleVariants,
    pub cover_image: Option<String>,
    pub format: Option<MediaFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalLink {
    pub url: String,
    pub site: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trailer {
    pub id: String,
    pub site: String,
}

impl Trailer {
    /// Watch URL for the sites AniList reports trailers from
    pub fn url(&self) -> Option<String> {
        match self.site.to_lowercase().as_str() {
            "youtube" => Some(format!("https://www.youtube.com/watch?v={}", self.id)),
            "dailymotion" => Some(format!("https://www.dailymotion.com/video/{}", self.id)),
            _ => None,
        }
    }
}

/// Single-item detail record, a superset of [`MediaSummary`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaDetails {
    pub summary: MediaSummary,
    pub banner_image: Option<String>,
    /// Minutes per episode
    pub duration: Option<u32>,
    pub season: Option<MediaSeason>,
    pub start_date: PartialDate,
    pub end_date: PartialDate,
    pub studios: Vec<String>,
    pub characters: Vec<CharacterSummary>,
    pub relations: Vec<RelatedMedia>,
    pub external_links: Vec<ExternalLink>,
    pub trailer: Option<Trailer>,
    pub favourites: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(romaji: Option<&str>, english: Option<&str>, native: Option<&str>) -> TitleVariants {
        TitleVariants {
            romaji: romaji.map(str::to_string),
            english: english.map(str::to_string),
            native: native.map(str::to_string),
        }
    }

    #[test]
    fn test_preferred_title_order() {
        assert_eq!(
            titles(Some("Shingeki no Kyojin"), Some("Attack on Titan"), Some("進撃の巨人")).preferred(),
            Some("Attack on Titan")
        );
        assert_eq!(
            titles(Some("Shingeki no Kyojin"), None, Some("進撃の巨人")).preferred(),
            Some("Shingeki no Kyojin")
        );
        assert_eq!(titles(None, Some("  "), Some("進撃の巨人")).preferred(), Some("進撃の巨人"));
        assert_eq!(titles(None, None, None).preferred(), None);
    }

    #[test]
    fn test_contains_is_case_insensitive_and_ignores_native() {
        let t = titles(Some("Naruto: Shippuuden"), Some("Naruto Shippuden"), Some("ナルト"));
        assert!(t.contains("naruto"));
        assert!(t.contains("SHIPPUDEN"));
        assert!(!t.contains("ナルト"));
        assert!(!t.contains("Bleach"));
    }

    #[test]
    fn test_trailer_url() {
        let trailer = Trailer {
            id: "abc123".to_string(),
            site: "youtube".to_string(),
        };
        assert_eq!(
            trailer.url().as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );

        let unknown = Trailer {
            id: "x".to_string(),
            site: "vimeo".to_string(),
        };
        assert_eq!(unknown.url(), None);
    }

    #[test]
    fn test_partial_date_requires_all_parts() {
        let full = PartialDate {
            year: Some(2013),
            month: Some(4),
            day: Some(7),
        };
        assert!(full.to_naive_date().is_some());

        let year_only = PartialDate {
            year: Some(2013),
            ..Default::default()
        };
        assert!(year_only.to_naive_date().is_none());
    }
}
