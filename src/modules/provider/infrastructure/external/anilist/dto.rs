use crate::modules::provider::domain::value_objects::{MediaFormat, MediaSeason, MediaStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// AniList GraphQL Request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AniListRequest {
    pub query: String,
    pub variables: Value,
}

/// AniList GraphQL Response Wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct AniListResponse {
    pub data: Option<Value>,
    pub errors: Option<Vec<AniListError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AniListError {
    pub message: String,
    pub status: Option<i32>,
}

/// Page query payload (trending, search)
#[derive(Debug, Clone, Deserialize)]
pub struct PageData {
    #[serde(rename = "Page")]
    pub page: AniListPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AniListPage {
    #[serde(default)]
    pub media: Vec<AniListMedia>,
}

/// Single Media query payload
#[derive(Debug, Clone, Deserialize)]
pub struct MediaData {
    #[serde(rename = "Media")]
    pub media: Option<AniListMedia>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListMedia {
    pub id: Option<u32>,
    pub title: Option<AniListTitle>,
    pub description: Option<String>,
    pub cover_image: Option<AniListCoverImage>,
    pub banner_image: Option<String>,
    pub mean_score: Option<u8>,
    pub genres: Option<Vec<String>>,
    pub format: Option<MediaFormat>,
    pub episodes: Option<u32>,
    pub duration: Option<u32>,
    pub status: Option<MediaStatus>,
    pub start_date: Option<AniListDate>,
    pub end_date: Option<AniListDate>,
    pub season: Option<MediaSeason>,
    pub studios: Option<Connection<AniListStudio>>,
    pub characters: Option<Connection<AniListCharacter>>,
    pub relations: Option<Connection<AniListMedia>>,
    pub external_links: Option<Vec<AniListExternalLink>>,
    pub trailer: Option<AniListTrailer>,
    pub popularity: Option<u32>,
    pub favourites: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AniListTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AniListCoverImage {
    pub large: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AniListDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// `{ nodes: [...] }` wrapper used by AniList connections
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AniListStudio {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AniListCharacter {
    pub name: Option<AniListCharacterName>,
    pub image: Option<AniListCharacterImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AniListCharacterName {
    pub full: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AniListCharacterImage {
    pub medium: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AniListExternalLink {
    pub url: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AniListTrailer {
    pub id: Option<String>,
    pub site: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_with_studio_and_character_nodes_deserializes() {
        let data = json!({
            "Media": {
                "id": 1,
                "studios": { "nodes": [{ "name": "Sunrise" }, null] },
                "characters": { "nodes": [
                    { "name": { "full": "Spike Spiegel" }, "image": { "medium": "https://img.anili.st/spike.jpg" } }
                ] },
                "relations": {}
            }
        });

        let media = serde_json::from_value::<MediaData>(data).unwrap().media.unwrap();

        let studios = media.studios.unwrap().nodes;
        assert_eq!(studios.len(), 2);
        assert_eq!(studios[0].as_ref().unwrap().name, "Sunrise");
        assert!(studios[1].is_none());

        let characters = media.characters.unwrap().nodes;
        let spike = characters[0].as_ref().unwrap();
        assert_eq!(spike.name.as_ref().unwrap().full.as_deref(), Some("Spike Spiegel"));

        // Missing `nodes` defaults to empty
        assert!(media.relations.unwrap().nodes.is_empty());
    }
}
