/// Test data factories for AniList payloads
///
/// Builds the JSON the GraphQL endpoint would return, with sensible defaults
use serde_json::{json, Value};

pub struct MediaFactory {
    id: u32,
    romaji: Option<String>,
    english: Option<String>,
    native: Option<String>,
    mean_score: Option<u8>,
    genres: Vec<String>,
    format: String,
    episodes: Option<u32>,
    year: Option<i32>,
}

impl MediaFactory {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            romaji: Some(format!("Test Anime {}", id)),
            english: None,
            native: None,
            mean_score: Some(75),
            genres: vec!["Action".to_string()],
            format: "TV".to_string(),
            episodes: Some(12),
            year: Some(2020),
        }
    }

    pub fn romaji(mut self, title: &str) -> Self {
        self.romaji = Some(title.to_string());
        self
    }

    pub fn english(mut self, title: &str) -> Self {
        self.english = Some(title.to_string());
        self
    }

    pub fn native(mut self, title: &str) -> Self {
        self.native = Some(title.to_string());
        self
    }

    pub fn score(mut self, score: u8) -> Self {
        self.mean_score = Some(score);
        self
    }

    pub fn format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn build(self) -> Value {
        json!({
            "id": self.id,
            "title": {
                "romaji": self.romaji,
                "english": self.english,
                "native": self.native,
            },
            "description": "A test description.",
            "coverImage": {
                "large": format!("https://img.anili.st/{}-large.jpg", self.id),
                "medium": format!("https://img.anili.st/{}-medium.jpg", self.id),
            },
            "meanScore": self.mean_score,
            "genres": self.genres,
            "format": self.format,
            "episodes": self.episodes,
            "startDate": { "year": self.year, "month": 4, "day": 1 },
            "status": "FINISHED",
            "popularity": 1000,
        })
    }
}

/// `{ data: { Page: { media } } }`
pub fn page_body(media: Vec<Value>) -> String {
    json!({ "data": { "Page": { "media": media } } }).to_string()
}

/// `{ data: { Media } }` with the detail-only fields filled in
pub fn details_body(media: Value) -> String {
    let mut media = media;
    if let Some(object) = media.as_object_mut() {
        object.insert("bannerImage".to_string(), json!("https://img.anili.st/banner.jpg"));
        object.insert("duration".to_string(), json!(24));
        object.insert("season".to_string(), json!("SPRING"));
        object.insert("endDate".to_string(), json!({ "year": 2020, "month": 6, "day": 24 }));
        object.insert(
            "studios".to_string(),
            json!({ "nodes": [{ "name": "Madhouse" }, null] }),
        );
        object.insert(
            "characters".to_string(),
            json!({ "nodes": [
                { "name": { "full": "Lead Character" }, "image": { "medium": "https://img.anili.st/c1.jpg" } },
                { "name": null, "image": null }
            ] }),
        );
        object.insert(
            "relations".to_string(),
            json!({ "nodes": [MediaFactory::new(999).romaji("Test Sequel").build()] }),
        );
        object.insert(
            "externalLinks".to_string(),
            json!([{ "url": "https://example.org/stream", "site": "Stream" }]),
        );
        object.insert("trailer".to_string(), json!({ "id": "abc123", "site": "youtube" }));
        object.insert("favourites".to_string(), json!(4321));
    }
    json!({ "data": { "Media": media } }).to_string()
}

/// OpenAI-style chat completion payload
pub fn completion(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}
