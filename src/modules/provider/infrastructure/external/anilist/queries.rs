//! AniList GraphQL queries
//!
//! Field order in each query is fixed; the DTOs in `dto.rs` mirror it.

/// Trending list, adult titles excluded
pub const TRENDING_QUERY: &str = r#"
query ($page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    media(type: ANIME, sort: TRENDING_DESC, isAdult: false) {
      id
      title {
        english
        romaji
      }
      description
      coverImage {
        large
        medium
      }
      meanScore
      genres
      format
      episodes
      startDate {
        year
      }
      status
      popularity
    }
  }
}
"#;

/// Free-text search ordered by popularity, adult titles excluded
pub const SEARCH_QUERY: &str = r#"
query ($search: String, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    media(type: ANIME, search: $search, isAdult: false, sort: POPULARITY_DESC) {
      id
      title {
        english
        romaji
      }
      description
      coverImage {
        large
        medium
      }
      meanScore
      genres
      format
      episodes
      startDate {
        year
      }
      status
      popularity
    }
  }
}
"#;

/// Single anime with banner, characters, relations, external links and trailer
pub const MEDIA_DETAILS_QUERY: &str = r#"
query ($id: Int) {
  Media(id: $id, type: ANIME) {
    id
    title {
      english
      romaji
      native
    }
    description
    coverImage {
      large
      medium
    }
    bannerImage
    meanScore
    genres
    format
    episodes
    duration
    status
    startDate {
      year
      month
      day
    }
    endDate {
      year
      month
      day
    }
    season
    studios {
      nodes {
        name
      }
    }
    characters(page: 1, perPage: 6, sort: ROLE) {
      nodes {
        name {
          full
        }
        image {
          medium
        }
      }
    }
    relations {
      nodes {
        id
        title {
          english
          romaji
        }
        coverImage {
          medium
        }
        format
      }
    }
    externalLinks {
      url
      site
    }
    trailer {
      id
      site
    }
    popularity
    favourites
  }
}
"#;

/// Named operations, used as cache-key prefixes and in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AniListOperation {
    Trending,
    Search,
    Details,
}

impl AniListOperation {
    pub fn query(&self) -> &'static str {
        match self {
            AniListOperation::Trending => TRENDING_QUERY,
            AniListOperation::Search => SEARCH_QUERY,
            AniListOperation::Details => MEDIA_DETAILS_QUERY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AniListOperation::Trending => "trending",
            AniListOperation::Search => "search",
            AniListOperation::Details => "details",
        }
    }
}
