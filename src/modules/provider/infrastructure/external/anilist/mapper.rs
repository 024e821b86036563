use crate::modules::provider::domain::entities::{
    CharacterSummary, CoverImageUrls, ExternalLink, MediaDetails, MediaSummary, PartialDate,
    RelatedMedia, TitleVariants, Trailer,
};

use super::dto::{AniListDate, AniListMedia, AniListTitle, Connection};

pub struct AniListMapper;

impl AniListMapper {
    /// Records without an id cannot be linked to and are skipped
    pub fn to_summary(media: AniListMedia) -> Option<MediaSummary> {
        let id = media.id?;

        Some(MediaSummary {
            id,
            title: Self::map_title(media.title),
            description: media.description,
            cover_image: media
                .cover_image
                .map(|img| CoverImageUrls {
                    large: img.large,
                    medium: img.medium,
                })
                .unwrap_or_default(),
            mean_score: media.mean_score.map(|score| score.min(100)),
            genres: media.genres.unwrap_or_default(),
            format: media.format,
            episodes: media.episodes,
            start_year: media.start_date.and_then(|date| date.year),
            status: media.status,
            popularity: media.popularity,
        })
    }

    pub fn to_details(mut media: AniListMedia) -> Option<MediaDetails> {
        let banner_image = media.banner_image.take();
        let duration = media.duration;
        let season = media.season;
        let start_date = Self::map_date(media.start_date);
        let end_date = Self::map_date(media.end_date);
        let favourites = media.favourites;

        let studios = Self::nodes(media.studios.take())
            .map(|studio| studio.name)
            .collect();

        let characters = Self::nodes(media.characters.take())
            .filter_map(|character| {
                let name = character.name.and_then(|n| n.full)?;
                Some(CharacterSummary {
                    name,
                    image: character.image.and_then(|img| img.medium),
                })
            })
            .collect();

        let relations = Self::nodes(media.relations.take())
            .filter_map(|related| {
                Some(RelatedMedia {
                    id: related.id?,
                    title: Self::map_title(related.title),
                    cover_image: related.cover_image.and_then(|img| img.medium),
                    format: related.format,
                })
            })
            .collect();

        let external_links = media
            .external_links
            .take()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|link| {
                Some(ExternalLink {
                    url: link.url?,
                    site: link.site.unwrap_or_default(),
                })
            })
            .collect();

        let trailer = media.trailer.take().and_then(|trailer| {
            Some(Trailer {
                id: trailer.id?,
                site: trailer.site?,
            })
        });

        Some(MediaDetails {
            summary: Self::to_summary(media)?,
            banner_image,
            duration,
            season,
            start_date,
            end_date,
            studios,
            characters,
            relations,
            external_links,
            trailer,
            favourites,
        })
    }

    fn map_title(title: Option<AniListTitle>) -> TitleVariants {
        title
            .map(|t| TitleVariants {
                romaji: t.romaji,
                english: t.english,
                native: t.native,
            })
            .unwrap_or_default()
    }

    fn map_date(date: Option<AniListDate>) -> PartialDate {
        date.map(|d| PartialDate {
            year: d.year,
            month: d.month,
            day: d.day,
        })
        .unwrap_or_default()
    }

    fn nodes<T>(connection: Option<Connection<T>>) -> impl Iterator<Item = T> {
        connection
            .map(|c| c.nodes)
            .unwrap_or_default()
            .into_iter()
            .flatten()
    }
}
