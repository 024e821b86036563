pub mod client;
pub mod dto;
pub mod mapper;
pub mod queries;
pub mod transport;

pub use client::{AniListClient, MetadataClientConfig, MIN_SEARCH_LENGTH};
pub use transport::{GraphqlTransport, HttpGraphqlTransport, TransportResponse, ANILIST_API_URL};
