pub mod cache;
pub mod external;
pub mod http_client;

// Re-export commonly used types
pub use cache::{CacheStats, ResponseCache};
pub use external::{AniListClient, MetadataClientConfig};
pub use http_client::{RetryPolicy, RetryUtil, SerialRequestQueue};
