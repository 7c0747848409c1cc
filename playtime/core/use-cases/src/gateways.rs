use ::async_trait::async_trait;
use ::domain::ApiKey;
use ::domain::PageToken;
use ::domain::PlaylistId;
use ::domain::VideoId;

use crate::models::descriptors::PlaylistItemsPage;
use crate::models::descriptors::VideoDetails;
use crate::utils::aliases::Fallible;

/// Largest page the remote service hands out, and therefore the largest batch of
/// video identifiers ever looked up at once.
pub const MAX_PAGE_SIZE: usize = 50;

#[async_trait]
pub trait PlaylistItemsGateway: Send + Sync {
    async fn list(
        self: ::std::sync::Arc<Self>, playlist_id: &PlaylistId, page_token: Option<&PageToken>, api_key: &ApiKey,
    ) -> Fallible<PlaylistItemsPage>;
}

#[async_trait]
pub trait VideoDetailsGateway: Send + Sync {
    async fn list(self: ::std::sync::Arc<Self>, video_ids: &[VideoId], api_key: &ApiKey) -> Fallible<Vec<VideoDetails>>;
}

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Asks for a key; `None` when the user declines.
    async fn provide(self: ::std::sync::Arc<Self>) -> Fallible<Option<ApiKey>>;
}
