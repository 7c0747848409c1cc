use ::async_trait::async_trait;

use crate::models::events::PlaylistDurationCalculatedEvent;
use crate::models::events::PlaylistFetchEvent;
use crate::models::events::PlaylistVideosListedEvent;
use crate::models::events::VideoSkippedEvent;
use crate::utils::aliases::Fallible;

#[async_trait]
pub trait Accept<Request>: Send + Sync {
    async fn accept(self: ::std::sync::Arc<Self>, request: Request) -> Fallible<()>;
}

#[async_trait]
pub trait Activate: Send + Sync {
    async fn activate(self: ::std::sync::Arc<Self>) -> Fallible<()>;
    async fn deactivate(self: ::std::sync::Arc<Self>) -> Fallible<()>;
}

#[async_trait]
pub trait Update<Event>: Send + Sync {
    async fn update(self: ::std::sync::Arc<Self>, event: &Event) -> Fallible<()>;
}

#[derive(::bon::Builder)]
pub struct CalculatePlaylistDurationRequestModel {
    #[builder(into)]
    pub url: String,
}

pub trait CalculatePlaylistDurationOutputBoundary:
    Activate + Update<PlaylistFetchEvent> + Update<PlaylistDurationCalculatedEvent> + Update<VideoSkippedEvent>
{
}

impl<T> CalculatePlaylistDurationOutputBoundary for T where
    T: Activate + Update<PlaylistFetchEvent> + Update<PlaylistDurationCalculatedEvent> + Update<VideoSkippedEvent>
{
}

#[derive(::bon::Builder)]
pub struct ListPlaylistVideosRequestModel {
    #[builder(into)]
    pub url: String,
}

pub trait ListPlaylistVideosOutputBoundary:
    Activate + Update<PlaylistFetchEvent> + Update<PlaylistVideosListedEvent> + Update<VideoSkippedEvent>
{
}

impl<T> ListPlaylistVideosOutputBoundary for T where
    T: Activate + Update<PlaylistFetchEvent> + Update<PlaylistVideosListedEvent> + Update<VideoSkippedEvent>
{
}
