use ::async_trait::async_trait;
use ::domain::identifiers::extract_playlist_id;
use ::domain::PlaylistId;
use ::domain::VideoRecord;
use ::domain::Watchlist;
use ::futures::StreamExt as _;

use crate::aggregators::PlaylistAggregator;
use crate::boundaries::Accept;
use crate::boundaries::CalculatePlaylistDurationOutputBoundary;
use crate::boundaries::CalculatePlaylistDurationRequestModel;
use crate::boundaries::ListPlaylistVideosOutputBoundary;
use crate::boundaries::ListPlaylistVideosRequestModel;
use crate::boundaries::Update;
use crate::models::descriptors::PlaylistPage;
use crate::models::events::PlaylistDurationCalculatedEvent;
use crate::models::events::PlaylistFetchEvent;
use crate::models::events::PlaylistFetchMode;
use crate::models::events::PlaylistFetchProgressUpdatedEvent;
use crate::models::events::PlaylistFetchStartedEvent;
use crate::models::events::PlaylistVideosListedEvent;
use crate::models::events::VideoSkippedEvent;
use crate::models::failures::RemoteFailure;
use crate::sessions::Session;
use crate::utils::aliases::BoxedStream;
use crate::utils::aliases::Fallible;

#[derive(::bon::Builder)]
pub struct CalculatePlaylistDurationInteractor {
    view: ::std::sync::Arc<dyn CalculatePlaylistDurationOutputBoundary>,

    session: ::std::sync::Arc<Session>,
    aggregator: ::std::sync::Arc<PlaylistAggregator>,
}

#[async_trait]
impl Accept<CalculatePlaylistDurationRequestModel> for CalculatePlaylistDurationInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: CalculatePlaylistDurationRequestModel) -> Fallible<()> {
        let playlist_id = extract_playlist_id(&request.url)?;
        let api_key = self.session.api_key().await?;

        let pages = ::std::sync::Arc::clone(&self.aggregator).pages(playlist_id.clone(), api_key);

        ::std::sync::Arc::clone(&self.view).activate().await?;

        let outcome = async {
            let totals = fold_pages(
                ::std::sync::Arc::clone(&self.view),
                &self.session,
                &playlist_id,
                PlaylistFetchMode::Sum,
                pages,
                Totals::default(),
                |totals, videos| {
                    for video in videos {
                        totals.seconds = totals.seconds.saturating_add(video.duration_seconds);
                        totals.videos += 1;
                    }
                },
            )
            .await?;

            ::tracing::info!(playlist_id = %playlist_id, total_seconds = totals.seconds, videos = totals.videos, "Playlist duration calculated");

            let event = PlaylistDurationCalculatedEvent {
                playlist_id: playlist_id.clone(),
                total_seconds: totals.seconds,
                videos: totals.videos,
            };

            Update::<PlaylistDurationCalculatedEvent>::update(::std::sync::Arc::clone(&self.view), &event).await?;

            Ok::<_, ::anyhow::Error>(())
        }
        .await;

        ::std::sync::Arc::clone(&self.view).deactivate().await?;

        outcome
    }
}

#[derive(::bon::Builder)]
pub struct ListPlaylistVideosInteractor {
    view: ::std::sync::Arc<dyn ListPlaylistVideosOutputBoundary>,

    session: ::std::sync::Arc<Session>,
    aggregator: ::std::sync::Arc<PlaylistAggregator>,
}

#[async_trait]
impl Accept<ListPlaylistVideosRequestModel> for ListPlaylistVideosInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: ListPlaylistVideosRequestModel) -> Fallible<()> {
        let playlist_id = extract_playlist_id(&request.url)?;
        let api_key = self.session.api_key().await?;

        let pages = ::std::sync::Arc::clone(&self.aggregator).pages(playlist_id.clone(), api_key);

        ::std::sync::Arc::clone(&self.view).activate().await?;

        let outcome = async {
            let videos = fold_pages(
                ::std::sync::Arc::clone(&self.view),
                &self.session,
                &playlist_id,
                PlaylistFetchMode::List,
                pages,
                Vec::new(),
                |accumulated, videos| accumulated.extend(videos),
            )
            .await?;

            ::tracing::info!(playlist_id = %playlist_id, videos = videos.len(), "Playlist videos listed");

            let event = PlaylistVideosListedEvent {
                playlist_id: playlist_id.clone(),
                watchlist: Watchlist::from(videos),
            };

            Update::<PlaylistVideosListedEvent>::update(::std::sync::Arc::clone(&self.view), &event).await?;

            Ok::<_, ::anyhow::Error>(())
        }
        .await;

        ::std::sync::Arc::clone(&self.view).deactivate().await?;

        outcome
    }
}

#[derive(Default)]
struct Totals {
    seconds: u64,
    videos: u64,
}

/// Drains `pages` into `accumulator`, reporting progress and unavailable videos on
/// the way. Nothing is folded past a failed page, and a remote failure discards the
/// session's API key.
async fn fold_pages<View, Accumulator, Fold>(
    view: ::std::sync::Arc<View>, session: &Session, playlist_id: &PlaylistId, mode: PlaylistFetchMode,
    mut pages: BoxedStream<Fallible<PlaylistPage>>, mut accumulator: Accumulator, mut fold: Fold,
) -> Fallible<Accumulator>
where
    View: Update<PlaylistFetchEvent> + Update<VideoSkippedEvent> + ?Sized,
    Accumulator: Send,
    Fold: FnMut(&mut Accumulator, Vec<VideoRecord>) + Send,
{
    let event = PlaylistFetchEvent::Started(PlaylistFetchStartedEvent { playlist_id: playlist_id.clone(), mode });
    Update::<PlaylistFetchEvent>::update(::std::sync::Arc::clone(&view), &event).await?;

    let mut fetched_videos = 0;

    while let Some(page) = pages.next().await {
        let page = match page {
            Ok(page) => page,
            Err(err) => {
                if let Some(failure) = err.downcast_ref::<RemoteFailure>() {
                    ::tracing::error!(
                        playlist_id = %playlist_id,
                        status = ?failure.status,
                        payload = %failure.payload,
                        "Remote failure, discarding API key"
                    );

                    session.invalidate().await;
                }

                return Err(err);
            },
        };

        for item in &page.unavailable {
            ::tracing::warn!(playlist_id = %playlist_id, video_id = %item.video_id, "Skipping video without details");

            let event = VideoSkippedEvent {
                playlist_id: playlist_id.clone(),
                video_id: item.video_id.clone(),
                title: item.title.clone(),
            };

            Update::<VideoSkippedEvent>::update(::std::sync::Arc::clone(&view), &event).await?;
        }

        fetched_videos += page.entries();

        let event = PlaylistFetchEvent::ProgressUpdated(PlaylistFetchProgressUpdatedEvent {
            playlist_id: playlist_id.clone(),
            fetched_videos,
            total_videos: page.total_results,
        });

        Update::<PlaylistFetchEvent>::update(::std::sync::Arc::clone(&view), &event).await?;

        fold(&mut accumulator, page.videos);
    }

    Ok(accumulator)
}
