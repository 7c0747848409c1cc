use ::domain::durations::try_parse_duration;
use ::domain::ApiKey;
use ::domain::PageToken;
use ::domain::PlaylistId;
use ::domain::VideoId;
use ::domain::VideoRecord;

use crate::gateways::PlaylistItemsGateway;
use crate::gateways::VideoDetailsGateway;
use crate::models::descriptors::PlaylistItem;
use crate::models::descriptors::PlaylistPage;
use crate::models::descriptors::VideoDetails;
use crate::utils::aliases::BoxedStream;
use crate::utils::aliases::Fallible;

/// Walks a playlist page by page, joining every page with its video details.
#[derive(::bon::Builder)]
pub struct PlaylistAggregator {
    playlist_items: ::std::sync::Arc<dyn PlaylistItemsGateway>,
    video_details: ::std::sync::Arc<dyn VideoDetailsGateway>,
}

impl PlaylistAggregator {
    /// Joined pages in playlist order. The stream ends after the first error.
    pub fn pages(self: ::std::sync::Arc<Self>, playlist_id: PlaylistId, api_key: ApiKey) -> BoxedStream<Fallible<PlaylistPage>> {
        ::std::boxed::Box::pin(::async_stream::stream! {
            let mut page_token: Option<PageToken> = None;

            loop {
                match ::std::sync::Arc::clone(&self).page(&playlist_id, page_token.take(), &api_key).await {
                    Ok(page) => {
                        let next_page_token = page.next_page_token.clone();

                        yield Ok(page);

                        match next_page_token {
                            Some(next_page_token) => page_token = Some(next_page_token),
                            None => break,
                        }
                    },

                    Err(err) => {
                        yield Err(err);
                        break;
                    },
                }
            }
        })
    }

    async fn page(
        self: ::std::sync::Arc<Self>, playlist_id: &PlaylistId, page_token: Option<PageToken>, api_key: &ApiKey,
    ) -> Fallible<PlaylistPage> {
        let page = ::std::sync::Arc::clone(&self.playlist_items)
            .list(playlist_id, page_token.as_ref(), api_key)
            .await?;

        ::tracing::debug!(
            playlist_id = %playlist_id,
            page_token = ?page_token,
            items = page.items.len(),
            "Fetched playlist items"
        );

        let video_ids: Vec<VideoId> = page.items.iter().map(|item| item.video_id.clone()).collect();

        let details = if video_ids.is_empty() {
            Vec::new()
        } else {
            ::std::sync::Arc::clone(&self.video_details).list(&video_ids, api_key).await?
        };

        let (videos, unavailable) = join(page.items, details);

        Ok(PlaylistPage {
            videos,
            unavailable,
            next_page_token: page.next_page_token,
            total_results: page.total_results,
        })
    }
}

/// Pairs playlist items with detail records by video identifier. Items without a
/// detail record come back separately, in playlist order.
fn join(items: Vec<PlaylistItem>, details: Vec<VideoDetails>) -> (Vec<VideoRecord>, Vec<PlaylistItem>) {
    let durations: ::std::collections::HashMap<VideoId, u64> = details
        .into_iter()
        .map(|details| {
            let duration = try_parse_duration(&details.duration).unwrap_or_else(|| {
                ::tracing::warn!(video_id = %details.id, duration = %details.duration, "Unrecognised duration, counting as zero");
                0
            });

            (details.id, duration)
        })
        .collect();

    let mut videos = Vec::with_capacity(items.len());
    let mut unavailable = Vec::new();

    for item in items {
        match durations.get(&item.video_id) {
            Some(duration) => videos.push(VideoRecord::builder().title(item.title).duration_seconds(*duration).build()),
            None => unavailable.push(item),
        }
    }

    (videos, unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_by_identifier_regardless_of_order() {
        let items = vec![PlaylistItem::new("a", "First"), PlaylistItem::new("b", "Second")];
        let details = vec![VideoDetails::new("b", "PT2M"), VideoDetails::new("a", "PT1M")];

        let (videos, unavailable) = join(items, details);

        assert_eq!(videos[0].title, "First");
        assert_eq!(videos[0].duration_seconds, 60);
        assert_eq!(videos[1].title, "Second");
        assert_eq!(videos[1].duration_seconds, 120);
        assert!(unavailable.is_empty());
    }

    #[test]
    fn items_without_details_are_set_aside() {
        let items = vec![
            PlaylistItem::new("a", "Available"),
            PlaylistItem::new("gone", "Private video"),
            PlaylistItem::new("a", "Available again"),
        ];
        let details = vec![VideoDetails::new("a", "PT10S")];

        let (videos, unavailable) = join(items, details);

        assert_eq!(videos.len(), 2);
        assert!(videos.iter().all(|video| video.duration_seconds == 10 && !video.watched));
        assert_eq!(unavailable, vec![PlaylistItem::new("gone", "Private video")]);
    }

    #[test]
    fn malformed_durations_count_as_zero() {
        let (videos, _) = join(vec![PlaylistItem::new("a", "Long stream")], vec![VideoDetails::new("a", "P1DT2H")]);

        assert_eq!(videos[0].duration_seconds, 0);
    }
}
