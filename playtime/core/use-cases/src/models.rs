pub mod events {
    use ::domain::PlaylistId;
    use ::domain::VideoId;
    use ::domain::Watchlist;

    use crate::utils::aliases::MaybeOwnedString;

    #[derive(Debug, Clone)]
    pub enum PlaylistFetchEvent {
        Started(PlaylistFetchStartedEvent),
        ProgressUpdated(PlaylistFetchProgressUpdatedEvent),
    }

    #[derive(Debug, Clone)]
    pub struct PlaylistFetchStartedEvent {
        pub playlist_id: PlaylistId,
        pub mode: PlaylistFetchMode,
    }

    /// Whether a fetch ends in a total or in a new list of videos.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PlaylistFetchMode {
        Sum,
        List,
    }

    #[derive(Debug, Clone)]
    pub struct PlaylistFetchProgressUpdatedEvent {
        pub playlist_id: PlaylistId,

        pub fetched_videos: u64,
        pub total_videos: Option<u64>,
    }

    #[derive(Debug, Clone)]
    pub struct PlaylistDurationCalculatedEvent {
        pub playlist_id: PlaylistId,

        pub total_seconds: u64,
        pub videos: u64,
    }

    #[derive(Debug, Clone)]
    pub struct PlaylistVideosListedEvent {
        pub playlist_id: PlaylistId,
        pub watchlist: Watchlist,
    }

    /// A playlist entry with no detail record, typically a deleted or private video.
    #[derive(Debug, Clone)]
    pub struct VideoSkippedEvent {
        pub playlist_id: PlaylistId,

        pub video_id: VideoId,
        pub title: MaybeOwnedString,
    }
}

pub mod descriptors {
    use ::derive_new::new;
    use ::domain::PageToken;
    use ::domain::VideoId;
    use ::domain::VideoRecord;

    use crate::utils::aliases::MaybeOwnedString;

    /// One entry of a playlist listing.
    #[derive(Debug, Clone, PartialEq, Eq, new)]
    pub struct PlaylistItem {
        #[new(into)]
        pub video_id: VideoId,
        #[new(into)]
        pub title: MaybeOwnedString,
    }

    #[derive(Debug, Clone, Default)]
    pub struct PlaylistItemsPage {
        pub items: Vec<PlaylistItem>,
        pub next_page_token: Option<PageToken>,
        pub total_results: Option<u64>,
    }

    /// Detail record of one video; `duration` is still encoded.
    #[derive(Debug, Clone, PartialEq, Eq, new)]
    pub struct VideoDetails {
        #[new(into)]
        pub id: VideoId,
        #[new(into)]
        pub duration: MaybeOwnedString,
    }

    /// A playlist page joined with its video details.
    #[derive(Debug, Clone, Default)]
    pub struct PlaylistPage {
        pub videos: Vec<VideoRecord>,
        pub unavailable: Vec<PlaylistItem>,

        pub next_page_token: Option<PageToken>,
        pub total_results: Option<u64>,
    }

    impl PlaylistPage {
        pub fn entries(&self) -> u64 {
            (self.videos.len() + self.unavailable.len()) as u64
        }
    }
}

pub mod failures {
    use ::derive_new::new;

    use crate::utils::aliases::MaybeOwnedString;

    /// Error response or transport failure from the remote service.
    #[derive(Debug, Clone, PartialEq, Eq, new)]
    pub struct RemoteFailure {
        pub status: Option<u16>,
        #[new(into)]
        pub payload: MaybeOwnedString,
    }

    impl ::std::fmt::Display for RemoteFailure {
        fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
            match self.status {
                Some(status) => write!(formatter, "An HTTP error {} occurred: {}", status, self.payload),
                None => write!(formatter, "The request could not be completed: {}", self.payload),
            }
        }
    }

    impl ::std::error::Error for RemoteFailure {}

    /// The user declined to supply an API key.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MissingCredential;

    impl ::std::fmt::Display for MissingCredential {
        fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
            formatter.write_str("API Key is required")
        }
    }

    impl ::std::error::Error for MissingCredential {}
}
