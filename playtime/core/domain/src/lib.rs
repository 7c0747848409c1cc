pub(crate) mod utils;

pub mod durations;
pub mod identifiers;

use crate::utils::aliases::MaybeOwnedString;

#[derive(Debug, Clone, PartialEq, Eq, ::bon::Builder)]
pub struct VideoRecord {
    #[builder(into)]
    pub title: MaybeOwnedString,
    pub duration_seconds: u64,

    #[builder(default)]
    pub watched: bool,
}

pub type VideoId = MaybeOwnedString;

pub type PlaylistId = MaybeOwnedString;

pub type PageToken = MaybeOwnedString;

/// Developer key for the remote service. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(MaybeOwnedString);

impl ApiKey {
    pub fn new(key: impl Into<MaybeOwnedString>) -> Self {
        Self(key.into())
    }

    /// Interprets user input, where blank input means "no key".
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "" => None,
            key => Some(Self::new(key.to_owned())),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl ::std::fmt::Debug for ApiKey {
    fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        formatter.write_str("ApiKey(***)")
    }
}

/// Videos of one fetched playlist, in playlist order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    videos: Vec<VideoRecord>,
}

impl From<Vec<VideoRecord>> for Watchlist {
    fn from(videos: Vec<VideoRecord>) -> Self {
        Self { videos }
    }
}

impl Watchlist {
    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Flips the watched flag and returns the new value, or `None` when out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let video = self.videos.get_mut(index)?;
        video.watched = !video.watched;

        Some(video.watched)
    }

    pub fn set_watched(&mut self, index: usize, watched: bool) -> Option<&VideoRecord> {
        let video = self.videos.get_mut(index)?;
        video.watched = watched;

        Some(video)
    }

    pub fn total(&self) -> u64 {
        sum(self.videos.iter())
    }

    pub fn remaining(&self) -> u64 {
        sum(self.videos.iter().filter(|video| !video.watched))
    }
}

fn sum<'a>(videos: impl Iterator<Item = &'a VideoRecord>) -> u64 {
    videos.fold(0, |total, video| total.saturating_add(video.duration_seconds))
}
