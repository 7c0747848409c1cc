use crate::utils::aliases::MaybeOwnedString;
use crate::PlaylistId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPlaylistId {
    pub url: MaybeOwnedString,
}

impl ::std::fmt::Display for MissingPlaylistId {
    fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        write!(formatter, "Invalid YouTube playlist URL (no `list` parameter): {}", self.url)
    }
}

impl ::std::error::Error for MissingPlaylistId {}

/// Value of the first non-empty `list` query parameter of `url`.
pub fn extract_playlist_id(url: &str) -> Result<PlaylistId, MissingPlaylistId> {
    let missing = || MissingPlaylistId { url: url.trim().to_owned().into() };

    let parsed = match ::url::Url::parse(url.trim()) {
        Ok(parsed) => parsed,
        Err(::url::ParseError::RelativeUrlWithoutBase) => {
            ::url::Url::parse(&format!("https://{}", url.trim())).map_err(|_| missing())?
        },
        Err(_) => return Err(missing()),
    };

    parsed
        .query_pairs()
        .find(|(key, _)| key == "list")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .map(Into::into)
        .ok_or_else(missing)
}
