mod vk;

use std::ops::Deref;

pub use vk::*;

/// Upper bound of tracks returned by a single search.
pub const MAX_SEARCH_RESULTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub artist: String,
    pub title: String,
    pub media_ref: String,
}

impl Track {
    pub(crate) fn new(artist: &str, title: &str, media_ref: &str) -> Self {
        Self {
            artist: artist.trim().to_string(),
            title: title.trim().to_string(),
            media_ref: media_ref.to_string(),
        }
    }
}

pub type SearchResults = Vec<Track>;

#[derive(Eq, PartialEq, Clone, Hash)]
pub struct AccessToken(pub(crate) String);

impl Deref for AccessToken {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        AccessToken(value)
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        AccessToken(value.to_string())
    }
}

// Tokens end up in structured logs through `?` fields, keep them out.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(***)")
    }
}
