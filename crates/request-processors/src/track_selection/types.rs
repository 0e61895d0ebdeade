use crate::track_selection::action_payload::encode_action_payload;
use std::ops::Deref;

/// Opaque reference to playable media, a direct URL or a backend identifier.
#[derive(Eq, PartialEq, Clone, Hash, Debug)]
pub struct MediaRef(pub(crate) String);

impl Deref for MediaRef {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for MediaRef {
    fn from(value: String) -> Self {
        MediaRef(value)
    }
}

impl From<&str> for MediaRef {
    fn from(value: &str) -> Self {
        MediaRef(value.to_string())
    }
}

impl std::fmt::Display for MediaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Track {
    pub(crate) artist: String,
    pub(crate) title: String,
    pub(crate) media_ref: MediaRef,
}

impl Track {
    pub fn new(artist: &str, title: &str, media_ref: impl Into<MediaRef>) -> Self {
        Self {
            artist: artist.trim().to_string(),
            title: title.trim().to_string(),
            media_ref: media_ref.into(),
        }
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn media_ref(&self) -> &MediaRef {
        &self.media_ref
    }

    pub fn label(&self) -> String {
        format!("{} — {}", self.artist, self.title)
    }
}

/// Tracks found by one search, in backend relevance order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CandidateSet(Vec<Track>);

impl CandidateSet {
    pub const MAX_LEN: usize = 5;

    pub fn new(tracks: Vec<Track>) -> Self {
        tracks.into_iter().collect()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.0.iter()
    }
}

impl FromIterator<Track> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        CandidateSet(iter.into_iter().take(Self::MAX_LEN).collect())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ChooserButton {
    pub label: String,
    pub payload: String,
}

/// Buttons offered after a search, rendered one per row.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Chooser {
    pub buttons: Vec<ChooserButton>,
}

impl From<&CandidateSet> for Chooser {
    fn from(candidates: &CandidateSet) -> Self {
        let buttons = candidates
            .iter()
            .map(|track| ChooserButton {
                label: track.label(),
                payload: encode_action_payload(track.media_ref()),
            })
            .collect();

        Chooser { buttons }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChatState {
    Idle,
    CandidatesOffered,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SelectionOutcome {
    /// The payload did not carry a download action.
    Ignored,
    Delivered(MediaRef),
    DeliveryFailed(MediaRef),
}
