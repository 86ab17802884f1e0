//! Core types for playback management

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque track identifier as handed out by the backend
pub type TrackId = String;

/// Fallback artwork shown when a track has no cover
pub const DEFAULT_COVER_URL: &str =
    "https://wallpapers-clan.com/wp-content/uploads/2023/12/cute-anime-girl-winter-forest-desktop-wallpaper-preview.jpg";

/// Track as listed by the backend
///
/// Immutable once fetched. The queue owns the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier (numeric ids are accepted and stringified)
    #[serde(alias = "_id", deserialize_with = "id_from_string_or_number")]
    pub id: TrackId,

    /// Track title
    #[serde(default)]
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Cover artwork URL (optional)
    #[serde(default)]
    pub cover_url: Option<String>,

    /// Reference resolving to a playable resource.
    ///
    /// The backend usually omits it, in which case the id is the reference.
    #[serde(default)]
    pub media_ref: Option<String>,
}

impl Track {
    /// Create a track whose media reference is its id
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            cover_url: None,
            media_ref: None,
        }
    }

    /// Set cover artwork URL
    #[must_use]
    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = Some(cover_url.into());
        self
    }

    /// Reference used to locate the playable resource
    pub fn media_ref(&self) -> &str {
        self.media_ref.as_deref().unwrap_or(&self.id)
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<TrackId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No track loaded
    Idle,

    /// Track selected, not playing
    Paused,

    /// Currently playing
    Playing,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop at the end of a track unless shuffle is on
    #[default]
    Off,

    /// Loop current track only
    One,

    /// Loop entire queue
    All,
}

impl RepeatMode {
    /// Next mode in the button cycle: Off -> One -> All -> Off
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::Off,
        }
    }

    /// Lowercase label (`off`, `one`, `all`)
    pub fn as_str(self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::One => "one",
            RepeatMode::All => "all",
        }
    }
}

/// Repeat and shuffle flags
///
/// Independent of each other; every combination is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransportMode {
    pub repeat: RepeatMode,
    pub shuffle: bool,
}

/// Direction for queue navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Configuration for the transport controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Return to Paused when the media resource rejects a play request
    /// (default: true). When false the UI keeps showing Playing.
    pub revert_on_play_rejection: bool,

    /// Artwork used for tracks without a cover
    pub default_cover_url: String,

    /// Base URL prefixed to `/api/tracks/{media_ref}` (empty = same origin)
    pub stream_base_url: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            repeat: RepeatMode::Off,
            shuffle: false,
            revert_on_play_rejection: true,
            default_cover_url: DEFAULT_COVER_URL.to_string(),
            stream_base_url: String::new(),
        }
    }
}
