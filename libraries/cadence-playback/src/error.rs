//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently selected
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The media resource refused to start playback (e.g. autoplay policy)
    #[error("Playback rejected: {0}")]
    PlayRejected(String),

    /// Media resource error (load, seek, volume)
    #[error("Media error: {0}")]
    Media(String),

    /// Favorites store could not be read or written
    #[error("Favorites store error: {0}")]
    FavoritesStore(String),

    /// Favorites could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
