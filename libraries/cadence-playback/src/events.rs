//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as state changes; the UI drains them after each call:
//! - State changes (play/pause/idle)
//! - Track changes (click, skip, auto-advance)
//! - Position updates (on every media time update)
//! - Mode, volume, queue and favorite changes

use crate::types::{RepeatMode, TrackId, TransportState};
use serde::{Deserialize, Serialize};

/// Events emitted by the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new state
        state: TransportState,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Position update from the media clock
    PositionUpdate {
        position_secs: f64,
        /// `None` until the media resource knows it
        duration_secs: Option<f64>,
    },

    /// Repeat or shuffle toggled
    ModeChanged { repeat: RepeatMode, shuffle: bool },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Track list replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Favorite toggled
    FavoriteToggled { track_id: TrackId, is_favorite: bool },

    /// Media resource refused to start playback
    PlaybackRejected { reason: String },

    /// Media command failed (load, seek, volume)
    Error {
        /// Error message
        message: String,
    },
}
