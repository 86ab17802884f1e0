//! Transport state machine
//!
//! Pure transition functions; the controller owns the state and performs the
//! side effects (media commands, events) that go with each transition.
//!
//! ```text
//!            QueueLoaded{tracks}            TogglePlay
//!   Idle ───────────────────────▶ Paused ◀────────────▶ Playing
//!                                   │  ▲                   │
//!                     TrackSelected │  │ TrackEnded(Stop)  │
//!                                   ▼  │ PlayRejected      │
//!                                 Playing ◀────────────────┘
//!                                   TrackEnded(Restart | Advance)
//! ```

use crate::types::{RepeatMode, TransportMode, TransportState};

/// What happens when the media resource reports end of media
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfTrack {
    /// Seek to zero and keep playing the same track
    Restart,

    /// Move forward in the queue and play
    Advance,

    /// Pause with the position held at the end
    Stop,
}

/// Inputs to the transport state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    /// Track list replaced
    QueueLoaded { has_tracks: bool },

    /// Play/pause button, or clicking the current track
    TogglePlay,

    /// A different track was selected (click, next, previous, auto-advance)
    TrackSelected,

    /// Media reached its end
    TrackEnded(EndOfTrack),

    /// Media refused to start; `revert` picks Paused over optimistic Playing
    PlayRejected { revert: bool },
}

/// Decide the end-of-track action for the current mode
///
/// Repeat-one wins over everything; shuffle alone keeps the queue moving.
pub fn end_of_track(mode: TransportMode) -> EndOfTrack {
    match mode.repeat {
        RepeatMode::One => EndOfTrack::Restart,
        RepeatMode::All => EndOfTrack::Advance,
        RepeatMode::Off if mode.shuffle => EndOfTrack::Advance,
        RepeatMode::Off => EndOfTrack::Stop,
    }
}

impl TransportState {
    /// Next state for an event
    pub fn on(self, event: TransportEvent) -> TransportState {
        use TransportState::{Idle, Paused, Playing};

        match (self, event) {
            (_, TransportEvent::QueueLoaded { has_tracks: true }) => Paused,
            (_, TransportEvent::QueueLoaded { has_tracks: false }) => Idle,

            (Idle, _) => Idle,

            (Paused, TransportEvent::TogglePlay) => Playing,
            (Playing, TransportEvent::TogglePlay) => Paused,

            (_, TransportEvent::TrackSelected) => Playing,

            (_, TransportEvent::TrackEnded(EndOfTrack::Stop)) => Paused,
            (_, TransportEvent::TrackEnded(_)) => Playing,

            (Playing, TransportEvent::PlayRejected { revert: true }) => Paused,
            (state, TransportEvent::PlayRejected { .. }) => state,
        }
    }

    pub fn is_playing(self) -> bool {
        self == TransportState::Playing
    }
}
