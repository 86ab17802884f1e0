//! Cadence - Playback Core
//!
//! Platform-agnostic player core for the Cadence web music player.
//!
//! This crate provides:
//! - Queue model (fetch order, wrapping navigation, shuffle permutation)
//! - Transport state machine (Idle, Paused, Playing)
//! - Repeat modes (Off, One, All) and shuffle
//! - Progress tracking and `m:ss` formatting
//! - Volume with mute
//! - Favorites set with pluggable persistence
//!
//! # Architecture
//!
//! `cadence-playback` never touches audio itself. The [`TransportController`]
//! directs a [`MediaResource`] (an `<audio>` element in the browser, a rodio
//! sink in the terminal) and queues [`PlaybackEvent`]s for the UI.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cadence_playback::{NullMedia, PlayerConfig, Track, TransportController, TransportState};
//!
//! let mut player = TransportController::new(PlayerConfig::default(), NullMedia::new());
//!
//! player.load(vec![
//!     Track::new("1", "Snowfall", "Mika"),
//!     Track::new("2", "Aurora", "Mika"),
//! ]);
//! assert_eq!(player.state(), TransportState::Paused);
//!
//! // Clicking another track starts it
//! player.select("2");
//! assert!(player.is_playing());
//!
//! // Clicking it again pauses
//! player.select("2");
//! assert!(!player.is_playing());
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use cadence_playback::{NullMedia, RepeatMode, SeededRandom, TransportController};
//!
//! let mut player = TransportController::new(Default::default(), NullMedia::new())
//!     .with_rng(Box::new(SeededRandom::new(7)));
//!
//! assert_eq!(player.toggle_repeat(), RepeatMode::One);
//! assert!(player.toggle_shuffle());
//! ```

mod controller;
mod error;
pub mod events;
pub mod favorites;
pub mod media;
pub mod progress;
pub mod queue;
pub mod shuffle;
pub mod transport;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use controller::{PlayerView, TransportController};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use favorites::{Favorites, FavoritesStore, MemoryFavoritesStore};
pub use media::{stream_locator, MediaResource, NullMedia, PlayAttempt};
pub use progress::{format_time, Progress};
pub use queue::{Queue, Selection};
pub use shuffle::{RandomSource, SeededRandom, ThreadRandom};
pub use transport::{end_of_track, EndOfTrack, TransportEvent};
pub use types::{
    Direction, PlayerConfig, RepeatMode, Track, TrackId, TransportMode, TransportState,
};
pub use volume::Volume;
