//! Transport controller - core orchestration
//!
//! Owns the queue, transport state, progress, volume and favorites, and
//! directs the media resource. Every public method is one UI or media event.

use crate::{
    error::Result,
    events::PlaybackEvent,
    favorites::Favorites,
    media::{stream_locator, MediaResource, PlayAttempt},
    progress::Progress,
    queue::{Queue, Selection},
    shuffle::{RandomSource, ThreadRandom},
    transport::{end_of_track, EndOfTrack, TransportEvent},
    types::{Direction, PlayerConfig, RepeatMode, Track, TrackId, TransportMode, TransportState},
    volume::Volume,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Derived display state for the player bar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub current_track: Option<Track>,
    pub cover_url: Option<String>,
    pub is_playing: bool,
    pub is_favorite: bool,
    pub position_secs: f64,
    pub elapsed: String,
    pub duration: String,
    pub slider_max: f64,
    pub volume: f32,
    pub is_muted: bool,
    pub repeat: RepeatMode,
    pub shuffle: bool,
    pub show_admin_affordance: bool,
}

/// Central transport management
///
/// Orchestrates:
/// - Queue navigation (linear or shuffled, wrapping)
/// - Transport state (Idle, Paused, Playing)
/// - Repeat modes (Off, One, All) and shuffle
/// - Progress mirroring, seek and volume
/// - Favorites
pub struct TransportController<M: MediaResource> {
    // State
    state: TransportState,
    queue: Queue,
    mode: TransportMode,
    progress: Progress,

    // Settings
    volume: Volume,
    favorites: Favorites,
    privileged: bool,
    config: PlayerConfig,

    // Collaborators
    media: M,
    rng: Box<dyn RandomSource>,

    // Latest play request; older rejections are stale
    attempt: PlayAttempt,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<M: MediaResource> TransportController<M> {
    /// Create new controller with in-memory favorites and thread randomness
    pub fn new(config: PlayerConfig, media: M) -> Self {
        let mut controller = Self {
            state: TransportState::Idle,
            queue: Queue::new(),
            mode: TransportMode {
                repeat: config.repeat,
                shuffle: config.shuffle,
            },
            progress: Progress::new(),
            volume: Volume::new(config.volume),
            favorites: Favorites::default(),
            privileged: false,
            config,
            media,
            rng: Box::new(ThreadRandom::new()),
            attempt: PlayAttempt::default(),
            pending_events: Vec::new(),
        };

        controller.apply_volume();
        controller
    }

    /// Use a specific random source for shuffle orders
    #[must_use]
    pub fn with_rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Use a loaded favorites set
    #[must_use]
    pub fn with_favorites(mut self, favorites: Favorites) -> Self {
        self.favorites = favorites;
        self
    }

    // ===== Queue =====

    /// Replace the track list
    ///
    /// The first track is selected and its source prepared, but playback is
    /// not started. An empty list leaves the controller idle.
    pub fn load(&mut self, tracks: Vec<Track>) {
        self.apply_late_rejections();
        let previous_track_id = self.current_track_id();
        let was_playing = self.state.is_playing();

        self.queue.load(tracks, self.rng.as_mut());
        self.progress.reset();
        self.supersede_play_attempts();

        info!(tracks = self.queue.len(), "Loaded queue");
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });

        if was_playing {
            self.media.pause();
        }

        let has_tracks = !self.queue.is_empty();
        self.transition(TransportEvent::QueueLoaded { has_tracks });

        if has_tracks {
            self.emit_track_changed(previous_track_id);
            self.prepare_current();
        }
    }

    /// Handle a click on a track
    ///
    /// Clicking the current track toggles play/pause; clicking another one
    /// starts it from the beginning. Unknown ids are ignored.
    pub fn select(&mut self, track_id: &str) {
        self.apply_late_rejections();
        let previous_track_id = self.current_track_id();

        match self.queue.select_by_id(track_id) {
            Selection::SameTrack => self.toggle_play(),
            Selection::Changed(index) => {
                debug!(track_id, index, "Selected track");
                self.start_current(previous_track_id);
            }
            Selection::NotFound => {
                debug!(track_id, "Ignoring selection of unknown track");
            }
        }
    }

    /// Skip to next track
    pub fn next(&mut self) {
        self.skip(Direction::Forward);
    }

    /// Go to previous track
    pub fn previous(&mut self) {
        self.skip(Direction::Backward);
    }

    fn skip(&mut self, direction: Direction) {
        self.apply_late_rejections();
        let previous_track_id = self.current_track_id();

        if self.queue.advance(direction, self.mode.shuffle).is_some() {
            self.start_current(previous_track_id);
        }
    }

    // ===== Playback Control =====

    /// Play/pause button
    pub fn toggle_play(&mut self) {
        self.apply_late_rejections();
        match self.state {
            TransportState::Idle => {}
            TransportState::Paused => {
                self.transition(TransportEvent::TogglePlay);
                self.request_play();
            }
            TransportState::Playing => {
                self.transition(TransportEvent::TogglePlay);
                self.supersede_play_attempts();
                self.media.pause();
            }
        }
    }

    /// Media resource reported end of media
    pub fn on_track_end(&mut self) {
        self.apply_late_rejections();
        let Some(track_id) = self.current_track_id() else {
            return;
        };

        self.pending_events.push(PlaybackEvent::TrackFinished {
            track_id: track_id.clone(),
        });

        let action = end_of_track(self.mode);
        debug!(track_id = %track_id, ?action, "Track ended");

        match action {
            EndOfTrack::Restart => {
                self.transition(TransportEvent::TrackEnded(action));
                self.progress.seek(0.0);
                let result = self.media.set_position(0.0);
                self.report("restart", result);
                self.request_play();
            }
            EndOfTrack::Advance => {
                if self.queue.advance(Direction::Forward, self.mode.shuffle).is_some() {
                    self.start_current(Some(track_id));
                }
            }
            EndOfTrack::Stop => {
                self.progress.hold_at_end();
                self.transition(TransportEvent::TrackEnded(action));
            }
        }
    }

    /// Media resource rejected a play request after accepting it
    ///
    /// Rejections for superseded attempts are ignored.
    pub fn handle_play_rejected(&mut self, attempt: PlayAttempt, reason: &str) {
        if attempt != self.attempt {
            debug!(?attempt, current = ?self.attempt, "Ignoring stale play rejection");
            return;
        }
        self.play_rejected(reason);
    }

    /// Apply rejections the media resource learned about asynchronously
    ///
    /// Every transport command runs this first, so a blocked play is
    /// reverted before the command sees the state.
    pub fn apply_late_rejections(&mut self) {
        for (attempt, reason) in self.media.take_rejections() {
            self.handle_play_rejected(attempt, &reason);
        }
    }

    /// Media time update: mirror position and duration
    pub fn on_time_update(&mut self) {
        self.apply_late_rejections();
        let position = self.media.position();
        let duration = self.media.duration();
        self.progress.on_time_update(position, duration);

        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_secs: self.progress.position_secs(),
            duration_secs: self.progress.duration_secs(),
        });
    }

    /// Position slider dragged
    ///
    /// Play/pause state is unchanged. Range clamping is left to the media
    /// resource; non-finite or negative input becomes 0.
    pub fn seek(&mut self, position_secs: f64) {
        self.apply_late_rejections();
        if self.state == TransportState::Idle {
            return;
        }

        let position = if position_secs.is_finite() {
            position_secs.max(0.0)
        } else {
            0.0
        };

        self.progress.seek(position);
        let result = self.media.set_position(position);
        self.report("seek", result);
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0); kept for later tracks
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.apply_volume();
        self.emit_volume_changed();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
        self.emit_volume_changed();
    }

    // ===== Shuffle & Repeat =====

    /// Cycle repeat: Off -> One -> All -> Off
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.mode.repeat = self.mode.repeat.cycle();
        self.emit_mode_changed();
        self.mode.repeat
    }

    /// Flip shuffle; turning it on draws a fresh order over all tracks
    pub fn toggle_shuffle(&mut self) -> bool {
        self.mode.shuffle = !self.mode.shuffle;
        if self.mode.shuffle {
            self.queue.regenerate_shuffle(self.rng.as_mut());
        }
        self.emit_mode_changed();
        self.mode.shuffle
    }

    // ===== Favorites =====

    /// Toggle a track's favorite flag; returns the new flag
    pub fn toggle_favorite(&mut self, track_id: &str) -> bool {
        let is_favorite = self.favorites.toggle(track_id);
        self.pending_events.push(PlaybackEvent::FavoriteToggled {
            track_id: track_id.to_string(),
            is_favorite,
        });
        is_favorite
    }

    /// Toggle the current track's favorite flag
    pub fn toggle_current_favorite(&mut self) -> Option<bool> {
        let track_id = self.current_track_id()?;
        Some(self.toggle_favorite(&track_id))
    }

    pub fn is_favorite(&self, track_id: &str) -> bool {
        self.favorites.contains(track_id)
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    // ===== Session =====

    /// Mark the session as privileged (exposes the admin affordance)
    pub fn set_privileged(&mut self, privileged: bool) {
        self.privileged = privileged;
    }

    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    // ===== State Queries =====

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    pub fn tracks(&self) -> &[Track] {
        self.queue.tracks()
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Id of the latest play request
    pub fn play_attempt(&self) -> PlayAttempt {
        self.attempt
    }

    /// Track that `next` would move to
    pub fn up_next(&self) -> Option<&Track> {
        let index = self.queue.peek(Direction::Forward, self.mode.shuffle)?;
        self.queue.get(index)
    }

    /// Whether a track card should be highlighted
    pub fn is_active(&self, track_id: &str) -> bool {
        self.current_track().is_some_and(|t| t.id == track_id)
    }

    /// Whether a track card should show the playing animation
    pub fn is_animating(&self, track_id: &str) -> bool {
        self.is_playing() && self.is_active(track_id)
    }

    /// Cover URL for a track, falling back to the default artwork
    pub fn cover_url<'a>(&'a self, track: &'a Track) -> &'a str {
        track
            .cover_url
            .as_deref()
            .unwrap_or(&self.config.default_cover_url)
    }

    /// Snapshot for rendering the player bar
    pub fn view(&self) -> PlayerView {
        let current = self.current_track();

        PlayerView {
            current_track: current.cloned(),
            cover_url: current.map(|t| self.cover_url(t).to_string()),
            is_playing: self.is_playing(),
            is_favorite: current.is_some_and(|t| self.favorites.contains(&t.id)),
            position_secs: self.progress.position_secs(),
            elapsed: self.progress.elapsed_label(),
            duration: self.progress.duration_label(),
            slider_max: self.progress.slider_max(),
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            repeat: self.mode.repeat,
            shuffle: self.mode.shuffle,
            show_admin_affordance: self.privileged,
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn current_track_id(&self) -> Option<TrackId> {
        self.current_track().map(|t| t.id.clone())
    }

    /// Start the current track from zero
    fn start_current(&mut self, previous_track_id: Option<TrackId>) {
        self.transition(TransportEvent::TrackSelected);
        self.progress.reset();
        self.emit_track_changed(previous_track_id);
        self.prepare_current();
        self.request_play();
    }

    /// Point the media resource at the current track and load it
    fn prepare_current(&mut self) {
        let Some(track) = self.queue.current() else {
            return;
        };
        let locator = stream_locator(&self.config.stream_base_url, track.media_ref());
        debug!(track_id = %track.id, locator = %locator, "Loading track");

        self.supersede_play_attempts();

        let result = self.media.set_source(&locator);
        self.report("set source", result);
        self.apply_volume();
        let result = self.media.load();
        self.report("load", result);
    }

    fn request_play(&mut self) {
        self.supersede_play_attempts();
        if let Err(e) = self.media.play(self.attempt) {
            self.play_rejected(&e.to_string());
        }
    }

    fn play_rejected(&mut self, reason: &str) {
        warn!("Playback prevented: {}", reason);
        self.pending_events.push(PlaybackEvent::PlaybackRejected {
            reason: reason.to_string(),
        });
        self.transition(TransportEvent::PlayRejected {
            revert: self.config.revert_on_play_rejection,
        });
    }

    fn supersede_play_attempts(&mut self) {
        self.attempt = PlayAttempt(self.attempt.0 + 1);
    }

    fn apply_volume(&mut self) {
        let result = self.media.set_volume(self.volume.effective());
        self.report("set volume", result);
    }

    fn transition(&mut self, event: TransportEvent) {
        let next = self.state.on(event);
        if next != self.state {
            debug!(from = ?self.state, to = ?next, ?event, "Transport transition");
            self.state = next;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state: next });
        }
    }

    fn report(&mut self, action: &str, result: Result<()>) {
        if let Err(e) = result {
            warn!("Media {} failed: {}", action, e);
            self.pending_events.push(PlaybackEvent::Error {
                message: format!("{action} failed: {e}"),
            });
        }
    }

    fn emit_track_changed(&mut self, previous_track_id: Option<TrackId>) {
        if let Some(track_id) = self.current_track_id() {
            self.pending_events.push(PlaybackEvent::TrackChanged {
                track_id,
                previous_track_id,
            });
        }
    }

    fn emit_mode_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::ModeChanged {
            repeat: self.mode.repeat,
            shuffle: self.mode.shuffle,
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }
}

impl<M: MediaResource + Default> Default for TransportController<M> {
    fn default() -> Self {
        Self::new(PlayerConfig::default(), M::default())
    }
}
