//! Media resource abstraction
//!
//! The controller directs a single media resource (an HTML audio element in
//! the browser, a rodio sink in the terminal) but never decodes audio itself.

use crate::error::Result;

/// Identifies one play request
///
/// Handed to [`MediaResource::play`]; backends that learn about a rejection
/// asynchronously report it back with the same id. Any later play or load
/// supersedes earlier attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlayAttempt(pub u64);

/// Platform media player primitive
pub trait MediaResource {
    /// Point the resource at a new locator (does not start loading)
    fn set_source(&mut self, locator: &str) -> Result<()>;

    /// Load the current source from the beginning
    fn load(&mut self) -> Result<()>;

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Request accepted (it may still be rejected later)
    /// * `Err(_)` - Rejected immediately
    fn play(&mut self, attempt: PlayAttempt) -> Result<()>;

    /// Halt playback, keeping the position
    fn pause(&mut self);

    /// Current position in seconds
    fn position(&self) -> f64;

    /// Seek to position in seconds. Range clamping is up to the resource.
    fn set_position(&mut self, secs: f64) -> Result<()>;

    /// Total duration in seconds, `None` until probed
    fn duration(&self) -> Option<f64>;

    /// Current volume (0.0-1.0)
    fn volume(&self) -> f32;

    /// Set volume (0.0-1.0)
    fn set_volume(&mut self, level: f32) -> Result<()>;

    /// Whether the source played to its end
    ///
    /// For backends without an end-of-media callback; the driver polls this
    /// and calls `TransportController::on_track_end`.
    fn has_ended(&self) -> bool {
        false
    }

    /// Play rejections learned after `play` returned `Ok`
    ///
    /// Drained by the controller before it applies any command.
    fn take_rejections(&mut self) -> Vec<(PlayAttempt, String)> {
        Vec::new()
    }
}

impl<M: MediaResource + ?Sized> MediaResource for Box<M> {
    fn set_source(&mut self, locator: &str) -> Result<()> {
        (**self).set_source(locator)
    }

    fn load(&mut self) -> Result<()> {
        (**self).load()
    }

    fn play(&mut self, attempt: PlayAttempt) -> Result<()> {
        (**self).play(attempt)
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn position(&self) -> f64 {
        (**self).position()
    }

    fn set_position(&mut self, secs: f64) -> Result<()> {
        (**self).set_position(secs)
    }

    fn duration(&self) -> Option<f64> {
        (**self).duration()
    }

    fn volume(&self) -> f32 {
        (**self).volume()
    }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        (**self).set_volume(level)
    }

    fn has_ended(&self) -> bool {
        (**self).has_ended()
    }

    fn take_rejections(&mut self) -> Vec<(PlayAttempt, String)> {
        (**self).take_rejections()
    }
}

/// Build the playable locator for a media reference
///
/// Mirrors the backend's stream route: `{base}/api/tracks/{media_ref}`.
/// The reference is percent-encoded as a single path segment.
pub fn stream_locator(base_url: &str, media_ref: &str) -> String {
    format!(
        "{}/api/tracks/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(media_ref)
    )
}

/// In-memory media resource for tests and headless use
///
/// Records every command so tests can assert on what the controller asked for.
#[derive(Debug, Clone, Default)]
pub struct NullMedia {
    pub source: Option<String>,
    pub loads: usize,
    pub plays: Vec<PlayAttempt>,
    pub pauses: usize,
    pub position: f64,
    pub duration: Option<f64>,
    pub volume: f32,
    pub ended: bool,
    /// When set, every `play` fails with this reason
    pub reject_play: Option<String>,
    /// Rejections to report later, as a browser does for `play()` promises
    pub late_rejections: Vec<(PlayAttempt, String)>,
}

impl NullMedia {
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            ..Self::default()
        }
    }

    /// Reject the most recent play request after the fact
    pub fn reject_last_play(&mut self, reason: &str) {
        if let Some(attempt) = self.plays.last() {
            self.late_rejections.push((*attempt, reason.to_string()));
        }
    }

    /// Whether the last command left the resource playing
    pub fn is_playing(&self) -> bool {
        self.plays.len() > self.pauses && self.reject_play.is_none()
    }
}

impl MediaResource for NullMedia {
    fn set_source(&mut self, locator: &str) -> Result<()> {
        self.source = Some(locator.to_string());
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        self.loads += 1;
        self.position = 0.0;
        self.ended = false;
        Ok(())
    }

    fn play(&mut self, attempt: PlayAttempt) -> Result<()> {
        self.plays.push(attempt);
        match &self.reject_play {
            Some(reason) => Err(crate::error::PlaybackError::PlayRejected(reason.clone())),
            None => Ok(()),
        }
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, secs: f64) -> Result<()> {
        self.position = secs;
        self.ended = false;
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        self.volume = level;
        Ok(())
    }

    fn has_ended(&self) -> bool {
        self.ended
    }

    fn take_rejections(&mut self) -> Vec<(PlayAttempt, String)> {
        std::mem::take(&mut self.late_rejections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_strips_trailing_slash() {
        assert_eq!(
            stream_locator("http://localhost:8080/", "7"),
            "http://localhost:8080/api/tracks/7"
        );
        assert_eq!(stream_locator("", "7"), "/api/tracks/7");
    }

    #[test]
    fn locator_escapes_reserved_characters() {
        assert_eq!(
            stream_locator("http://host", "a/b?c d"),
            "http://host/api/tracks/a%2Fb%3Fc%20d"
        );
        assert_eq!(stream_locator("", "blob-9_x.mp3"), "/api/tracks/blob-9_x.mp3");
    }

    #[test]
    fn null_media_records_commands() {
        let mut media = NullMedia::new();
        media.set_source("/api/tracks/1").unwrap();
        media.load().unwrap();
        media.play(PlayAttempt(1)).unwrap();

        assert_eq!(media.source.as_deref(), Some("/api/tracks/1"));
        assert_eq!(media.loads, 1);
        assert!(media.is_playing());

        media.pause();
        assert!(!media.is_playing());
    }

    #[test]
    fn null_media_can_reject() {
        let mut media = NullMedia::new();
        media.reject_play = Some("autoplay blocked".into());
        assert!(media.play(PlayAttempt(1)).is_err());
    }
}
