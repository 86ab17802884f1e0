//! rodio-backed media resource
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink (per loaded track)
//! - the fetched bytes of the current track, so it can be restarted

use cadence_playback::{MediaResource, PlayAttempt, PlaybackError, Result};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use std::io::Cursor;
use std::time::Duration;
use tracing::debug;

/// Resolves a locator to encoded audio bytes
pub trait AudioFetcher {
    fn fetch(&mut self, locator: &str) -> std::result::Result<Vec<u8>, String>;
}

pub struct RodioMedia<F: AudioFetcher> {
    // Keep this alive for the lifetime of the player!
    stream: OutputStream,

    fetcher: F,

    // Current track
    locator: Option<String>,
    bytes: Option<Vec<u8>>,
    sink: Option<Sink>,
    duration: Option<f64>,

    volume: f32,
}

impl<F: AudioFetcher> RodioMedia<F> {
    pub fn new(fetcher: F) -> crate::error::Result<Self> {
        // rodio 0.21.x: build/open the default output stream via OutputStreamBuilder
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| crate::error::CliError::Audio(e.to_string()))?;

        Ok(Self {
            stream,
            fetcher,
            locator: None,
            bytes: None,
            sink: None,
            duration: None,
            volume: 1.0,
        })
    }

    /// Decode the cached bytes into a fresh, paused sink
    fn rebuild_sink(&mut self) -> Result<()> {
        let bytes = self.bytes.clone().ok_or(PlaybackError::NoTrackLoaded)?;

        let decoder = Decoder::new(Cursor::new(bytes))
            .map_err(|e| PlaybackError::Media(format!("Decode failed: {e}")))?;
        self.duration = decoder.total_duration().map(|d| d.as_secs_f64());

        self.stop_sink();

        // rodio 0.21.x: Sink is created from the stream's mixer
        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(decoder);
        self.sink = Some(sink);

        Ok(())
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

impl<F: AudioFetcher> MediaResource for RodioMedia<F> {
    fn set_source(&mut self, locator: &str) -> Result<()> {
        self.stop_sink();
        self.locator = Some(locator.to_string());
        self.bytes = None;
        self.duration = None;
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let locator = self.locator.clone().ok_or(PlaybackError::NoTrackLoaded)?;

        let bytes = self
            .fetcher
            .fetch(&locator)
            .map_err(|e| PlaybackError::Media(format!("Failed to fetch {locator}: {e}")))?;
        debug!(locator = %locator, bytes = bytes.len(), "Fetched audio");

        self.bytes = Some(bytes);
        self.rebuild_sink()
    }

    fn play(&mut self, _attempt: PlayAttempt) -> Result<()> {
        match &self.sink {
            Some(sink) => {
                sink.play();
                Ok(())
            }
            None => Err(PlaybackError::PlayRejected("no audio loaded".into())),
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn position(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|sink| sink.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_position(&mut self, secs: f64) -> Result<()> {
        // A drained sink cannot seek; decode the track again
        if self.sink.as_ref().map_or(true, |sink| sink.empty()) {
            self.rebuild_sink()?;
        }

        let target = match self.duration {
            Some(duration) => secs.clamp(0.0, duration),
            None => secs.max(0.0),
        };

        if let Some(sink) = &self.sink {
            sink.try_seek(Duration::from_secs_f64(target)).map_err(|e| {
                PlaybackError::Media(format!("Seek failed (decoder may not support it): {e}"))
            })?;
        }

        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        self.volume = level.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
        Ok(())
    }

    fn has_ended(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| sink.empty())
    }
}
