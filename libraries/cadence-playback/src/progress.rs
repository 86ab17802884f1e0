//! Playback progress
//!
//! Mirrors the media resource's clock for display. Duration stays unknown
//! until the resource has probed the source.

/// Slider upper bound used while duration is unknown
pub const UNKNOWN_DURATION_SLIDER_MAX: f64 = 100.0;

/// Position and duration of the current track
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    position_secs: f64,
    duration_secs: Option<f64>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the resource's current position and duration
    ///
    /// Non-finite or non-positive durations count as unknown. Position is
    /// clamped to `[0, duration]` once duration is known.
    pub fn on_time_update(&mut self, position_secs: f64, duration_secs: Option<f64>) {
        self.duration_secs = duration_secs.filter(|d| d.is_finite() && *d > 0.0);
        self.position_secs = self.clamp(position_secs);
    }

    /// Set position directly (user seek). Duration is left untouched.
    pub fn seek(&mut self, position_secs: f64) {
        self.position_secs = self.clamp(position_secs);
    }

    /// Forget position and duration (track changed)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move position to the end of the track, if known
    pub fn hold_at_end(&mut self) {
        if let Some(duration) = self.duration_secs {
            self.position_secs = duration;
        }
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }

    /// Upper bound for the position slider
    pub fn slider_max(&self) -> f64 {
        self.duration_secs.unwrap_or(UNKNOWN_DURATION_SLIDER_MAX)
    }

    /// Elapsed time label (`m:ss`)
    pub fn elapsed_label(&self) -> String {
        format_time(self.position_secs)
    }

    /// Duration label, `0:00` while unknown
    pub fn duration_label(&self) -> String {
        format_time(self.duration_secs.unwrap_or(0.0))
    }

    fn clamp(&self, position_secs: f64) -> f64 {
        let position = if position_secs.is_finite() {
            position_secs.max(0.0)
        } else {
            0.0
        };

        match self.duration_secs {
            Some(duration) => position.min(duration),
            None => position,
        }
    }
}

/// Format seconds as `m:ss`
///
/// Minutes are not padded, seconds always two digits. Fractions are
/// truncated; negative and non-finite input renders as `0:00`.
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };

    format!("{}:{:02}", total / 60, total % 60)
}
