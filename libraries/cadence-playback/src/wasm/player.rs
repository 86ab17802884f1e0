//! WASM-compatible TransportController wrapper

use super::{HtmlAudioMedia, LocalStorageFavoritesStore};
use crate::{
    format_time, Favorites, PlaybackError, PlaybackEvent, PlayerConfig, Track,
    TransportController, TransportState,
};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// Browser player
///
/// Wraps the core controller with a JavaScript-friendly API. The page wires
/// the audio element's `timeupdate` and `ended` events to `onTimeUpdate` and
/// `onEnded`, and renders from `view()`.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: TransportController<HtmlAudioMedia>,

    // Event callbacks
    on_state_change: Option<Function>,
    on_track_change: Option<Function>,
    on_event: Option<Function>,
    on_error: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player; `config` is an optional `PlayerConfig` object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid player config: {}", e)))?
        };

        let media = HtmlAudioMedia::new().map_err(to_js)?;
        let favorites = Favorites::load(Box::new(LocalStorageFavoritesStore::new()));

        Ok(Self {
            inner: TransportController::new(config, media).with_favorites(favorites),
            on_state_change: None,
            on_track_change: None,
            on_event: None,
            on_error: None,
        })
    }

    /// The `<audio>` element driving playback
    #[wasm_bindgen(getter)]
    pub fn audio(&self) -> HtmlAudioElement {
        self.inner.media().element().clone()
    }

    // ===== Queue =====

    /// Replace the track list with a JSON array of tracks
    #[wasm_bindgen(js_name = loadTracks)]
    pub fn load_tracks(&mut self, tracks: JsValue) -> Result<(), JsValue> {
        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;

        self.inner.load(tracks);
        self.flush();
        Ok(())
    }

    /// Track card clicked
    pub fn select(&mut self, track_id: &str) {
        self.inner.select(track_id);
        self.flush();
    }

    /// Skip to next track
    pub fn next(&mut self) {
        self.inner.next();
        self.flush();
    }

    /// Go to previous track
    pub fn previous(&mut self) {
        self.inner.previous();
        self.flush();
    }

    // ===== Playback Control =====

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) {
        self.inner.toggle_play();
        self.flush();
    }

    /// Wire to the audio element's `timeupdate` event
    #[wasm_bindgen(js_name = onTimeUpdate)]
    pub fn on_time_update(&mut self) {
        self.inner.on_time_update();
        self.flush();
    }

    /// Wire to the audio element's `ended` event
    #[wasm_bindgen(js_name = onEnded)]
    pub fn on_ended(&mut self) {
        self.inner.on_track_end();
        self.flush();
    }

    /// Seek to position in seconds
    pub fn seek(&mut self, position_secs: f64) {
        self.inner.seek(position_secs);
        self.flush();
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: f32) {
        self.inner.set_volume(level);
        self.flush();
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.inner.toggle_mute();
        self.flush();
    }

    // ===== Shuffle & Repeat =====

    /// Cycle repeat mode; returns "off" | "one" | "all"
    #[wasm_bindgen(js_name = toggleRepeat)]
    pub fn toggle_repeat(&mut self) -> String {
        let mode = self.inner.toggle_repeat();
        self.flush();
        mode.as_str().to_string()
    }

    /// Flip shuffle; returns the new flag
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self) -> bool {
        let shuffle = self.inner.toggle_shuffle();
        self.flush();
        shuffle
    }

    // ===== Favorites & Session =====

    #[wasm_bindgen(js_name = toggleFavorite)]
    pub fn toggle_favorite(&mut self, track_id: &str) -> bool {
        let is_favorite = self.inner.toggle_favorite(track_id);
        self.flush();
        is_favorite
    }

    #[wasm_bindgen(js_name = isFavorite)]
    pub fn is_favorite(&self, track_id: &str) -> bool {
        self.inner.is_favorite(track_id)
    }

    #[wasm_bindgen(js_name = setPrivileged)]
    pub fn set_privileged(&mut self, privileged: bool) {
        self.inner.set_privileged(privileged);
    }

    // ===== State Queries =====

    /// Current transport state: "idle" | "paused" | "playing"
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        state_name(self.inner.state()).to_string()
    }

    /// Player bar snapshot
    pub fn view(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.view()).unwrap_or(JsValue::NULL)
    }

    /// All tracks in fetch order
    #[wasm_bindgen(js_name = getTracks)]
    pub fn get_tracks(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.tracks()).unwrap_or(JsValue::NULL)
    }

    /// Whether a track card should be highlighted
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self, track_id: &str) -> bool {
        self.inner.is_active(track_id)
    }

    /// Whether a track card should show the playing animation
    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self, track_id: &str) -> bool {
        self.inner.is_animating(track_id)
    }

    /// Format seconds as `m:ss`
    #[wasm_bindgen(js_name = formatTime)]
    pub fn format_time(secs: f64) -> String {
        format_time(secs)
    }

    // ===== Event Listeners =====

    /// Register state change callback, called with the state name
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn set_on_state_change(&mut self, callback: Function) {
        self.on_state_change = Some(callback);
    }

    /// Register track change callback, called with the new track
    #[wasm_bindgen(js_name = onTrackChange)]
    pub fn set_on_track_change(&mut self, callback: Function) {
        self.on_track_change = Some(callback);
    }

    /// Register a callback receiving every event object
    #[wasm_bindgen(js_name = onEvent)]
    pub fn set_on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    /// Register error callback
    #[wasm_bindgen(js_name = onError)]
    pub fn set_on_error(&mut self, callback: Function) {
        self.on_error = Some(callback);
    }

    /// Register a callback run when the browser refuses to start playback
    ///
    /// It receives no arguments; call `flush()` from it so the player
    /// reverts and the registered callbacks fire.
    #[wasm_bindgen(js_name = onPlaybackRejected)]
    pub fn set_on_playback_rejected(&mut self, callback: Function) {
        self.inner.media().set_rejection_listener(Some(callback));
    }

    /// Apply late play rejections and dispatch pending events
    ///
    /// Transport commands apply rejections before they run; this also
    /// dispatches the events that result.
    pub fn flush(&mut self) {
        self.inner.apply_late_rejections();

        for event in self.inner.drain_events() {
            self.dispatch(&event);
        }
    }

    // ===== Internal Event Emitters =====

    fn dispatch(&self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::StateChanged { state } => {
                if let Some(ref cb) = self.on_state_change {
                    cb.call1(&JsValue::NULL, &JsValue::from_str(state_name(*state)))
                        .ok();
                }
            }
            PlaybackEvent::TrackChanged { .. } => {
                if let Some(ref cb) = self.on_track_change {
                    let track = self
                        .inner
                        .current_track()
                        .and_then(|t| serde_wasm_bindgen::to_value(t).ok())
                        .unwrap_or(JsValue::NULL);
                    cb.call1(&JsValue::NULL, &track).ok();
                }
            }
            PlaybackEvent::Error { message } | PlaybackEvent::PlaybackRejected { reason: message } => {
                if let Some(ref cb) = self.on_error {
                    cb.call1(&JsValue::NULL, &JsValue::from_str(message)).ok();
                }
            }
            _ => {}
        }

        if let Some(ref cb) = self.on_event {
            if let Ok(js_event) = serde_wasm_bindgen::to_value(event) {
                cb.call1(&JsValue::NULL, &js_event).ok();
            }
        }
    }
}

fn state_name(state: TransportState) -> &'static str {
    match state {
        TransportState::Idle => "idle",
        TransportState::Paused => "paused",
        TransportState::Playing => "playing",
    }
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
