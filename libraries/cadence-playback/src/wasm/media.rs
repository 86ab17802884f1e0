//! `HTMLAudioElement` media resource

use crate::error::{PlaybackError, Result};
use crate::media::{MediaResource, PlayAttempt};
use std::cell::RefCell;
use std::rc::Rc;
use js_sys::Function;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// Play rejections reported by the browser after `play()` returned
pub type RejectionQueue = Rc<RefCell<Vec<(PlayAttempt, String)>>>;

/// Media resource backed by a detached `<audio>` element
pub struct HtmlAudioMedia {
    audio: HtmlAudioElement,
    rejections: RejectionQueue,

    // Called (no arguments) once a rejection has been queued
    on_rejection: Rc<RefCell<Option<Function>>>,
}

impl HtmlAudioMedia {
    pub fn new() -> Result<Self> {
        let audio = HtmlAudioElement::new().map_err(js_error)?;
        audio.set_preload("auto");

        Ok(Self {
            audio,
            rejections: Rc::new(RefCell::new(Vec::new())),
            on_rejection: Rc::new(RefCell::new(None)),
        })
    }

    /// The underlying element, for wiring `timeupdate` and `ended` listeners
    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }

    /// Register the function to call when the browser refuses a `play()`
    pub fn set_rejection_listener(&self, listener: Option<Function>) {
        *self.on_rejection.borrow_mut() = listener;
    }
}

impl MediaResource for HtmlAudioMedia {
    fn set_source(&mut self, locator: &str) -> Result<()> {
        self.audio.set_src(locator);
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        self.audio.load();
        Ok(())
    }

    fn play(&mut self, attempt: PlayAttempt) -> Result<()> {
        let promise = self.audio.play().map_err(|e| {
            PlaybackError::PlayRejected(describe(&e))
        })?;

        let rejections = Rc::clone(&self.rejections);
        let on_rejection = Rc::clone(&self.on_rejection);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                let reason = describe(&e);
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "Playback prevented: {}",
                    reason
                )));
                rejections.borrow_mut().push((attempt, reason));

                if let Some(listener) = on_rejection.borrow().as_ref() {
                    listener.call0(&JsValue::NULL).ok();
                }
            }
        });

        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            web_sys::console::warn_1(&e);
        }
    }

    fn position(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_position(&mut self, secs: f64) -> Result<()> {
        self.audio.set_current_time(secs);
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.audio.duration();
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }

    fn volume(&self) -> f32 {
        self.audio.volume() as f32
    }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        self.audio.set_volume(f64::from(level.clamp(0.0, 1.0)));
        Ok(())
    }

    fn has_ended(&self) -> bool {
        self.audio.ended()
    }

    fn take_rejections(&mut self) -> Vec<(PlayAttempt, String)> {
        std::mem::take(&mut *self.rejections.borrow_mut())
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("name"))
                .ok()
                .and_then(|name| name.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

fn js_error(value: JsValue) -> PlaybackError {
    PlaybackError::Media(describe(&value))
}
