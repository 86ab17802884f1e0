//! WASM bindings for cadence-playback
//!
//! Runs the transport controller in the browser: an `HTMLAudioElement` is the
//! media resource and `localStorage` holds the favorites.

#[cfg(feature = "wasm")]
pub mod media;

#[cfg(feature = "wasm")]
pub mod player;

#[cfg(feature = "wasm")]
pub mod storage;

#[cfg(feature = "wasm")]
pub use media::HtmlAudioMedia;

#[cfg(feature = "wasm")]
pub use player::WasmPlayer;

#[cfg(feature = "wasm")]
pub use storage::LocalStorageFavoritesStore;
