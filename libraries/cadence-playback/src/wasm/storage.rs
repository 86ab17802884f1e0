//! `localStorage` favorites store

use crate::error::{PlaybackError, Result};
use crate::favorites::{decode_favorites, encode_favorites, FavoritesStore};
use crate::types::TrackId;
use std::collections::HashSet;
use web_sys::Storage;

/// Storage key shared with earlier versions of the web player
pub const FAVORITES_KEY: &str = "favorites";

/// Favorites kept as a JSON array of ids under a `localStorage` key
#[derive(Debug, Clone)]
pub struct LocalStorageFavoritesStore {
    key: String,
}

impl LocalStorageFavoritesStore {
    pub fn new() -> Self {
        Self::with_key(FAVORITES_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| PlaybackError::FavoritesStore("localStorage unavailable".into()))
    }
}

impl Default for LocalStorageFavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesStore for LocalStorageFavoritesStore {
    fn get_all(&self) -> Result<HashSet<TrackId>> {
        let raw = Self::storage()?
            .get_item(&self.key)
            .map_err(|e| PlaybackError::FavoritesStore(format!("{:?}", e)))?;

        match raw {
            Some(raw) => decode_favorites(&raw),
            None => Ok(HashSet::new()),
        }
    }

    fn set_all(&mut self, favorites: &HashSet<TrackId>) -> Result<()> {
        let encoded = encode_favorites(favorites)?;
        Self::storage()?
            .set_item(&self.key, &encoded)
            .map_err(|e| PlaybackError::FavoritesStore(format!("{:?}", e)))
    }
}
