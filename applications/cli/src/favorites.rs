//! Favorites persisted to a JSON file
//!
//! Same layout the browser keeps in `localStorage`: a JSON array of ids.

use cadence_playback::{
    favorites::{decode_favorites, encode_favorites},
    FavoritesStore, PlaybackError, TrackId,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct JsonFileFavoritesStore {
    path: PathBuf,
}

impl JsonFileFavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStore for JsonFileFavoritesStore {
    fn get_all(&self) -> cadence_playback::Result<HashSet<TrackId>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No favorites file yet");
            return Ok(HashSet::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        decode_favorites(&raw)
    }

    fn set_all(&mut self, favorites: &HashSet<TrackId>) -> cadence_playback::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = encode_favorites(favorites)?;

        // Atomic replace
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            PlaybackError::FavoritesStore(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}
