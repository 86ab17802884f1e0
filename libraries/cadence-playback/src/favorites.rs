//! Favorite tracks
//!
//! A set of track ids, read once at startup and written back in full after
//! every toggle.

use crate::error::Result;
use crate::types::TrackId;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, warn};

/// Persistence for the favorites set
pub trait FavoritesStore {
    /// Read the stored set
    fn get_all(&self) -> Result<HashSet<TrackId>>;

    /// Overwrite the stored set
    fn set_all(&mut self, favorites: &HashSet<TrackId>) -> Result<()>;
}

/// Favorites set backed by a store
pub struct Favorites {
    ids: HashSet<TrackId>,
    store: Box<dyn FavoritesStore>,
}

impl Favorites {
    /// Load favorites from the store
    ///
    /// A failing store yields an empty set; the failure is logged.
    pub fn load(store: Box<dyn FavoritesStore>) -> Self {
        let ids = match store.get_all() {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Failed to load favorites, starting empty: {}", e);
                HashSet::new()
            }
        };

        debug!(count = ids.len(), "Loaded favorites");
        Self { ids, store }
    }

    /// Add or remove a track; returns whether it is now a favorite
    ///
    /// Persist failures are logged and the in-memory change is kept.
    pub fn toggle(&mut self, track_id: &str) -> bool {
        let is_favorite = if self.ids.remove(track_id) {
            false
        } else {
            self.ids.insert(track_id.to_string());
            true
        };

        if let Err(e) = self.store.set_all(&self.ids) {
            warn!(track_id, "Failed to persist favorites: {}", e);
        }

        is_favorite
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.ids.contains(track_id)
    }

    /// Current favorite ids (no ordering guarantee)
    pub fn ids(&self) -> &HashSet<TrackId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for Favorites {
    fn default() -> Self {
        Self::load(Box::new(MemoryFavoritesStore::default()))
    }
}

impl std::fmt::Debug for Favorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Favorites").field("ids", &self.ids).finish()
    }
}

/// In-memory store
///
/// Clones share the same contents, so a test can keep a handle and inspect
/// what was persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryFavoritesStore {
    ids: Rc<RefCell<HashSet<TrackId>>>,
}

impl MemoryFavoritesStore {
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TrackId>,
    {
        Self {
            ids: Rc::new(RefCell::new(ids.into_iter().map(Into::into).collect())),
        }
    }

    /// Snapshot of the stored ids
    pub fn snapshot(&self) -> HashSet<TrackId> {
        self.ids.borrow().clone()
    }
}

impl FavoritesStore for MemoryFavoritesStore {
    fn get_all(&self) -> Result<HashSet<TrackId>> {
        Ok(self.ids.borrow().clone())
    }

    fn set_all(&mut self, favorites: &HashSet<TrackId>) -> Result<()> {
        self.ids.borrow_mut().clone_from(favorites);
        Ok(())
    }
}

/// Encode favorites the way the browser stores them: a JSON array of ids
///
/// Sorted so the stored form is stable.
pub fn encode_favorites(favorites: &HashSet<TrackId>) -> Result<String> {
    let mut ids: Vec<&TrackId> = favorites.iter().collect();
    ids.sort();
    Ok(serde_json::to_string(&ids)?)
}

/// Decode a JSON array of ids; blank input is an empty set
pub fn decode_favorites(raw: &str) -> Result<HashSet<TrackId>> {
    if raw.trim().is_empty() {
        return Ok(HashSet::new());
    }
    let ids: Vec<TrackId> = serde_json::from_str(raw)?;
    Ok(ids.into_iter().collect())
}
