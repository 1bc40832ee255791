/// Favorites persistence
///
/// The favorites set is stored as a JSON array of product ids under a
/// single key. Both view-models go through `FavoritesStore` so the
/// read/parse logic lives in one place.
use super::data::ProductId;
use super::storage::{KeyValueStore, StorageError};
use tracing::{debug, warn};

/// Storage key holding the favorites array
pub const FAVORITES_KEY: &str = "favorites";

/// A set of product ids with no duplicates.
///
/// Insertion order is kept so the persisted array stays stable across
/// toggles; it has no meaning for membership.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    ids: Vec<ProductId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Remove `id` if present, otherwise add it.
    /// Returns whether `id` is a favorite afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if let Some(pos) = self.ids.iter().position(|&fav| fav == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Parse a stored value. Anything that is not a JSON array of
    /// non-negative integers yields `None`.
    pub fn from_json(json: &str) -> Option<Self> {
        let parsed: Vec<ProductId> = serde_json::from_str(json).ok()?;
        Some(parsed.into_iter().collect())
    }

    pub fn to_json(&self) -> String {
        // Serializing a Vec<u64> cannot fail
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }
}

impl FromIterator<ProductId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        let mut set = FavoriteSet::new();
        for id in iter {
            if !set.contains(id) {
                set.ids.push(id);
            }
        }
        set
    }
}

impl PartialEq for FavoriteSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.ids.iter().all(|&id| other.contains(id))
    }
}

impl Eq for FavoriteSet {}

/// The favorites service shared by the catalog and detail views
pub struct FavoritesStore<S> {
    storage: S,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the current favorites. A missing, unreadable or malformed
    /// entry is the empty set.
    pub fn load(&self) -> FavoriteSet {
        self.try_load().unwrap_or_else(|e| {
            warn!("Failed to read favorites: {}", e);
            FavoriteSet::new()
        })
    }

    /// Like `load`, but a storage read error is returned instead of being
    /// treated as the empty set. Malformed values are still lenient.
    pub fn try_load(&self) -> Result<FavoriteSet, StorageError> {
        let favorites = match self.storage.get_item(FAVORITES_KEY)? {
            Some(raw) => FavoriteSet::from_json(&raw).unwrap_or_else(|| {
                debug!(value = %raw, "Ignoring malformed favorites entry");
                FavoriteSet::new()
            }),
            None => FavoriteSet::new(),
        };
        Ok(favorites)
    }

    /// Overwrite the stored favorites with `favorites`.
    pub fn save(&mut self, favorites: &FavoriteSet) -> Result<(), StorageError> {
        self.storage.set_item(FAVORITES_KEY, &favorites.to_json())
    }

    /// Read-modify-write toggle of a single id.
    ///
    /// Returns the toggled set, even when the write failed (logged).
    /// Returns `None` without writing when the current set could not be
    /// read, so an unreadable store is never overwritten with a guess.
    pub fn toggle(&mut self, id: ProductId) -> Option<FavoriteSet> {
        let mut favorites = match self.try_load() {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!(id, "Not toggling favorite, read failed: {}", e);
                return None;
            }
        };
        let now_favorite = favorites.toggle(id);

        if let Err(e) = self.save(&favorites) {
            warn!(id, "Failed to persist favorites: {}", e);
        } else {
            debug!(id, now_favorite, "Favorites updated");
        }

        Some(favorites)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
