//! Favorite recipes and their persistence.
//!
//! [`FavoriteSet`] is the in-memory set keyed by recipe id. Persistence goes
//! through the [`FavoritesStore`] port; [`Favorites`] keeps a set mirrored to
//! a store, writing on every mutation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::StoreError;
use crate::types::Recipe;

/// File name of the favorites slot.
pub const FAVORITES_SLOT: &str = "smartchef-favorites.json";

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Recipes keyed by id, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Recipe>", into = "Vec<Recipe>")]
pub struct FavoriteSet {
    recipes: Vec<Recipe>,
}

impl From<Vec<Recipe>> for FavoriteSet {
    /// Later entries sharing an id with an earlier one are dropped.
    fn from(recipes: Vec<Recipe>) -> Self {
        let mut set = Self::default();
        for recipe in recipes {
            set.insert(recipe);
        }
        set
    }
}

impl From<FavoriteSet> for Vec<Recipe> {
    fn from(set: FavoriteSet) -> Self {
        set.recipes
    }
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.recipes.iter().any(|r| r.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Add a recipe. Returns false if one with the same id is already present.
    pub fn insert(&mut self, recipe: Recipe) -> bool {
        if self.contains(&recipe.id) {
            return false;
        }
        self.recipes.push(recipe);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Recipe> {
        let pos = self.recipes.iter().position(|r| r.id == id)?;
        Some(self.recipes.remove(pos))
    }

    /// Remove the recipe if its id is present, add it otherwise.
    pub fn toggle(&mut self, recipe: &Recipe) -> Toggle {
        if self.remove(&recipe.id).is_some() {
            Toggle::Removed
        } else {
            self.recipes.push(recipe.clone());
            Toggle::Added
        }
    }

    pub fn clear(&mut self) {
        self.recipes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Persistence port for favorites.
pub trait FavoritesStore: Send + Sync {
    /// Read the persisted set. A missing slot is an empty set.
    fn load(&self) -> Result<FavoriteSet, StoreError>;

    /// Replace the persisted set.
    fn save(&self, favorites: &FavoriteSet) -> Result<(), StoreError>;
}

/// Favorites persisted as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `SMARTCHEF_FAVORITES_PATH`, or the default location.
    pub fn from_env() -> Self {
        let path = std::env::var("SMARTCHEF_FAVORITES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        Self::new(path)
    }

    /// Get the default path: ~/.smartchef/smartchef-favorites.json
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".smartchef").join(FAVORITES_SLOT))
            .unwrap_or_else(|| PathBuf::from("data").join(FAVORITES_SLOT))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> Result<FavoriteSet, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FavoriteSet::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(decode_slot(&content))
    }

    fn save(&self, favorites: &FavoriteSet) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(favorites)?;

        // Write then rename so a crash never leaves a half-written slot.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = favorites.len(), "Favorites saved");
        Ok(())
    }
}

/// In-memory slot holding the encoded set, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw slot content, which need not be valid.
    pub fn with_content(content: &str) -> Self {
        Self {
            slot: RwLock::new(Some(content.to_string())),
        }
    }

    /// Current raw slot content.
    pub fn content(&self) -> Option<String> {
        self.slot.read().ok().and_then(|s| s.clone())
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Result<FavoriteSet, StoreError> {
        Ok(self
            .content()
            .map(|content| decode_slot(&content))
            .unwrap_or_default())
    }

    fn save(&self, favorites: &FavoriteSet) -> Result<(), StoreError> {
        let json = serde_json::to_string(favorites)?;
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(json);
        }
        Ok(())
    }
}

/// Corrupt slot content is logged and read as empty.
fn decode_slot(content: &str) -> FavoriteSet {
    match serde_json::from_str(content) {
        Ok(set) => set,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load favorites, starting empty");
            FavoriteSet::new()
        }
    }
}

/// A favorite set mirrored to a store.
///
/// Loaded once on construction; every mutation is written through. A failed
/// write leaves the in-memory set unchanged.
pub struct Favorites<S: FavoritesStore> {
    store: S,
    set: FavoriteSet,
}

impl<S: FavoritesStore> Favorites<S> {
    /// Rehydrate from the store. Read failures are logged and start empty.
    pub fn load(store: S) -> Self {
        let set = store.load().unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to load favorites, starting empty");
            FavoriteSet::new()
        });
        Self { store, set }
    }

    pub fn set(&self) -> &FavoriteSet {
        &self.set
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_favorite(&self, recipe: &Recipe) -> bool {
        self.set.contains(&recipe.id)
    }

    pub fn toggle(&mut self, recipe: &Recipe) -> Result<Toggle, StoreError> {
        self.update(|set| set.toggle(recipe))
    }

    pub fn remove(&mut self, id: &str) -> Result<Option<Recipe>, StoreError> {
        self.update(|set| set.remove(id))
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.update(FavoriteSet::clear)
    }

    fn update<T>(&mut self, f: impl FnOnce(&mut FavoriteSet) -> T) -> Result<T, StoreError> {
        let mut next = self.set.clone();
        let result = f(&mut next);
        self.store.save(&next)?;
        self.set = next;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;
    use tempfile::TempDir;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: format!("Recipe {id}"),
            description: "Tasty".to_string(),
            ingredients: vec!["1 egg".to_string()],
            steps: vec!["Cook".to_string()],
            cook_time: "5 minutes".to_string(),
            difficulty: Difficulty::Easy,
            tips: None,
            dietary: None,
        }
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut set = FavoriteSet::from(vec![recipe("a"), recipe("b")]);
        let before = set.clone();

        assert_eq!(set.toggle(&recipe("c")), Toggle::Added);
        assert!(set.contains("c"));
        assert_eq!(set.toggle(&recipe("c")), Toggle::Removed);
        assert_eq!(set, before);

        assert_eq!(set.toggle(&recipe("a")), Toggle::Removed);
        assert_eq!(set.toggle(&recipe("a")), Toggle::Added);
        let ids: Vec<_> = set.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_ids_dropped_on_decode() {
        let json = serde_json::to_string(&vec![recipe("a"), recipe("a"), recipe("b")]).unwrap();
        let set: FavoriteSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_memory_store_corrupt_slot_reads_empty() {
        let store = MemoryStore::with_content("{not json");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_favorites_write_through() {
        let mut favorites = Favorites::load(MemoryStore::new());
        assert_eq!(favorites.toggle(&recipe("a")).unwrap(), Toggle::Added);

        let reloaded = Favorites::load(MemoryStore::with_content(
            &favorites.store().content().unwrap(),
        ));
        assert!(reloaded.is_favorite(&recipe("a")));

        favorites.clear().unwrap();
        assert_eq!(favorites.store().content().as_deref(), Some("[]"));
    }

    #[test]
    fn test_json_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("nested").join(FAVORITES_SLOT));

        assert!(store.load().unwrap().is_empty());

        let set = FavoriteSet::from(vec![recipe("a"), recipe("b")]);
        store.save(&set).unwrap();
        assert_eq!(store.load().unwrap(), set);

        fs::write(store.path(), "garbage").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    struct FailingStore;

    impl FavoritesStore for FailingStore {
        fn load(&self) -> Result<FavoriteSet, StoreError> {
            Ok(FavoriteSet::new())
        }

        fn save(&self, _favorites: &FavoriteSet) -> Result<(), StoreError> {
            Err(std::io::Error::new(ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_failed_save_leaves_set_unchanged() {
        let mut favorites = Favorites::load(FailingStore);
        assert!(favorites.toggle(&recipe("a")).is_err());
        assert!(favorites.set().is_empty());
    }
}
