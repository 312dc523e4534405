//! Front-end state around the pipeline.
//!
//! A [`Session`] owns the current result list, the favorites mirror and the
//! generator, and turns each action into a [`Notice`] for the user. It is
//! `Sync`, so front ends may share one across tasks; the generator's
//! single-flight guard keeps overlapping submissions out.

use std::sync::{Mutex, PoisonError, RwLock};

use crate::error::GenerateError;
use crate::favorites::{FavoriteSet, Favorites, FavoritesStore, Toggle};
use crate::generate::{FallbackReason, RecipeGenerator};
use crate::types::{Recipe, RecipeGenerationRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Short message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

pub struct Session<S: FavoritesStore> {
    generator: RecipeGenerator,
    favorites: Mutex<Favorites<S>>,
    recipes: RwLock<Vec<Recipe>>,
    last_fallback: RwLock<Option<FallbackReason>>,
}

impl<S: FavoritesStore> Session<S> {
    pub fn new(generator: RecipeGenerator, favorites: Favorites<S>) -> Self {
        Self {
            generator,
            favorites: Mutex::new(favorites),
            recipes: RwLock::new(Vec::new()),
            last_fallback: RwLock::new(None),
        }
    }

    /// Generate recipes, replacing the current list.
    pub async fn generate(
        &self,
        request: &RecipeGenerationRequest,
    ) -> Result<Notice, GenerateError> {
        let outcome = self.generator.generate(request).await?;

        *self
            .last_fallback
            .write()
            .unwrap_or_else(PoisonError::into_inner) = outcome.fallback_reason().cloned();

        let recipes = outcome.into_recipes();
        let count = recipes.len();
        *self.recipes.write().unwrap_or_else(PoisonError::into_inner) = recipes;

        Ok(if request.surprise_me {
            Notice::success("🎉 Surprise recipe generated! Hope you love it!")
        } else {
            Notice::success(format!("🍳 Generated {count} delicious recipes for you!"))
        })
    }

    /// The most recent result list.
    pub fn recipes(&self) -> Vec<Recipe> {
        self.recipes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Why the most recent list came from the offline generator, if it did.
    pub fn last_fallback(&self) -> Option<FallbackReason> {
        self.last_fallback
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_busy(&self) -> bool {
        self.generator.is_busy()
    }

    pub fn favorites(&self) -> FavoriteSet {
        self.lock_favorites().set().clone()
    }

    pub fn is_favorite(&self, recipe: &Recipe) -> bool {
        self.lock_favorites().is_favorite(recipe)
    }

    pub fn toggle_favorite(&self, recipe: &Recipe) -> Notice {
        match self.lock_favorites().toggle(recipe) {
            Ok(Toggle::Added) => Notice::success("Added to favorites! ❤️"),
            Ok(Toggle::Removed) => Notice::success("Removed from favorites"),
            Err(e) => {
                tracing::error!(error = %e, recipe_id = %recipe.id, "Failed to save favorites");
                Notice::error("Failed to save favorites")
            }
        }
    }

    pub fn remove_favorite(&self, id: &str) -> Notice {
        match self.lock_favorites().remove(id) {
            Ok(Some(_)) => Notice::success("Removed from favorites"),
            Ok(None) => Notice::error(format!("No favorite with id {id}")),
            Err(e) => {
                tracing::error!(error = %e, recipe_id = id, "Failed to save favorites");
                Notice::error("Failed to save favorites")
            }
        }
    }

    pub fn clear_favorites(&self) -> Notice {
        match self.lock_favorites().clear() {
            Ok(()) => Notice::success("Favorites cleared"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to save favorites");
                Notice::error("Failed to save favorites")
            }
        }
    }

    fn lock_favorites(&self) -> std::sync::MutexGuard<'_, Favorites<S>> {
        self.favorites.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiError, FakeAiClient};
    use crate::favorites::MemoryStore;
    use std::time::Duration;

    fn session(client: FakeAiClient) -> Session<MemoryStore> {
        Session::new(
            RecipeGenerator::new(Box::new(client), Duration::ZERO),
            Favorites::load(MemoryStore::new()),
        )
    }

    fn request() -> RecipeGenerationRequest {
        RecipeGenerationRequest::new(vec!["egg".to_string(), "tomato".to_string()], "Vegan")
    }

    #[tokio::test]
    async fn test_generate_replaces_list() {
        let session = session(FakeAiClient::failing(AiError::Offline));

        let notice = session.generate(&request()).await.unwrap();
        assert_eq!(notice.message, "🍳 Generated 3 delicious recipes for you!");
        assert_eq!(session.recipes().len(), 3);
        assert_eq!(session.last_fallback(), Some(FallbackReason::Offline));

        let notice = session.generate(&request().surprise(true)).await.unwrap();
        assert_eq!(notice.message, "🎉 Surprise recipe generated! Hope you love it!");
        assert_eq!(session.recipes().len(), 1);
    }

    #[tokio::test]
    async fn test_model_recipes_clear_fallback_marker() {
        let session = session(FakeAiClient::always(
            r#"[{"name": "X", "ingredients": ["a"], "steps": ["b"]}]"#,
        ));

        session.generate(&request()).await.unwrap();
        assert_eq!(session.last_fallback(), None);
        assert_eq!(session.recipes()[0].name, "X");
    }

    #[tokio::test]
    async fn test_favorites_survive_new_generation() {
        let session = session(FakeAiClient::failing(AiError::Offline));
        session.generate(&request()).await.unwrap();

        let stew = session.recipes()[1].clone();
        assert_eq!(session.toggle_favorite(&stew).message, "Added to favorites! ❤️");

        session.generate(&request().surprise(true)).await.unwrap();
        assert!(session.is_favorite(&stew));
        assert_eq!(session.favorites().len(), 1);

        assert_eq!(session.toggle_favorite(&stew).message, "Removed from favorites");
        assert!(session.favorites().is_empty());
        assert_eq!(session.remove_favorite("nope").kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn test_offline_recipes_for_other_ingredients_are_not_favorites() {
        let session = session(FakeAiClient::failing(AiError::Offline));
        let egg = RecipeGenerationRequest::new(vec!["egg".to_string()], "Vegan");
        let rice = RecipeGenerationRequest::new(vec!["rice".to_string()], "Vegan");

        session.generate(&egg).await.unwrap();
        let egg_bowl = session.recipes()[0].clone();
        session.toggle_favorite(&egg_bowl);

        session.generate(&rice).await.unwrap();
        let rice_bowl = session.recipes()[0].clone();
        assert!(!session.is_favorite(&rice_bowl));

        assert_eq!(session.toggle_favorite(&rice_bowl).message, "Added to favorites! ❤️");
        assert_eq!(session.favorites().len(), 2);
        assert!(session.is_favorite(&egg_bowl));
    }
}
