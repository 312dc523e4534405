pub mod ai;
pub mod error;
pub mod extract;
pub mod favorites;
pub mod generate;
pub mod mock;
pub mod session;
pub mod share;
pub mod types;

pub use error::{ExtractError, GenerateError, StoreError};
pub use extract::{extract_json_array, parse_json_array};
pub use favorites::{
    FavoriteSet, Favorites, FavoritesStore, JsonFileStore, MemoryStore, Toggle, FAVORITES_SLOT,
};
pub use generate::{
    build_generation_request, generate_recipes, parse_model_recipes, resolve_response,
    FallbackReason, Outcome, RecipeGenerator, GENERATION_MAX_TOKENS, GENERATION_TEMPERATURE,
};
pub use mock::generate_mock_recipes;
pub use session::{Notice, NoticeKind, Session};
pub use share::format_recipe;
pub use types::{
    Difficulty, IngredientList, Recipe, RecipeGenerationRequest, DEFAULT_DIETARY_PREFERENCE,
    DIETARY_OPTIONS,
};
