//! Recipe generation prompt.

use crate::types::RecipeGenerationRequest;

/// Prompt name for logs.
pub const GENERATE_RECIPES_PROMPT_NAME: &str = "generate_recipes";

/// Render the recipe generation prompt for the given request.
///
/// The JSON shape in the prompt matches [`crate::types::Recipe`] so the
/// reply can be parsed directly.
pub fn render_generate_recipes_prompt(request: &RecipeGenerationRequest) -> String {
    let count = if request.surprise_me {
        "1 creative surprise"
    } else {
        "3 easy, creative"
    };

    format!(
        r#"You are a helpful and creative home chef. A user has these ingredients: {ingredients}. Their dietary preference is: {dietary}. Generate {count} recipes.

For each recipe, provide:
1. Recipe Name
2. Short Description
3. Ingredients List (with quantities)
4. Steps (numbered, detailed)
5. Cook Time & Difficulty (Easy/Medium/Hard)
6. Tips or Substitutions

Format your response as a JSON array of recipe objects with this structure:
{{
  "id": "unique_id",
  "name": "Recipe Name",
  "description": "Short description",
  "ingredients": ["ingredient 1", "ingredient 2"],
  "steps": ["step 1", "step 2"],
  "cookTime": "X minutes",
  "difficulty": "Easy|Medium|Hard",
  "tips": "helpful tips",
  "dietary": "{dietary}"
}}"#,
        ingredients = request.ingredients_joined(),
        dietary = request.dietary_preference,
        count = count,
    )
}
