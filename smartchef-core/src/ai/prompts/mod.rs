//! AI prompt templates.

pub mod generate_recipes;

pub use generate_recipes::{render_generate_recipes_prompt, GENERATE_RECIPES_PROMPT_NAME};
