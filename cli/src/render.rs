//! Terminal rendering of recipe cards.

use smartchef_core::{format_recipe, FallbackReason, Recipe};

const RULE: &str = "────────────────────────────────────────";

pub fn print_recipes(recipes: &[Recipe], fallback: Option<&FallbackReason>) {
    if let Some(reason) = fallback {
        eprintln!("(offline suggestions: {})", reason);
    }

    for (i, recipe) in recipes.iter().enumerate() {
        println!("{RULE}");
        println!("#{} [{}]", i + 1, recipe.id);
        println!("{}", format_recipe(recipe));
    }
    println!("{RULE}");
}

/// One line per recipe: id, name, difficulty and cook time.
pub fn print_summary(recipes: &[Recipe]) {
    let id_width = recipes.iter().map(|r| r.id.len()).max().unwrap_or(0);
    for recipe in recipes {
        println!(
            "{:<id_width$}  {} ({}, {})",
            recipe.id,
            recipe.name,
            recipe.difficulty,
            recipe.cook_time,
            id_width = id_width
        );
    }
}
