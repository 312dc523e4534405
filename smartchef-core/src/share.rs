//! Plain-text rendering of a recipe for copying and sharing.

use std::fmt::Write;

use crate::types::Recipe;

const DEFAULT_TIP: &str = "Enjoy your cooking!";

/// Render a recipe as shareable text with numbered ingredients and steps.
pub fn format_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "🍽️ {}", recipe.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "📋 Description:");
    let _ = writeln!(out, "{}", recipe.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "🧂 Ingredients:");
    write_numbered(&mut out, &recipe.ingredients);
    let _ = writeln!(out);
    let _ = writeln!(out, "📖 Instructions:");
    write_numbered(&mut out, &recipe.steps);
    let _ = writeln!(out);
    let _ = writeln!(out, "⏱️ Cook Time: {}", recipe.cook_time);
    let _ = writeln!(out, "🎯 Difficulty: {}", recipe.difficulty);
    let _ = writeln!(out);

    let tips = recipe
        .tips
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TIP);
    let _ = write!(out, "💡 Tips: {tips}");

    out.trim().to_string()
}

fn write_numbered(out: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, item);
    }
}
