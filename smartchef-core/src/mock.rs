//! Offline recipe synthesis.
//!
//! Builds recipes by templating the request into fixed skeletons. Used when
//! the remote model is unavailable or its reply can't be used, so the output
//! has exactly the same shape as parsed model recipes.

use crate::types::{Difficulty, Recipe, RecipeGenerationRequest};

/// Generate mock recipes for a request: three normally, one in surprise mode.
///
/// Pure and deterministic; identifiers are slugs of the recipe name and the
/// ingredients, so batches for different ingredients never share an id.
pub fn generate_mock_recipes(request: &RecipeGenerationRequest) -> Vec<Recipe> {
    if request.surprise_me {
        return vec![mystery_delight(request)];
    }

    vec![
        fusion_bowl(request),
        hearty_stew(request),
        power_salad(request),
    ]
}

fn fusion_bowl(request: &RecipeGenerationRequest) -> Recipe {
    let dietary = &request.dietary_preference;
    build(
        request,
        format!("{dietary} Fusion Bowl"),
        format!(
            "A creative fusion dish combining {} with aromatic spices and fresh herbs.",
            request.ingredients_joined()
        ),
        "1 cup",
        &[
            "2 cloves garlic, minced",
            "1 tablespoon olive oil",
            "Salt and pepper to taste",
            "Fresh herbs for garnish",
        ],
        &[
            "Prepare all ingredients by washing and chopping as needed.",
            "Heat olive oil in a large pan over medium heat.",
            "Add garlic and sauté until fragrant, about 1 minute.",
            "Add main ingredients and cook until tender.",
            "Season with salt, pepper, and herbs.",
            "Serve hot and enjoy!",
        ],
        "25 minutes",
        Difficulty::Easy,
        "For extra flavor, marinate ingredients for 30 minutes before cooking.",
    )
}

fn hearty_stew(request: &RecipeGenerationRequest) -> Recipe {
    let dietary = &request.dietary_preference;
    build(
        request,
        format!("Hearty {dietary} Stew"),
        format!(
            "A warming, nutritious stew perfect for any season using {}.",
            request.ingredients_joined()
        ),
        "2 cups",
        &[
            "4 cups vegetable broth",
            "1 onion, diced",
            "2 carrots, chopped",
            "Bay leaves",
            "Thyme",
        ],
        &[
            "In a large pot, sauté onions until translucent.",
            "Add carrots and cook for 5 minutes.",
            "Add main ingredients and broth.",
            "Bring to a boil, then reduce heat and simmer.",
            "Add herbs and seasonings.",
            "Cook until all ingredients are tender, about 30 minutes.",
            "Serve with crusty bread.",
        ],
        "45 minutes",
        Difficulty::Medium,
        "This stew tastes even better the next day! Store in refrigerator.",
    )
}

fn power_salad(request: &RecipeGenerationRequest) -> Recipe {
    let dietary = &request.dietary_preference;
    build(
        request,
        format!("{dietary} Power Salad"),
        format!(
            "A nutrient-packed salad featuring {} with a zesty homemade dressing.",
            request.ingredients_joined()
        ),
        "1 handful",
        &[
            "Mixed greens",
            "1/4 cup nuts or seeds",
            "2 tablespoons olive oil",
            "1 tablespoon lemon juice",
            "Honey or maple syrup",
            "Dijon mustard",
        ],
        &[
            "Wash and prepare all fresh ingredients.",
            "Arrange greens in a large bowl.",
            "Add prepared main ingredients on top.",
            "Whisk together olive oil, lemon juice, honey, and mustard.",
            "Drizzle dressing over salad.",
            "Sprinkle with nuts or seeds.",
            "Toss gently and serve immediately.",
        ],
        "15 minutes",
        Difficulty::Easy,
        "Add protein like grilled chicken or chickpeas for a more filling meal.",
    )
}

fn mystery_delight(request: &RecipeGenerationRequest) -> Recipe {
    let dietary = &request.dietary_preference;
    build(
        request,
        format!("Mystery {dietary} Delight"),
        format!(
            "An unexpected and delightful creation using {} in a way you've never tried before!",
            request.ingredients_joined()
        ),
        "1 portion",
        &[
            "Secret spice blend",
            "A splash of creativity",
            "Unexpected ingredient combination",
        ],
        &[
            "Trust the process and embrace the mystery!",
            "Combine ingredients in an unusual but delicious way.",
            "Cook with intuition and taste as you go.",
            "Add the secret spice blend gradually.",
            "Present beautifully and surprise yourself!",
            "Take a photo - you might never recreate this exact magic again!",
        ],
        "20 minutes",
        Difficulty::Medium,
        "The best dishes come from experimentation. Don't be afraid to adjust!",
    )
}

#[allow(clippy::too_many_arguments)]
fn build(
    request: &RecipeGenerationRequest,
    name: String,
    description: String,
    portion: &str,
    pantry: &[&str],
    steps: &[&str],
    cook_time: &str,
    difficulty: Difficulty,
    tips: &str,
) -> Recipe {
    let ingredients = request
        .ingredients
        .iter()
        .map(|ing| format!("{portion} {ing}"))
        .chain(pantry.iter().map(|s| s.to_string()))
        .collect();

    Recipe {
        id: format!(
            "mock-{}-{}",
            slugify(&name),
            slugify(&request.ingredients_joined())
        ),
        name,
        description,
        ingredients,
        steps: steps.iter().map(|s| s.to_string()).collect(),
        cook_time: cook_time.to_string(),
        difficulty,
        tips: Some(tips.to_string()),
        dietary: Some(request.dietary_preference.clone()),
    }
}

/// Lowercase, alphanumerics kept, everything else collapsed to single dashes.
fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(surprise_me: bool) -> RecipeGenerationRequest {
        RecipeGenerationRequest::new(vec!["egg".to_string(), "tomato".to_string()], "Vegan")
            .surprise(surprise_me)
    }

    #[test]
    fn test_three_recipes_by_default() {
        let recipes = generate_mock_recipes(&request(false));
        let names: Vec<_> = recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Vegan Fusion Bowl", "Hearty Vegan Stew", "Vegan Power Salad"]
        );
        assert_eq!(recipes[1].cook_time, "45 minutes");
        assert_eq!(recipes[1].difficulty, Difficulty::Medium);
        assert_eq!(recipes[2].ingredients[0], "1 handful egg");
    }

    #[test]
    fn test_surprise_yields_one() {
        let recipes = generate_mock_recipes(&request(true));
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Mystery Vegan Delight");
        assert_eq!(recipes[0].ingredients[1], "1 portion tomato");
    }

    #[test]
    fn test_ids_unique_and_stable() {
        let first = generate_mock_recipes(&request(false));
        let second = generate_mock_recipes(&request(false));
        assert_eq!(first, second);

        let mut ids: Vec<_> = first.iter().map(|r| r.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert_eq!(first[0].id, "mock-vegan-fusion-bowl-egg-tomato");
    }

    #[test]
    fn test_ids_differ_across_ingredients() {
        let egg = generate_mock_recipes(&RecipeGenerationRequest::new(
            vec!["egg".to_string()],
            "Vegan",
        ));
        let rice = generate_mock_recipes(&RecipeGenerationRequest::new(
            vec!["rice".to_string()],
            "Vegan",
        ));

        assert_eq!(egg[0].name, rice[0].name);
        for (a, b) in egg.iter().zip(&rice) {
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_every_recipe_mentions_ingredients() {
        for recipe in generate_mock_recipes(&request(false)) {
            assert!(recipe.description.contains("egg, tomato"));
            assert!(recipe.ingredients.iter().any(|i| i.ends_with("egg")));
            assert!(recipe.ingredients.iter().any(|i| i.ends_with("tomato")));
            assert!(!recipe.steps.is_empty());
            assert_eq!(recipe.dietary.as_deref(), Some("Vegan"));
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hearty Gluten-Free Stew"), "hearty-gluten-free-stew");
        assert_eq!(slugify("  Mystery  None Delight!"), "mystery-none-delight");
    }
}
