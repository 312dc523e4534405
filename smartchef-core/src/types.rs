use serde::{Deserialize, Serialize};
use std::fmt;

/// Dietary preferences offered by the front end. The pipeline does not
/// enforce membership; any string is passed through to the prompt.
pub const DIETARY_OPTIONS: &[&str] = &[
    "None",
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Keto",
    "Mediterranean",
    "Low-Carb",
    "Dairy-Free",
];

/// Default dietary preference when the user picks nothing.
pub const DEFAULT_DIETARY_PREFERENCE: &str = "None";

/// How hard a recipe is to cook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: &'static [Difficulty] =
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Case-insensitive match against the three known labels.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated dish suggestion.
///
/// Field names serialize in camelCase so the same shape is used for the model
/// prompt, the model reply, and the favorites slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub cook_time: String,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<String>,
}

/// Input to the generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeGenerationRequest {
    pub ingredients: Vec<String>,
    pub dietary_preference: String,
    #[serde(default)]
    pub surprise_me: bool,
}

impl RecipeGenerationRequest {
    pub fn new(ingredients: Vec<String>, dietary_preference: impl Into<String>) -> Self {
        Self {
            ingredients,
            dietary_preference: dietary_preference.into(),
            surprise_me: false,
        }
    }

    pub fn surprise(mut self, surprise_me: bool) -> Self {
        self.surprise_me = surprise_me;
        self
    }

    /// Number of recipes the pipeline answers with.
    pub fn expected_count(&self) -> usize {
        if self.surprise_me {
            1
        } else {
            3
        }
    }

    /// Ingredients joined for display and prompt templating.
    pub fn ingredients_joined(&self) -> String {
        self.ingredients.join(", ")
    }
}

/// Ingredient entry list as the user builds it.
///
/// Entries are trimmed, blanks are ignored and exact duplicates are
/// suppressed, so the resulting request always holds distinct ingredients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientList {
    items: Vec<String>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient. Returns false if it was blank or already present.
    pub fn add(&mut self, ingredient: &str) -> bool {
        let trimmed = ingredient.trim();
        if trimmed.is_empty() || self.items.iter().any(|i| i == trimmed) {
            return false;
        }
        self.items.push(trimmed.to_string());
        true
    }

    /// Remove an ingredient. Returns false if it was not present.
    pub fn remove(&mut self, ingredient: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i != ingredient);
        self.items.len() != before
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Build a request, or None when nothing has been entered.
    pub fn into_request(
        self,
        dietary_preference: impl Into<String>,
        surprise_me: bool,
    ) -> Option<RecipeGenerationRequest> {
        if self.items.is_empty() {
            return None;
        }
        Some(RecipeGenerationRequest::new(self.items, dietary_preference).surprise(surprise_me))
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.add(item.as_ref());
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_case_insensitive() {
        assert_eq!(Difficulty::parse("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse(" HARD "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("Medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("Expert"), None);
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let recipe = Recipe {
            id: "1".to_string(),
            name: "Toast".to_string(),
            description: "Bread, but warmer".to_string(),
            ingredients: vec!["1 slice bread".to_string()],
            steps: vec!["Toast it.".to_string()],
            cook_time: "3 minutes".to_string(),
            difficulty: Difficulty::Easy,
            tips: None,
            dietary: Some("Vegan".to_string()),
        };

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["cookTime"], "3 minutes");
        assert_eq!(json["difficulty"], "Easy");
        assert!(json.get("tips").is_none());
    }

    #[test]
    fn test_ingredient_list_dedup_and_trim() {
        let mut list = IngredientList::new();
        assert!(list.add(" egg "));
        assert!(!list.add("egg"));
        assert!(!list.add("   "));
        assert!(list.add("tomato"));
        assert_eq!(list.items(), &["egg".to_string(), "tomato".to_string()]);

        assert!(list.remove("egg"));
        assert!(!list.remove("egg"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_empty_ingredient_list_has_no_request() {
        assert!(IngredientList::new().into_request("Vegan", false).is_none());

        let request = ["egg", "egg", "rice"]
            .into_iter()
            .collect::<IngredientList>()
            .into_request("Keto", true)
            .unwrap();
        assert_eq!(request.ingredients, vec!["egg", "rice"]);
        assert!(request.surprise_me);
        assert_eq!(request.expected_count(), 1);
    }
}
