//! Golden file tests for model response resolution.
//!
//! Each JSON file in `fixtures/model_responses/` holds a request, the raw
//! assistant message text, and the recipes the resolver should settle on.
//!
//! Test format:
//! ```json
//! {
//!   "request": { "ingredients": ["egg"], "dietaryPreference": "Vegan" },
//!   "content": "prose [ {...} ] prose",
//!   "expected": { "source": "model", "names": [...], "difficulties": [...] }
//! }
//! ```

use glob::glob;
use serde::Deserialize;
use smartchef_core::ai::{ChatResponse, Usage};
use smartchef_core::{resolve_response, Difficulty, Outcome, RecipeGenerationRequest};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A test case loaded from a JSON fixture file
#[derive(Debug, Deserialize)]
struct TestCase {
    request: RecipeGenerationRequest,
    content: String,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct Expected {
    /// "model" or "fallback"
    source: String,
    names: Vec<String>,
    difficulties: Vec<Difficulty>,
}

fn fixture_paths() -> Vec<PathBuf> {
    let pattern = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/model_responses/*.json")
        .to_string_lossy()
        .into_owned();

    let paths: Vec<PathBuf> = glob(&pattern)
        .expect("Invalid glob pattern")
        .filter_map(Result::ok)
        .collect();

    assert!(!paths.is_empty(), "No fixtures found for {}", pattern);
    paths
}

fn load(path: &Path) -> TestCase {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

#[test]
fn test_resolver_golden_files() {
    let mut failures = Vec::new();

    for path in fixture_paths() {
        let name = path.file_stem().unwrap().to_string_lossy().into_owned();
        let case = load(&path);

        let response = ChatResponse {
            content: case.content.clone(),
            usage: Usage::default(),
        };
        let outcome = resolve_response(&case.request, Ok(response), 1_700_000_000_000);

        let source = match &outcome {
            Outcome::RealModel(_) => "model",
            Outcome::Fallback { .. } => "fallback",
        };
        let names: Vec<String> = outcome.recipes().iter().map(|r| r.name.clone()).collect();
        let difficulties: Vec<Difficulty> =
            outcome.recipes().iter().map(|r| r.difficulty).collect();

        if source != case.expected.source
            || names != case.expected.names
            || difficulties != case.expected.difficulties
        {
            failures.push(format!(
                "{}: got {} {:?} {:?}, expected {} {:?} {:?}",
                name,
                source,
                names,
                difficulties,
                case.expected.source,
                case.expected.names,
                case.expected.difficulties
            ));
        }
    }

    assert!(failures.is_empty(), "Golden mismatches:\n{}", failures.join("\n"));
}

#[test]
fn test_every_resolved_recipe_is_complete() {
    for path in fixture_paths() {
        let case = load(&path);
        let response = ChatResponse {
            content: case.content,
            usage: Usage::default(),
        };
        let outcome = resolve_response(&case.request, Ok(response), 1_700_000_000_000);

        assert!(!outcome.recipes().is_empty(), "{}", path.display());
        if case.request.surprise_me {
            assert_eq!(outcome.recipes().len(), 1, "{}", path.display());
        }

        let mut ids = HashSet::new();
        for recipe in outcome.recipes() {
            assert!(!recipe.id.is_empty(), "{}", path.display());
            assert!(ids.insert(recipe.id.clone()), "duplicate id in {}", path.display());
            assert!(!recipe.ingredients.is_empty(), "{}", path.display());
            assert!(!recipe.steps.is_empty(), "{}", path.display());
            assert!(recipe.dietary.is_some(), "{}", path.display());
        }
    }
}
