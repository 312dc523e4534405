//! Recipe generation pipeline.
//!
//! A request is turned into a chat completion call, the reply is parsed into
//! recipes, and every failure along the way degrades to the offline
//! generator. Callers always get a displayable, non-empty list; the
//! [`Outcome`] tells them whether it came from the model.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::ai::prompts::{render_generate_recipes_prompt, GENERATE_RECIPES_PROMPT_NAME};
use crate::ai::{AiClient, AiConfig, AiError, ChatMessage, ChatRequest, ChatResponse};
use crate::error::{ExtractError, GenerateError};
use crate::extract::parse_json_array;
use crate::mock::generate_mock_recipes;
use crate::types::{Difficulty, Recipe, RecipeGenerationRequest};

/// Sampling temperature; favors variety over determinism.
pub const GENERATION_TEMPERATURE: f32 = 0.8;

/// Upper bound on reply length.
pub const GENERATION_MAX_TOKENS: u32 = 2000;

/// Why the offline generator answered instead of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The request never got a response.
    NetworkFailure(String),
    /// HTTP 429.
    RateLimited,
    /// Any other non-success HTTP status.
    HttpStatus(u16),
    /// The reply had no usable recipe array, or the envelope was unreadable.
    MalformedOutput(String),
    /// The remote model is disabled.
    Offline,
}

impl FallbackReason {
    /// Whether the fallback is delayed to keep perceived latency consistent.
    ///
    /// Transport-level failures are delayed; a malformed reply already paid
    /// for a real round trip, and offline mode never makes one.
    pub fn is_delayed(&self) -> bool {
        matches!(
            self,
            FallbackReason::NetworkFailure(_)
                | FallbackReason::RateLimited
                | FallbackReason::HttpStatus(_)
        )
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NetworkFailure(e) => write!(f, "network failure: {e}"),
            FallbackReason::RateLimited => f.write_str("rate limited"),
            FallbackReason::HttpStatus(status) => write!(f, "HTTP {status}"),
            FallbackReason::MalformedOutput(e) => write!(f, "malformed model output: {e}"),
            FallbackReason::Offline => f.write_str("offline"),
        }
    }
}

impl From<AiError> for FallbackReason {
    fn from(e: AiError) -> Self {
        match e {
            AiError::Network(msg) => FallbackReason::NetworkFailure(msg),
            AiError::RateLimited { .. } => FallbackReason::RateLimited,
            AiError::Api { status, .. } => FallbackReason::HttpStatus(status),
            AiError::ParseError(msg) => FallbackReason::MalformedOutput(msg),
            AiError::Offline => FallbackReason::Offline,
        }
    }
}

/// Result of a generation: model recipes, or offline recipes and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    RealModel(Vec<Recipe>),
    Fallback {
        recipes: Vec<Recipe>,
        reason: FallbackReason,
    },
}

impl Outcome {
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            Outcome::RealModel(recipes) => recipes,
            Outcome::Fallback { recipes, .. } => recipes,
        }
    }

    pub fn into_recipes(self) -> Vec<Recipe> {
        match self {
            Outcome::RealModel(recipes) => recipes,
            Outcome::Fallback { recipes, .. } => recipes,
        }
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Outcome::RealModel(_) => None,
            Outcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_reason().is_some()
    }
}

/// Build the chat completion request for a generation request.
///
/// Emptiness of the ingredient list is the caller's concern.
pub fn build_generation_request(request: &RecipeGenerationRequest) -> ChatRequest {
    ChatRequest {
        messages: vec![ChatMessage::user(render_generate_recipes_prompt(request))],
        temperature: Some(GENERATION_TEMPERATURE),
        max_tokens: Some(GENERATION_MAX_TOKENS),
    }
}

/// Recipe as the model writes it. Everything is optional; [`normalize_batch`]
/// decides what survives.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelRecipe {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default, alias = "cook_time")]
    cook_time: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    tips: Option<String>,
    #[serde(default)]
    dietary: Option<String>,
}

impl ModelRecipe {
    fn id(&self) -> Option<String> {
        match &self.id {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Parse the model's reply text into recipes.
///
/// `batch_stamp` seeds identifiers for recipes without a usable id; pass the
/// current time in milliseconds.
pub fn parse_model_recipes(
    content: &str,
    request: &RecipeGenerationRequest,
    batch_stamp: i64,
) -> Result<Vec<Recipe>, ExtractError> {
    let values: Vec<serde_json::Value> = parse_json_array(content)?;

    let parsed: Vec<(usize, ModelRecipe)> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(recipe) => Some((index, recipe)),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable recipe in model output");
                None
            }
        })
        .collect();

    let recipes = normalize_batch(parsed, request, batch_stamp);
    if recipes.is_empty() {
        return Err(ExtractError::NoRecipes);
    }
    Ok(recipes)
}

fn normalize_batch(
    parsed: Vec<(usize, ModelRecipe)>,
    request: &RecipeGenerationRequest,
    batch_stamp: i64,
) -> Vec<Recipe> {
    let mut seen_ids = HashSet::new();
    let mut recipes = Vec::with_capacity(parsed.len());

    for (index, raw) in parsed {
        if raw.ingredients.is_empty() || raw.steps.is_empty() {
            tracing::warn!(index, "Skipping model recipe without ingredients or steps");
            continue;
        }

        let id = match raw.id() {
            Some(id) if !seen_ids.contains(&id) => id,
            _ => format!("recipe-{batch_stamp}-{index}"),
        };
        seen_ids.insert(id.clone());

        let difficulty = match raw.difficulty.as_deref().and_then(Difficulty::parse) {
            Some(d) => d,
            None => {
                tracing::warn!(
                    index,
                    difficulty = ?raw.difficulty,
                    "Unknown difficulty in model output, using Medium"
                );
                Difficulty::default()
            }
        };

        recipes.push(Recipe {
            id,
            name: raw.name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            ingredients: raw.ingredients,
            steps: raw.steps,
            cook_time: raw.cook_time.unwrap_or_default(),
            difficulty,
            tips: raw.tips.filter(|t| !t.trim().is_empty()),
            dietary: raw
                .dietary
                .filter(|d| !d.trim().is_empty())
                .or_else(|| Some(request.dietary_preference.clone())),
        });
    }

    if request.surprise_me {
        recipes.truncate(1);
    }
    recipes
}

/// Classify the result of the remote call into an [`Outcome`].
///
/// Pure: no delay is applied here. See [`generate_recipes`].
pub fn resolve_response(
    request: &RecipeGenerationRequest,
    result: Result<ChatResponse, AiError>,
    batch_stamp: i64,
) -> Outcome {
    let reason = match result {
        Ok(response) => match parse_model_recipes(&response.content, request, batch_stamp) {
            Ok(recipes) => return Outcome::RealModel(recipes),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse API response, using mock recipes");
                FallbackReason::MalformedOutput(e.to_string())
            }
        },
        Err(AiError::RateLimited { retry_after_secs }) => {
            tracing::warn!(?retry_after_secs, "API rate limit exceeded, using mock recipes");
            FallbackReason::RateLimited
        }
        Err(AiError::Offline) => FallbackReason::Offline,
        Err(e) => {
            tracing::warn!(error = %e, "API request failed, using mock recipes");
            FallbackReason::from(e)
        }
    };

    Outcome::Fallback {
        recipes: generate_mock_recipes(request),
        reason,
    }
}

/// Run the full pipeline once. Never fails.
///
/// Delayed fallbacks (see [`FallbackReason::is_delayed`]) sleep for
/// `fallback_delay` before answering.
pub async fn generate_recipes(
    client: &dyn AiClient,
    request: &RecipeGenerationRequest,
    fallback_delay: Duration,
) -> Outcome {
    let chat_request = build_generation_request(request);

    tracing::debug!(
        prompt_name = GENERATE_RECIPES_PROMPT_NAME,
        model = client.model_name(),
        ingredients = request.ingredients.len(),
        surprise_me = request.surprise_me,
        "Generating recipes"
    );

    let result = client.complete(chat_request).await;
    let batch_stamp = chrono::Utc::now().timestamp_millis();
    let outcome = resolve_response(request, result, batch_stamp);

    if let Some(reason) = outcome.fallback_reason() {
        if reason.is_delayed() && !fallback_delay.is_zero() {
            tokio::time::sleep(fallback_delay).await;
        }
    }

    outcome
}

/// Generation entry point for one logical session.
///
/// Allows a single generation in flight; overlapping calls are rejected with
/// [`GenerateError::Busy`] without contacting the model.
#[derive(Debug)]
pub struct RecipeGenerator {
    client: Box<dyn AiClient>,
    fallback_delay: Duration,
    in_flight: Mutex<()>,
}

impl RecipeGenerator {
    pub fn new(client: Box<dyn AiClient>, fallback_delay: Duration) -> Self {
        Self {
            client,
            fallback_delay,
            in_flight: Mutex::new(()),
        }
    }

    /// Create a generator from configuration.
    pub fn from_config(config: &AiConfig) -> Result<Self, crate::ai::ConfigError> {
        Ok(Self::new(
            crate::ai::client_from_config(config)?,
            config.fallback_delay,
        ))
    }

    pub async fn generate(
        &self,
        request: &RecipeGenerationRequest,
    ) -> Result<Outcome, GenerateError> {
        let _guard = self.in_flight.try_lock().map_err(|_| {
            tracing::warn!("Rejecting generation request, another one is in flight");
            GenerateError::Busy
        })?;

        Ok(generate_recipes(self.client.as_ref(), request, self.fallback_delay).await)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}
