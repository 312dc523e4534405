use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No JSON array found in model output")]
    NoArray,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("No usable recipes in model output")]
    NoRecipes,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access favorites storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode favorites: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("A recipe generation is already in progress")]
    Busy,
}
