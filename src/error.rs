use serde_json::json;
use thiserror::Error;

/// Errors that can occur while fetching or preparing a recipe
#[derive(Error, Debug)]
pub enum CraveError {
    /// Transport failure talking to the recipe API
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The recipe API answered with something that is not valid JSON
    #[error("Failed to decode recipe: {0}")]
    JsonError(#[from] serde_json::Error),

    /// No recipe URL was given
    #[error("URL parameter is required")]
    MissingUrl,

    /// The URL does not point at AllRecipes
    #[error("Please provide a valid AllRecipes.com URL")]
    InvalidUrl(String),

    /// The recipe API rate limited us
    #[error("Rate limit exceeded. Please wait a moment before trying again.")]
    RateLimited,

    /// The recipe API returned a non-success status
    #[error("Failed to fetch recipe: {reason}")]
    UpstreamStatus { status: u16, reason: String },

    /// The recipe API returned JSON without the required fields
    #[error("Invalid recipe data received from external API")]
    InvalidRecipe(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl CraveError {
    /// HTTP status the recipe proxy reports for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CraveError::MissingUrl | CraveError::InvalidUrl(_) | CraveError::BuilderError(_) => {
                400
            }
            CraveError::RateLimited => 429,
            CraveError::UpstreamStatus { status, .. } => *status,
            CraveError::FetchError(_)
            | CraveError::JsonError(_)
            | CraveError::InvalidRecipe(_)
            | CraveError::ConfigError(_) => 500,
        }
    }

    /// Error object in the shape the proxy returns: `{ "error": "..." }`
    pub fn to_json(&self) -> serde_json::Value {
        json!({ "error": self.to_string() })
    }
}
