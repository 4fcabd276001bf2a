pub mod builder;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod model;
pub mod scaling;
pub mod servings;
pub mod shopping;
pub mod timer;
pub mod timing;

use std::time::Duration;

pub use builder::{
    prepare_recipe, CraveIt, CraveItBuilder, InputSource, PreparedRecipe, PreparedStep,
};
pub use config::AppConfig;
pub use error::CraveError;
pub use fetchers::{validate_allrecipes_url, RecipeApiClient, RecipeSource};
pub use model::{IngredientSection, Recipe, RecipeDetails, RecipeNutrition, RecipeStep};
pub use scaling::scale_ingredient;
pub use shopping::ShoppingList;
pub use timer::KitchenTimer;
pub use timing::{detect_timing_in_text, format_time_display, DetectedTime};

/// Fetch a recipe through the recipe API using the loaded configuration
pub async fn fetch_recipe(url: &str) -> Result<Recipe, CraveError> {
    fetch_recipe_with_timeout(url, None).await
}

pub async fn fetch_recipe_with_timeout(
    url: &str,
    timeout: Option<Duration>,
) -> Result<Recipe, CraveError> {
    let config = AppConfig::load()?;
    RecipeApiClient::new(&config, timeout)?.fetch(url).await
}
