use log::debug;
use serde::Serialize;
use std::time::Duration;

use crate::config::AppConfig;
use crate::fetchers::{RecipeApiClient, RecipeSource};
use crate::model::{IngredientSection, Recipe};
use crate::scaling::scale_ingredient;
use crate::servings::{parse_servings, scale_factor};
use crate::shopping::ShoppingList;
use crate::timing::{detect_timing_in_text, DetectedTime};
use crate::CraveError;

/// Where the recipe comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch the recipe from an AllRecipes URL through the recipe API
    Url(String),
    /// Use a recipe that is already loaded
    Recipe(Recipe),
}

/// A recipe ready for display: quantities scaled, step timers detected
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedRecipe {
    /// The recipe as fetched
    pub recipe: Recipe,
    /// Servings the recipe was written for, when they can be read
    pub original_servings: Option<f64>,
    /// Servings the quantities are scaled to
    pub servings: Option<f64>,
    pub scale_factor: f64,
    /// Ingredient sections with every line scaled
    pub ingredients: Vec<IngredientSection>,
    pub steps: Vec<PreparedStep>,
}

/// A step with the timer suggested by its text
#[derive(Debug, Clone, Serialize)]
pub struct PreparedStep {
    pub number: u32,
    pub instruction: String,
    pub image: String,
    pub timer: Option<DetectedTime>,
}

impl PreparedRecipe {
    /// Shopping list of the scaled ingredients
    pub fn shopping_list(&self) -> ShoppingList {
        ShoppingList::from_sections(&self.ingredients)
    }

    /// Whether a servings control makes sense for this recipe
    pub fn is_scalable(&self) -> bool {
        self.original_servings.is_some()
    }
}

/// Scale `recipe` to `target_servings` and detect a timer for each step.
///
/// Without a target the quantities are left as written.
pub fn prepare_recipe(
    recipe: Recipe,
    target_servings: Option<u32>,
) -> Result<PreparedRecipe, CraveError> {
    let original_servings = parse_servings(&recipe.details.servings);

    let factor = match target_servings {
        None => 1.0,
        Some(target) => {
            let original = original_servings.ok_or_else(|| {
                CraveError::BuilderError(format!(
                    "Cannot scale recipe: servings '{}' is not a number",
                    recipe.details.servings
                ))
            })?;
            scale_factor(original, f64::from(target)).ok_or_else(|| {
                CraveError::BuilderError(format!("Cannot scale to {target} servings"))
            })?
        }
    };
    debug!("Preparing '{}' with scale factor {}", recipe.title, factor);

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|section| IngredientSection {
            name: section.name.clone(),
            items: section
                .items
                .iter()
                .map(|line| scale_ingredient(line, factor))
                .collect(),
        })
        .collect();

    let steps = recipe
        .steps
        .iter()
        .map(|step| PreparedStep {
            number: step.number,
            instruction: step.instruction.clone(),
            image: step.image.clone(),
            timer: detect_timing_in_text(&step.instruction),
        })
        .collect();

    Ok(PreparedRecipe {
        servings: target_servings.map(f64::from).or(original_servings),
        original_servings,
        scale_factor: factor,
        ingredients,
        steps,
        recipe,
    })
}

/// Builder for fetching and preparing a recipe
#[derive(Default)]
pub struct CraveItBuilder {
    source: Option<InputSource>,
    servings: Option<u32>,
    timeout: Option<Duration>,
    config: Option<AppConfig>,
    fetcher: Option<Box<dyn RecipeSource>>,
}

impl CraveItBuilder {
    /// Fetch the recipe from an AllRecipes URL
    ///
    /// # Example
    /// ```
    /// use craveit::CraveIt;
    ///
    /// let builder = CraveIt::builder()
    ///     .url("https://www.allrecipes.com/recipe/20144/banana-banana-bread/");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Prepare a recipe that is already loaded
    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.source = Some(InputSource::Recipe(recipe));
        self
    }

    /// Scale ingredient quantities to this many servings
    ///
    /// # Example
    /// ```
    /// use craveit::CraveIt;
    ///
    /// let builder = CraveIt::builder()
    ///     .url("https://www.allrecipes.com/recipe/20144/banana-banana-bread/")
    ///     .servings(4);
    /// ```
    pub fn servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings);
        self
    }

    /// Set a timeout for the recipe API request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Use this configuration instead of loading `craveit.toml` and the environment
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Fetch recipes through a custom source instead of the recipe API
    pub fn fetcher(mut self, fetcher: impl RecipeSource + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Fetch (if needed) and prepare the recipe
    ///
    /// # Errors
    /// Returns `CraveError` if:
    /// - No input source was specified
    /// - Zero servings were requested
    /// - The URL is not an AllRecipes URL or the fetch fails
    /// - Servings were requested but the recipe's servings cannot be read
    ///
    /// # Example
    /// ```no_run
    /// # use craveit::CraveIt;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let prepared = CraveIt::builder()
    ///     .url("https://www.allrecipes.com/recipe/20144/banana-banana-bread/")
    ///     .servings(20)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<PreparedRecipe, CraveError> {
        let source = self.source.ok_or_else(|| {
            CraveError::BuilderError(
                "No input source specified. Use .url() or .recipe()".to_string(),
            )
        })?;

        if self.servings == Some(0) {
            return Err(CraveError::BuilderError(
                "Servings must be at least 1".to_string(),
            ));
        }

        let recipe = match source {
            InputSource::Url(url) => match self.fetcher {
                Some(fetcher) => fetcher.fetch(&url).await?,
                None => {
                    let config = match self.config {
                        Some(config) => config,
                        None => AppConfig::load()?,
                    };
                    RecipeApiClient::new(&config, self.timeout)?
                        .fetch(&url)
                        .await?
                }
            },
            InputSource::Recipe(recipe) => recipe,
        };

        prepare_recipe(recipe, self.servings)
    }
}

/// Main entry point for the builder API
pub struct CraveIt;

impl CraveIt {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use craveit::CraveIt;
    ///
    /// let builder = CraveIt::builder();
    /// ```
    pub fn builder() -> CraveItBuilder {
        CraveItBuilder::default()
    }
}
