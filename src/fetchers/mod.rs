mod api;

pub use api::RecipeApiClient;

use async_trait::async_trait;
use url::Url;

use crate::error::CraveError;
use crate::model::Recipe;

/// Host every recipe URL has to belong to unless configured otherwise
pub const ALLRECIPES_HOST: &str = "allrecipes.com";

/// Anything that can turn a recipe page URL into a [`Recipe`]
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Recipe, CraveError>;
}

/// Whether `url` parses and points at AllRecipes
pub fn validate_allrecipes_url(url: &str) -> bool {
    is_allowed_url(url, ALLRECIPES_HOST)
}

/// Whether `url` parses and its host contains `allowed_host`
pub fn is_allowed_url(url: &str, allowed_host: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.contains(allowed_host)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_allrecipes_url() {
        assert!(validate_allrecipes_url(
            "https://www.allrecipes.com/recipe/20144/banana-banana-bread/"
        ));
        assert!(validate_allrecipes_url("http://allrecipes.com/recipe/1"));
        assert!(!validate_allrecipes_url("https://www.bbcgoodfood.com/recipes/pie"));
        assert!(!validate_allrecipes_url("allrecipes.com/recipe/1"));
        assert!(!validate_allrecipes_url(""));
    }

    #[test]
    fn test_host_is_checked_not_path() {
        assert!(!validate_allrecipes_url(
            "https://example.com/allrecipes.com/recipe/1"
        ));
    }

    #[test]
    fn test_custom_allowed_host() {
        assert!(is_allowed_url("http://recipes.test/recipe/1", "recipes.test"));
        assert!(!is_allowed_url("http://recipes.test/recipe/1", ALLRECIPES_HOST));
    }
}
