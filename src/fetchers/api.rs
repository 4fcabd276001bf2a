use async_trait::async_trait;
use html_escape::decode_html_entities;
use log::{debug, error, info, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use super::{is_allowed_url, RecipeSource};
use crate::config::AppConfig;
use crate::error::CraveError;
use crate::model::Recipe;

/// Client for the recipe scraping API that sits in front of AllRecipes
pub struct RecipeApiClient {
    client: Client,
    base_url: String,
    allowed_host: String,
}

impl RecipeApiClient {
    /// Build a client from configuration. `timeout` overrides the configured one.
    pub fn new(config: &AppConfig, timeout: Option<Duration>) -> Result<Self, CraveError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(config.api.timeout));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.api.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            allowed_host: config.allowed_host.clone(),
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<Recipe, CraveError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(CraveError::MissingUrl);
        }
        if !is_allowed_url(url, &self.allowed_host) {
            return Err(CraveError::InvalidUrl(url.to_string()));
        }

        let endpoint = format!("{}/api", self.base_url);
        debug!("Fetching recipe from: {}?url={}", endpoint, url);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Recipe API rate limited the request for {}", url);
            return Err(CraveError::RateLimited);
        }
        if !status.is_success() {
            error!("API Response not OK: {}", status);
            return Err(CraveError::UpstreamStatus {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)?;
        check_required_fields(&data)?;

        let mut recipe: Recipe = serde_json::from_value(data)
            .map_err(|e| CraveError::InvalidRecipe(e.to_string()))?;
        decode_recipe_text(&mut recipe);

        info!("Fetched recipe '{}'", recipe.title);
        debug!("{:#?}", recipe);
        Ok(recipe)
    }
}

#[async_trait]
impl RecipeSource for RecipeApiClient {
    async fn fetch(&self, url: &str) -> Result<Recipe, CraveError> {
        RecipeApiClient::fetch(self, url).await
    }
}

/// A usable response needs a title plus ingredients and steps
fn check_required_fields(data: &Value) -> Result<(), CraveError> {
    let title = data.get("title").and_then(Value::as_str).unwrap_or_default();
    if title.is_empty() {
        return Err(CraveError::InvalidRecipe("missing title".to_string()));
    }
    for field in ["ingredients", "steps"] {
        if data.get(field).map_or(true, Value::is_null) {
            return Err(CraveError::InvalidRecipe(format!("missing {field}")));
        }
    }
    Ok(())
}

fn decode_html_symbols(text: &str) -> String {
    // scraped text is sometimes escaped twice
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn decode_recipe_text(recipe: &mut Recipe) {
    recipe.title = decode_html_symbols(&recipe.title);
    for section in &mut recipe.ingredients {
        section.name = decode_html_symbols(&section.name);
        for item in &mut section.items {
            *item = decode_html_symbols(item);
        }
    }
    for step in &mut recipe.steps {
        step.instruction = decode_html_symbols(&step.instruction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_fields() {
        let ok = json!({"title": "Soup", "ingredients": {}, "steps": []});
        assert!(check_required_fields(&ok).is_ok());

        let no_title = json!({"title": "", "ingredients": {}, "steps": []});
        assert!(matches!(
            check_required_fields(&no_title),
            Err(CraveError::InvalidRecipe(_))
        ));

        let no_steps = json!({"title": "Soup", "ingredients": {}});
        assert!(matches!(
            check_required_fields(&no_steps),
            Err(CraveError::InvalidRecipe(msg)) if msg == "missing steps"
        ));

        let null_ingredients = json!({"title": "Soup", "ingredients": null, "steps": []});
        assert!(check_required_fields(&null_ingredients).is_err());
    }

    #[test]
    fn test_decode_html_symbols() {
        assert_eq!(decode_html_symbols("Mom&#39;s Chili"), "Mom's Chili");
        assert_eq!(decode_html_symbols("salt &amp;amp; pepper"), "salt & pepper");
    }
}
