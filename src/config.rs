use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Host a recipe URL must belong to
    #[serde(default = "default_allowed_host")]
    pub allowed_host: String,
}

/// Settings for the recipe scraping API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the scraping API; requests go to `{base_url}/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout: default_timeout(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            allowed_host: default_allowed_host(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://recipes-api-production-6853.up.railway.app".to_string()
}

fn default_user_agent() -> String {
    "CraveIt-Recipe-App/1.0".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_allowed_host() -> String {
    "allrecipes.com".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CRAVEIT__ prefix
    /// 2. craveit.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CRAVEIT__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from an optional `craveit.toml` and `CRAVEIT__` variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("craveit").required(false))
        // Use double underscore for nested: CRAVEIT__API__TIMEOUT
        .add_source(
            Environment::with_prefix("CRAVEIT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
