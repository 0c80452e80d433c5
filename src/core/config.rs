use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

pub const DEFAULT_LOGIN_PATH: &str = "api/v4/users/login/";
pub const DEFAULT_MEDIA_PATH: &str = "api/v4/media/";
pub const DEFAULT_CATEGORIES_PATH: &str = "api/v4/categories/";

/// Process-wide client configuration: the portal base URL, the consumer
/// credential pair identifying this application, and the endpoint path
/// templates. Loaded once at startup; access tokens are obtained separately
/// through the login flow.
#[derive(Debug, Clone)]
pub struct DamConfig {
    pub base_url: String,
    pub consumer_key: Secret<String>,
    pub consumer_secret: Secret<String>,
    pub login_path: String,
    pub media_path: String,
    pub categories_path: String,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for DamConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("DamConfig", 6)?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("consumer_key", "[REDACTED]")?;
        state.serialize_field("consumer_secret", "[REDACTED]")?;
        state.serialize_field("login_path", &self.login_path)?;
        state.serialize_field("media_path", &self.media_path)?;
        state.serialize_field("categories_path", &self.categories_path)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for DamConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct DamConfigHelper {
            base_url: String,
            consumer_key: String,
            consumer_secret: String,
            login_path: Option<String>,
            media_path: Option<String>,
            categories_path: Option<String>,
        }

        let helper = DamConfigHelper::deserialize(deserializer)?;
        let mut config = Self::new(helper.base_url, helper.consumer_key, helper.consumer_secret);
        if let Some(path) = helper.login_path {
            config.login_path = path;
        }
        if let Some(path) = helper.media_path {
            config.media_path = path;
        }
        if let Some(path) = helper.categories_path {
            config.categories_path = path;
        }
        Ok(config)
    }
}

impl DamConfig {
    /// Create a new configuration with consumer credentials
    #[must_use]
    pub fn new(base_url: String, consumer_key: String, consumer_secret: String) -> Self {
        Self {
            base_url,
            consumer_key: Secret::new(consumer_key),
            consumer_secret: Secret::new(consumer_secret),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            media_path: DEFAULT_MEDIA_PATH.to_string(),
            categories_path: DEFAULT_CATEGORIES_PATH.to_string(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `DAM_BASE_URL`
    /// - `DAM_CONSUMER_KEY`
    /// - `DAM_CONSUMER_SECRET`
    /// - `DAM_LOGIN_PATH` (optional)
    /// - `DAM_MEDIA_PATH` (optional)
    /// - `DAM_CATEGORIES_PATH` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("DAM_BASE_URL")
            .map_err(|_| ConfigError::MissingEnvironmentVariable("DAM_BASE_URL".to_string()))?;
        let consumer_key = env::var("DAM_CONSUMER_KEY")
            .map_err(|_| ConfigError::MissingEnvironmentVariable("DAM_CONSUMER_KEY".to_string()))?;
        let consumer_secret = env::var("DAM_CONSUMER_SECRET").map_err(|_| {
            ConfigError::MissingEnvironmentVariable("DAM_CONSUMER_SECRET".to_string())
        })?;

        let mut config = Self::new(base_url, consumer_key, consumer_secret);
        if let Ok(path) = env::var("DAM_LOGIN_PATH") {
            config.login_path = path;
        }
        if let Ok(path) = env::var("DAM_MEDIA_PATH") {
            config.media_path = path;
        }
        if let Ok(path) = env::var("DAM_CATEGORIES_PATH") {
            config.categories_path = path;
        }

        Ok(config)
    }

    /// Create configuration from .env file and environment variables
    ///
    /// Loads environment variables from a .env file first (if it exists),
    /// then reads the configuration using the standard variable names.
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file() -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // .env file doesn't exist, continue with system env vars
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env()
    }

    /// Check if this configuration carries a usable consumer credential pair
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.consumer_key.expose_secret().is_empty()
            && !self.consumer_secret.expose_secret().is_empty()
    }

    /// Override the login endpoint path
    #[must_use]
    pub fn login_path(mut self, path: String) -> Self {
        self.login_path = path;
        self
    }

    /// Override the media endpoint path
    #[must_use]
    pub fn media_path(mut self, path: String) -> Self {
        self.media_path = path;
        self
    }

    /// Override the categories endpoint path
    #[must_use]
    pub fn categories_path(mut self, path: String) -> Self {
        self.categories_path = path;
        self
    }

    /// Get consumer key (use carefully - exposes secret)
    pub fn consumer_key(&self) -> &str {
        self.consumer_key.expose_secret()
    }

    /// Get consumer secret (use carefully - exposes secret)
    pub fn consumer_secret(&self) -> &str {
        self.consumer_secret.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
