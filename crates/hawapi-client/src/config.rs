//! Client configuration and builder pattern.

use crate::error::{ClientError, Result};
use std::fmt;
use std::time::Duration;

/// Default HawAPI instance.
pub const DEFAULT_ENDPOINT: &str = "https://hawapi.theproject.id/api";

/// Default API version.
pub const DEFAULT_VERSION: &str = "v1";

/// Default content language. Requests using it omit the `language` parameter.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default page size. Requests using it omit the `size` parameter.
pub const DEFAULT_SIZE: u32 = 10;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the HawAPI client.
///
/// # Security
///
/// The `Debug` implementation masks the token to prevent accidental exposure
/// in logs. The token is shown as `"***REDACTED***"` in debug output.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the HawAPI instance (e.g., "https://hawapi.theproject.id/api")
    pub endpoint: String,
    /// API version path segment (default: "v1")
    pub version: String,
    /// Language of items for all requests (default: "en-US")
    pub language: String,
    /// Page size for all requests (default: 10)
    pub size: u32,
    /// Timeout applied to every request (default: 10 seconds)
    pub timeout: Duration,
    /// Optional JWT. Requests are anonymous when unset.
    pub token: Option<String>,
    /// Whether successful GET results are cached in memory (default: true)
    pub use_in_memory_cache: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            size: DEFAULT_SIZE,
            timeout: DEFAULT_TIMEOUT,
            token: None,
            use_in_memory_cache: true,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("version", &self.version)
            .field("language", &self.language)
            .field("size", &self.size)
            .field("timeout", &self.timeout)
            .field("token", &self.token.as_ref().map(|_| "***REDACTED***"))
            .field("use_in_memory_cache", &self.use_in_memory_cache)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration builder seeded with the defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Minimum allowed timeout value.
    pub const MIN_TIMEOUT: Duration = Duration::from_millis(100);

    /// Returns the configured token, treating an empty string as absent.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(ClientError::Config("endpoint cannot be empty".to_string()));
        }

        url::Url::parse(&self.endpoint)
            .map_err(|e| ClientError::Config(format!("Invalid endpoint: {}", e)))?;

        if self.version.is_empty() {
            return Err(ClientError::Config("version cannot be empty".to_string()));
        }

        if self.timeout < Self::MIN_TIMEOUT {
            return Err(ClientError::Config(format!(
                "timeout ({:?}) must be >= {:?}",
                self.timeout,
                Self::MIN_TIMEOUT
            )));
        }

        Ok(())
    }

    /// Merge `overrides` into this configuration.
    ///
    /// Only set, non-empty and non-zero values replace the current ones.
    pub fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(endpoint) = overrides.endpoint.filter(|v| !v.is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(version) = overrides.version.filter(|v| !v.is_empty()) {
            self.version = version;
        }
        if let Some(language) = overrides.language.filter(|v| !v.is_empty()) {
            self.language = language;
        }
        if let Some(size) = overrides.size.filter(|v| *v != 0) {
            self.size = size;
        }
        if let Some(timeout) = overrides.timeout.filter(|v| !v.is_zero()) {
            self.timeout = timeout;
        }
        if let Some(token) = overrides.token {
            self.token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(use_cache) = overrides.use_in_memory_cache {
            self.use_in_memory_cache = use_cache;
        }
    }
}

/// Partial configuration applied to a live client.
///
/// See [`HawApiClient::apply_overrides`](crate::HawApiClient::apply_overrides).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub version: Option<String>,
    pub language: Option<String>,
    pub size: Option<u32>,
    pub timeout: Option<Duration>,
    /// `Some("")` removes the current token.
    pub token: Option<String>,
    pub use_in_memory_cache: Option<bool>,
}

/// Builder for client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the API version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Set the language used by every request.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = language.into();
        self
    }

    /// Set the page size used by every request.
    pub fn size(mut self, size: u32) -> Self {
        self.config.size = size;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the token used for authentication.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Enable or disable the in-memory cache.
    pub fn use_in_memory_cache(mut self, enabled: bool) -> Self {
        self.config.use_in_memory_cache = enabled;
        self
    }

    /// Disable caching entirely.
    pub fn no_cache(self) -> Self {
        self.use_in_memory_cache(false)
    }

    /// Build the configuration, validating all settings.
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
