//! HTTP client with request execution and response caching.

use crate::cache::{Cache, CacheEntry, MemoryCache};
use crate::config::{ClientConfig, ConfigOverrides};
use crate::error::{ApiErrorBody, ClientError, Result};
use crate::headers::extract_headers;
use crate::query::Query;
use crate::types::{BaseResponse, Info, ItemResponse, ListResponse, Overview};
use crate::url_builder::build_url;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Path of the catalog overview endpoint.
const OVERVIEW_PATH: &str = "overview";

/// HawAPI HTTP client with an optional in-memory response cache.
pub struct HawApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    cache: Arc<dyn Cache>,
}

/// Status, headers and full body of a response whose status matched.
#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HawApiClient {
    /// Create a new client builder seeded with the defaults.
    pub fn builder() -> crate::config::ClientConfigBuilder {
        crate::config::ClientConfigBuilder::new()
    }

    /// Create a new client with the given configuration and an unbounded
    /// [`MemoryCache`].
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_cache(config, Arc::new(MemoryCache::new()))
    }

    /// Create a new client backed by a custom cache.
    pub fn with_cache(config: ClientConfig, cache: Arc<dyn Cache>) -> Result<Self> {
        config.validate()?;
        let http = Self::build_http(&config)?;

        Ok(Self {
            http,
            config,
            cache,
        })
    }

    fn build_http(config: &ClientConfig) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("hawapi-client/", env!("CARGO_PKG_VERSION"))),
        );

        // Token is optional
        if let Some(token) = config.token() {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::InvalidArgument("Invalid token format".to_string()))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;
        Ok(http)
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Set or override configuration values on a live client.
    ///
    /// Unset, empty and zero values in `overrides` are ignored. The transport
    /// is rebuilt so a new token or timeout applies to the next request.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) -> Result<()> {
        let mut config = self.config.clone();
        config.merge(overrides);
        config.validate()?;

        self.http = Self::build_http(&config)?;
        self.config = config;
        tracing::debug!(config = ?self.config, "Client configuration updated");
        Ok(())
    }

    /// Build the canonical URL for `path`. See [`build_url`].
    pub fn build_url(&self, path: &str, query: Option<&Query>) -> String {
        build_url(&self.config, path, query)
    }

    // =========================================================================
    // Info & Overview
    // =========================================================================

    /// Fetch API information from the root endpoint.
    pub async fn info(&self) -> Result<Info> {
        let response = self
            .send(Method::GET, &self.config.endpoint, None, StatusCode::OK)
            .await?;
        decode(&response.body)
    }

    /// Fetch the catalog overview.
    pub async fn overview(&self, query: &Query) -> Result<ItemResponse<Overview>> {
        let (data, base) = self.get(OVERVIEW_PATH, query, true).await?;
        Ok(ItemResponse { base, data })
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// List the entities under `path`.
    pub async fn list_resource<T>(&self, path: &str, query: &Query) -> Result<ListResponse<T>>
    where
        T: DeserializeOwned + Serialize,
    {
        let (data, base) = self.get(path, query, true).await?;
        Ok(ListResponse { base, data })
    }

    /// Fetch the single entity at `path`.
    pub async fn find_resource<T>(&self, path: &str) -> Result<ItemResponse<T>>
    where
        T: DeserializeOwned + Serialize,
    {
        let (data, base) = self.get(path, &Query::new(), true).await?;
        Ok(ItemResponse { base, data })
    }

    /// Fetch a random entity from `path`. Never cached.
    pub async fn random_resource<T>(&self, path: &str) -> Result<ItemResponse<T>>
    where
        T: DeserializeOwned + Serialize,
    {
        let (data, base) = self.get(path, &Query::new(), false).await?;
        Ok(ItemResponse { base, data })
    }

    /// Create an entity under `path`. Requires a token.
    pub async fn create_resource<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.require_token(&Method::POST)?;

        let url = self.build_url(path, None);
        let body = serde_json::to_vec(body)?;
        let response = self
            .send(Method::POST, &url, Some(body), StatusCode::CREATED)
            .await?;
        decode(&response.body)
    }

    /// Update the entity at `path` with the fields present in `patch`.
    ///
    /// The API has no partial updates, so this fetches the current entity,
    /// overwrites the top-level fields that `patch` serializes, and sends the
    /// merged representation. Fields `patch` omits (or serializes as `null`)
    /// keep their current value, which also means a field cannot be cleared
    /// through this call. Requires a token.
    ///
    /// The PATCH response body is ignored; the entity is fetched again once
    /// the server accepts the update.
    pub async fn patch_resource<T, P>(&self, path: &str, patch: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.require_token(&Method::PATCH)?;

        // Merge over a live copy; a cached one may be stale.
        let find_url = self.build_url(path, Some(&Query::new()));
        let current = self
            .send(Method::GET, &find_url, None, StatusCode::OK)
            .await?;
        let current: Value = decode(&current.body)?;
        let merged = merge_patch(current, serde_json::to_value(patch)?)?;

        let url = self.build_url(path, None);
        let body = serde_json::to_vec(&merged)?;
        self.send(Method::PATCH, &url, Some(body), StatusCode::OK).await?;
        self.invalidate(&find_url).await;

        let updated = self
            .send(Method::GET, &find_url, None, StatusCode::OK)
            .await?;
        decode(&updated.body)
    }

    /// Delete the entity at `path`. Requires a token.
    pub async fn delete_resource(&self, path: &str) -> Result<()> {
        self.require_token(&Method::DELETE)?;

        let url = self.build_url(path, None);
        self.send(Method::DELETE, &url, None, StatusCode::NO_CONTENT)
            .await?;
        self.invalidate(&self.build_url(path, Some(&Query::new())))
            .await;
        Ok(())
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Remove every cached response and return how many were removed.
    pub async fn clear_cache(&self) -> usize {
        let count = self.cache.clear().await;
        tracing::debug!(count, "Cache cleared");
        count
    }

    /// Number of cached responses.
    pub async fn cache_size(&self) -> usize {
        self.cache.size().await
    }

    async fn invalidate(&self, url: &str) {
        if self.cache.delete(url).await {
            tracing::debug!(url = %url, "Cache entry invalidated");
        }
    }

    // =========================================================================
    // Internal HTTP Methods
    // =========================================================================

    /// Perform a GET, serving from and populating the cache when enabled
    /// and `cacheable` is set.
    async fn get<T>(
        &self,
        path: &str,
        query: &Query,
        cacheable: bool,
    ) -> Result<(T, BaseResponse)>
    where
        T: DeserializeOwned + Serialize,
    {
        let url = self.build_url(path, Some(query));
        let use_cache = cacheable && self.config.use_in_memory_cache;

        if use_cache {
            if let Some(entry) = self.cache.get(&url).await {
                match serde_json::from_slice::<T>(&entry.raw_body) {
                    Ok(value) => {
                        tracing::debug!(url = %url, "Cache hit");
                        let mut base = entry.base_response;
                        base.cached = true;
                        base.served_from_cache = true;
                        return Ok((value, base));
                    }
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "Discarding undecodable cache entry");
                    }
                }
            } else {
                tracing::debug!(url = %url, "Cache miss");
            }
        }

        let response = self.send(Method::GET, &url, None, StatusCode::OK).await?;
        let value: T = decode(&response.body)?;
        let mut base = BaseResponse::new(
            extract_headers(&response.headers),
            response.status.as_u16(),
        );

        if use_cache {
            match serde_json::to_vec(&value) {
                Ok(raw_body) => {
                    base.cached = true;
                    let entry = CacheEntry {
                        url: url.clone(),
                        base_response: base.clone(),
                        raw_body,
                    };
                    self.cache.set(url.clone(), entry).await;
                    tracing::debug!(url = %url, "Cached response");
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Response not cached");
                }
            }
        }

        Ok((value, base))
    }

    /// Perform a request and check the status against `expected`.
    ///
    /// The body is always read in full. On a status mismatch it is decoded
    /// as an [`ApiErrorBody`].
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        expected: StatusCode,
    ) -> Result<RawResponse> {
        let start = Instant::now();

        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        let duration = start.elapsed();

        tracing::debug!(
            method = %method,
            url = %url,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Received response"
        );

        if status != expected {
            let mut api_error: ApiErrorBody = match serde_json::from_slice(&body) {
                Ok(api_error) => api_error,
                Err(source) => {
                    tracing::warn!(
                        method = %method,
                        url = %url,
                        status = %status.as_u16(),
                        body = %String::from_utf8_lossy(&body),
                        "Request failed with unparseable error body"
                    );
                    return Err(ClientError::ErrorBodyParse {
                        status: status.as_u16(),
                        source,
                    });
                }
            };

            if api_error.code == 0 {
                api_error.code = status.as_u16();
            }

            tracing::warn!(
                method = %method,
                url = %url,
                status = %status.as_u16(),
                duration_ms = %duration.as_millis(),
                error = %api_error,
                "Request failed"
            );
            return Err(ClientError::Api(api_error));
        }

        Ok(RawResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }

    fn require_token(&self, method: &Method) -> Result<()> {
        if self.config.token().is_none() {
            return Err(ClientError::AuthRequired {
                method: method.clone(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for HawApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HawApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Arc-wrapped client for shared ownership.
pub type SharedClient = Arc<HawApiClient>;

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(ClientError::ResponseDecode)
}

/// Overwrite the top-level fields of `current` with the non-null fields of `patch`.
fn merge_patch(current: Value, patch: Value) -> Result<Value> {
    let Value::Object(mut target) = current else {
        return Err(ClientError::InvalidArgument(
            "patch target is not a JSON object".to_string(),
        ));
    };
    let Value::Object(fields) = patch else {
        return Err(ClientError::InvalidArgument(
            "patch must serialize to a JSON object".to_string(),
        ));
    };

    for (key, value) in fields {
        if !value.is_null() {
            target.insert(key, value);
        }
    }
    Ok(Value::Object(target))
}
