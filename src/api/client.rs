// Reading List Core - Reading list tracker for mobile
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! HTTP client for the import source
//!
//! A thin wrapper around `reqwest::Client` that fetches JSON from the
//! configured import endpoint and maps failures onto `ReadingListError`.
//!
//! # Failure Mapping
//! - Non-2xx status → `ApiRequestFailed` (status code and endpoint attached)
//! - Body that does not deserialize → `InvalidApiResponse`
//! - Connect/timeout/DNS failure → `NetworkError`
//!
//! There is no retry or backoff. A failed import is simply reported and the
//! user can trigger it again.

use crate::error::{ReadingListError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Demo endpoint used when no other endpoint is configured
pub const DEFAULT_IMPORT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest response body snippet kept on an error
const MAX_ERROR_BODY_CHARS: usize = 800;

/// Configuration for ApiClient
/// Provides a builder pattern for client customization
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub use_system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_IMPORT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("reading-list-core/{}", env!("CARGO_PKG_VERSION")),
            use_system_proxy: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}

/// Builder for ClientConfig
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn use_system_proxy(mut self, enable: bool) -> Self {
        self.config.use_system_proxy = enable;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the import endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: Url,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client for the default demo endpoint
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the endpoint is not an absolute
    /// http(s) URL or the user agent is not a valid header value.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ReadingListError::InvalidConfiguration(format!(
                "Invalid import endpoint '{}': {}",
                config.endpoint, e
            ))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ReadingListError::InvalidConfiguration(format!(
                "Import endpoint must be http or https, got '{}'",
                endpoint.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                ReadingListError::InvalidConfiguration(format!("Invalid user agent: {}", e))
            })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut client_builder = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers);

        if !config.use_system_proxy {
            client_builder = client_builder.no_proxy();
        }

        let client = client_builder.build()?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    pub fn builder() -> ClientConfigBuilder {
        ClientConfig::builder()
    }

    /// Configured import endpoint
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET the configured endpoint and deserialize the JSON body
    pub async fn get_json<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!(endpoint = %self.endpoint, "fetching import payload");

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| {
                ReadingListError::network_error(
                    format!("Request to {} failed: {}", self.endpoint, e),
                    e.is_timeout() || e.is_connect(),
                )
            })?;

        if response.status().is_success() {
            self.handle_success_response(response).await
        } else {
            self.handle_error_response(response).await
        }
    }

    /// Handle successful HTTP response
    async fn handle_success_response<T>(&self, response: Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        // Read the body as text first so a parse error can carry a snippet
        let response_text = response.text().await.map_err(|e| {
            ReadingListError::api_failed(
                format!("Failed to read response body: {}", e),
                Some(status.as_u16()),
                Some(self.endpoint.path().to_string()),
            )
        })?;

        serde_json::from_str::<T>(&response_text).map_err(|e| {
            ReadingListError::InvalidApiResponse {
                message: format!("Parse error: {} at line {} col {}", e, e.line(), e.column()),
                response_body: Some(snippet(&response_text)),
            }
        })
    }

    /// Handle error HTTP response
    async fn handle_error_response<T>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let error_body = response.text().await.unwrap_or_default();

        Err(ReadingListError::api_failed(
            format!("{} {}", status, snippet(&error_body)).trim_end().to_string(),
            Some(status.as_u16()),
            Some(self.endpoint.path().to_string()),
        ))
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

// ===== TESTS =====
