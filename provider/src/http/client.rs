//! HTTP client implementation

use std::time::Duration;

use octopus_client::ErrorResponse;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::ProviderError;

/// Header Octopus reads the API key from (`X-Octopus-ApiKey`)
pub const API_KEY_HEADER: &str = "x-octopus-apikey";

/// HTTP client for the Octopus REST API
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client that authenticates every request with `api_key`
    pub fn new(base_url: &str, api_key: &SecretString, timeout: Duration) -> Result<Self, ProviderError> {
        let mut api_key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| ProviderError::ConfigError(format!("invalid API key: {}", e)))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .user_agent(concat!("octoform/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status("GET", path, response).await?;

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let response = check_status("POST", path, response).await?;

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("PUT {}", url);

        let response = self.client.put(&url).json(body).send().await?;
        let response = check_status("PUT", path, response).await?;

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a DELETE request; the response body is ignored
    pub async fn delete(&self, path: &str) -> Result<(), ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        check_status("DELETE", path, response).await?;
        Ok(())
    }
}

/// Map 404 to `NotFound` and any other failure status to `ApiError`
async fn check_status(method: &str, path: &str, response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        debug!("HTTP {} {} not found", method, path);
        return Err(ProviderError::NotFound(path.to_string()));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!("HTTP {} {}: unable to read error body: {}", method, path, e);
            String::new()
        }
    };
    error!("HTTP {} failed: {} - {}", method, status, body);

    let body = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => err.to_string(),
        Err(_) => body,
    };

    Err(ProviderError::ApiError {
        status: status.as_u16(),
        body,
    })
}
